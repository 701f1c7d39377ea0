use dlg_core::{BASE_CHAR_CLASS, NBSP};
use dlg_runtime::{StyledChar, TextSurface};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};
use ratatui::Frame;

use crate::tui_state::TuiUiState;
use crate::LoadedContent;

const ELLIPSIS: &str = "…";

/// Terminal stand-in for an effect class. Unknown classes render plain.
pub(crate) fn style_for_class(class: &str) -> Style {
    let class = class.strip_prefix("effect-").unwrap_or(class);
    match class {
        "red" | "blood" => Style::default().fg(Color::Red),
        "blue" => Style::default().fg(Color::Blue),
        "green" => Style::default().fg(Color::Green),
        "yellow" | "gold" => Style::default().fg(Color::Yellow),
        "bold" | "shout" => Style::default().add_modifier(Modifier::BOLD),
        "dim" | "whisper" => Style::default().add_modifier(Modifier::DIM),
        "italic" | "wave" => Style::default().add_modifier(Modifier::ITALIC),
        "shake" => Style::default().add_modifier(Modifier::SLOW_BLINK),
        "glitch" | "evil" | "obfuscate" => Style::default()
            .fg(Color::Magenta)
            .add_modifier(Modifier::RAPID_BLINK),
        _ => Style::default(),
    }
}

pub(crate) fn style_for_classes<'a>(base: Style, classes: impl IntoIterator<Item = &'a str>) -> Style {
    classes
        .into_iter()
        .filter(|class| *class != BASE_CHAR_CLASS)
        .fold(base, |style, class| style.patch(style_for_class(class)))
}

pub(crate) fn dialogue_lines(surface: &TextSurface) -> Vec<Line<'static>> {
    let base = surface
        .line_effect()
        .map(style_for_class)
        .unwrap_or_default();
    surface
        .rows()
        .iter()
        .map(|row| Line::from(row.iter().map(|styled| styled_span(base, styled)).collect::<Vec<_>>()))
        .collect()
}

fn styled_span(base: Style, styled: &StyledChar) -> Span<'static> {
    let ch = if styled.ch == NBSP { ' ' } else { styled.ch };
    Span::styled(
        ch.to_string(),
        style_for_classes(base, styled.classes.iter().map(String::as_str)),
    )
}

fn truncate_to_width(value: &str, width: usize) -> String {
    if width == 0 {
        return String::new();
    }
    let chars = value.chars().collect::<Vec<_>>();
    if chars.len() <= width {
        return value.to_string();
    }
    if width == 1 {
        return ELLIPSIS.to_string();
    }
    let mut out = chars.into_iter().take(width - 1).collect::<String>();
    out.push_str(ELLIPSIS);
    out
}

pub(crate) struct RenderContext<'a> {
    pub(crate) content: &'a LoadedContent,
    pub(crate) state_file: &'a str,
    pub(crate) surface: Option<&'a TextSurface>,
    pub(crate) click_count: u64,
    pub(crate) input_buffer: &'a str,
    pub(crate) typing: bool,
}

pub(crate) fn render_tui(frame: &mut Frame<'_>, ui: &TuiUiState, context: &RenderContext<'_>) {
    let content_width = (frame.area().width as usize).saturating_sub(2).max(16);

    let header_text = truncate_to_width(
        format!("{} | {}", context.content.title, context.content.root.display()).as_str(),
        content_width,
    );
    let state_text = truncate_to_width(
        format!(
            "state: {} | clicks: {} | typed: {}",
            context.state_file, context.click_count, context.input_buffer
        )
        .as_str(),
        content_width,
    );
    let status_text = truncate_to_width(
        format!(
            "status: {}{}",
            ui.status,
            if context.typing { " (typing)" } else { "" }
        )
        .as_str(),
        content_width,
    );
    let gray = Style::default().fg(Color::Gray);

    let mut lines_out: Vec<Line<'_>> = vec![
        Line::from(header_text),
        Line::from(Span::styled(state_text, gray)),
        Line::from(Span::styled(status_text, gray)),
        Line::from(Span::styled("─".repeat(content_width), gray)),
    ];

    if ui.consent_pending {
        lines_out.push(Line::from(Span::styled(
            "This page uses immersive effects. Allow them? (y/n)",
            Style::default().fg(Color::Cyan),
        )));
    } else if let Some(surface) = context.surface {
        lines_out.extend(dialogue_lines(surface));
    }

    lines_out.push(Line::from(Span::styled("─".repeat(content_width), gray)));
    lines_out.push(Line::from(Span::styled(
        truncate_to_width(
            "keys: enter confirm | space click | type codewords | backspace reset | tab help | esc quit",
            content_width,
        ),
        Style::default().fg(Color::Yellow),
    )));
    if ui.help_visible {
        lines_out.push(Line::from(Span::styled(
            truncate_to_width(
                "enter reveals the line or moves on. clicks and codewords unlock new dialogue.",
                content_width,
            ),
            Style::default().fg(Color::Magenta),
        )));
    }

    let paragraph = Paragraph::new(lines_out).wrap(Wrap { trim: false });
    frame.render_widget(paragraph, frame.area());
}
