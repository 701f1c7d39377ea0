use std::io::{self, BufRead, Write};

use dlg_core::DialogueError;
use dlg_runtime::{DialogueDirector, DialogueInput, TextSurface};
use tracing::info;

use crate::tui_state::describe_event;
use crate::{click, map_tui_io, parse_consent, LineCommandAction, LoadedContent};

const LINE_HELP: &str = "commands: <enter> next | :click | :reset | :state | :help | :quit | any other text is typed";

pub(crate) fn run_tui_line_mode(
    content: &LoadedContent,
    state_file: &str,
    director: &mut DialogueDirector<TextSurface>,
) -> Result<i32, DialogueError> {
    let stdin = io::stdin();
    let mut reader = stdin.lock();
    let mut writer = io::stdout();
    run_tui_line_mode_with_io(content, state_file, director, &mut reader, &mut writer)
}

/// Line-oriented player for pipes and dumb terminals. The reveal clock is
/// virtual: every line is played to its end before the next prompt.
pub(crate) fn run_tui_line_mode_with_io(
    content: &LoadedContent,
    state_file: &str,
    director: &mut DialogueDirector<TextSurface>,
    reader: &mut dyn BufRead,
    writer: &mut dyn Write,
) -> Result<i32, DialogueError> {
    writeln!(writer, "{}", content.title).map_err(map_tui_io)?;
    writeln!(writer, "state: {}", state_file).map_err(map_tui_io)?;
    writeln!(writer, "{}", LINE_HELP).map_err(map_tui_io)?;

    if director.store().state().immersion_consent.is_none() {
        let Some(raw) = prompt_input_from("allow immersive effects? (y/n) ", reader, writer)?
        else {
            return finish(director);
        };
        let consent = parse_consent(&raw)?;
        director.store_mut().set_consent(consent)?;
        info!(consent, "immersion consent recorded");
    }

    let mut clock = 0u64;
    let mut shown = String::new();
    director.start_next_group();

    loop {
        clock = director.run_until_idle(clock)?;
        for event in director.drain_events() {
            if let Some(text) = describe_event(&event) {
                writeln!(writer, "[{}]", text).map_err(map_tui_io)?;
            }
        }
        let text = director
            .surface()
            .map(TextSurface::plain_text)
            .unwrap_or_default();
        if text != shown && !text.is_empty() {
            writeln!(writer, "{}", text).map_err(map_tui_io)?;
        }
        shown = text;

        let Some(raw) = prompt_input_from("> ", reader, writer)? else {
            return finish(director);
        };
        let mut emit = |line: String| writeln!(writer, "{}", line).map_err(map_tui_io);
        match handle_line_cmd(raw.as_str(), director, &mut emit)? {
            LineCommandAction::Quit => return finish(director),
            LineCommandAction::Continue | LineCommandAction::NotHandled => {}
        }
    }
}

pub(crate) fn handle_line_cmd(
    raw: &str,
    director: &mut DialogueDirector<TextSurface>,
    emit: &mut dyn FnMut(String) -> Result<(), DialogueError>,
) -> Result<LineCommandAction, DialogueError> {
    match raw.trim() {
        "" | ":next" => {
            director.handle_input(DialogueInput::Confirm)?;
            Ok(LineCommandAction::Continue)
        }
        ":click" => {
            click(director)?;
            Ok(LineCommandAction::Continue)
        }
        ":reset" => {
            director.handle_input(DialogueInput::Reset)?;
            Ok(LineCommandAction::Continue)
        }
        ":state" => {
            let payload = serde_json::to_string(director.store().state())
                .map_err(|error| DialogueError::new("CLI_JSON", error.to_string()))?;
            emit(payload)?;
            Ok(LineCommandAction::Continue)
        }
        ":help" => {
            emit(LINE_HELP.to_string())?;
            Ok(LineCommandAction::Continue)
        }
        ":quit" => {
            emit("bye".to_string())?;
            Ok(LineCommandAction::Quit)
        }
        typed if !typed.starts_with(':') => {
            for ch in typed.chars() {
                director.handle_input(DialogueInput::Char(ch))?;
            }
            Ok(LineCommandAction::Continue)
        }
        _ => Ok(LineCommandAction::NotHandled),
    }
}

fn finish(director: &mut DialogueDirector<TextSurface>) -> Result<i32, DialogueError> {
    director.store_mut().save()?;
    Ok(0)
}

/// Reads one line. `None` means the input reached end of file.
pub(crate) fn prompt_input_from(
    prefix: &str,
    reader: &mut dyn BufRead,
    writer: &mut dyn Write,
) -> Result<Option<String>, DialogueError> {
    write!(writer, "{}", prefix).map_err(map_tui_io)?;
    writer.flush().map_err(map_tui_io)?;
    let mut input = String::new();
    if reader.read_line(&mut input).map_err(map_tui_io)? == 0 {
        return Ok(None);
    }
    Ok(Some(input.trim_end_matches(&['\r', '\n'][..]).to_string()))
}
