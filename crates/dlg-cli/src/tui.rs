#[cfg(coverage)]
pub(super) fn run_tui_ratatui_mode(
    content: &super::LoadedContent,
    state_file: &str,
    director: &mut dlg_runtime::DialogueDirector<dlg_runtime::TextSurface>,
) -> Result<i32, dlg_core::DialogueError> {
    super::run_tui_line_mode(content, state_file, director)
}

#[cfg(not(coverage))]
mod rich {
    use std::io;
    use std::time::{Duration, Instant};

    use crossterm::event::{self, Event, KeyEventKind};
    use crossterm::terminal::{
        disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
    };
    use crossterm::ExecutableCommand;
    use dlg_core::DialogueError;
    use dlg_runtime::{DialogueDirector, TextSurface};
    use ratatui::backend::CrosstermBackend;
    use ratatui::Terminal;
    use tracing::info;

    use crate::tui_actions::{apply_action, key_action};
    use crate::tui_render::{render_tui, RenderContext};
    use crate::tui_state::TuiUiState;
    use crate::{map_tui_io, LoadedContent};

    /// Longest wait between frames when no reveal is scheduled, so writes from
    /// other sessions still show up.
    const IDLE_POLL_MS: u64 = 100;

    struct TuiTerminal {
        terminal: Terminal<CrosstermBackend<io::Stdout>>,
    }

    impl TuiTerminal {
        fn new() -> Result<Self, DialogueError> {
            enable_raw_mode().map_err(map_tui_io)?;
            io::stdout()
                .execute(EnterAlternateScreen)
                .map_err(map_tui_io)?;
            let backend = CrosstermBackend::new(io::stdout());
            let terminal = Terminal::new(backend).map_err(map_tui_io)?;
            Ok(Self { terminal })
        }

        fn terminal_mut(&mut self) -> &mut Terminal<CrosstermBackend<io::Stdout>> {
            &mut self.terminal
        }
    }

    impl Drop for TuiTerminal {
        fn drop(&mut self) {
            let _ = disable_raw_mode();
            let _ = io::stdout().execute(LeaveAlternateScreen);
        }
    }

    pub(super) fn run_tui_ratatui_mode(
        content: &LoadedContent,
        state_file: &str,
        director: &mut DialogueDirector<TextSurface>,
    ) -> Result<i32, DialogueError> {
        let mut terminal = TuiTerminal::new()?;
        let consent_pending = director.store().state().immersion_consent.is_none();
        let mut ui = TuiUiState::new(consent_pending);
        if !consent_pending {
            director.start_next_group();
        }

        let started = Instant::now();
        loop {
            let now = elapsed_ms(started);
            if let Err(error) = director.sync_state() {
                ui.status = error.message;
            }
            let wake_at = director.tick(now)?;
            ui.absorb_events(director.drain_events());

            terminal
                .terminal_mut()
                .draw(|frame| {
                    let state = director.store().state();
                    render_tui(
                        frame,
                        &ui,
                        &RenderContext {
                            content,
                            state_file,
                            surface: director.surface(),
                            click_count: state.click_count,
                            input_buffer: state.input_buffer.as_str(),
                            typing: director.is_typing(),
                        },
                    )
                })
                .map_err(map_tui_io)?;

            let timeout = wake_at
                .map(|wake_at| wake_at.saturating_sub(now))
                .unwrap_or(IDLE_POLL_MS)
                .min(IDLE_POLL_MS);
            if !event::poll(Duration::from_millis(timeout)).map_err(map_tui_io)? {
                continue;
            }

            let Event::Key(key) = event::read().map_err(map_tui_io)? else {
                continue;
            };
            if key.kind != KeyEventKind::Press {
                continue;
            }
            let action = key_action(key, &ui);
            match apply_action(action, director, &mut ui) {
                Ok(true) => break,
                Ok(false) => {}
                Err(error) => ui.status = error.message,
            }
        }

        director.store_mut().save()?;
        info!("player closed, state flushed");
        Ok(0)
    }

    fn elapsed_ms(started: Instant) -> u64 {
        u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX)
    }
}

#[cfg(not(coverage))]
pub(super) fn run_tui_ratatui_mode(
    content: &super::LoadedContent,
    state_file: &str,
    director: &mut dlg_runtime::DialogueDirector<dlg_runtime::TextSurface>,
) -> Result<i32, dlg_core::DialogueError> {
    use std::io::IsTerminal;

    if !std::io::stdin().is_terminal() || !std::io::stdout().is_terminal() {
        return super::run_tui_line_mode(content, state_file, director);
    }
    rich::run_tui_ratatui_mode(content, state_file, director)
}
