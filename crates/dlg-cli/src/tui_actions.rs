use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use dlg_core::DialogueError;
use dlg_runtime::{DialogueDirector, DialogueInput, RenderSurface};
use tracing::info;

use crate::click;
use crate::tui_state::TuiUiState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TuiAction {
    Quit,
    ToggleHelp,
    Consent(bool),
    Click,
    Input(DialogueInput),
    Ignore,
}

/// Enter confirms, Space clicks and Backspace resets. Every other printable key
/// is dialogue input, so quitting is bound to Esc and Ctrl+C only.
pub(crate) fn key_action(key: KeyEvent, ui: &TuiUiState) -> TuiAction {
    if key.code == KeyCode::Esc {
        return TuiAction::Quit;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => TuiAction::Quit,
            _ => TuiAction::Ignore,
        };
    }
    if key.code == KeyCode::Tab {
        return TuiAction::ToggleHelp;
    }

    if ui.consent_pending {
        return match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') => TuiAction::Consent(true),
            KeyCode::Char('n') | KeyCode::Char('N') => TuiAction::Consent(false),
            _ => TuiAction::Ignore,
        };
    }

    match key.code {
        KeyCode::Enter => TuiAction::Input(DialogueInput::Confirm),
        KeyCode::Char(' ') => TuiAction::Click,
        KeyCode::Backspace => TuiAction::Input(DialogueInput::Reset),
        KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::ALT) => {
            TuiAction::Input(DialogueInput::Char(ch))
        }
        _ => TuiAction::Ignore,
    }
}

/// Applies one action. Returns true when the player should quit.
pub(crate) fn apply_action<S: RenderSurface>(
    action: TuiAction,
    director: &mut DialogueDirector<S>,
    ui: &mut TuiUiState,
) -> Result<bool, DialogueError> {
    match action {
        TuiAction::Quit => return Ok(true),
        TuiAction::ToggleHelp => ui.help_visible = !ui.help_visible,
        TuiAction::Consent(consent) => {
            director.store_mut().set_consent(consent)?;
            info!(consent, "immersion consent recorded");
            ui.consent_pending = false;
            ui.status = if consent {
                "immersion enabled".to_string()
            } else {
                "immersion declined".to_string()
            };
            director.start_next_group();
        }
        TuiAction::Click => click(director)?,
        TuiAction::Input(input) => director.handle_input(input)?,
        TuiAction::Ignore => {}
    }
    Ok(false)
}

#[cfg(test)]
mod tui_actions_tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn key_action_maps_dialogue_keys() {
        let ui = TuiUiState::new(false);
        assert_eq!(
            key_action(key(KeyCode::Enter), &ui),
            TuiAction::Input(DialogueInput::Confirm)
        );
        assert_eq!(key_action(key(KeyCode::Char(' ')), &ui), TuiAction::Click);
        assert_eq!(
            key_action(key(KeyCode::Backspace), &ui),
            TuiAction::Input(DialogueInput::Reset)
        );
        assert_eq!(
            key_action(key(KeyCode::Char('q')), &ui),
            TuiAction::Input(DialogueInput::Char('q'))
        );
        assert_eq!(key_action(key(KeyCode::Esc), &ui), TuiAction::Quit);
        assert_eq!(
            key_action(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL), &ui),
            TuiAction::Quit
        );
        assert_eq!(key_action(key(KeyCode::Tab), &ui), TuiAction::ToggleHelp);
    }

    #[test]
    fn consent_prompt_only_accepts_yes_or_no() {
        let ui = TuiUiState::new(true);
        assert_eq!(
            key_action(key(KeyCode::Char('y')), &ui),
            TuiAction::Consent(true)
        );
        assert_eq!(
            key_action(key(KeyCode::Char('N')), &ui),
            TuiAction::Consent(false)
        );
        assert_eq!(key_action(key(KeyCode::Enter), &ui), TuiAction::Ignore);
    }
}
