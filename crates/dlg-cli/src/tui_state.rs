use dlg_core::DialogueEvent;

#[derive(Debug, Default)]
pub(crate) struct TuiUiState {
    pub(crate) consent_pending: bool,
    pub(crate) help_visible: bool,
    pub(crate) status: String,
}

impl TuiUiState {
    pub(crate) fn new(consent_pending: bool) -> Self {
        Self {
            consent_pending,
            help_visible: false,
            status: "ready".to_string(),
        }
    }

    /// Folds director events into the status line. The last one wins.
    pub(crate) fn absorb_events(&mut self, events: Vec<DialogueEvent>) {
        for event in events {
            if let Some(status) = describe_event(&event) {
                self.status = status;
            }
        }
    }
}

pub(crate) fn describe_event(event: &DialogueEvent) -> Option<String> {
    let text = match event {
        DialogueEvent::GroupStarted { group } => format!("playing {}", group),
        DialogueEvent::LineStarted { .. } => return None,
        DialogueEvent::FlagSet { flag } => format!("flag {} set", flag),
        DialogueEvent::CodewordMatched { codeword, group, .. } => {
            format!("codeword \"{}\" unlocked {}", codeword, group)
        }
        DialogueEvent::GroupsExhausted => "nothing more to say".to_string(),
        DialogueEvent::StateReset => "state reset".to_string(),
        DialogueEvent::StateReplaced => "state updated by another session".to_string(),
    };
    Some(text)
}

#[cfg(test)]
mod tui_state_tests {
    use super::*;

    #[test]
    fn absorb_events_keeps_last_describable_event() {
        let mut ui = TuiUiState::new(false);
        ui.absorb_events(vec![
            DialogueEvent::GroupStarted {
                group: "intro".to_string(),
            },
            DialogueEvent::LineStarted {
                group: "intro".to_string(),
                line: 0,
            },
        ]);
        assert_eq!(ui.status, "playing intro");

        ui.absorb_events(Vec::new());
        assert_eq!(ui.status, "playing intro");
    }
}
