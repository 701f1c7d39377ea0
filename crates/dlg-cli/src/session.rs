use dlg_api::{create_director_from_json, create_inert_director, CreateDirectorFromJsonOptions};
use dlg_core::DialogueError;
use dlg_runtime::{DialogueDirector, FileBackend, RenderSurface, StateStore, TypewriterConfig};
use tracing::error;

use crate::{LoadedContent, DEFAULT_STATE_FILE};

pub(crate) fn resolve_state_file(state_file: Option<String>) -> String {
    state_file.unwrap_or_else(|| DEFAULT_STATE_FILE.to_string())
}

pub(crate) fn open_store(state_file: &str) -> StateStore {
    StateStore::open(FileBackend::new(state_file))
}

/// Builds the player's director without starting a group. A script that
/// fails to load is reported once and leaves an inert director on a freshly
/// opened store so the host keeps running.
pub(crate) fn open_director<S: RenderSurface + Clone>(
    content: &LoadedContent,
    state_file: &str,
    surface: Option<S>,
) -> (DialogueDirector<S>, Option<DialogueError>) {
    let typewriter = TypewriterConfig::default();
    let options = CreateDirectorFromJsonOptions {
        dialogue_json: content.dialogue_json.clone(),
        effects_json: content.effects_json.clone(),
        store: open_store(state_file),
        surface: surface.clone(),
        typewriter: typewriter.clone(),
        autostart: false,
    };
    match create_director_from_json(options) {
        Ok(director) => (director, None),
        Err(load_error) => {
            error!(error = %load_error, "dialogue script failed to load, dialogue disabled");
            (
                create_inert_director(open_store(state_file), surface, typewriter),
                Some(load_error),
            )
        }
    }
}

/// Host-side click: count it, persist, then deliver the generic advance.
pub(crate) fn click<S: RenderSurface>(
    director: &mut DialogueDirector<S>,
) -> Result<(), DialogueError> {
    director.store_mut().increment_clicks()?;
    director.advance()
}

pub(crate) fn parse_consent(raw: &str) -> Result<bool, DialogueError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "y" | "yes" | "true" => Ok(true),
        "n" | "no" | "false" => Ok(false),
        other => Err(DialogueError::new(
            "CLI_CONSENT_PARSE",
            format!("Invalid consent value: {}", other),
        )),
    }
}
