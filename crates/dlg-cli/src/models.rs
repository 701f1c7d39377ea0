use std::path::PathBuf;

pub(crate) const DIALOGUE_FILE: &str = "dialogue.json";
pub(crate) const EFFECTS_FILE: &str = "effects.json";

#[derive(Debug, Clone)]
pub(crate) struct LoadedContent {
    pub(crate) root: PathBuf,
    pub(crate) title: String,
    pub(crate) dialogue_json: String,
    pub(crate) effects_json: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LineCommandAction {
    NotHandled,
    Continue,
    Quit,
}
