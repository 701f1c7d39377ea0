use std::fs;
use std::path::{Path, PathBuf};

use dlg_core::DialogueError;
use tracing::warn;

use crate::{map_cli_content_path, map_cli_content_read, LoadedContent, DIALOGUE_FILE, EFFECTS_FILE};

pub(crate) fn load_content_dir(content_dir: &str) -> Result<LoadedContent, DialogueError> {
    let root = resolve_content_dir(content_dir)?;
    let dialogue_path = root.join(DIALOGUE_FILE);
    if !dialogue_path.is_file() {
        return Err(DialogueError::new(
            "CLI_CONTENT_NOT_FOUND",
            format!("dialogue script does not exist: {}", dialogue_path.display()),
        ));
    }
    let dialogue_json = fs::read_to_string(&dialogue_path).map_err(map_cli_content_read)?;
    let effects_json = read_optional(&root.join(EFFECTS_FILE));
    let title = format!(
        "Dialogue {}",
        root.file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("unknown")
    );

    Ok(LoadedContent {
        root,
        title,
        dialogue_json,
        effects_json,
    })
}

pub(crate) fn resolve_content_dir(content_dir: &str) -> Result<PathBuf, DialogueError> {
    let path = PathBuf::from(content_dir);
    let absolute = if path.is_absolute() {
        path
    } else {
        std::env::current_dir()
            .map_err(map_cli_content_path)?
            .join(path)
    };

    if !absolute.exists() {
        return Err(DialogueError::new(
            "CLI_CONTENT_NOT_FOUND",
            format!("content-dir does not exist: {}", absolute.display()),
        ));
    }

    if !absolute.is_dir() {
        return Err(DialogueError::new(
            "CLI_CONTENT_NOT_DIR",
            format!("content-dir is not a directory: {}", absolute.display()),
        ));
    }

    Ok(absolute)
}

/// The effect registry is optional; an unreadable file behaves like a missing one.
fn read_optional(path: &Path) -> Option<String> {
    if !path.exists() {
        return None;
    }
    match fs::read_to_string(path) {
        Ok(content) => Some(content),
        Err(error) => {
            warn!(path = %path.display(), %error, "effect registry unreadable");
            None
        }
    }
}
