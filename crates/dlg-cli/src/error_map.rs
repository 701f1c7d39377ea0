use dlg_core::DialogueError;
use std::fmt::Display;

fn map_error(code: &'static str, error: impl Display) -> DialogueError {
    DialogueError::new(code, error.to_string())
}

pub(crate) fn emit_error(error: DialogueError) -> i32 {
    println!("RESULT:ERROR");
    println!("ERROR_CODE:{}", error.code);
    println!(
        "ERROR_MSG_JSON:{}",
        serde_json::to_string(&error.message).expect("string json")
    );
    1
}

pub(crate) fn map_tui_io(error: std::io::Error) -> DialogueError {
    map_error("TUI_IO", error)
}

pub(crate) fn map_cli_content_path(error: std::io::Error) -> DialogueError {
    map_error("CLI_CONTENT_PATH", error)
}

pub(crate) fn map_cli_content_read(error: std::io::Error) -> DialogueError {
    map_error("CLI_CONTENT_READ", error)
}

pub(crate) fn map_cli_log_open(error: std::io::Error) -> DialogueError {
    map_error("CLI_LOG_OPEN", error)
}
