use std::ffi::OsString;
use std::path::Path;

use clap::Parser;
use dlg_core::DialogueError;
use dlg_runtime::TextSurface;

mod agent;
mod cli_args;
mod content_loader;
mod error_map;
mod line_tui;
mod logging;
mod models;
mod session;
mod tui;
mod tui_actions;
mod tui_render;
mod tui_state;

pub(crate) use cli_args::{
    AgentArgs, AgentCommand, Cli, ConsentArgs, EligibleArgs, Mode, StateArgs, TokenizeArgs,
    TuiArgs, DEFAULT_LOG_FILE, DEFAULT_STATE_FILE,
};
pub(crate) use content_loader::load_content_dir;
#[cfg(test)]
pub(crate) use content_loader::resolve_content_dir;
pub(crate) use error_map::{
    emit_error, map_cli_content_path, map_cli_content_read, map_cli_log_open, map_tui_io,
};
pub(crate) use line_tui::run_tui_line_mode;
#[cfg(test)]
pub(crate) use line_tui::{handle_line_cmd, run_tui_line_mode_with_io};
pub(crate) use logging::{init_logging, LogTarget};
pub(crate) use models::{LineCommandAction, LoadedContent, DIALOGUE_FILE, EFFECTS_FILE};
pub(crate) use session::{click, open_director, open_store, parse_consent, resolve_state_file};

pub fn run_cli_from_args<I, T>(args: I) -> i32
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli = match Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(error) => {
            let _ = error.print();
            return error.exit_code();
        }
    };
    match run(cli) {
        Ok(code) => code,
        Err(error) => emit_error(error),
    }
}

fn run(cli: Cli) -> Result<i32, DialogueError> {
    match cli.command {
        Mode::Agent(args) => run_agent(args),
        Mode::Tui(args) => run_tui(args),
    }
}

fn run_agent(args: AgentArgs) -> Result<i32, DialogueError> {
    init_logging(LogTarget::Stderr)?;
    agent::run_agent(args)
}

fn run_tui(args: TuiArgs) -> Result<i32, DialogueError> {
    let log_file = args
        .log_file
        .unwrap_or_else(|| DEFAULT_LOG_FILE.to_string());
    init_logging(LogTarget::File(Path::new(&log_file)))?;

    let state_file = resolve_state_file(args.state_file);
    let content = load_content_dir(&args.content_dir)?;
    let (mut director, load_error) =
        open_director(&content, &state_file, Some(TextSurface::default()));
    if let Some(load_error) = load_error {
        eprintln!("dialogue disabled: {}", load_error);
    }

    tui::run_tui_ratatui_mode(&content, &state_file, &mut director)
}

#[cfg(test)]
mod tests;
