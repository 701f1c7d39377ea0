use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use dlg_core::DialogueError;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::map_cli_log_open;

const DEFAULT_FILTER: &str = "dlg_runtime=info,dlg_api=info,dlg_cli=info";

pub(crate) enum LogTarget<'a> {
    Stderr,
    /// Used while the terminal is in the alternate screen.
    File(&'a Path),
}

/// Installs the global subscriber. `RUST_LOG` overrides the default filter.
/// A subscriber installed earlier in the process is kept.
pub(crate) fn init_logging(target: LogTarget<'_>) -> Result<(), DialogueError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_FILTER.into());

    let (stderr_layer, file_layer) = match target {
        LogTarget::Stderr => (
            Some(tracing_subscriber::fmt::layer().with_writer(std::io::stderr)),
            None,
        ),
        LogTarget::File(path) => {
            if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
                fs::create_dir_all(parent).map_err(map_cli_log_open)?;
            }
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(map_cli_log_open)?;
            (
                None,
                Some(
                    tracing_subscriber::fmt::layer()
                        .with_ansi(false)
                        .with_writer(Mutex::new(file)),
                ),
            )
        }
    };

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init();
    Ok(())
}
