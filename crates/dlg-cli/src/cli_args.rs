use clap::{Args, Parser, Subcommand};

pub(crate) const DEFAULT_STATE_FILE: &str = ".dialogue/state.json";
pub(crate) const DEFAULT_LOG_FILE: &str = ".dialogue/dialogue.log";

#[derive(Debug, Parser)]
#[command(name = "dialogue-player")]
#[command(about = "Typewriter dialogue player and inspection CLI")]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub(crate) command: Mode,
}

#[derive(Debug, Subcommand)]
pub(crate) enum Mode {
    Agent(AgentArgs),
    Tui(TuiArgs),
}

#[derive(Debug, Args)]
pub(crate) struct AgentArgs {
    #[command(subcommand)]
    pub(crate) command: AgentCommand,
}

#[derive(Debug, Subcommand)]
pub(crate) enum AgentCommand {
    /// Print the stored game state as JSON.
    State(StateArgs),
    /// Clear the stored game state.
    Reset(StateArgs),
    /// Record the immersion consent answer.
    Consent(ConsentArgs),
    /// List the groups eligible under the stored state.
    Eligible(EligibleArgs),
    /// Print the render nodes of a line of dialogue text.
    Tokenize(TokenizeArgs),
}

#[derive(Debug, Args)]
pub(crate) struct StateArgs {
    #[arg(long = "state-file")]
    pub(crate) state_file: Option<String>,
}

#[derive(Debug, Args)]
pub(crate) struct ConsentArgs {
    #[arg(long = "state-file")]
    pub(crate) state_file: Option<String>,
    #[arg(long = "value")]
    pub(crate) value: String,
}

#[derive(Debug, Args)]
pub(crate) struct EligibleArgs {
    #[arg(long = "content-dir")]
    pub(crate) content_dir: String,
    #[arg(long = "state-file")]
    pub(crate) state_file: Option<String>,
}

#[derive(Debug, Args)]
pub(crate) struct TokenizeArgs {
    #[arg(long = "text")]
    pub(crate) text: String,
    #[arg(long = "content-dir")]
    pub(crate) content_dir: Option<String>,
}

#[derive(Debug, Args)]
pub(crate) struct TuiArgs {
    #[arg(long = "content-dir")]
    pub(crate) content_dir: String,
    #[arg(long = "state-file")]
    pub(crate) state_file: Option<String>,
    #[arg(long = "log-file")]
    pub(crate) log_file: Option<String>,
}
