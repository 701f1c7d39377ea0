pub mod error;
pub mod state;
pub mod types;

pub use error::DialogueError;
pub use state::*;
pub use types::*;
