mod conditions;
mod director;
mod input;
mod store;
mod surface;
mod tokenizer;
mod typewriter;

pub use conditions::{evaluate, evaluate_all, Evaluation};
pub use director::{DialogueDirector, DirectorOptions};
pub use input::{is_codeword_char, DialogueInput};
pub use store::{
    parse_stored_state, unix_millis, FileBackend, MemoryBackend, StateBackend, StateStore,
};
pub use surface::{RenderSurface, StyledChar, TextSurface};
pub use tokenizer::{is_effect_code, tokenize, MARKER};
pub use typewriter::{PendingTimer, Typewriter, TypewriterConfig, TypewriterPoll, TypewriterState};
