use std::collections::VecDeque;

use dlg_core::{
    DialogueError, DialogueEvent, DialogueGroup, DialogueScript, EffectRegistry,
    FLAG_SEEN_INTRO, FLAG_TALK_REVEAL,
};
use tracing::{debug, info};

use crate::conditions::{evaluate, evaluate_all};
use crate::input::{is_codeword_char, DialogueInput};
use crate::store::StateStore;
use crate::surface::RenderSurface;
use crate::tokenizer::tokenize;
use crate::typewriter::{Typewriter, TypewriterConfig, TypewriterPoll, TypewriterState};

include!("lifecycle.rs");
include!("flow.rs");
include!("boundary.rs");
include!("tests.rs");
