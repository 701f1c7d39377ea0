use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub const FLAG_SEEN_INTRO: &str = "seenIntro";
pub const FLAG_TALK_REVEAL: &str = "talkReveal";
pub const FLAG_SEEN_TALK_REVEAL: &str = "seenTalkReveal";

/// Newest characters kept in the rolling input buffer.
pub const INPUT_BUFFER_LIMIT: usize = 64;

pub fn default_flags() -> BTreeMap<String, bool> {
    [FLAG_SEEN_INTRO, FLAG_TALK_REVEAL, FLAG_SEEN_TALK_REVEAL]
        .into_iter()
        .map(|name| (name.to_string(), false))
        .collect()
}

/// Persistent game state shared by the dialogue engine and the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    pub click_count: u64,
    pub flags: BTreeMap<String, bool>,
    pub input_buffer: String,
    pub immersion_consent: Option<bool>,
    /// Milliseconds since the unix epoch.
    pub start_time: u64,
}

impl GameState {
    pub fn new(start_time: u64) -> Self {
        Self {
            click_count: 0,
            flags: default_flags(),
            input_buffer: String::new(),
            immersion_consent: None,
            start_time,
        }
    }

    pub fn flag(&self, name: &str) -> bool {
        self.flags.get(name).copied().unwrap_or(false)
    }

    pub fn set_flag(&mut self, name: &str, value: bool) {
        self.flags.insert(name.to_string(), value);
    }

    pub fn push_input(&mut self, ch: char) {
        self.input_buffer.extend(ch.to_lowercase());
        let overflow = self
            .input_buffer
            .chars()
            .count()
            .saturating_sub(INPUT_BUFFER_LIMIT);
        if overflow > 0 {
            self.input_buffer = self.input_buffer.chars().skip(overflow).collect();
        }
    }

    pub fn clear_input(&mut self) {
        self.input_buffer.clear();
    }
}
