use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Class carried by every revealed character, on top of any effect classes.
pub const BASE_CHAR_CLASS: &str = "char";
pub const NBSP: char = '\u{00A0}';

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodewordOption {
    pub string: String,
}

/// A declarative condition gating dialogue-group eligibility.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Trigger {
    None,
    Always,
    Clicks { required: u64 },
    Flag { flag: String, expected: bool },
    Codeword { required: Vec<CodewordOption> },
    Unknown { kind: String },
}

impl Trigger {
    pub fn kind_name(&self) -> &str {
        match self {
            Self::None => "none",
            Self::Always => "always",
            Self::Clicks { .. } => "clicks",
            Self::Flag { .. } => "flag",
            Self::Codeword { .. } => "codeword",
            Self::Unknown { kind } => kind.as_str(),
        }
    }

    pub fn is_codeword(&self) -> bool {
        matches!(self, Self::Codeword { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogueLine {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub texteffect: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogueGroup {
    pub name: String,
    pub triggers: Vec<Trigger>,
    pub lines: Vec<DialogueLine>,
    pub on_complete_flag: Option<String>,
}

impl DialogueGroup {
    pub fn last_line_index(&self) -> Option<usize> {
        self.lines.len().checked_sub(1)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DialogueScript {
    pub groups: Vec<DialogueGroup>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectEntry {
    #[serde(rename = "className")]
    pub class_name: String,
}

/// Single-character effect code to class name. Read-only once loaded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EffectRegistry {
    entries: BTreeMap<char, EffectEntry>,
}

impl EffectRegistry {
    pub fn new(entries: BTreeMap<char, EffectEntry>) -> Self {
        Self { entries }
    }

    pub fn class_for(&self, code: char) -> Option<&str> {
        self.entries.get(&code).map(|entry| entry.class_name.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&char, &EffectEntry)> {
        self.entries.iter()
    }
}

impl FromIterator<(char, &'static str)> for EffectRegistry {
    fn from_iter<I: IntoIterator<Item = (char, &'static str)>>(iter: I) -> Self {
        Self::new(
            iter.into_iter()
                .map(|(code, class_name)| {
                    (
                        code,
                        EffectEntry {
                            class_name: class_name.to_string(),
                        },
                    )
                })
                .collect(),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum RenderNode {
    Character { text: char, classes: Vec<String> },
    Pause { duration_ms: u64 },
    Break { count: u32 },
    Next { count: u32 },
}

impl RenderNode {
    pub fn plain(ch: char) -> Self {
        Self::Character {
            text: if ch == ' ' { NBSP } else { ch },
            classes: vec![BASE_CHAR_CLASS.to_string()],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogueEvent {
    GroupStarted {
        group: String,
    },
    LineStarted {
        group: String,
        line: usize,
    },
    FlagSet {
        flag: String,
    },
    CodewordMatched {
        codeword: String,
        group: String,
        trigger: Trigger,
    },
    GroupsExhausted,
    StateReset,
    StateReplaced,
}
