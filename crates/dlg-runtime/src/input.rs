use std::sync::OnceLock;

use regex::Regex;

/// Host stimuli, already filtered from raw key and pointer events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogueInput {
    /// Reveal the current line instantly, or move on once it is revealed.
    Confirm,
    /// Generic advance such as a pointer click.
    Advance,
    Char(char),
    Reset,
}

fn codeword_char_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r#"^[a-zA-Z0-9?!.,'"]$"#).expect("codeword char regex"))
}

/// Whether a typed character may enter the codeword input buffer.
pub fn is_codeword_char(ch: char) -> bool {
    let mut buffer = [0u8; 4];
    codeword_char_regex().is_match(ch.encode_utf8(&mut buffer))
}
