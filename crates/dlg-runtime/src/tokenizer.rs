use dlg_core::{EffectRegistry, RenderNode, BASE_CHAR_CLASS, NBSP};

/// Opens a control region: `§p300§` pause, `§b2§` breaks, `§n§` auto-advance,
/// or `§rs styled text§` for effect codes `r` and `s`. Codes are lowercase
/// ASCII letters and digits.
pub const MARKER: char = '§';

pub fn tokenize(raw: &str, registry: &EffectRegistry) -> Vec<RenderNode> {
    let chars = raw.chars().collect::<Vec<_>>();
    let mut nodes = Vec::with_capacity(chars.len());
    let mut index = 0usize;

    while index < chars.len() {
        let ch = chars[index];
        if ch != MARKER {
            nodes.push(RenderNode::plain(ch));
            index += 1;
            continue;
        }

        index += 1;
        let code_start = index;
        while index < chars.len() && is_effect_code(chars[index]) {
            index += 1;
        }
        let code = chars[code_start..index].iter().collect::<String>();

        if let Some(command) = parse_command(&code) {
            if matches!(chars.get(index), Some(&' ') | Some(&MARKER)) {
                index += 1;
            }
            nodes.push(command);
            continue;
        }

        if chars.get(index) == Some(&' ') {
            index += 1;
        }
        let span_start = index;
        while index < chars.len() && chars[index] != MARKER {
            index += 1;
        }
        let classes = effect_classes(&code, registry);
        nodes.extend(chars[span_start..index].iter().map(|ch| RenderNode::Character {
            text: if *ch == ' ' { NBSP } else { *ch },
            classes: classes.clone(),
        }));
        // An unterminated region simply runs to the end of the string.
        if index < chars.len() {
            index += 1;
        }
    }

    nodes
}

pub fn is_effect_code(ch: char) -> bool {
    ch.is_ascii_lowercase() || ch.is_ascii_digit()
}

fn parse_command(code: &str) -> Option<RenderNode> {
    let mut chars = code.chars();
    let head = chars.next()?;
    if !matches!(head, 'p' | 'b' | 'n') {
        return None;
    }
    let digits = chars
        .take_while(|ch| ch.is_ascii_digit())
        .collect::<String>();
    // Digits only, so a failed parse with digits present is an overflow.
    let value = match digits.parse::<u64>() {
        Ok(value) => value,
        Err(_) if !digits.is_empty() => u64::MAX,
        Err(_) => 0,
    };
    let count = u32::try_from(value).unwrap_or(u32::MAX).max(1);
    Some(match head {
        'p' => RenderNode::Pause { duration_ms: value },
        'b' => RenderNode::Break { count },
        _ => RenderNode::Next { count },
    })
}

fn effect_classes(code: &str, registry: &EffectRegistry) -> Vec<String> {
    let mut classes = Vec::new();
    for class_name in code.chars().filter_map(|letter| registry.class_for(letter)) {
        if !classes.iter().any(|existing| existing == class_name) {
            classes.push(class_name.to_string());
        }
    }
    if !classes.iter().any(|existing| existing == BASE_CHAR_CLASS) {
        classes.push(BASE_CHAR_CLASS.to_string());
    }
    classes
}
