use dlg_core::{
    CodewordOption, DialogueError, DialogueGroup, DialogueLine, DialogueScript, Trigger,
};
use serde_json::{Map, Value};
use tracing::warn;

/// Parses the dialogue script document. Only a missing or non-list `groups`
/// field is fatal; malformed groups, lines and triggers are skipped.
pub fn parse_dialogue_script(json: &str) -> Result<DialogueScript, DialogueError> {
    let document: Value = serde_json::from_str(json)
        .map_err(|error| DialogueError::new("SCRIPT_INVALID_JSON", error.to_string()))?;
    let Some(entries) = document.get("groups").and_then(Value::as_array) else {
        return Err(DialogueError::new(
            "SCRIPT_GROUPS_MISSING",
            "Dialogue JSON must have a \"groups\" array.",
        ));
    };

    let groups = entries
        .iter()
        .enumerate()
        .filter_map(|(index, entry)| match entry.as_object() {
            Some(object) => Some(parse_group(index, object)),
            None => {
                warn!(index, "skipping dialogue group that is not an object");
                None
            }
        })
        .collect();
    Ok(DialogueScript { groups })
}

fn parse_group(index: usize, object: &Map<String, Value>) -> DialogueGroup {
    let name = object
        .get("name")
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| format!("group-{}", index));

    let triggers = match object.get("trigger") {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(entries)) => entries
            .iter()
            .filter_map(|entry| parse_trigger(&name, entry))
            .collect(),
        Some(single) => parse_trigger(&name, single).into_iter().collect(),
    };

    let lines = match object.get("lines") {
        Some(Value::Array(entries)) => entries
            .iter()
            .filter_map(|entry| parse_line(&name, entry))
            .collect(),
        _ => {
            warn!(group = name.as_str(), "dialogue group has no lines array");
            Vec::new()
        }
    };

    DialogueGroup {
        on_complete_flag: object
            .get("onCompleteFlag")
            .and_then(Value::as_str)
            .filter(|flag| !flag.is_empty())
            .map(str::to_string),
        name,
        triggers,
        lines,
    }
}

fn parse_line(group: &str, entry: &Value) -> Option<DialogueLine> {
    match serde_json::from_value::<DialogueLine>(entry.clone()) {
        Ok(line) => Some(line),
        Err(error) => {
            warn!(group, %error, "skipping malformed dialogue line");
            None
        }
    }
}

/// Turns one authored trigger object into a [`Trigger`]. Entries that cannot
/// be interpreted at all are skipped; unrecognised `type` values are kept as
/// [`Trigger::Unknown`] so they fail closed at evaluation time.
pub fn parse_trigger(group: &str, entry: &Value) -> Option<Trigger> {
    let Some(kind) = entry.get("type").and_then(Value::as_str) else {
        warn!(group, "skipping trigger without a type");
        return None;
    };

    let trigger = match kind {
        "none" => Trigger::None,
        "always" => Trigger::Always,
        "clicks" => Trigger::Clicks {
            required: entry.get("required").and_then(Value::as_u64).unwrap_or(0),
        },
        "flag" => {
            // A nameless flag is never set, so the gate stays closed unless
            // it expects the flag unset.
            let flag = entry.get("flag").and_then(Value::as_str).unwrap_or_else(|| {
                warn!(group, "flag trigger without a flag name");
                ""
            });
            Trigger::Flag {
                flag: flag.to_string(),
                expected: expected_flag_state(entry.get("state")),
            }
        }
        "codeword" => Trigger::Codeword {
            required: entry
                .get("required")
                .and_then(Value::as_array)
                .map(|options| {
                    options
                        .iter()
                        .filter_map(|option| option.get("string").and_then(Value::as_str))
                        .map(|string| CodewordOption {
                            string: string.to_string(),
                        })
                        .collect()
                })
                .unwrap_or_default(),
        },
        other => Trigger::Unknown {
            kind: other.to_string(),
        },
    };
    Some(trigger)
}

/// Booleans are taken as-is and the strings "true"/"false" in any case are
/// accepted. Anything else, including a missing value, expects the flag set.
fn expected_flag_state(value: Option<&Value>) -> bool {
    match value {
        Some(Value::Bool(expected)) => *expected,
        Some(Value::String(text)) if text.eq_ignore_ascii_case("false") => false,
        _ => true,
    }
}
