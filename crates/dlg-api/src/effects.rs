use std::collections::BTreeMap;

use dlg_core::{DialogueError, EffectEntry, EffectRegistry};
use dlg_runtime::is_effect_code;
use serde_json::Value;
use tracing::warn;

/// Parses the effect registry document: a map from one-character codes to
/// `{"className": ...}`. Keys that are not a single lowercase letter or digit
/// cannot be written in markup and are skipped, as are entries without a
/// class name.
pub fn parse_effect_registry(json: &str) -> Result<EffectRegistry, DialogueError> {
    let document: Value = serde_json::from_str(json)
        .map_err(|error| DialogueError::new("EFFECTS_INVALID_JSON", error.to_string()))?;
    let Value::Object(entries) = document else {
        return Err(DialogueError::new(
            "EFFECTS_INVALID_JSON",
            "Effect registry must be a JSON object.",
        ));
    };

    let mut registry = BTreeMap::new();
    for (key, value) in entries {
        let mut chars = key.chars();
        let (Some(code), None) = (chars.next(), chars.next()) else {
            warn!(key = key.as_str(), "skipping effect with a multi-character code");
            continue;
        };
        if !is_effect_code(code) {
            warn!(key = key.as_str(), "skipping effect code that markup cannot address");
            continue;
        }
        match serde_json::from_value::<EffectEntry>(value) {
            Ok(entry) => {
                registry.insert(code, entry);
            }
            Err(error) => warn!(key = key.as_str(), %error, "skipping malformed effect"),
        }
    }
    Ok(EffectRegistry::new(registry))
}
