use dlg_core::{CodewordOption, GameState, Trigger};
use tracing::warn;

/// Outcome of a single trigger check. `matched` carries the codeword that
/// satisfied a codeword trigger; it is `None` for every other kind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Evaluation {
    pub success: bool,
    pub matched: Option<String>,
}

impl Evaluation {
    fn pass() -> Self {
        Self {
            success: true,
            matched: None,
        }
    }

    fn fail() -> Self {
        Self::default()
    }
}

impl From<bool> for Evaluation {
    fn from(success: bool) -> Self {
        Self {
            success,
            matched: None,
        }
    }
}

pub fn evaluate(trigger: &Trigger, state: &GameState) -> Evaluation {
    match trigger {
        Trigger::None | Trigger::Always => Evaluation::pass(),
        Trigger::Clicks { required } => (state.click_count >= *required).into(),
        Trigger::Flag { flag, expected } => (state.flag(flag) == *expected).into(),
        Trigger::Codeword { required } => match_codeword(required, &state.input_buffer),
        Trigger::Unknown { kind } => {
            warn!(kind = kind.as_str(), "unknown trigger type");
            Evaluation::fail()
        }
    }
}

fn match_codeword(options: &[CodewordOption], buffer: &str) -> Evaluation {
    let buffer = buffer.to_lowercase();
    options
        .iter()
        .find(|option| buffer.contains(&option.string.to_lowercase()))
        .map(|option| Evaluation {
            success: true,
            matched: Some(option.string.clone()),
        })
        .unwrap_or_default()
}

/// Decides whether a group guarded by `triggers` may play.
///
/// Composition is deliberately not a uniform AND/OR:
/// - an empty list never passes;
/// - `flag` triggers are hard prerequisites: all must hold, and then every
///   remaining non-`none` trigger must hold as well (`none` is ignored);
/// - without flags, a list of only `none` triggers passes;
/// - without flags, when `none` triggers sit next to other triggers the group
///   is a fallback: it passes only if none of the other triggers succeeded;
/// - otherwise all triggers must succeed.
pub fn evaluate_all(triggers: &[Trigger], state: &GameState) -> bool {
    if triggers.is_empty() {
        return false;
    }

    let flag_triggers = triggers
        .iter()
        .filter(|trigger| matches!(trigger, Trigger::Flag { .. }))
        .collect::<Vec<_>>();
    let none_count = triggers
        .iter()
        .filter(|trigger| matches!(trigger, Trigger::None))
        .count();
    let other_triggers = triggers
        .iter()
        .filter(|trigger| !matches!(trigger, Trigger::Flag { .. } | Trigger::None))
        .collect::<Vec<_>>();

    if !flag_triggers.is_empty() {
        if !flag_triggers
            .iter()
            .all(|trigger| evaluate(trigger, state).success)
        {
            return false;
        }
        return other_triggers
            .iter()
            .all(|trigger| evaluate(trigger, state).success);
    }

    if other_triggers.is_empty() {
        return none_count > 0;
    }

    // Every trigger is evaluated, no short-circuit, so unknown kinds are always reported.
    let succeeded = other_triggers
        .iter()
        .map(|trigger| evaluate(trigger, state).success)
        .filter(|success| *success)
        .count();

    if none_count > 0 {
        return succeeded == 0;
    }
    succeeded == other_triggers.len()
}
