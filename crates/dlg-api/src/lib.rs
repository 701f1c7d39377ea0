mod effects;
mod script;

use dlg_core::{DialogueError, DialogueScript, EffectRegistry};
use dlg_runtime::{
    DialogueDirector, DirectorOptions, RenderSurface, StateStore, TypewriterConfig,
};
use tracing::warn;

pub use effects::parse_effect_registry;
pub use script::{parse_dialogue_script, parse_trigger};

pub struct CreateDirectorFromJsonOptions<S> {
    pub dialogue_json: String,
    pub effects_json: Option<String>,
    pub store: StateStore,
    pub surface: Option<S>,
    pub typewriter: TypewriterConfig,
    /// Play the first eligible group right after loading.
    pub autostart: bool,
}

/// Loads the effect registry, degrading to an empty one when the document
/// is absent or unusable.
pub fn load_effect_registry(effects_json: Option<&str>) -> EffectRegistry {
    let Some(json) = effects_json else {
        return EffectRegistry::default();
    };
    parse_effect_registry(json).unwrap_or_else(|error| {
        warn!(%error, "effect registry unavailable, continuing without effects");
        EffectRegistry::default()
    })
}

pub fn create_director_from_json<S: RenderSurface>(
    options: CreateDirectorFromJsonOptions<S>,
) -> Result<DialogueDirector<S>, DialogueError> {
    let script = parse_dialogue_script(&options.dialogue_json)?;
    let registry = load_effect_registry(options.effects_json.as_deref());

    let mut director = DialogueDirector::new(DirectorOptions {
        script,
        registry,
        store: options.store,
        surface: options.surface,
        typewriter: options.typewriter,
    });
    if options.autostart {
        director.start_next_group();
    }
    Ok(director)
}

/// A director with no groups. Hosts fall back to it when the script fails to
/// load so the rest of the program keeps working.
pub fn create_inert_director<S: RenderSurface>(
    store: StateStore,
    surface: Option<S>,
    typewriter: TypewriterConfig,
) -> DialogueDirector<S> {
    DialogueDirector::new(DirectorOptions {
        script: DialogueScript::default(),
        registry: EffectRegistry::default(),
        store,
        surface,
        typewriter,
    })
}
