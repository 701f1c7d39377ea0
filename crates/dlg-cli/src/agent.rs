use dlg_api::{create_director_from_json, load_effect_registry, CreateDirectorFromJsonOptions};
use dlg_core::{DialogueError, EffectRegistry};
use dlg_runtime::{tokenize, TextSurface, TypewriterConfig};

use crate::{
    load_content_dir, open_store, parse_consent, resolve_state_file, AgentArgs, AgentCommand,
    ConsentArgs, EligibleArgs, StateArgs, TokenizeArgs,
};

pub(super) fn run_agent(args: AgentArgs) -> Result<i32, DialogueError> {
    match args.command {
        AgentCommand::State(args) => run_state(args),
        AgentCommand::Reset(args) => run_reset(args),
        AgentCommand::Consent(args) => run_consent(args),
        AgentCommand::Eligible(args) => run_eligible(args),
        AgentCommand::Tokenize(args) => run_tokenize(args),
    }
}

fn json_line<T: serde::Serialize + ?Sized>(value: &T) -> Result<String, DialogueError> {
    serde_json::to_string(value).map_err(|error| DialogueError::new("CLI_JSON", error.to_string()))
}

pub(super) fn run_state(args: StateArgs) -> Result<i32, DialogueError> {
    let state_file = resolve_state_file(args.state_file);
    let store = open_store(&state_file);
    println!("RESULT:OK");
    println!("STATE_JSON:{}", json_line(store.state())?);
    println!("STATE_FILE:{}", state_file);
    Ok(0)
}

pub(super) fn run_reset(args: StateArgs) -> Result<i32, DialogueError> {
    let state_file = resolve_state_file(args.state_file);
    let mut store = open_store(&state_file);
    store.reset()?;
    println!("RESULT:OK");
    println!("EVENT:RESET");
    println!("STATE_FILE:{}", state_file);
    Ok(0)
}

pub(super) fn run_consent(args: ConsentArgs) -> Result<i32, DialogueError> {
    let consent = parse_consent(&args.value)?;
    let state_file = resolve_state_file(args.state_file);
    let mut store = open_store(&state_file);
    store.set_consent(consent)?;
    println!("RESULT:OK");
    println!("CONSENT:{}", consent);
    println!("STATE_FILE:{}", state_file);
    Ok(0)
}

pub(super) fn run_eligible(args: EligibleArgs) -> Result<i32, DialogueError> {
    let content = load_content_dir(&args.content_dir)?;
    let state_file = resolve_state_file(args.state_file);
    let director = create_director_from_json::<TextSurface>(CreateDirectorFromJsonOptions {
        dialogue_json: content.dialogue_json,
        effects_json: content.effects_json,
        store: open_store(&state_file),
        surface: None,
        typewriter: TypewriterConfig::default(),
        autostart: false,
    })?;

    println!("RESULT:OK");
    for name in director.eligible_group_names() {
        println!("GROUP_JSON:{}", json_line(name)?);
    }
    Ok(0)
}

pub(super) fn run_tokenize(args: TokenizeArgs) -> Result<i32, DialogueError> {
    let registry = match args.content_dir.as_deref() {
        Some(content_dir) => {
            let content = load_content_dir(content_dir)?;
            load_effect_registry(content.effects_json.as_deref())
        }
        None => EffectRegistry::default(),
    };

    println!("RESULT:OK");
    for node in tokenize(&args.text, &registry) {
        println!("NODE_JSON:{}", json_line(&node)?);
    }
    Ok(0)
}
