use super::*;
use dlg_runtime::DialogueInput;

use std::fs;
use std::io::Cursor;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

fn temp_path(name: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("time should be monotonic")
        .as_nanos();
    std::env::temp_dir().join(format!("dialogue-rs-{}-{}", name, nanos))
}

fn write_file(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("parent should be created");
    }
    fs::write(path, content).expect("file should be written");
}

fn demo_dir(name: &str) -> String {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
        .join("demos")
        .join(name)
        .to_string_lossy()
        .to_string()
}

fn run_line_mode(content_dir: &str, state_file: &Path, input: &str) -> String {
    let content = load_content_dir(content_dir).expect("content should load");
    let state_file = state_file.to_string_lossy().to_string();
    let (mut director, _) = open_director(
        &content,
        &state_file,
        Some(TextSurface::default()),
    );
    let mut reader = Cursor::new(input.as_bytes().to_vec());
    let mut writer = Vec::new();
    let code = run_tui_line_mode_with_io(
        &content,
        &state_file,
        &mut director,
        &mut reader,
        &mut writer,
    )
    .expect("line mode should run");
    assert_eq!(code, 0);
    String::from_utf8(writer).expect("output should be utf-8")
}

#[test]
fn resolve_content_dir_validates_existence_and_directory() {
    let missing = temp_path("missing-dir");
    let error = resolve_content_dir(missing.to_string_lossy().as_ref())
        .expect_err("missing path should fail");
    assert_eq!(error.code, "CLI_CONTENT_NOT_FOUND");

    let file_path = temp_path("plain-file");
    write_file(&file_path, "x");
    let error = resolve_content_dir(file_path.to_string_lossy().as_ref())
        .expect_err("file path should fail");
    assert_eq!(error.code, "CLI_CONTENT_NOT_DIR");
}

#[test]
fn load_content_dir_requires_script_and_reads_optional_effects() {
    let root = temp_path("content");
    fs::create_dir_all(&root).expect("root");
    let error = load_content_dir(root.to_string_lossy().as_ref()).expect_err("no script");
    assert_eq!(error.code, "CLI_CONTENT_NOT_FOUND");

    write_file(&root.join(DIALOGUE_FILE), r#"{"groups":[]}"#);
    let content = load_content_dir(root.to_string_lossy().as_ref()).expect("script only");
    assert_eq!(content.effects_json, None);

    write_file(&root.join(EFFECTS_FILE), r#"{"r":{"className":"red"}}"#);
    let content = load_content_dir(root.to_string_lossy().as_ref()).expect("with effects");
    assert!(content.effects_json.is_some());
    assert!(content.title.starts_with("Dialogue "));
}

#[test]
fn broken_script_yields_inert_director() {
    let content = load_content_dir(&demo_dir("broken")).expect("content should load");
    let state_file = temp_path("broken-state.json");
    let (mut director, error) = open_director(
        &content,
        state_file.to_string_lossy().as_ref(),
        Some(TextSurface::default()),
    );
    assert_eq!(
        error.map(|error| error.code),
        Some("SCRIPT_GROUPS_MISSING".to_string())
    );
    assert!(!director.start_next_group());
    director
        .handle_input(DialogueInput::Char('a'))
        .expect("input still accepted");
}

#[test]
fn open_director_loads_effects_and_waits_for_consent() {
    let content = load_content_dir(&demo_dir("lighthouse")).expect("content should load");
    let state_file = temp_path("open-state.json");
    let (director, error) = open_director(
        &content,
        state_file.to_string_lossy().as_ref(),
        Some(TextSurface::default()),
    );
    assert!(error.is_none());
    assert_eq!(director.current_group_index(), None);
    assert_eq!(director.registry().class_for('r'), Some("red"));
    assert_eq!(director.groups().len(), 5);
}

#[test]
fn parse_consent_accepts_common_answers() {
    assert_eq!(parse_consent("Y").expect("y"), true);
    assert_eq!(parse_consent(" no ").expect("no"), false);
    assert_eq!(parse_consent("true").expect("true"), true);
    let error = parse_consent("maybe").expect_err("maybe should fail");
    assert_eq!(error.code, "CLI_CONSENT_PARSE");
}

#[test]
fn click_counts_then_advances() {
    let content = load_content_dir(&demo_dir("lighthouse")).expect("content should load");
    let state_file = temp_path("click-state.json");
    let (mut director, _) = open_director(
        &content,
        state_file.to_string_lossy().as_ref(),
        Some(TextSurface::default()),
    );
    click(&mut director).expect("click should pass");
    assert_eq!(director.store().state().click_count, 1);
    assert_eq!(director.current_group().map(|group| group.name.as_str()), Some("intro"));

    let reopened = open_store(state_file.to_string_lossy().as_ref());
    assert_eq!(reopened.state().click_count, 1);
}

#[test]
fn line_mode_plays_intro_and_talk_reveal() {
    let state_file = temp_path("line-state.json");
    let output = run_line_mode(
        &demo_dir("lighthouse"),
        &state_file,
        "y\n\n\n:click\n:state\n:quit\n",
    );

    assert!(output.contains("Oh. Hello there."));
    assert!(output.contains("You found the lighthouse. Not many do."));
    assert!(output.contains("The keeper left years ago.\nHe never said why."));
    assert!(output.contains("[flag seenIntro set]"));
    assert!(output.contains("You want to talk? Fine."));
    assert!(output.contains("\"talkReveal\":true"));
    assert!(output.contains("bye"));

    let stored = open_store(state_file.to_string_lossy().as_ref());
    assert_eq!(stored.state().immersion_consent, Some(true));
    assert_eq!(stored.state().click_count, 1);
}

#[test]
fn line_mode_codeword_unlocks_keeper() {
    let state_file = temp_path("line-codeword.json");
    let output = run_line_mode(&demo_dir("lighthouse"), &state_file, "n\nKeeper\n");

    assert!(output.contains("[codeword \"keeper\" unlocked keeper]"));
    assert!(output.contains("You remember him."));
    let stored = open_store(state_file.to_string_lossy().as_ref());
    assert_eq!(stored.state().input_buffer, "");
    assert_eq!(stored.state().immersion_consent, Some(false));
}

#[test]
fn line_mode_reset_clears_progress() {
    let state_file = temp_path("line-reset.json");
    run_line_mode(&demo_dir("lighthouse"), &state_file, "y\n:click\n:reset\n:quit\n");

    let stored = open_store(state_file.to_string_lossy().as_ref());
    assert_eq!(stored.state().click_count, 0);
    assert_eq!(stored.state().immersion_consent, None);
}

#[test]
fn handle_line_cmd_reports_unknown_commands() {
    let content = load_content_dir(&demo_dir("lighthouse")).expect("content should load");
    let state_file = temp_path("line-cmd.json");
    let (mut director, _) = open_director(
        &content,
        state_file.to_string_lossy().as_ref(),
        Some(TextSurface::default()),
    );
    let mut lines = Vec::new();
    let mut emit = |line: String| {
        lines.push(line);
        Ok::<(), DialogueError>(())
    };
    let action = handle_line_cmd(":bogus", &mut director, &mut emit).expect("handled");
    assert_eq!(action, LineCommandAction::NotHandled);
    let action = handle_line_cmd(":help", &mut director, &mut emit).expect("handled");
    assert_eq!(action, LineCommandAction::Continue);
    drop(emit);
    assert_eq!(lines.len(), 1);
}
