#[cfg(test)]
mod director_tests {
    use super::*;
    use crate::store::MemoryBackend;
    use crate::surface::TextSurface;
    use dlg_core::{CodewordOption, DialogueLine, Trigger};

    fn line(text: &str) -> DialogueLine {
        DialogueLine {
            text: text.to_string(),
            texteffect: None,
        }
    }

    fn group(name: &str, triggers: Vec<Trigger>, lines: &[&str]) -> DialogueGroup {
        DialogueGroup {
            name: name.to_string(),
            triggers,
            lines: lines.iter().map(|text| line(text)).collect(),
            on_complete_flag: None,
        }
    }

    fn director(groups: Vec<DialogueGroup>) -> DialogueDirector<TextSurface> {
        director_with_backend(groups, MemoryBackend::new())
    }

    fn director_with_backend(
        groups: Vec<DialogueGroup>,
        backend: MemoryBackend,
    ) -> DialogueDirector<TextSurface> {
        DialogueDirector::new(DirectorOptions {
            script: DialogueScript { groups },
            registry: [('r', "red")].into_iter().collect(),
            store: StateStore::open(backend),
            surface: Some(TextSurface::default()),
            typewriter: TypewriterConfig::default(),
        })
    }

    fn text(director: &DialogueDirector<TextSurface>) -> String {
        director
            .surface()
            .map(TextSurface::plain_text)
            .unwrap_or_default()
    }

    #[test]
    fn start_next_group_picks_first_eligible_in_script_order() {
        let mut director = director(vec![
            group("locked", vec![Trigger::Clicks { required: 3 }], &["no"]),
            group("first", vec![Trigger::Always], &["one"]),
            group("second", vec![Trigger::Always], &["two"]),
        ]);

        assert!(director.start_next_group());
        assert_eq!(director.current_group_index(), Some(1));
        assert!(director.is_displayed(1));
        assert!(director.is_typing());

        assert!(director.start_next_group());
        assert_eq!(director.current_group_index(), Some(2));

        assert!(!director.start_next_group());
        assert_eq!(director.current_group_index(), Some(2));
        assert!(director
            .drain_events()
            .contains(&DialogueEvent::GroupsExhausted));
    }

    #[test]
    fn confirm_reveals_then_advances_lines() {
        let mut director = director(vec![group(
            "intro",
            vec![Trigger::Always],
            &["Hello there", "Second"],
        )]);
        director.start_next_group();
        director.tick(0).expect("tick");

        director.confirm().expect("confirm should reveal");
        assert!(!director.is_typing());
        assert_eq!(text(&director), "Hello there");

        director.confirm().expect("confirm should advance");
        assert_eq!(director.current_line_index(), 1);
        assert!(director.is_typing());
        assert_eq!(text(&director), "");
    }

    #[test]
    fn on_complete_flag_is_set_when_reaching_last_line() {
        let mut intro = group("intro", vec![Trigger::Always], &["a", "b", "c"]);
        intro.on_complete_flag = Some("seenIntro".to_string());
        let backend = MemoryBackend::new();
        let mut director = director_with_backend(vec![intro], backend.clone());
        director.start_next_group();

        director.next_line().expect("advance to b");
        assert!(!director.store().state().flag("seenIntro"));
        director.next_line().expect("advance to c");
        assert!(director.store().state().flag("seenIntro"));
        assert!(backend
            .payload()
            .is_some_and(|payload| payload.contains("\"seenIntro\":true")));
    }

    #[test]
    fn next_line_on_last_line_moves_to_next_group() {
        let mut director = director(vec![
            group("a", vec![Trigger::Always], &["only"]),
            group("b", vec![Trigger::Always], &["next"]),
        ]);
        director.start_next_group();
        director.next_line().expect("next group");
        assert_eq!(director.current_group_index(), Some(1));
        assert_eq!(director.current_line_index(), 0);
    }

    #[test]
    fn advance_does_not_skip_while_typing() {
        let mut director = director(vec![
            group("a", vec![Trigger::Always], &["typing"]),
            group("b", vec![Trigger::Always], &["later"]),
        ]);
        director.start_next_group();
        director.advance().expect("advance");
        assert_eq!(director.current_group_index(), Some(0));

        director.run_until_idle(0).expect("finish line");
        director.advance().expect("advance");
        assert_eq!(director.current_group_index(), Some(1));
    }

    #[test]
    fn advance_after_intro_reveals_talk_once() {
        let mut director = director(vec![
            group("intro", vec![Trigger::Always], &["intro"]),
            group(
                "talk",
                vec![Trigger::Flag {
                    flag: "talkReveal".to_string(),
                    expected: true,
                }],
                &["talk"],
            ),
        ]);
        director.start_next_group();
        director
            .store_mut()
            .set_flag("seenIntro", true)
            .expect("flag");

        director.advance().expect("talk reveal");
        assert!(director.store().state().flag("talkReveal"));
        assert_eq!(director.current_group_index(), Some(1));
    }

    #[test]
    fn next_nodes_advance_during_timed_playback() {
        let mut director = director(vec![group(
            "auto",
            vec![Trigger::Always],
            &["a§n§", "b"],
        )]);
        director.start_next_group();
        director.run_until_idle(0).expect("play through");
        assert_eq!(director.current_line_index(), 1);
        assert_eq!(text(&director), "b");
    }

    #[test]
    fn maximal_pause_plays_out_without_overflow() {
        let mut director = director(vec![group(
            "long",
            vec![Trigger::Always],
            &["a§p18446744073709551615§b"],
        )]);
        director.start_next_group();
        let clock = director.run_until_idle(1_000).expect("play through");
        assert_eq!(clock, u64::MAX);
        assert_eq!(text(&director), "ab");
        assert!(!director.is_typing());
    }

    #[test]
    fn line_effect_and_classes_reach_surface() {
        let mut styled = group("styled", vec![Trigger::Always], &["§rHi§ you"]);
        styled.lines[0].texteffect = Some("shake".to_string());
        let mut director = director(vec![styled]);
        director.start_next_group();
        director.reveal_instantly();

        let surface = director.surface().expect("surface");
        assert_eq!(surface.line_effect(), Some("effect-shake"));
        assert_eq!(surface.rows()[0][0].classes, vec!["red", "char"]);
        assert_eq!(surface.plain_text(), "Hi you");
    }

    #[test]
    fn director_without_surface_still_tracks_progress() {
        let mut director: DialogueDirector<TextSurface> = DialogueDirector::new(DirectorOptions {
            script: DialogueScript {
                groups: vec![group("a", vec![Trigger::Always], &["x", "y"])],
            },
            registry: EffectRegistry::default(),
            store: StateStore::open(MemoryBackend::new()),
            surface: None,
            typewriter: TypewriterConfig::default(),
        });
        director.start_next_group();
        director.run_until_idle(0).expect("run");
        director.confirm().expect("advance");
        assert_eq!(director.current_line_index(), 1);
    }

    #[test]
    fn filtered_keys_do_not_reach_the_buffer() {
        let mut director = director(vec![]);
        assert_eq!(director.type_char('-').expect("type"), None);
        assert_eq!(director.type_char('Q').expect("type"), None);
        assert_eq!(director.store().state().input_buffer, "q");
    }

    #[test]
    fn codeword_match_while_typing_records_but_does_not_start() {
        let mut director = director(vec![
            group("talking", vec![Trigger::Always], &["long line"]),
            group(
                "secret",
                vec![Trigger::Codeword {
                    required: vec![CodewordOption {
                        string: "ok".to_string(),
                    }],
                }],
                &["hidden"],
            ),
        ]);
        director.start_next_group();
        director.drain_events();

        director.type_char('o').expect("type");
        let matched = director.type_char('k').expect("type");
        assert_eq!(matched.as_deref(), Some("ok"));
        assert_eq!(director.current_group_index(), Some(0));
        assert_eq!(director.store().state().input_buffer, "");
        assert!(matches!(
            director.drain_events().as_slice(),
            [DialogueEvent::CodewordMatched { codeword, group, .. }]
                if codeword == "ok" && group == "secret"
        ));
    }

    #[test]
    fn reset_clears_state_but_keeps_displayed_groups() {
        let mut director = director(vec![group("a", vec![Trigger::Always], &["x"])]);
        director.start_next_group();
        director.store_mut().increment_clicks().expect("click");

        director.reset().expect("reset");
        assert_eq!(director.store().state().click_count, 0);
        assert!(director.is_displayed(0));
        assert!(!director.start_next_group());
    }

    #[test]
    fn sync_state_reports_foreign_writes() {
        let backend = MemoryBackend::new();
        let mut director = director_with_backend(vec![], backend.clone());
        let mut other = StateStore::open(backend);
        assert!(!director.sync_state().expect("sync"));

        other.increment_clicks().expect("click");
        assert!(director.sync_state().expect("sync"));
        assert_eq!(director.store().state().click_count, 1);
        assert_eq!(director.drain_events(), vec![DialogueEvent::StateReplaced]);
    }
}
