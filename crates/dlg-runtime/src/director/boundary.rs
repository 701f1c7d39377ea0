impl<S: RenderSurface> DialogueDirector<S> {
    pub fn handle_input(&mut self, input: DialogueInput) -> Result<(), DialogueError> {
        match input {
            DialogueInput::Confirm => self.confirm(),
            DialogueInput::Advance => self.advance(),
            DialogueInput::Char(ch) => self.type_char(ch).map(|_| ()),
            DialogueInput::Reset => self.reset(),
        }
    }

    pub fn confirm(&mut self) -> Result<(), DialogueError> {
        if self.is_typing() {
            self.reveal_instantly();
            Ok(())
        } else {
            self.next_line()
        }
    }

    /// Generic advance. Never skips a line that is still typing, except for
    /// the one-time talk reveal once the intro has been seen.
    pub fn advance(&mut self) -> Result<(), DialogueError> {
        let state = self.store.state();
        if state.flag(FLAG_SEEN_INTRO) && !state.flag(FLAG_TALK_REVEAL) {
            self.store.set_flag(FLAG_TALK_REVEAL, true)?;
            info!(flag = FLAG_TALK_REVEAL, "dialogue flag set");
            self.emit(DialogueEvent::FlagSet {
                flag: FLAG_TALK_REVEAL.to_string(),
            });
            self.start_next_group();
            return Ok(());
        }
        if !self.is_typing() {
            self.start_next_group();
        }
        Ok(())
    }

    /// Feeds one typed character to the codeword buffer and checks the
    /// codeword triggers of every group not yet displayed. Returns the
    /// matched codeword, if any.
    pub fn type_char(&mut self, ch: char) -> Result<Option<String>, DialogueError> {
        if !is_codeword_char(ch) {
            return Ok(None);
        }
        self.store.update(|state| state.push_input(ch))?;

        let state = self.store.state();
        let matched = self
            .groups
            .iter()
            .enumerate()
            .filter(|(index, _)| !self.displayed[*index])
            .find_map(|(_, group)| {
                group
                    .triggers
                    .iter()
                    .filter(|trigger| trigger.is_codeword())
                    .find_map(|trigger| {
                        evaluate(trigger, state).matched.map(|codeword| {
                            (codeword, group.name.clone(), trigger.clone())
                        })
                    })
            });

        let Some((codeword, group, trigger)) = matched else {
            return Ok(None);
        };
        info!(
            codeword = codeword.as_str(),
            group = group.as_str(),
            "codeword matched"
        );
        self.emit(DialogueEvent::CodewordMatched {
            codeword: codeword.clone(),
            group,
            trigger,
        });
        if !self.is_typing() {
            self.start_next_group();
        }
        self.store.update(|state| state.clear_input())?;
        Ok(Some(codeword))
    }

    /// Wipes the persisted state. Groups already shown stay displayed for the
    /// rest of the session.
    pub fn reset(&mut self) -> Result<(), DialogueError> {
        self.store.reset()?;
        self.emit(DialogueEvent::StateReset);
        Ok(())
    }

    /// Adopts state written by another context. Returns whether it changed.
    pub fn sync_state(&mut self) -> Result<bool, DialogueError> {
        let replaced = self.store.sync_from_backend()?;
        if replaced {
            self.emit(DialogueEvent::StateReplaced);
        }
        Ok(replaced)
    }
}
