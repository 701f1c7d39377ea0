impl<S: RenderSurface> DialogueDirector<S> {
    /// Plays the first group, in script order, that is eligible and has not
    /// been displayed this session. Returns false and leaves the current
    /// rendering untouched when there is none.
    pub fn start_next_group(&mut self) -> bool {
        let state = self.store.state();
        let next = self
            .groups
            .iter()
            .enumerate()
            .find(|(index, group)| {
                !self.displayed[*index] && evaluate_all(&group.triggers, state)
            })
            .map(|(index, _)| index);

        let Some(index) = next else {
            debug!("no eligible dialogue group left");
            self.emit(DialogueEvent::GroupsExhausted);
            return false;
        };

        self.displayed[index] = true;
        self.current_group = Some(index);
        let name = self.groups[index].name.clone();
        info!(group = name.as_str(), "dialogue group started");
        self.emit(DialogueEvent::GroupStarted { group: name });
        self.start_line(0);
        true
    }

    /// Cancels the reveal in flight and begins line `index` of the current group.
    pub fn start_line(&mut self, index: usize) {
        let Some(group_index) = self.current_group else {
            return;
        };
        let Some(line) = self.groups[group_index].lines.get(index).cloned() else {
            self.typewriter.cancel();
            return;
        };

        self.typewriter.cancel();
        self.current_line = index;
        if let Some(surface) = self.surface.as_mut() {
            surface.clear();
            surface.set_line_effect(line.texteffect.as_deref());
        }
        self.typewriter.start(tokenize(&line.text, &self.registry));

        let group = self.groups[group_index].name.clone();
        debug!(group = group.as_str(), line = index, "dialogue line started");
        self.emit(DialogueEvent::LineStarted { group, line: index });
    }

    /// Advances within the current group, or hands over to the next eligible
    /// group once the last line has been shown.
    pub fn next_line(&mut self) -> Result<(), DialogueError> {
        let Some(group_index) = self.current_group else {
            self.start_next_group();
            return Ok(());
        };
        let group = &self.groups[group_index];
        let next = self.current_line + 1;
        let Some(last) = group.last_line_index().filter(|last| next <= *last) else {
            self.start_next_group();
            return Ok(());
        };

        if next == last {
            if let Some(flag) = group.on_complete_flag.clone() {
                self.store.set_flag(&flag, true)?;
                info!(flag = flag.as_str(), "dialogue flag set");
                self.emit(DialogueEvent::FlagSet { flag });
            }
        }
        self.start_line(next);
        Ok(())
    }

    pub fn reveal_instantly(&mut self) {
        self.typewriter.reveal_instantly(
            self.surface
                .as_mut()
                .map(|surface| surface as &mut dyn RenderSurface),
        );
    }

    /// Drives the reveal up to `now` (milliseconds on the host clock).
    /// Returns when the host should call again, or `None` when nothing is
    /// scheduled.
    pub fn tick(&mut self, now: u64) -> Result<Option<u64>, DialogueError> {
        for _ in 0..MAX_TICK_STEPS {
            let poll = self.typewriter.poll(
                now,
                self.surface
                    .as_mut()
                    .map(|surface| surface as &mut dyn RenderSurface),
            );
            match poll {
                TypewriterPoll::Idle => return Ok(None),
                TypewriterPoll::Waiting { wake_at } => return Ok(Some(wake_at)),
                TypewriterPoll::Advance { count } => {
                    for _ in 0..count {
                        self.next_line()?;
                    }
                }
            }
        }
        Ok(None)
    }

    /// Jumps the clock forward from `now` until nothing is scheduled and
    /// returns the final clock value. Hosts without a real clock (line mode,
    /// tests) use this to play a line to its end.
    pub fn run_until_idle(&mut self, now: u64) -> Result<u64, DialogueError> {
        let mut clock = now;
        for _ in 0..MAX_TICK_STEPS {
            match self.tick(clock)? {
                Some(wake_at) => clock = clock.max(wake_at),
                None => return Ok(clock),
            }
        }
        Ok(clock)
    }
}
