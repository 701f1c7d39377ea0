/// Upper bound on scheduler steps handled by one call to `tick`, so a script
/// that chains `Next` nodes forever cannot spin the host loop.
const MAX_TICK_STEPS: usize = 10_000;

pub struct DirectorOptions<S> {
    pub script: DialogueScript,
    pub registry: EffectRegistry,
    pub store: StateStore,
    pub surface: Option<S>,
    pub typewriter: TypewriterConfig,
}

/// Owns one context's dialogue playback: which group and line are showing,
/// which groups were already displayed this session, and the reveal in flight.
pub struct DialogueDirector<S: RenderSurface> {
    groups: Vec<DialogueGroup>,
    displayed: Vec<bool>,
    registry: EffectRegistry,
    store: StateStore,
    typewriter: Typewriter,
    surface: Option<S>,
    current_group: Option<usize>,
    current_line: usize,
    events: VecDeque<DialogueEvent>,
}

impl<S: RenderSurface> DialogueDirector<S> {
    pub fn new(options: DirectorOptions<S>) -> Self {
        let DirectorOptions {
            script,
            registry,
            store,
            surface,
            typewriter,
        } = options;
        let displayed = vec![false; script.groups.len()];
        Self {
            groups: script.groups,
            displayed,
            registry,
            store,
            typewriter: Typewriter::new(typewriter),
            surface,
            current_group: None,
            current_line: 0,
            events: VecDeque::new(),
        }
    }

    pub fn groups(&self) -> &[DialogueGroup] {
        &self.groups
    }

    pub fn registry(&self) -> &EffectRegistry {
        &self.registry
    }

    pub fn current_group_index(&self) -> Option<usize> {
        self.current_group
    }

    pub fn current_group(&self) -> Option<&DialogueGroup> {
        self.current_group.and_then(|index| self.groups.get(index))
    }

    pub fn current_line_index(&self) -> usize {
        self.current_line
    }

    pub fn is_typing(&self) -> bool {
        self.typewriter.is_typing()
    }

    pub fn typewriter_state(&self) -> TypewriterState {
        self.typewriter.state()
    }

    pub fn is_displayed(&self, group_index: usize) -> bool {
        self.displayed.get(group_index).copied().unwrap_or(false)
    }

    pub fn store(&self) -> &StateStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut StateStore {
        &mut self.store
    }

    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    pub fn surface_mut(&mut self) -> Option<&mut S> {
        self.surface.as_mut()
    }

    /// Names of the groups whose triggers pass under the current state,
    /// displayed or not.
    pub fn eligible_group_names(&self) -> Vec<&str> {
        self.groups
            .iter()
            .filter(|group| evaluate_all(&group.triggers, self.store.state()))
            .map(|group| group.name.as_str())
            .collect()
    }

    /// Takes the queued events. The host is the only consumer.
    pub fn drain_events(&mut self) -> Vec<DialogueEvent> {
        self.events.drain(..).collect()
    }

    fn emit(&mut self, event: DialogueEvent) {
        self.events.push_back(event);
    }
}
