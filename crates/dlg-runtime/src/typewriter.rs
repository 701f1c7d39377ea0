use std::collections::BTreeMap;

use dlg_core::{RenderNode, NBSP};

use crate::surface::RenderSurface;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypewriterConfig {
    pub base_interval_ms: u64,
    /// Extra pause after punctuation followed by whitespace.
    pub alone_pause_ms: BTreeMap<char, u64>,
    /// Extra pause after punctuation directly followed by more text.
    pub combo_pause_ms: BTreeMap<char, u64>,
}

impl Default for TypewriterConfig {
    fn default() -> Self {
        Self {
            base_interval_ms: 50,
            alone_pause_ms: BTreeMap::from([('.', 300), ('!', 300), ('?', 300), (',', 150)]),
            combo_pause_ms: BTreeMap::from([('.', 50), ('!', 50), ('?', 50), (',', 50)]),
        }
    }
}

impl TypewriterConfig {
    pub fn delay_before(&self, last_printed: Option<char>, next: char) -> u64 {
        let Some(last) = last_printed else {
            return self.base_interval_ms;
        };
        let table = if next == ' ' || next == NBSP {
            &self.alone_pause_ms
        } else {
            &self.combo_pause_ms
        };
        self.base_interval_ms + table.get(&last).copied().unwrap_or(0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypewriterState {
    Idle,
    Typing,
    Complete,
    Cancelled,
}

/// The single outstanding suspend point. Dropping it cancels the wait.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingTimer {
    pub due_at: u64,
    pub node_index: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypewriterPoll {
    Idle,
    Waiting { wake_at: u64 },
    Advance { count: u32 },
}

/// Cooperative reveal loop over one line's nodes. The host owns the clock and
/// calls [`Typewriter::poll`] with the current time in milliseconds.
#[derive(Debug, Clone)]
pub struct Typewriter {
    config: TypewriterConfig,
    nodes: Vec<RenderNode>,
    index: usize,
    state: TypewriterState,
    last_printed: Option<char>,
    timer: Option<PendingTimer>,
    clock: Option<u64>,
}

impl Typewriter {
    pub fn new(config: TypewriterConfig) -> Self {
        Self {
            config,
            nodes: Vec::new(),
            index: 0,
            state: TypewriterState::Idle,
            last_printed: None,
            timer: None,
            clock: None,
        }
    }

    pub fn state(&self) -> TypewriterState {
        self.state
    }

    pub fn is_typing(&self) -> bool {
        self.state == TypewriterState::Typing
    }

    pub fn pending_timer(&self) -> Option<PendingTimer> {
        self.timer
    }

    pub fn config(&self) -> &TypewriterConfig {
        &self.config
    }

    pub fn start(&mut self, nodes: Vec<RenderNode>) {
        self.timer = None;
        self.nodes = nodes;
        self.index = 0;
        self.state = TypewriterState::Typing;
        self.last_printed = None;
        self.clock = None;
    }

    pub fn cancel(&mut self) {
        self.timer = None;
        if self.state == TypewriterState::Typing {
            self.state = TypewriterState::Cancelled;
        }
    }

    /// Runs every node that is due at `now`. Delays accumulate from the moment
    /// the previous timer fired, so a late poll catches up without reordering.
    pub fn poll(
        &mut self,
        now: u64,
        mut surface: Option<&mut dyn RenderSurface>,
    ) -> TypewriterPoll {
        loop {
            if self.state != TypewriterState::Typing {
                return TypewriterPoll::Idle;
            }

            if let Some(timer) = self.timer {
                if now < timer.due_at {
                    return TypewriterPoll::Waiting {
                        wake_at: timer.due_at,
                    };
                }
                self.timer = None;
                self.clock = Some(timer.due_at);
                if let Some(RenderNode::Character { text, classes }) = self.nodes.get(timer.node_index)
                {
                    if let Some(surface) = surface.as_deref_mut() {
                        surface.append_char(*text, classes);
                    }
                    self.last_printed = Some(*text);
                }
                self.index = timer.node_index + 1;
                continue;
            }

            let Some(node) = self.nodes.get(self.index) else {
                self.finish();
                return TypewriterPoll::Idle;
            };
            let base = *self.clock.get_or_insert(now);
            match node {
                RenderNode::Pause { duration_ms } => {
                    self.timer = Some(PendingTimer {
                        due_at: base.saturating_add(*duration_ms),
                        node_index: self.index,
                    });
                }
                RenderNode::Break { count } => {
                    if let Some(surface) = surface.as_deref_mut() {
                        surface.append_breaks(*count);
                    }
                    self.index += 1;
                }
                RenderNode::Next { count } => {
                    let count = *count;
                    self.finish();
                    return TypewriterPoll::Advance { count };
                }
                RenderNode::Character { text, .. } => {
                    let delay = self.config.delay_before(self.last_printed, *text);
                    self.timer = Some(PendingTimer {
                        due_at: base.saturating_add(delay),
                        node_index: self.index,
                    });
                }
            }
        }
    }

    /// Skips the remaining timing: flushes characters and breaks, drops pauses,
    /// and never fires `Next` nodes.
    pub fn reveal_instantly(&mut self, mut surface: Option<&mut dyn RenderSurface>) {
        self.timer = None;
        if self.state == TypewriterState::Typing {
            for node in &self.nodes[self.index.min(self.nodes.len())..] {
                let Some(surface) = surface.as_deref_mut() else {
                    break;
                };
                match node {
                    RenderNode::Character { text, classes } => surface.append_char(*text, classes),
                    RenderNode::Break { count } => surface.append_breaks(*count),
                    RenderNode::Pause { .. } | RenderNode::Next { .. } => {}
                }
            }
        }
        self.finish();
    }

    fn finish(&mut self) {
        self.timer = None;
        self.index = self.nodes.len();
        self.state = TypewriterState::Complete;
        self.last_printed = None;
    }
}
