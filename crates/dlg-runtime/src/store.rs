use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::time::{SystemTime, UNIX_EPOCH};

use dlg_core::{default_flags, DialogueError, GameState};
use serde_json::Value;
use tracing::{info, warn};

/// Durable backing for the state store.
pub trait StateBackend {
    fn read(&self) -> Result<Option<String>, DialogueError>;
    fn write(&mut self, payload: &str) -> Result<(), DialogueError>;
    fn clear(&mut self) -> Result<(), DialogueError>;
}

/// JSON file on disk. Several processes pointing at the same path behave like
/// several browsing contexts sharing one origin.
#[derive(Debug, Clone)]
pub struct FileBackend {
    path: PathBuf,
}

impl FileBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl StateBackend for FileBackend {
    fn read(&self) -> Result<Option<String>, DialogueError> {
        if !self.path.exists() {
            return Ok(None);
        }
        fs::read_to_string(&self.path)
            .map(Some)
            .map_err(|error| DialogueError::new("STORE_READ", error.to_string()))
    }

    fn write(&mut self, payload: &str) -> Result<(), DialogueError> {
        let parent = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(parent)
            .map_err(|error| DialogueError::new("STORE_WRITE", error.to_string()))?;
        fs::write(&self.path, payload)
            .map_err(|error| DialogueError::new("STORE_WRITE", error.to_string()))
    }

    fn clear(&mut self) -> Result<(), DialogueError> {
        if !self.path.exists() {
            return Ok(());
        }
        fs::remove_file(&self.path)
            .map_err(|error| DialogueError::new("STORE_WRITE", error.to_string()))
    }
}

/// Shared in-memory slot. Clones see each other's writes.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    slot: Rc<RefCell<Option<String>>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_payload(payload: impl Into<String>) -> Self {
        Self {
            slot: Rc::new(RefCell::new(Some(payload.into()))),
        }
    }

    pub fn payload(&self) -> Option<String> {
        self.slot.borrow().clone()
    }
}

impl StateBackend for MemoryBackend {
    fn read(&self) -> Result<Option<String>, DialogueError> {
        Ok(self.slot.borrow().clone())
    }

    fn write(&mut self, payload: &str) -> Result<(), DialogueError> {
        *self.slot.borrow_mut() = Some(payload.to_string());
        Ok(())
    }

    fn clear(&mut self) -> Result<(), DialogueError> {
        *self.slot.borrow_mut() = None;
        Ok(())
    }
}

pub fn unix_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX))
        .unwrap_or(0)
}

/// Field-by-field recovery of a stored state. Anything missing or of the wrong
/// type falls back to its default instead of discarding the whole document.
pub fn parse_stored_state(raw: &str, now: u64) -> GameState {
    let value = match serde_json::from_str::<Value>(raw) {
        Ok(Value::Object(map)) => map,
        Ok(_) => {
            warn!("stored game state is not an object, using defaults");
            return GameState::new(now);
        }
        Err(error) => {
            warn!(%error, "stored game state is corrupt, using defaults");
            return GameState::new(now);
        }
    };

    let flags = match value.get("flags") {
        Some(Value::Object(entries)) => entries
            .iter()
            .filter_map(|(name, flag)| flag.as_bool().map(|flag| (name.clone(), flag)))
            .collect::<BTreeMap<_, _>>(),
        _ => default_flags(),
    };

    GameState {
        click_count: value
            .get("clickCount")
            .and_then(Value::as_u64)
            .unwrap_or(0),
        flags,
        input_buffer: value
            .get("inputBuffer")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        immersion_consent: value.get("immersionConsent").and_then(Value::as_bool),
        start_time: value
            .get("startTime")
            .and_then(Value::as_u64)
            .filter(|start| *start > 0)
            .unwrap_or(now),
    }
}

/// Holds the one live [`GameState`] of a context and flushes every mutation.
/// Consistency with other contexts is last-writer-wins with no merging.
pub struct StateStore {
    backend: Box<dyn StateBackend>,
    state: GameState,
    last_seen: Option<String>,
}

impl StateStore {
    pub fn open(backend: impl StateBackend + 'static) -> Self {
        let (state, last_seen) = Self::load(&backend);
        Self {
            backend: Box::new(backend),
            state,
            last_seen,
        }
    }

    pub fn load(backend: &dyn StateBackend) -> (GameState, Option<String>) {
        let now = unix_millis();
        match backend.read() {
            Ok(Some(raw)) => (parse_stored_state(&raw, now), Some(raw)),
            Ok(None) => (GameState::new(now), None),
            Err(error) => {
                warn!(%error, "failed to read game state, using defaults");
                (GameState::new(now), None)
            }
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn save(&mut self) -> Result<(), DialogueError> {
        let payload = serde_json::to_string(&self.state)
            .map_err(|error| DialogueError::new("STORE_WRITE", error.to_string()))?;
        self.backend.write(&payload)?;
        self.last_seen = Some(payload);
        Ok(())
    }

    /// Applies `mutate` and flushes immediately.
    pub fn update<R>(
        &mut self,
        mutate: impl FnOnce(&mut GameState) -> R,
    ) -> Result<R, DialogueError> {
        let result = mutate(&mut self.state);
        self.save()?;
        Ok(result)
    }

    pub fn increment_clicks(&mut self) -> Result<u64, DialogueError> {
        self.update(|state| {
            state.click_count = state.click_count.saturating_add(1);
            state.click_count
        })
    }

    pub fn set_flag(&mut self, name: &str, value: bool) -> Result<(), DialogueError> {
        self.update(|state| state.set_flag(name, value))
    }

    pub fn set_consent(&mut self, consent: bool) -> Result<(), DialogueError> {
        self.update(|state| state.immersion_consent = Some(consent))
    }

    /// Clears the durable copy and re-seeds defaults in memory. The defaults
    /// are written by the next mutation or flush.
    pub fn reset(&mut self) -> Result<(), DialogueError> {
        self.backend.clear()?;
        self.state = GameState::new(unix_millis());
        self.last_seen = None;
        info!("game state reset");
        Ok(())
    }

    /// Adopts a state written by another context, replacing the local copy
    /// wholesale. A durable copy that vanished means another context reset,
    /// so defaults are adopted. Returns whether a replacement happened.
    pub fn sync_from_backend(&mut self) -> Result<bool, DialogueError> {
        let current = self.backend.read()?;
        if current == self.last_seen {
            return Ok(false);
        }
        self.state = match current.as_deref() {
            Some(raw) => parse_stored_state(raw, unix_millis()),
            None => GameState::new(unix_millis()),
        };
        self.last_seen = current;
        info!("game state replaced by another context");
        Ok(true)
    }
}
