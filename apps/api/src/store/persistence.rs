//! Durable copy of the wizard state: one JSON document under a fixed key.
//!
//! Failures here never reach the user. Reads fall back to the initial state
//! and writes are logged and dropped.

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use redis::Commands;
use thiserror::Error;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::actions::normalize;
use super::{StoreEvent, StoreObserver};
use crate::models::cv::WizardState;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] io::Error),

    #[error("redis failed: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("state could not be serialised: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("storage lock poisoned")]
    Poisoned,
}

/// Where the snapshot lives. Implementations block; they run at startup and
/// on the blocking pool behind [`Persister`], never under the store lock.
pub trait StateStorage: Send + Sync {
    fn load(&self) -> Result<Option<String>, StorageError>;
    fn save(&self, snapshot: &str) -> Result<(), StorageError>;
    fn clear(&self) -> Result<(), StorageError>;
    /// Short label for logs.
    fn describe(&self) -> String;
}

// ────────────────────────────────────────────────────────────────────────────
// File
// ────────────────────────────────────────────────────────────────────────────

pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl StateStorage for FileStorage {
    fn load(&self) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(&self.path) {
            Ok(s) => Ok(Some(s)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&self, snapshot: &str) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        // Write-then-rename so a crash never leaves a half-written record.
        let tmp = self.temp_path();
        {
            let mut file = fs::File::create(&tmp)?;
            file.write_all(snapshot.as_bytes())?;
            file.sync_all()?;
        }
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    fn clear(&self) -> Result<(), StorageError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn describe(&self) -> String {
        format!("file:{}", self.path.display())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Redis
// ────────────────────────────────────────────────────────────────────────────

/// Bound on connecting and on each command, so a dead server fails a write
/// instead of stalling the writer.
const REDIS_TIMEOUT: Duration = Duration::from_secs(2);

pub struct RedisStorage {
    client: redis::Client,
    key: String,
}

impl RedisStorage {
    pub fn new(client: redis::Client, key: impl Into<String>) -> Self {
        Self {
            client,
            key: key.into(),
        }
    }

    fn connection(&self) -> Result<redis::Connection, StorageError> {
        let conn = self.client.get_connection_with_timeout(REDIS_TIMEOUT)?;
        conn.set_read_timeout(Some(REDIS_TIMEOUT))?;
        conn.set_write_timeout(Some(REDIS_TIMEOUT))?;
        Ok(conn)
    }
}

impl StateStorage for RedisStorage {
    fn load(&self) -> Result<Option<String>, StorageError> {
        let value: Option<String> = self.connection()?.get(&self.key)?;
        Ok(value)
    }

    fn save(&self, snapshot: &str) -> Result<(), StorageError> {
        self.connection()?.set::<_, _, ()>(&self.key, snapshot)?;
        Ok(())
    }

    fn clear(&self) -> Result<(), StorageError> {
        self.connection()?.del::<_, ()>(&self.key)?;
        Ok(())
    }

    fn describe(&self) -> String {
        format!("redis:{}", self.key)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Memory
// ────────────────────────────────────────────────────────────────────────────

/// Process-local storage; nothing survives a restart.
#[derive(Default)]
pub struct MemoryStorage {
    slot: Mutex<Option<String>>,
}

impl StateStorage for MemoryStorage {
    fn load(&self) -> Result<Option<String>, StorageError> {
        Ok(self.slot.lock().map_err(|_| StorageError::Poisoned)?.clone())
    }

    fn save(&self, snapshot: &str) -> Result<(), StorageError> {
        *self.slot.lock().map_err(|_| StorageError::Poisoned)? = Some(snapshot.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<(), StorageError> {
        *self.slot.lock().map_err(|_| StorageError::Poisoned)? = None;
        Ok(())
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Hydrate / persist
// ────────────────────────────────────────────────────────────────────────────

/// Loads the stored record. Absent, unreadable or malformed records all give
/// the initial state.
pub fn hydrate(storage: &dyn StateStorage) -> WizardState {
    let raw = match storage.load() {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            info!(storage = %storage.describe(), "no saved state, starting fresh");
            return WizardState::initial();
        }
        Err(e) => {
            warn!(storage = %storage.describe(), "could not read saved state: {e}");
            return WizardState::initial();
        }
    };

    match serde_json::from_str::<WizardState>(&raw) {
        Ok(state) => {
            let state = normalize(state);
            info!(
                storage = %storage.describe(),
                step = state.step,
                experiences = state.data.experiences.len(),
                "restored saved state"
            );
            state
        }
        Err(e) => {
            warn!(storage = %storage.describe(), "saved state is not valid, starting fresh: {e}");
            WizardState::initial()
        }
    }
}

/// One queued write: the full snapshot, dropping the old record first after
/// a reset.
#[derive(Debug)]
struct PendingWrite {
    snapshot: String,
    clear_first: bool,
}

/// Store observer that queues a full snapshot after every change. A writer
/// task owns the storage, so dispatching never waits on disk or network.
pub struct Persister {
    tx: mpsc::UnboundedSender<PendingWrite>,
    label: String,
}

impl Persister {
    /// Starts the writer on the current runtime. The task ends once the
    /// persister is dropped and the queue is drained.
    pub fn spawn(storage: Arc<dyn StateStorage>) -> (Self, JoinHandle<()>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let label = storage.describe();
        let writer = tokio::spawn(run_writer(storage, rx));
        (Self { tx, label }, writer)
    }
}

impl StoreObserver for Persister {
    fn notify(&self, event: StoreEvent<'_>) {
        let (state, clear_first) = match event {
            StoreEvent::Changed(state) => (state, false),
            StoreEvent::Reset(state) => (state, true),
        };
        let snapshot = match serde_json::to_string(state) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                warn!(storage = %self.label, "failed to serialise state: {e}");
                return;
            }
        };
        if self.tx.send(PendingWrite { snapshot, clear_first }).is_err() {
            warn!(storage = %self.label, "state writer stopped, change not persisted");
        }
    }
}

async fn run_writer(
    storage: Arc<dyn StateStorage>,
    mut rx: mpsc::UnboundedReceiver<PendingWrite>,
) {
    while let Some(mut write) = rx.recv().await {
        // Only the newest snapshot is worth writing; a reset anywhere in the
        // backlog still clears first.
        let mut skipped = 0usize;
        while let Ok(next) = rx.try_recv() {
            write = PendingWrite {
                clear_first: write.clear_first || next.clear_first,
                snapshot: next.snapshot,
            };
            skipped += 1;
        }
        if skipped > 0 {
            debug!(skipped, "coalesced queued state writes");
        }

        let target = storage.clone();
        let result = tokio::task::spawn_blocking(move || -> Result<(), StorageError> {
            if write.clear_first {
                target.clear()?;
            }
            target.save(&write.snapshot)
        })
        .await;

        match result {
            Ok(Ok(())) => {}
            Ok(Err(e)) => warn!(storage = %storage.describe(), "failed to persist state: {e}"),
            Err(e) => warn!(storage = %storage.describe(), "state write did not finish: {e}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{Action, CvStore};

    struct BrokenStorage;

    impl StateStorage for BrokenStorage {
        fn load(&self) -> Result<Option<String>, StorageError> {
            Err(io::Error::new(io::ErrorKind::PermissionDenied, "denied").into())
        }
        fn save(&self, _: &str) -> Result<(), StorageError> {
            Err(io::Error::new(io::ErrorKind::PermissionDenied, "denied").into())
        }
        fn clear(&self) -> Result<(), StorageError> {
            Err(io::Error::new(io::ErrorKind::PermissionDenied, "denied").into())
        }
        fn describe(&self) -> String {
            "broken".to_string()
        }
    }

    /// Counts saves and holds each one until the gate sender is dropped.
    struct GatedStorage {
        gate: Mutex<std::sync::mpsc::Receiver<()>>,
        saved: Mutex<Vec<String>>,
    }

    impl StateStorage for GatedStorage {
        fn load(&self) -> Result<Option<String>, StorageError> {
            Ok(None)
        }
        fn save(&self, snapshot: &str) -> Result<(), StorageError> {
            let _ = self.gate.lock().unwrap().recv();
            self.saved.lock().unwrap().push(snapshot.to_string());
            Ok(())
        }
        fn clear(&self) -> Result<(), StorageError> {
            Ok(())
        }
        fn describe(&self) -> String {
            "gated".to_string()
        }
    }

    fn store_with(storage: Arc<dyn StateStorage>) -> (CvStore, JoinHandle<()>) {
        let mut store = CvStore::new(hydrate(storage.as_ref()));
        let (persister, writer) = Persister::spawn(storage);
        store.subscribe(Arc::new(persister));
        (store, writer)
    }

    /// Drops the store and waits until every queued write has landed.
    async fn settle(store: CvStore, writer: JoinHandle<()>) -> WizardState {
        let state = store.state().clone();
        drop(store);
        writer.await.unwrap();
        state
    }

    #[test]
    fn test_hydrate_missing_record_gives_initial() {
        let storage = MemoryStorage::default();
        assert_eq!(hydrate(&storage), WizardState::initial());
    }

    #[test]
    fn test_hydrate_malformed_record_gives_initial() {
        let storage = MemoryStorage::default();
        storage.save("{not json").unwrap();
        assert_eq!(hydrate(&storage), WizardState::initial());
        storage.save(r#"{"step":"three"}"#).unwrap();
        assert_eq!(hydrate(&storage), WizardState::initial());
    }

    #[test]
    fn test_hydrate_normalizes_loaded_record() {
        let storage = MemoryStorage::default();
        storage
            .save(r#"{"step":7,"visaType":"H2A","data":{"templateId":"template1","accent":"green"}}"#)
            .unwrap();
        let state = hydrate(&storage);
        assert_eq!(state.step, 4);
        assert_eq!(state.data.accent, crate::models::cv::Accent::Blue);
    }

    #[tokio::test]
    async fn test_every_change_is_persisted_and_reloads() {
        let storage: Arc<dyn StateStorage> = Arc::new(MemoryStorage::default());
        let (mut store, writer) = store_with(storage.clone());
        store.dispatch(Action::AddLanguage {
            name: "English".to_string(),
        });
        store.dispatch(Action::NextStep);

        let last = settle(store, writer).await;
        assert_eq!(hydrate(storage.as_ref()), last);
    }

    #[tokio::test]
    async fn test_reset_then_reload_is_initial() {
        let dir = tempfile::tempdir().unwrap();
        let storage: Arc<dyn StateStorage> =
            Arc::new(FileStorage::new(dir.path().join("nested").join("state.json")));
        let (mut store, writer) = store_with(storage.clone());
        store.dispatch(Action::AddExperience);
        store.dispatch(Action::GoToStep {
            step: serde_json::json!(3),
        });
        settle(store, writer).await;
        assert_ne!(hydrate(storage.as_ref()), WizardState::initial());

        // A fresh process picks the record up, then resets it.
        let (mut store, writer) = store_with(storage.clone());
        assert_eq!(store.state().step, 3);
        store.dispatch(Action::ResetAll);
        settle(store, writer).await;
        assert_eq!(hydrate(storage.as_ref()), WizardState::initial());
    }

    #[tokio::test]
    async fn test_dispatch_does_not_wait_for_storage() {
        let (open_gate, gate) = std::sync::mpsc::channel();
        let storage = Arc::new(GatedStorage {
            gate: Mutex::new(gate),
            saved: Mutex::new(Vec::new()),
        });
        let (mut store, writer) = store_with(storage.clone());

        // Every save is held at the gate, yet each dispatch returns.
        for name in ["English", "Spanish", "French"] {
            assert!(store.dispatch(Action::AddLanguage {
                name: name.to_string(),
            }));
        }
        assert!(storage.saved.lock().unwrap().is_empty());

        drop(open_gate);
        let last = settle(store, writer).await;
        let saved = storage.saved.lock().unwrap().clone();
        assert!(!saved.is_empty() && saved.len() <= 3);
        assert_eq!(saved.last().unwrap(), &serde_json::to_string(&last).unwrap());
    }

    #[test]
    fn test_file_storage_round_trip_and_clear() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path().join("state.json"));
        assert!(storage.load().unwrap().is_none());
        storage.save("{}").unwrap();
        assert_eq!(storage.load().unwrap().as_deref(), Some("{}"));
        assert!(!dir.path().join("state.json.tmp").exists());
        storage.clear().unwrap();
        storage.clear().unwrap();
        assert!(storage.load().unwrap().is_none());
    }

    #[tokio::test]
    async fn test_storage_failures_are_swallowed() {
        let storage: Arc<dyn StateStorage> = Arc::new(BrokenStorage);
        let (mut store, writer) = store_with(storage);
        assert_eq!(store.state(), &WizardState::initial());
        assert!(store.dispatch(Action::NextStep));
        assert!(store.dispatch(Action::ResetAll));
        assert_eq!(settle(store, writer).await, WizardState::initial());
    }
}
