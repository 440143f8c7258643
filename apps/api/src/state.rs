use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex, MutexGuard};

use anyhow::anyhow;

use crate::config::Config;
use crate::errors::AppError;
use crate::store::CvStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// The one wizard state of this process. Held only for short,
    /// synchronous sections; never across an `.await`.
    pub store: Arc<Mutex<CvStore>>,
    pub config: Config,
    /// Set while a PDF export runs.
    pub exporting: Arc<AtomicBool>,
}

impl AppState {
    pub fn new(store: CvStore, config: Config) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
            config,
            exporting: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn lock_store(&self) -> Result<MutexGuard<'_, CvStore>, AppError> {
        self.store
            .lock()
            .map_err(|_| AppError::Internal(anyhow!("store lock poisoned")))
    }
}

#[cfg(test)]
impl AppState {
    /// State over `initial` with nothing persisted.
    pub fn for_tests(initial: crate::models::cv::WizardState) -> Self {
        let config = Config::from_lookup(|key| match key {
            "STATE_BACKEND" => Some("memory".to_string()),
            _ => None,
        })
        .expect("memory config is valid");
        Self::new(CvStore::new(initial), config)
    }
}
