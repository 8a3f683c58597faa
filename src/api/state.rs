//! Application state for the shift report API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::{Arc, Mutex};

use crate::config::ParserConfig;
use crate::error::{ParserError, ParserResult};
use crate::pipeline::{FsSnapshotSink, NoopSnapshotSink, SnapshotSink};
use crate::source::{TextExtractor, default_pdf_extractor};
use crate::store::InMemoryShiftStore;

/// Shared application state.
///
/// Holds the parser configuration, the PDF text extractor, and the shift
/// store that imports write to.
#[derive(Clone)]
pub struct AppState {
    config: Arc<ParserConfig>,
    store: Arc<Mutex<InMemoryShiftStore>>,
    extractor: Arc<dyn TextExtractor + Send + Sync>,
}

impl AppState {
    /// Creates state with the default PDF extractor and an empty store.
    pub fn new(config: ParserConfig) -> Self {
        Self::with_extractor(config, default_pdf_extractor())
    }

    /// Creates state with a custom text extractor for uploads.
    pub fn with_extractor<E>(config: ParserConfig, extractor: E) -> Self
    where
        E: TextExtractor + Send + Sync + 'static,
    {
        Self {
            config: Arc::new(config),
            store: Arc::new(Mutex::new(InMemoryShiftStore::new())),
            extractor: Arc::new(extractor),
        }
    }

    /// Returns a reference to the parser configuration.
    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Returns a handle to the upload extractor.
    pub fn extractor(&self) -> Arc<dyn TextExtractor + Send + Sync> {
        Arc::clone(&self.extractor)
    }

    /// Runs `f` with exclusive access to the store.
    pub fn with_store<R>(&self, f: impl FnOnce(&mut InMemoryShiftStore) -> R) -> ParserResult<R> {
        let mut store = self.store.lock().map_err(|_| ParserError::Storage {
            message: "shift store lock poisoned".to_string(),
        })?;
        Ok(f(&mut store))
    }

    /// A fresh snapshot sink for one request, writing to the configured
    /// directory if there is one.
    pub fn snapshot_sink(&self) -> Box<dyn SnapshotSink> {
        match &self.config.snapshot_dir {
            Some(dir) => Box::new(FsSnapshotSink::new(dir)),
            None => Box::new(NoopSnapshotSink),
        }
    }
}
