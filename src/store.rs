//! Persistent list of search engines.

use crate::defaults::Defaults;
use crate::engine::{decode_engines, encode_engines, normalize, FallbackDefault, SearchEngine};
use crate::error::{Result, WebsearchError};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

pub type SubscriptionId = u64;

type Listener = Box<dyn Fn(&[SearchEngine]) + Send + Sync>;

/// Where the engines of the last [`EngineStore::load`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadSource {
    File,
    Defaults,
}

/// Owns the engine list and mirrors every change to the engines file.
///
/// The in-memory list is the source of truth for the session. Every mutation
/// goes through [`EngineStore::set_engines`], which rewrites the whole file and
/// notifies subscribers.
pub struct EngineStore {
    path: PathBuf,
    defaults: Defaults,
    engines: Vec<SearchEngine>,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: SubscriptionId,
}

impl EngineStore {
    /// Create an empty store backed by `path`. Nothing is read until [`load`](Self::load).
    pub fn new(path: impl Into<PathBuf>, defaults: Defaults) -> Self {
        Self {
            path: path.into(),
            defaults,
            engines: Vec::new(),
            listeners: Vec::new(),
            next_subscription: 0,
        }
    }

    /// Create a store and load it from `path`.
    pub fn open(path: impl Into<PathBuf>, defaults: Defaults) -> Self {
        let mut store = Self::new(path, defaults);
        store.load();
        store
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn engines(&self) -> &[SearchEngine] {
        &self.engines
    }

    pub fn get(&self, index: usize) -> Option<&SearchEngine> {
        self.engines.get(index)
    }

    pub fn find(&self, id: &str) -> Option<&SearchEngine> {
        self.engines.iter().find(|e| e.id == id)
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.engines.iter().position(|e| e.id == id)
    }

    /// Read the engines file, falling back to the defaults when it is missing
    /// or cannot be decoded.
    pub fn load(&mut self) -> LoadSource {
        match self.read_file() {
            Ok(Some((engines, migrated))) => {
                tracing::debug!("loaded {} engines from {}", engines.len(), self.path.display());
                self.engines = engines;
                if migrated {
                    tracing::info!("migrated engines file {}", self.path.display());
                    if let Err(e) = self.persist() {
                        tracing::error!("{e}");
                    }
                }
                self.notify();
                LoadSource::File
            }
            Ok(None) => {
                tracing::info!(
                    "No engines file found. Using defaults. ({})",
                    self.path.display()
                );
                self.seed_defaults();
                LoadSource::Defaults
            }
            Err(e) => {
                tracing::warn!("{e}; using defaults");
                self.back_up_unreadable();
                self.seed_defaults();
                LoadSource::Defaults
            }
        }
    }

    fn seed_defaults(&mut self) {
        // set_engines already logged the write failure.
        if let Err(e) = self.restore_defaults() {
            tracing::debug!("defaults kept in memory only: {e}");
        }
    }

    /// Move an unreadable engines file aside so seeding the defaults does not
    /// overwrite it.
    fn back_up_unreadable(&self) {
        if !self.path.exists() {
            return;
        }
        let backup = backup_path(&self.path);
        match std::fs::rename(&self.path, &backup) {
            Ok(()) => tracing::info!("kept unreadable engines file as {}", backup.display()),
            Err(e) => tracing::warn!(
                "failed to back up {} to {}: {e}",
                self.path.display(),
                backup.display()
            ),
        }
    }

    fn read_file(&self) -> Result<Option<(Vec<SearchEngine>, bool)>> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(self.read_error(e)),
        };
        let decoded =
            decode_engines(&content, FallbackDefault::UserConfig).map_err(|e| self.read_error(e))?;
        Ok(Some((decoded.engines, decoded.migrated)))
    }

    fn read_error(&self, reason: impl ToString) -> WebsearchError {
        WebsearchError::ConfigRead {
            path: self.path.clone(),
            reason: reason.to_string(),
        }
    }

    /// Replace the whole list.
    ///
    /// The list is normalised, subscribers are notified and the file is
    /// rewritten. A failed write is logged and returned, but the new list
    /// stays in effect.
    pub fn set_engines(&mut self, mut engines: Vec<SearchEngine>) -> Result<()> {
        normalize(&mut engines);
        self.engines = engines;
        self.notify();
        self.persist().map_err(|e| {
            tracing::error!("{e}");
            e
        })
    }

    /// Replace the list with a fresh copy of the defaults.
    pub fn restore_defaults(&mut self) -> Result<()> {
        let engines = self.defaults.instantiate();
        self.set_engines(engines)
    }

    /// Register a callback invoked with the new list after every change.
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: Fn(&[SearchEngine]) + Send + Sync + 'static,
    {
        let id = self.next_subscription;
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sid, _)| *sid != id);
        self.listeners.len() != before
    }

    fn notify(&self) {
        for (_, listener) in &self.listeners {
            listener(&self.engines);
        }
    }

    fn persist(&self) -> Result<()> {
        write_atomic(&self.path, &self.engines).map_err(|e| WebsearchError::ConfigWrite {
            path: self.path.clone(),
            reason: e.to_string(),
        })
    }
}

fn write_atomic(path: &Path, engines: &[SearchEngine]) -> anyhow::Result<()> {
    let json = encode_engines(engines)?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let tmp = with_suffix(path, ".tmp");
    std::fs::write(&tmp, json)?;
    std::fs::rename(&tmp, path)?;
    Ok(())
}

/// `<file>.bak` next to the engines file.
pub fn backup_path(path: &Path) -> PathBuf {
    with_suffix(path, ".bak")
}

fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(suffix);
    PathBuf::from(name)
}
