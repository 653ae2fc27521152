//! Operations behind the engine settings editor.
//!
//! Rows are addressed by their index in the store's (name sorted) list. Every
//! operation validates the row before touching the list and ends in a single
//! [`EngineStore::set_engines`] call.

use crate::engine::SearchEngine;
use crate::error::{Result, WebsearchError};
use crate::icon::IconSource;
use crate::recycle::RecycleBin;
use crate::store::EngineStore;
use image::imageops::FilterType;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Icon of engines created without an image.
pub const DEFAULT_ICON: &str = ":default";

/// User icons are scaled to fit this square.
pub const ICON_SIZE: u32 = 256;

/// The values a user confirmed in the engine dialog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EngineEdit {
    pub name: String,
    pub trigger: String,
    pub url: String,
    pub fallback: bool,
    /// A newly chosen icon image, if the user picked one.
    pub icon_image: Option<PathBuf>,
}

impl EngineEdit {
    pub fn from_engine(engine: &SearchEngine) -> Self {
        Self {
            name: engine.name.clone(),
            trigger: engine.trigger.clone(),
            url: engine.url.clone(),
            fallback: engine.fallback,
            icon_image: None,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(WebsearchError::InvalidEngineEdit("name must not be empty".into()));
        }
        if self.url.trim().is_empty() {
            return Err(WebsearchError::InvalidEngineEdit("url must not be empty".into()));
        }
        if !self.url.contains("%s") {
            return Err(WebsearchError::InvalidEngineEdit(format!(
                "url '{}' has no %s placeholder",
                self.url
            )));
        }
        Ok(())
    }
}

/// Applies editor results to an [`EngineStore`], managing user icon files in
/// `data_dir`.
pub struct EngineEditor {
    data_dir: PathBuf,
    recycle_bin: Box<dyn RecycleBin>,
}

impl EngineEditor {
    pub fn new(data_dir: impl Into<PathBuf>, recycle_bin: Box<dyn RecycleBin>) -> Self {
        Self {
            data_dir: data_dir.into(),
            recycle_bin,
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Add a new engine and return its identifier.
    pub fn add_engine(&self, store: &mut EngineStore, edit: &EngineEdit) -> Result<String> {
        edit.validate()?;
        let mut engines = store.engines().to_vec();
        let taken: HashSet<String> = engines.iter().map(|e| e.id.clone()).collect();
        let mut engine = SearchEngine::new(&taken, "", "", "", DEFAULT_ICON, false);
        self.apply_edit(edit, &mut engine)?;
        let id = engine.id.clone();
        engines.push(engine);
        store.set_engines(engines)?;
        Ok(id)
    }

    pub fn update_engine(&self, store: &mut EngineStore, index: usize, edit: &EngineEdit) -> Result<()> {
        edit.validate()?;
        let mut engines = store.engines().to_vec();
        let engine = engines.get_mut(index).ok_or(WebsearchError::NotFound(index))?;
        self.apply_edit(edit, engine)?;
        store.set_engines(engines)
    }

    /// Inline edit of the trigger column.
    pub fn set_trigger(&self, store: &mut EngineStore, index: usize, trigger: &str) -> Result<()> {
        let mut engines = store.engines().to_vec();
        let engine = engines.get_mut(index).ok_or(WebsearchError::NotFound(index))?;
        engine.trigger = trigger.trim().to_string();
        store.set_engines(engines)
    }

    /// Inline toggle of the fallback column.
    pub fn set_fallback(&self, store: &mut EngineStore, index: usize, fallback: bool) -> Result<()> {
        let mut engines = store.engines().to_vec();
        let engine = engines.get_mut(index).ok_or(WebsearchError::NotFound(index))?;
        engine.fallback = fallback;
        store.set_engines(engines)
    }

    /// Remove the engine at `index`, moving its user icon to the trash.
    pub fn remove_engine(&self, store: &mut EngineStore, index: usize) -> Result<SearchEngine> {
        let mut engines = store.engines().to_vec();
        if index >= engines.len() {
            return Err(WebsearchError::NotFound(index));
        }
        let removed = engines.remove(index);
        self.recycle_icon(&removed.icon_path);
        store.set_engines(engines)?;
        Ok(removed)
    }

    pub fn restore_defaults(&self, store: &mut EngineStore) -> Result<()> {
        store.restore_defaults()
    }

    fn apply_edit(&self, edit: &EngineEdit, engine: &mut SearchEngine) -> Result<()> {
        if let Some(image_path) = &edit.icon_image {
            engine.icon_path = self.store_icon(image_path, engine)?;
        }
        engine.name = edit.name.clone();
        engine.trigger = edit.trigger.trim().to_string();
        engine.url = edit.url.clone();
        engine.fallback = edit.fallback;
        Ok(())
    }

    /// Scale `source` into the data directory as `<id>.png` and return its
    /// `file:` reference. The previous user icon goes to the trash.
    fn store_icon(&self, source: &Path, engine: &SearchEngine) -> Result<String> {
        let image = image::open(source).map_err(|e| WebsearchError::IconResolution {
            icon: source.display().to_string(),
            reason: e.to_string(),
        })?;
        let image = image.resize(ICON_SIZE, ICON_SIZE, FilterType::Lanczos3);

        self.recycle_icon(&engine.icon_path);

        let dst = self.data_dir.join(format!("{}.png", engine.id));
        let saved = std::fs::create_dir_all(&self.data_dir)
            .map_err(|e| e.to_string())
            .and_then(|_| image.save(&dst).map_err(|e| e.to_string()));
        if let Err(reason) = saved {
            let err = WebsearchError::IconSave { path: dst, reason };
            tracing::warn!("{err}");
            return Err(err);
        }

        Ok(url::Url::from_file_path(&dst)
            .map(|u| u.to_string())
            .unwrap_or_else(|_| format!("file:{}", dst.display())))
    }

    fn recycle_icon(&self, icon_path: &str) {
        let Some(path) = IconSource::local_file(icon_path) else {
            return;
        };
        if !path.exists() {
            return;
        }
        if let Err(e) = self.recycle_bin.recycle(&path) {
            tracing::warn!("could not move {} to trash: {e}", path.display());
        }
    }
}
