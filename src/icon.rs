//! Lazy icon resolution.
//!
//! Engines refer to icons by string: a `file:` URL or plain path for a user
//! image, `:name` for an icon bundled with the host and `xdg:name` for an icon
//! from the desktop theme. Nothing is read from disk until an icon is asked for.

use crate::error::WebsearchError;
use std::collections::HashMap;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IconSource {
    File(PathBuf),
    Bundled(String),
    Themed(String),
}

impl IconSource {
    pub fn parse(reference: &str) -> Option<Self> {
        if reference.is_empty() {
            return None;
        }
        if let Some(name) = reference.strip_prefix("xdg:") {
            return Some(IconSource::Themed(name.to_string()));
        }
        if let Some(name) = reference.strip_prefix(':') {
            return Some(IconSource::Bundled(name.to_string()));
        }
        if reference.starts_with("file:") {
            return url::Url::parse(reference)
                .ok()
                .and_then(|u| u.to_file_path().ok())
                .map(IconSource::File);
        }
        Some(IconSource::File(PathBuf::from(reference)))
    }

    /// The local file behind a user icon, if any.
    pub fn local_file(reference: &str) -> Option<PathBuf> {
        match Self::parse(reference) {
            Some(IconSource::File(path)) => Some(path),
            _ => None,
        }
    }
}

/// An icon ready for the host to paint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Icon {
    File { path: PathBuf, width: u32, height: u32 },
    Bundled(String),
    Themed(PathBuf),
}

type ThemeLookup = Box<dyn Fn(&str) -> Option<PathBuf> + Send + Sync>;

/// Memoised icon resolution keyed by icon reference.
///
/// Failed lookups are cached too. There is no eviction; callers clear the
/// cache when the engine list changes.
#[derive(Default)]
pub struct IconCache {
    entries: HashMap<String, Option<Icon>>,
    theme: Option<ThemeLookup>,
}

impl IconCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve `xdg:` references through `lookup`. Without a lookup themed
    /// icons never resolve.
    pub fn with_theme<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<PathBuf> + Send + Sync + 'static,
    {
        Self {
            entries: HashMap::new(),
            theme: Some(Box::new(lookup)),
        }
    }

    pub fn get(&mut self, reference: &str) -> Option<Icon> {
        if let Some(cached) = self.entries.get(reference) {
            return cached.clone();
        }
        let icon = match self.resolve(reference) {
            Ok(icon) => Some(icon),
            Err(e) => {
                tracing::debug!("{e}");
                None
            }
        };
        self.entries.insert(reference.to_string(), icon.clone());
        icon
    }

    /// The first reference in `references` that resolves.
    pub fn first_of<S: AsRef<str>>(&mut self, references: &[S]) -> Option<Icon> {
        references.iter().find_map(|r| self.get(r.as_ref()))
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn resolve(&self, reference: &str) -> Result<Icon, WebsearchError> {
        let failed = |reason: &str| WebsearchError::IconResolution {
            icon: reference.to_string(),
            reason: reason.to_string(),
        };
        match IconSource::parse(reference).ok_or_else(|| failed("not an icon reference"))? {
            IconSource::Bundled(name) => Ok(Icon::Bundled(name)),
            IconSource::Themed(name) => self
                .theme
                .as_ref()
                .and_then(|lookup| lookup(&name))
                .map(Icon::Themed)
                .ok_or_else(|| failed("not in icon theme")),
            IconSource::File(path) => {
                let (width, height) =
                    image::image_dimensions(&path).map_err(|e| failed(&e.to_string()))?;
                Ok(Icon::File { path, width, height })
            }
        }
    }
}
