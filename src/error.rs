//! Error types for the web search plugin.

use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by the engine store, the icon resolver and the editor.
///
/// None of these are fatal to a running launcher: read failures fall back to
/// the bundled engines, write failures leave the in-memory list authoritative
/// and icon failures simply render without an icon.
#[derive(Debug, Error)]
pub enum WebsearchError {
    /// The engines file is missing, unreadable or corrupt.
    #[error("could not read engines from '{}': {reason}", .path.display())]
    ConfigRead { path: PathBuf, reason: String },

    /// The engines file could not be rewritten.
    #[error("could not write engines to '{}': {reason}", .path.display())]
    ConfigWrite { path: PathBuf, reason: String },

    /// An icon reference could not be turned into an icon.
    #[error("could not resolve icon '{icon}': {reason}")]
    IconResolution { icon: String, reason: String },

    /// A user supplied icon could not be stored in the data directory.
    #[error("could not save icon to '{}': {reason}", .path.display())]
    IconSave { path: PathBuf, reason: String },

    /// The editor produced an engine that must not reach the store.
    #[error("invalid engine: {0}")]
    InvalidEngineEdit(String),

    /// No engine exists at the given row.
    #[error("no engine at index {0}")]
    NotFound(usize),
}

/// Result type alias for plugin operations.
pub type Result<T> = std::result::Result<T, WebsearchError>;
