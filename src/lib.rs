//! Web search engines for a keyboard launcher.
//!
//! The plugin keeps a user editable list of search engines ([`store`]),
//! matches typed queries against engine triggers and names ([`matcher`]) and
//! turns matches into items that open the engine's search page ([`result`]).
//! Hosts integrate through [`plugin::Plugin`] and [`plugin::FallbackProvider`],
//! implemented by [`plugins::websearch::WebSearchPlugin`].

pub mod actions;
pub mod common;
pub mod defaults;
pub mod editor;
pub mod engine;
pub mod error;
pub mod icon;
pub mod launcher;
pub mod logging;
pub mod matcher;
pub mod plugin;
pub mod plugins;
pub mod recycle;
pub mod result;
pub mod settings;
pub mod store;
pub mod usage;

pub use engine::SearchEngine;
pub use error::{Result, WebsearchError};
pub use matcher::{rank, RankItem, Score, MAX_SCORE};
pub use plugins::websearch::WebSearchPlugin;
pub use result::SearchItem;
pub use store::EngineStore;
