//! Turning a matched engine into a launcher item.

use crate::engine::SearchEngine;
use crate::icon::{Icon, IconCache};
use crate::launcher::UrlOpener;

/// Shown instead of an empty search term in fallback items.
pub const EMPTY_TERM_PLACEHOLDER: &str = "…";

/// A web search ready to be shown and activated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchItem {
    pub id: String,
    pub text: String,
    pub subtitle: String,
    /// Replacement text for inline completion.
    pub completion: String,
    pub url: String,
    /// Icon references tried in order. Resolved on demand through an [`IconCache`].
    pub icon_sources: Vec<String>,
}

impl SearchItem {
    pub fn icon(&self, cache: &mut IconCache) -> Option<Icon> {
        cache.first_of(self.icon_sources.as_slice())
    }

    pub fn activate(&self, opener: &dyn UrlOpener) -> anyhow::Result<()> {
        opener.open_url(&self.url)
    }
}

/// Substitute the percent-encoded `term` for every `%s` in `template`.
pub fn search_url(template: &str, term: &str) -> String {
    template.replace("%s", &urlencoding::encode(term))
}

pub fn build(engine: &SearchEngine, term: &str) -> SearchItem {
    let keyword = if engine.trigger.is_empty() {
        engine.name.as_str()
    } else {
        engine.trigger.as_str()
    };
    let mut icon_sources = vec![format!("xdg:{}", engine.name.to_lowercase())];
    if !engine.icon_path.is_empty() {
        icon_sources.push(engine.icon_path.clone());
    }
    SearchItem {
        id: engine.id.clone(),
        text: engine.name.clone(),
        subtitle: format!("Search {} for '{}'", engine.name, term),
        completion: format!("{keyword} {term}"),
        url: search_url(&engine.url, term),
        icon_sources,
    }
}

/// Like [`build`], but an empty term is shown as an ellipsis in the subtitle.
/// The URL and completion still use the real term.
pub fn build_fallback(engine: &SearchEngine, term: &str) -> SearchItem {
    let mut item = build(engine, term);
    if term.is_empty() {
        item.subtitle = format!("Search {} for '{}'", engine.name, EMPTY_TERM_PLACEHOLDER);
    }
    item
}
