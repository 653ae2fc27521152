use crate::actions::Action;
use crate::defaults::Defaults;
use crate::editor::EngineEditor;
use crate::engine::SearchEngine;
use crate::error::Result;
use crate::icon::{Icon, IconCache};
use crate::launcher::{launch_action, SystemOpener, UrlOpener};
use crate::matcher::{rank_with, Rescorer, Score, MAX_SCORE};
use crate::plugin::{FallbackProvider, Plugin};
use crate::recycle::SystemRecycleBin;
use crate::result::{build, build_fallback, SearchItem};
use crate::settings::Settings;
use crate::store::{EngineStore, SubscriptionId};
use crate::usage::UsageTracker;
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock};

/// Web searches through user configurable engines.
///
/// Typing an engine's trigger or name followed by a space and a term yields an
/// item that opens the engine's search page. Engines flagged as fallback are
/// also offered when no other plugin matched.
pub struct WebSearchPlugin {
    store: RwLock<EngineStore>,
    editor: EngineEditor,
    icons: Arc<Mutex<IconCache>>,
    usage: Option<Mutex<UsageTracker>>,
    opener: Box<dyn UrlOpener>,
    max_score: Score,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl WebSearchPlugin {
    pub fn new(store: EngineStore, editor: EngineEditor, opener: Box<dyn UrlOpener>) -> Self {
        Self::with_icon_cache(store, editor, opener, IconCache::new())
    }

    /// Like [`new`](Self::new) with a preconfigured icon cache, e.g. one that
    /// knows the desktop icon theme.
    pub fn with_icon_cache(
        mut store: EngineStore,
        editor: EngineEditor,
        opener: Box<dyn UrlOpener>,
        icons: IconCache,
    ) -> Self {
        let icons = Arc::new(Mutex::new(icons));
        let cache = Arc::clone(&icons);
        store.subscribe(move |_| lock(&cache).clear());
        Self {
            store: RwLock::new(store),
            editor,
            icons,
            usage: None,
            opener,
            max_score: MAX_SCORE,
        }
    }

    /// Build the plugin from settings: engines are loaded (or seeded with the
    /// bundled defaults), URLs open in the system browser and removed icons go
    /// to the system trash.
    pub fn from_settings(settings: &Settings, settings_path: &Path) -> Self {
        let store = EngineStore::open(settings.engines_path(settings_path), Defaults::bundled());
        let editor = EngineEditor::new(
            settings.data_path(settings_path),
            Box::new(SystemRecycleBin),
        );
        let plugin = Self::new(store, editor, Box::new(SystemOpener));
        match settings.usage_path(settings_path) {
            Some(path) => plugin.with_usage(UsageTracker::load(path, settings.usage_weight)),
            None => plugin,
        }
    }

    pub fn with_usage(mut self, tracker: UsageTracker) -> Self {
        self.usage = Some(Mutex::new(tracker));
        self
    }

    /// Scale scores to the host's maximum instead of [`MAX_SCORE`].
    pub fn with_max_score(mut self, max_score: Score) -> Self {
        self.max_score = max_score;
        self
    }

    pub fn engines(&self) -> Vec<SearchEngine> {
        self.read_store().engines().to_vec()
    }

    pub fn set_engines(&self, engines: Vec<SearchEngine>) -> Result<()> {
        self.write_store().set_engines(engines)
    }

    pub fn restore_default_engines(&self) -> Result<()> {
        self.write_store().restore_defaults()
    }

    /// Run an editor operation against the store.
    pub fn edit<R>(&self, f: impl FnOnce(&EngineEditor, &mut EngineStore) -> R) -> R {
        let mut store = self.write_store();
        f(&self.editor, &mut store)
    }

    pub fn subscribe<F>(&self, listener: F) -> SubscriptionId
    where
        F: Fn(&[SearchEngine]) + Send + Sync + 'static,
    {
        self.write_store().subscribe(listener)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.write_store().unsubscribe(id)
    }

    /// Trigger keywords including their separating space.
    pub fn triggers(&self) -> Vec<String> {
        self.read_store()
            .engines()
            .iter()
            .filter(|e| !e.trigger.is_empty())
            .map(|e| format!("{} ", e.trigger))
            .collect()
    }

    /// Items for every engine matched by `query`, paired with their score.
    pub fn rank_items(&self, query: &str) -> Vec<(SearchItem, Score)> {
        let store = self.read_store();
        let usage = self.usage.as_ref().map(|u| lock(u));
        let rescorer = usage.as_deref().map(|t| t as &dyn Rescorer);
        rank_with(query, store.engines(), self.max_score, rescorer)
            .into_iter()
            .map(|item| (build(&item.engine, &item.term), item.score))
            .collect()
    }

    /// One item per fallback engine, searching for the whole query.
    pub fn fallback_items(&self, query: &str) -> Vec<SearchItem> {
        self.read_store()
            .engines()
            .iter()
            .filter(|e| e.fallback)
            .map(|e| build_fallback(e, query))
            .collect()
    }

    /// Open the item's URL and count the use of its engine.
    pub fn activate(&self, item: &SearchItem) -> anyhow::Result<()> {
        item.activate(self.opener.as_ref())?;
        self.record_use(&item.id);
        Ok(())
    }

    /// Launch an action returned by [`Plugin::search`] or
    /// [`FallbackProvider::fallbacks`]. The engine id carried in `args` is
    /// counted like [`activate`](Self::activate) does.
    pub fn launch(&self, action: &Action) -> anyhow::Result<()> {
        launch_action(action, self.opener.as_ref())?;
        if let Some(id) = &action.args {
            self.record_use(id);
        }
        Ok(())
    }

    fn record_use(&self, engine_id: &str) {
        if let Some(usage) = &self.usage {
            if let Err(e) = lock(usage).record(engine_id) {
                tracing::error!("failed to save usage: {e}");
            }
        }
    }

    pub fn icon(&self, item: &SearchItem) -> Option<Icon> {
        item.icon(&mut lock(&self.icons))
    }

    /// Number of memoised icon lookups.
    pub fn cached_icons(&self) -> usize {
        lock(&self.icons).len()
    }

    fn read_store(&self) -> std::sync::RwLockReadGuard<'_, EngineStore> {
        self.store.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_store(&self) -> std::sync::RwLockWriteGuard<'_, EngineStore> {
        self.store.write().unwrap_or_else(PoisonError::into_inner)
    }
}

/// `args` holds the engine id so a host can report the use back.
fn to_action(item: SearchItem) -> Action {
    Action {
        label: item.subtitle,
        desc: "Web search".into(),
        action: item.url,
        args: Some(item.id),
    }
}

impl Plugin for WebSearchPlugin {
    fn search(&self, query: &str) -> Vec<Action> {
        let mut items = self.rank_items(query);
        items.sort_by(|a, b| b.1.cmp(&a.1));
        items.into_iter().map(|(item, _)| to_action(item)).collect()
    }

    fn name(&self) -> &str {
        "websearch"
    }

    fn description(&self) -> &str {
        "Search the web with configurable engines (prefix: engine trigger or name)"
    }

    fn capabilities(&self) -> &[&str] {
        &["search", "fallback"]
    }

    fn commands(&self) -> Vec<Action> {
        self.read_store()
            .engines()
            .iter()
            .filter(|e| !e.trigger.is_empty())
            .map(|e| Action {
                label: e.trigger.clone(),
                desc: e.name.clone(),
                action: format!("query:{} ", e.trigger),
                args: None,
            })
            .collect()
    }
}

impl FallbackProvider for WebSearchPlugin {
    fn fallbacks(&self, query: &str) -> Vec<Action> {
        self.fallback_items(query).into_iter().map(to_action).collect()
    }
}
