use crate::actions::Action;
use std::sync::Arc;

pub trait Plugin: Send + Sync {
    /// Return actions based on the query string
    fn search(&self, query: &str) -> Vec<Action>;
    /// Name of the plugin
    fn name(&self) -> &str;
    /// Short human readable description
    fn description(&self) -> &str;
    fn capabilities(&self) -> &[&str];
    /// Entry points listed by the host's command palette
    fn commands(&self) -> Vec<Action> {
        Vec::new()
    }
}

/// Offers items when no plugin produced a result for a query.
pub trait FallbackProvider: Send + Sync {
    fn fallbacks(&self, query: &str) -> Vec<Action>;
}

impl<T: Plugin + ?Sized> Plugin for Arc<T> {
    fn search(&self, query: &str) -> Vec<Action> {
        (**self).search(query)
    }

    fn name(&self) -> &str {
        (**self).name()
    }

    fn description(&self) -> &str {
        (**self).description()
    }

    fn capabilities(&self) -> &[&str] {
        (**self).capabilities()
    }

    fn commands(&self) -> Vec<Action> {
        (**self).commands()
    }
}

impl<T: FallbackProvider + ?Sized> FallbackProvider for Arc<T> {
    fn fallbacks(&self, query: &str) -> Vec<Action> {
        (**self).fallbacks(query)
    }
}

/// A manager that holds plugins
#[derive(Default)]
pub struct PluginManager {
    plugins: Vec<Box<dyn Plugin>>,
    fallbacks: Vec<Box<dyn FallbackProvider>>,
}

impl PluginManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, plugin: Box<dyn Plugin>) {
        self.plugins.push(plugin);
    }

    pub fn register_fallback(&mut self, provider: Box<dyn FallbackProvider>) {
        self.fallbacks.push(provider);
    }

    pub fn plugin_names(&self) -> Vec<&str> {
        self.plugins.iter().map(|p| p.name()).collect()
    }

    pub fn search(&self, query: &str) -> Vec<Action> {
        let mut actions = Vec::new();
        for p in &self.plugins {
            actions.extend(p.search(query));
        }
        actions
    }

    /// Search all plugins and fall back to the fallback providers when nothing
    /// matched.
    pub fn search_or_fallback(&self, query: &str) -> Vec<Action> {
        let actions = self.search(query);
        if !actions.is_empty() {
            return actions;
        }
        self.fallbacks
            .iter()
            .flat_map(|f| f.fallbacks(query))
            .collect()
    }
}
