use crate::engine::{decode_engines, generate_id, FallbackDefault, SearchEngine};
use std::borrow::Cow;
use std::collections::HashSet;

const BUNDLED_ENGINES: &str = include_str!("default_engines.json");

/// Read-only seed list used when no engines file exists or when the user
/// restores the defaults.
///
/// The payload uses the same record schema as the engines file. Records that
/// omit `fallback` are not offered as fallbacks.
#[derive(Debug, Clone)]
pub struct Defaults {
    payload: Cow<'static, str>,
}

impl Defaults {
    /// The engines shipped with the plugin.
    pub fn bundled() -> Self {
        Self {
            payload: Cow::Borrowed(BUNDLED_ENGINES),
        }
    }

    /// A seed list supplied by the embedding application.
    pub fn from_json(json: impl Into<String>) -> Self {
        Self {
            payload: Cow::Owned(json.into()),
        }
    }

    /// Build a fresh copy of the seed list. Every call assigns new identifiers.
    pub fn instantiate(&self) -> Vec<SearchEngine> {
        let mut engines = match decode_engines(&self.payload, FallbackDefault::BundledDefaults) {
            Ok(decoded) => decoded.engines,
            Err(e) => {
                tracing::error!("failed to parse default engines: {e}");
                return Vec::new();
            }
        };
        let mut taken = HashSet::with_capacity(engines.len());
        for engine in &mut engines {
            engine.id = generate_id(&taken);
            taken.insert(engine.id.clone());
        }
        engines
    }
}

impl Default for Defaults {
    fn default() -> Self {
        Self::bundled()
    }
}
