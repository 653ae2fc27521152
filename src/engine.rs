use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

pub const ENGINES_FILE: &str = "engines.json";

/// A configured web search engine.
///
/// `url` holds a `%s` placeholder that is replaced with the percent-encoded
/// search term when the engine is invoked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchEngine {
    pub id: String,
    pub name: String,
    pub url: String,
    pub trigger: String,
    #[serde(rename = "iconPath")]
    pub icon_path: String,
    pub fallback: bool,
}

impl SearchEngine {
    /// Create an engine with a fresh identifier that does not collide with `taken`.
    pub fn new(
        taken: &HashSet<String>,
        name: impl Into<String>,
        trigger: impl Into<String>,
        url: impl Into<String>,
        icon_path: impl Into<String>,
        fallback: bool,
    ) -> Self {
        Self {
            id: generate_id(taken),
            name: name.into(),
            url: url.into(),
            trigger: trigger.into().trim().to_string(),
            icon_path: icon_path.into(),
            fallback,
        }
    }
}

/// Where a set of records comes from. Records written before the `fallback`
/// field existed were all offered as fallbacks, while the bundled seed list
/// leaves fallbacks opt-in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackDefault {
    UserConfig,
    BundledDefaults,
}

impl FallbackDefault {
    fn value(self) -> bool {
        matches!(self, FallbackDefault::UserConfig)
    }
}

/// On-disk shape of an engine. Every field is optional so older files load.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct EngineRecord {
    id: Option<String>,
    guid: Option<String>,
    name: String,
    url: String,
    trigger: String,
    #[serde(rename = "iconPath")]
    icon_path: String,
    fallback: Option<bool>,
}

/// Engines decoded from JSON together with whether migration touched them.
#[derive(Debug)]
pub struct Decoded {
    pub engines: Vec<SearchEngine>,
    pub migrated: bool,
}

/// Decode a JSON array of engine records, applying the schema migrations.
///
/// A record without `id` adopts its legacy `guid`; a record with neither gets
/// a fresh identifier. Missing `fallback` resolves through `policy`.
pub fn decode_engines(json: &str, policy: FallbackDefault) -> anyhow::Result<Decoded> {
    let records: Vec<EngineRecord> = serde_json::from_str(json)?;
    let mut migrated = false;
    let mut engines = Vec::with_capacity(records.len());

    for record in records {
        let id = match (record.id, record.guid) {
            (Some(id), _) if !id.is_empty() => id,
            (_, Some(guid)) if !guid.is_empty() => {
                migrated = true;
                guid
            }
            _ => {
                migrated = true;
                String::new()
            }
        };
        engines.push(SearchEngine {
            id,
            name: record.name,
            url: record.url,
            trigger: record.trigger,
            icon_path: record.icon_path,
            fallback: record.fallback.unwrap_or(policy.value()),
        });
    }

    migrated |= normalize(&mut engines);
    Ok(Decoded { engines, migrated })
}

pub fn encode_engines(engines: &[SearchEngine]) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(engines)?)
}

/// Bring a list into its stored form: triggers trimmed, identifiers present
/// and unique, entries sorted by name (ordinal, case-sensitive).
///
/// Returns `true` if anything other than the order changed.
pub fn normalize(engines: &mut [SearchEngine]) -> bool {
    let mut changed = false;

    for engine in engines.iter_mut() {
        let trimmed = engine.trigger.trim();
        if trimmed.len() != engine.trigger.len() {
            engine.trigger = trimmed.to_string();
            changed = true;
        }
    }

    let mut seen = HashSet::with_capacity(engines.len());
    let all: HashSet<String> = engines.iter().map(|e| e.id.clone()).collect();
    for engine in engines.iter_mut() {
        if engine.id.is_empty() || !seen.insert(engine.id.clone()) {
            let mut taken = all.clone();
            taken.extend(seen.iter().cloned());
            engine.id = generate_id(&taken);
            seen.insert(engine.id.clone());
            changed = true;
        }
    }

    engines.sort_by(|a, b| a.name.cmp(&b.name));
    changed
}

/// Eight lowercase hex digits, regenerated until it is not in `taken`.
pub fn generate_id(taken: &HashSet<String>) -> String {
    let mut rng = rand::thread_rng();
    loop {
        let id = format!("{:08x}", rng.gen::<u32>());
        if !taken.contains(&id) {
            return id;
        }
    }
}
