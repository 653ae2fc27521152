use crate::matcher::{RankItem, Rescorer, Score};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct UsageEntry {
    pub action: String,
    pub count: u32,
}

pub const USAGE_FILE: &str = "usage.json";

/// Load usage data from `path`.
///
/// Returns a map from engine identifier to usage count.
pub fn load_usage(path: impl AsRef<Path>) -> anyhow::Result<HashMap<String, u32>> {
    let content = std::fs::read_to_string(path).unwrap_or_default();
    if content.trim().is_empty() {
        return Ok(HashMap::new());
    }
    let list: Vec<UsageEntry> = serde_json::from_str(&content)?;
    Ok(list.into_iter().map(|e| (e.action, e.count)).collect())
}

/// Save usage data in `usage` to `path`.
pub fn save_usage(path: impl AsRef<Path>, usage: &HashMap<String, u32>) -> anyhow::Result<()> {
    let mut list: Vec<UsageEntry> = usage
        .iter()
        .map(|(action, count)| UsageEntry {
            action: action.clone(),
            count: *count,
        })
        .collect();
    list.sort_by(|a, b| a.action.cmp(&b.action));
    let json = serde_json::to_string_pretty(&list)?;
    std::fs::write(path, json)?;
    Ok(())
}

/// Usage counts per engine, persisted to a JSON file.
///
/// As a [`Rescorer`] it moves each score towards the maximum by a share of the
/// remaining headroom that grows with the use count. Unused engines keep
/// their match score.
#[derive(Debug, Clone)]
pub struct UsageTracker {
    path: PathBuf,
    counts: HashMap<String, u32>,
    weight: f32,
}

impl UsageTracker {
    /// Load counts from `path`. A broken file starts the counts from zero.
    pub fn load(path: impl Into<PathBuf>, weight: f32) -> Self {
        let path = path.into();
        let counts = load_usage(&path).unwrap_or_else(|e| {
            tracing::error!("failed to load usage from {}: {e}", path.display());
            HashMap::new()
        });
        Self {
            path,
            counts,
            weight: weight.clamp(0.0, 1.0),
        }
    }

    pub fn count(&self, id: &str) -> u32 {
        self.counts.get(id).copied().unwrap_or(0)
    }

    /// Count one more use of `id` and persist the counts.
    pub fn record(&mut self, id: &str) -> anyhow::Result<u32> {
        let count = self.counts.entry(id.to_string()).or_insert(0);
        *count = count.saturating_add(1);
        let count = *count;
        save_usage(&self.path, &self.counts)?;
        Ok(count)
    }
}

impl Rescorer for UsageTracker {
    fn rescore(&self, items: &mut [RankItem], max_score: Score) {
        for item in items {
            let count = self.count(&item.engine.id);
            if count == 0 {
                continue;
            }
            let share = count as f32 / (count as f32 + 1.0);
            let headroom = f32::from(max_score.saturating_sub(item.score));
            let boost = (headroom * self.weight * share) as Score;
            item.score = item.score.saturating_add(boost).min(max_score);
        }
    }
}
