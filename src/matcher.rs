//! Trigger and name matching.
//!
//! Each engine is matched by its trigger and by its name. A candidate matches
//! when the typed text is a (possibly partial) prefix of the lowercased
//! candidate followed by a single space. The score is the matched fraction of
//! that keyword scaled to the host's maximum score.

use crate::engine::SearchEngine;

pub type Score = u16;

/// Highest score a host accepts. A completely typed keyword scores this.
pub const MAX_SCORE: Score = Score::MAX;

/// An engine matched by a query together with its score and the text left
/// after the matched keyword.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankItem {
    pub engine: SearchEngine,
    pub score: Score,
    pub term: String,
}

/// Adjusts scores after matching, e.g. by how often an engine was used.
pub trait Rescorer {
    fn rescore(&self, items: &mut [RankItem], max_score: Score);
}

/// Match `query` against every engine. Engines that do not match are left
/// out; the result keeps engine order and is not sorted by score.
pub fn rank(query: &str, engines: &[SearchEngine], max_score: Score) -> Vec<RankItem> {
    rank_with(query, engines, max_score, None)
}

pub fn rank_with(
    query: &str,
    engines: &[SearchEngine],
    max_score: Score,
    rescorer: Option<&dyn Rescorer>,
) -> Vec<RankItem> {
    if query.is_empty() {
        return Vec::new();
    }

    let mut items: Vec<RankItem> = engines
        .iter()
        .filter_map(|engine| {
            match_engine(query, engine, max_score).map(|(score, term)| RankItem {
                engine: engine.clone(),
                score,
                term: term.to_string(),
            })
        })
        .collect();

    if let Some(rescorer) = rescorer {
        rescorer.rescore(&mut items, max_score);
    }
    items
}

/// Match a single engine, returning the score and the residual term.
///
/// Candidates are tried shortest first and the first match wins: a shorter
/// keyword always yields the higher score for the same typed prefix.
pub fn match_engine<'q>(
    query: &'q str,
    engine: &SearchEngine,
    max_score: Score,
) -> Option<(Score, &'q str)> {
    if query.is_empty() {
        return None;
    }
    let mut candidates: Vec<&str> = [engine.trigger.trim(), engine.name.as_str()]
        .into_iter()
        .filter(|c| !c.is_empty())
        .collect();
    candidates.sort_by_key(|c| c.chars().count());

    candidates
        .into_iter()
        .find_map(|candidate| match_keyword(query, candidate, max_score))
}

fn match_keyword<'q>(query: &'q str, candidate: &str, max_score: Score) -> Option<(Score, &'q str)> {
    let keyword = format!("{} ", candidate.to_lowercase());
    let keyword_len = keyword.chars().count();

    // Lowercasing may expand a character, so the prefix is measured on the
    // lowercased text while the split is tracked in the original query.
    let mut head = String::with_capacity(keyword.len());
    let mut head_len = 0;
    let mut split = query.len();
    for (i, c) in query.char_indices() {
        if head_len == keyword_len {
            split = i;
            break;
        }
        for lower in c.to_lowercase().take(keyword_len - head_len) {
            head.push(lower);
            head_len += 1;
        }
    }

    if !keyword.starts_with(&head) {
        return None;
    }

    let score = u64::from(max_score) * head_len as u64 / keyword_len as u64;
    Some((score as Score, &query[split..]))
}
