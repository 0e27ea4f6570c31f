//! Results ranking: merge the current run into a reference leaderboard.

use serde::{Deserialize, Serialize};

use crate::core::DEFAULT_CURRENT_RUN_NAME;

/// One leaderboard line.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResultEntry {
    /// Player name.
    pub name: String,

    /// Steps needed to clear the board.
    #[serde(alias = "stepsCount")]
    pub steps_count: u32,
}

impl ResultEntry {
    /// Create a new entry.
    #[must_use]
    pub fn new(name: impl Into<String>, steps_count: u32) -> Self {
        Self {
            name: name.into(),
            steps_count,
        }
    }
}

/// A ranked leaderboard line.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedRow {
    /// 1-based position.
    pub rank: usize,

    /// The entry at this position.
    pub entry: ResultEntry,

    /// True only for the current run's row.
    pub is_current: bool,
}

/// Rank the current run against `reference` under the default run name.
///
/// ```
/// use memory_match::ranking::{rank, ResultEntry};
///
/// let rows = rank(&[ResultEntry::new("A", 10), ResultEntry::new("B", 5)], 7);
/// let names: Vec<_> = rows.iter().map(|r| r.entry.name.as_str()).collect();
///
/// assert_eq!(names, vec!["B", "Your result", "A"]);
/// assert_eq!(rows[1].rank, 2);
/// assert!(rows[1].is_current);
/// ```
#[must_use]
pub fn rank(reference: &[ResultEntry], current_steps: u32) -> Vec<RankedRow> {
    rank_entry(reference, ResultEntry::new(DEFAULT_CURRENT_RUN_NAME, current_steps))
}

/// Rank an explicit current-run entry against `reference`.
///
/// Sorted ascending by steps with a stable sort; the current run is
/// appended last, so it ranks after reference entries with equal steps.
/// `reference` is never modified.
#[must_use]
pub fn rank_entry(reference: &[ResultEntry], current: ResultEntry) -> Vec<RankedRow> {
    let mut rows: Vec<(ResultEntry, bool)> = reference
        .iter()
        .cloned()
        .map(|entry| (entry, false))
        .chain(std::iter::once((current, true)))
        .collect();

    rows.sort_by_key(|(entry, _)| entry.steps_count);

    rows.into_iter()
        .enumerate()
        .map(|(pos, (entry, is_current))| RankedRow {
            rank: pos + 1,
            entry,
            is_current,
        })
        .collect()
}
