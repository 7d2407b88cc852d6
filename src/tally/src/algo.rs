//! Rank dates by how many people can make them.
//!
//! # Scoring
//!
//! 1. Every date marked unavailable by *anyone* is vetoed.
//! 1. Every remaining date scores one point per person who marked it available.
//! 1. Dates are sorted by score, highest first.
//!
//! A veto is absolute: a date one person cannot make is dropped entirely, no
//! matter how many others can.
//!
//! Equal scores keep the order in which the dates were first counted, which
//! walks people in order of their first pick and each person's available
//! dates in the order they were marked.

use crate::data::{DateId, Directory};
use indexmap::IndexMap;
use rustc_hash::{FxBuildHasher, FxHashSet};
use serde::{Deserialize, Serialize};

/// A date together with the number of people who can make it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScoreEntry {
    /// The candidate date.
    pub date: DateId,
    /// Number of people who marked it available.
    pub score: u32,
}

/// Rank every date that at least one person can make and nobody can't.
///
/// Empty when no date qualifies, including when nobody has picked anything.
///
/// See [module-level documentation](crate::algo) for the rules.
pub fn compute_best_dates(directory: &Directory) -> Vec<ScoreEntry> {
    let vetoed = directory
        .iter()
        .flat_map(|(_, record)| record.unavailable())
        .copied()
        .collect::<FxHashSet<DateId>>();

    let mut scores = IndexMap::<DateId, u32, FxBuildHasher>::default();
    for date in directory
        .iter()
        .flat_map(|(_, record)| record.available())
        .filter(|date| !vetoed.contains(date))
    {
        *scores.entry(*date).or_default() += 1;
    }

    let mut ranked = scores
        .into_iter()
        .map(|(date, score)| ScoreEntry { date, score })
        .collect::<Vec<_>>();

    // stable: ties stay in first-counted order
    ranked.sort_by_key(|entry| std::cmp::Reverse(entry.score));

    log::debug!(
        "{} vetoed, {} candidate date(s) from {} people",
        vetoed.len(),
        ranked.len(),
        directory.len()
    );

    ranked
}
