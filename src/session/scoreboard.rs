//! Cumulative results across rounds.
//!
//! A scoreboard outlives the rounds it counts: resetting a round leaves it
//! alone, and only `clear` zeroes it.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Outcome tallies plus the best round score.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBoard {
    /// Known labels in display order.
    labels: Vec<String>,
    tallies: FxHashMap<String, u32>,
    high_score: u32,
}

impl ScoreBoard {
    /// Create an empty scoreboard.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a scoreboard with every label present at zero.
    pub fn with_labels<'a>(labels: impl IntoIterator<Item = &'a str>) -> Self {
        let mut board = Self::new();
        for label in labels {
            board.ensure_label(label);
        }
        board
    }

    fn ensure_label(&mut self, label: &str) {
        if !self.tallies.contains_key(label) {
            self.labels.push(label.to_string());
            self.tallies.insert(label.to_string(), 0);
        }
    }

    /// Count one round ending with `label`. Returns the new count.
    pub fn record(&mut self, label: &str) -> u32 {
        self.ensure_label(label);
        let count = self.tallies.entry(label.to_string()).or_insert(0);
        *count += 1;
        *count
    }

    /// Rounds that ended with `label`.
    #[must_use]
    pub fn count(&self, label: &str) -> u32 {
        self.tallies.get(label).copied().unwrap_or(0)
    }

    /// Total rounds recorded.
    #[must_use]
    pub fn rounds(&self) -> u32 {
        self.tallies.values().sum()
    }

    /// Best round score seen.
    #[must_use]
    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    /// Offer a round score. Returns true if it set a new high score.
    pub fn record_points(&mut self, points: u32) -> bool {
        if points > self.high_score {
            self.high_score = points;
            true
        } else {
            false
        }
    }

    /// `(label, count)` pairs in display order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> + '_ {
        self.labels
            .iter()
            .map(move |label| (label.as_str(), self.count(label)))
    }

    /// Zero every tally and the high score. Labels are kept.
    pub fn clear(&mut self) {
        for count in self.tallies.values_mut() {
            *count = 0;
        }
        self.high_score = 0;
    }
}

impl std::fmt::Display for ScoreBoard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parts: Vec<String> = self.iter().map(|(label, count)| format!("{label}: {count}")).collect();
        write!(f, "{}", parts.join(" | "))?;
        if self.high_score > 0 {
            write!(f, " | High score: {}", self.high_score)?;
        }
        Ok(())
    }
}
