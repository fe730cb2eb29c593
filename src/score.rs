use std::collections::VecDeque;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::config::SCORE_HISTORY_CAPACITY;

/// Result of one finished run.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct ScoreEntry {
    pub score: u32,
    pub level: u32,
    pub recorded_at: SystemTime,
}

impl ScoreEntry {
    /// Time of day the run ended, `HH:MM:SS` in UTC.
    #[must_use]
    pub fn clock_time(&self) -> String {
        format_clock(self.recorded_at)
    }
}

/// Bounded, newest-first list of finished runs. Lives for one process only.
#[derive(Debug, Clone)]
pub struct ScoreHistory {
    entries: VecDeque<ScoreEntry>,
    capacity: usize,
}

impl Default for ScoreHistory {
    fn default() -> Self {
        Self::with_capacity(SCORE_HISTORY_CAPACITY)
    }
}

impl ScoreHistory {
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity + 1),
            capacity,
        }
    }

    /// Records a run that ended now.
    pub fn add_score(&mut self, score: u32, level: u32) {
        self.add_score_at(score, level, SystemTime::now());
    }

    /// Records a run with an explicit timestamp, evicting the oldest entry
    /// when over capacity.
    pub fn add_score_at(&mut self, score: u32, level: u32, recorded_at: SystemTime) {
        self.entries.push_front(ScoreEntry {
            score,
            level,
            recorded_at,
        });
        while self.entries.len() > self.capacity {
            let _ = self.entries.pop_back();
        }
    }

    /// Entries, newest first.
    pub fn scores(&self) -> impl ExactSizeIterator<Item = &ScoreEntry> {
        self.entries.iter()
    }

    /// Most recent entry, if any.
    #[must_use]
    pub fn latest(&self) -> Option<&ScoreEntry> {
        self.entries.front()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn format_clock(at: SystemTime) -> String {
    let secs = at
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs())
        .unwrap_or(0);
    let of_day = secs % 86_400;
    format!(
        "{:02}:{:02}:{:02}",
        of_day / 3_600,
        (of_day % 3_600) / 60,
        of_day % 60
    )
}
