//! Query performance logging: query text, applied level, latency, result
//! count, and whether the search exhausted every relaxation level.

use std::time::Duration;

use haven_core::models::RelaxationLevel;
use serde::{Deserialize, Serialize};

/// A single query log entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryLogEntry {
    pub query: String,
    /// `None` when the search exhausted or failed.
    pub applied_level: Option<RelaxationLevel>,
    pub latency: Duration,
    pub result_count: usize,
    pub exhausted: bool,
    pub timestamp_epoch_ms: i64,
}

impl QueryLogEntry {
    /// Create a new entry with the timestamp set to now.
    pub fn new(
        query: impl Into<String>,
        applied_level: Option<RelaxationLevel>,
        latency: Duration,
        result_count: usize,
        exhausted: bool,
    ) -> Self {
        Self {
            query: query.into(),
            applied_level,
            latency,
            result_count,
            exhausted,
            timestamp_epoch_ms: chrono::Utc::now().timestamp_millis(),
        }
    }
}

/// Bounded query log for search performance analysis. Oldest entries are
/// dropped once `max_entries` is reached.
#[derive(Debug, Clone)]
pub struct QueryLog {
    entries: Vec<QueryLogEntry>,
    max_entries: usize,
}

impl Default for QueryLog {
    fn default() -> Self {
        Self::new()
    }
}

impl QueryLog {
    pub fn new() -> Self {
        Self::with_capacity(haven_core::config::defaults::DEFAULT_QUERY_LOG_CAPACITY)
    }

    /// Create with a custom capacity.
    pub fn with_capacity(max_entries: usize) -> Self {
        Self {
            entries: Vec::new(),
            max_entries: max_entries.max(1),
        }
    }

    /// Record a query.
    pub fn record(&mut self, entry: QueryLogEntry) {
        tracing::debug!(
            event = "query_logged",
            query = %entry.query,
            level = ?entry.applied_level,
            latency_ms = entry.latency.as_millis() as u64,
            result_count = entry.result_count,
            exhausted = entry.exhausted,
            "query logged"
        );

        self.entries.push(entry);
        if self.entries.len() > self.max_entries {
            self.entries.drain(..self.entries.len() - self.max_entries);
        }
    }

    /// Get all entries, oldest first.
    pub fn entries(&self) -> &[QueryLogEntry] {
        &self.entries
    }

    /// The `n` most recent entries, newest first.
    pub fn recent(&self, n: usize) -> Vec<&QueryLogEntry> {
        self.entries.iter().rev().take(n).collect()
    }

    /// Fraction of logged searches that exhausted every level.
    pub fn exhaustion_rate(&self) -> f64 {
        if self.entries.is_empty() {
            return 0.0;
        }
        let exhausted = self.entries.iter().filter(|e| e.exhausted).count();
        exhausted as f64 / self.entries.len() as f64
    }

    /// How many searches resolved at each level, permanent first.
    pub fn level_histogram(&self) -> [usize; 4] {
        let mut histogram = [0; 4];
        for level in self.entries.iter().filter_map(|e| e.applied_level) {
            histogram[level.index()] += 1;
        }
        histogram
    }

    /// Mean search latency; zero for an empty log.
    pub fn average_latency(&self) -> Duration {
        let n = u32::try_from(self.entries.len()).unwrap_or(u32::MAX);
        if n == 0 {
            return Duration::ZERO;
        }
        self.entries.iter().map(|e| e.latency).sum::<Duration>() / n
    }

    /// Nearest-rank latency percentile, `p` in [0, 1]. `p = 0.95` is the
    /// slowest search once the slowest 5% are set aside.
    pub fn latency_percentile(&self, p: f64) -> Duration {
        let mut latencies: Vec<Duration> = self.entries.iter().map(|e| e.latency).collect();
        if latencies.is_empty() {
            return Duration::ZERO;
        }
        let rank = (p.clamp(0.0, 1.0) * latencies.len() as f64).ceil() as usize;
        let idx = rank.saturating_sub(1).min(latencies.len() - 1);
        *latencies.select_nth_unstable(idx).1
    }

    /// Entries as a JSON array, for export.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.entries)
    }

    /// Total number of logged queries.
    pub fn count(&self) -> usize {
        self.entries.len()
    }
}
