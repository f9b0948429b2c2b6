//! Per-session observation hooks.

use std::sync::Arc;
use std::time::{Duration, Instant};

/// Metrics observer for question turns.
pub trait SessionMetrics: Send + Sync {
    /// One lookup finished; `found` is false when the turn moved to teaching.
    fn record_lookup(&self, latency: Duration, found: bool);
    /// A teaching prompt was resolved; `learned` is false for a skip.
    fn record_teach(&self, learned: bool);
}

pub(crate) struct MetricsSpan {
    recorder: Arc<dyn SessionMetrics>,
    start: Instant,
}

impl MetricsSpan {
    pub(crate) fn start(recorder: Option<&Arc<dyn SessionMetrics>>) -> Option<Self> {
        recorder.map(|recorder| Self {
            recorder: Arc::clone(recorder),
            start: Instant::now(),
        })
    }

    pub(crate) fn record_lookup(self, found: bool) {
        self.recorder.record_lookup(self.start.elapsed(), found);
    }
}
