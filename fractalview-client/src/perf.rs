use std::collections::VecDeque;
use std::time::Duration;

/// Number of most-recent samples each series keeps.
const WINDOW_CAPACITY: usize = 20;

/// One FIFO rolling window of latency samples.
#[derive(Debug, Default)]
struct RollingWindow {
    samples: VecDeque<Duration>,
    last: Duration,
    count: u64,
}

impl RollingWindow {
    fn record(&mut self, sample: Duration) {
        self.samples.push_back(sample);
        if self.samples.len() > WINDOW_CAPACITY {
            self.samples.pop_front();
        }
        self.last = sample;
        self.count += 1;
    }

    fn mean(&self) -> Duration {
        if self.samples.is_empty() {
            return Duration::ZERO;
        }
        self.samples.iter().sum::<Duration>() / self.samples.len() as u32
    }

    fn clear(&mut self) {
        self.samples.clear();
        self.last = Duration::ZERO;
        self.count = 0;
    }
}

/// Read-only snapshot of the aggregator, for diagnostics surfaces.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerfSnapshot {
    pub last_request: Duration,
    pub avg_request: Duration,
    pub last_render: Duration,
    pub avg_render: Duration,
    pub last_total: Duration,
    pub avg_total: Duration,
    pub request_count: u64,
    pub render_count: u64,
}

/// Rolling-window latency aggregator for the viewport pipeline.
///
/// Tracks request latency and render latency independently, plus a derived
/// total series: the sum of the most recent request latency and the render
/// latency of the same cycle.  Each series keeps the newest
/// `WINDOW_CAPACITY` samples, evicting FIFO.
#[derive(Debug, Default)]
pub struct PerfMonitor {
    request: RollingWindow,
    render: RollingWindow,
    total: RollingWindow,
}

impl PerfMonitor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record how long a compute request took.
    pub fn record_request(&mut self, elapsed: Duration) {
        self.request.record(elapsed);
    }

    /// Record how long a render took; also closes out the cycle's total.
    pub fn record_render(&mut self, elapsed: Duration) {
        self.render.record(elapsed);
        self.total.record(self.request.last + elapsed);
    }

    /// Snapshot of last/average values and cumulative counts.
    pub fn snapshot(&self) -> PerfSnapshot {
        PerfSnapshot {
            last_request: self.request.last,
            avg_request: self.request.mean(),
            last_render: self.render.last,
            avg_render: self.render.mean(),
            last_total: self.total.last,
            avg_total: self.total.mean(),
            request_count: self.request.count,
            render_count: self.render.count,
        }
    }

    /// Clear all windows and zero all derived statistics.
    pub fn reset(&mut self) {
        self.request.clear();
        self.render.clear();
        self.total.clear();
    }
}
