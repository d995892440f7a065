use std::sync::mpsc;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use fractalview_core::{CoreError, ViewState};
use fractalview_render::{render_grid, ColorLut, FrameBuffer, FrameSlot, IterationGrid, PresentTarget};

use crate::cancel::FetchCancel;
use crate::compute::{ComputeRequest, ComputeService};
use crate::debounce::classify_change;
use crate::error::FetchError;
use crate::perf::{PerfMonitor, PerfSnapshot};

// ---------------------------------------------------------------------------
// Phase
// ---------------------------------------------------------------------------

/// Observable state of the request pipeline, for diagnostics surfaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Debouncing,
    Fetching,
    /// A request is outstanding and a newer change is waiting out its
    /// debounce window.
    FetchingDebouncing,
}

impl Phase {
    pub fn label(self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::Debouncing => "Debouncing\u{2026}",
            Self::Fetching => "Computing\u{2026}",
            Self::FetchingDebouncing => "Computing\u{2026}",
        }
    }
}

// ---------------------------------------------------------------------------
// Fetch worker communication
// ---------------------------------------------------------------------------

struct FetchJob {
    id: u64,
    generation: u64,
    view: ViewState,
}

struct FetchOutcome {
    id: u64,
    result: Result<IterationGrid, FetchError>,
    elapsed: Duration,
    superseded: bool,
}

fn drain_latest(initial: FetchJob, rx: &mpsc::Receiver<FetchJob>) -> FetchJob {
    let mut job = initial;
    while let Ok(newer) = rx.try_recv() {
        job = newer;
    }
    job
}

fn fetch_worker(
    service: Arc<dyn ComputeService>,
    cancel: Arc<FetchCancel>,
    rx: mpsc::Receiver<FetchJob>,
    tx: mpsc::Sender<FetchOutcome>,
) {
    debug!("fetch worker started");
    while let Ok(initial) = rx.recv() {
        let job = drain_latest(initial, &rx);

        if cancel.is_superseded(job.generation) {
            debug!(id = job.id, "job superseded before issue; skipping");
            continue;
        }

        let started = Instant::now();
        let result = service.compute(&ComputeRequest::from(job.view));
        let elapsed = started.elapsed();
        let superseded = cancel.is_superseded(job.generation);

        let outcome = FetchOutcome {
            id: job.id,
            result,
            elapsed,
            superseded,
        };
        if tx.send(outcome).is_err() {
            return;
        }
    }
    debug!("fetch worker exiting");
}

// ---------------------------------------------------------------------------
// Coordinator
// ---------------------------------------------------------------------------

struct PendingChange {
    deadline: Instant,
}

/// Turns a stream of view-state changes into at most one in-flight compute
/// request, superseding stale work and feeding completed results through
/// the renderer into a coalescing presentation slot.
///
/// The coordinator itself never blocks: the remote call runs on a dedicated
/// worker thread, and `pump` drives debounce firing and outcome delivery
/// from the caller's event loop.  Transport failures never propagate across
/// its boundary; they land in an observable error slot that the caller may
/// clear.
pub struct RequestCoordinator {
    view: ViewState,
    pending: Option<PendingChange>,
    request_id: u64,
    in_flight: bool,
    cancel: Arc<FetchCancel>,
    tx_job: mpsc::Sender<FetchJob>,
    rx_outcome: mpsc::Receiver<FetchOutcome>,
    palette: ColorLut,
    perf: PerfMonitor,
    frame: FrameSlot,
    last_error: Option<FetchError>,
}

impl RequestCoordinator {
    /// Create a coordinator over a compute service, starting from `view`.
    pub fn new(service: Arc<dyn ComputeService>, view: ViewState) -> Result<Self, CoreError> {
        view.validate()?;

        let (tx_job, rx_job) = mpsc::channel();
        let (tx_outcome, rx_outcome) = mpsc::channel();
        let cancel = Arc::new(FetchCancel::new());

        let worker_cancel = cancel.clone();
        thread::Builder::new()
            .name("fetch-worker".into())
            .spawn(move || fetch_worker(service, worker_cancel, rx_job, tx_outcome))
            .expect("Failed to spawn fetch worker thread");

        Ok(Self {
            palette: ColorLut::build(view.max_iterations),
            view,
            pending: None,
            request_id: 0,
            in_flight: false,
            cancel,
            tx_job,
            rx_outcome,
            perf: PerfMonitor::new(),
            frame: FrameSlot::new(),
            last_error: None,
        })
    }

    /// The current view state.
    pub fn view(&self) -> ViewState {
        self.view
    }

    pub fn phase(&self) -> Phase {
        match (self.in_flight, self.pending.is_some()) {
            (false, false) => Phase::Idle,
            (false, true) => Phase::Debouncing,
            (true, false) => Phase::Fetching,
            (true, true) => Phase::FetchingDebouncing,
        }
    }

    // -- View changes ----------------------------------------------------------

    /// Adopt a new view state and restart the debounce window.
    ///
    /// The window length is picked by classifying the change against the
    /// current view; any previously scheduled window is replaced, never
    /// left to fire.  Invalid view states are rejected before anything is
    /// scheduled.
    pub fn set_view(&mut self, view: ViewState) -> Result<(), CoreError> {
        view.validate()?;
        let class = classify_change(&self.view, &view);
        self.view = view;
        self.pending = Some(PendingChange {
            deadline: Instant::now() + class.debounce(),
        });
        debug!(?class, "view changed; debounce restarted");
        Ok(())
    }

    /// Zoom by `factor` toward the cursor at `(px, py)`.
    pub fn zoom_at(&mut self, px: f64, py: f64, factor: f64) -> Result<(), CoreError> {
        self.set_view(self.view.zoom_at(px, py, factor))
    }

    /// Pan by a pixel delta.
    pub fn pan_by(&mut self, dx_pixels: f64, dy_pixels: f64) -> Result<(), CoreError> {
        self.set_view(self.view.pan_by(dx_pixels, dy_pixels))
    }

    /// Change the iteration ceiling (debounced with the long window).
    pub fn set_max_iterations(&mut self, max_iterations: u32) -> Result<(), CoreError> {
        self.set_view(self.view.with_max_iterations(max_iterations))
    }

    /// Jump back to the initial view.
    pub fn reset_view(&mut self) -> Result<(), CoreError> {
        self.set_view(ViewState::initial())
    }

    // -- Pipeline driving ------------------------------------------------------

    /// Drive the pipeline: fire an elapsed debounce window and deliver any
    /// completed fetch outcomes.  Call from the event loop; never blocks.
    pub fn pump(&mut self) {
        self.pump_at(Instant::now());
    }

    /// `pump` with an explicit notion of "now", for deterministic tests.
    pub fn pump_at(&mut self, now: Instant) {
        if let Some(ref pending) = self.pending {
            if now >= pending.deadline {
                self.pending = None;
                self.issue();
            }
        }
        self.drain_outcomes();
    }

    /// Issue a compute request for the current view, superseding any
    /// request still in flight.
    fn issue(&mut self) {
        if self.in_flight {
            debug!(id = self.request_id, "superseding in-flight request");
        }
        self.cancel.supersede();
        self.request_id += 1;

        debug!(
            id = self.request_id,
            zoom = self.view.zoom,
            max_iter = self.view.max_iterations,
            "issuing compute request"
        );
        let job = FetchJob {
            id: self.request_id,
            generation: self.cancel.generation(),
            view: self.view,
        };
        let _ = self.tx_job.send(job);
        self.in_flight = true;
    }

    fn drain_outcomes(&mut self) {
        while let Ok(outcome) = self.rx_outcome.try_recv() {
            if outcome.id != self.request_id {
                debug!(
                    id = outcome.id,
                    current = self.request_id,
                    "discarding stale fetch outcome"
                );
                continue;
            }
            if outcome.superseded {
                debug!(id = outcome.id, "discarding superseded fetch outcome");
                continue;
            }

            self.in_flight = false;
            match outcome.result {
                Ok(grid) => {
                    self.perf.record_request(outcome.elapsed);
                    self.last_error = None;
                    self.apply_grid(grid);
                }
                Err(err) => {
                    warn!(%err, "compute request failed");
                    self.last_error = Some(err);
                }
            }
        }
    }

    /// Render a completed grid and schedule the frame for presentation.
    ///
    /// The palette is rebuilt only when the iteration ceiling moved since
    /// the last build; a grid computed for a different ceiling degrades to
    /// the fallback color rather than faulting.
    fn apply_grid(&mut self, grid: IterationGrid) {
        if self.palette.max_iterations() != self.view.max_iterations {
            info!(
                max_iter = self.view.max_iterations,
                "rebuilding color palette"
            );
            self.palette = ColorLut::build(self.view.max_iterations);
        }

        let started = Instant::now();
        let Some(frame) = render_grid(&grid, &self.palette, self.view.width, self.view.height)
        else {
            debug!("empty result grid; nothing to render");
            return;
        };
        self.perf.record_render(started.elapsed());
        self.frame.schedule(frame);
    }

    // -- Output surfaces -------------------------------------------------------

    /// Take the latest completed, unpresented frame, if any.
    pub fn take_frame(&mut self) -> Option<FrameBuffer> {
        self.frame.take()
    }

    /// Present the latest completed frame to a target, coalescing older
    /// unpresented ones.  Returns whether anything was presented.
    pub fn present_to(&mut self, target: &mut dyn PresentTarget) -> bool {
        self.frame.present_to(target)
    }

    /// Snapshot of the latency aggregator.
    pub fn metrics(&self) -> PerfSnapshot {
        self.perf.snapshot()
    }

    pub fn reset_metrics(&mut self) {
        self.perf.reset();
    }

    /// The most recent unresolved transport failure, if any.
    pub fn last_error(&self) -> Option<&FetchError> {
        self.last_error.as_ref()
    }

    pub fn clear_error(&mut self) {
        self.last_error = None;
    }
}

impl Drop for RequestCoordinator {
    fn drop(&mut self) {
        // Let a still-running fetch know its result is unwanted; the worker
        // exits once the job channel closes.
        self.cancel.supersede();
    }
}
