//! End-to-end coordinator tests against mock compute services.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use fractalview_client::{
    ComputeRequest, ComputeService, FetchError, Phase, RequestCoordinator,
};
use fractalview_core::ViewState;
use fractalview_render::{ColorLut, FrameBuffer, IterationGrid, PresentTarget};

// ---------------------------------------------------------------------------
// Mock services
// ---------------------------------------------------------------------------

/// Answers immediately; every cell of the returned grid carries the 1-based
/// call index so tests can tell which response produced a frame.
#[derive(Default)]
struct InstantService {
    calls: Mutex<Vec<ComputeRequest>>,
}

impl ComputeService for InstantService {
    fn compute(&self, request: &ComputeRequest) -> Result<IterationGrid, FetchError> {
        let mut calls = self.calls.lock().unwrap();
        calls.push(*request);
        Ok(IterationGrid::filled(8, 8, calls.len() as u32))
    }
}

/// Blocks each call until the test releases it through the gate channel.
struct GatedService {
    calls: Mutex<Vec<ComputeRequest>>,
    gate: Mutex<mpsc::Receiver<()>>,
}

impl GatedService {
    fn new() -> (Arc<Self>, mpsc::Sender<()>) {
        let (tx, rx) = mpsc::channel();
        let service = Arc::new(Self {
            calls: Mutex::new(Vec::new()),
            gate: Mutex::new(rx),
        });
        (service, tx)
    }
}

impl ComputeService for GatedService {
    fn compute(&self, request: &ComputeRequest) -> Result<IterationGrid, FetchError> {
        let index = {
            let mut calls = self.calls.lock().unwrap();
            calls.push(*request);
            calls.len() as u32
        };
        self.gate
            .lock()
            .unwrap()
            .recv_timeout(Duration::from_secs(5))
            .map_err(|_| FetchError::Unreachable("gate timeout".into()))?;
        Ok(IterationGrid::filled(8, 8, index))
    }
}

struct FailingService;

impl ComputeService for FailingService {
    fn compute(&self, _request: &ComputeRequest) -> Result<IterationGrid, FetchError> {
        Err(FetchError::Unreachable("connection refused".into()))
    }
}

#[derive(Default)]
struct RecordingTarget {
    presented: Vec<FrameBuffer>,
}

impl PresentTarget for RecordingTarget {
    fn present(&mut self, frame: &FrameBuffer) {
        self.presented.push(frame.clone());
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Pump with a far-future "now" (firing any pending debounce) until the
/// condition holds or a wall-clock timeout trips.
fn pump_until(
    coordinator: &mut RequestCoordinator,
    what: &str,
    mut condition: impl FnMut(&mut RequestCoordinator) -> bool,
) {
    let deadline = Instant::now() + Duration::from_secs(5);
    while Instant::now() < deadline {
        coordinator.pump_at(Instant::now() + Duration::from_secs(60));
        if condition(coordinator) {
            return;
        }
        thread::sleep(Duration::from_millis(2));
    }
    panic!("timed out waiting for: {what}");
}

fn wait_for_calls(service: &Mutex<Vec<ComputeRequest>>, count: usize) {
    let deadline = Instant::now() + Duration::from_secs(5);
    while Instant::now() < deadline {
        if service.lock().unwrap().len() >= count {
            return;
        }
        thread::sleep(Duration::from_millis(2));
    }
    panic!("timed out waiting for {count} compute call(s)");
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[test]
fn burst_of_changes_issues_one_request_with_last_values() {
    let service = Arc::new(InstantService::default());
    let mut c = RequestCoordinator::new(service.clone(), ViewState::initial()).unwrap();

    for _ in 0..5 {
        c.pan_by(4.0, -2.0).unwrap();
    }
    let expected = c.view();

    // Inside the debounce window: nothing has been issued.
    c.pump_at(Instant::now());
    assert_eq!(service.calls.lock().unwrap().len(), 0);
    assert_eq!(c.phase(), Phase::Debouncing);

    pump_until(&mut c, "single request to complete", |c| {
        c.phase() == Phase::Idle && c.metrics().render_count == 1
    });

    let calls = service.calls.lock().unwrap();
    assert_eq!(calls.len(), 1, "burst must coalesce to one request");
    assert_eq!(calls[0], ComputeRequest::from(expected));
    drop(calls);

    // Quiet pipeline stays quiet.
    c.pump_at(Instant::now() + Duration::from_secs(60));
    assert_eq!(service.calls.lock().unwrap().len(), 1);
    assert!(c.take_frame().is_some());
    assert!(c.take_frame().is_none());
}

#[test]
fn iteration_change_waits_out_the_long_window() {
    let service = Arc::new(InstantService::default());
    let mut c = RequestCoordinator::new(service, ViewState::initial()).unwrap();

    let before = Instant::now();
    c.set_max_iterations(300).unwrap();
    // 200 ms in: past the navigation window, inside the iteration window.
    c.pump_at(before + Duration::from_millis(200));
    assert_eq!(c.phase(), Phase::Debouncing);
    c.pump_at(Instant::now() + Duration::from_millis(301));
    assert_ne!(c.phase(), Phase::Debouncing, "long window should have fired");

    pump_until(&mut c, "request to complete", |c| c.phase() == Phase::Idle);
}

#[test]
fn navigation_change_fires_after_the_short_window() {
    let service = Arc::new(InstantService::default());
    let mut c = RequestCoordinator::new(service, ViewState::initial()).unwrap();

    let before = Instant::now();
    c.zoom_at(100.0, 200.0, 1.2).unwrap();
    c.pump_at(before + Duration::from_millis(100));
    assert_eq!(c.phase(), Phase::Debouncing);
    c.pump_at(Instant::now() + Duration::from_millis(151));
    assert_ne!(c.phase(), Phase::Debouncing, "short window should have fired");

    pump_until(&mut c, "request to complete", |c| c.phase() == Phase::Idle);
}

#[test]
fn superseded_result_is_never_rendered() {
    let (service, gate) = GatedService::new();
    let mut c = RequestCoordinator::new(service.clone(), ViewState::initial()).unwrap();

    // Request A goes out and blocks inside the service.
    c.pan_by(10.0, 0.0).unwrap();
    c.pump_at(Instant::now() + Duration::from_secs(60));
    assert_eq!(c.phase(), Phase::Fetching);
    wait_for_calls(&service.calls, 1);

    // Request B supersedes A before A resolves.
    c.pan_by(-30.0, 12.0).unwrap();
    let final_view = c.view();
    c.pump_at(Instant::now() + Duration::from_secs(60));

    // Release A, then B.  A resolves late and must be discarded.
    gate.send(()).unwrap();
    gate.send(()).unwrap();

    pump_until(&mut c, "fresh result to arrive", |c| {
        c.phase() == Phase::Idle && c.metrics().render_count >= 1
    });

    let calls = service.calls.lock().unwrap();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[1], ComputeRequest::from(final_view));
    drop(calls);

    // Exactly one frame, colored from B's grid (call index 2), ever lands.
    assert_eq!(c.metrics().render_count, 1);
    let frame = c.take_frame().expect("B's frame should be pending");
    let lut = ColorLut::build(final_view.max_iterations);
    assert_eq!(&frame.pixel(0, 0).unwrap()[..3], &lut.color_for(2));
    assert!(c.take_frame().is_none());
}

#[test]
fn transport_failure_lands_in_the_error_slot() {
    let mut c = RequestCoordinator::new(Arc::new(FailingService), ViewState::initial()).unwrap();

    c.pan_by(1.0, 1.0).unwrap();
    pump_until(&mut c, "failure to surface", |c| c.last_error().is_some());

    assert!(matches!(
        c.last_error(),
        Some(FetchError::Unreachable(_))
    ));
    // The last-good raster is untouched (here: none existed) and no latency
    // sample is recorded for a failed cycle.
    assert!(c.take_frame().is_none());
    assert_eq!(c.metrics().request_count, 0);
    assert_eq!(c.phase(), Phase::Idle);

    c.clear_error();
    assert!(c.last_error().is_none());
}

#[test]
fn successful_cycle_records_paired_latencies() {
    let service = Arc::new(InstantService::default());
    let mut c = RequestCoordinator::new(service, ViewState::initial()).unwrap();

    c.pan_by(3.0, 3.0).unwrap();
    pump_until(&mut c, "cycle to complete", |c| c.metrics().render_count == 1);

    let snap = c.metrics();
    assert_eq!(snap.request_count, 1);
    assert_eq!(snap.last_total, snap.last_request + snap.last_render);
    assert_eq!(snap.avg_request, snap.last_request);

    c.reset_metrics();
    assert_eq!(c.metrics().request_count, 0);
}

#[test]
fn presentation_coalesces_to_the_newest_frame() {
    let service = Arc::new(InstantService::default());
    let mut c = RequestCoordinator::new(service.clone(), ViewState::initial()).unwrap();

    // First cycle completes but is never presented.
    c.pan_by(2.0, 0.0).unwrap();
    pump_until(&mut c, "first cycle", |c| c.metrics().render_count == 1);

    // Second cycle completes; its frame replaces the unpresented one.
    c.pan_by(2.0, 0.0).unwrap();
    pump_until(&mut c, "second cycle", |c| c.metrics().render_count == 2);

    let mut target = RecordingTarget::default();
    assert!(c.present_to(&mut target));
    assert!(!c.present_to(&mut target));
    assert_eq!(target.presented.len(), 1);

    let lut = ColorLut::build(c.view().max_iterations);
    assert_eq!(
        &target.presented[0].pixel(0, 0).unwrap()[..3],
        &lut.color_for(2),
        "only the newest frame is presented"
    );
}

#[test]
fn palette_follows_the_iteration_ceiling() {
    let service = Arc::new(InstantService::default());
    let mut c = RequestCoordinator::new(service.clone(), ViewState::initial()).unwrap();

    c.set_max_iterations(2).unwrap();
    pump_until(&mut c, "cycle at new ceiling", |c| {
        c.metrics().render_count == 1
    });

    // The single compute call is call index 1; with a ceiling of 2 the LUT
    // maps 1 to the gradient, not to black or fallback.
    let frame = c.take_frame().unwrap();
    let lut = ColorLut::build(2);
    assert_eq!(&frame.pixel(0, 0).unwrap()[..3], &lut.color_for(1));
    assert_ne!(frame.pixel(0, 0).unwrap(), [0, 0, 0, 255]);
}
