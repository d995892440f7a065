use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use fractalview_core::ViewState;
use fractalview_render::IterationGrid;

use crate::error::FetchError;

/// Overall per-request timeout.  A hung backend surfaces as `Unreachable`,
/// identical to any other transport failure.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Wire payload for one compute request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ComputeRequest {
    pub center_x: f64,
    pub center_y: f64,
    pub zoom: f64,
    pub max_iterations: u32,
    pub width: u32,
    pub height: u32,
}

impl From<ViewState> for ComputeRequest {
    fn from(view: ViewState) -> Self {
        Self {
            center_x: view.center_x,
            center_y: view.center_y,
            zoom: view.zoom,
            max_iterations: view.max_iterations,
            width: view.width,
            height: view.height,
        }
    }
}

/// Wire shape of a successful compute response.
#[derive(Debug, Deserialize)]
pub struct ComputeResponse {
    pub data: Vec<Vec<u32>>,
    #[serde(default)]
    pub status: String,
}

/// The remote fractal-computation service, seen from the coordinator.
///
/// `compute` may block; the coordinator only ever calls it from its
/// dedicated fetch worker thread.  Tests substitute a mock.
pub trait ComputeService: Send + Sync {
    fn compute(&self, request: &ComputeRequest) -> Result<IterationGrid, FetchError>;
}

/// HTTP JSON transport to the compute backend.
pub struct HttpComputeService {
    agent: ureq::Agent,
    endpoint: String,
}

impl HttpComputeService {
    /// Point the service at a backend base URL, e.g. `http://localhost:8000`.
    pub fn new(base_url: &str) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(REQUEST_TIMEOUT).build();
        Self {
            agent,
            endpoint: format!("{}/api/mandelbrot", base_url.trim_end_matches('/')),
        }
    }
}

impl ComputeService for HttpComputeService {
    fn compute(&self, request: &ComputeRequest) -> Result<IterationGrid, FetchError> {
        let body = serde_json::to_string(request)
            .map_err(|e| FetchError::Malformed(format!("request encoding: {e}")))?;

        debug!(endpoint = %self.endpoint, zoom = request.zoom, "POSTing compute request");
        let response = self
            .agent
            .post(&self.endpoint)
            .set("Content-Type", "application/json")
            .send_string(&body)
            .map_err(|e| match e {
                ureq::Error::Status(code, _) => FetchError::HttpStatus(code),
                ureq::Error::Transport(t) => FetchError::Unreachable(t.to_string()),
            })?;

        let parsed: ComputeResponse = serde_json::from_reader(response.into_reader())
            .map_err(|e| FetchError::Malformed(e.to_string()))?;
        IterationGrid::from_rows(parsed.data).map_err(|e| FetchError::Malformed(e.to_string()))
    }
}
