pub mod cancel;
pub mod compute;
pub mod coordinator;
pub mod debounce;
pub mod error;
pub mod perf;

pub use cancel::FetchCancel;
pub use compute::{ComputeRequest, ComputeService, HttpComputeService};
pub use coordinator::{Phase, RequestCoordinator};
pub use debounce::{classify_change, ChangeClass, DEBOUNCE_ITERATIONS, DEBOUNCE_NAVIGATION};
pub use error::FetchError;
pub use perf::{PerfMonitor, PerfSnapshot};
