use thiserror::Error;

/// Failures from the compute-service transport.
///
/// Cancellation is deliberately not represented here: a superseded request
/// is not a failure and is discarded without surfacing anything.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The service could not be reached at all.
    #[error("compute service unreachable: {0}")]
    Unreachable(String),

    /// The service responded with a non-success status.
    #[error("compute service returned status {0}")]
    HttpStatus(u16),

    /// The response body could not be decoded into an iteration grid.
    #[error("malformed compute response: {0}")]
    Malformed(String),
}
