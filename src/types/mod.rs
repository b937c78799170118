mod outcome;
mod request;

pub use outcome::ValidationOutcome;
pub use request::ValidationRequest;

use serde::Serialize;

/// Snapshot of the outcome cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// Number of entries currently held, including ones past their TTL that
    /// have not been looked up since.
    pub size: usize,
    /// Configured maximum number of entries.
    pub capacity: usize,
}
