// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Error types for the rill streaming core.
//!
//! The taxonomy is narrow by design: the core has no I/O failure surface.
//! Reading past a closed stream is signalled as `None` from `poll_next` and
//! is normal termination, not an error. None of the variants below is
//! recovered automatically; a deadline always results in shutdown, not retry.

use std::time::Duration;

/// Root error type for all rill operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RillError {
    /// The consumer-imposed deadline elapsed before the next item arrived.
    ///
    /// Surfaced by `with_deadline` as a distinct stream item, never silently
    /// mid-iteration. By the time a consumer observes this variant the stop
    /// signal wired to the deadline has already been raised.
    #[error("deadline exceeded after {after:?}")]
    DeadlineExceeded {
        /// The duration the consumer was willing to wait.
        after: Duration,
    },

    /// An acknowledgment handle was dropped without being signalled.
    ///
    /// A gated producer observes this when the consumer side is torn down
    /// while an item is still outstanding; it is treated as shutdown, not as
    /// a fault to retry.
    #[error("acknowledgment handle dropped without being signalled")]
    AckDropped,
}

impl RillError {
    /// Create a deadline-exceeded error for the given wait duration.
    pub const fn deadline_exceeded(after: Duration) -> Self {
        Self::DeadlineExceeded { after }
    }

    /// Returns `true` if this error is a deadline expiry.
    #[must_use]
    pub const fn is_deadline_exceeded(&self) -> bool {
        matches!(self, Self::DeadlineExceeded { .. })
    }
}

/// Specialized `Result` type for rill operations.
pub type Result<T> = std::result::Result<T, RillError>;
