// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Rate models: the policy seam for inter-emission delays.
//!
//! Each producer owns its rate model outright. Randomized models carry their
//! own [`fastrand::Rng`], so no random source is ever shared across producer
//! tasks.

use std::time::Duration;

/// Supplies the delay a producer waits after each successful delivery.
///
/// Implementations must be self-contained: a model instance is owned by
/// exactly one producer task and is free to keep per-producer state, but must
/// not reach into state shared with other producers.
pub trait RateModel: Send + 'static {
    /// The delay to wait before the next emission.
    ///
    /// `label` identifies the producer for externally driven models; the
    /// built-in models ignore it.
    fn next_delay(&mut self, label: &str) -> Duration;
}

/// No delay at all.
///
/// The fastest pacing, and the right choice when a synchronization gate
/// already paces emission.
#[derive(Debug, Clone, Copy, Default)]
pub struct Immediate;

impl RateModel for Immediate {
    fn next_delay(&mut self, _label: &str) -> Duration {
        Duration::ZERO
    }
}

/// The same delay after every emission.
#[derive(Debug, Clone, Copy)]
pub struct Fixed(pub Duration);

impl RateModel for Fixed {
    fn next_delay(&mut self, _label: &str) -> Duration {
        self.0
    }
}

/// A uniformly random delay in `[0, bound)`, simulating jitter.
#[derive(Debug)]
pub struct UniformJitter {
    bound: Duration,
    rng: fastrand::Rng,
}

impl UniformJitter {
    /// Create a jitter model drawing delays up to (excluding) `bound`.
    pub fn up_to(bound: Duration) -> Self {
        Self {
            bound,
            rng: fastrand::Rng::new(),
        }
    }
}

impl RateModel for UniformJitter {
    fn next_delay(&mut self, _label: &str) -> Duration {
        let bound_ms = self.bound.as_millis() as u64;
        if bound_ms == 0 {
            return Duration::ZERO;
        }
        Duration::from_millis(self.rng.u64(0..bound_ms))
    }
}
