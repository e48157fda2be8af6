// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Broadcast, level-triggered stop signal.
//!
//! A [`StopSignal`] is the cancellation primitive every producer selects
//! against. It is a flag plus a wait queue rather than a one-consumer
//! message: raising it wakes every current listener, never blocks the
//! raiser, and stays observable for listeners that arrive afterwards, so a
//! late-starting producer cannot miss it.

use event_listener::{Event, EventListener};
use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::task::{Context, Poll};

/// Broadcast cancellation notice shared by producers and controllers.
///
/// Cloning a `StopSignal` yields another handle to the same state. Calling
/// [`raise`](StopSignal::raise) on any clone wakes all waiters on
/// [`raised`](StopSignal::raised); the call is idempotent.
///
/// # Example
///
/// ```
/// use rill_core::StopSignal;
///
/// # #[tokio::main]
/// # async fn main() {
/// let stop = StopSignal::new();
/// let observer = stop.clone();
///
/// tokio::spawn(async move {
///     observer.raised().await;
///     // shut down
/// });
///
/// stop.raise();
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct StopSignal {
    inner: Arc<Inner>,
}

#[derive(Debug)]
struct Inner {
    raised: AtomicBool,
    event: Event,
}

impl StopSignal {
    /// Create a new, unraised stop signal.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Inner {
                raised: AtomicBool::new(false),
                event: Event::new(),
            }),
        }
    }

    /// Raise the signal, waking all listeners.
    ///
    /// Idempotent: raising an already-raised signal is a no-op. Never blocks,
    /// and is safe to call when no task is listening.
    pub fn raise(&self) {
        // Release ordering so writes before the raise are visible to woken
        // listeners.
        self.inner.raised.store(true, Ordering::Release);
        self.inner.event.notify(usize::MAX);
    }

    /// Check whether the signal has been raised (non-blocking).
    ///
    /// # Example
    ///
    /// ```
    /// use rill_core::StopSignal;
    ///
    /// let stop = StopSignal::new();
    /// assert!(!stop.is_raised());
    ///
    /// stop.raise();
    /// assert!(stop.is_raised());
    /// ```
    pub fn is_raised(&self) -> bool {
        self.inner.raised.load(Ordering::Acquire)
    }

    /// Wait asynchronously until the signal is raised.
    ///
    /// Resolves immediately if the signal was raised before the wait began;
    /// the signal is level-triggered, not an edge a listener can miss.
    pub fn raised(&self) -> Raised<'_> {
        Raised {
            signal: self,
            listener: None,
        }
    }
}

impl Default for StopSignal {
    fn default() -> Self {
        Self::new()
    }
}

/// Future returned by [`StopSignal::raised()`].
pub struct Raised<'a> {
    signal: &'a StopSignal,
    listener: Option<EventListener>,
}

impl Future for Raised<'_> {
    type Output = ();

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        // Fast path: already raised.
        if self.signal.is_raised() {
            return Poll::Ready(());
        }

        if self.listener.is_none() {
            self.listener = Some(self.signal.inner.event.listen());

            // Re-check after registering: a raise between the first check and
            // listen() would otherwise be lost.
            if self.signal.is_raised() {
                return Poll::Ready(());
            }
        }

        match Pin::new(self.listener.as_mut().expect("listener registered above")).poll(cx) {
            Poll::Ready(()) => Poll::Ready(()),
            Poll::Pending => Poll::Pending,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn raise_is_idempotent_and_level_triggered() {
        let stop = StopSignal::new();
        stop.raise();
        stop.raise();

        // A listener arriving after the raise still observes it.
        stop.raised().await;
        assert!(stop.is_raised());
    }

    #[tokio::test]
    async fn raise_wakes_all_listeners() {
        let stop = StopSignal::new();
        let mut waiters = Vec::new();
        for _ in 0..4 {
            let observer = stop.clone();
            waiters.push(tokio::spawn(async move { observer.raised().await }));
        }

        stop.raise();
        for waiter in waiters {
            waiter.await.expect("listener task panicked");
        }
    }
}
