// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Deadline control: race a stream against a wall-clock cutoff.
//!
//! [`with_deadline`] wraps a stream so the consumer's read loop becomes a
//! race between "next item arrives" and "deadline elapses". The deadline is
//! a single point in time fixed when the wrapper is created — it is not
//! reset by arriving items.
//!
//! When the deadline fires, the wrapper raises the wired [`StopSignal`]
//! *before* surfacing the timeout, yields exactly one
//! [`StreamItem::Error`]\([`RillError::DeadlineExceeded`]\) and then ends.
//! Because every producer races its delivery against that same signal, a
//! producer left undrained after the timeout still exits instead of blocking
//! forever on a channel nobody reads.

use rill_core::{RillError, StopSignal, StreamItem};
use pin_project::pin_project;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Duration;
use tokio::time::{sleep_until, Instant, Sleep};
use tokio_stream::Stream;

/// Bound `stream` by a deadline `after` from now, raising `stop` on expiry.
///
/// The deadline is evaluated at every poll; the timer is consulted only when
/// the source has nothing ready, so an item that arrives before the cutoff
/// is always surfaced as a value.
///
/// # Example
///
/// ```
/// use futures::StreamExt;
/// use rill_core::{StopSignal, StreamItem};
/// use rill_stream::{with_deadline, Fixed, Producer};
/// use std::time::Duration;
///
/// # #[tokio::main]
/// # async fn main() {
/// let stop = StopSignal::new();
/// let joe = Producer::new("Joe", Fixed(Duration::from_secs(60))).start(stop.clone());
///
/// let mut bounded = with_deadline(joe, Duration::from_millis(50), stop.clone());
///
/// // The first item is emitted before any delay, so it beats the deadline.
/// assert!(bounded.next().await.unwrap().is_value());
///
/// // The second would arrive a minute later; the deadline fires instead
/// // and the stop signal is raised before the error is surfaced.
/// let timed_out = bounded.next().await.unwrap();
/// assert!(timed_out.is_error());
/// assert!(stop.is_raised());
/// # }
/// ```
pub fn with_deadline<S>(stream: S, after: Duration, stop: StopSignal) -> DeadlineStream<S>
where
    S: Stream,
{
    DeadlineStream {
        stream,
        after,
        sleep: Box::pin(sleep_until(Instant::now() + after)),
        stop,
        is_done: false,
    }
}

/// Stream returned by [`with_deadline`].
#[pin_project]
pub struct DeadlineStream<S> {
    #[pin]
    stream: S,
    after: Duration,
    sleep: Pin<Box<Sleep>>,
    stop: StopSignal,
    is_done: bool,
}

impl<S> Stream for DeadlineStream<S>
where
    S: Stream,
{
    type Item = StreamItem<S::Item>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.project();

        if *this.is_done {
            return Poll::Ready(None);
        }

        match this.stream.poll_next(cx) {
            Poll::Ready(Some(item)) => return Poll::Ready(Some(StreamItem::Value(item))),
            Poll::Ready(None) => {
                *this.is_done = true;
                return Poll::Ready(None);
            }
            Poll::Pending => {}
        }

        match this.sleep.as_mut().poll(cx) {
            Poll::Ready(()) => {
                *this.is_done = true;
                // Stop producers before handing the timeout to the caller,
                // so no task is left delivering into an undrained channel.
                this.stop.raise();
                crate::warn!("deadline of {:?} elapsed, stop signal raised", this.after);
                Poll::Ready(Some(StreamItem::Error(RillError::deadline_exceeded(
                    *this.after,
                ))))
            }
            Poll::Pending => Poll::Pending,
        }
    }
}
