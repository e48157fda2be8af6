// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Producers: schedulable units that emit a sequence of items over time.
//!
//! A [`Producer`] is constructed explicitly and started explicitly — there is
//! no process-wide registry or implicit initialization. `start` spawns one
//! Tokio task bound to a [`StopSignal`] and returns the receiving end of the
//! producer's output as a [`ProducerStream`].
//!
//! # Producer loop
//!
//! Per item, in order:
//!
//! 1. Deliver the item, racing the send against the stop signal. Whichever
//!    is ready first wins; when both are ready the choice is randomized by
//!    `tokio::select!`, so neither path is favored perpetually.
//! 2. If gated, wait for the consumer's acknowledgment, again racing the
//!    stop signal. A dropped acknowledgment handle counts as shutdown.
//! 3. Wait out the rate-model delay, again racing the stop signal. The delay
//!    runs only after a successful delivery, so a slow consumer also slows
//!    the producer.
//!
//! The loop exits on stop, on a dropped receiver, or on a dropped ack
//! handle; exiting drops the sender so downstream observes end-of-stream
//! instead of blocking forever. State machine per producer:
//! `Running -> (StopObserved | StreamClosedByConsumer) -> Terminated`, with
//! no way back to `Running`.

use crate::rate::RateModel;
use rill_core::{Item, StopSignal};
use std::pin::Pin;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::task::{Context, Poll};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::sleep;
use tokio_stream::wrappers::ReceiverStream;
use tokio_stream::Stream;

/// A unit that repeatedly generates an [`Item`] after a rate-model delay,
/// honoring a stop signal at every suspension point.
///
/// Producers share no mutable state with each other; the only things a
/// running producer touches are its own counter, its rate model, its output
/// channel and the stop signal.
#[derive(Debug)]
pub struct Producer<R> {
    label: Arc<str>,
    rate: R,
    gated: bool,
}

impl<R: RateModel> Producer<R> {
    /// Create a producer with the given label and rate model.
    pub fn new(label: impl Into<Arc<str>>, rate: R) -> Self {
        Self {
            label: label.into(),
            rate,
            gated: false,
        }
    }

    /// Attach the synchronization gate: every emitted item carries a one-shot
    /// acknowledgment handle, and the producer does not emit its next item
    /// until the previous one is acknowledged.
    #[must_use]
    pub fn gated(mut self) -> Self {
        self.gated = true;
        self
    }

    /// Spawn the emission task and return its output stream.
    ///
    /// The output channel is a bounded rendezvous of capacity 1 (Tokio's
    /// minimum): at most one item rests in the channel while the producer
    /// blocks delivering the next, which is what bounds buffering and gives
    /// the fairness behavior of [`fan_in`](crate::fan_in()).
    ///
    /// The task is fire-and-forget but never escapes control: it terminates
    /// when `stop` is raised or when the returned stream is dropped.
    pub fn start(self, stop: StopSignal) -> ProducerStream {
        let (tx, rx) = mpsc::channel(1);
        let label = Arc::clone(&self.label);
        let terminated = Arc::new(AtomicBool::new(false));
        let task_terminated = Arc::clone(&terminated);

        let handle = tokio::spawn(async move {
            run(self.label, self.rate, self.gated, tx, stop).await;
            task_terminated.store(true, Ordering::Release);
        });

        ProducerStream {
            label,
            inner: ReceiverStream::new(rx),
            terminated,
            handle,
        }
    }
}

async fn run<R: RateModel>(
    label: Arc<str>,
    mut rate: R,
    gated: bool,
    tx: mpsc::Sender<Item>,
    stop: StopSignal,
) {
    let mut seq: u64 = 0;
    loop {
        // Level-triggered: a signal raised before this producer ever ran is
        // observed here, not missed.
        if stop.is_raised() {
            break;
        }

        let (item, ack) = if gated {
            let (item, wait) = Item::gated(Arc::clone(&label), seq);
            (item, Some(wait))
        } else {
            (Item::new(Arc::clone(&label), seq), None)
        };

        tokio::select! {
            sent = tx.send(item) => {
                if sent.is_err() {
                    // Receiver dropped: stream closed by the consumer.
                    break;
                }
            }
            () = stop.raised() => break,
        }

        if let Some(wait) = ack {
            tokio::select! {
                acked = wait.wait() => {
                    if acked.is_err() {
                        break;
                    }
                }
                () = stop.raised() => break,
            }
        }

        let delay = rate.next_delay(&label);
        if !delay.is_zero() {
            tokio::select! {
                () = sleep(delay) => {}
                () = stop.raised() => break,
            }
        }

        seq += 1;
    }
    crate::info!("producer {label} terminated");
}

/// Receiving end of a producer's output, returned by [`Producer::start`].
///
/// Dropping the stream closes the channel; the producer observes the closed
/// channel at its next delivery attempt and terminates.
#[derive(Debug)]
pub struct ProducerStream {
    label: Arc<str>,
    inner: ReceiverStream<Item>,
    terminated: Arc<AtomicBool>,
    handle: JoinHandle<()>,
}

impl ProducerStream {
    /// The label of the producer feeding this stream.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Returns `true` once the emission task has terminated.
    pub fn is_terminated(&self) -> bool {
        self.handle.is_finished()
    }

    /// A probe that outlives this stream, for observing task termination
    /// after the stream has been handed to a merge stage.
    pub fn termination_probe(&self) -> TerminationProbe {
        TerminationProbe {
            terminated: Arc::clone(&self.terminated),
        }
    }

    /// Close the stream and wait for the producer task to terminate.
    pub async fn join(self) {
        let Self { inner, handle, .. } = self;
        drop(inner);
        // The task never panics; a join error can only be cancellation.
        let _ = handle.await;
    }
}

impl Stream for ProducerStream {
    type Item = Item;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Pin::new(&mut self.inner).poll_next(cx)
    }
}

/// Detached view of a producer task's liveness, for test-side task-count
/// probes.
#[derive(Debug, Clone)]
pub struct TerminationProbe {
    terminated: Arc<AtomicBool>,
}

impl TerminationProbe {
    /// Returns `true` once the producer's emission loop has exited.
    pub fn is_terminated(&self) -> bool {
        self.terminated.load(Ordering::Acquire)
    }
}
