// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! One-shot acknowledgment handshake for the synchronization gate.
//!
//! A gated producer attaches an [`AckHandle`] to each item it emits and then
//! waits on the paired [`AckWait`] before producing the next one. The handle
//! is single-use structurally: [`AckHandle::ack`] takes `self`, so a second
//! acknowledgment of the same item does not compile.

use crate::error::{Result, RillError};
use tokio::sync::oneshot;

/// Create a connected acknowledgment pair.
///
/// The [`AckHandle`] travels with the emitted item to the consumer; the
/// [`AckWait`] stays with the producer.
pub fn ack_pair() -> (AckHandle, AckWait) {
    let (tx, rx) = oneshot::channel();
    (AckHandle { tx }, AckWait { rx })
}

/// Consumer-side half of the handshake.
///
/// Signalled exactly once by consuming the handle. Dropping it without
/// acknowledging resolves the producer's wait with
/// [`RillError::AckDropped`], so a torn-down consumer does not wedge the
/// producer forever.
#[derive(Debug)]
pub struct AckHandle {
    tx: oneshot::Sender<()>,
}

impl AckHandle {
    /// Acknowledge the item, unblocking its producer.
    ///
    /// Consumes the handle. If the producer already exited (stop signal
    /// observed while waiting), the acknowledgment is simply discarded.
    pub fn ack(self) {
        let _ = self.tx.send(());
    }
}

/// Producer-side half of the handshake.
#[derive(Debug)]
pub struct AckWait {
    rx: oneshot::Receiver<()>,
}

impl AckWait {
    /// Wait for the consumer's acknowledgment.
    ///
    /// # Errors
    ///
    /// Returns [`RillError::AckDropped`] if the handle was dropped without
    /// being signalled.
    pub async fn wait(self) -> Result<()> {
        self.rx.await.map_err(|_| RillError::AckDropped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn ack_resolves_wait() {
        let (handle, wait) = ack_pair();
        handle.ack();
        assert!(wait.wait().await.is_ok());
    }

    #[tokio::test]
    async fn dropped_handle_surfaces_as_ack_dropped() {
        let (handle, wait) = ack_pair();
        drop(handle);
        assert_eq!(wait.wait().await, Err(RillError::AckDropped));
    }
}
