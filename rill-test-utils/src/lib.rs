// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]
//! Test utilities for the rill streaming core.
//!
//! This crate provides channels and bounded-wait assertion helpers for
//! testing producers, fan-in merging and deadline control. It is designed for
//! development and testing only, not for production code.
//!
//! Every waiting helper here is bounded: a property like "the producer emits
//! nothing while unacknowledged" is asserted by waiting a fixed window, never
//! by hanging the test suite on a silent deadlock.

pub mod helpers;

pub use helpers::{
    assert_eventually, assert_no_element_emitted, assert_stream_ended, drain, unwrap_error,
    unwrap_stream, unwrap_value,
};

use futures::Stream;
use tokio::sync::mpsc;
use tokio_stream::wrappers::UnboundedReceiverStream;

/// Creates an unbounded test channel exposed as a stream.
///
/// Integration tests drive merge and deadline operators imperatively through
/// the sender while the operator under test consumes the stream.
///
/// # Example
///
/// ```rust
/// use futures::StreamExt;
/// use rill_test_utils::test_channel;
///
/// # #[tokio::main]
/// # async fn main() {
/// let (tx, mut stream) = test_channel();
/// tx.send(7).unwrap();
/// assert_eq!(stream.next().await, Some(7));
/// # }
/// ```
pub fn test_channel<T: Send + 'static>() -> (
    mpsc::UnboundedSender<T>,
    impl Stream<Item = T> + Send + Unpin,
) {
    let (tx, rx) = mpsc::unbounded_channel();
    (tx, UnboundedReceiverStream::new(rx))
}
