// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use futures::stream::StreamExt;
use futures::Stream;
use rill_core::{RillError, StreamItem};
use std::time::Duration;
use tokio::time::sleep;

/// Asserts that `stream` emits nothing within `timeout_ms`.
///
/// The bounded wait is what makes missing-acknowledgment bugs visible as a
/// test failure instead of a hang.
pub async fn assert_no_element_emitted<S, T>(stream: &mut S, timeout_ms: u64)
where
    S: Stream<Item = T> + Unpin,
{
    tokio::select! {
        _item = stream.next() => {
            panic!("Unexpected item emitted, expected no output.");
        }
        () = sleep(Duration::from_millis(timeout_ms)) => {
        }
    }
}

/// Asserts that `stream` signals end-of-stream within `timeout_ms`.
pub async fn assert_stream_ended<S, T>(stream: &mut S, timeout_ms: u64)
where
    S: Stream<Item = T> + Unpin,
{
    tokio::select! {
        item = stream.next() => {
            assert!(item.is_none(), "expected end of stream, got an item");
        }
        () = sleep(Duration::from_millis(timeout_ms)) => {
            panic!("stream neither emitted nor ended within {timeout_ms}ms");
        }
    }
}

/// Returns the next item from `stream`, panicking if the stream ends or
/// stays silent for `timeout_ms`.
pub async fn unwrap_stream<S, T>(stream: &mut S, timeout_ms: u64) -> T
where
    S: Stream<Item = T> + Unpin,
{
    tokio::select! {
        item = stream.next() => {
            item.expect("expected next item, stream ended")
        }
        () = sleep(Duration::from_millis(timeout_ms)) => {
            panic!("stream did not emit within {timeout_ms}ms");
        }
    }
}

/// Returns the next value from a `StreamItem` stream, panicking on errors,
/// end-of-stream and silence beyond `timeout_ms`.
pub async fn unwrap_value<S, T>(stream: &mut S, timeout_ms: u64) -> T
where
    S: Stream<Item = StreamItem<T>> + Unpin,
    T: std::fmt::Debug,
{
    match unwrap_stream(stream, timeout_ms).await {
        StreamItem::Value(v) => v,
        StreamItem::Error(e) => panic!("expected a value, got error: {e}"),
    }
}

/// Returns the next error from a `StreamItem` stream, panicking on values,
/// end-of-stream and silence beyond `timeout_ms`.
pub async fn unwrap_error<S, T>(stream: &mut S, timeout_ms: u64) -> RillError
where
    S: Stream<Item = StreamItem<T>> + Unpin,
    T: std::fmt::Debug,
{
    match unwrap_stream(stream, timeout_ms).await {
        StreamItem::Value(v) => panic!("expected an error, got value: {v:?}"),
        StreamItem::Error(e) => e,
    }
}

/// Polls `condition` until it holds, failing once `grace_ms` has elapsed.
///
/// Used as the task-count probe for cancellation tests: termination is
/// expected "within a bounded grace period", never merely eventually.
pub async fn assert_eventually<F>(mut condition: F, grace_ms: u64, what: &str)
where
    F: FnMut() -> bool,
{
    let deadline = tokio::time::Instant::now() + Duration::from_millis(grace_ms);
    while !condition() {
        if tokio::time::Instant::now() >= deadline {
            panic!("condition not reached within {grace_ms}ms: {what}");
        }
        sleep(Duration::from_millis(5)).await;
    }
}

/// Reads exactly `n` items, each within `timeout_ms`.
pub async fn drain<S, T>(stream: &mut S, n: usize, timeout_ms: u64) -> Vec<T>
where
    S: Stream<Item = T> + Unpin,
{
    let mut items = Vec::with_capacity(n);
    for _ in 0..n {
        items.push(unwrap_stream(stream, timeout_ms).await);
    }
    items
}
