// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use rill_core::{RillError, StopSignal};
use rill_stream::{fan_in, with_deadline, Fixed, Producer};
use rill_test_utils::{
    assert_eventually, assert_stream_ended, test_channel, unwrap_error, unwrap_value,
};
use std::time::Duration;
use tokio::time::sleep;

#[tokio::test]
async fn item_arriving_before_the_deadline_is_delivered() -> anyhow::Result<()> {
    // Arrange
    let (tx, stream) = test_channel();
    let stop = StopSignal::new();
    let mut bounded = with_deadline(stream, Duration::from_millis(100), stop.clone());

    tokio::spawn(async move {
        sleep(Duration::from_millis(10)).await;
        let _ = tx.send("early");
    });

    // Act + Assert
    assert_eq!(unwrap_value(&mut bounded, 500).await, "early");
    assert!(!stop.is_raised());
    Ok(())
}

#[tokio::test]
async fn deadline_fires_when_the_next_item_is_too_late() -> anyhow::Result<()> {
    // Arrange
    let (tx, stream) = test_channel();
    let stop = StopSignal::new();
    let mut bounded = with_deadline(stream, Duration::from_millis(100), stop.clone());

    tokio::spawn(async move {
        sleep(Duration::from_millis(200)).await;
        let _ = tx.send("late");
    });

    // Act
    let err = unwrap_error(&mut bounded, 500).await;

    // Assert: a distinct timeout result, never a silent end, and the stop
    // signal is already raised by the time the consumer sees it.
    assert_eq!(
        err,
        RillError::deadline_exceeded(Duration::from_millis(100))
    );
    assert!(stop.is_raised());

    // After the timeout the stream is over; the late item never surfaces.
    assert_stream_ended(&mut bounded, 200).await;
    Ok(())
}

#[tokio::test]
async fn source_ending_before_the_deadline_is_ordinary_termination() -> anyhow::Result<()> {
    // Arrange
    let (tx, stream) = test_channel();
    let stop = StopSignal::new();
    let mut bounded = with_deadline(stream, Duration::from_millis(200), stop.clone());

    tx.send(1)?;
    drop(tx);

    // Act + Assert
    assert_eq!(unwrap_value(&mut bounded, 500).await, 1);
    assert_stream_ended(&mut bounded, 500).await;
    assert!(!stop.is_raised());
    Ok(())
}

#[tokio::test]
async fn fired_deadline_stops_undrained_producers() -> anyhow::Result<()> {
    // Arrange: both producers emit seq 0 immediately, then sleep well past
    // the deadline.
    let stop = StopSignal::new();
    let a = Producer::new("A", Fixed(Duration::from_millis(300))).start(stop.clone());
    let b = Producer::new("B", Fixed(Duration::from_millis(300))).start(stop.clone());
    let probes = [a.termination_probe(), b.termination_probe()];
    let mut bounded = with_deadline(fan_in(vec![a, b]), Duration::from_millis(100), stop.clone());

    // Act: the first items beat the deadline.
    let first = unwrap_value(&mut bounded, 500).await;
    let second = unwrap_value(&mut bounded, 500).await;
    assert_eq!(first.seq(), 0);
    assert_eq!(second.seq(), 0);

    // The next emissions would land at ~300ms; the deadline wins.
    let err = unwrap_error(&mut bounded, 500).await;

    // Assert
    assert!(err.is_deadline_exceeded());
    assert!(stop.is_raised());

    // Nobody drains after the timeout, yet no producer task leaks.
    assert_eventually(
        || probes.iter().all(|p| p.is_terminated()),
        500,
        "producers after deadline",
    )
    .await;
    Ok(())
}
