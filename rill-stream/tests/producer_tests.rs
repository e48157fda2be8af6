// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use rill_core::StopSignal;
use rill_stream::{Fixed, Immediate, Producer};
use rill_test_utils::{
    assert_eventually, assert_no_element_emitted, assert_stream_ended, drain, unwrap_stream,
};
use std::time::Duration;

#[tokio::test]
async fn sequence_numbers_are_strictly_increasing_and_gap_free() -> anyhow::Result<()> {
    // Arrange
    let stop = StopSignal::new();
    let mut stream = Producer::new("Joe", Immediate).start(stop.clone());

    // Act
    let items = drain(&mut stream, 10, 500).await;

    // Assert
    for (expected_seq, item) in items.iter().enumerate() {
        assert_eq!(item.label(), "Joe");
        assert_eq!(item.seq(), expected_seq as u64);
        assert_eq!(item.payload(), format!("Joe {expected_seq}"));
    }

    stop.raise();
    Ok(())
}

#[tokio::test]
async fn unread_producer_never_advances_past_its_first_pending_delivery() -> anyhow::Result<()> {
    // Arrange
    let stop = StopSignal::new();
    let mut stream = Producer::new("Joe", Immediate).start(stop.clone());
    let probe = stream.termination_probe();

    // Act: never read; give the producer ample time to run ahead if it could.
    tokio::time::sleep(Duration::from_millis(100)).await;
    stop.raise();
    assert_eventually(|| probe.is_terminated(), 500, "producer after stop").await;

    // Assert: only the single rendezvous'd item was ever delivered.
    let item = unwrap_stream(&mut stream, 100).await;
    assert_eq!(item.seq(), 0);
    assert_stream_ended(&mut stream, 100).await;

    Ok(())
}

#[tokio::test]
async fn dropping_the_stream_terminates_the_producer() -> anyhow::Result<()> {
    // Arrange: the stop signal is never raised here.
    let stop = StopSignal::new();
    let mut stream = Producer::new("Joe", Immediate).start(stop);
    let probe = stream.termination_probe();

    let first = unwrap_stream(&mut stream, 500).await;
    assert_eq!(first.seq(), 0);

    // Act
    drop(stream);

    // Assert
    assert_eventually(|| probe.is_terminated(), 500, "producer after stream drop").await;
    Ok(())
}

#[tokio::test]
async fn join_closes_the_stream_and_waits_for_termination() -> anyhow::Result<()> {
    // Arrange
    let stop = StopSignal::new();
    let stream = Producer::new("Joe", Immediate).start(stop);
    let probe = stream.termination_probe();

    // Act
    stream.join().await;

    // Assert
    assert!(probe.is_terminated());
    Ok(())
}

#[tokio::test]
async fn fixed_rate_delays_only_after_successful_delivery() -> anyhow::Result<()> {
    // Arrange
    let stop = StopSignal::new();
    let mut stream = Producer::new("Joe", Fixed(Duration::from_millis(150))).start(stop.clone());

    // Act + Assert: the first item is constructed before any delay.
    let first = unwrap_stream(&mut stream, 100).await;
    assert_eq!(first.seq(), 0);

    // The next emission waits out the rate-model delay.
    assert_no_element_emitted(&mut stream, 50).await;
    let second = unwrap_stream(&mut stream, 500).await;
    assert_eq!(second.seq(), 1);

    stop.raise();
    Ok(())
}
