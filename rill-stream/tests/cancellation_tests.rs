// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use futures::StreamExt;
use rill_core::StopSignal;
use rill_stream::{fan_in, Immediate, Producer};
use rill_test_utils::{assert_eventually, assert_stream_ended, drain};
use std::time::Duration;
use tokio::time::sleep;

#[tokio::test]
async fn raising_stop_terminates_every_producer_task() -> anyhow::Result<()> {
    // Arrange
    let stop = StopSignal::new();
    let streams: Vec<_> = ["A", "B", "C"]
        .into_iter()
        .map(|label| Producer::new(label, Immediate).start(stop.clone()))
        .collect();
    let probes: Vec<_> = streams.iter().map(|s| s.termination_probe()).collect();
    let mut merged = fan_in(streams);

    let _ = drain(&mut merged, 5, 500).await;

    // Act
    stop.raise();

    // Assert: the merge output drains whatever was in flight and closes.
    loop {
        tokio::select! {
            item = merged.next() => {
                if item.is_none() {
                    break;
                }
            }
            () = sleep(Duration::from_millis(200)) => {
                panic!("merge output neither emitted nor closed after stop");
            }
        }
    }

    // Zero still-running producer tasks within the grace period.
    assert_eventually(
        || probes.iter().all(|p| p.is_terminated()),
        500,
        "all producers after stop",
    )
    .await;
    Ok(())
}

#[tokio::test]
async fn raise_is_idempotent_and_safe_after_termination() -> anyhow::Result<()> {
    // Arrange
    let stop = StopSignal::new();
    let stream = Producer::new("Joe", Immediate).start(stop.clone());
    let probe = stream.termination_probe();

    // Act
    stop.raise();
    stop.raise();

    // Assert
    assert_eventually(|| probe.is_terminated(), 500, "producer after double raise").await;

    // Raising with no producers left is still a no-op, never an error.
    stop.raise();
    drop(stream);
    Ok(())
}

#[tokio::test]
async fn producer_started_after_stop_observes_the_signal() -> anyhow::Result<()> {
    // Arrange: level-triggered, not an edge a late producer could miss.
    let stop = StopSignal::new();
    stop.raise();

    // Act
    let mut stream = Producer::new("Late", Immediate).start(stop.clone());
    let probe = stream.termination_probe();

    // Assert
    assert_eventually(|| probe.is_terminated(), 500, "late producer").await;
    assert_stream_ended(&mut stream, 200).await;
    Ok(())
}

#[tokio::test]
async fn stopped_but_undrained_producers_do_not_deadlock() -> anyhow::Result<()> {
    // Arrange: producers blocked mid-delivery with a consumer that has
    // stopped reading — the leak scenario the stop signal exists to prevent.
    let stop = StopSignal::new();
    let a = Producer::new("A", Immediate).start(stop.clone());
    let b = Producer::new("B", Immediate).start(stop.clone());
    let probes = [a.termination_probe(), b.termination_probe()];
    let merged = fan_in(vec![a, b]);

    sleep(Duration::from_millis(50)).await;

    // Act: stop without ever draining the merge channel.
    stop.raise();

    // Assert
    assert_eventually(
        || probes.iter().all(|p| p.is_terminated()),
        500,
        "undrained producers after stop",
    )
    .await;
    drop(merged);
    Ok(())
}
