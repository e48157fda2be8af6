// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]
//! Producers, fan-in merging and deadline control for rill streams.
//!
//! This crate is the coordination layer of the rill streaming core. It wires
//! the primitives from `rill-core` into four operations:
//!
//! - **[`Producer`]**: a schedulable unit that emits [`Item`]s on its own
//!   schedule. `start` spawns the emission task and hands back a
//!   [`ProducerStream`]; the task is fire-and-forget but always bound to a
//!   [`StopSignal`], never a raw thread escape.
//! - **[`RateModel`]**: policy seam supplying each producer's inter-emission
//!   delay ([`Immediate`], [`Fixed`], [`UniformJitter`]).
//! - **[`fan_in`]**: merges N producer streams into one arrival-ordered
//!   stream without loss, reordering or cross-producer blocking.
//! - **[`with_deadline`]**: races a stream against a wall-clock cutoff and
//!   raises the wired stop signal the moment the cutoff elapses.
//!
//! # Coordination discipline
//!
//! Every producer delivery is a bounded rendezvous (channel capacity 1), so a
//! consumer that stalls also stalls every producer — backpressure reaches all
//! the way upstream. Every suspension point in the producer loop is raced
//! against the stop signal, so a producer that nobody drains still terminates
//! once the signal is raised; a fired deadline therefore never leaks tasks.
//!
//! # Example
//!
//! ```
//! use futures::StreamExt;
//! use rill_core::StopSignal;
//! use rill_stream::{fan_in, Immediate, Producer};
//!
//! # #[tokio::main]
//! # async fn main() {
//! let stop = StopSignal::new();
//! let joe = Producer::new("Joe", Immediate).start(stop.clone());
//! let ann = Producer::new("Ann", Immediate).start(stop.clone());
//!
//! let mut merged = fan_in(vec![joe, ann]);
//! for _ in 0..5 {
//!     let item = merged.next().await.expect("producers are still running");
//!     println!("{item}");
//! }
//!
//! stop.raise();
//! # }
//! ```

pub mod deadline;
pub mod fan_in;
mod logging;
pub mod producer;
pub mod rate;

pub use self::deadline::{with_deadline, DeadlineStream};
pub use self::fan_in::{fan_in, FanIn};
pub use self::producer::{Producer, ProducerStream, TerminationProbe};
pub use self::rate::{Fixed, Immediate, RateModel, UniformJitter};

pub use rill_core::{AckHandle, AckWait, Item, RillError, StopSignal, StreamItem};
