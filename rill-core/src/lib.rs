// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]
//! Core types and coordination primitives for the rill streaming core.
//!
//! This crate defines the leaf vocabulary shared by producers, the fan-in
//! stage and consumers:
//!
//! - **[`Item`]**: an immutable emitted value carrying its producer label, a
//!   per-producer sequence number and an optional one-shot acknowledgment
//!   handle.
//! - **[`AckHandle`] / [`AckWait`]**: the synchronization-gate handshake. The
//!   handle is single-use by construction: acknowledging consumes it, so a
//!   double acknowledgment does not compile.
//! - **[`StopSignal`]**: a broadcast, idempotent, level-triggered
//!   cancellation notice. Raising it never blocks, any number of tasks can
//!   await it, and a task that starts listening after the signal was raised
//!   still observes it.
//! - **[`StreamItem`]**: value-or-error wrapper yielded by deadline-bounded
//!   streams, so a timeout surfaces as a distinct item rather than a silent
//!   end of stream.
//! - **[`RillError`]**: the error taxonomy. It is deliberately narrow; the
//!   core has no I/O failure surface, and an ordinary end of stream is `None`
//!   from `poll_next`, not an error.

pub mod ack;
pub mod error;
pub mod item;
pub mod stop_signal;
pub mod stream_item;

pub use self::ack::{ack_pair, AckHandle, AckWait};
pub use self::error::{Result, RillError};
pub use self::item::Item;
pub use self::stop_signal::{Raised, StopSignal};
pub use self::stream_item::StreamItem;
