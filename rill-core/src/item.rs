// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::ack::{ack_pair, AckHandle, AckWait};
use std::fmt;
use std::sync::Arc;

/// A value emitted by a producer.
///
/// Immutable once constructed: the producer label, the per-producer sequence
/// number and the formatted payload never change as the item moves producer →
/// fan-in → consumer. Ownership transfers along that path; nothing is copied
/// or buffered behind the consumer's back.
///
/// In gated mode the item additionally carries a one-shot [`AckHandle`].
/// [`take_ack`](Item::take_ack) removes it at most once, and acknowledging
/// consumes the handle, so double acknowledgment is unrepresentable.
pub struct Item {
    label: Arc<str>,
    seq: u64,
    payload: String,
    ack: Option<AckHandle>,
}

impl Item {
    /// Create an ungated item for `label` with sequence number `seq`.
    pub fn new(label: Arc<str>, seq: u64) -> Self {
        let payload = format!("{label} {seq}");
        Self {
            label,
            seq,
            payload,
            ack: None,
        }
    }

    /// Create a gated item together with the producer-side wait half.
    pub fn gated(label: Arc<str>, seq: u64) -> (Self, AckWait) {
        let (handle, wait) = ack_pair();
        let mut item = Self::new(label, seq);
        item.ack = Some(handle);
        (item, wait)
    }

    /// The label of the producer that emitted this item.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Position of this item in its producer's emission sequence, from 0.
    pub const fn seq(&self) -> u64 {
        self.seq
    }

    /// The formatted payload, `"<label> <seq>"`.
    pub fn payload(&self) -> &str {
        &self.payload
    }

    /// Returns `true` if this item still carries an acknowledgment handle.
    pub const fn is_gated(&self) -> bool {
        self.ack.is_some()
    }

    /// Remove the acknowledgment handle, if any.
    ///
    /// Yields `Some` exactly once for a gated item; subsequent calls return
    /// `None`. The fan-in stage never calls this — acknowledging on the
    /// producer's behalf is the consumer's job alone.
    pub fn take_ack(&mut self) -> Option<AckHandle> {
        self.ack.take()
    }
}

impl fmt::Debug for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Item")
            .field("label", &self.label)
            .field("seq", &self.seq)
            .field("payload", &self.payload)
            .field("gated", &self.ack.is_some())
            .finish()
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.payload)
    }
}

impl PartialEq for Item {
    fn eq(&self, other: &Self) -> bool {
        // Ack handles are identity-less; equality is by observable content.
        self.label == other.label && self.seq == other.seq && self.payload == other.payload
    }
}

impl Eq for Item {}
