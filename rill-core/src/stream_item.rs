// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::error::RillError;

/// A stream item that is either a delivered value or a terminal error.
///
/// Deadline-bounded streams yield this wrapper so that a timeout reaches the
/// consumer as an explicit item instead of an ambiguous end of stream. An
/// error terminates the sequence; the stream yields `None` afterwards.
#[derive(Debug)]
pub enum StreamItem<T> {
    /// A successfully delivered value.
    Value(T),
    /// An error that terminates the stream.
    Error(RillError),
}

impl<T: PartialEq> PartialEq for StreamItem<T> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (StreamItem::Value(a), StreamItem::Value(b)) => a == b,
            (StreamItem::Error(a), StreamItem::Error(b)) => a == b,
            _ => false,
        }
    }
}

impl<T: Eq> Eq for StreamItem<T> {}

impl<T> StreamItem<T> {
    /// Returns `true` if this is a `Value`.
    pub const fn is_value(&self) -> bool {
        matches!(self, StreamItem::Value(_))
    }

    /// Returns `true` if this is an `Error`.
    pub const fn is_error(&self) -> bool {
        matches!(self, StreamItem::Error(_))
    }

    /// Converts into `Option<T>`, discarding errors.
    pub fn ok(self) -> Option<T> {
        match self {
            StreamItem::Value(v) => Some(v),
            StreamItem::Error(_) => None,
        }
    }

    /// Converts into `Option<RillError>`, discarding values.
    pub fn err(self) -> Option<RillError> {
        match self {
            StreamItem::Value(_) => None,
            StreamItem::Error(e) => Some(e),
        }
    }

    /// Maps the contained value, propagating errors unchanged.
    pub fn map<U, F>(self, f: F) -> StreamItem<U>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            StreamItem::Value(v) => StreamItem::Value(f(v)),
            StreamItem::Error(e) => StreamItem::Error(e),
        }
    }

    /// Returns the contained value.
    ///
    /// # Panics
    ///
    /// Panics if the item is an `Error`.
    pub fn unwrap(self) -> T {
        match self {
            StreamItem::Value(v) => v,
            StreamItem::Error(e) => {
                panic!("called `StreamItem::unwrap()` on an `Error` value: {e:?}")
            }
        }
    }

    /// Returns the contained error.
    ///
    /// # Panics
    ///
    /// Panics if the item is a `Value`.
    pub fn unwrap_err(self) -> RillError {
        match self {
            StreamItem::Value(_) => {
                panic!("called `StreamItem::unwrap_err()` on a `Value`")
            }
            StreamItem::Error(e) => e,
        }
    }
}

impl<T> From<T> for StreamItem<T> {
    fn from(value: T) -> Self {
        StreamItem::Value(value)
    }
}
