//! Decode-time error types
//!
//! Compile-time (schema resolution) errors live in `recast-schema`; this
//! module covers everything that can go wrong while consuming an event
//! stream. All variants are fatal to the current decode except `UnknownKey`,
//! which the decoder only raises in strict mode — the default policy skips
//! the unknown key's value and continues.

use std::fmt;

use thiserror::Error;

use crate::event::ScalarKind;
use crate::slot::SlotKind;

/// The shape of a value observed in the event stream, used to describe what
/// was actually found when it disagrees with a slot's declared kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueShape {
    Scalar(ScalarKind),
    Sequence,
}

impl fmt::Display for ValueShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueShape::Scalar(kind) => write!(f, "{kind}"),
            ValueShape::Sequence => write!(f, "sequence"),
        }
    }
}

/// An event's kind disagrees with the target field's declared type.
///
/// Slots carry their static type tag precisely so this is a reported error
/// and never an unchecked write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("type mismatch for field '{field}': expected {expected}, found {found}")]
pub struct TypeMismatch {
    /// Field the decoder was writing to.
    pub field: &'static str,
    /// Declared kind of the field's slot.
    pub expected: SlotKind,
    /// Kind observed in the event stream.
    pub found: ValueShape,
}

/// A decode failed at an invalid state-machine transition.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DecodeError {
    /// Key not present in the slot index (strict mode only).
    #[error("unknown key '{key}'")]
    UnknownKey { key: String },

    /// A second key arrived while a previous key still awaited its value.
    #[error("key '{key}' arrived before the previous key received a value")]
    DanglingKey { key: String },

    /// Scalar value with no key bound and no sequence open.
    #[error("scalar value with no pending key")]
    UnexpectedValue,

    /// `StartArray` with no key bound, or inside an already-open sequence.
    #[error("array start with no pending key")]
    UnboundArrayStart,

    /// A structural token arrived in a state where it has no meaning.
    #[error("unexpected {event} event")]
    UnexpectedEvent { event: &'static str },

    /// Nested objects are outside the supported schema shape.
    #[error("nested objects are not supported")]
    NestedObject,

    /// The stream ended before `EndObject` completed the record.
    #[error("event stream ended before the record was complete")]
    Truncated,

    #[error(transparent)]
    TypeMismatch(#[from] TypeMismatch),
}
