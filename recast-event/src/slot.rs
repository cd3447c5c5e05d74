//! Slot addressing — reflection-free field access
//!
//! A slot is an opaque, type-tagged reference to one field's storage inside a
//! record instance. Every slot carries its static kind and all writes go
//! through checked [`Record`] methods, so a kind disagreement surfaces as a
//! [`TypeMismatch`] instead of an unchecked write.

use std::collections::HashMap;
use std::fmt;

use crate::error::TypeMismatch;
use crate::event::{ScalarKind, ScalarValue};

// ── Slot types ───────────────────────────────────────────────────────────────

/// Declared storage kind of a field: a single scalar, or a sequence of
/// scalars. One nesting level only — sequence elements are always scalar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotKind {
    Scalar(ScalarKind),
    Sequence(ScalarKind),
}

impl SlotKind {
    pub fn is_sequence(&self) -> bool {
        matches!(self, SlotKind::Sequence(_))
    }
}

impl fmt::Display for SlotKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SlotKind::Scalar(kind) => write!(f, "{kind}"),
            SlotKind::Sequence(kind) => write!(f, "sequence of {kind}"),
        }
    }
}

/// Ordinal of a field within its record's declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotId(pub u16);

/// Static description of one field: name plus kind tag. Generated code
/// exposes these in schema declaration order via [`Record::slots`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotSpec {
    pub name: &'static str,
    pub kind: SlotKind,
}

impl SlotSpec {
    pub const fn scalar(name: &'static str, kind: ScalarKind) -> Self {
        SlotSpec {
            name,
            kind: SlotKind::Scalar(kind),
        }
    }

    pub const fn sequence(name: &'static str, element: ScalarKind) -> Self {
        SlotSpec {
            name,
            kind: SlotKind::Sequence(element),
        }
    }
}

/// A resolved slot handle: ordinal, kind tag, and field name.
///
/// Handles are only meaningful against the record instance whose
/// [`SlotIndex`] produced them; they are not transferable across instances.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot {
    pub id: SlotId,
    pub kind: SlotKind,
    pub name: &'static str,
}

// ── Slot index ───────────────────────────────────────────────────────────────

/// Field-name → [`Slot`] table, built once per decode from
/// [`Record::slots`]. Lookups are case-sensitive exact matches, and every
/// field has exactly one entry.
///
/// This is the indirection that lets the decoder write into the correct
/// field using only the textual key observed in the event stream, with no
/// compiled-in per-field branch at the dispatch site.
#[derive(Debug)]
pub struct SlotIndex {
    by_name: HashMap<&'static str, Slot>,
}

impl SlotIndex {
    /// Build the index for record type `R`.
    pub fn for_record<R: Record>() -> Self {
        let by_name = R::slots()
            .iter()
            .enumerate()
            .map(|(ordinal, spec)| {
                let slot = Slot {
                    id: SlotId(ordinal as u16),
                    kind: spec.kind,
                    name: spec.name,
                };
                (spec.name, slot)
            })
            .collect();
        SlotIndex { by_name }
    }

    /// Look up a field by its wire key.
    pub fn lookup(&self, name: &str) -> Option<Slot> {
        self.by_name.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}

// ── Record trait ─────────────────────────────────────────────────────────────

/// Slot-addressed storage interface implemented by generated record types.
///
/// Mutating a field through its slot must be observably identical to
/// assigning the named field directly — the slot table is derived state, not
/// independently owned data.
pub trait Record {
    /// Field layout in schema declaration order.
    fn slots() -> &'static [SlotSpec];

    /// Write a scalar into the field addressed by `slot`.
    ///
    /// Only called for scalar-kinded slots; the value's kind is checked
    /// against the field's declared type.
    fn write_scalar(&mut self, slot: Slot, value: ScalarValue) -> Result<(), TypeMismatch>;

    /// Append one element to the sequence addressed by `slot`.
    fn append_scalar(&mut self, slot: Slot, value: ScalarValue) -> Result<(), TypeMismatch>;

    /// Reset the sequence addressed by `slot` to empty before appends begin.
    fn begin_sequence(&mut self, slot: Slot);
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::Point;

    #[test]
    fn index_has_one_entry_per_field() {
        let index = SlotIndex::for_record::<Point>();
        assert_eq!(index.len(), 3);
        assert!(!index.is_empty());
    }

    #[test]
    fn lookup_is_exact_and_case_sensitive() {
        let index = SlotIndex::for_record::<Point>();
        assert!(index.lookup("x").is_some());
        assert!(index.lookup("X").is_none());
        assert!(index.lookup("x ").is_none());
        assert!(index.lookup("missing").is_none());
    }

    #[test]
    fn slots_carry_declaration_order_and_kind() {
        let index = SlotIndex::for_record::<Point>();
        let x = index.lookup("x").unwrap();
        assert_eq!(x.id, SlotId(0));
        assert_eq!(x.kind, SlotKind::Scalar(ScalarKind::Int));
        let tags = index.lookup("tags").unwrap();
        assert_eq!(tags.id, SlotId(2));
        assert_eq!(tags.kind, SlotKind::Sequence(ScalarKind::Text));
        assert!(tags.kind.is_sequence());
    }

    #[test]
    fn slot_write_equals_direct_assignment() {
        let index = SlotIndex::for_record::<Point>();
        let slot = index.lookup("y").unwrap();

        let mut via_slot = Point::default();
        via_slot.write_scalar(slot, ScalarValue::Int(-1)).unwrap();

        let via_field = Point {
            y: -1,
            ..Point::default()
        };
        assert_eq!(via_slot, via_field);
    }

    #[test]
    fn slot_kind_display() {
        assert_eq!(SlotKind::Scalar(ScalarKind::Int).to_string(), "int");
        assert_eq!(
            SlotKind::Sequence(ScalarKind::Text).to_string(),
            "sequence of text"
        );
    }
}
