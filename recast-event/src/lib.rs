//! recast-event — runtime support for recast-generated record codecs
//!
//! The `recast` compiler turns a declarative schema into a Rust struct plus
//! an event-driven encoder/decoder pair. This crate is the runtime those
//! generated artifacts compile against:
//!
//! - **Event grammar** — `StartObject` / `Key` / `Value` / `StartArray` /
//!   `EndArray` / `EndObject` tokens, wire-format independent (see [`Event`])
//! - **Slot addressing** — type-tagged name→slot tables substituting for
//!   runtime reflection (see [`SlotIndex`] and [`Record`])
//! - **Decoder state machine** — routes each value event to the right field
//!   through the slot index (see [`Decoder`])
//! - **JSON binding** — one concrete byte format for the grammar (see
//!   [`json`])
//!
//! # Usage
//!
//! Generated code implements [`Record`] and [`Encode`]; a hand-written
//! equivalent looks like this:
//!
//! ```rust
//! use recast_event::{
//!     decode_events, Encode, EventBuffer, EventSink, Record, ScalarKind,
//!     ScalarValue, Slot, SlotSpec, TypeMismatch,
//! };
//!
//! #[derive(Debug, Clone, Default, PartialEq)]
//! struct Reading {
//!     celsius: f64,
//! }
//!
//! impl Record for Reading {
//!     fn slots() -> &'static [SlotSpec] {
//!         const SLOTS: &[SlotSpec] = &[SlotSpec::scalar("celsius", ScalarKind::Double)];
//!         SLOTS
//!     }
//!
//!     fn write_scalar(&mut self, _slot: Slot, value: ScalarValue) -> Result<(), TypeMismatch> {
//!         self.celsius = value.into_double("celsius")?;
//!         Ok(())
//!     }
//!
//!     fn append_scalar(&mut self, _slot: Slot, _value: ScalarValue) -> Result<(), TypeMismatch> {
//!         unreachable!("no sequence fields")
//!     }
//!
//!     fn begin_sequence(&mut self, _slot: Slot) {}
//! }
//!
//! impl Encode for Reading {
//!     fn encode<S: EventSink>(&self, sink: &mut S) {
//!         sink.start_object();
//!         sink.key("celsius");
//!         sink.value(ScalarValue::Double(self.celsius));
//!         sink.end_object();
//!     }
//! }
//!
//! let original = Reading { celsius: 21.5 };
//! let mut sink = EventBuffer::new();
//! original.encode(&mut sink);
//! let decoded: Reading = decode_events(sink.into_events()).unwrap();
//! assert_eq!(original, decoded);
//! ```

pub mod decoder;
pub mod error;
pub mod event;
pub mod json;
pub mod slot;

#[cfg(test)]
pub(crate) mod testutil;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use decoder::{decode_events, Decoder, DecoderConfig};
pub use error::{DecodeError, TypeMismatch, ValueShape};
pub use event::{Encode, Event, EventBuffer, EventSink, ScalarKind, ScalarValue};
pub use slot::{Record, Slot, SlotId, SlotIndex, SlotKind, SlotSpec};
