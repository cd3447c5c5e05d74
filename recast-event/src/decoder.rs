//! Decoder state machine
//!
//! Consumes an event stream and reconstructs a record, routing each scalar
//! event to the correct storage location through the [`SlotIndex`]. The
//! machine deliberately carries no parse stack: objects are never nested and
//! sequences are capped at one level, so the whole state is one [`Cursor`]
//! variant. A `Key` event binds a pending slot which exactly one following
//! scalar value or `StartArray` consumes; a second `Key` while one is
//! pending is an error rather than a silent rebind.
//!
//! Unknown keys are tolerated by default: the key's value — scalar or an
//! arbitrarily nested compound — is skipped with a warning, so wire data
//! carrying extra fields still decodes. [`DecoderConfig::strict_keys`] turns
//! this into a hard [`DecodeError::UnknownKey`].

use crate::error::{DecodeError, TypeMismatch, ValueShape};
use crate::event::Event;
use crate::slot::{Record, Slot, SlotIndex, SlotKind};

// ── Configuration ────────────────────────────────────────────────────────────

/// Decode policy knobs.
#[derive(Debug, Clone, Copy, Default)]
pub struct DecoderConfig {
    /// Fail with [`DecodeError::UnknownKey`] instead of skipping unknown
    /// keys. Off by default to support forward-compatible wire data.
    pub strict_keys: bool,
}

// ── Cursor ───────────────────────────────────────────────────────────────────

/// Transient decode state: where the next value event should be written.
#[derive(Debug, Clone, Copy)]
enum Cursor {
    /// No pending slot, no open sequence.
    Idle,
    /// A key bound this slot; exactly one scalar value or `StartArray` must
    /// follow.
    AwaitingValue(Slot),
    /// A sequence slot is open for appends until `EndArray`.
    InSequence(Slot),
    /// An unknown key's scalar value is about to be discarded.
    SkippingValue,
    /// Inside an unknown key's compound value; `depth` counts unmatched
    /// `StartArray`/`StartObject` tokens.
    SkippingCompound { depth: u32 },
}

// ── Decoder ──────────────────────────────────────────────────────────────────

/// Event-driven decoder populating one record instance.
///
/// Construction builds a fresh [`SlotIndex`] for the target instance; the
/// index and cursor live exactly as long as the decode. One decoder decodes
/// one record — feeding it a second object is an error.
pub struct Decoder<'a, R: Record> {
    record: &'a mut R,
    index: SlotIndex,
    cursor: Cursor,
    started: bool,
    complete: bool,
    config: DecoderConfig,
}

impl<'a, R: Record> Decoder<'a, R> {
    pub fn new(record: &'a mut R) -> Self {
        Self::with_config(record, DecoderConfig::default())
    }

    pub fn with_config(record: &'a mut R, config: DecoderConfig) -> Self {
        Decoder {
            record,
            index: SlotIndex::for_record::<R>(),
            cursor: Cursor::Idle,
            started: false,
            complete: false,
            config,
        }
    }

    /// `true` once `EndObject` has closed the record.
    pub fn is_complete(&self) -> bool {
        self.complete
    }

    /// Consume one event. A fatal error aborts the decode; the record's
    /// contents are then unspecified and no partial-record recovery is
    /// attempted.
    pub fn feed(&mut self, event: Event) -> Result<(), DecodeError> {
        if self.complete {
            return Err(DecodeError::UnexpectedEvent {
                event: event.name(),
            });
        }
        // Nothing is in object context until StartObject opens the record.
        if !self.started && !matches!(event, Event::StartObject) {
            return Err(DecodeError::UnexpectedEvent {
                event: event.name(),
            });
        }

        match event {
            Event::StartObject => self.on_start_object(),
            Event::Key(key) => self.on_key(key),
            Event::Value(value) => self.on_value(value),
            Event::StartArray => self.on_start_array(),
            Event::EndArray => self.on_end_array(),
            Event::EndObject => self.on_end_object(),
        }
    }

    /// Finish the decode, failing with [`DecodeError::Truncated`] if the
    /// stream ended before the record was closed.
    pub fn finish(self) -> Result<(), DecodeError> {
        if self.complete {
            Ok(())
        } else {
            Err(DecodeError::Truncated)
        }
    }

    // ── Transitions ──────────────────────────────────────────────────────────

    fn on_start_object(&mut self) -> Result<(), DecodeError> {
        if !self.started {
            self.started = true;
            return Ok(());
        }
        match self.cursor {
            // Unknown key carrying an object value: swallow it whole.
            Cursor::SkippingValue => {
                self.cursor = Cursor::SkippingCompound { depth: 1 };
                Ok(())
            }
            Cursor::SkippingCompound { depth } => {
                self.cursor = Cursor::SkippingCompound { depth: depth + 1 };
                Ok(())
            }
            _ => Err(DecodeError::NestedObject),
        }
    }

    fn on_key(&mut self, key: String) -> Result<(), DecodeError> {
        match self.cursor {
            Cursor::Idle => match self.index.lookup(&key) {
                Some(slot) => {
                    self.cursor = Cursor::AwaitingValue(slot);
                    Ok(())
                }
                None if self.config.strict_keys => Err(DecodeError::UnknownKey { key }),
                None => {
                    tracing::warn!(key = %key, "skipping unknown key");
                    self.cursor = Cursor::SkippingValue;
                    Ok(())
                }
            },
            Cursor::AwaitingValue(_) | Cursor::SkippingValue => {
                Err(DecodeError::DanglingKey { key })
            }
            Cursor::InSequence(_) => Err(DecodeError::UnexpectedEvent { event: "Key" }),
            Cursor::SkippingCompound { .. } => Ok(()),
        }
    }

    fn on_value(&mut self, value: crate::event::ScalarValue) -> Result<(), DecodeError> {
        match self.cursor {
            Cursor::AwaitingValue(slot) => match slot.kind {
                SlotKind::Scalar(_) => {
                    self.record.write_scalar(slot, value)?;
                    self.cursor = Cursor::Idle;
                    Ok(())
                }
                // A bare scalar where the field expects a sequence.
                SlotKind::Sequence(_) => Err(TypeMismatch {
                    field: slot.name,
                    expected: slot.kind,
                    found: ValueShape::Scalar(value.kind()),
                }
                .into()),
            },
            Cursor::InSequence(slot) => {
                self.record.append_scalar(slot, value)?;
                Ok(())
            }
            Cursor::SkippingValue => {
                self.cursor = Cursor::Idle;
                Ok(())
            }
            Cursor::SkippingCompound { .. } => Ok(()),
            Cursor::Idle => Err(DecodeError::UnexpectedValue),
        }
    }

    fn on_start_array(&mut self) -> Result<(), DecodeError> {
        match self.cursor {
            Cursor::AwaitingValue(slot) => match slot.kind {
                SlotKind::Sequence(_) => {
                    self.record.begin_sequence(slot);
                    self.cursor = Cursor::InSequence(slot);
                    Ok(())
                }
                SlotKind::Scalar(_) => Err(TypeMismatch {
                    field: slot.name,
                    expected: slot.kind,
                    found: ValueShape::Sequence,
                }
                .into()),
            },
            Cursor::SkippingValue => {
                self.cursor = Cursor::SkippingCompound { depth: 1 };
                Ok(())
            }
            Cursor::SkippingCompound { depth } => {
                self.cursor = Cursor::SkippingCompound { depth: depth + 1 };
                Ok(())
            }
            // One nesting level only: an array inside an open sequence is as
            // unbound as one with no key at all.
            Cursor::Idle | Cursor::InSequence(_) => Err(DecodeError::UnboundArrayStart),
        }
    }

    fn on_end_array(&mut self) -> Result<(), DecodeError> {
        match self.cursor {
            Cursor::InSequence(_) => {
                self.cursor = Cursor::Idle;
                Ok(())
            }
            Cursor::SkippingCompound { depth } => {
                self.cursor = if depth <= 1 {
                    Cursor::Idle
                } else {
                    Cursor::SkippingCompound { depth: depth - 1 }
                };
                Ok(())
            }
            _ => Err(DecodeError::UnexpectedEvent { event: "EndArray" }),
        }
    }

    fn on_end_object(&mut self) -> Result<(), DecodeError> {
        match self.cursor {
            Cursor::Idle if self.started => {
                self.complete = true;
                Ok(())
            }
            Cursor::SkippingCompound { depth } => {
                self.cursor = if depth <= 1 {
                    Cursor::Idle
                } else {
                    Cursor::SkippingCompound { depth: depth - 1 }
                };
                Ok(())
            }
            _ => Err(DecodeError::UnexpectedEvent { event: "EndObject" }),
        }
    }
}

/// Decode a complete event stream into a fresh `R`.
pub fn decode_events<R, I>(events: I) -> Result<R, DecodeError>
where
    R: Record + Default,
    I: IntoIterator<Item = Event>,
{
    let mut record = R::default();
    let mut decoder = Decoder::new(&mut record);
    for event in events {
        decoder.feed(event)?;
    }
    decoder.finish()?;
    Ok(record)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
