//! Event grammar shared by encoders and decoders
//!
//! A record's content is described by an ordered stream of structural and
//! value tokens: `StartObject`, `Key`, `Value`, `StartArray`, `EndArray`,
//! `EndObject`. Any concrete wire format that can produce and consume this
//! grammar works with the generated codecs; [`crate::json`] provides a
//! JSON text binding.

use std::fmt;

use crate::error::TypeMismatch;
use crate::slot::SlotKind;

// ── Scalar values ────────────────────────────────────────────────────────────

/// The kind of a scalar value or field, without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarKind {
    /// 32-bit signed integer.
    Int,
    /// 64-bit float.
    Double,
    /// Boolean.
    Bool,
    /// UTF-8 text.
    Text,
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ScalarKind::Int => "int",
            ScalarKind::Double => "double",
            ScalarKind::Bool => "bool",
            ScalarKind::Text => "text",
        };
        write!(f, "{name}")
    }
}

/// A single scalar value carried by a [`Event::Value`] token.
#[derive(Debug, Clone, PartialEq)]
pub enum ScalarValue {
    Int(i32),
    Double(f64),
    Bool(bool),
    Text(String),
}

impl ScalarValue {
    /// The kind tag of this value.
    pub fn kind(&self) -> ScalarKind {
        match self {
            ScalarValue::Int(_) => ScalarKind::Int,
            ScalarValue::Double(_) => ScalarKind::Double,
            ScalarValue::Bool(_) => ScalarKind::Bool,
            ScalarValue::Text(_) => ScalarKind::Text,
        }
    }

    /// Consume as an `i32`, or fail with a [`TypeMismatch`] naming `field`.
    pub fn into_int(self, field: &'static str) -> Result<i32, TypeMismatch> {
        match self {
            ScalarValue::Int(v) => Ok(v),
            other => Err(TypeMismatch::scalar(field, ScalarKind::Int, &other)),
        }
    }

    /// Consume as an `f64`, or fail with a [`TypeMismatch`] naming `field`.
    ///
    /// Integer values widen to `f64`: JSON-shaped wire formats do not
    /// distinguish `7` from `7.0`, so a double field must accept both.
    pub fn into_double(self, field: &'static str) -> Result<f64, TypeMismatch> {
        match self {
            ScalarValue::Double(v) => Ok(v),
            ScalarValue::Int(v) => Ok(f64::from(v)),
            other => Err(TypeMismatch::scalar(field, ScalarKind::Double, &other)),
        }
    }

    /// Consume as a `bool`, or fail with a [`TypeMismatch`] naming `field`.
    pub fn into_bool(self, field: &'static str) -> Result<bool, TypeMismatch> {
        match self {
            ScalarValue::Bool(v) => Ok(v),
            other => Err(TypeMismatch::scalar(field, ScalarKind::Bool, &other)),
        }
    }

    /// Consume as a `String`, or fail with a [`TypeMismatch`] naming `field`.
    pub fn into_text(self, field: &'static str) -> Result<String, TypeMismatch> {
        match self {
            ScalarValue::Text(v) => Ok(v),
            other => Err(TypeMismatch::scalar(field, ScalarKind::Text, &other)),
        }
    }
}

impl From<i32> for ScalarValue {
    fn from(v: i32) -> Self {
        ScalarValue::Int(v)
    }
}

impl From<f64> for ScalarValue {
    fn from(v: f64) -> Self {
        ScalarValue::Double(v)
    }
}

impl From<bool> for ScalarValue {
    fn from(v: bool) -> Self {
        ScalarValue::Bool(v)
    }
}

impl From<String> for ScalarValue {
    fn from(v: String) -> Self {
        ScalarValue::Text(v)
    }
}

impl From<&str> for ScalarValue {
    fn from(v: &str) -> Self {
        ScalarValue::Text(v.to_owned())
    }
}

// ── Events ───────────────────────────────────────────────────────────────────

/// One token of the event grammar.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    StartObject,
    Key(String),
    Value(ScalarValue),
    StartArray,
    EndArray,
    EndObject,
}

impl Event {
    /// Short token name, used in error messages.
    pub fn name(&self) -> &'static str {
        match self {
            Event::StartObject => "StartObject",
            Event::Key(_) => "Key",
            Event::Value(_) => "Value",
            Event::StartArray => "StartArray",
            Event::EndArray => "EndArray",
            Event::EndObject => "EndObject",
        }
    }
}

// ── Sink ─────────────────────────────────────────────────────────────────────

/// Abstract consumer of an event stream.
///
/// All methods are infallible: encoding a fully-constructed record cannot
/// fail, and sinks that buffer in memory have nothing to report.
pub trait EventSink {
    fn start_object(&mut self);
    fn key(&mut self, name: &str);
    fn value(&mut self, value: ScalarValue);
    fn start_array(&mut self);
    fn end_array(&mut self);
    fn end_object(&mut self);
}

/// In-memory [`EventSink`] collecting events into a `Vec`.
#[derive(Debug, Default)]
pub struct EventBuffer {
    events: Vec<Event>,
}

impl EventBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collected events, in emission order.
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn into_events(self) -> Vec<Event> {
        self.events
    }
}

impl EventSink for EventBuffer {
    fn start_object(&mut self) {
        self.events.push(Event::StartObject);
    }

    fn key(&mut self, name: &str) {
        self.events.push(Event::Key(name.to_owned()));
    }

    fn value(&mut self, value: ScalarValue) {
        self.events.push(Event::Value(value));
    }

    fn start_array(&mut self) {
        self.events.push(Event::StartArray);
    }

    fn end_array(&mut self) {
        self.events.push(Event::EndArray);
    }

    fn end_object(&mut self) {
        self.events.push(Event::EndObject);
    }
}

// ── Encode ───────────────────────────────────────────────────────────────────

/// Emits the event sequence describing `self`, in schema declaration order.
///
/// Implementations are generated by `recast-codegen`. The sequence is
/// deterministic: repeated calls on an unchanged value produce identical
/// streams, which golden-file and round-trip tests rely on.
pub trait Encode {
    fn encode<S: EventSink>(&self, sink: &mut S);
}

/// Allow error construction from a scalar expectation without spelling the
/// [`SlotKind`] wrapper at every call site.
impl TypeMismatch {
    pub(crate) fn scalar(field: &'static str, expected: ScalarKind, found: &ScalarValue) -> Self {
        TypeMismatch {
            field,
            expected: SlotKind::Scalar(expected),
            found: crate::error::ValueShape::Scalar(found.kind()),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
