//! JSON text binding for the event grammar
//!
//! The codec core is wire-independent; this module supplies the one concrete
//! byte format records travel over in practice. [`JsonSink`] renders events
//! to compact JSON text, [`json_to_events`] parses JSON text back into the
//! event grammar.

use thiserror::Error;

use crate::event::{Event, EventSink, ScalarValue};

// ── Sink ─────────────────────────────────────────────────────────────────────

/// [`EventSink`] writing compact JSON text.
///
/// Infallible like every sink; the one JSON-unrepresentable input — a
/// non-finite double — is rendered as `null`.
#[derive(Debug, Default)]
pub struct JsonSink {
    out: String,
    obj_needs_comma: bool,
    in_array: bool,
    arr_needs_comma: bool,
}

impl JsonSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// The rendered JSON document.
    pub fn into_string(self) -> String {
        self.out
    }

    fn push_scalar(&mut self, value: ScalarValue) {
        match value {
            ScalarValue::Int(v) => self.out.push_str(&v.to_string()),
            ScalarValue::Double(v) => match serde_json::Number::from_f64(v) {
                Some(n) => self.out.push_str(&n.to_string()),
                None => self.out.push_str("null"),
            },
            ScalarValue::Bool(v) => self.out.push_str(if v { "true" } else { "false" }),
            // Display on Value produces a correctly escaped JSON string.
            ScalarValue::Text(v) => self.out.push_str(&serde_json::Value::String(v).to_string()),
        }
    }
}

impl EventSink for JsonSink {
    fn start_object(&mut self) {
        self.out.push('{');
        self.obj_needs_comma = false;
    }

    fn key(&mut self, name: &str) {
        if self.obj_needs_comma {
            self.out.push(',');
        }
        self.out
            .push_str(&serde_json::Value::String(name.to_owned()).to_string());
        self.out.push(':');
        self.obj_needs_comma = true;
    }

    fn value(&mut self, value: ScalarValue) {
        if self.in_array {
            if self.arr_needs_comma {
                self.out.push(',');
            }
            self.arr_needs_comma = true;
        }
        self.push_scalar(value);
    }

    fn start_array(&mut self) {
        self.out.push('[');
        self.in_array = true;
        self.arr_needs_comma = false;
    }

    fn end_array(&mut self) {
        self.out.push(']');
        self.in_array = false;
    }

    fn end_object(&mut self) {
        self.out.push('}');
    }
}

// ── Parsing ──────────────────────────────────────────────────────────────────

/// JSON text could not be flattened into the event grammar.
#[derive(Debug, Error)]
pub enum JsonEventError {
    #[error("invalid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("top-level JSON value must be an object")]
    NotAnObject,

    #[error("unsupported JSON value under key '{key}': {reason}")]
    Unsupported { key: String, reason: &'static str },
}

/// Parse a JSON document into the event sequence its object shape implies.
///
/// Numbers that are integral and fit `i32` become [`ScalarValue::Int`],
/// everything else numeric becomes [`ScalarValue::Double`]. `null`, nested
/// objects, and nested arrays are outside the supported record shape.
pub fn json_to_events(text: &str) -> Result<Vec<Event>, JsonEventError> {
    let value: serde_json::Value = serde_json::from_str(text)?;
    let map = value.as_object().ok_or(JsonEventError::NotAnObject)?;

    let mut events = Vec::with_capacity(map.len() * 2 + 2);
    events.push(Event::StartObject);
    for (key, value) in map {
        events.push(Event::Key(key.clone()));
        match value {
            serde_json::Value::Array(items) => {
                events.push(Event::StartArray);
                for item in items {
                    events.push(Event::Value(scalar_of(item, key)?));
                }
                events.push(Event::EndArray);
            }
            other => events.push(Event::Value(scalar_of(other, key)?)),
        }
    }
    events.push(Event::EndObject);
    Ok(events)
}

fn scalar_of(value: &serde_json::Value, key: &str) -> Result<ScalarValue, JsonEventError> {
    match value {
        serde_json::Value::Bool(b) => Ok(ScalarValue::Bool(*b)),
        serde_json::Value::String(s) => Ok(ScalarValue::Text(s.clone())),
        serde_json::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                if let Ok(small) = i32::try_from(i) {
                    return Ok(ScalarValue::Int(small));
                }
            }
            match n.as_f64() {
                Some(f) => Ok(ScalarValue::Double(f)),
                None => Err(JsonEventError::Unsupported {
                    key: key.to_owned(),
                    reason: "number out of range",
                }),
            }
        }
        serde_json::Value::Null => Err(JsonEventError::Unsupported {
            key: key.to_owned(),
            reason: "null values are not supported",
        }),
        serde_json::Value::Array(_) => Err(JsonEventError::Unsupported {
            key: key.to_owned(),
            reason: "sequences nest at most one level",
        }),
        serde_json::Value::Object(_) => Err(JsonEventError::Unsupported {
            key: key.to_owned(),
            reason: "nested objects are not supported",
        }),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decoder::decode_events;
    use crate::event::{Encode, ScalarValue};
    use crate::testutil::Point;

    fn sample() -> Point {
        Point {
            x: 3,
            y: -1,
            tags: vec!["a".to_owned(), "b".to_owned()],
        }
    }

    #[test]
    fn sink_renders_compact_json() {
        let mut sink = JsonSink::new();
        sample().encode(&mut sink);
        assert_eq!(sink.into_string(), r#"{"x":3,"y":-1,"tags":["a","b"]}"#);
    }

    #[test]
    fn sink_escapes_strings() {
        let mut sink = JsonSink::new();
        Point {
            x: 0,
            y: 0,
            tags: vec!["say \"hi\"\n".to_owned()],
        }
        .encode(&mut sink);
        let text = sink.into_string();
        assert!(text.contains(r#""say \"hi\"\n""#), "bad escaping: {text}");
        // Still valid JSON.
        assert!(json_to_events(&text).is_ok());
    }

    #[test]
    fn empty_array_renders_without_comma() {
        let mut sink = JsonSink::new();
        Point {
            x: 1,
            y: 2,
            tags: vec![],
        }
        .encode(&mut sink);
        assert_eq!(sink.into_string(), r#"{"x":1,"y":2,"tags":[]}"#);
    }

    #[test]
    fn json_round_trip() {
        let original = sample();
        let mut sink = JsonSink::new();
        original.encode(&mut sink);
        let events = json_to_events(&sink.into_string()).unwrap();
        let decoded: Point = decode_events(events).unwrap();
        assert_eq!(original, decoded);
    }

    #[test]
    fn parse_produces_reference_sequence() {
        let events = json_to_events(r#"{"x":3,"tags":["a"]}"#).unwrap();
        assert_eq!(
            events,
            vec![
                Event::StartObject,
                Event::Key("x".to_owned()),
                Event::Value(ScalarValue::Int(3)),
                Event::Key("tags".to_owned()),
                Event::StartArray,
                Event::Value(ScalarValue::from("a")),
                Event::EndArray,
                Event::EndObject,
            ]
        );
    }

    #[test]
    fn integral_numbers_become_int_others_double() {
        let events = json_to_events(r#"{"a":7,"b":7.5,"c":9999999999}"#).unwrap();
        let values: Vec<_> = events
            .iter()
            .filter_map(|e| match e {
                Event::Value(v) => Some(v.clone()),
                _ => None,
            })
            .collect();
        assert_eq!(
            values,
            vec![
                ScalarValue::Int(7),
                ScalarValue::Double(7.5),
                ScalarValue::Double(9999999999.0),
            ]
        );
    }

    #[test]
    fn top_level_array_rejected() {
        assert!(matches!(
            json_to_events("[1,2]"),
            Err(JsonEventError::NotAnObject)
        ));
    }

    #[test]
    fn null_rejected() {
        assert!(matches!(
            json_to_events(r#"{"a":null}"#),
            Err(JsonEventError::Unsupported { .. })
        ));
    }

    #[test]
    fn nested_array_rejected() {
        assert!(matches!(
            json_to_events(r#"{"a":[[1]]}"#),
            Err(JsonEventError::Unsupported { .. })
        ));
    }

    #[test]
    fn invalid_json_rejected() {
        assert!(matches!(
            json_to_events("{oops"),
            Err(JsonEventError::Parse(_))
        ));
    }
}
