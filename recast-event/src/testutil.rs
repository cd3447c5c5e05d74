//! Hand-written mirror of what `recast-codegen` emits for the `Point`
//! schema, shared by the crate's unit tests.

use crate::error::TypeMismatch;
use crate::event::{Encode, EventSink, ScalarKind, ScalarValue};
use crate::slot::{Record, Slot, SlotSpec};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Point {
    pub x: i32,
    pub y: i32,
    pub tags: Vec<String>,
}

impl Record for Point {
    fn slots() -> &'static [SlotSpec] {
        const SLOTS: &[SlotSpec] = &[
            SlotSpec::scalar("x", ScalarKind::Int),
            SlotSpec::scalar("y", ScalarKind::Int),
            SlotSpec::sequence("tags", ScalarKind::Text),
        ];
        SLOTS
    }

    fn write_scalar(&mut self, slot: Slot, value: ScalarValue) -> Result<(), TypeMismatch> {
        match slot.id.0 {
            0 => self.x = value.into_int("x")?,
            1 => self.y = value.into_int("y")?,
            _ => unreachable!("no scalar slot {}", slot.id.0),
        }
        Ok(())
    }

    fn append_scalar(&mut self, slot: Slot, value: ScalarValue) -> Result<(), TypeMismatch> {
        match slot.id.0 {
            2 => self.tags.push(value.into_text("tags")?),
            _ => unreachable!("no sequence slot {}", slot.id.0),
        }
        Ok(())
    }

    fn begin_sequence(&mut self, slot: Slot) {
        if slot.id.0 == 2 {
            self.tags.clear();
        }
    }
}

impl Encode for Point {
    fn encode<S: EventSink>(&self, sink: &mut S) {
        sink.start_object();
        sink.key("x");
        sink.value(ScalarValue::Int(self.x));
        sink.key("y");
        sink.value(ScalarValue::Int(self.y));
        sink.key("tags");
        sink.start_array();
        for item in &self.tags {
            sink.value(ScalarValue::Text(item.clone()));
        }
        sink.end_array();
        sink.end_object();
    }
}
