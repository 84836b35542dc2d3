//! Ready-made emission sinks.

use serde::Serialize;
use std::io::Write;

use crate::core::errors::Result;
use crate::core::field::{FieldDescriptor, InstantiationDescription};
use crate::core::traits::EmissionSink;

/// One record of the emission stream, tagged by kind.
#[derive(Debug, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum EmissionRecord<'a> {
    Field(&'a FieldDescriptor),
    Instantiation(&'a InstantiationDescription),
}

/// Writes the emission stream as JSON lines.
pub struct JsonEmitter<W: Write> {
    writer: W,
}

impl<W: Write> JsonEmitter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Flush and recover the underlying writer.
    pub fn into_inner(mut self) -> Result<W> {
        self.writer.flush()?;
        Ok(self.writer)
    }

    fn write_record(&mut self, record: &EmissionRecord<'_>) -> Result<()> {
        serde_json::to_writer(&mut self.writer, record)?;
        self.writer.write_all(b"\n")?;
        Ok(())
    }
}

impl<W: Write> EmissionSink for JsonEmitter<W> {
    fn emit_field(&mut self, field: &FieldDescriptor) -> Result<()> {
        self.write_record(&EmissionRecord::Field(field))
    }

    fn emit_instantiation(&mut self, instantiation: &InstantiationDescription) -> Result<()> {
        self.write_record(&EmissionRecord::Instantiation(instantiation))
    }
}

/// Buffers everything emitted, in discovery order.
#[derive(Debug, Default)]
pub struct CollectingSink {
    pub fields: Vec<FieldDescriptor>,
    pub instantiations: Vec<InstantiationDescription>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl EmissionSink for CollectingSink {
    fn emit_field(&mut self, field: &FieldDescriptor) -> Result<()> {
        self.fields.push(field.clone());
        Ok(())
    }

    fn emit_instantiation(&mut self, instantiation: &InstantiationDescription) -> Result<()> {
        self.instantiations.push(instantiation.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::field::{FieldDescriptor, TypeCategory};

    #[test]
    fn test_json_emitter_writes_tagged_lines() {
        let mut emitter = JsonEmitter::new(Vec::new());
        let mut fdes = FieldDescriptor::new("Ball", false);
        fdes.name = "mass".to_string();
        fdes.set_category(TypeCategory::Double);
        emitter.emit_field(&fdes).unwrap();

        let buffer = emitter.into_inner().unwrap();
        let line = String::from_utf8(buffer).unwrap();
        let value: serde_json::Value = serde_json::from_str(line.trim()).unwrap();
        assert_eq!(value["kind"], "field");
        assert_eq!(value["name"], "mass");
    }
}
