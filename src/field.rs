//! Field expansion: subfields, components, scale/offset, enum resolution.
//! Table lookup by (message, field) drives what to do with the raw bytes,
//! with the table itself carried as data in `profile::messages` rather than
//! literal match arms.

use std::collections::HashMap;

use crate::basetype::BaseValue;
use crate::error::Result;
use crate::message::{Field, FieldValue};
use crate::processor::Processor;
use crate::profile::{self, TypeRef};

/// Tracks the rolling accumulator register components with `accumulate:
/// true` need to reconstruct values that wrap within their narrow bit width.
/// Keyed per (message, destination field) so two different messages'
/// components never share state.
pub struct FieldExpander {
    accumulators: HashMap<(u16, u8), i64>,
}

impl FieldExpander {
    pub fn new() -> Self {
        FieldExpander { accumulators: HashMap::new() }
    }

    /// Expands one decoded raw field into one or more output fields: the
    /// field itself (after subfield override, scale/offset, and enum
    /// resolution) plus any component fields it packs. Component bits are
    /// read from `raw`'s little-endian bit stream (`BaseValue::as_bitstream`).
    ///
    /// `siblings` holds the raw integer value of every field already
    /// decoded earlier in this same message, keyed by field definition
    /// number — subfield selection can only reference a field that precedes
    /// it in the data record.
    pub fn expand(
        &mut self,
        global_message_number: u16,
        message_name: &str,
        field_definition_number: u8,
        raw: BaseValue,
        siblings: &HashMap<u8, i64>,
        processor: &dyn Processor,
    ) -> Result<Vec<Field>> {
        let descriptor = profile::field_descriptor(global_message_number, field_definition_number);

        let base_name = descriptor.map(|d| d.name).unwrap_or("");
        let base_type_ref = descriptor.map(|d| d.type_ref);
        let base_units = descriptor.and_then(|d| d.units);
        let base_scale = descriptor.and_then(|d| d.scale);
        let base_offset = descriptor.and_then(|d| d.offset);
        let base_components = descriptor.map(|d| d.components).unwrap_or(&[]);
        let subfields = descriptor.map(|d| d.subfields).unwrap_or(&[]);

        let selected = subfields.iter().find(|sf| {
            siblings.get(&sf.reference_field).map(|v| sf.reference_values.contains(v)).unwrap_or(false)
        });

        let (name, type_ref, units, scale, offset, components) = match selected {
            Some(sf) => (sf.name, Some(sf.type_ref), sf.units, sf.scale, sf.offset, sf.components),
            None if descriptor.is_some() => {
                (base_name, base_type_ref, base_units, base_scale, base_offset, base_components)
            }
            None => ("", None, None, None, None, &[][..]),
        };

        let resolved_name = if name.is_empty() {
            profile::field_name(global_message_number, field_definition_number)
        } else {
            name.to_string()
        };

        let mut out = Vec::new();

        let bitstream = raw.as_bitstream();
        let mut bit_offset = 0u32;
        for component in components {
            if let Some(value) = self.expand_component(global_message_number, bitstream, bit_offset, component) {
                let component_name = profile::field_name(global_message_number, component.destination_field);
                let value = processor.process_field(message_name, &component_name, value)?;
                out.push(Field {
                    definition_number: component.destination_field,
                    name: component_name,
                    units: component.units.map(str::to_string),
                    value,
                    is_developer_field: false,
                });
            }
            bit_offset += component.bits;
        }

        let value = resolve_scalar(type_ref, scale, offset, &raw);
        let value = match type_ref {
            Some(TypeRef::Named(type_name)) => processor.process_type(type_name, value)?,
            _ => value,
        };
        let value = processor.process_field(message_name, &resolved_name, value)?;

        out.insert(
            0,
            Field {
                definition_number: field_definition_number,
                name: resolved_name,
                units: units.map(str::to_string),
                value,
                is_developer_field: false,
            },
        );
        Ok(out)
    }

    fn expand_component(
        &mut self,
        global_message_number: u16,
        bitstream: Option<u64>,
        bit_offset: u32,
        component: &profile::ComponentDescriptor,
    ) -> Option<FieldValue> {
        let bits_value = bitstream?;
        let mask = if component.bits >= 64 { u64::MAX } else { (1u64 << component.bits) - 1 };
        let part = ((bits_value >> bit_offset) & mask) as i64;

        let value = if component.accumulate {
            let key = (global_message_number, component.destination_field);
            let period = (mask as i64) + 1;
            let accumulated = match self.accumulators.get(&key) {
                Some(&prev) => {
                    let prev_low = prev.rem_euclid(period);
                    if part < prev_low {
                        prev - prev_low + part + period
                    } else {
                        prev - prev_low + part
                    }
                }
                None => part,
            };
            self.accumulators.insert(key, accumulated);
            accumulated
        } else {
            part
        };

        Some(match (component.scale, component.offset) {
            (Some(scale), Some(offset)) => FieldValue::Scaled(value as f64 / scale - offset),
            _ => FieldValue::Base(BaseValue::Sint64(vec![value])),
        })
    }
}

impl Default for FieldExpander {
    fn default() -> Self {
        Self::new()
    }
}

/// Applies scale/offset (or enum resolution, for named enum types) to a raw
/// decoded value. Anything with neither just passes the raw value through.
fn resolve_scalar(type_ref: Option<TypeRef>, scale: Option<f64>, offset: Option<f64>, raw: &BaseValue) -> FieldValue {
    if let (Some(scale), Some(offset)) = (scale, offset) {
        if let Some(v) = raw.as_f64() {
            return FieldValue::Scaled(v / scale - offset);
        }
    }
    if let Some(TypeRef::Named(type_name)) = type_ref {
        if let Some(raw_int) = raw.as_i64() {
            if let Some(name) = profile::types::resolve_enum(type_name, raw_int) {
                return FieldValue::Enum { raw: raw_int, name: Some(name) };
            }
            if profile::types::lookup(type_name).map(|d| d.values.is_some()).unwrap_or(false) {
                return FieldValue::Enum { raw: raw_int, name: None };
            }
        }
    }
    FieldValue::Base(raw.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processor::DefaultProcessor;

    #[test]
    fn expands_named_field_with_scale() {
        let mut expander = FieldExpander::new();
        let siblings = HashMap::new();
        // record/altitude (field 2): scale 5, offset 500.
        let fields = expander
            .expand(20, "record", 2, BaseValue::Uint16(vec![3000]), &siblings, &DefaultProcessor)
            .unwrap();
        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0].name, "altitude");
        match fields[0].value {
            FieldValue::Scaled(v) => assert!((v - 100.0).abs() < 1e-9),
            _ => panic!("expected scaled value"),
        }
    }

    #[test]
    fn unknown_field_falls_back_to_field_n() {
        let mut expander = FieldExpander::new();
        let siblings = HashMap::new();
        let fields = expander
            .expand(9999, "message_9999", 7, BaseValue::Uint8(vec![1]), &siblings, &DefaultProcessor)
            .unwrap();
        assert_eq!(fields[0].name, "field_7");
    }

    #[test]
    fn component_expansion_splits_compressed_speed_distance() {
        let mut expander = FieldExpander::new();
        let siblings = HashMap::new();
        // speed = 5.0 m/s * 100 = 500 (12 bits); distance packed into next 12 bits.
        let packed: u32 = 500 | (10u32 << 12);
        let bytes = vec![(packed & 0xFF) as u8, ((packed >> 8) & 0xFF) as u8, ((packed >> 16) & 0xFF) as u8];
        let fields = expander
            .expand(20, "record", 8, BaseValue::Byte(bytes), &siblings, &DefaultProcessor)
            .unwrap();
        // the packed source field first, then its components in declaration order.
        assert_eq!(fields[0].name, "compressed_speed_distance");
        assert_eq!(fields[1].name, "speed");
        assert_eq!(fields[2].name, "distance");
        match fields[1].value {
            FieldValue::Scaled(v) => assert!((v - 5.0).abs() < 1e-9),
            _ => panic!("expected scaled speed"),
        }
    }
}
