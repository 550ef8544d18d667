//! Decoded output types: what a `Decoder` hands back.

use crate::basetype::BaseValue;

/// A field's fully-resolved value, after subfield/component expansion,
/// scale/offset application, and any processor hook.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// Untransformed decoded value: no profile scale/offset applied, and
    /// (if this is an enum-typed field) not resolved to a name.
    Base(BaseValue),
    /// `(raw - offset) / scale` already applied.
    Scaled(f64),
    /// An enum-typed field: the raw integer plus its resolved name, if the
    /// profile's value table had an entry for it.
    Enum { raw: i64, name: Option<&'static str> },
    /// A `date_time`/`local_date_time` field converted to a wall-clock
    /// instant by the active processor.
    Timestamp(chrono::DateTime<chrono::Utc>),
}

/// One decoded field within a message.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub definition_number: u8,
    pub name: String,
    pub units: Option<String>,
    pub value: FieldValue,
    /// `true` for fields introduced by a developer field description rather
    /// than the native profile. Native fields are always ordered before
    /// developer fields in `Message::fields`.
    pub is_developer_field: bool,
}

/// One decoded message: a definition's global message number, its resolved
/// name, and every field present in the data record.
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub global_message_number: u16,
    pub name: String,
    pub fields: Vec<Field>,
}

impl Message {
    /// Looks up a field by its resolved name. Convenience used by tests and
    /// by `Processor` implementations matching on well-known fields.
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }
}
