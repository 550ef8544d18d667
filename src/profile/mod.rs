//! Profile tables: global message number / field number → name, type, and
//! scaling metadata (spec §4.C).
//!
//! Split the way the teacher splits message lookup from type lookup in
//! `fit-rs/src/messages.rs` (`get_messagetype` vs `get_fieldtype`), but as
//! two `phf`-backed modules instead of one file of `match` arms.

pub mod messages;
pub mod types;

pub use messages::{ComponentDescriptor, FieldDescriptor, MessageDescriptor, SubfieldDescriptor, TypeRef};
pub use types::TypeDescriptor;

/// A resolved message name: either the profile's name for this global
/// message number, or a synthesized `unknown_<n>` (spec §4.C fallback,
/// spec.md §8 scenario S6).
pub fn message_name(global_message_number: u16) -> String {
    match messages::lookup(global_message_number) {
        Some(descriptor) => descriptor.name.to_string(),
        None => format!("unknown_{}", global_message_number),
    }
}

/// Looks up a field's profile descriptor within a known message. Returns
/// `None` if the message is unknown or the message is known but this field
/// number wasn't in the profile slice kept here — both cases fall back to
/// `field_<n>` with the raw base type (spec §4.C, §4.G).
pub fn field_descriptor(global_message_number: u16, field_definition_number: u8) -> Option<&'static FieldDescriptor> {
    messages::lookup(global_message_number)?.fields.get(&field_definition_number)
}

/// A resolved field name, falling back to `field_<n>` (spec §4.C).
pub fn field_name(global_message_number: u16, field_definition_number: u8) -> String {
    match field_descriptor(global_message_number, field_definition_number) {
        Some(descriptor) => descriptor.name.to_string(),
        None => format!("field_{}", field_definition_number),
    }
}
