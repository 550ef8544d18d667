//! FIT message/field profile tables (spec §4.C).
//!
//! Grounded on the teacher's `get_messagetype`/`get_fieldtype` match
//! statements in `fit-rs/src/messages.rs`, expanded to carry the
//! scale/offset/units/subfield/component metadata the teacher's version
//! omits (spec §4.C, §4.G). Kept as a compile-time `phf::Map` rather than a
//! generated source file, per spec.md §9 Design Note 2 — the crate whose
//! `Cargo.toml` pulls in `phf` for exactly this shape is
//! `mshroyer-coursepointer`; nothing in its own source uses the macro, so
//! the `phf_map!` call sites here are built directly against the `phf` docs
//! rather than copied from a usage example.
//!
//! This is a representative slice of the FIT SDK's `Messages` sheet (global
//! message numbers 0, 18, 19, 20, 21, 23, 34, 206, 207), not the full vendor
//! table — out of scope per spec.md §1.

use phf::phf_map;

use crate::basetype::BaseType;

/// Either a plain base type or a named profile overlay (an enum or a scalar
/// type like `date_time`), resolved against `profile::types` (spec §4.G.4).
#[derive(Debug, Clone, Copy)]
pub enum TypeRef {
    Base(BaseType),
    Named(&'static str),
}

#[derive(Debug, Clone, Copy)]
pub struct ComponentDescriptor {
    /// Field number within the same message that receives this component's
    /// decoded value.
    pub destination_field: u8,
    pub bits: u32,
    pub scale: Option<f64>,
    pub offset: Option<f64>,
    pub units: Option<&'static str>,
    /// Whether this component accumulates across rollovers of its bit width
    /// (spec §4.G.3's "rolling high bits" register).
    pub accumulate: bool,
}

#[derive(Debug, Clone, Copy)]
pub struct SubfieldDescriptor {
    pub name: &'static str,
    pub type_ref: TypeRef,
    pub units: Option<&'static str>,
    pub scale: Option<f64>,
    pub offset: Option<f64>,
    /// Field number (within the same message) whose decoded value selects
    /// this subfield.
    pub reference_field: u8,
    /// This subfield applies when the reference field's raw integer value
    /// is one of these (spec §4.G.2: "first matching subfield wins").
    pub reference_values: &'static [i64],
    pub components: &'static [ComponentDescriptor],
}

#[derive(Debug, Clone, Copy)]
pub struct FieldDescriptor {
    pub name: &'static str,
    pub type_ref: TypeRef,
    pub units: Option<&'static str>,
    pub scale: Option<f64>,
    pub offset: Option<f64>,
    pub subfields: &'static [SubfieldDescriptor],
    pub components: &'static [ComponentDescriptor],
}

#[derive(Debug, Clone, Copy)]
pub struct MessageDescriptor {
    pub name: &'static str,
    pub fields: &'static phf::Map<u8, FieldDescriptor>,
}

const fn plain(name: &'static str, type_ref: TypeRef) -> FieldDescriptor {
    FieldDescriptor { name, type_ref, units: None, scale: None, offset: None, subfields: &[], components: &[] }
}

const fn scaled(
    name: &'static str,
    type_ref: TypeRef,
    units: &'static str,
    scale: f64,
    offset: f64,
) -> FieldDescriptor {
    FieldDescriptor {
        name,
        type_ref,
        units: Some(units),
        scale: Some(scale),
        offset: Some(offset),
        subfields: &[],
        components: &[],
    }
}

static FILE_ID_FIELDS: phf::Map<u8, FieldDescriptor> = phf_map! {
    0u8 => plain("type", TypeRef::Named("file")),
    1u8 => plain("manufacturer", TypeRef::Named("manufacturer")),
    2u8 => plain("product", TypeRef::Base(BaseType::Uint16)),
    3u8 => plain("serial_number", TypeRef::Base(BaseType::Uint32z)),
    4u8 => plain("time_created", TypeRef::Named("date_time")),
};

static DEVICE_INFO_FIELDS: phf::Map<u8, FieldDescriptor> = phf_map! {
    0u8 => plain("device_index", TypeRef::Base(BaseType::Uint8)),
    1u8 => plain("device_type", TypeRef::Base(BaseType::Uint8)),
    2u8 => plain("manufacturer", TypeRef::Named("manufacturer")),
    253u8 => plain("timestamp", TypeRef::Named("date_time")),
};

static EVENT_DATA_SUBFIELDS: &[SubfieldDescriptor] = &[SubfieldDescriptor {
    name: "timer_trigger",
    type_ref: TypeRef::Base(BaseType::Uint8),
    units: None,
    scale: None,
    offset: None,
    reference_field: 0,
    reference_values: &[0],
    components: &[],
}];

static EVENT_FIELDS: phf::Map<u8, FieldDescriptor> = phf_map! {
    0u8 => plain("event", TypeRef::Named("event")),
    1u8 => plain("event_type", TypeRef::Named("event_type")),
    3u8 => FieldDescriptor {
        name: "data",
        type_ref: TypeRef::Base(BaseType::Uint32),
        units: None,
        scale: None,
        offset: None,
        subfields: EVENT_DATA_SUBFIELDS,
        components: &[],
    },
    253u8 => plain("timestamp", TypeRef::Named("date_time")),
};

static COMPRESSED_SPEED_DISTANCE_COMPONENTS: &[ComponentDescriptor] = &[
    ComponentDescriptor {
        destination_field: 6,
        bits: 12,
        scale: Some(100.0),
        offset: Some(0.0),
        units: Some("m/s"),
        accumulate: false,
    },
    ComponentDescriptor {
        destination_field: 5,
        bits: 12,
        scale: Some(16.0),
        offset: Some(0.0),
        units: Some("m"),
        accumulate: true,
    },
];

static RECORD_FIELDS: phf::Map<u8, FieldDescriptor> = phf_map! {
    0u8 => plain("position_lat", TypeRef::Base(BaseType::Sint32)),
    1u8 => plain("position_long", TypeRef::Base(BaseType::Sint32)),
    2u8 => scaled("altitude", TypeRef::Base(BaseType::Uint16), "m", 5.0, 500.0),
    3u8 => FieldDescriptor {
        name: "heart_rate",
        type_ref: TypeRef::Base(BaseType::Uint8),
        units: Some("bpm"),
        scale: None,
        offset: None,
        subfields: &[],
        components: &[],
    },
    4u8 => plain("cadence", TypeRef::Base(BaseType::Uint8)),
    5u8 => scaled("distance", TypeRef::Base(BaseType::Uint32), "m", 100.0, 0.0),
    6u8 => scaled("speed", TypeRef::Base(BaseType::Uint16), "m/s", 1000.0, 0.0),
    7u8 => plain("power", TypeRef::Base(BaseType::Uint16)),
    8u8 => FieldDescriptor {
        name: "compressed_speed_distance",
        type_ref: TypeRef::Base(BaseType::Byte),
        units: None,
        scale: None,
        offset: None,
        subfields: &[],
        components: COMPRESSED_SPEED_DISTANCE_COMPONENTS,
    },
    253u8 => plain("timestamp", TypeRef::Named("date_time")),
};

static SESSION_FIELDS: phf::Map<u8, FieldDescriptor> = phf_map! {
    0u8 => plain("event", TypeRef::Named("event")),
    1u8 => plain("event_type", TypeRef::Named("event_type")),
    2u8 => plain("start_time", TypeRef::Named("date_time")),
    7u8 => scaled("total_elapsed_time", TypeRef::Base(BaseType::Uint32), "s", 1000.0, 0.0),
    9u8 => scaled("total_distance", TypeRef::Base(BaseType::Uint32), "m", 100.0, 0.0),
    253u8 => plain("timestamp", TypeRef::Named("date_time")),
};

static LAP_FIELDS: phf::Map<u8, FieldDescriptor> = phf_map! {
    0u8 => plain("event", TypeRef::Named("event")),
    1u8 => plain("event_type", TypeRef::Named("event_type")),
    2u8 => plain("start_time", TypeRef::Named("date_time")),
    7u8 => scaled("total_elapsed_time", TypeRef::Base(BaseType::Uint32), "s", 1000.0, 0.0),
    9u8 => scaled("total_distance", TypeRef::Base(BaseType::Uint32), "m", 100.0, 0.0),
    253u8 => plain("timestamp", TypeRef::Named("date_time")),
};

static ACTIVITY_FIELDS: phf::Map<u8, FieldDescriptor> = phf_map! {
    0u8 => scaled("total_timer_time", TypeRef::Base(BaseType::Uint32), "s", 1000.0, 0.0),
    1u8 => plain("num_sessions", TypeRef::Base(BaseType::Uint16)),
    2u8 => plain("type", TypeRef::Named("activity")),
    3u8 => plain("event", TypeRef::Named("event")),
    4u8 => plain("event_type", TypeRef::Named("event_type")),
    253u8 => plain("timestamp", TypeRef::Named("date_time")),
};

static FIELD_DESCRIPTION_FIELDS: phf::Map<u8, FieldDescriptor> = phf_map! {
    0u8 => plain("developer_data_index", TypeRef::Base(BaseType::Uint8)),
    1u8 => plain("field_definition_number", TypeRef::Base(BaseType::Uint8)),
    2u8 => plain("fit_base_type_id", TypeRef::Base(BaseType::Uint8)),
    3u8 => plain("field_name", TypeRef::Base(BaseType::String)),
    8u8 => plain("units", TypeRef::Base(BaseType::String)),
    14u8 => plain("native_field_num", TypeRef::Base(BaseType::Uint8)),
};

static DEVELOPER_DATA_ID_FIELDS: phf::Map<u8, FieldDescriptor> = phf_map! {
    0u8 => plain("application_id", TypeRef::Base(BaseType::Byte)),
    3u8 => plain("developer_data_index", TypeRef::Base(BaseType::Uint8)),
};

/// Global message number of `field_description`, the reserved developer-data
/// schema message (spec §6 "Developer data").
pub const FIELD_DESCRIPTION_MESSAGE_NUMBER: u16 = 206;
/// Global message number of `developer_data_id`, the reserved developer-data
/// application-id message (spec §6 "Developer data").
pub const DEVELOPER_DATA_ID_MESSAGE_NUMBER: u16 = 207;

static MESSAGES: phf::Map<u16, MessageDescriptor> = phf_map! {
    0u16 => MessageDescriptor { name: "file_id", fields: &FILE_ID_FIELDS },
    18u16 => MessageDescriptor { name: "session", fields: &SESSION_FIELDS },
    19u16 => MessageDescriptor { name: "lap", fields: &LAP_FIELDS },
    20u16 => MessageDescriptor { name: "record", fields: &RECORD_FIELDS },
    21u16 => MessageDescriptor { name: "event", fields: &EVENT_FIELDS },
    23u16 => MessageDescriptor { name: "device_info", fields: &DEVICE_INFO_FIELDS },
    34u16 => MessageDescriptor { name: "activity", fields: &ACTIVITY_FIELDS },
    206u16 => MessageDescriptor { name: "field_description", fields: &FIELD_DESCRIPTION_FIELDS },
    207u16 => MessageDescriptor { name: "developer_data_id", fields: &DEVELOPER_DATA_ID_FIELDS },
};

/// Looks up a message by its global message number. `None` means "unknown
/// message" — the caller falls back to a synthetic descriptor synthesized
/// purely from the definition record (spec §4.C: "no entry ⇒ field names
/// fall back to `field_<n>`, base type only").
pub fn lookup(global_message_number: u16) -> Option<&'static MessageDescriptor> {
    MESSAGES.get(&global_message_number)
}
