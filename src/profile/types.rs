//! FIT named types: integer-to-name enum tables (spec §4.C, §4.G.4).
//!
//! Mirrors the shape of the teacher's `messages::message_types`/`field_types`
//! lookup tables (`fit-rs/src/messages.rs`), but keyed as a compile-time
//! `phf::Map` rather than a giant `match` — the perfect-hash static-map
//! idiom `mshroyer-coursepointer`'s `Cargo.toml` pulls in `phf` for, applied
//! here to the "integer lookup into generated data" shape spec.md §9 calls
//! for.
//!
//! This is a representative slice of the FIT SDK's `Types` sheet, not the
//! full vendor table (out of scope per spec.md §1 — the real table is a
//! generated artifact).

use phf::phf_map;

use crate::basetype::BaseType;

/// A named FIT type: a base type plus (for enums) an integer-to-name table.
pub struct TypeDescriptor {
    pub base_type: BaseType,
    pub values: Option<&'static phf::Map<u32, &'static str>>,
}

static FILE_VALUES: phf::Map<u32, &'static str> = phf_map! {
    1u32 => "device",
    2u32 => "settings",
    4u32 => "activity",
    6u32 => "workout",
    31u32 => "course",
    34u32 => "segment",
};

static EVENT_VALUES: phf::Map<u32, &'static str> = phf_map! {
    0u32 => "timer",
    3u32 => "workout",
    4u32 => "workout_step",
    9u32 => "lap",
    23u32 => "activity",
    26u32 => "recovery_hr",
};

static EVENT_TYPE_VALUES: phf::Map<u32, &'static str> = phf_map! {
    0u32 => "start",
    1u32 => "stop",
    2u32 => "consecutive_depreciated",
    3u32 => "marker",
    4u32 => "stop_all",
};

static MANUFACTURER_VALUES: phf::Map<u32, &'static str> = phf_map! {
    1u32 => "garmin",
    255u32 => "dynastream",
    260u32 => "dynastream_oem",
};

static SPORT_VALUES: phf::Map<u32, &'static str> = phf_map! {
    0u32 => "generic",
    1u32 => "running",
    2u32 => "cycling",
    5u32 => "swimming",
};

static ACTIVITY_VALUES: phf::Map<u32, &'static str> = phf_map! {
    0u32 => "manual",
    1u32 => "auto_multi_sport",
};

static DATA_PRESENCE_VALUES: phf::Map<u32, &'static str> = phf_map! {
    0u32 => "speed",
    1u32 => "distance",
};

/// Looks up a named type by its profile name. Returns `None` for anything
/// not in this slice of the catalogue, which callers treat as "pass the
/// integer through unchanged" (spec §4.G.4).
pub fn lookup(name: &str) -> Option<TypeDescriptor> {
    match name {
        "file" => Some(TypeDescriptor { base_type: BaseType::Enum, values: Some(&FILE_VALUES) }),
        "event" => Some(TypeDescriptor { base_type: BaseType::Enum, values: Some(&EVENT_VALUES) }),
        "event_type" => Some(TypeDescriptor { base_type: BaseType::Enum, values: Some(&EVENT_TYPE_VALUES) }),
        "manufacturer" => Some(TypeDescriptor { base_type: BaseType::Uint16, values: Some(&MANUFACTURER_VALUES) }),
        "sport" => Some(TypeDescriptor { base_type: BaseType::Enum, values: Some(&SPORT_VALUES) }),
        "activity" => Some(TypeDescriptor { base_type: BaseType::Enum, values: Some(&ACTIVITY_VALUES) }),
        "data_presence" => Some(TypeDescriptor { base_type: BaseType::Enum, values: Some(&DATA_PRESENCE_VALUES) }),
        // `date_time`/`local_date_time` are named scalar overlays, not enums:
        // no value table, handled by the processor instead (spec §4.G.5).
        "date_time" => Some(TypeDescriptor { base_type: BaseType::Uint32, values: None }),
        "local_date_time" => Some(TypeDescriptor { base_type: BaseType::Uint32, values: None }),
        _ => None,
    }
}

/// Resolves an integer to its enum name for the named type `type_name`.
/// Unknown integers (or an unknown type name) pass through as `None`,
/// leaving the caller to keep the original numeric value (spec §4.G.4).
pub fn resolve_enum(type_name: &str, raw: i64) -> Option<&'static str> {
    let descriptor = lookup(type_name)?;
    let values = descriptor.values?;
    values.get(&(raw as u32)).copied()
}
