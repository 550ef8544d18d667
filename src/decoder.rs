//! Record header/definition/data decoding and the chained-segment state
//! machine: a record header's bit layout selects between a definition
//! record (which updates a local table) and a data record (decoded against
//! whatever definition its local tag currently holds), with compressed
//! timestamps, developer fields resolved via a `field_description` lookup,
//! and CRC verification per segment.

use std::collections::HashMap;

use log::{debug, trace, warn};

use crate::basetype::{self, BaseType, BaseValue};
use crate::error::{Error, Result};
use crate::field::FieldExpander;
use crate::header::FitHeader;
use crate::message::{Field, FieldValue, Message};
use crate::processor::{fit_epoch_to_datetime, Processor};
use crate::profile;
use crate::reader::Reader;

const TIMESTAMP_FIELD_NUMBER: u8 = 253;

/// One field slot in a stored local definition.
#[derive(Debug, Clone)]
struct FieldSlot {
    field_definition_number: u8,
    size: u8,
    base_type: basetype::BaseTypeInfo,
}

/// A developer-field slot: same shape as `FieldSlot`, but keyed to a
/// `(developer_data_index, field_definition_number)` descriptor resolved at
/// decode time rather than to a statically known base type.
#[derive(Debug, Clone)]
struct DevFieldSlot {
    field_definition_number: u8,
    size: u8,
    developer_data_index: u8,
}

/// A definition record stored under its local tag. Kept as a fixed 16-slot
/// array on the decoder, since a local tag is always a 4-bit value, rather
/// than a dynamic map.
#[derive(Debug, Clone)]
struct LocalDefinition {
    global_message_number: u16,
    big_endian: bool,
    fields: Vec<FieldSlot>,
    dev_fields: Vec<DevFieldSlot>,
    /// Sum of declared field sizes; every data record for this tag must be
    /// exactly this many bytes long.
    record_len: usize,
}

/// A developer field's schema, supplied by the file itself via the
/// `field_description` message.
#[derive(Debug, Clone)]
struct DeveloperFieldDescriptor {
    base_type: basetype::BaseTypeInfo,
    name: String,
    units: Option<String>,
    scale: Option<f64>,
    offset: Option<f64>,
}

/// Caller-supplied knobs for a decode.
pub struct DecodeOptions {
    pub verify_crc: bool,
    pub processor: Box<dyn Processor>,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        DecodeOptions { verify_crc: true, processor: Box::new(crate::processor::DefaultProcessor) }
    }
}

/// Where the FIT bytes come from.
pub enum Source {
    Path(std::path::PathBuf),
    Bytes(Vec<u8>),
    Reader(Box<dyn std::io::Read>),
}

impl Source {
    fn into_bytes(self) -> Result<Vec<u8>> {
        Ok(match self {
            Source::Path(path) => std::fs::read(path)?,
            Source::Bytes(bytes) => bytes,
            Source::Reader(mut r) => {
                let mut buf = Vec::new();
                std::io::Read::read_to_end(&mut r, &mut buf)?;
                buf
            }
        })
    }
}

/// Opens a FIT source and reads its first segment header.
pub fn open(source: Source, options: DecodeOptions) -> Result<Decoder> {
    let data = source.into_bytes()?;
    let mut decoder = Decoder {
        reader: Reader::new(data),
        options,
        local_defs: Default::default(),
        dev_descriptors: HashMap::new(),
        dev_applications: HashMap::new(),
        timestamp_reference: None,
        expander: FieldExpander::new(),
        protocol_version: 0,
        profile_version: 0,
        segment_end: 0,
        done: false,
    };
    decoder.begin_segment()?;
    Ok(decoder)
}

/// An in-progress FIT decode. Owns the byte reader, the 16-slot local
/// definition table, the developer-field index, the compressed-timestamp
/// reference, and the field expander's accumulator state. Not
/// `Clone`/`Sync` — a decode is exclusive, single-threaded state.
pub struct Decoder {
    reader: Reader,
    options: DecodeOptions,
    local_defs: [Option<LocalDefinition>; 16],
    dev_descriptors: HashMap<(u8, u8), DeveloperFieldDescriptor>,
    /// `developer_data_id` → application id bytes, keyed by
    /// developer-data-index (spec §6 "Developer data").
    dev_applications: HashMap<u8, Vec<u8>>,
    timestamp_reference: Option<u32>,
    expander: FieldExpander,
    protocol_version: u8,
    profile_version: u16,
    /// Absolute reader position at which the current segment's data region
    /// ends and its trailing CRC begins.
    segment_end: usize,
    done: bool,
}

impl Decoder {
    pub fn protocol_version(&self) -> u8 {
        self.protocol_version
    }

    pub fn profile_version(&self) -> u16 {
        self.profile_version
    }

    /// The application id declared by the `developer_data_id` message for
    /// `developer_data_index`, if one has been seen yet in the current
    /// segment (spec §6 "Developer data").
    pub fn developer_application_id(&self, developer_data_index: u8) -> Option<&[u8]> {
        self.dev_applications.get(&developer_data_index).map(Vec::as_slice)
    }

    /// Lazy pull-based iterator over decoded messages. Consumes the
    /// decoder; the iterator owns the reader.
    pub fn messages(self) -> Messages {
        Messages { decoder: self }
    }

    /// Eagerly decodes every remaining message.
    pub fn read_all(self) -> Result<Vec<Message>> {
        self.messages().collect()
    }

    /// Reads one segment's file header and transitions into *expect-record*.
    /// A no-op (sets `done`) once the buffer is exhausted.
    fn begin_segment(&mut self) -> Result<()> {
        if self.reader.remaining() == 0 {
            self.done = true;
            return Ok(());
        }
        self.reader.reset_crc();
        let header_size = self.reader.peek_u8().ok_or(Error::TruncatedInput { expected: 1, available: 0 })?;
        if header_size != 12 && header_size != 14 {
            return Err(Error::BadHeaderSize(header_size));
        }
        let header_start = self.reader.position();
        let header_bytes = self.reader.read(header_size as usize)?;
        let header = FitHeader::parse(&header_bytes)?;

        if header_start == 0 {
            self.protocol_version = header.protocol_version;
            self.profile_version = header.profile_version;
        }

        self.segment_end = self.reader.position() + header.data_size as usize;
        debug!(
            "segment at {}: protocol {:#04x}, profile {:#06x}, data_size {}",
            header_start, header.protocol_version, header.profile_version, header.data_size
        );
        Ok(())
    }

    /// Consumes the trailing 2-byte CRC for the current segment, verifies it
    /// (unless disabled), and transitions to the next segment or `done`.
    fn end_segment(&mut self) -> Result<()> {
        let segment_offset = self.segment_end as u64;
        let computed = self.reader.crc();
        let trailer = self.reader.read(2)?;
        let expected = u16::from_le_bytes([trailer[0], trailer[1]]);
        if self.options.verify_crc && expected != computed {
            return Err(Error::CrcMismatch { expected, computed, segment_offset });
        }
        for slot in self.local_defs.iter_mut() {
            *slot = None;
        }
        self.dev_descriptors.clear();
        self.dev_applications.clear();
        self.timestamp_reference = None;
        self.begin_segment()
    }

    /// Decodes the next record, looping past definition records (which
    /// update local state but emit nothing) until a data record produces a
    /// `Message`, a segment boundary is crossed, or the input is exhausted.
    fn next_message(&mut self) -> Option<Result<Message>> {
        loop {
            if self.done {
                return None;
            }
            if self.reader.position() >= self.segment_end {
                if let Err(e) = self.end_segment() {
                    self.done = true;
                    return Some(Err(e));
                }
                continue;
            }

            let header = match self.reader.read_u8() {
                Ok(b) => b,
                Err(e) => {
                    self.done = true;
                    return Some(Err(e));
                }
            };

            if header & 0x80 != 0 {
                // Compressed-timestamp data header.
                let local_tag = (header >> 5) & 0x03;
                let offset = header & 0x1F;
                self.advance_timestamp(offset);
                match self.decode_data_record(local_tag, true) {
                    Ok(Some(message)) => return Some(Ok(message)),
                    Ok(None) => continue,
                    Err(e) => {
                        self.done = true;
                        return Some(Err(e));
                    }
                }
            }

            let is_definition = header & 0x40 != 0;
            let has_dev_fields = header & 0x20 != 0;
            let local_tag = header & 0x0F;

            if is_definition {
                if let Err(e) = self.decode_definition_record(local_tag, has_dev_fields) {
                    self.done = true;
                    return Some(Err(e));
                }
                continue;
            }

            match self.decode_data_record(local_tag, false) {
                Ok(Some(message)) => return Some(Ok(message)),
                Ok(None) => continue,
                Err(e) => {
                    self.done = true;
                    return Some(Err(e));
                }
            }
        }
    }

    /// Reconstructs a compressed-timestamp offset against the rolling
    /// reference.
    fn advance_timestamp(&mut self, offset: u8) {
        let reference = self.timestamp_reference.unwrap_or(0);
        let new = if (offset as u32) >= (reference & 0x1F) {
            (reference & !0x1F) | offset as u32
        } else {
            (reference & !0x1F).wrapping_add(0x20) | offset as u32
        };
        self.timestamp_reference = Some(new);
    }

    fn decode_definition_record(&mut self, local_tag: u8, has_dev_fields: bool) -> Result<()> {
        let _reserved = self.reader.read_u8()?;
        let architecture = self.reader.read_u8()?;
        let big_endian = architecture != 0;
        let global_bytes = self.reader.read(2)?;
        let global_message_number = if big_endian {
            u16::from_be_bytes([global_bytes[0], global_bytes[1]])
        } else {
            u16::from_le_bytes([global_bytes[0], global_bytes[1]])
        };

        let n_fields = self.reader.read_u8()?;
        let mut fields = Vec::with_capacity(n_fields as usize);
        let mut record_len = 0usize;
        for _ in 0..n_fields {
            let triple = self.reader.read(3)?;
            let field_definition_number = triple[0];
            let size = triple[1];
            let base_type = basetype::lookup(triple[2]);
            basetype::check_definition_field(field_definition_number, size, base_type.size)?;
            record_len += size as usize;
            fields.push(FieldSlot { field_definition_number, size, base_type });
        }

        let mut dev_fields = Vec::new();
        if has_dev_fields {
            let n_dev_fields = self.reader.read_u8()?;
            for _ in 0..n_dev_fields {
                let triple = self.reader.read(3)?;
                record_len += triple[1] as usize;
                dev_fields.push(DevFieldSlot {
                    field_definition_number: triple[0],
                    size: triple[1],
                    developer_data_index: triple[2],
                });
            }
        }

        trace!(
            "definition: local_tag={} global={} fields={} dev_fields={} record_len={}",
            local_tag, global_message_number, fields.len(), dev_fields.len(), record_len
        );

        self.local_defs[local_tag as usize] =
            Some(LocalDefinition { global_message_number, big_endian, fields, dev_fields, record_len });
        Ok(())
    }

    /// Decodes one data record against the stored local definition, expands
    /// its fields, and — for `field_description`/`developer_data_id`
    /// messages — updates the developer-field index. Returns `Ok(None)`
    /// only if there is nothing meaningful to emit, which
    /// in practice never happens (every data record yields a message); kept
    /// as `Option` to mirror `next_message`'s control flow.
    fn decode_data_record(&mut self, local_tag: u8, compressed_timestamp: bool) -> Result<Option<Message>> {
        let definition = self.local_defs[local_tag as usize]
            .clone()
            .ok_or(Error::UnknownLocalTag(local_tag))?;

        let record = self.reader.read(definition.record_len)?;
        let mut offset = 0usize;

        let mut raw_fields: Vec<(u8, BaseValue)> = Vec::with_capacity(definition.fields.len());
        let mut siblings: HashMap<u8, i64> = HashMap::new();

        for slot in &definition.fields {
            let size = slot.size as usize;
            let slice = &record[offset..offset + size];
            offset += size;

            let value = decode_field_bytes(slice, &slot.base_type, definition.big_endian)?;
            if let Some(v) = value.as_i64() {
                siblings.insert(slot.field_definition_number, v);
            }
            raw_fields.push((slot.field_definition_number, value));
        }

        let mut dev_raw: Vec<(u8, u8, BaseValue)> = Vec::with_capacity(definition.dev_fields.len());
        for slot in &definition.dev_fields {
            let size = slot.size as usize;
            let slice = &record[offset..offset + size];
            offset += size;

            let descriptor = self.dev_descriptors.get(&(slot.developer_data_index, slot.field_definition_number));
            let value = match descriptor {
                Some(d) => decode_field_bytes(slice, &d.base_type, definition.big_endian)?,
                None => {
                    warn!(
                        "developer field {} (index {}) referenced before its descriptor arrived",
                        slot.field_definition_number, slot.developer_data_index
                    );
                    BaseValue::Raw(slice.to_vec())
                }
            };
            dev_raw.push((slot.developer_data_index, slot.field_definition_number, value));
        }

        if definition.global_message_number == profile::messages::FIELD_DESCRIPTION_MESSAGE_NUMBER {
            if let Some((key, descriptor)) = build_field_description(&raw_fields) {
                self.dev_descriptors.insert(key, descriptor);
            }
        }

        if definition.global_message_number == profile::messages::DEVELOPER_DATA_ID_MESSAGE_NUMBER {
            if let Some((index, application_id)) = build_developer_data_id(&raw_fields) {
                self.dev_applications.insert(index, application_id);
            }
        }

        let message_name = profile::message_name(definition.global_message_number);
        let has_native_timestamp = raw_fields.iter().any(|(n, _)| *n == TIMESTAMP_FIELD_NUMBER);

        let mut fields = Vec::new();
        for (field_definition_number, raw) in raw_fields {
            let expanded = self.expander.expand(
                definition.global_message_number,
                &message_name,
                field_definition_number,
                raw,
                &siblings,
                self.options.processor.as_ref(),
            )?;
            fields.extend(expanded);
        }

        for (dev_index, field_definition_number, raw) in dev_raw {
            let descriptor = self.dev_descriptors.get(&(dev_index, field_definition_number));
            let (name, units, scale, offset) = match descriptor {
                Some(d) => (d.name.clone(), d.units.clone(), d.scale, d.offset),
                None => (format!("developer_field_{}", field_definition_number), None, None, None),
            };
            let value = match (scale, offset) {
                (Some(scale), Some(offset)) => raw.as_f64().map(|v| FieldValue::Scaled(v / scale - offset)).unwrap_or(FieldValue::Base(raw)),
                _ => FieldValue::Base(raw),
            };
            let value = self.options.processor.process_field(&message_name, &name, value)?;
            fields.push(Field { definition_number: field_definition_number, name, units, value, is_developer_field: true });
        }

        if compressed_timestamp && !has_native_timestamp {
            if let Some(reference) = self.timestamp_reference {
                let value = self.options.processor.process_type("date_time", FieldValue::Base(BaseValue::Uint32(vec![reference])))?;
                let value = self.options.processor.process_field(&message_name, "timestamp", value)?;
                fields.push(Field { definition_number: TIMESTAMP_FIELD_NUMBER, name: "timestamp".to_string(), units: None, value, is_developer_field: false });
            }
        } else if let Some(ts) = fields.iter().find(|f| f.definition_number == TIMESTAMP_FIELD_NUMBER) {
            if let Some(seconds) = timestamp_seconds(&ts.value) {
                self.timestamp_reference = Some(seconds);
            }
        }

        let mut message = Message { global_message_number: definition.global_message_number, name: message_name, fields };
        self.options.processor.process_message(&mut message)?;
        let name = message.name.clone();
        self.options.processor.process_message_named(&name, &mut message)?;
        Ok(Some(message))
    }
}

/// Extracts the FIT-epoch seconds backing an already-resolved timestamp
/// field, so a native `timestamp` field updates the compressed-timestamp
/// reference the same way a reconstructed one does.
fn timestamp_seconds(value: &FieldValue) -> Option<u32> {
    match value {
        FieldValue::Timestamp(dt) => {
            let fit_epoch = fit_epoch_to_datetime(0);
            Some((dt.signed_duration_since(fit_epoch).num_seconds()) as u32)
        }
        FieldValue::Base(base) => base.as_i64().map(|v| v as u32),
        _ => None,
    }
}

/// Parses one field's raw byte slice into a `BaseValue`. Falls back to a raw
/// byte blob when the declared size isn't a clean multiple of the base
/// type's size, rather than splitting.
fn decode_field_bytes(slice: &[u8], info: &basetype::BaseTypeInfo, big_endian: bool) -> Result<BaseValue> {
    if info.base_type != BaseType::String
        && !matches!(info.base_type, BaseType::Unknown(_))
        && info.size != 0
        && slice.len() % info.size as usize != 0
    {
        return Ok(BaseValue::Raw(slice.to_vec()));
    }
    basetype::parse(info, slice, big_endian)
}

/// Builds a developer-field descriptor from a decoded `field_description`
/// message's raw fields. Developer fields never carry components, so this
/// only extracts the scalar schema (type, name, units, scale, offset).
fn build_field_description(raw_fields: &[(u8, BaseValue)]) -> Option<((u8, u8), DeveloperFieldDescriptor)> {
    let mut developer_data_index = None;
    let mut field_definition_number = None;
    let mut base_type_code = None;
    let mut name = None;
    let mut units = None;
    let mut scale = None;
    let mut offset = None;

    for (number, value) in raw_fields {
        match *number {
            0 => developer_data_index = value.as_i64().map(|v| v as u8),
            1 => field_definition_number = value.as_i64().map(|v| v as u8),
            2 => base_type_code = value.as_i64().map(|v| v as u8),
            3 => {
                if let BaseValue::String(s) = value {
                    name = Some(s.clone());
                }
            }
            6 => scale = value.as_f64(),
            7 => offset = value.as_f64(),
            8 => {
                if let BaseValue::String(s) = value {
                    units = Some(s.clone());
                }
            }
            _ => {}
        }
    }

    let developer_data_index = developer_data_index?;
    let field_definition_number = field_definition_number?;
    let base_type = basetype::lookup(base_type_code.unwrap_or(0x0D));
    let name = name.unwrap_or_else(|| format!("developer_field_{}", field_definition_number));

    Some((
        (developer_data_index, field_definition_number),
        DeveloperFieldDescriptor { base_type, name, units, scale, offset },
    ))
}

/// Extracts `(developer_data_index, application_id)` from a decoded
/// `developer_data_id` message's raw fields (spec §6 "Developer data").
fn build_developer_data_id(raw_fields: &[(u8, BaseValue)]) -> Option<(u8, Vec<u8>)> {
    let mut application_id = None;
    let mut developer_data_index = None;

    for (number, value) in raw_fields {
        match *number {
            0 => {
                if let BaseValue::Byte(bytes) = value {
                    application_id = Some(bytes.clone());
                }
            }
            3 => developer_data_index = value.as_i64().map(|v| v as u8),
            _ => {}
        }
    }

    Some((developer_data_index?, application_id.unwrap_or_default()))
}

/// Lazy pull-based message sequence. Advancing it drives the underlying
/// reader directly; it owns the reader rather than sharing it.
pub struct Messages {
    decoder: Decoder,
}

impl Messages {
    /// Filters to messages matching `name_or_number`: either the resolved
    /// message name (e.g. `"record"`, or `"unknown_65534"` for an
    /// unrecognized one) or the literal global message number as a decimal
    /// string (e.g. `"20"`), per spec §6's `messages_named(name_or_number)`.
    pub fn named(self, name_or_number: &str) -> impl Iterator<Item = Result<Message>> + '_ {
        let name = name_or_number.to_string();
        let number: Option<u16> = name_or_number.parse().ok();
        self.filter(move |m| match m {
            Ok(msg) => msg.name == name || number == Some(msg.global_message_number),
            Err(_) => true,
        })
    }
}

impl Iterator for Messages {
    type Item = Result<Message>;

    fn next(&mut self) -> Option<Self::Item> {
        self.decoder.next_message()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processor::DefaultProcessor;

    fn definition_record(local_tag: u8, global: u16, fields: &[(u8, u8, u8)]) -> Vec<u8> {
        let mut out = vec![0x40 | local_tag, 0, 0];
        out.extend_from_slice(&global.to_le_bytes());
        out.push(fields.len() as u8);
        for (num, size, base_type) in fields {
            out.extend_from_slice(&[*num, *size, *base_type]);
        }
        out
    }

    fn wrap_segment(mut data: Vec<u8>) -> Vec<u8> {
        let header = [0x0Eu8, 0x10, 0x6B, 0x08, 0, 0, 0, 0, b'.', b'F', b'I', b'T', 0, 0];
        let mut full = header.to_vec();
        full[4..8].copy_from_slice(&(data.len() as u32).to_le_bytes());
        full.extend_from_slice(&data);
        let crc = crate::reader::crc16(&full, 0);
        full.extend_from_slice(&crc.to_le_bytes());
        let header_crc = crate::reader::crc16(&full[..12], 0);
        full[12..14].copy_from_slice(&header_crc.to_le_bytes());
        data.clear();
        full
    }

    #[test]
    fn decodes_one_definition_and_data_record() {
        // record (20): timestamp(253, uint32), heart_rate(3, uint8).
        let mut data = definition_record(0, 20, &[(253, 4, 0x86), (3, 1, 0x02)]);
        data.push(0x00); // data record header, local tag 0
        data.extend_from_slice(&1000u32.to_le_bytes());
        data.push(150);

        let bytes = wrap_segment(data);
        let decoder = open(Source::Bytes(bytes), DecodeOptions { verify_crc: true, processor: Box::new(DefaultProcessor) }).unwrap();
        assert_eq!(decoder.protocol_version(), 0x10);
        assert_eq!(decoder.profile_version(), 0x086B);

        let messages = decoder.read_all().unwrap();
        assert_eq!(messages.len(), 1);
        let message = &messages[0];
        assert_eq!(message.name, "record");
        let hr = message.field("heart_rate").unwrap();
        assert_eq!(hr.units.as_deref(), Some("bpm"));
        match &message.field("timestamp").unwrap().value {
            FieldValue::Timestamp(dt) => assert_eq!(dt.to_rfc3339(), "1989-12-31T00:16:40+00:00"),
            _ => panic!("expected timestamp"),
        }
    }

    #[test]
    fn unknown_local_tag_errors() {
        let data = vec![0x00, 1, 2, 3]; // data record, local tag 0, no prior definition
        let bytes = wrap_segment(data);
        let decoder = open(Source::Bytes(bytes), DecodeOptions { verify_crc: false, processor: Box::new(DefaultProcessor) }).unwrap();
        let result = decoder.read_all();
        assert!(matches!(result, Err(Error::UnknownLocalTag(0))));
    }

    #[test]
    fn crc_mismatch_detected() {
        let mut data = definition_record(0, 20, &[(3, 1, 0x02)]);
        data.push(0x00);
        data.push(150);
        let mut bytes = wrap_segment(data);
        let last = bytes.len() - 1;
        bytes[last] ^= 0xFF;
        let decoder = open(Source::Bytes(bytes.clone()), DecodeOptions { verify_crc: true, processor: Box::new(DefaultProcessor) }).unwrap();
        assert!(matches!(decoder.read_all(), Err(Error::CrcMismatch { .. })));

        let decoder = open(Source::Bytes(bytes), DecodeOptions { verify_crc: false, processor: Box::new(DefaultProcessor) }).unwrap();
        assert!(decoder.read_all().is_ok());
    }

    #[test]
    fn compressed_timestamp_chain_is_monotonic() {
        // Full record carries its own timestamp, seeded to a multiple of 32
        // so the reference's low 5 bits start at zero and the offsets below
        // (each larger than the last) extend it without wrapping. Tag 0 is
        // then redefined without field 253 (as real encoders do) so the
        // subsequent compressed-timestamp records carry only heart_rate,
        // and the timestamp is reconstructed purely from the header offset.
        let mut data = definition_record(0, 20, &[(253, 4, 0x86), (3, 1, 0x02)]);
        data.push(0x00);
        data.extend_from_slice(&1024u32.to_le_bytes());
        data.push(150);
        data.extend_from_slice(&definition_record(0, 20, &[(3, 1, 0x02)]));
        for offset in [5u8, 10, 20] {
            data.push(0x80 | offset); // compressed header, local tag 0
            data.push(150);
        }
        let bytes = wrap_segment(data);
        let decoder = open(Source::Bytes(bytes), DecodeOptions { verify_crc: true, processor: Box::new(DefaultProcessor) }).unwrap();
        let messages = decoder.read_all().unwrap();
        assert_eq!(messages.len(), 4);
        let seconds: Vec<u32> = messages
            .iter()
            .map(|m| match &m.field("timestamp").unwrap().value {
                FieldValue::Timestamp(dt) => (dt.signed_duration_since(fit_epoch_to_datetime(0)).num_seconds()) as u32,
                _ => panic!("expected timestamp"),
            })
            .collect();
        assert_eq!(seconds, vec![1024, 1029, 1034, 1044]);
    }

    #[test]
    fn unknown_message_number_degrades_gracefully() {
        let mut data = definition_record(0, 0xFFFE, &[(7, 1, 0x02)]);
        data.push(0x00);
        data.push(42);
        let bytes = wrap_segment(data);
        let decoder = open(Source::Bytes(bytes), DecodeOptions { verify_crc: true, processor: Box::new(DefaultProcessor) }).unwrap();
        let messages = decoder.read_all().unwrap();
        assert_eq!(messages[0].name, "unknown_65534");
        assert_eq!(messages[0].fields[0].name, "field_7");
    }
}
