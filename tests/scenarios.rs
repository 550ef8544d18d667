//! End-to-end scenarios exercising the public decoding surface: a minimal
//! header-only file, a single definition/data record pair, a
//! compressed-timestamp chain, component expansion, CRC verification on and
//! off, and an unrecognized message number (spec.md §8 S1-S6).

use fit_rs::{message::FieldValue, open, DecodeOptions, Error, Source};

fn definition_record(local_tag: u8, global: u16, fields: &[(u8, u8, u8)]) -> Vec<u8> {
    definition_record_with_dev_fields(local_tag, global, fields, &[])
}

fn definition_record_with_dev_fields(
    local_tag: u8,
    global: u16,
    fields: &[(u8, u8, u8)],
    dev_fields: &[(u8, u8, u8)],
) -> Vec<u8> {
    let has_dev_fields = !dev_fields.is_empty();
    let header = 0x40 | local_tag | if has_dev_fields { 0x20 } else { 0 };
    let mut out = vec![header, 0, 0];
    out.extend_from_slice(&global.to_le_bytes());
    out.push(fields.len() as u8);
    for (num, size, base_type) in fields {
        out.extend_from_slice(&[*num, *size, *base_type]);
    }
    if has_dev_fields {
        out.push(dev_fields.len() as u8);
        for (num, size, dev_index) in dev_fields {
            out.extend_from_slice(&[*num, *size, *dev_index]);
        }
    }
    out
}

fn wrap_segment(data: &[u8]) -> Vec<u8> {
    let mut header = vec![0x0Eu8, 0x10, 0x6B, 0x08, 0, 0, 0, 0, b'.', b'F', b'I', b'T', 0, 0];
    header[4..8].copy_from_slice(&(data.len() as u32).to_le_bytes());
    let header_crc = fit_rs::reader::crc16(&header[..12], 0);
    header[12..14].copy_from_slice(&header_crc.to_le_bytes());

    let mut full = header;
    full.extend_from_slice(data);
    let crc = fit_rs::reader::crc16(&full, 0);
    full.extend_from_slice(&crc.to_le_bytes());
    full
}

#[test]
fn s1_minimal_empty_activity_header_only() {
    let bytes = wrap_segment(&[]);
    let decoder = open(Source::Bytes(bytes), DecodeOptions::default()).unwrap();
    assert_eq!(decoder.protocol_version(), 0x10);
    assert_eq!(decoder.profile_version(), 0x086B);
    let messages = decoder.read_all().unwrap();
    assert!(messages.is_empty());
}

#[test]
fn s2_single_record_with_timestamp_and_heart_rate() {
    let mut data = definition_record(0, 20, &[(253, 4, 0x86), (3, 1, 0x02)]);
    data.push(0x00);
    data.extend_from_slice(&1000u32.to_le_bytes());
    data.push(150);

    let bytes = wrap_segment(&data);
    let decoder = open(Source::Bytes(bytes), DecodeOptions::default()).unwrap();
    let messages = decoder.read_all().unwrap();
    assert_eq!(messages.len(), 1);

    let record = &messages[0];
    assert_eq!(record.name, "record");
    let hr = record.field("heart_rate").unwrap();
    assert_eq!(hr.units.as_deref(), Some("bpm"));
    match &hr.value {
        FieldValue::Base(base) => assert_eq!(base.as_i64(), Some(150)),
        _ => panic!("expected a raw heart rate value"),
    }
    match &record.field("timestamp").unwrap().value {
        FieldValue::Timestamp(dt) => assert_eq!(dt.to_rfc3339(), "1989-12-31T00:16:40+00:00"),
        _ => panic!("expected a timestamp"),
    }
}

#[test]
fn s3_compressed_timestamp_chain_reconstructs_monotonically() {
    // Seeded to a multiple of 32 so the reference's low 5 bits start at
    // zero; the offsets below are each larger than the last and so extend
    // the reference without wrapping (see §4.D's wraparound rule).
    let mut data = definition_record(0, 20, &[(253, 4, 0x86), (3, 1, 0x02)]);
    data.push(0x00);
    data.extend_from_slice(&1024u32.to_le_bytes());
    data.push(150);
    data.extend_from_slice(&definition_record(0, 20, &[(3, 1, 0x02)]));
    for offset in [5u8, 10, 20] {
        data.push(0x80 | offset);
        data.push(150);
    }

    let bytes = wrap_segment(&data);
    let decoder = open(Source::Bytes(bytes), DecodeOptions::default()).unwrap();
    let messages = decoder.read_all().unwrap();
    assert_eq!(messages.len(), 4);

    const FIT_EPOCH_UNIX_SECONDS: i64 = 631_065_600;
    let seconds: Vec<i64> = messages
        .iter()
        .map(|m| match &m.field("timestamp").unwrap().value {
            FieldValue::Timestamp(dt) => dt.timestamp() - FIT_EPOCH_UNIX_SECONDS,
            _ => panic!("expected a timestamp"),
        })
        .collect();
    assert_eq!(seconds, vec![1024, 1029, 1034, 1044]);
}

#[test]
fn s4_component_expansion_splits_compressed_speed_distance() {
    // speed = 5.0 m/s (scale 100) packed into the low 12 bits, distance =
    // 160 m (scale 16) packed into the next 12 bits.
    let packed: u32 = 500 | (2560u32 << 12);
    let mut data = definition_record(0, 20, &[(8, 3, 0x0D)]);
    data.push(0x00);
    data.push((packed & 0xFF) as u8);
    data.push(((packed >> 8) & 0xFF) as u8);
    data.push(((packed >> 16) & 0xFF) as u8);

    let bytes = wrap_segment(&data);
    let decoder = open(Source::Bytes(bytes), DecodeOptions::default()).unwrap();
    let messages = decoder.read_all().unwrap();
    let record = &messages[0];

    match record.field("speed").unwrap().value {
        FieldValue::Scaled(v) => assert!((v - 5.0).abs() < 1e-9),
        _ => panic!("expected scaled speed"),
    }
    match record.field("distance").unwrap().value {
        FieldValue::Scaled(v) => assert!((v - 160.0).abs() < 1e-9),
        _ => panic!("expected scaled distance"),
    }
}

#[test]
fn s5_crc_mismatch_honors_verify_crc_flag() {
    let mut data = definition_record(0, 20, &[(3, 1, 0x02)]);
    data.push(0x00);
    data.push(150);
    let mut bytes = wrap_segment(&data);
    let last = bytes.len() - 1;
    bytes[last] ^= 0xFF;

    let decoder = open(Source::Bytes(bytes.clone()), DecodeOptions::default()).unwrap();
    assert!(matches!(decoder.read_all(), Err(Error::CrcMismatch { .. })));

    let lenient = DecodeOptions { verify_crc: false, ..DecodeOptions::default() };
    let decoder = open(Source::Bytes(bytes), lenient).unwrap();
    assert!(decoder.read_all().is_ok());
}

#[test]
fn s6_unknown_message_number_degrades_to_unknown_name() {
    let mut data = definition_record(0, 0xFFFE, &[(7, 1, 0x02)]);
    data.push(0x00);
    data.push(42);

    let bytes = wrap_segment(&data);
    let decoder = open(Source::Bytes(bytes), DecodeOptions::default()).unwrap();
    let messages = decoder.read_all().unwrap();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].name, "unknown_65534");
    assert_eq!(messages[0].fields[0].name, "field_7");
}

#[test]
fn chained_segments_each_verify_independently() {
    let mut data_a = definition_record(0, 20, &[(3, 1, 0x02)]);
    data_a.push(0x00);
    data_a.push(120);
    let mut data_b = definition_record(0, 20, &[(3, 1, 0x02)]);
    data_b.push(0x00);
    data_b.push(180);

    let mut bytes = wrap_segment(&data_a);
    bytes.extend_from_slice(&wrap_segment(&data_b));

    let decoder = open(Source::Bytes(bytes), DecodeOptions::default()).unwrap();
    let messages = decoder.read_all().unwrap();
    assert_eq!(messages.len(), 2);
    let hrs: Vec<i64> = messages
        .iter()
        .map(|m| match &m.field("heart_rate").unwrap().value {
            FieldValue::Base(base) => base.as_i64().unwrap(),
            _ => panic!("expected a raw heart rate value"),
        })
        .collect();
    assert_eq!(hrs, vec![120, 180]);
}

#[test]
fn developer_field_resolved_against_its_field_description() {
    // field_description (206): developer_data_index=0, field_definition_number=0,
    // fit_base_type_id=uint16(0x84), field_name="cadence", units="rpm".
    let mut field_desc_payload = Vec::new();
    field_desc_payload.push(0u8); // developer_data_index
    field_desc_payload.push(0u8); // field_definition_number
    field_desc_payload.push(0x84u8); // fit_base_type_id (uint16)
    field_desc_payload.extend_from_slice(b"cadence\0");
    field_desc_payload.extend_from_slice(b"rpm\0");

    let mut data = definition_record(
        0,
        206,
        &[(0, 1, 0x02), (1, 1, 0x02), (2, 1, 0x02), (3, 8, 0x07), (8, 4, 0x07)],
    );
    data.push(0x00);
    data.extend_from_slice(&field_desc_payload);

    // record (20) with one developer field: local_tag 1, dev field
    // (field_definition_number=0, size=2, developer_data_index=0), no
    // native fields.
    data.extend_from_slice(&definition_record_with_dev_fields(1, 20, &[], &[(0, 2, 0)]));
    data.push(0x01); // data record header, local tag 1
    data.extend_from_slice(&90u16.to_le_bytes());

    let bytes = wrap_segment(&data);
    let decoder = open(Source::Bytes(bytes), DecodeOptions::default()).unwrap();
    let messages = decoder.read_all().unwrap();

    let record = messages.iter().find(|m| m.name == "record").unwrap();
    let cadence = record.fields.iter().find(|f| f.name == "cadence").unwrap();
    assert_eq!(cadence.units.as_deref(), Some("rpm"));
    assert!(cadence.is_developer_field);
}
