//! FIT file header: the 12- or 14-byte record that opens every segment,
//! including the optional embedded header CRC.

use byteorder::{ByteOrder, LittleEndian};

use crate::error::{Error, Result};
use crate::reader::crc16;

/// The 12- or 14-byte record that opens every FIT segment.
#[derive(Debug, Clone, Copy)]
pub struct FitHeader {
    pub header_size: u8,
    pub protocol_version: u8,
    pub profile_version: u16,
    pub data_size: u32,
    pub signature: [u8; 4],
    /// Present only for the 14-byte header form.
    pub header_crc: Option<u16>,
}

impl FitHeader {
    /// Parses a header from its own bytes (12 or 14 of them — exactly
    /// `data[0]` bytes must be present). Verifies the header CRC when
    /// present and non-zero.
    pub fn parse(data: &[u8]) -> Result<FitHeader> {
        if data.is_empty() {
            return Err(Error::TruncatedInput { expected: 12, available: 0 });
        }
        let header_size = data[0];
        if header_size != 12 && header_size != 14 {
            return Err(Error::BadHeaderSize(header_size));
        }
        if data.len() < header_size as usize {
            return Err(Error::TruncatedInput { expected: header_size as usize, available: data.len() });
        }

        let protocol_version = data[1];
        let profile_version = LittleEndian::read_u16(&data[2..4]);
        let data_size = LittleEndian::read_u32(&data[4..8]);
        let signature = [data[8], data[9], data[10], data[11]];
        if &signature != b".FIT" {
            return Err(Error::BadSignature(signature));
        }

        let header_crc = if header_size == 14 {
            let crc_in_header = LittleEndian::read_u16(&data[12..14]);
            if crc_in_header != 0 {
                let computed = crc16(&data[..12], 0);
                if computed != crc_in_header {
                    return Err(Error::CrcMismatch {
                        expected: crc_in_header,
                        computed,
                        segment_offset: 0,
                    });
                }
            }
            Some(crc_in_header)
        } else {
            None
        };

        Ok(FitHeader {
            header_size,
            protocol_version,
            profile_version,
            data_size,
            signature,
            header_crc,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_minimal_header() {
        // Minimal empty activity, data size 0.
        let data = [0x0Eu8, 0x10, 0x6B, 0x08, 0x00, 0x00, 0x00, 0x00, 0x2E, 0x46, 0x49, 0x54, 0x00, 0x00];
        let header = FitHeader::parse(&data).unwrap();
        assert_eq!(header.header_size, 14);
        assert_eq!(header.protocol_version, 0x10);
        assert_eq!(header.profile_version, 0x086B);
        assert_eq!(header.data_size, 0);
    }

    #[test]
    fn rejects_bad_signature() {
        let mut data = [0x0Cu8, 0x10, 0x6B, 0x08, 0x00, 0x00, 0x00, 0x00, b'X', b'X', b'X', b'X'];
        data[8] = b'X';
        assert!(matches!(FitHeader::parse(&data), Err(Error::BadSignature(_))));
    }

    #[test]
    fn rejects_bad_header_size() {
        let data = [13u8, 0, 0, 0, 0, 0, 0, 0, b'.', b'F', b'I', b'T', 0];
        assert!(matches!(FitHeader::parse(&data), Err(Error::BadHeaderSize(13))));
    }
}
