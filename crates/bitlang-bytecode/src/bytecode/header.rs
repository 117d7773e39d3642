//! Container header (22 bytes, little-endian, unpadded).
//!
//! | Offset | Field       | Type |
//! |--------|-------------|------|
//! | 0      | magic       | u32  |
//! | 4      | version     | u16  |
//! | 6      | code_len    | u32  |
//! | 10     | entry_point | u32  |
//! | 14     | rodata_len  | u32  |
//! | 18     | data_len    | u32  |

use super::container::ContainerError;
use super::{HEADER_SIZE, MAGIC, VERSION};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Header {
    pub magic: u32,
    pub version: u16,
    /// Code section length in bytes.
    pub code_len: u32,
    /// Entry offset from the code segment base.
    pub entry_point: u32,
    pub rodata_len: u32,
    pub data_len: u32,
}

impl Default for Header {
    fn default() -> Self {
        Self {
            magic: MAGIC,
            version: VERSION,
            code_len: 0,
            entry_point: 0,
            rodata_len: 0,
            data_len: 0,
        }
    }
}

impl Header {
    /// Decode the header from the start of `bytes`.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ContainerError> {
        if bytes.len() < HEADER_SIZE {
            return Err(ContainerError::Truncated {
                expected: HEADER_SIZE,
                found: bytes.len(),
            });
        }

        let u32_at = |at: usize| {
            u32::from_le_bytes([bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]])
        };

        Ok(Self {
            magic: u32_at(0),
            version: u16::from_le_bytes([bytes[4], bytes[5]]),
            code_len: u32_at(6),
            entry_point: u32_at(10),
            rodata_len: u32_at(14),
            data_len: u32_at(18),
        })
    }

    pub fn to_bytes(&self) -> [u8; HEADER_SIZE] {
        let mut bytes = [0u8; HEADER_SIZE];
        bytes[0..4].copy_from_slice(&self.magic.to_le_bytes());
        bytes[4..6].copy_from_slice(&self.version.to_le_bytes());
        bytes[6..10].copy_from_slice(&self.code_len.to_le_bytes());
        bytes[10..14].copy_from_slice(&self.entry_point.to_le_bytes());
        bytes[14..18].copy_from_slice(&self.rodata_len.to_le_bytes());
        bytes[18..22].copy_from_slice(&self.data_len.to_le_bytes());
        bytes
    }

    pub fn has_valid_magic(&self) -> bool {
        self.magic == MAGIC
    }

    pub fn is_supported_version(&self) -> bool {
        self.version == VERSION
    }

    /// Bytes that must follow the header.
    pub fn payload_len(&self) -> u64 {
        self.code_len as u64 + self.rodata_len as u64 + self.data_len as u64
    }
}
