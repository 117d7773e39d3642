use super::{HEADER_SIZE, Header, MAGIC, VERSION};
use crate::ContainerError;

#[test]
fn header_size() {
    assert_eq!(Header::default().to_bytes().len(), HEADER_SIZE);
}

#[test]
fn header_default() {
    let h = Header::default();
    assert!(h.has_valid_magic());
    assert!(h.is_supported_version());
    assert_eq!(h.version, VERSION);
    assert_eq!(h.payload_len(), 0);
}

#[test]
fn header_roundtrip() {
    let h = Header {
        code_len: 16,
        entry_point: 8,
        rodata_len: 12,
        data_len: 4,
        ..Default::default()
    };

    let bytes = h.to_bytes();
    let decoded = Header::from_bytes(&bytes).unwrap();

    assert_eq!(decoded, h);
    assert_eq!(decoded.payload_len(), 32);
}

#[test]
fn header_field_offsets() {
    let h = Header {
        magic: 0x0403_0201,
        version: 0x0605,
        code_len: 0x0A09_0807,
        entry_point: 0x0E0D_0C0B,
        rodata_len: 0x1211_100F,
        data_len: 0x1615_1413,
    };

    let bytes = h.to_bytes();
    let expected: Vec<u8> = (1..=22).collect();
    assert_eq!(bytes.as_slice(), expected.as_slice());
}

#[test]
fn magic_spells_btvm() {
    assert_eq!(&MAGIC.to_le_bytes(), b"BTVM");
}

#[test]
fn short_input_is_truncated() {
    let bytes = Header::default().to_bytes();
    let err = Header::from_bytes(&bytes[..HEADER_SIZE - 1]).unwrap_err();

    assert_eq!(
        err,
        ContainerError::Truncated {
            expected: HEADER_SIZE,
            found: HEADER_SIZE - 1
        }
    );
}
