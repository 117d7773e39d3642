//! Container validation.
//!
//! Checks run in a fixed order and all of them happen before the VM is
//! touched, so a rejected container leaves memory and registers as they were.

use bitlang_bytecode::{Header, Sections, Segment};

use super::error::LoadError;

pub(crate) struct Image<'a> {
    pub header: Header,
    pub sections: Sections<'a>,
}

pub(crate) fn validate(bytes: &[u8]) -> Result<Image<'_>, LoadError> {
    let header = Header::from_bytes(bytes)?;

    if !header.has_valid_magic() {
        tracing::warn!(magic = header.magic, "unexpected magic number, loading anyway");
    }
    if !header.is_supported_version() {
        return Err(LoadError::UnsupportedVersion(header.version));
    }
    if header.code_len == 0 {
        return Err(LoadError::EmptyCode);
    }
    if header.code_len > Segment::Code.size() {
        return Err(LoadError::CodeTooLarge {
            len: header.code_len,
            capacity: Segment::Code.size(),
        });
    }
    if header.data_len > Segment::Data.size() {
        return Err(LoadError::DataTooLarge {
            len: header.data_len,
            capacity: Segment::Data.size(),
        });
    }
    if header.rodata_len > Segment::ReadOnlyData.size() {
        return Err(LoadError::RodataTooLarge {
            len: header.rodata_len,
            capacity: Segment::ReadOnlyData.size(),
        });
    }

    let sections = Sections::split(&header, bytes)?;
    Ok(Image { header, sections })
}
