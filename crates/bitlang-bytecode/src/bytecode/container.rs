//! Whole bytecode container: header followed by code, rodata and data.

use super::{HEADER_SIZE, Header, INSTRUCTION_SIZE, Instruction, instructions::DecodeError};

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ContainerError {
    #[error("container truncated: expected at least {expected} bytes, found {found}")]
    Truncated { expected: usize, found: usize },
}

/// Borrowed views of the three sections that follow the header.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Sections<'a> {
    pub code: &'a [u8],
    pub rodata: &'a [u8],
    pub data: &'a [u8],
}

impl<'a> Sections<'a> {
    /// Split `bytes` (the full container, header included) per `header`.
    pub fn split(header: &Header, bytes: &'a [u8]) -> Result<Self, ContainerError> {
        let expected = HEADER_SIZE as u64 + header.payload_len();
        if (bytes.len() as u64) < expected {
            return Err(ContainerError::Truncated {
                expected: usize::try_from(expected).unwrap_or(usize::MAX),
                found: bytes.len(),
            });
        }

        let code_end = HEADER_SIZE + header.code_len as usize;
        let rodata_end = code_end + header.rodata_len as usize;
        let data_end = rodata_end + header.data_len as usize;

        Ok(Self {
            code: &bytes[HEADER_SIZE..code_end],
            rodata: &bytes[code_end..rodata_end],
            data: &bytes[rodata_end..data_end],
        })
    }
}

/// An owned container, as produced by the assembler.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Container {
    pub header: Header,
    pub code: Vec<u8>,
    pub rodata: Vec<u8>,
    pub data: Vec<u8>,
}

impl Container {
    /// Build a container; header lengths are taken from the sections.
    pub fn new(code: Vec<u8>, rodata: Vec<u8>, data: Vec<u8>, entry_point: u32) -> Self {
        let header = Header {
            code_len: code.len() as u32,
            entry_point,
            rodata_len: rodata.len() as u32,
            data_len: data.len() as u32,
            ..Header::default()
        };
        Self {
            header,
            code,
            rodata,
            data,
        }
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ContainerError> {
        let header = Header::from_bytes(bytes)?;
        let sections = Sections::split(&header, bytes)?;
        Ok(Self {
            header,
            code: sections.code.to_vec(),
            rodata: sections.rodata.to_vec(),
            data: sections.data.to_vec(),
        })
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out =
            Vec::with_capacity(HEADER_SIZE + self.code.len() + self.rodata.len() + self.data.len());
        out.extend_from_slice(&self.header.to_bytes());
        out.extend_from_slice(&self.code);
        out.extend_from_slice(&self.rodata);
        out.extend_from_slice(&self.data);
        out
    }

    pub fn instruction_count(&self) -> usize {
        self.code.len() / INSTRUCTION_SIZE
    }

    /// Decode every full 8-byte slot of the code section, with its offset.
    pub fn instructions(
        &self,
    ) -> impl Iterator<Item = (u32, Result<Instruction, DecodeError>)> + '_ {
        self.code
            .chunks_exact(INSTRUCTION_SIZE)
            .enumerate()
            .filter_map(|(i, chunk)| {
                let decoded = Instruction::decode_slice(chunk)?;
                Some(((i * INSTRUCTION_SIZE) as u32, decoded))
            })
    }
}
