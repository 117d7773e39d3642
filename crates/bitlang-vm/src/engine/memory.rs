//! The VM memory image.

use bitlang_bytecode::MEMORY_SIZE;

use super::error::RuntimeError;

/// One contiguous, zero-initialized byte array. Every access is
/// bounds-checked and fails with `MemoryOutOfBounds` instead of panicking.
pub struct Memory {
    bytes: Box<[u8]>,
}

impl Memory {
    pub fn new() -> Result<Self, RuntimeError> {
        let mut bytes = Vec::new();
        bytes
            .try_reserve_exact(MEMORY_SIZE)
            .map_err(|_| RuntimeError::MemoryAllocationFailed)?;
        bytes.resize(MEMORY_SIZE, 0);
        Ok(Self {
            bytes: bytes.into_boxed_slice(),
        })
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Zero the whole image.
    pub fn clear(&mut self) {
        self.bytes.fill(0);
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }

    /// Validate `addr` as the start of a `len`-byte access.
    pub fn check(&self, addr: u32, len: usize) -> Result<u32, RuntimeError> {
        let end = (addr as usize).checked_add(len);
        match end {
            Some(end) if end <= self.bytes.len() => Ok(addr),
            _ => Err(RuntimeError::MemoryOutOfBounds(addr)),
        }
    }

    pub fn read(&self, addr: u32, len: usize) -> Result<&[u8], RuntimeError> {
        self.check(addr, len)?;
        let start = addr as usize;
        Ok(&self.bytes[start..start + len])
    }

    pub fn write(&mut self, addr: u32, data: &[u8]) -> Result<(), RuntimeError> {
        self.check(addr, data.len())?;
        let start = addr as usize;
        self.bytes[start..start + data.len()].copy_from_slice(data);
        Ok(())
    }

    pub fn read_u8(&self, addr: u32) -> Result<u8, RuntimeError> {
        Ok(self.read(addr, 1)?[0])
    }

    pub fn write_u8(&mut self, addr: u32, value: u8) -> Result<(), RuntimeError> {
        self.write(addr, &[value])
    }

    /// Little-endian.
    pub fn read_u32(&self, addr: u32) -> Result<u32, RuntimeError> {
        let bytes = self.read(addr, 4)?;
        Ok(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    pub fn write_u32(&mut self, addr: u32, value: u32) -> Result<(), RuntimeError> {
        self.write(addr, &value.to_le_bytes())
    }

    /// Bytes from `addr` up to (not including) the next NUL. The flag is
    /// false when the image ends before a terminator.
    pub fn c_str(&self, addr: u32) -> Result<(&[u8], bool), RuntimeError> {
        self.check(addr, 1)?;
        let tail = &self.bytes[addr as usize..];
        Ok(match tail.iter().position(|&b| b == 0) {
            Some(nul) => (&tail[..nul], true),
            None => (tail, false),
        })
    }
}

impl std::fmt::Debug for Memory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Memory").field("len", &self.len()).finish()
    }
}
