//! Bytecode format constants.

/// Magic number: b"BTVM" read as a little-endian u32.
pub const MAGIC: u32 = u32::from_le_bytes(*b"BTVM");

/// The only container version the loader accepts.
pub const VERSION: u16 = 1;

/// Every instruction is exactly 8 bytes.
pub const INSTRUCTION_SIZE: usize = 8;

/// magic(4) + version(2) + code_len(4) + entry(4) + rodata_len(4) + data_len(4).
pub const HEADER_SIZE: usize = 22;

/// Size of the VM memory image (5 MiB).
pub const MEMORY_SIZE: usize = 5 * 1024 * 1024;
