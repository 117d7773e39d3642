use bitlang_bytecode::MEMORY_SIZE;

use super::error::RuntimeError;
use super::memory::Memory;

#[test]
fn starts_zeroed() {
    let memory = Memory::new().unwrap();
    assert_eq!(memory.len(), MEMORY_SIZE);
    assert_eq!(memory.read_u32(0).unwrap(), 0);
}

#[test]
fn u32_is_little_endian() {
    let mut memory = Memory::new().unwrap();
    memory.write_u32(0x100, 0x1122_3344).unwrap();

    assert_eq!(memory.read(0x100, 4).unwrap(), [0x44, 0x33, 0x22, 0x11]);
    assert_eq!(memory.read_u8(0x103).unwrap(), 0x11);
}

#[test]
fn access_at_the_last_word() {
    let mut memory = Memory::new().unwrap();
    let last = MEMORY_SIZE as u32 - 4;

    memory.write_u32(last, 7).unwrap();
    assert_eq!(memory.read_u32(last).unwrap(), 7);
    assert!(matches!(
        memory.read_u32(last + 1),
        Err(RuntimeError::MemoryOutOfBounds(addr)) if addr == last + 1
    ));
}

#[test]
fn address_overflow_is_out_of_bounds() {
    let mut memory = Memory::new().unwrap();
    assert!(memory.write_u32(u32::MAX, 1).is_err());
    assert!(memory.read_u8(MEMORY_SIZE as u32).is_err());
}

#[test]
fn c_str_stops_at_nul() {
    let mut memory = Memory::new().unwrap();
    memory.write(0x40, b"hey\0tail").unwrap();

    assert_eq!(memory.c_str(0x40).unwrap(), (&b"hey"[..], true));
}

#[test]
fn c_str_without_terminator() {
    let mut memory = Memory::new().unwrap();
    let at = MEMORY_SIZE as u32 - 2;
    memory.write(at, b"ab").unwrap();

    assert_eq!(memory.c_str(at).unwrap(), (&b"ab"[..], false));
}

#[test]
fn clear_zeroes_everything() {
    let mut memory = Memory::new().unwrap();
    memory.write_u8(9, 1).unwrap();
    memory.clear();
    assert!(memory.as_slice().iter().all(|&b| b == 0));
}
