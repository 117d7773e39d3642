//! Human-readable bytecode dump.

use std::fmt::Write as _;

use super::{Container, INSTRUCTION_SIZE, Instruction, Segment};

/// Width of eight hex bytes separated by spaces.
const HEX_COLUMN: usize = INSTRUCTION_SIZE * 3 - 1;

/// One disassembled code slot.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct ListingLine {
    pub address: u32,
    pub bytes: String,
    pub text: String,
}

pub fn format_instruction(instr: &Instruction) -> String {
    instr.to_string()
}

fn hex_bytes(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 3);
    for (i, b) in bytes.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        write!(out, "{b:02x}").unwrap();
    }
    out
}

fn printable(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|&b| {
            if b.is_ascii_graphic() || b == b' ' {
                b as char
            } else {
                '.'
            }
        })
        .collect()
}

/// Disassemble the code section. A trailing partial slot is reported as truncated.
pub fn listing(container: &Container) -> Vec<ListingLine> {
    container
        .code
        .chunks(INSTRUCTION_SIZE)
        .enumerate()
        .map(|(i, chunk)| {
            let text = match Instruction::decode_slice(chunk) {
                Some(Ok(instr)) => format_instruction(&instr),
                Some(Err(e)) => format!("<invalid: {e}>"),
                None => "<truncated>".to_owned(),
            };
            ListingLine {
                address: Segment::Code.base() + (i * INSTRUCTION_SIZE) as u32,
                bytes: hex_bytes(chunk),
                text,
            }
        })
        .collect()
}

/// Generate a human-readable dump of a container.
pub fn dump(container: &Container) -> String {
    let mut out = String::new();
    dump_header(&mut out, container);

    if !container.code.is_empty() {
        out.push_str("\n[code]\n");
        for line in listing(container) {
            writeln!(
                out,
                "{:#08x}  {:<width$}  {}",
                line.address,
                line.bytes,
                line.text,
                width = HEX_COLUMN
            )
            .unwrap();
        }
    }

    dump_bytes(&mut out, "rodata", Segment::ReadOnlyData, &container.rodata);
    dump_bytes(&mut out, "data", Segment::Data, &container.data);
    out
}

fn dump_header(out: &mut String, container: &Container) {
    let h = &container.header;
    out.push_str("[header]\n");
    if h.has_valid_magic() {
        out.push_str("magic    BTVM\n");
    } else {
        writeln!(out, "magic    {:#010x} (unexpected)", h.magic).unwrap();
    }
    writeln!(out, "version  {}", h.version).unwrap();
    writeln!(out, "entry    {:#08x}", Segment::Code.base() + h.entry_point).unwrap();
    writeln!(out, "code     {} bytes", h.code_len).unwrap();
    writeln!(out, "rodata   {} bytes", h.rodata_len).unwrap();
    writeln!(out, "data     {} bytes", h.data_len).unwrap();
}

fn dump_bytes(out: &mut String, title: &str, segment: Segment, bytes: &[u8]) {
    if bytes.is_empty() {
        return;
    }

    writeln!(out, "\n[{title}]").unwrap();
    for (i, row) in bytes.chunks(INSTRUCTION_SIZE).enumerate() {
        let address = segment.base() + (i * INSTRUCTION_SIZE) as u32;
        writeln!(
            out,
            "{:#08x}  {:<width$}  {}",
            address,
            hex_bytes(row),
            printable(row),
            width = HEX_COLUMN
        )
        .unwrap();
    }
}
