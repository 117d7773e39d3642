//! Static partition of the VM memory image.

use std::fmt;

use super::MEMORY_SIZE;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Segment {
    Code,
    ReadOnlyData,
    Data,
    Heap,
    Stack,
}

impl Segment {
    pub const ALL: [Segment; 5] = [
        Segment::Code,
        Segment::ReadOnlyData,
        Segment::Data,
        Segment::Heap,
        Segment::Stack,
    ];

    pub const fn base(self) -> u32 {
        match self {
            Segment::Code => 0x000000,
            Segment::ReadOnlyData => 0x080000,
            Segment::Data => 0x0C0000,
            Segment::Heap => 0x100000,
            Segment::Stack => 0x4C0000,
        }
    }

    /// One past the last address. The stack is clipped to the memory image.
    pub const fn end(self) -> u32 {
        match self {
            Segment::Code => Segment::ReadOnlyData.base(),
            Segment::ReadOnlyData => Segment::Data.base(),
            Segment::Data => Segment::Heap.base(),
            Segment::Heap => Segment::Stack.base(),
            Segment::Stack => MEMORY_SIZE as u32,
        }
    }

    pub const fn size(self) -> u32 {
        self.end() - self.base()
    }

    pub fn contains(self, addr: u32) -> bool {
        (self.base()..self.end()).contains(&addr)
    }

    /// The segment holding `addr`, if it is inside the image.
    pub fn of(addr: u32) -> Option<Segment> {
        Self::ALL.into_iter().find(|s| s.contains(addr))
    }

    pub fn name(self) -> &'static str {
        match self {
            Segment::Code => "code",
            Segment::ReadOnlyData => "rodata",
            Segment::Data => "data",
            Segment::Heap => "heap",
            Segment::Stack => "stack",
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
