//! Virtual machine state and the fetch-decode-execute loop.

use std::io::Write;

use bitlang_bytecode::{INSTRUCTION_SIZE, Instruction, Segment};
use bitlang_core::{Opcode, Register};

use super::error::{Fault, RuntimeError};
use super::loader;
use super::memory::Memory;
use super::trace::{NoopTracer, Tracer};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Flags {
    pub zero: bool,
    pub negative: bool,
    pub carry: bool,
    pub overflow: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VmState {
    Running,
    /// `halt` executed. Terminal.
    Halted,
    /// Stopped on a fatal error. Terminal.
    FatalError,
    /// Stopped on a recoverable error; the host decides what to do next.
    SoftError,
}

/// Builder for VM instances.
#[derive(Clone, Copy, Debug, Default)]
pub struct VmBuilder {
    exec_fuel: Option<u32>,
}

impl VmBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cap the number of executed instructions.
    pub fn exec_fuel(mut self, fuel: u32) -> Self {
        self.exec_fuel = Some(fuel);
        self
    }

    /// Allocate the memory image and reset every register.
    pub fn build(self) -> Result<Vm, RuntimeError> {
        Ok(Vm {
            registers: [0; Register::GENERAL_COUNT],
            pc: Segment::Code.base(),
            sp: Segment::Stack.end(),
            bp: Segment::Stack.end(),
            hp: Segment::Heap.base(),
            flags: Flags::default(),
            memory: Memory::new()?,
            state: VmState::Running,
            code_end: Segment::Code.base(),
            fuel_limit: self.exec_fuel,
            fuel: self.exec_fuel,
            fault: None,
        })
    }
}

/// One VM: register file, flags and the memory image.
#[derive(Debug)]
pub struct Vm {
    pub(crate) registers: [u32; Register::GENERAL_COUNT],
    pub(crate) pc: u32,
    pub(crate) sp: u32,
    pub(crate) bp: u32,
    pub(crate) hp: u32,
    pub(crate) flags: Flags,
    pub(crate) memory: Memory,
    pub(crate) state: VmState,
    /// One past the last loaded code byte.
    code_end: u32,
    fuel_limit: Option<u32>,
    fuel: Option<u32>,
    /// What stopped the VM in an error state.
    fault: Option<Fault>,
}

impl Vm {
    pub fn builder() -> VmBuilder {
        VmBuilder::new()
    }

    pub fn new() -> Result<Self, RuntimeError> {
        VmBuilder::new().build()
    }

    /// Load a serialized container.
    ///
    /// Validation finishes before anything is copied; on error the VM is
    /// unchanged.
    pub fn load(&mut self, bytes: &[u8]) -> Result<(), RuntimeError> {
        let image = loader::validate(bytes)?;
        let sections = image.sections;

        self.memory.clear();
        self.memory.write(Segment::Code.base(), sections.code)?;
        self.memory.write(Segment::ReadOnlyData.base(), sections.rodata)?;
        self.memory.write(Segment::Data.base(), sections.data)?;

        self.registers = [0; Register::GENERAL_COUNT];
        self.flags = Flags::default();
        self.pc = Segment::Code.base().wrapping_add(image.header.entry_point);
        self.sp = Segment::Stack.end();
        self.bp = Segment::Stack.end();
        self.hp = Segment::Heap.base();
        self.code_end = Segment::Code.base() + image.header.code_len;
        self.fuel = self.fuel_limit;
        self.state = VmState::Running;
        self.fault = None;

        tracing::debug!(
            code = sections.code.len(),
            rodata = sections.rodata.len(),
            data = sections.data.len(),
            entry = image.header.entry_point,
            "loaded container"
        );
        Ok(())
    }

    /// Run until `halt` or the first error.
    ///
    /// Uses `NoopTracer`, which compiles away.
    pub fn run<W: Write>(&mut self, out: &mut W) -> Result<(), Fault> {
        self.run_with(out, &mut NoopTracer)
    }

    /// Run with a tracer. A VM that already stopped returns at once: `Ok` if
    /// it halted, the original fault if it failed.
    pub fn run_with<W: Write, T: Tracer>(
        &mut self,
        out: &mut W,
        tracer: &mut T,
    ) -> Result<(), Fault> {
        self.stopped()?;
        while self.state == VmState::Running {
            self.step_with(out, tracer)?;
        }
        out.flush().map_err(|e| Fault {
            error: e.into(),
            pc: self.pc,
        })
    }

    /// Execute one instruction. No-op once halted; after a fault every call
    /// reports that fault again.
    pub fn step<W: Write>(&mut self, out: &mut W) -> Result<(), Fault> {
        self.step_with(out, &mut NoopTracer)
    }

    fn step_with<W: Write, T: Tracer>(
        &mut self,
        out: &mut W,
        tracer: &mut T,
    ) -> Result<(), Fault> {
        self.stopped()?;
        if self.state != VmState::Running {
            return Ok(());
        }

        let pc = self.pc;
        let result = self.consume_fuel().and_then(|()| {
            let instr = self.fetch()?;
            tracer.trace_instruction(pc, &instr);
            self.execute(instr, out)?;
            if instr.opcode == Opcode::Halt {
                tracer.trace_halt(pc);
            }
            Ok(())
        });

        result.map_err(|error| {
            self.state = if error.is_fatal() {
                VmState::FatalError
            } else {
                VmState::SoftError
            };
            let fault = Fault { error, pc };
            tracer.trace_fault(&fault);
            self.fault = Some(fault.clone());
            fault
        })
    }

    fn stopped(&self) -> Result<(), Fault> {
        match &self.fault {
            Some(fault) => Err(fault.clone()),
            None => Ok(()),
        }
    }

    fn consume_fuel(&mut self) -> Result<(), RuntimeError> {
        match (self.fuel, self.fuel_limit) {
            (Some(0), Some(limit)) => Err(RuntimeError::ExecFuelExhausted(limit)),
            (Some(left), _) => {
                self.fuel = Some(left - 1);
                Ok(())
            }
            (None, _) => Ok(()),
        }
    }

    /// Read and decode the instruction at `pc`, then advance `pc`.
    fn fetch(&mut self) -> Result<Instruction, RuntimeError> {
        let pc = self.pc;
        let in_code = pc >= Segment::Code.base()
            && pc
                .checked_add(INSTRUCTION_SIZE as u32)
                .is_some_and(|end| end <= self.code_end);
        if !in_code {
            return Err(RuntimeError::PcOutOfBounds(pc));
        }

        let bytes = self.memory.read(pc, INSTRUCTION_SIZE)?;
        let instr = Instruction::decode_slice(bytes)
            .ok_or(RuntimeError::PcOutOfBounds(pc))??;
        self.pc = pc + INSTRUCTION_SIZE as u32;
        Ok(instr)
    }

    /// Copy `text` and a NUL terminator to the heap; returns its address.
    ///
    /// Host-facing: no instruction allocates. Embedders use it to hand
    /// strings to a loaded program, e.g. by placing the address in a register
    /// before `run`. Assembled string literals live in rodata instead.
    pub fn allocate_string(&mut self, text: &str) -> Result<u32, RuntimeError> {
        let requested = text.len() + 1;
        let start = self.hp;
        let end = (start as usize).checked_add(requested);
        if !end.is_some_and(|end| end <= Segment::Heap.end() as usize) {
            return Err(RuntimeError::HeapOutOfBounds { requested });
        }

        self.memory.write(start, text.as_bytes())?;
        self.memory.write_u8(start + text.len() as u32, 0)?;
        self.hp = start + requested as u32;
        tracing::trace!(addr = start, len = requested, "allocated string");
        Ok(start)
    }

    pub fn state(&self) -> VmState {
        self.state
    }

    /// The fault that stopped the VM, if it stopped on one.
    pub fn fault(&self) -> Option<&Fault> {
        self.fault.as_ref()
    }

    pub fn pc(&self) -> u32 {
        self.pc
    }

    pub fn sp(&self) -> u32 {
        self.sp
    }

    pub fn bp(&self) -> u32 {
        self.bp
    }

    pub fn hp(&self) -> u32 {
        self.hp
    }

    pub fn flags(&self) -> Flags {
        self.flags
    }

    pub fn memory(&self) -> &Memory {
        &self.memory
    }

    pub fn register(&self, reg: Register) -> u32 {
        match reg {
            Register::Sp => self.sp,
            Register::Bp => self.bp,
            Register::Hp => self.hp,
            general => self.registers[general.id() as usize],
        }
    }

    pub(crate) fn read_reg(&self, id: u8) -> Result<u32, RuntimeError> {
        Register::from_id(id)
            .map(|reg| self.register(reg))
            .ok_or(RuntimeError::RegisterNotFound(id))
    }

    /// Resolve `id` as an instruction destination.
    pub(crate) fn writable_reg(id: u8) -> Result<Register, RuntimeError> {
        match Register::from_id(id).ok_or(RuntimeError::RegisterNotFound(id))? {
            Register::Hp => Err(RuntimeError::IllegalOperation(
                "HP only moves through heap allocation",
            )),
            reg => Ok(reg),
        }
    }

    pub(crate) fn write_reg(&mut self, id: u8, value: u32) -> Result<(), RuntimeError> {
        match Self::writable_reg(id)? {
            Register::Sp => self.sp = value,
            Register::Bp => self.bp = value,
            general => self.registers[general.id() as usize] = value,
        }
        Ok(())
    }
}
