//! # CPU State and Execution
//!
//! This module contains the [`Cpu`] struct: register and flag state, the
//! execute loop with its patch hook, the stack primitives and the interrupt
//! sequences. Instruction semantics live in the crate-private `instructions`
//! module and are reached through the opcode table.

use crate::addressing::read_word;
use crate::disassembler::format_trace_line;
use crate::instructions;
use crate::interrupts::{IrqSource, NoIrq};
use crate::patch::ExecutionPatch;
use crate::{ExecutionError, MemoryBus};

/// Tracing target of the per-instruction trace lines.
pub const TRACE_TARGET: &str = "emu6502::trace";

const STACK_BASE: u16 = 0x0100;
const NMI_VECTOR: u16 = 0xFFFA;
const RESET_VECTOR: u16 = 0xFFFC;
const IRQ_VECTOR: u16 = 0xFFFE;

/// Interrupt entry costs seven cycles, like BRK.
const INTERRUPT_CYCLES: u64 = 7;

/// What the interpreter does when it fetches an undocumented opcode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IllegalOpcodePolicy {
    /// Log the opcode and return [`ExecutionError::IllegalOpcode`].
    #[default]
    Error,
    /// Log the opcode and terminate the process with exit status 1.
    Exit,
}

/// Start-up options for a [`Cpu`].
///
/// ```
/// use emu6502::{Cpu, CpuConfig, FlatMemory, IllegalOpcodePolicy};
///
/// let config = CpuConfig {
///     trace: true,
///     ..CpuConfig::default()
/// };
/// let cpu = Cpu::with_config(FlatMemory::new(), config);
/// assert!(cpu.trace_enabled());
/// assert_eq!(config.illegal_opcode_policy, IllegalOpcodePolicy::Error);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CpuConfig {
    /// Emit a trace line before every instruction.
    pub trace: bool,
    /// Single-step aid; also emits the trace line.
    pub step: bool,
    /// Handling of undocumented opcodes.
    pub illegal_opcode_policy: IllegalOpcodePolicy,
}

/// 6502 CPU state and execution context.
///
/// The CPU owns its memory collaborator and never stores memory itself.
/// A freshly constructed CPU has A, X and Y zeroed, S at $FF, PC at $0000,
/// B set and every other flag clear. [`Cpu::reset`] loads PC from the reset
/// vector without touching anything else.
///
/// # Examples
///
/// ```
/// use emu6502::{Cpu, FlatMemory, MemoryBus};
///
/// let mut memory = FlatMemory::new();
/// memory.write(0xFFFC, 0x00);
/// memory.write(0xFFFD, 0x80);
///
/// let mut cpu = Cpu::new(memory);
/// assert_eq!(cpu.pc(), 0x0000);
/// assert_eq!(cpu.sp(), 0xFF);
/// assert!(cpu.flag_b());
///
/// cpu.reset();
/// assert_eq!(cpu.pc(), 0x8000);
/// ```
pub struct Cpu<M: MemoryBus> {
    /// Accumulator register
    pub(crate) a: u8,

    /// X index register
    pub(crate) x: u8,

    /// Y index register
    pub(crate) y: u8,

    /// Program counter (address of next instruction)
    pub(crate) pc: u16,

    /// Stack pointer (0x0100 + sp gives full stack address)
    pub(crate) sp: u8,

    pub(crate) flag_n: bool,
    pub(crate) flag_v: bool,
    pub(crate) flag_b: bool,
    pub(crate) flag_d: bool,
    pub(crate) flag_i: bool,
    pub(crate) flag_z: bool,
    pub(crate) flag_c: bool,

    /// Approximate cycles executed (base costs only)
    pub(crate) cycles: u64,

    trace: bool,
    single_step: bool,
    quit: bool,
    illegal_opcode_policy: IllegalOpcodePolicy,
    irq_source: Box<dyn IrqSource + Send>,

    /// Memory bus implementation
    pub(crate) memory: M,
}

impl<M: MemoryBus> Cpu<M> {
    /// Creates a CPU in its construction state with the default config.
    pub fn new(memory: M) -> Self {
        Self::with_config(memory, CpuConfig::default())
    }

    /// Creates a CPU in its construction state with `config` applied.
    pub fn with_config(memory: M, config: CpuConfig) -> Self {
        Self {
            a: 0,
            x: 0,
            y: 0,
            pc: 0,
            sp: 0xFF,
            flag_n: false,
            flag_v: false,
            // PHP always pushes B set, so the live flag starts set as well
            flag_b: true,
            flag_d: false,
            flag_i: false,
            flag_z: false,
            flag_c: false,
            cycles: 0,
            trace: config.trace,
            single_step: config.step,
            quit: false,
            illegal_opcode_policy: config.illegal_opcode_policy,
            irq_source: Box::new(NoIrq),
            memory,
        }
    }

    /// Installs the source polled for maskable interrupts.
    ///
    /// ```
    /// use emu6502::{Cpu, FlatMemory, PeriodicIrq, SystemClock};
    ///
    /// let mut cpu = Cpu::new(FlatMemory::new());
    /// cpu.set_irq_source(PeriodicIrq::sixty_hz(SystemClock::new()));
    /// ```
    pub fn set_irq_source<S: IrqSource + Send + 'static>(&mut self, source: S) {
        self.irq_source = Box::new(source);
    }

    // ========== Lifecycle ==========

    /// Loads PC from the reset vector at $FFFC/$FFFD.
    pub fn reset(&mut self) {
        self.pc = read_word(&mut self.memory, RESET_VECTOR);
        tracing::debug!(pc = self.pc, "reset");
    }

    /// Resets, then runs from the reset vector until quit is requested.
    ///
    /// # Errors
    ///
    /// Returns [`ExecutionError::IllegalOpcode`] if an undocumented opcode is
    /// fetched under [`IllegalOpcodePolicy::Error`].
    pub fn reset_run<P>(&mut self, patch: &mut P) -> Result<(), ExecutionError>
    where
        P: ExecutionPatch<M> + ?Sized,
    {
        self.reset();
        self.execute(self.pc, patch)
    }

    /// Sets PC to `addr` and runs until quit is requested.
    ///
    /// Each iteration:
    /// 1. returns if quit was requested
    /// 2. takes a pending IRQ (I clear and either the installed source or
    ///    the memory's IRQ line says so)
    /// 3. emits the trace line when trace or step mode is on
    /// 4. offers the step to `patch`; if it was handled, starts over
    /// 5. otherwise executes the instruction at PC
    ///
    /// # Errors
    ///
    /// Returns [`ExecutionError::IllegalOpcode`] if an undocumented opcode is
    /// fetched under [`IllegalOpcodePolicy::Error`].
    pub fn execute<P>(&mut self, addr: u16, patch: &mut P) -> Result<(), ExecutionError>
    where
        P: ExecutionPatch<M> + ?Sized,
    {
        self.pc = addr;

        loop {
            if self.quit {
                tracing::debug!(pc = self.pc, cycles = self.cycles, "quit requested");
                return Ok(());
            }

            if !self.flag_i && (self.irq_source.irq_due() || self.memory.irq_active()) {
                self.irq();
            }

            if self.trace || self.single_step {
                self.emit_trace_line();
            }

            if patch.execute_patch(self) {
                continue;
            }

            self.step()?;
        }
    }

    /// Executes exactly one instruction at PC.
    ///
    /// No patch hook is consulted and no interrupt is polled.
    ///
    /// # Errors
    ///
    /// Returns [`ExecutionError::IllegalOpcode`] if the byte at PC is not a
    /// documented opcode. PC is left unchanged in that case.
    pub fn step(&mut self) -> Result<(), ExecutionError> {
        instructions::execute(self).map_err(|err| self.illegal_opcode(err))
    }

    fn illegal_opcode(&self, err: ExecutionError) -> ExecutionError {
        tracing::error!(%err, "illegal opcode");
        if self.illegal_opcode_policy == IllegalOpcodePolicy::Exit {
            std::process::exit(1);
        }
        err
    }

    fn emit_trace_line(&mut self) {
        if tracing::enabled!(target: TRACE_TARGET, tracing::Level::TRACE) {
            let line = format_trace_line(self);
            tracing::trace!(target: TRACE_TARGET, "{line}");
        }
    }

    /// Asks the execute loop to return before its next iteration.
    pub fn request_quit(&mut self) {
        self.quit = true;
    }

    /// Sets or clears the quit request.
    pub fn set_quit(&mut self, quit: bool) {
        self.quit = quit;
    }

    pub fn quit_requested(&self) -> bool {
        self.quit
    }

    pub fn set_trace(&mut self, trace: bool) {
        self.trace = trace;
    }

    pub fn trace_enabled(&self) -> bool {
        self.trace
    }

    pub fn set_single_step(&mut self, step: bool) {
        self.single_step = step;
    }

    pub fn single_step(&self) -> bool {
        self.single_step
    }

    // ========== Memory ==========

    /// Reads a byte through the memory collaborator.
    pub fn get_memory(&mut self, addr: u16) -> u8 {
        self.memory.read(addr)
    }

    /// Writes a byte through the memory collaborator.
    pub fn set_memory(&mut self, addr: u16, value: u8) {
        self.memory.write(addr, value);
    }

    /// Borrows the memory collaborator.
    pub fn memory(&self) -> &M {
        &self.memory
    }

    /// Mutably borrows the memory collaborator.
    pub fn memory_mut(&mut self) -> &mut M {
        &mut self.memory
    }

    /// Consumes the CPU, returning its memory collaborator.
    pub fn into_memory(self) -> M {
        self.memory
    }

    // ========== Stack ==========

    /// Writes `value` at $0100+S, then decrements S (wrapping in the page).
    pub fn push(&mut self, value: u8) {
        self.memory.write(STACK_BASE | self.sp as u16, value);
        self.sp = self.sp.wrapping_sub(1);
    }

    /// Increments S (wrapping in the page), then reads $0100+S.
    pub fn pop(&mut self) -> u8 {
        self.sp = self.sp.wrapping_add(1);
        self.memory.read(STACK_BASE | self.sp as u16)
    }

    /// Pushes a word high byte first.
    pub(crate) fn push_word(&mut self, value: u16) {
        self.push((value >> 8) as u8);
        self.push(value as u8);
    }

    /// Pops a word low byte first.
    pub(crate) fn pop_word(&mut self) -> u16 {
        let lo = self.pop() as u16;
        let hi = self.pop() as u16;
        (hi << 8) | lo
    }

    /// Enters a subroutine at `addr` as if JSR had been executed at PC-3.
    ///
    /// Pushes PC-1 and jumps, so a later RTS resumes at the current PC.
    /// Always returns `true`, letting a patch hook write
    /// `return cpu.call_subroutine(addr);`.
    pub fn call_subroutine(&mut self, addr: u16) -> bool {
        let return_addr = self.pc.wrapping_sub(1);
        self.push_word(return_addr);
        self.pc = addr;
        true
    }

    /// Performs RTS: pops the return address and resumes after it.
    ///
    /// Always returns `true`, so a hook that replaced a ROM routine can
    /// finish with `return cpu.return_from_subroutine();`.
    pub fn return_from_subroutine(&mut self) -> bool {
        self.pc = self.pop_word().wrapping_add(1);
        true
    }

    // ========== Interrupts ==========

    /// Takes a maskable interrupt unless I is set.
    ///
    /// Pushes PC and the status byte with B clear, sets I and jumps through
    /// $FFFE/$FFFF. Returns whether the interrupt was taken.
    pub fn irq(&mut self) -> bool {
        if self.flag_i {
            return false;
        }
        self.interrupt(IRQ_VECTOR);
        tracing::debug!(pc = self.pc, "irq");
        true
    }

    /// Takes a non-maskable interrupt through $FFFA/$FFFB.
    pub fn nmi(&mut self) {
        self.interrupt(NMI_VECTOR);
        tracing::debug!(pc = self.pc, "nmi");
    }

    fn interrupt(&mut self, vector: u16) {
        self.push_word(self.pc);
        // B reads clear on the stack for hardware interrupts only
        self.push((self.status() & !0x10) | 0x20);
        self.flag_i = true;
        self.pc = read_word(&mut self.memory, vector);
        self.cycles += INTERRUPT_CYCLES;
    }

    // ========== Register Getters ==========

    /// Returns the accumulator register value.
    pub fn a(&self) -> u8 {
        self.a
    }

    /// Returns the X index register value.
    pub fn x(&self) -> u8 {
        self.x
    }

    /// Returns the Y index register value.
    pub fn y(&self) -> u8 {
        self.y
    }

    /// Returns the program counter value.
    pub fn pc(&self) -> u16 {
        self.pc
    }

    /// Returns the stack pointer value.
    ///
    /// The full stack address is 0x0100 + SP. The stack grows downward from 0x01FF.
    pub fn sp(&self) -> u8 {
        self.sp
    }

    /// Returns the total number of approximate cycles executed.
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    /// Returns the status register as a packed byte.
    ///
    /// Bit layout (NV-BDIZC):
    /// - Bit 7: N (Negative)
    /// - Bit 6: V (Overflow)
    /// - Bit 5: (unused, always 1)
    /// - Bit 4: B (Break)
    /// - Bit 3: D (Decimal)
    /// - Bit 2: I (Interrupt Disable)
    /// - Bit 1: Z (Zero)
    /// - Bit 0: C (Carry)
    ///
    /// ```
    /// use emu6502::{Cpu, FlatMemory};
    ///
    /// let cpu = Cpu::new(FlatMemory::new());
    /// // Bit 5 and B set after construction
    /// assert_eq!(cpu.status(), 0b0011_0000);
    /// ```
    pub fn status(&self) -> u8 {
        let mut status: u8 = 0b0010_0000;

        if self.flag_n {
            status |= 0b1000_0000;
        }
        if self.flag_v {
            status |= 0b0100_0000;
        }
        if self.flag_b {
            status |= 0b0001_0000;
        }
        if self.flag_d {
            status |= 0b0000_1000;
        }
        if self.flag_i {
            status |= 0b0000_0100;
        }
        if self.flag_z {
            status |= 0b0000_0010;
        }
        if self.flag_c {
            status |= 0b0000_0001;
        }

        status
    }

    /// Unpacks every flag, B included, from a status byte. Bit 5 is ignored.
    pub fn set_status(&mut self, status: u8) {
        self.flag_n = status & 0x80 != 0;
        self.flag_v = status & 0x40 != 0;
        self.flag_b = status & 0x10 != 0;
        self.flag_d = status & 0x08 != 0;
        self.flag_i = status & 0x04 != 0;
        self.flag_z = status & 0x02 != 0;
        self.flag_c = status & 0x01 != 0;
    }

    // ========== Status Flag Getters ==========

    pub fn flag_n(&self) -> bool {
        self.flag_n
    }

    pub fn flag_v(&self) -> bool {
        self.flag_v
    }

    pub fn flag_b(&self) -> bool {
        self.flag_b
    }

    pub fn flag_d(&self) -> bool {
        self.flag_d
    }

    pub fn flag_i(&self) -> bool {
        self.flag_i
    }

    pub fn flag_z(&self) -> bool {
        self.flag_z
    }

    pub fn flag_c(&self) -> bool {
        self.flag_c
    }

    // ========== Setters ==========

    pub fn set_a(&mut self, value: u8) {
        self.a = value;
    }

    pub fn set_x(&mut self, value: u8) {
        self.x = value;
    }

    pub fn set_y(&mut self, value: u8) {
        self.y = value;
    }

    pub fn set_pc(&mut self, value: u16) {
        self.pc = value;
    }

    pub fn set_sp(&mut self, value: u8) {
        self.sp = value;
    }

    pub fn set_cycles(&mut self, cycles: u64) {
        self.cycles = cycles;
    }

    pub fn set_flag_n(&mut self, value: bool) {
        self.flag_n = value;
    }

    pub fn set_flag_v(&mut self, value: bool) {
        self.flag_v = value;
    }

    pub fn set_flag_b(&mut self, value: bool) {
        self.flag_b = value;
    }

    pub fn set_flag_d(&mut self, value: bool) {
        self.flag_d = value;
    }

    pub fn set_flag_i(&mut self, value: bool) {
        self.flag_i = value;
    }

    pub fn set_flag_z(&mut self, value: bool) {
        self.flag_z = value;
    }

    pub fn set_flag_c(&mut self, value: bool) {
        self.flag_c = value;
    }

    /// Sets Z and N from a value produced by an instruction.
    pub(crate) fn update_nz(&mut self, value: u8) {
        self.flag_z = value == 0;
        self.flag_n = value & 0x80 != 0;
    }
}

impl<M: MemoryBus + std::fmt::Debug> std::fmt::Debug for Cpu<M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cpu")
            .field("a", &self.a)
            .field("x", &self.x)
            .field("y", &self.y)
            .field("pc", &self.pc)
            .field("sp", &self.sp)
            .field("status", &self.status())
            .field("cycles", &self.cycles)
            .field("memory", &self.memory)
            .finish_non_exhaustive()
    }
}
