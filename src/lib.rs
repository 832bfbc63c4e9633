//! # emu6502
//!
//! An instruction-stepped NMOS 6502 interpreter built to sit at the heart of a
//! host machine emulator. The interpreter owns registers and flags; the host
//! supplies the memory map through [`MemoryBus`] and may intercept execution
//! before any instruction through an [`ExecutionPatch`] hook, which is how
//! ROM routines (KERNAL calls, character output, disk I/O) get replaced by
//! native code.
//!
//! ## Quick Start
//!
//! ```rust
//! use emu6502::{Cpu, FlatMemory, MemoryBus};
//!
//! let mut memory = FlatMemory::new();
//! memory.load(0x0200, &[0xA9, 0x05, 0xA2, 0x03, 0x95, 0x10]); // LDA #$05 / LDX #$03 / STA $10,X
//!
//! let mut cpu = Cpu::new(memory);
//! cpu.set_pc(0x0200);
//! for _ in 0..3 {
//!     cpu.step().unwrap();
//! }
//!
//! assert_eq!(cpu.a(), 0x05);
//! assert_eq!(cpu.get_memory(0x0013), 0x05);
//! ```
//!
//! ## Running with a patch hook
//!
//! ```rust
//! use emu6502::{Cpu, FlatMemory, MemoryBus};
//!
//! let mut memory = FlatMemory::new();
//! memory.write(0xFFFC, 0x00);
//! memory.write(0xFFFD, 0x10);
//! memory.load(0x1000, &[0xE8, 0x4C, 0x00, 0x10]); // INX / JMP $1000
//!
//! let mut cpu = Cpu::new(memory);
//! cpu.reset_run(&mut |cpu: &mut Cpu<FlatMemory>| {
//!     if cpu.x() == 10 {
//!         cpu.request_quit();
//!         return true;
//!     }
//!     false
//! })
//! .unwrap();
//!
//! assert_eq!(cpu.x(), 10);
//! ```
//!
//! ## Modules
//!
//! - `cpu` - register state, the execute loop, stack and interrupt primitives
//! - `memory` - the `MemoryBus` trait and a flat 64KB implementation
//! - `devices` - device-routed memory maps (RAM, ROM)
//! - `opcodes` / `addressing` - the decode table and operand resolution
//! - `patch` - the execution-patch hook
//! - `interrupts` - injectable periodic IRQ sources
//! - `disassembler` - instruction decoding and trace formatting
//! - `snapshot` - binary save states
//! - `machines` - ready-made hosts (functional test harness)

pub mod addressing;
pub mod cpu;
pub mod devices;
pub mod disassembler;
pub mod interrupts;
pub mod machines;
pub mod memory;
pub mod opcodes;
pub mod patch;
pub mod snapshot;

// Instruction handlers are reached only through dispatch
mod instructions;

pub mod wasm;

pub use addressing::{AddressingMode, Operand};
pub use cpu::{Cpu, CpuConfig, IllegalOpcodePolicy};
pub use devices::{Device, DeviceError, MappedMemory, RamDevice, RomDevice};
pub use disassembler::{
    decode, disassemble, format_instruction, format_long, format_registers, format_trace_line,
    DecodedInstruction,
};
pub use interrupts::{Clock, IrqSource, ManualClock, NoIrq, PeriodicIrq, SystemClock};
pub use machines::functional_test::{run_functional_test, FunctionalTest, TestMemory, TestOutcome};
pub use memory::{FlatMemory, MemoryBus};
pub use opcodes::{OpcodeMetadata, Operation, OPCODE_TABLE};
pub use patch::{ExecutionPatch, NoPatch};
pub use snapshot::{CpuSnapshot, SaveState, SnapshotError};

#[cfg(feature = "wasm")]
pub use wasm::Emulator6502;

use thiserror::Error;

/// Errors that can occur during CPU execution.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExecutionError {
    /// The byte at `address` is not a documented opcode.
    ///
    /// PC is left pointing at the offending byte.
    #[error("Invalid opcode {opcode:02X} at {address:04X}")]
    IllegalOpcode {
        /// The opcode byte fetched
        opcode: u8,
        /// Address the opcode was fetched from
        address: u16,
    },
}
