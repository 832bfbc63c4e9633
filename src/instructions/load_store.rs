//! # Load and Store Instructions
//!
//! - LDA, LDX, LDY: load a register from memory, updating Z and N
//! - STA, STX, STY: store a register to memory, affecting no flags

use crate::addressing::Operand;
use crate::{Cpu, MemoryBus};

/// Executes LDA (Load Accumulator).
pub(crate) fn execute_lda<M: MemoryBus>(cpu: &mut Cpu<M>, operand: Operand) -> u16 {
    let value = cpu.memory.read(operand.address);
    cpu.a = value;
    cpu.update_nz(value);
    operand.bytes
}

/// Executes LDX (Load X Register).
pub(crate) fn execute_ldx<M: MemoryBus>(cpu: &mut Cpu<M>, operand: Operand) -> u16 {
    let value = cpu.memory.read(operand.address);
    cpu.x = value;
    cpu.update_nz(value);
    operand.bytes
}

/// Executes LDY (Load Y Register).
pub(crate) fn execute_ldy<M: MemoryBus>(cpu: &mut Cpu<M>, operand: Operand) -> u16 {
    let value = cpu.memory.read(operand.address);
    cpu.y = value;
    cpu.update_nz(value);
    operand.bytes
}

/// Executes STA (Store Accumulator).
///
/// Only the target address is touched: indexed stores never issue the
/// dummy read real hardware performs, which matters for I/O registers that
/// acknowledge on read.
pub(crate) fn execute_sta<M: MemoryBus>(cpu: &mut Cpu<M>, operand: Operand) -> u16 {
    cpu.memory.write(operand.address, cpu.a);
    operand.bytes
}

pub(crate) fn execute_stx<M: MemoryBus>(cpu: &mut Cpu<M>, operand: Operand) -> u16 {
    cpu.memory.write(operand.address, cpu.x);
    operand.bytes
}

pub(crate) fn execute_sty<M: MemoryBus>(cpu: &mut Cpu<M>, operand: Operand) -> u16 {
    cpu.memory.write(operand.address, cpu.y);
    operand.bytes
}
