//! # Register Transfer Instructions
//!
//! This module implements register transfer operations:
//! - TAX, TAY, TXA, TYA, TSX: copy and update Z and N
//! - TXS: copy X into S without touching any flag

use crate::addressing::Operand;
use crate::{Cpu, MemoryBus};

pub(crate) fn execute_tax<M: MemoryBus>(cpu: &mut Cpu<M>, operand: Operand) -> u16 {
    cpu.x = cpu.a;
    cpu.update_nz(cpu.x);
    operand.bytes
}

pub(crate) fn execute_tay<M: MemoryBus>(cpu: &mut Cpu<M>, operand: Operand) -> u16 {
    cpu.y = cpu.a;
    cpu.update_nz(cpu.y);
    operand.bytes
}

pub(crate) fn execute_txa<M: MemoryBus>(cpu: &mut Cpu<M>, operand: Operand) -> u16 {
    cpu.a = cpu.x;
    cpu.update_nz(cpu.a);
    operand.bytes
}

pub(crate) fn execute_tya<M: MemoryBus>(cpu: &mut Cpu<M>, operand: Operand) -> u16 {
    cpu.a = cpu.y;
    cpu.update_nz(cpu.a);
    operand.bytes
}

pub(crate) fn execute_tsx<M: MemoryBus>(cpu: &mut Cpu<M>, operand: Operand) -> u16 {
    cpu.x = cpu.sp;
    cpu.update_nz(cpu.x);
    operand.bytes
}

/// Executes TXS. The stack pointer is not a result register, so N and Z
/// keep their values.
pub(crate) fn execute_txs<M: MemoryBus>(cpu: &mut Cpu<M>, operand: Operand) -> u16 {
    cpu.sp = cpu.x;
    operand.bytes
}
