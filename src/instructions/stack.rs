//! # Stack Instructions
//!
//! - PHA / PLA: push and pull the accumulator (PLA updates Z and N)
//! - PHP / PLP: push and pull the status register
//!
//! PHP always pushes bits 4 and 5 set. PLP restores every flag from the
//! pulled byte, B included.

use crate::addressing::Operand;
use crate::{Cpu, MemoryBus};

pub(crate) fn execute_pha<M: MemoryBus>(cpu: &mut Cpu<M>, operand: Operand) -> u16 {
    cpu.push(cpu.a);
    operand.bytes
}

pub(crate) fn execute_php<M: MemoryBus>(cpu: &mut Cpu<M>, operand: Operand) -> u16 {
    cpu.push(cpu.status() | 0b0011_0000);
    operand.bytes
}

pub(crate) fn execute_pla<M: MemoryBus>(cpu: &mut Cpu<M>, operand: Operand) -> u16 {
    let value = cpu.pop();
    cpu.a = value;
    cpu.update_nz(value);
    operand.bytes
}

pub(crate) fn execute_plp<M: MemoryBus>(cpu: &mut Cpu<M>, operand: Operand) -> u16 {
    let status = cpu.pop();
    cpu.set_status(status);
    operand.bytes
}
