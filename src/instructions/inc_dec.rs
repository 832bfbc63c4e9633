//! # Increment and Decrement Instructions
//!
//! INC/DEC work on memory, INX/INY/DEX/DEY on the index registers. All wrap
//! at 8 bits and update Z and N; C is never touched.

use crate::addressing::Operand;
use crate::{Cpu, MemoryBus};

fn modify_memory<M: MemoryBus>(cpu: &mut Cpu<M>, operand: Operand, delta: u8) -> u16 {
    let result = cpu.memory.read(operand.address).wrapping_add(delta);
    cpu.memory.write(operand.address, result);
    cpu.update_nz(result);
    operand.bytes
}

pub(crate) fn execute_inc<M: MemoryBus>(cpu: &mut Cpu<M>, operand: Operand) -> u16 {
    modify_memory(cpu, operand, 1)
}

pub(crate) fn execute_dec<M: MemoryBus>(cpu: &mut Cpu<M>, operand: Operand) -> u16 {
    modify_memory(cpu, operand, 0xFF)
}

pub(crate) fn execute_inx<M: MemoryBus>(cpu: &mut Cpu<M>, operand: Operand) -> u16 {
    cpu.x = cpu.x.wrapping_add(1);
    cpu.update_nz(cpu.x);
    operand.bytes
}

pub(crate) fn execute_iny<M: MemoryBus>(cpu: &mut Cpu<M>, operand: Operand) -> u16 {
    cpu.y = cpu.y.wrapping_add(1);
    cpu.update_nz(cpu.y);
    operand.bytes
}

pub(crate) fn execute_dex<M: MemoryBus>(cpu: &mut Cpu<M>, operand: Operand) -> u16 {
    cpu.x = cpu.x.wrapping_sub(1);
    cpu.update_nz(cpu.x);
    operand.bytes
}

pub(crate) fn execute_dey<M: MemoryBus>(cpu: &mut Cpu<M>, operand: Operand) -> u16 {
    cpu.y = cpu.y.wrapping_sub(1);
    cpu.update_nz(cpu.y);
    operand.bytes
}
