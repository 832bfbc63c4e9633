//! # Shift and Rotate Instructions
//!
//! This module implements bit shift and rotate operations:
//! - ASL: Arithmetic Shift Left
//! - LSR: Logical Shift Right
//! - ROL: Rotate Left through carry
//! - ROR: Rotate Right through carry
//!
//! Each works on the accumulator or, read-modify-write, on memory.

use crate::addressing::Operand;
use crate::{AddressingMode, Cpu, MemoryBus};

/// Applies `op` to the accumulator or the memory operand and stores the
/// result back. `op` receives the old value and sets C itself.
fn read_modify_write<M, F>(
    cpu: &mut Cpu<M>,
    operand: Operand,
    mode: AddressingMode,
    op: F,
) -> u16
where
    M: MemoryBus,
    F: FnOnce(&mut Cpu<M>, u8) -> u8,
{
    if mode == AddressingMode::Accumulator {
        let value = cpu.a;
        let result = op(cpu, value);
        cpu.a = result;
        cpu.update_nz(result);
    } else {
        let value = cpu.memory.read(operand.address);
        let result = op(cpu, value);
        cpu.memory.write(operand.address, result);
        cpu.update_nz(result);
    }
    operand.bytes
}

/// Executes ASL: bit 7 into C, zero into bit 0. Updates C, Z and N.
pub(crate) fn execute_asl<M: MemoryBus>(
    cpu: &mut Cpu<M>,
    operand: Operand,
    mode: AddressingMode,
) -> u16 {
    read_modify_write(cpu, operand, mode, |cpu, value| {
        cpu.flag_c = value & 0x80 != 0;
        value << 1
    })
}

/// Executes LSR: bit 0 into C, zero into bit 7, so N always ends clear.
pub(crate) fn execute_lsr<M: MemoryBus>(
    cpu: &mut Cpu<M>,
    operand: Operand,
    mode: AddressingMode,
) -> u16 {
    read_modify_write(cpu, operand, mode, |cpu, value| {
        cpu.flag_c = value & 0x01 != 0;
        value >> 1
    })
}

/// Executes ROL: old C into bit 0, bit 7 into C.
pub(crate) fn execute_rol<M: MemoryBus>(
    cpu: &mut Cpu<M>,
    operand: Operand,
    mode: AddressingMode,
) -> u16 {
    read_modify_write(cpu, operand, mode, |cpu, value| {
        let carry_in = cpu.flag_c as u8;
        cpu.flag_c = value & 0x80 != 0;
        (value << 1) | carry_in
    })
}

/// Executes ROR: old C into bit 7, bit 0 into C. N therefore equals the
/// carry held before the rotate.
pub(crate) fn execute_ror<M: MemoryBus>(
    cpu: &mut Cpu<M>,
    operand: Operand,
    mode: AddressingMode,
) -> u16 {
    read_modify_write(cpu, operand, mode, |cpu, value| {
        let carry_in = (cpu.flag_c as u8) << 7;
        cpu.flag_c = value & 0x01 != 0;
        (value >> 1) | carry_in
    })
}
