//! # Control Flow Instructions
//!
//! This module implements control flow operations:
//! - JMP: Jump (absolute, or indirect with the `($xxFF)` page-wrap quirk
//!   applied during operand resolution)
//! - JSR / RTS: subroutine call and return
//! - RTI: return from interrupt
//! - BRK: software interrupt
//!
//! Every handler here loads PC itself and returns 0.

use crate::addressing::{read_word, Operand};
use crate::{Cpu, MemoryBus};

/// Executes JMP (Jump). No flags are affected.
pub(crate) fn execute_jmp<M: MemoryBus>(cpu: &mut Cpu<M>, operand: Operand) -> u16 {
    cpu.pc = operand.address;
    0
}

/// Executes JSR (Jump to Subroutine).
///
/// Pushes the address of the last byte of the JSR instruction (PC+2), high
/// byte first, then jumps. RTS adds the missing 1 back.
pub(crate) fn execute_jsr<M: MemoryBus>(cpu: &mut Cpu<M>, operand: Operand) -> u16 {
    let return_address = cpu.pc.wrapping_add(2);
    cpu.push_word(return_address);
    cpu.pc = operand.address;
    0
}

/// Executes RTS (Return from Subroutine): pops low then high, adds 1.
pub(crate) fn execute_rts<M: MemoryBus>(cpu: &mut Cpu<M>, _operand: Operand) -> u16 {
    cpu.return_from_subroutine();
    0
}

/// Executes RTI (Return from Interrupt).
///
/// Restores every flag from the stack, B included, then pops PC. Unlike
/// RTS the popped address is used as is.
pub(crate) fn execute_rti<M: MemoryBus>(cpu: &mut Cpu<M>, _operand: Operand) -> u16 {
    let status = cpu.pop();
    cpu.set_status(status);
    cpu.pc = cpu.pop_word();
    0
}

/// Executes BRK (Force Interrupt).
///
/// 1. Pushes PC+2 (BRK is one byte, the following byte is skipped)
/// 2. Sets B and pushes the status with bits 4 and 5 set
/// 3. Sets I
/// 4. Loads PC from the IRQ vector at $FFFE/$FFFF
///
/// Cycle timing: 7 cycles
pub(crate) fn execute_brk<M: MemoryBus>(cpu: &mut Cpu<M>, _operand: Operand) -> u16 {
    let return_address = cpu.pc.wrapping_add(2);
    cpu.push_word(return_address);

    cpu.flag_b = true;
    let status = cpu.status() | 0b0011_0000;
    cpu.push(status);

    cpu.flag_i = true;
    cpu.pc = read_word(&mut cpu.memory, 0xFFFE);
    0
}
