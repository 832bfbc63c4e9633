//! # Branch Instructions
//!
//! The eight conditional branches share one body: the condition is evaluated
//! by the dispatcher and the destination was already resolved from the
//! signed offset. All branches are two bytes long; an untaken branch behaves
//! as a two-byte NOP.
//!
//! Taken-branch and page-crossing cycle penalties are not modelled.

use crate::addressing::Operand;
use crate::{Cpu, MemoryBus};

/// Branches to `operand.address` when `taken` holds.
///
/// No flags are affected. Returns 0 after loading PC, the instruction
/// length otherwise.
pub(crate) fn branch_if<M: MemoryBus>(cpu: &mut Cpu<M>, operand: Operand, taken: bool) -> u16 {
    if taken {
        cpu.pc = operand.address;
        0
    } else {
        operand.bytes
    }
}
