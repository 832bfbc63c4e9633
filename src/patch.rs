//! # Execution-Patch Hook
//!
//! The execute loop offers the host one interception point per iteration,
//! after the trace line and before the opcode at PC is fetched. A host uses
//! it to trap ROM entry points: it inspects PC, performs the routine natively
//! against CPU state and memory, adjusts PC (typically via
//! [`Cpu::return_from_subroutine`]) and reports the step as handled.
//!
//! Returning `true` means "handled, start the next iteration without
//! fetching"; returning `false` lets the loop decode and execute normally.
//! A hook may block (for example while waiting on host input) and may stop
//! the machine with [`Cpu::request_quit`].

use crate::{Cpu, MemoryBus};

/// Host callback consulted before every instruction the execute loop runs.
///
/// Closures of the shape `FnMut(&mut Cpu<M>) -> bool` implement this trait,
/// so ad-hoc hooks need no named type:
///
/// ```rust
/// use emu6502::{Cpu, ExecutionPatch, FlatMemory};
///
/// let mut cpu = Cpu::new(FlatMemory::new());
/// let mut calls = 0;
/// let mut hook = |cpu: &mut Cpu<FlatMemory>| {
///     calls += 1;
///     cpu.request_quit();
///     true
/// };
/// assert!(hook.execute_patch(&mut cpu));
/// assert_eq!(calls, 1);
/// ```
pub trait ExecutionPatch<M: MemoryBus> {
    /// Called at the top of each loop iteration with the CPU about to
    /// execute the instruction at `cpu.pc()`.
    ///
    /// Return `true` if the hook fully handled this step.
    fn execute_patch(&mut self, cpu: &mut Cpu<M>) -> bool;
}

impl<M, F> ExecutionPatch<M> for F
where
    M: MemoryBus,
    F: FnMut(&mut Cpu<M>) -> bool,
{
    fn execute_patch(&mut self, cpu: &mut Cpu<M>) -> bool {
        self(cpu)
    }
}

/// Hook that never intercepts.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPatch;

impl<M: MemoryBus> ExecutionPatch<M> for NoPatch {
    fn execute_patch(&mut self, _cpu: &mut Cpu<M>) -> bool {
        false
    }
}
