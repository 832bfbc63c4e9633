//! Ready-made host machines.
//!
//! Each machine pairs a [`MemoryBus`](crate::MemoryBus) layout with the
//! [`ExecutionPatch`](crate::ExecutionPatch) that drives it.

pub mod functional_test;
