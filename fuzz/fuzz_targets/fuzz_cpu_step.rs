//! Fuzz target for CPU step execution.
//!
//! This target creates arbitrary CPU states and memory contents, then
//! executes a short burst of instructions looking for panics.

#![no_main]

use arbitrary::Arbitrary;
use emu6502::{Cpu, ExecutionError, FlatMemory, MemoryBus};
use libfuzzer_sys::fuzz_target;

/// Arbitrary CPU initial state for fuzzing
#[derive(Debug, Arbitrary)]
struct FuzzCpuState {
    a: u8,
    x: u8,
    y: u8,
    sp: u8,
    /// Packed NV-BDIZC byte
    status: u8,
}

/// Memory region for fuzzing
#[derive(Debug, Arbitrary)]
struct FuzzMemory {
    /// Bytes at the PC location
    program: [u8; 16],
    /// Zero page contents
    zero_page: [u8; 256],
    /// Stack page contents
    stack_page: [u8; 256],
    /// Top page, vectors included
    vector_page: [u8; 256],
}

/// Complete fuzz input
#[derive(Debug, Arbitrary)]
struct FuzzInput {
    cpu_state: FuzzCpuState,
    memory: FuzzMemory,
    steps: u8,
}

fuzz_target!(|input: FuzzInput| {
    let mut memory = FlatMemory::new();
    memory.load(0x0000, &input.memory.zero_page);
    memory.load(0x0100, &input.memory.stack_page);
    memory.load(0x8000, &input.memory.program);
    memory.load(0xFF00, &input.memory.vector_page);

    let mut cpu = Cpu::new(memory);
    cpu.set_a(input.cpu_state.a);
    cpu.set_x(input.cpu_state.x);
    cpu.set_y(input.cpu_state.y);
    cpu.set_sp(input.cpu_state.sp);
    cpu.set_status(input.cpu_state.status);
    cpu.set_pc(0x8000);

    for _ in 0..input.steps {
        let pc = cpu.pc();
        let cycles = cpu.cycles();
        match cpu.step() {
            Ok(()) => assert!(cpu.cycles() > cycles),
            Err(ExecutionError::IllegalOpcode { opcode, address }) => {
                // Illegal opcodes leave the machine where it was
                assert_eq!(address, pc);
                assert_eq!(cpu.pc(), pc);
                assert_eq!(cpu.cycles(), cycles);
                assert_eq!(cpu.memory_mut().read(pc), opcode);
                break;
            }
        }
        assert_eq!(cpu.status() & 0x20, 0x20);
    }
});
