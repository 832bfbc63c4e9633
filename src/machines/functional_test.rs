//! # Functional Test Harness
//!
//! Runs Klaus Dormann's `6502_functional_test.bin`, a 64KB image that checks
//! every documented instruction. The image follows a few conventions:
//!
//! - the tests start at $0400, not at the reset vector
//! - the number of the running test is kept at $0200
//! - a failed test parks on `BNE *` (opcode $D0, offset $FE) with Z clear
//! - a completed run parks on `JMP *`, or jumps back to $0400
//! - IRQs must stay quiet, so no interrupt source is installed
//!
//! ```rust
//! use emu6502::{run_functional_test, TestOutcome};
//!
//! let mut image = vec![0u8; 0x10000];
//! // $0400: LDA #$01 / STA $0200 / JMP $0405
//! image[0x0400..0x0408].copy_from_slice(&[0xA9, 0x01, 0x8D, 0x00, 0x02, 0x4C, 0x05, 0x04]);
//!
//! assert_eq!(run_functional_test(&image).unwrap(), TestOutcome::Passed { pc: 0x0405 });
//! ```

use crate::devices::{Device, RamDevice, RomDevice};
use crate::{Cpu, ExecutionError, ExecutionPatch, MemoryBus};

/// Address the test image expects execution to begin at.
pub const TEST_START: u16 = 0x0400;

/// Address holding the number of the test in progress.
pub const TEST_NUMBER_ADDR: u16 = 0x0200;

const ROM_BASE: u16 = 0x8000;

const OPCODE_BNE: u8 = 0xD0;
const OPCODE_JMP: u8 = 0x4C;

/// 32KB of RAM below $8000, 32KB of write-protected ROM above.
///
/// Both halves are seeded from the same 64KB image; an image shorter than
/// that is padded with zeros.
pub struct TestMemory {
    ram: RamDevice,
    rom: RomDevice,
}

impl TestMemory {
    pub fn new(image: &[u8]) -> Self {
        let mut full = image.to_vec();
        full.resize(0x10000, 0);

        let (low, high) = full.split_at(ROM_BASE as usize);
        Self {
            ram: RamDevice::from_bytes(low),
            rom: RomDevice::new(high.to_vec()),
        }
    }
}

impl MemoryBus for TestMemory {
    fn read(&mut self, addr: u16) -> u8 {
        if addr < ROM_BASE {
            self.ram.read(addr)
        } else {
            self.rom.read(addr - ROM_BASE)
        }
    }

    fn write(&mut self, addr: u16, value: u8) {
        if addr < ROM_BASE {
            self.ram.write(addr, value);
        }
    }
}

/// Where a functional test run stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TestOutcome {
    /// No terminal state detected yet.
    Running,
    /// The image reached its completion loop at `pc`.
    Passed { pc: u16 },
    /// Test number `test` parked on its failure trap at `pc`.
    Failed { test: u8, pc: u16 },
}

/// Patch hook that starts the image at $0400 and watches for its traps.
#[derive(Debug)]
pub struct FunctionalTest {
    started: bool,
    last_test: Option<u8>,
    outcome: TestOutcome,
}

impl FunctionalTest {
    pub fn new() -> Self {
        Self {
            started: false,
            last_test: None,
            outcome: TestOutcome::Running,
        }
    }

    pub fn outcome(&self) -> TestOutcome {
        self.outcome
    }

    fn finish<M: MemoryBus>(&mut self, cpu: &mut Cpu<M>, outcome: TestOutcome) -> bool {
        match outcome {
            TestOutcome::Failed { test, pc } => {
                tracing::error!("{pc:04X} test {test:02X} FAIL");
            }
            TestOutcome::Passed { pc } => {
                tracing::info!("{pc:04X} COMPLETED SUCCESS");
            }
            TestOutcome::Running => {}
        }
        self.outcome = outcome;
        cpu.request_quit();
        true
    }
}

impl Default for FunctionalTest {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: MemoryBus> ExecutionPatch<M> for FunctionalTest {
    fn execute_patch(&mut self, cpu: &mut Cpu<M>) -> bool {
        if !self.started {
            self.started = true;
            cpu.set_pc(TEST_START);
            tracing::info!("start");
            return true;
        }

        let pc = cpu.pc();
        let opcode = cpu.get_memory(pc);
        let lo = cpu.get_memory(pc.wrapping_add(1));
        let hi = cpu.get_memory(pc.wrapping_add(2));

        if opcode == OPCODE_BNE && !cpu.flag_z() && lo == 0xFE {
            let test = cpu.get_memory(TEST_NUMBER_ADDR);
            return self.finish(cpu, TestOutcome::Failed { test, pc });
        }

        let target = u16::from_le_bytes([lo, hi]);
        if opcode == OPCODE_JMP && (target == pc || target == TEST_START) {
            return self.finish(cpu, TestOutcome::Passed { pc });
        }

        let test = cpu.get_memory(TEST_NUMBER_ADDR);
        if self.last_test != Some(test) {
            self.last_test = Some(test);
            tracing::info!("{pc:04X} starting test {test:02X}");
        }

        false
    }
}

/// Loads `image` into a [`TestMemory`] and runs it to a terminal state.
///
/// # Errors
///
/// Propagates [`ExecutionError::IllegalOpcode`], which a correct image only
/// reaches through a broken interpreter.
pub fn run_functional_test(image: &[u8]) -> Result<TestOutcome, ExecutionError> {
    let mut cpu = Cpu::new(TestMemory::new(image));
    let mut harness = FunctionalTest::new();
    cpu.reset_run(&mut harness)?;
    tracing::info!(cycles = cpu.cycles(), "functional test finished");
    Ok(harness.outcome())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rom_half_is_write_protected() {
        let mut image = vec![0u8; 0x10000];
        image[0x1234] = 0x11;
        image[0x9000] = 0x22;
        let mut memory = TestMemory::new(&image);

        memory.write(0x1234, 0x33);
        memory.write(0x9000, 0x44);

        assert_eq!(memory.read(0x1234), 0x33);
        assert_eq!(memory.read(0x9000), 0x22);
    }

    #[test]
    fn test_short_image_is_zero_padded() {
        let mut memory = TestMemory::new(&[0xEA; 4]);
        assert_eq!(memory.read(0x0003), 0xEA);
        assert_eq!(memory.read(0x0004), 0x00);
        assert_eq!(memory.read(0xFFFF), 0x00);
    }

    #[test]
    fn test_first_call_jumps_to_test_start() {
        let mut cpu = Cpu::new(TestMemory::new(&[]));
        let mut harness = FunctionalTest::new();

        assert!(harness.execute_patch(&mut cpu));
        assert_eq!(cpu.pc(), TEST_START);
        assert_eq!(harness.outcome(), TestOutcome::Running);
    }

    #[test]
    fn test_bne_trap_with_zero_set_keeps_running() {
        let mut image = vec![0u8; 0x10000];
        image[0x0400..0x0402].copy_from_slice(&[0xD0, 0xFE]);
        let mut cpu = Cpu::new(TestMemory::new(&image));
        let mut harness = FunctionalTest::new();
        harness.execute_patch(&mut cpu);

        cpu.set_flag_z(true);
        assert!(!harness.execute_patch(&mut cpu));
        assert_eq!(harness.outcome(), TestOutcome::Running);
        assert!(!cpu.quit_requested());
    }

    #[test]
    fn test_jump_back_to_start_counts_as_success() {
        let mut image = vec![0u8; 0x10000];
        image[0x3000..0x3003].copy_from_slice(&[0x4C, 0x00, 0x04]);
        let mut cpu = Cpu::new(TestMemory::new(&image));
        let mut harness = FunctionalTest::new();
        harness.execute_patch(&mut cpu);

        cpu.set_pc(0x3000);
        assert!(harness.execute_patch(&mut cpu));
        assert_eq!(harness.outcome(), TestOutcome::Passed { pc: 0x3000 });
        assert!(cpu.quit_requested());
    }
}
