//! Tests for interrupts raised while the execute loop runs.
//!
//! Two paths lead to an IRQ: the installed [`IrqSource`] and the memory
//! bus's own IRQ line. Both are polled only while I is clear.

use emu6502::{Cpu, FlatMemory, ManualClock, MemoryBus, PeriodicIrq};

const HANDLER: u16 = 0x9000;
const COUNTER: u16 = 0x0010;

/// Flat memory with a device-style IRQ line acknowledged by writing $D000.
struct IrqLineMemory {
    memory: FlatMemory,
    asserted: bool,
}

impl MemoryBus for IrqLineMemory {
    fn read(&mut self, addr: u16) -> u8 {
        self.memory.read(addr)
    }

    fn write(&mut self, addr: u16, value: u8) {
        if addr == 0xD000 {
            self.asserted = false;
        }
        self.memory.write(addr, value);
    }

    fn irq_active(&self) -> bool {
        self.asserted
    }
}

/// Main loop `INX / JMP $0200` and a handler at $9000.
fn machine(handler: &[u8]) -> FlatMemory {
    let mut memory = FlatMemory::new();
    memory.load(0x0200, &[0xE8, 0x4C, 0x00, 0x02]);
    memory.load(HANDLER, handler);
    memory.write(0xFFFE, HANDLER as u8);
    memory.write(0xFFFF, (HANDLER >> 8) as u8);
    memory
}

// ========== Memory IRQ Line ==========

#[test]
fn test_memory_irq_line_taken_once_until_acknowledged() {
    // INC $10 / STA $D000 / RTI
    let memory = IrqLineMemory {
        memory: machine(&[0xE6, 0x10, 0x8D, 0x00, 0xD0, 0x40]),
        asserted: true,
    };
    let mut cpu = Cpu::new(memory);

    cpu.execute(0x0200, &mut |cpu: &mut Cpu<IrqLineMemory>| {
        if cpu.x() == 3 {
            cpu.request_quit();
            return true;
        }
        false
    })
    .unwrap();

    assert_eq!(cpu.get_memory(COUNTER), 1);
    assert!(!cpu.memory().asserted);
    assert_eq!(cpu.sp(), 0xFF);
    assert!(!cpu.flag_i());
}

#[test]
fn test_memory_irq_line_ignored_while_masked() {
    let memory = IrqLineMemory {
        memory: machine(&[0xE6, 0x10, 0x40]),
        asserted: true,
    };
    let mut cpu = Cpu::new(memory);
    cpu.set_flag_i(true);

    cpu.execute(0x0200, &mut |cpu: &mut Cpu<IrqLineMemory>| {
        if cpu.x() == 5 {
            cpu.request_quit();
            return true;
        }
        false
    })
    .unwrap();

    assert_eq!(cpu.get_memory(COUNTER), 0);
    assert!(cpu.memory().asserted);
}

// ========== Periodic Source ==========

#[test]
fn test_periodic_source_fires_on_schedule() {
    // INC $10 / RTI
    let mut cpu = Cpu::new(machine(&[0xE6, 0x10, 0x40]));
    let clock = ManualClock::new();
    cpu.set_irq_source(PeriodicIrq::new(clock.clone(), 1000));

    let mut polls = 0u32;
    cpu.execute(0x0200, &mut |cpu: &mut Cpu<FlatMemory>| {
        // 100us per instruction, so the timer expires every ten polls
        clock.advance(100);
        polls += 1;
        if cpu.get_memory(COUNTER) == 3 {
            cpu.request_quit();
            return true;
        }
        false
    })
    .unwrap();

    assert_eq!(cpu.get_memory(COUNTER), 3);
    assert!(polls >= 30);
    // Stopped inside the third handler
    assert!(cpu.flag_i());
    assert_eq!(cpu.sp(), 0xFC);
}

#[test]
fn test_periodic_source_waits_for_cli() {
    // SEI / INX x4 / CLI / JMP *
    let mut memory = machine(&[0xE6, 0x10, 0x40]);
    memory.load(0x0300, &[0x78, 0xE8, 0xE8, 0xE8, 0xE8, 0x58, 0x4C, 0x06, 0x03]);
    let mut cpu = Cpu::new(memory);
    let clock = ManualClock::new();
    cpu.set_irq_source(PeriodicIrq::new(clock.clone(), 10));

    cpu.execute(0x0300, &mut |cpu: &mut Cpu<FlatMemory>| {
        clock.advance(100);
        if cpu.get_memory(COUNTER) == 1 {
            cpu.request_quit();
            return true;
        }
        false
    })
    .unwrap();

    assert_eq!(cpu.x(), 4);
    assert!(cpu.flag_i());
    // Interrupted at the JMP following CLI
    assert_eq!(cpu.get_memory(0x01FF), 0x03);
    assert_eq!(cpu.get_memory(0x01FE), 0x06);
}
