//! Tests for AND, ORA, EOR and BIT.

use emu6502::{Cpu, FlatMemory, MemoryBus};

/// Helper function to create a CPU with reset vector at 0x8000
fn setup_cpu() -> Cpu<FlatMemory> {
    let mut memory = FlatMemory::new();
    memory.write(0xFFFC, 0x00);
    memory.write(0xFFFD, 0x80);
    let mut cpu = Cpu::new(memory);
    cpu.reset();
    cpu
}

// ========== AND / ORA / EOR ==========

#[test]
fn test_and_immediate() {
    let mut cpu = setup_cpu();
    cpu.memory_mut().load(0x8000, &[0x29, 0x0F]);
    cpu.set_a(0xF0);

    cpu.step().unwrap();

    assert_eq!(cpu.a(), 0x00);
    assert!(cpu.flag_z());
    assert!(!cpu.flag_n());
}

#[test]
fn test_ora_zero_page() {
    let mut cpu = setup_cpu();
    cpu.memory_mut().load(0x8000, &[0x05, 0x20]);
    cpu.set_memory(0x0020, 0x80);
    cpu.set_a(0x01);

    cpu.step().unwrap();

    assert_eq!(cpu.a(), 0x81);
    assert!(cpu.flag_n());
    assert!(!cpu.flag_z());
}

#[test]
fn test_eor_self_clears() {
    let mut cpu = setup_cpu();
    cpu.memory_mut().load(0x8000, &[0x49, 0xA5]);
    cpu.set_a(0xA5);

    cpu.step().unwrap();

    assert_eq!(cpu.a(), 0x00);
    assert!(cpu.flag_z());
}

#[test]
fn test_logic_ops_leave_carry_and_overflow() {
    let mut cpu = setup_cpu();
    // AND #$FF / ORA #$00 / EOR #$00
    cpu.memory_mut().load(0x8000, &[0x29, 0xFF, 0x09, 0x00, 0x49, 0x00]);
    cpu.set_a(0x42);
    cpu.set_flag_c(true);
    cpu.set_flag_v(true);

    for _ in 0..3 {
        cpu.step().unwrap();
    }

    assert_eq!(cpu.a(), 0x42);
    assert!(cpu.flag_c());
    assert!(cpu.flag_v());
}

// ========== BIT ==========

#[test]
fn test_bit_copies_high_bits_of_memory() {
    let mut cpu = setup_cpu();
    cpu.memory_mut().load(0x8000, &[0x24, 0x10]);
    cpu.set_memory(0x0010, 0xC0);
    cpu.set_a(0x01);

    cpu.step().unwrap();

    assert!(cpu.flag_n());
    assert!(cpu.flag_v());
    assert!(cpu.flag_z());
    assert_eq!(cpu.a(), 0x01);
    assert_eq!(cpu.cycles(), 3);
}

#[test]
fn test_bit_absolute_nonzero_mask() {
    let mut cpu = setup_cpu();
    cpu.memory_mut().load(0x8000, &[0x2C, 0x00, 0x30]);
    cpu.set_memory(0x3000, 0x01);
    cpu.set_a(0x01);
    cpu.set_flag_n(true);
    cpu.set_flag_v(true);

    cpu.step().unwrap();

    assert!(!cpu.flag_z());
    assert!(!cpu.flag_n());
    assert!(!cpu.flag_v());
}
