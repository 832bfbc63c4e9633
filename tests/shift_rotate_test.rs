//! Tests for ASL, LSR, ROL and ROR in accumulator and memory forms.

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

// ========== ASL ==========

#[test]
fn test_asl_accumulator() {
    let mut cpu = setup_cpu();
    cpu.memory_mut().load(0x8000, &[0x0A]);
    cpu.set_a(0x81);

    cpu.step().unwrap();

    assert_eq!(cpu.a(), 0x02);
    assert!(cpu.flag_c());
    assert!(!cpu.flag_n());
    assert!(!cpu.flag_z());
    assert_eq!(cpu.pc(), 0x8001);
}

#[test]
fn test_asl_zero_page_writes_back() {
    let mut cpu = setup_cpu();
    cpu.memory_mut().load(0x8000, &[0x06, 0x10]);
    cpu.set_memory(0x0010, 0x40);
    cpu.set_a(0x55);

    cpu.step().unwrap();

    assert_eq!(cpu.get_memory(0x0010), 0x80);
    assert_eq!(cpu.a(), 0x55);
    assert!(cpu.flag_n());
    assert!(!cpu.flag_c());
    assert_eq!(cpu.cycles(), 5);
}

// ========== LSR ==========

#[test]
fn test_lsr_accumulator_to_zero() {
    let mut cpu = setup_cpu();
    cpu.memory_mut().load(0x8000, &[0x4A]);
    cpu.set_a(0x01);
    cpu.set_flag_n(true);

    cpu.step().unwrap();

    assert_eq!(cpu.a(), 0x00);
    assert!(cpu.flag_c());
    assert!(cpu.flag_z());
    assert!(!cpu.flag_n());
}

#[test]
fn test_lsr_absolute_x() {
    let mut cpu = setup_cpu();
    cpu.memory_mut().load(0x8000, &[0x5E, 0x00, 0x20]);
    cpu.set_memory(0x2003, 0xFE);
    cpu.set_x(0x03);

    cpu.step().unwrap();

    assert_eq!(cpu.get_memory(0x2003), 0x7F);
    assert!(!cpu.flag_c());
    assert_eq!(cpu.cycles(), 7);
}

// ========== ROL ==========

#[test]
fn test_rol_shifts_carry_into_bit_zero() {
    let mut cpu = setup_cpu();
    cpu.memory_mut().load(0x8000, &[0x2A]);
    cpu.set_a(0x80);
    cpu.set_flag_c(true);

    cpu.step().unwrap();

    assert_eq!(cpu.a(), 0x01);
    assert!(cpu.flag_c());
    assert!(!cpu.flag_z());
}

#[test]
fn test_rol_memory_without_carry() {
    let mut cpu = setup_cpu();
    cpu.memory_mut().load(0x8000, &[0x26, 0x30]);
    cpu.set_memory(0x0030, 0x80);

    cpu.step().unwrap();

    assert_eq!(cpu.get_memory(0x0030), 0x00);
    assert!(cpu.flag_c());
    assert!(cpu.flag_z());
}

// ========== ROR ==========

#[test]
fn test_ror_shifts_carry_into_bit_seven() {
    let mut cpu = setup_cpu();
    cpu.memory_mut().load(0x8000, &[0x6A]);
    cpu.set_a(0x02);
    cpu.set_flag_c(true);

    cpu.step().unwrap();

    assert_eq!(cpu.a(), 0x81);
    assert!(!cpu.flag_c());
    assert!(cpu.flag_n());
}

#[test]
fn test_ror_memory_moves_bit_zero_to_carry() {
    let mut cpu = setup_cpu();
    cpu.memory_mut().load(0x8000, &[0x6E, 0x00, 0x40]);
    cpu.set_memory(0x4000, 0x01);

    cpu.step().unwrap();

    assert_eq!(cpu.get_memory(0x4000), 0x00);
    assert!(cpu.flag_c());
    assert!(cpu.flag_z());
    assert!(!cpu.flag_n());
}

#[test]
fn test_rol_then_ror_restores_value() {
    let mut cpu = setup_cpu();
    cpu.memory_mut().load(0x8000, &[0x2A, 0x6A]);
    cpu.set_a(0xB5);
    cpu.set_flag_c(false);

    cpu.step().unwrap();
    cpu.step().unwrap();

    assert_eq!(cpu.a(), 0xB5);
    assert!(!cpu.flag_c());
}
