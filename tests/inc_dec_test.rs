//! Tests for INC, DEC, INX, INY, DEX and DEY.
//!
//! All six wrap modulo 256 and set Z and N from the result; C and V are
//! never touched.

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

// ========== Memory ==========

#[test]
fn test_inc_zero_page_wraps() {
    let mut cpu = setup_cpu();
    cpu.memory_mut().load(0x8000, &[0xE6, 0x10]);
    cpu.set_memory(0x0010, 0xFF);
    cpu.set_flag_c(false);

    cpu.step().unwrap();

    assert_eq!(cpu.get_memory(0x0010), 0x00);
    assert!(cpu.flag_z());
    assert!(!cpu.flag_c());
    assert_eq!(cpu.cycles(), 5);
}

#[test]
fn test_dec_absolute_x_goes_negative() {
    let mut cpu = setup_cpu();
    cpu.memory_mut().load(0x8000, &[0xDE, 0x00, 0x30]);
    cpu.set_memory(0x3001, 0x00);
    cpu.set_x(0x01);

    cpu.step().unwrap();

    assert_eq!(cpu.get_memory(0x3001), 0xFF);
    assert!(cpu.flag_n());
    assert!(!cpu.flag_z());
    assert_eq!(cpu.cycles(), 7);
}

// ========== Registers ==========

#[test]
fn test_inx_wraps_to_zero() {
    let mut cpu = setup_cpu();
    cpu.memory_mut().load(0x8000, &[0xE8]);
    cpu.set_x(0xFF);

    cpu.step().unwrap();

    assert_eq!(cpu.x(), 0x00);
    assert!(cpu.flag_z());
    assert_eq!(cpu.pc(), 0x8001);
}

#[test]
fn test_iny_sets_negative() {
    let mut cpu = setup_cpu();
    cpu.memory_mut().load(0x8000, &[0xC8]);
    cpu.set_y(0x7F);

    cpu.step().unwrap();

    assert_eq!(cpu.y(), 0x80);
    assert!(cpu.flag_n());
}

#[test]
fn test_dex_dey() {
    let mut cpu = setup_cpu();
    cpu.memory_mut().load(0x8000, &[0xCA, 0x88]);
    cpu.set_x(0x01);
    cpu.set_y(0x00);

    cpu.step().unwrap();
    assert_eq!(cpu.x(), 0x00);
    assert!(cpu.flag_z());

    cpu.step().unwrap();
    assert_eq!(cpu.y(), 0xFF);
    assert!(cpu.flag_n());
    assert!(!cpu.flag_z());
}

#[test]
fn test_counting_loop() {
    let mut cpu = setup_cpu();
    // LDX #$05 / loop: DEX / BNE loop
    cpu.memory_mut().load(0x8000, &[0xA2, 0x05, 0xCA, 0xD0, 0xFD]);

    cpu.step().unwrap();
    for _ in 0..10 {
        cpu.step().unwrap();
    }

    assert_eq!(cpu.x(), 0x00);
    assert!(cpu.flag_z());
    assert_eq!(cpu.pc(), 0x8005);
}
