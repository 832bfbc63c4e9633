//! # ALU (Arithmetic Logic Unit) Instructions
//!
//! This module implements arithmetic and logical operations:
//! - ADC / SBC: add and subtract with carry, binary or packed BCD
//! - AND / ORA / EOR: bitwise logic into the accumulator
//! - CMP / CPX / CPY: compare a register, setting N, Z and C only
//! - BIT: test accumulator bits against memory
//!
//! In decimal mode each nibble is unpacked as a digit 0-9 (nibbles A-F are
//! taken at face value, so `$1F` counts as 1*10 + 15), the arithmetic is done
//! on the decimal values and the result is repacked.

use crate::addressing::Operand;
use crate::{Cpu, MemoryBus};

/// Unpacks a BCD byte as `lo + hi * 10`.
fn bcd_to_decimal(value: u8) -> i32 {
    (value & 0x0F) as i32 + (value >> 4) as i32 * 10
}

/// Repacks the two low decimal digits as nibbles.
fn decimal_to_bcd(value: i32) -> u8 {
    ((value % 10) | (((value / 10) % 10) << 4)) as u8
}

/// Executes ADC (Add with Carry).
///
/// Binary mode: 9-bit sum, C from bit 8, V when two operands of the same
/// sign produce a result of the other sign.
///
/// Decimal mode: C when the decimal sum exceeds 99. N and V are cleared.
/// Z reflects the decimal sum before truncation, so a sum of exactly 100
/// stores $00 but leaves Z clear.
pub(crate) fn execute_adc<M: MemoryBus>(cpu: &mut Cpu<M>, operand: Operand) -> u16 {
    let value = cpu.memory.read(operand.address);
    let carry_in = cpu.flag_c as u16;

    if cpu.flag_d {
        let sum = bcd_to_decimal(cpu.a) + bcd_to_decimal(value) + carry_in as i32;
        cpu.flag_c = sum > 99;
        cpu.a = decimal_to_bcd(sum);
        cpu.flag_z = sum == 0;
        cpu.flag_n = false;
        cpu.flag_v = false;
    } else {
        let a = cpu.a;
        let sum = a as u16 + value as u16 + carry_in;
        let result = sum as u8;

        cpu.flag_c = sum & 0x100 != 0;
        // Same-signed operands, differently signed result
        cpu.flag_v = (a ^ result) & (value ^ result) & 0x80 != 0;
        cpu.a = result;
        cpu.update_nz(result);
    }

    operand.bytes
}

/// Executes SBC (Subtract with Carry).
///
/// The borrow is the inverse of C. C is set when the difference is not
/// negative. Binary V follows the subtraction sign rule: neg - pos = pos or
/// pos - neg = neg. Decimal mode adds 100 to a negative difference and clears
/// N and V; Z comes from the repacked byte.
pub(crate) fn execute_sbc<M: MemoryBus>(cpu: &mut Cpu<M>, operand: Operand) -> u16 {
    let value = cpu.memory.read(operand.address);
    let borrow = !cpu.flag_c as i32;

    if cpu.flag_d {
        let mut diff = bcd_to_decimal(cpu.a) - bcd_to_decimal(value) - borrow;
        cpu.flag_c = diff >= 0;
        if diff < 0 {
            diff += 100;
        }
        let result = decimal_to_bcd(diff);
        cpu.a = result;
        cpu.flag_z = result == 0;
        cpu.flag_n = false;
        cpu.flag_v = false;
    } else {
        let a = cpu.a;
        let result = subtract(cpu, a, value, borrow);
        cpu.flag_v = (a ^ value) & (a ^ result) & 0x80 != 0;
        cpu.a = result;
    }

    operand.bytes
}

/// `reg - value - borrow`, setting N, Z and C. Returns the wrapped byte.
fn subtract<M: MemoryBus>(cpu: &mut Cpu<M>, reg: u8, value: u8, borrow: i32) -> u8 {
    let diff = reg as i32 - value as i32 - borrow;
    cpu.flag_c = diff >= 0;
    let result = diff as u8;
    cpu.update_nz(result);
    result
}

/// Shared body of CMP, CPX and CPY: a subtraction with carry forced set
/// whose result is discarded. V is untouched.
fn compare<M: MemoryBus>(cpu: &mut Cpu<M>, reg: u8, operand: Operand) -> u16 {
    let value = cpu.memory.read(operand.address);
    subtract(cpu, reg, value, 0);
    operand.bytes
}

pub(crate) fn execute_cmp<M: MemoryBus>(cpu: &mut Cpu<M>, operand: Operand) -> u16 {
    let a = cpu.a;
    compare(cpu, a, operand)
}

pub(crate) fn execute_cpx<M: MemoryBus>(cpu: &mut Cpu<M>, operand: Operand) -> u16 {
    let x = cpu.x;
    compare(cpu, x, operand)
}

pub(crate) fn execute_cpy<M: MemoryBus>(cpu: &mut Cpu<M>, operand: Operand) -> u16 {
    let y = cpu.y;
    compare(cpu, y, operand)
}

/// Executes AND (Logical AND). Updates Z and N.
pub(crate) fn execute_and<M: MemoryBus>(cpu: &mut Cpu<M>, operand: Operand) -> u16 {
    let result = cpu.a & cpu.memory.read(operand.address);
    cpu.a = result;
    cpu.update_nz(result);
    operand.bytes
}

/// Executes ORA (Logical Inclusive OR). Updates Z and N.
pub(crate) fn execute_ora<M: MemoryBus>(cpu: &mut Cpu<M>, operand: Operand) -> u16 {
    let result = cpu.a | cpu.memory.read(operand.address);
    cpu.a = result;
    cpu.update_nz(result);
    operand.bytes
}

/// Executes EOR (Exclusive OR). Updates Z and N.
pub(crate) fn execute_eor<M: MemoryBus>(cpu: &mut Cpu<M>, operand: Operand) -> u16 {
    let result = cpu.a ^ cpu.memory.read(operand.address);
    cpu.a = result;
    cpu.update_nz(result);
    operand.bytes
}

/// Executes BIT (Bit Test).
///
/// Z is set when `A & M` is zero; N and V are copied from bits 7 and 6 of
/// the memory operand. The accumulator is unchanged.
pub(crate) fn execute_bit<M: MemoryBus>(cpu: &mut Cpu<M>, operand: Operand) -> u16 {
    let value = cpu.memory.read(operand.address);
    cpu.flag_z = cpu.a & value == 0;
    cpu.flag_n = value & 0x80 != 0;
    cpu.flag_v = value & 0x40 != 0;
    operand.bytes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bcd_unpacking_takes_invalid_digits_at_face_value() {
        assert_eq!(bcd_to_decimal(0x99), 99);
        assert_eq!(bcd_to_decimal(0x1F), 25);
        assert_eq!(bcd_to_decimal(0xFF), 165);
    }

    #[test]
    fn test_bcd_repacking_keeps_two_digits() {
        assert_eq!(decimal_to_bcd(0), 0x00);
        assert_eq!(decimal_to_bcd(42), 0x42);
        assert_eq!(decimal_to_bcd(100), 0x00);
        assert_eq!(decimal_to_bcd(199), 0x99);
    }
}
