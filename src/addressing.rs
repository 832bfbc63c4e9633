//! # Addressing Modes
//!
//! This module defines the 13 addressing modes supported by the 6502 processor
//! and the resolution step that turns the bytes following an opcode into an
//! effective address.
//!
//! Resolution produces an [`Operand`] record: the effective address the
//! instruction acts on, plus how many bytes the instruction occupies so the
//! dispatcher knows how far to advance PC.

use crate::{Cpu, MemoryBus};

/// 6502 addressing mode enumeration.
///
/// # Operand Sizes
///
/// - **0 bytes**: Implicit, Accumulator
/// - **1 byte**: Immediate, ZeroPage, ZeroPageX, ZeroPageY, Relative, IndirectX, IndirectY
/// - **2 bytes**: Absolute, AbsoluteX, AbsoluteY, Indirect
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressingMode {
    /// No operand, operation implied by instruction.
    ///
    /// Examples: CLC, RTS, NOP
    Implicit,

    /// Operates directly on the accumulator register.
    ///
    /// Examples: LSR A, ROL A, ASL A
    Accumulator,

    /// 8-bit constant operand in instruction.
    ///
    /// Example: LDA #$10
    Immediate,

    /// 8-bit address in zero page (0x00-0xFF).
    ///
    /// Example: LDA $80
    ZeroPage,

    /// Zero page address indexed by X, wrapping within zero page.
    ///
    /// Example: LDA $F0,X with X=$20 reads $0010
    ZeroPageX,

    /// Zero page address indexed by Y, wrapping within zero page.
    ///
    /// Example: LDX $80,Y
    ZeroPageY,

    /// Signed 8-bit offset for branch instructions, relative to the
    /// address of the following instruction.
    ///
    /// Example: BEQ $FE (branch to self)
    Relative,

    /// Full 16-bit address.
    ///
    /// Example: JMP $1234
    Absolute,

    /// 16-bit address indexed by X, wrapping modulo 65536.
    ///
    /// Example: LDA $1234,X
    AbsoluteX,

    /// 16-bit address indexed by Y, wrapping modulo 65536.
    ///
    /// Example: LDA $1234,Y
    AbsoluteY,

    /// Indirect jump through 16-bit pointer. Only used by JMP.
    ///
    /// Example: JMP ($FFFC)
    ///
    /// A pointer whose low byte is $FF fetches its high byte from the start
    /// of the same page: `JMP ($12FF)` reads $12FF and $1200.
    Indirect,

    /// Indexed indirect: (ZP + X) then dereference.
    ///
    /// Example: LDA ($40,X). Both pointer bytes are fetched from zero page.
    IndirectX,

    /// Indirect indexed: ZP dereference then + Y.
    ///
    /// Example: LDA ($40),Y
    IndirectY,
}

impl AddressingMode {
    /// Number of operand bytes following the opcode.
    pub const fn operand_len(self) -> u8 {
        match self {
            AddressingMode::Implicit | AddressingMode::Accumulator => 0,
            AddressingMode::Immediate
            | AddressingMode::ZeroPage
            | AddressingMode::ZeroPageX
            | AddressingMode::ZeroPageY
            | AddressingMode::Relative
            | AddressingMode::IndirectX
            | AddressingMode::IndirectY => 1,
            AddressingMode::Absolute
            | AddressingMode::AbsoluteX
            | AddressingMode::AbsoluteY
            | AddressingMode::Indirect => 2,
        }
    }
}

/// Effective address and encoded length of one instruction.
///
/// For `Immediate` the address is that of the operand byte itself, so loads
/// and ALU operations read it like any other memory operand. `Implicit` and
/// `Accumulator` carry address 0, which handlers never consult.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Operand {
    /// Effective address the instruction reads or writes.
    pub address: u16,
    /// Instruction length in bytes, opcode included.
    pub bytes: u16,
}

/// Reads a little-endian word, incrementing the address modulo 65536.
pub(crate) fn read_word<M: MemoryBus>(memory: &mut M, addr: u16) -> u16 {
    let lo = memory.read(addr) as u16;
    let hi = memory.read(addr.wrapping_add(1)) as u16;
    (hi << 8) | lo
}

/// Reads a pointer stored in zero page; the high byte wraps to $00.
pub(crate) fn read_zero_page_word<M: MemoryBus>(memory: &mut M, zp: u8) -> u16 {
    let lo = memory.read(zp as u16) as u16;
    let hi = memory.read(zp.wrapping_add(1) as u16) as u16;
    (hi << 8) | lo
}

/// Resolves the indirect JMP pointer, reproducing the page-wrap quirk.
pub(crate) fn read_indirect_target<M: MemoryBus>(memory: &mut M, ptr: u16) -> u16 {
    let lo = memory.read(ptr) as u16;
    let hi_addr = if ptr & 0x00FF == 0x00FF {
        ptr & 0xFF00
    } else {
        ptr.wrapping_add(1)
    };
    let hi = memory.read(hi_addr) as u16;
    (hi << 8) | lo
}

/// Computes a branch destination from the branch instruction's own address.
pub(crate) fn branch_target(pc: u16, offset: u8) -> u16 {
    pc.wrapping_add(2).wrapping_add(offset as i8 as i16 as u16)
}

impl<M: MemoryBus> Cpu<M> {
    /// Resolves the operand of the instruction at PC for `mode`.
    pub(crate) fn resolve_operand(&mut self, mode: AddressingMode) -> Operand {
        let pc = self.pc;
        let bytes = 1 + mode.operand_len() as u16;

        let address = match mode {
            AddressingMode::Implicit | AddressingMode::Accumulator => 0,
            AddressingMode::Immediate => pc.wrapping_add(1),
            AddressingMode::ZeroPage => self.memory.read(pc.wrapping_add(1)) as u16,
            AddressingMode::ZeroPageX => {
                let zp = self.memory.read(pc.wrapping_add(1));
                zp.wrapping_add(self.x) as u16
            }
            AddressingMode::ZeroPageY => {
                let zp = self.memory.read(pc.wrapping_add(1));
                zp.wrapping_add(self.y) as u16
            }
            AddressingMode::Relative => {
                let offset = self.memory.read(pc.wrapping_add(1));
                branch_target(pc, offset)
            }
            AddressingMode::Absolute => read_word(&mut self.memory, pc.wrapping_add(1)),
            AddressingMode::AbsoluteX => {
                read_word(&mut self.memory, pc.wrapping_add(1)).wrapping_add(self.x as u16)
            }
            AddressingMode::AbsoluteY => {
                read_word(&mut self.memory, pc.wrapping_add(1)).wrapping_add(self.y as u16)
            }
            AddressingMode::Indirect => {
                let ptr = read_word(&mut self.memory, pc.wrapping_add(1));
                read_indirect_target(&mut self.memory, ptr)
            }
            AddressingMode::IndirectX => {
                let zp = self.memory.read(pc.wrapping_add(1)).wrapping_add(self.x);
                read_zero_page_word(&mut self.memory, zp)
            }
            AddressingMode::IndirectY => {
                let zp = self.memory.read(pc.wrapping_add(1));
                read_zero_page_word(&mut self.memory, zp).wrapping_add(self.y as u16)
            }
        };

        Operand { address, bytes }
    }
}
