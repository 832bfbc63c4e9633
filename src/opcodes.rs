//! # Opcode Table
//!
//! The 256-entry table indexed by opcode byte is the single source of truth
//! for decoding: it names the operation, the addressing mode, the base cycle
//! cost and the encoded length of every instruction. The interpreter and the
//! disassembler both decode through it.
//!
//! The table covers the 151 documented NMOS opcodes. The remaining 105 byte
//! values decode to [`Operation::Illegal`] with mnemonic `"???"`.

use crate::addressing::AddressingMode;

/// Instruction selected by an opcode byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Adc,
    And,
    Asl,
    Bcc,
    Bcs,
    Beq,
    Bit,
    Bmi,
    Bne,
    Bpl,
    Brk,
    Bvc,
    Bvs,
    Clc,
    Cld,
    Cli,
    Clv,
    Cmp,
    Cpx,
    Cpy,
    Dec,
    Dex,
    Dey,
    Eor,
    Inc,
    Inx,
    Iny,
    Jmp,
    Jsr,
    Lda,
    Ldx,
    Ldy,
    Lsr,
    Nop,
    Ora,
    Pha,
    Php,
    Pla,
    Plp,
    Rol,
    Ror,
    Rti,
    Rts,
    Sbc,
    Sec,
    Sed,
    Sei,
    Sta,
    Stx,
    Sty,
    Tax,
    Tay,
    Tsx,
    Txa,
    Txs,
    Tya,
    /// Undocumented opcode; executing it is an error.
    Illegal,
}

impl Operation {
    /// Three-letter assembler mnemonic, `"???"` for illegal opcodes.
    pub const fn mnemonic(self) -> &'static str {
        match self {
            Operation::Adc => "ADC",
            Operation::And => "AND",
            Operation::Asl => "ASL",
            Operation::Bcc => "BCC",
            Operation::Bcs => "BCS",
            Operation::Beq => "BEQ",
            Operation::Bit => "BIT",
            Operation::Bmi => "BMI",
            Operation::Bne => "BNE",
            Operation::Bpl => "BPL",
            Operation::Brk => "BRK",
            Operation::Bvc => "BVC",
            Operation::Bvs => "BVS",
            Operation::Clc => "CLC",
            Operation::Cld => "CLD",
            Operation::Cli => "CLI",
            Operation::Clv => "CLV",
            Operation::Cmp => "CMP",
            Operation::Cpx => "CPX",
            Operation::Cpy => "CPY",
            Operation::Dec => "DEC",
            Operation::Dex => "DEX",
            Operation::Dey => "DEY",
            Operation::Eor => "EOR",
            Operation::Inc => "INC",
            Operation::Inx => "INX",
            Operation::Iny => "INY",
            Operation::Jmp => "JMP",
            Operation::Jsr => "JSR",
            Operation::Lda => "LDA",
            Operation::Ldx => "LDX",
            Operation::Ldy => "LDY",
            Operation::Lsr => "LSR",
            Operation::Nop => "NOP",
            Operation::Ora => "ORA",
            Operation::Pha => "PHA",
            Operation::Php => "PHP",
            Operation::Pla => "PLA",
            Operation::Plp => "PLP",
            Operation::Rol => "ROL",
            Operation::Ror => "ROR",
            Operation::Rti => "RTI",
            Operation::Rts => "RTS",
            Operation::Sbc => "SBC",
            Operation::Sec => "SEC",
            Operation::Sed => "SED",
            Operation::Sei => "SEI",
            Operation::Sta => "STA",
            Operation::Stx => "STX",
            Operation::Sty => "STY",
            Operation::Tax => "TAX",
            Operation::Tay => "TAY",
            Operation::Tsx => "TSX",
            Operation::Txa => "TXA",
            Operation::Txs => "TXS",
            Operation::Tya => "TYA",
            Operation::Illegal => "???",
        }
    }

    /// True for the eight conditional branches.
    pub const fn is_branch(self) -> bool {
        matches!(
            self,
            Operation::Bcc
                | Operation::Bcs
                | Operation::Beq
                | Operation::Bmi
                | Operation::Bne
                | Operation::Bpl
                | Operation::Bvc
                | Operation::Bvs
        )
    }
}

/// Metadata for a single 6502 opcode.
///
/// ```
/// use emu6502::{AddressingMode, Operation, OPCODE_TABLE};
///
/// let lda_imm = &OPCODE_TABLE[0xA9];
/// assert_eq!(lda_imm.mnemonic, "LDA");
/// assert_eq!(lda_imm.operation, Operation::Lda);
/// assert_eq!(lda_imm.addressing_mode, AddressingMode::Immediate);
/// assert_eq!(lda_imm.base_cycles, 2);
/// assert_eq!(lda_imm.size_bytes, 2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpcodeMetadata {
    /// Instruction mnemonic (e.g., "LDA", "???" for illegal opcodes).
    pub mnemonic: &'static str,

    /// Handler selector.
    pub operation: Operation,

    /// Addressing mode for this instruction.
    pub addressing_mode: AddressingMode,

    /// Base cycle cost. Page-crossing and branch-taken penalties are not
    /// modelled. Illegal opcodes cost 0.
    pub base_cycles: u8,

    /// Total instruction size in bytes, opcode included (1-3).
    pub size_bytes: u8,
}

impl OpcodeMetadata {
    /// Whether the opcode is part of the documented instruction set.
    pub const fn is_legal(&self) -> bool {
        !matches!(self.operation, Operation::Illegal)
    }
}

const ILLEGAL: OpcodeMetadata = OpcodeMetadata {
    mnemonic: "???",
    operation: Operation::Illegal,
    addressing_mode: AddressingMode::Implicit,
    base_cycles: 0,
    size_bytes: 1,
};

const fn op(
    operation: Operation,
    addressing_mode: AddressingMode,
    base_cycles: u8,
) -> OpcodeMetadata {
    OpcodeMetadata {
        mnemonic: operation.mnemonic(),
        operation,
        addressing_mode,
        base_cycles,
        size_bytes: 1 + addressing_mode.operand_len(),
    }
}

/// Complete 256-entry opcode table indexed by opcode byte value.
///
/// ```
/// use emu6502::OPCODE_TABLE;
///
/// let brk = &OPCODE_TABLE[0x00];
/// assert_eq!((brk.mnemonic, brk.base_cycles, brk.size_bytes), ("BRK", 7, 1));
///
/// let illegal = &OPCODE_TABLE[0x02];
/// assert_eq!(illegal.mnemonic, "???");
/// assert!(!illegal.is_legal());
/// ```
pub const OPCODE_TABLE: [OpcodeMetadata; 256] = build_table();

const fn build_table() -> [OpcodeMetadata; 256] {
    use AddressingMode::*;
    use Operation::*;

    let mut t = [ILLEGAL; 256];

    // Loads
    t[0xA9] = op(Lda, Immediate, 2);
    t[0xA5] = op(Lda, ZeroPage, 3);
    t[0xB5] = op(Lda, ZeroPageX, 4);
    t[0xAD] = op(Lda, Absolute, 4);
    t[0xBD] = op(Lda, AbsoluteX, 4);
    t[0xB9] = op(Lda, AbsoluteY, 4);
    t[0xA1] = op(Lda, IndirectX, 6);
    t[0xB1] = op(Lda, IndirectY, 5);

    t[0xA2] = op(Ldx, Immediate, 2);
    t[0xA6] = op(Ldx, ZeroPage, 3);
    t[0xB6] = op(Ldx, ZeroPageY, 4);
    t[0xAE] = op(Ldx, Absolute, 4);
    t[0xBE] = op(Ldx, AbsoluteY, 4);

    t[0xA0] = op(Ldy, Immediate, 2);
    t[0xA4] = op(Ldy, ZeroPage, 3);
    t[0xB4] = op(Ldy, ZeroPageX, 4);
    t[0xAC] = op(Ldy, Absolute, 4);
    t[0xBC] = op(Ldy, AbsoluteX, 4);

    // Stores
    t[0x85] = op(Sta, ZeroPage, 3);
    t[0x95] = op(Sta, ZeroPageX, 4);
    t[0x8D] = op(Sta, Absolute, 4);
    t[0x9D] = op(Sta, AbsoluteX, 5);
    t[0x99] = op(Sta, AbsoluteY, 5);
    t[0x81] = op(Sta, IndirectX, 6);
    t[0x91] = op(Sta, IndirectY, 6);

    t[0x86] = op(Stx, ZeroPage, 3);
    t[0x96] = op(Stx, ZeroPageY, 4);
    t[0x8E] = op(Stx, Absolute, 4);

    t[0x84] = op(Sty, ZeroPage, 3);
    t[0x94] = op(Sty, ZeroPageX, 4);
    t[0x8C] = op(Sty, Absolute, 4);

    // Arithmetic and logic
    t[0x69] = op(Adc, Immediate, 2);
    t[0x65] = op(Adc, ZeroPage, 3);
    t[0x75] = op(Adc, ZeroPageX, 4);
    t[0x6D] = op(Adc, Absolute, 4);
    t[0x7D] = op(Adc, AbsoluteX, 4);
    t[0x79] = op(Adc, AbsoluteY, 4);
    t[0x61] = op(Adc, IndirectX, 6);
    t[0x71] = op(Adc, IndirectY, 5);

    t[0xE9] = op(Sbc, Immediate, 2);
    t[0xE5] = op(Sbc, ZeroPage, 3);
    t[0xF5] = op(Sbc, ZeroPageX, 4);
    t[0xED] = op(Sbc, Absolute, 4);
    t[0xFD] = op(Sbc, AbsoluteX, 4);
    t[0xF9] = op(Sbc, AbsoluteY, 4);
    t[0xE1] = op(Sbc, IndirectX, 6);
    t[0xF1] = op(Sbc, IndirectY, 5);

    t[0x29] = op(And, Immediate, 2);
    t[0x25] = op(And, ZeroPage, 3);
    t[0x35] = op(And, ZeroPageX, 4);
    t[0x2D] = op(And, Absolute, 4);
    t[0x3D] = op(And, AbsoluteX, 4);
    t[0x39] = op(And, AbsoluteY, 4);
    t[0x21] = op(And, IndirectX, 6);
    t[0x31] = op(And, IndirectY, 5);

    t[0x09] = op(Ora, Immediate, 2);
    t[0x05] = op(Ora, ZeroPage, 3);
    t[0x15] = op(Ora, ZeroPageX, 4);
    t[0x0D] = op(Ora, Absolute, 4);
    t[0x1D] = op(Ora, AbsoluteX, 4);
    t[0x19] = op(Ora, AbsoluteY, 4);
    t[0x01] = op(Ora, IndirectX, 6);
    t[0x11] = op(Ora, IndirectY, 5);

    t[0x49] = op(Eor, Immediate, 2);
    t[0x45] = op(Eor, ZeroPage, 3);
    t[0x55] = op(Eor, ZeroPageX, 4);
    t[0x4D] = op(Eor, Absolute, 4);
    t[0x5D] = op(Eor, AbsoluteX, 4);
    t[0x59] = op(Eor, AbsoluteY, 4);
    t[0x41] = op(Eor, IndirectX, 6);
    t[0x51] = op(Eor, IndirectY, 5);

    t[0xC9] = op(Cmp, Immediate, 2);
    t[0xC5] = op(Cmp, ZeroPage, 3);
    t[0xD5] = op(Cmp, ZeroPageX, 4);
    t[0xCD] = op(Cmp, Absolute, 4);
    t[0xDD] = op(Cmp, AbsoluteX, 4);
    t[0xD9] = op(Cmp, AbsoluteY, 4);
    t[0xC1] = op(Cmp, IndirectX, 6);
    t[0xD1] = op(Cmp, IndirectY, 5);

    t[0xE0] = op(Cpx, Immediate, 2);
    t[0xE4] = op(Cpx, ZeroPage, 3);
    t[0xEC] = op(Cpx, Absolute, 4);

    t[0xC0] = op(Cpy, Immediate, 2);
    t[0xC4] = op(Cpy, ZeroPage, 3);
    t[0xCC] = op(Cpy, Absolute, 4);

    t[0x24] = op(Bit, ZeroPage, 3);
    t[0x2C] = op(Bit, Absolute, 4);

    // Shifts and rotates
    t[0x0A] = op(Asl, Accumulator, 2);
    t[0x06] = op(Asl, ZeroPage, 5);
    t[0x16] = op(Asl, ZeroPageX, 6);
    t[0x0E] = op(Asl, Absolute, 6);
    t[0x1E] = op(Asl, AbsoluteX, 7);

    t[0x4A] = op(Lsr, Accumulator, 2);
    t[0x46] = op(Lsr, ZeroPage, 5);
    t[0x56] = op(Lsr, ZeroPageX, 6);
    t[0x4E] = op(Lsr, Absolute, 6);
    t[0x5E] = op(Lsr, AbsoluteX, 7);

    t[0x2A] = op(Rol, Accumulator, 2);
    t[0x26] = op(Rol, ZeroPage, 5);
    t[0x36] = op(Rol, ZeroPageX, 6);
    t[0x2E] = op(Rol, Absolute, 6);
    t[0x3E] = op(Rol, AbsoluteX, 7);

    t[0x6A] = op(Ror, Accumulator, 2);
    t[0x66] = op(Ror, ZeroPage, 5);
    t[0x76] = op(Ror, ZeroPageX, 6);
    t[0x6E] = op(Ror, Absolute, 6);
    t[0x7E] = op(Ror, AbsoluteX, 7);

    // Increments and decrements
    t[0xE6] = op(Inc, ZeroPage, 5);
    t[0xF6] = op(Inc, ZeroPageX, 6);
    t[0xEE] = op(Inc, Absolute, 6);
    t[0xFE] = op(Inc, AbsoluteX, 7);

    t[0xC6] = op(Dec, ZeroPage, 5);
    t[0xD6] = op(Dec, ZeroPageX, 6);
    t[0xCE] = op(Dec, Absolute, 6);
    t[0xDE] = op(Dec, AbsoluteX, 7);

    t[0xE8] = op(Inx, Implicit, 2);
    t[0xC8] = op(Iny, Implicit, 2);
    t[0xCA] = op(Dex, Implicit, 2);
    t[0x88] = op(Dey, Implicit, 2);

    // Branches
    t[0x90] = op(Bcc, Relative, 2);
    t[0xB0] = op(Bcs, Relative, 2);
    t[0xF0] = op(Beq, Relative, 2);
    t[0xD0] = op(Bne, Relative, 2);
    t[0x30] = op(Bmi, Relative, 2);
    t[0x10] = op(Bpl, Relative, 2);
    t[0x50] = op(Bvc, Relative, 2);
    t[0x70] = op(Bvs, Relative, 2);

    // Control flow
    t[0x00] = op(Brk, Implicit, 7);
    t[0x4C] = op(Jmp, Absolute, 3);
    t[0x6C] = op(Jmp, Indirect, 5);
    t[0x20] = op(Jsr, Absolute, 6);
    t[0x60] = op(Rts, Implicit, 6);
    t[0x40] = op(Rti, Implicit, 6);
    t[0xEA] = op(Nop, Implicit, 2);

    // Stack
    t[0x48] = op(Pha, Implicit, 3);
    t[0x08] = op(Php, Implicit, 3);
    t[0x68] = op(Pla, Implicit, 4);
    t[0x28] = op(Plp, Implicit, 4);

    // Flags
    t[0x18] = op(Clc, Implicit, 2);
    t[0x38] = op(Sec, Implicit, 2);
    t[0x58] = op(Cli, Implicit, 2);
    t[0x78] = op(Sei, Implicit, 2);
    t[0xD8] = op(Cld, Implicit, 2);
    t[0xF8] = op(Sed, Implicit, 2);
    t[0xB8] = op(Clv, Implicit, 2);

    // Transfers
    t[0xAA] = op(Tax, Implicit, 2);
    t[0xA8] = op(Tay, Implicit, 2);
    t[0x8A] = op(Txa, Implicit, 2);
    t[0x98] = op(Tya, Implicit, 2);
    t[0xBA] = op(Tsx, Implicit, 2);
    t[0x9A] = op(Txs, Implicit, 2);

    t
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_documented_opcode_count() {
        let legal = OPCODE_TABLE.iter().filter(|m| m.is_legal()).count();
        assert_eq!(legal, 151);
    }

    #[test]
    fn test_illegal_entries_are_uniform() {
        for meta in OPCODE_TABLE.iter().filter(|m| !m.is_legal()) {
            assert_eq!(meta.mnemonic, "???");
            assert_eq!(meta.base_cycles, 0);
            assert_eq!(meta.size_bytes, 1);
        }
    }

    #[test]
    fn test_sizes_follow_addressing_mode() {
        assert_eq!(OPCODE_TABLE[0xEA].size_bytes, 1);
        assert_eq!(OPCODE_TABLE[0x0A].size_bytes, 1);
        assert_eq!(OPCODE_TABLE[0xD0].size_bytes, 2);
        assert_eq!(OPCODE_TABLE[0x6C].size_bytes, 3);
        assert_eq!(OPCODE_TABLE[0x20].size_bytes, 3);
    }

    #[test]
    fn test_branch_classification() {
        let branches = OPCODE_TABLE
            .iter()
            .filter(|m| m.operation.is_branch())
            .count();
        assert_eq!(branches, 8);
        assert!(!Operation::Jmp.is_branch());
    }
}
