//! 6502 Disassembler Module
//!
//! Decodes machine code, either live from a [`MemoryBus`] (used for the
//! execution trace) or from a byte slice, and renders it as assembly text.

pub mod decoder;
pub mod formatter;

pub use decoder::{decode, decode_bytes};
pub use formatter::{format_instruction, format_long, format_registers, format_trace_line};

use crate::addressing::AddressingMode;
use crate::opcodes::Operation;

/// A single decoded instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedInstruction {
    /// Memory address where this instruction starts
    pub address: u16,

    /// The opcode byte value (0x00-0xFF)
    pub opcode: u8,

    /// Operation selected by the opcode, `Illegal` for undocumented bytes
    pub operation: Operation,

    /// Instruction mnemonic (e.g., "LDA", "???")
    pub mnemonic: &'static str,

    /// Addressing mode used by this instruction
    pub addressing_mode: AddressingMode,

    /// Encoded bytes, opcode first (1-3 bytes)
    pub bytes: Vec<u8>,

    /// True for conditional branches
    pub conditional: bool,

    /// Control-transfer destination for branches, JMP and JSR
    pub target: Option<u16>,
}

impl DecodedInstruction {
    /// Encoded length in bytes.
    pub fn size(&self) -> u16 {
        self.bytes.len() as u16
    }

    /// Operand bytes following the opcode.
    pub fn operand_bytes(&self) -> &[u8] {
        &self.bytes[1..]
    }

    /// A byte that does not start a decodable instruction.
    pub(crate) fn unknown(address: u16, byte: u8) -> Self {
        Self {
            address,
            opcode: byte,
            operation: Operation::Illegal,
            mnemonic: Operation::Illegal.mnemonic(),
            addressing_mode: AddressingMode::Implicit,
            bytes: vec![byte],
            conditional: false,
            target: None,
        }
    }
}

/// Disassembles a byte slice whose first byte sits at `start`.
///
/// Undocumented opcodes and an instruction cut short by the end of the slice
/// yield one-byte `???` entries.
///
/// ```
/// use emu6502::{disassemble, format_instruction};
///
/// let listing: Vec<String> = disassemble(&[0xA9, 0x05, 0xD0, 0xFE, 0x02], 0x8000)
///     .iter()
///     .map(format_instruction)
///     .collect();
/// assert_eq!(listing, ["LDA #$05", "BNE $8002", "???"]);
/// ```
pub fn disassemble(bytes: &[u8], start: u16) -> Vec<DecodedInstruction> {
    let mut instructions = Vec::new();
    let mut offset = 0;
    let mut address = start;

    while offset < bytes.len() {
        let instr = decode_bytes(&bytes[offset..], address)
            .unwrap_or_else(|| DecodedInstruction::unknown(address, bytes[offset]));
        offset += instr.bytes.len();
        address = address.wrapping_add(instr.size());
        instructions.push(instr);
    }

    instructions
}
