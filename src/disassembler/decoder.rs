//! Instruction decoder for the 6502 disassembler

use crate::addressing::{branch_target, read_indirect_target, AddressingMode};
use crate::disassembler::DecodedInstruction;
use crate::opcodes::{Operation, OPCODE_TABLE};
use crate::MemoryBus;

/// Decodes the instruction at `addr` by reading memory.
///
/// Always succeeds: an undocumented opcode decodes as a one-byte `???`.
/// An indirect JMP's target is resolved through memory with the `($xxFF)`
/// page-wrap quirk.
pub fn decode<M: MemoryBus>(memory: &mut M, addr: u16) -> DecodedInstruction {
    let opcode = memory.read(addr);
    let metadata = &OPCODE_TABLE[opcode as usize];

    let bytes: Vec<u8> = (0..metadata.size_bytes as u16)
        .map(|i| {
            if i == 0 {
                opcode
            } else {
                memory.read(addr.wrapping_add(i))
            }
        })
        .collect();

    let mut instr = build(addr, &bytes);
    if metadata.addressing_mode == AddressingMode::Indirect {
        let ptr = u16::from_le_bytes([bytes[1], bytes[2]]);
        instr.target = Some(read_indirect_target(memory, ptr));
    }
    instr
}

/// Decodes one instruction from the start of `bytes`.
///
/// Returns `None` for an empty slice, an undocumented opcode or a slice too
/// short for the operand. Indirect JMP targets are left unresolved.
pub fn decode_bytes(bytes: &[u8], address: u16) -> Option<DecodedInstruction> {
    let opcode = *bytes.first()?;
    let metadata = &OPCODE_TABLE[opcode as usize];

    if !metadata.is_legal() {
        return None;
    }

    let encoded = bytes.get(..metadata.size_bytes as usize)?;
    Some(build(address, encoded))
}

fn build(address: u16, bytes: &[u8]) -> DecodedInstruction {
    let opcode = bytes[0];
    let metadata = &OPCODE_TABLE[opcode as usize];

    let target = match (metadata.operation, metadata.addressing_mode) {
        (_, AddressingMode::Relative) => Some(branch_target(address, bytes[1])),
        (Operation::Jmp | Operation::Jsr, AddressingMode::Absolute) => {
            Some(u16::from_le_bytes([bytes[1], bytes[2]]))
        }
        _ => None,
    };

    DecodedInstruction {
        address,
        opcode,
        operation: metadata.operation,
        mnemonic: metadata.mnemonic,
        addressing_mode: metadata.addressing_mode,
        bytes: bytes.to_vec(),
        conditional: metadata.operation.is_branch(),
        target,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FlatMemory;

    #[test]
    fn test_decode_lda_immediate() {
        let instr = decode_bytes(&[0xA9, 0x42], 0x8000).unwrap();

        assert_eq!(instr.address, 0x8000);
        assert_eq!(instr.opcode, 0xA9);
        assert_eq!(instr.mnemonic, "LDA");
        assert_eq!(instr.addressing_mode, AddressingMode::Immediate);
        assert_eq!(instr.operand_bytes(), &[0x42]);
        assert_eq!(instr.size(), 2);
        assert!(!instr.conditional);
        assert_eq!(instr.target, None);
    }

    #[test]
    fn test_decode_rejects_illegal_and_truncated() {
        assert!(decode_bytes(&[], 0).is_none());
        assert!(decode_bytes(&[0x02], 0).is_none());
        assert!(decode_bytes(&[0x8D, 0x00], 0).is_none());
    }

    #[test]
    fn test_branch_is_conditional_with_target() {
        let instr = decode_bytes(&[0xF0, 0xFE], 0x1000).unwrap();
        assert!(instr.conditional);
        assert_eq!(instr.target, Some(0x1000));
    }

    #[test]
    fn test_jsr_target() {
        let instr = decode_bytes(&[0x20, 0xD2, 0xFF], 0x0800).unwrap();
        assert!(!instr.conditional);
        assert_eq!(instr.target, Some(0xFFD2));
    }

    #[test]
    fn test_decode_from_memory_resolves_indirect_quirk() {
        let mut memory = FlatMemory::new();
        memory.load(0x0400, &[0x6C, 0xFF, 0x12]);
        memory.write(0x12FF, 0x00);
        memory.write(0x1200, 0x90);
        memory.write(0x1300, 0x50);

        let instr = decode(&mut memory, 0x0400);
        assert_eq!(instr.mnemonic, "JMP");
        assert_eq!(instr.size(), 3);
        assert_eq!(instr.target, Some(0x9000));
    }

    #[test]
    fn test_decode_from_memory_illegal_is_single_byte() {
        let mut memory = FlatMemory::new();
        memory.load(0x0400, &[0xFF, 0xEA]);
        let instr = decode(&mut memory, 0x0400);
        assert_eq!(instr.operation, Operation::Illegal);
        assert_eq!(instr.bytes, vec![0xFF]);
    }
}
