//! Fuzz target for the disassembler.
//!
//! This target feeds arbitrary byte sequences to the disassembler
//! to find edge cases and crashes in instruction decoding.

#![no_main]

use arbitrary::Arbitrary;
use emu6502::{disassemble, format_long};
use libfuzzer_sys::fuzz_target;

/// Complete fuzz input
#[derive(Debug, Arbitrary)]
struct FuzzInput {
    bytes: Vec<u8>,
    start_address: u16,
}

fuzz_target!(|input: FuzzInput| {
    // Limit input size to prevent OOM
    if input.bytes.len() > 65536 {
        return;
    }

    let instructions = disassemble(&input.bytes, input.start_address);

    let mut total_size: usize = 0;
    let mut expected_address = input.start_address;

    for instr in &instructions {
        assert_eq!(instr.address, expected_address);
        assert!(instr.size() >= 1 && instr.size() <= 3);
        assert_eq!(instr.operand_bytes().len(), instr.size() as usize - 1);

        // Every entry must render
        assert!(!format_long(instr).is_empty());

        total_size += instr.size() as usize;
        expected_address = expected_address.wrapping_add(instr.size());
    }

    // Total size should equal input size
    assert_eq!(total_size, input.bytes.len());
});
