//! Formatting functions for decoded instructions and CPU state

use crate::addressing::AddressingMode;
use crate::disassembler::{decode, DecodedInstruction};
use crate::opcodes::Operation;
use crate::{Cpu, MemoryBus};

/// Formats an instruction as assembly text, e.g. `LDA #$05` or `ASL A`.
///
/// Branch operands are shown as their absolute destination.
pub fn format_instruction(instr: &DecodedInstruction) -> String {
    let operand = format_operand(instr);

    if operand.is_empty() {
        instr.mnemonic.to_string()
    } else {
        format!("{} {}", instr.mnemonic, operand)
    }
}

fn format_operand(instr: &DecodedInstruction) -> String {
    use AddressingMode::*;

    if instr.operation == Operation::Illegal {
        return String::new();
    }

    let operand = instr.operand_bytes();
    let byte = || operand[0];
    let word = || u16::from_le_bytes([operand[0], operand[1]]);

    match instr.addressing_mode {
        Implicit => String::new(),
        Accumulator => "A".to_string(),
        Immediate => format!("#${:02X}", byte()),
        ZeroPage => format!("${:02X}", byte()),
        ZeroPageX => format!("${:02X},X", byte()),
        ZeroPageY => format!("${:02X},Y", byte()),
        Relative => format!("${:04X}", instr.target.unwrap_or_default()),
        Absolute => format!("${:04X}", word()),
        AbsoluteX => format!("${:04X},X", word()),
        AbsoluteY => format!("${:04X},Y", word()),
        Indirect => format!("(${:04X})", word()),
        IndirectX => format!("(${:02X},X)", byte()),
        IndirectY => format!("(${:02X}),Y", byte()),
    }
}

/// Formats the listing line: address, three byte columns, assembly text.
///
/// ```
/// use emu6502::{decode, format_long, FlatMemory};
///
/// let mut memory = FlatMemory::new();
/// memory.load(0x8000, &[0xA9, 0x05]);
/// assert_eq!(format_long(&decode(&mut memory, 0x8000)), "8000 A9 05    LDA #$05");
/// ```
pub fn format_long(instr: &DecodedInstruction) -> String {
    let mut line = format!("{:04X} ", instr.address);
    for column in 0..3 {
        match instr.bytes.get(column) {
            Some(byte) => line.push_str(&format!("{byte:02X} ")),
            None => line.push_str("   "),
        }
    }
    line.push_str(&format_instruction(instr));
    line
}

/// Formats the register display, e.g. `A:05 X:00 Y:00 S:FF P:  -B    `.
///
/// Each flag prints as its letter when set and a space when clear.
pub fn format_registers<M: MemoryBus>(cpu: &Cpu<M>) -> String {
    let flag = |set: bool, letter: char| if set { letter } else { ' ' };
    format!(
        "A:{:02X} X:{:02X} Y:{:02X} S:{:02X} P:{}{}-{}{}{}{}{}",
        cpu.a(),
        cpu.x(),
        cpu.y(),
        cpu.sp(),
        flag(cpu.flag_n(), 'N'),
        flag(cpu.flag_v(), 'V'),
        flag(cpu.flag_b(), 'B'),
        flag(cpu.flag_d(), 'D'),
        flag(cpu.flag_i(), 'I'),
        flag(cpu.flag_z(), 'Z'),
        flag(cpu.flag_c(), 'C'),
    )
}

/// The per-instruction trace line: the listing line of the instruction at
/// PC padded to 30 columns, followed by the register display.
pub fn format_trace_line<M: MemoryBus>(cpu: &mut Cpu<M>) -> String {
    let pc = cpu.pc();
    let instr = decode(cpu.memory_mut(), pc);
    format!("{:<30}{}", format_long(&instr), format_registers(cpu))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::disassembler::{decode_bytes, disassemble};
    use crate::FlatMemory;

    fn text(bytes: &[u8], address: u16) -> String {
        format_instruction(&decode_bytes(bytes, address).unwrap())
    }

    #[test]
    fn test_operand_syntax_per_mode() {
        assert_eq!(text(&[0xEA], 0), "NOP");
        assert_eq!(text(&[0x0A], 0), "ASL A");
        assert_eq!(text(&[0xA9, 0x05], 0), "LDA #$05");
        assert_eq!(text(&[0xA5, 0x10], 0), "LDA $10");
        assert_eq!(text(&[0xB5, 0x10], 0), "LDA $10,X");
        assert_eq!(text(&[0xB6, 0x10], 0), "LDX $10,Y");
        assert_eq!(text(&[0xAD, 0x34, 0x12], 0), "LDA $1234");
        assert_eq!(text(&[0xBD, 0x34, 0x12], 0), "LDA $1234,X");
        assert_eq!(text(&[0xB9, 0x34, 0x12], 0), "LDA $1234,Y");
        assert_eq!(text(&[0x6C, 0xFC, 0xFF], 0), "JMP ($FFFC)");
        assert_eq!(text(&[0xA1, 0x40], 0), "LDA ($40,X)");
        assert_eq!(text(&[0xB1, 0x40], 0), "LDA ($40),Y");
    }

    #[test]
    fn test_branch_shows_destination() {
        assert_eq!(text(&[0xD0, 0x03], 0x0600), "BNE $0605");
        assert_eq!(text(&[0x10, 0xFB], 0x0600), "BPL $05FD");
    }

    #[test]
    fn test_long_line_pads_missing_bytes() {
        let lines: Vec<String> = disassemble(&[0xEA, 0x8D, 0x00, 0x02, 0x02], 0xC000)
            .iter()
            .map(format_long)
            .collect();
        assert_eq!(lines[0], "C000 EA       NOP");
        assert_eq!(lines[1], "C001 8D 00 02 STA $0200");
        assert_eq!(lines[2], "C004 02       ???");
    }

    #[test]
    fn test_register_display() {
        let mut cpu = Cpu::new(FlatMemory::new());
        cpu.set_a(0x05);
        cpu.set_flag_n(true);
        cpu.set_flag_c(true);
        assert_eq!(format_registers(&cpu), "A:05 X:00 Y:00 S:FF P:N -B   C");
    }

    #[test]
    fn test_trace_line_layout() {
        let mut memory = FlatMemory::new();
        memory.load(0x8000, &[0xA9, 0x05]);
        let mut cpu = Cpu::new(memory);
        cpu.set_pc(0x8000);

        let line = format_trace_line(&mut cpu);
        assert_eq!(
            line,
            "8000 A9 05    LDA #$05        A:00 X:00 Y:00 S:FF P:  -B    "
        );
        assert_eq!(line.find("A:00"), Some(30));
    }
}
