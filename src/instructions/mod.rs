//! # 6502 Instruction Implementations
//!
//! Instructions are grouped by category. Every handler receives the CPU and
//! the resolved [`Operand`] and returns how many bytes PC must advance: the
//! operand's encoded length, or 0 when the handler loaded PC itself (taken
//! branches, jumps, calls, returns, BRK).
//!
//! ## Categories
//!
//! - **alu**: ADC, SBC, AND, ORA, EOR, CMP, CPX, CPY, BIT
//! - **branches**: BCC, BCS, BEQ, BNE, BMI, BPL, BVC, BVS
//! - **shifts**: ASL, LSR, ROL, ROR
//! - **load_store**: LDA, LDX, LDY, STA, STX, STY
//! - **inc_dec**: INC, DEC, INX, INY, DEX, DEY
//! - **control**: JMP, JSR, RTS, RTI, BRK, NOP
//! - **stack**: PHA, PHP, PLA, PLP
//! - **flags**: CLC, SEC, CLI, SEI, CLD, SED, CLV
//! - **transfer**: TAX, TAY, TXA, TYA, TSX, TXS

pub(crate) mod alu;
pub(crate) mod branches;
pub(crate) mod control;
pub(crate) mod flags;
pub(crate) mod inc_dec;
pub(crate) mod load_store;
pub(crate) mod shifts;
pub(crate) mod stack;
pub(crate) mod transfer;

use crate::addressing::Operand;
use crate::{Cpu, ExecutionError, MemoryBus, Operation, OPCODE_TABLE};

/// Fetches, decodes and executes the instruction at PC.
///
/// An illegal opcode leaves PC and cycles untouched.
pub(crate) fn execute<M: MemoryBus>(cpu: &mut Cpu<M>) -> Result<(), ExecutionError> {
    let address = cpu.pc;
    let opcode = cpu.memory.read(address);
    let metadata = &OPCODE_TABLE[opcode as usize];

    if !metadata.is_legal() {
        return Err(ExecutionError::IllegalOpcode { opcode, address });
    }

    let mode = metadata.addressing_mode;
    let operand = cpu.resolve_operand(mode);

    let advance = dispatch(cpu, metadata.operation, operand, mode);

    cpu.cycles += metadata.base_cycles as u64;
    cpu.pc = cpu.pc.wrapping_add(advance);

    Ok(())
}

fn dispatch<M: MemoryBus>(
    cpu: &mut Cpu<M>,
    operation: Operation,
    operand: Operand,
    mode: crate::AddressingMode,
) -> u16 {
    match operation {
        Operation::Adc => alu::execute_adc(cpu, operand),
        Operation::Sbc => alu::execute_sbc(cpu, operand),
        Operation::And => alu::execute_and(cpu, operand),
        Operation::Ora => alu::execute_ora(cpu, operand),
        Operation::Eor => alu::execute_eor(cpu, operand),
        Operation::Cmp => alu::execute_cmp(cpu, operand),
        Operation::Cpx => alu::execute_cpx(cpu, operand),
        Operation::Cpy => alu::execute_cpy(cpu, operand),
        Operation::Bit => alu::execute_bit(cpu, operand),

        Operation::Bcc => {
            let taken = !cpu.flag_c;
            branches::branch_if(cpu, operand, taken)
        }
        Operation::Bcs => {
            let taken = cpu.flag_c;
            branches::branch_if(cpu, operand, taken)
        }
        Operation::Beq => {
            let taken = cpu.flag_z;
            branches::branch_if(cpu, operand, taken)
        }
        Operation::Bne => {
            let taken = !cpu.flag_z;
            branches::branch_if(cpu, operand, taken)
        }
        Operation::Bmi => {
            let taken = cpu.flag_n;
            branches::branch_if(cpu, operand, taken)
        }
        Operation::Bpl => {
            let taken = !cpu.flag_n;
            branches::branch_if(cpu, operand, taken)
        }
        Operation::Bvc => {
            let taken = !cpu.flag_v;
            branches::branch_if(cpu, operand, taken)
        }
        Operation::Bvs => {
            let taken = cpu.flag_v;
            branches::branch_if(cpu, operand, taken)
        }

        Operation::Asl => shifts::execute_asl(cpu, operand, mode),
        Operation::Lsr => shifts::execute_lsr(cpu, operand, mode),
        Operation::Rol => shifts::execute_rol(cpu, operand, mode),
        Operation::Ror => shifts::execute_ror(cpu, operand, mode),

        Operation::Lda => load_store::execute_lda(cpu, operand),
        Operation::Ldx => load_store::execute_ldx(cpu, operand),
        Operation::Ldy => load_store::execute_ldy(cpu, operand),
        Operation::Sta => load_store::execute_sta(cpu, operand),
        Operation::Stx => load_store::execute_stx(cpu, operand),
        Operation::Sty => load_store::execute_sty(cpu, operand),

        Operation::Inc => inc_dec::execute_inc(cpu, operand),
        Operation::Dec => inc_dec::execute_dec(cpu, operand),
        Operation::Inx => inc_dec::execute_inx(cpu, operand),
        Operation::Iny => inc_dec::execute_iny(cpu, operand),
        Operation::Dex => inc_dec::execute_dex(cpu, operand),
        Operation::Dey => inc_dec::execute_dey(cpu, operand),

        Operation::Jmp => control::execute_jmp(cpu, operand),
        Operation::Jsr => control::execute_jsr(cpu, operand),
        Operation::Rts => control::execute_rts(cpu, operand),
        Operation::Rti => control::execute_rti(cpu, operand),
        Operation::Brk => control::execute_brk(cpu, operand),
        Operation::Nop => operand.bytes,

        Operation::Pha => stack::execute_pha(cpu, operand),
        Operation::Php => stack::execute_php(cpu, operand),
        Operation::Pla => stack::execute_pla(cpu, operand),
        Operation::Plp => stack::execute_plp(cpu, operand),

        Operation::Clc => flags::set_flag(&mut cpu.flag_c, false, operand),
        Operation::Sec => flags::set_flag(&mut cpu.flag_c, true, operand),
        Operation::Cli => flags::set_flag(&mut cpu.flag_i, false, operand),
        Operation::Sei => flags::set_flag(&mut cpu.flag_i, true, operand),
        Operation::Cld => flags::set_flag(&mut cpu.flag_d, false, operand),
        Operation::Sed => flags::set_flag(&mut cpu.flag_d, true, operand),
        Operation::Clv => flags::set_flag(&mut cpu.flag_v, false, operand),

        Operation::Tax => transfer::execute_tax(cpu, operand),
        Operation::Tay => transfer::execute_tay(cpu, operand),
        Operation::Txa => transfer::execute_txa(cpu, operand),
        Operation::Tya => transfer::execute_tya(cpu, operand),
        Operation::Tsx => transfer::execute_tsx(cpu, operand),
        Operation::Txs => transfer::execute_txs(cpu, operand),

        // Rejected by `execute` before dispatch
        Operation::Illegal => 0,
    }
}
