//! # Status Flag Instructions
//!
//! CLC, SEC, CLI, SEI, CLD, SED and CLV each force one flag and touch
//! nothing else. The dispatcher picks the flag; this module only stores.

use crate::addressing::Operand;

pub(crate) fn set_flag(flag: &mut bool, value: bool, operand: Operand) -> u16 {
    *flag = value;
    operand.bytes
}
