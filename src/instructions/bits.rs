//! # Bit Manipulation Instructions
//!
//! This module implements the 740's single-bit operations:
//! - SEB: Set Bit (accumulator or zero page)
//! - CLB: Clear Bit (accumulator or zero page)
//! - BBS: Branch on Bit Set (accumulator or zero page)
//! - BBC: Branch on Bit Clear (accumulator or zero page)
//!
//! None of these affect the status flags. The bit index comes from the top
//! three bits of the opcode and is carried in the decoded operation.

use super::branches::branch_if;
use crate::addressing::AddressingMode;
use crate::devices::Peripheral;
use crate::CPU;

pub(crate) fn execute_seb(value: u8, bit: u8) -> u8 {
    value | (1 << bit)
}

pub(crate) fn execute_clb(value: u8, bit: u8) -> u8 {
    value & !(1 << bit)
}

/// Executes BBS (`branch_when_set`) or BBC (`!branch_when_set`).
///
/// The accumulator form is `opcode, displacement`; the zero-page form is
/// `opcode, address, displacement`. The displacement is relative to the
/// following instruction in both cases.
pub(crate) fn execute_branch_on_bit<P: Peripheral>(
    cpu: &mut CPU<P>,
    mode: AddressingMode,
    bit: u8,
    branch_when_set: bool,
) {
    let value = match mode {
        AddressingMode::AccumulatorRelative => cpu.a,
        AddressingMode::ZeroPageRelative => {
            let address = cpu.operand_byte(1);
            cpu.read(u16::from(address))
        }
        _ => unreachable!("bit branches cannot use {mode:?}"),
    };
    let displacement = cpu.operand_byte(mode.operand_len()) as i8;

    cpu.advance(mode);
    let target = cpu.pc.wrapping_add_signed(i16::from(displacement));

    let bit_set = (value >> bit) & 1 != 0;
    branch_if(cpu, bit_set == branch_when_set, target);
}
