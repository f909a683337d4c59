//! # Load and Store Instructions
//!
//! This module implements:
//! - LDA, LDX, LDY: load a register, setting N and Z
//! - LDM: store an immediate value to zero page, no flags
//! - STA, STX, STY: store a register (handled by the dispatcher, no flags)
//!
//! Under index mode LDA writes its operand to the byte at X instead of A; the
//! dispatcher performs that redirection.

use crate::addressing::AddressingMode;
use crate::devices::Peripheral;
use crate::CPU;

/// LDA: returns the value to store into the accumulator (or the byte at X).
pub(crate) fn execute_lda<P: Peripheral>(cpu: &mut CPU<P>, value: u8) -> u8 {
    cpu.set_nz(value);
    value
}

pub(crate) fn execute_ldx<P: Peripheral>(cpu: &mut CPU<P>, value: u8) {
    cpu.x = value;
    cpu.set_nz(value);
}

pub(crate) fn execute_ldy<P: Peripheral>(cpu: &mut CPU<P>, value: u8) {
    cpu.y = value;
    cpu.set_nz(value);
}

/// LDM #imm,zp: the value byte comes first, then the destination.
pub(crate) fn execute_ldm<P: Peripheral>(cpu: &mut CPU<P>) {
    let value = cpu.operand_byte(1);
    let address = cpu.operand_byte(2);
    cpu.advance(AddressingMode::ImmediateZeroPage);
    cpu.write(u16::from(address), value);
}
