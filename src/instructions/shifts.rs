//! # Shift and Rotate Instructions
//!
//! This module implements operations that rearrange the bits of one byte:
//! - ASL: Arithmetic Shift Left
//! - LSR: Logical Shift Right
//! - ROL: Rotate Left through carry
//! - ROR: Rotate Right through carry
//! - RRF: Rotate Right Four (swap nibbles, no flags)
//! - COM: one's complement (N and Z only)

use crate::devices::Peripheral;
use crate::CPU;

/// ASL. Flags affected: C (old bit 7), N, Z
pub(crate) fn execute_asl<P: Peripheral>(cpu: &mut CPU<P>, value: u8) -> u8 {
    cpu.flag_c = (value & 0x80) != 0;
    let result = value << 1;
    cpu.set_nz(result);
    result
}

/// LSR. Flags affected: C (old bit 0), N (always clear), Z
pub(crate) fn execute_lsr<P: Peripheral>(cpu: &mut CPU<P>, value: u8) -> u8 {
    cpu.flag_c = (value & 0x01) != 0;
    let result = value >> 1;
    cpu.set_nz(result);
    result
}

/// ROL. Flags affected: C (old bit 7), N, Z
pub(crate) fn execute_rol<P: Peripheral>(cpu: &mut CPU<P>, value: u8) -> u8 {
    let carry_in = u8::from(cpu.flag_c);
    cpu.flag_c = (value & 0x80) != 0;
    let result = (value << 1) | carry_in;
    cpu.set_nz(result);
    result
}

/// ROR. Flags affected: C (old bit 0), N, Z
pub(crate) fn execute_ror<P: Peripheral>(cpu: &mut CPU<P>, value: u8) -> u8 {
    let carry_in = u8::from(cpu.flag_c) << 7;
    cpu.flag_c = (value & 0x01) != 0;
    let result = (value >> 1) | carry_in;
    cpu.set_nz(result);
    result
}

pub(crate) fn execute_rrf(value: u8) -> u8 {
    value.rotate_right(4)
}

pub(crate) fn execute_com<P: Peripheral>(cpu: &mut CPU<P>, value: u8) -> u8 {
    let result = !value;
    cpu.set_nz(result);
    result
}
