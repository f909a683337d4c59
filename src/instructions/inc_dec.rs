//! # Increment and Decrement Instructions
//!
//! This module implements:
//! - INC/DEC: on the accumulator or memory
//! - INX/INY/DEX/DEY: on the index registers
//!
//! All wrap at 8 bits and set N and Z from the result; C and V are untouched.

use crate::devices::Peripheral;
use crate::CPU;

pub(crate) fn execute_inc<P: Peripheral>(cpu: &mut CPU<P>, value: u8) -> u8 {
    let result = value.wrapping_add(1);
    cpu.set_nz(result);
    result
}

pub(crate) fn execute_dec<P: Peripheral>(cpu: &mut CPU<P>, value: u8) -> u8 {
    let result = value.wrapping_sub(1);
    cpu.set_nz(result);
    result
}

pub(crate) fn execute_inx<P: Peripheral>(cpu: &mut CPU<P>) {
    let x = cpu.x;
    cpu.x = execute_inc(cpu, x);
}

pub(crate) fn execute_iny<P: Peripheral>(cpu: &mut CPU<P>) {
    let y = cpu.y;
    cpu.y = execute_inc(cpu, y);
}

pub(crate) fn execute_dex<P: Peripheral>(cpu: &mut CPU<P>) {
    let x = cpu.x;
    cpu.x = execute_dec(cpu, x);
}

pub(crate) fn execute_dey<P: Peripheral>(cpu: &mut CPU<P>) {
    let y = cpu.y;
    cpu.y = execute_dec(cpu, y);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inx_wraps_to_zero() {
        let mut cpu = CPU::new();
        cpu.set_x(0xFF);

        execute_inx(&mut cpu);
        assert_eq!(cpu.x(), 0x00);
        assert!(cpu.flag_z());
    }

    #[test]
    fn test_dey_goes_negative() {
        let mut cpu = CPU::new();

        execute_dey(&mut cpu);
        assert_eq!(cpu.y(), 0xFF);
        assert!(cpu.flag_n());
    }
}
