//! # ALU (Arithmetic Logic Unit) Instructions
//!
//! This module implements arithmetic and logical operations:
//! - ADC: Add with Carry (binary and decimal)
//! - SBC: Subtract with Carry (binary and decimal)
//! - AND, ORA, EOR: Logical operations
//! - CMP, CPX, CPY: Comparisons
//! - BIT, TST: Flag-only tests
//!
//! The accumulator-class functions take the value they operate on (`target`)
//! explicitly and return the result; the caller decides whether that is A or
//! the byte at X under index mode.

use crate::devices::Peripheral;
use crate::CPU;

/// Performs ADC on `target` and `value`, returning the sum.
///
/// Flags affected: N, V, Z, C
///
/// In decimal mode each nibble is adjusted separately. Overflow is computed
/// from the per-nibble partial sums taken before decimal adjustment, so V can
/// be set even when the corrected result is 0x00 (0x50 + 0x50).
pub(crate) fn execute_adc<P: Peripheral>(cpu: &mut CPU<P>, target: u8, value: u8) -> u8 {
    let carry_in = u16::from(cpu.flag_c);
    let a = u16::from(target);
    let operand = u16::from(value);

    if !cpu.flag_d {
        let sum = a + operand + carry_in;
        let result = sum as u8;

        cpu.flag_c = sum > 0xFF;
        // Overflow when both operands share a sign that the result lacks
        cpu.flag_v = ((target ^ result) & (value ^ result) & 0x80) != 0;
        cpu.set_nz(result);
        return result;
    }

    let mut partials: u16 = 0;
    let mut result = carry_in;

    // Low nibble
    result += (a & 0x0F) + (operand & 0x0F);
    partials += result & 0x0F;
    if result >= 0x0A {
        result = ((result + 0x06) & 0x0F) + 0x10;
    }

    // High nibble
    result += (a & 0xF0) + (operand & 0xF0);
    partials += result & 0xF0;
    if result >= 0xA0 {
        result = ((result + 0x60) & 0xFF) + 0x100;
    }

    cpu.flag_v = ((partials ^ a) & (partials ^ operand) & 0x80) != 0;
    cpu.flag_c = (result >> 8) & 1 != 0;
    let result = result as u8;
    cpu.set_nz(result);
    result
}

/// Performs SBC on `target` and `value`, returning the difference.
///
/// Flags affected: N, V, Z, C (C clear means a borrow occurred)
pub(crate) fn execute_sbc<P: Peripheral>(cpu: &mut CPU<P>, target: u8, value: u8) -> u8 {
    if !cpu.flag_d {
        // Binary subtraction is addition of the one's complement.
        let inverted = !value;
        let sum = u16::from(target) + u16::from(inverted) + u16::from(cpu.flag_c);
        let result = sum as u8;

        cpu.flag_c = sum > 0xFF;
        cpu.flag_v = ((target ^ result) & (inverted ^ result) & 0x80) != 0;
        cpu.set_nz(result);
        return result;
    }

    let a = u32::from(target);
    let operand = u32::from(value);
    let mut borrow = u32::from(!cpu.flag_c);
    let decimal_result = a.wrapping_sub(operand).wrapping_sub(borrow);
    let mut result: u32 = 0;

    // Low nibble
    result = result
        .wrapping_add(a & 0x0F)
        .wrapping_sub(operand & 0x0F)
        .wrapping_sub(borrow);
    if result > 0x0F {
        result = result.wrapping_sub(0x06);
    }
    borrow = if result > 0x0F { 0x10 } else { 0 };
    result &= 0x0F;

    // High nibble
    result = result
        .wrapping_add(a & 0xF0)
        .wrapping_sub(operand & 0xF0)
        .wrapping_sub(borrow);
    if result > 0xF0 {
        result = result.wrapping_sub(0x60);
    }
    borrow = if result > 0xF0 { 0x100 } else { 0 };
    result &= 0xFF;

    cpu.flag_v = ((decimal_result ^ a) & (!decimal_result ^ operand) & 0x80) != 0;
    cpu.flag_c = (borrow >> 8) & 1 == 0;
    let result = result as u8;
    cpu.set_nz(result);
    result
}

/// Logical AND. Flags affected: N, Z
pub(crate) fn execute_and<P: Peripheral>(cpu: &mut CPU<P>, target: u8, value: u8) -> u8 {
    let result = target & value;
    cpu.set_nz(result);
    result
}

/// Logical OR. Flags affected: N, Z
pub(crate) fn execute_ora<P: Peripheral>(cpu: &mut CPU<P>, target: u8, value: u8) -> u8 {
    let result = target | value;
    cpu.set_nz(result);
    result
}

/// Exclusive OR. Flags affected: N, Z
pub(crate) fn execute_eor<P: Peripheral>(cpu: &mut CPU<P>, target: u8, value: u8) -> u8 {
    let result = target ^ value;
    cpu.set_nz(result);
    result
}

/// Compares `register` with `value` (CMP, CPX, CPY).
///
/// Flags affected:
/// - C: set if register >= value (unsigned)
/// - N, Z: from the 8-bit difference
pub(crate) fn compare<P: Peripheral>(cpu: &mut CPU<P>, register: u8, value: u8) {
    cpu.flag_c = register >= value;
    cpu.set_nz(register.wrapping_sub(value));
}

/// BIT: tests A against memory without changing either.
///
/// Flags affected:
/// - Z: set if (A & value) == 0
/// - N: bit 7 of value
/// - V: bit 6 of value
pub(crate) fn execute_bit<P: Peripheral>(cpu: &mut CPU<P>, value: u8) {
    cpu.flag_z = (cpu.a & value) == 0;
    cpu.flag_n = (value & 0x80) != 0;
    cpu.flag_v = (value & 0x40) != 0;
}

/// TST: sets N and Z from a zero-page byte.
pub(crate) fn execute_tst<P: Peripheral>(cpu: &mut CPU<P>, value: u8) {
    cpu.set_nz(value);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup_cpu(carry: bool, decimal: bool) -> CPU {
        let mut cpu = CPU::new();
        cpu.flag_c = carry;
        cpu.flag_d = decimal;
        cpu
    }

    // ========== Binary ==========

    #[test]
    fn test_adc_binary_signed_overflow() {
        let mut cpu = setup_cpu(false, false);

        assert_eq!(execute_adc(&mut cpu, 0x50, 0x50), 0xA0);
        assert!(cpu.flag_v);
        assert!(cpu.flag_n);
        assert!(!cpu.flag_c);
    }

    #[test]
    fn test_adc_binary_carry_out() {
        let mut cpu = setup_cpu(true, false);

        assert_eq!(execute_adc(&mut cpu, 0xFF, 0x00), 0x00);
        assert!(cpu.flag_c);
        assert!(cpu.flag_z);
        assert!(!cpu.flag_v);
    }

    #[test]
    fn test_sbc_binary_borrow() {
        let mut cpu = setup_cpu(true, false);

        assert_eq!(execute_sbc(&mut cpu, 0x00, 0x01), 0xFF);
        assert!(!cpu.flag_c);
        assert!(cpu.flag_n);
        assert!(!cpu.flag_v);
    }

    #[test]
    fn test_sbc_binary_signed_overflow() {
        let mut cpu = setup_cpu(true, false);

        assert_eq!(execute_sbc(&mut cpu, 0x80, 0x01), 0x7F);
        assert!(cpu.flag_v);
        assert!(cpu.flag_c);
    }

    // ========== Decimal ==========

    #[test]
    fn test_adc_decimal_digit_carry() {
        let mut cpu = setup_cpu(false, true);

        assert_eq!(execute_adc(&mut cpu, 0x09, 0x01), 0x10);
        assert!(!cpu.flag_c);
    }

    #[test]
    fn test_adc_decimal_wraps_to_zero_with_carry() {
        let mut cpu = setup_cpu(true, true);

        assert_eq!(execute_adc(&mut cpu, 0x99, 0x00), 0x00);
        assert!(cpu.flag_c);
        assert!(cpu.flag_z);
    }

    #[test]
    fn test_adc_decimal_overflow_uses_partials() {
        let mut cpu = setup_cpu(false, true);

        // Partial sum 0x80 carries a sign change from two positive operands
        assert_eq!(execute_adc(&mut cpu, 0x40, 0x40), 0x80);
        assert!(cpu.flag_v);
        assert!(!cpu.flag_c);
    }

    #[test]
    fn test_adc_decimal_overflow_with_zero_result() {
        let mut cpu = setup_cpu(false, true);

        assert_eq!(execute_adc(&mut cpu, 0x50, 0x50), 0x00);
        assert!(cpu.flag_c);
        assert!(cpu.flag_v);
        assert!(cpu.flag_z);
    }

    #[test]
    fn test_sbc_decimal_overflow_from_binary_difference() {
        let mut cpu = setup_cpu(true, true);

        // Binary 0x80 - 0x01 = 0x7F crosses the sign boundary
        assert_eq!(execute_sbc(&mut cpu, 0x80, 0x01), 0x79);
        assert!(cpu.flag_v);
        assert!(cpu.flag_c);
        assert!(!cpu.flag_n);
    }

    #[test]
    fn test_sbc_decimal_borrow_across_digits() {
        let mut cpu = setup_cpu(true, true);

        assert_eq!(execute_sbc(&mut cpu, 0x10, 0x01), 0x09);
        assert!(cpu.flag_c);
    }

    #[test]
    fn test_sbc_decimal_underflow() {
        let mut cpu = setup_cpu(true, true);

        assert_eq!(execute_sbc(&mut cpu, 0x00, 0x01), 0x99);
        assert!(!cpu.flag_c);
        assert!(cpu.flag_n);
    }

    #[test]
    fn test_sbc_decimal_with_incoming_borrow() {
        let mut cpu = setup_cpu(false, true);

        assert_eq!(execute_sbc(&mut cpu, 0x50, 0x25), 0x24);
        assert!(cpu.flag_c);
    }

    // ========== Compare and Test ==========

    #[test]
    fn test_compare_sets_carry_when_greater_or_equal() {
        let mut cpu = CPU::new();

        compare(&mut cpu, 0x40, 0x40);
        assert!(cpu.flag_c);
        assert!(cpu.flag_z);

        compare(&mut cpu, 0x10, 0x20);
        assert!(!cpu.flag_c);
        assert!(cpu.flag_n);
    }

    #[test]
    fn test_bit_copies_high_bits() {
        let mut cpu = CPU::new();
        cpu.a = 0x01;

        execute_bit(&mut cpu, 0xC0);
        assert!(cpu.flag_z);
        assert!(cpu.flag_n);
        assert!(cpu.flag_v);
    }
}
