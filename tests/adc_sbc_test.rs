//! Comprehensive tests for ADC and SBC executed from ROM.
//!
//! Tests cover:
//! - Binary addition and subtraction with carry, overflow, N and Z
//! - Decimal-mode nibble correction
//! - Results written back to the accumulator
//! - Memory operands

use lib740::CPU;

fn setup_cpu(program: &[u8]) -> CPU {
    let mut rom = vec![0xEA; 4096];
    rom[..program.len()].copy_from_slice(program);
    rom[0xFFE] = 0x00;
    rom[0xFFF] = 0x10;

    let mut cpu = CPU::new();
    cpu.set_rom(&rom);
    cpu
}

fn run_steps(cpu: &mut CPU, count: usize) {
    for _ in 0..count {
        cpu.step();
    }
}

// ========== Binary ADC ==========

#[test]
fn test_adc_binary_basic() {
    // CLC; LDA #$10; ADC #$20
    let mut cpu = setup_cpu(&[0x18, 0xA9, 0x10, 0x69, 0x20]);
    run_steps(&mut cpu, 3);

    assert_eq!(cpu.a(), 0x30);
    assert!(!cpu.flag_c());
    assert!(!cpu.flag_v());
    assert!(!cpu.flag_z());
    assert!(!cpu.flag_n());
}

#[test]
fn test_adc_binary_signed_overflow() {
    // CLC; LDA #$50; ADC #$50
    let mut cpu = setup_cpu(&[0x18, 0xA9, 0x50, 0x69, 0x50]);
    run_steps(&mut cpu, 3);

    assert_eq!(cpu.a(), 0xA0);
    assert!(cpu.flag_v());
    assert!(cpu.flag_n());
    assert!(!cpu.flag_c());
}

#[test]
fn test_adc_binary_carry_in_and_out() {
    // SEC; LDA #$FF; ADC #$00
    let mut cpu = setup_cpu(&[0x38, 0xA9, 0xFF, 0x69, 0x00]);
    run_steps(&mut cpu, 3);

    assert_eq!(cpu.a(), 0x00);
    assert!(cpu.flag_c());
    assert!(cpu.flag_z());
    assert!(!cpu.flag_v());
}

#[test]
fn test_adc_zero_page_operand() {
    // CLC; LDA #$01; ADC $10
    let mut cpu = setup_cpu(&[0x18, 0xA9, 0x01, 0x65, 0x10]);
    cpu.memory_mut().write(0x0010, 0x02);
    run_steps(&mut cpu, 3);

    assert_eq!(cpu.a(), 0x03);
    assert_eq!(cpu.memory().peek(0x0010), 0x02);
}

// ========== Binary SBC ==========

#[test]
fn test_sbc_binary_no_borrow() {
    // SEC; LDA #$50; SBC #$20
    let mut cpu = setup_cpu(&[0x38, 0xA9, 0x50, 0xE9, 0x20]);
    run_steps(&mut cpu, 3);

    assert_eq!(cpu.a(), 0x30);
    assert!(cpu.flag_c());
    assert!(!cpu.flag_v());
}

#[test]
fn test_sbc_binary_borrow() {
    // SEC; LDA #$00; SBC #$01
    let mut cpu = setup_cpu(&[0x38, 0xA9, 0x00, 0xE9, 0x01]);
    run_steps(&mut cpu, 3);

    assert_eq!(cpu.a(), 0xFF);
    assert!(!cpu.flag_c());
    assert!(cpu.flag_n());
}

#[test]
fn test_sbc_binary_uses_incoming_borrow() {
    // CLC; LDA #$05; SBC #$02
    let mut cpu = setup_cpu(&[0x18, 0xA9, 0x05, 0xE9, 0x02]);
    run_steps(&mut cpu, 3);

    assert_eq!(cpu.a(), 0x02);
    assert!(cpu.flag_c());
}

#[test]
fn test_sbc_binary_signed_overflow() {
    // SEC; LDA #$80; SBC #$01
    let mut cpu = setup_cpu(&[0x38, 0xA9, 0x80, 0xE9, 0x01]);
    run_steps(&mut cpu, 3);

    assert_eq!(cpu.a(), 0x7F);
    assert!(cpu.flag_v());
    assert!(cpu.flag_c());
}

// ========== Decimal Mode ==========

#[test]
fn test_adc_decimal_low_digit_carry() {
    // SED; CLC; LDA #$19; ADC #$28
    let mut cpu = setup_cpu(&[0xF8, 0x18, 0xA9, 0x19, 0x69, 0x28]);
    run_steps(&mut cpu, 4);

    assert_eq!(cpu.a(), 0x47);
    assert!(!cpu.flag_c());
}

#[test]
fn test_adc_decimal_carry_out() {
    // SED; SEC; LDA #$58; ADC #$46
    let mut cpu = setup_cpu(&[0xF8, 0x38, 0xA9, 0x58, 0x69, 0x46]);
    run_steps(&mut cpu, 4);

    assert_eq!(cpu.a(), 0x05);
    assert!(cpu.flag_c());
}

#[test]
fn test_sbc_decimal_simple() {
    // SED; SEC; LDA #$46; SBC #$12
    let mut cpu = setup_cpu(&[0xF8, 0x38, 0xA9, 0x46, 0xE9, 0x12]);
    run_steps(&mut cpu, 4);

    assert_eq!(cpu.a(), 0x34);
    assert!(cpu.flag_c());
}

#[test]
fn test_sbc_decimal_borrow_out() {
    // SED; SEC; LDA #$12; SBC #$21
    let mut cpu = setup_cpu(&[0xF8, 0x38, 0xA9, 0x12, 0xE9, 0x21]);
    run_steps(&mut cpu, 4);

    assert_eq!(cpu.a(), 0x91);
    assert!(!cpu.flag_c());
}

#[test]
fn test_cld_returns_to_binary() {
    // SED; CLD; CLC; LDA #$09; ADC #$01
    let mut cpu = setup_cpu(&[0xF8, 0xD8, 0x18, 0xA9, 0x09, 0x69, 0x01]);
    run_steps(&mut cpu, 5);

    assert!(!cpu.flag_d());
    assert_eq!(cpu.a(), 0x0A);
}
