//! Tests for relative branches and the bit-test branches.
//!
//! Tests cover:
//! - Conditional branches taken and not taken, with the taken penalty
//! - BRA
//! - BBS/BBC on the accumulator and on zero page, all eight bits
//! - Target wrap across the 13-bit boundary
//! - JMP in its absolute and indirect forms

use lib740::{BRANCH_TAKEN_PENALTY, CPU};

fn setup_cpu(program: &[u8]) -> CPU {
    let mut rom = vec![0xEA; 4096];
    rom[..program.len()].copy_from_slice(program);
    rom[0xFFE] = 0x00;
    rom[0xFFF] = 0x10;

    let mut cpu = CPU::new();
    cpu.set_rom(&rom);
    cpu
}

// ========== Conditional Branches ==========

#[test]
fn test_beq_not_taken() {
    // BEQ +$10
    let mut cpu = setup_cpu(&[0xF0, 0x10]);
    cpu.set_flag_z(false);

    assert_eq!(cpu.step(), 2);
    assert_eq!(cpu.pc(), 0x1002);
}

#[test]
fn test_beq_taken_forward() {
    let mut cpu = setup_cpu(&[0xF0, 0x10]);
    cpu.set_flag_z(true);

    assert_eq!(cpu.step(), 2 + BRANCH_TAKEN_PENALTY);
    assert_eq!(cpu.pc(), 0x1012);
}

#[test]
fn test_bne_taken_backward() {
    // BNE -2: a branch to itself
    let mut cpu = setup_cpu(&[0xD0, 0xFE]);
    cpu.set_flag_z(false);

    cpu.step();
    assert_eq!(cpu.pc(), 0x1000);
}

#[test]
fn test_flag_branches() {
    // (opcode, flag setter, taken when set)
    let cases: [(u8, fn(&mut CPU, bool), bool); 8] = [
        (0x10, CPU::set_flag_n, false), // BPL
        (0x30, CPU::set_flag_n, true),  // BMI
        (0x50, CPU::set_flag_v, false), // BVC
        (0x70, CPU::set_flag_v, true),  // BVS
        (0x90, CPU::set_flag_c, false), // BCC
        (0xB0, CPU::set_flag_c, true),  // BCS
        (0xD0, CPU::set_flag_z, false), // BNE
        (0xF0, CPU::set_flag_z, true),  // BEQ
    ];

    for (opcode, set_flag, taken_when_set) in cases {
        for flag in [false, true] {
            let mut cpu = setup_cpu(&[opcode, 0x20]);
            set_flag(&mut cpu, flag);

            cpu.step();
            let expected = if flag == taken_when_set { 0x1022 } else { 0x1002 };
            assert_eq!(cpu.pc(), expected, "opcode 0x{opcode:02X} with flag {flag}");
        }
    }
}

#[test]
fn test_bra_always_taken() {
    // BRA -$10
    let mut cpu = setup_cpu(&[0x80, 0xF0]);

    assert_eq!(cpu.step(), 4);
    assert_eq!(cpu.pc(), 0x0FF2);
}

#[test]
fn test_branch_wraps_across_top_of_space() {
    // BRA +$10 placed at 0x1FF0
    let mut program = vec![0xEA; 0xFF0];
    program.extend_from_slice(&[0x80, 0x10]);
    let mut cpu = setup_cpu(&program);
    cpu.set_pc(0x1FF0);

    cpu.step();
    assert_eq!(cpu.pc(), 0x0002);
}

#[test]
fn test_branch_wraps_below_zero() {
    // BRA -$10 placed in RAM at 0x0002
    let mut cpu = setup_cpu(&[]);
    cpu.memory_mut().write(0x0002, 0x80);
    cpu.memory_mut().write(0x0003, 0xF0);
    cpu.set_pc(0x0002);

    cpu.step();
    assert_eq!(cpu.pc(), 0x1FF4);
}

// ========== Bit Branches ==========

#[test]
fn test_bbs_accumulator_every_bit() {
    for bit in 0..8u8 {
        // BBS bit,A,+$08
        let opcode = (bit << 5) | 0x03;
        let mut cpu = setup_cpu(&[opcode, 0x08]);
        cpu.set_a(1 << bit);

        assert_eq!(cpu.step(), 4 + BRANCH_TAKEN_PENALTY, "bit {bit}");
        assert_eq!(cpu.pc(), 0x100A, "bit {bit}");
    }
}

#[test]
fn test_bbs_accumulator_not_taken() {
    // BBS 7,A,+$08
    let mut cpu = setup_cpu(&[0xE3, 0x08]);
    cpu.set_a(0x7F);

    assert_eq!(cpu.step(), 4);
    assert_eq!(cpu.pc(), 0x1002);
}

#[test]
fn test_bbc_accumulator_branches_when_clear() {
    // BBC 7,A,+$08
    let mut cpu = setup_cpu(&[0xF3, 0x08]);
    cpu.set_a(0x7F);
    cpu.step();
    assert_eq!(cpu.pc(), 0x100A);

    let mut cpu = setup_cpu(&[0xF3, 0x08]);
    cpu.set_a(0x80);
    cpu.step();
    assert_eq!(cpu.pc(), 0x1002);
}

#[test]
fn test_bbs_zero_page_operand_order() {
    // BBS 2,$10,+$04: address first, then displacement
    let mut cpu = setup_cpu(&[0x47, 0x10, 0x04]);
    cpu.memory_mut().write(0x0010, 0x04);

    assert_eq!(cpu.step(), 5 + BRANCH_TAKEN_PENALTY);
    assert_eq!(cpu.pc(), 0x1007);
}

#[test]
fn test_bbc_zero_page_every_bit() {
    for bit in 0..8u8 {
        // BBC bit,$10,-$03: back to itself
        let opcode = (bit << 5) | 0x17;
        let mut cpu = setup_cpu(&[opcode, 0x10, 0xFD]);
        cpu.memory_mut().write(0x0010, !(1 << bit));

        cpu.step();
        assert_eq!(cpu.pc(), 0x1000, "bit {bit}");
    }
}

#[test]
fn test_bit_branches_leave_flags() {
    // BBS 0,A,+$00
    let mut cpu = setup_cpu(&[0x03, 0x00]);
    cpu.set_status(0xC3);
    cpu.set_a(0x01);

    cpu.step();
    assert_eq!(cpu.status(), 0xC3);
}

// ========== Jumps ==========

#[test]
fn test_jmp_absolute() {
    let mut cpu = setup_cpu(&[0x4C, 0x34, 0x12]);

    assert_eq!(cpu.step(), 3);
    assert_eq!(cpu.pc(), 0x1234);
}

#[test]
fn test_jmp_absolute_indirect() {
    // JMP ($0020)
    let mut cpu = setup_cpu(&[0x6C, 0x20, 0x00]);
    cpu.memory_mut().write(0x0020, 0x00);
    cpu.memory_mut().write(0x0021, 0x15);

    assert_eq!(cpu.step(), 5);
    assert_eq!(cpu.pc(), 0x1500);
}

#[test]
fn test_jmp_zero_page_indirect() {
    // JMP ($20)
    let mut cpu = setup_cpu(&[0xB2, 0x20]);
    cpu.memory_mut().write(0x0020, 0x80);
    cpu.memory_mut().write(0x0021, 0x1A);

    assert_eq!(cpu.step(), 4);
    assert_eq!(cpu.pc(), 0x1A80);
}
