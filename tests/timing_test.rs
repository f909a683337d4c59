//! Tests for the clock adapter and the budget it feeds.
//!
//! Tests cover:
//! - Host tick to engine unit conversion with carried remainder
//! - Overshoot carried into the next call
//! - Budget clamping after STP
//! - Resuming after reset
//! - Representative instruction costs observed through execution

use lib740::{CLOCK_DIVIDER, CPU};

fn setup_cpu(program: &[u8]) -> CPU {
    let mut rom = vec![0xEA; 4096];
    rom[..program.len()].copy_from_slice(program);
    rom[0xFFE] = 0x00;
    rom[0xFFF] = 0x10;

    let mut cpu = CPU::new();
    cpu.set_rom(&rom);
    cpu
}

// ========== Clock Adapter ==========

#[test]
fn test_ticks_below_divider_do_nothing() {
    let mut cpu = setup_cpu(&[]);

    cpu.run_for(CLOCK_DIVIDER - 1);
    assert_eq!(cpu.pc(), 0x1000);
    assert_eq!(cpu.cycles(), 0);
    assert_eq!(cpu.budget(), 0);
}

#[test]
fn test_remainder_accumulates_across_calls() {
    let mut cpu = setup_cpu(&[]);

    // 4 x 3 ticks = 12 ticks = 3 units
    for _ in 0..4 {
        cpu.run_for(3);
    }

    // Two NOPs: the second starts with one unit left and overshoots by one
    assert_eq!(cpu.pc(), 0x1002);
    assert_eq!(cpu.cycles(), 4);
    assert_eq!(cpu.budget(), -1);
}

#[test]
fn test_overshoot_repaid_by_next_call() {
    // JSR $1010 costs six units
    let mut cpu = setup_cpu(&[0x20, 0x10, 0x10]);

    cpu.run_for(4);
    assert_eq!(cpu.pc(), 0x1010);
    assert_eq!(cpu.budget(), -5);

    // Five units only repay the debt
    cpu.run_for(20);
    assert_eq!(cpu.pc(), 0x1010);
    assert_eq!(cpu.budget(), 0);

    cpu.run_for(8);
    assert_eq!(cpu.pc(), 0x1011);
}

// ========== Stop ==========

#[test]
fn test_stop_halts_and_clamps_budget() {
    // NOP; STP
    let mut cpu = setup_cpu(&[0xEA, 0x42]);

    cpu.run_for(400);
    assert!(cpu.is_stopped());
    assert_eq!(cpu.pc(), 0x1002);
    assert_eq!(cpu.cycles(), 4);
    assert_eq!(cpu.budget(), 0);

    cpu.run_for(400);
    assert_eq!(cpu.pc(), 0x1002);
    assert_eq!(cpu.cycles(), 4);
    assert_eq!(cpu.step(), 0);
}

#[test]
fn test_reset_releases_stop() {
    let mut cpu = setup_cpu(&[0x42]);

    cpu.run_for(8);
    assert!(cpu.is_stopped());

    cpu.reset();
    assert!(!cpu.is_stopped());
    assert_eq!(cpu.pc(), 0x1000);

    cpu.run_for(8);
    assert!(cpu.is_stopped());
}

#[test]
fn test_clock_select_is_a_plain_two_unit_instruction() {
    // FST; SLW
    let mut cpu = setup_cpu(&[0xE2, 0xC2]);

    assert_eq!(cpu.step(), 2);
    assert_eq!(cpu.step(), 2);
    assert_eq!(cpu.pc(), 0x1002);
}

// ========== Instruction Costs ==========

#[test]
fn test_costs_observed_through_execution() {
    let cases: [(&[u8], u32); 12] = [
        (&[0xA9, 0x00], 2),       // LDA #
        (&[0xA5, 0x10], 3),       // LDA zp
        (&[0xAD, 0x10, 0x00], 4), // LDA abs
        (&[0xB1, 0x10], 6),       // LDA (zp),Y
        (&[0x85, 0x10], 4),       // STA zp
        (&[0x91, 0x10], 7),       // STA (zp),Y
        (&[0xE6, 0x10], 5),       // INC zp
        (&[0xFE, 0x10, 0x00], 7), // INC abs,X
        (&[0x44, 0x10], 5),       // COM zp
        (&[0x82, 0x10], 8),       // RRF zp
        (&[0x3C, 0x01, 0x10], 4), // LDM #,zp
        (&[0x64, 0x10], 3),       // TST zp
    ];

    for (program, expected) in cases {
        let mut cpu = setup_cpu(program);
        assert_eq!(cpu.step(), expected, "program {program:02X?}");
        assert_eq!(cpu.cycles(), u64::from(expected));
    }
}

#[test]
fn test_index_mode_surcharges() {
    let cases: [(&[u8], u32); 4] = [
        (&[0xA9, 0x00], 4), // LDA #
        (&[0xC9, 0x00], 3), // CMP #
        (&[0x05, 0x10], 6), // ORA zp
        (&[0xA2, 0x00], 2), // LDX # (no surcharge)
    ];

    for (program, expected) in cases {
        let mut cpu = setup_cpu(program);
        cpu.set_flag_t(true);
        assert_eq!(cpu.step(), expected, "program {program:02X?}");
    }
}
