//! Fuzz target for clocked execution.
//!
//! This target builds an arbitrary ROM, RAM image and register file, then runs
//! the engine for an arbitrary number of ticks looking for panics and broken
//! invariants.

#![no_main]

use arbitrary::Arbitrary;
use lib740::{Snapshot, ADDRESS_MASK, CPU, FLAG_BREAK, MAX_OVERDRAW, RAM_SIZE};
use libfuzzer_sys::fuzz_target;

/// Arbitrary CPU initial state for fuzzing
#[derive(Debug, Arbitrary)]
struct FuzzCpuState {
    a: u8,
    x: u8,
    y: u8,
    s: u8,
    /// Packed status byte; bit 4 is dropped on load
    status: u8,
}

/// Complete fuzz input
#[derive(Debug, Arbitrary)]
struct FuzzInput {
    cpu_state: FuzzCpuState,
    /// ROM image; oversize images are truncated by the engine
    rom: Vec<u8>,
    ram: [u8; RAM_SIZE],
    /// Host ticks per slice
    ticks: Vec<u16>,
    interrupt_between_slices: bool,
}

fuzz_target!(|input: FuzzInput| {
    let mut cpu = CPU::new();
    cpu.set_rom(&input.rom);

    for (address, &byte) in input.ram.iter().enumerate() {
        cpu.memory_mut().write(address as u16, byte);
    }

    cpu.set_a(input.cpu_state.a);
    cpu.set_x(input.cpu_state.x);
    cpu.set_y(input.cpu_state.y);
    cpu.set_s(input.cpu_state.s);
    cpu.set_status(input.cpu_state.status);

    for &ticks in input.ticks.iter().take(64) {
        let cycles_before = cpu.cycles();
        cpu.run_for(u32::from(ticks));

        // Invariants that must hold after every slice
        assert!(cpu.pc() <= ADDRESS_MASK);
        assert_eq!(cpu.status() & FLAG_BREAK, 0);
        assert!(cpu.cycles() >= cycles_before);
        if cpu.is_stopped() {
            assert!(cpu.budget() <= 0);
        }

        if input.interrupt_between_slices {
            cpu.interrupt();
        }
        assert!((-MAX_OVERDRAW..=0).contains(&cpu.budget()));
    }

    // Any reachable state must survive a snapshot round trip
    let bytes = cpu.snapshot().serialize();
    let restored = Snapshot::deserialize(&bytes).expect("engine produced an invalid snapshot");
    assert_eq!(restored, cpu.snapshot());
});
