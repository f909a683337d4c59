//! # Control Flow Instructions
//!
//! This module implements control flow operations:
//! - JSR: Jump to Subroutine (absolute, zero-page indirect, special page)
//! - RTS: Return from Subroutine
//! - RTI: Return from Interrupt
//! - BRK: Force Interrupt
//! - STP: Stop the processor
//!
//! JMP and BRA need nothing beyond the resolved target and live in the
//! dispatcher.
//!
//! Interrupt entry (BRK and hardware) is:
//! 1. Push the return address (high byte first, then low byte)
//! 2. Push the status byte, with the break marker (0x10) for BRK only
//! 3. Set the I (interrupt disable) flag
//! 4. Load PC from the interrupt vector at $1FF4/$1FF5

use crate::cpu::FLAG_BREAK;
use crate::devices::Peripheral;
use crate::memory::INTERRUPT_VECTOR;
use crate::CPU;

/// Pushes PC and status, then vectors through `INTERRUPT_VECTOR`.
///
/// PC must already hold the return address.
pub(crate) fn enter_interrupt<P: Peripheral>(cpu: &mut CPU<P>, is_brk: bool) {
    let [lo, hi] = cpu.pc.to_le_bytes();
    cpu.push(hi);
    cpu.push(lo);

    let status = if is_brk {
        cpu.status() | FLAG_BREAK
    } else {
        cpu.status()
    };
    cpu.push(status);

    cpu.flag_i = true;
    let vector = cpu.read_word(INTERRUPT_VECTOR);
    cpu.set_pc(vector);
}

/// Executes BRK. PC already points past the opcode; BRK also skips one
/// unused operand byte, so the pushed return address is opcode + 2.
pub(crate) fn execute_brk<P: Peripheral>(cpu: &mut CPU<P>) {
    cpu.set_pc(cpu.pc.wrapping_add(1));
    enter_interrupt(cpu, true);
}

/// Executes JSR. PC already points at the next instruction; the stack
/// receives that address minus one, high byte first.
pub(crate) fn execute_jsr<P: Peripheral>(cpu: &mut CPU<P>, target: u16) {
    let [lo, hi] = cpu.pc.wrapping_sub(1).to_le_bytes();
    cpu.push(hi);
    cpu.push(lo);
    cpu.set_pc(target);
}

/// Executes RTS: pulls the return address (low, high) and resumes one past it.
pub(crate) fn execute_rts<P: Peripheral>(cpu: &mut CPU<P>) {
    let lo = cpu.pull();
    let hi = cpu.pull();
    cpu.set_pc(u16::from_le_bytes([lo, hi]).wrapping_add(1));
}

/// Executes RTI: pulls status (break marker ignored), then the return address.
pub(crate) fn execute_rti<P: Peripheral>(cpu: &mut CPU<P>) {
    let status = cpu.pull();
    cpu.set_status(status);

    let lo = cpu.pull();
    let hi = cpu.pull();
    cpu.set_pc(u16::from_le_bytes([lo, hi]));
}

/// Executes STP: halts until the next reset.
pub(crate) fn execute_stp<P: Peripheral>(cpu: &mut CPU<P>) {
    cpu.stopped = true;
    log::debug!("STP at 0x{:04X}", cpu.pc.wrapping_sub(1));
}
