//! # Stack Operations
//!
//! This module implements stack manipulation instructions:
//! - PHA: Push Accumulator on Stack
//! - PHP: Push Processor Status
//! - PLA: Pull Accumulator (sets N, Z)
//! - PLP: Pull Processor Status
//!
//! The 740 stack lives in page zero, inside internal RAM. A push stores at S and
//! then decrements it; a pull increments S and then loads.

use crate::devices::Peripheral;
use crate::CPU;

pub(crate) fn execute_pha<P: Peripheral>(cpu: &mut CPU<P>) {
    cpu.push(cpu.a);
}

/// PHP pushes the status without the break marker.
pub(crate) fn execute_php<P: Peripheral>(cpu: &mut CPU<P>) {
    let status = cpu.status();
    cpu.push(status);
}

pub(crate) fn execute_pla<P: Peripheral>(cpu: &mut CPU<P>) {
    let value = cpu.pull();
    cpu.a = value;
    cpu.set_nz(value);
}

pub(crate) fn execute_plp<P: Peripheral>(cpu: &mut CPU<P>) {
    let status = cpu.pull();
    cpu.set_status(status);
}
