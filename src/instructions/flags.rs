//! # Status Flag Instructions
//!
//! This module implements the single-flag instructions:
//! - CLC/SEC: Carry
//! - CLI/SEI: Interrupt disable
//! - CLD/SED: Decimal mode
//! - CLV: Overflow (there is no SEV)
//! - CLT/SET: Index mode
//!
//! It also absorbs the clock-select hints FST and SLW, which have no effect on
//! the engine's own timing.

use crate::devices::Peripheral;
use crate::opcodes::Operation;
use crate::CPU;

pub(crate) fn execute_flag_operation<P: Peripheral>(cpu: &mut CPU<P>, operation: Operation) {
    match operation {
        Operation::Clc => cpu.flag_c = false,
        Operation::Sec => cpu.flag_c = true,
        Operation::Cli => cpu.flag_i = false,
        Operation::Sei => cpu.flag_i = true,
        Operation::Cld => cpu.flag_d = false,
        Operation::Sed => cpu.flag_d = true,
        Operation::Clv => cpu.flag_v = false,
        Operation::Clt => cpu.flag_t = false,
        Operation::Set => cpu.flag_t = true,
        _ => unreachable!("{operation:?} is not a flag operation"),
    }
}

/// FST/SLW select the fast or slow oscillator on real parts.
pub(crate) fn execute_clock_select(operation: Operation) {
    log::trace!("{} ignored", operation.mnemonic());
}
