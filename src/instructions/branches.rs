//! # Branch Instructions
//!
//! This module implements the shared tail of every relative branch:
//! - BPL, BMI, BVC, BVS, BCC, BCS, BNE, BEQ: conditional on one flag
//! - BBS, BBC: conditional on one bit (see `bits`)
//!
//! BRA is unconditional and costs the same whether or not it "branches", so it
//! is handled as a plain jump.
//!
//! A taken conditional branch costs two units more than the static cost charged
//! up front. The target is always masked to the 13-bit space.

use crate::devices::Peripheral;
use crate::timing::BRANCH_TAKEN_PENALTY;
use crate::CPU;

/// Moves PC to `target` when `condition` holds, charging the taken penalty.
///
/// No flags are affected.
pub(crate) fn branch_if<P: Peripheral>(cpu: &mut CPU<P>, condition: bool, target: u16) {
    if condition {
        cpu.charge(BRANCH_TAKEN_PENALTY);
        cpu.set_pc(target);
    }
}
