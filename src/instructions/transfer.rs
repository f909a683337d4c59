//! # Register Transfer Instructions
//!
//! This module implements register-to-register transfers:
//! - TAX, TAY, TXA, TYA, TSX: set N and Z from the copied value
//! - TXS: no flags affected

use crate::devices::Peripheral;
use crate::CPU;

pub(crate) fn execute_tax<P: Peripheral>(cpu: &mut CPU<P>) {
    cpu.x = cpu.a;
    cpu.set_nz(cpu.x);
}

pub(crate) fn execute_tay<P: Peripheral>(cpu: &mut CPU<P>) {
    cpu.y = cpu.a;
    cpu.set_nz(cpu.y);
}

pub(crate) fn execute_txa<P: Peripheral>(cpu: &mut CPU<P>) {
    cpu.a = cpu.x;
    cpu.set_nz(cpu.a);
}

pub(crate) fn execute_tya<P: Peripheral>(cpu: &mut CPU<P>) {
    cpu.a = cpu.y;
    cpu.set_nz(cpu.a);
}

pub(crate) fn execute_tsx<P: Peripheral>(cpu: &mut CPU<P>) {
    cpu.x = cpu.s;
    cpu.set_nz(cpu.x);
}

pub(crate) fn execute_txs<P: Peripheral>(cpu: &mut CPU<P>) {
    cpu.s = cpu.x;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_txs_leaves_flags() {
        let mut cpu = CPU::new();
        cpu.set_x(0x00);

        execute_txs(&mut cpu);
        assert_eq!(cpu.s(), 0x00);
        assert!(!cpu.flag_z());
    }

    #[test]
    fn test_tsx_sets_flags() {
        let mut cpu = CPU::new();

        execute_tsx(&mut cpu);
        assert_eq!(cpu.x(), 0x5F);
        assert!(!cpu.flag_n());
        assert!(!cpu.flag_z());
    }
}
