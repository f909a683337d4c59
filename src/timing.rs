//! # Cycle Cost Accountant
//!
//! Whole-instruction costs for every reachable `(Operation, AddressingMode)`
//! pair, in engine units (one unit per four input clock ticks).
//!
//! This is not a bus-cycle-exact model: each performer is charged once, up
//! front, for the whole instruction. Operations redirected by index mode pay a
//! fixed surcharge for the extra access to the byte at X, and taken branches pay
//! [`BRANCH_TAKEN_PENALTY`] on top of the static cost.

use crate::addressing::AddressingMode;
use crate::opcodes::{decode, Operation};

/// Host clock ticks per engine unit.
pub const CLOCK_DIVIDER: u32 = 4;

/// Extra cost of a taken conditional or bit-test branch.
pub const BRANCH_TAKEN_PENALTY: u32 = 2;

/// Cost of hardware interrupt entry.
pub const INTERRUPT_COST: u32 = 7;

/// Largest amount a single instruction can charge, taken branch included.
pub const MAX_CHARGE: u32 = max_charge();

/// Static cost of one instruction.
///
/// `index_mode` is the state of the T flag when the instruction starts.
///
/// # Panics
///
/// Panics on a pair the decoder never produces.
///
/// ```
/// use lib740::{cost, AddressingMode, Operation};
///
/// assert_eq!(cost(Operation::Lda, AddressingMode::Immediate, false), 2);
/// assert_eq!(cost(Operation::Lda, AddressingMode::Immediate, true), 4);
/// assert_eq!(cost(Operation::Sta, AddressingMode::IndirectY, false), 7);
/// ```
pub const fn cost(operation: Operation, mode: AddressingMode, index_mode: bool) -> u32 {
    use AddressingMode::*;
    use Operation::*;

    match operation {
        Adc | And | Cmp | Eor | Lda | Ora | Sbc => {
            let base = match mode {
                XIndirect => 6,
                ZeroPage => 3,
                Immediate => 2,
                Absolute => 4,
                IndirectY => 6,
                ZeroPageX => 4,
                AbsoluteY | AbsoluteX => 5,
                _ => unreachable_pair(),
            };
            if index_mode {
                base + index_mode_surcharge(operation)
            } else {
                base
            }
        }

        Asl | Dec | Inc | Lsr | Rol | Ror => match mode {
            ZeroPage => 5,
            Accumulator => 2,
            Absolute => 6,
            ZeroPageX => 6,
            AbsoluteX => 7,
            _ => unreachable_pair(),
        },

        Bbc(_) | Bbs(_) => match mode {
            AccumulatorRelative => 4,
            ZeroPageRelative => 5,
            _ => unreachable_pair(),
        },

        Bpl | Bmi | Beq | Bne | Bcs | Bcc | Bvs | Bvc | Inx | Iny => 2,

        Cpx | Cpy | Bit | Ldx | Ldy => match mode {
            Immediate => 2,
            ZeroPage => 3,
            Absolute | ZeroPageX | ZeroPageY => 4,
            AbsoluteX | AbsoluteY => 5,
            _ => unreachable_pair(),
        },

        Bra => 4,
        Brk => 7,

        Clb(_) | Seb(_) => match mode {
            Accumulator => 2,
            ZeroPage => 5,
            _ => unreachable_pair(),
        },

        Clc | Cld | Clt | Clv | Cli | Dex | Dey | Fst | Nop | Sec | Sed | Sei | Set | Slw | Stp
        | Tax | Tay | Tsx | Txa | Txs | Tya => 2,

        Com => 5,

        Jmp => match mode {
            Absolute => 3,
            AbsoluteIndirect => 5,
            ZeroPageIndirect => 4,
            _ => unreachable_pair(),
        },

        Jsr => match mode {
            ZeroPageIndirect => 7,
            Absolute => 6,
            SpecialPage => 5,
            _ => unreachable_pair(),
        },

        Ldm => 4,
        Pha | Php | Tst => 3,
        Pla | Plp => 4,
        Rrf => 8,
        Rti | Rts => 6,

        Sta | Stx | Sty => match mode {
            XIndirect | IndirectY => 7,
            ZeroPage => 4,
            Absolute | ZeroPageX | ZeroPageY => 5,
            AbsoluteY | AbsoluteX => 6,
            _ => unreachable_pair(),
        },

        Invalid => unreachable_pair(),
    }
}

const fn max_charge() -> u32 {
    let mut max = 0;
    let mut opcode = 0usize;
    while opcode < 256 {
        let instruction = decode(opcode as u8);
        if !instruction.is_invalid() {
            let operation = instruction.operation;
            let mut units = cost(operation, instruction.addressing_mode, true);
            if operation.is_conditional_branch() {
                units += BRANCH_TAKEN_PENALTY;
            }
            if units > max {
                max = units;
            }
        }
        opcode += 1;
    }
    max
}

/// Extra cost when index mode redirects an accumulator-class operation.
const fn index_mode_surcharge(operation: Operation) -> u32 {
    match operation {
        Operation::Lda => 2,
        Operation::Cmp => 1,
        _ => 3,
    }
}

const fn unreachable_pair() -> u32 {
    panic!("no cost defined for this operation and addressing mode")
}
