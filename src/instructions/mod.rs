//! # 740 Instruction Implementations
//!
//! This module contains the implementations of all 740 instructions, organized by category.
//! Each performer charges the instruction's cost, resolves its addressing mode and then
//! routes the operand to one of four shapes:
//!
//! - **consume**: reads an operand (loads, arithmetic, compares, tests)
//! - **modify**: read-modify-write on A or memory (shifts, inc/dec, bit set/clear)
//! - **store**: writes a register to memory
//! - **jump**: uses the resolved address as a new PC (branches, JMP, JSR)
//!
//! Operations that sequence their own operand bytes (LDM, BBS, BBC) bypass the
//! resolver entirely.
//!
//! ## Categories
//!
//! - **alu**: Arithmetic and logic operations (ADC, SBC, AND, ORA, EOR, CMP, CPX, CPY, BIT, TST)
//! - **bits**: Bit manipulation (SEB, CLB, BBS, BBC)
//! - **branches**: Conditional and unconditional relative branches
//! - **control**: Control flow instructions (JMP, JSR, RTS, RTI, BRK, STP)
//! - **flags**: Status flag manipulation (CLC, SEC, CLI, SEI, CLD, SED, CLV, CLT, SET)
//! - **inc_dec**: Increment and decrement operations (INC, DEC, INX, INY, DEX, DEY)
//! - **load_store**: Load and store instructions (LDA, LDX, LDY, LDM, STA, STX, STY)
//! - **shifts**: Shift, rotate and nibble operations (ASL, LSR, ROL, ROR, RRF, COM)
//! - **stack**: Stack operations (PHA, PHP, PLA, PLP)
//! - **transfer**: Register transfer operations (TAX, TAY, TXA, TYA, TSX, TXS)

pub(crate) mod alu;
pub(crate) mod bits;
pub(crate) mod branches;
pub(crate) mod control;
pub(crate) mod flags;
pub(crate) mod inc_dec;
pub(crate) mod load_store;
pub(crate) mod shifts;
pub(crate) mod stack;
pub(crate) mod transfer;

use crate::addressing::{AddressingMode, Operand};
use crate::devices::Peripheral;
use crate::opcodes::{AccessType, Operation};
use crate::CPU;

/// Performs one decoded instruction with PC at its opcode, charging `units`.
#[inline(always)]
pub(crate) fn perform<P: Peripheral>(
    cpu: &mut CPU<P>,
    operation: Operation,
    mode: AddressingMode,
    units: u32,
) {
    cpu.charge(units);

    match operation {
        Operation::Ldm => load_store::execute_ldm(cpu),
        Operation::Bbs(bit) => bits::execute_branch_on_bit(cpu, mode, bit, true),
        Operation::Bbc(bit) => bits::execute_branch_on_bit(cpu, mode, bit, false),
        _ => {
            let operand = cpu.resolve(mode);
            execute(cpu, operation, operand);
        }
    }
}

#[inline(always)]
fn execute<P: Peripheral>(cpu: &mut CPU<P>, operation: Operation, operand: Operand) {
    match operand {
        Operand::Implied => implied(cpu, operation),
        Operand::Accumulator => {
            let value = cpu.a;
            cpu.a = modify(cpu, operation, value);
        }
        Operand::Immediate(value) => consume(cpu, operation, value),
        Operand::Address(address) => match operation.access_type() {
            AccessType::Read => {
                let value = cpu.read(address);
                consume(cpu, operation, value);
            }
            AccessType::Write => {
                let value = store(cpu, operation);
                cpu.write(address, value);
            }
            AccessType::ReadModifyWrite => {
                let value = cpu.read(address);
                let result = modify(cpu, operation, value);
                cpu.write(address, result);
            }
            AccessType::Jump => jump(cpu, operation, address),
            AccessType::None => unreachable!("{operation:?} takes no memory operand"),
        },
    }
}

#[inline(always)]
fn consume<P: Peripheral>(cpu: &mut CPU<P>, operation: Operation, value: u8) {
    match operation {
        Operation::Ora
        | Operation::And
        | Operation::Eor
        | Operation::Adc
        | Operation::Sbc
        | Operation::Cmp
        | Operation::Lda => accumulate(cpu, operation, value),

        Operation::Ldx => load_store::execute_ldx(cpu, value),
        Operation::Ldy => load_store::execute_ldy(cpu, value),
        Operation::Cpx => {
            let x = cpu.x;
            alu::compare(cpu, x, value);
        }
        Operation::Cpy => {
            let y = cpu.y;
            alu::compare(cpu, y, value);
        }
        Operation::Bit => alu::execute_bit(cpu, value),
        Operation::Tst => alu::execute_tst(cpu, value),

        _ => unreachable!("{operation:?} does not consume an operand"),
    }
}

/// Applies an accumulator-class operation to A, or to the byte at X in index mode.
#[inline(always)]
fn accumulate<P: Peripheral>(cpu: &mut CPU<P>, operation: Operation, value: u8) {
    if !cpu.flag_t {
        let a = cpu.a;
        if let Some(result) = accumulate_into(cpu, operation, a, value) {
            cpu.a = result;
        }
        return;
    }

    let address = u16::from(cpu.x);
    // LDA overwrites the target without looking at it.
    let target = if operation == Operation::Lda {
        0
    } else {
        cpu.read(address)
    };
    if let Some(result) = accumulate_into(cpu, operation, target, value) {
        cpu.write(address, result);
    }
}

/// Returns the new target value, or `None` for operations that only set flags.
#[inline(always)]
fn accumulate_into<P: Peripheral>(
    cpu: &mut CPU<P>,
    operation: Operation,
    target: u8,
    value: u8,
) -> Option<u8> {
    match operation {
        Operation::Ora => Some(alu::execute_ora(cpu, target, value)),
        Operation::And => Some(alu::execute_and(cpu, target, value)),
        Operation::Eor => Some(alu::execute_eor(cpu, target, value)),
        Operation::Adc => Some(alu::execute_adc(cpu, target, value)),
        Operation::Sbc => Some(alu::execute_sbc(cpu, target, value)),
        Operation::Lda => Some(load_store::execute_lda(cpu, value)),
        Operation::Cmp => {
            alu::compare(cpu, target, value);
            None
        }
        _ => unreachable!("{operation:?} is not an accumulator operation"),
    }
}

#[inline(always)]
fn modify<P: Peripheral>(cpu: &mut CPU<P>, operation: Operation, value: u8) -> u8 {
    match operation {
        Operation::Asl => shifts::execute_asl(cpu, value),
        Operation::Lsr => shifts::execute_lsr(cpu, value),
        Operation::Rol => shifts::execute_rol(cpu, value),
        Operation::Ror => shifts::execute_ror(cpu, value),
        Operation::Rrf => shifts::execute_rrf(value),
        Operation::Com => shifts::execute_com(cpu, value),
        Operation::Inc => inc_dec::execute_inc(cpu, value),
        Operation::Dec => inc_dec::execute_dec(cpu, value),
        Operation::Seb(bit) => bits::execute_seb(value, bit),
        Operation::Clb(bit) => bits::execute_clb(value, bit),
        _ => unreachable!("{operation:?} does not modify an operand"),
    }
}

#[inline(always)]
fn store<P: Peripheral>(cpu: &mut CPU<P>, operation: Operation) -> u8 {
    match operation {
        Operation::Sta => cpu.a,
        Operation::Stx => cpu.x,
        Operation::Sty => cpu.y,
        _ => unreachable!("{operation:?} does not store a register"),
    }
}

#[inline(always)]
fn jump<P: Peripheral>(cpu: &mut CPU<P>, operation: Operation, target: u16) {
    let condition = match operation {
        Operation::Bpl => !cpu.flag_n,
        Operation::Bmi => cpu.flag_n,
        Operation::Bvc => !cpu.flag_v,
        Operation::Bvs => cpu.flag_v,
        Operation::Bcc => !cpu.flag_c,
        Operation::Bcs => cpu.flag_c,
        Operation::Bne => !cpu.flag_z,
        Operation::Beq => cpu.flag_z,
        Operation::Bra | Operation::Jmp => {
            cpu.set_pc(target);
            return;
        }
        Operation::Jsr => {
            control::execute_jsr(cpu, target);
            return;
        }
        _ => unreachable!("{operation:?} does not jump"),
    };
    branches::branch_if(cpu, condition, target);
}

#[inline(always)]
fn implied<P: Peripheral>(cpu: &mut CPU<P>, operation: Operation) {
    match operation {
        Operation::Brk => control::execute_brk(cpu),
        Operation::Rti => control::execute_rti(cpu),
        Operation::Rts => control::execute_rts(cpu),
        Operation::Stp => control::execute_stp(cpu),

        Operation::Clc
        | Operation::Sec
        | Operation::Cli
        | Operation::Sei
        | Operation::Cld
        | Operation::Sed
        | Operation::Clv
        | Operation::Clt
        | Operation::Set => flags::execute_flag_operation(cpu, operation),

        Operation::Inx => inc_dec::execute_inx(cpu),
        Operation::Iny => inc_dec::execute_iny(cpu),
        Operation::Dex => inc_dec::execute_dex(cpu),
        Operation::Dey => inc_dec::execute_dey(cpu),

        Operation::Pha => stack::execute_pha(cpu),
        Operation::Php => stack::execute_php(cpu),
        Operation::Pla => stack::execute_pla(cpu),
        Operation::Plp => stack::execute_plp(cpu),

        Operation::Tax => transfer::execute_tax(cpu),
        Operation::Tay => transfer::execute_tay(cpu),
        Operation::Txa => transfer::execute_txa(cpu),
        Operation::Tya => transfer::execute_tya(cpu),
        Operation::Tsx => transfer::execute_tsx(cpu),
        Operation::Txs => transfer::execute_txs(cpu),

        Operation::Fst | Operation::Slw => flags::execute_clock_select(operation),
        Operation::Nop => {}

        _ => unreachable!("{operation:?} is not an implied operation"),
    }
}
