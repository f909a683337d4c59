//! # Operation Decoder
//!
//! This module maps each of the 256 opcode bytes to an `(Operation, AddressingMode)`
//! pair. The mapping is a pure, total function: every byte has a defined result,
//! with unused encodings reported as [`Operation::Invalid`].
//!
//! The bit-manipulation family (BBS/BBC/SEB/CLB) occupies every column whose low
//! nibble is 3, 7, B or F; the bit index is the top three bits of the opcode, so
//! those 64 encodings are decoded arithmetically rather than listed.

use crate::addressing::AddressingMode;

/// Operations of the 740 instruction set.
///
/// The four bit-manipulation operations carry the index (0-7) of the bit they
/// test, set or clear.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Adc,
    And,
    Asl,
    /// Branch if bit clear.
    Bbc(u8),
    /// Branch if bit set.
    Bbs(u8),
    Bcc,
    Bcs,
    Beq,
    Bit,
    Bmi,
    Bne,
    Bpl,
    /// Branch always.
    Bra,
    Brk,
    Bvc,
    Bvs,
    Clc,
    Cld,
    Cli,
    /// Clear bit.
    Clb(u8),
    /// Clear index mode.
    Clt,
    Clv,
    Cmp,
    /// Complement (one's complement of a zero-page byte).
    Com,
    Cpx,
    Cpy,
    Dec,
    Dex,
    Dey,
    Eor,
    /// Fast clock select.
    Fst,
    Inc,
    Inx,
    Iny,
    Jmp,
    Jsr,
    Lda,
    /// Load memory with an immediate value.
    Ldm,
    Ldx,
    Ldy,
    Lsr,
    Nop,
    Ora,
    Pha,
    Php,
    Pla,
    Plp,
    Rol,
    Ror,
    /// Rotate right four bits (nibble swap).
    Rrf,
    Rti,
    Rts,
    Sbc,
    /// Set bit.
    Seb(u8),
    Sec,
    Sed,
    Sei,
    /// Set index mode.
    Set,
    /// Slow clock select.
    Slw,
    Sta,
    /// Stop the processor until reset.
    Stp,
    Stx,
    Sty,
    Tax,
    Tay,
    /// Test a zero-page byte for negative/zero.
    Tst,
    Tsx,
    Txa,
    Txs,
    Tya,
    /// Unused encoding; executes as NOP.
    Invalid,
}

/// How an operation uses the location its addressing mode resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessType {
    /// No memory operand (implied operations).
    None,
    /// Reads the operand.
    Read,
    /// Writes the operand without reading it.
    Write,
    /// Reads, modifies and writes back the operand.
    ReadModifyWrite,
    /// Uses the resolved address as a new program counter.
    Jump,
}

impl Operation {
    /// Assembler mnemonic, without any bit index.
    ///
    /// ```
    /// use lib740::Operation;
    ///
    /// assert_eq!(Operation::Lda.mnemonic(), "LDA");
    /// assert_eq!(Operation::Seb(3).mnemonic(), "SEB");
    /// ```
    pub const fn mnemonic(self) -> &'static str {
        use Operation::*;
        match self {
            Adc => "ADC",
            And => "AND",
            Asl => "ASL",
            Bbc(_) => "BBC",
            Bbs(_) => "BBS",
            Bcc => "BCC",
            Bcs => "BCS",
            Beq => "BEQ",
            Bit => "BIT",
            Bmi => "BMI",
            Bne => "BNE",
            Bpl => "BPL",
            Bra => "BRA",
            Brk => "BRK",
            Bvc => "BVC",
            Bvs => "BVS",
            Clc => "CLC",
            Cld => "CLD",
            Cli => "CLI",
            Clb(_) => "CLB",
            Clt => "CLT",
            Clv => "CLV",
            Cmp => "CMP",
            Com => "COM",
            Cpx => "CPX",
            Cpy => "CPY",
            Dec => "DEC",
            Dex => "DEX",
            Dey => "DEY",
            Eor => "EOR",
            Fst => "FST",
            Inc => "INC",
            Inx => "INX",
            Iny => "INY",
            Jmp => "JMP",
            Jsr => "JSR",
            Lda => "LDA",
            Ldm => "LDM",
            Ldx => "LDX",
            Ldy => "LDY",
            Lsr => "LSR",
            Nop => "NOP",
            Ora => "ORA",
            Pha => "PHA",
            Php => "PHP",
            Pla => "PLA",
            Plp => "PLP",
            Rol => "ROL",
            Ror => "ROR",
            Rrf => "RRF",
            Rti => "RTI",
            Rts => "RTS",
            Sbc => "SBC",
            Seb(_) => "SEB",
            Sec => "SEC",
            Sed => "SED",
            Sei => "SEI",
            Set => "SET",
            Slw => "SLW",
            Sta => "STA",
            Stp => "STP",
            Stx => "STX",
            Sty => "STY",
            Tax => "TAX",
            Tay => "TAY",
            Tst => "TST",
            Tsx => "TSX",
            Txa => "TXA",
            Txs => "TXS",
            Tya => "TYA",
            Invalid => "???",
        }
    }

    /// Bit index for the bit-manipulation family.
    pub const fn bit(self) -> Option<u8> {
        match self {
            Operation::Bbc(bit) | Operation::Bbs(bit) | Operation::Clb(bit) | Operation::Seb(bit) => {
                Some(bit)
            }
            _ => None,
        }
    }

    /// How this operation uses a resolved bus address.
    pub const fn access_type(self) -> AccessType {
        use Operation::*;
        match self {
            Adc | And | Bit | Cmp | Cpx | Cpy | Eor | Lda | Ldx | Ldy | Ora | Sbc | Tst => {
                AccessType::Read
            }
            Sta | Stx | Sty | Ldm => AccessType::Write,
            Asl | Lsr | Rol | Ror | Inc | Dec | Com | Rrf | Seb(_) | Clb(_) => {
                AccessType::ReadModifyWrite
            }
            Bcc | Bcs | Beq | Bmi | Bne | Bpl | Bvc | Bvs | Bra | Jmp | Jsr | Bbc(_) | Bbs(_) => {
                AccessType::Jump
            }
            _ => AccessType::None,
        }
    }

    /// Whether a taken branch pays the extra penalty (BRA never does).
    pub const fn is_conditional_branch(self) -> bool {
        use Operation::*;
        matches!(self, Bcc | Bcs | Beq | Bmi | Bne | Bpl | Bvc | Bvs | Bbc(_) | Bbs(_))
    }

    /// Whether index mode redirects this operation from A to the byte at X.
    pub const fn uses_index_mode(self) -> bool {
        matches!(
            self,
            Operation::Adc
                | Operation::And
                | Operation::Cmp
                | Operation::Eor
                | Operation::Lda
                | Operation::Ora
                | Operation::Sbc
        )
    }
}

/// A decoded opcode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Instruction {
    pub operation: Operation,
    pub addressing_mode: AddressingMode,
}

impl Instruction {
    const fn new(operation: Operation, addressing_mode: AddressingMode) -> Self {
        Self {
            operation,
            addressing_mode,
        }
    }

    /// Total instruction size in bytes, opcode included.
    pub const fn size_bytes(&self) -> u16 {
        self.addressing_mode.size_bytes()
    }

    /// Returns true for encodings the processor does not define.
    pub const fn is_invalid(&self) -> bool {
        matches!(self.operation, Operation::Invalid)
    }
}

/// Opcode of the canonical no-operation.
pub const NOP_OPCODE: u8 = 0xEA;

/// Decodes one opcode byte.
///
/// Total over all 256 inputs; unused encodings return an `Invalid` operation
/// with `Implied` addressing.
///
/// ```
/// use lib740::{decode, AddressingMode, Operation};
///
/// let lda = decode(0xA9);
/// assert_eq!(lda.operation, Operation::Lda);
/// assert_eq!(lda.addressing_mode, AddressingMode::Immediate);
///
/// assert_eq!(decode(0x6F).operation, Operation::Seb(3));
/// assert_eq!(decode(0x04).operation, Operation::Invalid);
/// ```
pub const fn decode(opcode: u8) -> Instruction {
    use AddressingMode::*;
    use Operation::*;

    let bit = opcode >> 5;
    let op = match opcode & 0x1F {
        0x03 => Some(Instruction::new(Bbs(bit), AccumulatorRelative)),
        0x07 => Some(Instruction::new(Bbs(bit), ZeroPageRelative)),
        0x0B => Some(Instruction::new(Seb(bit), Accumulator)),
        0x0F => Some(Instruction::new(Seb(bit), ZeroPage)),
        0x13 => Some(Instruction::new(Bbc(bit), AccumulatorRelative)),
        0x17 => Some(Instruction::new(Bbc(bit), ZeroPageRelative)),
        0x1B => Some(Instruction::new(Clb(bit), Accumulator)),
        0x1F => Some(Instruction::new(Clb(bit), ZeroPage)),
        _ => None,
    };
    if let Some(instruction) = op {
        return instruction;
    }

    let (operation, mode) = match opcode {
        0x00 => (Brk, Implied),
        0x01 => (Ora, XIndirect),
        0x02 => (Jsr, ZeroPageIndirect),
        0x05 => (Ora, ZeroPage),
        0x06 => (Asl, ZeroPage),
        0x08 => (Php, Implied),
        0x09 => (Ora, Immediate),
        0x0A => (Asl, Accumulator),
        0x0D => (Ora, Absolute),
        0x0E => (Asl, Absolute),

        0x10 => (Bpl, Relative),
        0x11 => (Ora, IndirectY),
        0x12 => (Clt, Implied),
        0x15 => (Ora, ZeroPageX),
        0x16 => (Asl, ZeroPageX),
        0x18 => (Clc, Implied),
        0x19 => (Ora, AbsoluteY),
        0x1A => (Dec, Accumulator),
        0x1D => (Ora, AbsoluteX),
        0x1E => (Asl, AbsoluteX),

        0x20 => (Jsr, Absolute),
        0x21 => (And, XIndirect),
        0x22 => (Jsr, SpecialPage),
        0x24 => (Bit, ZeroPage),
        0x25 => (And, ZeroPage),
        0x26 => (Rol, ZeroPage),
        0x28 => (Plp, Implied),
        0x29 => (And, Immediate),
        0x2A => (Rol, Accumulator),
        0x2C => (Bit, Absolute),
        0x2D => (And, Absolute),
        0x2E => (Rol, Absolute),

        0x30 => (Bmi, Relative),
        0x31 => (And, IndirectY),
        0x32 => (Set, Implied),
        0x35 => (And, ZeroPageX),
        0x36 => (Rol, ZeroPageX),
        0x38 => (Sec, Implied),
        0x39 => (And, AbsoluteY),
        0x3A => (Inc, Accumulator),
        0x3C => (Ldm, ImmediateZeroPage),
        0x3D => (And, AbsoluteX),
        0x3E => (Rol, AbsoluteX),

        0x40 => (Rti, Implied),
        0x41 => (Eor, XIndirect),
        0x42 => (Stp, Implied),
        0x44 => (Com, ZeroPage),
        0x45 => (Eor, ZeroPage),
        0x46 => (Lsr, ZeroPage),
        0x48 => (Pha, Implied),
        0x49 => (Eor, Immediate),
        0x4A => (Lsr, Accumulator),
        0x4C => (Jmp, Absolute),
        0x4D => (Eor, Absolute),
        0x4E => (Lsr, Absolute),

        0x50 => (Bvc, Relative),
        0x51 => (Eor, IndirectY),
        0x55 => (Eor, ZeroPageX),
        0x56 => (Lsr, ZeroPageX),
        0x58 => (Cli, Implied),
        0x59 => (Eor, AbsoluteY),
        0x5D => (Eor, AbsoluteX),
        0x5E => (Lsr, AbsoluteX),

        0x60 => (Rts, Implied),
        0x61 => (Adc, XIndirect),
        0x64 => (Tst, ZeroPage),
        0x65 => (Adc, ZeroPage),
        0x66 => (Ror, ZeroPage),
        0x68 => (Pla, Implied),
        0x69 => (Adc, Immediate),
        0x6A => (Ror, Accumulator),
        0x6C => (Jmp, AbsoluteIndirect),
        0x6D => (Adc, Absolute),
        0x6E => (Ror, Absolute),

        0x70 => (Bvs, Relative),
        0x71 => (Adc, IndirectY),
        0x75 => (Adc, ZeroPageX),
        0x76 => (Ror, ZeroPageX),
        0x78 => (Sei, Implied),
        0x79 => (Adc, AbsoluteY),
        0x7D => (Adc, AbsoluteX),
        0x7E => (Ror, AbsoluteX),

        0x80 => (Bra, Relative),
        0x81 => (Sta, XIndirect),
        0x82 => (Rrf, ZeroPage),
        0x84 => (Sty, ZeroPage),
        0x85 => (Sta, ZeroPage),
        0x86 => (Stx, ZeroPage),
        0x88 => (Dey, Implied),
        0x8A => (Txa, Implied),
        0x8C => (Sty, Absolute),
        0x8D => (Sta, Absolute),
        0x8E => (Stx, Absolute),

        0x90 => (Bcc, Relative),
        0x91 => (Sta, IndirectY),
        0x94 => (Sty, ZeroPageX),
        0x95 => (Sta, ZeroPageX),
        0x96 => (Stx, ZeroPageY),
        0x98 => (Tya, Implied),
        0x99 => (Sta, AbsoluteY),
        0x9A => (Txs, Implied),
        0x9D => (Sta, AbsoluteX),

        0xA0 => (Ldy, Immediate),
        0xA1 => (Lda, XIndirect),
        0xA2 => (Ldx, Immediate),
        0xA4 => (Ldy, ZeroPage),
        0xA5 => (Lda, ZeroPage),
        0xA6 => (Ldx, ZeroPage),
        0xA8 => (Tay, Implied),
        0xA9 => (Lda, Immediate),
        0xAA => (Tax, Implied),
        0xAC => (Ldy, Absolute),
        0xAD => (Lda, Absolute),
        0xAE => (Ldx, Absolute),

        0xB0 => (Bcs, Relative),
        0xB1 => (Lda, IndirectY),
        0xB2 => (Jmp, ZeroPageIndirect),
        0xB4 => (Ldy, ZeroPageX),
        0xB5 => (Lda, ZeroPageX),
        0xB6 => (Ldx, ZeroPageY),
        0xB8 => (Clv, Implied),
        0xB9 => (Lda, AbsoluteY),
        0xBA => (Tsx, Implied),
        0xBC => (Ldy, AbsoluteX),
        0xBD => (Lda, AbsoluteX),
        0xBE => (Ldx, AbsoluteY),

        0xC0 => (Cpy, Immediate),
        0xC1 => (Cmp, XIndirect),
        0xC2 => (Slw, Implied),
        0xC4 => (Cpy, ZeroPage),
        0xC5 => (Cmp, ZeroPage),
        0xC6 => (Dec, ZeroPage),
        0xC8 => (Iny, Implied),
        0xC9 => (Cmp, Immediate),
        0xCA => (Dex, Implied),
        0xCC => (Cpy, Absolute),
        0xCD => (Cmp, Absolute),
        0xCE => (Dec, Absolute),

        0xD0 => (Bne, Relative),
        0xD1 => (Cmp, IndirectY),
        0xD5 => (Cmp, ZeroPageX),
        0xD6 => (Dec, ZeroPageX),
        0xD8 => (Cld, Implied),
        0xD9 => (Cmp, AbsoluteY),
        0xDD => (Cmp, AbsoluteX),
        0xDE => (Dec, AbsoluteX),

        0xE0 => (Cpx, Immediate),
        0xE1 => (Sbc, XIndirect),
        0xE2 => (Fst, Implied),
        0xE4 => (Cpx, ZeroPage),
        0xE5 => (Sbc, ZeroPage),
        0xE6 => (Inc, ZeroPage),
        0xE8 => (Inx, Implied),
        0xE9 => (Sbc, Immediate),
        0xEA => (Nop, Implied),
        0xEC => (Cpx, Absolute),
        0xED => (Sbc, Absolute),
        0xEE => (Inc, Absolute),

        0xF0 => (Beq, Relative),
        0xF1 => (Sbc, IndirectY),
        0xF5 => (Sbc, ZeroPageX),
        0xF6 => (Inc, ZeroPageX),
        0xF8 => (Sed, Implied),
        0xF9 => (Sbc, AbsoluteY),
        0xFD => (Sbc, AbsoluteX),
        0xFE => (Inc, AbsoluteX),

        _ => (Invalid, Implied),
    };

    Instruction::new(operation, mode)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bit_family_columns() {
        for bit in 0..8u8 {
            let base = bit << 5;
            assert_eq!(decode(base | 0x03), Instruction::new(Operation::Bbs(bit), AddressingMode::AccumulatorRelative));
            assert_eq!(decode(base | 0x07), Instruction::new(Operation::Bbs(bit), AddressingMode::ZeroPageRelative));
            assert_eq!(decode(base | 0x0B), Instruction::new(Operation::Seb(bit), AddressingMode::Accumulator));
            assert_eq!(decode(base | 0x0F), Instruction::new(Operation::Seb(bit), AddressingMode::ZeroPage));
            assert_eq!(decode(base | 0x13), Instruction::new(Operation::Bbc(bit), AddressingMode::AccumulatorRelative));
            assert_eq!(decode(base | 0x17), Instruction::new(Operation::Bbc(bit), AddressingMode::ZeroPageRelative));
            assert_eq!(decode(base | 0x1B), Instruction::new(Operation::Clb(bit), AddressingMode::Accumulator));
            assert_eq!(decode(base | 0x1F), Instruction::new(Operation::Clb(bit), AddressingMode::ZeroPage));
        }
    }

    #[test]
    fn test_invalid_opcodes_are_implied() {
        for opcode in [0x04u8, 0x0C, 0x14, 0x52, 0x89, 0x9E, 0xFC] {
            let instruction = decode(opcode);
            assert!(instruction.is_invalid(), "0x{opcode:02X} should be invalid");
            assert_eq!(instruction.addressing_mode, AddressingMode::Implied);
        }
    }

    #[test]
    fn test_access_types() {
        assert_eq!(Operation::Lda.access_type(), AccessType::Read);
        assert_eq!(Operation::Sta.access_type(), AccessType::Write);
        assert_eq!(Operation::Seb(0).access_type(), AccessType::ReadModifyWrite);
        assert_eq!(Operation::Jsr.access_type(), AccessType::Jump);
        assert_eq!(Operation::Nop.access_type(), AccessType::None);
    }
}
