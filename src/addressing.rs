//! # Addressing Modes
//!
//! This module defines the 18 addressing modes of the 740 family and the
//! resolver that turns a mode into a concrete operand. Each mode determines how
//! the CPU interprets the operand bytes that follow an opcode, how far the
//! program counter advances, and which bus address (if any) the operation
//! touches.
//!
//! All address arithmetic happens in the 13-bit space; the bus applies the
//! final mask, so the resolver only has to honour the zero-page wraps that the
//! hardware performs on 8-bit intermediate values.

use crate::devices::Peripheral;
use crate::memory::SPECIAL_PAGE;
use crate::CPU;

/// 740-family addressing mode enumeration.
///
/// # Operand Sizes
///
/// - **0 bytes**: Implied, Accumulator
/// - **1 byte**: Immediate, ZeroPage, ZeroPageX, ZeroPageY, XIndirect, IndirectY,
///   Relative, ZeroPageIndirect, SpecialPage, AccumulatorRelative
/// - **2 bytes**: Absolute, AbsoluteX, AbsoluteY, AbsoluteIndirect,
///   ImmediateZeroPage, ZeroPageRelative
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressingMode {
    /// No operand, operation implied by instruction.
    ///
    /// Examples: CLC, RTS, NOP
    Implied,

    /// Operates directly on the accumulator register.
    ///
    /// Examples: ASL A, INC A, SEB 3,A
    Accumulator,

    /// 8-bit constant operand in instruction.
    ///
    /// Example: LDA #$10
    Immediate,

    /// Immediate value stored straight to a zero-page location.
    ///
    /// Example: LDM #$42,$10 (bytes are value, then destination)
    ImmediateZeroPage,

    /// 8-bit address in zero page (0x00-0xFF).
    ZeroPage,

    /// Zero page address indexed by X, wrapping within zero page.
    ZeroPageX,

    /// Zero page address indexed by Y, wrapping within zero page.
    ZeroPageY,

    /// Full 16-bit little-endian address.
    Absolute,

    /// 16-bit address indexed by X; the carry propagates into the high byte.
    AbsoluteX,

    /// 16-bit address indexed by Y; the carry propagates into the high byte.
    AbsoluteY,

    /// Indexed indirect: (ZP + X) then dereference.
    ///
    /// Example: LDA ($40,X)
    XIndirect,

    /// Indirect indexed: ZP dereference then + Y.
    ///
    /// Example: LDA ($40),Y
    IndirectY,

    /// Jump through a pointer held in zero page.
    ///
    /// Example: JMP ($40)
    ZeroPageIndirect,

    /// Jump through a pointer held anywhere in the address space.
    ///
    /// Example: JMP ($1234)
    AbsoluteIndirect,

    /// Signed 8-bit displacement from the following instruction.
    Relative,

    /// Short subroutine call into the special page (0x1F00-0x1FFF).
    ///
    /// Example: JSR \$1F20
    SpecialPage,

    /// Bit test of the accumulator, then relative branch.
    ///
    /// Example: BBS 3,A,label
    AccumulatorRelative,

    /// Bit test of a zero-page byte, then relative branch.
    ///
    /// Example: BBC 3,$10,label (bytes are address, then displacement)
    ZeroPageRelative,
}

impl AddressingMode {
    /// Number of operand bytes following the opcode.
    pub const fn operand_len(self) -> u16 {
        use AddressingMode::*;
        match self {
            Implied | Accumulator => 0,
            Immediate | ZeroPage | ZeroPageX | ZeroPageY | XIndirect | IndirectY | Relative
            | ZeroPageIndirect | SpecialPage | AccumulatorRelative => 1,
            Absolute | AbsoluteX | AbsoluteY | AbsoluteIndirect | ImmediateZeroPage
            | ZeroPageRelative => 2,
        }
    }

    /// Total instruction size in bytes, opcode included.
    pub const fn size_bytes(self) -> u16 {
        1 + self.operand_len()
    }
}

/// Where an operation finds its operand once the addressing mode is resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Operand {
    /// No operand at all.
    Implied,
    /// The accumulator register itself.
    Accumulator,
    /// The byte following the opcode.
    Immediate(u8),
    /// An effective address on the bus (or a branch/jump target).
    Address(u16),
}

impl<P: Peripheral> CPU<P> {
    /// Reads the instruction byte `offset` bytes past the current opcode.
    pub(crate) fn operand_byte(&mut self, offset: u16) -> u8 {
        self.read(self.pc.wrapping_add(offset))
    }

    /// Reads a little-endian word from the instruction stream.
    pub(crate) fn operand_word(&mut self, offset: u16) -> u16 {
        let lo = self.operand_byte(offset);
        let hi = self.operand_byte(offset + 1);
        u16::from_le_bytes([lo, hi])
    }

    /// Reads a little-endian pointer whose high byte stays inside zero page.
    fn zero_page_pointer(&mut self, address: u8) -> u16 {
        let lo = self.read(u16::from(address));
        let hi = self.read(u16::from(address.wrapping_add(1)));
        u16::from_le_bytes([lo, hi])
    }

    /// Reads a little-endian pointer; the high byte address wraps at the
    /// top of the address space.
    pub(crate) fn read_word(&mut self, address: u16) -> u16 {
        let lo = self.read(address);
        let hi = self.read(address.wrapping_add(1));
        u16::from_le_bytes([lo, hi])
    }

    /// Moves the program counter past an instruction in `mode`.
    pub(crate) fn advance(&mut self, mode: AddressingMode) {
        self.set_pc(self.pc.wrapping_add(mode.size_bytes()));
    }

    /// Resolves `mode` at the current program counter and advances past the
    /// instruction.
    ///
    /// Relative targets are computed from the program counter after the
    /// advance, so they always equal `P + L + D`.
    pub(crate) fn resolve(&mut self, mode: AddressingMode) -> Operand {
        use AddressingMode::*;

        let operand = match mode {
            Implied => Operand::Implied,
            Accumulator => Operand::Accumulator,
            Immediate => Operand::Immediate(self.operand_byte(1)),

            ZeroPage => Operand::Address(u16::from(self.operand_byte(1))),
            ZeroPageX => {
                let base = self.operand_byte(1);
                Operand::Address(u16::from(base.wrapping_add(self.x)))
            }
            ZeroPageY => {
                let base = self.operand_byte(1);
                Operand::Address(u16::from(base.wrapping_add(self.y)))
            }

            Absolute => Operand::Address(self.operand_word(1)),
            AbsoluteX => Operand::Address(self.operand_word(1).wrapping_add(u16::from(self.x))),
            AbsoluteY => Operand::Address(self.operand_word(1).wrapping_add(u16::from(self.y))),

            XIndirect => {
                let base = self.operand_byte(1).wrapping_add(self.x);
                Operand::Address(self.zero_page_pointer(base))
            }
            IndirectY => {
                let base = self.operand_byte(1);
                let pointer = self.zero_page_pointer(base);
                Operand::Address(pointer.wrapping_add(u16::from(self.y)))
            }

            ZeroPageIndirect => {
                let base = self.operand_byte(1);
                Operand::Address(self.zero_page_pointer(base))
            }
            AbsoluteIndirect => {
                let pointer = self.operand_word(1);
                Operand::Address(self.read_word(pointer))
            }

            Relative => {
                let displacement = self.operand_byte(1) as i8;
                let next = self.pc.wrapping_add(mode.size_bytes());
                Operand::Address(next.wrapping_add_signed(i16::from(displacement)))
            }
            SpecialPage => Operand::Address(SPECIAL_PAGE | u16::from(self.operand_byte(1))),

            // These carry their own sequencing and never reach the generic path.
            ImmediateZeroPage | AccumulatorRelative | ZeroPageRelative => {
                unreachable!("{mode:?} is sequenced by its operation")
            }
        };

        self.advance(mode);
        operand
    }
}
