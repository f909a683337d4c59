//! 740 Disassembler Module
//!
//! Converts binary machine code into human-readable assembly using the same
//! decoder as the execution engine, so a listing always matches what runs.

pub mod decoder;
pub mod formatter;

use crate::addressing::AddressingMode;
use crate::memory::ADDRESS_MASK;
use crate::opcodes::Operation;

/// A single disassembled instruction with full metadata
#[derive(Debug, Clone, PartialEq)]
pub struct Instruction {
    /// Memory address where this instruction starts
    pub address: u16,

    /// The opcode byte value (0x00-0xFF)
    pub opcode: u8,

    /// Decoded operation; `Invalid` for `.byte` entries
    pub operation: Operation,

    /// Addressing mode used by this instruction
    pub addressing_mode: AddressingMode,

    /// Operand bytes (0-2 bytes depending on addressing mode)
    pub operand_bytes: Vec<u8>,

    /// Total size in bytes (1-3 bytes: opcode + operands)
    pub size_bytes: u8,

    /// Static cost in engine units outside index mode, before branch penalties
    pub base_cycles: u32,
}

impl Instruction {
    /// Builds a `.byte` entry for an opcode that cannot be decoded.
    fn data_byte(address: u16, opcode: u8) -> Self {
        Self {
            address,
            opcode,
            operation: Operation::Invalid,
            addressing_mode: AddressingMode::Implied,
            operand_bytes: Vec::new(),
            size_bytes: 1,
            base_cycles: 0,
        }
    }

    /// Returns true for `.byte` entries.
    pub fn is_data(&self) -> bool {
        self.operation == Operation::Invalid
    }
}

/// Options controlling disassembly output
#[derive(Debug, Clone, Copy, Default)]
pub struct DisassemblyOptions {
    /// Address of the first byte (affects address display and branch targets)
    pub start_address: u16,
}

/// Disassemble a byte slice into a vector of instructions
///
/// Undefined opcodes, and instructions cut off by the end of the slice, become
/// one-byte `.byte` entries so the walk always makes progress. Addresses wrap
/// from $1FFF to $0000.
///
/// # Examples
///
/// ```
/// use lib740::disassembler::{disassemble, formatter::format_instruction, DisassemblyOptions};
///
/// let code = [0x0B, 0x3C, 0x42, 0x10, 0x04];
/// let options = DisassemblyOptions { start_address: 0x1000 };
/// let listing: Vec<String> = disassemble(&code, options)
///     .iter()
///     .map(format_instruction)
///     .collect();
///
/// assert_eq!(listing, ["SEB 0,A", "LDM #$42,$10", ".byte $04"]);
/// ```
pub fn disassemble(bytes: &[u8], options: DisassemblyOptions) -> Vec<Instruction> {
    let mut instructions = Vec::new();
    let mut pc = 0;
    let mut address = options.start_address & ADDRESS_MASK;

    while pc < bytes.len() {
        let instr = decoder::decode_instruction(&bytes[pc..], address)
            .unwrap_or_else(|| Instruction::data_byte(address, bytes[pc]));

        pc += instr.size_bytes as usize;
        address = address.wrapping_add(instr.size_bytes as u16) & ADDRESS_MASK;
        instructions.push(instr);
    }

    instructions
}
