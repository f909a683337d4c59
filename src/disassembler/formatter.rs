//! Formatting functions for disassembled instructions
//!
//! Output follows Mitsubishi 740 assembler conventions: bit operations name the
//! bit before their operand (`SEB 3,$10`), LDM lists the immediate before the
//! destination, and special-page calls are written `JSR \$1Fxx`.

use crate::addressing::AddressingMode;
use crate::disassembler::Instruction;
use crate::memory::{ADDRESS_MASK, SPECIAL_PAGE};

/// Format a single instruction as assembly text
///
/// # Arguments
///
/// * `instr` - The instruction to format
///
/// # Returns
///
/// A string containing the formatted assembly instruction
pub fn format_instruction(instr: &Instruction) -> String {
    if instr.is_data() {
        return format!(".byte ${:02X}", instr.opcode);
    }

    let mut operand = format_operand(instr);
    if let Some(bit) = instr.operation.bit() {
        operand = if operand.is_empty() {
            bit.to_string()
        } else {
            format!("{},{}", bit, operand)
        };
    }

    let mnemonic = instr.operation.mnemonic();
    if operand.is_empty() {
        mnemonic.to_string()
    } else {
        format!("{} {}", mnemonic, operand)
    }
}

/// Target of a relative displacement held in the last operand byte.
fn relative_target(instr: &Instruction) -> u16 {
    let offset = instr.operand_bytes.last().copied().unwrap_or(0) as i8;
    instr
        .address
        .wrapping_add(u16::from(instr.size_bytes))
        .wrapping_add_signed(i16::from(offset))
        & ADDRESS_MASK
}

/// Format the operand based on addressing mode
fn format_operand(instr: &Instruction) -> String {
    use AddressingMode::*;

    let bytes = &instr.operand_bytes;
    let word = || u16::from_le_bytes([bytes[0], bytes[1]]);

    match instr.addressing_mode {
        Implied => String::new(),
        Accumulator => "A".to_string(),
        Immediate => format!("#${:02X}", bytes[0]),
        ImmediateZeroPage => format!("#${:02X},${:02X}", bytes[0], bytes[1]),
        ZeroPage => format!("${:02X}", bytes[0]),
        ZeroPageX => format!("${:02X},X", bytes[0]),
        ZeroPageY => format!("${:02X},Y", bytes[0]),
        Absolute => format!("${:04X}", word()),
        AbsoluteX => format!("${:04X},X", word()),
        AbsoluteY => format!("${:04X},Y", word()),
        XIndirect => format!("(${:02X},X)", bytes[0]),
        IndirectY => format!("(${:02X}),Y", bytes[0]),
        ZeroPageIndirect => format!("(${:02X})", bytes[0]),
        AbsoluteIndirect => format!("(${:04X})", word()),
        Relative => format!("${:04X}", relative_target(instr)),
        SpecialPage => format!("\\${:04X}", SPECIAL_PAGE | u16::from(bytes[0])),
        AccumulatorRelative => format!("A,${:04X}", relative_target(instr)),
        ZeroPageRelative => format!("${:02X},${:04X}", bytes[0], relative_target(instr)),
    }
}
