//! Instruction decoder for the 740 disassembler

use crate::disassembler::Instruction;
use crate::opcodes::decode;
use crate::timing::cost;

/// Decode a single instruction from a byte slice
///
/// # Arguments
///
/// * `bytes` - The byte slice starting at the instruction to decode
/// * `address` - The memory address of this instruction
///
/// # Returns
///
/// Some(Instruction) if the opcode is defined and complete, None otherwise
pub fn decode_instruction(bytes: &[u8], address: u16) -> Option<Instruction> {
    let (&opcode, operands) = bytes.split_first()?;
    let decoded = decode(opcode);

    if decoded.is_invalid() {
        return None;
    }

    // Check if there are enough bytes for the full instruction
    let operand_len = usize::from(decoded.addressing_mode.operand_len());
    if operands.len() < operand_len {
        return None;
    }

    Some(Instruction {
        address,
        opcode,
        operation: decoded.operation,
        addressing_mode: decoded.addressing_mode,
        operand_bytes: operands[..operand_len].to_vec(),
        size_bytes: decoded.size_bytes() as u8,
        base_cycles: cost(decoded.operation, decoded.addressing_mode, false),
    })
}
