//! Fuzz target for the disassembler.
//!
//! This target feeds arbitrary byte sequences to the disassembler
//! to find edge cases and crashes in instruction decoding and formatting.

#![no_main]

use arbitrary::Arbitrary;
use lib740::disassembler::formatter::format_instruction;
use lib740::{disassemble, DisassemblyOptions, ADDRESS_MASK};
use libfuzzer_sys::fuzz_target;

/// Complete fuzz input
#[derive(Debug, Arbitrary)]
struct FuzzInput {
    bytes: Vec<u8>,
    start_address: u16,
}

fuzz_target!(|input: FuzzInput| {
    // Limit input size to prevent OOM
    if input.bytes.len() > 8192 {
        return;
    }

    let options = DisassemblyOptions {
        start_address: input.start_address,
    };

    // Disassemble the bytes
    let instructions = disassemble(&input.bytes, options);

    // Verify invariants
    let mut total_size: usize = 0;
    let mut expected_address = input.start_address & ADDRESS_MASK;

    for instr in &instructions {
        // Each instruction should have correct address
        assert_eq!(instr.address, expected_address);

        // Size should be 1-3 bytes, operands filling the rest
        assert!(instr.size_bytes >= 1 && instr.size_bytes <= 3);
        assert_eq!(instr.operand_bytes.len() + 1, instr.size_bytes as usize);

        // Every entry must format without panicking
        assert!(!format_instruction(instr).is_empty());

        total_size += instr.size_bytes as usize;
        expected_address = expected_address.wrapping_add(instr.size_bytes as u16) & ADDRESS_MASK;
    }

    // Total size should equal input size
    assert_eq!(total_size, input.bytes.len());
});
