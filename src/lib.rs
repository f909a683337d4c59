//! # Mitsubishi 740 CPU Core
//!
//! A cycle-costed execution engine for the Mitsubishi 740 family of 8-bit
//! microcontrollers, as found in the M50740, designed for modularity, clarity
//! and WebAssembly portability.
//!
//! The 740 is a 6502 derivative with its own additions: bit set/clear/test
//! instructions, an index mode that redirects accumulator operations to the
//! byte at X, special-page subroutine calls, a zero-page stack and a 13-bit
//! (8 KB) address space.
//!
//! ## Quick Start
//!
//! ```rust
//! use lib740::CPU;
//!
//! // 4 KB ROM mapped at 0x1000-0x1FFF
//! let mut rom = vec![0xEA; 4096];
//! rom[0x000] = 0xA9; // LDA #$42
//! rom[0x001] = 0x42;
//! rom[0x002] = 0x85; // STA $10
//! rom[0x003] = 0x10;
//! rom[0x004] = 0x42; // STP
//!
//! // Reset vector at 0x1FFE/0x1FFF points at 0x1000
//! rom[0xFFE] = 0x00;
//! rom[0xFFF] = 0x10;
//!
//! let mut cpu = CPU::new();
//! cpu.set_rom(&rom);
//!
//! // Host ticks run four to an engine unit
//! cpu.run_for(1000);
//!
//! assert!(cpu.is_stopped());
//! assert_eq!(cpu.memory().peek(0x0010), 0x42);
//! assert_eq!(cpu.cycles(), 2 + 4 + 2);
//! ```
//!
//! ## Architecture
//!
//! - **Decoder**: a pure, total function from opcode byte to operation and addressing mode
//! - **Performers**: a 256-entry table of per-opcode functions specialised at compile time
//! - **Bus**: a single owner of RAM, ROM and peripheral dispatch, applying the 13-bit mask
//! - **Clock adapter**: host ticks are divided by four into a signed unit budget
//! - **Peripherals**: the port and timer ranges are served through the `Peripheral` trait
//!
//! ## Modules
//!
//! - `cpu` - CPU state and the clocked dispatch loop
//! - `memory` - Memory map and bus
//! - `opcodes` - Operation decoder
//! - `addressing` - Addressing modes and operand resolution
//! - `timing` - Instruction cost table
//! - `devices` - Peripheral trait and stub ports
//! - `snapshot` - State capture and restore
//! - `disassembler` - Listing generator

pub mod addressing;
pub mod cpu;
pub mod devices;
pub mod disassembler;
pub mod memory;
pub mod opcodes;
pub mod snapshot;
pub mod timing;
pub mod wasm;

// Internal instruction implementations (not part of public API)
mod instructions;
mod performers;

// Re-export public API
pub use addressing::AddressingMode;
pub use cpu::{
    CPU, FLAG_BREAK, FLAG_CARRY, FLAG_DECIMAL, FLAG_INDEX_MODE, FLAG_INTERRUPT_DISABLE,
    FLAG_NEGATIVE, FLAG_OVERFLOW, FLAG_ZERO, INITIAL_STACK_POINTER,
};
pub use devices::{Peripheral, PortRegion, PortStubs};
pub use disassembler::{disassemble, DisassemblyOptions};
pub use memory::{
    Bus, ADDRESS_MASK, INTERRUPT_VECTOR, OPEN_BUS, RAM_SIZE, RESET_VECTOR, ROM_SIZE, ROM_START,
    SPECIAL_PAGE,
};
pub use opcodes::{decode, AccessType, Instruction, Operation, NOP_OPCODE};
pub use snapshot::{Snapshot, SnapshotError, MAX_OVERDRAW, SNAPSHOT_SIZE};
pub use timing::{cost, BRANCH_TAKEN_PENALTY, CLOCK_DIVIDER, INTERRUPT_COST, MAX_CHARGE};
