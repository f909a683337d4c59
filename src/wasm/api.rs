//! WASM API for the 740 engine.
//!
//! Provides JavaScript-callable interfaces for ROM loading, clocked execution,
//! state inspection, disassembly and snapshots.

use crate::disassembler::formatter::format_instruction;
use crate::memory::ADDRESS_MASK;
use crate::{disassemble, DisassemblyOptions, Snapshot, CPU};
use wasm_bindgen::prelude::*;

/// Longest encoding: opcode plus two operand bytes.
const MAX_INSTRUCTION_BYTES: usize = 3;

/// JavaScript-compatible error wrapper
#[wasm_bindgen]
#[derive(Debug, Clone)]
pub struct JsError {
    message: String,
}

#[wasm_bindgen]
impl JsError {
    #[wasm_bindgen(constructor)]
    pub fn new(message: &str) -> JsError {
        JsError {
            message: message.to_string(),
        }
    }

    #[wasm_bindgen(getter)]
    pub fn message(&self) -> String {
        self.message.clone()
    }
}

/// Result of disassembly operation
#[wasm_bindgen]
#[derive(Debug, Clone)]
pub struct DisassemblyLine {
    address: u16,
    bytes: Vec<u8>,
    mnemonic: String,
    operand: String,
}

#[wasm_bindgen]
impl DisassemblyLine {
    #[wasm_bindgen(getter)]
    pub fn address(&self) -> u16 {
        self.address
    }

    #[wasm_bindgen(getter)]
    pub fn bytes(&self) -> Vec<u8> {
        self.bytes.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn mnemonic(&self) -> String {
        self.mnemonic.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn operand(&self) -> String {
        self.operand.clone()
    }
}

/// Main emulator interface for JavaScript
#[wasm_bindgen]
pub struct Emulator740 {
    cpu: CPU,
}

#[wasm_bindgen]
impl Emulator740 {
    /// Create an engine with an empty ROM and stubbed ports
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Emulator740 { cpu: CPU::new() }
    }

    /// Install a ROM image (right-aligned at $1FFF) and reset
    pub fn load_rom(&mut self, rom: &[u8]) {
        self.cpu.set_rom(rom);
    }

    /// Reset the CPU through the reset vector
    pub fn reset(&mut self) {
        self.cpu.reset();
    }

    /// Advance by a number of host clock ticks
    pub fn run_for(&mut self, ticks: u32) {
        self.cpu.run_for(ticks);
    }

    /// Execute a single instruction and return its cost in engine units
    pub fn step(&mut self) -> u32 {
        self.cpu.step()
    }

    /// Request a hardware interrupt; returns whether it was taken
    pub fn interrupt(&mut self) -> bool {
        self.cpu.interrupt()
    }

    // Register getters
    #[wasm_bindgen(getter)]
    pub fn a(&self) -> u8 {
        self.cpu.a()
    }

    #[wasm_bindgen(getter)]
    pub fn x(&self) -> u8 {
        self.cpu.x()
    }

    #[wasm_bindgen(getter)]
    pub fn y(&self) -> u8 {
        self.cpu.y()
    }

    #[wasm_bindgen(getter)]
    pub fn s(&self) -> u8 {
        self.cpu.s()
    }

    #[wasm_bindgen(getter)]
    pub fn pc(&self) -> u16 {
        self.cpu.pc()
    }

    #[wasm_bindgen(getter)]
    pub fn status(&self) -> u8 {
        self.cpu.status()
    }

    #[wasm_bindgen(getter)]
    pub fn stopped(&self) -> bool {
        self.cpu.is_stopped()
    }

    #[wasm_bindgen(getter)]
    pub fn cycles(&self) -> f64 {
        self.cpu.cycles() as f64 // Convert u64 to f64 for JavaScript
    }

    // Memory access methods

    /// Read a byte without triggering peripheral side effects
    pub fn peek(&self, addr: u16) -> u8 {
        self.cpu.memory().peek(addr)
    }

    /// Internal RAM contents ($0000-$005F)
    pub fn ram(&self) -> Vec<u8> {
        self.cpu.memory().ram().to_vec()
    }

    /// Disassemble memory starting at an address
    ///
    /// The listing wraps from $1FFF to $0000 and covers at most one pass over
    /// the address space.
    pub fn disassemble(&self, start_addr: u16, num_instructions: u32) -> Vec<JsValue> {
        let start = start_addr & ADDRESS_MASK;
        let memory_vec = self.window(start, num_instructions);

        let opts = DisassemblyOptions {
            start_address: start,
        };

        disassemble(&memory_vec, opts)
            .iter()
            .take(num_instructions as usize)
            .map(|instr| {
                let mut bytes = vec![instr.opcode];
                bytes.extend_from_slice(&instr.operand_bytes);

                let text = format_instruction(instr);
                let (mnemonic, operand) = match text.split_once(' ') {
                    Some((mnemonic, operand)) => (mnemonic.to_string(), operand.to_string()),
                    None => (text, String::new()),
                };

                JsValue::from(DisassemblyLine {
                    address: instr.address,
                    bytes,
                    mnemonic,
                    operand,
                })
            })
            .collect()
    }

    // Snapshots

    /// Serialize registers, timing state and RAM
    pub fn save_state(&self) -> js_sys::Uint8Array {
        js_sys::Uint8Array::from(self.cpu.snapshot().serialize().as_slice())
    }

    /// Restore a state produced by `save_state`
    pub fn load_state(&mut self, data: &[u8]) -> Result<(), JsError> {
        let snapshot = Snapshot::deserialize(data).map_err(|e| JsError::new(&e.to_string()))?;
        self.cpu.restore(&snapshot);
        Ok(())
    }
}

impl Emulator740 {
    /// Bytes covering `count` instructions from `start`, wrapping at $1FFF.
    fn window(&self, start: u16, count: u32) -> Vec<u8> {
        let len = (count as usize)
            .saturating_mul(MAX_INSTRUCTION_BYTES)
            .min(usize::from(ADDRESS_MASK) + 1);
        (0..len as u16)
            .map(|offset| self.cpu.memory().peek(start.wrapping_add(offset) & ADDRESS_MASK))
            .collect()
    }
}

impl Default for Emulator740 {
    fn default() -> Self {
        Self::new()
    }
}
