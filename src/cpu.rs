//! # CPU State and Execution
//!
//! This module contains the CPU struct representing the 740 processor state and
//! the clocked dispatch loop.
//!
//! ## CPU State
//!
//! The CPU maintains:
//! - **Registers**: Accumulator (A), index registers (X, Y)
//! - **Program counter** (PC): 13-bit address of next instruction
//! - **Stack pointer** (S): 8-bit offset into page zero; the stack lives in internal RAM
//! - **Status flags**: N, V, T, D, I, Z, C (individual bool fields)
//! - **Budget**: signed count of engine units still owed to the caller
//! - **Cycle counter**: u64 monotonically increasing unit count
//!
//! ## Execution Model
//!
//! The host clock runs four times faster than the engine. `run_for()` converts
//! host ticks into engine units (carrying any remainder to the next call) and
//! then performs whole instructions while the budget is positive. Each
//! instruction is charged in full before it executes, so the budget may finish
//! slightly negative; the overshoot is repaid from the next call.
//!
//! Every opcode is dispatched through a 256-entry table of performers built
//! once per CPU, so the hot loop never re-decodes an opcode byte.

use crate::devices::{Peripheral, PortStubs};
use crate::instructions;
use crate::memory::{Bus, ADDRESS_MASK, RESET_VECTOR};
use crate::performers::{self, Performer};
use crate::snapshot::{Snapshot, MAX_OVERDRAW};
use crate::timing::{CLOCK_DIVIDER, INTERRUPT_COST};

/// Negative flag bit in the packed status byte.
pub const FLAG_NEGATIVE: u8 = 0x80;
/// Overflow flag bit.
pub const FLAG_OVERFLOW: u8 = 0x40;
/// Index-mode (T) flag bit.
pub const FLAG_INDEX_MODE: u8 = 0x20;
/// Break marker; only ever present in status bytes pushed by BRK.
pub const FLAG_BREAK: u8 = 0x10;
/// Decimal-mode flag bit.
pub const FLAG_DECIMAL: u8 = 0x08;
/// Interrupt-disable flag bit.
pub const FLAG_INTERRUPT_DISABLE: u8 = 0x04;
/// Zero flag bit.
pub const FLAG_ZERO: u8 = 0x02;
/// Carry flag bit.
pub const FLAG_CARRY: u8 = 0x01;

/// Stack pointer value at construction.
pub const INITIAL_STACK_POINTER: u8 = 0x5F;

/// M50740 CPU state and execution context.
///
/// The CPU owns the memory bus (and through it the peripheral), every register,
/// the budget and the dispatch table. It is generic over the peripheral
/// implementation via the `Peripheral` trait; the default is [`PortStubs`].
///
/// # Type Parameters
///
/// * `P` - Peripheral serving the port and timer ranges
///
/// # Examples
///
/// ```
/// use lib740::CPU;
///
/// // A 4 KB ROM: LDA #$42 at 0x1000, reset vector pointing at it
/// let mut rom = vec![0xEA; 4096];
/// rom[0x000] = 0xA9;
/// rom[0x001] = 0x42;
/// rom[0xFFE] = 0x00;
/// rom[0xFFF] = 0x10;
///
/// let mut cpu = CPU::new();
/// cpu.set_rom(&rom);
/// assert_eq!(cpu.pc(), 0x1000);
///
/// // Eight host ticks buy two engine units: exactly one LDA immediate
/// cpu.run_for(8);
/// assert_eq!(cpu.a(), 0x42);
/// assert_eq!(cpu.pc(), 0x1002);
/// ```
pub struct CPU<P: Peripheral = PortStubs> {
    /// Accumulator register
    pub(crate) a: u8,

    /// X index register
    pub(crate) x: u8,

    /// Y index register
    pub(crate) y: u8,

    /// Stack pointer (offset into page zero)
    pub(crate) s: u8,

    /// Program counter, always within the 13-bit space
    pub(crate) pc: u16,

    /// Negative flag (set if bit 7 of result is 1)
    pub(crate) flag_n: bool,

    /// Overflow flag (set on signed overflow)
    pub(crate) flag_v: bool,

    /// Index mode: accumulator-class operations target the byte at X
    pub(crate) flag_t: bool,

    /// Decimal mode flag (enables BCD arithmetic)
    pub(crate) flag_d: bool,

    /// Interrupt disable flag (blocks interrupts when set)
    pub(crate) flag_i: bool,

    /// Zero flag (set if result is zero)
    pub(crate) flag_z: bool,

    /// Carry flag (set on unsigned overflow, clear on borrow)
    pub(crate) flag_c: bool,

    /// Set by STP; cleared only by reset
    pub(crate) stopped: bool,

    /// Engine units still owed; negative after an overshoot
    pub(crate) budget: i64,

    /// Host ticks not yet converted into a whole engine unit
    pub(crate) clock_remainder: u32,

    /// Total engine units charged since construction
    pub(crate) cycles: u64,

    /// Memory bus implementation
    pub(crate) memory: Bus<P>,

    performers: [Performer<P>; 256],
}

impl CPU<PortStubs> {
    /// Creates a CPU whose peripheral ranges are served by [`PortStubs`].
    ///
    /// The ROM region starts zero-filled; install an image with
    /// [`set_rom`](CPU::set_rom), which also performs the reset.
    pub fn new() -> Self {
        Self::with_peripheral(PortStubs)
    }
}

impl Default for CPU<PortStubs> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: Peripheral> CPU<P> {
    /// Creates a CPU attached to `peripheral`.
    ///
    /// Initial state: A, X, Y and PC zero, S = 0x5F, interrupt disable set,
    /// all other flags clear, empty budget.
    pub fn with_peripheral(peripheral: P) -> Self {
        Self {
            a: 0x00,
            x: 0x00,
            y: 0x00,
            s: INITIAL_STACK_POINTER,
            pc: 0x0000,
            flag_n: false,
            flag_v: false,
            flag_t: false,
            flag_d: false,
            flag_i: true,
            flag_z: false,
            flag_c: false,
            stopped: false,
            budget: 0,
            clock_remainder: 0,
            cycles: 0,
            memory: Bus::new(peripheral),
            performers: performers::table::<P>(),
        }
    }

    /// Installs a ROM image and resets the processor.
    ///
    /// The image is right-aligned so that it ends at 0x1FFF; images longer than
    /// 4096 bytes are truncated to their first 4096 bytes.
    pub fn set_rom(&mut self, rom: &[u8]) {
        let installed = self.memory.load_rom(rom);
        if installed < rom.len() {
            log::debug!("ROM image truncated from {} to {} bytes", rom.len(), installed);
        }
        log::info!("installed {}-byte ROM", installed);
        self.reset();
    }

    /// Resets the processor.
    ///
    /// Loads the program counter from the reset vector, sets interrupt disable,
    /// clears index mode and releases a stop. Other registers, RAM and the
    /// budget are left as they are.
    pub fn reset(&mut self) {
        let vector = self.read_word(RESET_VECTOR);
        self.set_pc(vector);
        self.flag_i = true;
        self.flag_t = false;
        self.stopped = false;
        log::info!("reset: PC = 0x{:04X}", self.pc);
    }

    /// Advances the processor by `ticks` host clock ticks.
    ///
    /// Ticks are divided by four into engine units; the remainder carries over
    /// to the next call. Whole instructions are then performed while the budget
    /// stays positive and the processor is not stopped. A level-triggered
    /// peripheral interrupt is taken between instructions when enabled.
    ///
    /// # Examples
    ///
    /// ```
    /// use lib740::CPU;
    ///
    /// let mut rom = vec![0xEA; 4096]; // NOPs, two units each
    /// rom[0xFFE] = 0x00;
    /// rom[0xFFF] = 0x10;
    ///
    /// let mut cpu = CPU::new();
    /// cpu.set_rom(&rom);
    ///
    /// cpu.run_for(3); // less than one unit: nothing happens yet
    /// assert_eq!(cpu.pc(), 0x1000);
    ///
    /// cpu.run_for(1); // remainder completes one unit: one NOP, one unit overdrawn
    /// assert_eq!(cpu.pc(), 0x1001);
    /// assert_eq!(cpu.budget(), -1);
    /// ```
    pub fn run_for(&mut self, ticks: u32) {
        let total = u64::from(self.clock_remainder) + u64::from(ticks);
        self.budget += (total / u64::from(CLOCK_DIVIDER)) as i64;
        self.clock_remainder = (total % u64::from(CLOCK_DIVIDER)) as u32;

        while self.budget > 0 && !self.stopped {
            if self.memory.peripheral().interrupt_requested() && self.interrupt() {
                continue;
            }
            self.perform_next();
        }

        // A stopped processor cannot bank time for after its next reset.
        if self.stopped && self.budget > 0 {
            self.budget = 0;
        }
    }

    /// Performs exactly one instruction outside the clocked budget.
    ///
    /// Returns the units the instruction cost, or zero if the processor is
    /// stopped. The pending budget of `run_for()` is not affected.
    pub fn step(&mut self) -> u32 {
        if self.stopped {
            return 0;
        }

        let budget = self.budget;
        self.perform_next();
        let cost = budget - self.budget;
        self.budget = budget;
        cost as u32
    }

    /// Requests a hardware interrupt.
    ///
    /// Ignored (returning `false`) while interrupt disable is set or the
    /// processor is stopped. Otherwise pushes the return address and status,
    /// sets interrupt disable, jumps through the interrupt vector and charges
    /// seven units against the budget.
    pub fn interrupt(&mut self) -> bool {
        if self.flag_i || self.stopped {
            return false;
        }

        self.charge(INTERRUPT_COST);
        instructions::control::enter_interrupt(self, false);
        log::trace!("interrupt taken, vectoring to 0x{:04X}", self.pc);
        true
    }

    /// Fetches the opcode at PC and hands it to its performer.
    fn perform_next(&mut self) {
        let opcode = self.read(self.pc);
        log::trace!(
            "{:04X}  {:02X}  A={:02X} X={:02X} Y={:02X} S={:02X} P={:02X}",
            self.pc,
            opcode,
            self.a,
            self.x,
            self.y,
            self.s,
            self.status()
        );

        let performer = self.performers[usize::from(opcode)];
        performer(self);
    }

    // ========== Internal Helpers ==========

    /// Deducts `units` from the budget and adds them to the running total.
    ///
    /// The total wraps rather than saturating.
    pub(crate) fn charge(&mut self, units: u32) {
        self.budget -= i64::from(units);
        self.cycles = self.cycles.wrapping_add(u64::from(units));
    }

    pub(crate) fn read(&mut self, address: u16) -> u8 {
        self.memory.read(address)
    }

    pub(crate) fn write(&mut self, address: u16, value: u8) {
        self.memory.write(address, value);
    }

    /// Pushes onto the page-zero stack: store at S, then decrement.
    pub(crate) fn push(&mut self, value: u8) {
        self.write(u16::from(self.s), value);
        self.s = self.s.wrapping_sub(1);
    }

    /// Pulls from the page-zero stack: increment S, then load.
    pub(crate) fn pull(&mut self) -> u8 {
        self.s = self.s.wrapping_add(1);
        self.read(u16::from(self.s))
    }

    /// Sets N and Z from `value`.
    pub(crate) fn set_nz(&mut self, value: u8) {
        self.flag_n = (value & 0x80) != 0;
        self.flag_z = value == 0;
    }

    // ========== Register Getters ==========

    /// Returns the accumulator register value.
    pub fn a(&self) -> u8 {
        self.a
    }

    /// Returns the X index register value.
    pub fn x(&self) -> u8 {
        self.x
    }

    /// Returns the Y index register value.
    pub fn y(&self) -> u8 {
        self.y
    }

    /// Returns the stack pointer value.
    ///
    /// Note: the stack occupies page zero, so with the default pointer of 0x5F
    /// it grows downward from the top of internal RAM.
    pub fn s(&self) -> u8 {
        self.s
    }

    /// Returns the program counter value.
    pub fn pc(&self) -> u16 {
        self.pc
    }

    /// Returns the status register as a packed byte.
    ///
    /// Bit layout (NVTBDIZC):
    /// - Bit 7: N (Negative)
    /// - Bit 6: V (Overflow)
    /// - Bit 5: T (Index mode)
    /// - Bit 4: B (never set here; only in status pushed by BRK)
    /// - Bit 3: D (Decimal)
    /// - Bit 2: I (Interrupt Disable)
    /// - Bit 1: Z (Zero)
    /// - Bit 0: C (Carry)
    ///
    /// # Examples
    ///
    /// ```
    /// use lib740::CPU;
    ///
    /// let cpu = CPU::new();
    /// assert_eq!(cpu.status(), 0x04); // interrupt disable only
    /// ```
    pub fn status(&self) -> u8 {
        let mut status: u8 = 0;

        if self.flag_n {
            status |= FLAG_NEGATIVE;
        }
        if self.flag_v {
            status |= FLAG_OVERFLOW;
        }
        if self.flag_t {
            status |= FLAG_INDEX_MODE;
        }
        if self.flag_d {
            status |= FLAG_DECIMAL;
        }
        if self.flag_i {
            status |= FLAG_INTERRUPT_DISABLE;
        }
        if self.flag_z {
            status |= FLAG_ZERO;
        }
        if self.flag_c {
            status |= FLAG_CARRY;
        }

        status
    }

    /// Returns the number of engine units still owed (negative after overshoot).
    pub fn budget(&self) -> i64 {
        self.budget
    }

    /// Returns the total number of engine units charged since construction.
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    /// Returns true once STP has executed, until the next reset.
    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    // ========== Status Flag Getters ==========

    /// Returns true if the Negative flag is set.
    pub fn flag_n(&self) -> bool {
        self.flag_n
    }

    /// Returns true if the Overflow flag is set.
    pub fn flag_v(&self) -> bool {
        self.flag_v
    }

    /// Returns true if index mode is active.
    pub fn flag_t(&self) -> bool {
        self.flag_t
    }

    /// Returns true if the Decimal mode flag is set.
    pub fn flag_d(&self) -> bool {
        self.flag_d
    }

    /// Returns true if the Interrupt Disable flag is set.
    pub fn flag_i(&self) -> bool {
        self.flag_i
    }

    /// Returns true if the Zero flag is set.
    pub fn flag_z(&self) -> bool {
        self.flag_z
    }

    /// Returns true if the Carry flag is set.
    pub fn flag_c(&self) -> bool {
        self.flag_c
    }

    // ========== Register Setters ==========

    pub fn set_a(&mut self, value: u8) {
        self.a = value;
    }

    pub fn set_x(&mut self, value: u8) {
        self.x = value;
    }

    pub fn set_y(&mut self, value: u8) {
        self.y = value;
    }

    pub fn set_s(&mut self, value: u8) {
        self.s = value;
    }

    /// Sets the program counter, masked to 13 bits.
    pub fn set_pc(&mut self, value: u16) {
        self.pc = value & ADDRESS_MASK;
    }

    /// Unpacks a status byte into the individual flags; bit 4 is ignored.
    pub fn set_status(&mut self, status: u8) {
        self.flag_n = (status & FLAG_NEGATIVE) != 0;
        self.flag_v = (status & FLAG_OVERFLOW) != 0;
        self.flag_t = (status & FLAG_INDEX_MODE) != 0;
        self.flag_d = (status & FLAG_DECIMAL) != 0;
        self.flag_i = (status & FLAG_INTERRUPT_DISABLE) != 0;
        self.flag_z = (status & FLAG_ZERO) != 0;
        self.flag_c = (status & FLAG_CARRY) != 0;
    }

    /// Sets or clears the Negative flag.
    pub fn set_flag_n(&mut self, value: bool) {
        self.flag_n = value;
    }

    /// Sets or clears the Overflow flag.
    pub fn set_flag_v(&mut self, value: bool) {
        self.flag_v = value;
    }

    /// Enters or leaves index mode.
    pub fn set_flag_t(&mut self, value: bool) {
        self.flag_t = value;
    }

    /// Sets or clears the Decimal mode flag.
    pub fn set_flag_d(&mut self, value: bool) {
        self.flag_d = value;
    }

    /// Sets or clears the Interrupt Disable flag.
    pub fn set_flag_i(&mut self, value: bool) {
        self.flag_i = value;
    }

    /// Sets or clears the Zero flag.
    pub fn set_flag_z(&mut self, value: bool) {
        self.flag_z = value;
    }

    /// Sets or clears the Carry flag.
    pub fn set_flag_c(&mut self, value: bool) {
        self.flag_c = value;
    }

    // ========== Memory Access ==========

    /// Returns the memory bus.
    pub fn memory(&self) -> &Bus<P> {
        &self.memory
    }

    /// Returns the memory bus mutably (for loading test programs, poking RAM).
    pub fn memory_mut(&mut self) -> &mut Bus<P> {
        &mut self.memory
    }

    // ========== Snapshots ==========

    /// Captures registers, flags, timing state and internal RAM.
    ///
    /// ROM and peripheral state are not part of a snapshot.
    pub fn snapshot(&self) -> Snapshot {
        let mut ram = [0u8; crate::memory::RAM_SIZE];
        ram.copy_from_slice(self.memory.ram());

        Snapshot {
            a: self.a,
            x: self.x,
            y: self.y,
            s: self.s,
            pc: self.pc,
            status: self.status(),
            stopped: self.stopped,
            budget: self.budget,
            clock_remainder: self.clock_remainder as u8,
            cycles: self.cycles,
            ram,
        }
    }

    /// Restores state previously captured by [`snapshot`](CPU::snapshot).
    ///
    /// Deserialized snapshots are already validated, so restoring cannot fail.
    /// A hand-built snapshot has its timing fields clamped into range.
    pub fn restore(&mut self, snapshot: &Snapshot) {
        self.a = snapshot.a;
        self.x = snapshot.x;
        self.y = snapshot.y;
        self.s = snapshot.s;
        self.set_pc(snapshot.pc);
        self.set_status(snapshot.status);
        self.stopped = snapshot.stopped;
        self.budget = snapshot.budget.clamp(-MAX_OVERDRAW, 0);
        self.clock_remainder = u32::from(snapshot.clock_remainder) % CLOCK_DIVIDER;
        self.cycles = snapshot.cycles;
        self.memory.set_ram(&snapshot.ram);
    }
}
