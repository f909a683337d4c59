//! Peripheral dispatch for the 740's on-chip I/O ranges.
//!
//! The bus forwards every access that lands in a port or timer range to a
//! [`Peripheral`]. Implementations receive the range and an offset into it,
//! never the absolute address, so the same device works wherever a particular
//! part maps it.
//!
//! # Architecture
//!
//! - **Peripheral trait**: read/write contract plus an optional interrupt line
//! - **PortRegion**: which of the three reserved ranges an access hit
//! - **PortStubs**: placeholder implementation that logs and reads all-ones
//!
//! # Example
//!
//! ```rust
//! use lib740::{Peripheral, PortRegion, CPU};
//!
//! /// Port R wired to a fixed keyboard column.
//! struct Keyboard {
//!     column: u8,
//! }
//!
//! impl Peripheral for Keyboard {
//!     fn read(&mut self, region: PortRegion, offset: u8) -> u8 {
//!         match (region, offset) {
//!             (PortRegion::PortR, 0) => self.column,
//!             _ => 0xFF,
//!         }
//!     }
//!
//!     fn write(&mut self, _region: PortRegion, _offset: u8, _value: u8) {}
//! }
//!
//! let mut cpu = CPU::with_peripheral(Keyboard { column: 0x0A });
//! assert_eq!(cpu.memory_mut().read(0x00D0), 0x0A);
//! ```

use std::fmt;

pub mod ports;

pub use ports::PortStubs;

/// The reserved address ranges served by peripherals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PortRegion {
    /// `0x00D0-0x00DF`: sixteen four-bit ports.
    PortR,
    /// `0x00E0-0x00E9`: ports P0-P3 and their direction registers.
    Ports,
    /// `0x00F9-0x00FF`: timer registers.
    Timers,
}

impl fmt::Display for PortRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PortRegion::PortR => write!(f, "port R"),
            PortRegion::Ports => write!(f, "ports P0-P3"),
            PortRegion::Timers => write!(f, "timers"),
        }
    }
}

/// Abstract interface for the on-chip peripherals.
///
/// # Design
///
/// - **Offset-based**: the device receives an offset within its region
/// - **No failures**: unimplemented registers return a placeholder value
/// - **Mutable read**: reads may have side effects (latches, acknowledgements)
pub trait Peripheral {
    /// Reads the register at `offset` within `region`.
    fn read(&mut self, region: PortRegion, offset: u8) -> u8;

    /// Writes the register at `offset` within `region`.
    fn write(&mut self, region: PortRegion, offset: u8, value: u8);

    /// Checks whether the peripheral is asserting the interrupt line.
    ///
    /// The line is level-sensitive and polled between instructions. The
    /// default implementation never requests an interrupt.
    fn interrupt_requested(&self) -> bool {
        false
    }
}
