//! # Memory Bus
//!
//! This module provides `Bus`, the single owner of the 8 KB memory image. Every
//! access the CPU makes goes through it, and it is the only place the 13-bit
//! address mask is applied.
//!
//! ## Memory Map
//!
//! | Range           | Contents                                          |
//! |-----------------|---------------------------------------------------|
//! | `0x0000-0x005F` | Internal RAM (read/write)                         |
//! | `0x00D0-0x00DF` | Port R: sixteen four-bit ports (peripheral)       |
//! | `0x00E0-0x00E9` | Ports P0-P3 (peripheral)                          |
//! | `0x00F9-0x00FF` | Timers (peripheral)                               |
//! | `0x1000-0x1FFF` | ROM, right-aligned, read-only                     |
//! | anything else   | Reads as `0xFF`, writes ignored                   |
//!
//! ## Design Principles
//!
//! - No bus errors: reads and writes always succeed
//! - Writes outside internal RAM never alter the image
//! - Peripheral ranges are dispatched to a [`Peripheral`] implementation

use crate::devices::{Peripheral, PortRegion};

/// Number of significant address bits.
pub const ADDRESS_MASK: u16 = 0x1FFF;

/// Size of the addressable space.
pub const ADDRESS_SPACE: usize = 0x2000;

/// Bytes of internal RAM at the bottom of the space.
pub const RAM_SIZE: usize = 0x60;

/// Largest ROM image the bus accepts.
pub const ROM_SIZE: usize = 0x1000;

/// First address of the ROM region.
pub const ROM_START: u16 = (ADDRESS_SPACE - ROM_SIZE) as u16;

/// Little-endian reset vector.
pub const RESET_VECTOR: u16 = 0x1FFE;

/// Little-endian interrupt vector, shared by hardware interrupts and BRK.
pub const INTERRUPT_VECTOR: u16 = 0x1FF4;

/// High byte used by special-page subroutine calls.
pub const SPECIAL_PAGE: u16 = 0x1F00;

/// Value read from unmapped or stubbed locations.
pub const OPEN_BUS: u8 = 0xFF;

/// The 740's memory bus: internal RAM, ROM and peripheral dispatch.
///
/// # Examples
///
/// ```
/// use lib740::{Bus, PortStubs};
///
/// let mut bus = Bus::new(PortStubs);
///
/// bus.write(0x0010, 0x42);
/// assert_eq!(bus.read(0x0010), 0x42);
///
/// // Above internal RAM, writes are ignored
/// bus.write(0x0200, 0x42);
/// assert_eq!(bus.read(0x0200), 0xFF);
///
/// // Addresses wrap at 8 KB
/// assert_eq!(bus.read(0x2010), 0x42);
/// ```
pub struct Bus<P: Peripheral> {
    /// Flat 8 KB image; only RAM and ROM regions are ever populated.
    data: Box<[u8; ADDRESS_SPACE]>,

    /// Device behind the port and timer ranges.
    peripheral: P,
}

impl<P: Peripheral> Bus<P> {
    /// Creates a bus with zeroed RAM, an empty (zero-filled) ROM region and
    /// the given peripheral.
    pub fn new(peripheral: P) -> Self {
        Self {
            data: Box::new([0; ADDRESS_SPACE]),
            peripheral,
        }
    }

    /// Reads a byte, dispatching port ranges to the peripheral.
    pub fn read(&mut self, address: u16) -> u8 {
        let address = address & ADDRESS_MASK;
        match Region::of(address) {
            Region::Ram | Region::Rom => self.data[usize::from(address)],
            Region::Port(region, offset) => self.peripheral.read(region, offset),
            Region::Unmapped => OPEN_BUS,
        }
    }

    /// Writes a byte. Only internal RAM is stored; port ranges are forwarded
    /// to the peripheral and everything else is ignored.
    pub fn write(&mut self, address: u16, value: u8) {
        let address = address & ADDRESS_MASK;
        match Region::of(address) {
            Region::Ram => self.data[usize::from(address)] = value,
            Region::Port(region, offset) => self.peripheral.write(region, offset, value),
            Region::Rom | Region::Unmapped => {}
        }
    }

    /// Reads a byte without side effects; port ranges report `OPEN_BUS`.
    ///
    /// Intended for debuggers, disassembly and snapshots.
    pub fn peek(&self, address: u16) -> u8 {
        let address = address & ADDRESS_MASK;
        match Region::of(address) {
            Region::Ram | Region::Rom => self.data[usize::from(address)],
            Region::Port(..) | Region::Unmapped => OPEN_BUS,
        }
    }

    /// Copies up to `ROM_SIZE` bytes of `rom` so that the image ends at the top
    /// of the address space. Longer images are truncated to their first
    /// `ROM_SIZE` bytes; shorter images leave the region below them untouched.
    ///
    /// Returns the number of bytes installed.
    pub fn load_rom(&mut self, rom: &[u8]) -> usize {
        let length = rom.len().min(ROM_SIZE);
        let start = ADDRESS_SPACE - length;
        self.data[start..].copy_from_slice(&rom[..length]);
        length
    }

    /// Internal RAM contents.
    pub fn ram(&self) -> &[u8] {
        &self.data[..RAM_SIZE]
    }

    /// Replaces internal RAM contents.
    pub(crate) fn set_ram(&mut self, ram: &[u8; RAM_SIZE]) {
        self.data[..RAM_SIZE].copy_from_slice(ram);
    }

    /// Returns a reference to the attached peripheral.
    pub fn peripheral(&self) -> &P {
        &self.peripheral
    }

    /// Returns a mutable reference to the attached peripheral.
    pub fn peripheral_mut(&mut self) -> &mut P {
        &mut self.peripheral
    }
}

/// Decoded location of a masked address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Region {
    Ram,
    Port(PortRegion, u8),
    Rom,
    Unmapped,
}

impl Region {
    fn of(address: u16) -> Self {
        match address {
            0x0000..=0x005F => Region::Ram,
            0x00D0..=0x00DF => Region::Port(PortRegion::PortR, (address - 0x00D0) as u8),
            0x00E0..=0x00E9 => Region::Port(PortRegion::Ports, (address - 0x00E0) as u8),
            0x00F9..=0x00FF => Region::Port(PortRegion::Timers, (address - 0x00F9) as u8),
            ROM_START..=ADDRESS_MASK => Region::Rom,
            _ => Region::Unmapped,
        }
    }
}
