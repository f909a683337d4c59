//! Placeholder peripheral.

use super::{Peripheral, PortRegion};
use crate::memory::OPEN_BUS;

/// Peripheral that implements nothing.
///
/// Every read returns all-ones and every write is dropped. Both are logged at
/// debug level so firmware that depends on a missing device is easy to spot.
///
/// # Examples
///
/// ```rust
/// use lib740::{Peripheral, PortRegion, PortStubs};
///
/// let mut ports = PortStubs;
/// assert_eq!(ports.read(PortRegion::Timers, 3), 0xFF);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PortStubs;

impl Peripheral for PortStubs {
    fn read(&mut self, region: PortRegion, offset: u8) -> u8 {
        log::debug!("unimplemented {region} read at offset {offset}");
        OPEN_BUS
    }

    fn write(&mut self, region: PortRegion, offset: u8, value: u8) {
        log::debug!("unimplemented {region} write of 0x{value:02X} at offset {offset}");
    }
}
