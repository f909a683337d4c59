//! Snapshot serialization for processor state capture.
//!
//! A snapshot holds everything needed to resume execution exactly where it
//! left off: registers, flags, the stop latch, the timing state and internal
//! RAM. ROM contents and peripheral state are not included; the ROM is assumed
//! to be installed separately and peripherals own their own persistence.
//!
//! ## Binary Format
//!
//! All multi-byte fields are little-endian:
//! - 4 bytes: Magic number "M740"
//! - 4 bytes: Version (u32)
//! - 4 bytes: A, X, Y, S
//! - 2 bytes: PC (u16)
//! - 1 byte: Packed status (bit 4 always clear)
//! - 1 byte: Stopped (0 or 1)
//! - 8 bytes: Budget (i64)
//! - 1 byte: Clock remainder (0-3)
//! - 8 bytes: Cycle total (u64)
//! - 96 bytes: Internal RAM
//!
//! ## Usage
//!
//! ```rust
//! use lib740::{Snapshot, CPU};
//!
//! let mut cpu = CPU::new();
//! cpu.set_a(0x42);
//!
//! let bytes = cpu.snapshot().serialize();
//!
//! let mut other = CPU::new();
//! other.restore(&Snapshot::deserialize(&bytes)?);
//! assert_eq!(other.a(), 0x42);
//! # Ok::<(), lib740::SnapshotError>(())
//! ```

use thiserror::Error;

use crate::cpu::FLAG_BREAK;
use crate::memory::{ADDRESS_MASK, RAM_SIZE};
use crate::timing::{CLOCK_DIVIDER, INTERRUPT_COST, MAX_CHARGE};

/// Current snapshot format version.
///
/// Increment this when making breaking changes to the format.
pub const SNAPSHOT_VERSION: u32 = 1;

/// Magic number for snapshots ("M740" in ASCII).
pub const SNAPSHOT_MAGIC: [u8; 4] = *b"M740";

/// Deepest overdraw a host can observe between `run_for` calls: the last
/// instruction of a run plus one interrupt requested afterwards.
pub const MAX_OVERDRAW: i64 = (MAX_CHARGE + INTERRUPT_COST) as i64;

/// Exact size of a serialized snapshot.
pub const SNAPSHOT_SIZE: usize = 4 + 4 + 4 + 2 + 1 + 1 + 8 + 1 + 8 + RAM_SIZE;

/// Reasons a byte buffer cannot be turned into a [`Snapshot`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SnapshotError {
    #[error("invalid snapshot magic number")]
    InvalidMagic,

    #[error("unsupported snapshot version {0}")]
    UnsupportedVersion(u32),

    #[error("snapshot is {found} bytes, expected {expected}")]
    UnexpectedLength { expected: usize, found: usize },

    #[error("snapshot field `{0}` holds an impossible value")]
    InvalidField(&'static str),
}

/// Captured processor state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub a: u8,
    pub x: u8,
    pub y: u8,
    pub s: u8,
    pub pc: u16,
    /// Packed status byte (NVT-DIZC).
    pub status: u8,
    pub stopped: bool,
    /// Engine units still owed; zero or negative after an overshoot, never
    /// below `-MAX_OVERDRAW`.
    pub budget: i64,
    /// Host ticks carried towards the next engine unit.
    pub clock_remainder: u8,
    /// Total engine units charged.
    pub cycles: u64,
    /// Internal RAM (0x0000-0x005F).
    pub ram: [u8; RAM_SIZE],
}

impl Snapshot {
    /// Serializes the snapshot to its binary form.
    pub fn serialize(&self) -> Vec<u8> {
        let mut data = Vec::with_capacity(SNAPSHOT_SIZE);

        // Header
        data.extend_from_slice(&SNAPSHOT_MAGIC);
        data.extend_from_slice(&SNAPSHOT_VERSION.to_le_bytes());

        // Registers
        data.push(self.a);
        data.push(self.x);
        data.push(self.y);
        data.push(self.s);
        data.extend_from_slice(&self.pc.to_le_bytes());
        data.push(self.status);
        data.push(self.stopped as u8);

        // Timing
        data.extend_from_slice(&self.budget.to_le_bytes());
        data.push(self.clock_remainder);
        data.extend_from_slice(&self.cycles.to_le_bytes());

        // Memory
        data.extend_from_slice(&self.ram);

        data
    }

    /// Deserializes and validates a snapshot.
    ///
    /// Fails without side effects on a wrong magic number, version or length,
    /// or on a field no running processor could produce.
    pub fn deserialize(data: &[u8]) -> Result<Self, SnapshotError> {
        if data.len() >= 4 && data[0..4] != SNAPSHOT_MAGIC {
            return Err(SnapshotError::InvalidMagic);
        }
        if data.len() != SNAPSHOT_SIZE {
            return Err(SnapshotError::UnexpectedLength {
                expected: SNAPSHOT_SIZE,
                found: data.len(),
            });
        }

        let mut reader = Reader { data, pos: 4 };

        let version = u32::from_le_bytes(reader.take());
        if version != SNAPSHOT_VERSION {
            return Err(SnapshotError::UnsupportedVersion(version));
        }

        let [a, x, y, s] = reader.take();
        let pc = u16::from_le_bytes(reader.take());
        let [status, stopped] = reader.take();
        let budget = i64::from_le_bytes(reader.take());
        let [clock_remainder] = reader.take();
        let cycles = u64::from_le_bytes(reader.take());
        let ram = reader.take();

        if pc > ADDRESS_MASK {
            return Err(SnapshotError::InvalidField("pc"));
        }
        if status & FLAG_BREAK != 0 {
            return Err(SnapshotError::InvalidField("status"));
        }
        let stopped = match stopped {
            0 => false,
            1 => true,
            _ => return Err(SnapshotError::InvalidField("stopped")),
        };
        if u32::from(clock_remainder) >= CLOCK_DIVIDER {
            return Err(SnapshotError::InvalidField("clock_remainder"));
        }
        if !(-MAX_OVERDRAW..=0).contains(&budget) {
            return Err(SnapshotError::InvalidField("budget"));
        }

        Ok(Self {
            a,
            x,
            y,
            s,
            pc,
            status,
            stopped,
            budget,
            clock_remainder,
            cycles,
            ram,
        })
    }
}

/// Cursor over a buffer whose length has already been checked.
struct Reader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl Reader<'_> {
    fn take<const N: usize>(&mut self) -> [u8; N] {
        let mut bytes = [0u8; N];
        bytes.copy_from_slice(&self.data[self.pos..self.pos + N]);
        self.pos += N;
        bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CPU;

    #[test]
    fn test_snapshot_size() {
        assert_eq!(SNAPSHOT_SIZE, 129);
        assert_eq!(CPU::new().snapshot().serialize().len(), SNAPSHOT_SIZE);
    }

    #[test]
    fn test_snapshot_serialize_deserialize_roundtrip() {
        let mut cpu = CPU::new();
        cpu.set_a(0x42);
        cpu.set_x(0xAB);
        cpu.set_y(0xCD);
        cpu.set_s(0x40);
        cpu.set_pc(0x1234);
        cpu.set_status(0xC3);
        cpu.memory_mut().write(0x0010, 0x99);

        let state = cpu.snapshot();
        let restored = Snapshot::deserialize(&state.serialize()).expect("Failed to deserialize");

        assert_eq!(restored, state);
        assert_eq!(restored.ram[0x10], 0x99);
        assert_eq!(restored.status, 0xC3);
    }

    #[test]
    fn test_snapshot_magic_validation() {
        let bad_magic = vec![0u8; SNAPSHOT_SIZE];
        assert_eq!(Snapshot::deserialize(&bad_magic), Err(SnapshotError::InvalidMagic));
    }

    #[test]
    fn test_snapshot_version_validation() {
        let mut bytes = CPU::new().snapshot().serialize();
        bytes[4..8].copy_from_slice(&999u32.to_le_bytes());

        assert_eq!(Snapshot::deserialize(&bytes), Err(SnapshotError::UnsupportedVersion(999)));
    }

    #[test]
    fn test_snapshot_length_validation() {
        let bytes = CPU::new().snapshot().serialize();

        assert_eq!(
            Snapshot::deserialize(&bytes[..100]),
            Err(SnapshotError::UnexpectedLength {
                expected: SNAPSHOT_SIZE,
                found: 100
            })
        );
    }

    #[test]
    fn test_snapshot_rejects_impossible_fields() {
        let good = CPU::new().snapshot().serialize();

        let mut bytes = good.clone();
        bytes[14] |= FLAG_BREAK;
        assert_eq!(Snapshot::deserialize(&bytes), Err(SnapshotError::InvalidField("status")));

        let mut bytes = good.clone();
        bytes[15] = 2;
        assert_eq!(Snapshot::deserialize(&bytes), Err(SnapshotError::InvalidField("stopped")));

        let mut bytes = good.clone();
        bytes[12..14].copy_from_slice(&0x2000u16.to_le_bytes());
        assert_eq!(Snapshot::deserialize(&bytes), Err(SnapshotError::InvalidField("pc")));

        let mut bytes = good.clone();
        bytes[24] = 4;
        assert_eq!(
            Snapshot::deserialize(&bytes),
            Err(SnapshotError::InvalidField("clock_remainder"))
        );

        for budget in [1, i64::MAX, -MAX_OVERDRAW - 1, i64::MIN] {
            let mut bytes = good.clone();
            bytes[16..24].copy_from_slice(&budget.to_le_bytes());
            assert_eq!(
                Snapshot::deserialize(&bytes),
                Err(SnapshotError::InvalidField("budget")),
                "budget {budget}"
            );
        }
    }

    #[test]
    fn test_snapshot_budget_bounds_accepted() {
        let good = CPU::new().snapshot().serialize();

        for budget in [0, -1, -MAX_OVERDRAW] {
            let mut bytes = good.clone();
            bytes[16..24].copy_from_slice(&budget.to_le_bytes());
            assert_eq!(Snapshot::deserialize(&bytes).map(|s| s.budget), Ok(budget));
        }
    }
}
