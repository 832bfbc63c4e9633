//! Save state serialization.
//!
//! A [`CpuSnapshot`] captures the programmer-visible CPU state; a
//! [`SaveState`] adds the 64KB image of a [`FlatMemory`]. Both serialize to
//! a small little-endian binary format.
//!
//! ## Binary Format
//!
//! - 4 bytes: magic `"6502"`
//! - 4 bytes: version (u32 little-endian)
//! - 2 bytes: PC (low byte first)
//! - 5 bytes: A, X, Y, S, P (P packed `NV1BDIZC`, B preserved)
//! - 8 bytes: cycle counter (u64 little-endian)
//! - [`SaveState`] only: 65536 bytes of memory
//!
//! ## Usage
//!
//! ```rust
//! use emu6502::{Cpu, FlatMemory, SaveState};
//!
//! let mut cpu = Cpu::new(FlatMemory::new());
//! cpu.set_a(0x42);
//! cpu.set_memory(0x0200, 0x99);
//!
//! let bytes = SaveState::capture(&cpu).serialize();
//!
//! let mut other = Cpu::new(FlatMemory::new());
//! SaveState::deserialize(&bytes).unwrap().restore(&mut other);
//! assert_eq!(other.a(), 0x42);
//! assert_eq!(other.get_memory(0x0200), 0x99);
//! ```

use thiserror::Error;

use crate::{Cpu, FlatMemory, MemoryBus};

/// Current save state format version.
///
/// Increment this when making breaking changes to the format.
pub const SNAPSHOT_VERSION: u32 = 1;

/// Magic number opening every snapshot.
pub const SNAPSHOT_MAGIC: [u8; 4] = *b"6502";

const HEADER_SIZE: usize = 4 + 4;
const CPU_STATE_SIZE: usize = 2 + 5 + 8;
const MEMORY_SIZE: usize = 65536;

/// Why a snapshot could not be decoded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SnapshotError {
    #[error("invalid snapshot magic {0:02X?}")]
    BadMagic([u8; 4]),

    #[error("incompatible snapshot version: expected {expected}, got {0}", expected = SNAPSHOT_VERSION)]
    UnsupportedVersion(u32),

    #[error("snapshot truncated in {section}: needed {needed} more bytes, {available} available")]
    Truncated {
        section: &'static str,
        needed: usize,
        available: usize,
    },
}

/// Programmer-visible CPU state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CpuSnapshot {
    pub pc: u16,
    pub a: u8,
    pub x: u8,
    pub y: u8,
    pub sp: u8,
    /// Packed status byte, bit 5 set.
    pub status: u8,
    pub cycles: u64,
}

impl CpuSnapshot {
    /// Encodes header and CPU state.
    pub fn serialize(&self) -> Vec<u8> {
        let mut data = Vec::with_capacity(HEADER_SIZE + CPU_STATE_SIZE);
        self.write_to(&mut data);
        data
    }

    /// Decodes a buffer produced by [`CpuSnapshot::serialize`].
    ///
    /// Trailing bytes, such as a [`SaveState`] memory image, are ignored.
    pub fn deserialize(data: &[u8]) -> Result<Self, SnapshotError> {
        let mut reader = Reader::new(data);
        Self::read_from(&mut reader)
    }

    fn write_to(&self, data: &mut Vec<u8>) {
        data.extend_from_slice(&SNAPSHOT_MAGIC);
        data.extend_from_slice(&SNAPSHOT_VERSION.to_le_bytes());
        data.extend_from_slice(&self.pc.to_le_bytes());
        data.push(self.a);
        data.push(self.x);
        data.push(self.y);
        data.push(self.sp);
        data.push(self.status);
        data.extend_from_slice(&self.cycles.to_le_bytes());
    }

    fn read_from(reader: &mut Reader<'_>) -> Result<Self, SnapshotError> {
        let header = reader.take("header", HEADER_SIZE)?;

        let magic = [header[0], header[1], header[2], header[3]];
        if magic != SNAPSHOT_MAGIC {
            return Err(SnapshotError::BadMagic(magic));
        }

        let version = u32::from_le_bytes([header[4], header[5], header[6], header[7]]);
        if version != SNAPSHOT_VERSION {
            return Err(SnapshotError::UnsupportedVersion(version));
        }

        let cpu = reader.take("cpu state", CPU_STATE_SIZE)?;
        let mut cycles = [0u8; 8];
        cycles.copy_from_slice(&cpu[7..15]);

        Ok(Self {
            pc: u16::from_le_bytes([cpu[0], cpu[1]]),
            a: cpu[2],
            x: cpu[3],
            y: cpu[4],
            sp: cpu[5],
            status: cpu[6] | 0x20,
            cycles: u64::from_le_bytes(cycles),
        })
    }
}

struct Reader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    fn take(&mut self, section: &'static str, len: usize) -> Result<&'a [u8], SnapshotError> {
        let available = self.data.len() - self.pos;
        if available < len {
            return Err(SnapshotError::Truncated {
                section,
                needed: len,
                available,
            });
        }
        let slice = &self.data[self.pos..self.pos + len];
        self.pos += len;
        Ok(slice)
    }
}

impl<M: MemoryBus> Cpu<M> {
    /// Captures registers, flags and the cycle counter.
    pub fn snapshot(&self) -> CpuSnapshot {
        CpuSnapshot {
            pc: self.pc,
            a: self.a,
            x: self.x,
            y: self.y,
            sp: self.sp,
            status: self.status(),
            cycles: self.cycles,
        }
    }

    /// Restores registers, flags and the cycle counter. Memory is untouched.
    pub fn restore_snapshot(&mut self, snapshot: &CpuSnapshot) {
        self.pc = snapshot.pc;
        self.a = snapshot.a;
        self.x = snapshot.x;
        self.y = snapshot.y;
        self.sp = snapshot.sp;
        self.set_status(snapshot.status);
        self.cycles = snapshot.cycles;
    }
}

/// CPU state plus a full 64KB memory image.
#[derive(Clone)]
pub struct SaveState {
    pub cpu: CpuSnapshot,
    pub memory: FlatMemory,
}

impl SaveState {
    /// Captures a CPU running over flat memory.
    pub fn capture(cpu: &Cpu<FlatMemory>) -> Self {
        Self {
            cpu: cpu.snapshot(),
            memory: cpu.memory().clone(),
        }
    }

    /// Overwrites CPU state and the whole memory image.
    pub fn restore(&self, cpu: &mut Cpu<FlatMemory>) {
        cpu.restore_snapshot(&self.cpu);
        *cpu.memory_mut() = self.memory.clone();
        tracing::debug!(pc = self.cpu.pc, "restored save state");
    }

    pub fn serialize(&self) -> Vec<u8> {
        let mut data = Vec::with_capacity(self.serialized_size());
        self.cpu.write_to(&mut data);
        data.extend_from_slice(self.memory.as_slice());
        data
    }

    pub fn deserialize(data: &[u8]) -> Result<Self, SnapshotError> {
        let mut reader = Reader::new(data);
        let cpu = CpuSnapshot::read_from(&mut reader)?;
        let image = reader.take("memory", MEMORY_SIZE)?;
        Ok(Self {
            cpu,
            memory: FlatMemory::from_image(image),
        })
    }

    pub fn serialized_size(&self) -> usize {
        HEADER_SIZE + CPU_STATE_SIZE + MEMORY_SIZE
    }
}

impl std::fmt::Debug for SaveState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SaveState")
            .field("cpu", &self.cpu)
            .finish_non_exhaustive()
    }
}
