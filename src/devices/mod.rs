//! Memory-mapped device routing.
//!
//! Host machines rarely expose a flat 64KB of RAM. This module lets a machine
//! be assembled from independent devices, each owning a contiguous window of
//! the address space, behind a single [`MemoryBus`] the interpreter can own.
//!
//! # Architecture
//!
//! - **Device trait**: offset-addressed storage or I/O component
//! - **MappedMemory**: routes each access to the device covering the address
//! - **Device implementations**: [`RamDevice`] and [`RomDevice`]
//!
//! # Example
//!
//! ```rust
//! use emu6502::{Cpu, MappedMemory, RamDevice, RomDevice};
//!
//! let mut memory = MappedMemory::new();
//!
//! // 16KB RAM at 0x0000-0x3FFF
//! memory.add_device(0x0000, Box::new(RamDevice::new(0x4000))).unwrap();
//!
//! // 16KB ROM at 0xC000-0xFFFF
//! let rom_data = vec![0xEA; 0x4000];
//! memory.add_device(0xC000, Box::new(RomDevice::new(rom_data))).unwrap();
//!
//! let cpu = Cpu::new(memory);
//! ```

use thiserror::Error;

use crate::MemoryBus;

pub mod ram;
pub mod rom;

pub use ram::RamDevice;
pub use rom::RomDevice;

/// A memory-mapped hardware component.
///
/// The router hands devices an offset relative to their base address, so a
/// device never needs to know where it was mapped. Both directions take
/// `&mut self`: reading an I/O register may acknowledge or consume state.
///
/// # Examples
///
/// ```rust
/// use emu6502::Device;
///
/// /// Counts how many times it has been read.
/// struct ReadCounter {
///     reads: u8,
/// }
///
/// impl Device for ReadCounter {
///     fn read(&mut self, _offset: u16) -> u8 {
///         self.reads = self.reads.wrapping_add(1);
///         self.reads
///     }
///
///     fn write(&mut self, _offset: u16, value: u8) {
///         self.reads = value;
///     }
///
///     fn size(&self) -> u16 {
///         1
///     }
/// }
/// ```
pub trait Device {
    /// Read the byte at `offset` (0 to size-1).
    fn read(&mut self, offset: u16) -> u8;

    /// Write `value` at `offset` (0 to size-1). Read-only devices ignore it.
    fn write(&mut self, offset: u16, value: u8);

    /// Number of addresses the device occupies.
    fn size(&self) -> u16;

    /// Level of the device's IRQ output. Most devices never interrupt.
    fn irq_pending(&self) -> bool {
        false
    }
}

struct DeviceMapping {
    base_addr: u16,
    device: Box<dyn Device>,
}

impl DeviceMapping {
    fn contains(&self, addr: u16) -> bool {
        let (end_addr, overflow) = self.base_addr.overflowing_add(self.device.size());
        // An overflowing range runs to 0xFFFF inclusive
        if overflow {
            addr >= self.base_addr
        } else {
            addr >= self.base_addr && addr < end_addr
        }
    }
}

/// Error returned when device registration fails.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeviceError {
    /// Address range overlaps with an existing device.
    #[error(
        "device at ${new_base:04X} (size ${new_size:04X}) overlaps existing device at ${existing_base:04X} (size ${existing_size:04X})"
    )]
    Overlap {
        /// Base address of the rejected device
        new_base: u16,
        /// Size of the rejected device
        new_size: u16,
        /// Base address of the device already mapped there
        existing_base: u16,
        /// Size of the device already mapped there
        existing_size: u16,
    },
}

/// Memory router that dispatches accesses to registered devices.
///
/// Unmapped reads return 0xFF (floating bus); unmapped writes are dropped.
/// The IRQ line is the wired-OR of every device's [`Device::irq_pending`].
///
/// ```rust
/// use emu6502::{MappedMemory, RamDevice, MemoryBus};
///
/// let mut memory = MappedMemory::new();
/// memory.add_device(0x0000, Box::new(RamDevice::new(0x4000))).unwrap();
///
/// memory.write(0x1234, 0x42);
/// assert_eq!(memory.read(0x1234), 0x42);
/// assert_eq!(memory.read(0x8000), 0xFF);
/// ```
pub struct MappedMemory {
    devices: Vec<DeviceMapping>,
    unmapped_value: u8,
}

impl MappedMemory {
    /// Create an empty router.
    pub fn new() -> Self {
        Self {
            devices: Vec::new(),
            unmapped_value: 0xFF,
        }
    }

    /// Map `device` at `base_addr`, occupying `base_addr..base_addr + size`.
    ///
    /// # Errors
    ///
    /// [`DeviceError::Overlap`] if any address is already claimed.
    pub fn add_device(
        &mut self,
        base_addr: u16,
        device: Box<dyn Device>,
    ) -> Result<(), DeviceError> {
        let new_size = device.size();
        let new_end = base_addr as u32 + new_size as u32;

        for mapping in &self.devices {
            let existing_size = mapping.device.size();
            let existing_end = mapping.base_addr as u32 + existing_size as u32;

            if (base_addr as u32) < existing_end && new_end > mapping.base_addr as u32 {
                return Err(DeviceError::Overlap {
                    new_base: base_addr,
                    new_size,
                    existing_base: mapping.base_addr,
                    existing_size,
                });
            }
        }

        tracing::debug!(base = base_addr, size = new_size, "mapped device");
        self.devices.push(DeviceMapping { base_addr, device });
        Ok(())
    }

    fn find_device(&mut self, addr: u16) -> Option<(&mut (dyn Device + '_), u16)> {
        for mapping in self.devices.iter_mut() {
            if mapping.contains(addr) {
                let device = &mut *mapping.device as &mut dyn Device;
                return Some((device, addr - mapping.base_addr));
            }
        }
        None
    }
}

impl Default for MappedMemory {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryBus for MappedMemory {
    fn read(&mut self, addr: u16) -> u8 {
        match self.find_device(addr) {
            Some((device, offset)) => device.read(offset),
            None => self.unmapped_value,
        }
    }

    fn write(&mut self, addr: u16, value: u8) {
        if let Some((device, offset)) = self.find_device(addr) {
            device.write(offset, value);
        }
    }

    fn irq_active(&self) -> bool {
        self.devices.iter().any(|mapping| mapping.device.irq_pending())
    }
}
