//! Read-only storage device.

use super::Device;

/// ROM image; writes are silently ignored.
///
/// ```rust
/// use emu6502::{RomDevice, Device};
///
/// let mut rom = RomDevice::new(vec![0xEA, 0xEA, 0xEA]);
/// rom.write(0, 0xFF);
/// assert_eq!(rom.read(0), 0xEA);
/// ```
pub struct RomDevice {
    data: Vec<u8>,
}

impl RomDevice {
    /// Create a ROM holding `data`, truncated to 0xFFFF bytes.
    pub fn new(mut data: Vec<u8>) -> Self {
        data.truncate(u16::MAX as usize);
        Self { data }
    }
}

impl Device for RomDevice {
    fn read(&mut self, offset: u16) -> u8 {
        self.data[offset as usize]
    }

    fn write(&mut self, _offset: u16, _value: u8) {}

    fn size(&self) -> u16 {
        self.data.len() as u16
    }
}
