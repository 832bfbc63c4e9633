//! Read/write storage device.

use super::Device;

/// Zero-initialised RAM occupying `size` addresses.
///
/// ```rust
/// use emu6502::{RamDevice, Device};
///
/// let mut ram = RamDevice::new(1024);
/// ram.write(0x42, 0xAA);
/// assert_eq!(ram.read(0x42), 0xAA);
/// ```
pub struct RamDevice {
    data: Vec<u8>,
}

impl RamDevice {
    /// Create `size` bytes of zeroed RAM.
    pub fn new(size: u16) -> Self {
        Self {
            data: vec![0; size as usize],
        }
    }

    /// Create RAM whose initial contents are `bytes`.
    ///
    /// Input longer than 0xFFFF bytes is truncated so that the device size
    /// stays representable.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let len = bytes.len().min(u16::MAX as usize);
        Self {
            data: bytes[..len].to_vec(),
        }
    }

    /// Copy `bytes` into the device starting at `offset`.
    ///
    /// Bytes that would land past the end of the device are dropped.
    ///
    /// ```rust
    /// use emu6502::{RamDevice, Device};
    ///
    /// let mut ram = RamDevice::new(4);
    /// ram.load_bytes(2, &[0x01, 0x02, 0x03]);
    ///
    /// assert_eq!(ram.read(2), 0x01);
    /// assert_eq!(ram.read(3), 0x02);
    /// ```
    pub fn load_bytes(&mut self, offset: u16, bytes: &[u8]) {
        let start = (offset as usize).min(self.data.len());
        let len = bytes.len().min(self.data.len() - start);
        self.data[start..start + len].copy_from_slice(&bytes[..len]);
    }
}

impl Device for RamDevice {
    fn read(&mut self, offset: u16) -> u8 {
        self.data[offset as usize]
    }

    fn write(&mut self, offset: u16, value: u8) {
        self.data[offset as usize] = value;
    }

    fn size(&self) -> u16 {
        self.data.len() as u16
    }
}
