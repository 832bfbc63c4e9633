//! # Memory Bus Abstraction
//!
//! This module provides the `MemoryBus` trait that decouples the CPU from the
//! memory map of the machine being emulated. The interpreter never owns memory
//! storage; it owns whatever collaborator it was constructed with and routes
//! every byte access through it.
//!
//! ## Design Principles
//!
//! The MemoryBus trait follows 6502 hardware behavior:
//! - No bus errors - reads/writes always succeed
//! - Unmapped reads return whatever the implementation decides (commonly 0xFF)
//! - Writes to ROM/unmapped regions may be ignored
//! - Reads may have side effects (I/O registers), so `read` takes `&mut self`

/// Memory bus trait for CPU to read/write bytes.
///
/// # Design
///
/// - `read(&mut self)`: memory-mapped I/O reads may mutate device state
///   (receive buffers, latched status bits)
/// - `write(&mut self)`: stores or forwards the byte (RAM, banking, I/O)
/// - No error types: 6502 hardware has no bus error mechanism
///
/// # Examples
///
/// ```
/// use emu6502::{MemoryBus, FlatMemory};
///
/// let mut mem = FlatMemory::new();
/// mem.write(0x1234, 0x42);
/// assert_eq!(mem.read(0x1234), 0x42);
/// ```
///
/// ## Implementing Custom Memory
///
/// ```
/// use emu6502::MemoryBus;
///
/// struct RomRamMemory {
///     ram: [u8; 0x8000],
///     rom: [u8; 0x8000],
/// }
///
/// impl MemoryBus for RomRamMemory {
///     fn read(&mut self, addr: u16) -> u8 {
///         if addr < 0x8000 {
///             self.ram[addr as usize]
///         } else {
///             self.rom[(addr - 0x8000) as usize]
///         }
///     }
///
///     fn write(&mut self, addr: u16, value: u8) {
///         if addr < 0x8000 {
///             self.ram[addr as usize] = value;
///         }
///         // Writes to ROM (0x8000+) are silently ignored
///     }
/// }
/// ```
pub trait MemoryBus {
    /// Reads the byte the CPU should observe at `addr`.
    ///
    /// This method must never panic. Unmapped addresses return an
    /// implementation-chosen value.
    fn read(&mut self, addr: u16) -> u8;

    /// Writes a byte to the specified 16-bit address.
    ///
    /// This method must never panic. If the address is read-only or unmapped,
    /// implementations may ignore the write.
    fn write(&mut self, addr: u16, value: u8);

    /// Checks if the IRQ (Interrupt Request) line is active.
    ///
    /// The line is level-sensitive: the interpreter polls it ahead of every
    /// opcode fetch and services it only while the I flag is clear. Memory
    /// maps without interrupt-capable devices keep the default.
    fn irq_active(&self) -> bool {
        false
    }
}

impl<M: MemoryBus + ?Sized> MemoryBus for Box<M> {
    fn read(&mut self, addr: u16) -> u8 {
        (**self).read(addr)
    }

    fn write(&mut self, addr: u16, value: u8) {
        (**self).write(addr, value)
    }

    fn irq_active(&self) -> bool {
        (**self).irq_active()
    }
}

/// Simple 64KB flat memory implementation.
///
/// All 65536 addresses map to a single contiguous RAM array initialised to
/// zero. Used by the test suite, the save-state support and the WASM binding.
///
/// # Examples
///
/// ```
/// use emu6502::{Cpu, FlatMemory, MemoryBus};
///
/// let mut memory = FlatMemory::new();
/// memory.write(0xFFFC, 0x00); // Reset vector low byte
/// memory.write(0xFFFD, 0x80); // Reset vector high byte
///
/// let mut cpu = Cpu::new(memory);
/// cpu.reset();
/// assert_eq!(cpu.pc(), 0x8000);
/// ```
#[derive(Clone)]
pub struct FlatMemory {
    data: Box<[u8; 65536]>,
}

impl FlatMemory {
    /// Creates a new FlatMemory instance with all bytes initialized to zero.
    pub fn new() -> Self {
        Self {
            data: Box::new([0; 65536]),
        }
    }

    /// Creates memory seeded from an image that starts at address 0x0000.
    ///
    /// Images shorter than 64KB leave the remainder zeroed; bytes past
    /// 0xFFFF are ignored.
    ///
    /// ```
    /// use emu6502::{FlatMemory, MemoryBus};
    ///
    /// let mut mem = FlatMemory::from_image(&[0xA9, 0x05]);
    /// assert_eq!(mem.read(0x0001), 0x05);
    /// ```
    pub fn from_image(image: &[u8]) -> Self {
        let mut memory = Self::new();
        memory.load(0x0000, image);
        memory
    }

    /// Copies `bytes` into memory starting at `addr`.
    ///
    /// Loading stops at the top of the address space instead of wrapping.
    pub fn load(&mut self, addr: u16, bytes: &[u8]) {
        let start = addr as usize;
        let len = bytes.len().min(self.data.len() - start);
        self.data[start..start + len].copy_from_slice(&bytes[..len]);
    }

    /// Borrows the whole 64KB image.
    pub fn as_slice(&self) -> &[u8] {
        &self.data[..]
    }
}

impl Default for FlatMemory {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for FlatMemory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FlatMemory").finish_non_exhaustive()
    }
}

impl MemoryBus for FlatMemory {
    fn read(&mut self, addr: u16) -> u8 {
        self.data[addr as usize]
    }

    fn write(&mut self, addr: u16, value: u8) {
        self.data[addr as usize] = value;
    }
}
