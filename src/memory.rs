//! # Memory Bus Abstraction
//!
//! This module provides the `MemoryBus` trait that decouples the CPU from specific
//! memory implementations. The NES maps RAM, PPU/APU registers and cartridge space
//! into one 16-bit address space; all of them are reached through this trait.
//!
//! ## Design Principles
//!
//! The MemoryBus trait follows 6502 hardware behavior:
//! - No bus errors - reads/writes always succeed over the full 16-bit range
//! - Address arithmetic wraps modulo 65536
//! - Writes to ROM/unmapped regions may be ignored by the implementation
//!
//! ## Bus Handles
//!
//! The CPU is generic over its bus *handle*. Besides owning a bus outright, it can
//! borrow one (`&mut FlatMemory`) or share one with other components
//! (`Rc<RefCell<FlatMemory>>`), so the bus can be built before the CPU and stay
//! alive after it.

use std::cell::RefCell;
use std::rc::Rc;

/// Memory bus trait for CPU to read/write bytes.
///
/// # Examples
///
/// ```
/// use nes6502::{MemoryBus, FlatMemory};
///
/// let mut mem = FlatMemory::new();
///
/// mem.write(0x1234, 0x42);
/// assert_eq!(mem.read(0x1234), 0x42);
///
/// // Bulk load a program image at its origin
/// mem.load(0x0600, &[0xA9, 0x01, 0x00]);
/// assert_eq!(mem.read(0x0601), 0x01);
/// ```
///
/// ## Implementing Custom Memory
///
/// ```
/// use nes6502::MemoryBus;
///
/// struct RomRamMemory {
///     ram: [u8; 0x8000],  // 32KB RAM (0x0000-0x7FFF)
///     rom: [u8; 0x8000],  // 32KB ROM (0x8000-0xFFFF)
/// }
///
/// impl MemoryBus for RomRamMemory {
///     fn read(&self, addr: u16) -> u8 {
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
    /// Reads a byte from the specified 16-bit address.
    ///
    /// This method must never panic. Unmapped addresses may return any value.
    fn read(&self, addr: u16) -> u8;

    /// Writes a byte to the specified 16-bit address.
    ///
    /// This method must never panic. Read-only or unmapped addresses may ignore
    /// the write.
    fn write(&mut self, addr: u16, value: u8);

    /// Reads a little-endian 16-bit word. The high byte address wraps from
    /// 0xFFFF to 0x0000.
    fn read_u16(&self, addr: u16) -> u16 {
        let lo = self.read(addr) as u16;
        let hi = self.read(addr.wrapping_add(1)) as u16;
        (hi << 8) | lo
    }

    /// Reads a little-endian 16-bit word whose high byte is fetched from the same
    /// page as the low byte.
    ///
    /// This is how the NMOS 6502 fetches `JMP ($xxFF)` targets and zero-page
    /// pointers: `$10FF` pairs with `$1000`, not `$1100`.
    fn read_u16_page_wrapped(&self, addr: u16) -> u16 {
        let lo = self.read(addr) as u16;
        let hi_addr = (addr & 0xFF00) | (addr.wrapping_add(1) & 0x00FF);
        let hi = self.read(hi_addr) as u16;
        (hi << 8) | lo
    }

    /// Copies `bytes` into the bus starting at `origin`.
    ///
    /// Stands in for a cartridge loader when installing test programs. Addresses
    /// past 0xFFFF wrap to 0x0000.
    fn load(&mut self, origin: u16, bytes: &[u8]) {
        let mut addr = origin;
        for &byte in bytes {
            self.write(addr, byte);
            addr = addr.wrapping_add(1);
        }
    }
}

/// A borrowed bus: the CPU uses it without owning it.
impl<T: MemoryBus + ?Sized> MemoryBus for &mut T {
    fn read(&self, addr: u16) -> u8 {
        (**self).read(addr)
    }

    fn write(&mut self, addr: u16, value: u8) {
        (**self).write(addr, value);
    }
}

/// A shared bus handle, for when other components (PPU, mappers) hold the same bus.
///
/// Reads take a shared borrow and writes an exclusive one, so only one component
/// may be in the middle of a bus access at a time.
impl<T: MemoryBus + ?Sized> MemoryBus for Rc<RefCell<T>> {
    fn read(&self, addr: u16) -> u8 {
        self.borrow().read(addr)
    }

    fn write(&mut self, addr: u16, value: u8) {
        self.borrow_mut().write(addr, value);
    }
}

/// Simple 64KB flat memory implementation.
///
/// All 65536 addresses (0x0000-0xFFFF) map to a single contiguous RAM array,
/// initialized to 0x00. Used for test programs and as the backing store of
/// [`MappedMemory`](crate::MappedMemory).
///
/// # Examples
///
/// ```
/// use nes6502::{CPU, FlatMemory, MemoryBus};
///
/// let mut memory = FlatMemory::new();
/// memory.write(0xFFFC, 0x00); // Reset vector low byte
/// memory.write(0xFFFD, 0x80); // Reset vector high byte (PC = 0x8000)
/// memory.write(0x8000, 0xEA); // NOP
///
/// let cpu = CPU::new(memory);
/// assert_eq!(cpu.pc(), 0x8000);
/// ```
pub struct FlatMemory {
    /// 64KB contiguous memory array
    data: Box<[u8; 65536]>,
}

impl FlatMemory {
    /// Creates a new FlatMemory instance with all bytes initialized to zero.
    pub fn new() -> Self {
        Self {
            data: Box::new([0; 65536]),
        }
    }

    /// Creates memory holding a program image at `origin`, with the reset vector
    /// pointing at it.
    ///
    /// ```
    /// use nes6502::{FlatMemory, MemoryBus};
    ///
    /// let mem = FlatMemory::with_program(0x0600, &[0xE8, 0x00]);
    /// assert_eq!(mem.read(0x0600), 0xE8);
    /// assert_eq!(mem.read_u16(0xFFFC), 0x0600);
    /// ```
    pub fn with_program(origin: u16, program: &[u8]) -> Self {
        let mut mem = Self::new();
        mem.load(origin, program);
        mem.load(crate::RESET_VECTOR, &origin.to_le_bytes());
        mem
    }

    /// Returns the whole address space as a slice.
    pub fn as_slice(&self) -> &[u8] {
        &self.data[..]
    }
}

impl Default for FlatMemory {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryBus for FlatMemory {
    fn read(&self, addr: u16) -> u8 {
        self.data[addr as usize]
    }

    fn write(&mut self, addr: u16, value: u8) {
        self.data[addr as usize] = value;
    }

    fn load(&mut self, origin: u16, bytes: &[u8]) {
        let start = origin as usize;
        let fits = bytes.len().min(self.data.len() - start);
        self.data[start..start + fits].copy_from_slice(&bytes[..fits]);

        // Whatever did not fit continues at 0x0000
        let mut addr = 0u16;
        for &byte in &bytes[fits..] {
            self.data[addr as usize] = byte;
            addr = addr.wrapping_add(1);
        }
    }
}
