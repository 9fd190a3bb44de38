//! Memory-mapped device support.
//!
//! A NES CPU address space is mostly plain RAM with a few windows where reads and
//! writes reach hardware instead: PPU registers at $2000, APU and controller ports
//! at $4000, cartridge space from $4020. This module provides the interception
//! points for those windows without implementing any of the hardware.
//!
//! # Architecture
//!
//! - **Device trait**: Abstract interface for memory-mapped hardware components
//! - **MappedMemory**: 64KB backing RAM plus registered device overlays
//! - **Device implementations**: RAM, ROM and NES-style mirrored work RAM
//!
//! # Example
//!
//! ```rust
//! use nes6502::{MappedMemory, MemoryBus, MirroredRam, RomDevice, CPU};
//!
//! let mut memory = MappedMemory::new();
//!
//! // 2KB work RAM mirrored through $0000-$1FFF
//! memory.add_device(0x0000, Box::new(MirroredRam::new())).unwrap();
//!
//! // 16KB PRG ROM at $C000-$FFFF, reset vector pointing at $C000
//! let mut prg = vec![0xEA; 0x4000];
//! prg[0x3FFC] = 0x00;
//! prg[0x3FFD] = 0xC0;
//! memory.add_device(0xC000, Box::new(RomDevice::new(prg))).unwrap();
//!
//! memory.write(0x0000, 0x42);
//! assert_eq!(memory.read(0x0800), 0x42); // mirror
//!
//! let cpu = CPU::new(memory);
//! assert_eq!(cpu.pc(), 0xC000);
//! ```

use log::debug;
use thiserror::Error;

use crate::{FlatMemory, MemoryBus};

pub mod mirrored;
pub mod ram;
pub mod rom;

pub use mirrored::MirroredRam;
pub use ram::RamDevice;
pub use rom::RomDevice;

/// Abstract interface for memory-mapped hardware devices.
///
/// Devices implement this trait to provide read/write access to their internal
/// registers and state. The memory mapper calls these methods with offset-based
/// addressing (0 to size-1) to maintain device independence from mapped address.
///
/// - **Offset-based**: Device receives offset (0 to size-1), not absolute address
/// - **No panics**: All operations must succeed or fail gracefully
/// - **Immutable read**: Allows shared read access
/// - **Mutable write**: Explicit side effects (buffer updates, flag changes)
///
/// # Examples
///
/// ```rust
/// use nes6502::Device;
///
/// /// Latches the last value written; reads return it inverted.
/// struct Latch(u8);
///
/// impl Device for Latch {
///     fn read(&self, _offset: u16) -> u8 {
///         !self.0
///     }
///
///     fn write(&mut self, _offset: u16, value: u8) {
///         self.0 = value;
///     }
///
///     fn size(&self) -> u16 {
///         1
///     }
/// }
/// ```
pub trait Device {
    /// Read byte from device at offset relative to device base address.
    fn read(&self, offset: u16) -> u8;

    /// Write byte to device at offset relative to device base address.
    fn write(&mut self, offset: u16, value: u8);

    /// Size of the device's address window in bytes.
    fn size(&self) -> u16;
}

/// Error returned when device registration fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DeviceError {
    /// Address range overlaps with an existing device.
    #[error(
        "device at ${new_base:04X} ({new_size} bytes) overlaps device at ${existing_base:04X} ({existing_size} bytes)"
    )]
    Overlap {
        new_base: u16,
        new_size: u16,
        existing_base: u16,
        existing_size: u16,
    },

    /// The device window would run past $FFFF.
    #[error("device at ${base:04X} ({size} bytes) does not fit in the address space")]
    OutOfRange { base: u16, size: u16 },

    /// Zero-sized devices cannot be mapped.
    #[error("device at ${base:04X} has no size")]
    Empty { base: u16 },
}

/// Internal mapping of a device to a base address.
struct DeviceMapping {
    base: u16,
    device: Box<dyn Device>,
}

impl DeviceMapping {
    /// Half-open range as u32, so a window ending at $FFFF is representable.
    fn range(&self) -> (u32, u32) {
        let start = self.base as u32;
        (start, start + self.device.size() as u32)
    }

    fn offset_of(&self, addr: u16) -> Option<u16> {
        let (start, end) = self.range();
        let addr32 = addr as u32;
        (addr32 >= start && addr32 < end).then(|| addr - self.base)
    }
}

/// Memory bus made of 64KB of RAM with device windows on top.
///
/// Accesses inside a registered device's range go to that device at an offset
/// from its base; every other address hits the backing RAM. Devices cannot
/// overlap each other, so at most one device answers any address.
///
/// # Examples
///
/// ```rust
/// use nes6502::{MappedMemory, MemoryBus, RamDevice};
///
/// let mut memory = MappedMemory::new();
/// memory.add_device(0x6000, Box::new(RamDevice::new(0x2000))).unwrap();
///
/// memory.write(0x6000, 0x42); // device
/// memory.write(0x0200, 0x17); // backing RAM
/// assert_eq!(memory.read(0x6000), 0x42);
/// assert_eq!(memory.read(0x0200), 0x17);
///
/// // Overlapping registration is refused
/// assert!(memory.add_device(0x7000, Box::new(RamDevice::new(16))).is_err());
/// ```
pub struct MappedMemory {
    ram: FlatMemory,
    devices: Vec<DeviceMapping>,
}

impl MappedMemory {
    /// Creates a bus with zeroed backing RAM and no devices.
    pub fn new() -> Self {
        Self {
            ram: FlatMemory::new(),
            devices: Vec::new(),
        }
    }

    /// Registers a device at `base`.
    ///
    /// The device occupies `base..base + device.size()`. Registration fails if the
    /// range overlaps an existing device, runs past $FFFF, or is empty.
    pub fn add_device(&mut self, base: u16, device: Box<dyn Device>) -> Result<(), DeviceError> {
        let size = device.size();
        if size == 0 {
            return Err(DeviceError::Empty { base });
        }

        let start = base as u32;
        let end = start + size as u32;
        if end > 0x1_0000 {
            return Err(DeviceError::OutOfRange { base, size });
        }

        for mapping in &self.devices {
            let (existing_start, existing_end) = mapping.range();
            if start < existing_end && end > existing_start {
                return Err(DeviceError::Overlap {
                    new_base: base,
                    new_size: size,
                    existing_base: mapping.base,
                    existing_size: mapping.device.size(),
                });
            }
        }

        debug!("Mapped device at ${:04X}-${:04X}", base, end - 1);
        self.devices.push(DeviceMapping { base, device });
        Ok(())
    }

    /// Number of registered devices.
    pub fn device_count(&self) -> usize {
        self.devices.len()
    }

    /// Direct access to the backing RAM, bypassing devices.
    pub fn ram(&self) -> &FlatMemory {
        &self.ram
    }

    pub fn ram_mut(&mut self) -> &mut FlatMemory {
        &mut self.ram
    }
}

impl Default for MappedMemory {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryBus for MappedMemory {
    fn read(&self, addr: u16) -> u8 {
        for mapping in &self.devices {
            if let Some(offset) = mapping.offset_of(addr) {
                return mapping.device.read(offset);
            }
        }
        self.ram.read(addr)
    }

    fn write(&mut self, addr: u16, value: u8) {
        for mapping in &mut self.devices {
            if let Some(offset) = mapping.offset_of(addr) {
                mapping.device.write(offset, value);
                return;
            }
        }
        self.ram.write(addr, value);
    }
}
