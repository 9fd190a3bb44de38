//! ROM device implementation.
//!
//! Provides read-only memory storage via the Device trait.

use super::Device;

/// Read-only memory device, e.g. a cartridge's PRG ROM.
///
/// Writes are silently ignored (no-op), matching typical ROM hardware behavior.
///
/// # Examples
///
/// ```rust
/// use nes6502::{Device, RomDevice};
///
/// let mut rom = RomDevice::new(vec![0xEA, 0xEA, 0xEA]); // Three NOP instructions
///
/// assert_eq!(rom.read(0), 0xEA);
///
/// rom.write(0, 0xFF);
/// assert_eq!(rom.read(0), 0xEA); // Still original value
/// ```
pub struct RomDevice {
    data: Vec<u8>,
}

impl RomDevice {
    /// Create a new ROM device with the specified data.
    ///
    /// `Device::size` is a `u16`, so images are truncated to 65,535 bytes.
    pub fn new(mut data: Vec<u8>) -> Self {
        data.truncate(u16::MAX as usize);
        Self { data }
    }
}

impl Device for RomDevice {
    fn read(&self, offset: u16) -> u8 {
        self.data.get(offset as usize).copied().unwrap_or(0)
    }

    fn write(&mut self, _offset: u16, _value: u8) {}

    fn size(&self) -> u16 {
        self.data.len() as u16
    }
}
