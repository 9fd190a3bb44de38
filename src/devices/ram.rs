//! RAM device implementation.
//!
//! Provides readable and writable memory storage via the Device trait.

use super::Device;

/// Simple RAM device with readable and writable storage.
///
/// Useful for cartridge work RAM ($6000-$7FFF) or any window that should be
/// tracked separately from the bus's backing RAM.
///
/// # Examples
///
/// ```rust
/// use nes6502::{Device, RamDevice};
///
/// let mut ram = RamDevice::new(1024); // 1KB RAM
///
/// ram.write(0x42, 0xAA);
/// assert_eq!(ram.read(0x42), 0xAA);
/// ```
pub struct RamDevice {
    data: Vec<u8>,
}

impl RamDevice {
    /// Create a new RAM device with the specified size. All bytes start at zero.
    pub fn new(size: u16) -> Self {
        Self {
            data: vec![0; size as usize],
        }
    }

    /// Copies `bytes` into RAM starting at `offset`. Bytes past the end of the
    /// device are dropped.
    ///
    /// ```rust
    /// use nes6502::{Device, RamDevice};
    ///
    /// let mut ram = RamDevice::new(1024);
    /// ram.load_bytes(0x100, &[0x01, 0x02, 0x03]);
    /// assert_eq!(ram.read(0x102), 0x03);
    /// ```
    pub fn load_bytes(&mut self, offset: u16, bytes: &[u8]) {
        let start = (offset as usize).min(self.data.len());
        let end = (start + bytes.len()).min(self.data.len());
        self.data[start..end].copy_from_slice(&bytes[..end - start]);
    }
}

impl Device for RamDevice {
    fn read(&self, offset: u16) -> u8 {
        self.data.get(offset as usize).copied().unwrap_or(0)
    }

    fn write(&mut self, offset: u16, value: u8) {
        if let Some(byte) = self.data.get_mut(offset as usize) {
            *byte = value;
        }
    }

    fn size(&self) -> u16 {
        self.data.len() as u16
    }
}
