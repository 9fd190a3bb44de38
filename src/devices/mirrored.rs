//! Mirrored RAM device.
//!
//! The NES has 2KB of internal work RAM decoded into an 8KB window, so
//! $0000, $0800, $1000 and $1800 all address the same byte.

use super::Device;

/// Size of the NES internal work RAM.
pub const NES_WORK_RAM_SIZE: u16 = 0x0800;

/// Size of the window the work RAM is mirrored through ($0000-$1FFF).
pub const NES_WORK_RAM_WINDOW: u16 = 0x2000;

/// RAM whose contents repeat across a larger address window.
///
/// # Examples
///
/// ```rust
/// use nes6502::{Device, MirroredRam};
///
/// let mut ram = MirroredRam::new();
/// ram.write(0x0001, 0x42);
/// assert_eq!(ram.read(0x0801), 0x42);
/// assert_eq!(ram.read(0x1801), 0x42);
/// ```
pub struct MirroredRam {
    data: Vec<u8>,
    window: u16,
}

impl MirroredRam {
    /// 2KB mirrored through 8KB, as wired on the NES.
    pub fn new() -> Self {
        Self::with_sizes(NES_WORK_RAM_SIZE, NES_WORK_RAM_WINDOW)
    }

    /// `size` bytes of storage repeated through a `window`-byte range. A zero
    /// `size` is treated as 1 byte.
    pub fn with_sizes(size: u16, window: u16) -> Self {
        Self {
            data: vec![0; size.max(1) as usize],
            window,
        }
    }

    fn index(&self, offset: u16) -> usize {
        offset as usize % self.data.len()
    }
}

impl Default for MirroredRam {
    fn default() -> Self {
        Self::new()
    }
}

impl Device for MirroredRam {
    fn read(&self, offset: u16) -> u8 {
        self.data[self.index(offset)]
    }

    fn write(&mut self, offset: u16, value: u8) {
        let index = self.index(offset);
        self.data[index] = value;
    }

    fn size(&self) -> u16 {
        self.window
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_mirrors_alias() {
        let mut ram = MirroredRam::new();
        ram.write(0x1FFF, 0x77);
        for base in [0x0000, 0x0800, 0x1000, 0x1800] {
            assert_eq!(ram.read(base + 0x07FF), 0x77);
        }
        assert_eq!(ram.size(), 0x2000);
    }

    #[test]
    fn test_custom_sizes() {
        let mut ram = MirroredRam::with_sizes(4, 16);
        ram.write(5, 0xAB);
        assert_eq!(ram.read(1), 0xAB);
        assert_eq!(ram.read(13), 0xAB);
    }
}
