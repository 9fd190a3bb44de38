//! # Processor Status Register (P)
//!
//! The status register packs the condition flags into one byte:
//!
//! ```text
//!   7 6 5 4 3 2 1 0
//!   N V U B D I Z C
//! ```
//!
//! - **U** (bit 5) is not a real flag. It always reads as 1.
//! - **B** (bit 4) only exists in the copy of P pushed to the stack: set by
//!   BRK/PHP, clear for IRQ/NMI. The ALU never computes it.
//!
//! Zero and Negative are recomputed by the instructions themselves from their
//! result; the register only stores what it is told.

/// A single condition flag of the status register.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Flag {
    Carry,
    Zero,
    InterruptDisable,
    Decimal,
    Break,
    Unused,
    Overflow,
    Negative,
}

impl Flag {
    /// All flags, from bit 0 to bit 7.
    pub const ALL: [Flag; 8] = [
        Flag::Carry,
        Flag::Zero,
        Flag::InterruptDisable,
        Flag::Decimal,
        Flag::Break,
        Flag::Unused,
        Flag::Overflow,
        Flag::Negative,
    ];

    /// Bit mask of this flag within the packed byte.
    pub const fn mask(self) -> u8 {
        match self {
            Flag::Carry => 0x01,
            Flag::Zero => 0x02,
            Flag::InterruptDisable => 0x04,
            Flag::Decimal => 0x08,
            Flag::Break => 0x10,
            Flag::Unused => 0x20,
            Flag::Overflow => 0x40,
            Flag::Negative => 0x80,
        }
    }

    /// Letter used for this flag in trace output (`NV-BDIZC`).
    pub const fn letter(self) -> char {
        match self {
            Flag::Carry => 'C',
            Flag::Zero => 'Z',
            Flag::InterruptDisable => 'I',
            Flag::Decimal => 'D',
            Flag::Break => 'B',
            Flag::Unused => '-',
            Flag::Overflow => 'V',
            Flag::Negative => 'N',
        }
    }
}

/// Packed 6502 processor status register.
///
/// # Examples
///
/// ```
/// use nes6502::{Flag, StatusRegister};
///
/// let mut p = StatusRegister::new();
/// p.set(Flag::Carry, true);
/// assert!(p.get(Flag::Carry));
/// assert_eq!(p.to_byte(), 0b0010_0001);
///
/// // The unused bit survives any byte loaded into the register
/// let p = StatusRegister::from_byte(0x00);
/// assert!(p.get(Flag::Unused));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusRegister(u8);

impl StatusRegister {
    /// Creates a status register with only the unused bit set.
    pub const fn new() -> Self {
        Self(Flag::Unused.mask())
    }

    /// Creates a status register from a raw byte, forcing the unused bit to 1.
    pub const fn from_byte(value: u8) -> Self {
        Self(value | Flag::Unused.mask())
    }

    /// Returns the packed byte. The unused bit is always set.
    pub const fn to_byte(self) -> u8 {
        self.0
    }

    /// Returns the byte pushed to the stack.
    ///
    /// `brk` selects the B bit: true for BRK and PHP, false for IRQ and NMI.
    pub const fn to_pushed_byte(self, brk: bool) -> u8 {
        let base = self.0 | Flag::Unused.mask();
        if brk {
            base | Flag::Break.mask()
        } else {
            base & !Flag::Break.mask()
        }
    }

    /// Returns true if `flag` is set.
    pub const fn get(self, flag: Flag) -> bool {
        self.0 & flag.mask() != 0
    }

    /// Sets or clears `flag`. Clearing the unused bit has no effect.
    pub fn set(&mut self, flag: Flag, value: bool) {
        if value {
            self.0 |= flag.mask();
        } else if flag != Flag::Unused {
            self.0 &= !flag.mask();
        }
    }
}

impl Default for StatusRegister {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for StatusRegister {
    /// Formats as `NV-BDIZC`, upper case for set flags and lower case for clear.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for flag in Flag::ALL.iter().rev() {
            let letter = flag.letter();
            if self.get(*flag) {
                write!(f, "{}", letter)?;
            } else {
                write!(f, "{}", letter.to_ascii_lowercase())?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_has_only_unused_bit() {
        assert_eq!(StatusRegister::new().to_byte(), 0x20);
    }

    #[test]
    fn test_each_flag_maps_to_its_bit() {
        for (bit, flag) in Flag::ALL.iter().enumerate() {
            let mut p = StatusRegister::from_byte(0x00);
            p.set(*flag, true);
            assert_eq!(p.to_byte(), 0x20 | (1 << bit), "{:?}", flag);
            assert!(p.get(*flag));
        }
    }

    #[test]
    fn test_from_byte_forces_unused() {
        assert_eq!(StatusRegister::from_byte(0x00).to_byte(), 0x20);
        assert_eq!(StatusRegister::from_byte(0xFF).to_byte(), 0xFF);
        assert_eq!(StatusRegister::from_byte(0xC3).to_byte(), 0xE3);
    }

    #[test]
    fn test_unused_cannot_be_cleared() {
        let mut p = StatusRegister::new();
        p.set(Flag::Unused, false);
        assert!(p.get(Flag::Unused));
    }

    #[test]
    fn test_clear_flag() {
        let mut p = StatusRegister::from_byte(0xFF);
        p.set(Flag::Overflow, false);
        assert_eq!(p.to_byte(), 0xBF);
    }

    #[test]
    fn test_pushed_byte_break_bit() {
        let p = StatusRegister::from_byte(0x01);
        assert_eq!(p.to_pushed_byte(true), 0x31);
        assert_eq!(p.to_pushed_byte(false), 0x21);

        let with_b = StatusRegister::from_byte(0x10);
        assert_eq!(with_b.to_pushed_byte(false), 0x20);
    }

    #[test]
    fn test_display() {
        let p = StatusRegister::from_byte(0x81);
        assert_eq!(p.to_string(), "Nv-bdizC");
    }
}
