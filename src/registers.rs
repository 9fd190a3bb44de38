//! 6502 register file.

/// Base address of the hardware stack page.
pub const STACK_PAGE: u16 = 0x0100;

/// Stack pointer value after reset.
pub const SP_RESET: u8 = 0xFD;

/// The mutable register state of the CPU.
///
/// - A: 8-bit accumulator
/// - X, Y: 8-bit index registers
/// - SP: 8-bit stack pointer (stack lives at $0100-$01FF)
/// - PC: 16-bit program counter
///
/// The status register is kept separately in [`StatusRegister`](crate::StatusRegister).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Registers {
    /// Accumulator.
    pub a: u8,
    /// X index register.
    pub x: u8,
    /// Y index register.
    pub y: u8,
    /// Stack pointer (next free slot in page $01).
    pub sp: u8,
    /// Program counter.
    pub pc: u16,
}

impl Default for Registers {
    fn default() -> Self {
        Self::new()
    }
}

impl Registers {
    /// Registers in reset state: A, X, Y zeroed, SP at $FD, PC zero until the
    /// reset vector is loaded.
    pub const fn new() -> Self {
        Self {
            a: 0,
            x: 0,
            y: 0,
            sp: SP_RESET,
            pc: 0,
        }
    }

    /// Returns the address for a push and decrements SP (wrapping within page $01).
    pub fn push_addr(&mut self) -> u16 {
        let addr = self.stack_addr();
        self.sp = self.sp.wrapping_sub(1);
        addr
    }

    /// Increments SP (wrapping within page $01) and returns the address to pull from.
    pub fn pull_addr(&mut self) -> u16 {
        self.sp = self.sp.wrapping_add(1);
        self.stack_addr()
    }

    /// Current top-of-stack address without moving SP.
    pub const fn stack_addr(&self) -> u16 {
        STACK_PAGE | self.sp as u16
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_pull_addresses() {
        let mut regs = Registers::new();
        assert_eq!(regs.push_addr(), 0x01FD);
        assert_eq!(regs.sp, 0xFC);
        assert_eq!(regs.pull_addr(), 0x01FD);
        assert_eq!(regs.sp, 0xFD);
    }

    #[test]
    fn test_stack_pointer_wraps_within_page_one() {
        let mut regs = Registers::new();
        regs.sp = 0x00;
        assert_eq!(regs.push_addr(), 0x0100);
        assert_eq!(regs.sp, 0xFF);
        assert_eq!(regs.stack_addr(), 0x01FF);

        assert_eq!(regs.pull_addr(), 0x0100);
        assert_eq!(regs.sp, 0x00);
    }
}
