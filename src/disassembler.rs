//! # Disassembler
//!
//! Decodes a single instruction from a memory bus into assembly text using the
//! opcode table. Used by [`CPU::trace_line`](crate::CPU::trace_line) and by
//! debugging front ends.
//!
//! Operand syntax:
//!
//! | Mode        | Text       |
//! |-------------|------------|
//! | Immediate   | `#$42`     |
//! | ZeroPage    | `$42`      |
//! | ZeroPage,X  | `$42,X`    |
//! | Absolute    | `$1234`    |
//! | Indirect    | `($1234)`  |
//! | (Ind,X)     | `($40,X)`  |
//! | (Ind),Y     | `($40),Y`  |
//! | Relative    | target address, e.g. `$8010` |
//! | Accumulator | `A`        |
//!
//! Bytes without an official instruction disassemble as `.byte $XX`.

use std::fmt;

use crate::addressing::AddressingMode;
use crate::opcodes::{decode, Mnemonic};
use crate::MemoryBus;

/// One decoded instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisassembledInstruction {
    /// Address of the opcode byte.
    pub address: u16,
    /// Opcode byte followed by its operand bytes.
    pub bytes: Vec<u8>,
    pub mnemonic: Mnemonic,
    pub addressing_mode: AddressingMode,
}

impl DisassembledInstruction {
    /// Instruction length in bytes (1 to 3).
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Address of the following instruction.
    pub fn next_address(&self) -> u16 {
        self.address.wrapping_add(self.bytes.len() as u16)
    }

    /// Operand in assembler syntax; empty for implied instructions.
    pub fn operand_text(&self) -> String {
        use AddressingMode::*;

        let byte = self.bytes.get(1).copied().unwrap_or(0);
        let word = u16::from_le_bytes([byte, self.bytes.get(2).copied().unwrap_or(0)]);

        match self.addressing_mode {
            Implicit => String::new(),
            Accumulator => "A".to_string(),
            Immediate => format!("#${:02X}", byte),
            ZeroPage => format!("${:02X}", byte),
            ZeroPageX => format!("${:02X},X", byte),
            ZeroPageY => format!("${:02X},Y", byte),
            Relative => {
                let target = self.next_address().wrapping_add_signed(byte as i8 as i16);
                format!("${:04X}", target)
            }
            Absolute => format!("${:04X}", word),
            AbsoluteX => format!("${:04X},X", word),
            AbsoluteY => format!("${:04X},Y", word),
            Indirect => format!("(${:04X})", word),
            IndirectX => format!("(${:02X},X)", byte),
            IndirectY => format!("(${:02X}),Y", byte),
        }
    }
}

impl fmt::Display for DisassembledInstruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.mnemonic == Mnemonic::Illegal {
            return write!(f, ".byte ${:02X}", self.bytes[0]);
        }

        let operand = self.operand_text();
        if operand.is_empty() {
            write!(f, "{}", self.mnemonic)
        } else {
            write!(f, "{} {}", self.mnemonic, operand)
        }
    }
}

/// Disassembles the instruction at `address`.
///
/// Reads wrap around the top of the address space.
///
/// # Examples
///
/// ```
/// use nes6502::{disassemble, FlatMemory, MemoryBus};
///
/// let mut mem = FlatMemory::new();
/// mem.load(0x8000, &[0xBD, 0x34, 0x12, 0xD0, 0xFB]); // LDA $1234,X; BNE -5
///
/// let lda = disassemble(&mem, 0x8000);
/// assert_eq!(lda.to_string(), "LDA $1234,X");
/// assert_eq!(lda.len(), 3);
///
/// let bne = disassemble(&mem, lda.next_address());
/// assert_eq!(bne.to_string(), "BNE $8000");
/// ```
pub fn disassemble<B: MemoryBus + ?Sized>(bus: &B, address: u16) -> DisassembledInstruction {
    let opcode = bus.read(address);
    let metadata = decode(opcode);

    let size = if metadata.is_official() {
        metadata.size_bytes()
    } else {
        1
    };
    let bytes = (0..size as u16)
        .map(|i| bus.read(address.wrapping_add(i)))
        .collect();

    DisassembledInstruction {
        address,
        bytes,
        mnemonic: metadata.mnemonic,
        addressing_mode: metadata.addressing_mode,
    }
}

/// Most instructions a listing can hold before it wraps back over itself.
pub const MAX_RANGE_INSTRUCTIONS: usize = 0x10000;

/// Disassembles `count` consecutive instructions starting at `address`.
///
/// `count` is clamped to [`MAX_RANGE_INSTRUCTIONS`].
pub fn disassemble_range<B: MemoryBus + ?Sized>(
    bus: &B,
    address: u16,
    count: usize,
) -> Vec<DisassembledInstruction> {
    let count = count.min(MAX_RANGE_INSTRUCTIONS);
    let mut out = Vec::with_capacity(count);
    let mut pc = address;
    for _ in 0..count {
        let insn = disassemble(bus, pc);
        pc = insn.next_address();
        out.push(insn);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FlatMemory;

    fn text(program: &[u8]) -> String {
        let mut mem = FlatMemory::new();
        mem.load(0x0600, program);
        disassemble(&mem, 0x0600).to_string()
    }

    #[test]
    fn test_operand_syntax_per_mode() {
        assert_eq!(text(&[0xEA]), "NOP");
        assert_eq!(text(&[0x0A]), "ASL A");
        assert_eq!(text(&[0xA9, 0x42]), "LDA #$42");
        assert_eq!(text(&[0xA5, 0x42]), "LDA $42");
        assert_eq!(text(&[0xB5, 0x42]), "LDA $42,X");
        assert_eq!(text(&[0xB6, 0x42]), "LDX $42,Y");
        assert_eq!(text(&[0xAD, 0x34, 0x12]), "LDA $1234");
        assert_eq!(text(&[0xB9, 0x34, 0x12]), "LDA $1234,Y");
        assert_eq!(text(&[0x6C, 0xFF, 0x02]), "JMP ($02FF)");
        assert_eq!(text(&[0xA1, 0x40]), "LDA ($40,X)");
        assert_eq!(text(&[0xB1, 0x40]), "LDA ($40),Y");
    }

    #[test]
    fn test_relative_shows_target() {
        assert_eq!(text(&[0xF0, 0x05]), "BEQ $0607");
        assert_eq!(text(&[0xD0, 0xFE]), "BNE $0600");
    }

    #[test]
    fn test_illegal_is_single_byte() {
        let mut mem = FlatMemory::new();
        mem.load(0x0600, &[0x02, 0xEA]);
        let insn = disassemble(&mem, 0x0600);
        assert_eq!(insn.to_string(), ".byte $02");
        assert_eq!(insn.len(), 1);
    }

    #[test]
    fn test_disassemble_range() {
        let mut mem = FlatMemory::new();
        mem.load(0x0600, &[0xA2, 0x00, 0xE8, 0x4C, 0x02, 0x06]);
        let listing: Vec<String> = disassemble_range(&mem, 0x0600, 3)
            .iter()
            .map(|i| i.to_string())
            .collect();
        assert_eq!(listing, vec!["LDX #$00", "INX", "JMP $0602"]);
    }

    #[test]
    fn test_disassemble_range_is_clamped() {
        let mem = FlatMemory::new();
        let listing = disassemble_range(&mem, 0xFFF0, usize::MAX);
        assert_eq!(listing.len(), MAX_RANGE_INSTRUCTIONS);
        assert_eq!(listing[0].address, 0xFFF0);
    }
}
