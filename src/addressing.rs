//! # Addressing Modes
//!
//! This module defines the 13 addressing modes of the 6502 and the resolver that
//! turns a mode plus the operand bytes following an opcode into an operand
//! location.
//!
//! The resolver runs with PC already past the opcode byte. It consumes exactly
//! `operand_bytes()` bytes, leaving PC at the next instruction, and reports
//! whether indexing crossed a page boundary so the execution loop can charge the
//! extra cycle.

use crate::memory::MemoryBus;
use crate::registers::Registers;

/// 6502 addressing mode enumeration.
///
/// # Operand Sizes
///
/// - **0 bytes**: Implicit, Accumulator
/// - **1 byte**: Immediate, ZeroPage, ZeroPageX, ZeroPageY, Relative, IndirectX, IndirectY
/// - **2 bytes**: Absolute, AbsoluteX, AbsoluteY, Indirect
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressingMode {
    /// No operand, operation implied by instruction.
    ///
    /// Examples: CLC, RTS, NOP
    Implicit,

    /// Operates directly on the accumulator register.
    ///
    /// Examples: LSR A, ROL A, ASL A
    Accumulator,

    /// 8-bit constant operand in instruction.
    ///
    /// Example: LDA #$10
    Immediate,

    /// 8-bit address in zero page (0x00-0xFF).
    ///
    /// Example: LDA $80
    ZeroPage,

    /// Zero page address indexed by X register, wrapping within zero page.
    ///
    /// Example: LDA $80,X
    ZeroPageX,

    /// Zero page address indexed by Y register, wrapping within zero page.
    ///
    /// Example: LDX $80,Y
    ZeroPageY,

    /// Signed 8-bit offset for branch instructions, relative to the next instruction.
    ///
    /// Example: BEQ label
    Relative,

    /// Full 16-bit address.
    ///
    /// Example: JMP $1234
    Absolute,

    /// 16-bit address indexed by X register.
    ///
    /// Example: LDA $1234,X
    /// May incur +1 cycle penalty if page boundary is crossed.
    AbsoluteX,

    /// 16-bit address indexed by Y register.
    ///
    /// Example: LDA $1234,Y
    /// May incur +1 cycle penalty if page boundary is crossed.
    AbsoluteY,

    /// Indirect jump through 16-bit pointer. Only used by JMP.
    ///
    /// Example: JMP ($FFFC)
    Indirect,

    /// Indexed indirect: (ZP + X) then dereference.
    ///
    /// Example: LDA ($40,X)
    IndirectX,

    /// Indirect indexed: ZP dereference then + Y.
    ///
    /// Example: LDA ($40),Y
    /// May incur +1 cycle penalty if page boundary is crossed.
    IndirectY,
}

impl AddressingMode {
    /// Number of operand bytes following the opcode.
    pub const fn operand_bytes(self) -> u8 {
        match self {
            AddressingMode::Implicit | AddressingMode::Accumulator => 0,
            AddressingMode::Immediate
            | AddressingMode::ZeroPage
            | AddressingMode::ZeroPageX
            | AddressingMode::ZeroPageY
            | AddressingMode::Relative
            | AddressingMode::IndirectX
            | AddressingMode::IndirectY => 1,
            AddressingMode::Absolute
            | AddressingMode::AbsoluteX
            | AddressingMode::AbsoluteY
            | AddressingMode::Indirect => 2,
        }
    }

    /// Total instruction size including the opcode byte.
    pub const fn instruction_size(self) -> u8 {
        1 + self.operand_bytes()
    }
}

/// Where an instruction finds its operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operand {
    /// Implicit mode: there is no operand.
    None,
    /// The accumulator is the operand.
    Accumulator,
    /// The operand byte itself; no memory read needed.
    Immediate(u8),
    /// Effective memory address (for branches and jumps, the target).
    Address(u16),
}

/// Result of resolving an addressing mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolved {
    pub operand: Operand,

    /// Indexing (or a branch target) landed on a different page than the base.
    pub page_crossed: bool,
}

impl Resolved {
    const fn new(operand: Operand, page_crossed: bool) -> Self {
        Self {
            operand,
            page_crossed,
        }
    }

    const fn at(addr: u16) -> Self {
        Self::new(Operand::Address(addr), false)
    }
}

const fn crosses_page(base: u16, effective: u16) -> bool {
    (base & 0xFF00) != (effective & 0xFF00)
}

/// Resolves `mode` at `regs.pc` and advances PC past the operand bytes.
///
/// All address arithmetic wraps: 16-bit sums modulo 65536, zero-page sums and
/// zero-page pointers within page zero.
///
/// # Examples
///
/// ```
/// use nes6502::{AddressingMode, FlatMemory, MemoryBus, Operand, Registers};
/// use nes6502::addressing::resolve;
///
/// let mut mem = FlatMemory::new();
/// mem.load(0x8001, &[0xFF, 0x20]); // operand of LDA $20FF,X
///
/// let mut regs = Registers::new();
/// regs.pc = 0x8001;
/// regs.x = 0x01;
///
/// let resolved = resolve(AddressingMode::AbsoluteX, &mut regs, &mem);
/// assert_eq!(resolved.operand, Operand::Address(0x2100));
/// assert!(resolved.page_crossed);
/// assert_eq!(regs.pc, 0x8003);
/// ```
pub fn resolve<B: MemoryBus + ?Sized>(
    mode: AddressingMode,
    regs: &mut Registers,
    bus: &B,
) -> Resolved {
    let operand_pc = regs.pc;
    regs.pc = regs.pc.wrapping_add(mode.operand_bytes() as u16);

    match mode {
        AddressingMode::Implicit => Resolved::new(Operand::None, false),
        AddressingMode::Accumulator => Resolved::new(Operand::Accumulator, false),
        AddressingMode::Immediate => Resolved::new(Operand::Immediate(bus.read(operand_pc)), false),
        AddressingMode::ZeroPage => Resolved::at(bus.read(operand_pc) as u16),
        AddressingMode::ZeroPageX => Resolved::at(bus.read(operand_pc).wrapping_add(regs.x) as u16),
        AddressingMode::ZeroPageY => Resolved::at(bus.read(operand_pc).wrapping_add(regs.y) as u16),
        AddressingMode::Relative => {
            let offset = bus.read(operand_pc) as i8;
            let target = regs.pc.wrapping_add_signed(offset as i16);
            Resolved::new(Operand::Address(target), crosses_page(regs.pc, target))
        }
        AddressingMode::Absolute => Resolved::at(bus.read_u16(operand_pc)),
        AddressingMode::AbsoluteX => {
            let base = bus.read_u16(operand_pc);
            let effective = base.wrapping_add(regs.x as u16);
            Resolved::new(Operand::Address(effective), crosses_page(base, effective))
        }
        AddressingMode::AbsoluteY => {
            let base = bus.read_u16(operand_pc);
            let effective = base.wrapping_add(regs.y as u16);
            Resolved::new(Operand::Address(effective), crosses_page(base, effective))
        }
        AddressingMode::Indirect => {
            let pointer = bus.read_u16(operand_pc);
            Resolved::at(bus.read_u16_page_wrapped(pointer))
        }
        AddressingMode::IndirectX => {
            let pointer = bus.read(operand_pc).wrapping_add(regs.x);
            Resolved::at(bus.read_u16_page_wrapped(pointer as u16))
        }
        AddressingMode::IndirectY => {
            let pointer = bus.read(operand_pc);
            let base = bus.read_u16_page_wrapped(pointer as u16);
            let effective = base.wrapping_add(regs.y as u16);
            Resolved::new(Operand::Address(effective), crosses_page(base, effective))
        }
    }
}
