//! # Opcode Metadata Table
//!
//! The 256-entry instruction descriptor table: the single source of truth for
//! decoding. Indexing it with an opcode byte gives the instruction, its addressing
//! mode, its base cycle cost and whether indexing across a page costs one more
//! cycle.
//!
//! - **151 official opcodes** covering the 56 documented instructions
//! - **105 unofficial opcodes** mapped to [`Mnemonic::Illegal`]; see
//!   [`IllegalOpcodePolicy`](crate::IllegalOpcodePolicy) for how they execute

use crate::addressing::AddressingMode;

/// Instruction mnemonic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mnemonic {
    Adc,
    And,
    Asl,
    Bcc,
    Bcs,
    Beq,
    Bit,
    Bmi,
    Bne,
    Bpl,
    Brk,
    Bvc,
    Bvs,
    Clc,
    Cld,
    Cli,
    Clv,
    Cmp,
    Cpx,
    Cpy,
    Dec,
    Dex,
    Dey,
    Eor,
    Inc,
    Inx,
    Iny,
    Jmp,
    Jsr,
    Lda,
    Ldx,
    Ldy,
    Lsr,
    Nop,
    Ora,
    Pha,
    Php,
    Pla,
    Plp,
    Rol,
    Ror,
    Rti,
    Rts,
    Sbc,
    Sec,
    Sed,
    Sei,
    Sta,
    Stx,
    Sty,
    Tax,
    Tay,
    Tsx,
    Txa,
    Txs,
    Tya,
    /// Any byte that is not an official 6502 opcode.
    Illegal,
}

impl Mnemonic {
    /// Upper-case assembler name (`"???"` for illegal opcodes).
    pub const fn as_str(self) -> &'static str {
        match self {
            Mnemonic::Adc => "ADC",
            Mnemonic::And => "AND",
            Mnemonic::Asl => "ASL",
            Mnemonic::Bcc => "BCC",
            Mnemonic::Bcs => "BCS",
            Mnemonic::Beq => "BEQ",
            Mnemonic::Bit => "BIT",
            Mnemonic::Bmi => "BMI",
            Mnemonic::Bne => "BNE",
            Mnemonic::Bpl => "BPL",
            Mnemonic::Brk => "BRK",
            Mnemonic::Bvc => "BVC",
            Mnemonic::Bvs => "BVS",
            Mnemonic::Clc => "CLC",
            Mnemonic::Cld => "CLD",
            Mnemonic::Cli => "CLI",
            Mnemonic::Clv => "CLV",
            Mnemonic::Cmp => "CMP",
            Mnemonic::Cpx => "CPX",
            Mnemonic::Cpy => "CPY",
            Mnemonic::Dec => "DEC",
            Mnemonic::Dex => "DEX",
            Mnemonic::Dey => "DEY",
            Mnemonic::Eor => "EOR",
            Mnemonic::Inc => "INC",
            Mnemonic::Inx => "INX",
            Mnemonic::Iny => "INY",
            Mnemonic::Jmp => "JMP",
            Mnemonic::Jsr => "JSR",
            Mnemonic::Lda => "LDA",
            Mnemonic::Ldx => "LDX",
            Mnemonic::Ldy => "LDY",
            Mnemonic::Lsr => "LSR",
            Mnemonic::Nop => "NOP",
            Mnemonic::Ora => "ORA",
            Mnemonic::Pha => "PHA",
            Mnemonic::Php => "PHP",
            Mnemonic::Pla => "PLA",
            Mnemonic::Plp => "PLP",
            Mnemonic::Rol => "ROL",
            Mnemonic::Ror => "ROR",
            Mnemonic::Rti => "RTI",
            Mnemonic::Rts => "RTS",
            Mnemonic::Sbc => "SBC",
            Mnemonic::Sec => "SEC",
            Mnemonic::Sed => "SED",
            Mnemonic::Sei => "SEI",
            Mnemonic::Sta => "STA",
            Mnemonic::Stx => "STX",
            Mnemonic::Sty => "STY",
            Mnemonic::Tax => "TAX",
            Mnemonic::Tay => "TAY",
            Mnemonic::Tsx => "TSX",
            Mnemonic::Txa => "TXA",
            Mnemonic::Txs => "TXS",
            Mnemonic::Tya => "TYA",
            Mnemonic::Illegal => "???",
        }
    }

    /// True for the eight conditional branches.
    pub const fn is_branch(self) -> bool {
        matches!(
            self,
            Mnemonic::Bcc
                | Mnemonic::Bcs
                | Mnemonic::Beq
                | Mnemonic::Bne
                | Mnemonic::Bmi
                | Mnemonic::Bpl
                | Mnemonic::Bvc
                | Mnemonic::Bvs
        )
    }
}

impl std::fmt::Display for Mnemonic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Immutable metadata for a single 6502 opcode.
///
/// # Examples
///
/// ```
/// use nes6502::{AddressingMode, Mnemonic, OPCODE_TABLE};
///
/// let lda_abs_x = &OPCODE_TABLE[0xBD];
/// assert_eq!(lda_abs_x.mnemonic, Mnemonic::Lda);
/// assert_eq!(lda_abs_x.addressing_mode, AddressingMode::AbsoluteX);
/// assert_eq!(lda_abs_x.base_cycles, 4);
/// assert!(lda_abs_x.page_penalty);
/// assert_eq!(lda_abs_x.size_bytes(), 3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpcodeMetadata {
    /// Instruction mnemonic.
    pub mnemonic: Mnemonic,

    /// Addressing mode for this instruction.
    pub addressing_mode: AddressingMode,

    /// Cycle cost before page-crossing and branch adjustments.
    pub base_cycles: u8,

    /// One extra cycle when indexed addressing crosses a page boundary.
    ///
    /// Only read instructions in AbsoluteX, AbsoluteY and IndirectY modes pay it.
    /// Stores and read-modify-write instructions always take the long path and
    /// have it folded into `base_cycles`. Branches account for their own
    /// penalties.
    pub page_penalty: bool,
}

impl OpcodeMetadata {
    /// Total instruction size in bytes (opcode + operands).
    pub const fn size_bytes(&self) -> u8 {
        self.addressing_mode.instruction_size()
    }

    /// False for bytes without an official instruction.
    pub const fn is_official(&self) -> bool {
        !matches!(self.mnemonic, Mnemonic::Illegal)
    }
}

const fn op(
    mnemonic: Mnemonic,
    addressing_mode: AddressingMode,
    base_cycles: u8,
    page_penalty: bool,
) -> OpcodeMetadata {
    OpcodeMetadata {
        mnemonic,
        addressing_mode,
        base_cycles,
        page_penalty,
    }
}

/// Descriptor used for every unofficial opcode: a 1-byte, 2-cycle slot.
const ILLEGAL: OpcodeMetadata = op(Mnemonic::Illegal, AddressingMode::Implicit, 2, false);

/// Complete 256-entry opcode metadata table indexed by opcode byte value.
pub const OPCODE_TABLE: [OpcodeMetadata; 256] = {
    use AddressingMode::*;
    use Mnemonic::*;

    [
        // 0x00
        op(Brk, Implicit, 7, false),
        op(Ora, IndirectX, 6, false),
        ILLEGAL,
        ILLEGAL,
        ILLEGAL,
        op(Ora, ZeroPage, 3, false),
        op(Asl, ZeroPage, 5, false),
        ILLEGAL,
        op(Php, Implicit, 3, false),
        op(Ora, Immediate, 2, false),
        op(Asl, Accumulator, 2, false),
        ILLEGAL,
        ILLEGAL,
        op(Ora, Absolute, 4, false),
        op(Asl, Absolute, 6, false),
        ILLEGAL,
        // 0x10
        op(Bpl, Relative, 2, false),
        op(Ora, IndirectY, 5, true),
        ILLEGAL,
        ILLEGAL,
        ILLEGAL,
        op(Ora, ZeroPageX, 4, false),
        op(Asl, ZeroPageX, 6, false),
        ILLEGAL,
        op(Clc, Implicit, 2, false),
        op(Ora, AbsoluteY, 4, true),
        ILLEGAL,
        ILLEGAL,
        ILLEGAL,
        op(Ora, AbsoluteX, 4, true),
        op(Asl, AbsoluteX, 7, false),
        ILLEGAL,
        // 0x20
        op(Jsr, Absolute, 6, false),
        op(And, IndirectX, 6, false),
        ILLEGAL,
        ILLEGAL,
        op(Bit, ZeroPage, 3, false),
        op(And, ZeroPage, 3, false),
        op(Rol, ZeroPage, 5, false),
        ILLEGAL,
        op(Plp, Implicit, 4, false),
        op(And, Immediate, 2, false),
        op(Rol, Accumulator, 2, false),
        ILLEGAL,
        op(Bit, Absolute, 4, false),
        op(And, Absolute, 4, false),
        op(Rol, Absolute, 6, false),
        ILLEGAL,
        // 0x30
        op(Bmi, Relative, 2, false),
        op(And, IndirectY, 5, true),
        ILLEGAL,
        ILLEGAL,
        ILLEGAL,
        op(And, ZeroPageX, 4, false),
        op(Rol, ZeroPageX, 6, false),
        ILLEGAL,
        op(Sec, Implicit, 2, false),
        op(And, AbsoluteY, 4, true),
        ILLEGAL,
        ILLEGAL,
        ILLEGAL,
        op(And, AbsoluteX, 4, true),
        op(Rol, AbsoluteX, 7, false),
        ILLEGAL,
        // 0x40
        op(Rti, Implicit, 6, false),
        op(Eor, IndirectX, 6, false),
        ILLEGAL,
        ILLEGAL,
        ILLEGAL,
        op(Eor, ZeroPage, 3, false),
        op(Lsr, ZeroPage, 5, false),
        ILLEGAL,
        op(Pha, Implicit, 3, false),
        op(Eor, Immediate, 2, false),
        op(Lsr, Accumulator, 2, false),
        ILLEGAL,
        op(Jmp, Absolute, 3, false),
        op(Eor, Absolute, 4, false),
        op(Lsr, Absolute, 6, false),
        ILLEGAL,
        // 0x50
        op(Bvc, Relative, 2, false),
        op(Eor, IndirectY, 5, true),
        ILLEGAL,
        ILLEGAL,
        ILLEGAL,
        op(Eor, ZeroPageX, 4, false),
        op(Lsr, ZeroPageX, 6, false),
        ILLEGAL,
        op(Cli, Implicit, 2, false),
        op(Eor, AbsoluteY, 4, true),
        ILLEGAL,
        ILLEGAL,
        ILLEGAL,
        op(Eor, AbsoluteX, 4, true),
        op(Lsr, AbsoluteX, 7, false),
        ILLEGAL,
        // 0x60
        op(Rts, Implicit, 6, false),
        op(Adc, IndirectX, 6, false),
        ILLEGAL,
        ILLEGAL,
        ILLEGAL,
        op(Adc, ZeroPage, 3, false),
        op(Ror, ZeroPage, 5, false),
        ILLEGAL,
        op(Pla, Implicit, 4, false),
        op(Adc, Immediate, 2, false),
        op(Ror, Accumulator, 2, false),
        ILLEGAL,
        op(Jmp, Indirect, 5, false),
        op(Adc, Absolute, 4, false),
        op(Ror, Absolute, 6, false),
        ILLEGAL,
        // 0x70
        op(Bvs, Relative, 2, false),
        op(Adc, IndirectY, 5, true),
        ILLEGAL,
        ILLEGAL,
        ILLEGAL,
        op(Adc, ZeroPageX, 4, false),
        op(Ror, ZeroPageX, 6, false),
        ILLEGAL,
        op(Sei, Implicit, 2, false),
        op(Adc, AbsoluteY, 4, true),
        ILLEGAL,
        ILLEGAL,
        ILLEGAL,
        op(Adc, AbsoluteX, 4, true),
        op(Ror, AbsoluteX, 7, false),
        ILLEGAL,
        // 0x80
        ILLEGAL,
        op(Sta, IndirectX, 6, false),
        ILLEGAL,
        ILLEGAL,
        op(Sty, ZeroPage, 3, false),
        op(Sta, ZeroPage, 3, false),
        op(Stx, ZeroPage, 3, false),
        ILLEGAL,
        op(Dey, Implicit, 2, false),
        ILLEGAL,
        op(Txa, Implicit, 2, false),
        ILLEGAL,
        op(Sty, Absolute, 4, false),
        op(Sta, Absolute, 4, false),
        op(Stx, Absolute, 4, false),
        ILLEGAL,
        // 0x90
        op(Bcc, Relative, 2, false),
        op(Sta, IndirectY, 6, false),
        ILLEGAL,
        ILLEGAL,
        op(Sty, ZeroPageX, 4, false),
        op(Sta, ZeroPageX, 4, false),
        op(Stx, ZeroPageY, 4, false),
        ILLEGAL,
        op(Tya, Implicit, 2, false),
        op(Sta, AbsoluteY, 5, false),
        op(Txs, Implicit, 2, false),
        ILLEGAL,
        ILLEGAL,
        op(Sta, AbsoluteX, 5, false),
        ILLEGAL,
        ILLEGAL,
        // 0xA0
        op(Ldy, Immediate, 2, false),
        op(Lda, IndirectX, 6, false),
        op(Ldx, Immediate, 2, false),
        ILLEGAL,
        op(Ldy, ZeroPage, 3, false),
        op(Lda, ZeroPage, 3, false),
        op(Ldx, ZeroPage, 3, false),
        ILLEGAL,
        op(Tay, Implicit, 2, false),
        op(Lda, Immediate, 2, false),
        op(Tax, Implicit, 2, false),
        ILLEGAL,
        op(Ldy, Absolute, 4, false),
        op(Lda, Absolute, 4, false),
        op(Ldx, Absolute, 4, false),
        ILLEGAL,
        // 0xB0
        op(Bcs, Relative, 2, false),
        op(Lda, IndirectY, 5, true),
        ILLEGAL,
        ILLEGAL,
        op(Ldy, ZeroPageX, 4, false),
        op(Lda, ZeroPageX, 4, false),
        op(Ldx, ZeroPageY, 4, false),
        ILLEGAL,
        op(Clv, Implicit, 2, false),
        op(Lda, AbsoluteY, 4, true),
        op(Tsx, Implicit, 2, false),
        ILLEGAL,
        op(Ldy, AbsoluteX, 4, true),
        op(Lda, AbsoluteX, 4, true),
        op(Ldx, AbsoluteY, 4, true),
        ILLEGAL,
        // 0xC0
        op(Cpy, Immediate, 2, false),
        op(Cmp, IndirectX, 6, false),
        ILLEGAL,
        ILLEGAL,
        op(Cpy, ZeroPage, 3, false),
        op(Cmp, ZeroPage, 3, false),
        op(Dec, ZeroPage, 5, false),
        ILLEGAL,
        op(Iny, Implicit, 2, false),
        op(Cmp, Immediate, 2, false),
        op(Dex, Implicit, 2, false),
        ILLEGAL,
        op(Cpy, Absolute, 4, false),
        op(Cmp, Absolute, 4, false),
        op(Dec, Absolute, 6, false),
        ILLEGAL,
        // 0xD0
        op(Bne, Relative, 2, false),
        op(Cmp, IndirectY, 5, true),
        ILLEGAL,
        ILLEGAL,
        ILLEGAL,
        op(Cmp, ZeroPageX, 4, false),
        op(Dec, ZeroPageX, 6, false),
        ILLEGAL,
        op(Cld, Implicit, 2, false),
        op(Cmp, AbsoluteY, 4, true),
        ILLEGAL,
        ILLEGAL,
        ILLEGAL,
        op(Cmp, AbsoluteX, 4, true),
        op(Dec, AbsoluteX, 7, false),
        ILLEGAL,
        // 0xE0
        op(Cpx, Immediate, 2, false),
        op(Sbc, IndirectX, 6, false),
        ILLEGAL,
        ILLEGAL,
        op(Cpx, ZeroPage, 3, false),
        op(Sbc, ZeroPage, 3, false),
        op(Inc, ZeroPage, 5, false),
        ILLEGAL,
        op(Inx, Implicit, 2, false),
        op(Sbc, Immediate, 2, false),
        op(Nop, Implicit, 2, false),
        ILLEGAL,
        op(Cpx, Absolute, 4, false),
        op(Sbc, Absolute, 4, false),
        op(Inc, Absolute, 6, false),
        ILLEGAL,
        // 0xF0
        op(Beq, Relative, 2, false),
        op(Sbc, IndirectY, 5, true),
        ILLEGAL,
        ILLEGAL,
        ILLEGAL,
        op(Sbc, ZeroPageX, 4, false),
        op(Inc, ZeroPageX, 6, false),
        ILLEGAL,
        op(Sed, Implicit, 2, false),
        op(Sbc, AbsoluteY, 4, true),
        ILLEGAL,
        ILLEGAL,
        ILLEGAL,
        op(Sbc, AbsoluteX, 4, true),
        op(Inc, AbsoluteX, 7, false),
        ILLEGAL,
    ]
};

/// Looks up the descriptor for `opcode`.
pub fn decode(opcode: u8) -> &'static OpcodeMetadata {
    &OPCODE_TABLE[opcode as usize]
}
