//! # Load and Store Instructions
//!
//! - LDA, LDX, LDY: load a register, updating Z and N
//! - STA, STX, STY: store a register, no flags affected

use crate::addressing::Operand;
use crate::{MemoryBus, CPU};

/// Executes the LDA (Load Accumulator) instruction.
///
/// Flags affected:
/// - Z: Set if A = 0
/// - N: Set if bit 7 of A is set
pub(crate) fn execute_lda<B: MemoryBus>(cpu: &mut CPU<B>, operand: Operand) {
    let value = cpu.read_operand(operand);
    cpu.regs.a = value;
    cpu.set_zn(value);
}

/// Executes the LDX (Load X Register) instruction.
pub(crate) fn execute_ldx<B: MemoryBus>(cpu: &mut CPU<B>, operand: Operand) {
    let value = cpu.read_operand(operand);
    cpu.regs.x = value;
    cpu.set_zn(value);
}

/// Executes the LDY (Load Y Register) instruction.
pub(crate) fn execute_ldy<B: MemoryBus>(cpu: &mut CPU<B>, operand: Operand) {
    let value = cpu.read_operand(operand);
    cpu.regs.y = value;
    cpu.set_zn(value);
}

/// Executes the STA (Store Accumulator) instruction.
///
/// Indexed stores always take their worst-case cycle count; the descriptor
/// table carries no page penalty for them.
pub(crate) fn execute_sta<B: MemoryBus>(cpu: &mut CPU<B>, operand: Operand) {
    let a = cpu.regs.a;
    cpu.write_operand(operand, a);
}

pub(crate) fn execute_stx<B: MemoryBus>(cpu: &mut CPU<B>, operand: Operand) {
    let x = cpu.regs.x;
    cpu.write_operand(operand, x);
}

pub(crate) fn execute_sty<B: MemoryBus>(cpu: &mut CPU<B>, operand: Operand) {
    let y = cpu.regs.y;
    cpu.write_operand(operand, y);
}
