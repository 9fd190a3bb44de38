//! # Shift and Rotate Instructions
//!
//! ASL, LSR, ROL and ROR operate either on the accumulator or, as
//! read-modify-write instructions, on a memory location.
//!
//! The bit shifted out lands in C. Z and N come from the result.

use crate::addressing::Operand;
use crate::status::Flag;
use crate::{MemoryBus, CPU};

fn finish_shift<B: MemoryBus>(cpu: &mut CPU<B>, operand: Operand, result: u8, carry: bool) {
    cpu.p.set(Flag::Carry, carry);
    cpu.set_zn(result);
    cpu.write_operand(operand, result);
}

/// Executes the ASL (Arithmetic Shift Left) instruction.
///
/// Bit 7 goes to C, bit 0 becomes 0.
pub(crate) fn execute_asl<B: MemoryBus>(cpu: &mut CPU<B>, operand: Operand) {
    let value = cpu.read_operand(operand);
    finish_shift(cpu, operand, value << 1, value & 0x80 != 0);
}

/// Executes the LSR (Logical Shift Right) instruction.
///
/// Bit 0 goes to C, bit 7 becomes 0, so N always ends up clear.
pub(crate) fn execute_lsr<B: MemoryBus>(cpu: &mut CPU<B>, operand: Operand) {
    let value = cpu.read_operand(operand);
    finish_shift(cpu, operand, value >> 1, value & 0x01 != 0);
}

/// Executes the ROL (Rotate Left) instruction.
///
/// Old C goes into bit 0, bit 7 goes to C.
pub(crate) fn execute_rol<B: MemoryBus>(cpu: &mut CPU<B>, operand: Operand) {
    let value = cpu.read_operand(operand);
    let carry_in = cpu.p.get(Flag::Carry) as u8;
    finish_shift(cpu, operand, (value << 1) | carry_in, value & 0x80 != 0);
}

/// Executes the ROR (Rotate Right) instruction.
///
/// Old C goes into bit 7, bit 0 goes to C.
pub(crate) fn execute_ror<B: MemoryBus>(cpu: &mut CPU<B>, operand: Operand) {
    let value = cpu.read_operand(operand);
    let carry_in = (cpu.p.get(Flag::Carry) as u8) << 7;
    finish_shift(cpu, operand, (value >> 1) | carry_in, value & 0x01 != 0);
}
