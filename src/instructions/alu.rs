//! # ALU (Arithmetic Logic Unit) Instructions
//!
//! This module implements arithmetic and logical operations:
//! - ADC, SBC: Add / Subtract with Carry (binary, or BCD when enabled)
//! - AND, ORA, EOR: Bitwise logic on the accumulator
//! - CMP, CPX, CPY: Register comparisons
//! - BIT: Bit test
//!
//! Decimal arithmetic follows the NMOS 6502. It only applies when the core is
//! configured with `decimal_mode` and the D flag is set; the NES 2A03 ignores D.

use crate::addressing::Operand;
use crate::status::Flag;
use crate::{MemoryBus, CPU};

/// Executes the ADC (Add with Carry) instruction.
///
/// Adds the operand plus the carry flag to the accumulator.
///
/// Flags affected:
/// - C: Set if the unsigned result exceeds 0xFF
/// - Z: Set if the result is 0
/// - V: Set if two operands of the same sign produce a result of the other sign
/// - N: Set if bit 7 of the result is set
pub(crate) fn execute_adc<B: MemoryBus>(cpu: &mut CPU<B>, operand: Operand) {
    let value = cpu.read_operand(operand);

    if cpu.config.decimal_mode && cpu.p.get(Flag::Decimal) {
        add_decimal(cpu, value);
    } else {
        add_binary(cpu, value);
    }
}

/// Executes the SBC (Subtract with Carry) instruction.
///
/// Computes A - M - (1 - C). Carry acts as an inverted borrow: it is set when
/// no borrow was needed.
pub(crate) fn execute_sbc<B: MemoryBus>(cpu: &mut CPU<B>, operand: Operand) {
    let value = cpu.read_operand(operand);

    if cpu.config.decimal_mode && cpu.p.get(Flag::Decimal) {
        subtract_decimal(cpu, value);
    } else {
        // A - M - (1 - C) == A + !M + C
        add_binary(cpu, !value);
    }
}

fn add_binary<B: MemoryBus>(cpu: &mut CPU<B>, value: u8) {
    let a = cpu.regs.a;
    let carry_in = cpu.p.get(Flag::Carry) as u16;

    let result16 = a as u16 + value as u16 + carry_in;
    let result = result16 as u8;

    // Overflow: both operands had the same sign but the result does not
    let overflow = ((a ^ result) & (value ^ result) & 0x80) != 0;

    cpu.p.set(Flag::Carry, result16 > 0xFF);
    cpu.p.set(Flag::Overflow, overflow);
    cpu.set_zn(result);
    cpu.regs.a = result;
}

/// NMOS decimal add. Z comes from the binary sum; N and V from the intermediate
/// high nibble before its decimal adjustment.
fn add_decimal<B: MemoryBus>(cpu: &mut CPU<B>, value: u8) {
    let a = cpu.regs.a;
    let carry_in = cpu.p.get(Flag::Carry) as u16;

    let binary = (a as u16 + value as u16 + carry_in) as u8;

    let mut lo = (a as u16 & 0x0F) + (value as u16 & 0x0F) + carry_in;
    if lo > 0x09 {
        lo += 0x06;
    }
    let mut hi = (a as u16 >> 4) + (value as u16 >> 4) + (lo > 0x0F) as u16;

    let intermediate = ((hi << 4) & 0xFF) as u8;
    let overflow = ((a ^ value) & 0x80) == 0 && ((a ^ intermediate) & 0x80) != 0;

    cpu.p.set(Flag::Zero, binary == 0);
    cpu.p.set(Flag::Negative, hi & 0x08 != 0);
    cpu.p.set(Flag::Overflow, overflow);

    if hi > 0x09 {
        hi += 0x06;
    }
    cpu.p.set(Flag::Carry, hi > 0x0F);

    cpu.regs.a = (((hi & 0x0F) << 4) | (lo & 0x0F)) as u8;
}

/// NMOS decimal subtract. All flags come from the binary subtraction; only the
/// accumulator gets the BCD-adjusted result.
fn subtract_decimal<B: MemoryBus>(cpu: &mut CPU<B>, value: u8) {
    let a = cpu.regs.a;
    let borrow = 1 - cpu.p.get(Flag::Carry) as i16;

    add_binary(cpu, !value);

    let mut lo = (a as i16 & 0x0F) - (value as i16 & 0x0F) - borrow;
    let mut hi = (a as i16 >> 4) - (value as i16 >> 4);
    if lo < 0 {
        lo -= 0x06;
        hi -= 1;
    }
    if hi < 0 {
        hi -= 0x06;
    }

    cpu.regs.a = (((hi << 4) & 0xF0) | (lo & 0x0F)) as u8;
}

/// Executes the AND (Logical AND) instruction.
///
/// Updates Z and N from the result.
pub(crate) fn execute_and<B: MemoryBus>(cpu: &mut CPU<B>, operand: Operand) {
    let result = cpu.regs.a & cpu.read_operand(operand);
    cpu.regs.a = result;
    cpu.set_zn(result);
}

/// Executes the ORA (Logical Inclusive OR) instruction.
pub(crate) fn execute_ora<B: MemoryBus>(cpu: &mut CPU<B>, operand: Operand) {
    let result = cpu.regs.a | cpu.read_operand(operand);
    cpu.regs.a = result;
    cpu.set_zn(result);
}

/// Executes the EOR (Exclusive OR) instruction.
pub(crate) fn execute_eor<B: MemoryBus>(cpu: &mut CPU<B>, operand: Operand) {
    let result = cpu.regs.a ^ cpu.read_operand(operand);
    cpu.regs.a = result;
    cpu.set_zn(result);
}

/// Shared body of CMP, CPX and CPY.
///
/// Flags affected:
/// - C: Set if register >= M (unsigned)
/// - Z: Set if register == M
/// - N: Bit 7 of (register - M)
fn compare<B: MemoryBus>(cpu: &mut CPU<B>, register: u8, operand: Operand) {
    let value = cpu.read_operand(operand);
    let result = register.wrapping_sub(value);

    cpu.p.set(Flag::Carry, register >= value);
    cpu.set_zn(result);
}

/// Executes the CMP (Compare Accumulator) instruction.
pub(crate) fn execute_cmp<B: MemoryBus>(cpu: &mut CPU<B>, operand: Operand) {
    let register = cpu.regs.a;
    compare(cpu, register, operand);
}

/// Executes the CPX (Compare X Register) instruction.
pub(crate) fn execute_cpx<B: MemoryBus>(cpu: &mut CPU<B>, operand: Operand) {
    let register = cpu.regs.x;
    compare(cpu, register, operand);
}

/// Executes the CPY (Compare Y Register) instruction.
pub(crate) fn execute_cpy<B: MemoryBus>(cpu: &mut CPU<B>, operand: Operand) {
    let register = cpu.regs.y;
    compare(cpu, register, operand);
}

/// Executes the BIT (Bit Test) instruction.
///
/// The accumulator is not modified.
///
/// Flags affected:
/// - Z: Set if A & M == 0
/// - V: Copied from bit 6 of M
/// - N: Copied from bit 7 of M
pub(crate) fn execute_bit<B: MemoryBus>(cpu: &mut CPU<B>, operand: Operand) {
    let value = cpu.read_operand(operand);

    cpu.p.set(Flag::Zero, cpu.regs.a & value == 0);
    cpu.p.set(Flag::Overflow, value & 0x40 != 0);
    cpu.p.set(Flag::Negative, value & 0x80 != 0);
}
