//! # Increment and Decrement Instructions
//!
//! INC/DEC modify memory, INX/INY/DEX/DEY modify index registers. All wrap at
//! 8 bits, update Z and N, and leave C and V alone.

use crate::addressing::Operand;
use crate::{MemoryBus, CPU};

/// Executes the INC (Increment Memory) instruction.
pub(crate) fn execute_inc<B: MemoryBus>(cpu: &mut CPU<B>, operand: Operand) {
    let result = cpu.read_operand(operand).wrapping_add(1);
    cpu.write_operand(operand, result);
    cpu.set_zn(result);
}

/// Executes the DEC (Decrement Memory) instruction.
pub(crate) fn execute_dec<B: MemoryBus>(cpu: &mut CPU<B>, operand: Operand) {
    let result = cpu.read_operand(operand).wrapping_sub(1);
    cpu.write_operand(operand, result);
    cpu.set_zn(result);
}

pub(crate) fn execute_inx<B: MemoryBus>(cpu: &mut CPU<B>) {
    cpu.regs.x = cpu.regs.x.wrapping_add(1);
    cpu.set_zn(cpu.regs.x);
}

pub(crate) fn execute_iny<B: MemoryBus>(cpu: &mut CPU<B>) {
    cpu.regs.y = cpu.regs.y.wrapping_add(1);
    cpu.set_zn(cpu.regs.y);
}

pub(crate) fn execute_dex<B: MemoryBus>(cpu: &mut CPU<B>) {
    cpu.regs.x = cpu.regs.x.wrapping_sub(1);
    cpu.set_zn(cpu.regs.x);
}

pub(crate) fn execute_dey<B: MemoryBus>(cpu: &mut CPU<B>) {
    cpu.regs.y = cpu.regs.y.wrapping_sub(1);
    cpu.set_zn(cpu.regs.y);
}
