//! # Register Transfer Instructions
//!
//! This module implements register-to-register copies:
//! - TAX, TAY, TXA, TYA: between the accumulator and the index registers
//! - TSX, TXS: between X and the stack pointer
//!
//! All transfers except TXS update Z and N from the copied value.

use crate::{MemoryBus, CPU};

/// Executes the TAX (Transfer Accumulator to X) instruction.
pub(crate) fn execute_tax<B: MemoryBus>(cpu: &mut CPU<B>) {
    cpu.regs.x = cpu.regs.a;
    cpu.set_zn(cpu.regs.x);
}

/// Executes the TAY (Transfer Accumulator to Y) instruction.
pub(crate) fn execute_tay<B: MemoryBus>(cpu: &mut CPU<B>) {
    cpu.regs.y = cpu.regs.a;
    cpu.set_zn(cpu.regs.y);
}

/// Executes the TXA (Transfer X to Accumulator) instruction.
pub(crate) fn execute_txa<B: MemoryBus>(cpu: &mut CPU<B>) {
    cpu.regs.a = cpu.regs.x;
    cpu.set_zn(cpu.regs.a);
}

/// Executes the TYA (Transfer Y to Accumulator) instruction.
pub(crate) fn execute_tya<B: MemoryBus>(cpu: &mut CPU<B>) {
    cpu.regs.a = cpu.regs.y;
    cpu.set_zn(cpu.regs.a);
}

/// Executes the TSX (Transfer Stack Pointer to X) instruction.
pub(crate) fn execute_tsx<B: MemoryBus>(cpu: &mut CPU<B>) {
    cpu.regs.x = cpu.regs.sp;
    cpu.set_zn(cpu.regs.x);
}

/// Executes the TXS (Transfer X to Stack Pointer) instruction.
///
/// The only transfer that leaves the flags untouched.
pub(crate) fn execute_txs<B: MemoryBus>(cpu: &mut CPU<B>) {
    cpu.regs.sp = cpu.regs.x;
}
