//! # Stack Instructions
//!
//! PHA, PHP, PLA and PLP move the accumulator or the status register through the
//! hardware stack at $0100-$01FF. SP wraps within that page.

use crate::status::{Flag, StatusRegister};
use crate::{MemoryBus, CPU};

/// Executes the PHA (Push Accumulator) instruction.
pub(crate) fn execute_pha<B: MemoryBus>(cpu: &mut CPU<B>) {
    cpu.push(cpu.regs.a);
}

/// Executes the PHP (Push Processor Status) instruction.
///
/// The pushed copy always has B and bit 5 set.
pub(crate) fn execute_php<B: MemoryBus>(cpu: &mut CPU<B>) {
    cpu.push(cpu.p.to_pushed_byte(true));
}

/// Executes the PLA (Pull Accumulator) instruction.
///
/// Updates Z and N.
pub(crate) fn execute_pla<B: MemoryBus>(cpu: &mut CPU<B>) {
    let value = cpu.pull();
    cpu.regs.a = value;
    cpu.set_zn(value);
}

/// Executes the PLP (Pull Processor Status) instruction.
///
/// B from the stack is discarded and bit 5 stays set.
pub(crate) fn execute_plp<B: MemoryBus>(cpu: &mut CPU<B>) {
    let status = cpu.pull();
    cpu.p = StatusRegister::from_byte(status);
    cpu.p.set(Flag::Break, false);
}
