//! # Status Flag Instructions
//!
//! Single-flag set/clear operations. Each takes 2 cycles and touches nothing
//! but its flag.
//!
//! SED/CLD toggle D on every core; whether D changes arithmetic is up to
//! `CpuConfig::decimal_mode`.

use crate::status::Flag;
use crate::{MemoryBus, CPU};

pub(crate) fn execute_clc<B: MemoryBus>(cpu: &mut CPU<B>) {
    cpu.p.set(Flag::Carry, false);
}

pub(crate) fn execute_sec<B: MemoryBus>(cpu: &mut CPU<B>) {
    cpu.p.set(Flag::Carry, true);
}

/// Clears I, letting `trigger_irq` through again.
pub(crate) fn execute_cli<B: MemoryBus>(cpu: &mut CPU<B>) {
    cpu.p.set(Flag::InterruptDisable, false);
}

pub(crate) fn execute_sei<B: MemoryBus>(cpu: &mut CPU<B>) {
    cpu.p.set(Flag::InterruptDisable, true);
}

pub(crate) fn execute_cld<B: MemoryBus>(cpu: &mut CPU<B>) {
    cpu.p.set(Flag::Decimal, false);
}

pub(crate) fn execute_sed<B: MemoryBus>(cpu: &mut CPU<B>) {
    cpu.p.set(Flag::Decimal, true);
}

/// There is no SEV; V is only set by ADC, SBC, BIT, PLP and RTI.
pub(crate) fn execute_clv<B: MemoryBus>(cpu: &mut CPU<B>) {
    cpu.p.set(Flag::Overflow, false);
}
