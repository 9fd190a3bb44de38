//! # Control Flow Instructions
//!
//! This module implements control flow operations:
//! - JMP: Jump to address
//! - JSR / RTS: Subroutine call and return
//! - RTI: Return from interrupt
//! - BRK: Force break
//! - NOP: No operation
//!
//! BRK depends on [`BrkBehavior`](crate::BrkBehavior). By default it halts the
//! core, leaving PC just past the opcode. As a software interrupt it:
//! 1. Pushes PC+2 to the stack (high byte first, then low byte)
//! 2. Pushes processor status to stack with B flag set
//! 3. Sets the I (interrupt disable) flag
//! 4. Loads PC from IRQ vector at $FFFE/F

use crate::addressing::Operand;
use crate::config::BrkBehavior;
use crate::status::{Flag, StatusRegister};
use crate::{MemoryBus, CPU, IRQ_VECTOR};

/// Executes the JMP (Jump) instruction.
///
/// Absolute and indirect forms both arrive here as a resolved target. The
/// indirect form's page-wrap quirk ($xxFF pointer) is handled by the resolver.
pub(crate) fn execute_jmp<B: MemoryBus>(cpu: &mut CPU<B>, operand: Operand) {
    if let Operand::Address(target) = operand {
        cpu.regs.pc = target;
    }
}

/// Executes the JSR (Jump to Subroutine) instruction.
///
/// Pushes the address of the last byte of the JSR instruction (return address
/// minus one), high byte first, then jumps.
pub(crate) fn execute_jsr<B: MemoryBus>(cpu: &mut CPU<B>, operand: Operand) {
    if let Operand::Address(target) = operand {
        let return_address = cpu.regs.pc.wrapping_sub(1);
        cpu.push_u16(return_address);
        cpu.regs.pc = target;
    }
}

/// Executes the RTS (Return from Subroutine) instruction.
///
/// Pulls the address pushed by JSR and continues one byte after it.
pub(crate) fn execute_rts<B: MemoryBus>(cpu: &mut CPU<B>) {
    let return_address = cpu.pull_u16();
    cpu.regs.pc = return_address.wrapping_add(1);
}

/// Executes the RTI (Return from Interrupt) instruction.
///
/// Pulls the status register (ignoring B, keeping U set), then PC. Unlike RTS
/// there is no +1 adjustment.
pub(crate) fn execute_rti<B: MemoryBus>(cpu: &mut CPU<B>) {
    let status = cpu.pull();
    cpu.p = StatusRegister::from_byte(status);
    cpu.p.set(Flag::Break, false);
    cpu.regs.pc = cpu.pull_u16();
}

/// Executes the BRK (Force Break) instruction.
///
/// Cycle timing: 7 cycles (fixed) in both behaviors.
pub(crate) fn execute_brk<B: MemoryBus>(cpu: &mut CPU<B>) {
    match cpu.config.brk {
        BrkBehavior::Halt => cpu.halt(),
        BrkBehavior::Interrupt => {
            // BRK is followed by a padding byte that the return skips
            cpu.regs.pc = cpu.regs.pc.wrapping_add(1);
            cpu.interrupt_entry(IRQ_VECTOR, true);
        }
    }
}

pub(crate) fn execute_nop<B: MemoryBus>(_cpu: &mut CPU<B>) {}
