//! # Branch Instructions
//!
//! This module implements the conditional branch operations:
//! BCC, BCS, BEQ, BNE, BMI, BPL, BVC, BVS.
//!
//! All branch instructions use relative addressing with a signed 8-bit offset.
//! Cycle timing varies based on whether the branch is taken and whether a page boundary is crossed:
//! - 2 cycles if branch not taken
//! - 3 cycles if branch taken to same page
//! - 4 cycles if branch taken to different page
//!
//! No flags are affected.

use crate::addressing::{Operand, Resolved};
use crate::opcodes::Mnemonic;
use crate::status::Flag;
use crate::{MemoryBus, CPU};

/// Returns true if the branch `mnemonic` is taken with the current flags.
pub(crate) fn condition<B: MemoryBus>(cpu: &CPU<B>, mnemonic: Mnemonic) -> bool {
    let p = cpu.p;
    match mnemonic {
        Mnemonic::Bcc => !p.get(Flag::Carry),
        Mnemonic::Bcs => p.get(Flag::Carry),
        Mnemonic::Beq => p.get(Flag::Zero),
        Mnemonic::Bne => !p.get(Flag::Zero),
        Mnemonic::Bmi => p.get(Flag::Negative),
        Mnemonic::Bpl => !p.get(Flag::Negative),
        Mnemonic::Bvs => p.get(Flag::Overflow),
        Mnemonic::Bvc => !p.get(Flag::Overflow),
        _ => false,
    }
}

/// Executes a conditional branch and returns the extra cycles it costs.
///
/// `resolved` carries the target address and whether it sits on a different
/// page than the instruction following the branch.
pub(crate) fn execute_branch<B: MemoryBus>(
    cpu: &mut CPU<B>,
    mnemonic: Mnemonic,
    resolved: Resolved,
) -> u8 {
    if !condition(cpu, mnemonic) {
        return 0;
    }

    match resolved.operand {
        Operand::Address(target) => {
            cpu.regs.pc = target;
            1 + resolved.page_crossed as u8
        }
        _ => 0,
    }
}
