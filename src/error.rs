//! Errors surfaced by the execution loop.

use thiserror::Error;

/// Errors that can occur during CPU execution.
///
/// Normal execution never fails: address arithmetic and the stack pointer wrap
/// like the hardware does. The only failure is decoding a byte that is not an
/// official 6502 opcode while the core is configured to jam on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ExecutionError {
    /// The byte fetched as an opcode has no official instruction descriptor.
    ///
    /// `address` is where the opcode was fetched from. The core stays jammed
    /// until `reset()` is called.
    #[error("illegal opcode 0x{opcode:02X} at ${address:04X}")]
    IllegalOpcode { opcode: u8, address: u16 },
}
