//! CPU variant configuration.
//!
//! The NES CPU (Ricoh 2A03) is an NMOS 6502 with the decimal-mode adder
//! disconnected. The defaults model that chip; [`CpuConfig::nmos`] models a stock
//! 6502 for running generic 6502 test suites.

/// What BRK (opcode 0x00) does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BrkBehavior {
    /// BRK stops the core: it moves to `CpuState::Halted` after charging its 7
    /// cycles. Test programs use this as their "done" marker.
    #[default]
    Halt,

    /// Architectural software interrupt through the IRQ vector at $FFFE.
    Interrupt,
}

/// How opcode bytes without an official instruction are executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IllegalOpcodePolicy {
    /// The core jams: `step()` returns `ExecutionError::IllegalOpcode` and keeps
    /// doing so until `reset()`.
    #[default]
    Jam,

    /// Execute as a 1-byte, 2-cycle NOP.
    Nop,
}

/// Configuration of a [`CPU`](crate::CPU).
///
/// # Examples
///
/// ```
/// use nes6502::{BrkBehavior, CpuConfig, IllegalOpcodePolicy};
///
/// let nes = CpuConfig::default();
/// assert!(!nes.decimal_mode);
/// assert_eq!(nes.brk, BrkBehavior::Halt);
///
/// let tolerant = CpuConfig::default().with_illegal_opcodes(IllegalOpcodePolicy::Nop);
/// assert_eq!(tolerant.illegal_opcodes, IllegalOpcodePolicy::Nop);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CpuConfig {
    /// ADC/SBC honor the D flag with NMOS BCD semantics. Off on the 2A03, where
    /// D can be set and cleared but has no effect on arithmetic.
    pub decimal_mode: bool,

    /// What BRK does.
    pub brk: BrkBehavior,

    /// What unofficial opcodes do.
    pub illegal_opcodes: IllegalOpcodePolicy,
}

impl CpuConfig {
    /// NES 2A03 profile. Same as `CpuConfig::default()`.
    pub fn nes() -> Self {
        Self::default()
    }

    /// Stock NMOS 6502: decimal mode on, BRK as a software interrupt.
    pub fn nmos() -> Self {
        Self {
            decimal_mode: true,
            brk: BrkBehavior::Interrupt,
            illegal_opcodes: IllegalOpcodePolicy::Jam,
        }
    }

    pub fn with_decimal_mode(mut self, enabled: bool) -> Self {
        self.decimal_mode = enabled;
        self
    }

    pub fn with_brk(mut self, brk: BrkBehavior) -> Self {
        self.brk = brk;
        self
    }

    pub fn with_illegal_opcodes(mut self, policy: IllegalOpcodePolicy) -> Self {
        self.illegal_opcodes = policy;
        self
    }
}
