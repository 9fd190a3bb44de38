//! # NES 6502 CPU Core
//!
//! The instruction-interpretation core of a NES emulator: a table-driven NMOS 6502
//! that fetches, decodes and executes one instruction per [`CPU::step`] call against
//! a 64KB memory bus, with exact addressing-mode resolution, flag semantics and
//! cycle accounting.
//!
//! The PPU, APU and cartridge mappers are not part of this crate. They plug in later
//! through the [`MemoryBus`] trait (memory-mapped I/O) and the interrupt entry points
//! [`CPU::trigger_nmi`] and [`CPU::trigger_irq`].
//!
//! ## Quick Start
//!
//! ```rust
//! use nes6502::{FlatMemory, MemoryBus, CPU};
//!
//! // The bus is built first and the program installed at its origin
//! let mut memory = FlatMemory::new();
//! memory.load(0x8000, &[0xA9, 0x01, 0x69, 0x01, 0x85, 0x10, 0x00]); // LDA #1; ADC #1; STA $10; BRK
//! memory.load(0xFFFC, &[0x00, 0x80]); // Reset vector -> $8000
//!
//! let mut cpu = CPU::new(memory);
//! cpu.reset();
//!
//! while !cpu.is_halted() {
//!     cpu.step().unwrap();
//! }
//!
//! assert_eq!(cpu.memory().read(0x0010), 2);
//! assert_eq!(cpu.cycles(), 2 + 2 + 3 + 7);
//! ```
//!
//! ## Modules
//!
//! - `cpu` - CPU state, execution loop and interrupt entry
//! - `memory` - `MemoryBus` trait, `FlatMemory` and bus handles
//! - `devices` - Memory-mapped device overlays (I/O interception points)
//! - `status` - Packed processor status register
//! - `registers` - A/X/Y/SP/PC register file
//! - `addressing` - Addressing modes and effective-address resolution
//! - `opcodes` - 256-entry instruction descriptor table
//! - `config` - CPU variant configuration (decimal mode, BRK, illegal opcodes)
//! - `disassembler` - Single-instruction disassembly and trace lines

pub mod addressing;
pub mod config;
pub mod cpu;
pub mod devices;
pub mod disassembler;
pub mod error;
pub mod memory;
pub mod opcodes;
pub mod registers;
pub mod status;

// Internal instruction implementations (not part of public API)
mod instructions;

#[cfg(feature = "wasm")]
pub mod wasm;

// Re-export public API
pub use addressing::{AddressingMode, Operand, Resolved};
pub use config::{BrkBehavior, CpuConfig, IllegalOpcodePolicy};
pub use cpu::{Budget, CpuState, RunSummary, StopReason, CPU};
pub use devices::{Device, DeviceError, MappedMemory, MirroredRam, RamDevice, RomDevice};
pub use disassembler::{disassemble, DisassembledInstruction};
pub use error::ExecutionError;
pub use memory::{FlatMemory, MemoryBus};
pub use opcodes::{Mnemonic, OpcodeMetadata, OPCODE_TABLE};
pub use registers::Registers;
pub use status::{Flag, StatusRegister};

/// Address of the non-maskable interrupt vector (low byte first).
pub const NMI_VECTOR: u16 = 0xFFFA;

/// Address of the reset vector (low byte first).
pub const RESET_VECTOR: u16 = 0xFFFC;

/// Address of the IRQ/BRK vector (low byte first).
pub const IRQ_VECTOR: u16 = 0xFFFE;
