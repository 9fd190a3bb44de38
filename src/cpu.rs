//! # CPU State and Execution
//!
//! This module contains the CPU struct representing the 6502 processor state and
//! the fetch-decode-execute loop.
//!
//! ## CPU State
//!
//! The CPU maintains:
//! - **Registers**: A, X, Y, SP and PC ([`Registers`])
//! - **Status flags**: packed N V - B D I Z C ([`StatusRegister`])
//! - **Cycle counter**: u64 monotonically increasing cycle count
//! - **Execution state**: Reset, Running, Halted, Interrupted or Jammed
//!
//! ## Execution Model
//!
//! - `step()`: execute exactly one instruction and return its cycle cost
//! - `run()` / `run_until()`: execute until halt, budget exhaustion or cancellation
//! - `trigger_nmi()` / `trigger_irq()`: interrupt entry, called by peripherals
//!
//! Budgets and cancellation are checked between instructions only, so an
//! instruction's side effects are never observed half-done.

use log::{debug, info, trace, warn};

use crate::addressing::resolve;
use crate::config::{CpuConfig, IllegalOpcodePolicy};
use crate::disassembler::disassemble;
use crate::instructions;
use crate::opcodes::decode;
use crate::registers::Registers;
use crate::status::{Flag, StatusRegister};
use crate::{ExecutionError, MemoryBus, IRQ_VECTOR, NMI_VECTOR, RESET_VECTOR};

/// Cycles taken by the interrupt entry sequence (IRQ, NMI and BRK).
pub const INTERRUPT_CYCLES: u8 = 7;

/// Origin used by [`CPU::load_and_run`].
pub const PROGRAM_ORIGIN: u16 = 0x8000;

/// Instruction budget of [`CPU::load_and_run`], so a program that never reaches
/// BRK cannot hang its caller.
pub const LOAD_AND_RUN_INSTRUCTION_LIMIT: u64 = 1_000_000;

/// Execution state of the core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CpuState {
    /// Registers initialized from the reset vector; nothing executed yet.
    Reset,
    /// Executing instructions.
    Running,
    /// Stopped by BRK (with `BrkBehavior::Halt`). `step()` reports zero cycles
    /// until an interrupt entry or `reset()`.
    Halted,
    /// An interrupt entry just happened; the next `step()` runs the handler.
    Interrupted,
    /// An illegal opcode was fetched under `IllegalOpcodePolicy::Jam`. Only
    /// `reset()` leaves this state.
    Jammed { opcode: u8, address: u16 },
}

/// Bound on a [`CPU::run`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Budget {
    /// Stop once at least this many cycles have been consumed.
    Cycles(u64),
    /// Stop after this many instructions.
    Instructions(u64),
}

/// Why a run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The core halted cleanly.
    Halted,
    /// The cycle or instruction budget ran out.
    BudgetExhausted,
    /// The caller's predicate asked to stop.
    Cancelled,
}

/// Outcome of a [`CPU::run`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// Cycles consumed during this run.
    pub cycles: u64,
    /// Instructions executed during this run.
    pub instructions: u64,
    pub stop: StopReason,
}

/// 6502 CPU state and execution context.
///
/// The CPU is generic over a memory bus *handle*: an owned bus, a `&mut` borrow of
/// one, or an `Rc<RefCell<_>>` shared with other components.
///
/// # Examples
///
/// ```
/// use nes6502::{CpuState, FlatMemory, MemoryBus, CPU};
///
/// let mut memory = FlatMemory::new();
/// memory.load(0xFFFC, &[0x00, 0x80]); // Reset vector -> $8000
/// memory.load(0x8000, &[0xA9, 0x42]); // LDA #$42
///
/// // The CPU borrows the bus; the bus outlives it
/// {
///     let mut cpu = CPU::new(&mut memory);
///     assert_eq!(cpu.state(), CpuState::Reset);
///     assert_eq!(cpu.step(), Ok(2));
///     assert_eq!(cpu.a(), 0x42);
///     assert_eq!(cpu.state(), CpuState::Running);
/// }
/// memory.write(0x8000, 0xEA);
/// ```
pub struct CPU<B: MemoryBus> {
    pub(crate) regs: Registers,

    pub(crate) p: StatusRegister,

    /// Total CPU cycles since the last reset
    pub(crate) cycles: u64,

    /// Instructions executed since the last reset
    pub(crate) instructions: u64,

    pub(crate) state: CpuState,

    pub(crate) config: CpuConfig,

    pub(crate) memory: B,
}

impl<B: MemoryBus> CPU<B> {
    /// Creates a CPU bound to `memory` with the NES configuration and resets it.
    ///
    /// PC is loaded from the reset vector at 0xFFFC/0xFFFD, so the bus should hold
    /// the program before the CPU is built.
    pub fn new(memory: B) -> Self {
        Self::with_config(memory, CpuConfig::default())
    }

    /// Creates a CPU with an explicit configuration and resets it.
    pub fn with_config(memory: B, config: CpuConfig) -> Self {
        let mut cpu = Self {
            regs: Registers::new(),
            p: StatusRegister::new(),
            cycles: 0,
            instructions: 0,
            state: CpuState::Reset,
            config,
            memory,
        };
        cpu.reset();
        cpu
    }

    /// Re-initializes the core from the reset vector.
    ///
    /// - PC is loaded from 0xFFFC (low byte) / 0xFFFD (high byte)
    /// - SP is set to 0xFD
    /// - Status is I | U; A, X and Y are zeroed
    /// - Cycle and instruction counters restart at 0
    ///
    /// # Examples
    ///
    /// ```
    /// use nes6502::{FlatMemory, MemoryBus, CPU};
    ///
    /// let mut mem = FlatMemory::new();
    /// let mut cpu = CPU::new(&mut mem);
    /// cpu.memory_mut().load(0xFFFC, &[0x00, 0x80]);
    /// cpu.reset();
    /// assert_eq!(cpu.pc(), 0x8000);
    /// ```
    pub fn reset(&mut self) {
        self.regs = Registers::new();
        self.regs.pc = self.memory.read_u16(RESET_VECTOR);
        self.p = StatusRegister::from_byte(Flag::InterruptDisable.mask());
        self.cycles = 0;
        self.instructions = 0;
        self.state = CpuState::Reset;

        debug!("CPU reset, PC set to ${:04X}", self.regs.pc);
    }

    /// Executes one instruction and returns the number of cycles it consumed.
    ///
    /// Performs the fetch-decode-execute cycle:
    /// 1. Fetch opcode byte at PC and increment PC
    /// 2. Look up the descriptor in the opcode table
    /// 3. Resolve the addressing mode (PC moves past the operand bytes)
    /// 4. Execute, then charge base cycles plus page-cross and branch penalties
    ///
    /// A halted core returns `Ok(0)` without touching anything. A jammed core
    /// returns the same `IllegalOpcode` error again.
    ///
    /// # Examples
    ///
    /// ```
    /// use nes6502::{ExecutionError, FlatMemory, CPU};
    ///
    /// let mem = FlatMemory::with_program(0x8000, &[0xEA, 0x02]); // NOP, illegal
    /// let mut cpu = CPU::new(mem);
    ///
    /// assert_eq!(cpu.step(), Ok(2));
    /// assert_eq!(
    ///     cpu.step(),
    ///     Err(ExecutionError::IllegalOpcode { opcode: 0x02, address: 0x8001 })
    /// );
    /// ```
    pub fn step(&mut self) -> Result<u8, ExecutionError> {
        match self.state {
            CpuState::Halted => return Ok(0),
            CpuState::Jammed { opcode, address } => {
                return Err(ExecutionError::IllegalOpcode { opcode, address })
            }
            CpuState::Reset | CpuState::Running | CpuState::Interrupted => {}
        }

        if log::log_enabled!(log::Level::Trace) {
            trace!("{}", self.trace_line());
        }

        // Fetch
        let address = self.regs.pc;
        let opcode = self.memory.read(address);
        self.regs.pc = self.regs.pc.wrapping_add(1);

        // Decode
        let metadata = decode(opcode);
        if !metadata.is_official() {
            match self.config.illegal_opcodes {
                IllegalOpcodePolicy::Jam => {
                    warn!("Illegal opcode 0x{:02X} at ${:04X}, CPU jammed", opcode, address);
                    self.state = CpuState::Jammed { opcode, address };
                    return Err(ExecutionError::IllegalOpcode { opcode, address });
                }
                IllegalOpcodePolicy::Nop => {
                    warn!("Illegal opcode 0x{:02X} at ${:04X} executed as NOP", opcode, address);
                }
            }
        }

        // Execute
        let resolved = resolve(metadata.addressing_mode, &mut self.regs, &self.memory);
        let extra_cycles = instructions::execute(self, metadata.mnemonic, resolved);

        let mut cycles = metadata.base_cycles + extra_cycles;
        if metadata.page_penalty && resolved.page_crossed {
            cycles += 1;
        }

        self.cycles += cycles as u64;
        self.instructions += 1;
        if self.state != CpuState::Halted {
            self.state = CpuState::Running;
        }

        Ok(cycles)
    }

    /// Runs until the core halts or `budget` is exhausted.
    ///
    /// The budget is checked between instructions, so a cycle budget may be
    /// overshot by the last instruction.
    ///
    /// # Examples
    ///
    /// ```
    /// use nes6502::{Budget, FlatMemory, StopReason, CPU};
    ///
    /// // INX; JMP $8000 forever
    /// let mem = FlatMemory::with_program(0x8000, &[0xE8, 0x4C, 0x00, 0x80]);
    /// let mut cpu = CPU::new(mem);
    ///
    /// // One NTSC frame is about 29780 cycles
    /// let summary = cpu.run(Budget::Cycles(29780)).unwrap();
    /// assert_eq!(summary.stop, StopReason::BudgetExhausted);
    /// assert!(summary.cycles >= 29780);
    /// ```
    pub fn run(&mut self, budget: Budget) -> Result<RunSummary, ExecutionError> {
        self.run_until(budget, |_| false)
    }

    /// Like [`run`](Self::run), and also stops with `StopReason::Cancelled` as soon
    /// as `cancel` returns true. `cancel` sees the core between instructions.
    ///
    /// ```
    /// use nes6502::{Budget, FlatMemory, StopReason, CPU};
    ///
    /// let mem = FlatMemory::with_program(0x8000, &[0xE8, 0x4C, 0x00, 0x80]);
    /// let mut cpu = CPU::new(mem);
    ///
    /// let summary = cpu
    ///     .run_until(Budget::Instructions(1000), |cpu| cpu.x() == 10)
    ///     .unwrap();
    /// assert_eq!(summary.stop, StopReason::Cancelled);
    /// assert_eq!(cpu.x(), 10);
    /// ```
    pub fn run_until<F>(&mut self, budget: Budget, mut cancel: F) -> Result<RunSummary, ExecutionError>
    where
        F: FnMut(&Self) -> bool,
    {
        let start_cycles = self.cycles;
        let mut instructions = 0u64;

        let stop = loop {
            if self.is_halted() {
                break StopReason::Halted;
            }

            let exhausted = match budget {
                Budget::Cycles(limit) => self.cycles - start_cycles >= limit,
                Budget::Instructions(limit) => instructions >= limit,
            };
            if exhausted {
                break StopReason::BudgetExhausted;
            }

            if cancel(self) {
                break StopReason::Cancelled;
            }

            self.step()?;
            instructions += 1;
        };

        Ok(RunSummary {
            cycles: self.cycles - start_cycles,
            instructions,
            stop,
        })
    }

    /// Runs for at least `cycle_budget` cycles (or until halt) and returns the
    /// cycles actually consumed.
    pub fn run_for_cycles(&mut self, cycle_budget: u64) -> Result<u64, ExecutionError> {
        self.run(Budget::Cycles(cycle_budget))
            .map(|summary| summary.cycles)
    }

    /// Loads `program` at 0x8000, points the reset vector at it, resets and runs
    /// until the program halts (or the instruction limit is hit).
    ///
    /// ```
    /// use nes6502::{FlatMemory, StopReason, CPU};
    ///
    /// let mut cpu = CPU::new(FlatMemory::new());
    /// let summary = cpu.load_and_run(&[0xA9, 0x05, 0x00]).unwrap(); // LDA #5; BRK
    ///
    /// assert_eq!(summary.stop, StopReason::Halted);
    /// assert_eq!(cpu.a(), 0x05);
    /// ```
    pub fn load_and_run(&mut self, program: &[u8]) -> Result<RunSummary, ExecutionError> {
        self.memory.load(PROGRAM_ORIGIN, program);
        self.memory.load(RESET_VECTOR, &PROGRAM_ORIGIN.to_le_bytes());
        self.reset();
        self.run(Budget::Instructions(LOAD_AND_RUN_INSTRUCTION_LIMIT))
    }

    // ========== Interrupt Entry ==========

    /// Non-maskable interrupt entry, requested by a peripheral (the PPU at vblank).
    ///
    /// Pushes PC and status (B clear), sets I and jumps through 0xFFFA. Wakes a
    /// halted core. Returns the cycles consumed: 7, or 0 on a jammed core.
    pub fn trigger_nmi(&mut self) -> u8 {
        if self.is_jammed() {
            return 0;
        }

        debug!("NMI entry from ${:04X}", self.regs.pc);
        self.interrupt_entry(NMI_VECTOR, false);
        self.finish_interrupt_entry()
    }

    /// Maskable interrupt entry, requested by a peripheral (APU frame counter,
    /// mapper IRQ).
    ///
    /// Ignored (returns 0) while the I flag is set or the core is jammed.
    /// Otherwise behaves like [`trigger_nmi`](Self::trigger_nmi) through 0xFFFE.
    pub fn trigger_irq(&mut self) -> u8 {
        if self.is_jammed() || self.p.get(Flag::InterruptDisable) {
            return 0;
        }

        debug!("IRQ entry from ${:04X}", self.regs.pc);
        self.interrupt_entry(IRQ_VECTOR, false);
        self.finish_interrupt_entry()
    }

    fn finish_interrupt_entry(&mut self) -> u8 {
        self.cycles += INTERRUPT_CYCLES as u64;
        self.state = CpuState::Interrupted;
        INTERRUPT_CYCLES
    }

    /// Pushes PC and status, sets I and loads PC from `vector`.
    ///
    /// `brk` selects the B bit of the pushed status byte.
    pub(crate) fn interrupt_entry(&mut self, vector: u16, brk: bool) {
        self.push_u16(self.regs.pc);
        self.push(self.p.to_pushed_byte(brk));
        self.p.set(Flag::InterruptDisable, true);
        self.regs.pc = self.memory.read_u16(vector);
    }

    // ========== Stack Helpers ==========

    pub(crate) fn push(&mut self, value: u8) {
        let addr = self.regs.push_addr();
        self.memory.write(addr, value);
    }

    pub(crate) fn pull(&mut self) -> u8 {
        let addr = self.regs.pull_addr();
        self.memory.read(addr)
    }

    /// Pushes high byte first, so the word sits little-endian in memory.
    pub(crate) fn push_u16(&mut self, value: u16) {
        self.push((value >> 8) as u8);
        self.push(value as u8);
    }

    pub(crate) fn pull_u16(&mut self) -> u16 {
        let lo = self.pull() as u16;
        let hi = self.pull() as u16;
        (hi << 8) | lo
    }

    /// Sets Z and N from `value`.
    pub(crate) fn set_zn(&mut self, value: u8) {
        self.p.set(Flag::Zero, value == 0);
        self.p.set(Flag::Negative, value & 0x80 != 0);
    }

    pub(crate) fn halt(&mut self) {
        info!(
            "CPU halted at ${:04X} after {} cycles",
            self.regs.pc.wrapping_sub(1),
            self.cycles
        );
        self.state = CpuState::Halted;
    }

    // ========== Introspection ==========

    /// Formats the instruction at PC with the current registers, one line in the
    /// style of the nestest log:
    ///
    /// `8000  A9 42     LDA #$42        A:00 X:00 Y:00 P:24 SP:FD CYC:0`
    pub fn trace_line(&self) -> String {
        let insn = disassemble(&self.memory, self.regs.pc);
        let bytes = insn
            .bytes
            .iter()
            .map(|b| format!("{:02X}", b))
            .collect::<Vec<_>>()
            .join(" ");

        format!(
            "{:04X}  {:<8}  {:<14}  A:{:02X} X:{:02X} Y:{:02X} P:{:02X} SP:{:02X} CYC:{}",
            self.regs.pc,
            bytes,
            insn.to_string(),
            self.regs.a,
            self.regs.x,
            self.regs.y,
            self.p.to_byte(),
            self.regs.sp,
            self.cycles
        )
    }

    /// Returns the current execution state.
    pub fn state(&self) -> CpuState {
        self.state
    }

    /// Returns true once BRK has halted the core.
    pub fn is_halted(&self) -> bool {
        self.state == CpuState::Halted
    }

    /// Returns true if an illegal opcode jammed the core.
    pub fn is_jammed(&self) -> bool {
        matches!(self.state, CpuState::Jammed { .. })
    }

    /// Returns the configuration the core was built with.
    pub fn config(&self) -> &CpuConfig {
        &self.config
    }

    /// Returns a copy of the register file.
    pub fn registers(&self) -> Registers {
        self.regs
    }

    // ========== Register Getters ==========

    /// Returns the accumulator register value.
    pub fn a(&self) -> u8 {
        self.regs.a
    }

    /// Returns the X index register value.
    pub fn x(&self) -> u8 {
        self.regs.x
    }

    /// Returns the Y index register value.
    pub fn y(&self) -> u8 {
        self.regs.y
    }

    /// Returns the program counter value.
    pub fn pc(&self) -> u16 {
        self.regs.pc
    }

    /// Returns the stack pointer value.
    ///
    /// Note: The full stack address is 0x0100 + SP. The stack grows downward from 0x01FF.
    pub fn sp(&self) -> u8 {
        self.regs.sp
    }

    /// Returns the status register as a packed byte (NV-BDIZC, bit 5 always 1).
    ///
    /// # Examples
    ///
    /// ```
    /// use nes6502::{FlatMemory, CPU};
    ///
    /// let cpu = CPU::new(FlatMemory::new());
    /// assert_eq!(cpu.status(), 0b0010_0100); // I set after reset, bit 5 always 1
    /// ```
    pub fn status(&self) -> u8 {
        self.p.to_byte()
    }

    /// Returns the status register.
    pub fn status_register(&self) -> StatusRegister {
        self.p
    }

    /// Returns the total number of CPU cycles executed since the last reset.
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    /// Returns the number of instructions executed since the last reset.
    pub fn instructions(&self) -> u64 {
        self.instructions
    }

    // ========== Status Flag Getters ==========

    /// Returns true if `flag` is set.
    pub fn flag(&self, flag: Flag) -> bool {
        self.p.get(flag)
    }

    /// Returns true if the Negative flag is set.
    pub fn flag_n(&self) -> bool {
        self.p.get(Flag::Negative)
    }

    /// Returns true if the Overflow flag is set.
    pub fn flag_v(&self) -> bool {
        self.p.get(Flag::Overflow)
    }

    /// Returns true if the Decimal mode flag is set.
    pub fn flag_d(&self) -> bool {
        self.p.get(Flag::Decimal)
    }

    /// Returns true if the Interrupt Disable flag is set.
    pub fn flag_i(&self) -> bool {
        self.p.get(Flag::InterruptDisable)
    }

    /// Returns true if the Zero flag is set.
    pub fn flag_z(&self) -> bool {
        self.p.get(Flag::Zero)
    }

    /// Returns true if the Carry flag is set.
    pub fn flag_c(&self) -> bool {
        self.p.get(Flag::Carry)
    }

    // ========== Memory Access ==========

    /// Returns a reference to the memory bus.
    pub fn memory(&self) -> &B {
        &self.memory
    }

    /// Returns a mutable reference to the memory bus.
    pub fn memory_mut(&mut self) -> &mut B {
        &mut self.memory
    }

    /// Consumes the CPU and gives the bus handle back.
    pub fn into_memory(self) -> B {
        self.memory
    }

    // ========== Setters (test fixtures, debuggers) ==========

    pub fn set_a(&mut self, value: u8) {
        self.regs.a = value;
    }

    pub fn set_x(&mut self, value: u8) {
        self.regs.x = value;
    }

    pub fn set_y(&mut self, value: u8) {
        self.regs.y = value;
    }

    pub fn set_pc(&mut self, value: u16) {
        self.regs.pc = value;
    }

    pub fn set_sp(&mut self, value: u8) {
        self.regs.sp = value;
    }

    /// Loads the status register from a byte (bit 5 forced to 1, B dropped).
    pub fn set_status(&mut self, value: u8) {
        self.p = StatusRegister::from_byte(value);
        self.p.set(Flag::Break, false);
    }

    /// Sets or clears a flag. B only exists in pushed copies, so setting it
    /// is ignored.
    pub fn set_flag(&mut self, flag: Flag, value: bool) {
        self.p.set(flag, value && flag != Flag::Break);
    }

    pub fn set_flag_n(&mut self, value: bool) {
        self.p.set(Flag::Negative, value);
    }

    pub fn set_flag_v(&mut self, value: bool) {
        self.p.set(Flag::Overflow, value);
    }

    pub fn set_flag_d(&mut self, value: bool) {
        self.p.set(Flag::Decimal, value);
    }

    pub fn set_flag_i(&mut self, value: bool) {
        self.p.set(Flag::InterruptDisable, value);
    }

    pub fn set_flag_z(&mut self, value: bool) {
        self.p.set(Flag::Zero, value);
    }

    pub fn set_flag_c(&mut self, value: bool) {
        self.p.set(Flag::Carry, value);
    }
}
