//! Fuzz target for CPU step execution.
//!
//! Builds arbitrary CPU states, configurations and memory contents, then runs a
//! few instructions looking for panics and broken invariants.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use nes6502::{
    BrkBehavior, CpuConfig, CpuState, FlatMemory, IllegalOpcodePolicy, MemoryBus, CPU,
};

/// Arbitrary CPU initial state for fuzzing
#[derive(Debug, Arbitrary)]
struct FuzzCpuState {
    a: u8,
    x: u8,
    y: u8,
    sp: u8,
    /// Packed status byte
    status: u8,
    decimal_mode: bool,
    brk_interrupts: bool,
    illegal_as_nop: bool,
}

/// Memory region for fuzzing
#[derive(Debug, Arbitrary)]
struct FuzzMemory {
    /// Bytes at the PC location (a few instructions)
    program: [u8; 16],
    /// Zero page contents
    zero_page: [u8; 256],
    /// Stack page contents
    stack_page: [u8; 256],
    /// Region at $4000 for absolute addressing
    main_memory: [u8; 256],
}

/// Complete fuzz input
#[derive(Debug, Arbitrary)]
struct FuzzInput {
    cpu_state: FuzzCpuState,
    memory: FuzzMemory,
    steps: u8,
}

fuzz_target!(|input: FuzzInput| {
    let mut memory = FlatMemory::with_program(0x8000, &input.memory.program);
    memory.load(0xFFFA, &[0x00, 0x90, 0x00, 0x80, 0x00, 0x90]);
    memory.load(0x0000, &input.memory.zero_page);
    memory.load(0x0100, &input.memory.stack_page);
    memory.load(0x4000, &input.memory.main_memory);

    let state = &input.cpu_state;
    let config = CpuConfig::default()
        .with_decimal_mode(state.decimal_mode)
        .with_brk(if state.brk_interrupts {
            BrkBehavior::Interrupt
        } else {
            BrkBehavior::Halt
        })
        .with_illegal_opcodes(if state.illegal_as_nop {
            IllegalOpcodePolicy::Nop
        } else {
            IllegalOpcodePolicy::Jam
        });

    let mut cpu = CPU::with_config(memory, config);
    cpu.set_a(state.a);
    cpu.set_x(state.x);
    cpu.set_y(state.y);
    cpu.set_sp(state.sp);
    cpu.set_status(state.status);

    for _ in 0..(input.steps % 8) + 1 {
        let before = cpu.cycles();
        match cpu.step() {
            Ok(cycles) => {
                assert_eq!(cpu.cycles(), before + cycles as u64);
                assert!(cycles <= 8);
            }
            Err(_) => {
                assert!(matches!(cpu.state(), CpuState::Jammed { .. }));
                assert_eq!(cpu.cycles(), before);
                break;
            }
        }

        // Bit 5 of P always reads 1
        assert_eq!(cpu.status() & 0x20, 0x20);
    }
});
