//! Tests for the execution loop: run budgets, stop reasons, cancellation,
//! illegal opcode handling and state transitions.

use nes6502::{
    Budget, CpuConfig, CpuState, ExecutionError, FlatMemory, IllegalOpcodePolicy, MemoryBus,
    StopReason, CPU,
};

/// INX; JMP $8000 forever (5 cycles per iteration)
const COUNT_FOREVER: [u8; 4] = [0xE8, 0x4C, 0x00, 0x80];

fn setup_cpu(program: &[u8]) -> CPU<FlatMemory> {
    CPU::new(FlatMemory::with_program(0x8000, program))
}

// ========== Budgets ==========

#[test]
fn test_cycle_budget_stops_at_instruction_boundary() {
    let mut cpu = setup_cpu(&COUNT_FOREVER);

    // 2 + 3 + 2 + 3 = 10 exactly
    let summary = cpu.run(Budget::Cycles(10)).unwrap();
    assert_eq!(summary.stop, StopReason::BudgetExhausted);
    assert_eq!(summary.cycles, 10);
    assert_eq!(summary.instructions, 4);
    assert_eq!(cpu.x(), 2);
}

#[test]
fn test_cycle_budget_may_overshoot() {
    let mut cpu = setup_cpu(&COUNT_FOREVER);

    // 2 < 3, so the JMP runs too
    let summary = cpu.run(Budget::Cycles(3)).unwrap();
    assert_eq!(summary.cycles, 5);
    assert_eq!(summary.instructions, 2);
}

#[test]
fn test_instruction_budget() {
    let mut cpu = setup_cpu(&COUNT_FOREVER);

    let summary = cpu.run(Budget::Instructions(7)).unwrap();
    assert_eq!(summary.stop, StopReason::BudgetExhausted);
    assert_eq!(summary.instructions, 7);
    assert_eq!(summary.cycles, 4 * 2 + 3 * 3);
    assert_eq!(cpu.instructions(), 7);
}

#[test]
fn test_zero_budget_executes_nothing() {
    let mut cpu = setup_cpu(&COUNT_FOREVER);

    let summary = cpu.run(Budget::Cycles(0)).unwrap();
    assert_eq!(summary.stop, StopReason::BudgetExhausted);
    assert_eq!(summary.instructions, 0);
    assert_eq!(cpu.pc(), 0x8000);
    assert_eq!(cpu.state(), CpuState::Reset);
}

#[test]
fn test_summary_is_relative_to_the_run() {
    let mut cpu = setup_cpu(&COUNT_FOREVER);

    cpu.run(Budget::Instructions(2)).unwrap();
    let summary = cpu.run(Budget::Instructions(2)).unwrap();

    assert_eq!(summary.cycles, 5);
    assert_eq!(cpu.cycles(), 10);
}

#[test]
fn test_run_for_cycles() {
    let mut cpu = setup_cpu(&COUNT_FOREVER);

    let consumed = cpu.run_for_cycles(100).unwrap();
    assert_eq!(consumed, 100);
    assert_eq!(cpu.x(), 20);
}

// ========== Stop Reasons ==========

#[test]
fn test_run_stops_on_halt() {
    // LDX #3; loop: DEX; BNE loop; BRK
    let mut cpu = setup_cpu(&[0xA2, 0x03, 0xCA, 0xD0, 0xFD, 0x00]);

    let summary = cpu.run(Budget::Instructions(1000)).unwrap();
    assert_eq!(summary.stop, StopReason::Halted);
    assert_eq!(summary.instructions, 1 + 3 + 3 + 1);
    assert!(cpu.is_halted());
}

#[test]
fn test_run_on_halted_core_returns_immediately() {
    let mut cpu = setup_cpu(&[0x00]);
    cpu.step().unwrap();

    let summary = cpu.run(Budget::Instructions(10)).unwrap();
    assert_eq!(summary.stop, StopReason::Halted);
    assert_eq!(summary.instructions, 0);
    assert_eq!(summary.cycles, 0);
}

#[test]
fn test_halted_step_is_a_no_op() {
    let mut cpu = setup_cpu(&[0x00]);
    cpu.step().unwrap();
    let (pc, cycles) = (cpu.pc(), cpu.cycles());

    assert_eq!(cpu.step(), Ok(0));
    assert_eq!(cpu.pc(), pc);
    assert_eq!(cpu.cycles(), cycles);
}

#[test]
fn test_run_until_cancelled() {
    let mut cpu = setup_cpu(&COUNT_FOREVER);

    let summary = cpu
        .run_until(Budget::Cycles(1_000_000), |cpu| cpu.x() == 5)
        .unwrap();

    assert_eq!(summary.stop, StopReason::Cancelled);
    assert_eq!(cpu.x(), 5);
    // Predicate is checked between instructions, right after the 5th INX
    assert_eq!(cpu.pc(), 0x8001);
}

#[test]
fn test_run_until_sees_memory() {
    // LDA #$01; STA $10; JMP $8004
    let mut cpu = setup_cpu(&[0xA9, 0x01, 0x85, 0x10, 0x4C, 0x04, 0x80]);

    let summary = cpu
        .run_until(Budget::Instructions(100), |cpu| cpu.memory().read(0x10) == 1)
        .unwrap();

    assert_eq!(summary.stop, StopReason::Cancelled);
    assert_eq!(summary.instructions, 2);
}

// ========== load_and_run ==========

#[test]
fn test_load_and_run() {
    let mut cpu = CPU::new(FlatMemory::new());

    // LDX #$10; STX $0200; BRK
    let summary = cpu.load_and_run(&[0xA2, 0x10, 0x8E, 0x00, 0x02, 0x00]).unwrap();

    assert_eq!(summary.stop, StopReason::Halted);
    assert_eq!(summary.cycles, 2 + 4 + 7);
    assert_eq!(cpu.memory().read(0x0200), 0x10);
    assert_eq!(cpu.memory().read_u16(0xFFFC), 0x8000);
}

#[test]
fn test_load_and_run_resets_previous_state() {
    let mut cpu = CPU::new(FlatMemory::new());
    cpu.set_a(0x99);
    cpu.set_sp(0x10);

    cpu.load_and_run(&[0x00]).unwrap();

    assert_eq!(cpu.a(), 0x00);
    assert_eq!(cpu.sp(), 0xFD);
    assert_eq!(cpu.cycles(), 7);
}

#[test]
fn test_load_and_run_stops_runaway_program() {
    let mut cpu = CPU::new(FlatMemory::new());

    // JMP $8000
    let summary = cpu.load_and_run(&[0x4C, 0x00, 0x80]).unwrap();
    assert_eq!(summary.stop, StopReason::BudgetExhausted);
    assert_eq!(summary.instructions, nes6502::cpu::LOAD_AND_RUN_INSTRUCTION_LIMIT);
}

// ========== Illegal Opcodes ==========

#[test]
fn test_illegal_opcode_jams() {
    // NOP; .byte $02
    let mut cpu = setup_cpu(&[0xEA, 0x02]);
    cpu.step().unwrap();

    let err = cpu.step().unwrap_err();
    assert_eq!(
        err,
        ExecutionError::IllegalOpcode {
            opcode: 0x02,
            address: 0x8001
        }
    );
    assert_eq!(
        cpu.state(),
        CpuState::Jammed {
            opcode: 0x02,
            address: 0x8001
        }
    );
    // Only the NOP was charged
    assert_eq!(cpu.cycles(), 2);
    assert_eq!(cpu.instructions(), 1);
}

#[test]
fn test_jam_is_sticky() {
    let mut cpu = setup_cpu(&[0xFF, 0xEA]);
    let first = cpu.step();
    assert!(first.is_err());

    // The following NOP is never reached
    assert_eq!(cpu.step(), first);
    assert_eq!(cpu.step(), first);
    assert_eq!(cpu.pc(), 0x8001);
    assert_eq!(cpu.cycles(), 0);
}

#[test]
fn test_run_propagates_illegal_opcode() {
    let mut cpu = setup_cpu(&[0xE8, 0xE8, 0x12]);

    let result = cpu.run(Budget::Instructions(100));
    assert_eq!(
        result,
        Err(ExecutionError::IllegalOpcode {
            opcode: 0x12,
            address: 0x8002
        })
    );
    assert_eq!(cpu.x(), 2);
}

#[test]
fn test_reset_clears_jam() {
    let mut cpu = setup_cpu(&[0x02]);
    assert!(cpu.step().is_err());
    assert!(cpu.is_jammed());

    cpu.memory_mut().write(0x8000, 0xEA);
    cpu.reset();

    assert_eq!(cpu.state(), CpuState::Reset);
    assert_eq!(cpu.step(), Ok(2));
}

#[test]
fn test_illegal_opcode_as_nop() {
    let config = CpuConfig::default().with_illegal_opcodes(IllegalOpcodePolicy::Nop);
    let mut cpu = CPU::with_config(FlatMemory::with_program(0x8000, &[0x02, 0xE8]), config);
    let status = cpu.status();

    assert_eq!(cpu.step(), Ok(2));
    assert_eq!(cpu.pc(), 0x8001);
    assert_eq!(cpu.status(), status);
    assert_eq!(cpu.state(), CpuState::Running);

    cpu.step().unwrap();
    assert_eq!(cpu.x(), 1);
}

#[test]
fn test_every_unofficial_byte_jams_by_default() {
    for opcode in 0u16..=0xFF {
        let opcode = opcode as u8;
        if nes6502::OPCODE_TABLE[opcode as usize].is_official() {
            continue;
        }

        let mut cpu = setup_cpu(&[opcode]);
        assert!(cpu.step().is_err(), "opcode {:02X}", opcode);
        assert!(cpu.is_jammed(), "opcode {:02X}", opcode);
    }
}

// ========== State Transitions ==========

#[test]
fn test_state_transitions() {
    let mut memory = FlatMemory::with_program(0x8000, &[0xEA, 0x00]);
    memory.load(0xFFFA, &[0x00, 0x90]);
    memory.write(0x9000, 0x40); // RTI
    let mut cpu = CPU::new(memory);

    assert_eq!(cpu.state(), CpuState::Reset);
    cpu.step().unwrap();
    assert_eq!(cpu.state(), CpuState::Running);

    cpu.trigger_nmi();
    assert_eq!(cpu.state(), CpuState::Interrupted);
    cpu.step().unwrap();
    assert_eq!(cpu.state(), CpuState::Running);

    cpu.step().unwrap(); // BRK
    assert_eq!(cpu.state(), CpuState::Halted);

    cpu.reset();
    assert_eq!(cpu.state(), CpuState::Reset);
    assert_eq!(cpu.cycles(), 0);
    assert_eq!(cpu.instructions(), 0);
}

// ========== Program Counter Wraparound ==========

#[test]
fn test_implied_opcode_at_top_of_memory() {
    let mut cpu = setup_cpu(&[]);
    cpu.memory_mut().write(0xFFFF, 0xE8); // INX
    cpu.set_pc(0xFFFF);

    assert_eq!(cpu.step(), Ok(2));
    assert_eq!(cpu.x(), 1);
    assert_eq!(cpu.pc(), 0x0000);
}

#[test]
fn test_immediate_operand_wraps_to_zero() {
    let mut cpu = setup_cpu(&[]);
    cpu.memory_mut().write(0xFFFF, 0xA9); // LDA #$42
    cpu.memory_mut().write(0x0000, 0x42);
    cpu.set_pc(0xFFFF);

    assert_eq!(cpu.step(), Ok(2));
    assert_eq!(cpu.a(), 0x42);
    assert_eq!(cpu.pc(), 0x0001);
}

#[test]
fn test_absolute_operand_straddles_wrap() {
    let mut cpu = setup_cpu(&[]);
    // LDA $1234 with the high byte at $0000
    cpu.memory_mut().load(0xFFFE, &[0xAD, 0x34]);
    cpu.memory_mut().write(0x0000, 0x12);
    cpu.memory_mut().write(0x1234, 0x99);
    cpu.set_pc(0xFFFE);

    assert_eq!(cpu.step(), Ok(4));
    assert_eq!(cpu.a(), 0x99);
    assert_eq!(cpu.pc(), 0x0001);
}

#[test]
fn test_execution_continues_past_wrap() {
    let mut cpu = setup_cpu(&[]);
    // INX at $FFFF, then INX; BRK from $0000
    cpu.memory_mut().write(0xFFFF, 0xE8);
    cpu.memory_mut().load(0x0000, &[0xE8, 0x00]);
    cpu.set_pc(0xFFFF);

    let summary = cpu.run(Budget::Instructions(10)).unwrap();
    assert_eq!(summary.stop, StopReason::Halted);
    assert_eq!(cpu.x(), 2);
}
