//! Tests for interrupt entry: NMI, IRQ, and BRK in both configurations.
//!
//! Tests cover:
//! - Stack layout of the entry sequence (PC high, PC low, status)
//! - B bit in the pushed status (clear for NMI/IRQ, set for BRK)
//! - I flag masking IRQ but not NMI
//! - Cycle cost of the entry and state transitions
//! - Round trip through an RTI handler

use nes6502::{BrkBehavior, CpuConfig, CpuState, FlatMemory, MemoryBus, CPU};

/// CPU with reset at $8000, NMI handler at $9000, IRQ/BRK handler at $A000.
fn setup_cpu_with(config: CpuConfig) -> CPU<FlatMemory> {
    let mut memory = FlatMemory::new();
    memory.load(0xFFFA, &[0x00, 0x90, 0x00, 0x80, 0x00, 0xA0]);
    CPU::with_config(memory, config)
}

fn setup_cpu() -> CPU<FlatMemory> {
    setup_cpu_with(CpuConfig::default())
}

// ========== NMI ==========

#[test]
fn test_nmi_entry() {
    let mut cpu = setup_cpu();
    cpu.set_pc(0x8123);
    cpu.set_flag_c(true);

    assert_eq!(cpu.trigger_nmi(), 7);

    assert_eq!(cpu.pc(), 0x9000);
    assert_eq!(cpu.sp(), 0xFA);
    assert_eq!(cpu.memory().read(0x01FD), 0x81);
    assert_eq!(cpu.memory().read(0x01FC), 0x23);
    // C | I | U, B clear
    assert_eq!(cpu.memory().read(0x01FB), 0x25);
    assert!(cpu.flag_i());
    assert_eq!(cpu.cycles(), 7);
    assert_eq!(cpu.state(), CpuState::Interrupted);
}

#[test]
fn test_nmi_ignores_interrupt_disable() {
    let mut cpu = setup_cpu();
    assert!(cpu.flag_i());
    assert_eq!(cpu.trigger_nmi(), 7);
    assert_eq!(cpu.pc(), 0x9000);
}

#[test]
fn test_nmi_handler_returns() {
    let mut cpu = setup_cpu();

    // Main: NOP at $8000; handler: INX; RTI
    cpu.memory_mut().write(0x8000, 0xEA);
    cpu.memory_mut().load(0x9000, &[0xE8, 0x40]);
    cpu.set_flag_i(false);
    let status = cpu.status();

    cpu.trigger_nmi();
    cpu.step().unwrap(); // INX
    assert_eq!(cpu.state(), CpuState::Running);
    cpu.step().unwrap(); // RTI

    assert_eq!(cpu.x(), 1);
    assert_eq!(cpu.pc(), 0x8000);
    assert_eq!(cpu.sp(), 0xFD);
    assert_eq!(cpu.status(), status);
    assert!(!cpu.flag_i());
}

// ========== IRQ ==========

#[test]
fn test_irq_masked_by_interrupt_disable() {
    let mut cpu = setup_cpu();
    assert!(cpu.flag_i());

    assert_eq!(cpu.trigger_irq(), 0);
    assert_eq!(cpu.pc(), 0x8000);
    assert_eq!(cpu.sp(), 0xFD);
    assert_eq!(cpu.cycles(), 0);
    assert_eq!(cpu.state(), CpuState::Reset);
}

#[test]
fn test_irq_entry_when_enabled() {
    let mut cpu = setup_cpu();

    // CLI, then the IRQ arrives
    cpu.memory_mut().write(0x8000, 0x58);
    cpu.step().unwrap();

    assert_eq!(cpu.trigger_irq(), 7);
    assert_eq!(cpu.pc(), 0xA000);
    assert_eq!(cpu.memory().read(0x01FD), 0x80);
    assert_eq!(cpu.memory().read(0x01FC), 0x01);
    assert_eq!(cpu.memory().read(0x01FB) & 0x30, 0x20); // U set, B clear
    assert!(cpu.flag_i());
    assert_eq!(cpu.cycles(), 2 + 7);
}

#[test]
fn test_irq_not_nested_while_in_handler() {
    let mut cpu = setup_cpu();
    cpu.set_flag_i(false);

    assert_eq!(cpu.trigger_irq(), 7);
    assert_eq!(cpu.trigger_irq(), 0);
    assert_eq!(cpu.sp(), 0xFA);
}

// ========== BRK ==========

#[test]
fn test_brk_halts_by_default() {
    let mut cpu = setup_cpu();
    cpu.memory_mut().write(0x8000, 0x00);

    assert_eq!(cpu.step(), Ok(7));
    assert_eq!(cpu.state(), CpuState::Halted);
    assert_eq!(cpu.pc(), 0x8001);
    assert_eq!(cpu.sp(), 0xFD); // nothing pushed
}

#[test]
fn test_brk_as_software_interrupt() {
    let mut cpu = setup_cpu_with(CpuConfig::default().with_brk(BrkBehavior::Interrupt));
    cpu.memory_mut().load(0x8000, &[0x00, 0xFF]);
    cpu.set_flag_i(false);

    assert_eq!(cpu.step(), Ok(7));

    assert_eq!(cpu.pc(), 0xA000);
    assert_eq!(cpu.state(), CpuState::Running);
    // Return address skips the padding byte
    assert_eq!(cpu.memory().read(0x01FD), 0x80);
    assert_eq!(cpu.memory().read(0x01FC), 0x02);
    // B and U set in the pushed copy
    assert_eq!(cpu.memory().read(0x01FB), 0x30);
    assert!(cpu.flag_i());
}

#[test]
fn test_brk_interrupt_ignores_interrupt_disable() {
    let mut cpu = setup_cpu_with(CpuConfig::nmos());
    cpu.memory_mut().write(0x8000, 0x00);
    assert!(cpu.flag_i());

    cpu.step().unwrap();
    assert_eq!(cpu.pc(), 0xA000);
}

#[test]
fn test_brk_rti_resumes_after_padding() {
    let mut cpu = setup_cpu_with(CpuConfig::nmos());

    // BRK; .byte $EA; INY ... handler: INX; RTI
    cpu.memory_mut().load(0x8000, &[0x00, 0xEA, 0xC8]);
    cpu.memory_mut().load(0xA000, &[0xE8, 0x40]);

    for _ in 0..4 {
        cpu.step().unwrap();
    }

    assert_eq!(cpu.x(), 1);
    assert_eq!(cpu.y(), 1);
    assert_eq!(cpu.pc(), 0x8003);
}

// ========== State Transitions ==========

#[test]
fn test_nmi_wakes_halted_core() {
    let mut cpu = setup_cpu();
    cpu.memory_mut().write(0x8000, 0x00);
    cpu.memory_mut().load(0x9000, &[0xE8, 0x40]);

    cpu.step().unwrap();
    assert!(cpu.is_halted());

    cpu.trigger_nmi();
    assert_eq!(cpu.state(), CpuState::Interrupted);

    cpu.step().unwrap(); // INX
    cpu.step().unwrap(); // RTI
    assert_eq!(cpu.x(), 1);
    // Back just past the BRK, running again
    assert_eq!(cpu.pc(), 0x8001);
    assert_eq!(cpu.state(), CpuState::Running);
}

#[test]
fn test_jammed_core_ignores_interrupts() {
    let mut cpu = setup_cpu();
    cpu.memory_mut().write(0x8000, 0x02);
    assert!(cpu.step().is_err());

    assert_eq!(cpu.trigger_nmi(), 0);
    cpu.set_flag_i(false);
    assert_eq!(cpu.trigger_irq(), 0);
    assert_eq!(cpu.pc(), 0x8001);
    assert!(cpu.is_jammed());
}
