//! Tests for ASL, LSR, ROL and ROR in accumulator and memory forms.

use nes6502::{FlatMemory, MemoryBus, CPU};

/// Helper function to create a CPU with reset vector at 0x8000
fn setup_cpu() -> CPU<FlatMemory> {
    let mut memory = FlatMemory::new();
    memory.write(0xFFFC, 0x00);
    memory.write(0xFFFD, 0x80);
    CPU::new(memory)
}

// ========== Accumulator Mode ==========

#[test]
fn test_asl_accumulator() {
    let mut cpu = setup_cpu();
    cpu.memory_mut().write(0x8000, 0x0A);
    cpu.set_a(0b1100_0001);

    assert_eq!(cpu.step(), Ok(2));
    assert_eq!(cpu.a(), 0b1000_0010);
    assert!(cpu.flag_c());
    assert!(cpu.flag_n());
    assert_eq!(cpu.pc(), 0x8001);
}

#[test]
fn test_asl_to_zero() {
    let mut cpu = setup_cpu();
    cpu.memory_mut().write(0x8000, 0x0A);
    cpu.set_a(0x80);

    cpu.step().unwrap();
    assert_eq!(cpu.a(), 0x00);
    assert!(cpu.flag_z());
    assert!(cpu.flag_c());
}

#[test]
fn test_lsr_accumulator() {
    let mut cpu = setup_cpu();
    cpu.memory_mut().write(0x8000, 0x4A);
    cpu.set_a(0x81);
    cpu.set_flag_n(true);

    assert_eq!(cpu.step(), Ok(2));
    assert_eq!(cpu.a(), 0x40);
    assert!(cpu.flag_c());
    assert!(!cpu.flag_n());
}

#[test]
fn test_rol_accumulator_carries_through() {
    let mut cpu = setup_cpu();
    cpu.memory_mut().write(0x8000, 0x2A);
    cpu.set_a(0x80);
    cpu.set_flag_c(true);

    cpu.step().unwrap();
    assert_eq!(cpu.a(), 0x01);
    assert!(cpu.flag_c());
    assert!(!cpu.flag_z());
}

#[test]
fn test_ror_accumulator_carries_through() {
    let mut cpu = setup_cpu();
    cpu.memory_mut().write(0x8000, 0x6A);
    cpu.set_a(0x01);
    cpu.set_flag_c(true);

    cpu.step().unwrap();
    assert_eq!(cpu.a(), 0x80);
    assert!(cpu.flag_c());
    assert!(cpu.flag_n());
}

#[test]
fn test_ror_without_carry() {
    let mut cpu = setup_cpu();
    cpu.memory_mut().write(0x8000, 0x6A);
    cpu.set_a(0x02);

    cpu.step().unwrap();
    assert_eq!(cpu.a(), 0x01);
    assert!(!cpu.flag_c());
    assert!(!cpu.flag_n());
}

// ========== Memory Mode (read-modify-write) ==========

#[test]
fn test_asl_zero_page() {
    let mut cpu = setup_cpu();
    cpu.memory_mut().load(0x8000, &[0x06, 0x10]);
    cpu.memory_mut().write(0x0010, 0x41);
    cpu.set_a(0xAA);

    assert_eq!(cpu.step(), Ok(5));
    assert_eq!(cpu.memory().read(0x0010), 0x82);
    assert_eq!(cpu.a(), 0xAA); // accumulator untouched
    assert!(!cpu.flag_c());
}

#[test]
fn test_lsr_absolute() {
    let mut cpu = setup_cpu();
    cpu.memory_mut().load(0x8000, &[0x4E, 0x00, 0x03]);
    cpu.memory_mut().write(0x0300, 0x01);

    assert_eq!(cpu.step(), Ok(6));
    assert_eq!(cpu.memory().read(0x0300), 0x00);
    assert!(cpu.flag_z());
    assert!(cpu.flag_c());
}

#[test]
fn test_rol_zero_page_x() {
    let mut cpu = setup_cpu();
    cpu.memory_mut().load(0x8000, &[0x36, 0x10]);
    cpu.memory_mut().write(0x0013, 0x40);
    cpu.set_x(0x03);
    cpu.set_flag_c(true);

    assert_eq!(cpu.step(), Ok(6));
    assert_eq!(cpu.memory().read(0x0013), 0x81);
    assert!(!cpu.flag_c());
    assert!(cpu.flag_n());
}

#[test]
fn test_ror_absolute_x_fixed_timing() {
    let mut cpu = setup_cpu();

    // RMW absolute,X is always 7 cycles, page cross or not
    cpu.memory_mut().load(0x8000, &[0x7E, 0xFF, 0x02]);
    cpu.memory_mut().write(0x0300, 0x03);
    cpu.set_x(0x01);

    assert_eq!(cpu.step(), Ok(7));
    assert_eq!(cpu.memory().read(0x0300), 0x01);
    assert!(cpu.flag_c());
}
