//! Tests for INC, DEC, INX, INY, DEX, DEY.

use nes6502::{FlatMemory, MemoryBus, CPU};

/// Helper function to create a CPU with reset vector at 0x8000
fn setup_cpu() -> CPU<FlatMemory> {
    let mut memory = FlatMemory::new();
    memory.write(0xFFFC, 0x00);
    memory.write(0xFFFD, 0x80);
    CPU::new(memory)
}

#[test]
fn test_inc_zero_page() {
    let mut cpu = setup_cpu();
    cpu.memory_mut().load(0x8000, &[0xE6, 0x10]);
    cpu.memory_mut().write(0x0010, 0x41);

    assert_eq!(cpu.step(), Ok(5));
    assert_eq!(cpu.memory().read(0x0010), 0x42);
    assert!(!cpu.flag_z());
    assert!(!cpu.flag_n());
}

#[test]
fn test_inc_wraps_to_zero() {
    let mut cpu = setup_cpu();
    cpu.memory_mut().load(0x8000, &[0xEE, 0x00, 0x02]);
    cpu.memory_mut().write(0x0200, 0xFF);
    cpu.set_flag_c(true);

    assert_eq!(cpu.step(), Ok(6));
    assert_eq!(cpu.memory().read(0x0200), 0x00);
    assert!(cpu.flag_z());
    assert!(cpu.flag_c()); // carry untouched
}

#[test]
fn test_dec_to_negative() {
    let mut cpu = setup_cpu();
    cpu.memory_mut().load(0x8000, &[0xC6, 0x10]);
    cpu.memory_mut().write(0x0010, 0x00);

    cpu.step().unwrap();
    assert_eq!(cpu.memory().read(0x0010), 0xFF);
    assert!(cpu.flag_n());
}

#[test]
fn test_dec_absolute_x() {
    let mut cpu = setup_cpu();
    cpu.memory_mut().load(0x8000, &[0xDE, 0x00, 0x03]);
    cpu.memory_mut().write(0x0305, 0x01);
    cpu.set_x(0x05);

    assert_eq!(cpu.step(), Ok(7));
    assert_eq!(cpu.memory().read(0x0305), 0x00);
    assert!(cpu.flag_z());
}

#[test]
fn test_inx_wraps() {
    let mut cpu = setup_cpu();
    cpu.memory_mut().write(0x8000, 0xE8);
    cpu.set_x(0xFF);

    assert_eq!(cpu.step(), Ok(2));
    assert_eq!(cpu.x(), 0x00);
    assert!(cpu.flag_z());
}

#[test]
fn test_iny() {
    let mut cpu = setup_cpu();
    cpu.memory_mut().write(0x8000, 0xC8);
    cpu.set_y(0x7F);

    cpu.step().unwrap();
    assert_eq!(cpu.y(), 0x80);
    assert!(cpu.flag_n());
}

#[test]
fn test_dex_wraps() {
    let mut cpu = setup_cpu();
    cpu.memory_mut().write(0x8000, 0xCA);

    cpu.step().unwrap();
    assert_eq!(cpu.x(), 0xFF);
    assert!(cpu.flag_n());
    assert!(!cpu.flag_z());
}

#[test]
fn test_dey_to_zero() {
    let mut cpu = setup_cpu();
    cpu.memory_mut().write(0x8000, 0x88);
    cpu.set_y(0x01);

    cpu.step().unwrap();
    assert_eq!(cpu.y(), 0x00);
    assert!(cpu.flag_z());
}
