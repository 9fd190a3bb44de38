//! Fuzz target for the disassembler.
//!
//! Feeds arbitrary memory images to the disassembler to find edge cases in
//! instruction decoding and operand formatting.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use nes6502::disassembler::disassemble_range;
use nes6502::{FlatMemory, MemoryBus};

/// Complete fuzz input
#[derive(Debug, Arbitrary)]
struct FuzzInput {
    bytes: Vec<u8>,
    origin: u16,
    count: u8,
}

fuzz_target!(|input: FuzzInput| {
    let mut memory = FlatMemory::new();
    memory.load(input.origin, &input.bytes);

    let listing = disassemble_range(&memory, input.origin, input.count as usize);

    let mut expected_address = input.origin;
    for insn in &listing {
        assert_eq!(insn.address, expected_address);
        assert!((1..=3).contains(&insn.len()));
        assert!(!insn.to_string().is_empty());
        expected_address = insn.next_address();
    }
});
