//! Example: NES-style Frame Loop
//!
//! Drives the core the way a NES emulator's main loop would: run one frame's
//! worth of CPU cycles, then raise NMI for vertical blank. The PPU is replaced by
//! a stub device that only models the vblank bit of PPUSTATUS ($2002).
//!
//! # Memory Map
//!
//! ```text
//! $0000-$1FFF  2KB work RAM, mirrored
//! $2000-$3FFF  PPU register stub (8 registers, mirrored)
//! $C000-$FFFF  16KB PRG ROM
//! ```
//!
//! # Program
//!
//! ```asm
//! reset:  sei
//!         cld
//!         ldx #$FF
//!         txs
//! loop:   inc $11        ; busy work
//!         jmp loop
//!
//! nmi:    pha
//!         inc $10        ; frame counter
//!         lda $2002      ; acknowledge vblank
//!         pla
//!         rti
//! ```
//!
//! Run with `cargo run --example frame_loop`.

use nes6502::{Budget, Device, MappedMemory, MemoryBus, MirroredRam, RomDevice, CPU};
use std::cell::Cell;
use std::rc::Rc;

/// NTSC CPU cycles per frame (341 * 262 / 3, rounded).
const CYCLES_PER_FRAME: u64 = 29_780;

const FRAMES: u32 = 60;

/// Stand-in for the PPU register window. Reading PPUSTATUS returns the vblank
/// bit and clears it, like the real chip.
struct PpuStub {
    vblank: Rc<Cell<bool>>,
}

impl Device for PpuStub {
    fn read(&self, offset: u16) -> u8 {
        if offset % 8 == 2 {
            let status = if self.vblank.get() { 0x80 } else { 0x00 };
            self.vblank.set(false);
            status
        } else {
            0x00
        }
    }

    fn write(&mut self, _offset: u16, _value: u8) {}

    fn size(&self) -> u16 {
        0x2000
    }
}

fn build_prg() -> Vec<u8> {
    let mut prg = vec![0xEA; 0x4000];

    let code: &[u8] = &[
        0x78, // SEI
        0xD8, // CLD
        0xA2, 0xFF, // LDX #$FF
        0x9A, // TXS
        0xE6, 0x11, // loop: INC $11
        0x4C, 0x05, 0xC0, // JMP loop
        0x48, // nmi: PHA
        0xE6, 0x10, // INC $10
        0xAD, 0x02, 0x20, // LDA $2002
        0x68, // PLA
        0x40, // RTI
    ];
    prg[..code.len()].copy_from_slice(code);

    // Vectors: NMI -> $C00A, RESET -> $C000, IRQ -> $C000
    prg[0x3FFA..].copy_from_slice(&[0x0A, 0xC0, 0x00, 0xC0, 0x00, 0xC0]);
    prg
}

fn main() {
    println!("=== NES Frame Loop Demo ===\n");

    let vblank = Rc::new(Cell::new(false));

    let mut memory = MappedMemory::new();
    memory
        .add_device(0x0000, Box::new(MirroredRam::new()))
        .expect("work RAM");
    memory
        .add_device(
            0x2000,
            Box::new(PpuStub {
                vblank: Rc::clone(&vblank),
            }),
        )
        .expect("PPU stub");
    memory
        .add_device(0xC000, Box::new(RomDevice::new(build_prg())))
        .expect("PRG ROM");

    let mut cpu = CPU::new(memory);
    println!("Reset vector -> ${:04X}", cpu.pc());
    println!("First instruction: {}\n", cpu.trace_line());

    for _ in 0..FRAMES {
        if let Err(e) = cpu.run(Budget::Cycles(CYCLES_PER_FRAME)) {
            eprintln!("CPU stopped: {}", e);
            return;
        }

        vblank.set(true);
        cpu.trigger_nmi();
    }

    // Let the last NMI handler finish
    let _ = cpu.run(Budget::Instructions(5));

    println!("Frames signalled:   {}", FRAMES);
    println!("Frame counter $10:  {}", cpu.memory().read(0x0010));
    println!("Busy counter $11:   {}", cpu.memory().read(0x0011));
    println!("Mirror check $0810: {}", cpu.memory().read(0x0810));
    println!("Vblank pending:     {}", vblank.get());
    println!("Total cycles:       {}", cpu.cycles());
}
