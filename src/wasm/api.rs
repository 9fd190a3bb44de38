//! WASM API for the CPU core.
//!
//! Provides JavaScript-callable interfaces for CPU control, state inspection,
//! interrupt injection and disassembly.

use crate::disassembler::disassemble_range;
use crate::{CpuState, FlatMemory, MemoryBus, CPU, RESET_VECTOR};
use wasm_bindgen::prelude::*;

/// JavaScript-compatible error wrapper
#[wasm_bindgen]
#[derive(Debug, Clone)]
pub struct JsError {
    message: String,
}

#[wasm_bindgen]
impl JsError {
    #[wasm_bindgen(constructor)]
    pub fn new(message: &str) -> JsError {
        JsError {
            message: message.to_string(),
        }
    }

    #[wasm_bindgen(getter)]
    pub fn message(&self) -> String {
        self.message.clone()
    }
}

/// One line of disassembly
#[wasm_bindgen]
#[derive(Debug, Clone)]
pub struct DisassemblyLine {
    address: u16,
    bytes: Vec<u8>,
    text: String,
}

#[wasm_bindgen]
impl DisassemblyLine {
    #[wasm_bindgen(getter)]
    pub fn address(&self) -> u16 {
        self.address
    }

    #[wasm_bindgen(getter)]
    pub fn bytes(&self) -> Vec<u8> {
        self.bytes.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn text(&self) -> String {
        self.text.clone()
    }
}

/// CPU core handle for JavaScript
#[wasm_bindgen]
pub struct WasmCpu {
    cpu: CPU<FlatMemory>,
    on_trace: Option<js_sys::Function>,
}

impl Default for WasmCpu {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl WasmCpu {
    /// Create a core over 64KB of zeroed memory
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        WasmCpu {
            cpu: CPU::new(FlatMemory::new()),
            on_trace: None,
        }
    }

    /// Install (or clear) a callback that receives one trace line per step
    pub fn set_trace_callback(&mut self, callback: Option<js_sys::Function>) {
        self.on_trace = callback;
    }

    /// Copy a program to `origin`, point the reset vector at it and reset
    pub fn load_program(&mut self, program: &[u8], origin: u16) {
        let memory = self.cpu.memory_mut();
        memory.load(origin, program);
        memory.load(RESET_VECTOR, &origin.to_le_bytes());
        self.cpu.reset();
    }

    /// Reset the CPU from the reset vector; memory is kept
    pub fn reset(&mut self) {
        self.cpu.reset();
    }

    /// Execute a single instruction and return its cycle count
    pub fn step(&mut self) -> Result<u8, JsError> {
        if let Some(callback) = &self.on_trace {
            let line = self.cpu.trace_line();
            callback
                .call1(&JsValue::NULL, &JsValue::from_str(&line))
                .map_err(|e| JsError::new(&format!("trace callback threw: {:?}", e)))?;
        }

        self.cpu
            .step()
            .map_err(|e| JsError::new(&e.to_string()))
    }

    /// Execute for at least `cycles` cycles (or until halt) and return actual cycles executed
    pub fn run_for_cycles(&mut self, cycles: u32) -> Result<u32, JsError> {
        self.cpu
            .run_for_cycles(cycles as u64)
            .map(|c| c as u32)
            .map_err(|e| JsError::new(&e.to_string()))
    }

    pub fn trigger_nmi(&mut self) -> u8 {
        self.cpu.trigger_nmi()
    }

    pub fn trigger_irq(&mut self) -> u8 {
        self.cpu.trigger_irq()
    }

    // Register getters

    #[wasm_bindgen(getter)]
    pub fn a(&self) -> u8 {
        self.cpu.a()
    }

    #[wasm_bindgen(getter)]
    pub fn x(&self) -> u8 {
        self.cpu.x()
    }

    #[wasm_bindgen(getter)]
    pub fn y(&self) -> u8 {
        self.cpu.y()
    }

    #[wasm_bindgen(getter)]
    pub fn pc(&self) -> u16 {
        self.cpu.pc()
    }

    #[wasm_bindgen(getter)]
    pub fn sp(&self) -> u8 {
        self.cpu.sp()
    }

    #[wasm_bindgen(getter)]
    pub fn status(&self) -> u8 {
        self.cpu.status()
    }

    #[wasm_bindgen(getter)]
    pub fn cycles(&self) -> f64 {
        self.cpu.cycles() as f64 // Convert u64 to f64 for JavaScript
    }

    /// "reset", "running", "halted", "interrupted" or "jammed"
    #[wasm_bindgen(getter)]
    pub fn state(&self) -> String {
        match self.cpu.state() {
            CpuState::Reset => "reset",
            CpuState::Running => "running",
            CpuState::Halted => "halted",
            CpuState::Interrupted => "interrupted",
            CpuState::Jammed { .. } => "jammed",
        }
        .to_string()
    }

    /// Status flags as `NV-BDIZC` text, upper case when set
    #[wasm_bindgen(getter)]
    pub fn flags(&self) -> String {
        self.cpu.status_register().to_string()
    }

    /// Set the program counter
    pub fn set_pc(&mut self, addr: u16) {
        self.cpu.set_pc(addr);
    }

    // Memory access methods

    /// Read a single byte from memory
    pub fn read_memory(&self, addr: u16) -> u8 {
        self.cpu.memory().read(addr)
    }

    /// Write a single byte to memory
    pub fn write_memory(&mut self, addr: u16, value: u8) {
        self.cpu.memory_mut().write(addr, value);
    }

    /// Read a 256-byte page from memory (for efficient display)
    pub fn get_memory_page(&self, page: u8) -> Vec<u8> {
        let start = (page as usize) << 8;
        self.cpu.memory().as_slice()[start..start + 256].to_vec()
    }

    /// Disassemble `count` instructions starting at `start_addr` (at most 65,536)
    pub fn disassemble(&self, start_addr: u16, count: u32) -> Vec<JsValue> {
        disassemble_range(self.cpu.memory(), start_addr, count as usize)
            .into_iter()
            .map(|insn| {
                JsValue::from(DisassemblyLine {
                    address: insn.address,
                    text: insn.to_string(),
                    bytes: insn.bytes,
                })
            })
            .collect()
    }

    /// Trace line for the instruction at PC
    pub fn trace_line(&self) -> String {
        self.cpu.trace_line()
    }
}
