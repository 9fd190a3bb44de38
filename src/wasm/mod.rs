//! WebAssembly bindings for the nes6502 core.
//!
//! This module provides JavaScript-callable interfaces to the CPU core, for
//! browser-based debuggers that single-step programs and inspect state.

pub mod api;

pub use api::WasmCpu;
