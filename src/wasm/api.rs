//! WASM API for the 6502 interpreter.
//!
//! Provides JavaScript-callable interfaces for loading programs, CPU control,
//! state inspection and disassembly.

use crate::{decode, format_long, format_trace_line, Cpu, FlatMemory, MemoryBus};
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

/// Main emulator interface for JavaScript
#[wasm_bindgen]
pub struct Emulator6502 {
    cpu: Cpu<FlatMemory>,
    program_start: u16,
    program_end: u16,
}

#[wasm_bindgen]
impl Emulator6502 {
    /// Create an emulator over 64KB of zeroed RAM
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Emulator6502 {
            cpu: Cpu::new(FlatMemory::new()),
            program_start: 0x0000,
            program_end: 0x0000,
        }
    }

    /// Copy a program into memory, point the reset vector at it and set PC
    pub fn load_program(&mut self, program: &[u8], start_addr: u16) {
        let memory = self.cpu.memory_mut();
        memory.load(start_addr, program);
        memory.write(0xFFFC, start_addr as u8);
        memory.write(0xFFFD, (start_addr >> 8) as u8);

        self.cpu.set_pc(start_addr);
        self.program_start = start_addr;
        self.program_end = start_addr.wrapping_add(program.len() as u16);
    }

    /// Reload PC from the reset vector. Memory and registers are kept.
    pub fn reset(&mut self) {
        self.cpu.set_quit(false);
        self.cpu.reset();
    }

    /// Execute a single instruction
    pub fn step(&mut self) -> Result<(), JsError> {
        self.cpu
            .step()
            .map_err(|e| JsError::new(&e.to_string()))
    }

    /// Execute up to `count` instructions and return how many ran
    pub fn run_instructions(&mut self, count: u32) -> Result<u32, JsError> {
        for executed in 0..count {
            if self.cpu.quit_requested() {
                return Ok(executed);
            }
            self.step()?;
        }
        Ok(count)
    }

    /// Trigger a maskable interrupt; false when masked by I
    pub fn irq(&mut self) -> bool {
        self.cpu.irq()
    }

    /// Trigger a non-maskable interrupt
    pub fn nmi(&mut self) {
        self.cpu.nmi();
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

    // Flag getters
    #[wasm_bindgen(getter)]
    pub fn flag_n(&self) -> bool {
        self.cpu.flag_n()
    }

    #[wasm_bindgen(getter)]
    pub fn flag_v(&self) -> bool {
        self.cpu.flag_v()
    }

    #[wasm_bindgen(getter)]
    pub fn flag_d(&self) -> bool {
        self.cpu.flag_d()
    }

    #[wasm_bindgen(getter)]
    pub fn flag_i(&self) -> bool {
        self.cpu.flag_i()
    }

    #[wasm_bindgen(getter)]
    pub fn flag_z(&self) -> bool {
        self.cpu.flag_z()
    }

    #[wasm_bindgen(getter)]
    pub fn flag_c(&self) -> bool {
        self.cpu.flag_c()
    }

    /// Set the program counter
    pub fn set_pc(&mut self, addr: u16) {
        self.cpu.set_pc(addr);
    }

    // Memory access methods

    /// Read a single byte from memory
    pub fn read_memory(&mut self, addr: u16) -> u8 {
        self.cpu.get_memory(addr)
    }

    /// Write a single byte to memory
    pub fn write_memory(&mut self, addr: u16, value: u8) {
        self.cpu.set_memory(addr, value);
    }

    /// Read a 256-byte page from memory (for efficient display)
    pub fn get_memory_page(&self, page: u8) -> Vec<u8> {
        let start = (page as usize) << 8;
        self.cpu.memory().as_slice()[start..start + 256].to_vec()
    }

    /// Trace line for the instruction at PC, registers included
    pub fn trace_line(&mut self) -> String {
        format_trace_line(&mut self.cpu)
    }

    /// Listing lines for `num_instructions` instructions starting at `start_addr`
    pub fn disassemble_at(&mut self, start_addr: u16, num_instructions: u32) -> js_sys::Array {
        let lines = js_sys::Array::new();
        let mut addr = start_addr;
        for _ in 0..num_instructions {
            let instr = decode(self.cpu.memory_mut(), addr);
            lines.push(&JsValue::from_str(&format_long(&instr)));
            addr = addr.wrapping_add(instr.size());
        }
        lines
    }

    /// Get the program start address
    #[wasm_bindgen(getter)]
    pub fn program_start(&self) -> u16 {
        self.program_start
    }

    /// Get the program end address
    #[wasm_bindgen(getter)]
    pub fn program_end(&self) -> u16 {
        self.program_end
    }
}

impl Default for Emulator6502 {
    fn default() -> Self {
        Self::new()
    }
}
