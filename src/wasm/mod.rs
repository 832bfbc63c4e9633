//! WebAssembly bindings for the emu6502 interpreter.
//!
//! Exposes a flat-memory machine to JavaScript so programs can be loaded,
//! stepped and inspected from a browser.

#[cfg(feature = "wasm")]
pub mod api;

#[cfg(feature = "wasm")]
pub use api::Emulator6502;
