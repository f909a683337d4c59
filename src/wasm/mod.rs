//! WebAssembly bindings for the lib740 engine.
//!
//! This module provides JavaScript-callable interfaces to the 740 core,
//! enabling browser-based execution and inspection of M50740 ROM images.

#[cfg(feature = "wasm")]
pub mod api;

#[cfg(feature = "wasm")]
pub use api::Emulator740;
