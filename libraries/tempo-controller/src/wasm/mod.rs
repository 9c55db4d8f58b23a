//! WASM bindings for tempo-controller
//!
//! Exposes the controller to a browser host. Events go in as plain JS
//! objects, effects and view models come back the same way.

#[cfg(feature = "wasm")]
pub mod manager;

#[cfg(feature = "wasm")]
pub use manager::WasmController;
