//! Decorative 3D particle field for a web page background.
//!
//! `scene` holds all simulation state and compiles anywhere; the browser
//! side (DOM, WebGPU, listeners, frame loop) is wasm32-only.

pub mod scene;

#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg(target_arch = "wasm32")]
mod events;
#[cfg(target_arch = "wasm32")]
mod frame;
#[cfg(target_arch = "wasm32")]
mod handle;
#[cfg(target_arch = "wasm32")]
mod render;

#[cfg(target_arch = "wasm32")]
pub use handle::{mount, start, FieldHandle};
