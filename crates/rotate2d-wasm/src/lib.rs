//! Rotate2D WASM - WebAssembly bindings for Rotate2D
//!
//! This crate provides WASM bindings to expose the rotate2d-core alignment
//! engine to the browser front end.
//!
//! # Module Structure
//!
//! - `types` - WASM-compatible wrappers for volumes and renderings
//! - `session` - Alignment session (transform controls, view selection, rendering)
//! - `params` - Parameter file conversion between JSON text and JS objects
//!
//! # Usage
//!
//! ```typescript
//! import init, { JsAlignmentSession, JsVolume } from '@rotate2d/wasm';
//!
//! await init();
//!
//! const session = new JsAlignmentSession();
//! session.set_fixed(new JsVolume(x, y, z, fixedVoxels));
//! session.set_moving(new JsVolume(x, y, z, movingVoxels));
//! for (const panel of session.render_layout()) {
//!   draw(panel);
//!   panel.free();
//! }
//! ```

use wasm_bindgen::prelude::*;

mod params;
mod session;
mod types;

// Re-export public types
pub use params::{params_from_json, params_to_json};
pub use session::JsAlignmentSession;
pub use types::{JsRendering, JsVolume};

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
