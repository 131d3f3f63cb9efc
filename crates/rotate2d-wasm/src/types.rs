//! WASM-compatible wrapper types for volumes and renderings.
//!
//! This module provides JavaScript-friendly types that wrap the core Rotate2D
//! types, handling the conversion between Rust and JavaScript data
//! representations.

use rotate2d_core::encode;
use rotate2d_core::render::{MarkerSource, Plane, Rendering};
use rotate2d_core::ticks::TickSet;
use rotate2d_core::{InMemoryVolume, Volume, VolumeShape};
use wasm_bindgen::prelude::*;

/// A volume held in WASM memory.
///
/// The browser loader reads the on-disk volume and hands its voxels over as a
/// flat `Float32Array` in x-major order (`index = (x * Y + y) * Z + z`).
///
/// # Memory Management
///
/// Attaching a volume to a session copies it. Call `free()` afterwards to
/// release this copy early, or let wasm-bindgen's finalizer handle it.
#[wasm_bindgen]
pub struct JsVolume {
    inner: InMemoryVolume,
}

#[wasm_bindgen]
impl JsVolume {
    /// Create a volume from extents and voxel data.
    ///
    /// # Errors
    /// Returns error if the data length doesn't match `x * y * z` or an
    /// extent is zero.
    #[wasm_bindgen(constructor)]
    pub fn new(x: u32, y: u32, z: u32, data: Vec<f32>) -> Result<JsVolume, JsValue> {
        Self::build(x, y, z, data).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Extent along X
    #[wasm_bindgen(getter)]
    pub fn x(&self) -> u32 {
        self.inner.shape().x as u32
    }

    /// Extent along Y
    #[wasm_bindgen(getter)]
    pub fn y(&self) -> u32 {
        self.inner.shape().y as u32
    }

    /// Extent along Z
    #[wasm_bindgen(getter)]
    pub fn z(&self) -> u32 {
        self.inner.shape().z as u32
    }

    /// Explicitly free WASM memory.
    pub fn free(self) {
        // Dropping self releases the memory
    }
}

impl JsVolume {
    pub(crate) fn build(
        x: u32,
        y: u32,
        z: u32,
        data: Vec<f32>,
    ) -> rotate2d_core::Result<JsVolume> {
        let shape = VolumeShape::new(x as usize, y as usize, z as usize);
        InMemoryVolume::new(shape, data).map(|inner| JsVolume { inner })
    }

    pub(crate) fn to_volume(&self) -> InMemoryVolume {
        self.inner.clone()
    }
}

/// A finished view for the canvas layer.
///
/// Pixels are normalized RGB floats in `[0, 1]`, three per pixel, row-major.
#[wasm_bindgen]
pub struct JsRendering {
    inner: Rendering,
}

#[wasm_bindgen]
impl JsRendering {
    /// Plane code: 0 = XY, 1 = XZ, 2 = YZ
    #[wasm_bindgen(getter)]
    pub fn plane(&self) -> u8 {
        plane_to_u8(self.inner.plane)
    }

    /// Width in display pixels
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.inner.image.width as u32
    }

    /// Height in display pixels
    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.inner.image.height as u32
    }

    /// Returns RGB values as Float32Array.
    ///
    /// Note: This creates a copy of the pixel data.
    pub fn pixels(&self) -> Vec<f32> {
        self.inner.image.data.clone()
    }

    /// Returns RGBA bytes ready for `ImageData`.
    pub fn rgba(&self) -> Vec<u8> {
        let rgb = encode::to_rgb8(&self.inner.image);
        let mut rgba = Vec::with_capacity(rgb.len() / 3 * 4);
        for px in rgb.chunks_exact(3) {
            rgba.extend_from_slice(&[px[0], px[1], px[2], 255]);
        }
        rgba
    }

    /// Marker lines flattened as `[x0, y0, x1, y1]` per line.
    ///
    /// The fixed-volume marker comes first. Empty for the XY view.
    pub fn marker_coords(&self) -> Vec<f64> {
        self.inner
            .markers
            .iter()
            .flat_map(|m| [m.start.0, m.start.1, m.end.0, m.end.1])
            .collect()
    }

    /// Marker sources in the order of `marker_coords`: 0 = fixed, 1 = moving.
    pub fn marker_sources(&self) -> Vec<u8> {
        self.inner
            .markers
            .iter()
            .map(|m| match m.source {
                MarkerSource::Fixed => 0,
                MarkerSource::Moving => 1,
            })
            .collect()
    }

    /// Horizontal axis tick positions in display pixels.
    pub fn x_tick_positions(&self) -> Vec<f64> {
        self.inner.x_ticks.positions()
    }

    /// Horizontal axis tick labels in full-resolution pixels.
    pub fn x_tick_labels(&self) -> Vec<f64> {
        tick_labels(&self.inner.x_ticks)
    }

    /// Vertical axis tick positions in display pixels.
    pub fn y_tick_positions(&self) -> Vec<f64> {
        self.inner.y_ticks.positions()
    }

    /// Vertical axis tick labels in full-resolution pixels.
    pub fn y_tick_labels(&self) -> Vec<f64> {
        tick_labels(&self.inner.y_ticks)
    }

    /// Encode the preview as PNG bytes.
    pub fn to_png(&self) -> Result<Vec<u8>, JsValue> {
        encode::encode_png(&self.inner.image).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Explicitly free WASM memory.
    pub fn free(self) {
        // Dropping self releases the memory
    }
}

impl JsRendering {
    pub(crate) fn from_rendering(inner: Rendering) -> Self {
        Self { inner }
    }
}

fn tick_labels(ticks: &TickSet) -> Vec<f64> {
    ticks.labels().into_iter().map(|l| l as f64).collect()
}

/// Convert a u8 plane code to the core Plane enum.
///
/// Values:
/// - 0 = XY (rigid transform applied)
/// - 1 = XZ cross-section
/// - 2 = YZ cross-section
///
/// Any other value defaults to XY.
pub(crate) fn plane_from_u8(value: u8) -> Plane {
    match value {
        1 => Plane::XZ,
        2 => Plane::YZ,
        _ => Plane::XY,
    }
}

pub(crate) fn plane_to_u8(plane: Plane) -> u8 {
    match plane {
        Plane::XY => 0,
        Plane::XZ => 1,
        Plane::YZ => 2,
    }
}
