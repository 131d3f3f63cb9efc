//! Preview export for Rotate2D.
//!
//! This module provides functionality for:
//! - Quantizing normalized previews to 8-bit RGB
//! - Encoding previews to PNG
//!
//! # Examples
//!
//! ```ignore
//! use rotate2d_core::encode::encode_png;
//!
//! let rendering = session.render(Plane::XY)?;
//! let png_bytes = encode_png(&rendering.image)?;
//! println!("Encoded {} bytes", png_bytes.len());
//! ```

mod png;

pub use png::{encode_png, to_rgb8, to_rgb_image, EncodeError};
