//! View rendering: XY resampling and orthogonal cross-sections.
//!
//! Every renderer returns a [`Rendering`]: a normalized RGB composite (red =
//! fixed, green = moving, blue = 0), axis ticks in full-resolution units
//! and, for cross-sections, the z marker lines.
//!
//! # Views
//!
//! - [`render_xy`] - moving slice flipped, offset and rotated onto the fixed slice
//! - [`render_xz`] - cross-section at the fixed Y midpoint, no transform
//! - [`render_yz`] - cross-section at the fixed X midpoint, no transform
//!
//! Renders are synchronous and keep no state between calls.

mod orthogonal;
mod types;
mod xy;

pub use orthogonal::{render_xz, render_yz};
pub use types::{MarkerLine, MarkerSource, Plane, PreviewImage, Rendering, ViewRequest};
pub use xy::{apply_flips, composite_xy, render_xy};

use crate::error::Result;
use crate::volume::Volume;
use crate::{RenderConfig, RigidTransform};

/// Render the plane named by `request.plane`.
///
/// `transform` is only used for [`Plane::XY`].
pub fn render_view<F, M>(
    fixed: &F,
    moving: &M,
    request: &ViewRequest,
    transform: &RigidTransform,
    config: &RenderConfig,
) -> Result<Rendering>
where
    F: Volume + ?Sized,
    M: Volume + ?Sized,
{
    match request.plane {
        Plane::XY => render_xy(fixed, moving, request, transform, config),
        Plane::XZ => render_xz(fixed, moving, request, config),
        Plane::YZ => render_yz(fixed, moving, request, config),
    }
}
