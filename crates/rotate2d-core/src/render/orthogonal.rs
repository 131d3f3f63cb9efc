//! Orthogonal cross-sections (XZ and YZ) for coarse inspection.
//!
//! These views overlay the two volumes pixel-for-pixel. The rigid transform
//! is not applied here; it only governs the in-plane XY alignment.
//!
//! Both volumes are clipped to their element-wise minimum extent on the
//! displayed axes, so volumes of different sizes never index out of bounds.
//! The hidden axis is cut at the floor midpoint of the fixed volume.

use tracing::debug;

use super::types::{MarkerLine, MarkerSource, Plane, PreviewImage, Rendering, ViewRequest};
use crate::error::{AlignError, Result, VolumeRole};
use crate::normalize::normalize_display;
use crate::ticks::{axis_ticks, AxisDirection};
use crate::volume::{Axis, AxisRange, ScalarImage, Volume, VolumeShape};
use crate::RenderConfig;

/// Cross-section plane orthogonal to XY.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    /// Fixed y, rows = z, columns = x.
    XZ,
    /// Fixed x, rows = y, columns = z.
    YZ,
}

impl Section {
    fn plane(self) -> Plane {
        match self {
            Section::XZ => Plane::XZ,
            Section::YZ => Plane::YZ,
        }
    }

    /// Axis held constant, and its label.
    fn hidden_axis(self) -> (Axis, char) {
        match self {
            Section::XZ => (Axis::Y, 'y'),
            Section::YZ => (Axis::X, 'x'),
        }
    }

    fn read<V: Volume + ?Sized>(
        self,
        volume: &V,
        clip: &VolumeShape,
        index: usize,
        ds: usize,
    ) -> Result<ScalarImage> {
        match self {
            Section::XZ => {
                let block = volume.read_block(
                    AxisRange::strided(clip.x, ds),
                    AxisRange::index(index),
                    AxisRange::strided(clip.z, ds),
                )?;
                Ok(ScalarImage::from_block(&block, Axis::Z, Axis::X))
            }
            Section::YZ => {
                let block = volume.read_block(
                    AxisRange::index(index),
                    AxisRange::strided(clip.y, ds),
                    AxisRange::strided(clip.z, ds),
                )?;
                Ok(ScalarImage::from_block(&block, Axis::Y, Axis::Z))
            }
        }
    }

    /// Marker line at downsampled depth `z`.
    fn marker(self, source: MarkerSource, z: usize, clip: &VolumeShape, ds: usize) -> MarkerLine {
        let z = (z / ds) as f64;
        match self {
            Section::XZ => MarkerLine {
                source,
                start: (0.0, z),
                end: ((clip.x / ds) as f64, z),
            },
            Section::YZ => MarkerLine {
                source,
                start: (z, 0.0),
                end: (z, (clip.y / ds) as f64),
            },
        }
    }

    /// Full-resolution lengths of the (horizontal, vertical) display axes.
    fn axis_lengths(self, clip: &VolumeShape) -> (usize, usize) {
        match self {
            Section::XZ => (clip.x, clip.z),
            Section::YZ => (clip.z, clip.y),
        }
    }
}

fn render_section<F, M>(
    section: Section,
    fixed: &F,
    moving: &M,
    request: &ViewRequest,
    config: &RenderConfig,
) -> Result<Rendering>
where
    F: Volume + ?Sized,
    M: Volume + ?Sized,
{
    let (fixed_shape, moving_shape) = (fixed.shape(), moving.shape());
    request.validate(&fixed_shape, &moving_shape)?;
    let ds = request.downsample;

    let (hidden, axis) = section.hidden_axis();
    let index = hidden.extent(&fixed_shape) / 2;
    let moving_extent = hidden.extent(&moving_shape);
    if index >= moving_extent {
        return Err(AlignError::IndexOutOfRange {
            role: VolumeRole::Moving,
            axis,
            index,
            extent: moving_extent,
        });
    }

    let clip = fixed_shape.min(&moving_shape);
    let fixed_slice = section.read(fixed, &clip, index, ds)?;
    let moving_slice = section.read(moving, &clip, index, ds)?;

    debug!(
        plane = ?section.plane(),
        index,
        rows = fixed_slice.rows,
        cols = fixed_slice.cols,
        downsample = ds,
        "compositing cross-section"
    );

    let mut image = PreviewImage::composite(&fixed_slice, &moving_slice);
    normalize_display(&mut image.data, config.display_quantile);

    let markers = vec![
        section.marker(MarkerSource::Fixed, request.fixed_z, &clip, ds),
        section.marker(MarkerSource::Moving, request.moving_z, &clip, ds),
    ];

    let (x_len, y_len) = section.axis_lengths(&clip);
    Ok(Rendering {
        plane: section.plane(),
        image,
        markers,
        x_ticks: axis_ticks(x_len, ds, config.tick_count, AxisDirection::Ascending),
        y_ticks: axis_ticks(y_len, ds, config.tick_count, AxisDirection::Descending),
    })
}

/// Render the XZ cross-section at the fixed volume's Y midpoint.
///
/// Rows are z, columns are x. Markers are horizontal lines at the fixed and
/// moving z indices.
pub fn render_xz<F, M>(
    fixed: &F,
    moving: &M,
    request: &ViewRequest,
    config: &RenderConfig,
) -> Result<Rendering>
where
    F: Volume + ?Sized,
    M: Volume + ?Sized,
{
    render_section(Section::XZ, fixed, moving, request, config)
}

/// Render the YZ cross-section at the fixed volume's X midpoint.
///
/// Rows are y, columns are z. Markers are vertical lines at the fixed and
/// moving z indices.
pub fn render_yz<F, M>(
    fixed: &F,
    moving: &M,
    request: &ViewRequest,
    config: &RenderConfig,
) -> Result<Rendering>
where
    F: Volume + ?Sized,
    M: Volume + ?Sized,
{
    render_section(Section::YZ, fixed, moving, request, config)
}
