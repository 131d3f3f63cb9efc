//! Types shared by the plane renderers.

use serde::{Deserialize, Serialize};

use crate::error::{AlignError, Result, VolumeRole};
use crate::ticks::TickSet;
use crate::volume::{ScalarImage, VolumeShape};

/// Plane shown by a view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Plane {
    /// In-plane view at a chosen z. The only view the rigid transform applies to.
    #[default]
    XY,
    /// Cross-section at the Y midpoint; rows are z, columns are x.
    XZ,
    /// Cross-section at the X midpoint; rows are y, columns are z.
    YZ,
}

/// What to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewRequest {
    pub plane: Plane,
    /// Stride applied to both displayed axes. At least 1.
    pub downsample: usize,
    /// Z index into the fixed volume.
    pub fixed_z: usize,
    /// Z index into the moving volume.
    pub moving_z: usize,
}

impl Default for ViewRequest {
    fn default() -> Self {
        Self {
            plane: Plane::XY,
            downsample: 1,
            fixed_z: 0,
            moving_z: 0,
        }
    }
}

impl ViewRequest {
    /// Check the request against the two volume shapes.
    ///
    /// # Errors
    ///
    /// - [`AlignError::InvalidDownsample`] for a downsample of zero
    /// - [`AlignError::IndexOutOfRange`] if a z index is outside its volume
    pub fn validate(&self, fixed: &VolumeShape, moving: &VolumeShape) -> Result<()> {
        if self.downsample == 0 {
            return Err(AlignError::InvalidDownsample(self.downsample));
        }
        if self.fixed_z >= fixed.z {
            return Err(AlignError::IndexOutOfRange {
                role: VolumeRole::Fixed,
                axis: 'z',
                index: self.fixed_z,
                extent: fixed.z,
            });
        }
        if self.moving_z >= moving.z {
            return Err(AlignError::IndexOutOfRange {
                role: VolumeRole::Moving,
                axis: 'z',
                index: self.moving_z,
                extent: moving.z,
            });
        }
        Ok(())
    }
}

/// A three-channel float image, interleaved RGB, row-major.
///
/// Red carries the fixed volume, green the (resampled) moving volume and
/// blue is always zero.
#[derive(Debug, Clone, PartialEq)]
pub struct PreviewImage {
    pub width: usize,
    pub height: usize,
    /// Length is `width * height * 3`.
    pub data: Vec<f32>,
}

impl PreviewImage {
    /// Composite two equally sized planes into red and green.
    pub fn composite(fixed: &ScalarImage, moving: &ScalarImage) -> Self {
        debug_assert_eq!(
            (fixed.rows, fixed.cols),
            (moving.rows, moving.cols),
            "Composite planes must match"
        );
        let mut data = Vec::with_capacity(fixed.data.len() * 3);
        for (&r, &g) in fixed.data.iter().zip(&moving.data) {
            data.extend_from_slice(&[r, g, 0.0]);
        }
        Self {
            width: fixed.cols,
            height: fixed.rows,
            data,
        }
    }

    /// RGB values at `(row, col)`.
    #[inline]
    pub fn pixel(&self, row: usize, col: usize) -> [f32; 3] {
        let idx = (row * self.width + col) * 3;
        [self.data[idx], self.data[idx + 1], self.data[idx + 2]]
    }

    /// One channel (0 = red, 1 = green, 2 = blue) as a plane.
    pub fn channel(&self, channel: usize) -> ScalarImage {
        let data = self.data.iter().skip(channel).step_by(3).copied().collect();
        ScalarImage::new(self.height, self.width, data)
    }

    pub fn pixel_count(&self) -> usize {
        self.width * self.height
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Which z index a marker line shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarkerSource {
    Fixed,
    Moving,
}

/// A straight line overlay in display coordinates (`x` = column, `y` = row).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarkerLine {
    pub source: MarkerSource,
    pub start: (f64, f64),
    pub end: (f64, f64),
}

/// A finished view, ready for display.
#[derive(Debug, Clone, PartialEq)]
pub struct Rendering {
    pub plane: Plane,
    /// Normalized to `[0, 1]`.
    pub image: PreviewImage,
    /// Empty for the XY view.
    pub markers: Vec<MarkerLine>,
    pub x_ticks: TickSet,
    pub y_ticks: TickSet,
}
