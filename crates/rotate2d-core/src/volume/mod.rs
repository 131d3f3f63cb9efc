//! Volume access for the alignment engine.
//!
//! Volumes are owned by whatever loaded them (a chunked on-disk reader, a
//! browser buffer, a test fixture). The engine only needs two things from
//! them: their extents and the ability to read a strided sub-block.
//!
//! # Layout
//!
//! Axes are ordered (X, Y, Z). Blocks returned by [`Volume::read_block`]
//! are x-major: the element at block position `(x, y, z)` lives at
//! `(x * ny + y) * nz + z`.

mod memory;
mod slice;

pub use memory::InMemoryVolume;
pub use slice::{Axis, ScalarImage};

use crate::error::Result;

/// Extents of a volume along (X, Y, Z).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub struct VolumeShape {
    pub x: usize,
    pub y: usize,
    pub z: usize,
}

impl VolumeShape {
    pub fn new(x: usize, y: usize, z: usize) -> Self {
        Self { x, y, z }
    }

    /// Total number of voxels, or `None` if it doesn't fit in `usize`.
    pub fn checked_len(&self) -> Option<usize> {
        self.x.checked_mul(self.y)?.checked_mul(self.z)
    }

    /// Total number of voxels, saturating at `usize::MAX`.
    pub fn len(&self) -> usize {
        self.checked_len().unwrap_or(usize::MAX)
    }

    /// Check if any extent is zero.
    pub fn is_empty(&self) -> bool {
        self.x == 0 || self.y == 0 || self.z == 0
    }

    /// Element-wise minimum of two shapes.
    pub fn min(&self, other: &VolumeShape) -> VolumeShape {
        VolumeShape {
            x: self.x.min(other.x),
            y: self.y.min(other.y),
            z: self.z.min(other.z),
        }
    }
}

/// A half-open, strided index range along one axis: every `step`-th index
/// in `[start, stop)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AxisRange {
    pub start: usize,
    pub stop: usize,
    pub step: usize,
}

impl AxisRange {
    /// Strided range. A step of zero is treated as one.
    pub fn new(start: usize, stop: usize, step: usize) -> Self {
        Self {
            start,
            stop,
            step: step.max(1),
        }
    }

    /// Every `step`-th index in `[0, stop)`.
    pub fn strided(stop: usize, step: usize) -> Self {
        Self::new(0, stop, step)
    }

    /// A single index.
    pub fn index(i: usize) -> Self {
        Self::new(i, i + 1, 1)
    }

    /// Number of indices selected.
    pub fn len(&self) -> usize {
        if self.stop <= self.start {
            0
        } else {
            (self.stop - self.start).div_ceil(self.step)
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterate the selected indices in order.
    pub fn iter(&self) -> impl Iterator<Item = usize> {
        (self.start..self.stop.max(self.start)).step_by(self.step)
    }
}

/// A dense block read from a volume, x-major.
#[derive(Debug, Clone, PartialEq)]
pub struct VolumeBlock {
    pub shape: VolumeShape,
    pub data: Vec<f32>,
}

impl VolumeBlock {
    /// Value at block position `(x, y, z)`.
    #[inline]
    pub fn get(&self, x: usize, y: usize, z: usize) -> f32 {
        self.data[(x * self.shape.y + y) * self.shape.z + z]
    }
}

/// Read-only access to a 3D scalar volume.
///
/// Implementations must honour step slicing exactly: a range with step `n`
/// selects every `n`-th element starting at `start`.
pub trait Volume {
    /// Extents along (X, Y, Z).
    fn shape(&self) -> VolumeShape;

    /// Read the block selected by one range per axis.
    ///
    /// Ranges extending past the volume are an error
    /// ([`crate::AlignError::MalformedVolumeSource`] or
    /// [`crate::AlignError::IndexOutOfRange`] depending on the backend).
    fn read_block(&self, x: AxisRange, y: AxisRange, z: AxisRange) -> Result<VolumeBlock>;
}

impl<V: Volume + ?Sized> Volume for &V {
    fn shape(&self) -> VolumeShape {
        (**self).shape()
    }

    fn read_block(&self, x: AxisRange, y: AxisRange, z: AxisRange) -> Result<VolumeBlock> {
        (**self).read_block(x, y, z)
    }
}

impl<V: Volume + ?Sized> Volume for Box<V> {
    fn shape(&self) -> VolumeShape {
        (**self).shape()
    }

    fn read_block(&self, x: AxisRange, y: AxisRange, z: AxisRange) -> Result<VolumeBlock> {
        (**self).read_block(x, y, z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axis_range_len() {
        assert_eq!(AxisRange::strided(10, 1).len(), 10);
        assert_eq!(AxisRange::strided(10, 3).len(), 4); // 0, 3, 6, 9
        assert_eq!(AxisRange::strided(9, 3).len(), 3); // 0, 3, 6
        assert_eq!(AxisRange::index(7).len(), 1);
        assert_eq!(AxisRange::new(5, 5, 2).len(), 0);
        assert_eq!(AxisRange::new(6, 5, 1).len(), 0);
    }

    #[test]
    fn test_axis_range_iter_matches_len() {
        for step in 1..6 {
            let range = AxisRange::new(2, 17, step);
            let indices: Vec<usize> = range.iter().collect();
            assert_eq!(indices.len(), range.len());
            assert_eq!(indices[0], 2);
            assert!(indices.windows(2).all(|w| w[1] - w[0] == step));
        }
    }

    #[test]
    fn test_zero_step_is_one() {
        let range = AxisRange::new(0, 4, 0);
        assert_eq!(range.step, 1);
        assert_eq!(range.len(), 4);
    }

    #[test]
    fn test_shape_min() {
        let a = VolumeShape::new(100, 100, 10);
        let b = VolumeShape::new(80, 100, 20);
        assert_eq!(a.min(&b), VolumeShape::new(80, 100, 10));
        assert_eq!(a.len(), 100_000);
        assert!(!a.is_empty());
        assert!(VolumeShape::new(0, 4, 4).is_empty());
    }

    #[test]
    fn test_shape_len_overflow() {
        let huge = VolumeShape::new(1 << 32, (1 << 32) + 1, 1);
        assert_eq!(huge.checked_len(), None);
        assert_eq!(huge.len(), usize::MAX);
        assert!(!huge.is_empty());
        assert_eq!(VolumeShape::new(usize::MAX, 0, 2).checked_len(), Some(0));
        assert!(VolumeShape::new(usize::MAX, 0, 2).is_empty());
    }
}
