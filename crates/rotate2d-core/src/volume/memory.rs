//! In-memory volume backend.

use super::{AxisRange, Volume, VolumeBlock, VolumeShape};
use crate::error::{AlignError, Result};

/// A volume held entirely in memory as a flat x-major `f32` buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct InMemoryVolume {
    shape: VolumeShape,
    data: Vec<f32>,
}

impl InMemoryVolume {
    /// Wrap a flat buffer of `shape.x * shape.y * shape.z` values.
    ///
    /// # Errors
    ///
    /// Returns [`AlignError::MalformedVolumeSource`] if the buffer length
    /// doesn't match the shape, the shape has a zero extent or its voxel
    /// count overflows `usize`. Nothing is retained on failure.
    pub fn new(shape: VolumeShape, data: Vec<f32>) -> Result<Self> {
        let expected = voxel_count(&shape)?;
        if data.len() != expected {
            return Err(AlignError::MalformedVolumeSource(format!(
                "expected {} voxels for shape {}x{}x{}, got {}",
                expected,
                shape.x,
                shape.y,
                shape.z,
                data.len()
            )));
        }
        Ok(Self { shape, data })
    }

    /// Build a volume by evaluating `f(x, y, z)` at every voxel.
    ///
    /// # Errors
    ///
    /// Same shape checks as [`InMemoryVolume::new`].
    pub fn from_fn(
        shape: VolumeShape,
        mut f: impl FnMut(usize, usize, usize) -> f32,
    ) -> Result<Self> {
        let mut data = Vec::with_capacity(voxel_count(&shape)?);
        for x in 0..shape.x {
            for y in 0..shape.y {
                for z in 0..shape.z {
                    data.push(f(x, y, z));
                }
            }
        }
        Ok(Self { shape, data })
    }

    /// Voxel value at `(x, y, z)`.
    #[inline]
    pub fn get(&self, x: usize, y: usize, z: usize) -> f32 {
        self.data[(x * self.shape.y + y) * self.shape.z + z]
    }

    /// Raw x-major buffer.
    pub fn data(&self) -> &[f32] {
        &self.data
    }
}

fn voxel_count(shape: &VolumeShape) -> Result<usize> {
    if shape.is_empty() {
        return Err(AlignError::MalformedVolumeSource(format!(
            "volume shape {}x{}x{} has a zero extent",
            shape.x, shape.y, shape.z
        )));
    }
    shape.checked_len().ok_or_else(|| {
        AlignError::MalformedVolumeSource(format!(
            "volume shape {}x{}x{} is too large to address",
            shape.x, shape.y, shape.z
        ))
    })
}

fn check_range(range: &AxisRange, extent: usize, axis: char) -> Result<()> {
    if !range.is_empty() && range.stop > extent {
        return Err(AlignError::MalformedVolumeSource(format!(
            "{axis} range {}..{} exceeds extent {extent}",
            range.start, range.stop
        )));
    }
    Ok(())
}

impl Volume for InMemoryVolume {
    fn shape(&self) -> VolumeShape {
        self.shape
    }

    fn read_block(&self, x: AxisRange, y: AxisRange, z: AxisRange) -> Result<VolumeBlock> {
        check_range(&x, self.shape.x, 'x')?;
        check_range(&y, self.shape.y, 'y')?;
        check_range(&z, self.shape.z, 'z')?;

        let shape = VolumeShape::new(x.len(), y.len(), z.len());
        let mut data = Vec::with_capacity(shape.len());
        for xi in x.iter() {
            for yi in y.iter() {
                for zi in z.iter() {
                    data.push(self.get(xi, yi, zi));
                }
            }
        }

        Ok(VolumeBlock { shape, data })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp(shape: VolumeShape) -> InMemoryVolume {
        InMemoryVolume::from_fn(shape, |x, y, z| (x * 10_000 + y * 100 + z) as f32).unwrap()
    }

    #[test]
    fn test_new_rejects_oversize_shape() {
        // Voxel count wraps to a small number if multiplied unchecked
        let shape = VolumeShape::new(1 << 32, (1 << 32) + 1, 1);
        let result = InMemoryVolume::new(shape, vec![0.0; 4]);
        assert!(matches!(result, Err(AlignError::MalformedVolumeSource(_))));
    }

    #[test]
    fn test_from_fn_rejects_bad_shapes() {
        let oversize = VolumeShape::new(usize::MAX, 2, 1);
        assert!(matches!(
            InMemoryVolume::from_fn(oversize, |_, _, _| 0.0),
            Err(AlignError::MalformedVolumeSource(_))
        ));
        assert!(matches!(
            InMemoryVolume::from_fn(VolumeShape::new(3, 0, 3), |_, _, _| 0.0),
            Err(AlignError::MalformedVolumeSource(_))
        ));
    }

    #[test]
    fn test_new_rejects_length_mismatch() {
        let result = InMemoryVolume::new(VolumeShape::new(2, 2, 2), vec![0.0; 7]);
        assert!(matches!(result, Err(AlignError::MalformedVolumeSource(_))));
    }

    #[test]
    fn test_new_rejects_empty_shape() {
        let result = InMemoryVolume::new(VolumeShape::new(0, 2, 2), vec![]);
        assert!(matches!(result, Err(AlignError::MalformedVolumeSource(_))));
    }

    #[test]
    fn test_new_accepts_matching_buffer() {
        let vol = InMemoryVolume::new(VolumeShape::new(2, 3, 4), vec![1.5; 24]).unwrap();
        assert_eq!(vol.shape(), VolumeShape::new(2, 3, 4));
        assert_eq!(vol.data().len(), 24);
    }

    #[test]
    fn test_read_block_strided() {
        let vol = ramp(VolumeShape::new(10, 8, 5));
        let block = vol
            .read_block(
                AxisRange::strided(10, 3),
                AxisRange::strided(8, 2),
                AxisRange::index(4),
            )
            .unwrap();

        assert_eq!(block.shape, VolumeShape::new(4, 4, 1));
        assert_eq!(block.get(0, 0, 0), 4.0);
        assert_eq!(block.get(1, 0, 0), 30_004.0);
        assert_eq!(block.get(3, 3, 0), 90_604.0);
    }

    #[test]
    fn test_read_block_out_of_bounds() {
        let vol = ramp(VolumeShape::new(4, 4, 4));
        let result = vol.read_block(
            AxisRange::strided(4, 1),
            AxisRange::strided(4, 1),
            AxisRange::index(4),
        );
        assert!(matches!(result, Err(AlignError::MalformedVolumeSource(_))));
    }
}
