//! 2D scalar planes cut from a volume.

use super::{VolumeBlock, VolumeShape};

/// Volume axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }

    /// Extent of this axis in `shape`.
    pub fn extent(self, shape: &VolumeShape) -> usize {
        match self {
            Axis::X => shape.x,
            Axis::Y => shape.y,
            Axis::Z => shape.z,
        }
    }
}

/// A single-channel 2D image in row-major order.
#[derive(Debug, Clone, PartialEq)]
pub struct ScalarImage {
    pub rows: usize,
    pub cols: usize,
    pub data: Vec<f32>,
}

impl ScalarImage {
    pub fn new(rows: usize, cols: usize, data: Vec<f32>) -> Self {
        debug_assert_eq!(data.len(), rows * cols, "Scalar image size mismatch");
        Self { rows, cols, data }
    }

    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self::new(rows, cols, vec![0.0; rows * cols])
    }

    /// Lay out a block that is one element thick along its third axis as a
    /// plane with `row_axis` running down and `col_axis` running across.
    pub fn from_block(block: &VolumeBlock, row_axis: Axis, col_axis: Axis) -> Self {
        debug_assert_ne!(row_axis, col_axis);
        let rows = row_axis.extent(&block.shape);
        let cols = col_axis.extent(&block.shape);
        let mut data = Vec::with_capacity(rows * cols);
        let mut pos = [0usize; 3];
        for r in 0..rows {
            pos[row_axis.index()] = r;
            for c in 0..cols {
                pos[col_axis.index()] = c;
                data.push(block.get(pos[0], pos[1], pos[2]));
            }
        }
        Self::new(rows, cols, data)
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f32 {
        self.data[row * self.cols + col]
    }

    pub fn is_empty(&self) -> bool {
        self.rows == 0 || self.cols == 0
    }

    /// Mirror columns (left/right).
    pub fn flip_lr(&self) -> Self {
        let mut data = Vec::with_capacity(self.data.len());
        for row in self.data.chunks_exact(self.cols.max(1)) {
            data.extend(row.iter().rev());
        }
        Self::new(self.rows, self.cols, data)
    }

    /// Mirror rows (up/down).
    pub fn flip_ud(&self) -> Self {
        let mut data = Vec::with_capacity(self.data.len());
        for row in self.data.chunks_exact(self.cols.max(1)).rev() {
            data.extend_from_slice(row);
        }
        Self::new(self.rows, self.cols, data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbered(rows: usize, cols: usize) -> ScalarImage {
        ScalarImage::new(rows, cols, (0..rows * cols).map(|i| i as f32).collect())
    }

    #[test]
    fn test_from_block_transposes_xy() {
        // Block of shape (x=3, y=2, z=1): value = 10x + y
        let block = VolumeBlock {
            shape: VolumeShape::new(3, 2, 1),
            data: vec![0.0, 1.0, 10.0, 11.0, 20.0, 21.0],
        };
        let plane = ScalarImage::from_block(&block, Axis::Y, Axis::X);
        assert_eq!(plane.rows, 2);
        assert_eq!(plane.cols, 3);
        assert_eq!(plane.get(0, 2), 20.0);
        assert_eq!(plane.get(1, 0), 1.0);
    }

    #[test]
    fn test_flip_lr() {
        let img = numbered(2, 3);
        let flipped = img.flip_lr();
        assert_eq!(flipped.data, vec![2.0, 1.0, 0.0, 5.0, 4.0, 3.0]);
    }

    #[test]
    fn test_flip_ud() {
        let img = numbered(2, 3);
        let flipped = img.flip_ud();
        assert_eq!(flipped.data, vec![3.0, 4.0, 5.0, 0.0, 1.0, 2.0]);
    }

    #[test]
    fn test_flip_on_empty_image() {
        let img = ScalarImage::zeros(0, 0);
        assert!(img.flip_lr().is_empty());
        assert!(img.flip_ud().is_empty());
    }
}
