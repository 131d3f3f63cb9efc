//! Rigid coordinate mapping from the fixed display grid into the moving grid.
//!
//! # Algorithm
//!
//! With `p = [y, x]` a row vector in the downsampled fixed grid, the mapped
//! point in the downsampled moving grid is
//!
//! ```text
//! p' = (p - center - offset) · R + center
//! R  = [[cos θ, -sin θ],
//!       [sin θ,  cos θ]]
//! ```
//!
//! so rotation is always about `center`, and `offset` is removed before
//! rotating (it lives in the un-rotated moving frame).
//!
//! `center` and `offset` are floor-divided by the downsample factor before
//! use. This drops sub-downsample precision and can shift the apparent
//! rotation center by up to `downsample - 1` full-resolution pixels.

use crate::RigidTransform;

/// Row and column lookup coordinates for every pixel of a display grid.
#[derive(Debug, Clone, PartialEq)]
pub struct CoordinateMap {
    pub rows: usize,
    pub cols: usize,
    /// Moving-grid row coordinate for each display pixel, row-major.
    pub row_coords: Vec<f64>,
    /// Moving-grid column coordinate for each display pixel, row-major.
    pub col_coords: Vec<f64>,
}

impl CoordinateMap {
    /// Mapped `(row, col)` for display pixel `(row, col)`.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> (f64, f64) {
        let idx = row * self.cols + col;
        (self.row_coords[idx], self.col_coords[idx])
    }
}

/// The mapping `M(y, x) -> (y', x')` for one transform and downsample factor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RigidMapping {
    cos: f64,
    sin: f64,
    center: [f64; 2],
    offset: [f64; 2],
}

impl RigidMapping {
    /// Build the mapping. A downsample of zero is treated as one.
    pub fn new(transform: &RigidTransform, downsample: usize) -> Self {
        let ds = downsample.max(1) as i64;
        let theta = transform.angle_degrees.to_radians();

        // [row, col] order, i.e. [y, x]
        let center = [
            transform.center_y.div_euclid(ds) as f64,
            transform.center_x.div_euclid(ds) as f64,
        ];
        let offset = [
            transform.offset_y.div_euclid(ds) as f64,
            transform.offset_x.div_euclid(ds) as f64,
        ];

        Self {
            cos: theta.cos(),
            sin: theta.sin(),
            center,
            offset,
        }
    }

    /// Rotation matrix `[[cos θ, -sin θ], [sin θ, cos θ]]`.
    pub fn rotation_matrix(&self) -> [[f64; 2]; 2] {
        [[self.cos, -self.sin], [self.sin, self.cos]]
    }

    /// Center in the downsampled grid, `[row, col]`.
    pub fn center(&self) -> [f64; 2] {
        self.center
    }

    /// Offset in the downsampled grid, `[row, col]`.
    pub fn offset(&self) -> [f64; 2] {
        self.offset
    }

    /// Map one display pixel.
    #[inline]
    pub fn apply(&self, y: f64, x: f64) -> (f64, f64) {
        let dy = y - self.center[0] - self.offset[0];
        let dx = x - self.center[1] - self.offset[1];
        // Row vector times R
        let ty = dy * self.cos + dx * self.sin;
        let tx = -dy * self.sin + dx * self.cos;
        (ty + self.center[0], tx + self.center[1])
    }

    /// Map every pixel of a `rows x cols` display grid.
    pub fn grid(&self, rows: usize, cols: usize) -> CoordinateMap {
        let mut row_coords = Vec::with_capacity(rows * cols);
        let mut col_coords = Vec::with_capacity(rows * cols);
        for y in 0..rows {
            for x in 0..cols {
                let (ty, tx) = self.apply(y as f64, x as f64);
                row_coords.push(ty);
                col_coords.push(tx);
            }
        }
        CoordinateMap {
            rows,
            cols,
            row_coords,
            col_coords,
        }
    }
}

/// Coordinate arrays mapping a `rows x cols` fixed display grid into the
/// moving grid for `transform` at `downsample`.
pub fn build_coordinate_map(
    transform: &RigidTransform,
    downsample: usize,
    rows: usize,
    cols: usize,
) -> CoordinateMap {
    RigidMapping::new(transform, downsample).grid(rows, cols)
}
