//! Rigid in-plane transform and resampling.
//!
//! This module turns a [`RigidTransform`](crate::RigidTransform) into a
//! per-pixel coordinate lookup and samples a plane at those coordinates.
//!
//! # Transform Order
//!
//! When previewing the XY plane, the moving slice goes through:
//! 1. Flips (left/right, then up/down)
//! 2. Offset (in the un-rotated moving frame)
//! 3. Rotation about the center
//! 4. Interpolated lookup
//!
//! # Coordinate System
//!
//! - Coordinates are `(row, col)` = `(y, x)` in the downsampled grid
//! - Angles are in degrees
//! - Origin is the first sample of the plane

mod interpolate;
mod rigid;

pub use interpolate::{map_coordinates, InterpolationOrder};
pub use rigid::{build_coordinate_map, CoordinateMap, RigidMapping};
