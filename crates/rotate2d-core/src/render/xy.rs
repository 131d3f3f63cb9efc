//! XY plane resampling: the moving slice warped into the fixed slice grid.

use tracing::debug;

use super::types::{Plane, PreviewImage, Rendering, ViewRequest};
use crate::error::Result;
use crate::normalize::normalize_display;
use crate::ticks::{axis_ticks, AxisDirection};
use crate::transform::{build_coordinate_map, map_coordinates};
use crate::volume::{Axis, AxisRange, ScalarImage, Volume};
use crate::{RenderConfig, RigidTransform};

/// Read `volume[::ds, ::ds, z]` as a plane with rows = y, columns = x.
fn read_xy_slice<V: Volume + ?Sized>(volume: &V, z: usize, downsample: usize) -> Result<ScalarImage> {
    let shape = volume.shape();
    let block = volume.read_block(
        AxisRange::strided(shape.x, downsample),
        AxisRange::strided(shape.y, downsample),
        AxisRange::index(z),
    )?;
    Ok(ScalarImage::from_block(&block, Axis::Y, Axis::X))
}

/// Apply the mirror flags to a moving slice (left/right first, then up/down).
pub fn apply_flips(slice: ScalarImage, transform: &RigidTransform) -> ScalarImage {
    let slice = if transform.flip_lr {
        slice.flip_lr()
    } else {
        slice
    };
    if transform.flip_ud {
        slice.flip_ud()
    } else {
        slice
    }
}

/// Build the raw XY composite, before display normalization.
///
/// The fixed slice at `fixed_z` becomes the red channel. The moving slice at
/// `moving_z` is flipped, warped by `transform` onto the fixed slice grid and
/// becomes the green channel.
///
/// # Errors
///
/// Returns an error if the request doesn't fit the volumes or a volume read
/// fails.
pub fn composite_xy<F, M>(
    fixed: &F,
    moving: &M,
    request: &ViewRequest,
    transform: &RigidTransform,
    config: &RenderConfig,
) -> Result<PreviewImage>
where
    F: Volume + ?Sized,
    M: Volume + ?Sized,
{
    request.validate(&fixed.shape(), &moving.shape())?;
    let ds = request.downsample;

    let fixed_slice = read_xy_slice(fixed, request.fixed_z, ds)?;
    let moving_slice = apply_flips(read_xy_slice(moving, request.moving_z, ds)?, transform);

    debug!(
        rows = fixed_slice.rows,
        cols = fixed_slice.cols,
        downsample = ds,
        angle = transform.angle_degrees,
        "resampling XY plane"
    );

    let map = build_coordinate_map(transform, ds, fixed_slice.rows, fixed_slice.cols);
    let resampled = map_coordinates(&moving_slice, &map, config.interpolation);

    Ok(PreviewImage::composite(&fixed_slice, &resampled))
}

/// Render the XY view: composite, normalize and attach axis ticks.
///
/// X ticks cover the fixed volume's X extent (ascending) and Y ticks its
/// Y extent (descending).
pub fn render_xy<F, M>(
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
    let mut image = composite_xy(fixed, moving, request, transform, config)?;
    normalize_display(&mut image.data, config.display_quantile);

    let shape = fixed.shape();
    Ok(Rendering {
        plane: Plane::XY,
        image,
        markers: Vec::new(),
        x_ticks: axis_ticks(shape.x, request.downsample, config.tick_count, AxisDirection::Ascending),
        y_ticks: axis_ticks(shape.y, request.downsample, config.tick_count, AxisDirection::Descending),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AlignError;
    use crate::volume::{InMemoryVolume, VolumeShape};

    /// Smooth, non-degenerate test pattern that differs per z.
    fn pattern_volume(shape: VolumeShape, seed: f32) -> InMemoryVolume {
        InMemoryVolume::from_fn(shape, |x, y, z| {
            let (x, y, z) = (x as f32, y as f32, z as f32);
            10.0 + seed + (x * 0.21).sin() * 4.0 + (y * 0.13).cos() * 3.0 + z
        })
        .unwrap()
    }

    /// Zero volume with one bright voxel at `(x, y)` on every z.
    fn spot_volume(shape: VolumeShape, x: usize, y: usize) -> InMemoryVolume {
        InMemoryVolume::from_fn(shape, |vx, vy, _| if vx == x && vy == y { 100.0 } else { 0.0 })
            .unwrap()
    }

    fn request(z: usize) -> ViewRequest {
        ViewRequest {
            plane: Plane::XY,
            downsample: 1,
            fixed_z: z,
            moving_z: z,
        }
    }

    fn centered(angle: f64) -> RigidTransform {
        RigidTransform {
            angle_degrees: angle,
            center_x: 50,
            center_y: 50,
            ..Default::default()
        }
    }

    #[test]
    fn test_identity_composite_channels() {
        let shape = VolumeShape::new(100, 100, 10);
        let fixed = pattern_volume(shape, 0.0);
        let moving = pattern_volume(shape, 5.0);

        let img = composite_xy(&fixed, &moving, &request(5), &centered(0.0), &RenderConfig::default())
            .unwrap();
        assert_eq!((img.height, img.width), (100, 100));

        for row in 0..100 {
            for col in 0..100 {
                let [r, g, b] = img.pixel(row, col);
                // Rows are y, columns are x
                assert_eq!(r, fixed.get(col, row, 5));
                assert!((g - moving.get(col, row, 5)).abs() < 1e-3);
                assert_eq!(b, 0.0);
            }
        }
    }

    #[test]
    fn test_quarter_turn_moves_spot() {
        let shape = VolumeShape::new(100, 100, 10);
        let fixed = pattern_volume(shape, 0.0);
        // Bright spot at moving (x=50, y=10)
        let moving = spot_volume(shape, 50, 10);

        let img = composite_xy(&fixed, &moving, &request(5), &centered(90.0), &RenderConfig::default())
            .unwrap();
        let green = img.channel(1);

        // Brightest pixel should be at fixed (x=10, y=50), i.e. row 50, col 10
        let (idx, _) = green
            .data
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.total_cmp(b.1))
            .unwrap();
        let (row, col) = (idx / green.cols, idx % green.cols);
        assert!(row.abs_diff(50) <= 1, "row was {}", row);
        assert!(col.abs_diff(10) <= 1, "col was {}", col);
        assert!(green.get(50, 10) > 90.0);
    }

    #[test]
    fn test_flip_lr_mirrors_moving_only() {
        let shape = VolumeShape::new(20, 16, 2);
        let fixed = pattern_volume(shape, 0.0);
        let moving = spot_volume(shape, 3, 4);
        let transform = RigidTransform {
            flip_lr: true,
            ..Default::default()
        };

        let img = composite_xy(&fixed, &moving, &request(1), &transform, &RenderConfig::default())
            .unwrap();
        let green = img.channel(1);
        assert!((green.get(4, 16) - 100.0).abs() < 1e-3);
        assert!(green.get(4, 3).abs() < 1e-3);
        assert_eq!(img.channel(0).get(4, 3), fixed.get(3, 4, 1));
    }

    #[test]
    fn test_flip_ud_mirrors_rows() {
        let shape = VolumeShape::new(20, 16, 2);
        let moving = spot_volume(shape, 3, 4);
        let transform = RigidTransform {
            flip_ud: true,
            ..Default::default()
        };
        let img = composite_xy(&moving, &moving, &request(0), &transform, &RenderConfig::default())
            .unwrap();
        assert!((img.channel(1).get(11, 3) - 100.0).abs() < 1e-3);
    }

    #[test]
    fn test_downsampled_shape() {
        let fixed = pattern_volume(VolumeShape::new(100, 60, 4), 0.0);
        let moving = pattern_volume(VolumeShape::new(80, 80, 4), 1.0);
        let req = ViewRequest {
            downsample: 4,
            ..request(2)
        };
        let img = composite_xy(&fixed, &moving, &req, &centered(15.0), &RenderConfig::default())
            .unwrap();
        // Output follows the fixed slice: 60/4 rows by 100/4 columns
        assert_eq!((img.height, img.width), (15, 25));
    }

    #[test]
    fn test_translation_outside_is_zero() {
        let shape = VolumeShape::new(30, 30, 1);
        let fixed = pattern_volume(shape, 0.0);
        let moving = pattern_volume(shape, 0.0);
        let transform = RigidTransform {
            offset_x: 10,
            ..Default::default()
        };
        let img = composite_xy(&fixed, &moving, &request(0), &transform, &RenderConfig::default())
            .unwrap();
        let green = img.channel(1);
        // Display column c samples moving column c - 10
        for row in 0..30 {
            for col in 0..10 {
                assert_eq!(green.get(row, col), 0.0);
            }
            assert!((green.get(row, 20) - moving.get(10, row, 0)).abs() < 1e-3);
        }
    }

    #[test]
    fn test_render_xy_normalized_with_ticks() {
        let shape = VolumeShape::new(100, 80, 10);
        let fixed = pattern_volume(shape, 0.0);
        let moving = pattern_volume(shape, 2.0);
        let req = ViewRequest {
            downsample: 2,
            ..request(3)
        };

        let rendering = render_xy(&fixed, &moving, &req, &centered(30.0), &RenderConfig::default())
            .unwrap();
        assert_eq!(rendering.plane, Plane::XY);
        assert!(rendering.markers.is_empty());
        assert!(rendering.image.data.iter().all(|v| (0.0..=1.0).contains(v)));
        assert_eq!(rendering.x_ticks.labels(), vec![0, 20, 40, 60, 80, 100]);
        assert_eq!(rendering.x_ticks.positions()[5], 50.0);
        assert_eq!(rendering.y_ticks.labels(), vec![80, 64, 48, 32, 16, 0]);
    }

    #[test]
    fn test_blank_volumes_render_black() {
        let shape = VolumeShape::new(10, 10, 2);
        let blank = InMemoryVolume::from_fn(shape, |_, _, _| 0.0).unwrap();
        let rendering =
            render_xy(&blank, &blank, &request(0), &centered(0.0), &RenderConfig::default()).unwrap();
        assert!(rendering.image.data.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_z_out_of_range() {
        let fixed = pattern_volume(VolumeShape::new(10, 10, 4), 0.0);
        let moving = pattern_volume(VolumeShape::new(10, 10, 2), 0.0);
        let result = render_xy(&fixed, &moving, &request(3), &centered(0.0), &RenderConfig::default());
        assert!(matches!(result, Err(AlignError::IndexOutOfRange { .. })));
    }
}
