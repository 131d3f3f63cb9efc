//! Rotate2D Core - Rigid 2D alignment engine
//!
//! This crate provides the engine behind the Rotate2D alignment tool: given a
//! fixed and a moving 3D volume and a rigid in-plane transform, it renders
//! overlay previews (XY, XZ, YZ), places axis ticks and persists the chosen
//! parameters.

pub mod encode;
pub mod error;
pub mod normalize;
pub mod params;
pub mod render;
pub mod session;
pub mod ticks;
pub mod transform;
pub mod volume;

pub use error::{AlignError, Result, VolumeRole};
pub use render::{
    render_view, render_xy, render_xz, render_yz, MarkerLine, Plane, PreviewImage, Rendering,
    ViewRequest,
};
pub use session::{AlignmentSession, ViewLayout};
pub use transform::InterpolationOrder;
pub use volume::{InMemoryVolume, Volume, VolumeShape};

/// Rigid in-plane transform chosen by the operator.
///
/// Offset and center are full-resolution fixed-volume pixel coordinates.
/// Any real angle is accepted.
#[derive(Debug, Clone, Copy, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RigidTransform {
    /// Translation along X, applied in the un-rotated moving frame
    pub offset_x: i64,
    /// Translation along Y, applied in the un-rotated moving frame
    pub offset_y: i64,
    /// Rotation center X
    pub center_x: i64,
    /// Rotation center Y
    pub center_y: i64,
    /// Rotation in degrees
    pub angle_degrees: f64,
    /// Mirror the moving slice left/right
    pub flip_lr: bool,
    /// Mirror the moving slice up/down
    pub flip_ud: bool,
}

impl RigidTransform {
    /// Create an identity transform
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if the transform leaves the moving slice where it is
    pub fn is_identity(&self) -> bool {
        self.offset_x == 0
            && self.offset_y == 0
            && self.angle_degrees == 0.0
            && !self.flip_lr
            && !self.flip_ud
    }
}

/// Rendering options.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Interpolation used when resampling the moving XY slice
    pub interpolation: InterpolationOrder,
    /// Quantile of the composite mapped to full brightness (0.0 to 1.0)
    pub display_quantile: f64,
    /// Number of ticks per axis
    pub tick_count: usize,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            interpolation: InterpolationOrder::CubicSpline,
            display_quantile: normalize::DEFAULT_DISPLAY_QUANTILE,
            tick_count: ticks::DEFAULT_TICK_COUNT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rigid_transform_default_is_identity() {
        let t = RigidTransform::new();
        assert!(t.is_identity());
    }

    #[test]
    fn test_center_does_not_affect_identity() {
        let t = RigidTransform {
            center_x: 50,
            center_y: 50,
            ..Default::default()
        };
        assert!(t.is_identity());
    }

    #[test]
    fn test_rigid_transform_not_identity() {
        let mut t = RigidTransform::new();
        t.flip_ud = true;
        assert!(!t.is_identity());
    }

    #[test]
    fn test_render_config_defaults() {
        let config = RenderConfig::default();
        assert_eq!(config.interpolation, InterpolationOrder::CubicSpline);
        assert_eq!(config.display_quantile, 0.9);
        assert_eq!(config.tick_count, 6);
    }

    #[test]
    fn test_render_config_partial_json() {
        let config: RenderConfig = serde_json::from_str(r#"{"interpolation": "linear"}"#).unwrap();
        assert_eq!(config.interpolation, InterpolationOrder::Linear);
        assert_eq!(config.tick_count, 6);
    }
}
