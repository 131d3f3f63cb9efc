//! Caller-owned alignment state.
//!
//! An [`AlignmentSession`] holds the two volumes and every operator control
//! (offset, center, angle, flips, z indices, downsample, layout). The
//! renderers themselves are stateless; the session only bundles their
//! inputs and keeps the controls inside the ranges the loaded volumes allow.
//!
//! # Control ranges
//!
//! | Control | Range | Set by |
//! |---|---|---|
//! | `fixed_z` | `[0, Z)` of fixed | fixed volume |
//! | `moving_z` | `[0, Z)` of moving | moving volume |
//! | `center_x`, `center_y` | `[0, X]`, `[0, Y]` of fixed | fixed volume |
//! | `offset_x`, `offset_y` | `[-X, X]`, `[-Y, Y]` of moving | moving volume |
//! | `downsample` | `[1, 32]` | always |
//!
//! Values are clamped when a volume is attached and whenever a control is
//! set. [`AlignmentSession::set_transform`] and parameter files are taken
//! verbatim.

use std::path::Path;

use tracing::{debug, info, warn};

use crate::error::{AlignError, Result, VolumeRole};
use crate::params;
use crate::render::{render_view, Plane, Rendering, ViewRequest};
use crate::volume::{Volume, VolumeShape};
use crate::{RenderConfig, RigidTransform};

/// Largest downsample factor offered to the operator.
pub const MAX_DOWNSAMPLE: usize = 32;

/// Which panels a render request produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub enum ViewLayout {
    /// The XY panel only.
    XyOnly,
    /// XY plus the XZ and YZ cross-sections.
    #[default]
    ThreePanel,
}

impl ViewLayout {
    /// Planes rendered for this layout, in display order.
    pub fn planes(self) -> &'static [Plane] {
        match self {
            ViewLayout::XyOnly => &[Plane::XY],
            ViewLayout::ThreePanel => &[Plane::XY, Plane::XZ, Plane::YZ],
        }
    }
}

fn clamp_logged(name: &str, value: i64, lo: i64, hi: i64) -> i64 {
    let clamped = value.clamp(lo, hi.max(lo));
    if clamped != value {
        warn!(control = name, value, clamped, "control clamped to volume range");
    }
    clamped
}

fn clamp_index(name: &str, value: usize, extent: usize) -> usize {
    clamp_logged(name, value as i64, 0, extent.saturating_sub(1) as i64) as usize
}

/// State of one alignment: volumes plus operator controls.
#[derive(Debug, Clone)]
pub struct AlignmentSession<V> {
    fixed: Option<V>,
    moving: Option<V>,
    transform: RigidTransform,
    fixed_z: usize,
    moving_z: usize,
    downsample: usize,
    layout: ViewLayout,
    config: RenderConfig,
}

impl<V> Default for AlignmentSession<V> {
    fn default() -> Self {
        Self {
            fixed: None,
            moving: None,
            transform: RigidTransform::default(),
            fixed_z: 0,
            moving_z: 0,
            downsample: 1,
            layout: ViewLayout::default(),
            config: RenderConfig::default(),
        }
    }
}

impl<V: Volume> AlignmentSession<V> {
    /// Create an empty session with default controls.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty session with custom render options.
    pub fn with_config(config: RenderConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    // ===================== Volumes =====================

    /// Attach the fixed volume, replacing any previous one.
    ///
    /// Narrows `fixed_z` to the new Z extent and the center to the new X/Y
    /// extents.
    pub fn attach_fixed(&mut self, volume: V) {
        let shape = volume.shape();
        info!(x = shape.x, y = shape.y, z = shape.z, "fixed volume attached");
        self.fixed = Some(volume);
        self.fixed_z = clamp_index("fixed_z", self.fixed_z, shape.z);
        self.clamp_center(&shape);
    }

    /// Attach the moving volume, replacing any previous one.
    ///
    /// Narrows `moving_z` to the new Z extent and the offset to `[-X, X]`,
    /// `[-Y, Y]`.
    pub fn attach_moving(&mut self, volume: V) {
        let shape = volume.shape();
        info!(x = shape.x, y = shape.y, z = shape.z, "moving volume attached");
        self.moving = Some(volume);
        self.moving_z = clamp_index("moving_z", self.moving_z, shape.z);
        self.clamp_offset(&shape);
    }

    /// Open the fixed volume with `open` and attach it.
    ///
    /// On failure the session is left exactly as it was.
    pub fn open_fixed(&mut self, open: impl FnOnce() -> Result<V>) -> Result<()> {
        let volume = open()?;
        self.attach_fixed(volume);
        Ok(())
    }

    /// Open the moving volume with `open` and attach it.
    ///
    /// On failure the session is left exactly as it was.
    pub fn open_moving(&mut self, open: impl FnOnce() -> Result<V>) -> Result<()> {
        let volume = open()?;
        self.attach_moving(volume);
        Ok(())
    }

    pub fn fixed(&self) -> Option<&V> {
        self.fixed.as_ref()
    }

    pub fn moving(&self) -> Option<&V> {
        self.moving.as_ref()
    }

    pub fn fixed_shape(&self) -> Option<VolumeShape> {
        self.fixed.as_ref().map(Volume::shape)
    }

    pub fn moving_shape(&self) -> Option<VolumeShape> {
        self.moving.as_ref().map(Volume::shape)
    }

    /// True once both volumes are attached.
    pub fn can_render(&self) -> bool {
        self.fixed.is_some() && self.moving.is_some()
    }

    fn volumes(&self) -> Result<(&V, &V)> {
        let fixed = self.fixed.as_ref().ok_or(AlignError::VolumeNotLoaded {
            role: VolumeRole::Fixed,
        })?;
        let moving = self.moving.as_ref().ok_or(AlignError::VolumeNotLoaded {
            role: VolumeRole::Moving,
        })?;
        Ok((fixed, moving))
    }

    // ===================== Controls =====================

    fn clamp_center(&mut self, shape: &VolumeShape) {
        self.transform.center_x =
            clamp_logged("center_x", self.transform.center_x, 0, shape.x as i64);
        self.transform.center_y =
            clamp_logged("center_y", self.transform.center_y, 0, shape.y as i64);
    }

    fn clamp_offset(&mut self, shape: &VolumeShape) {
        let (x, y) = (shape.x as i64, shape.y as i64);
        self.transform.offset_x = clamp_logged("offset_x", self.transform.offset_x, -x, x);
        self.transform.offset_y = clamp_logged("offset_y", self.transform.offset_y, -y, y);
    }

    pub fn transform(&self) -> &RigidTransform {
        &self.transform
    }

    /// Replace the whole transform verbatim, without clamping.
    pub fn set_transform(&mut self, transform: RigidTransform) {
        self.transform = transform;
    }

    pub fn set_offset(&mut self, x: i64, y: i64) {
        self.transform.offset_x = x;
        self.transform.offset_y = y;
        if let Some(shape) = self.moving_shape() {
            self.clamp_offset(&shape);
        }
    }

    pub fn set_center(&mut self, x: i64, y: i64) {
        self.transform.center_x = x;
        self.transform.center_y = y;
        if let Some(shape) = self.fixed_shape() {
            self.clamp_center(&shape);
        }
    }

    /// Move the rotation center to the middle of the fixed volume.
    ///
    /// # Errors
    ///
    /// Returns [`AlignError::VolumeNotLoaded`] if no fixed volume is attached.
    pub fn center_on_fixed(&mut self) -> Result<()> {
        let shape = self.fixed_shape().ok_or(AlignError::VolumeNotLoaded {
            role: VolumeRole::Fixed,
        })?;
        self.transform.center_x = (shape.x / 2) as i64;
        self.transform.center_y = (shape.y / 2) as i64;
        Ok(())
    }

    pub fn set_angle(&mut self, degrees: f64) {
        self.transform.angle_degrees = degrees;
    }

    pub fn set_flips(&mut self, flip_lr: bool, flip_ud: bool) {
        self.transform.flip_lr = flip_lr;
        self.transform.flip_ud = flip_ud;
    }

    pub fn fixed_z(&self) -> usize {
        self.fixed_z
    }

    pub fn set_fixed_z(&mut self, z: usize) {
        self.fixed_z = match self.fixed_shape() {
            Some(shape) => clamp_index("fixed_z", z, shape.z),
            None => z,
        };
    }

    pub fn moving_z(&self) -> usize {
        self.moving_z
    }

    pub fn set_moving_z(&mut self, z: usize) {
        self.moving_z = match self.moving_shape() {
            Some(shape) => clamp_index("moving_z", z, shape.z),
            None => z,
        };
    }

    pub fn downsample(&self) -> usize {
        self.downsample
    }

    /// Set the downsample factor, clamped to `[1, MAX_DOWNSAMPLE]`.
    pub fn set_downsample(&mut self, downsample: usize) {
        self.downsample =
            clamp_logged("downsample", downsample as i64, 1, MAX_DOWNSAMPLE as i64) as usize;
    }

    pub fn layout(&self) -> ViewLayout {
        self.layout
    }

    pub fn set_layout(&mut self, layout: ViewLayout) {
        self.layout = layout;
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: RenderConfig) {
        self.config = config;
    }

    // ===================== Rendering =====================

    /// Render request for `plane` from the current controls.
    pub fn view_request(&self, plane: Plane) -> ViewRequest {
        ViewRequest {
            plane,
            downsample: self.downsample,
            fixed_z: self.fixed_z,
            moving_z: self.moving_z,
        }
    }

    /// Render one plane.
    ///
    /// # Errors
    ///
    /// Returns [`AlignError::VolumeNotLoaded`] until both volumes are
    /// attached, or any error from the renderer.
    pub fn render(&self, plane: Plane) -> Result<Rendering> {
        let (fixed, moving) = self.volumes()?;
        let request = self.view_request(plane);
        debug!(?request, transform = ?self.transform, "render requested");
        render_view(fixed, moving, &request, &self.transform, &self.config)
    }

    /// Render every panel of the current layout, in display order.
    ///
    /// Either all panels are produced or none are.
    pub fn render_layout(&self) -> Result<Vec<Rendering>> {
        self.layout
            .planes()
            .iter()
            .map(|&plane| self.render(plane))
            .collect()
    }

    // ===================== Parameters =====================

    /// Save the current transform as a JSON parameter file.
    pub fn save_params(&self, path: impl AsRef<Path>) -> Result<()> {
        params::save_params(path, &self.transform)
    }

    /// Load a JSON parameter file and use it verbatim as the transform.
    ///
    /// On failure the current transform is kept.
    pub fn load_params(&mut self, path: impl AsRef<Path>) -> Result<()> {
        self.transform = params::load_params(path)?;
        Ok(())
    }
}
