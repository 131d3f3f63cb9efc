//! Alignment session WASM bindings.
//!
//! This module exposes the caller-owned alignment state to the browser UI.
//! Every selector widget maps to one setter here, and the "show" button maps
//! to `render` or `render_layout`.

use crate::types::{plane_from_u8, JsRendering, JsVolume};
use rotate2d_core::{AlignmentSession, InMemoryVolume, ViewLayout};
use wasm_bindgen::prelude::*;

/// Alignment session wrapper for JavaScript
///
/// # Example (TypeScript)
/// ```typescript
/// const session = new JsAlignmentSession();
/// session.set_fixed(new JsVolume(100, 100, 10, fixedVoxels));
/// session.set_moving(new JsVolume(100, 100, 10, movingVoxels));
/// session.center_on_fixed();
/// session.angle = 12.5;
///
/// if (session.can_render()) {
///   const xy = session.render(0);
///   ctx.putImageData(new ImageData(new Uint8ClampedArray(xy.rgba()), xy.width, xy.height), 0, 0);
///   xy.free();
/// }
/// ```
#[wasm_bindgen]
pub struct JsAlignmentSession {
    inner: AlignmentSession<InMemoryVolume>,
}

impl Default for JsAlignmentSession {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl JsAlignmentSession {
    /// Create an empty session with default controls
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            inner: AlignmentSession::new(),
        }
    }

    /// Attach a copy of `volume` as the fixed volume
    pub fn set_fixed(&mut self, volume: &JsVolume) {
        self.inner.attach_fixed(volume.to_volume());
    }

    /// Attach a copy of `volume` as the moving volume
    pub fn set_moving(&mut self, volume: &JsVolume) {
        self.inner.attach_moving(volume.to_volume());
    }

    /// True once both volumes are attached
    pub fn can_render(&self) -> bool {
        self.inner.can_render()
    }

    /// Move the rotation center to the middle of the fixed volume.
    ///
    /// # Errors
    /// Returns error if no fixed volume is attached.
    pub fn center_on_fixed(&mut self) -> Result<(), JsValue> {
        self.inner
            .center_on_fixed()
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Get x offset
    #[wasm_bindgen(getter)]
    pub fn offset_x(&self) -> f64 {
        self.inner.transform().offset_x as f64
    }

    /// Set x offset, truncated to whole pixels and clamped to the moving
    /// volume's `[-X, X]`
    #[wasm_bindgen(setter)]
    pub fn set_offset_x(&mut self, value: f64) {
        let y = self.inner.transform().offset_y;
        self.inner.set_offset(value as i64, y);
    }

    /// Get y offset
    #[wasm_bindgen(getter)]
    pub fn offset_y(&self) -> f64 {
        self.inner.transform().offset_y as f64
    }

    /// Set y offset, clamped to the moving volume's `[-Y, Y]`
    #[wasm_bindgen(setter)]
    pub fn set_offset_y(&mut self, value: f64) {
        let x = self.inner.transform().offset_x;
        self.inner.set_offset(x, value as i64);
    }

    /// Get x center
    #[wasm_bindgen(getter)]
    pub fn center_x(&self) -> f64 {
        self.inner.transform().center_x as f64
    }

    /// Set x center, clamped to the fixed volume's `[0, X]`
    #[wasm_bindgen(setter)]
    pub fn set_center_x(&mut self, value: f64) {
        let y = self.inner.transform().center_y;
        self.inner.set_center(value as i64, y);
    }

    /// Get y center
    #[wasm_bindgen(getter)]
    pub fn center_y(&self) -> f64 {
        self.inner.transform().center_y as f64
    }

    /// Set y center, clamped to the fixed volume's `[0, Y]`
    #[wasm_bindgen(setter)]
    pub fn set_center_y(&mut self, value: f64) {
        let x = self.inner.transform().center_x;
        self.inner.set_center(x, value as i64);
    }

    /// Get rotation angle in degrees
    #[wasm_bindgen(getter)]
    pub fn angle(&self) -> f64 {
        self.inner.transform().angle_degrees
    }

    /// Set rotation angle in degrees
    #[wasm_bindgen(setter)]
    pub fn set_angle(&mut self, value: f64) {
        self.inner.set_angle(value);
    }

    /// Get left/right mirror flag
    #[wasm_bindgen(getter)]
    pub fn flip_lr(&self) -> bool {
        self.inner.transform().flip_lr
    }

    /// Set left/right mirror flag
    #[wasm_bindgen(setter)]
    pub fn set_flip_lr(&mut self, value: bool) {
        let flip_ud = self.inner.transform().flip_ud;
        self.inner.set_flips(value, flip_ud);
    }

    /// Get up/down mirror flag
    #[wasm_bindgen(getter)]
    pub fn flip_ud(&self) -> bool {
        self.inner.transform().flip_ud
    }

    /// Set up/down mirror flag
    #[wasm_bindgen(setter)]
    pub fn set_flip_ud(&mut self, value: bool) {
        let flip_lr = self.inner.transform().flip_lr;
        self.inner.set_flips(flip_lr, value);
    }

    /// Get fixed volume z index
    #[wasm_bindgen(getter)]
    pub fn fixed_z(&self) -> u32 {
        self.inner.fixed_z() as u32
    }

    /// Set fixed volume z index
    #[wasm_bindgen(setter)]
    pub fn set_fixed_z(&mut self, value: u32) {
        self.inner.set_fixed_z(value as usize);
    }

    /// Get moving volume z index
    #[wasm_bindgen(getter)]
    pub fn moving_z(&self) -> u32 {
        self.inner.moving_z() as u32
    }

    /// Set moving volume z index
    #[wasm_bindgen(setter)]
    pub fn set_moving_z(&mut self, value: u32) {
        self.inner.set_moving_z(value as usize);
    }

    /// Get downsample factor
    #[wasm_bindgen(getter)]
    pub fn downsample(&self) -> u32 {
        self.inner.downsample() as u32
    }

    /// Set downsample factor, clamped to `[1, 32]`
    #[wasm_bindgen(setter)]
    pub fn set_downsample(&mut self, value: u32) {
        self.inner.set_downsample(value as usize);
    }

    /// True when the XZ and YZ panels are shown next to XY
    #[wasm_bindgen(getter)]
    pub fn three_panel(&self) -> bool {
        self.inner.layout() == ViewLayout::ThreePanel
    }

    /// Switch between the single XY panel and the three-panel layout
    #[wasm_bindgen(setter)]
    pub fn set_three_panel(&mut self, value: bool) {
        let layout = if value {
            ViewLayout::ThreePanel
        } else {
            ViewLayout::XyOnly
        };
        self.inner.set_layout(layout);
    }

    /// Render one plane (0 = XY, 1 = XZ, 2 = YZ).
    ///
    /// # Errors
    /// Returns error if a volume is missing or a z index is out of range.
    pub fn render(&self, plane: u8) -> Result<JsRendering, JsValue> {
        self.inner
            .render(plane_from_u8(plane))
            .map(JsRendering::from_rendering)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Render every panel of the current layout as an array of `JsRendering`.
    ///
    /// # Errors
    /// Returns error if any panel fails; no partial array is returned.
    pub fn render_layout(&self) -> Result<js_sys::Array, JsValue> {
        let renderings = self
            .inner
            .render_layout()
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(renderings
            .into_iter()
            .map(|r| JsValue::from(JsRendering::from_rendering(r)))
            .collect())
    }

    /// Current parameters as pretty-printed JSON
    pub fn params_json(&self) -> Result<String, JsValue> {
        rotate2d_core::params::encode_params(self.inner.transform())
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Replace the transform with a parameter file's contents, verbatim.
    ///
    /// # Errors
    /// Returns error if the JSON is malformed; the transform is then unchanged.
    pub fn load_params_json(&mut self, json: &str) -> Result<(), JsValue> {
        let transform = rotate2d_core::params::decode_params(json)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        self.inner.set_transform(transform);
        Ok(())
    }

    /// Current parameters as a plain JS object
    pub fn params(&self) -> Result<JsValue, JsValue> {
        crate::params::to_js(self.inner.transform())
    }

    /// Replace the transform from a plain JS parameter object, verbatim
    pub fn set_params(&mut self, value: JsValue) -> Result<(), JsValue> {
        let transform = crate::params::from_js(value)?;
        self.inner.set_transform(transform);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rotate2d_core::Plane;

    fn volume(x: u32, y: u32, z: u32) -> JsVolume {
        let data = (0..x * y * z).map(|i| (i % 97) as f32 + 1.0).collect();
        JsVolume::build(x, y, z, data).unwrap()
    }

    fn loaded() -> JsAlignmentSession {
        let mut session = JsAlignmentSession::new();
        session.set_fixed(&volume(40, 30, 6));
        session.set_moving(&volume(40, 30, 8));
        session
    }

    #[test]
    fn test_defaults() {
        let session = JsAlignmentSession::new();
        assert!(!session.can_render());
        assert_eq!(session.downsample(), 1);
        assert_eq!(session.angle(), 0.0);
        assert!(session.three_panel());
    }

    #[test]
    fn test_can_render_after_both_volumes() {
        let mut session = JsAlignmentSession::new();
        session.set_fixed(&volume(4, 4, 2));
        assert!(!session.can_render());
        session.set_moving(&volume(4, 4, 2));
        assert!(session.can_render());
    }

    #[test]
    fn test_center_on_fixed() {
        let mut session = loaded();
        assert!(session.center_on_fixed().is_ok());
        assert_eq!((session.center_x(), session.center_y()), (20.0, 15.0));
    }

    #[test]
    fn test_setters_clamp() {
        let mut session = loaded();
        session.set_offset_x(500.0);
        session.set_offset_y(-500.0);
        assert_eq!((session.offset_x(), session.offset_y()), (40.0, -30.0));

        session.set_center_x(-3.0);
        assert_eq!(session.center_x(), 0.0);

        session.set_fixed_z(99);
        session.set_moving_z(99);
        assert_eq!((session.fixed_z(), session.moving_z()), (5, 7));

        session.set_downsample(0);
        assert_eq!(session.downsample(), 1);
        session.set_downsample(100);
        assert_eq!(session.downsample(), 32);
    }

    #[test]
    fn test_flip_setters_are_independent() {
        let mut session = loaded();
        session.set_flip_lr(true);
        session.set_flip_ud(true);
        session.set_flip_lr(false);
        assert!(!session.flip_lr());
        assert!(session.flip_ud());
    }

    #[test]
    fn test_render_planes() {
        let mut session = loaded();
        session.set_downsample(2);

        let xy = session.render(0).unwrap();
        assert_eq!(xy.plane(), 0);
        assert_eq!((xy.width(), xy.height()), (20, 15));
        assert!(xy.marker_coords().is_empty());

        let xz = session.render(1).unwrap();
        assert_eq!((xz.width(), xz.height()), (20, 3));
        assert_eq!(xz.marker_sources(), vec![0, 1]);

        let yz = session.render(2).unwrap();
        assert_eq!((yz.width(), yz.height()), (3, 15));
    }

    #[test]
    fn test_render_matches_core() {
        let mut session = loaded();
        session.set_angle(30.0);
        let js = session.render(0).unwrap();
        let core = session.inner.render(Plane::XY).unwrap();
        assert_eq!(js.pixels(), core.image.data);
    }

    #[test]
    fn test_layout_toggle() {
        let mut session = JsAlignmentSession::new();
        session.set_three_panel(false);
        assert!(!session.three_panel());
        assert_eq!(session.inner.layout(), ViewLayout::XyOnly);
    }

    #[test]
    fn test_params_json_round_trip() {
        let mut session = loaded();
        session.set_angle(45.0);
        session.set_offset_x(3.0);
        session.set_flip_ud(true);
        let json = session.params_json().unwrap();
        assert!(json.contains("\"angle\": 45.0"));

        let mut other = JsAlignmentSession::new();
        other.load_params_json(&json).unwrap();
        assert_eq!(other.angle(), 45.0);
        assert_eq!(other.offset_x(), 3.0);
        assert!(other.flip_ud());
    }

    #[test]
    fn test_loaded_params_beyond_i32_read_back_exactly() {
        let json = r#"{"x_offset": -5000000000, "y_offset": 0, "x_center": 3000000000,
                       "y_center": 7, "angle": 0.0, "flip_lr": false, "flip_ud": false}"#;
        let mut session = JsAlignmentSession::new();
        session.load_params_json(json).unwrap();
        assert_eq!(session.center_x(), 3_000_000_000.0);
        assert_eq!(session.offset_x(), -5_000_000_000.0);
        assert_eq!(session.center_y(), 7.0);
        assert!(session.params_json().unwrap().contains("3000000000"));
    }

    #[test]
    fn test_fractional_setter_truncates() {
        let mut session = loaded();
        session.set_center_x(12.9);
        session.set_offset_y(-2.5);
        assert_eq!(session.center_x(), 12.0);
        assert_eq!(session.offset_y(), -2.0);
    }
}
