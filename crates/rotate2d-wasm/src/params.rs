//! Parameter file WASM bindings.
//!
//! The browser saves and loads parameter files itself; these functions
//! convert between the JSON text, plain JS objects and the core transform.

use rotate2d_core::params::{decode_params, encode_params, ParameterRecord};
use rotate2d_core::RigidTransform;
use wasm_bindgen::prelude::*;

pub(crate) fn to_js(transform: &RigidTransform) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(&ParameterRecord::from(transform))
        .map_err(|e| JsValue::from_str(&format!("Invalid parameters: {}", e)))
}

pub(crate) fn from_js(value: JsValue) -> Result<RigidTransform, JsValue> {
    let record: ParameterRecord = serde_wasm_bindgen::from_value(value)
        .map_err(|e| JsValue::from_str(&format!("Invalid parameters: {}", e)))?;
    Ok(record.into())
}

/// Format a parameter object as the JSON text of a parameter file.
///
/// # Arguments
/// * `value` - `{x_offset, y_offset, x_center, y_center, angle, flip_lr, flip_ud}`
///
/// # Errors
/// Returns error if a field is missing or has the wrong type.
#[wasm_bindgen]
pub fn params_to_json(value: JsValue) -> Result<String, JsValue> {
    let transform = from_js(value)?;
    encode_params(&transform).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Parse the JSON text of a parameter file into a parameter object.
///
/// # Errors
/// Returns error if the text is not a valid parameter record.
#[wasm_bindgen]
pub fn params_from_json(json: &str) -> Result<JsValue, JsValue> {
    let transform = decode_params(json).map_err(|e| JsValue::from_str(&e.to_string()))?;
    to_js(&transform)
}

#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use serde::Serialize;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[derive(Serialize)]
    struct TestParams {
        x_offset: i32,
        y_offset: i32,
        x_center: i32,
        y_center: i32,
        angle: f64,
        flip_lr: bool,
        flip_ud: bool,
    }

    #[wasm_bindgen_test]
    fn test_params_to_json() {
        let params = TestParams {
            x_offset: -4,
            y_offset: 2,
            x_center: 50,
            y_center: 50,
            angle: 90.0,
            flip_lr: true,
            flip_ud: false,
        };
        let value = serde_wasm_bindgen::to_value(&params).unwrap();

        let json = params_to_json(value).unwrap();
        let transform = decode_params(&json).unwrap();
        assert_eq!(transform.offset_x, -4);
        assert_eq!(transform.center_y, 50);
        assert_eq!(transform.angle_degrees, 90.0);
        assert!(transform.flip_lr);
    }

    #[wasm_bindgen_test]
    fn test_params_to_json_missing_field() {
        let value = serde_wasm_bindgen::to_value(&"not an object").unwrap();
        assert!(params_to_json(value).is_err());
    }

    #[wasm_bindgen_test]
    fn test_params_from_json() {
        let json = r#"{"x_offset": 1, "y_offset": 2, "x_center": 3, "y_center": 4,
                       "angle": 5.5, "flip_lr": false, "flip_ud": true}"#;
        let value = params_from_json(json).unwrap();
        let transform = from_js(value).unwrap();
        assert_eq!(transform.offset_y, 2);
        assert_eq!(transform.center_x, 3);
        assert_eq!(transform.angle_degrees, 5.5);
        assert!(transform.flip_ud);
    }

    #[wasm_bindgen_test]
    fn test_params_from_json_invalid() {
        assert!(params_from_json("{\"angle\": 1.0}").is_err());
        assert!(params_from_json("not json").is_err());
    }
}
