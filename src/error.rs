// Error types for configuration, the viewport host, the external scene layer
// and the browser binding that ties them together

use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("particle_count must be at least 1")]
    NoParticles,
    #[error("palette must contain at least one color")]
    EmptyPalette,
    #[error("invalid color {0:?}, expected #rrggbb or #rrggbbaa")]
    InvalidColor(String),
    #[error("{field} range is invalid: min {min}, max {max}")]
    InvalidRange {
        field: &'static str,
        min: f64,
        max: f64,
    },
    #[error("{field} must be a finite, non-negative number, got {value}")]
    InvalidValue { field: &'static str, value: f64 },
}

#[derive(Debug, Error, PartialEq)]
pub enum HostError {
    #[error("viewport host is already mounted")]
    AlreadyMounted,
    #[error("failed to schedule animation frame: {0}")]
    Schedule(String),
}

#[derive(Debug, Error, PartialEq)]
pub enum SceneError {
    #[error("scene url is empty")]
    EmptyUrl,
    #[error("failed to attach scene viewer: {0}")]
    Attach(String),
}

#[derive(Debug, Error)]
pub enum BackgroundError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Host(#[from] HostError),
    #[error(transparent)]
    Scene(#[from] SceneError),
    #[error("no global window available")]
    NoWindow,
    #[error("window has no document")]
    NoDocument,
    #[error("javascript error: {0}")]
    Js(String),
}

impl From<BackgroundError> for JsValue {
    fn from(err: BackgroundError) -> JsValue {
        JsValue::from_str(&err.to_string())
    }
}

// Renders whatever a thrown JS value carries into something printable
pub fn describe_js(value: &JsValue) -> String {
    value
        .as_string()
        .unwrap_or_else(|| format!("{:?}", value))
}
