//! Scene loading errors.

use thiserror::Error;

/// Errors raised while loading and validating a scene description.
///
/// Everything here is a configuration error surfaced before rendering
/// begins; per-ray numeric edge cases never produce errors.
#[derive(Error, Debug)]
pub enum SceneError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid scene JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unknown render mode \"{0}\"")]
    UnknownRenderMode(String),

    #[error("unknown tone mapping \"{0}\"")]
    UnknownToneMap(String),

    #[error("unknown light type \"{0}\"")]
    UnknownLightType(String),

    #[error("unknown shape type \"{0}\"")]
    UnknownShapeType(String),

    #[error("{shape} is missing required field \"{field}\"")]
    MissingField {
        shape: &'static str,
        field: &'static str,
    },

    #[error("invalid {what}: {value}")]
    InvalidValue { what: &'static str, value: f32 },

    #[error("failed to load texture \"{path}\"")]
    Texture {
        path: String,
        #[source]
        source: image::ImageError,
    },
}
