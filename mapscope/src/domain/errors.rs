//! Structured error types for mapscope
//!
//! Using thiserror for automatic Display implementation and error chaining.

use super::types::ReferenceCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProjectionError {
    #[error("Unknown reference system: {0}")]
    UnknownReferenceSystem(ReferenceCode),

    #[error("Invalid definition for {code}: {reason}")]
    InvalidDefinition { code: ReferenceCode, reason: String },

    #[error("Failed to transform ({x}, {y}) from {from} to {to}: {reason}")]
    TransformFailed { x: f64, y: f64, from: ReferenceCode, to: ReferenceCode, reason: String },

    #[error("Input coordinate ({x}, {y}) is not finite")]
    NonFiniteInput { x: f64, y: f64 },
}

#[derive(Error, Debug)]
pub enum ExportError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_reference_display() {
        let err = ProjectionError::UnknownReferenceSystem(ReferenceCode::new("EPSG:99999"));
        assert_eq!(err.to_string(), "Unknown reference system: EPSG:99999");
    }

    #[test]
    fn test_transform_failed_display() {
        let err = ProjectionError::TransformFailed {
            x: 1.0,
            y: 2.0,
            from: "EPSG:4326".into(),
            to: "EPSG:3857".into(),
            reason: "latitude out of range".to_string(),
        };
        assert!(err.to_string().contains("EPSG:4326"));
        assert!(err.to_string().contains("latitude out of range"));
    }
}
