//! Error types for handsign

use thiserror::Error;

/// Core handsign errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HandsignError {
    // Input errors
    #[error("Invalid landmark count: expected {expected}, got {actual}")]
    LandmarkCount { expected: usize, actual: usize },

    #[error("Invalid coordinate count: expected {expected}, got {actual}")]
    CoordinateCount { expected: usize, actual: usize },

    #[error("Invalid feature length: expected {expected}, got {actual}")]
    FeatureLength { expected: usize, actual: usize },

    #[error("Non-finite coordinate at landmark {index}")]
    NonFiniteCoordinate { index: usize },

    // Environment errors
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Transport error: {0}")]
    Transport(String),
}

/// Result type for handsign operations
pub type HandsignResult<T> = Result<T, HandsignError>;
