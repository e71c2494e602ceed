//! handsign Core - Shared types for hand feature extraction
//!
//! This crate defines the types passed between the landmark detector,
//! the feature extractor and the inference runtime:
//! - Landmarks and the 21-joint hand layout
//! - Feature vectors (42 x f32)
//! - Error types

pub mod error;
pub mod feature;
pub mod landmark;

pub use error::*;
pub use feature::*;
pub use landmark::*;
