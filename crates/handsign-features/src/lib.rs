//! handsign Features - Landmarks to model input
//!
//! Turns the 21 landmarks of one detected hand into the 42-element f32
//! vector the sign classifier was trained on:
//!
//! 1. Mirror horizontally (`x' = 1 - x`)
//! 2. Anchor the bounding box at the origin (subtract per-axis minimum)
//! 3. Flatten as interleaved `[x0, y0, x1, y1, ...]`
//!
//! No scale normalization is applied. A hand close to the camera yields
//! larger values than the same pose further away; the model sees that as
//! signal.

pub mod extract;
pub mod synthetic;

pub use extract::*;
