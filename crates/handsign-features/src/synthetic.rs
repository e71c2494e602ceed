//! Deterministic synthetic hands
//!
//! Used by the readiness self-test and by benchmarks, where a real
//! detector is not available.

use handsign_core::{HandsignResult, Landmark, LandmarkSet, LANDMARK_COUNT};

/// Parameters of a diagonal ramp: landmark `i` sits at `start + step * i` on both axes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ramp {
    pub start: f32,
    pub step: f32,
}

/// Ramp used by the environment self-test, spanning `[0.5, 0.7]`
pub const SELF_TEST: Ramp = Ramp {
    start: 0.5,
    step: 0.01,
};

impl Ramp {
    pub fn landmarks(&self) -> HandsignResult<LandmarkSet> {
        diagonal_ramp(self.start, self.step)
    }
}

/// 21 landmarks with `x = y = start + step * i`
///
/// Fails if any generated coordinate is not finite.
pub fn diagonal_ramp(start: f32, step: f32) -> HandsignResult<LandmarkSet> {
    let mut points = [Landmark::default(); LANDMARK_COUNT];
    for (i, point) in points.iter_mut().enumerate() {
        let v = start + step * i as f32;
        *point = Landmark::new(v, v);
    }
    LandmarkSet::new(points)
}

/// 21 copies of the same point
pub fn uniform(point: Landmark) -> HandsignResult<LandmarkSet> {
    LandmarkSet::new([point; LANDMARK_COUNT])
}
