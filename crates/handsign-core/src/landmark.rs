//! Hand landmarks - 21 keypoints per detected hand
//!
//! Coordinates are normalized to the image dimensions, so each axis is
//! nominally in `[0, 1]`. The joint order is fixed by the upstream hand
//! detector and is not re-validated here.

use serde::{Deserialize, Serialize};

use crate::{HandsignError, HandsignResult};

/// Number of landmarks produced per hand
pub const LANDMARK_COUNT: usize = 21;

/// Joint identifier for the hand skeleton, in detector order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HandJoint {
    Wrist,

    // Thumb
    ThumbCmc,
    ThumbMcp,
    ThumbIp,
    ThumbTip,

    // Index finger
    IndexMcp,
    IndexPip,
    IndexDip,
    IndexTip,

    // Middle finger
    MiddleMcp,
    MiddlePip,
    MiddleDip,
    MiddleTip,

    // Ring finger
    RingMcp,
    RingPip,
    RingDip,
    RingTip,

    // Pinky
    PinkyMcp,
    PinkyPip,
    PinkyDip,
    PinkyTip,
}

impl HandJoint {
    /// Number of joints
    pub const COUNT: usize = LANDMARK_COUNT;

    /// All joints in order
    pub fn all() -> &'static [HandJoint] {
        &[
            HandJoint::Wrist,
            HandJoint::ThumbCmc,
            HandJoint::ThumbMcp,
            HandJoint::ThumbIp,
            HandJoint::ThumbTip,
            HandJoint::IndexMcp,
            HandJoint::IndexPip,
            HandJoint::IndexDip,
            HandJoint::IndexTip,
            HandJoint::MiddleMcp,
            HandJoint::MiddlePip,
            HandJoint::MiddleDip,
            HandJoint::MiddleTip,
            HandJoint::RingMcp,
            HandJoint::RingPip,
            HandJoint::RingDip,
            HandJoint::RingTip,
            HandJoint::PinkyMcp,
            HandJoint::PinkyPip,
            HandJoint::PinkyDip,
            HandJoint::PinkyTip,
        ]
    }

    /// Position of this joint in a landmark set
    pub fn index(self) -> usize {
        self as usize
    }
}

/// 2D position in normalized image coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
}

impl Landmark {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Exactly 21 landmarks for one hand, indexed by [`HandJoint`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LandmarkSet {
    points: [Landmark; LANDMARK_COUNT],
}

impl LandmarkSet {
    /// Wrap a full array of landmarks, rejecting non-finite coordinates
    pub fn new(points: [Landmark; LANDMARK_COUNT]) -> HandsignResult<Self> {
        if let Some(index) = points.iter().position(|p| !p.is_finite()) {
            return Err(HandsignError::NonFiniteCoordinate { index });
        }

        Ok(Self { points })
    }

    /// Build from a slice, failing on a count mismatch or a non-finite coordinate
    pub fn from_slice(points: &[Landmark]) -> HandsignResult<Self> {
        let points: [Landmark; LANDMARK_COUNT] =
            points.try_into().map_err(|_| HandsignError::LandmarkCount {
                expected: LANDMARK_COUNT,
                actual: points.len(),
            })?;

        Self::new(points)
    }

    /// Build from interleaved `[x0, y0, x1, y1, ...]` coordinates
    pub fn from_flat(coords: &[f32]) -> HandsignResult<Self> {
        if coords.len() != LANDMARK_COUNT * 2 {
            return Err(HandsignError::CoordinateCount {
                expected: LANDMARK_COUNT * 2,
                actual: coords.len(),
            });
        }

        let points: Vec<Landmark> = coords
            .chunks_exact(2)
            .map(|c| Landmark::new(c[0], c[1]))
            .collect();

        Self::from_slice(&points)
    }

    /// Landmark for a joint
    pub fn joint(&self, joint: HandJoint) -> Landmark {
        self.points[joint.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = &Landmark> {
        self.points.iter()
    }

    pub fn as_slice(&self) -> &[Landmark] {
        &self.points
    }

    pub fn len(&self) -> usize {
        LANDMARK_COUNT
    }

    pub fn is_empty(&self) -> bool {
        false
    }
}

impl TryFrom<Vec<Landmark>> for LandmarkSet {
    type Error = HandsignError;

    fn try_from(points: Vec<Landmark>) -> HandsignResult<Self> {
        Self::from_slice(&points)
    }
}

impl TryFrom<&[Landmark]> for LandmarkSet {
    type Error = HandsignError;

    fn try_from(points: &[Landmark]) -> HandsignResult<Self> {
        Self::from_slice(points)
    }
}
