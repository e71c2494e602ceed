//! Feature extraction

use handsign_core::{FeatureVector, HandsignResult, Landmark, LandmarkSet, FEATURE_LEN};

/// Extracted features plus the translation anchor that was subtracted
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extraction {
    pub features: FeatureVector,
    /// Minimum mirrored x
    pub min_x: f32,
    /// Minimum y
    pub min_y: f32,
}

/// Mirror, translate-normalize and flatten a hand
pub fn extract(landmarks: &LandmarkSet) -> FeatureVector {
    extract_with_bounds(landmarks).features
}

/// Same as [`extract`] for an unchecked slice; fails if it is not 21 points
pub fn extract_landmarks(landmarks: &[Landmark]) -> HandsignResult<FeatureVector> {
    let set = LandmarkSet::from_slice(landmarks)?;
    Ok(extract(&set))
}

/// Same as [`extract`], also returning the per-axis minimums
pub fn extract_with_bounds(landmarks: &LandmarkSet) -> Extraction {
    // Front cameras present a mirrored view relative to the training data
    let mirrored = landmarks
        .as_slice()
        .iter()
        .map(|lm| Landmark::new(1.0 - lm.x, lm.y));

    let (min_x, min_y) = mirrored
        .clone()
        .fold((f32::INFINITY, f32::INFINITY), |(mx, my), lm| {
            (mx.min(lm.x), my.min(lm.y))
        });

    let mut values = [0.0f32; FEATURE_LEN];
    for (i, lm) in mirrored.enumerate() {
        values[2 * i] = lm.x - min_x;
        values[2 * i + 1] = lm.y - min_y;
    }

    Extraction {
        features: FeatureVector::new(values),
        min_x,
        min_y,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use handsign_core::{HandJoint, HandsignError};

    fn ramp() -> LandmarkSet {
        let points: Vec<Landmark> = (0..21)
            .map(|i| {
                let v = 0.5 + 0.01 * i as f32;
                Landmark::new(v, v)
            })
            .collect();
        LandmarkSet::from_slice(&points).unwrap()
    }

    #[test]
    fn test_ramp_output() {
        let out = extract_with_bounds(&ramp());

        assert_eq!(out.features.len(), 42);
        assert!((out.min_x - 0.30).abs() < 1e-5);
        assert!((out.min_y - 0.5).abs() < 1e-5);

        let (x0, y0) = out.features.pair(0);
        assert!((x0 - 0.20).abs() < 1e-5);
        assert_eq!(y0, 0.0);

        let (x20, y20) = out.features.pair(20);
        assert_eq!(x20, 0.0);
        assert!((y20 - 0.20).abs() < 1e-5);
    }

    #[test]
    fn test_degenerate_hand_is_all_zero() {
        let set = LandmarkSet::new([Landmark::new(0.3, 0.4); 21]).unwrap();
        let out = extract(&set);

        assert_eq!(out.len(), 42);
        assert!(out.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_interleaved_order() {
        let mut points = [Landmark::new(0.5, 0.5); 21];
        points[HandJoint::IndexTip.index()] = Landmark::new(0.4, 0.9);
        let out = extract(&LandmarkSet::new(points).unwrap());

        // Mirrored x of the index tip is 0.6, min mirrored x is 0.5
        let (x, y) = out.pair(HandJoint::IndexTip.index());
        assert!((x - 0.1).abs() < 1e-6);
        assert!((y - 0.4).abs() < 1e-6);

        assert_eq!(out[2 * HandJoint::IndexTip.index()], x);
        assert_eq!(out[2 * HandJoint::IndexTip.index() + 1], y);
    }

    #[test]
    fn test_mirror_flips_horizontal_order() {
        let mut points = [Landmark::new(0.5, 0.5); 21];
        points[0] = Landmark::new(0.2, 0.5);
        points[1] = Landmark::new(0.8, 0.5);
        let out = extract(&LandmarkSet::new(points).unwrap());

        // Leftmost in the image becomes rightmost after mirroring
        assert!(out.pair(0).0 > out.pair(1).0);
        assert_eq!(out.pair(1).0, 0.0);
    }

    #[test]
    fn test_extract_landmarks_wrong_count() {
        let points = vec![Landmark::new(0.5, 0.5); 10];
        let err = extract_landmarks(&points).unwrap_err();
        assert_eq!(
            err,
            HandsignError::LandmarkCount {
                expected: 21,
                actual: 10
            }
        );
    }

    #[test]
    fn test_extract_landmarks_matches_extract() {
        let set = ramp();
        let a = extract_landmarks(set.as_slice()).unwrap();
        let b = extract(&set);
        assert_eq!(a, b);
    }
}
