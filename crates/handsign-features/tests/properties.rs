//! Property tests for feature extraction

use handsign_core::{Landmark, LandmarkSet, FEATURE_LEN, LANDMARK_COUNT};
use handsign_features::{extract, extract_with_bounds, synthetic};
use proptest::prelude::*;

fn landmark() -> impl Strategy<Value = Landmark> {
    (0.0f32..=1.0, 0.0f32..=1.0).prop_map(|(x, y)| Landmark::new(x, y))
}

fn hand() -> impl Strategy<Value = LandmarkSet> {
    prop::collection::vec(landmark(), LANDMARK_COUNT)
        .prop_map(|points| LandmarkSet::from_slice(&points).expect("21 finite points"))
}

proptest! {
    #[test]
    fn output_is_42_non_negative(set in hand()) {
        let out = extract(&set);
        prop_assert_eq!(out.len(), FEATURE_LEN);
        prop_assert!(out.iter().all(|&v| v >= 0.0));
    }

    #[test]
    fn extraction_is_deterministic(set in hand()) {
        let a = extract(&set);
        let b = extract(&set);
        for (x, y) in a.iter().zip(b.iter()) {
            prop_assert_eq!(x.to_bits(), y.to_bits());
        }
    }

    #[test]
    fn bounding_box_touches_origin(set in hand()) {
        let out = extract(&set);
        let min_x = (0..LANDMARK_COUNT).map(|i| out.pair(i).0).fold(f32::INFINITY, f32::min);
        let min_y = (0..LANDMARK_COUNT).map(|i| out.pair(i).1).fold(f32::INFINITY, f32::min);
        prop_assert_eq!(min_x, 0.0);
        prop_assert_eq!(min_y, 0.0);
    }

    #[test]
    fn vertical_shift_leaves_output_unchanged(
        base in prop::collection::vec((0.0f32..=1.0, 0.25f32..=0.5), LANDMARK_COUNT),
        dy in -0.25f32..=0.25,
    ) {
        // Grid-aligned coordinates keep the subtraction exact
        let snap = |v: f32| (v * 1024.0).round() / 1024.0;
        let dy = snap(dy);

        let original: Vec<Landmark> = base.iter().map(|&(x, y)| Landmark::new(snap(x), snap(y))).collect();
        let shifted: Vec<Landmark> = original.iter().map(|lm| Landmark::new(lm.x, lm.y + dy)).collect();

        let a = extract(&LandmarkSet::from_slice(&original).unwrap());
        let b = extract(&LandmarkSet::from_slice(&shifted).unwrap());
        prop_assert_eq!(a, b);
    }

    #[test]
    fn uniform_hand_is_all_zero(point in landmark()) {
        let out = extract(&synthetic::uniform(point).unwrap());
        prop_assert!(out.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn bounds_match_mirrored_minimum(set in hand()) {
        let out = extract_with_bounds(&set);
        let expected_x = set.iter().map(|lm| 1.0 - lm.x).fold(f32::INFINITY, f32::min);
        let expected_y = set.iter().map(|lm| lm.y).fold(f32::INFINITY, f32::min);
        prop_assert_eq!(out.min_x, expected_x);
        prop_assert_eq!(out.min_y, expected_y);
    }
}

#[test]
fn self_test_ramp_matches_known_values() {
    let out = extract_with_bounds(&synthetic::SELF_TEST.landmarks().unwrap());

    assert_eq!(out.features.len(), 42);
    let (x0, y0) = out.features.pair(0);
    assert!((x0 - 0.20).abs() < 1e-5);
    assert_eq!(y0, 0.0);

    let (x20, y20) = out.features.pair(20);
    assert_eq!(x20, 0.0);
    assert!((y20 - 0.20).abs() < 1e-5);
}
