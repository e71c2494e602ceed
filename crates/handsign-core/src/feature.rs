//! Feature vector handed to the inference runtime

use std::ops::Index;

use serde::{Deserialize, Serialize};

use crate::{HandsignError, HandsignResult, LANDMARK_COUNT};

/// Number of f32 elements in a feature vector (x and y per landmark)
pub const FEATURE_LEN: usize = LANDMARK_COUNT * 2;

/// Flat `[x0, y0, x1, y1, ..., x20, y20]` buffer of 32-bit floats
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f32>", into = "Vec<f32>")]
pub struct FeatureVector([f32; FEATURE_LEN]);

impl FeatureVector {
    pub fn new(values: [f32; FEATURE_LEN]) -> Self {
        Self(values)
    }

    pub fn from_slice(values: &[f32]) -> HandsignResult<Self> {
        let values: [f32; FEATURE_LEN] =
            values.try_into().map_err(|_| HandsignError::FeatureLength {
                expected: FEATURE_LEN,
                actual: values.len(),
            })?;
        Ok(Self(values))
    }

    pub fn len(&self) -> usize {
        FEATURE_LEN
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    /// Buffer in tensor element order
    pub fn as_slice(&self) -> &[f32] {
        &self.0
    }

    pub fn into_inner(self) -> [f32; FEATURE_LEN] {
        self.0
    }

    /// `(x, y)` pair for landmark `i`
    pub fn pair(&self, i: usize) -> (f32, f32) {
        (self.0[2 * i], self.0[2 * i + 1])
    }

    pub fn iter(&self) -> impl Iterator<Item = &f32> {
        self.0.iter()
    }
}

impl Index<usize> for FeatureVector {
    type Output = f32;

    fn index(&self, index: usize) -> &f32 {
        &self.0[index]
    }
}

impl TryFrom<Vec<f32>> for FeatureVector {
    type Error = HandsignError;

    fn try_from(values: Vec<f32>) -> HandsignResult<Self> {
        Self::from_slice(&values)
    }
}

impl From<FeatureVector> for Vec<f32> {
    fn from(v: FeatureVector) -> Self {
        v.0.to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feature_len() {
        assert_eq!(FEATURE_LEN, 42);
    }

    #[test]
    fn test_pair() {
        let mut values = [0.0f32; FEATURE_LEN];
        values[40] = 0.5;
        values[41] = 0.25;
        let v = FeatureVector::new(values);

        assert_eq!(v.pair(20), (0.5, 0.25));
        assert_eq!(v[41], 0.25);
    }

    #[test]
    fn test_from_slice_wrong_length() {
        let err = FeatureVector::from_slice(&[0.0; 40]).unwrap_err();
        assert_eq!(
            err,
            HandsignError::FeatureLength {
                expected: 42,
                actual: 40
            }
        );
    }

    #[test]
    fn test_serde_as_flat_array() {
        let v = FeatureVector::new([1.0; FEATURE_LEN]);
        let json = serde_json::to_string(&v).unwrap();
        let back: FeatureVector = serde_json::from_str(&json).unwrap();
        assert_eq!(back, v);

        let short = "[1.0, 2.0]";
        assert!(serde_json::from_str::<FeatureVector>(short).is_err());
    }
}
