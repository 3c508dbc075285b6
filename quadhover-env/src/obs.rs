//! Observation of [`HoverEnv`](crate::HoverEnv).
use quadhover_core::Obs;
use std::ops::Deref;

/// Observation vector produced by an [`EncoderStrategy`](crate::EncoderStrategy).
///
/// Components are raw simulator units. A new vector is produced at every
/// step; observations are never updated in place.
#[derive(Clone, Debug, PartialEq)]
pub struct HoverObs(Vec<f64>);

impl HoverObs {
    /// Returns the components.
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }
}

impl Obs for HoverObs {
    fn len(&self) -> usize {
        self.0.len()
    }
}

impl From<Vec<f64>> for HoverObs {
    fn from(v: Vec<f64>) -> Self {
        Self(v)
    }
}

impl Deref for HoverObs {
    type Target = [f64];

    fn deref(&self) -> &[f64] {
        &self.0
    }
}
