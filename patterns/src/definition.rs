use geometry::{angles, simplify, Point};

use crate::PatternError;

/// One labeled example stroke.
///
/// Points keep their insertion order since they describe the stroke path.
/// After [`normalize`](Self::normalize) the point count always equals the
/// sampling factor.
#[derive(Debug, Clone, PartialEq)]
pub struct PatternDefinition {
    name: String,
    points: Vec<Point>,
    sampling_factor: usize,
}

impl PatternDefinition {
    pub fn new(
        name: impl Into<String>,
        points: Vec<Point>,
        sampling_factor: usize,
    ) -> Result<Self, PatternError> {
        let name = name.into();

        if points.is_empty() {
            return Err(PatternError::InvalidInput(format!(
                "pattern '{}' has no points",
                name
            )));
        }
        if sampling_factor < 2 {
            return Err(PatternError::InvalidInput(format!(
                "pattern '{}' needs a sampling factor of at least 2, got {}",
                name, sampling_factor
            )));
        }

        Ok(Self {
            name,
            points,
            sampling_factor,
        })
    }

    /// Creates the definition and immediately resamples it to `sampling_factor` points.
    pub fn normalized(
        name: impl Into<String>,
        points: Vec<Point>,
        sampling_factor: usize,
    ) -> Result<Self, PatternError> {
        let mut pattern = Self::new(name, points, sampling_factor)?;
        pattern.normalize();
        Ok(pattern)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn sampling_factor(&self) -> usize {
        self.sampling_factor
    }

    pub fn is_normalized(&self) -> bool {
        self.points.len() == self.sampling_factor
    }

    pub fn normalize(&mut self) {
        self.points = simplify(&self.points, self.sampling_factor);
    }

    /// Re-simplifies the stroke to a new sampling factor.
    pub fn simplify_to(&mut self, sampling_factor: usize) -> Result<(), PatternError> {
        if sampling_factor < 2 {
            return Err(PatternError::InvalidInput(format!(
                "sampling factor must be at least 2, got {}",
                sampling_factor
            )));
        }

        self.sampling_factor = sampling_factor;
        self.normalize();
        Ok(())
    }

    pub fn angles(&self) -> Vec<f32> {
        angles(&self.points)
    }
}
