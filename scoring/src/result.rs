use std::fmt;

/// Maps a raw score onto `[0, 1]`.
///
/// Shared by the network and heuristic paths. Scores at or above 2 map to 0.
#[inline]
pub fn score_as_percent(score: f32) -> f32 {
    ((score - 2.0) / -2.0).clamp(0.0, 1.0)
}

/// Outcome of a single recognition attempt.
#[derive(Debug, Clone, PartialEq)]
pub struct RecognitionResult {
    pub success: bool,
    pub score: f32,
    pub label: String,
}

impl RecognitionResult {
    pub fn new(success: bool, score: f32, label: impl Into<String>) -> Self {
        Self {
            success,
            score,
            label: label.into(),
        }
    }

    pub fn score_as_percent(&self) -> f32 {
        score_as_percent(self.score)
    }
}

impl fmt::Display for RecognitionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "label {} score {:.6} percent {:.4} success {}",
            self.label,
            self.score,
            self.score_as_percent(),
            self.success
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent_is_zero_from_two_upwards() {
        assert_eq!(score_as_percent(2.0), 0.0);
        assert_eq!(score_as_percent(3.5), 0.0);
        assert_eq!(score_as_percent(f32::MAX), 0.0);
    }

    #[test]
    fn test_percent_is_affine_below_two() {
        assert!((score_as_percent(1.0) - 0.5).abs() < 1e-6);
        assert!((score_as_percent(0.1) - 0.95).abs() < 1e-6);
        assert_eq!(score_as_percent(0.0), 1.0);
    }

    #[test]
    fn test_percent_stays_in_unit_range() {
        for score in [-1000.0, -2.0, -0.5, 0.0, 0.25, 0.99, 1.999, 2.0, 40.0] {
            let p = score_as_percent(score);
            assert!((0.0..=1.0).contains(&p), "score {} gave {}", score, p);
        }
    }

    #[test]
    fn test_display() {
        let result = RecognitionResult::new(true, 0.5, "circle");
        assert_eq!(
            result.to_string(),
            "label circle score 0.500000 percent 0.7500 success true"
        );
    }
}
