/// Bipolar sigmoid with a steepness (`elastic`) and a threshold shift (`theta`).
///
/// `sigmoid(x) = 2 / (1 + exp(-elastic * x + theta)) - 1`, ranging over `(-1, 1)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Activation {
    pub elastic: f32,
    pub theta: f32,
}

impl Activation {
    pub fn new(elastic: f32, theta: f32) -> Self {
        Self { elastic, theta }
    }

    #[inline(always)]
    pub fn sigmoid(&self, x: f32) -> f32 {
        2.0 / (1.0 + (-self.elastic * x + self.theta).exp()) - 1.0
    }

    /// Slope term used by the weight updates.
    ///
    /// Not the exact derivative of [`sigmoid`](Self::sigmoid); trained
    /// classifiers depend on this exact form.
    #[inline(always)]
    pub fn slope(&self, x: f32) -> f32 {
        2.0 * (-self.elastic * x - self.theta).exp()
            / (1.0 + (-2.0 * self.elastic * x - self.theta).exp())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sigmoid_range() {
        let activation = Activation::new(0.5, 0.5);
        for x in [-50.0, -3.0, -0.1, 0.0, 0.1, 3.0, 50.0] {
            let y = activation.sigmoid(x);
            assert!((-1.0..=1.0).contains(&y), "sigmoid({}) = {}", x, y);
        }
    }

    #[test]
    fn test_sigmoid_without_threshold_is_odd() {
        let activation = Activation::new(1.0, 0.0);
        assert_eq!(activation.sigmoid(0.0), 0.0);
        assert!((activation.sigmoid(1.5) + activation.sigmoid(-1.5)).abs() < 1e-6);
    }

    #[test]
    fn test_theta_shifts_the_curve() {
        let activation = Activation::new(1.0, 0.5);
        let expected = 2.0 / (1.0 + 0.5f32.exp()) - 1.0;
        assert!((activation.sigmoid(0.0) - expected).abs() < 1e-6);
        assert!(activation.sigmoid(0.0) < 0.0);
    }

    #[test]
    fn test_slope_at_zero() {
        let activation = Activation::new(0.5, 0.5);
        let expected = 2.0 * (-0.5f32).exp() / (1.0 + (-0.5f32).exp());
        assert!((activation.slope(0.0) - expected).abs() < 1e-6);
    }
}
