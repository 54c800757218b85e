use geometry::{simplify, Point};
use patterns::PatternDefinition;

use crate::HeuristicStrategy;

/// Greedy nearest-neighbour point-cloud matching.
///
/// For a subsample of starting offsets, every point of one cloud is matched
/// to the nearest unmatched point of the other and the squared distances are
/// summed. The result is the lowest sum over all offsets and both matching
/// directions. Offsets are taken every `n^(1 - epsilon)` points, so `1.0`
/// tries every offset and `0.0` only the first. With `weighted` set, the
/// pairs matched first weigh more than the later ones.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GreedyCloudMatch {
    epsilon: f32,
    weighted: bool,
}

impl GreedyCloudMatch {
    pub fn new(epsilon: f32, weighted: bool) -> Self {
        Self {
            epsilon: epsilon.min(1.0),
            weighted,
        }
    }

    pub fn epsilon(&self) -> f32 {
        self.epsilon
    }

    pub fn weighted(&self) -> bool {
        self.weighted
    }

    pub fn distance(&self, a: &[Point], b: &[Point]) -> f32 {
        let n = a.len();
        if n == 0 || b.is_empty() {
            return f32::MAX;
        }

        let resampled;
        let b = if b.len() == n {
            b
        } else {
            resampled = simplify(b, n);
            &resampled
        };

        let step = ((n as f32).powf(1.0 - self.epsilon).floor() as usize).max(1);

        (0..n)
            .step_by(step)
            .map(|start| {
                self.cloud_distance(a, b, start)
                    .min(self.cloud_distance(b, a, start))
            })
            .fold(f32::MAX, f32::min)
    }

    fn cloud_distance(&self, from: &[Point], to: &[Point], start: usize) -> f32 {
        let n = from.len();
        let mut matched = vec![false; n];
        let mut total = 0.0;

        let mut i = start;
        loop {
            let mut best = None;
            let mut min_distance = f32::MAX;
            for (m, point) in to.iter().enumerate() {
                if matched[m] {
                    continue;
                }
                let distance = from[i].sqr_distance(point);
                if distance < min_distance {
                    min_distance = distance;
                    best = Some(m);
                }
            }

            if let Some(m) = best {
                matched[m] = true;
                let weight = if self.weighted {
                    1.0 - ((i + n - start) % n) as f32 / n as f32
                } else {
                    1.0
                };
                total += min_distance * weight;
            }

            i = (i + 1) % n;
            if i == start {
                break;
            }
        }

        total
    }
}

impl Default for GreedyCloudMatch {
    fn default() -> Self {
        Self::new(0.5, true)
    }
}

impl HeuristicStrategy for GreedyCloudMatch {
    fn name(&self) -> &'static str {
        "greedy"
    }

    fn score(&self, candidate: &PatternDefinition, template: &PatternDefinition) -> f32 {
        self.distance(candidate.points(), template.points())
    }
}
