use std::f32::consts::PI;

use crate::point::Point;

/// Turning-direction features of a stroke.
///
/// One value per consecutive pair: `atan2(dy, dx) / PI`, which lies in
/// `[-1, 1]`. Absolute position and scale are discarded.
pub fn angles(points: &[Point]) -> Vec<f32> {
    points
        .windows(2)
        .map(|pair| (pair[1].y - pair[0].y).atan2(pair[1].x - pair[0].x) / PI)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simplify;

    #[test]
    fn test_cardinal_directions() {
        let points = [
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0), // right
            Point::new(1.0, 1.0), // up
            Point::new(0.0, 1.0), // left
            Point::new(0.0, 0.0), // down
            Point::new(1.0, 1.0), // diagonal
        ];
        let features = angles(&points);
        let expected = [0.0, 0.5, 1.0, -0.5, 0.25];

        assert_eq!(features.len(), expected.len());
        for (actual, expected) in features.iter().zip(expected) {
            assert!((actual - expected).abs() < 1e-6, "{} != {}", actual, expected);
        }
    }

    #[test]
    fn test_length_and_range_after_simplify() {
        let stroke: Vec<Point> = (0..33)
            .map(|i| {
                let t = i as f32 * 0.41;
                Point::new(t.sin() * 120.0, t.cos() * 60.0 - i as f32 * 4.0)
            })
            .collect();

        for n in [2, 10, 20, 41] {
            let features = angles(&simplify(&stroke, n));
            assert_eq!(features.len(), n - 1);
            assert!(features.iter().all(|a| (-1.0..=1.0).contains(a)));
        }
    }

    #[test]
    fn test_single_point_has_no_features() {
        assert!(angles(&[Point::new(2.0, 2.0)]).is_empty());
    }
}
