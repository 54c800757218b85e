//! Shape transforms used by the point-cloud heuristics.
//!
//! The neural path only relies on [`crate::simplify`]; these helpers give the
//! template matchers a scale and position invariant view of a stroke.

use crate::point::Point;

/// Scales the stroke uniformly so its bounding box fits `[0, 1] x [0, 1]`,
/// anchored at the box's minimum corner. Degenerate boxes (a single point)
/// are only translated.
pub fn scale(points: &[Point]) -> Vec<Point> {
    let (mut min_x, mut min_y) = (f32::MAX, f32::MAX);
    let (mut max_x, mut max_y) = (f32::MIN, f32::MIN);

    for p in points {
        min_x = min_x.min(p.x);
        min_y = min_y.min(p.y);
        max_x = max_x.max(p.x);
        max_y = max_y.max(p.y);
    }

    let size = (max_x - min_x).max(max_y - min_y);
    let size = if size > 0.0 { size } else { 1.0 };

    points
        .iter()
        .map(|p| Point::new((p.x - min_x) / size, (p.y - min_y) / size))
        .collect()
}

pub fn centroid(points: &[Point]) -> Point {
    if points.is_empty() {
        return Point::default();
    }

    let (sx, sy) = points
        .iter()
        .fold((0.0, 0.0), |(sx, sy), p| (sx + p.x, sy + p.y));
    let n = points.len() as f32;

    Point::new(sx / n, sy / n)
}

/// Moves every point by `-offset`.
pub fn translate(points: &[Point], offset: &Point) -> Vec<Point> {
    points
        .iter()
        .map(|p| Point::new(p.x - offset.x, p.y - offset.y))
        .collect()
}

pub fn translate_to_centroid(points: &[Point]) -> Vec<Point> {
    translate(points, &centroid(points))
}

pub fn path_length(points: &[Point]) -> f32 {
    points
        .windows(2)
        .map(|pair| pair[0].distance(&pair[1]))
        .sum()
}

/// Arc-length resampling to `n` equidistant points along the path.
///
/// Rounding can leave the walk one point short or long, so the result is
/// padded with the final sample or truncated to exactly `n` points.
pub fn resample(points: &[Point], n: usize) -> Vec<Point> {
    if points.is_empty() || n == 0 {
        return Vec::new();
    }
    if n == 1 || points.len() == 1 {
        return vec![points[0]; n];
    }

    let interval = path_length(points) / (n - 1) as f32;
    if interval <= 0.0 {
        return vec![points[0]; n];
    }

    let mut resampled = Vec::with_capacity(n);
    resampled.push(points[0]);

    let mut walked = 0.0;
    for i in 1..points.len() {
        let mut segment = points[i - 1].distance(&points[i]);

        if walked + segment >= interval {
            let mut from = points[i - 1];
            while walked + segment >= interval && resampled.len() < n {
                let t = if segment > 0.0 {
                    ((interval - walked) / segment).clamp(0.0, 1.0)
                } else {
                    0.5
                };

                let next = Point::new(
                    (1.0 - t) * from.x + t * points[i].x,
                    (1.0 - t) * from.y + t * points[i].y,
                );
                resampled.push(next);

                segment = walked + segment - interval;
                walked = 0.0;
                from = next;
            }
            walked = segment;
        } else {
            walked += segment;
        }
    }

    let last = points[points.len() - 1];
    resampled.resize(n, last);
    resampled
}
