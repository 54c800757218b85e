use crate::point::Point;

/// Segments at or below this squared length are ignored when picking the
/// densify spacing, so jitter between near-duplicate samples does not force
/// the whole stroke to be subdivided.
pub const DENSIFY_TOLERANCE: f32 = 6.0;

/// Resamples an ordered stroke to exactly `target_count` points.
///
/// Runs three phases, always in this order:
/// 1. densify: split every segment longer than the tightest natural spacing
///    (the shortest segment above [`DENSIFY_TOLERANCE`]) until none remain,
/// 2. upsample: insert midpoints between every pair until there are at least
///    `target_count` points,
/// 3. decimate: take `points[floor(i * step)]` with `step = len / target_count`.
///
/// Deterministic and total for any non-empty input with `target_count >= 1`.
/// An empty input yields an empty output.
pub fn simplify(points: &[Point], target_count: usize) -> Vec<Point> {
    if points.is_empty() || target_count == 0 {
        return Vec::new();
    }

    if points.len() == target_count {
        return points.to_vec();
    }

    // A lone sample has no segments to subdivide
    if points.len() == 1 {
        return vec![points[0]; target_count];
    }

    let mut points = densify(points);

    while points.len() < target_count {
        points = upsample(&points);
    }

    if points.len() > target_count {
        points = decimate(&points, target_count);
    }

    points
}

fn least_spacing(points: &[Point]) -> f32 {
    points
        .windows(2)
        .map(|pair| pair[1].sqr_distance(&pair[0]))
        .filter(|&distance| distance > DENSIFY_TOLERANCE)
        .fold(f32::MAX, f32::min)
}

fn densify(points: &[Point]) -> Vec<Point> {
    let least = least_spacing(points);
    let original_len = points.len();

    let mut points = points.to_vec();
    loop {
        let mut inserted = 0;
        let mut next = Vec::with_capacity(points.len() * 2);
        next.push(points[0]);

        for pair in points.windows(2) {
            if pair[1].sqr_distance(&pair[0]) > least {
                next.push(pair[0].midpoint(&pair[1]));
                inserted += 1;
            }
            next.push(pair[1]);
        }

        points = next;
        if inserted == 0 {
            break;
        }
    }

    log::trace!("Densified {} -> {} points", original_len, points.len());
    points
}

fn upsample(points: &[Point]) -> Vec<Point> {
    let mut next = Vec::with_capacity(points.len() * 2 - 1);
    next.push(points[0]);

    for pair in points.windows(2) {
        next.push(pair[0].midpoint(&pair[1]));
        next.push(pair[1]);
    }

    next
}

// Floor-truncated stride sampling, no interpolation.
fn decimate(points: &[Point], target_count: usize) -> Vec<Point> {
    let step = points.len() as f64 / target_count as f64;
    let last = points.len() - 1;

    (0..target_count)
        .map(|i| points[((i as f64 * step).floor() as usize).min(last)])
        .collect()
}
