//! Polyline simplification (Ramer-Douglas-Peucker)

use crate::domain::CoordinatePair;

/// Simplify a polyline, dropping points closer than `tolerance` to the
/// segment joining their kept neighbours.
///
/// Works on planar coordinates; `tolerance` is in the same unit as the
/// points. First and last points are always kept. Fewer than three points,
/// or a non-positive tolerance, returns the input unchanged.
pub fn simplify_line(points: &[CoordinatePair], tolerance: f64) -> Vec<CoordinatePair> {
    if points.len() < 3 || tolerance <= 0.0 || tolerance.is_nan() {
        return points.to_vec();
    }

    let mut keep = vec![false; points.len()];
    keep[0] = true;
    keep[points.len() - 1] = true;

    // Explicit stack of (start, end) index ranges instead of recursion
    let mut stack = vec![(0, points.len() - 1)];
    while let Some((start, end)) = stack.pop() {
        if end <= start + 1 {
            continue;
        }

        let (index, distance) = (start + 1..end)
            .map(|i| (i, perpendicular_distance(points[i], points[start], points[end])))
            .fold((start, 0.0), |best, cur| if cur.1 > best.1 { cur } else { best });

        if distance > tolerance {
            keep[index] = true;
            stack.push((start, index));
            stack.push((index, end));
        }
    }

    points.iter().zip(keep).filter_map(|(p, k)| k.then_some(*p)).collect()
}

/// Distance from `p` to the line through `a` and `b` (to `a` if they coincide).
fn perpendicular_distance(p: CoordinatePair, a: CoordinatePair, b: CoordinatePair) -> f64 {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let length = dx.hypot(dy);
    if length == 0.0 {
        return (p.x - a.x).hypot(p.y - a.y);
    }
    (dy * p.x - dx * p.y + b.x * a.y - b.y * a.x).abs() / length
}
