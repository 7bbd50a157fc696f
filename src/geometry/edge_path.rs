use egui::epaint::{CubicBezierShape, QuadraticBezierShape};
use egui::{Color32, Pos2, Stroke, pos2, vec2};

use crate::diagram::EdgeStyle;

/// Points sampled along each curve segment.
const CURVE_SAMPLES: usize = 24;
/// Corner radius of smooth-step edges.
const SMOOTH_STEP_RADIUS: f32 = 5.0;
/// Minimum vertical pull of bezier control points.
const MIN_CONTROL_OFFSET: f32 = 25.0;

/// Polyline approximating an edge from a source handle (bottom of a node)
/// down to a target handle (top of a node).
pub fn edge_path(style: EdgeStyle, from: Pos2, to: Pos2) -> Vec<Pos2> {
    match style {
        EdgeStyle::Straight => vec![from, to],
        EdgeStyle::Default => {
            let pull = ((to.y - from.y).abs() * 0.5).max(MIN_CONTROL_OFFSET);
            cubic(from, from + vec2(0.0, pull), to - vec2(0.0, pull), to)
        }
        EdgeStyle::Bezier => {
            let mid_y = (from.y + to.y) * 0.5;
            cubic(from, pos2(from.x, mid_y), pos2(to.x, mid_y), to)
        }
        EdgeStyle::Step => step_corners(from, to),
        EdgeStyle::SmoothStep => round_corners(&step_corners(from, to), SMOOTH_STEP_RADIUS),
    }
}

fn cubic(p0: Pos2, p1: Pos2, p2: Pos2, p3: Pos2) -> Vec<Pos2> {
    let curve = CubicBezierShape::from_points_stroke(
        [p0, p1, p2, p3],
        false,
        Color32::TRANSPARENT,
        Stroke::NONE,
    );
    (0..=CURVE_SAMPLES)
        .map(|i| curve.sample(i as f32 / CURVE_SAMPLES as f32))
        .collect()
}

/// Vertical, horizontal, vertical.
fn step_corners(from: Pos2, to: Pos2) -> Vec<Pos2> {
    let mid_y = (from.y + to.y) * 0.5;
    if (from.x - to.x).abs() < f32::EPSILON {
        return vec![from, to];
    }
    vec![from, pos2(from.x, mid_y), pos2(to.x, mid_y), to]
}

/// Replaces each interior corner with a quadratic arc.
fn round_corners(points: &[Pos2], radius: f32) -> Vec<Pos2> {
    if points.len() < 3 {
        return points.to_vec();
    }
    let mut out = vec![points[0]];
    for window in points.windows(3) {
        let (prev, corner, next) = (window[0], window[1], window[2]);
        let r = radius
            .min(prev.distance(corner) * 0.5)
            .min(next.distance(corner) * 0.5);
        let entry = corner + (prev - corner).normalized() * r;
        let exit = corner + (next - corner).normalized() * r;
        let arc = QuadraticBezierShape::from_points_stroke(
            [entry, corner, exit],
            false,
            Color32::TRANSPARENT,
            Stroke::NONE,
        );
        out.extend((0..=8).map(|i| arc.sample(i as f32 / 8.0)));
    }
    out.push(points[points.len() - 1]);
    out
}

/// Shortest distance from `p` to the segment `a`–`b`.
pub fn distance_to_segment(p: Pos2, a: Pos2, b: Pos2) -> f32 {
    let ab = b - a;
    let len_sq = ab.length_sq();
    if len_sq <= f32::EPSILON {
        return p.distance(a);
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    p.distance(a + ab * t)
}

pub fn distance_to_polyline(p: Pos2, points: &[Pos2]) -> f32 {
    match points {
        [] => f32::INFINITY,
        [only] => p.distance(*only),
        _ => points
            .windows(2)
            .map(|w| distance_to_segment(p, w[0], w[1]))
            .fold(f32::INFINITY, f32::min),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_style_connects_endpoints() {
        let from = pos2(10.0, 10.0);
        let to = pos2(200.0, 150.0);
        for style in EdgeStyle::ALL {
            let path = edge_path(style, from, to);
            assert!(path.first().unwrap().distance(from) < 0.01, "{style:?}");
            assert!(path.last().unwrap().distance(to) < 0.01, "{style:?}");
        }
    }

    #[test]
    fn test_step_is_axis_aligned() {
        let path = edge_path(EdgeStyle::Step, pos2(0.0, 0.0), pos2(100.0, 80.0));
        assert_eq!(
            path,
            vec![pos2(0.0, 0.0), pos2(0.0, 40.0), pos2(100.0, 40.0), pos2(100.0, 80.0)]
        );
    }

    #[test]
    fn test_smooth_step_stays_near_step() {
        let from = pos2(0.0, 0.0);
        let to = pos2(100.0, 80.0);
        let step = edge_path(EdgeStyle::Step, from, to);
        for p in edge_path(EdgeStyle::SmoothStep, from, to) {
            assert!(distance_to_polyline(p, &step) <= SMOOTH_STEP_RADIUS);
        }
    }

    #[test]
    fn test_distance_to_segment() {
        let a = pos2(0.0, 0.0);
        let b = pos2(10.0, 0.0);
        assert_eq!(distance_to_segment(pos2(5.0, 3.0), a, b), 3.0);
        assert_eq!(distance_to_segment(pos2(-4.0, 3.0), a, b), 5.0);
        assert_eq!(distance_to_segment(pos2(1.0, 1.0), a, a), 2f32.sqrt());
    }
}
