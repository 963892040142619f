//! Measurement calculations over solved sketch positions.
//!
//! Pure geometry queries used by the diagnostic panel and by tests to
//! check how far a configuration is from satisfying a constraint.

use super::types::{Constraint, PointMap};
use crate::geometry::{distance, Line, Point2, Segment};
use std::f64::consts::PI;

/// Distance between two points.
pub fn point_point_distance(p1: &Point2, p2: &Point2) -> f64 {
    distance(p1, p2)
}

/// Perpendicular distance from a point to the infinite line through
/// `from` and `to`. A degenerate line measures to `from` instead.
pub fn point_line_distance(point: &Point2, from: &Point2, to: &Point2) -> f64 {
    Line::new(*from, *to).distance_to_point(point)
}

/// Distance from a point to the closest position on a finite segment.
pub fn point_segment_distance(point: &Point2, start: &Point2, end: &Point2) -> f64 {
    distance(&Segment::new(*start, *end).closest_point(point), point)
}

/// Undirected angle between two lines, in `[0, π]`. Degenerate lines
/// measure as 0.
pub fn line_line_angle(l1: (&Point2, &Point2), l2: (&Point2, &Point2)) -> f64 {
    let d1 = l1.1 - l1.0;
    let d2 = l2.1 - l2.0;
    let len1 = d1.norm();
    let len2 = d2.norm();
    if len1 < 1e-10 || len2 < 1e-10 {
        return 0.0;
    }
    let dot = d1.dot(&d2) / (len1 * len2);
    dot.clamp(-1.0, 1.0).acos()
}

/// How far the positions in `points` are from satisfying `constraint`,
/// in the constraint's own units (millimeters, or radians for angles).
/// `None` when a referenced id has no position.
///
/// Angles compare undirected: an angle of θ and of π − θ both count as
/// satisfied, matching the constraint semantics.
pub fn constraint_residual(constraint: &Constraint, points: &PointMap) -> Option<f64> {
    match constraint {
        Constraint::Fixed { point, position } => {
            let actual = points.get(point)?;
            Some(distance(actual, position))
        }
        Constraint::Distance { a, b, value } => {
            let pa = points.get(a)?;
            let pb = points.get(b)?;
            Some((distance(pa, pb) - value.abs()).abs())
        }
        Constraint::Angle { a, b, value } => {
            let a0 = points.get(&a.p0)?;
            let a1 = points.get(&a.p1)?;
            let b0 = points.get(&b.p0)?;
            let b1 = points.get(&b.p1)?;
            let measured = line_line_angle((a0, a1), (b0, b1));
            let target = value.abs() % PI;
            Some((measured - target).abs().min((PI - measured - target).abs()))
        }
        Constraint::DistancePointLine { point, line, value } => {
            let p = points.get(point)?;
            let from = points.get(&line.p0)?;
            let to = points.get(&line.p1)?;
            Some((point_line_distance(p, from, to) - value.abs()).abs())
        }
    }
}
