//! Closed-form 2D curve intersections for the constraint solver.

use super::{distance, perp, rotate, Circle, Line, Point2, EPSILON};

/// Intersection of two infinite lines.
///
/// Uses the orthogonal-projection formula with a normal of `a`'s
/// direction. The parallel branch is taken on a bit-exact zero
/// denominator; callers distinguish coincident from disjoint parallels
/// themselves.
pub fn line_line_intersection(a: &Line, b: &Line) -> Option<Point2> {
    let n = perp(&a.direction());
    let denom = n.dot(&b.direction());
    if denom == 0.0 {
        return None;
    }
    let t = n.dot(&(a.from - b.from)) / denom;
    Some(b.from + b.direction() * t)
}

/// Outcome of intersecting two circles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CircleCircle {
    /// The circles are the same circle (within EPSILON).
    Coincident,
    /// No common point.
    Empty,
    /// A single tangent point.
    Tangent(Point2),
    /// Two points, symmetric about the line of centers.
    Pair(Point2, Point2),
}

/// Intersection of two circles. Negative radii are normalized.
pub fn circle_circle_intersection(a: &Circle, b: &Circle) -> CircleCircle {
    let r_a = a.radius.abs();
    let r_b = b.radius.abs();
    let d = distance(&a.center, &b.center);

    if d <= EPSILON {
        if (r_a - r_b).abs() <= EPSILON {
            return CircleCircle::Coincident;
        }
        return CircleCircle::Empty;
    }

    let u = (b.center - a.center) / d;

    // Tangency: separation equals the sum or difference of the radii.
    // The tangent point sits on the line of centers, weighted by radii.
    if (d - (r_a + r_b)).abs() <= EPSILON || (d - (r_a - r_b).abs()).abs() <= EPSILON {
        let t = (r_a * r_a - r_b * r_b + d * d) / (2.0 * d);
        return CircleCircle::Tangent(a.center + u * t);
    }

    // Law of Cosines for the half-angle at a's center. An out-of-range
    // argument means the circles are isolated (too far apart, or one
    // strictly inside the other).
    let cos_alpha = (r_a * r_a + d * d - r_b * r_b) / (2.0 * r_a * d);
    if !(-1.0..=1.0).contains(&cos_alpha) {
        return CircleCircle::Empty;
    }
    let alpha = cos_alpha.acos();

    CircleCircle::Pair(
        a.center + rotate(&u, alpha) * r_a,
        a.center + rotate(&u, -alpha) * r_a,
    )
}

/// Intersection of a circle with an infinite line: 0, 1 or 2 points.
///
/// A degenerate line (undefined direction) intersects nothing here;
/// callers that want "unconstraining" semantics handle that before
/// calling.
pub fn circle_line_intersection(c: &Circle, l: &Line) -> Vec<Point2> {
    let u = match l.unit_direction() {
        Some(u) => u,
        None => return vec![],
    };
    let r = c.radius.abs();
    let nearest = l.project_point(&c.center);
    let d = distance(&nearest, &c.center);

    if d <= EPSILON {
        // Center on the line: the two points at ±radius from the center.
        return vec![c.center - u * r, c.center + u * r];
    }

    let h_sq = r * r - d * d;
    if h_sq < -EPSILON {
        return vec![];
    }
    if h_sq.abs() <= EPSILON {
        return vec![nearest];
    }

    let h = h_sq.sqrt();
    vec![nearest - u * h, nearest + u * h]
}
