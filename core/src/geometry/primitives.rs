use super::{distance, unit, ApproxEq, Point2, Vector2, EPSILON};
use serde::{Deserialize, Serialize};

/// An infinite line through two distinct positions.
///
/// The two points only fix the direction; operations treat the line as
/// unbounded. Near-coincident endpoints leave the direction undefined and
/// the projection helpers degrade to the `from` endpoint instead of
/// dividing by zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Line {
    pub from: Point2,
    pub to: Point2,
}

impl Line {
    pub fn new(from: Point2, to: Point2) -> Self {
        Self { from, to }
    }

    /// Line through `origin` along `direction`.
    pub fn through(origin: Point2, direction: Vector2) -> Self {
        Self {
            from: origin,
            to: origin + direction,
        }
    }

    pub fn direction(&self) -> Vector2 {
        self.to - self.from
    }

    /// Unit direction, or `None` when the endpoints are near-coincident.
    pub fn unit_direction(&self) -> Option<Vector2> {
        unit(&self.direction())
    }

    pub fn is_degenerate(&self) -> bool {
        self.unit_direction().is_none()
    }

    /// Orthogonal projection of `p` onto the line. A degenerate line
    /// projects everything onto its `from` endpoint.
    pub fn project_point(&self, p: &Point2) -> Point2 {
        match self.unit_direction() {
            Some(u) => self.from + u * (p - self.from).dot(&u),
            None => self.from,
        }
    }

    /// Perpendicular distance from `p` to the infinite line.
    pub fn distance_to_point(&self, p: &Point2) -> f64 {
        distance(&self.project_point(p), p)
    }

    /// Whether `p` lies on the line within EPSILON.
    pub fn contains_point(&self, p: &Point2) -> bool {
        self.distance_to_point(p) <= EPSILON
    }
}

/// A full circle with non-negative radius.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub center: Point2,
    pub radius: f64,
}

impl Circle {
    /// Negative input radii are normalized to their absolute value.
    pub fn new(center: Point2, radius: f64) -> Self {
        Self {
            center,
            radius: radius.abs(),
        }
    }

    /// Whether `p` lies on the circle boundary within EPSILON.
    pub fn contains_point(&self, p: &Point2) -> bool {
        (distance(&self.center, p) - self.radius).approx_eq(&0.0)
    }
}

/// A finite segment between two positions; used for projection helpers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub start: Point2,
    pub end: Point2,
}

impl Segment {
    pub fn new(start: Point2, end: Point2) -> Self {
        Self { start, end }
    }

    pub fn length(&self) -> f64 {
        distance(&self.start, &self.end)
    }

    /// Parameter t of the projection of `p`, so that the foot of the
    /// perpendicular is `start + t * (end - start)`. Degenerate segments
    /// yield 0.
    pub fn project_param(&self, p: &Point2) -> f64 {
        let d = self.end - self.start;
        let len_sq = d.norm_squared();
        if len_sq < EPSILON * EPSILON {
            return 0.0;
        }
        (p - self.start).dot(&d) / len_sq
    }

    /// Closest point on the segment (clamped to the endpoints).
    pub fn closest_point(&self, p: &Point2) -> Point2 {
        let t = self.project_param(p).clamp(0.0, 1.0);
        self.start + (self.end - self.start) * t
    }
}
