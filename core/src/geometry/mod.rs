use nalgebra as na;

pub type Point2 = na::Point2<f64>;
pub type Vector2 = na::Vector2<f64>;

/// Tolerance for all geometric comparisons, in millimeters.
pub const EPSILON: f64 = 1e-3;

pub trait ApproxEq {
    fn approx_eq(&self, other: &Self) -> bool;
}

impl ApproxEq for f64 {
    fn approx_eq(&self, other: &Self) -> bool {
        (self - other).abs() < EPSILON
    }
}

impl ApproxEq for Point2 {
    fn approx_eq(&self, other: &Self) -> bool {
        na::distance_squared(self, other) < EPSILON * EPSILON
    }
}

impl ApproxEq for Vector2 {
    fn approx_eq(&self, other: &Self) -> bool {
        (self - other).norm_squared() < EPSILON * EPSILON
    }
}

pub mod primitives;
pub use primitives::*;

pub mod intersection;
pub use intersection::*;

pub fn dist_sq(p1: &Point2, p2: &Point2) -> f64 {
    na::distance_squared(p1, p2)
}

pub fn distance(p1: &Point2, p2: &Point2) -> f64 {
    na::distance(p1, p2)
}

pub fn midpoint(p1: &Point2, p2: &Point2) -> Point2 {
    na::center(p1, p2)
}

/// Normalize a vector, or `None` when its magnitude is below EPSILON and
/// the direction is undefined.
pub fn unit(v: &Vector2) -> Option<Vector2> {
    let len = v.norm();
    if len < EPSILON {
        None
    } else {
        Some(v / len)
    }
}

/// Counter-clockwise perpendicular.
#[inline]
pub fn perp(v: &Vector2) -> Vector2 {
    Vector2::new(-v.y, v.x)
}

/// Rotate a vector by `angle` radians (counter-clockwise).
pub fn rotate(v: &Vector2, angle: f64) -> Vector2 {
    let (sin, cos) = angle.sin_cos();
    Vector2::new(v.x * cos - v.y * sin, v.x * sin + v.y * cos)
}

/// Weighted sum of vectors: `Σ c_i · v_i`.
pub fn linear_sum(terms: &[(f64, Vector2)]) -> Vector2 {
    terms
        .iter()
        .fold(Vector2::zeros(), |acc, (c, v)| acc + v * *c)
}
