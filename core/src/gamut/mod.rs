//! Locus algebra: subsets of the plane as a closed sum type.
//!
//! A `Gamut` is the set of positions a sketch point may occupy given the
//! constraints whose other dependencies are already solved. Intersection
//! operators are exact (closed-form geometry, no iteration) and always
//! return simplified values.

use crate::geometry::{distance, unit, Circle, Line, Point2, EPSILON};
use serde::{Deserialize, Serialize};

mod intersect;


/// Freedom score of a 1-D locus (line or circle). Any plausible sum of
/// 0-D members ranks strictly below this.
pub const FREEDOM_CURVE: u64 = 100_000;

/// Freedom score of the whole plane.
pub const FREEDOM_PLANE: u64 = FREEDOM_CURVE * FREEDOM_CURVE;

/// A subset of the plane.
///
/// Externally visible gamuts are simplified: a `Union` has at least two
/// members, none of which is itself a `Union` or `Void`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Gamut {
    /// Every position in the plane.
    Plane,
    /// An infinite line.
    Line(Line),
    /// A full circle.
    Circle(Circle),
    /// A single position.
    Point(Point2),
    /// Disjunction of other gamuts.
    Union(Vec<Gamut>),
    /// The empty set.
    Void,
}

impl Gamut {
    /// Union of two points, the usual outcome of a curve intersection.
    pub(crate) fn point_pair(p: Point2, q: Point2) -> Gamut {
        Gamut::Union(vec![Gamut::Point(p), Gamut::Point(q)])
    }

    /// Canonical form: members simplified, unions flattened, void members
    /// dropped, empty unions rewritten to `Void` and singletons unwrapped.
    pub fn simplify(self) -> Gamut {
        match self {
            Gamut::Union(members) => {
                let mut flat = Vec::with_capacity(members.len());
                for member in members {
                    match member.simplify() {
                        Gamut::Void => {}
                        Gamut::Union(inner) => flat.extend(inner),
                        other => flat.push(other),
                    }
                }
                match flat.len() {
                    0 => Gamut::Void,
                    1 => flat.remove(0),
                    _ => Gamut::Union(flat),
                }
            }
            other => other,
        }
    }

    /// Dimension-ordered score used to rank candidate variables during
    /// propagation. Only relative order is meaningful.
    pub fn freedom(&self) -> u64 {
        match self {
            Gamut::Plane => FREEDOM_PLANE,
            Gamut::Line(_) | Gamut::Circle(_) => FREEDOM_CURVE,
            Gamut::Point(_) => 1,
            Gamut::Union(members) => members.iter().map(Gamut::freedom).sum(),
            Gamut::Void => 0,
        }
    }

    /// True iff the gamut contains no position. A non-simplified union
    /// whose members are all empty counts as empty.
    pub fn is_empty(&self) -> bool {
        match self {
            Gamut::Void => true,
            Gamut::Union(members) => members.iter().all(Gamut::is_empty),
            _ => false,
        }
    }

    /// The position in the gamut closest to `q`, or `None` iff empty.
    ///
    /// Union ties are broken by member order. A query at a circle's
    /// center snaps to `center + (r, 0)` for determinism.
    pub fn nearest(&self, q: &Point2) -> Option<Point2> {
        match self {
            Gamut::Plane => Some(*q),
            Gamut::Point(p) => Some(*p),
            Gamut::Line(l) => Some(l.project_point(q)),
            Gamut::Circle(c) => {
                let radial = q - c.center;
                match unit(&radial) {
                    Some(u) => Some(c.center + u * c.radius),
                    None => Some(c.center + crate::geometry::Vector2::new(c.radius, 0.0)),
                }
            }
            Gamut::Union(members) => {
                let mut best: Option<Point2> = None;
                for member in members {
                    if let Some(p) = member.nearest(q) {
                        if best.map_or(true, |b| distance(&p, q) < distance(&b, q)) {
                            best = Some(p);
                        }
                    }
                }
                best
            }
            Gamut::Void => None,
        }
    }

    /// Whether `p` belongs to the gamut within EPSILON.
    pub fn contains(&self, p: &Point2) -> bool {
        match self.nearest(p) {
            Some(n) => distance(&n, p) <= EPSILON,
            None => false,
        }
    }
}
