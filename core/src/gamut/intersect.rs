//! Pairwise intersection operators over gamuts.
//!
//! All operators return simplified gamuts. `intersect` is commutative in
//! outcome even though the dispatch order differs.

use super::Gamut;
use crate::geometry::{
    circle_circle_intersection, circle_line_intersection, line_line_intersection, distance,
    Circle, CircleCircle, Line, Point2, EPSILON,
};

fn points_to_gamut(points: Vec<Point2>) -> Gamut {
    match points.len() {
        0 => Gamut::Void,
        1 => Gamut::Point(points[0]),
        _ => Gamut::Union(points.into_iter().map(Gamut::Point).collect()),
    }
}

impl Gamut {
    /// Intersection with a full circle.
    pub fn intersect_circle(&self, c: &Circle) -> Gamut {
        match self {
            Gamut::Plane => Gamut::Circle(*c),
            Gamut::Circle(a) => match circle_circle_intersection(a, c) {
                CircleCircle::Coincident => Gamut::Circle(*a),
                CircleCircle::Empty => Gamut::Void,
                CircleCircle::Tangent(p) => Gamut::Point(p),
                CircleCircle::Pair(p, q) => Gamut::point_pair(p, q),
            },
            Gamut::Line(l) => points_to_gamut(circle_line_intersection(c, l)),
            Gamut::Point(p) => {
                if c.contains_point(p) {
                    Gamut::Point(*p)
                } else {
                    Gamut::Void
                }
            }
            Gamut::Union(members) => {
                Gamut::Union(members.iter().map(|m| m.intersect_circle(c)).collect()).simplify()
            }
            Gamut::Void => Gamut::Void,
        }
    }

    /// Intersection with a finite set of candidate lines (the union of
    /// the lines, as a set of positions).
    pub fn intersect_lines(&self, lines: &[Line]) -> Gamut {
        match self {
            Gamut::Plane => {
                Gamut::Union(lines.iter().copied().map(Gamut::Line).collect()).simplify()
            }
            Gamut::Circle(c) => {
                let mut points = Vec::new();
                for l in lines {
                    points.extend(circle_line_intersection(c, l));
                }
                points_to_gamut(points)
            }
            Gamut::Line(l0) => {
                let mut results = Vec::with_capacity(lines.len());
                for l in lines {
                    match line_line_intersection(l0, l) {
                        Some(p) => results.push(Gamut::Point(p)),
                        // Parallel: a coincident candidate contributes
                        // the whole line, a separated one nothing.
                        None => {
                            if l.distance_to_point(&l0.from) <= EPSILON {
                                results.push(Gamut::Line(*l0));
                            } else {
                                results.push(Gamut::Void);
                            }
                        }
                    }
                }
                Gamut::Union(results).simplify()
            }
            Gamut::Point(p) => {
                if lines.iter().any(|l| l.contains_point(p)) {
                    Gamut::Point(*p)
                } else {
                    Gamut::Void
                }
            }
            Gamut::Union(members) => {
                Gamut::Union(members.iter().map(|m| m.intersect_lines(lines)).collect()).simplify()
            }
            Gamut::Void => Gamut::Void,
        }
    }

    /// General pairwise intersection.
    pub fn intersect(&self, other: &Gamut) -> Gamut {
        if matches!(self, Gamut::Plane) {
            return other.clone();
        }
        if matches!(other, Gamut::Plane) {
            return self.clone();
        }
        if matches!(self, Gamut::Void) || matches!(other, Gamut::Void) {
            return Gamut::Void;
        }
        let result = match other {
            Gamut::Union(members) => {
                Gamut::Union(members.iter().map(|m| self.intersect(m)).collect()).simplify()
            }
            Gamut::Circle(c) => self.intersect_circle(c),
            Gamut::Line(l) => self.intersect_lines(std::slice::from_ref(l)),
            Gamut::Point(p) => match self.nearest(p) {
                Some(n) if distance(&n, p) <= EPSILON => Gamut::Point(*p),
                _ => Gamut::Void,
            },
            Gamut::Plane | Gamut::Void => unreachable!("handled above"),
        };
        debug_assert!(result.is_canonical(), "intersection must simplify");
        result
    }

    /// Depth-1 unions with no void or union members; used by debug
    /// assertions on operator results.
    pub(crate) fn is_canonical(&self) -> bool {
        match self {
            Gamut::Union(members) => {
                members.len() >= 2
                    && members
                        .iter()
                        .all(|m| !matches!(m, Gamut::Union(_) | Gamut::Void))
            }
            _ => true,
        }
    }
}
