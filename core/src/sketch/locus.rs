//! Translation of constraints into loci for a single target point.
//!
//! Every branch is total: degenerate inputs collapse to `Plane`
//! (unconstraining) or `Void` (infeasible) instead of raising, so the
//! propagation loop can treat every constraint uniformly.

use super::types::{Constraint, PointId, PointMap, PointPair};
use crate::gamut::Gamut;
use crate::geometry::{distance, midpoint, perp, unit, Circle, Line, Vector2, EPSILON};
use std::f64::consts::FRAC_PI_2;

/// The set of positions `target` may occupy under `constraint`, given
/// the already-solved positions of the constraint's other dependencies.
///
/// A dependency missing from `solved` (a scheduling error on the
/// caller's part) degrades to `Plane` rather than panicking.
pub fn locus_of(target: &PointId, constraint: &Constraint, solved: &PointMap) -> Gamut {
    match constraint {
        Constraint::Fixed { point, position } => {
            if point == target {
                Gamut::Point(*position)
            } else {
                Gamut::Plane
            }
        }
        Constraint::Distance { a, b, value } => {
            let other = if a == target { b } else { a };
            if other == target {
                // Self-distance carries no information about a position.
                return Gamut::Plane;
            }
            match solved.get(other) {
                Some(center) => Gamut::Circle(Circle::new(*center, *value)),
                None => Gamut::Plane,
            }
        }
        Constraint::Angle { a, b, value } => match (a.contains(target), b.contains(target)) {
            (true, true) => inscribed_angle_locus(target, a, b, *value, solved),
            (true, false) => direction_angle_locus(target, a, b, *value, solved),
            (false, true) => direction_angle_locus(target, b, a, *value, solved),
            (false, false) => Gamut::Plane,
        },
        Constraint::DistancePointLine { point, line, value } => {
            point_line_locus(target, point, line, *value, solved)
        }
    }
}

/// Inscribed-angle case: the target appears in both pairs, so the lines
/// meet at the target itself and the locus follows the inscribed angle
/// theorem: the union of the two circles through the pair anchors from
/// which the chord subtends `theta`.
fn inscribed_angle_locus(
    target: &PointId,
    a: &PointPair,
    b: &PointPair,
    theta: f64,
    solved: &PointMap,
) -> Gamut {
    let (a_anchor, b_anchor) = match (solved.get(a.other(target)), solved.get(b.other(target))) {
        (Some(p), Some(q)) => (*p, *q),
        _ => return Gamut::Plane,
    };

    let chord = b_anchor - a_anchor;
    let n = match unit(&perp(&chord)) {
        Some(n) => n,
        // Coincident anchors: the chord direction is undefined.
        None => return Gamut::Void,
    };
    let tan = theta.tan();
    if tan.abs() < EPSILON {
        // theta at 0 or π: the isoceles height diverges.
        return Gamut::Void;
    }

    let base = distance(&a_anchor, &b_anchor);
    let height = (base / 2.0) / tan;
    let mid = midpoint(&a_anchor, &b_anchor);
    let c0 = mid + n * height;
    let c1 = mid - n * height;
    let radius = distance(&c0, &a_anchor);

    Gamut::Union(vec![
        Gamut::Circle(Circle::new(c0, radius)),
        Gamut::Circle(Circle::new(c1, radius)),
    ])
}

/// Standard angle case: the target appears only in `my`. The other
/// pair's direction is fully solved, so the target must lie on one of
/// the two lines through `my`'s anchor at ±theta off that direction.
fn direction_angle_locus(
    target: &PointId,
    my: &PointPair,
    other: &PointPair,
    theta: f64,
    solved: &PointMap,
) -> Gamut {
    let (o0, o1) = match (solved.get(&other.p0), solved.get(&other.p1)) {
        (Some(p), Some(q)) => (*p, *q),
        _ => return Gamut::Plane,
    };
    let u = match unit(&(o1 - o0)) {
        Some(u) => u,
        // The reference segment has no direction; nothing to constrain.
        None => return Gamut::Plane,
    };
    let anchor = match solved.get(my.other(target)) {
        Some(p) => *p,
        None => return Gamut::Plane,
    };

    let alpha = u.y.atan2(u.x);
    let plus = Line::through(anchor, direction(alpha + theta));
    if theta.abs() <= EPSILON || (theta - FRAC_PI_2).abs() <= EPSILON {
        // ±theta produce the same undirected line.
        return Gamut::Line(plus);
    }
    let minus = Line::through(anchor, direction(alpha - theta));
    Gamut::Union(vec![Gamut::Line(plus), Gamut::Line(minus)])
}

/// Point-to-line distance. Three shapes depending on which role the
/// target plays.
fn point_line_locus(
    target: &PointId,
    point: &PointId,
    line: &PointPair,
    value: f64,
    solved: &PointMap,
) -> Gamut {
    let value = value.abs();

    // A point lying on the measured segment constrains nothing here.
    if line.contains(point) {
        return Gamut::Plane;
    }

    if target == point {
        // The target keeps distance `value` from a fully solved line:
        // the two parallels offset to either side.
        let (p0, p1) = match (solved.get(&line.p0), solved.get(&line.p1)) {
            (Some(p), Some(q)) => (*p, *q),
            _ => return Gamut::Plane,
        };
        let u = match unit(&(p1 - p0)) {
            Some(u) => u,
            None => return Gamut::Plane,
        };
        let offset = perp(&u) * value;
        return Gamut::Union(vec![
            Gamut::Line(Line::new(p0 + offset, p1 + offset)),
            Gamut::Line(Line::new(p0 - offset, p1 - offset)),
        ]);
    }

    // The target is a segment endpoint: the line through the solved
    // anchor endpoint must pass at distance `value` from the measured
    // point, i.e. make an angle of asin(value / |anchor→point|) with the
    // anchor→point direction.
    let measured = match solved.get(point) {
        Some(p) => *p,
        None => return Gamut::Plane,
    };
    let anchor = match solved.get(line.other(target)) {
        Some(p) => *p,
        None => return Gamut::Plane,
    };

    let reach = distance(&anchor, &measured);
    if reach < EPSILON {
        return Gamut::Plane;
    }
    let toward = match unit(&(measured - anchor)) {
        Some(u) => u,
        None => return Gamut::Plane,
    };
    if (reach - value).abs() <= EPSILON {
        // The measured point sits exactly at arm's length: only the
        // perpendicular through the anchor works.
        return Gamut::Line(Line::through(anchor, perp(&toward)));
    }
    if value > reach {
        return Gamut::Void;
    }

    let theta = (value / reach).asin();
    let alpha = toward.y.atan2(toward.x);
    Gamut::Union(vec![
        Gamut::Line(Line::through(anchor, direction(alpha + theta))),
        Gamut::Line(Line::through(anchor, direction(alpha - theta))),
    ])
}

fn direction(angle: f64) -> Vector2 {
    Vector2::new(angle.cos(), angle.sin())
}

/// Result of intersecting every certain constraint's locus for one
/// variable.
#[derive(Debug, Clone, PartialEq)]
pub struct LocalSolve {
    /// The intersected locus.
    pub gamut: Gamut,
    /// Each contributing constraint with the locus it induced, for the
    /// diagnostic log.
    pub constraint_loci: Vec<(Constraint, Gamut)>,
    pub freedom: u64,
}

/// Fold the loci of `constraints` over `intersect`, starting from the
/// whole plane.
pub fn solve_local(
    target: &PointId,
    constraints: &[&Constraint],
    solved: &PointMap,
) -> LocalSolve {
    let mut gamut = Gamut::Plane;
    let mut constraint_loci = Vec::with_capacity(constraints.len());
    for constraint in constraints {
        let locus = locus_of(target, constraint, solved);
        gamut = gamut.intersect(&locus);
        constraint_loci.push(((*constraint).clone(), locus));
    }
    let freedom = gamut.freedom();
    LocalSolve {
        gamut,
        constraint_loci,
        freedom,
    }
}
