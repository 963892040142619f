use crate::geometry::Point2;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

/// Identifier for a sketch point.
///
/// Ids are caller-chosen strings; hosts commonly introduce helper ids
/// such as `"origin"` or `"x-axis"` and pin them with `Fixed`
/// constraints. The solver treats every id identically.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PointId(String);

impl PointId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for PointId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for PointId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// An ordered pair of point ids, standing for the infinite line (or the
/// segment) through the two points.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PointPair {
    pub p0: PointId,
    pub p1: PointId,
}

impl PointPair {
    pub fn new(p0: impl Into<PointId>, p1: impl Into<PointId>) -> Self {
        Self {
            p0: p0.into(),
            p1: p1.into(),
        }
    }

    pub fn contains(&self, id: &PointId) -> bool {
        self.p0 == *id || self.p1 == *id
    }

    /// The member that is not `id` (`p0` when `id` is neither).
    pub fn other(&self, id: &PointId) -> &PointId {
        if self.p0 == *id {
            &self.p1
        } else {
            &self.p0
        }
    }
}

/// A geometric constraint between sketch points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Constraint {
    /// Pin a point to an exact position.
    Fixed { point: PointId, position: Point2 },
    /// Distance between two points.
    Distance { a: PointId, b: PointId, value: f64 },
    /// Undirected angle (radians) between the infinite lines through two
    /// point pairs. Acute and obtuse readings are equally valid.
    Angle {
        a: PointPair,
        b: PointPair,
        value: f64,
    },
    /// Perpendicular distance between a point and the infinite line
    /// through a point pair.
    DistancePointLine {
        point: PointId,
        line: PointPair,
        value: f64,
    },
}

impl Constraint {
    /// Every point id the constraint mentions, deduplicated, in payload
    /// order.
    pub fn dependencies(&self) -> Vec<&PointId> {
        match self {
            Constraint::Fixed { point, .. } => vec![point],
            Constraint::Distance { a, b, .. } => {
                let mut deps = vec![a];
                if b != a {
                    deps.push(b);
                }
                deps
            }
            Constraint::Angle { a, b, .. } => {
                let mut deps: Vec<&PointId> = vec![&a.p0];
                for id in [&a.p1, &b.p0, &b.p1] {
                    if !deps.contains(&id) {
                        deps.push(id);
                    }
                }
                deps
            }
            Constraint::DistancePointLine { point, line, .. } => {
                let mut deps: Vec<&PointId> = vec![point];
                for id in [&line.p0, &line.p1] {
                    if !deps.contains(&id) {
                        deps.push(id);
                    }
                }
                deps
            }
        }
    }

    /// Whether the constraint mentions `id`.
    pub fn mentions(&self, id: &PointId) -> bool {
        match self {
            Constraint::Fixed { point, .. } => point == id,
            Constraint::Distance { a, b, .. } => a == id || b == id,
            Constraint::Angle { a, b, .. } => a.contains(id) || b.contains(id),
            Constraint::DistancePointLine { point, line, .. } => {
                point == id || line.contains(id)
            }
        }
    }

    /// Host-side pre-flight validation of the payload. The solver itself
    /// is total and normalizes what it can (e.g. negative radii); this
    /// catches inputs that are certainly mistakes.
    pub fn validate(&self) -> Result<(), ConstraintError> {
        match self {
            Constraint::Fixed { position, .. } => {
                if !position.x.is_finite() || !position.y.is_finite() {
                    return Err(ConstraintError::NonFinitePosition(position.x, position.y));
                }
                Ok(())
            }
            Constraint::Distance { value, .. }
            | Constraint::DistancePointLine { value, .. } => {
                if !value.is_finite() || *value < 0.0 {
                    return Err(ConstraintError::InvalidDistance(*value));
                }
                Ok(())
            }
            Constraint::Angle { value, .. } => {
                if !value.is_finite() {
                    return Err(ConstraintError::InvalidAngle(*value));
                }
                Ok(())
            }
        }
    }
}

/// Errors reported by [`Constraint::validate`].
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConstraintError {
    #[error("Position must be finite, got ({0}, {1})")]
    NonFinitePosition(f64, f64),

    #[error("Distance must be finite and non-negative, got {0}")]
    InvalidDistance(f64),

    #[error("Angle must be finite, got {0}")]
    InvalidAngle(f64),
}

/// An insertion-ordered mapping from point id to position.
///
/// Iteration order is the insertion order, which makes the solve
/// deterministic and doubles as the tie-breaker among equally
/// constrained candidates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PointMap {
    positions: HashMap<PointId, Point2>,
    order: Vec<PointId>,
}

impl PointMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or update a position. New ids append to the iteration
    /// order; existing ids keep their slot.
    pub fn insert(&mut self, id: PointId, position: Point2) {
        if !self.positions.contains_key(&id) {
            self.order.push(id.clone());
        }
        self.positions.insert(id, position);
    }

    pub fn get(&self, id: &PointId) -> Option<&Point2> {
        self.positions.get(id)
    }

    pub fn contains(&self, id: &PointId) -> bool {
        self.positions.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Ordered iteration over `(id, position)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&PointId, &Point2)> {
        self.order
            .iter()
            .filter_map(|id| self.positions.get(id).map(|p| (id, p)))
    }

    pub fn ids(&self) -> impl Iterator<Item = &PointId> {
        self.order.iter()
    }

    /// Move an id to the front of the iteration order. Hosts use this as
    /// the dragging hint: the promoted point wins freedom ties and is
    /// considered first each round.
    pub fn promote(&mut self, id: &PointId) {
        if self.positions.contains_key(id) {
            self.order.retain(|other| other != id);
            self.order.insert(0, id.clone());
        }
    }
}

impl FromIterator<(PointId, Point2)> for PointMap {
    fn from_iter<T: IntoIterator<Item = (PointId, Point2)>>(iter: T) -> Self {
        let mut map = Self::new();
        for (id, position) in iter {
            map.insert(id, position);
        }
        map
    }
}
