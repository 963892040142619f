//! Greedy most-constrained-first propagation over point loci.
//!
//! Each round computes, for every unsolved point, the intersection of
//! the loci implied by its "certain" constraints (those whose other
//! dependencies are already solved), then commits the point with the
//! least freedom to the locus position nearest its initial guess.
//! Points the constraint system never determines are committed to their
//! initial guesses and reported as arbitrary.

use super::locus::{solve_local, LocalSolve};
use super::types::{Constraint, PointId, PointMap};
use crate::gamut::{Gamut, FREEDOM_CURVE};
use crate::geometry::Point2;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

/// One committed propagation step, for the host's diagnostic panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolveStep {
    pub variable: PointId,
    /// The initial guess the chosen position was snapped from.
    pub initial: Point2,
    /// Each certain constraint with the locus it induced.
    pub constraint_loci: Vec<(Constraint, Gamut)>,
    /// Intersection of all the above.
    pub locus: Gamut,
    pub freedom: u64,
    pub chosen: Point2,
}

/// Result of one solve: fresh positions plus the per-step log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolveResult {
    pub solution: PointMap,
    pub log: Vec<SolveStep>,
    /// Ids committed to their initial guess because the constraint
    /// system did not determine them (under-constrained or infeasible).
    pub arbitrary: Vec<PointId>,
}

impl SolveResult {
    /// True when every point was pinned down to a 0-D locus.
    pub fn is_fully_determined(&self) -> bool {
        self.arbitrary.is_empty() && self.log.iter().all(|step| step.freedom < FREEDOM_CURVE)
    }

    /// Points committed on a 1-D or wider locus; their positions still
    /// depend on the initial guess along at least one direction.
    pub fn underconstrained_points(&self) -> Vec<&PointId> {
        self.log
            .iter()
            .filter(|step| step.freedom >= FREEDOM_CURVE)
            .map(|step| &step.variable)
            .collect()
    }

    pub fn position(&self, id: &PointId) -> Option<&Point2> {
        self.solution.get(id)
    }
}

/// Solve a constraint system over the given initial positions.
///
/// Deterministic: equal inputs (including the insertion order of
/// `initial`) produce identical solutions and logs.
pub fn solve(initial: PointMap, constraints: Vec<Constraint>) -> SolveResult {
    let mut solved = PointMap::new();
    let mut log: Vec<SolveStep> = Vec::new();
    let mut arbitrary: Vec<PointId> = Vec::new();

    while solved.len() < initial.len() {
        let mut best: Option<(PointId, Point2, LocalSolve)> = None;

        for (id, guess) in initial.iter() {
            if solved.contains(id) {
                continue;
            }
            let certain: Vec<&Constraint> = constraints
                .iter()
                .filter(|c| c.mentions(id))
                .filter(|c| {
                    c.dependencies()
                        .iter()
                        .all(|dep| *dep == id || solved.contains(dep))
                })
                .collect();
            let local = solve_local(id, &certain, &solved);
            trace!(variable = %id, freedom = local.freedom, "examined candidate");

            // A void locus cannot be committed this round, and a plane
            // locus carries no constraint information; both sort last.
            if local.gamut.is_empty() || matches!(local.gamut, Gamut::Plane) {
                continue;
            }
            let better = match &best {
                Some((_, _, current)) => local.freedom < current.freedom,
                None => true,
            };
            if better {
                best = Some((id.clone(), *guess, local));
            }
        }

        match best {
            Some((id, guess, local)) => {
                let chosen = local.gamut.nearest(&guess).unwrap_or(guess);
                debug!(variable = %id, freedom = local.freedom, "committed point");
                log.push(SolveStep {
                    variable: id.clone(),
                    initial: guess,
                    constraint_loci: local.constraint_loci,
                    locus: local.gamut,
                    freedom: local.freedom,
                    chosen,
                });
                solved.insert(id, chosen);
            }
            None => {
                // No candidate can make progress: commit the rest to
                // their guesses and report them as arbitrary.
                for (id, guess) in initial.iter() {
                    if !solved.contains(id) {
                        solved.insert(id.clone(), *guess);
                        arbitrary.push(id.clone());
                    }
                }
                debug!(count = arbitrary.len(), "fell back to initial guesses");
                break;
            }
        }
    }

    SolveResult {
        solution: solved,
        log,
        arbitrary,
    }
}
