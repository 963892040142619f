use super::measurement::constraint_residual;
use super::solver::solve;
use super::types::{Constraint, PointId, PointMap, PointPair};
use crate::gamut::FREEDOM_CURVE;
use crate::geometry::{distance, ApproxEq, Point2, EPSILON};

fn pt(x: f64, y: f64) -> Point2 {
    Point2::new(x, y)
}

fn id(s: &str) -> PointId {
    PointId::from(s)
}

fn initial(entries: &[(&str, Point2)]) -> PointMap {
    entries
        .iter()
        .map(|(name, p)| (PointId::from(*name), *p))
        .collect()
}

#[test]
fn test_triangle_with_side_50() {
    let guesses = initial(&[
        ("a", pt(100.0, 100.0)),
        ("b", pt(200.0, 300.0)),
        ("c", pt(400.0, 900.0)),
    ]);
    let constraints = vec![
        Constraint::Fixed {
            point: id("a"),
            position: pt(50.0, 50.0),
        },
        Constraint::Distance {
            a: id("a"),
            b: id("b"),
            value: 50.0,
        },
        Constraint::Distance {
            a: id("a"),
            b: id("c"),
            value: 50.0,
        },
        Constraint::Distance {
            a: id("b"),
            b: id("c"),
            value: 50.0,
        },
    ];

    let result = solve(guesses, constraints.clone());

    let a = *result.position(&id("a")).unwrap();
    let b = *result.position(&id("b")).unwrap();
    let c = *result.position(&id("c")).unwrap();
    assert!(a.approx_eq(&pt(50.0, 50.0)));
    assert!((distance(&a, &b) - 50.0).abs() < EPSILON);
    assert!((distance(&a, &c) - 50.0).abs() < EPSILON);
    assert!((distance(&b, &c) - 50.0).abs() < EPSILON);

    // Every constraint is satisfied in the solved configuration.
    for constraint in &constraints {
        assert!(constraint_residual(constraint, &result.solution).unwrap() < EPSILON);
    }

    // The fixed point commits first, on a 0-D locus; b lands on a full
    // circle; c on a two-point circle intersection.
    assert_eq!(result.log.len(), 3);
    assert_eq!(result.log[0].variable, id("a"));
    assert_eq!(result.log[0].freedom, 1);
    assert_eq!(result.log[1].variable, id("b"));
    assert_eq!(result.log[1].freedom, FREEDOM_CURVE);
    assert_eq!(result.log[2].variable, id("c"));
    assert!(result.log[2].freedom <= 3);
    assert!(result.arbitrary.is_empty());
}

#[test]
fn test_fully_unconstrained_point() {
    let guesses = initial(&[("p", pt(7.0, 11.0))]);
    let result = solve(guesses.clone(), vec![]);

    assert_eq!(result.solution, guesses);
    assert!(result.log.is_empty());
    assert_eq!(result.arbitrary, vec![id("p")]);
    assert!(!result.is_fully_determined());
}

#[test]
fn test_empty_constraints_mark_every_point_arbitrary() {
    let guesses = initial(&[
        ("a", pt(0.0, 0.0)),
        ("b", pt(1.0, 1.0)),
        ("c", pt(2.0, 2.0)),
    ]);
    let result = solve(guesses.clone(), vec![]);

    assert_eq!(result.solution, guesses);
    assert!(result.log.is_empty());
    assert_eq!(result.arbitrary.len(), 3);
}

#[test]
fn test_overconstrained_triangle_terminates() {
    // Side lengths 1, 1, 3 violate the triangle inequality. With no
    // anchor nothing is ever certain, so everything falls back to its
    // initial guess without hanging.
    let guesses = initial(&[
        ("a", pt(0.0, 0.0)),
        ("b", pt(1.0, 0.0)),
        ("c", pt(0.0, 1.0)),
    ]);
    let constraints = vec![
        Constraint::Distance {
            a: id("a"),
            b: id("b"),
            value: 1.0,
        },
        Constraint::Distance {
            a: id("b"),
            b: id("c"),
            value: 1.0,
        },
        Constraint::Distance {
            a: id("a"),
            b: id("c"),
            value: 3.0,
        },
    ];
    let result = solve(guesses.clone(), constraints);

    assert_eq!(result.solution, guesses);
    assert_eq!(result.arbitrary.len(), 3);
}

#[test]
fn test_infeasible_point_falls_back_to_its_guess() {
    // a and b are pinned 3 apart; c cannot be at distance 1 from both.
    let guesses = initial(&[
        ("a", pt(5.0, 5.0)),
        ("b", pt(9.0, 9.0)),
        ("c", pt(1.5, 0.25)),
    ]);
    let constraints = vec![
        Constraint::Fixed {
            point: id("a"),
            position: pt(0.0, 0.0),
        },
        Constraint::Fixed {
            point: id("b"),
            position: pt(3.0, 0.0),
        },
        Constraint::Distance {
            a: id("a"),
            b: id("c"),
            value: 1.0,
        },
        Constraint::Distance {
            a: id("b"),
            b: id("c"),
            value: 1.0,
        },
    ];
    let result = solve(guesses, constraints);

    assert_eq!(result.log.len(), 2);
    assert_eq!(result.arbitrary, vec![id("c")]);
    assert_eq!(result.position(&id("c")), Some(&pt(1.5, 0.25)));
}

#[test]
fn test_perpendicular_distance_picks_nearer_side() {
    let constraints = vec![
        Constraint::Fixed {
            point: id("a"),
            position: pt(0.0, 0.0),
        },
        Constraint::Fixed {
            point: id("b"),
            position: pt(10.0, 0.0),
        },
        Constraint::DistancePointLine {
            point: id("p"),
            line: PointPair::new("a", "b"),
            value: 3.0,
        },
    ];

    let above = solve(
        initial(&[("a", pt(0.0, 0.0)), ("b", pt(10.0, 0.0)), ("p", pt(5.0, 2.0))]),
        constraints.clone(),
    );
    let p = *above.position(&id("p")).unwrap();
    assert!(p.approx_eq(&pt(5.0, 3.0)));

    let below = solve(
        initial(&[("a", pt(0.0, 0.0)), ("b", pt(10.0, 0.0)), ("p", pt(4.0, -1.0))]),
        constraints,
    );
    let p = *below.position(&id("p")).unwrap();
    assert!(p.approx_eq(&pt(4.0, -3.0)));
}

#[test]
fn test_underconstrained_point_snaps_to_locus() {
    // One distance constraint: p stays on the circle, as close to its
    // guess as the locus allows, and is flagged under-constrained.
    let guesses = initial(&[("o", pt(50.0, 50.0)), ("p", pt(8.0, 6.0))]);
    let constraints = vec![
        Constraint::Fixed {
            point: id("o"),
            position: pt(0.0, 0.0),
        },
        Constraint::Distance {
            a: id("o"),
            b: id("p"),
            value: 5.0,
        },
    ];
    let result = solve(guesses, constraints);

    let p = *result.position(&id("p")).unwrap();
    assert!(p.approx_eq(&pt(4.0, 3.0)));
    assert_eq!(result.underconstrained_points(), vec![&id("p")]);
    assert!(!result.is_fully_determined());
    assert!(result.arbitrary.is_empty());
}

#[test]
fn test_determinism() {
    let build = || {
        let guesses = initial(&[
            ("a", pt(100.0, 100.0)),
            ("b", pt(200.0, 300.0)),
            ("c", pt(400.0, 900.0)),
        ]);
        let constraints = vec![
            Constraint::Fixed {
                point: id("a"),
                position: pt(50.0, 50.0),
            },
            Constraint::Distance {
                a: id("a"),
                b: id("b"),
                value: 50.0,
            },
            Constraint::Distance {
                a: id("a"),
                b: id("c"),
                value: 50.0,
            },
            Constraint::Distance {
                a: id("b"),
                b: id("c"),
                value: 50.0,
            },
        ];
        solve(guesses, constraints)
    };
    let first = build();
    let second = build();
    assert_eq!(first, second);
}

#[test]
fn test_promote_breaks_freedom_ties() {
    let constraints = vec![
        Constraint::Fixed {
            point: id("o"),
            position: pt(0.0, 0.0),
        },
        Constraint::Distance {
            a: id("o"),
            b: id("b"),
            value: 5.0,
        },
        Constraint::Distance {
            a: id("o"),
            b: id("c"),
            value: 5.0,
        },
    ];

    let plain = initial(&[("o", pt(0.0, 0.0)), ("b", pt(5.0, 1.0)), ("c", pt(1.0, 5.0))]);
    let result = solve(plain, constraints.clone());
    assert_eq!(result.log[1].variable, id("b"));

    // Promoting c front-loads it in the tie between the two circles.
    let mut dragged = initial(&[("o", pt(0.0, 0.0)), ("b", pt(5.0, 1.0)), ("c", pt(1.0, 5.0))]);
    dragged.promote(&id("c"));
    let result = solve(dragged, constraints);
    assert_eq!(result.log[1].variable, id("c"));
}

#[test]
fn test_log_records_loci_and_guesses() {
    let guesses = initial(&[("a", pt(1.0, 2.0)), ("b", pt(30.0, 0.0))]);
    let constraints = vec![
        Constraint::Fixed {
            point: id("a"),
            position: pt(0.0, 0.0),
        },
        Constraint::Distance {
            a: id("a"),
            b: id("b"),
            value: 10.0,
        },
    ];
    let result = solve(guesses, constraints);

    let step_a = &result.log[0];
    assert_eq!(step_a.initial, pt(1.0, 2.0));
    assert_eq!(step_a.constraint_loci.len(), 1);
    assert_eq!(step_a.chosen, pt(0.0, 0.0));

    let step_b = &result.log[1];
    assert_eq!(step_b.constraint_loci.len(), 1);
    assert!(step_b.chosen.approx_eq(&pt(10.0, 0.0)));
}

#[test]
fn test_constraints_on_unknown_ids_do_not_block() {
    // A constraint mentioning an id absent from the initial map can
    // never become certain; the known points still solve.
    let guesses = initial(&[("a", pt(1.0, 1.0))]);
    let constraints = vec![
        Constraint::Fixed {
            point: id("a"),
            position: pt(2.0, 2.0),
        },
        Constraint::Distance {
            a: id("a"),
            b: id("ghost"),
            value: 5.0,
        },
    ];
    let result = solve(guesses, constraints);
    assert_eq!(result.position(&id("a")), Some(&pt(2.0, 2.0)));
    assert!(!result.solution.contains(&id("ghost")));
}
