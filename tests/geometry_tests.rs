#![allow(missing_docs)]

use circuit_evo::simulation::error::SimulationError;
use circuit_evo::{Circuit, Collidable, Goal, GoalSpec, Obstacle, ObstacleSpec, Vector2};
use geo::CoordsIter;
use rand::Rng;

fn obstacle(center: Vector2, width: f32, height: f32, angle_degrees: f32) -> Obstacle {
    Obstacle::new(ObstacleSpec {
        center,
        width,
        height,
        angle_degrees,
    })
    .expect("valid obstacle")
}

fn random_point<R: Rng>(rng: &mut R, min: f32, max: f32) -> Vector2 {
    Vector2::new(rng.random_range(min..max), rng.random_range(min..max))
}

#[test]
fn test_axis_aligned_obstacle_matches_direct_test() {
    let center = Vector2::new(100.0, 100.0);
    let (width, height) = (20.0, 40.0);
    let obstacle = obstacle(center, width, height, 0.0);
    let mut rng = rand::rng();

    for _ in 0..500 {
        let p = random_point(&mut rng, 50.0, 150.0);
        let expected = p.x >= center.x - width / 2.0
            && p.x <= center.x + width / 2.0
            && p.y >= center.y - height / 2.0
            && p.y <= center.y + height / 2.0;
        assert_eq!(obstacle.contains(&p), expected, "point {:?}", p);
    }
}

#[test]
fn test_rotated_obstacle_is_rotation_invariant() {
    let rotated = obstacle(Vector2::ZERO, 40.0, 10.0, 30.0);
    let axis_aligned = obstacle(Vector2::ZERO, 40.0, 10.0, 0.0);
    let mut rng = rand::rng();

    let mut inside = 0;
    for _ in 0..1000 {
        let p = random_point(&mut rng, -30.0, 30.0);
        let unrotated = p.rotate(-rotated.angle());
        let hit = rotated.contains(&p);
        assert_eq!(hit, axis_aligned.contains(&unrotated), "point {:?}", p);
        if hit {
            inside += 1;
        }
    }
    assert!(inside > 0, "sampling should hit the obstacle at least once");
}

#[test]
fn test_rotated_obstacle_covers_its_rotated_extent() {
    // A 100x10 bar rotated by 90 degrees stands upright.
    let bar = obstacle(Vector2::new(50.0, 50.0), 100.0, 10.0, 90.0);

    assert!(bar.contains(&Vector2::new(50.0, 95.0)));
    assert!(bar.contains(&Vector2::new(50.0, 5.0)));
    assert!(!bar.contains(&Vector2::new(95.0, 50.0)));
    assert!(!bar.contains(&Vector2::new(5.0, 50.0)));
}

#[test]
fn test_obstacle_scenario_b() {
    let obstacle = obstacle(Vector2::new(100.0, 100.0), 20.0, 20.0, 0.0);

    assert!(obstacle.contains(&Vector2::new(100.0, 100.0)));
    assert!(!obstacle.contains(&Vector2::new(150.0, 150.0)));
}

#[test]
fn test_obstacle_boundary_is_inclusive() {
    let obstacle = obstacle(Vector2::new(0.0, 0.0), 20.0, 10.0, 0.0);

    assert!(obstacle.contains(&Vector2::new(10.0, 5.0)));
    assert!(obstacle.contains(&Vector2::new(-10.0, -5.0)));
    assert!(!obstacle.contains(&Vector2::new(10.5, 0.0)));
}

#[test]
fn test_goal_contains_center_and_rejects_far_points() {
    let center = Vector2::new(300.0, 200.0);
    let goal = Goal::new(GoalSpec {
        center,
        width: 80.0,
        height: 40.0,
    })
    .expect("valid goal");
    let reach = goal.semi_horizontal().max(goal.semi_vertical()) + 1.0;

    assert!(goal.contains(&center));
    assert!(!goal.contains(&Vector2::new(center.x + reach, center.y)));
    assert!(!goal.contains(&Vector2::new(center.x - reach, center.y)));
    assert!(!goal.contains(&Vector2::new(center.x, center.y + reach)));
    assert!(!goal.contains(&Vector2::new(center.x, center.y - reach)));
}

#[test]
fn test_goal_is_an_ellipse() {
    let goal = Goal::new(GoalSpec {
        center: Vector2::ZERO,
        width: 80.0,
        height: 40.0,
    })
    .expect("valid goal");

    // On both semi-axes; boundary is inclusive.
    assert!(goal.contains(&Vector2::new(40.0, 0.0)));
    assert!(goal.contains(&Vector2::new(0.0, 20.0)));
    // Inside the bounding box but outside the ellipse.
    assert!(!goal.contains(&Vector2::new(35.0, 15.0)));
}

#[test]
fn test_degenerate_shapes_are_rejected() {
    let goal = Goal::new(GoalSpec {
        center: Vector2::ZERO,
        width: 0.0,
        height: 10.0,
    });
    assert!(matches!(
        goal,
        Err(SimulationError::DegenerateGeometry { shape: "goal", .. })
    ));

    let obstacle = Obstacle::new(ObstacleSpec {
        center: Vector2::ZERO,
        width: 10.0,
        height: -1.0,
        angle_degrees: 0.0,
    });
    assert!(matches!(
        obstacle,
        Err(SimulationError::DegenerateGeometry {
            shape: "obstacle",
            ..
        })
    ));
}

#[test]
fn test_circuit_keeps_obstacle_order() {
    let goal = GoalSpec {
        center: Vector2::new(500.0, 500.0),
        width: 50.0,
        height: 50.0,
    };
    let specs: Vec<ObstacleSpec> = (0..4)
        .map(|i| ObstacleSpec {
            center: Vector2::new(i as f32 * 100.0, 0.0),
            width: 10.0,
            height: 10.0,
            angle_degrees: 45.0,
        })
        .collect();

    let circuit = Circuit::new(goal, &specs).expect("valid circuit");

    assert_eq!(circuit.obstacles().len(), 4);
    for (i, obstacle) in circuit.obstacles().iter().enumerate() {
        assert_eq!(obstacle.center(), Vector2::new(i as f32 * 100.0, 0.0));
        assert!((obstacle.angle() - std::f32::consts::FRAC_PI_4).abs() < 1e-6);
    }
}

#[test]
fn test_circuit_rejects_any_degenerate_obstacle() {
    let goal = GoalSpec {
        center: Vector2::ZERO,
        width: 10.0,
        height: 10.0,
    };
    let specs = [
        ObstacleSpec {
            center: Vector2::ZERO,
            width: 10.0,
            height: 10.0,
            angle_degrees: 0.0,
        },
        ObstacleSpec {
            center: Vector2::ZERO,
            width: 10.0,
            height: 0.0,
            angle_degrees: 0.0,
        },
    ];

    assert!(Circuit::new(goal, &specs).is_err());
}

#[test]
fn test_outlines() {
    let bar = obstacle(Vector2::new(10.0, 10.0), 20.0, 4.0, 90.0);
    let outline = bar.outline();
    // Closed ring of a rectangle.
    assert_eq!(outline.exterior().coords_count(), 5);
    for coord in outline.exterior().coords() {
        assert!((coord.x - 10.0).abs() <= 2.0 + 1e-3);
        assert!((coord.y - 10.0).abs() <= 10.0 + 1e-3);
    }

    let goal = Goal::new(GoalSpec {
        center: Vector2::ZERO,
        width: 30.0,
        height: 10.0,
    })
    .expect("valid goal");
    for coord in goal.outline().exterior().coords() {
        let p = Vector2::new(coord.x * 0.99, coord.y * 0.99);
        assert!(goal.contains(&p));
    }
}
