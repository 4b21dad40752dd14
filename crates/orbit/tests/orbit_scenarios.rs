//! Multi-level scenarios for world transform composition.
//!
//! A child only picks up its parent's world *position*, never its
//! orientation. These tests pin that behavior down with literal fixtures.

use glam::DVec2;
use matrix::Matrix;
use orbit::{OrbitalSystem, OrbiterId, OrbiterKind};
use palette::Srgb;
use std::f64::consts::{FRAC_PI_2, PI};

const EPSILON: f64 = 1e-9;

fn gray() -> Srgb {
    Srgb::new(0.5, 0.5, 0.5)
}

fn assert_close(actual: DVec2, expected: DVec2) {
    assert!(
        (actual - expected).length() < EPSILON,
        "expected {expected:?}, got {actual:?}"
    );
}

/// root -> planet (radius 10) -> moon (radius 5)
fn planet_and_moon(planet_angle: f64, moon_angle: f64) -> (OrbitalSystem, OrbiterId, OrbiterId) {
    let mut system = OrbitalSystem::new();
    let root = system
        .create_orbiter(None, 0.0, 0.0, 0.0, OrbiterKind::Circle, gray())
        .unwrap();
    let planet = system
        .create_orbiter(Some(root), 10.0, planet_angle, 0.0, OrbiterKind::Square, gray())
        .unwrap();
    let moon = system
        .create_orbiter(Some(planet), 5.0, moon_angle, 0.0, OrbiterKind::Triangle, gray())
        .unwrap();
    (system, planet, moon)
}

#[test]
fn test_axis_aligned_grandchild() {
    let (system, planet, moon) = planet_and_moon(0.0, 0.0);

    assert_close(system.world_position(planet).unwrap(), DVec2::new(10.0, 0.0));
    assert_close(system.world_position(moon).unwrap(), DVec2::new(15.0, 0.0));

    let expected = Matrix::from([
        [1.0, 0.0, 15.0],
        [0.0, 1.0, 0.0],
        [0.0, 0.0, 1.0],
    ]);
    assert!(system.matrix(moon).unwrap().approx_eq(&expected, EPSILON));
}

#[test]
fn test_origin_column_matches_world_position() {
    let (system, _, moon) = planet_and_moon(0.3, 1.1);

    let column = system
        .matrix(moon)
        .unwrap()
        .dot(&Matrix::point_h2d(0.0, 0.0))
        .unwrap();
    let by_hand = DVec2::new(
        column.entry(0, 0) / column.entry(2, 0),
        column.entry(1, 0) / column.entry(2, 0),
    );

    assert_close(system.world_position(moon).unwrap(), by_hand);
}

#[test]
fn test_grandchild_ignores_parent_rotation() {
    // Planet a quarter turn round, moon at its own angle 0
    let (system, planet, moon) = planet_and_moon(FRAC_PI_2, 0.0);

    assert_close(system.world_position(planet).unwrap(), DVec2::new(0.0, 10.0));

    // The moon's offset stays along world x instead of following the planet's
    // frame, which would put it at (0, 15)
    assert_close(system.world_position(moon).unwrap(), DVec2::new(5.0, 10.0));
}

#[test]
fn test_grandchild_uses_its_own_angle() {
    let (system, _, moon) = planet_and_moon(PI, FRAC_PI_2);

    assert_close(system.world_position(moon).unwrap(), DVec2::new(-10.0, 5.0));
}

#[test]
fn test_world_position_at_depth_sums_offsets() {
    let mut system = OrbitalSystem::new();
    let mut parent = system
        .create_orbiter(None, 0.0, 0.0, 0.0, OrbiterKind::Circle, gray())
        .unwrap();

    let mut expected = DVec2::ZERO;
    for level in 1..=6 {
        let angle = level as f64 * 0.4;
        let radius = level as f64;
        parent = system
            .create_orbiter(Some(parent), radius, angle, 0.0, OrbiterKind::Circle, gray())
            .unwrap();
        expected += DVec2::new(angle.cos(), angle.sin()) * radius;
    }

    assert_eq!(system.depth(parent).unwrap(), 6);
    assert_close(system.world_position(parent).unwrap(), expected);
}

#[test]
fn test_ticks_move_children_around_parent() {
    let mut system = OrbitalSystem::new();
    let root = system
        .create_orbiter(None, 0.0, 0.0, 0.0, OrbiterKind::Circle, gray())
        .unwrap();
    let child = system
        .create_orbiter(Some(root), 2.0, 0.0, PI, OrbiterKind::Circle, gray())
        .unwrap();

    // Half a unit of time at PI rad/unit is a quarter turn
    for _ in 0..5 {
        system.tick(0.1);
    }
    assert!((system.get(child).unwrap().orbit_angle() - FRAC_PI_2).abs() < EPSILON);
    assert_close(system.world_position(child).unwrap(), DVec2::new(0.0, 2.0));

    for _ in 0..5 {
        system.tick(0.1);
    }
    assert_close(system.world_position(child).unwrap(), DVec2::new(-2.0, 0.0));
}

#[test]
fn test_world_matrix_keeps_rotation_block() {
    let angle = 0.75;
    let (system, _, moon) = planet_and_moon(0.2, angle);

    let world = system.matrix(moon).unwrap();
    let rotation = Matrix::rotation_h2d(angle);
    for i in 0..2 {
        for j in 0..2 {
            assert!((world.entry(i, j) - rotation.entry(i, j)).abs() < EPSILON);
        }
    }
    assert_eq!(world.entry(2, 0), 0.0);
    assert_eq!(world.entry(2, 1), 0.0);
    assert_eq!(world.entry(2, 2), 1.0);
}
