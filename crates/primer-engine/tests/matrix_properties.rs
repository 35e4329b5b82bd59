//! Mat4 properties checked against glam.
//!
//! Tests for:
//! - constructor layout vs glam's column-major matrices
//! - composition order and associativity
//! - translation and affine invariants

use glam::Vec3;
use primer_engine::math::Mat4;
use std::f32::consts::{FRAC_PI_2, FRAC_PI_3, PI};

// ============================================================================
// Helper
// ============================================================================

const EPSILON: f32 = 1e-5;

fn approx_mat(a: &Mat4, b: [f32; 16]) -> bool {
    a.to_cols_array()
        .iter()
        .zip(b.iter())
        .all(|(x, y)| (x - y).abs() < EPSILON)
}

fn approx_point(a: [f32; 3], b: Vec3) -> bool {
    (a[0] - b.x).abs() < EPSILON && (a[1] - b.y).abs() < EPSILON && (a[2] - b.z).abs() < EPSILON
}

const ANGLES: [f32; 6] = [0.0, 0.3, FRAC_PI_3, FRAC_PI_2, PI, -1.7];

// ============================================================================
// Constructors vs glam
// ============================================================================

#[test]
fn rotations_match_glam() {
    for a in ANGLES {
        assert!(approx_mat(&Mat4::rotation_x(a), glam::Mat4::from_rotation_x(a).to_cols_array()));
        assert!(approx_mat(&Mat4::rotation_y(a), glam::Mat4::from_rotation_y(a).to_cols_array()));
        assert!(approx_mat(&Mat4::rotation_z(a), glam::Mat4::from_rotation_z(a).to_cols_array()));
    }
}

#[test]
fn scale_and_translation_match_glam() {
    let s = Mat4::scale(2.5);
    assert!(approx_mat(&s, glam::Mat4::from_scale(Vec3::splat(2.5)).to_cols_array()));

    let t = Mat4::translation(1.0, -2.0, 3.5);
    assert!(approx_mat(
        &t,
        glam::Mat4::from_translation(Vec3::new(1.0, -2.0, 3.5)).to_cols_array()
    ));
}

#[test]
fn identity_matches_glam() {
    assert_eq!(Mat4::identity().to_cols_array(), glam::Mat4::IDENTITY.to_cols_array());
}

// ============================================================================
// Composition
// ============================================================================

#[test]
fn multiply_matches_glam() {
    let a = Mat4::translation(0.5, 1.0, -2.0) * Mat4::rotation_y(0.9);
    let b = Mat4::rotation_z(-0.4) * Mat4::scale(0.8);

    let ga = glam::Mat4::from_cols_array(&a.to_cols_array());
    let gb = glam::Mat4::from_cols_array(&b.to_cols_array());

    assert!(approx_mat(&a.multiply(&b), (ga * gb).to_cols_array()));
    assert!(approx_mat(&b.multiply(&a), (gb * ga).to_cols_array()));
}

#[test]
fn multiply_is_associative_within_tolerance() {
    let a = Mat4::rotation_x(0.7);
    let b = Mat4::translation(3.0, 0.0, 1.0);
    let c = Mat4::rotation_z(2.1) * Mat4::scale(1.5);

    let left = (a * b) * c;
    let right = a * (b * c);
    assert!(approx_mat(&left, right.to_cols_array()));
}

#[test]
fn identity_is_neutral_on_both_sides() {
    let m = Mat4::translation(1.0, 2.0, 3.0) * Mat4::rotation_y(0.25) * Mat4::scale(4.0);
    assert_eq!(Mat4::IDENTITY * m, m);
    assert_eq!(m * Mat4::IDENTITY, m);
}

#[test]
fn composition_applies_right_to_left() {
    // Scale first, then translate: the offset is not scaled.
    let m = Mat4::translation(1.0, 0.0, 0.0) * Mat4::scale(2.0);
    assert!(approx_point(m.transform_point([1.0, 1.0, 1.0]), Vec3::new(3.0, 2.0, 2.0)));

    // Translate first, then scale: the offset is scaled too.
    let m = Mat4::scale(2.0) * Mat4::translation(1.0, 0.0, 0.0);
    assert!(approx_point(m.transform_point([1.0, 1.0, 1.0]), Vec3::new(4.0, 2.0, 2.0)));
}

#[test]
fn transform_point_matches_glam() {
    let m = Mat4::translation(-1.0, 0.5, 2.0) * Mat4::rotation_x(1.1) * Mat4::scale(0.5);
    let g = glam::Mat4::from_cols_array(&m.to_cols_array());

    for p in [[1.0, 0.0, 0.0], [0.0, 2.0, -3.0], [4.0, -1.0, 0.25]] {
        let expected = g.transform_point3(Vec3::from_array(p));
        assert!(approx_point(m.transform_point(p), expected));
    }
}

// ============================================================================
// Invariants
// ============================================================================

#[test]
fn zero_translation_is_identity() {
    assert_eq!(Mat4::translation(0.0, 0.0, 0.0), Mat4::IDENTITY);
}

#[test]
fn translation_adds_offset_exactly() {
    let points = [[0.0, 0.0, 0.0], [1.0, -2.0, 3.0], [0.5, 0.25, -8.0], [-100.0, 42.0, 7.5]];
    let offsets = [(1.0, 2.0, 3.0), (-0.5, 0.0, 4.25), (0.0, -16.0, 0.125)];

    for (x, y, z) in offsets {
        let t = Mat4::translation(x, y, z);
        for p in points {
            assert_eq!(t.transform_point(p), [p[0] + x, p[1] + y, p[2] + z]);
        }
    }
}

#[test]
fn every_constructor_and_product_is_affine() {
    let ms = [
        Mat4::identity(),
        Mat4::rotation_x(0.3),
        Mat4::rotation_y(1.3),
        Mat4::rotation_z(-2.0),
        Mat4::scale(0.1),
        Mat4::translation(9.0, -9.0, 0.5),
    ];
    for a in &ms {
        assert!(a.is_affine());
        for b in &ms {
            assert!((a * b).is_affine());
        }
    }
}

#[test]
fn rotations_preserve_length() {
    let p = Vec3::new(0.3, -1.2, 2.0);
    for a in ANGLES {
        for m in [Mat4::rotation_x(a), Mat4::rotation_y(a), Mat4::rotation_z(a)] {
            let q = m.transform_point(p.to_array());
            assert!((Vec3::from_array(q).length() - p.length()).abs() < EPSILON);
        }
    }
}

#[test]
fn full_turn_returns_to_identity() {
    let m = Mat4::rotation_y(PI) * Mat4::rotation_y(PI);
    assert!(approx_mat(&m, Mat4::IDENTITY.to_cols_array()));
}
