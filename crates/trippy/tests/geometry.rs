//! End-to-end behaviour through the session API.

use std::f64::consts::PI;

use approx::assert_relative_eq;
use trippy::{
    CoordKind, DualVector, FrameId, FrameSpec, GeometryError, Session, Settings, Shape, TrippyError,
    Vec3,
};

fn cartesian_session() -> Session {
    Session::new(Settings {
        root_kind: CoordKind::Cartesian,
        ..Settings::default()
    })
    .unwrap()
}

/// root -> a -> b -> c, with a sibling branch a -> d.
fn four_levels(s: &mut Session) -> [FrameId; 4] {
    let root = s.root();
    let a = s
        .frame(DualVector::cartesian(0.0, 1.0, 0.0), root, FrameSpec::angles(0.2, 0.0, 0.4))
        .unwrap();
    let b = s
        .frame(
            DualVector::cylindrical(2.0, 0.7, -0.5),
            a,
            FrameSpec::angles(-0.6, 0.3, 0.0).with_kind(CoordKind::Cylindrical),
        )
        .unwrap();
    let c = s
        .frame(DualVector::cartesian(0.3, 0.3, 0.3), b, FrameSpec::angles(1.1, -0.2, 0.9))
        .unwrap();
    let d = s
        .frame(DualVector::cartesian(-1.0, 0.0, 2.0), a, FrameSpec::angles(0.0, PI / 3.0, 0.0))
        .unwrap();
    [a, b, c, d]
}

#[test]
fn coordinate_round_trip_near_pi() {
    for theta in [PI - 1e-9, -PI + 1e-9, PI, 3.0] {
        let v = DualVector::cylindrical(1.5, theta, -0.25);
        let back = v.to_cartesian().to_cylindrical();
        assert!((back.xyz() - v.xyz()).norm() < 1e-9);
    }
}

#[test]
fn transfer_agrees_with_root_ground_truth() {
    let mut s = cartesian_session();
    let [a, b, c, d] = four_levels(&mut s);
    let tree = s.tree();
    let frames = [s.root(), a, b, c, d];
    let p = tree.point(DualVector::cartesian(0.4, -0.7, 1.2), c).unwrap();
    let truth = tree.absolute(&p).unwrap();
    for &to in &frames {
        let q = tree.point_in(&p, to).unwrap();
        let world = tree.absolute(&q).unwrap();
        assert_relative_eq!(world.xyz(), truth.xyz(), epsilon = 1e-12);
    }
}

#[test]
fn reframing_is_idempotent() {
    let mut s = cartesian_session();
    let [_, _, c, d] = four_levels(&mut s);
    let p = s.point(DualVector::cartesian(1.0, 2.0, 3.0), c).unwrap();
    let there = s.point_in(&p, d).unwrap();
    let back = s.point_in(&there, c).unwrap();
    assert_relative_eq!(back.offset().xyz(), p.offset().xyz(), epsilon = 1e-12);
}

#[test]
fn frame_redefine_is_invisible_to_points() {
    let mut s = cartesian_session();
    let [a, b, c, d] = four_levels(&mut s);
    let p = s.point(DualVector::cartesian(0.1, 0.2, 0.3), c).unwrap();
    let before = s.tree().absolute(&p).unwrap();
    s.redefine(c, d).unwrap();
    let after = s.tree().absolute(&p).unwrap();
    assert_relative_eq!(before.xyz(), after.xyz(), epsilon = 1e-12);
    assert_eq!(s.tree().depth(c).unwrap(), 3);
    s.redefine(c, b).unwrap();
    assert_eq!(s.tree().parent(c).unwrap(), Some(b));
    assert!(matches!(
        s.redefine(a, c),
        Err(TrippyError::Geometry(GeometryError::FrameMismatch(_)))
    ));
}

#[test]
fn rect_hit_at_unit_distance() {
    let mut s = cartesian_session();
    let root = s.root();
    let rect = s
        .surface(
            DualVector::zero(CoordKind::Cartesian),
            root,
            Shape::rect(1.0, 1.0).unwrap(),
            FrameSpec::angles(0.0, 0.0, 0.0),
        )
        .unwrap();
    let origin = s.point(DualVector::cartesian(0.0, 0.0, -1.0), rect.frame()).unwrap();
    let ray = s.ray(origin, DualVector::cartesian(0.0, 0.0, 1.0)).unwrap();
    let d = s.intercept(&rect, &ray).unwrap().unwrap();
    assert!((d - 1.0).abs() < 1e-12);
}

#[test]
fn ellipse_containment() {
    let e = Shape::ellipse(1.0, 0.5).unwrap();
    assert!(e.edge_test(0.5, 0.0));
    assert!(!e.edge_test(0.0, 0.6));
}

#[test]
fn cylinder_half_angle_limit() {
    assert!(matches!(
        Shape::cylinder(1.0, PI, 1.0),
        Err(GeometryError::OutOfRange(_))
    ));
    assert!(Shape::cylinder(1.0, PI - 1e-9, 1.0).is_ok());
}

#[test]
fn split_conserves_area() {
    let mut s = cartesian_session();
    let root = s.root();
    let rect = s
        .surface(
            DualVector::cartesian(0.0, 0.0, 4.0),
            root,
            Shape::rect(1.5, 0.5).unwrap(),
            FrameSpec::angles(0.1, 0.2, 0.3),
        )
        .unwrap();
    for (n, m) in [(1, 1), (2, 3), (5, 4)] {
        let pieces = s.split(&rect, n, m).unwrap();
        let total: f64 = pieces.iter().flatten().map(|p| p.area()).sum();
        assert!((total - rect.area()).abs() < 1e-12);
    }
}

#[test]
fn split_pieces_tile_the_original() {
    let mut s = cartesian_session();
    let root = s.root();
    let rect = s
        .surface(
            DualVector::cartesian(1.0, 0.0, 0.0),
            root,
            Shape::rect(1.0, 2.0).unwrap(),
            FrameSpec::angles(0.5, 0.0, 0.0),
        )
        .unwrap();
    let pieces = s.split(&rect, 2, 2).unwrap();
    // a ray through a piece's centre hits both that piece and the original
    for piece in pieces.iter().flatten() {
        let centre = s.point(DualVector::zero(CoordKind::Cartesian), piece.frame()).unwrap();
        let start = centre.translate(&DualVector::cartesian(0.0, 0.0, -1.0));
        let ray = s.ray(start, DualVector::cartesian(0.0, 0.0, 1.0)).unwrap();
        let near = s.intercept(piece, &ray).unwrap().unwrap();
        let far = s.intercept(&rect, &ray).unwrap().unwrap();
        assert!((near - 1.0).abs() < 1e-12);
        assert!((far - 1.0).abs() < 1e-12);
    }
}

#[test]
fn cylinder_refinement_reaches_far_side() {
    let mut s = cartesian_session();
    let root = s.root();
    let cyl = s
        .surface(
            DualVector::zero(CoordKind::Cartesian),
            root,
            Shape::cylinder(1.0, PI / 4.0, 1.0).unwrap(),
            FrameSpec::angles(0.0, 0.0, 0.0),
        )
        .unwrap();
    let origin = s.point(DualVector::cartesian(-5.0, 0.0, 0.2), root).unwrap();
    let ray = s.ray(origin, DualVector::cartesian(1.0, 0.0, 0.0)).unwrap();
    let d = s.intercept(&cyl, &ray).unwrap().unwrap();
    assert!((d - 6.0).abs() < 1e-12);
    let hit = s.hit_point(&cyl, &ray).unwrap().unwrap();
    assert_relative_eq!(hit.offset().xyz(), Vec3::new(1.0, 0.0, 0.2), epsilon = 1e-12);
}

#[test]
fn pixelated_facets_are_chords() {
    let mut s = cartesian_session();
    let root = s.root();
    let radius = 3.0;
    let cyl = s
        .surface(
            DualVector::cartesian(0.0, 0.0, 1.0),
            root,
            Shape::cylinder(radius, PI / 2.0, 2.0).unwrap(),
            FrameSpec::angles(0.0, 0.0, 0.0),
        )
        .unwrap();
    let facets = s.pixelate(&cyl, 6, 3).unwrap();
    assert_eq!(facets.len(), 3);
    assert!(facets.iter().all(|row| row.len() == 6));
    for facet in facets.iter().flatten() {
        // both sagittal edges of each facet lie on the cylinder
        let edge = s.edge(facet).unwrap();
        let Shape::Rect { half_sagi, .. } = *facet.shape() else {
            panic!("facet should be a rectangle");
        };
        let frame = s.tree().frame(facet.frame()).unwrap();
        for sign in [-1.0, 1.0] {
            let corner = frame.offset() + frame.sagi().with_magnitude(sign * half_sagi);
            let p = corner.xyz();
            assert!((p.x.hypot(p.y) - radius).abs() < 1e-12);
        }
        assert!(edge.iter().all(|p| p.frame() == root));
    }
}

#[test]
fn separate_roots_never_mix() {
    let mut s = cartesian_session();
    let other = s.tree_mut().add_root(CoordKind::Cartesian);
    let p = s.point(DualVector::zero(CoordKind::Cartesian), s.root()).unwrap();
    assert!(matches!(
        s.point_in(&p, other),
        Err(TrippyError::Geometry(GeometryError::FrameMismatch(_)))
    ));
}

#[test]
fn settings_from_toml_drive_the_session() {
    let settings = Settings::from_toml_str(
        r#"
edge_resolution = 4
root_kind = "cartesian"
solver_min_distance = 0.0

[tolerance]
linear = 1e-8
angular = 1e-8
"#,
    )
    .unwrap();
    let mut s = Session::new(settings).unwrap();
    let root = s.root();
    let disc = s
        .surface(
            DualVector::zero(CoordKind::Cartesian),
            root,
            Shape::circle(1.0).unwrap(),
            FrameSpec::angles(0.0, 0.0, 0.0),
        )
        .unwrap();
    assert_eq!(s.edge(&disc).unwrap().len(), 4);
    assert_eq!(s.tree().tolerance().linear, 1e-8);
}

#[test]
fn cylinder_refinement_without_min_distance() {
    let mut s = Session::new(Settings {
        root_kind: CoordKind::Cartesian,
        solver_min_distance: 0.0,
        ..Settings::default()
    })
    .unwrap();
    let root = s.root();
    let cyl = s
        .surface(
            DualVector::zero(CoordKind::Cartesian),
            root,
            Shape::cylinder(1.0, PI / 2.0, 1.0).unwrap(),
            FrameSpec::angles(0.0, 0.0, 0.0),
        )
        .unwrap();
    for i in 0..40 {
        let y = -0.9 + 1.8 * i as f64 / 39.0;
        let origin = s.point(DualVector::cartesian(-3.0, y, 0.1), root).unwrap();
        let ray = s.ray(origin, DualVector::cartesian(1.0, 0.0, 0.0)).unwrap();
        let d = s.intercept(&cyl, &ray).unwrap().expect("far side is inside the window");
        assert!((d - (3.0 + (1.0 - y * y).sqrt())).abs() < 1e-9);
    }
}

#[test]
fn discarded_pieces_leave_the_tree() {
    let mut s = cartesian_session();
    let root = s.root();
    let cyl = s
        .surface(
            DualVector::cartesian(0.0, 0.0, 1.0),
            root,
            Shape::cylinder(2.0, PI / 3.0, 1.0).unwrap(),
            FrameSpec::angles(0.0, 0.0, 0.0),
        )
        .unwrap();
    let before = s.tree().len();
    let pieces = s.split(&cyl, 3, 2).unwrap();
    let facets = s.pixelate(&cyl, 5, 1).unwrap();
    assert_eq!(s.tree().len(), before + 11);
    s.discard(pieces).unwrap();
    s.discard(facets).unwrap();
    assert_eq!(s.tree().len(), before);
    assert_eq!(s.tree().children(root).unwrap(), &[cyl.frame()]);
}
