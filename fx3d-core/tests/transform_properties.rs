use fx3d_core::{Fix, Matrix3, RenderContext, Rotation, Shared, Transform, Vector3};

/// Largest entry of `mat * mat_inv - I` over every whole-degree angle
/// triple, in raw 16.16 units. Reached at (10, 72, 72).
const ORTHONORMAL_TOLERANCE: i32 = 13;
/// Two chained products per side, each floored once per entry.
const ASSOCIATIVITY_TOLERANCE: i32 = 6;
/// Drift allowed on composed translations of up to ~10 units.
const TRANSLATION_TOLERANCE: i32 = 1024;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn transform(rotation: Rotation, translation: Vector3) -> Transform {
    Transform::new(Shared::new(translation), Shared::new(rotation))
}

fn angle_grid() -> Vec<Rotation> {
    let mut angles = Vec::new();
    for x in (0..360).step_by(45) {
        for y in (0..360).step_by(60) {
            for z in (7..360).step_by(75) {
                angles.push(Rotation::from_degrees(x, y, z));
            }
        }
    }
    angles
}

fn sample_points() -> Vec<Vector3> {
    vec![
        Vector3::ZERO,
        Vector3::X,
        Vector3::from_ints(-3, 7, 2),
        Vector3::from_f32(0.25, -12.5, 100.0),
        Vector3::from_ints(500, -500, 250),
    ]
}

fn max_matrix_diff(a: &Matrix3, b: &Matrix3) -> i32 {
    [(a.a, b.a), (a.b, b.b), (a.c, b.c)]
        .iter()
        .map(|(l, r)| max_component_diff(*l, *r))
        .max()
        .unwrap_or(0)
}

fn orthonormal_drift(t: &mut Transform, ctx: &RenderContext) -> i32 {
    let mat = t.matrix(ctx);
    let inv = t.inverse_matrix(ctx);
    assert_eq!(inv, mat.transpose());
    max_matrix_diff(&(mat * inv), &Matrix3::IDENTITY)
}

fn max_component_diff(a: Vector3, b: Vector3) -> i32 {
    [(a.x, b.x), (a.y, b.y), (a.z, b.z)]
        .iter()
        .map(|(l, r)| (*l - *r).abs().to_bits())
        .max()
        .unwrap_or(0)
}

#[test]
fn test_identity_after_reset() {
    init_logging();
    let ctx = RenderContext::new();
    let mut t = transform(Rotation::from_degrees(12, 34, 56), Vector3::from_ints(1, 2, 3));
    t.reset(&ctx);

    let src = sample_points();
    let mut dest = vec![Vector3::ZERO; src.len()];
    t.rotate_points(&ctx, &src, &mut dest).unwrap();
    assert_eq!(dest, src);

    t.translate_points(&mut dest);
    assert_eq!(dest, src);
}

#[test]
fn test_orthonormality() {
    init_logging();
    let ctx = RenderContext::new();
    let mut t = Transform::default();

    for rotation in angle_grid() {
        t.set_rotation(rotation.x, rotation.y, rotation.z);
        let drift = orthonormal_drift(&mut t, &ctx);
        assert!(drift <= ORTHONORMAL_TOLERANCE, "{rotation:?}: drift {drift}");
    }
}

#[test]
fn test_orthonormality_sweep() {
    let ctx = RenderContext::new();
    let mut t = Transform::default();
    let mut worst = (0, Rotation::zero());

    for x in (0..360).step_by(15) {
        for y in (0..360).step_by(15) {
            for z in (0..360).step_by(15) {
                let rotation = Rotation::from_degrees(x, y, z);
                t.set_rotation(rotation.x, rotation.y, rotation.z);
                let drift = orthonormal_drift(&mut t, &ctx);
                if drift > worst.0 {
                    worst = (drift, rotation);
                }
            }
        }
    }
    assert!(worst.0 <= ORTHONORMAL_TOLERANCE, "{:?}: drift {}", worst.1, worst.0);

    for (x, y, z) in [(10, 72, 72), (37, 80, 10), (62, 72, 10)] {
        t.set_rotation(Fix::from_int(x), Fix::from_int(y), Fix::from_int(z));
        let drift = orthonormal_drift(&mut t, &ctx);
        assert!(drift <= ORTHONORMAL_TOLERANCE, "({x}, {y}, {z}): drift {drift}");
    }
}

#[test]
fn test_orthonormality_exact_on_quarter_turns() {
    let ctx = RenderContext::new();
    let mut t = Transform::default();

    for x in (0..360).step_by(90) {
        for y in (0..360).step_by(90) {
            for z in (0..360).step_by(90) {
                t.set_rotation(Fix::from_int(x), Fix::from_int(y), Fix::from_int(z));
                assert!(orthonormal_drift(&mut t, &ctx) <= 1, "({x}, {y}, {z})");
            }
        }
    }
}

#[test]
fn test_matches_nalgebra_rotation() {
    use nalgebra::{Rotation3, Vector3 as V};

    let ctx = RenderContext::new();
    let mut t = Transform::default();
    let points = sample_points();

    for rotation in angle_grid() {
        t.set_rotation(rotation.x, rotation.y, rotation.z);
        let mut rotated = points.clone();
        t.rotate_points_in_place(&ctx, &mut rotated);

        let rx = Rotation3::from_axis_angle(&V::x_axis(), rotation.x.to_f32().to_radians());
        let ry = Rotation3::from_axis_angle(&V::y_axis(), rotation.y.to_f32().to_radians());
        let rz = Rotation3::from_axis_angle(&V::z_axis(), rotation.z.to_f32().to_radians());
        let reference = (rx * ry * rz).matrix().transpose();

        for (point, actual) in points.iter().zip(&rotated) {
            let expected = reference * V::from(*point);
            let actual = V::from(*actual);
            let scale = V::from(*point).norm().max(1.0);
            assert!(
                (expected - actual).norm() / scale < 1e-3,
                "{rotation:?} on {point:?}: {actual} vs {expected}"
            );
        }
    }
}

#[test]
fn test_angle_normalization_idempotence() {
    let ctx = RenderContext::new();
    let mut base = Transform::default();
    let mut wrapped = Transform::default();

    for rotation in angle_grid() {
        base.set_rotation(rotation.x, rotation.y, rotation.z);
        let expected = base.matrix(&ctx);

        for turn in [Fix::DEG_360, -Fix::DEG_360] {
            wrapped.set_rotation(rotation.x + turn, rotation.y + turn, rotation.z - turn);
            assert_eq!(wrapped.matrix(&ctx), expected, "{rotation:?} shifted by {turn}");
        }
    }
}

#[test]
fn test_dirty_flag_read_paths() {
    init_logging();
    let ctx = RenderContext::new();
    let angles = Rotation::from_degrees(25, 130, 310);
    let mut fresh = transform(angles, Vector3::ZERO);
    let expected = fresh.matrix(&ctx);

    // rotate
    let mut t = Transform::default();
    t.reset(&ctx);
    t.set_rotation(Fix::ZERO, Fix::ZERO, Fix::ZERO);
    assert!(!t.is_dirty());
    t.set_rotation(angles.x, angles.y, angles.z);
    assert!(t.is_dirty());
    t.set_rotation(angles.y, angles.z, angles.x);
    assert!(t.is_dirty());
    t.set_rotation(angles.x, angles.y, angles.z);
    assert!(t.is_dirty());
    t.rotate_points_in_place(&ctx, &mut [Vector3::X]);
    assert!(!t.is_dirty());
    assert_eq!(t.matrix(&ctx), expected);

    // inverse-rotate
    let mut t = Transform::default();
    t.reset(&ctx);
    t.set_rotation(angles.x, angles.y, angles.z);
    let _ = t.inverse_rotate(&ctx, &Vector3::Y);
    assert!(!t.is_dirty());
    assert_eq!(t.inverse_matrix(&ctx), expected.transpose());

    // combine
    let mut t = Transform::default();
    t.reset(&ctx);
    t.set_rotation(angles.x, angles.y, angles.z);
    let mut other = Transform::default();
    let mut result = Transform::default();
    Transform::combine(&mut t, &mut other, &mut result, &ctx);
    assert!(!t.is_dirty());
    assert_eq!(t.matrix(&ctx), expected);
}

#[test]
fn test_external_rotation_write_is_detected() {
    let ctx = RenderContext::new();
    let rotation = Shared::new(Rotation::zero());
    let mut t = Transform::new(Shared::default(), rotation.clone());
    t.rebuild(&ctx);

    let handle = rotation.clone();
    handle.set(Rotation::from_degrees(0, 90, 0));
    assert!(t.is_dirty());

    let mut points = [Vector3::X];
    t.rotate_points_in_place(&ctx, &mut points);
    assert_eq!(points, [Vector3::Z]);
}

#[test]
fn test_composition_associativity() {
    init_logging();
    let ctx = RenderContext::new();
    let mut a = transform(Rotation::from_degrees(30, 45, 60), Vector3::from_ints(1, 2, 3));
    let mut b = transform(Rotation::from_degrees(10, 200, 95), Vector3::from_ints(-4, 0, 5));
    let mut c = transform(Rotation::from_degrees(300, 15, 170), Vector3::from_ints(2, -7, 1));

    let mut ab = Transform::default();
    let mut ab_c = Transform::default();
    Transform::combine(&mut a, &mut b, &mut ab, &ctx);
    Transform::combine(&mut ab, &mut c, &mut ab_c, &ctx);

    let mut bc = Transform::default();
    let mut a_bc = Transform::default();
    Transform::combine(&mut b, &mut c, &mut bc, &ctx);
    Transform::combine(&mut a, &mut bc, &mut a_bc, &ctx);

    let drift = max_matrix_diff(&ab_c.matrix(&ctx), &a_bc.matrix(&ctx));
    assert!(drift <= ASSOCIATIVITY_TOLERANCE, "matrix drift {drift}");

    let drift = max_component_diff(ab_c.translation().get(), a_bc.translation().get());
    assert!(drift <= TRANSLATION_TOLERANCE, "translation drift {drift}");
}

#[test]
fn test_translation_right_matches_general_combine() {
    let ctx = RenderContext::new();
    let v = Vector3::from_ints(3, -1, 4);

    for rotation in angle_grid() {
        let mut t = transform(rotation, Vector3::from_ints(5, 6, -7));
        let mut pure_translation = transform(Rotation::zero(), v);

        let mut fast = Transform::default();
        let mut general = Transform::default();
        Transform::combine_translation_right(&mut t, &v, &mut fast, &ctx);
        Transform::combine(&mut t, &mut pure_translation, &mut general, &ctx);

        assert_eq!(fast.translation().get(), general.translation().get(), "{rotation:?}");
        assert_eq!(fast.matrix(&ctx), general.matrix(&ctx), "{rotation:?}");
    }
}

#[test]
fn test_translation_left_matches_general_combine() {
    let ctx = RenderContext::new();
    let v = Vector3::from_ints(-2, 8, 1);
    let mut t = transform(Rotation::from_degrees(40, 80, 120), Vector3::from_ints(1, 1, 1));
    let mut pure_translation = transform(Rotation::zero(), v);

    let mut fast = Transform::default();
    let mut general = Transform::default();
    Transform::combine_translation_left(&v, &mut t, &mut fast, &ctx);
    Transform::combine(&mut pure_translation, &mut t, &mut general, &ctx);

    assert_eq!(fast.translation().get(), general.translation().get());
    assert_eq!(fast.matrix(&ctx), general.matrix(&ctx));
}

#[test]
fn test_quarter_turns_about_y() {
    init_logging();
    let ctx = RenderContext::new();
    let mut t = transform(Rotation::from_degrees(0, 90, 0), Vector3::ZERO);

    let src = [Vector3::X];
    let mut dest = [Vector3::ZERO];
    t.rotate_points(&ctx, &src, &mut dest).unwrap();
    assert_eq!(dest, [Vector3::Z]);

    for _ in 0..3 {
        t.rotate_points_in_place(&ctx, &mut dest);
    }
    assert_eq!(dest, [Vector3::X]);
}

#[test]
fn test_parent_child_hierarchy() {
    let ctx = RenderContext::new();
    let mut parent = transform(Rotation::from_degrees(0, 0, 90), Vector3::from_ints(10, 0, 0));
    let mut child = transform(Rotation::zero(), Vector3::from_ints(2, 0, 0));
    let mut world = Transform::default();

    Transform::combine(&mut parent, &mut child, &mut world, &ctx);

    let mut points = [Vector3::ZERO, Vector3::X];
    world.transform_points(&ctx, &mut points);
    // child origin sits 2 units along the parent's rotated x axis
    assert_eq!(points[0], Vector3::from_ints(10, -2, 0));
    assert_eq!(points[1], Vector3::from_ints(10, -3, 0));
}

#[test]
fn test_context_from_config_drives_lighting() {
    init_logging();
    let ctx = RenderContext::from_json(
        r#"{ "light_enabled": true, "light": { "x": 0, "y": 65536, "z": 0 }, "cam_distance": 655360 }"#,
    )
    .unwrap();
    assert_eq!(ctx.cam_distance(), Fix::from_int(10));

    let mut t = transform(Rotation::from_degrees(90, 0, 0), Vector3::ZERO);
    let light = t.light_inv(&ctx);
    let expected = t.inverse_rotate(&ctx, &ctx.light());
    assert_eq!(light, expected);
    assert_eq!(t.camera_inv(&ctx), t.inverse_rotate(&ctx, &Vector3::Z));
}
