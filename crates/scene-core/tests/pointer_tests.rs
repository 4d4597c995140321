// Host-side tests for the screen-to-world pointer transform.

use glam::{Vec2, Vec3};
use scene_core::{
    ndc_to_screen, normalize_screen, ray_sphere, Camera, Plane, PointerTracker, Viewport,
    FALLBACK_RAY_DISTANCE,
};

const DT: f32 = 1.0 / 60.0;

fn viewport() -> Viewport {
    Viewport::new(1280.0, 720.0)
}

fn camera_for(vp: &Viewport) -> Camera {
    let mut camera = Camera::default();
    camera.set_viewport_size(vp.width, vp.height);
    camera
}

#[test]
fn normalization_maps_corners_and_inverts_y() {
    let vp = viewport();
    let tl = normalize_screen(Vec2::new(0.0, 0.0), &vp).unwrap();
    let br = normalize_screen(Vec2::new(1280.0, 720.0), &vp).unwrap();
    let c = normalize_screen(vp.center(), &vp).unwrap();
    assert!((tl - Vec2::new(-1.0, 1.0)).length() < 1e-6);
    assert!((br - Vec2::new(1.0, -1.0)).length() < 1e-6);
    assert!(c.length() < 1e-6);
}

#[test]
fn normalization_respects_viewport_offset() {
    let vp = Viewport {
        left: 100.0,
        top: 50.0,
        width: 200.0,
        height: 100.0,
    };
    let c = normalize_screen(Vec2::new(200.0, 100.0), &vp).unwrap();
    assert!(c.length() < 1e-6);
    let back = ndc_to_screen(Vec2::new(0.5, -0.5), &vp);
    let again = normalize_screen(back, &vp).unwrap();
    assert!((again - Vec2::new(0.5, -0.5)).length() < 1e-5);
}

#[test]
fn degenerate_viewport_and_non_finite_input_are_rejected() {
    assert!(normalize_screen(Vec2::new(1.0, 1.0), &Viewport::new(0.0, 100.0)).is_none());
    assert!(normalize_screen(Vec2::new(f32::NAN, 1.0), &viewport()).is_none());

    let vp = viewport();
    let camera = camera_for(&vp);
    let mut tracker = PointerTracker::new(vp);
    tracker.on_move(Vec2::new(f32::INFINITY, 10.0));
    tracker.tick(DT, &camera);
    assert!(!tracker.state().is_active);
    assert!(tracker.state().world.is_finite());
}

#[test]
fn untouched_tracker_sits_at_viewport_center() {
    let vp = viewport();
    let camera = camera_for(&vp);
    let mut tracker = PointerTracker::new(vp);
    tracker.tick(DT, &camera);
    let s = tracker.state();
    assert_eq!(s.screen, vp.center());
    assert!(s.normalized.length() < 1e-6);
    assert!(s.world.length() < 1e-3, "center ray hits the origin, got {:?}", s.world);
    assert!(!s.is_active);
}

#[test]
fn world_positions_project_back_onto_the_screen_path() {
    let vp = viewport();
    let camera = camera_for(&vp);
    let mut tracker = PointerTracker::new(vp);
    for i in 0..40 {
        let t = i as f32 / 40.0;
        let screen = Vec2::new(
            vp.width * (0.5 + 0.4 * (t * std::f32::consts::TAU).cos()),
            vp.height * (0.5 + 0.4 * (t * std::f32::consts::TAU * 2.0).sin()),
        );
        tracker.on_move(screen);
        tracker.tick(DT, &camera);
        let world = tracker.state().world;
        assert!(world.z.abs() < 1e-3, "point should lie on the z=0 plane");
        let ndc = camera.project_to_ndc(world).unwrap();
        let back = ndc_to_screen(ndc, &vp);
        assert!((back - screen).length() < 0.5, "{screen:?} -> {world:?} -> {back:?}");
    }
}

#[test]
fn parallel_plane_falls_back_to_fixed_distance() {
    let vp = viewport();
    let camera = camera_for(&vp);
    let mut tracker = PointerTracker::new(vp);
    tracker.set_plane(Some(Plane {
        normal: Vec3::X,
        d: 0.0,
    }));
    tracker.tick(DT, &camera);
    let expected = camera.eye + camera.forward() * FALLBACK_RAY_DISTANCE;
    assert!((tracker.state().world - expected).length() < 1e-3);
}

#[test]
fn plane_behind_the_camera_falls_back_to_fixed_distance() {
    let camera = Camera::default();
    let behind = Plane {
        normal: Vec3::Z,
        d: -20.0,
    };
    let ray = camera.ray_from_ndc(Vec2::ZERO);
    assert!(behind.intersect(&ray).is_none());
    assert!(Plane::facing(&camera).intersect(&ray).is_some());
}

#[test]
fn velocity_waits_for_minimum_elapsed_time() {
    let vp = viewport();
    let camera = camera_for(&vp);
    let mut tracker = PointerTracker::new(vp);
    tracker.tick(DT, &camera);

    tracker.on_move(Vec2::new(900.0, 360.0));
    tracker.tick(0.004, &camera);
    assert_eq!(tracker.state().world_velocity, Vec3::ZERO);

    tracker.tick(0.008, &camera);
    let v = tracker.state().world_velocity;
    assert!(v.x > 0.0, "moved right, velocity {v:?}");
    assert!(v.is_finite());
}

#[test]
fn velocity_settles_when_pointer_stops() {
    let vp = viewport();
    let camera = camera_for(&vp);
    let mut tracker = PointerTracker::new(vp);
    tracker.tick(DT, &camera);
    tracker.on_move(Vec2::new(300.0, 200.0));
    tracker.tick(DT, &camera);
    assert!(tracker.state().world_velocity.length() > 0.0);
    tracker.tick(DT, &camera);
    assert!(tracker.state().world_velocity.length() < 1e-6);
}

#[test]
fn activity_flags_expire() {
    let vp = viewport();
    let camera = camera_for(&vp);
    let mut tracker = PointerTracker::new(vp);
    tracker.on_move(Vec2::new(10.0, 10.0));
    tracker.tick(DT, &camera);
    assert!(tracker.state().is_active);
    assert!(tracker.state().recently_moved);
    for _ in 0..60 {
        tracker.tick(DT, &camera);
    }
    assert!(tracker.state().is_active);
    assert!(!tracker.state().recently_moved);
    for _ in 0..70 {
        tracker.tick(DT, &camera);
    }
    assert!(!tracker.state().is_active);
}

#[test]
fn drag_flags_follow_down_up_and_leave() {
    let mut tracker = PointerTracker::new(viewport());
    tracker.on_down(Vec2::new(5.0, 5.0));
    assert!(tracker.state().is_dragging);
    tracker.on_up();
    assert!(!tracker.state().is_dragging);
    tracker.on_down(Vec2::new(5.0, 5.0));
    tracker.on_leave();
    assert!(!tracker.state().is_dragging);
    assert!(!tracker.state().is_active);
}

#[test]
fn ray_sphere_hits_and_misses() {
    let origin = Vec3::new(0.0, 0.0, 5.0);
    let dir = Vec3::NEG_Z;
    let hit = ray_sphere(origin, dir, Vec3::ZERO, 1.0).unwrap();
    assert!((hit - 4.0).abs() < 1e-5);
    assert!(ray_sphere(origin, dir, Vec3::new(3.0, 0.0, 0.0), 1.0).is_none());
    assert!(ray_sphere(origin, Vec3::Z, Vec3::ZERO, 1.0).is_none());
}
