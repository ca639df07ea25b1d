use firefly::renderer::camera::{Camera, CameraPose};
use firefly::renderer::scene::{Material, Scene, Sphere};
use firefly::{FrameInput, Renderer};
use nalgebra::{Point3, UnitQuaternion, Vector3};
use winit::dpi::PhysicalSize;

fn input(pose: CameraPose, time: f32, path_trace: bool) -> FrameInput {
    FrameInput {
        size: PhysicalSize::new(24, 16),
        time,
        pose,
        path_trace,
        reset: false,
    }
}

#[test]
fn identical_inputs_render_identical_frames() {
    let pose = Camera::default().pose();
    let mut first = Renderer::new(Scene::default());
    let mut second = Renderer::new(Scene::default());

    for tick in 0..3 {
        let frame = input(pose, tick as f32 * 0.016, true);
        first.tick(&frame);
        second.tick(&frame);
    }

    assert_eq!(first.frame_index(), 3);
    assert_eq!(first.hdr(), second.hdr());
    assert_eq!(first.display(), second.display());
}

#[test]
fn empty_view_is_black_in_both_modes() {
    // 광원은 카메라 뒤에 있음
    let scene = Scene::new(
        vec![Sphere {
            center: Point3::new(0.0, 0.0, 10.0),
            radius: 2.0,
            material: Material::light(Vector3::new(5.0, 5.0, 5.0)),
        }],
        vec![],
    );
    let pose = CameraPose {
        position: Point3::origin(),
        orientation: UnitQuaternion::identity(),
    };
    let mut renderer = Renderer::new(scene);

    for path_trace in [true, false] {
        renderer.tick(&input(pose, 0.0, path_trace));
        assert!(renderer.hdr().iter().all(|value| *value == Vector3::zeros()));
    }
}

#[test]
fn ray_cast_mode_is_stable_across_ticks() {
    let pose = Camera::default().pose();
    let mut renderer = Renderer::default();

    renderer.tick(&input(pose, 0.0, false));
    let first = renderer.hdr().to_vec();
    for tick in 1..5 {
        renderer.tick(&input(pose, tick as f32, false));
    }

    for (a, b) in first.iter().zip(renderer.hdr()) {
        assert!((a - b).norm() < 1e-5);
    }
}

#[test]
fn path_tracing_lights_the_room() {
    let pose = Camera::default().pose();
    let mut renderer = Renderer::default();

    for tick in 0..8 {
        renderer.tick(&input(pose, tick as f32 * 0.016, true));
    }

    let total: f32 = renderer.hdr().iter().map(|value| value.sum()).sum();
    assert!(total > 0.0);
    assert!(renderer.hdr().iter().all(|value| value.iter().all(|c| c.is_finite() && *c >= 0.0)));
}

#[test]
fn camera_motion_between_ticks_resets_history() {
    let mut camera = Camera::default();
    let mut renderer = Renderer::default();

    renderer.tick(&input(camera.pose(), 0.0, true));
    renderer.tick(&input(camera.pose(), 0.1, true));
    assert_eq!(renderer.frame_index(), 2);

    camera.rotate(0.05, 0.0);
    assert_eq!(renderer.tick(&input(camera.pose(), 0.2, true)), 1);
    assert_eq!(renderer.tick(&input(camera.pose(), 0.3, true)), 2);
}
