use eframe::egui::{InputState, Key, Vec2};
use nalgebra::{Vector2, Vector3};

use crate::renderer::camera::Camera;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Movement {
    Forward,
    Left,
    Backward,
    Right,
    Up,
    Down,
}

impl Movement {
    const ALL: [Movement; 6] = [
        Movement::Forward,
        Movement::Left,
        Movement::Backward,
        Movement::Right,
        Movement::Up,
        Movement::Down,
    ];

    // 카메라 로컬 축 기준 (앞이 -Z)
    fn direction(&self) -> Vector3<f32> {
        match self {
            Movement::Forward => Vector3::new(0.0, 0.0, -1.0),
            Movement::Left => Vector3::new(-1.0, 0.0, 0.0),
            Movement::Backward => Vector3::new(0.0, 0.0, 1.0),
            Movement::Right => Vector3::new(1.0, 0.0, 0.0),
            Movement::Up => Vector3::new(0.0, 1.0, 0.0),
            Movement::Down => Vector3::new(0.0, -1.0, 0.0),
        }
    }
}

/// 키보드/마우스 입력을 모아 두었다가 프레임마다 카메라 이동/회전으로 바꿔 줌
pub struct CameraController {
    pub camera: Camera,
    // WASD SPACE SHIFT
    inputs: [bool; 6],
    look_delta: Vector2<f32>,
    pub grab_mouse: bool,
}

impl CameraController {
    pub fn new(camera: Camera) -> Self {
        Self {
            camera,
            inputs: [false; 6],
            look_delta: Vector2::zeros(),
            grab_mouse: false,
        }
    }

    /// egui 입력 상태에서 키 상태를 읽음. C로 마우스 잡기를 켜고 끔
    pub fn input(&mut self, input: &InputState) {
        let keys = [Key::W, Key::A, Key::S, Key::D, Key::Space];
        for (movement, key) in Movement::ALL.iter().zip(keys) {
            self.set_key(*movement, input.key_down(key));
        }
        self.set_key(Movement::Down, input.modifiers.shift);

        if input.key_pressed(Key::C) {
            self.grab_mouse = !self.grab_mouse;
        }

        if self.grab_mouse {
            self.look(input.pointer.delta());
        }
    }

    pub fn set_key(&mut self, movement: Movement, pressed: bool) {
        self.inputs[movement as usize] = pressed;
    }

    /// 이미지를 끌었을 때의 이동량. 마우스를 잡고 있으면 input()에서 이미 포인터 이동을 받았으므로 무시함
    pub fn drag(&mut self, delta: Vec2) {
        if !self.grab_mouse {
            self.look(delta);
        }
    }

    /// 화면 픽셀 단위 마우스 이동량
    pub fn look(&mut self, delta: Vec2) {
        self.look_delta += Vector2::new(delta.x, delta.y);
    }

    /// 쌓인 입력을 카메라에 반영함
    pub fn update(&mut self, frame_time: f32) {
        let time_step = frame_time.min(1.0 / 60.0);

        let translation = Movement::ALL
            .iter()
            .filter(|movement| self.inputs[**movement as usize])
            .fold(Vector3::zeros(), |sum, movement| sum + movement.direction());
        self.camera
            .translate(translation * self.movement_speed() * time_step);

        let delta = std::mem::replace(&mut self.look_delta, Vector2::zeros()) * 0.002;
        // 오른쪽으로 끌면 오른쪽으로, 아래로 끌면 아래를 보도록
        let yaw_delta = -delta.x * self.rotation_speed();
        let pitch_delta = -delta.y * self.rotation_speed();
        self.camera.rotate(yaw_delta, pitch_delta);
    }

    pub fn rotation_speed(&self) -> f32 {
        0.7
    }

    pub fn movement_speed(&self) -> f32 {
        5.0
    }
}
