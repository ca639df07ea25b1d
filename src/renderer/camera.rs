use nalgebra::{Point3, Unit, UnitQuaternion, Vector2, Vector3};
use winit::dpi::PhysicalSize;

use crate::renderer::ray::Ray;

/// 화각을 정하는 초점 깊이. 작을수록 넓게 보임
pub const FOCAL_DEPTH: f32 = 1.5;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    pub position: Point3<f32>,
    pub orientation: UnitQuaternion<f32>,
}

impl Default for CameraPose {
    fn default() -> Self {
        Self {
            position: Point3::origin(),
            orientation: UnitQuaternion::identity(),
        }
    }
}

impl CameraPose {
    /// uv는 0..1. 카메라는 로컬 -Z를 바라봄
    pub fn generate_ray(&self, uv: Vector2<f32>) -> Ray {
        self.ray_through_ndc(uv * 2.0 - Vector2::new(1.0, 1.0))
    }

    /// 픽셀 중심을 지나는 광선. 0번 행이 화면 맨 위이고, 가로는 종횡비만큼 늘려서 찌그러지지 않게 함
    pub fn ray_for_pixel(&self, x: u32, y: u32, size: PhysicalSize<u32>) -> Ray {
        let uv = Vector2::new(
            (x as f32 + 0.5) / size.width as f32,
            1.0 - (y as f32 + 0.5) / size.height as f32,
        );
        let aspect = size.width as f32 / size.height.max(1) as f32;

        let mut ndc = uv * 2.0 - Vector2::new(1.0, 1.0);
        ndc.x *= aspect;
        self.ray_through_ndc(ndc)
    }

    fn ray_through_ndc(&self, ndc: Vector2<f32>) -> Ray {
        let local = Vector3::new(ndc.x, ndc.y, -FOCAL_DEPTH).normalize();
        // 로컬 원점은 (0, 0, 0)이라 회전해도 그대로
        Ray::new(self.position, self.orientation * local)
    }
}

/// 포즈가 바뀌었는지는 렌더러가 틱마다 이전 포즈와 비교해서 판단함
pub struct Camera {
    pose: CameraPose,
}

impl Camera {
    pub fn new(position: Point3<f32>) -> Self {
        Self {
            pose: CameraPose {
                position,
                orientation: UnitQuaternion::identity(),
            },
        }
    }

    pub fn pose(&self) -> CameraPose {
        self.pose
    }

    pub fn position(&self) -> Point3<f32> {
        self.pose.position
    }

    pub fn orientation(&self) -> UnitQuaternion<f32> {
        self.pose.orientation
    }

    /// 바라보는 방향 (로컬 -Z)
    pub fn forward(&self) -> Unit<Vector3<f32>> {
        Unit::new_normalize(self.pose.orientation * -Vector3::z())
    }

    /// yaw는 월드 Y축 기준으로 왼쪽에서, pitch는 로컬 X축 기준으로 오른쪽에서 곱함.
    /// 곱할 때마다 오차가 쌓이므로 매번 다시 정규화함
    pub fn rotate(&mut self, yaw: f32, pitch: f32) {
        if yaw == 0.0 && pitch == 0.0 {
            return;
        }

        let yaw = UnitQuaternion::from_axis_angle(&Vector3::y_axis(), yaw);
        let pitch = UnitQuaternion::from_axis_angle(&Vector3::x_axis(), pitch);

        self.pose.orientation = yaw * self.pose.orientation * pitch;
        self.pose.orientation.renormalize();
    }

    /// 카메라 로컬 축 기준 이동 (x: 오른쪽, y: 위, z: 뒤)
    pub fn translate(&mut self, local: Vector3<f32>) {
        if local == Vector3::zeros() {
            return;
        }

        self.pose.position += self.pose.orientation * local;
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Point3::new(0.0, 2.0, 5.0))
    }
}
