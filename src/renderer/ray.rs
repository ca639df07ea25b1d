use nalgebra::{Point3, Vector3};

/// 방향 벡터는 단위 벡터가 아니어도 됨. 교차 계산은 길이와 상관없이 동작하고,
/// 단위 길이가 필요한 곳(샘플링, BRDF)에서만 따로 정규화함.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Point3<f32>,
    pub direction: Vector3<f32>,
}

impl Ray {
    pub fn new(origin: Point3<f32>, direction: Vector3<f32>) -> Self {
        Self { origin, direction }
    }

    pub fn at(&self, t: f32) -> Point3<f32> {
        self.origin + self.direction * t
    }
}
