use nalgebra::{Point3, Vector3};

use crate::renderer::ray::Ray;
use crate::renderer::scene::{Material, Plane, Scene, Sphere};

/// 자기 자신과 다시 충돌하는 것을 막기 위한 최소 거리
pub const T_MIN: f32 = 1e-4;
/// 사실상 무한대
pub const T_MAX: f32 = 1e20;

const PARALLEL_EPSILON: f32 = 1e-6;

// HitPayload처럼 충돌 정보만 담고, 색상 계산은 적분기에서 함
#[derive(Debug, Clone, Copy)]
pub struct Hit<'a> {
    pub t: f32,
    pub position: Point3<f32>,
    /// 단위 벡터. 구 안에서 쏜 광선이면 광선 쪽을 향하도록 뒤집혀 있음
    pub normal: Vector3<f32>,
    pub material: &'a Material,
}

pub fn intersect_sphere<'a>(ray: &Ray, sphere: &'a Sphere, t_min: f32, t_max: f32) -> Option<Hit<'a>> {
    // |o - c + t*d|^2 = r^2
    // (d.d) t^2 + 2 (oc.d) t + (oc.oc - r^2) = 0
    // 구를 원점으로 옮긴 것처럼 광선 시작점을 이동시켜 계산함
    let oc = ray.origin - sphere.center;

    let a = ray.direction.norm_squared();
    let b = 2.0 * oc.dot(&ray.direction);
    let c = oc.norm_squared() - sphere.radius * sphere.radius;

    // 판별식
    let discriminant = b * b - 4.0 * a * c;
    if discriminant <= 0.0 || a == 0.0 {
        return None;
    }

    let root = discriminant.sqrt();
    let mut t0 = (-b - root) / (2.0 * a);
    let mut t1 = (-b + root) / (2.0 * a);
    if t0 > t1 {
        std::mem::swap(&mut t0, &mut t1);
    }

    if t0 > t_max || t1 < t_min {
        return None;
    }

    // 카메라가 구 안에 있으면 t0 < t_min 이므로 t_min으로 당겨옴
    let t = t0.max(t_min).min(t_max);
    let position = ray.at(t);

    // c < 0 이면 시작점이 구 안쪽
    let inside = c < 0.0;
    let outward = (position - sphere.center)
        .try_normalize(f32::EPSILON)
        .unwrap_or_else(|| -ray.direction.normalize());
    let normal = if inside { -outward } else { outward };

    Some(Hit {
        t,
        position,
        normal,
        material: &sphere.material,
    })
}

pub fn intersect_plane<'a>(ray: &Ray, plane: &'a Plane, t_min: f32, t_max: f32) -> Option<Hit<'a>> {
    // dot(n, o + t*d) + offset = 0
    let denominator = plane.normal.dot(&ray.direction);
    if denominator.abs() < PARALLEL_EPSILON {
        return None;
    }

    let t = -(plane.normal.dot(&ray.origin.coords) + plane.offset) / denominator;
    if t < t_min || t > t_max {
        return None;
    }

    // 뒷면에서 맞으면 법선을 광선 쪽으로 뒤집음
    let normal = if denominator > 0.0 {
        -plane.normal
    } else {
        plane.normal
    };

    Some(Hit {
        t,
        position: ray.at(t),
        normal,
        material: &plane.material,
    })
}

/// 가장 가까운 충돌. 거리가 같으면 먼저 나온 프리미티브를 유지함
pub fn closest_hit<'a>(scene: &'a Scene, ray: &Ray, t_min: f32, t_max: f32) -> Option<Hit<'a>> {
    let mut closest: Option<Hit<'a>> = None;

    for sphere in scene.spheres() {
        let limit = closest.map_or(t_max, |hit| hit.t);
        if let Some(hit) = intersect_sphere(ray, sphere, t_min, limit) {
            if closest.map_or(true, |previous| hit.t < previous.t) {
                closest = Some(hit);
            }
        }
    }

    for plane in scene.planes() {
        let limit = closest.map_or(t_max, |hit| hit.t);
        if let Some(hit) = intersect_plane(ray, plane, t_min, limit) {
            if closest.map_or(true, |previous| hit.t < previous.t) {
                closest = Some(hit);
            }
        }
    }

    closest
}
