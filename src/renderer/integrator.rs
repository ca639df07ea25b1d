use std::f32::consts::PI;

use nalgebra::Vector3;

use crate::renderer::intersect::{T_MAX, T_MIN};
use crate::renderer::ray::Ray;
use crate::renderer::sampler::Sampler;
use crate::renderer::scene::{Material, Scene};

pub const DEFAULT_MAX_BOUNCES: usize = 4;

const GEOMETRY_EPSILON: f32 = 1e-6;
const ORIGIN_OFFSET: f32 = 1e-5;

/// 픽셀 하나에 대해 광선 하나의 radiance를 추정하는 커널.
/// 스레드마다 자기 sampler를 가지고 scene은 읽기만 하므로 픽셀 단위 병렬 실행이 안전함
pub trait Kernel: Sync {
    fn radiance(&self, scene: &Scene, ray: &Ray, sampler: &mut Sampler) -> Vector3<f32>;
}

pub struct PathIntegrator {
    pub max_bounces: usize,
}

impl Default for PathIntegrator {
    fn default() -> Self {
        Self {
            max_bounces: DEFAULT_MAX_BOUNCES,
        }
    }
}

impl Kernel for PathIntegrator {
    fn radiance(&self, scene: &Scene, ray: &Ray, sampler: &mut Sampler) -> Vector3<f32> {
        let mut throughput = Vector3::new(1.0, 1.0, 1.0);
        let mut radiance = Vector3::zeros();
        let mut ray = *ray;

        for _ in 0..self.max_bounces {
            let Some(hit) = scene.intersect(&ray, T_MIN, T_MAX) else {
                break;
            };

            // 광원에 닿으면 거기서 끝. 광원 표면에서는 더 튕기지 않음
            if hit.material.is_light() {
                radiance += throughput.component_mul(&hit.material.emissive);
                break;
            }

            let incoming = ray.direction.normalize();
            let out_direction = sample_cosine_hemisphere(&hit.normal, sampler);
            let reflectance = brdf(hit.material, &hit.normal, &incoming, &out_direction);

            let geometric = hit.normal.dot(&out_direction).max(0.0);
            if geometric < GEOMETRY_EPSILON {
                break;
            }
            let pdf = geometric / PI;

            throughput = throughput.component_mul(&(reflectance * (geometric / pdf)));

            ray = Ray::new(hit.position + hit.normal * ORIGIN_OFFSET, out_direction);
        }

        radiance
    }
}

/// 디버그/미리보기용. 한 번만 교차시키고 발광값이나 albedo를 그대로 돌려줌
pub struct RayCaster;

impl Kernel for RayCaster {
    fn radiance(&self, scene: &Scene, ray: &Ray, _sampler: &mut Sampler) -> Vector3<f32> {
        match scene.intersect(ray, T_MIN, T_MAX) {
            Some(hit) if hit.material.is_light() => hit.material.emissive,
            Some(hit) => hit.material.diffuse,
            None => Vector3::zeros(),
        }
    }
}

/// diffuse와 Phong 로브를 반씩 섞은 값. 에너지 보존은 안 되지만 지금 모양 그대로 유지함.
/// `incoming`은 표면으로 들어오는 광선 방향(단위 벡터)
pub fn brdf(
    material: &Material,
    normal: &Vector3<f32>,
    incoming: &Vector3<f32>,
    outgoing: &Vector3<f32>,
) -> Vector3<f32> {
    let diffuse = material.diffuse / PI;

    let mirror = reflect(incoming, normal);
    let lobe = outgoing.dot(&mirror).max(0.0).powf(material.glossiness);
    let specular = material.specular * ((material.glossiness + 2.0) / (2.0 * PI) * lobe);

    (diffuse + specular) / 2.0
}

pub fn reflect(direction: &Vector3<f32>, normal: &Vector3<f32>) -> Vector3<f32> {
    direction - normal * (2.0 * direction.dot(normal))
}

/// 법선 기준 정규직교 기저 (tangent, bitangent).
/// 법선이 월드 Y와 거의 평행하면 X를 대신 씀
pub fn orthonormal_basis(normal: &Vector3<f32>) -> (Vector3<f32>, Vector3<f32>) {
    let up = if normal.y.abs() > 0.999 {
        Vector3::x()
    } else {
        Vector3::y()
    };
    let tangent = up.cross(normal).normalize();
    let bitangent = normal.cross(&tangent);
    (tangent, bitangent)
}

/// pdf = cos(theta) / pi
pub fn sample_cosine_hemisphere(normal: &Vector3<f32>, sampler: &mut Sampler) -> Vector3<f32> {
    let u1 = sampler.next_float();
    let u2 = sampler.next_float();

    let r = u1.sqrt();
    let phi = 2.0 * PI * u2;

    let x = r * phi.cos();
    let y = r * phi.sin();
    let z = (1.0 - u1).max(0.0).sqrt();

    let (tangent, bitangent) = orthonormal_basis(normal);
    tangent * x + bitangent * y + normal * z
}
