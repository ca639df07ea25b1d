use nalgebra::{Point3, Vector3};

use crate::renderer::intersect::{self, Hit};
use crate::renderer::ray::Ray;

/// 자체 발광하는 재질은 "광원", 그렇지 않으면 "표면".
/// 광원이면 diffuse/specular는 쓰이지 않음.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    pub emissive: Vector3<f32>,
    pub diffuse: Vector3<f32>,
    pub specular: Vector3<f32>,
    /// Phong 지수. 항상 1 이상
    pub glossiness: f32,
}

impl Material {
    pub fn light(emissive: Vector3<f32>) -> Self {
        Self {
            emissive,
            diffuse: Vector3::zeros(),
            specular: Vector3::zeros(),
            glossiness: 1.0,
        }
    }

    pub fn diffuse(albedo: Vector3<f32>) -> Self {
        Self {
            emissive: Vector3::zeros(),
            diffuse: albedo,
            specular: Vector3::zeros(),
            glossiness: 1.0,
        }
    }

    pub fn glossy(albedo: Vector3<f32>, specular: Vector3<f32>, glossiness: f32) -> Self {
        Self {
            emissive: Vector3::zeros(),
            diffuse: albedo,
            specular,
            glossiness: glossiness.max(1.0),
        }
    }

    pub fn is_light(&self) -> bool {
        self.emissive.norm_squared() > 0.0
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::diffuse(Vector3::new(1.0, 1.0, 1.0))
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    pub center: Point3<f32>,
    pub radius: f32,
    pub material: Material,
}

impl Default for Sphere {
    fn default() -> Self {
        Self {
            center: Point3::origin(),
            radius: 1.0,
            material: Material::default(),
        }
    }
}

/// `dot(normal, x) + offset = 0` 을 만족하는 점들의 집합
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    pub normal: Vector3<f32>,
    pub offset: f32,
    pub material: Material,
}

/// 렌더링 중에는 바뀌지 않는 고정된 프리미티브 목록.
/// 순서는 같은 거리에서 충돌했을 때 어느 쪽을 고를지만 정함 (구 먼저, 그 다음 평면, 각각 선언 순).
#[derive(Debug, Clone)]
pub struct Scene {
    spheres: Vec<Sphere>,
    planes: Vec<Plane>,
}

impl Scene {
    pub fn new(spheres: Vec<Sphere>, planes: Vec<Plane>) -> Self {
        debug_assert!(spheres.iter().all(|sphere| sphere.radius > 0.0));
        let planes = planes
            .into_iter()
            .map(|plane| {
                // 법선 길이로 offset도 함께 나눠야 같은 평면이 유지됨
                let length = plane.normal.norm();
                if length > f32::EPSILON {
                    Plane {
                        normal: plane.normal / length,
                        offset: plane.offset / length,
                        ..plane
                    }
                } else {
                    plane
                }
            })
            .collect();

        Self { spheres, planes }
    }

    pub fn spheres(&self) -> &[Sphere] {
        &self.spheres
    }

    pub fn planes(&self) -> &[Plane] {
        &self.planes
    }

    pub fn intersect(&self, ray: &Ray, t_min: f32, t_max: f32) -> Option<Hit<'_>> {
        intersect::closest_hit(self, ray, t_min, t_max)
    }
}

impl Default for Scene {
    /// 데모용 방: 벽 다섯 개, 구 두 개, 천장 근처의 구형 광원 하나
    fn default() -> Self {
        let white = Material::diffuse(Vector3::new(0.75, 0.75, 0.75));
        let red = Material::diffuse(Vector3::new(0.75, 0.15, 0.12));
        let green = Material::diffuse(Vector3::new(0.15, 0.65, 0.18));

        let spheres = vec![
            Sphere {
                center: Point3::new(0.0, 3.9, -1.0),
                radius: 0.6,
                material: Material::light(Vector3::new(12.0, 11.0, 9.5)),
            },
            Sphere {
                center: Point3::new(-0.8, 0.7, -1.4),
                radius: 0.7,
                material: Material::diffuse(Vector3::new(0.8, 0.8, 0.85)),
            },
            Sphere {
                center: Point3::new(0.9, 0.5, -0.4),
                radius: 0.5,
                material: Material::glossy(
                    Vector3::new(0.2, 0.35, 0.8),
                    Vector3::new(0.9, 0.9, 0.9),
                    64.0,
                ),
            },
        ];

        let planes = vec![
            // 바닥 y = 0
            Plane { normal: Vector3::new(0.0, 1.0, 0.0), offset: 0.0, material: white },
            // 천장 y = 4
            Plane { normal: Vector3::new(0.0, -1.0, 0.0), offset: 4.0, material: white },
            // 뒷벽 z = -3
            Plane { normal: Vector3::new(0.0, 0.0, 1.0), offset: 3.0, material: white },
            // 왼쪽 x = -2
            Plane { normal: Vector3::new(1.0, 0.0, 0.0), offset: 2.0, material: red },
            // 오른쪽 x = 2
            Plane { normal: Vector3::new(-1.0, 0.0, 0.0), offset: 2.0, material: green },
        ];

        Self::new(spheres, planes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn glossiness_is_at_least_one() {
        let material = Material::glossy(Vector3::zeros(), Vector3::new(1.0, 1.0, 1.0), 0.25);
        assert_eq!(material.glossiness, 1.0);
    }

    #[test]
    fn only_emissive_materials_are_lights() {
        assert!(Material::light(Vector3::new(0.0, 0.0, 1.0)).is_light());
        assert!(!Material::diffuse(Vector3::new(1.0, 1.0, 1.0)).is_light());
        assert!(!Material::light(Vector3::zeros()).is_light());
    }

    #[test]
    fn plane_normals_are_normalized_on_load() {
        let scene = Scene::new(
            vec![],
            vec![Plane {
                normal: Vector3::new(0.0, 3.0, 0.0),
                offset: -3.0,
                material: Material::default(),
            }],
        );
        let plane = scene.planes()[0];
        assert!((plane.normal.norm() - 1.0).abs() < 1e-6);
        assert!((plane.offset + 1.0).abs() < 1e-6);
    }

    #[test]
    fn default_scene_has_a_light() {
        let scene = Scene::default();
        assert!(scene.spheres().iter().any(|sphere| sphere.material.is_light()));
        assert_eq!(scene.planes().len(), 5);
    }
}
