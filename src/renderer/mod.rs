use std::path::Path;

use image::error::{ParameterError, ParameterErrorKind};
use image::{ImageError, ImageResult, RgbaImage};
use log::{debug, info, trace};
use nalgebra::{Vector2, Vector3};
use winit::dpi::PhysicalSize;

use crate::renderer::accumulation::{pixel_count, Accumulator};
use crate::renderer::camera::CameraPose;
use crate::renderer::integrator::{Kernel, PathIntegrator, RayCaster, DEFAULT_MAX_BOUNCES};
use crate::renderer::sampler::Sampler;
use crate::renderer::scene::Scene;
use crate::renderer::tonemap::ToneMapper;

pub mod accumulation;
pub mod camera;
pub mod integrator;
pub mod intersect;
pub mod ray;
pub mod sampler;
pub mod scene;
pub mod tonemap;

pub struct Settings {
    pub path_trace: bool,
    pub max_bounces: usize,
    pub tonemap: ToneMapper,
    pub exposure: f32,
    pub gamma: f32,
    /// 뷰어 전용. 창 크기 대비 렌더 해상도 비율
    pub resolution_scale: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            path_trace: true,
            max_bounces: DEFAULT_MAX_BOUNCES,
            tonemap: ToneMapper::default(),
            exposure: 1.0,
            gamma: 2.2,
            resolution_scale: 0.5,
        }
    }
}

/// 화면/입력 쪽에서 매 프레임 넘겨주는 값들
#[derive(Debug, Clone, Copy)]
pub struct FrameInput {
    pub size: PhysicalSize<u32>,
    /// 시작 후 경과 시간(초). 난수 시드에만 쓰임
    pub time: f32,
    pub pose: CameraPose,
    pub path_trace: bool,
    pub reset: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ResetCause {
    FirstFrame,
    CameraMoved,
    ModeToggled,
    BouncesChanged,
    Requested,
}

pub struct Renderer {
    scene: Scene,
    accumulator: Accumulator,
    display: Vec<u32>,
    pub settings: Settings,
    last_pose: Option<CameraPose>,
    last_path_trace: bool,
    last_bounces: usize,
}

impl Renderer {
    pub fn new(scene: Scene) -> Self {
        let settings = Settings::default();
        Self {
            scene,
            accumulator: Accumulator::new(PhysicalSize::new(0, 0)),
            display: vec![],
            last_path_trace: settings.path_trace,
            last_bounces: settings.max_bounces,
            settings,
            last_pose: None,
        }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn size(&self) -> PhysicalSize<u32> {
        self.accumulator.size()
    }

    pub fn frame_index(&self) -> u32 {
        self.accumulator.frame_index()
    }

    /// 누적된 HDR radiance
    pub fn hdr(&self) -> &[Vector3<f32>] {
        self.accumulator.current()
    }

    /// 톤 매핑된 RGBA8 픽셀들
    pub fn display(&self) -> &[u32] {
        &self.display
    }

    /// 한 프레임 진행: 필요하면 누적을 초기화하고, 픽셀마다 샘플 하나를 더한 뒤 톤 매핑함.
    /// 누적된 샘플 수를 돌려줌
    pub fn tick(&mut self, frame: &FrameInput) -> u32 {
        if frame.size.width == 0 || frame.size.height == 0 {
            return self.accumulator.frame_index();
        }

        if self.accumulator.resize(frame.size) {
            info!("render target reallocated: {}x{}", frame.size.width, frame.size.height);
            self.display = vec![0; pixel_count(frame.size)];
        }

        if let Some(cause) = self.reset_cause(frame) {
            debug!("accumulation reset: {cause:?}");
            self.accumulator.reset();
        }
        self.last_pose = Some(frame.pose);
        self.last_path_trace = frame.path_trace;
        self.last_bounces = self.settings.max_bounces;

        let path_integrator = PathIntegrator {
            max_bounces: self.settings.max_bounces,
        };
        let kernel: &dyn Kernel = if frame.path_trace {
            &path_integrator
        } else {
            &RayCaster
        };

        let scene = &self.scene;
        let size = frame.size;
        let pose = frame.pose;
        let time = frame.time;

        let frame_index = self.accumulator.accumulate(|index| {
            let x = (index % size.width as usize) as u32;
            let y = (index / size.width as usize) as u32;

            let ray = pose.ray_for_pixel(x, y, size);
            let mut sampler = Sampler::seed(Vector2::new(x as f32, y as f32), time);
            kernel.radiance(scene, &ray, &mut sampler)
        });

        self.settings.tonemap.map_buffer(
            self.accumulator.current(),
            &mut self.display,
            self.settings.exposure,
            self.settings.gamma,
        );

        trace!("frame {frame_index} done");
        frame_index
    }

    fn reset_cause(&self, frame: &FrameInput) -> Option<ResetCause> {
        match self.last_pose {
            None => Some(ResetCause::FirstFrame),
            Some(pose) if pose != frame.pose => Some(ResetCause::CameraMoved),
            _ if self.last_path_trace != frame.path_trace => Some(ResetCause::ModeToggled),
            _ if frame.path_trace && self.last_bounces != self.settings.max_bounces => {
                Some(ResetCause::BouncesChanged)
            }
            _ if frame.reset => Some(ResetCause::Requested),
            _ => None,
        }
    }

    pub fn snapshot(&self) -> Option<RgbaImage> {
        let size = self.size();
        RgbaImage::from_raw(size.width, size.height, bytemuck::cast_slice(&self.display).to_vec())
    }

    pub fn save_snapshot<P: AsRef<Path>>(&self, path: P) -> ImageResult<()> {
        let image = self.snapshot().ok_or_else(|| {
            ImageError::Parameter(ParameterError::from_kind(ParameterErrorKind::DimensionMismatch))
        })?;
        image.save(path)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(Scene::default())
    }
}
