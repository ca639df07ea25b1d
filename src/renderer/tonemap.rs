use nalgebra::Vector3;
use rayon::prelude::*;

use crate::util::pack_rgba;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToneMapper {
    /// `pow(1 - exp(-hdr * exposure), 1 / gamma)`
    #[default]
    Exposure,
    /// Narkowicz의 ACES 근사. exposure와 gamma는 쓰지 않음
    Aces,
}

impl ToneMapper {
    pub fn label(&self) -> &'static str {
        match self {
            ToneMapper::Exposure => "Exposure + Gamma",
            ToneMapper::Aces => "ACES",
        }
    }

    pub fn map(&self, hdr: Vector3<f32>, exposure: f32, gamma: f32) -> Vector3<f32> {
        match self {
            ToneMapper::Exposure => hdr.map(|x| (1.0 - (-x * exposure).exp()).max(0.0).powf(1.0 / gamma)),
            ToneMapper::Aces => hdr.map(aces),
        }
    }

    /// 누적 버퍼 전체를 RGBA8로 변환해서 `output`에 씀
    pub fn map_buffer(&self, hdr: &[Vector3<f32>], output: &mut [u32], exposure: f32, gamma: f32) {
        debug_assert_eq!(hdr.len(), output.len());

        output
            .par_iter_mut()
            .zip(hdr.par_iter())
            .for_each(|(pixel, value)| *pixel = pack_rgba(&self.map(*value, exposure, gamma)));
    }
}

fn aces(x: f32) -> f32 {
    let a = 2.51;
    let b = 0.03;
    let c = 2.43;
    let d = 0.59;
    let e = 0.14;
    ((x * (a * x + b)) / (x * (c * x + d) + e)).clamp(0.0, 1.0)
}
