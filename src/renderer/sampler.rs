use nalgebra::Vector2;

const MULTIPLIER: u32 = 1664525;
const INCREMENT: u32 = 1013904223;

/// 픽셀/프레임마다 새로 시드되는 32비트 LCG.
///
/// 같은 (픽셀 좌표, 시간) 조합은 항상 같은 수열을 만듦. 렌더링 노이즈용일 뿐
/// 암호학적으로 안전하지 않으니 다른 곳에 쓰지 말 것.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sampler {
    state: u32,
}

impl Sampler {
    pub fn seed(pixel: Vector2<f32>, frame_time: f32) -> Self {
        let x = pixel.x.floor() as i64 as u32;
        let y = pixel.y.floor() as i64 as u32;
        let time = (frame_time * 26699.0).floor() as i64 as u32;

        Self {
            state: x
                .wrapping_mul(1973)
                .wrapping_add(y.wrapping_mul(9277))
                .wrapping_add(time),
        }
    }

    pub fn state(&self) -> u32 {
        self.state
    }

    /// 0..32768
    pub fn next_uint(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(MULTIPLIER).wrapping_add(INCREMENT);
        (self.state & 0x7fff_ffff) % 32768
    }

    /// 0..=1. 분모가 32767이라 1.0도 나올 수 있음
    pub fn next_float(&mut self) -> f32 {
        self.next_uint() as f32 / 32767.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_sequence() {
        let mut a = Sampler::seed(Vector2::new(12.5, 7.25), 3.75);
        let mut b = Sampler::seed(Vector2::new(12.5, 7.25), 3.75);

        for _ in 0..256 {
            assert_eq!(a.next_float().to_bits(), b.next_float().to_bits());
        }
    }

    #[test]
    fn different_pixels_diverge() {
        let mut a = Sampler::seed(Vector2::new(0.0, 0.0), 1.0);
        let mut b = Sampler::seed(Vector2::new(1.0, 0.0), 1.0);

        let first: Vec<u32> = (0..8).map(|_| a.next_uint()).collect();
        let second: Vec<u32> = (0..8).map(|_| b.next_uint()).collect();
        assert_ne!(first, second);
    }

    #[test]
    fn seed_uses_floored_coordinates() {
        assert_eq!(
            Sampler::seed(Vector2::new(3.9, 4.1), 0.0),
            Sampler::seed(Vector2::new(3.0, 4.0), 0.0)
        );
        assert_eq!(Sampler::seed(Vector2::new(2.0, 3.0), 1.0).state(), 2 * 1973 + 3 * 9277 + 26699);
    }

    #[test]
    fn lcg_step_matches_reference() {
        let mut sampler = Sampler::seed(Vector2::zeros(), 0.0);
        // 0 * 1664525 + 1013904223 = 1013904223, & 0x7fffffff = 1013904223, % 32768 = 1013904223 % 32768
        assert_eq!(sampler.next_uint(), 1013904223 % 32768);
        assert_eq!(sampler.state(), 1013904223);
    }

    #[test]
    fn floats_stay_in_unit_range() {
        let mut sampler = Sampler::seed(Vector2::new(640.0, 360.0), 12.0);
        for _ in 0..10_000 {
            let value = sampler.next_float();
            assert!((0.0..=1.0).contains(&value));
        }
    }
}
