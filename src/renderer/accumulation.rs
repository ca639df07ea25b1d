use nalgebra::Vector3;
use rayon::prelude::*;
use winit::dpi::PhysicalSize;

/// 프레임마다 들어오는 샘플의 누적 평균.
///
/// 버퍼 두 개를 번갈아 씀 (ping-pong): 이전 틱에 쓴 버퍼를 읽고 다른 버퍼에 새 평균을 쓴 다음,
/// 방금 쓴 버퍼를 현재 버퍼로 노출함. 같은 프레임 안에서 읽기와 쓰기가 같은 메모리를 가리키는 일이 없음.
pub struct Accumulator {
    size: PhysicalSize<u32>,
    buffers: [Vec<Vector3<f32>>; 2],
    // true면 buffers[1]이 현재 (읽기) 버퍼
    parity: bool,
    frame_index: u32,
}

impl Accumulator {
    pub fn new(size: PhysicalSize<u32>) -> Self {
        let pixels = pixel_count(size);
        Self {
            size,
            buffers: [vec![Vector3::zeros(); pixels], vec![Vector3::zeros(); pixels]],
            parity: false,
            frame_index: 0,
        }
    }

    pub fn size(&self) -> PhysicalSize<u32> {
        self.size
    }

    /// 현재 평균에 합쳐진 샘플 수
    pub fn frame_index(&self) -> u32 {
        self.frame_index
    }

    /// 마지막으로 쓴 평균 버퍼
    pub fn current(&self) -> &[Vector3<f32>] {
        &self.buffers[self.read_index()]
    }

    /// 크기가 달라졌으면 버퍼를 다시 잡고 초기화함. 다시 잡았으면 true
    pub fn resize(&mut self, size: PhysicalSize<u32>) -> bool {
        if self.size == size {
            return false;
        }

        *self = Self::new(size);
        true
    }

    pub fn reset(&mut self) {
        for buffer in &mut self.buffers {
            buffer.fill(Vector3::zeros());
        }
        self.parity = false;
        self.frame_index = 0;
    }

    /// `sample(index)`로 픽셀마다 새 샘플을 받아 평균에 합치고 버퍼를 바꿈.
    /// 병렬 패스가 모두 끝난 뒤에야 돌아오므로, 반환 시점이 곧 프레임 경계임
    pub fn accumulate<F>(&mut self, sample: F) -> u32
    where
        F: Fn(usize) -> Vector3<f32> + Sync,
    {
        let read_index = self.read_index();
        let [first, second] = &mut self.buffers;
        let (read, write) = if read_index == 0 {
            (&*first, second)
        } else {
            (&*second, first)
        };

        let previous_weight = self.frame_index as f32;
        let scale = 1.0 / (self.frame_index as f32 + 1.0);

        write
            .par_iter_mut()
            .zip(read.par_iter())
            .enumerate()
            .for_each(|(index, (mean, previous))| {
                *mean = (previous * previous_weight + sample(index)) * scale;
            });

        self.frame_index += 1;
        self.parity = !self.parity;
        self.frame_index
    }

    fn read_index(&self) -> usize {
        usize::from(self.parity)
    }
}

pub fn pixel_count(size: PhysicalSize<u32>) -> usize {
    size.width as usize * size.height as usize
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use super::*;

    fn color(value: f32) -> Vector3<f32> {
        Vector3::new(value, value * 0.5, value * 2.0)
    }

    #[test]
    fn first_sample_after_reset_is_exact() {
        let mut accumulator = Accumulator::new(PhysicalSize::new(4, 3));
        accumulator.accumulate(|index| color(index as f32 + 10.0));
        accumulator.accumulate(|_| color(99.0));

        accumulator.reset();
        assert_eq!(accumulator.frame_index(), 0);

        let sample = |index: usize| Vector3::new(0.1 * index as f32, 1.0 / 3.0, 7.25);
        assert_eq!(accumulator.accumulate(sample), 1);
        for (index, mean) in accumulator.current().iter().enumerate() {
            assert_eq!(*mean, sample(index));
        }
    }

    #[test]
    fn running_mean_identity_holds() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut accumulator = Accumulator::new(PhysicalSize::new(2, 2));

        for _ in 0..64 {
            let n = accumulator.frame_index() as f32;
            let previous = accumulator.current().to_vec();
            let samples: Vec<Vector3<f32>> = (0..4)
                .map(|_| Vector3::new(rng.gen_range(0.0..10.0), rng.gen_range(0.0..10.0), rng.gen()))
                .collect();

            accumulator.accumulate(|index| samples[index]);

            for ((mean, previous), sample) in accumulator.current().iter().zip(&previous).zip(&samples) {
                let lhs = mean * (n + 1.0);
                let rhs = previous * n + sample;
                assert!((lhs - rhs).norm() <= 1e-3 * (1.0 + rhs.norm()), "{lhs} != {rhs}");
            }
        }
    }

    #[test]
    fn constant_samples_converge_to_constant() {
        let mut accumulator = Accumulator::new(PhysicalSize::new(3, 1));
        for _ in 0..10 {
            accumulator.accumulate(|_| color(2.0));
        }
        for mean in accumulator.current() {
            assert!((mean - color(2.0)).norm() < 1e-5);
        }
    }

    #[test]
    fn buffers_alternate_every_tick() {
        let mut accumulator = Accumulator::new(PhysicalSize::new(1, 1));

        accumulator.accumulate(|_| color(1.0));
        let first = accumulator.current().as_ptr();
        accumulator.accumulate(|_| color(3.0));
        let second = accumulator.current().as_ptr();
        accumulator.accumulate(|_| color(5.0));
        let third = accumulator.current().as_ptr();

        assert_ne!(first, second);
        assert_eq!(first, third);
        assert!((accumulator.current()[0] - color(3.0)).norm() < 1e-5);
    }

    #[test]
    fn resize_reallocates_and_resets() {
        let mut accumulator = Accumulator::new(PhysicalSize::new(2, 2));
        accumulator.accumulate(|_| color(1.0));

        assert!(!accumulator.resize(PhysicalSize::new(2, 2)));
        assert_eq!(accumulator.frame_index(), 1);

        assert!(accumulator.resize(PhysicalSize::new(5, 4)));
        assert_eq!(accumulator.frame_index(), 0);
        assert_eq!(accumulator.current().len(), 20);
        assert!(accumulator.current().iter().all(|mean| *mean == Vector3::zeros()));
    }
}
