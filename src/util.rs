use nalgebra::Vector3;

/// 0..1 색상을 메모리상 R, G, B, A 순서인 u32로 묶음 (알파는 언제나 255)
pub fn pack_rgba(color: &Vector3<f32>) -> u32 {
    let channel = |value: f32| (value.clamp(0.0, 1.0) * 255.0).round() as u8;
    u32::from_ne_bytes([channel(color.x), channel(color.y), channel(color.z), 0xFF])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packs_in_memory_order() {
        let packed = pack_rgba(&Vector3::new(1.0, 0.0, 0.5));
        assert_eq!(packed.to_ne_bytes(), [255, 0, 128, 255]);
    }

    #[test]
    fn out_of_range_and_nan_are_clamped() {
        let packed = pack_rgba(&Vector3::new(-3.0, 7.0, f32::NAN));
        let [r, g, _, a] = packed.to_ne_bytes();
        assert_eq!((r, g, a), (0, 255, 255));
    }
}
