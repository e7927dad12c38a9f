use crate::tensor::DataType;

/// Uniform asymmetric quantization parameters: `real = scale * (q - offset)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct QuantizationInfo {
    scale: f32,
    offset: i32,
}

impl Default for QuantizationInfo {
    fn default() -> Self {
        Self { scale: 1.0, offset: 0 }
    }
}

impl QuantizationInfo {
    pub fn new(scale: f32, offset: i32) -> Self {
        assert!(scale.is_finite() && scale > 0.0, "Invalid quantization scale {scale}!");
        Self { scale, offset }
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn offset(&self) -> i32 {
        self.offset
    }

    pub fn dequantize(&self, value: i32) -> f32 {
        (value - self.offset) as f32 * self.scale
    }

    /// Rounds to nearest and saturates to the range of `dtype`.
    pub fn quantize(&self, value: f32, dtype: DataType) -> i32 {
        let (lo, hi) = quantized_range(dtype);
        let q = (value / self.scale).round() as i64 + i64::from(self.offset);
        q.clamp(lo, hi) as i32
    }
}

fn quantized_range(dtype: DataType) -> (i64, i64) {
    match dtype {
        DataType::QAsymm8 => (0, 255),
        DataType::QAsymm8Signed => (-128, 127),
        _ => panic!("{dtype} is not an asymmetric quantized type!"),
    }
}

/// Maps a single stored 8-bit element from `input` quantization to `output` quantization.
pub fn requantize(byte: u8, dtype: DataType, input: QuantizationInfo, output: QuantizationInfo) -> u8 {
    let value = match dtype {
        DataType::QAsymm8 => i32::from(byte),
        DataType::QAsymm8Signed => i32::from(byte as i8),
        _ => panic!("{dtype} is not an asymmetric quantized type!"),
    };

    let q = output.quantize(input.dequantize(value), dtype);

    match dtype {
        DataType::QAsymm8Signed => q as i8 as u8,
        _ => q as u8,
    }
}
