use std::fmt;

/// Element type of a tensor.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataType {
    U8,
    S8,
    QAsymm8,
    QAsymm8Signed,
    U16,
    S16,
    F16,
    U32,
    S32,
    F32,
}

impl DataType {
    pub fn element_size(&self) -> usize {
        match *self {
            Self::U8 | Self::S8 | Self::QAsymm8 | Self::QAsymm8Signed => 1,
            Self::U16 | Self::S16 | Self::F16 => 2,
            Self::U32 | Self::S32 | Self::F32 => 4,
        }
    }

    /// Asymmetric 8-bit types, whose values only have meaning together
    /// with a `QuantizationInfo`.
    pub fn is_asymmetric_quantized(&self) -> bool {
        matches!(self, Self::QAsymm8 | Self::QAsymm8Signed)
    }

    pub fn name(&self) -> &'static str {
        match *self {
            Self::U8 => "u8",
            Self::S8 => "s8",
            Self::QAsymm8 => "qasymm8",
            Self::QAsymm8Signed => "qasymm8_signed",
            Self::U16 => "u16",
            Self::S16 => "s16",
            Self::F16 => "f16",
            Self::U32 => "u32",
            Self::S32 => "s32",
            Self::F32 => "f32",
        }
    }
}

impl fmt::Debug for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
