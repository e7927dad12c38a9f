use crate::tensor::{Coordinates, DataType, MAX_DIMS, QuantizationInfo, TensorShape};

/// Extra elements surrounding the x/y plane of a tensor in memory.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Padding {
    pub top: usize,
    pub right: usize,
    pub bottom: usize,
    pub left: usize,
}

impl Padding {
    pub fn uniform(size: usize) -> Self {
        Self { top: size, right: size, bottom: size, left: size }
    }
}

/// Metadata for a tensor: shape, element type and memory layout.
/// Holds no data.
#[derive(Clone, Debug, PartialEq)]
pub struct TensorDescriptor {
    shape: TensorShape,
    dtype: DataType,
    quantization: QuantizationInfo,
    padding: Padding,
}

impl TensorDescriptor {
    pub fn new(shape: impl Into<TensorShape>, dtype: DataType) -> Self {
        Self { shape: shape.into(), dtype, quantization: QuantizationInfo::default(), padding: Padding::default() }
    }

    pub fn with_quantization(mut self, quantization: QuantizationInfo) -> Self {
        self.quantization = quantization;
        self
    }

    pub fn with_padding(mut self, padding: Padding) -> Self {
        self.padding = padding;
        self
    }

    pub fn shape(&self) -> &TensorShape {
        &self.shape
    }

    pub fn dtype(&self) -> DataType {
        self.dtype
    }

    pub fn quantization(&self) -> QuantizationInfo {
        self.quantization
    }

    pub fn padding(&self) -> Padding {
        self.padding
    }

    pub fn rank(&self) -> usize {
        self.shape.rank()
    }

    pub fn extent(&self, axis: usize) -> usize {
        self.shape.extent(axis)
    }

    pub fn element_size(&self) -> usize {
        self.dtype.element_size()
    }

    /// Byte stride of each of the first `MAX_DIMS` dimensions.
    pub fn strides(&self) -> Coordinates {
        let Padding { top, right, bottom, left } = self.padding;
        let es = self.element_size();

        let mut strides = [0; MAX_DIMS];
        strides[0] = es;
        strides[1] = es * (left + self.extent(0) + right);
        strides[2] = strides[1] * (top + self.extent(1) + bottom);
        strides[3] = strides[2] * self.extent(2);

        strides
    }

    /// Byte offset of the element at coordinates `[0, 0, 0, 0]`.
    pub fn offset_first_element(&self) -> usize {
        let strides = self.strides();
        self.padding.top * strides[1] + self.padding.left * strides[0]
    }

    /// Number of bytes required to back this tensor, padding included.
    pub fn total_size(&self) -> usize {
        let outer: usize = self.shape.dims().iter().skip(MAX_DIMS).product();
        self.strides()[MAX_DIMS - 1] * self.extent(MAX_DIMS - 1) * outer
    }

    /// Byte offset of the element at `coords`.
    pub fn offset_of(&self, coords: &Coordinates) -> usize {
        debug_assert!(self.shape.contains(coords), "{coords:?} out of bounds for {}", self.shape);

        let strides = self.strides();
        let offset = coords.iter().zip(strides.iter()).map(|(c, s)| c * s).sum::<usize>();
        self.offset_first_element() + offset
    }
}
