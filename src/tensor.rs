mod descriptor;
mod dtype;
pub mod quantization;
mod shape;

pub use descriptor::{Padding, TensorDescriptor};
pub use dtype::DataType;
pub use quantization::QuantizationInfo;
pub use shape::{Coordinates, MAX_DIMS, TensorShape};

/// Host tensor: a descriptor together with the bytes backing it.
#[derive(Clone, Debug, PartialEq)]
pub struct Tensor {
    desc: TensorDescriptor,
    buf: Vec<u8>,
}

impl Tensor {
    /// Zero initialised tensor, padding included.
    pub fn new(desc: TensorDescriptor) -> Self {
        let buf = vec![0; desc.total_size()];
        Self { desc, buf }
    }

    /// Tensor whose elements are taken in order from `values`, x fastest.
    pub fn from_f32(desc: TensorDescriptor, values: &[f32]) -> Self {
        assert_eq!(desc.dtype(), DataType::F32);

        let mut tensor = Self::new(desc);
        tensor.load_from_slice(&values.iter().flat_map(|x| x.to_le_bytes()).collect::<Vec<_>>());
        tensor
    }

    /// Tensor with single byte elements taken in order from `values`, x fastest.
    pub fn from_u8(desc: TensorDescriptor, values: &[u8]) -> Self {
        assert_eq!(desc.element_size(), 1);

        let mut tensor = Self::new(desc);
        tensor.load_from_slice(values);
        tensor
    }

    pub fn descriptor(&self) -> &TensorDescriptor {
        &self.desc
    }

    pub fn bytes(&self) -> &[u8] {
        &self.buf
    }

    pub fn bytes_mut(&mut self) -> &mut [u8] {
        &mut self.buf
    }

    /// Loads densely packed element bytes into the (possibly padded) layout.
    pub fn load_from_slice(&mut self, values: &[u8]) {
        let es = self.desc.element_size();
        assert_eq!(values.len(), self.desc.shape().size() * es, "Mismatched element count!");

        let coords = self.desc.shape().coordinates().collect::<Vec<_>>();

        for (coord, value) in coords.iter().zip(values.chunks_exact(es)) {
            self.set_element(coord, value);
        }
    }

    /// Writes the densely packed element bytes into a new vec.
    pub fn write_to_vec(&self) -> Vec<u8> {
        self.desc.shape().coordinates().flat_map(|coord| self.element(&coord).to_vec()).collect()
    }

    pub fn element(&self, coords: &Coordinates) -> &[u8] {
        assert!(self.desc.shape().contains(coords), "{coords:?} out of bounds for {}!", self.desc.shape());

        let offset = self.desc.offset_of(coords);
        &self.buf[offset..offset + self.desc.element_size()]
    }

    pub fn set_element(&mut self, coords: &Coordinates, value: &[u8]) {
        assert!(self.desc.shape().contains(coords), "{coords:?} out of bounds for {}!", self.desc.shape());
        assert_eq!(value.len(), self.desc.element_size());

        let offset = self.desc.offset_of(coords);
        self.buf[offset..offset + value.len()].copy_from_slice(value);
    }

    pub fn get_f32(&self, coords: &Coordinates) -> f32 {
        assert_eq!(self.desc.dtype(), DataType::F32);
        let bytes = self.element(coords);
        f32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
    }

    pub fn values_f32(&self) -> Vec<f32> {
        self.desc.shape().coordinates().map(|coord| self.get_f32(&coord)).collect()
    }
}
