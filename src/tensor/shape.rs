use std::fmt;

/// Maximum number of dimensions a kernel iterates over: width, height, depth and batch.
pub const MAX_DIMS: usize = 4;

/// A position in a tensor of at most `MAX_DIMS` dimensions.
pub type Coordinates = [usize; MAX_DIMS];

/// Ordered per-axis extents, innermost (width) first.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct TensorShape(Vec<usize>);

impl<const N: usize> From<[usize; N]> for TensorShape {
    fn from(value: [usize; N]) -> Self {
        Self(value.to_vec())
    }
}

impl From<Vec<usize>> for TensorShape {
    fn from(value: Vec<usize>) -> Self {
        Self(value)
    }
}

impl From<&[usize]> for TensorShape {
    fn from(value: &[usize]) -> Self {
        Self(value.to_vec())
    }
}

impl fmt::Debug for TensorShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.0)
    }
}

impl fmt::Display for TensorShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dims = self.0.iter().map(usize::to_string).collect::<Vec<_>>();
        write!(f, "[{}]", dims.join("x"))
    }
}

impl TensorShape {
    pub fn rank(&self) -> usize {
        self.0.len()
    }

    /// Extent of `axis`, where axes past the rank have extent 1.
    pub fn extent(&self, axis: usize) -> usize {
        self.0.get(axis).copied().unwrap_or(1)
    }

    pub fn set(&mut self, axis: usize, extent: usize) {
        if axis >= self.0.len() {
            self.0.resize(axis + 1, 1);
        }

        self.0[axis] = extent;
    }

    pub fn size(&self) -> usize {
        self.0.iter().product()
    }

    pub fn dims(&self) -> &[usize] {
        &self.0
    }

    /// Extents padded out with 1s to `MAX_DIMS` dimensions.
    pub fn padded(&self) -> Coordinates {
        std::array::from_fn(|axis| self.extent(axis))
    }

    pub fn contains(&self, coords: &Coordinates) -> bool {
        coords.iter().enumerate().all(|(axis, &c)| c < self.extent(axis))
    }

    /// Every coordinate of the first `MAX_DIMS` dimensions, x fastest.
    pub fn coordinates(&self) -> impl Iterator<Item = Coordinates> {
        let [w, h, d, b] = self.padded();

        (0..b).flat_map(move |n| (0..d).flat_map(move |z| (0..h).flat_map(move |y| (0..w).map(move |x| [x, y, z, n]))))
    }
}
