//! Single-input axis concatenation kernel.
//!
//! Copies one input tensor into an offset sub-region of a larger output
//! tensor, iterating the region through an execution [`Window`] that a
//! scheduler may split into independent partitions.

/// Contains `AxisConcatKernel` and the per-tile copy routines.
pub mod kernel;
/// Contains the `ComputeQueue` API, the reference CPU queue and tensor bindings.
pub mod queue;
/// Contains tensor descriptors, data types and host tensors.
pub mod tensor;
/// Contains `validate` and `ConcatError`.
pub mod validate;
/// Contains `Window`, `Dimension` and `Tile`.
pub mod window;

pub use kernel::{AxisConcatKernel, ConcatAxis, CopyRoutine};
pub use queue::{CompileContext, ComputeQueue, CpuQueue, TensorPack};
pub use tensor::{
    Coordinates, DataType, MAX_DIMS, Padding, QuantizationInfo, Tensor, TensorDescriptor, TensorShape,
};
pub use validate::{ConcatError, validate};
pub use window::{Dimension, Tile, Window};
