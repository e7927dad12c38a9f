use thiserror::Error;

use crate::{
    kernel::ConcatAxis,
    tensor::{DataType, MAX_DIMS, TensorDescriptor},
};

/// Reason a tensor cannot be concatenated into another at a given offset.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ConcatError {
    #[error("Mismatched data types: input is {input}, output is {output}")]
    DataTypeMismatch { input: DataType, output: DataType },

    #[error("Mismatched extents along axis {axis}: input has {input}, output has {output}")]
    ShapeMismatch { axis: usize, input: usize, output: usize },

    #[error("Input of extent {extent} at offset {offset} overflows output extent {available}")]
    OffsetOverflow { offset: usize, extent: usize, available: usize },

    #[error("Tensors of rank {rank} are not supported, maximum is {}", MAX_DIMS)]
    UnsupportedRank { rank: usize },

    #[error("Input rank {input} exceeds output rank {output}")]
    RankMismatch { input: usize, output: usize },
}

/// Checks whether `input` can be written into `output` starting at `offset`
/// along `axis`.
///
/// Checks run in order and the first failure is returned:
/// 1. identical data types
/// 2. identical extents along every other axis
/// 3. `offset + input extent <= output extent` along `axis`
/// 4. both ranks within `MAX_DIMS`, and the input rank no larger than the output rank
pub fn validate(
    axis: ConcatAxis,
    input: &TensorDescriptor,
    offset: usize,
    output: &TensorDescriptor,
) -> Result<(), ConcatError> {
    if input.dtype() != output.dtype() {
        return Err(ConcatError::DataTypeMismatch { input: input.dtype(), output: output.dtype() });
    }

    let concat = axis.index();

    for d in (0..input.rank().max(output.rank())).filter(|&d| d != concat) {
        if input.extent(d) != output.extent(d) {
            return Err(ConcatError::ShapeMismatch { axis: d, input: input.extent(d), output: output.extent(d) });
        }
    }

    let extent = input.extent(concat);
    let available = output.extent(concat);

    if offset.checked_add(extent).is_none_or(|end| end > available) {
        return Err(ConcatError::OffsetOverflow { offset, extent, available });
    }

    for rank in [input.rank(), output.rank()] {
        if rank > MAX_DIMS {
            return Err(ConcatError::UnsupportedRank { rank });
        }
    }

    if input.rank() > output.rank() {
        return Err(ConcatError::RankMismatch { input: input.rank(), output: output.rank() });
    }

    Ok(())
}
