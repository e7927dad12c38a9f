mod common;

use std::collections::HashMap;

use axis_concat::{
    AxisConcatKernel, CompileContext, ConcatAxis, CpuQueue, DataType, MAX_DIMS, Tensor, TensorDescriptor, TensorPack,
    Window, validate,
};
use proptest::prelude::*;

const AXES: [ConcatAxis; 4] = [ConcatAxis::Width, ConcatAxis::Height, ConcatAxis::Depth, ConcatAxis::Batch];

/// An input shape, an output shape along `axis` and an offset that fits.
fn arb_config() -> impl Strategy<Value = (ConcatAxis, [usize; MAX_DIMS], [usize; MAX_DIMS], usize)> {
    (0usize..4, prop::array::uniform4(1usize..7), 0usize..5, 0usize..5).prop_map(|(axis, input, before, after)| {
        let axis = AXES[axis];
        let mut output = input;
        output[axis.index()] += before + after;
        (axis, input, output, before)
    })
}

fn configured(
    axis: ConcatAxis,
    input: &TensorDescriptor,
    offset: usize,
    output: &TensorDescriptor,
    width: usize,
) -> AxisConcatKernel {
    let mut kernel = AxisConcatKernel::new(axis);
    kernel.configure(&CompileContext::default().with_vector_width(width), input, offset, output);
    kernel
}

fn sentinel(desc: TensorDescriptor) -> Tensor {
    let values = vec![0xAB; desc.total_size()];
    let mut tensor = Tensor::new(desc);
    tensor.bytes_mut().copy_from_slice(&values);
    tensor
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn split_tiles_window_exactly(
        (axis, input, output, offset) in arb_config(),
        width in 1usize..9,
        dim in 0usize..MAX_DIMS,
        total in 1usize..8,
    ) {
        let input = TensorDescriptor::new(input, DataType::F32);
        let output = TensorDescriptor::new(output, DataType::F32);
        let kernel = configured(axis, &input, offset, &output, width);
        let window = kernel.window().unwrap();

        let parts = (0..total).map(|id| window.split(dim, id, total)).collect::<Vec<Window>>();

        for (i, a) in parts.iter().enumerate() {
            prop_assert!(a.is_sub_window_of(window));

            for b in &parts[i + 1..] {
                prop_assert!(a.is_disjoint_from(b));
            }
        }

        let mut visits = HashMap::new();

        for part in &parts {
            for tile in part.tiles() {
                for coord in tile.coordinates() {
                    *visits.entry(coord).or_insert(0usize) += 1;
                }
            }
        }

        let mut expected = 0;

        for tile in window.tiles() {
            for coord in tile.coordinates() {
                expected += 1;
                prop_assert_eq!(visits.get(&coord).copied(), Some(1));
            }
        }

        prop_assert_eq!(visits.len(), expected);
        prop_assert_eq!(expected, input.shape().size());
    }

    #[test]
    fn writes_only_the_offset_region(
        (axis, input, output, offset) in arb_config(),
        width in 1usize..9,
        seed in any::<u64>(),
    ) {
        let input = TensorDescriptor::new(input, DataType::F32);
        let output = TensorDescriptor::new(output, DataType::F32);
        let kernel = configured(axis, &input, offset, &output, width);

        let mut src = Tensor::new(input.clone());
        common::fill(&mut src, seed, 0.0, 1.0, false);
        let mut dst = sentinel(output.clone());

        kernel.dispatch(TensorPack::new(&src, &mut dst), kernel.window().unwrap(), &CpuQueue::with_threads(2));

        let a = axis.index();

        for coord in output.shape().coordinates() {
            let inside = coord[a] >= offset && coord[a] < offset + input.extent(a);

            if inside {
                let mut from = coord;
                from[a] -= offset;
                prop_assert_eq!(dst.element(&coord), src.element(&from));
            } else {
                prop_assert_eq!(dst.element(&coord), &[0xAB; 4][..]);
            }
        }
    }

    #[test]
    fn result_independent_of_tiling(
        (axis, input, output, offset) in arb_config(),
        dim in 0usize..MAX_DIMS,
        total in 1usize..6,
        seed in any::<u64>(),
    ) {
        let input = TensorDescriptor::new(input, DataType::U8);
        let output = TensorDescriptor::new(output, DataType::U8);

        let mut src = Tensor::new(input.clone());
        common::fill(&mut src, seed, 0.0, 1.0, false);

        let reference = {
            let kernel = configured(axis, &input, offset, &output, 1);
            let mut dst = sentinel(output.clone());
            kernel.dispatch(TensorPack::new(&src, &mut dst), kernel.window().unwrap(), &CpuQueue::default());
            dst
        };

        for width in [2, 3, 4, 8, 16] {
            let kernel = configured(axis, &input, offset, &output, width);
            let window = *kernel.window().unwrap();

            let mut dst = sentinel(output.clone());

            // partitions in reverse order to show ordering does not matter
            for id in (0..total).rev() {
                let part = window.split(dim, id, total);
                kernel.dispatch(TensorPack::new(&src, &mut dst), &part, &CpuQueue::with_threads(3));
            }

            prop_assert_eq!(&dst, &reference, "vector width {}", width);
        }
    }

    #[test]
    fn validate_matches_rules(
        in_shape in prop::collection::vec(1usize..4, 1..6),
        out_shape in prop::collection::vec(1usize..4, 1..6),
        offset in 0usize..4,
        axis in 0usize..4,
        same_type in any::<bool>(),
    ) {
        let axis = AXES[axis];
        let a = axis.index();

        let input = TensorDescriptor::new(in_shape.clone(), DataType::S8);
        let dtype = if same_type { DataType::S8 } else { DataType::U8 };
        let output = TensorDescriptor::new(out_shape.clone(), dtype);

        let extent = |shape: &[usize], d: usize| shape.get(d).copied().unwrap_or(1);
        let rank = in_shape.len().max(out_shape.len());

        let legal = same_type
            && (0..rank).filter(|&d| d != a).all(|d| extent(&in_shape, d) == extent(&out_shape, d))
            && offset + extent(&in_shape, a) <= extent(&out_shape, a)
            && in_shape.len() <= MAX_DIMS
            && out_shape.len() <= MAX_DIMS
            && in_shape.len() <= out_shape.len();

        prop_assert_eq!(validate(axis, &input, offset, &output).is_ok(), legal);
    }
}

#[test]
fn boundary_tiles_of_ten_by_four() {
    let input = TensorDescriptor::new([10, 1], DataType::F32);
    let output = TensorDescriptor::new([10, 3], DataType::F32);
    let kernel = configured(ConcatAxis::Height, &input, 1, &output, 4);

    let widths = kernel.window().unwrap().tiles().map(|t| t.width()).collect::<Vec<_>>();
    assert_eq!(widths, vec![4, 4, 2]);
}
