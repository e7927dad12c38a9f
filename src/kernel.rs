use std::fmt;

use crate::{
    queue::{CompileContext, ComputeQueue, TensorPack},
    tensor::{DataType, MAX_DIMS, QuantizationInfo, TensorDescriptor, quantization},
    validate::{ConcatError, validate},
    window::Window,
};

/// Axis along which an input is placed into the output.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ConcatAxis {
    Width,
    Height,
    Depth,
    Batch,
}

impl ConcatAxis {
    pub fn index(&self) -> usize {
        match *self {
            Self::Width => 0,
            Self::Height => 1,
            Self::Depth => 2,
            Self::Batch => 3,
        }
    }

    pub fn name(&self) -> &'static str {
        match *self {
            Self::Width => "width",
            Self::Height => "height",
            Self::Depth => "depth",
            Self::Batch => "batch",
        }
    }
}

impl fmt::Display for ConcatAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// How a contiguous run of input elements is turned into output elements.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CopyRoutine {
    Copy { element_size: usize },
    Requantize { dtype: DataType, input: QuantizationInfo, output: QuantizationInfo },
}

impl CopyRoutine {
    pub fn select(input: &TensorDescriptor, output: &TensorDescriptor) -> Self {
        let dtype = input.dtype();

        if dtype.is_asymmetric_quantized() && input.quantization() != output.quantization() {
            Self::Requantize { dtype, input: input.quantization(), output: output.quantization() }
        } else {
            Self::Copy { element_size: dtype.element_size() }
        }
    }

    pub fn element_size(&self) -> usize {
        match *self {
            Self::Copy { element_size } => element_size,
            Self::Requantize { dtype, .. } => dtype.element_size(),
        }
    }

    pub fn apply(&self, src: &[u8], dst: &mut [u8]) {
        assert_eq!(src.len(), dst.len());

        match *self {
            Self::Copy { .. } => dst.copy_from_slice(src),
            Self::Requantize { dtype, input, output } => {
                for (d, &s) in dst.iter_mut().zip(src.iter()) {
                    *d = quantization::requantize(s, dtype, input, output);
                }
            }
        }
    }
}

/// Largest usable vector width for rows of `width` elements.
fn adjust_vector_width(preferred: usize, width: usize) -> usize {
    if width == 3 && preferred >= 3 {
        return 3;
    }

    let mut vector_width = preferred;

    while vector_width > width.max(1) {
        vector_width /= 2;
    }

    vector_width.max(1)
}

#[derive(Debug)]
struct Configured {
    dtype: DataType,
    offset: usize,
    vector_width: usize,
    routine: CopyRoutine,
    window: Window,
    config_id: String,
}

/// Copies an input tensor into the output tensor, starting at an offset
/// along a single axis.
///
/// The kernel is configured once, after which `dispatch` may be called any
/// number of times with different buffers of the configured shapes and with
/// any tiling of the configured window.
#[derive(Debug)]
pub struct AxisConcatKernel {
    axis: ConcatAxis,
    state: Option<Configured>,
}

impl AxisConcatKernel {
    pub fn new(axis: ConcatAxis) -> Self {
        Self { axis, state: None }
    }

    pub fn height() -> Self {
        Self::new(ConcatAxis::Height)
    }

    pub fn axis(&self) -> ConcatAxis {
        self.axis
    }

    pub fn is_ready(&self) -> bool {
        self.state.is_some()
    }

    pub fn offset(&self) -> Option<usize> {
        self.state.as_ref().map(|s| s.offset)
    }

    /// The full execution window, in output coordinates.
    pub fn window(&self) -> Option<&Window> {
        self.state.as_ref().map(|s| &s.window)
    }

    pub fn vector_width(&self) -> Option<usize> {
        self.state.as_ref().map(|s| s.vector_width)
    }

    pub fn routine(&self) -> Option<CopyRoutine> {
        self.state.as_ref().map(|s| s.routine)
    }

    pub fn config_id(&self) -> Option<&str> {
        self.state.as_ref().map(|s| s.config_id.as_str())
    }

    /// `validate` along this kernel's axis.
    pub fn validate(
        &self,
        input: &TensorDescriptor,
        offset: usize,
        output: &TensorDescriptor,
    ) -> Result<(), ConcatError> {
        validate(self.axis, input, offset, output)
    }

    /// Prepares the kernel to copy tensors described by `input` into tensors
    /// described by `output` at `offset`. No data is touched.
    ///
    /// ### Panics
    ///
    /// If the configuration does not pass `validate`.
    pub fn configure(
        &mut self,
        ctx: &CompileContext,
        input: &TensorDescriptor,
        offset: usize,
        output: &TensorDescriptor,
    ) {
        if let Err(err) = self.validate(input, offset, output) {
            panic!("Invalid {} concatenate configuration: {err}!", self.axis);
        }

        let vector_width = adjust_vector_width(ctx.vector_width(), input.extent(0));

        let mut origin = [0; MAX_DIMS];
        origin[self.axis.index()] = offset;

        let extents = input.shape().padded();
        let window = Window::from_extents(origin, extents, vector_width);
        let routine = CopyRoutine::select(input, output);

        let dims = extents.iter().map(usize::to_string).collect::<Vec<_>>().join("_");
        let config_id = format!("{}_concatenate_layer_{}_{offset}_{dims}", self.axis, input.dtype());

        log::debug!("configured {config_id}: window {window}, {routine:?}");

        self.state = Some(Configured { dtype: input.dtype(), offset, vector_width, routine, window, config_id });
    }

    /// Enqueues the copy of every tile of `window` on `queue`.
    ///
    /// `window` must be a sub-window of the configured window, such as one
    /// produced by `Window::split`. Tiles are processed independently, so
    /// any set of disjoint sub-windows covering the full window may be
    /// dispatched in any order with the same result.
    ///
    /// ### Panics
    ///
    /// If the kernel is not configured, `window` is not a sub-window of the
    /// configured window, or the bound tensors do not match the configuration.
    pub fn dispatch<Q: ComputeQueue>(&self, tensors: TensorPack<'_>, window: &Window, queue: &Q) {
        let Some(state) = &self.state else {
            panic!("Dispatched {} concatenate kernel before configuring it!", self.axis);
        };

        assert!(window.is_sub_window_of(&state.window), "Window {window} is not a sub-window of {}!", state.window);

        let (src, dst) = tensors.split();
        let in_desc = src.descriptor();
        let out_desc = dst.descriptor().clone();

        let dtype = in_desc.dtype();
        assert_eq!(dtype, state.dtype, "Bound data type {dtype} does not match {}!", state.config_id);

        if let Err(err) = self.validate(in_desc, state.offset, &out_desc) {
            panic!("Bound tensors are invalid for {}: {err}!", state.config_id);
        }

        assert_eq!(in_desc.shape().padded(), state.window.extents(), "Bound input does not match {}!", state.config_id);
        assert_eq!(CopyRoutine::select(in_desc, &out_desc), state.routine, "Bound quantization changed!");

        if window.is_empty() {
            return;
        }

        let axis = self.axis.index();
        let offset = state.offset;
        let routine = state.routine;
        let es = routine.element_size();

        let src_ptr = src.bytes().as_ptr() as usize;
        let dst_ptr = dst.bytes_mut().as_mut_ptr() as usize;

        log::trace!("dispatching {} over {window}: {} tiles", state.config_id, window.num_tiles());

        queue.enqueue(window.num_tiles(), |idx| {
            let tile = window.tile(idx);
            let [_, h, d, b] = tile.extent;
            let bytes = tile.width() * es;

            for n in 0..b {
                for z in 0..d {
                    for y in 0..h {
                        let out = [tile.origin[0], tile.origin[1] + y, tile.origin[2] + z, tile.origin[3] + n];

                        let mut inp = out;
                        inp[axis] -= offset;

                        let src_offset = in_desc.offset_of(&inp);
                        let dst_offset = out_desc.offset_of(&out);

                        // SAFETY: the run lies within both tensors as the window
                        // passed validation against their shapes, and tiles of a
                        // window never overlap so no two work-items write the
                        // same output bytes
                        unsafe {
                            let run = std::slice::from_raw_parts((src_ptr as *const u8).add(src_offset), bytes);
                            let out_run = std::slice::from_raw_parts_mut((dst_ptr as *mut u8).add(dst_offset), bytes);
                            routine.apply(run, out_run);
                        }
                    }
                }
            }
        });
    }
}
