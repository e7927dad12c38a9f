use crate::tensor::Tensor;

/// Maximum number of elements a single work-item may process along x.
pub const MAX_VECTOR_WIDTH: usize = 16;

/// Target configuration consulted when a kernel is configured.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CompileContext {
    vector_width: usize,
}

impl Default for CompileContext {
    fn default() -> Self {
        Self { vector_width: 4 }
    }
}

impl CompileContext {
    /// Preferred number of x elements processed per work-item.
    pub fn with_vector_width(mut self, vector_width: usize) -> Self {
        assert!((1..=MAX_VECTOR_WIDTH).contains(&vector_width), "Unsupported vector width {vector_width}!");
        self.vector_width = vector_width;
        self
    }

    pub fn vector_width(&self) -> usize {
        self.vector_width
    }
}

/// Somewhere work-items can be submitted for execution.
pub trait ComputeQueue {
    /// Runs `work` once for every work-item id in `0..num_items`. Items may
    /// run concurrently and in any order.
    fn enqueue<F: Fn(usize) + Sync>(&self, num_items: usize, work: F);

    /// Block until all enqueued work has completed.
    fn finish(&self) {}
}

/// Executes work-items on host threads, each thread taking a contiguous
/// chunk of ids. Enqueued work has completed by the time `enqueue` returns.
#[derive(Clone, Copy, Debug)]
pub struct CpuQueue {
    threads: usize,
}

impl Default for CpuQueue {
    fn default() -> Self {
        Self { threads: 1 }
    }
}

impl CpuQueue {
    pub fn with_threads(threads: usize) -> Self {
        let mut queue = Self::default();
        queue.set_threads(threads);
        queue
    }

    pub fn set_threads(&mut self, threads: usize) {
        assert!(threads > 0, "Need at least one thread!");
        self.threads = threads;
    }

    pub fn threads(&self) -> usize {
        self.threads
    }
}

impl ComputeQueue for CpuQueue {
    fn enqueue<F: Fn(usize) + Sync>(&self, num_items: usize, work: F) {
        let threads = self.threads.min(num_items);

        log::trace!("cpu queue: {num_items} work-items over {threads} threads");

        if threads <= 1 {
            (0..num_items).for_each(work);
            return;
        }

        let chunk_size = num_items.div_ceil(threads);
        let work = &work;

        std::thread::scope(|s| {
            for start in (0..num_items).step_by(chunk_size) {
                let end = (start + chunk_size).min(num_items);
                s.spawn(move || (start..end).for_each(work));
            }
        });
    }
}

/// Buffers bound to a single dispatch.
pub struct TensorPack<'a> {
    src: &'a Tensor,
    dst: &'a mut Tensor,
}

impl<'a> TensorPack<'a> {
    pub fn new(src: &'a Tensor, dst: &'a mut Tensor) -> Self {
        Self { src, dst }
    }

    pub fn src(&self) -> &Tensor {
        self.src
    }

    pub fn dst(&self) -> &Tensor {
        self.dst
    }

    pub(crate) fn split(self) -> (&'a Tensor, &'a mut Tensor) {
        (self.src, self.dst)
    }
}
