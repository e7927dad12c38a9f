use std::fmt;

use crate::tensor::{Coordinates, MAX_DIMS};

/// Iteration range `[start, end)` of one dimension, advancing `step` at a time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Dimension {
    start: usize,
    end: usize,
    step: usize,
}

impl Default for Dimension {
    fn default() -> Self {
        Self { start: 0, end: 1, step: 1 }
    }
}

impl Dimension {
    pub fn new(start: usize, end: usize, step: usize) -> Self {
        assert!(step > 0, "Step must be positive!");
        assert!(start <= end, "Invalid range {start}..{end}!");
        Self { start, end, step }
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> usize {
        self.end
    }

    pub fn step(&self) -> usize {
        self.step
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Number of steps needed to cover the range, the last one possibly partial.
    pub fn num_iterations(&self) -> usize {
        self.len().div_ceil(self.step)
    }
}

/// The work of a single work-item: a block of at most `step` elements per
/// dimension, starting at `origin`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Tile {
    pub origin: Coordinates,
    pub extent: Coordinates,
}

impl Tile {
    /// Number of contiguous x elements covered.
    pub fn width(&self) -> usize {
        self.extent[0]
    }

    pub fn is_partial(&self, window: &Window) -> bool {
        (0..MAX_DIMS).any(|d| self.extent[d] < window.dims[d].step)
    }

    /// Every coordinate covered, x fastest.
    pub fn coordinates(&self) -> impl Iterator<Item = Coordinates> + '_ {
        let [w, h, d, b] = self.extent;
        let o = self.origin;

        (0..b).flat_map(move |n| {
            (0..d).flat_map(move |z| {
                (0..h).flat_map(move |y| (0..w).map(move |x| [o[0] + x, o[1] + y, o[2] + z, o[3] + n]))
            })
        })
    }
}

/// Execution window: the iteration space of a kernel, one `Dimension` per axis.
///
/// The space is cut into tiles of `step` elements per dimension, each of which
/// is processed by a single work-item. Tiles at the upper end of a dimension
/// are truncated so that no tile reaches past `end`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Window {
    dims: [Dimension; MAX_DIMS],
}

impl fmt::Display for Window {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dims = self.dims.iter().map(|d| format!("{}..{}/{}", d.start, d.end, d.step)).collect::<Vec<_>>();
        write!(f, "[{}]", dims.join(", "))
    }
}

impl Window {
    pub fn new(dims: [Dimension; MAX_DIMS]) -> Self {
        Self { dims }
    }

    /// Window spanning `extents` from `origin`, processing `step_x` elements of
    /// the x dimension per work-item.
    pub fn from_extents(origin: Coordinates, extents: Coordinates, step_x: usize) -> Self {
        let dims = std::array::from_fn(|d| {
            let step = if d == 0 { step_x } else { 1 };
            Dimension::new(origin[d], origin[d] + extents[d], step)
        });

        Self { dims }
    }

    pub fn dim(&self, d: usize) -> Dimension {
        self.dims[d]
    }

    pub fn x(&self) -> Dimension {
        self.dims[0]
    }

    pub fn y(&self) -> Dimension {
        self.dims[1]
    }

    pub fn with_dimension(mut self, d: usize, dim: Dimension) -> Self {
        self.dims[d] = dim;
        self
    }

    pub fn start(&self) -> Coordinates {
        self.dims.map(|d| d.start)
    }

    pub fn extents(&self) -> Coordinates {
        self.dims.map(|d| d.len())
    }

    pub fn is_empty(&self) -> bool {
        self.dims.iter().any(Dimension::is_empty)
    }

    pub fn num_tiles(&self) -> usize {
        self.dims.iter().map(Dimension::num_iterations).product()
    }

    /// The `idx`-th tile, counting x fastest.
    pub fn tile(&self, mut idx: usize) -> Tile {
        assert!(idx < self.num_tiles(), "Tile {idx} out of range for window {self}!");

        let mut origin = [0; MAX_DIMS];
        let mut extent = [0; MAX_DIMS];

        for (d, dim) in self.dims.iter().enumerate() {
            let its = dim.num_iterations();
            let it = idx % its;
            idx /= its;

            origin[d] = dim.start + it * dim.step;
            extent[d] = dim.step.min(dim.end - origin[d]);
        }

        Tile { origin, extent }
    }

    pub fn tiles(&self) -> impl Iterator<Item = Tile> + '_ {
        (0..self.num_tiles()).map(|idx| self.tile(idx))
    }

    /// Part `id` of `total` near-equal partitions of this window along
    /// dimension `d`. Boundaries fall on tile boundaries, so partitions never
    /// share a tile; trailing partitions are empty when there are fewer tiles
    /// than partitions.
    pub fn split(&self, d: usize, id: usize, total: usize) -> Window {
        assert!(total > 0 && id < total, "Invalid partition {id} of {total}!");

        let dim = self.dims[d];
        let its = dim.num_iterations();
        let work = its / total;
        let rem = its % total;

        let (first, count) = if id < rem {
            (id * (work + 1), work + 1)
        } else {
            (rem * (work + 1) + (id - rem) * work, work)
        };

        let start = (dim.start + first * dim.step).min(dim.end);
        let end = (start + count * dim.step).min(dim.end);

        self.with_dimension(d, Dimension::new(start, end, dim.step))
    }

    /// Whether every tile of `self` is also a tile of `parent`.
    ///
    /// An empty window has no tiles, so only its empty dimensions need to start
    /// within `parent`.
    pub fn is_sub_window_of(&self, parent: &Window) -> bool {
        let pairs = || self.dims.iter().zip(parent.dims.iter());

        if self.is_empty() {
            return pairs()
                .filter(|(child, _)| child.is_empty())
                .all(|(child, parent)| child.start >= parent.start && child.start <= parent.end);
        }

        pairs().all(|(child, parent)| {
            let aligned = |x: usize| (x - parent.start) % parent.step == 0;

            child.step == parent.step
                && child.start >= parent.start
                && child.end <= parent.end
                && aligned(child.start)
                && (child.end == parent.end || aligned(child.end))
        })
    }

    /// Whether no coordinate is covered by both windows.
    pub fn is_disjoint_from(&self, other: &Window) -> bool {
        self.is_empty()
            || other.is_empty()
            || self.dims.iter().zip(other.dims.iter()).any(|(a, b)| a.end <= b.start || b.end <= a.start)
    }
}
