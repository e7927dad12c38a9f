use rand::{Rng, SeedableRng, rngs::StdRng};
use rand_distr::{Distribution, Normal, Uniform};

use axis_concat::{DataType, Tensor};

enum Dist {
    Normal(Normal<f32>),
    Uniform(Uniform<f32>),
}

impl Dist {
    fn new(mean: f32, stdev: f32, use_gaussian: bool) -> Self {
        if use_gaussian {
            Self::Normal(Normal::new(mean, stdev).unwrap())
        } else {
            Self::Uniform(Uniform::new(mean - stdev, mean + stdev))
        }
    }

    fn sample(&self, rng: &mut StdRng) -> f32 {
        match self {
            Dist::Normal(x) => x.sample(rng),
            Dist::Uniform(x) => x.sample(rng),
        }
    }
}

/// Fills every element of `tensor` (padding excluded) from a generator seeded
/// with `seed`. `F32` tensors draw from the given distribution, every other
/// type gets uniformly random bit patterns.
pub fn fill(tensor: &mut Tensor, seed: u64, mean: f32, stdev: f32, use_gaussian: bool) {
    let mut rng = StdRng::seed_from_u64(seed);
    let dist = Dist::new(mean, stdev, use_gaussian);

    let dtype = tensor.descriptor().dtype();
    let coords = tensor.descriptor().shape().coordinates().collect::<Vec<_>>();

    for coord in coords {
        match dtype {
            DataType::F32 => tensor.set_element(&coord, &dist.sample(&mut rng).to_le_bytes()),
            _ => {
                let mut bytes = [0u8; 4];
                rng.fill(&mut bytes[..dtype.element_size()]);
                tensor.set_element(&coord, &bytes[..dtype.element_size()]);
            }
        }
    }
}
