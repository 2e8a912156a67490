/// Source of the two random draws the search makes per step.
///
/// The annealer takes any implementation so runs can be seeded, or scripted
/// in tests.
pub trait RandomSource {
    /// Uniform integer in `0..bound`. `bound` is never zero.
    fn index(&mut self, bound: usize) -> usize;

    /// Uniform float in `[0, 1)`.
    fn unit(&mut self) -> f64;

    /// Two distinct positions in `0..len`, drawn uniformly without replacement.
    fn distinct_pair(&mut self, len: usize) -> (usize, usize) {
        let a = self.index(len);
        let mut b = self.index(len - 1);
        if b >= a {
            b += 1;
        }
        (a, b)
    }
}

impl RandomSource for fastrand::Rng {
    fn index(&mut self, bound: usize) -> usize {
        self.usize(0..bound)
    }

    fn unit(&mut self) -> f64 {
        self.f64()
    }
}

pub fn seeded(seed: Option<u64>) -> fastrand::Rng {
    if let Some(s) = seed {
        fastrand::Rng::with_seed(s)
    } else {
        fastrand::Rng::new()
    }
}
