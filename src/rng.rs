use rand::Rng;

/// Source of uniform random choices used by spawners and wall patterns.
///
/// Every [`rand::Rng`] is a `RandomSource`, so production code passes a
/// seeded `StdRng`. Tests can script exact values with [`SequenceRandom`].
pub trait RandomSource {
    /// Returns a uniform integer in `0..upper`. `upper` must be non-zero.
    fn below(&mut self, upper: usize) -> usize;

    /// Picks one element uniformly; `None` for an empty slice.
    fn choose<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            return None;
        }
        items.get(self.below(items.len()))
    }
}

impl<R: Rng + ?Sized> RandomSource for R {
    fn below(&mut self, upper: usize) -> usize {
        debug_assert!(upper > 0);
        self.gen_range(0..upper)
    }
}

/// Replays a fixed list of values, cycling when exhausted.
///
/// Each value is reduced modulo the requested upper bound.
#[derive(Debug, Clone)]
pub struct SequenceRandom {
    values: Vec<usize>,
    cursor: usize,
}

impl SequenceRandom {
    #[must_use]
    pub fn new(values: Vec<usize>) -> Self {
        Self { values, cursor: 0 }
    }
}

impl RandomSource for SequenceRandom {
    fn below(&mut self, upper: usize) -> usize {
        debug_assert!(upper > 0);
        if self.values.is_empty() {
            return 0;
        }

        let value = self.values[self.cursor % self.values.len()];
        self.cursor = (self.cursor + 1) % self.values.len();
        value % upper
    }
}
