//! Shared criterion settings and deterministic inputs for workspace benches.

use std::time::Duration;

use criterion::BenchmarkGroup;
use criterion::measurement::Measurement;
use rand::SeedableRng;
use rand::rngs::StdRng;

const RNG_SEED: u64 = 0x5EED_2026;
const SEED_MIX: u64 = 0x9E37_79B9_7F4A_7C15;

/// How long a benchmark group is sampled, scaled to the cost of one iteration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Runtime {
    Small,
    Medium,
    Large,
}

impl Runtime {
    fn settings(self) -> (usize, u64, u64) {
        // (sample size, warm-up ms, measurement ms)
        match self {
            Runtime::Small => (15, 100, 200),
            Runtime::Medium => (15, 500, 1_000),
            Runtime::Large => (10, 800, 1_500),
        }
    }

    pub fn apply<M: Measurement>(self, group: &mut BenchmarkGroup<'_, M>) {
        let (samples, warm_up_ms, measure_ms) = self.settings();
        group.sample_size(samples);
        group.warm_up_time(Duration::from_millis(warm_up_ms));
        group.measurement_time(Duration::from_millis(measure_ms));
    }
}

pub fn default_rng() -> StdRng {
    StdRng::seed_from_u64(RNG_SEED)
}

fn mix_seed(mut z: u64) -> u64 {
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Independent deterministic stream for a (workload kind, input size) pair.
pub fn rng_for(kind: u64, size: usize) -> StdRng {
    let seed = RNG_SEED
        ^ kind.wrapping_mul(SEED_MIX)
        ^ (size as u64).wrapping_mul(SEED_MIX.rotate_left(17));
    StdRng::seed_from_u64(mix_seed(seed))
}
