//! Benchmark support utilities for the greedy planner.
//!
//! Provides deterministic POI generation with clustered distributions for
//! reproducible benchmarks.

use geo::Coord;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Normal};
use ramble_core::{Poi, Tag, lat_lng};

/// Seed for deterministic random number generation in benchmarks.
pub const BENCHMARK_SEED: u64 = 42;

/// Tags to cycle through when labelling POIs.
pub const TAGS: [&str; 4] = ["history", "art", "nature", "culture"];

/// Number of cluster centres for POI distribution.
const CLUSTER_COUNT: usize = 5;

/// Standard deviation of POIs around their cluster centre, in degrees.
/// Roughly 300 m of latitude.
const CLUSTER_SPREAD: f64 = 0.003;

/// Side of the square cluster centres are scattered over, in degrees.
/// Roughly 2 km of latitude.
const AREA_SIZE: f64 = 0.02;

/// South-west corner of the benchmark area.
pub const AREA_ORIGIN: Coord<f64> = lat_lng(54.39, -1.75);

/// Centre of the benchmark area, used as the walk's start.
#[must_use]
#[expect(clippy::float_arithmetic, reason = "Required for centre offset")]
pub fn area_centre() -> Coord<f64> {
    lat_lng(AREA_ORIGIN.y + AREA_SIZE / 2.0, AREA_ORIGIN.x + AREA_SIZE / 2.0)
}

/// Generate a clustered POI distribution for benchmarks.
///
/// Creates `count` POIs spread over several clusters, each normally
/// distributed around its centre, with popularity and visit times drawn from
/// the same seeded RNG.
#[must_use]
pub fn generate_clustered_pois(count: usize, seed: u64) -> Vec<Poi> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let spread = Normal::new(0.0, CLUSTER_SPREAD).ok();

    #[expect(clippy::float_arithmetic, reason = "Required for coordinate offset")]
    let cluster_centres: Vec<Coord<f64>> = (0..CLUSTER_COUNT)
        .map(|_| {
            lat_lng(
                AREA_ORIGIN.y + rng.gen_range(0.0..AREA_SIZE),
                AREA_ORIGIN.x + rng.gen_range(0.0..AREA_SIZE),
            )
        })
        .collect();

    (0..count)
        .map(|i| {
            #[expect(
                clippy::integer_division_remainder_used,
                reason = "Modulo for cyclic assignment is intentional"
            )]
            let (cluster_idx, tag_idx) = (i % CLUSTER_COUNT, i % TAGS.len());
            let centre = cluster_centres
                .get(cluster_idx)
                .copied()
                .unwrap_or(AREA_ORIGIN);

            let mut jitter = || spread.map_or(0.0, |normal| normal.sample(&mut rng));
            #[expect(clippy::float_arithmetic, reason = "Required for coordinate offset")]
            let location = lat_lng(centre.y + jitter(), centre.x + jitter());

            let tag = TAGS
                .get(tag_idx)
                .and_then(|raw| Tag::new(raw).ok())
                .into_iter();
            Poi::new(format!("bench-{i:04}"), format!("Bench stop {i}"), location)
                .with_popularity(rng.gen_range(0.0..=1.0))
                .with_visit_minutes(rng.gen_range(5.0..20.0))
                .with_tags(tag)
        })
        .collect()
}
