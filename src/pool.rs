//! Continent-balanced country pools.
//!
//! Pile-style boards draw from a pool with an equal quota of countries per
//! continent rather than a uniform sample of the whole alphabet, so every
//! board shows the same geographic spread regardless of seed.

use rustc_hash::FxHashMap;

use crate::countries::{Continent, UN193};
use crate::rng::{sub_seed, sub_seed_indexed, Mulberry32, Purpose};

/// Countries drawn per continent for a balanced pool.
pub const DEFAULT_QUOTA: usize = 10;

/// Builds a pool of `quota` countries from each real continent.
///
/// Codes without a known continent are excluded. Each continent bucket is
/// shuffled under its own sub-seed, then the concatenation is shuffled once
/// more so continents interleave. A quota larger than a bucket just takes the
/// whole bucket.
pub fn build_balanced_pool(seed: u32, quota: usize) -> Vec<&'static str> {
    let mut buckets: FxHashMap<Continent, Vec<&'static str>> = FxHashMap::default();
    for &(code, continent) in UN193 {
        if continent != Continent::Unknown {
            buckets.entry(continent).or_default().push(code);
        }
    }

    let mut pool = Vec::with_capacity(quota * Continent::ALL.len());
    for (ordinal, &continent) in Continent::ALL.iter().enumerate() {
        let mut bucket = buckets.remove(&continent).unwrap_or_default();
        Mulberry32::new(sub_seed_indexed(seed, Purpose::PoolBucket, ordinal as u32))
            .shuffle(&mut bucket);
        bucket.truncate(quota);
        pool.extend(bucket);
    }

    Mulberry32::new(sub_seed(seed, Purpose::PoolMix)).shuffle(&mut pool);
    pool
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::countries::continent_of;
    use rustc_hash::FxHashSet;

    #[test]
    fn test_pool_has_quota_per_continent() {
        let pool = build_balanced_pool(98597, DEFAULT_QUOTA);
        assert_eq!(pool.len(), DEFAULT_QUOTA * 5);

        let mut per_continent: FxHashMap<Continent, usize> = FxHashMap::default();
        for code in &pool {
            *per_continent.entry(continent_of(code)).or_default() += 1;
        }
        for continent in Continent::ALL {
            assert_eq!(per_continent.get(&continent), Some(&DEFAULT_QUOTA));
        }
    }

    #[test]
    fn test_pool_codes_are_unique() {
        let pool = build_balanced_pool(12345, DEFAULT_QUOTA);
        let unique: FxHashSet<&str> = pool.iter().copied().collect();
        assert_eq!(unique.len(), pool.len());
    }

    #[test]
    fn test_pool_is_deterministic_and_seed_sensitive() {
        assert_eq!(build_balanced_pool(7, 10), build_balanced_pool(7, 10));
        assert_ne!(build_balanced_pool(7, 10), build_balanced_pool(8, 10));
    }

    #[test]
    fn test_oversized_quota_takes_whole_buckets() {
        // Oceania has only 14 members
        let pool = build_balanced_pool(3, 60);
        let oceania = pool
            .iter()
            .filter(|c| continent_of(c) == Continent::Oceania)
            .count();
        assert_eq!(oceania, 14);
        assert_eq!(pool.len(), 54 + 35 + 47 + 43 + 14);
    }
}
