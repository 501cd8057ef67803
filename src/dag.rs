use std::time::Instant;

use ethereum_types::{H256, H512, H64, U256};

use crate::cache::{cache_rows, make_cache_with_rounds};
use crate::dataset::{dataset_item_count, full_dataset, parent_rows};
use crate::size::to_usize;
use crate::{seed_hash, Error, Result, Sizes, HASH_BYTES};

/// Light verification state for one epoch: the cache plus the sizes derived
/// for that epoch. The cache cannot be replaced or resized once built.
pub struct LightDAG {
    epoch: u64,
    cache: Vec<u8>,
    cache_size: u64,
    full_size: u64,
    epoch_length: u64,
}

impl LightDAG {
    /// Builds the cache for the epoch of block `number` with mainnet sizes.
    pub fn new(number: U256) -> Result<Self> {
        Self::with_sizes(number, &Sizes::mainnet())
    }

    pub fn with_sizes(number: U256, sizes: &Sizes) -> Result<Self> {
        let epoch = sizes.params().epoch_of(number)?;
        Self::from_epoch(epoch, sizes)
    }

    pub fn from_epoch(epoch: u64, sizes: &Sizes) -> Result<Self> {
        let cache_size = sizes.cache_size(epoch)?;
        let full_size = sizes.dataset_size(epoch)?;
        let seed = seed_hash(epoch);

        let now = Instant::now();
        let mut cache = vec![0u8; to_usize(cache_size)?];
        make_cache_with_rounds(&mut cache, &seed, sizes.params().cache_rounds)?;
        log::debug!(
            "built cache for epoch {} ({} bytes, dataset {} bytes) in {:?}",
            epoch,
            cache_size,
            full_size,
            now.elapsed()
        );

        Ok(Self {
            epoch,
            cache,
            cache_size,
            full_size,
            epoch_length: sizes.params().epoch_length,
        })
    }

    /// Adopts a previously built cache for the epoch of block `number`.
    pub fn from_cache(cache: Vec<u8>, number: U256, sizes: &Sizes) -> Result<Self> {
        let epoch = sizes.params().epoch_of(number)?;
        let cache_size = sizes.cache_size(epoch)?;
        let full_size = sizes.dataset_size(epoch)?;

        let expected = to_usize(cache_size)? / HASH_BYTES;
        let actual = cache_rows(&cache)?;
        if actual != expected {
            return Err(Error::CacheSizeMismatch {
                epoch,
                expected,
                actual,
            });
        }

        Ok(Self {
            epoch,
            cache,
            cache_size,
            full_size,
            epoch_length: sizes.params().epoch_length,
        })
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn cache(&self) -> &[u8] {
        &self.cache
    }

    /// Cache size in bytes.
    pub fn cache_size(&self) -> u64 {
        self.cache_size
    }

    /// Dataset size in bytes.
    pub fn full_size(&self) -> u64 {
        self.full_size
    }

    /// Seed the cache was built from.
    pub fn seed(&self) -> H256 {
        seed_hash(self.epoch)
    }

    /// Hands the cache back, e.g. to persist it for [`LightDAG::from_cache`].
    pub fn into_cache(self) -> Vec<u8> {
        self.cache
    }

    pub fn dataset_item(&self, index: u32) -> Result<H512> {
        let items = dataset_item_count(self.full_size)?;
        if u64::from(index) >= items {
            return Err(Error::ItemOutOfRange {
                index: index.into(),
                items,
            });
        }
        let rows = parent_rows(&self.cache)?;
        Ok(H512(crate::dataset::dataset_item(&self.cache, rows, index)))
    }

    /// Generates the full dataset for this epoch.
    pub fn dataset(&self) -> Result<Vec<u8>> {
        let now = Instant::now();
        let dataset = full_dataset(&self.cache, self.full_size)?;
        log::debug!("generated dataset for epoch {} in {:?}", self.epoch, now.elapsed());
        Ok(dataset)
    }

    pub fn hashimoto(&self, hash: H256, nonce: H64) -> Result<(H256, H256)> {
        crate::hashimoto_light(hash, nonce, self.full_size, &self.cache)
    }

    pub fn is_valid_for(&self, number: U256) -> bool {
        number.bits() <= 64 && number.low_u64().checked_div(self.epoch_length) == Some(self.epoch)
    }
}

impl core::fmt::Debug for LightDAG {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("LightDAG")
            .field("epoch", &self.epoch)
            .field("cache_size", &self.cache_size)
            .field("full_size", &self.full_size)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Params, SizeTable};

    fn tiny_sizes() -> Sizes<'static> {
        // 17 cache rows (1088 bytes) and 2 * 131 dataset items.
        let table = SizeTable::new(vec![128 * 131u64], vec![64 * 17u64]);
        Sizes::new(Params::mainnet(), table).unwrap()
    }

    #[test]
    fn from_cache_checks_row_count() {
        let sizes = tiny_sizes();
        let dag = LightDAG::from_epoch(0, &sizes).unwrap();
        assert_eq!(dag.cache().len(), 64 * 17);
        assert_eq!(dag.cache_size(), 64 * 17);

        let adopted = LightDAG::from_cache(dag.cache().to_vec(), U256::zero(), &sizes).unwrap();
        assert_eq!(adopted.cache(), dag.cache());

        let mut truncated = dag.into_cache();
        truncated.truncate(64 * 16);
        let err = LightDAG::from_cache(truncated, U256::zero(), &sizes).unwrap_err();
        assert_eq!(
            err,
            Error::CacheSizeMismatch {
                epoch: 0,
                expected: 17,
                actual: 16
            }
        );
    }

    #[test]
    fn item_range_is_enforced() {
        let dag = LightDAG::from_epoch(0, &tiny_sizes()).unwrap();
        assert!(dag.dataset_item(261).is_ok());
        assert_eq!(
            dag.dataset_item(262),
            Err(Error::ItemOutOfRange {
                index: 262,
                items: 262
            })
        );
    }

    #[test]
    fn validity_follows_epoch() {
        let dag = LightDAG::from_epoch(0, &tiny_sizes()).unwrap();
        assert!(dag.is_valid_for(U256::from(29_999u64)));
        assert!(!dag.is_valid_for(U256::from(30_000u64)));
        assert!(!dag.is_valid_for(U256::max_value()));
    }
}
