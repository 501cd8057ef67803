//! Prime-constrained dataset and cache sizes.

use std::borrow::Cow;

use crate::{Error, Params, Result, HASH_BYTES, MIX_BYTES};

mod table;

pub use table::MAINNET_EPOCHS;

/// Epoch-indexed byte sizes consulted before running the prime search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SizeTable<'a> {
    dataset: Cow<'a, [u64]>,
    cache: Cow<'a, [u64]>,
}

impl SizeTable<'static> {
    /// Sizes for mainnet epochs `0..MAINNET_EPOCHS`.
    pub fn mainnet() -> Self {
        Self::new(&table::DATASET_SIZES[..], &table::CACHE_SIZES[..])
    }

    pub fn empty() -> Self {
        Self::new(Vec::new(), Vec::new())
    }

    /// Computes the table for `epochs` up front. Epochs are independent, so
    /// the search runs in parallel when the `parallel` feature is enabled.
    pub fn precompute(params: &Params, epochs: u64) -> Result<Self> {
        params.validate()?;
        if epochs == 0 {
            return Ok(Self::empty());
        }
        params.check_epoch(epochs - 1)?;

        #[cfg(feature = "parallel")]
        let pairs: Result<Vec<(u64, u64)>> = {
            use rayon::prelude::*;
            (0..epochs)
                .into_par_iter()
                .map(|epoch| epoch_sizes(params, epoch))
                .collect()
        };
        #[cfg(not(feature = "parallel"))]
        let pairs: Result<Vec<(u64, u64)>> = (0..epochs)
            .map(|epoch| epoch_sizes(params, epoch))
            .collect();

        let (dataset, cache): (Vec<u64>, Vec<u64>) = pairs?.into_iter().unzip();
        Ok(Self::new(dataset, cache))
    }
}

impl<'a> SizeTable<'a> {
    pub fn new(dataset: impl Into<Cow<'a, [u64]>>, cache: impl Into<Cow<'a, [u64]>>) -> Self {
        Self {
            dataset: dataset.into(),
            cache: cache.into(),
        }
    }

    pub fn dataset(&self, epoch: u64) -> Option<u64> {
        lookup(&self.dataset, epoch)
    }

    pub fn cache(&self, epoch: u64) -> Option<u64> {
        lookup(&self.cache, epoch)
    }
}

fn epoch_sizes(params: &Params, epoch: u64) -> Result<(u64, u64)> {
    Ok((calc_dataset_size(params, epoch)?, calc_cache_size(params, epoch)?))
}

fn lookup(table: &[u64], epoch: u64) -> Option<u64> {
    usize::try_from(epoch).ok().and_then(|i| table.get(i)).copied()
}

/// Size calculator: a table in front of the prime search.
#[derive(Debug, Clone)]
pub struct Sizes<'a> {
    params: Params,
    table: SizeTable<'a>,
}

impl Default for Sizes<'static> {
    fn default() -> Self {
        Self::mainnet()
    }
}

impl Sizes<'static> {
    pub fn mainnet() -> Self {
        Self {
            params: Params::mainnet(),
            table: SizeTable::mainnet(),
        }
    }
}

impl<'a> Sizes<'a> {
    /// Fails with [`Error::InvalidParams`] when `params` cannot derive epochs
    /// or sizes.
    pub fn new(params: Params, table: SizeTable<'a>) -> Result<Self> {
        params.validate()?;
        Ok(Self { params, table })
    }

    pub fn params(&self) -> &Params {
        &self.params
    }

    /// Dataset size in bytes for `epoch`.
    pub fn dataset_size(&self, epoch: u64) -> Result<u64> {
        let epoch = self.params.check_epoch(epoch)?;
        match self.table.dataset(epoch) {
            Some(size) => Ok(size),
            None => {
                log::trace!("dataset size for epoch {} not tabled", epoch);
                calc_dataset_size(&self.params, epoch)
            }
        }
    }

    /// Cache size in bytes for `epoch`.
    pub fn cache_size(&self, epoch: u64) -> Result<u64> {
        let epoch = self.params.check_epoch(epoch)?;
        match self.table.cache(epoch) {
            Some(size) => Ok(size),
            None => {
                log::trace!("cache size for epoch {} not tabled", epoch);
                calc_cache_size(&self.params, epoch)
            }
        }
    }

    /// Number of 64-byte rows in the cache for `epoch`.
    pub fn cache_rows(&self, epoch: u64) -> Result<usize> {
        let size = self.cache_size(epoch)?;
        to_usize(size / HASH_BYTES as u64)
    }
}

/// Mainnet dataset size for `epoch`.
pub fn dataset_size(epoch: u64) -> Result<u64> {
    Sizes::mainnet().dataset_size(epoch)
}

/// Mainnet cache size for `epoch`.
pub fn cache_size(epoch: u64) -> Result<u64> {
    Sizes::mainnet().cache_size(epoch)
}

pub fn calc_dataset_size(params: &Params, epoch: u64) -> Result<u64> {
    calc_size(
        params,
        epoch,
        params.dataset_bytes_init,
        params.dataset_bytes_growth,
        MIX_BYTES as u64,
    )
}

pub fn calc_cache_size(params: &Params, epoch: u64) -> Result<u64> {
    calc_size(
        params,
        epoch,
        params.cache_bytes_init,
        params.cache_bytes_growth,
        HASH_BYTES as u64,
    )
}

/// Largest `sz <= init + growth * epoch - unit` with `sz / unit` prime,
/// stepping down by `2 * unit`.
pub(crate) fn calc_size(
    params: &Params,
    epoch: u64,
    init: u64,
    growth: u64,
    unit: u64,
) -> Result<u64> {
    let epoch = params.check_epoch(epoch)?;
    let exhausted = || Error::NoPrimeSize { epoch, unit };
    let mut sz = growth
        .checked_mul(epoch)
        .and_then(|g| g.checked_add(init))
        .and_then(|s| s.checked_sub(unit))
        .ok_or_else(exhausted)?;
    while !is_prime(sz / unit) {
        sz = sz.checked_sub(2 * unit).ok_or_else(exhausted)?;
    }
    Ok(sz)
}

/// Exact primality; 0 and 1 are not prime.
pub fn is_prime(n: u64) -> bool {
    primal::is_prime(n)
}

pub(crate) fn to_usize(n: u64) -> Result<usize> {
    usize::try_from(n).map_err(|_| Error::SizeOverflow(n))
}
