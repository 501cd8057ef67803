use ethereum_types::U256;
use serde::{Deserialize, Serialize};

use crate::{
    Error, Result, CACHE_BYTES_GROWTH, CACHE_BYTES_INIT, CACHE_ROUNDS, DATASET_BYTES_GROWTH,
    DATASET_BYTES_INIT, EPOCH_LENGTH,
};

/// Largest mainnet epoch whose dataset item count still fits a `u32` index.
pub const MAX_EPOCH: u64 = 32_640;

/// Protocol parameters for cache and dataset generation.
///
/// `Params::default()` is Ethereum mainnet. Missing fields in a serialized
/// document fall back to the mainnet values. A deserialized value is checked
/// by [`Params::validate`] when it is handed to [`crate::Sizes::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Params {
    pub epoch_length: u64,
    pub dataset_bytes_init: u64,
    pub dataset_bytes_growth: u64,
    pub cache_bytes_init: u64,
    pub cache_bytes_growth: u64,
    /// RandMemoHash passes applied after the initial hash chain.
    pub cache_rounds: usize,
    pub max_epoch: u64,
}

impl Default for Params {
    fn default() -> Self {
        Self::mainnet()
    }
}

impl Params {
    pub const fn mainnet() -> Self {
        Self {
            epoch_length: EPOCH_LENGTH,
            dataset_bytes_init: DATASET_BYTES_INIT,
            dataset_bytes_growth: DATASET_BYTES_GROWTH,
            cache_bytes_init: CACHE_BYTES_INIT,
            cache_bytes_growth: CACHE_BYTES_GROWTH,
            cache_rounds: CACHE_ROUNDS,
            max_epoch: MAX_EPOCH,
        }
    }

    /// Rejects parameter sets no epoch or size can be derived from.
    pub fn validate(&self) -> Result<()> {
        if self.epoch_length == 0 {
            return Err(Error::InvalidParams("epoch_length must be non-zero"));
        }
        if self.dataset_bytes_init == 0 {
            return Err(Error::InvalidParams("dataset_bytes_init must be non-zero"));
        }
        if self.cache_bytes_init == 0 {
            return Err(Error::InvalidParams("cache_bytes_init must be non-zero"));
        }
        Ok(())
    }

    pub fn epoch(&self, block_number: u64) -> Result<u64> {
        block_number
            .checked_div(self.epoch_length)
            .ok_or(Error::InvalidParams("epoch_length must be non-zero"))
    }

    /// Epoch of a block number given as a 256-bit integer.
    pub fn epoch_of(&self, number: U256) -> Result<u64> {
        if number.bits() > 64 {
            return Err(Error::BlockNumberOverflow(number));
        }
        self.epoch(number.low_u64())
    }

    /// Validates an epoch received from a signed boundary.
    pub fn checked_epoch(&self, epoch: i64) -> Result<u64> {
        let epoch = u64::try_from(epoch).map_err(|_| Error::NegativeEpoch(epoch))?;
        self.check_epoch(epoch)
    }

    pub fn check_epoch(&self, epoch: u64) -> Result<u64> {
        if epoch > self.max_epoch {
            return Err(Error::EpochTooLarge {
                epoch,
                max: self.max_epoch,
            });
        }
        Ok(epoch)
    }
}
