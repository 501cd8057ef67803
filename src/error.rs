use ethereum_types::U256;

/// Errors raised while deriving sizes, caches and dataset items.
///
/// All of them are caller or configuration mistakes; none is transient.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("epoch {0} is negative")]
    NegativeEpoch(i64),
    #[error("epoch {epoch} is above the supported maximum {max}")]
    EpochTooLarge { epoch: u64, max: u64 },
    #[error("no size with a prime {unit}-byte row count exists for epoch {epoch}")]
    NoPrimeSize { epoch: u64, unit: u64 },
    #[error("invalid parameters: {0}")]
    InvalidParams(&'static str),
    #[error("block number {0} does not fit in 64 bits")]
    BlockNumberOverflow(U256),
    #[error("cache has no rows")]
    EmptyCache,
    #[error("cache length {0} is not a multiple of 64 bytes")]
    MisalignedCache(usize),
    #[error("cache for epoch {epoch} has {actual} rows, expected {expected}")]
    CacheSizeMismatch {
        epoch: u64,
        expected: usize,
        actual: usize,
    },
    #[error("dataset length {0} is not a multiple of 64 bytes")]
    MisalignedDataset(u64),
    #[error("dataset length {0} exceeds the 32-bit item index space")]
    DatasetTooLarge(u64),
    #[error("dataset has {actual} bytes, expected at least {expected}")]
    DatasetTooShort { expected: u64, actual: usize },
    #[error("dataset item {index} is out of range ({items} items)")]
    ItemOutOfRange { index: u64, items: u64 },
    #[error("size {0} does not fit in memory on this target")]
    SizeOverflow(u64),
}

pub type Result<T, E = Error> = core::result::Result<T, E>;
