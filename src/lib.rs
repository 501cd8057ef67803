//! Apache-2 licensed Ethash cache and dataset generation.
//!
//! The pieces, in the order a node uses them:
//!
//! - [`Sizes`] turns an epoch into prime-constrained cache and dataset sizes,
//!   looking them up in a [`SizeTable`] before searching.
//! - [`seed_hash`] chains Keccak-256 over the epochs.
//! - [`make_cache`] builds the light cache (hash chain plus RandMemoHash).
//! - [`calc_dataset_item`] and [`make_dataset`] derive dataset items from it.
//! - [`LightDAG`] bundles the above per epoch, and [`hashimoto_light`] /
//!   [`hashimoto_full`] evaluate a header hash and nonce against it.
//!
//! ```no_run
//! use ethash::{LightDAG, H256, H64};
//!
//! let dag = LightDAG::new(1u64.into())?;
//! let (mix_digest, result) = dag.hashimoto(H256::zero(), H64::zero())?;
//! # Ok::<(), ethash::Error>(())
//! ```

// The reference algorithm used is from https://github.com/ethereum/wiki/wiki/Ethash

use byteorder::{ByteOrder, LittleEndian};
use sha3::{Digest, Keccak256, Keccak512};

pub use ethereum_types::{H256, H512, H64, U256};

mod cache;
mod dag;
mod dataset;
mod error;
mod fnv;
mod params;
mod seed;
mod size;

pub use cache::{
    cache_rows, calculate_cache, fill_initial_cache, initial_cache, make_cache, scramble_cache,
};
pub use dag::LightDAG;
pub use dataset::{calc_dataset_item, dataset_item_count, dataset_items, full_dataset, make_dataset};
pub use error::{Error, Result};
pub use fnv::{fnv, fnv_mix, fnv_mix_hash, FNV_PRIME};
pub use params::{Params, MAX_EPOCH};
pub use seed::{epoch_from_seed_hash, resume_seed_hash, seed_hash, SeedHashCompute};
pub use size::{
    cache_size, calc_cache_size, calc_dataset_size, dataset_size, is_prime, SizeTable, Sizes,
    MAINNET_EPOCHS,
};

pub const DATASET_BYTES_INIT: u64 = 1 << 30;
pub const DATASET_BYTES_GROWTH: u64 = 1 << 23;
pub const CACHE_BYTES_INIT: u64 = 1 << 24;
pub const CACHE_BYTES_GROWTH: u64 = 1 << 17;
pub const MIX_BYTES: usize = 128;
pub const WORD_BYTES: usize = 4;
pub const HASH_BYTES: usize = 64;
pub const DATASET_PARENTS: u32 = 256;
pub const CACHE_ROUNDS: usize = 3;
pub const ACCESSES: usize = 64;

pub const EPOCH_LENGTH: u64 = 30_000;

const MIX_WORDS: usize = MIX_BYTES / WORD_BYTES;
const MIX_HASHES: usize = MIX_BYTES / HASH_BYTES;
const HASH_WORDS: usize = HASH_BYTES / WORD_BYTES;

pub fn keccak_512(data: &[u8]) -> [u8; 64] {
    let mut output = [0u8; 64];
    output.copy_from_slice(&Keccak512::digest(data));
    output
}

pub fn keccak_256(data: &[u8]) -> [u8; 32] {
    let mut output = [0u8; 32];
    output.copy_from_slice(&Keccak256::digest(data));
    output
}

/// "Main" function of Ethash, calculating the mix digest and result given the
/// header hash and nonce. `lookup` returns dataset item `i`.
pub fn hashimoto<F>(
    header_hash: H256,
    nonce: H64,
    full_size: u64,
    mut lookup: F,
) -> Result<(H256, H256)>
where
    F: FnMut(u32) -> [u8; HASH_BYTES],
{
    dataset_item_count(full_size)?;
    let rows = (full_size / MIX_BYTES as u64) as u32;
    if rows == 0 {
        return Err(Error::MisalignedDataset(full_size));
    }

    let mut seed = [0u8; 40]; // 32 + 8
    seed[..32].copy_from_slice(header_hash.as_bytes());
    seed[32..].copy_from_slice(nonce.as_bytes());
    seed[32..].reverse();
    let seed = keccak_512(&seed);
    let seed_head = LittleEndian::read_u32(&seed);

    let mut mix = [0u32; MIX_WORDS];
    for (i, w) in mix.iter_mut().enumerate() {
        *w = LittleEndian::read_u32(&seed[(i % HASH_WORDS * 4)..]);
    }
    let mut temp = [0u32; MIX_WORDS];
    for i in 0..ACCESSES as u32 {
        let parent = fnv(i ^ seed_head, mix[i as usize % MIX_WORDS]) % rows;
        for k in 0..MIX_HASHES {
            let item = lookup(2 * parent + k as u32);
            let from = k * HASH_WORDS;
            LittleEndian::read_u32_into(&item, &mut temp[from..from + HASH_WORDS]);
        }
        fnv_mix_hash(&mut mix, &temp);
    }

    let mut cmix = [0u8; 32];
    for (i, w) in mix.chunks_exact(4).enumerate() {
        let compressed = fnv(fnv(fnv(w[0], w[1]), w[2]), w[3]);
        LittleEndian::write_u32(&mut cmix[i * 4..], compressed);
    }

    let mut input = [0u8; HASH_BYTES + 32];
    input[..HASH_BYTES].copy_from_slice(&seed);
    input[HASH_BYTES..].copy_from_slice(&cmix);
    Ok((H256(cmix), H256(keccak_256(&input))))
}

/// Ethash used by a light client. Only stores the cache rather than the full
/// dataset.
pub fn hashimoto_light(
    header_hash: H256,
    nonce: H64,
    full_size: u64,
    cache: &[u8],
) -> Result<(H256, H256)> {
    let rows = dataset::parent_rows(cache)?;
    hashimoto(header_hash, nonce, full_size, |i| {
        dataset::dataset_item(cache, rows, i)
    })
}

/// Ethash used by a full client. Stores the whole dataset in memory.
pub fn hashimoto_full(
    header_hash: H256,
    nonce: H64,
    full_size: u64,
    dataset: &[u8],
) -> Result<(H256, H256)> {
    if (dataset.len() as u64) < full_size {
        return Err(Error::DatasetTooShort {
            expected: full_size,
            actual: dataset.len(),
        });
    }
    hashimoto(header_hash, nonce, full_size, |i| {
        let from = i as usize * HASH_BYTES;
        let mut item = [0u8; HASH_BYTES];
        item.copy_from_slice(&dataset[from..from + HASH_BYTES]);
        item
    })
}
