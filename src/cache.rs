//! Light cache construction: a sequential Keccak-512 chain followed by
//! RandMemoHash passes.

use byteorder::{ByteOrder, LittleEndian};
use ethereum_types::H256;

use crate::{keccak_512, Error, Result, CACHE_ROUNDS, HASH_BYTES};

/// Row count of a cache buffer; fails for empty or misaligned buffers.
pub fn cache_rows(cache: &[u8]) -> Result<usize> {
    rows_for_size(cache.len())
}

fn rows_for_size(cache_size: usize) -> Result<usize> {
    if cache_size % HASH_BYTES != 0 {
        return Err(Error::MisalignedCache(cache_size));
    }
    match cache_size / HASH_BYTES {
        0 => Err(Error::EmptyCache),
        n => Ok(n),
    }
}

/// Fills `cache` with the hash chain `row[0] = keccak512(seed)`,
/// `row[i] = keccak512(row[i - 1])`.
pub fn fill_initial_cache(cache: &mut [u8], seed: &H256) -> Result<()> {
    let n = cache_rows(cache)?;
    cache[..HASH_BYTES].copy_from_slice(&keccak_512(seed.as_bytes()));
    for i in 1..n {
        let (last, next) = cache.split_at_mut(i * HASH_BYTES);
        let row = keccak_512(&last[(i - 1) * HASH_BYTES..]);
        next[..HASH_BYTES].copy_from_slice(&row);
    }
    Ok(())
}

/// Allocates and fills the unscrambled cache of `cache_size` bytes.
pub fn initial_cache(seed: &H256, cache_size: usize) -> Result<Vec<u8>> {
    rows_for_size(cache_size)?;
    let mut cache = vec![0u8; cache_size];
    fill_initial_cache(&mut cache, seed)?;
    Ok(cache)
}

/// One RandMemoHash pass over `cache`, in place.
///
/// Rows are rewritten in increasing order: row `i - 1` is already this pass's
/// output, while row 0 reads the last row of the previous pass.
pub fn scramble_cache(cache: &mut [u8]) -> Result<()> {
    let n = cache_rows(cache)?;
    let mut r = [0u8; HASH_BYTES];
    for i in 0..n {
        let v = LittleEndian::read_u32(&cache[i * HASH_BYTES..]) as usize % n;
        let prev = (i + n - 1) % n;
        for j in 0..HASH_BYTES {
            r[j] = cache[prev * HASH_BYTES + j] ^ cache[v * HASH_BYTES + j];
        }
        cache[i * HASH_BYTES..(i + 1) * HASH_BYTES]
            .copy_from_slice(&keccak_512(&r));
    }
    Ok(())
}

/// Applies `rounds` scrambling passes. Zero rounds return `cache` unchanged.
pub fn calculate_cache(mut cache: Vec<u8>, rounds: usize) -> Result<Vec<u8>> {
    cache_rows(&cache)?;
    for _ in 0..rounds {
        scramble_cache(&mut cache)?;
    }
    Ok(cache)
}

/// Make an Ethash cache using the given seed.
pub fn make_cache(cache: &mut [u8], seed: &H256) -> Result<()> {
    make_cache_with_rounds(cache, seed, CACHE_ROUNDS)
}

pub(crate) fn make_cache_with_rounds(cache: &mut [u8], seed: &H256, rounds: usize) -> Result<()> {
    fill_initial_cache(cache, seed)?;
    for _ in 0..rounds {
        scramble_cache(cache)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn degenerate_buffers_are_rejected() {
        assert_eq!(cache_rows(&[]), Err(Error::EmptyCache));
        assert_eq!(cache_rows(&[0u8; 65]), Err(Error::MisalignedCache(65)));
        assert_eq!(cache_rows(&[0u8; 128]), Ok(2));
        assert_eq!(initial_cache(&H256::zero(), 0), Err(Error::EmptyCache));
        assert_eq!(
            initial_cache(&H256::zero(), 100),
            Err(Error::MisalignedCache(100))
        );
        assert_eq!(scramble_cache(&mut []), Err(Error::EmptyCache));
    }

    #[test]
    fn single_row_scrambles_against_itself() {
        let mut cache = initial_cache(&H256::zero(), HASH_BYTES).unwrap();
        scramble_cache(&mut cache).unwrap();
        // row 0 is both the predecessor and the selected row, so it XORs to zero.
        assert_eq!(cache, keccak_512(&[0u8; HASH_BYTES]).to_vec());
    }
}
