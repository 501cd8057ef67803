//! Dataset items derived from the light cache.

use core::ops::Range;

use byteorder::{ByteOrder, LittleEndian};
use ethereum_types::H512;

use crate::cache::cache_rows;
use crate::fnv::{fnv, fnv_mix_hash};
use crate::{keccak_512, Error, Result, DATASET_PARENTS, HASH_BYTES, WORD_BYTES};

const HASH_WORDS: usize = HASH_BYTES / WORD_BYTES;

/// Calculates dataset item `index` from `cache`.
pub fn calc_dataset_item(cache: &[u8], index: u32) -> Result<H512> {
    let rows = parent_rows(cache)?;
    Ok(H512(dataset_item(cache, rows, index)))
}

/// Items `range` of the dataset, in order.
pub fn dataset_items(cache: &[u8], range: Range<u32>) -> Result<Vec<H512>> {
    let rows = parent_rows(cache)?;
    Ok(range.map(|index| H512(dataset_item(cache, rows, index))).collect())
}

/// Make an Ethash dataset using the given cache.
///
/// `dataset.len() / 64` items are written. Items are independent of each
/// other, so with the `parallel` feature they are computed on the rayon pool;
/// the output is the same either way.
pub fn make_dataset(dataset: &mut [u8], cache: &[u8]) -> Result<()> {
    let rows = parent_rows(cache)?;
    let items = dataset_item_count(dataset.len() as u64)?;
    log::debug!("generating {} dataset items from {} cache rows", items, rows);

    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        dataset
            .par_chunks_exact_mut(HASH_BYTES)
            .enumerate()
            .for_each(|(i, out)| {
                out.copy_from_slice(&dataset_item(cache, rows, i as u32))
            });
    }
    #[cfg(not(feature = "parallel"))]
    for (i, out) in dataset.chunks_exact_mut(HASH_BYTES).enumerate() {
        out.copy_from_slice(&dataset_item(cache, rows, i as u32));
    }
    Ok(())
}

/// Allocates and generates a full dataset of `dataset_size` bytes.
pub fn full_dataset(cache: &[u8], dataset_size: u64) -> Result<Vec<u8>> {
    parent_rows(cache)?;
    dataset_item_count(dataset_size)?;
    let mut dataset = vec![0u8; crate::size::to_usize(dataset_size)?];
    make_dataset(&mut dataset, cache)?;
    Ok(dataset)
}

/// Number of 64-byte items in a dataset of `dataset_size` bytes.
pub fn dataset_item_count(dataset_size: u64) -> Result<u64> {
    if dataset_size % HASH_BYTES as u64 != 0 {
        return Err(Error::MisalignedDataset(dataset_size));
    }
    let items = dataset_size / HASH_BYTES as u64;
    if items > u64::from(u32::MAX) + 1 {
        return Err(Error::DatasetTooLarge(dataset_size));
    }
    Ok(items)
}

/// Row count of `cache` as the 32-bit modulus used to select parents.
pub(crate) fn parent_rows(cache: &[u8]) -> Result<u32> {
    let rows = cache_rows(cache)?;
    u32::try_from(rows).map_err(|_| Error::SizeOverflow(cache.len() as u64))
}

/// `n` must be the row count of `cache`, as returned by [`parent_rows`].
pub(crate) fn dataset_item(cache: &[u8], n: u32, index: u32) -> [u8; HASH_BYTES] {
    let offset = (index % n) as usize * HASH_BYTES;

    let mut seed = [0u8; HASH_BYTES];
    seed.copy_from_slice(&cache[offset..offset + HASH_BYTES]);
    let head = LittleEndian::read_u32(&seed) ^ index;
    LittleEndian::write_u32(&mut seed, head);

    let mut mix = [0u32; HASH_WORDS];
    LittleEndian::read_u32_into(&keccak_512(&seed), &mut mix);

    let mut parent = [0u32; HASH_WORDS];
    for j in 0..DATASET_PARENTS {
        let cache_index = fnv(index ^ j, mix[j as usize % HASH_WORDS]) % n;
        let from = cache_index as usize * HASH_BYTES;
        LittleEndian::read_u32_into(&cache[from..from + HASH_BYTES], &mut parent);
        fnv_mix_hash(&mut mix, &parent);
    }

    let mut out = [0u8; HASH_BYTES];
    LittleEndian::write_u32_into(&mix, &mut out);
    keccak_512(&out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_count_validation() {
        assert_eq!(dataset_item_count(128), Ok(2));
        assert_eq!(dataset_item_count(0), Ok(0));
        assert_eq!(dataset_item_count(100), Err(Error::MisalignedDataset(100)));
        assert_eq!(dataset_item_count(1 << 38), Ok(1 << 32));
        assert_eq!(
            dataset_item_count((1 << 38) + 64),
            Err(Error::DatasetTooLarge((1 << 38) + 64))
        );
    }

    #[test]
    fn empty_cache_is_an_error() {
        assert_eq!(calc_dataset_item(&[], 0), Err(Error::EmptyCache));
        assert_eq!(
            calc_dataset_item(&[0u8; 96], 0),
            Err(Error::MisalignedCache(96))
        );
        let mut dataset = [0u8; 128];
        assert_eq!(make_dataset(&mut dataset, &[]), Err(Error::EmptyCache));
    }
}
