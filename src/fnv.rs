//! The FNV-1 style mix used by cache scrambling, dataset items and Hashimoto.
//!
//! Not a cryptographic hash; all arithmetic wraps at 32 bits.

pub const FNV_PRIME: u32 = 0x0100_0193;

#[inline]
pub fn fnv(v1: u32, v2: u32) -> u32 {
    v1.wrapping_mul(FNV_PRIME) ^ v2
}

/// Element-wise [`fnv`] of two equal-length word sequences.
pub fn fnv_mix(a: &[u32], b: &[u32]) -> Vec<u32> {
    debug_assert_eq!(a.len(), b.len());
    a.iter().zip(b).map(|(x, y)| fnv(*x, *y)).collect()
}

/// In-place form of [`fnv_mix`].
#[inline]
pub fn fnv_mix_hash<const N: usize>(mix: &mut [u32; N], data: &[u32; N]) {
    for (m, d) in mix.iter_mut().zip(data) {
        *m = fnv(*m, *d);
    }
}
