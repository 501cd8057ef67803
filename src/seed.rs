use ethereum_types::H256;
use parking_lot::Mutex;

use crate::keccak_256;

/// Seed hash for `epoch`: Keccak-256 applied `epoch` times to 32 zero bytes.
pub fn seed_hash(epoch: u64) -> H256 {
    resume_seed_hash(H256::zero(), 0, epoch)
}

/// Continues the seed chain from `seed`, which must be the seed of
/// `from_epoch`, up to `to_epoch`.
pub fn resume_seed_hash(seed: H256, from_epoch: u64, to_epoch: u64) -> H256 {
    let mut s = seed.to_fixed_bytes();
    for _ in from_epoch..to_epoch {
        s = keccak_256(&s);
    }
    H256(s)
}

/// Epoch in `0..=limit` whose seed is `seed`, if any.
pub fn epoch_from_seed_hash(seed: &H256, limit: u64) -> Option<u64> {
    let mut s = [0u8; 32];
    for epoch in 0..=limit {
        if s == seed.0 {
            return Some(epoch);
        }
        s = keccak_256(&s);
    }
    None
}

/// Remembers the last computed seed so that walking forward through epochs
/// costs one hash per step.
#[derive(Debug, Default)]
pub struct SeedHashCompute {
    last: Mutex<(u64, H256)>,
}

impl SeedHashCompute {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn hash_epoch(&self, epoch: u64) -> H256 {
        let mut last = self.last.lock();
        if epoch < last.0 {
            log::trace!("seed memo at epoch {} restarts for {}", last.0, epoch);
            *last = (0, H256::zero());
        }
        if epoch > last.0 {
            let seed = resume_seed_hash(last.1, last.0, epoch);
            *last = (epoch, seed);
        }
        last.1
    }
}
