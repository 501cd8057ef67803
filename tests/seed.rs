use ethash::{SeedHashCompute, H256};
use hex_literal::hex;

#[test]
fn first_epochs() {
    assert_eq!(ethash::seed_hash(0), H256::zero());
    assert_eq!(
        ethash::seed_hash(1),
        H256(hex!("290decd9548b62a8d60345a988386fc84ba6bc95484008f6362f93160ef3e563"))
    );
    assert_eq!(
        ethash::seed_hash(2),
        H256(hex!("510e4e770828ddbf7f7b00ab00a9f6adaf81c0dc9cc85f1f8249c256942d61d9"))
    );
    assert_eq!(
        ethash::seed_hash(3),
        H256(hex!("356e5a2cc1eba076e650ac7473fccc37952b46bc2e419a200cec0c451dce2336"))
    );
}

#[test]
fn each_seed_hashes_the_previous_one() {
    let mut prev = ethash::seed_hash(0);
    for epoch in 1..8 {
        let seed = ethash::seed_hash(epoch);
        assert_eq!(seed.0, ethash::keccak_256(prev.as_bytes()));
        assert_eq!(ethash::resume_seed_hash(prev, epoch - 1, epoch), seed);
        prev = seed;
    }
}

#[test]
fn memo_is_shareable_across_threads() {
    let compute = std::sync::Arc::new(SeedHashCompute::new());
    let handles: Vec<_> = (0..4u64)
        .map(|t| {
            let compute = compute.clone();
            std::thread::spawn(move || {
                (0..20u64)
                    .map(|i| (i * 7 + t) % 40)
                    .all(|e| compute.hash_epoch(e) == ethash::seed_hash(e))
            })
        })
        .collect();
    for handle in handles {
        assert!(handle.join().unwrap());
    }
}
