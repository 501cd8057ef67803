use ethash::{keccak_256, Error, LightDAG, Params, SizeTable, Sizes, H256, H512, H64, U256};
use hex_literal::hex;

fn tiny_sizes() -> Sizes<'static> {
    let table = SizeTable::new(vec![128 * 131u64], vec![64 * 17u64]);
    Sizes::new(Params::mainnet(), table).unwrap()
}

#[test]
fn tiny_epoch_vectors() {
    let dag = LightDAG::from_epoch(0, &tiny_sizes()).unwrap();
    assert_eq!(dag.seed(), H256::zero());
    assert_eq!(
        keccak_256(dag.cache()),
        hex!("3f42245284e76e9f9598db130e0ebe08387c15ce81dc578acde14e1889e675a8")
    );
    assert_eq!(
        dag.dataset_item(261).unwrap(),
        H512(hex!("df71a10ff8c958db9e76d14b093744c969d20b90438d310f3826d29852dc9a928f88550db57a7f7f5608be07693c3640fd5f732b5b36b2448367be5824fde0f9"))
    );

    let header = H256(keccak_256(b"header"));
    let nonce = H64(hex!("0123456789abcdef"));
    let (mix, result) = dag.hashimoto(header, nonce).unwrap();
    assert_eq!(
        mix,
        H256(hex!("810682790ccf13084a7a2b1bfcd4c8bd2a72e4b3bc3be32804e8709ee81aa2c6"))
    );
    assert_eq!(
        result,
        H256(hex!("b7c588850d730a5e1863d6d5c9634e3a04a4ca0e6830b7286951543ddb1e5a1b"))
    );

    let dataset = dag.dataset().unwrap();
    assert_eq!(dataset.len() as u64, dag.full_size());
    assert_eq!(
        ethash::hashimoto_full(header, nonce, dag.full_size(), &dataset).unwrap(),
        (mix, result)
    );
}

#[test]
fn block_number_selects_epoch() {
    let table = SizeTable::new(vec![128 * 131u64, 128 * 137], vec![64 * 17u64, 64 * 19]);
    let sizes = Sizes::new(Params::mainnet(), table).unwrap();
    let dag = LightDAG::with_sizes(U256::from(30_001u64), &sizes).unwrap();
    assert_eq!(dag.epoch(), 1);
    assert_eq!(dag.cache_size(), 64 * 19);
    assert_eq!(dag.full_size(), 128 * 137);
    assert_eq!(dag.seed(), ethash::seed_hash(1));
    assert!(dag.is_valid_for(U256::from(59_999u64)));
    assert!(!dag.is_valid_for(U256::from(29_999u64)));

    assert_eq!(
        LightDAG::with_sizes(U256::max_value(), &sizes).unwrap_err(),
        Error::BlockNumberOverflow(U256::max_value())
    );
}

#[test]
fn adopted_cache_hashes_like_a_fresh_one() {
    let sizes = tiny_sizes();
    let fresh = LightDAG::from_epoch(0, &sizes).unwrap();
    let cache = fresh.cache().to_vec();
    let adopted = LightDAG::from_cache(cache, U256::from(12u64), &sizes).unwrap();
    let header = H256::repeat_byte(0xab);
    let nonce = H64::repeat_byte(0x01);
    assert_eq!(
        adopted.hashimoto(header, nonce).unwrap(),
        fresh.hashimoto(header, nonce).unwrap()
    );
}

// Mainnet block 1: seal hash of the header without mix digest and nonce.
#[test]
fn mainnet_block_one() {
    let header_hash =
        H256(hex!("85913a3057ea8bec78cd916871ca73802e77724e014dda65add3405d02240eb7"));
    let nonce = H64(hex!("539bd4979fef1ec4"));
    let difficulty = U256::from(17_171_480_576u64);

    let dag = LightDAG::new(U256::one()).unwrap();
    assert_eq!(dag.epoch(), 0);
    assert_eq!(dag.cache_size(), 16_776_896);
    assert_eq!(dag.full_size(), 1_073_739_904);

    let (mix_hash, result) = dag.hashimoto(header_hash, nonce).unwrap();
    assert_eq!(
        mix_hash,
        H256(hex!("969b900de27b6ac6a67742365dd65f55a0526c41fd18e1b16f1a1215c2e66f59"))
    );
    assert_eq!(
        result,
        H256(hex!("000000002bc095dd4de049873e6302c3f14a7f2e5b5a1f60cdf1f1798164d610"))
    );
    let boundary = U256::max_value() / difficulty;
    assert!(U256::from_big_endian(result.as_bytes()) <= boundary);

    assert_eq!(
        keccak_256(dag.cache()),
        hex!("35ded12eecf2ce2e8da2e15c06d463aae9b84cb2530a00b932e4bbc484cde353")
    );
    assert_eq!(
        dag.dataset_item(0).unwrap(),
        H512(hex!("22db2229cc516c46d2210086f1ab417e0bd1c3827c5ecc6af7d3a33f8dae332bab5aa31fc58e71cff27666e81bf418775e74839743ca9d410fdf514d009bcec2"))
    );
    assert_eq!(
        dag.dataset_item(1).unwrap(),
        H512(hex!("e5263184c4985ca0570d1ebdf507049e427dc86c7e96485739c0960a2ce4e6eb386d5aa39471876225c23c5b69443f6d5db8120fe3204cedcfefd0347f69ec1d"))
    );
}

#[test]
fn resized_cache_cannot_be_adopted() {
    let sizes = tiny_sizes();
    let dag = LightDAG::from_epoch(0, &sizes).unwrap();
    let item = dag.dataset_item(5).unwrap();

    let mut cache = dag.into_cache();
    cache.truncate(64 * 16);
    assert_eq!(
        LightDAG::from_cache(cache.clone(), U256::zero(), &sizes).unwrap_err(),
        Error::CacheSizeMismatch {
            epoch: 0,
            expected: 17,
            actual: 16
        }
    );

    // the row count is part of every item, so a 16-row cache derives different items
    assert_ne!(ethash::calc_dataset_item(&cache, 5).unwrap(), item);
}
