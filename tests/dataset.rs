use ethash::{keccak_256, Error, H256, H512, H64};
use hex_literal::hex;

fn synthetic_cache() -> Vec<u8> {
    let seed = H256(keccak_256(b"ethash-test-seed"));
    let mut cache = vec![0u8; 64 * 16];
    ethash::make_cache(&mut cache, &seed).unwrap();
    cache
}

#[test]
fn reference_items() {
    let cache = synthetic_cache();
    let cases = [
        (0, hex!("cd0d905366d843e9bc55f23a32ac7ccf83163e48e41edd9f910be31afb8710b63165e3977a2edf9ef17c1d17cf7dd56bd8b1f6b455081ea8757e3e5aff081c46")),
        (1, hex!("089850aef7a85ec5f3bceb9b2b7ca07512d9c54a3b49bf2b9e88ac944c68b3562682d8d0bb2bd6ef97a69dbbdb5cd8fb987c458fe0f1c49c6446d8e7d8e8aae1")),
        (15, hex!("6cbb0cd34d36dec1b3a3f32c4a4a2375b9fa8a2c4ee08d8991c8773b90b307d56fe010650f0198e00bbc1020966f63241cf1e2ff5f39c380f80d9584e042a24a")),
        (16, hex!("b7dcdf57b3d2d21b4d7733693ef1ae98ee7a60fd6d8e36363c2cb54a5d07a8ff0d4bab9af753f56544f58f11062f33c6e5af2b81706d8deef79c97495dbaa0ad")),
        (999, hex!("c68fab56d4da4a95e01c3800a03dd035d7716df9a28a590c45393ab76cfea68b0dbd2fcd22bf84da7d42cecac23d816404b9e1848fc95e32a1de1daf6a84089e")),
    ];
    for (index, expected) in cases {
        assert_eq!(
            ethash::calc_dataset_item(&cache, index).unwrap(),
            H512(expected),
            "item {}",
            index
        );
    }
}

#[test]
fn items_are_pure() {
    let cache = synthetic_cache();
    let first = ethash::calc_dataset_item(&cache, 42).unwrap();
    // interleave other indices; nothing carries over between calls
    for index in [7, 4242, 0, 41, 43] {
        ethash::calc_dataset_item(&cache, index).unwrap();
    }
    assert_eq!(ethash::calc_dataset_item(&cache, 42).unwrap(), first);
    assert_ne!(ethash::calc_dataset_item(&cache, 43).unwrap(), first);
}

#[test]
fn parallel_and_sequential_generation_agree() {
    let cache = synthetic_cache();
    let sequential: Vec<H512> = (0..1000u32)
        .map(|i| ethash::calc_dataset_item(&cache, i).unwrap())
        .collect();

    assert_eq!(ethash::dataset_items(&cache, 0..1000).unwrap(), sequential);

    let mut dataset = vec![0u8; 1000 * 64];
    ethash::make_dataset(&mut dataset, &cache).unwrap();
    for (item, expected) in dataset.chunks_exact(64).zip(&sequential) {
        assert_eq!(item, expected.as_bytes());
    }

    // scrambled order over scoped threads
    let mut shuffled: Vec<u32> = (0..1000).collect();
    shuffled.reverse();
    shuffled.rotate_left(377);
    let chunks: Vec<Vec<(u32, H512)>> = std::thread::scope(|s| {
        shuffled
            .chunks(128)
            .map(|part| {
                let cache = &cache;
                s.spawn(move || {
                    part.iter()
                        .map(|i| (*i, ethash::calc_dataset_item(cache, *i).unwrap()))
                        .collect::<Vec<_>>()
                })
            })
            .collect::<Vec<_>>()
            .into_iter()
            .map(|h| h.join().unwrap())
            .collect()
    });
    for (index, item) in chunks.into_iter().flatten() {
        assert_eq!(item, sequential[index as usize]);
    }
}

#[test]
fn full_dataset_covers_every_item() {
    let cache = synthetic_cache();
    let dataset = ethash::full_dataset(&cache, 128 * 131).unwrap();
    assert_eq!(dataset.len(), 128 * 131);
    assert_eq!(
        dataset[261 * 64..],
        *ethash::calc_dataset_item(&cache, 261).unwrap().as_bytes()
    );
    assert_eq!(
        ethash::full_dataset(&cache, 100),
        Err(Error::MisalignedDataset(100))
    );
}

#[test]
fn zero_row_cache_is_rejected() {
    assert_eq!(ethash::calc_dataset_item(&[], 0), Err(Error::EmptyCache));
    assert_eq!(ethash::dataset_items(&[], 0..4), Err(Error::EmptyCache));
    assert_eq!(ethash::full_dataset(&[], 128), Err(Error::EmptyCache));
}

#[test]
fn light_and_full_hashimoto_agree() {
    let cache = synthetic_cache();
    let full_size = 128 * 131;
    let header = H256(keccak_256(b"header"));
    let nonce = H64(hex!("0123456789abcdef"));

    let (mix, result) = ethash::hashimoto_light(header, nonce, full_size, &cache).unwrap();
    assert_eq!(
        mix,
        H256(hex!("c3bc55b208fc41fbd80a7e235aa7bb859944576ede05c7cf45cd931ffa6b30ae"))
    );
    assert_eq!(
        result,
        H256(hex!("b9a7d2c4ef0ca9a43237464a92d0e86b34cab59202d7b9459e404724a81b9d05"))
    );

    let dataset = ethash::full_dataset(&cache, full_size).unwrap();
    assert_eq!(
        ethash::hashimoto_full(header, nonce, full_size, &dataset).unwrap(),
        (mix, result)
    );
}
