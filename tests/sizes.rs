use ethash::{Error, Params, SizeTable, Sizes};

#[test]
fn mainnet_sizes() {
    let dataset: Vec<u64> = (0..4).map(|e| ethash::dataset_size(e).unwrap()).collect();
    let cache: Vec<u64> = (0..4).map(|e| ethash::cache_size(e).unwrap()).collect();
    assert_eq!(dataset, [1073739904u64, 1082130304, 1090514816, 1098906752]);
    assert_eq!(cache, [16776896u64, 16907456, 17039296, 17170112]);

    assert_eq!(ethash::dataset_size(2047), Ok(18245220736));
    assert_eq!(ethash::cache_size(2047), Ok(285081536));
}

#[test]
fn sizes_are_prime_multiples_of_their_unit() {
    let sizes = Sizes::new(Params::mainnet(), SizeTable::empty()).unwrap();
    for epoch in (0..3000).step_by(97) {
        let dataset = sizes.dataset_size(epoch).unwrap();
        assert_eq!(dataset % 128, 0);
        assert!(ethash::is_prime(dataset / 128), "epoch {}", epoch);

        let cache = sizes.cache_size(epoch).unwrap();
        assert_eq!(cache % 64, 0);
        assert!(ethash::is_prime(cache / 64), "epoch {}", epoch);
        assert_eq!(sizes.cache_rows(epoch).unwrap() as u64, cache / 64);
    }
}

#[test]
fn sizes_never_shrink() {
    let sizes = Sizes::mainnet();
    let mut last = (0, 0);
    // crosses the end of the mainnet table into computed sizes
    for epoch in 2000..2100 {
        let next = (
            sizes.dataset_size(epoch).unwrap(),
            sizes.cache_size(epoch).unwrap(),
        );
        assert!(next.0 >= last.0 && next.1 >= last.1, "epoch {}", epoch);
        last = next;
    }
}

#[test]
fn injected_table_wins_then_falls_back() {
    let table = SizeTable::new(vec![4096u64, 8192], vec![640u64]);
    let sizes = Sizes::new(Params::mainnet(), table).unwrap();
    assert_eq!(sizes.dataset_size(0), Ok(4096));
    assert_eq!(sizes.dataset_size(1), Ok(8192));
    assert_eq!(sizes.cache_size(0), Ok(640));
    assert_eq!(sizes.cache_size(1), Ok(16907456));
    assert_eq!(sizes.dataset_size(2), Ok(1090514816));
}

#[test]
fn precomputed_table_matches_mainnet() {
    let params = Params::mainnet();
    let table = SizeTable::precompute(&params, 16).unwrap();
    let mainnet = SizeTable::mainnet();
    for epoch in 0..16 {
        assert_eq!(table.dataset(epoch), mainnet.dataset(epoch));
        assert_eq!(table.cache(epoch), mainnet.cache(epoch));
    }
    assert_eq!(table.dataset(16), None);
    assert_eq!(SizeTable::precompute(&params, 0).unwrap(), SizeTable::empty());
}

#[test]
fn invalid_epochs_are_rejected() {
    let params = Params::mainnet();
    assert_eq!(params.checked_epoch(-1), Err(Error::NegativeEpoch(-1)));

    let huge = ethash::MAX_EPOCH + 1;
    let err = Error::EpochTooLarge {
        epoch: huge,
        max: ethash::MAX_EPOCH,
    };
    assert_eq!(ethash::dataset_size(huge), Err(err.clone()));
    assert_eq!(ethash::cache_size(huge), Err(err.clone()));
    assert_eq!(SizeTable::precompute(&params, huge + 1), Err(err));
    assert!(ethash::dataset_size(ethash::MAX_EPOCH).is_ok());
}

#[test]
fn params_deserialize_with_defaults() {
    let params: Params =
        serde_json::from_str(r#"{ "epoch_length": 60000, "max_epoch": 10 }"#).unwrap();
    assert_eq!(params.epoch_length, 60_000);
    assert_eq!(params.max_epoch, 10);
    assert_eq!(params.cache_rounds, 3);
    assert_eq!(params.dataset_bytes_init, 1 << 30);
    assert_eq!(params.epoch(119_999), Ok(1));

    let json = serde_json::to_string(&Params::default()).unwrap();
    assert_eq!(serde_json::from_str::<Params>(&json).unwrap(), Params::mainnet());
}

#[test]
fn zero_epoch_length_is_rejected() {
    let params: Params = serde_json::from_str(r#"{"epoch_length":0}"#).unwrap();
    let err = Error::InvalidParams("epoch_length must be non-zero");
    assert_eq!(params.validate(), Err(err.clone()));
    assert_eq!(params.epoch(1), Err(err.clone()));
    assert_eq!(params.epoch_of(1u64.into()), Err(err.clone()));
    assert_eq!(Sizes::new(params, SizeTable::empty()).unwrap_err(), err);
}
