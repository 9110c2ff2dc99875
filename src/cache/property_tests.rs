//! Property-Based Tests for Cache Module
//!
//! Uses proptest to check the cache's behavioural guarantees over
//! generated keys and payloads.

use proptest::prelude::*;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use crate::cache::{Codec, TimedCache};

// == Test Configuration ==
/// Long enough that no sweep removes anything while a case runs
const LONG_INTERVAL: Duration = Duration::from_secs(3600);

// == Strategies ==
/// Generates URL-shaped cache keys
fn url_key_strategy() -> impl Strategy<Value = String> {
    "[a-z0-9-]{1,32}".prop_map(|path| format!("https://pokeapi.co/api/v2/{}", path))
}

/// Generates arbitrary payloads, including empty and non-UTF-8 bytes
fn payload_strategy() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 0..2048)
}

fn codec_strategy() -> impl Strategy<Value = Codec> {
    prop_oneof![Just(Codec::Identity), Just(Codec::Gzip)]
}

#[derive(Debug, Clone)]
enum CacheOp {
    Add { key: String, value: Vec<u8> },
    Get { key: String },
}

/// Draws keys from a small pool so operations overlap
fn cache_op_strategy() -> impl Strategy<Value = CacheOp> {
    let key = (0..8u8).prop_map(|i| format!("key-{}", i));
    prop_oneof![
        (key.clone(), payload_strategy()).prop_map(|(key, value)| CacheOp::Add { key, value }),
        key.prop_map(|key| CacheOp::Get { key }),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // Any byte sequence survives a gzip round-trip unchanged.
    #[test]
    fn prop_gzip_round_trip(value in payload_strategy()) {
        let encoded = Codec::Gzip.encode(&value).unwrap();
        let decoded = Codec::Gzip.decode(&encoded).unwrap();
        prop_assert_eq!(decoded, value);
    }

    // Adding then immediately getting returns the exact bytes, whatever the codec.
    #[test]
    fn prop_add_then_get(
        key in url_key_strategy(),
        value in payload_strategy(),
        codec in codec_strategy()
    ) {
        let retrieved = tokio_test::block_on(async {
            let cache = TimedCache::with_codec(LONG_INTERVAL, codec);
            cache.add(key.clone(), &value).await.unwrap();
            let retrieved = cache.get(&key).await;
            cache.close().await.unwrap();
            retrieved
        });

        prop_assert_eq!(retrieved, Some(value));
    }

    // The last write under a key always wins.
    #[test]
    fn prop_overwrite_semantics(
        key in url_key_strategy(),
        value1 in payload_strategy(),
        value2 in payload_strategy()
    ) {
        let (retrieved, len) = tokio_test::block_on(async {
            let cache = TimedCache::new(LONG_INTERVAL);
            cache.add(key.clone(), &value1).await.unwrap();
            cache.add(key.clone(), &value2).await.unwrap();
            let retrieved = cache.get(&key).await;
            let len = cache.len().await;
            cache.close().await.unwrap();
            (retrieved, len)
        });

        prop_assert_eq!(retrieved, Some(value2));
        prop_assert_eq!(len, 1);
    }

    // A sequential run of operations behaves like a plain map.
    #[test]
    fn prop_matches_model_map(ops in prop::collection::vec(cache_op_strategy(), 1..50)) {
        let mismatch = tokio_test::block_on(async {
            let cache = TimedCache::with_codec(LONG_INTERVAL, Codec::Gzip);
            let mut model: HashMap<String, Vec<u8>> = HashMap::new();
            let mut mismatch = None;

            for op in ops {
                match op {
                    CacheOp::Add { key, value } => {
                        cache.add(key.clone(), &value).await.unwrap();
                        model.insert(key, value);
                    }
                    CacheOp::Get { key } => {
                        let got = cache.get(&key).await;
                        if got.as_ref() != model.get(&key) {
                            mismatch = Some(key);
                            break;
                        }
                    }
                }
            }

            cache.close().await.unwrap();
            mismatch
        });

        prop_assert!(mismatch.is_none(), "Cache diverged from model at {:?}", mismatch);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(20))]

    // Concurrent adds and gets never corrupt payloads: every value read back
    // is one that some task wrote under that key.
    #[test]
    fn prop_concurrent_operation_correctness(
        operations in prop::collection::vec(cache_op_strategy(), 10..60)
    ) {
        let rt = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(4)
            .enable_all()
            .build()
            .unwrap();

        let mut written: HashMap<String, Vec<Vec<u8>>> = HashMap::new();
        for op in &operations {
            if let CacheOp::Add { key, value } = op {
                written.entry(key.clone()).or_default().push(value.clone());
            }
        }

        let result: Result<(), String> = rt.block_on(async {
            let cache = Arc::new(TimedCache::with_codec(LONG_INTERVAL, Codec::Gzip));
            let written = Arc::new(written);
            let mut handles = vec![];

            for op in operations {
                let cache = Arc::clone(&cache);
                let written = Arc::clone(&written);

                handles.push(tokio::spawn(async move {
                    match op {
                        CacheOp::Add { key, value } => {
                            cache.add(key, &value).await.map_err(|e| e.to_string())
                        }
                        CacheOp::Get { key } => match cache.get(&key).await {
                            Some(value) => {
                                let known = written
                                    .get(&key)
                                    .map(|values| values.contains(&value))
                                    .unwrap_or(false);
                                if known {
                                    Ok(())
                                } else {
                                    Err(format!("Read unknown value for {}", key))
                                }
                            }
                            None => Ok(()),
                        },
                    }
                }));
            }

            for handle in handles {
                handle.await.map_err(|e| e.to_string())??;
            }

            let stats = cache.stats().await;
            if stats.total_entries > written.len() {
                return Err(format!(
                    "{} entries but only {} distinct keys written",
                    stats.total_entries,
                    written.len()
                ));
            }
            if stats.codec_failures != 0 {
                return Err("Codec failure under concurrency".to_string());
            }

            let cache = Arc::try_unwrap(cache).map_err(|_| "cache still shared".to_string())?;
            cache.close().await.map_err(|e| e.to_string())
        });

        prop_assert!(result.is_ok(), "Concurrent operation failed: {:?}", result);
    }
}
