// Integration tests for the pooled zip/unzip API
// Tests cover: round-trips, pooled reuse, concurrency, size cap, malformed input, interop

use std::io::{Read, Write};
use std::sync::Arc;
use std::thread;

use flate2::Compression;
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use gzpool::{CodecError, CodecPool, DEFAULT_MAX_BUFFER_CAPACITY, PoolConfig};

/// Deterministic pseudo-random payload (xorshift32).
fn payload(len: usize, seed: u32) -> Vec<u8> {
    let mut state = seed.wrapping_mul(2_654_435_761).max(1);
    (0..len)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            state as u8
        })
        .collect()
}

fn round_trip(pool: &CodecPool, data: &[u8]) -> Vec<u8> {
    let compressed = pool.zip(data).expect("zip should succeed");
    pool.unzip(&compressed)
        .expect("unzip should succeed")
        .to_vec()
}

// ============================================================================
// Round-Trip Tests
// ============================================================================

#[test]
fn test_hello_world() {
    let pool = CodecPool::default();
    let compressed = pool.zip(b"hello world").unwrap();

    assert_ne!(&compressed[..], b"hello world");
    assert_eq!(&pool.unzip(&compressed).unwrap()[..], b"hello world");
}

#[test]
fn test_empty_input() {
    let pool = CodecPool::default();
    let compressed = pool.zip(&[]).unwrap();

    assert!(
        !compressed.is_empty(),
        "Empty input still produces gzip framing"
    );
    assert!(pool.unzip(&compressed).unwrap().is_empty());
}

#[test]
fn test_round_trip_sizes() {
    let pool = CodecPool::default();

    for (i, len) in [1, 2, 100, 4096, 65_535, 65_536, 65_537, 300_000]
        .into_iter()
        .enumerate()
    {
        let data = payload(len, i as u32);
        assert_eq!(round_trip(&pool, &data), data, "len {len}");
    }
}

#[test]
fn test_round_trip_compressible() {
    let pool = CodecPool::default();
    let data = b"abcabcabc".repeat(50_000);

    let compressed = pool.zip(&data).unwrap();
    assert!(compressed.len() < data.len() / 10);
    assert_eq!(&pool.unzip(&compressed).unwrap()[..], &data[..]);
}

// ============================================================================
// Pooled Reuse
// ============================================================================

#[test]
fn test_sequential_matches_interleaved() {
    let inputs: Vec<Vec<u8>> = (0..16)
        .map(|i| payload(1000 + i * 9_000, i as u32))
        .collect();

    // N zips, then N unzips
    let batched_pool = CodecPool::default();
    let compressed: Vec<_> = inputs
        .iter()
        .map(|data| batched_pool.zip(data).unwrap())
        .collect();
    let batched: Vec<_> = compressed
        .iter()
        .map(|c| batched_pool.unzip(c).unwrap())
        .collect();

    // zip/unzip interleaved
    let interleaved_pool = CodecPool::default();
    let interleaved: Vec<_> = inputs
        .iter()
        .map(|data| {
            let c = interleaved_pool.zip(data).unwrap();
            interleaved_pool.unzip(&c).unwrap()
        })
        .collect();

    for ((input, a), b) in inputs.iter().zip(&batched).zip(&interleaved) {
        assert_eq!(&a[..], &input[..]);
        assert_eq!(&b[..], &input[..]);
    }
}

#[test]
fn test_reused_compressor_is_deterministic() {
    let pool = CodecPool::default();
    let first = pool.zip(b"the same bytes").unwrap();

    // Dirty the pooled compressor with something unrelated
    pool.zip(&payload(200_000, 99)).unwrap();

    let again = pool.zip(b"the same bytes").unwrap();
    assert_eq!(first, again);
    assert_eq!(pool.stats().compressors.misses, 1);
}

#[test]
fn test_failure_does_not_poison_pool() {
    let pool = CodecPool::default();
    let good = pool.zip(b"still fine").unwrap();

    assert!(pool.unzip(&good[..good.len() - 3]).is_err());
    assert!(pool.unzip(b"not gzip at all").is_err());

    assert_eq!(&pool.unzip(&good).unwrap()[..], b"still fine");
    assert_eq!(pool.stats().decompressors.misses, 1);
}

#[test]
fn test_result_is_independent_of_pool() {
    let pool = CodecPool::default();
    let compressed = pool.zip(b"first").unwrap();
    let snapshot = compressed.clone();

    // Reusing the scratch buffer must not alter earlier results
    pool.zip(b"second, and longer than the first").unwrap();
    assert_eq!(compressed, snapshot);
}

// ============================================================================
// Concurrency
// ============================================================================

#[test]
fn test_concurrent_round_trips() {
    const THREADS: u32 = 8;
    const ROUNDS: u32 = 25;

    let pool = CodecPool::default();

    thread::scope(|s| {
        for t in 0..THREADS {
            let pool = &pool;
            s.spawn(move || {
                for k in 0..ROUNDS {
                    let seed = t * ROUNDS + k;
                    let data = payload((seed as usize * 997) % 100_000, seed);
                    assert_eq!(round_trip(pool, &data), data);
                }
            });
        }
    });

    let stats = pool.stats();
    let total = (THREADS * ROUNDS) as usize;
    assert_eq!(stats.compressors.hits + stats.compressors.misses, total);
    assert!(stats.compressors.misses <= THREADS as usize);
    assert_eq!(stats.compressors.size, stats.compressors.misses);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_round_trips_from_blocking_tasks() {
    let pool = Arc::new(CodecPool::default());

    let tasks: Vec<_> = (0..32u32)
        .map(|seed| {
            let pool = Arc::clone(&pool);
            tokio::task::spawn_blocking(move || {
                let data = payload(10_000 + seed as usize * 1_000, seed);
                let compressed = pool.zip(&data)?;
                let restored = pool.unzip(&compressed)?;
                assert_eq!(&restored[..], &data[..]);
                Ok::<(), CodecError>(())
            })
        })
        .collect();

    for task in tasks {
        task.await.unwrap().unwrap();
    }
}

// ============================================================================
// Size Cap
// ============================================================================

#[test]
fn test_large_payload_does_not_stay_pooled() {
    let pool = CodecPool::default();
    let data = payload(4 * DEFAULT_MAX_BUFFER_CAPACITY, 5);

    assert_eq!(round_trip(&pool, &data), data);

    let stats = pool.stats();
    assert_eq!(
        stats.buffers.discards, 2,
        "zip and unzip buffers both outgrew the threshold"
    );
    assert!(stats.buffers.retained_bytes <= stats.buffers.size * DEFAULT_MAX_BUFFER_CAPACITY);

    // A small call afterwards leaves one idle buffer within the threshold
    round_trip(&pool, b"small");
    let stats = pool.stats();
    assert_eq!(stats.buffers.size, 1);
    assert!(stats.buffers.retained_bytes <= DEFAULT_MAX_BUFFER_CAPACITY);
}

#[test]
fn test_configured_threshold() {
    let pool = CodecPool::new(PoolConfig::new(256 * 1024).unwrap()).unwrap();
    let data = payload(100_000, 11);

    assert_eq!(round_trip(&pool, &data), data);
    assert_eq!(pool.stats().buffers.discards, 0);
    assert!(pool.stats().buffers.retained_bytes <= 256 * 1024);
}

// ============================================================================
// Malformed Input
// ============================================================================

#[test]
fn test_not_gzip() {
    let pool = CodecPool::default();
    let err = pool.unzip(&[0x00, 0x01, 0x02]).unwrap_err();
    assert!(err.is_format_error());
}

#[test]
fn test_empty_is_not_gzip() {
    let pool = CodecPool::default();
    assert!(matches!(pool.unzip(&[]), Err(CodecError::Truncated)));
}

#[test]
fn test_every_truncation_fails() {
    let pool = CodecPool::default();
    let compressed = pool.zip(&payload(2_000, 1)).unwrap();

    for cut in 0..compressed.len() {
        let result = pool.unzip(&compressed[..cut]);
        assert!(result.is_err(), "prefix of {cut} bytes decoded");
    }
}

#[test]
fn test_corrupted_trailer() {
    let pool = CodecPool::default();
    let mut compressed = pool.zip(b"hello world").unwrap().to_vec();
    let last = compressed.len() - 1;
    compressed[last] ^= 0x01;

    assert!(matches!(
        pool.unzip(&compressed),
        Err(CodecError::LengthMismatch { .. })
    ));
}

// ============================================================================
// Interoperability
// ============================================================================

#[test]
fn test_output_reads_with_flate2() {
    let pool = CodecPool::default();
    let data = payload(70_000, 21);
    let compressed = pool.zip(&data).unwrap();

    let mut decoded = Vec::new();
    GzDecoder::new(&compressed[..])
        .read_to_end(&mut decoded)
        .unwrap();
    assert_eq!(decoded, data);
}

#[test]
fn test_reads_flate2_output() {
    let pool = CodecPool::default();
    let data = payload(70_000, 22);

    for level in [Compression::none(), Compression::fast(), Compression::best()] {
        let mut encoder = GzEncoder::new(Vec::new(), level);
        encoder.write_all(&data).unwrap();
        let compressed = encoder.finish().unwrap();

        assert_eq!(&pool.unzip(&compressed).unwrap()[..], &data[..]);
    }
}

#[test]
fn test_multi_member_stream() {
    let pool = CodecPool::default();
    let mut stream = pool.zip(b"hello ").unwrap().to_vec();
    stream.extend_from_slice(&pool.zip(b"world").unwrap());

    assert_eq!(&pool.unzip(&stream).unwrap()[..], b"hello world");
}
