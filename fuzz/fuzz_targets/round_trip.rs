#![no_main]

use gzpool::{CodecPool, PoolConfig};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: Vec<u8>| {
    // A tiny threshold forces the discard path on most inputs
    let pools = [
        CodecPool::default(),
        CodecPool::new(PoolConfig::new(64).unwrap()).unwrap(),
    ];

    for pool in &pools {
        let compressed = pool.zip(&data).unwrap();
        assert_eq!(&compressed[..2], &[0x1f, 0x8b]);

        // Verify: round-trip restores the input
        let restored = pool.unzip(&compressed).unwrap();
        assert_eq!(&restored[..], &data[..]);

        // Verify: reuse does not change the output
        let again = pool.zip(&data).unwrap();
        assert_eq!(compressed, again);
    }
});
