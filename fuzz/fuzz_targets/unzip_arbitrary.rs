#![no_main]

use gzpool::CodecPool;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: Vec<u8>| {
    let pool = CodecPool::default();

    // Arbitrary bytes must decode or fail cleanly, never panic
    if let Ok(decoded) = pool.unzip(&data) {
        // Whatever decoded must survive a round-trip of its own
        let compressed = pool.zip(&decoded).unwrap();
        assert_eq!(pool.unzip(&compressed).unwrap(), decoded);
    }

    // A failed call must leave the pool usable
    let compressed = pool.zip(b"canary").unwrap();
    assert_eq!(&pool.unzip(&compressed).unwrap()[..], b"canary");
});
