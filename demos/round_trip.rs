//! Compress and restore a few payloads through a shared pool.
//!
//! Run with:
//!     cargo run --example round_trip

use gzpool::{CodecPool, PoolConfig};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let pool = CodecPool::new(PoolConfig::default())?;

    let payloads: Vec<Vec<u8>> = vec![
        b"hello world".to_vec(),
        b"abc".repeat(10_000),
        (0..200_000u32).map(|i| (i * 31 % 251) as u8).collect(),
    ];

    for payload in &payloads {
        let compressed = pool.zip(payload)?;
        let restored = pool.unzip(&compressed)?;
        assert_eq!(&restored[..], &payload[..]);

        println!(
            "{:>7} bytes -> {:>7} bytes gzip",
            payload.len(),
            compressed.len()
        );
    }

    let stats = pool.stats();
    println!("\nbuffers:       {:?}", stats.buffers);
    println!("compressors:   {:?}", stats.compressors);
    println!("decompressors: {:?}", stats.decompressors);
    println!("buffer hit rate: {:.2}", stats.buffers.hit_rate());

    Ok(())
}
