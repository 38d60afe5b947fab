#![no_main]
use std::io::Read;

use libfuzzer_sys::fuzz_target;
use lzf::{LzfReader, Strategy, Uncompressor};

fuzz_target!(|data: &[u8]| {
    // Arbitrary bytes: errors are expected, panics and disagreement are not.
    let portable = lzf::decode_with(Strategy::Portable, data);
    let optimized = lzf::decode_with(Strategy::Optimized, data);
    assert_eq!(portable, optimized);

    // Raw token streams with a handful of declared output lengths.
    for out_len in [0usize, 1, data.len(), data.len().saturating_mul(8).min(1 << 16)] {
        let mut a = Vec::new();
        let mut b = Vec::new();
        let ra = lzf::block::decompress_block(data, &mut a, out_len);
        let rb = lzf::block::decompress_block_fast(data, &mut b, out_len);
        assert_eq!(ra, rb);
        assert_eq!(a, b);
    }

    // The streaming surfaces agree with the one-shot decoder, error kind
    // included.
    let mut pulled = Vec::new();
    let pull = LzfReader::new(data)
        .read_to_end(&mut pulled)
        .map_err(|e| lzf::LzfError::from_io(&e).expect("codec error"));

    let mut u = Uncompressor::new(Vec::new());
    let pushed = match u.feed(data) {
        Ok(()) => u.complete(),
        Err(e) => Err(e),
    };
    assert_eq!(pushed, portable);
    assert_eq!(pull.map(|_| pulled), portable);
});
