#![no_main]
use libfuzzer_sys::fuzz_target;
use lzf::Strategy;

fuzz_target!(|data: &[u8]| {
    let portable = lzf::encode_with(Strategy::Portable, data);
    let optimized = lzf::encode_with(Strategy::Optimized, data);
    assert_eq!(portable, optimized, "encoders disagree on {} input bytes", data.len());
    assert!(portable.len() <= lzf::compress_bound(data.len()));

    for strategy in Strategy::ALL {
        let recovered = lzf::decode_with(strategy, &portable).expect("valid stream");
        assert_eq!(recovered, data, "{strategy} decoder round-trip mismatch");
    }
});
