// Integration tests for stream/parallel.rs: parallel output must be
// byte-identical to the serial encoders.

use std::io::Write;

use lzf::stream::parallel::resolve_workers;
use lzf::{decode, encode, encode_parallel, LzfWriter, ParallelLzfWriter, Strategy};

fn mixed(len: usize) -> Vec<u8> {
    let mut x: u64 = 0x9E37_79B9_7F4A_7C15;
    (0..len)
        .map(|i| {
            if (i / 4096) % 2 == 0 {
                b"repetitive section "[i % 19]
            } else {
                x ^= x << 7;
                x ^= x >> 9;
                x as u8
            }
        })
        .collect()
}

#[test]
fn one_shot_matches_serial() {
    let input = mixed(300_000);
    for strategy in Strategy::ALL {
        assert_eq!(encode_parallel(&input, strategy), encode(&input), "{strategy}");
    }
    assert!(encode_parallel(&[], Strategy::Portable).is_empty());
}

#[test]
fn writer_matches_serial_writer() {
    let input = mixed(123_457);
    for workers in [1, 2, 3, 8] {
        let mut serial = LzfWriter::new(Vec::new(), 5000).unwrap();
        let mut par = ParallelLzfWriter::new(Vec::new(), 5000, workers).unwrap();
        for piece in input.chunks(7777) {
            serial.write_all(piece).unwrap();
            par.write_all(piece).unwrap();
        }
        assert_eq!(par.workers(), workers);
        let a = serial.finish().unwrap();
        let b = par.finish().unwrap();
        assert_eq!(a, b, "workers={workers}");
        assert_eq!(decode(&b).unwrap(), input);
    }
}

#[test]
fn chunk_count() {
    let mut w = ParallelLzfWriter::new(Vec::new(), 1000, 4).unwrap();
    w.write_all(&mixed(10_500)).unwrap();
    w.close().unwrap();
    assert_eq!(w.chunks_written(), 11);
}

#[test]
fn worker_resolution() {
    assert!(resolve_workers(0) >= 1);
    assert_eq!(resolve_workers(6), 6);
}
