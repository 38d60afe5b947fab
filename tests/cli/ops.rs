// Integration tests for cli/ops.rs: file-level operations on real files.

use std::fs;
use std::path::Path;

use filetime::FileTime;
use lzf::cli::ops::{
    compress_file, decompress_file, test_file, CompressOptions, Destination,
};
use lzf::chunk::parse_header;
use lzf::{decode, LzfError, Strategy};
use tempfile::TempDir;

fn write_input(dir: &Path, name: &str, len: usize) -> std::path::PathBuf {
    let path = dir.join(name);
    let data: Vec<u8> = b"file operations move bytes between files. "
        .iter()
        .cycle()
        .take(len)
        .copied()
        .collect();
    fs::write(&path, data).unwrap();
    path
}

#[test]
fn compress_then_decompress() {
    let dir = TempDir::new().unwrap();
    let input = write_input(dir.path(), "data.txt", 200_000);
    let packed = dir.path().join("data.txt.lzf");
    let unpacked = dir.path().join("data.copy");

    let stats = compress_file(&input, &Destination::File(packed.clone()), &CompressOptions::default()).unwrap();
    assert_eq!(stats.bytes_in, 200_000);
    assert_eq!(stats.bytes_out, fs::metadata(&packed).unwrap().len());
    assert!(stats.ratio_percent() < 100.0);

    let stats = decompress_file(&packed, &Destination::File(unpacked.clone()), Strategy::Portable, false).unwrap();
    assert_eq!(stats.bytes_out, 200_000);
    assert_eq!(fs::read(&unpacked).unwrap(), fs::read(&input).unwrap());
}

#[test]
fn single_and_multi_threaded_outputs_agree() {
    let dir = TempDir::new().unwrap();
    let input = write_input(dir.path(), "in.bin", 300_000);
    let one = dir.path().join("one.lzf");
    let many = dir.path().join("many.lzf");

    let mut opts = CompressOptions { workers: 1, ..CompressOptions::default() };
    compress_file(&input, &Destination::File(one.clone()), &opts).unwrap();
    opts.workers = 4;
    compress_file(&input, &Destination::File(many.clone()), &opts).unwrap();
    assert_eq!(fs::read(&one).unwrap(), fs::read(&many).unwrap());
}

#[test]
fn block_size_option_is_used() {
    let dir = TempDir::new().unwrap();
    let input = write_input(dir.path(), "in.bin", 10_000);
    let out = dir.path().join("small-blocks.lzf");
    let opts = CompressOptions { block_size: 1000, workers: 1, ..CompressOptions::default() };
    compress_file(&input, &Destination::File(out.clone()), &opts).unwrap();
    let encoded = fs::read(&out).unwrap();
    assert_eq!(lzf::decoded_len(&encoded), Ok(10_000));
    assert_eq!(decode(&encoded).unwrap().len(), 10_000);
    let mut chunks = 0;
    let mut off = 0;
    while off < encoded.len() {
        let (header, _) = parse_header(&encoded, off).unwrap();
        assert_eq!(header.original_len, 1000);
        off += header.chunk_len();
        chunks += 1;
    }
    assert_eq!(chunks, 10);
}

#[test]
fn existing_output_needs_force() {
    let dir = TempDir::new().unwrap();
    let input = write_input(dir.path(), "in.txt", 1000);
    let out = dir.path().join("in.txt.lzf");
    fs::write(&out, b"precious").unwrap();

    let dst = Destination::File(out.clone());
    let err = compress_file(&input, &dst, &CompressOptions::default()).unwrap_err();
    assert!(err.to_string().contains("already exists"), "{err:#}");
    assert_eq!(fs::read(&out).unwrap(), b"precious");

    let opts = CompressOptions { force: true, ..CompressOptions::default() };
    compress_file(&input, &dst, &opts).unwrap();
    assert_eq!(decode(&fs::read(&out).unwrap()).unwrap(), fs::read(&input).unwrap());
}

#[test]
fn modification_time_is_carried_over() {
    let dir = TempDir::new().unwrap();
    let input = write_input(dir.path(), "old.txt", 5000);
    let stamp = FileTime::from_unix_time(1_500_000_000, 0);
    filetime::set_file_mtime(&input, stamp).unwrap();

    let out = dir.path().join("old.txt.lzf");
    compress_file(&input, &Destination::File(out.clone()), &CompressOptions::default()).unwrap();
    let meta = fs::metadata(&out).unwrap();
    assert_eq!(FileTime::from_last_modification_time(&meta), stamp);
}

#[test]
fn test_file_reports_corruption() {
    let dir = TempDir::new().unwrap();
    let input = write_input(dir.path(), "t.txt", 4000);
    let packed = dir.path().join("t.txt.lzf");
    compress_file(&input, &Destination::File(packed.clone()), &CompressOptions::default()).unwrap();

    let stats = test_file(&packed, Strategy::Optimized).unwrap();
    assert_eq!(stats.bytes_out, 4000);

    let mut bytes = fs::read(&packed).unwrap();
    bytes.truncate(bytes.len() - 5);
    fs::write(&packed, &bytes).unwrap();
    let err = test_file(&packed, Strategy::Optimized).unwrap_err();
    let io_err = err.downcast_ref::<std::io::Error>().unwrap();
    assert_eq!(LzfError::from_io(io_err), Some(LzfError::TruncatedInput));
}

#[test]
fn directories_are_refused() {
    let dir = TempDir::new().unwrap();
    let err = test_file(dir.path(), Strategy::Optimized).unwrap_err();
    assert!(err.to_string().contains("is a directory"), "{err}");
}
