// Integration tests for chunk/types.rs: header arithmetic and the error type.

use std::io;

use lzf::chunk::{ChunkHeader, LzfError};

#[test]
fn header_sizes() {
    let raw = ChunkHeader::raw(10);
    assert_eq!(raw.payload_len(), 10);
    assert_eq!(raw.chunk_len(), 15);

    let comp = ChunkHeader::compressed(1000, 21);
    assert_eq!(comp.payload_len(), 21);
    assert_eq!(comp.chunk_len(), 28);
}

#[test]
fn error_names_are_stable() {
    assert_eq!(LzfError::MalformedChunk.error_name(), "ERROR_malformedChunk");
    assert_eq!(LzfError::TruncatedInput.error_name(), "ERROR_truncatedInput");
    assert_eq!(LzfError::InvalidBackreference.error_name(), "ERROR_invalidBackreference");
}

#[test]
fn io_conversion_keeps_the_codec_error() {
    let err: io::Error = LzfError::InvalidBackreference.into();
    assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    assert_eq!(LzfError::from_io(&err), Some(LzfError::InvalidBackreference));

    let err: io::Error = LzfError::TruncatedInput.into();
    assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);

    let plain = io::Error::new(io::ErrorKind::Other, "disk on fire");
    assert_eq!(LzfError::from_io(&plain), None);
}

#[test]
fn block_size_error_mentions_the_size() {
    let msg = LzfError::InvalidBlockSize(70_000).to_string();
    assert!(msg.contains("70000"), "{msg}");
}
