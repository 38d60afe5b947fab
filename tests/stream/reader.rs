// Integration tests for stream/reader.rs.

use std::io::{self, Read};

use lzf::{encode, LzfError, LzfReader, LzfWriter, Strategy};

fn binary(len: usize) -> Vec<u8> {
    (0..len).map(|i| ((i * 31) ^ (i >> 7)) as u8).collect()
}

fn read_all<R: Read>(r: &mut LzfReader<R>) -> io::Result<Vec<u8>> {
    let mut out = Vec::new();
    r.read_to_end(&mut out)?;
    Ok(out)
}

#[test]
fn reads_writer_output() {
    let input = binary(40_000);
    let mut w = LzfWriter::new(Vec::new(), 4096).unwrap();
    std::io::Write::write_all(&mut w, &input).unwrap();
    let encoded = w.finish().unwrap();

    for strategy in Strategy::ALL {
        let mut r = LzfReader::with_strategy(encoded.as_slice(), strategy);
        assert_eq!(read_all(&mut r).unwrap(), input, "{strategy}");
        assert_eq!(r.chunks_read(), 10);
    }
}

#[test]
fn empty_source_is_empty_output() {
    let mut r = LzfReader::new(io::empty());
    assert!(read_all(&mut r).unwrap().is_empty());
}

#[test]
fn truncated_payload() {
    let encoded = encode(&binary(5000));
    let cut = &encoded[..encoded.len() - 1];
    let err = read_all(&mut LzfReader::new(cut)).unwrap_err();
    assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    assert_eq!(LzfError::from_io(&err), Some(LzfError::TruncatedInput));
}

#[test]
fn truncated_header() {
    let cuts: [&[u8]; 3] = [b"Z", b"ZV", b"ZV\x01\x00\x10"];
    for cut in cuts {
        let err = read_all(&mut LzfReader::new(cut)).unwrap_err();
        assert_eq!(LzfError::from_io(&err), Some(LzfError::TruncatedInput), "{cut:?}");
    }
}

#[test]
fn garbage_after_valid_chunk() {
    let mut encoded = encode(b"first chunk");
    encoded.extend_from_slice(b"XYZ");
    let mut r = LzfReader::new(encoded.as_slice());
    let mut buf = [0u8; 64];
    assert_eq!(r.read(&mut buf).unwrap(), 11);
    let err = r.read(&mut buf).unwrap_err();
    assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    assert_eq!(LzfError::from_io(&err), Some(LzfError::MalformedChunk));
}

#[test]
fn read_after_close() {
    let encoded = encode(b"closed early");
    let mut r = LzfReader::new(encoded.as_slice());
    r.close();
    assert!(r.is_closed());
    let err = r.read(&mut [0u8; 4]).unwrap_err();
    assert_eq!(LzfError::from_io(&err), Some(LzfError::StreamClosed));
}
