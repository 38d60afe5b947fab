//! Timed cases for the perf comparison.
//!
//! | Case                  | Work per repetition |
//! |-----------------------|---------------------|
//! | `CompressPortable`    | one-shot encode, portable encoder |
//! | `CompressOptimized`   | one-shot encode, optimized encoder |
//! | `CompressStream`      | `LzfWriter` into a byte-counting sink |
//! | `DecompressPortable`  | one-shot decode, portable decoder |
//! | `DecompressOptimized` | one-shot decode, optimized decoder |
//! | `DecompressStream`    | `LzfReader` drained through an 8000-byte buffer |
//!
//! Each case owns its codec state in a [`CaseRunner`], built once per
//! comparison so the timed loop does no setup work beyond what the case
//! itself measures.

use std::fmt;
use std::io::{self, Read, Write};

use crate::codec::{ChunkDecoder, ChunkEncoder, Strategy};
use crate::stream::{LzfReader, LzfWriter};

/// Read buffer size of the streaming decompression case.
const STREAM_READ_BUF: usize = 8000;

/// One measurable operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BenchCase {
    CompressPortable,
    CompressOptimized,
    CompressStream,
    DecompressPortable,
    DecompressOptimized,
    DecompressStream,
}

impl BenchCase {
    pub const ALL: [BenchCase; 6] = [
        BenchCase::CompressPortable,
        BenchCase::CompressOptimized,
        BenchCase::CompressStream,
        BenchCase::DecompressPortable,
        BenchCase::DecompressOptimized,
        BenchCase::DecompressStream,
    ];

    pub fn label(self) -> &'static str {
        match self {
            BenchCase::CompressPortable => "LZF compress/block",
            BenchCase::CompressOptimized => "LZF-Optimized compress/block",
            BenchCase::CompressStream => "LZF compress/stream",
            BenchCase::DecompressPortable => "LZF decompress/block",
            BenchCase::DecompressOptimized => "LZF-Optimized decompress/block",
            BenchCase::DecompressStream => "LZF decompress/stream",
        }
    }

    pub fn is_compress(self) -> bool {
        matches!(
            self,
            BenchCase::CompressPortable | BenchCase::CompressOptimized | BenchCase::CompressStream
        )
    }
}

impl fmt::Display for BenchCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// `Write` sink that discards data and counts bytes.
#[derive(Debug, Default)]
pub struct CountingSink {
    bytes: u64,
}

impl CountingSink {
    pub fn len(&self) -> u64 {
        self.bytes
    }

    pub fn is_empty(&self) -> bool {
        self.bytes == 0
    }
}

impl Write for CountingSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.bytes += buf.len() as u64;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Codec state for one case.
pub struct CaseRunner {
    case: BenchCase,
    encoder: ChunkEncoder,
    decoder: ChunkDecoder,
    block_size: usize,
    out: Vec<u8>,
}

impl CaseRunner {
    pub fn new(case: BenchCase, block_size: usize) -> Self {
        let strategy = match case {
            BenchCase::CompressPortable | BenchCase::DecompressPortable => Strategy::Portable,
            _ => Strategy::Optimized,
        };
        CaseRunner {
            case,
            encoder: ChunkEncoder::new(strategy),
            decoder: ChunkDecoder::new(strategy),
            block_size: block_size.clamp(1, crate::chunk::MAX_CHUNK_LEN),
            out: Vec::new(),
        }
    }

    #[inline]
    pub fn case(&self) -> BenchCase {
        self.case
    }

    /// Run the case `reps` times.  Compress cases read `input`, decompress
    /// cases read `encoded`.  Returns the output size of the last repetition.
    pub fn run(&mut self, reps: usize, input: &[u8], encoded: &[u8]) -> io::Result<usize> {
        let mut size = 0usize;
        for _ in 0..reps {
            size = match self.case {
                BenchCase::CompressPortable | BenchCase::CompressOptimized => {
                    self.out.clear();
                    self.encoder.encode_into(input, &mut self.out);
                    self.out.len()
                }
                BenchCase::CompressStream => {
                    let mut w = LzfWriter::new(CountingSink::default(), self.block_size)?;
                    w.write_all(input)?;
                    w.finish()?.len() as usize
                }
                BenchCase::DecompressPortable | BenchCase::DecompressOptimized => {
                    self.out.clear();
                    self.decoder.decode_into(encoded, &mut self.out)?;
                    self.out.len()
                }
                BenchCase::DecompressStream => {
                    let mut r = LzfReader::new(encoded);
                    let mut buf = [0u8; STREAM_READ_BUF];
                    let mut total = 0usize;
                    loop {
                        let n = r.read(&mut buf)?;
                        if n == 0 {
                            break;
                        }
                        total += n;
                    }
                    r.close();
                    total
                }
            };
        }
        Ok(size)
    }
}
