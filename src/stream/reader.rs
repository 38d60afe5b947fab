//! Decompressing `Read` adapter.
//!
//! [`LzfReader`] pulls one chunk at a time from its source, decodes it into
//! an internal buffer, and serves reads by draining that buffer.
//!
//! State machine:
//!
//! | State    | `read` behaviour |
//! |----------|------------------|
//! | `Open`   | drain buffer, pull the next chunk when empty |
//! | `Eof`    | source ended at a chunk boundary; returns 0 |
//! | `Failed` | repeats the decode error that stopped the stream |
//! | `Closed` | fails with `StreamClosed` |
//!
//! Decode errors are terminal: the reader moves to `Failed` and releases its
//! buffers.  A failing source moves it to `Closed`.

use std::io::{self, Read};

use crate::chunk::{
    parse_header, ChunkType, LzfError, HEADER_LEN_COMPRESSED, LZF_MAGIC,
};
use crate::chunk::header::short_header_error;
use crate::chunk::types::HEADER_PREFIX_LEN;
use crate::codec::{ChunkDecoder, Strategy};
use crate::displaylevel;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ReaderState {
    Open,
    Eof,
    Failed(LzfError),
    Closed,
}

/// Read into `buf` until it is full or the source is exhausted; returns the
/// number of bytes read.
fn read_full<R: Read>(src: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match src.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}

/// Decompressing reader over any [`Read`] source.
pub struct LzfReader<R: Read> {
    inner: R,
    decoder: ChunkDecoder,
    payload: Vec<u8>,
    decoded: Vec<u8>,
    pos: usize,
    state: ReaderState,
    chunks_read: u64,
}

impl<R: Read> LzfReader<R> {
    pub fn new(source: R) -> Self {
        Self::with_strategy(source, Strategy::optimal())
    }

    pub fn with_strategy(source: R, strategy: Strategy) -> Self {
        LzfReader {
            inner: source,
            decoder: ChunkDecoder::new(strategy),
            payload: Vec::new(),
            decoded: Vec::new(),
            pos: 0,
            state: ReaderState::Open,
            chunks_read: 0,
        }
    }

    /// Number of chunks decoded so far.
    #[inline]
    pub fn chunks_read(&self) -> u64 {
        self.chunks_read
    }

    #[inline]
    pub fn is_closed(&self) -> bool {
        self.state == ReaderState::Closed
    }

    pub fn get_ref(&self) -> &R {
        &self.inner
    }

    /// Release internal buffers.  Later reads fail with `StreamClosed`.
    pub fn close(&mut self) {
        self.state = ReaderState::Closed;
        self.release();
    }

    fn release(&mut self) {
        self.payload = Vec::new();
        self.decoded = Vec::new();
        self.pos = 0;
    }

    pub fn into_inner(self) -> R {
        self.inner
    }

    /// Pull and decode the next chunk.  Returns `false` at a clean end of
    /// the source.
    fn next_chunk(&mut self) -> io::Result<bool> {
        let mut header = [0u8; HEADER_LEN_COMPRESSED];
        let got = read_full(&mut self.inner, &mut header[..HEADER_PREFIX_LEN])?;
        if got == 0 {
            return Ok(false);
        }
        if got < HEADER_PREFIX_LEN {
            return Err(short_header_error(&header[..got]).into());
        }
        if header[..2] != LZF_MAGIC {
            return Err(LzfError::MalformedChunk.into());
        }
        let header_len = ChunkType::from_u8(header[2])
            .ok_or(LzfError::MalformedChunk)?
            .header_len();
        let got = HEADER_PREFIX_LEN + read_full(&mut self.inner, &mut header[HEADER_PREFIX_LEN..header_len])?;
        let (header, _) = parse_header(&header[..got], 0)?;

        self.payload.resize(header.payload_len(), 0);
        if read_full(&mut self.inner, &mut self.payload)? < header.payload_len() {
            return Err(LzfError::TruncatedInput.into());
        }

        self.decoded.clear();
        self.pos = 0;
        self.decoder.decode_chunk(&header, &self.payload, &mut self.decoded)?;
        self.chunks_read += 1;
        displaylevel!(
            4,
            "lzf: chunk {} : {} -> {} bytes\n",
            self.chunks_read,
            header.chunk_len(),
            header.original_len
        );
        Ok(true)
    }
}

impl<R: Read> Read for LzfReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        loop {
            match self.state {
                ReaderState::Closed => return Err(LzfError::StreamClosed.into()),
                ReaderState::Failed(e) => return Err(e.into()),
                ReaderState::Eof => return Ok(0),
                ReaderState::Open => {}
            }
            if self.pos < self.decoded.len() {
                let n = buf.len().min(self.decoded.len() - self.pos);
                buf[..n].copy_from_slice(&self.decoded[self.pos..self.pos + n]);
                self.pos += n;
                return Ok(n);
            }
            if buf.is_empty() {
                return Ok(0);
            }
            match self.next_chunk() {
                Ok(true) => {}
                Ok(false) => self.state = ReaderState::Eof,
                Err(e) => {
                    self.state = match LzfError::from_io(&e) {
                        Some(err) => ReaderState::Failed(err),
                        None => ReaderState::Closed,
                    };
                    self.release();
                    return Err(e);
                }
            }
        }
    }
}
