//! Chunking `Write` adapter.
//!
//! [`LzfWriter`] buffers caller bytes and emits one LZF chunk each time the
//! buffer reaches the configured block size.  The sink sees a plain
//! concatenation of chunks, identical to what [`crate::codec::ChunkEncoder`]
//! produces for the same bytes split at the same boundaries.
//!
//! There is no `Drop` finalization: call [`LzfWriter::close`] or
//! [`LzfWriter::finish`], otherwise buffered bytes are lost.

use std::io::{self, Write};
use std::mem;

use crate::chunk::{LzfError, MAX_CHUNK_LEN};
use crate::codec::{ChunkEncoder, Strategy};
use crate::displaylevel;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WriterState {
    Open,
    Closed,
}

/// Validate a streaming block size (1..=[`MAX_CHUNK_LEN`]).
pub(crate) fn check_block_size(block_size: usize) -> Result<usize, LzfError> {
    if block_size == 0 || block_size > MAX_CHUNK_LEN {
        return Err(LzfError::InvalidBlockSize(block_size));
    }
    Ok(block_size)
}

/// Compressing writer over any [`Write`] sink.
pub struct LzfWriter<W: Write> {
    inner: W,
    encoder: ChunkEncoder,
    pending: Vec<u8>,
    out: Vec<u8>,
    block_size: usize,
    state: WriterState,
    chunks_written: u64,
}

impl<W: Write> LzfWriter<W> {
    /// Wrap `sink`, emitting chunks of `block_size` input bytes.
    pub fn new(sink: W, block_size: usize) -> Result<Self, LzfError> {
        Self::with_strategy(sink, block_size, Strategy::optimal())
    }

    pub fn with_strategy(sink: W, block_size: usize, strategy: Strategy) -> Result<Self, LzfError> {
        let block_size = check_block_size(block_size)?;
        Ok(LzfWriter {
            inner: sink,
            encoder: ChunkEncoder::new(strategy),
            pending: Vec::with_capacity(block_size),
            out: Vec::new(),
            block_size,
            state: WriterState::Open,
            chunks_written: 0,
        })
    }

    #[inline]
    pub fn block_size(&self) -> usize {
        self.block_size
    }

    /// Number of chunks handed to the sink so far.
    #[inline]
    pub fn chunks_written(&self) -> u64 {
        self.chunks_written
    }

    #[inline]
    pub fn is_closed(&self) -> bool {
        self.state == WriterState::Closed
    }

    pub fn get_ref(&self) -> &W {
        &self.inner
    }

    /// Mutable access to the sink.  Writing to it directly corrupts the
    /// chunk stream.
    pub fn get_mut(&mut self) -> &mut W {
        &mut self.inner
    }

    fn ensure_open(&self) -> io::Result<()> {
        match self.state {
            WriterState::Open => Ok(()),
            WriterState::Closed => Err(LzfError::StreamClosed.into()),
        }
    }

    /// Encode one chunk from `chunk` and hand it to the sink.
    fn emit(&mut self, chunk: &[u8]) -> io::Result<()> {
        self.out.clear();
        let n = self.encoder.encode_chunk(chunk, &mut self.out);
        self.inner.write_all(&self.out)?;
        self.chunks_written += 1;
        displaylevel!(4, "lzf: chunk {} : {} -> {} bytes\n", self.chunks_written, chunk.len(), n);
        Ok(())
    }

    fn emit_pending(&mut self) -> io::Result<()> {
        if self.pending.is_empty() {
            return Ok(());
        }
        let pending = mem::take(&mut self.pending);
        let result = self.emit(&pending);
        self.pending = pending;
        self.pending.clear();
        result
    }

    /// Emit pending bytes, flush the sink, and release all buffers.
    ///
    /// The writer is closed afterwards even when this fails.  Closing an
    /// already closed writer does nothing.
    pub fn close(&mut self) -> io::Result<()> {
        if self.state == WriterState::Closed {
            return Ok(());
        }
        self.state = WriterState::Closed;

        let pending = mem::take(&mut self.pending);
        let mut out = mem::take(&mut self.out);
        out.clear();
        let strategy = self.encoder.strategy();
        let mut encoder = mem::replace(&mut self.encoder, ChunkEncoder::new(strategy));

        if !pending.is_empty() {
            encoder.encode_chunk(&pending, &mut out);
            self.inner.write_all(&out)?;
            self.chunks_written += 1;
        }
        displaylevel!(4, "lzf: writer closed after {} chunks\n", self.chunks_written);
        self.inner.flush()
    }

    /// Close the writer and return the sink.
    pub fn finish(mut self) -> io::Result<W> {
        self.close()?;
        Ok(self.inner)
    }
}

impl<W: Write> Write for LzfWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.ensure_open()?;
        let mut rest = buf;
        while !rest.is_empty() {
            if self.pending.is_empty() && rest.len() >= self.block_size {
                let (chunk, tail) = rest.split_at(self.block_size);
                self.emit(chunk)?;
                rest = tail;
                continue;
            }
            let take = (self.block_size - self.pending.len()).min(rest.len());
            self.pending.extend_from_slice(&rest[..take]);
            rest = &rest[take..];
            if self.pending.len() == self.block_size {
                self.emit_pending()?;
            }
        }
        Ok(buf.len())
    }

    /// Emit buffered bytes as a (possibly short) chunk and flush the sink.
    fn flush(&mut self) -> io::Result<()> {
        self.ensure_open()?;
        self.emit_pending()?;
        self.inner.flush()
    }
}
