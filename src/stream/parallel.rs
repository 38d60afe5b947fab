//! Multi-threaded chunk encoding.
//!
//! Chunks are independent, so a batch of them can be encoded concurrently
//! and written back in input order.  Each rayon worker owns one
//! [`ChunkEncoder`] (via `map_init`), so no encoder state is shared.
//!
//! Output is byte-identical to the serial paths:
//! - [`encode_parallel`] equals [`crate::codec::encode_with`]
//! - [`ParallelLzfWriter`] equals [`LzfWriter`](super::LzfWriter) with the
//!   same block size

use std::io::{self, Write};
use std::mem;

use rayon::prelude::*;
use rayon::ThreadPool;

use crate::chunk::{LzfError, MAX_CHUNK_LEN};
use crate::codec::{ChunkEncoder, Strategy};
use crate::displaylevel;

use super::writer::check_block_size;

/// Encode each `block_size` slice of `input` on the current rayon pool and
/// return the framed chunks in input order.
fn encode_batch(input: &[u8], block_size: usize, strategy: Strategy) -> Vec<Vec<u8>> {
    input
        .par_chunks(block_size)
        .map_init(
            || ChunkEncoder::new(strategy),
            |encoder, chunk| {
                let mut out = Vec::with_capacity(chunk.len() + 8);
                encoder.encode_chunk(chunk, &mut out);
                out
            },
        )
        .collect()
}

/// Encode `input` using the global rayon pool.
pub fn encode_parallel(input: &[u8], strategy: Strategy) -> Vec<u8> {
    encode_batch(input, MAX_CHUNK_LEN, strategy).concat()
}

/// Resolve a worker count: 0 selects one worker per logical CPU.
pub fn resolve_workers(workers: usize) -> usize {
    if workers == 0 {
        num_cpus::get().max(1)
    } else {
        workers
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WriterState {
    Open,
    Closed,
}

/// Compressing writer that encodes batches of chunks on a dedicated pool.
///
/// Buffers `workers × block_size` bytes, then encodes the whole batch in
/// parallel and writes the chunks in order.  Same close/finish contract as
/// [`LzfWriter`](super::LzfWriter).
pub struct ParallelLzfWriter<W: Write> {
    inner: W,
    pool: ThreadPool,
    strategy: Strategy,
    block_size: usize,
    batch_len: usize,
    pending: Vec<u8>,
    state: WriterState,
    chunks_written: u64,
}

impl<W: Write> ParallelLzfWriter<W> {
    /// Wrap `sink` with `workers` encoder threads (0 = one per CPU).
    pub fn new(sink: W, block_size: usize, workers: usize) -> io::Result<Self> {
        Self::with_strategy(sink, block_size, workers, Strategy::optimal())
    }

    pub fn with_strategy(
        sink: W,
        block_size: usize,
        workers: usize,
        strategy: Strategy,
    ) -> io::Result<Self> {
        let block_size = check_block_size(block_size)?;
        let workers = resolve_workers(workers);
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .build()
            .map_err(|e| io::Error::other(format!("cannot start {} encoder threads: {}", workers, e)))?;
        displaylevel!(4, "lzf: parallel writer with {} workers, block {}\n", workers, block_size);
        Ok(ParallelLzfWriter {
            inner: sink,
            pool,
            strategy,
            block_size,
            batch_len: block_size * workers,
            pending: Vec::new(),
            state: WriterState::Open,
            chunks_written: 0,
        })
    }

    #[inline]
    pub fn workers(&self) -> usize {
        self.pool.current_num_threads()
    }

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

    fn ensure_open(&self) -> io::Result<()> {
        match self.state {
            WriterState::Open => Ok(()),
            WriterState::Closed => Err(LzfError::StreamClosed.into()),
        }
    }

    fn emit_batch(&mut self, batch: &[u8]) -> io::Result<()> {
        if batch.is_empty() {
            return Ok(());
        }
        let (block_size, strategy) = (self.block_size, self.strategy);
        let chunks = self.pool.install(|| encode_batch(batch, block_size, strategy));
        for chunk in &chunks {
            self.inner.write_all(chunk)?;
        }
        self.chunks_written += chunks.len() as u64;
        displaylevel!(4, "lzf: batch of {} chunks ({} bytes)\n", chunks.len(), batch.len());
        Ok(())
    }

    fn emit_pending(&mut self) -> io::Result<()> {
        let pending = mem::take(&mut self.pending);
        let result = self.emit_batch(&pending);
        self.pending = pending;
        self.pending.clear();
        result
    }

    /// Emit pending bytes, flush the sink, and release the batch buffer.
    /// Closing twice is a no-op.
    pub fn close(&mut self) -> io::Result<()> {
        if self.state == WriterState::Closed {
            return Ok(());
        }
        self.state = WriterState::Closed;
        let pending = mem::take(&mut self.pending);
        self.emit_batch(&pending)?;
        self.inner.flush()
    }

    pub fn finish(mut self) -> io::Result<W> {
        self.close()?;
        Ok(self.inner)
    }
}

impl<W: Write> Write for ParallelLzfWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.ensure_open()?;
        let mut rest = buf;
        while !rest.is_empty() {
            if self.pending.is_empty() && rest.len() >= self.batch_len {
                let (batch, tail) = rest.split_at(self.batch_len);
                self.emit_batch(batch)?;
                rest = tail;
                continue;
            }
            if self.pending.capacity() == 0 {
                self.pending.reserve_exact(self.batch_len);
            }
            let take = (self.batch_len - self.pending.len()).min(rest.len());
            self.pending.extend_from_slice(&rest[..take]);
            rest = &rest[take..];
            if self.pending.len() == self.batch_len {
                self.emit_pending()?;
            }
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.ensure_open()?;
        self.emit_pending()?;
        self.inner.flush()
    }
}
