//! Push-style decoder.
//!
//! [`Uncompressor`] is fed compressed bytes in pieces of any size, for
//! example as they arrive from a socket.  Headers and payloads are
//! reassembled across piece boundaries; each completed chunk is decoded and
//! handed to a [`DataHandler`].

use crate::chunk::{parse_header, ChunkHeader, ChunkType, LzfError, HEADER_LEN_COMPRESSED, LZF_MAGIC};
use crate::chunk::header::short_header_error;
use crate::chunk::types::HEADER_PREFIX_LEN;
use crate::codec::{ChunkDecoder, Strategy};

/// Receiver of decoded bytes.
pub trait DataHandler {
    /// Called once per decoded chunk.  Return `false` to stop decoding;
    /// later input is then ignored.
    fn handle_data(&mut self, data: &[u8]) -> bool;

    /// Called by [`Uncompressor::complete`] after the last chunk.
    fn all_data_handled(&mut self) {}
}

impl DataHandler for Vec<u8> {
    fn handle_data(&mut self, data: &[u8]) -> bool {
        self.extend_from_slice(data);
        true
    }
}

/// Incremental chunk decoder driving a [`DataHandler`].
pub struct Uncompressor<H: DataHandler> {
    handler: H,
    decoder: ChunkDecoder,
    header: [u8; HEADER_LEN_COMPRESSED],
    header_fill: usize,
    current: Option<ChunkHeader>,
    payload: Vec<u8>,
    decoded: Vec<u8>,
    stopped: bool,
}

impl<H: DataHandler> Uncompressor<H> {
    pub fn new(handler: H) -> Self {
        Self::with_strategy(handler, Strategy::optimal())
    }

    pub fn with_strategy(handler: H, strategy: Strategy) -> Self {
        Uncompressor {
            handler,
            decoder: ChunkDecoder::new(strategy),
            header: [0; HEADER_LEN_COMPRESSED],
            header_fill: 0,
            current: None,
            payload: Vec::new(),
            decoded: Vec::new(),
            stopped: false,
        }
    }

    /// `true` once the handler asked to stop.
    #[inline]
    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    pub fn handler(&self) -> &H {
        &self.handler
    }

    /// Header bytes required so far: the 3-byte prefix, then the full
    /// header once the type tag is known.
    fn header_needed(&self) -> Result<usize, LzfError> {
        if self.header_fill < HEADER_PREFIX_LEN {
            return Ok(HEADER_PREFIX_LEN);
        }
        if self.header[..2] != LZF_MAGIC {
            return Err(LzfError::MalformedChunk);
        }
        ChunkType::from_u8(self.header[2])
            .map(ChunkType::header_len)
            .ok_or(LzfError::MalformedChunk)
    }

    /// Consume the next piece of compressed input.
    pub fn feed(&mut self, mut data: &[u8]) -> Result<(), LzfError> {
        while !data.is_empty() && !self.stopped {
            let Some(header) = self.current else {
                let needed = self.header_needed()?;
                let take = (needed - self.header_fill).min(data.len());
                self.header[self.header_fill..self.header_fill + take].copy_from_slice(&data[..take]);
                self.header_fill += take;
                data = &data[take..];
                if self.header_fill == needed && needed > HEADER_PREFIX_LEN {
                    let (header, _) = parse_header(&self.header[..needed], 0)?;
                    self.current = Some(header);
                    self.payload.clear();
                } else if self.header_fill == HEADER_PREFIX_LEN {
                    // Validate the prefix now; raw headers may need no more bytes.
                    self.header_needed()?;
                }
                continue;
            };

            let take = (header.payload_len() - self.payload.len()).min(data.len());
            self.payload.extend_from_slice(&data[..take]);
            data = &data[take..];
            if self.payload.len() == header.payload_len() {
                self.decoded.clear();
                self.decoder.decode_chunk(&header, &self.payload, &mut self.decoded)?;
                self.current = None;
                self.header_fill = 0;
                if !self.handler.handle_data(&self.decoded) {
                    self.stopped = true;
                }
            }
        }
        Ok(())
    }

    /// Finish decoding and return the handler.
    ///
    /// Fails with [`LzfError::TruncatedInput`] when a chunk is only partly
    /// buffered, unless the handler stopped decoding early.
    pub fn complete(mut self) -> Result<H, LzfError> {
        if !self.stopped {
            if self.current.is_some() {
                return Err(LzfError::TruncatedInput);
            }
            if self.header_fill > 0 {
                return Err(short_header_error(&self.header[..self.header_fill]));
            }
        }
        self.handler.all_data_handled();
        Ok(self.handler)
    }
}
