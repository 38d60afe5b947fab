//! Streaming adapters over `std::io`.
//!
//! | Type | Direction | Notes |
//! |------|-----------|-------|
//! | [`LzfWriter`] | compress | chunks caller bytes at a fixed block size |
//! | [`ParallelLzfWriter`] | compress | same output, batches encoded on a rayon pool |
//! | [`LzfReader`] | decompress | pull-based, one chunk at a time |
//! | [`Uncompressor`] | decompress | push-based, input in arbitrary pieces |
//!
//! None of these types lock internally; each is meant for a single caller.
//! Codec errors surface as `io::Error` carrying an [`LzfError`] source,
//! recoverable with [`LzfError::from_io`].
//!
//! [`LzfError`]: crate::chunk::LzfError
//! [`LzfError::from_io`]: crate::chunk::LzfError::from_io

pub mod parallel;
pub mod reader;
pub mod uncompressor;
pub mod writer;

pub use parallel::{encode_parallel, ParallelLzfWriter};
pub use reader::LzfReader;
pub use uncompressor::{DataHandler, Uncompressor};
pub use writer::LzfWriter;
