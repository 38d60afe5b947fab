//! Portable LZF token-stream encoder.
//!
//! Turns one chunk of input (at most [`MAX_CHUNK_LEN`] bytes) into an LZF
//! token stream using bounds-checked indexing throughout.  The optimized
//! encoder in [`super::compress_fast`] implements the same parse with raw
//! pointers and must emit identical bytes.
//!
//! # Token layout
//!
//! | Control byte | Meaning |
//! |---|---|
//! | `000LLLLL` | literal run of `L + 1` bytes follows |
//! | `LLLooooo` + `oooooooo` | backreference, length `L + 2`, offset `o + 1` |
//! | `111ooooo` + `LLLLLLLL` + `oooooooo` | backreference, length `L + 9`, offset `o + 1` |
//!
//! Literal runs are written behind a one-byte placeholder that is patched
//! once the run length is known; a placeholder that ends up covering no
//! literals is dropped again.
//!
//! [`MAX_CHUNK_LEN`]: crate::chunk::MAX_CHUNK_LEN

use super::match_finder::{Match, MatchFinder};
use super::types::{LEN_EXTENDED, MAX_LITERAL};

/// Upper bound on the token-stream size for `input_len` bytes, including the
/// transient literal placeholder.
#[inline]
pub fn max_token_len(input_len: usize) -> usize {
    input_len + input_len / MAX_LITERAL + 2
}

// ─────────────────────────────────────────────────────────────────────────────
// Token writers
// ─────────────────────────────────────────────────────────────────────────────

/// Append the 2- or 3-byte backreference for `m`.
#[inline]
pub fn write_backref(dst: &mut Vec<u8>, m: Match) {
    let off = m.distance - 1;
    let len = m.len - 2;
    if len < LEN_EXTENDED {
        dst.push(((off >> 8) | (len << 5)) as u8);
    } else {
        dst.push(((off >> 8) | (LEN_EXTENDED << 5)) as u8);
        dst.push((len - LEN_EXTENDED) as u8);
    }
    dst.push(off as u8);
}

/// Literal-run bookkeeping: where the current control byte lives and how
/// many literals follow it.
struct LiteralRun {
    ctrl_at: usize,
    count: usize,
}

impl LiteralRun {
    fn open(dst: &mut Vec<u8>) -> Self {
        let ctrl_at = dst.len();
        dst.push(0);
        LiteralRun { ctrl_at, count: 0 }
    }

    #[inline]
    fn push(&mut self, dst: &mut Vec<u8>, byte: u8) {
        dst.push(byte);
        self.count += 1;
        if self.count == MAX_LITERAL {
            dst[self.ctrl_at] = (MAX_LITERAL - 1) as u8;
            *self = LiteralRun::open(dst);
        }
    }

    /// Patch the control byte, or drop it if the run is empty.
    fn close(self, dst: &mut Vec<u8>) {
        if self.count == 0 {
            dst.pop();
        } else {
            dst[self.ctrl_at] = (self.count - 1) as u8;
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Chunk encoder
// ─────────────────────────────────────────────────────────────────────────────

/// Append the LZF token stream for `src` to `dst` and return its length.
///
/// Never fails.  An empty `src` produces no tokens.  The caller decides
/// whether the result is small enough to be worth storing compressed.
pub fn compress_block(src: &[u8], finder: &mut MatchFinder, dst: &mut Vec<u8>) -> usize {
    let start = dst.len();
    finder.reset(src.len());
    let limit = MatchFinder::scan_limit(src.len());

    let mut run = LiteralRun::open(dst);
    let mut pos = 0usize;
    while pos < limit {
        match finder.find(src, pos) {
            None => {
                run.push(dst, src[pos]);
                pos += 1;
            }
            Some(m) => {
                run.close(dst);
                write_backref(dst, m);
                pos += m.len;
                finder.insert(src, pos - 2);
                finder.insert(src, pos - 1);
                run = LiteralRun::open(dst);
            }
        }
    }
    for &byte in &src[pos..] {
        run.push(dst, byte);
    }
    run.close(dst);

    dst.len() - start
}
