//! Optimized LZF token-stream encoder.
//!
//! Same parse as [`super::compress::compress_block`] (hash, candidate rules,
//! literal splitting and post-match insertions all match) but
//! written against raw pointers: the output is reserved once up front and
//! filled without per-byte capacity checks, prefixes are read as unaligned
//! words, and match extension compares eight bytes at a time.
//!
//! The two encoders are interchangeable and must stay byte-identical; the
//! conformance tests in `e2e/strategy_equivalence.rs` enforce that.
//!
//! All `unsafe` blocks carry an explicit `// SAFETY:` comment.

use super::compress::max_token_len;
use super::match_finder::MatchFinder;
use super::types::{
    count_common, hash3, read32, LEN_EXTENDED, MAX_LITERAL, MAX_OFF, MAX_REF, MIN_MATCH,
};

/// Big-endian 24-bit prefix at `p`, read as one unaligned word.
///
/// # Safety
/// `p` must be valid for reads of 4 bytes.
#[inline(always)]
unsafe fn prefix_at(p: *const u8) -> u32 {
    u32::from_be(read32(p)) >> 8
}

/// Big-endian 24-bit prefix at `p`, read byte-by-byte.
///
/// # Safety
/// `p` must be valid for reads of 3 bytes.
#[inline(always)]
unsafe fn prefix_at_tail(p: *const u8) -> u32 {
    (*p as u32) << 16 | (*p.add(1) as u32) << 8 | *p.add(2) as u32
}

/// Append the LZF token stream for `src` to `dst` and return its length.
///
/// Output is identical to [`super::compress::compress_block`].
pub fn compress_block_fast(src: &[u8], finder: &mut MatchFinder, dst: &mut Vec<u8>) -> usize {
    let n = src.len();
    let start = dst.len();
    finder.reset(n);
    dst.reserve(max_token_len(n));

    let limit = MatchFinder::scan_limit(n);
    let table = finder.table_mut();
    let mask = table.mask();
    let slots = table.slots_mut_ptr();

    // SAFETY:
    // - `ip` covers `n` readable bytes.  Word reads at `pos` happen only while
    //   `pos < n - 4`; candidate reads only when `candidate < pos`.  Match
    //   extension stops at `pos + max_len <= n - 2`, and the post-match
    //   insertions read 3 bytes at `pos - 2` and `pos - 1` with `pos <= n - 2`.
    // - `slots` points at `mask + 1` initialised `u32`s and every index is
    //   produced by `hash3(.., mask)`.
    // - `op` never exceeds `start + max_token_len(n)`, which was reserved
    //   above; every byte below the final length is written before
    //   `set_len`.
    unsafe {
        let ip = src.as_ptr();
        let base = dst.as_mut_ptr();
        let mut op = start;

        let mut ctrl_at = op;
        op += 1;
        let mut literals = 0usize;

        let mut pos = 0usize;
        while pos < limit {
            let prefix = prefix_at(ip.add(pos));
            let slot = slots.add(hash3(prefix, mask));
            let candidate = *slot as usize;
            *slot = pos as u32;

            if candidate < pos
                && pos - candidate <= MAX_OFF
                && prefix_at(ip.add(candidate)) == prefix
            {
                let max_len = (n - pos - 2).min(MAX_REF);
                let len = MIN_MATCH
                    + count_common(ip, candidate + MIN_MATCH, pos + MIN_MATCH, max_len - MIN_MATCH);

                if literals == 0 {
                    op -= 1;
                } else {
                    *base.add(ctrl_at) = (literals - 1) as u8;
                    literals = 0;
                }

                let off = pos - candidate - 1;
                let code = len - 2;
                if code < LEN_EXTENDED {
                    *base.add(op) = ((off >> 8) | (code << 5)) as u8;
                    op += 1;
                } else {
                    *base.add(op) = ((off >> 8) | (LEN_EXTENDED << 5)) as u8;
                    *base.add(op + 1) = (code - LEN_EXTENDED) as u8;
                    op += 2;
                }
                *base.add(op) = off as u8;
                op += 1;

                pos += len;
                for p in [pos - 2, pos - 1] {
                    *slots.add(hash3(prefix_at_tail(ip.add(p)), mask)) = p as u32;
                }

                ctrl_at = op;
                op += 1;
                continue;
            }

            *base.add(op) = *ip.add(pos);
            op += 1;
            pos += 1;
            literals += 1;
            if literals == MAX_LITERAL {
                *base.add(ctrl_at) = (MAX_LITERAL - 1) as u8;
                ctrl_at = op;
                op += 1;
                literals = 0;
            }
        }

        while pos < n {
            *base.add(op) = *ip.add(pos);
            op += 1;
            pos += 1;
            literals += 1;
            if literals == MAX_LITERAL {
                *base.add(ctrl_at) = (MAX_LITERAL - 1) as u8;
                ctrl_at = op;
                op += 1;
                literals = 0;
            }
        }

        if literals == 0 {
            op -= 1;
        } else {
            *base.add(ctrl_at) = (literals - 1) as u8;
        }
        dst.set_len(op);
        op - start
    }
}
