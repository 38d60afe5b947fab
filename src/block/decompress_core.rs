//! LZF token-stream decoder core.
//!
//! Two replay loops over one compressed chunk payload:
//!   - [`decompress_block`]: portable, bounds-checked
//!   - [`decompress_block_fast`]: optimized, raw pointers into a pre-sized
//!     output
//!
//! # Security boundary
//!
//! Both loops run the same checks in the same order, so a malformed payload
//! is reported with the same [`LzfError`] by either of them:
//!
//! 1. literal run: run extends past the payload → `MalformedChunk`;
//!    run extends past `out_len` → `MalformedChunk`
//! 2. backreference: missing length/offset byte → `MalformedChunk`;
//!    offset beyond bytes decoded for this chunk → `InvalidBackreference`;
//!    copy extends past `out_len` → `MalformedChunk`
//! 3. payload exhausted with fewer than `out_len` bytes → `MalformedChunk`
//!
//! Overlapping backreferences (offset < length) are replayed one byte at a
//! time; each copied byte may be the source of a later one.  On error the
//! output buffer is restored to its length on entry.

use crate::chunk::LzfError;

use super::types::{LEN_EXTENDED, LITERAL_CTRL_LIMIT};

// ─────────────────────────────────────────────────────────────────────────────
// Portable decoder
// ─────────────────────────────────────────────────────────────────────────────

/// Decode the token stream `src` into `out_len` bytes appended to `dst`.
///
/// Backreferences may only reach bytes decoded for this chunk; bytes already
/// in `dst` before the call are not addressable.
pub fn decompress_block(src: &[u8], dst: &mut Vec<u8>, out_len: usize) -> Result<(), LzfError> {
    let base = dst.len();
    dst.reserve(out_len);
    let result = replay(src, dst, base, out_len);
    if result.is_err() {
        dst.truncate(base);
    }
    result
}

fn replay(src: &[u8], dst: &mut Vec<u8>, base: usize, out_len: usize) -> Result<(), LzfError> {
    let mut ip = 0usize;
    while ip < src.len() {
        let ctrl = src[ip];
        ip += 1;
        let produced = dst.len() - base;

        if ctrl < LITERAL_CTRL_LIMIT {
            let run = ctrl as usize + 1;
            if ip + run > src.len() || produced + run > out_len {
                return Err(LzfError::MalformedChunk);
            }
            dst.extend_from_slice(&src[ip..ip + run]);
            ip += run;
            continue;
        }

        let mut len = (ctrl >> 5) as usize;
        if len == LEN_EXTENDED {
            let extra = *src.get(ip).ok_or(LzfError::MalformedChunk)?;
            len += extra as usize;
            ip += 1;
        }
        len += 2;
        let low = *src.get(ip).ok_or(LzfError::MalformedChunk)?;
        ip += 1;
        let offset = (((ctrl & 0x1F) as usize) << 8 | low as usize) + 1;

        if offset > produced {
            return Err(LzfError::InvalidBackreference);
        }
        if produced + len > out_len {
            return Err(LzfError::MalformedChunk);
        }

        let from = dst.len() - offset;
        if offset >= len {
            dst.extend_from_within(from..from + len);
        } else {
            for i in 0..len {
                let byte = dst[from + i];
                dst.push(byte);
            }
        }
    }

    if dst.len() - base != out_len {
        return Err(LzfError::MalformedChunk);
    }
    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────────
// Optimized decoder
// ─────────────────────────────────────────────────────────────────────────────

/// Decode the token stream `src` into `out_len` bytes appended to `dst`.
///
/// Output and error behaviour are identical to [`decompress_block`].
pub fn decompress_block_fast(
    src: &[u8],
    dst: &mut Vec<u8>,
    out_len: usize,
) -> Result<(), LzfError> {
    let base = dst.len();
    dst.reserve(out_len);

    // SAFETY:
    // - `ip` only dereferences offsets `< src.len()`: every read is preceded by
    //   an explicit remaining-length check.
    // - `op` writes only offsets `< out_len` relative to `out`: every write is
    //   preceded by `produced + n <= out_len`, and `out_len` bytes were
    //   reserved past `base`.
    // - backreference sources start at `produced - offset >= 0` and are
    //   always already written; non-overlapping copies use
    //   `copy_nonoverlapping` only when `offset >= len`.
    // - `set_len` is reached only after exactly `out_len` bytes were written.
    unsafe {
        let ip_start = src.as_ptr();
        let src_len = src.len();
        let out = dst.as_mut_ptr().add(base);

        let mut ip = 0usize;
        let mut produced = 0usize;
        while ip < src_len {
            let ctrl = *ip_start.add(ip);
            ip += 1;

            if ctrl < LITERAL_CTRL_LIMIT {
                let run = ctrl as usize + 1;
                if ip + run > src_len || produced + run > out_len {
                    return Err(LzfError::MalformedChunk);
                }
                core::ptr::copy_nonoverlapping(ip_start.add(ip), out.add(produced), run);
                ip += run;
                produced += run;
                continue;
            }

            let mut len = (ctrl >> 5) as usize;
            if len == LEN_EXTENDED {
                if ip >= src_len {
                    return Err(LzfError::MalformedChunk);
                }
                len += *ip_start.add(ip) as usize;
                ip += 1;
            }
            len += 2;
            if ip >= src_len {
                return Err(LzfError::MalformedChunk);
            }
            let offset = (((ctrl & 0x1F) as usize) << 8 | *ip_start.add(ip) as usize) + 1;
            ip += 1;

            if offset > produced {
                return Err(LzfError::InvalidBackreference);
            }
            if produced + len > out_len {
                return Err(LzfError::MalformedChunk);
            }

            let from = out.add(produced - offset);
            let to = out.add(produced);
            if offset >= len {
                core::ptr::copy_nonoverlapping(from, to, len);
            } else {
                for i in 0..len {
                    *to.add(i) = *from.add(i);
                }
            }
            produced += len;
        }

        if produced != out_len {
            return Err(LzfError::MalformedChunk);
        }
        dst.set_len(base + out_len);
    }
    Ok(())
}
