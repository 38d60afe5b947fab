//! Hash-based match search over a single chunk.
//!
//! The finder hashes the 3 bytes at the scan position, swaps the hash slot
//! with the current position, and accepts the previous occupant when it
//! lies behind the scan position within [`MAX_OFF`] bytes and really starts
//! with the same 3 bytes.  The match is then extended byte-by-byte up to
//! [`MAX_REF`] bytes.
//!
//! Matching is greedy: the first acceptable candidate is taken and the
//! scan jumps past it.  Only the last two positions covered by a match are
//! hashed afterwards, which keeps long matches cheap at a small cost in
//! ratio.

use super::types::{hash3, read24, HashTable, MAX_OFF, MAX_REF, MIN_MATCH, TAIL_LENGTH};

/// A backreference candidate accepted by the finder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Match {
    /// Distance back from the scan position (1..=MAX_OFF).
    pub distance: usize,
    /// Number of bytes the backreference covers (MIN_MATCH..=MAX_REF).
    pub len: usize,
}

/// Greedy single-candidate match finder.
///
/// Owns the hash table for one encode pass.  Call [`reset`](MatchFinder::reset)
/// with the chunk length before scanning a new chunk.
#[derive(Debug, Clone, Default)]
pub struct MatchFinder {
    table: HashTable,
}

impl MatchFinder {
    pub fn new() -> Self {
        MatchFinder {
            table: HashTable::new(),
        }
    }

    /// Clear all recorded positions and size the table for `chunk_len`.
    pub fn reset(&mut self, chunk_len: usize) {
        self.table.reset(chunk_len);
    }

    /// Mutable access to the underlying table (for the optimized encoder).
    #[inline]
    pub(crate) fn table_mut(&mut self) -> &mut HashTable {
        &mut self.table
    }

    /// Position past which no match may start for a chunk of `len` bytes.
    #[inline]
    pub fn scan_limit(len: usize) -> usize {
        len.saturating_sub(TAIL_LENGTH)
    }

    /// Look for a match starting at `pos` and record `pos` in the table.
    ///
    /// `pos` must be below [`scan_limit`](MatchFinder::scan_limit) for
    /// `src.len()`.  The match never extends into the last two bytes of
    /// `src`, so the follow-up [`insert`](MatchFinder::insert) calls after a
    /// match always have 3 readable bytes.
    pub fn find(&mut self, src: &[u8], pos: usize) -> Option<Match> {
        let slot = hash3(read24(src, pos), self.table.mask());
        let candidate = self.table.replace(slot, pos) as usize;

        if candidate >= pos {
            return None;
        }
        let distance = pos - candidate;
        if distance > MAX_OFF {
            return None;
        }
        if src[candidate..candidate + MIN_MATCH] != src[pos..pos + MIN_MATCH] {
            return None;
        }

        let max_len = (src.len() - pos - 2).min(MAX_REF);
        let mut len = MIN_MATCH;
        while len < max_len && src[candidate + len] == src[pos + len] {
            len += 1;
        }
        Some(Match { distance, len })
    }

    /// Record `pos` without searching.
    #[inline]
    pub fn insert(&mut self, src: &[u8], pos: usize) {
        let slot = hash3(read24(src, pos), self.table.mask());
        self.table.put(slot, pos);
    }
}
