//! LZF token constants, hashing, the position hash table, and the raw memory
//! helpers used by the optimized encoder and decoder.
//!
//!   - Token-format constants (literal run ceiling, offset window, match span)
//!   - Encoder tuning constants (tail reservation, minimum compressible size)
//!   - `hash3` and [`HashTable`]: positions indexed by a 3-byte prefix hash
//!   - Unaligned read helpers and `nb_common_bytes` (match-length helpers)

// ─────────────────────────────────────────────────────────────────────────────
// Token-format constants
// ─────────────────────────────────────────────────────────────────────────────

/// Longest literal run a single control byte can announce (`000LLLLL`, L+1).
pub const MAX_LITERAL: usize = 32;

/// Control bytes below this value start a literal run.
pub const LITERAL_CTRL_LIMIT: u8 = MAX_LITERAL as u8;

/// Largest backward distance a backreference can encode (13-bit offset + 1).
pub const MAX_OFF: usize = 1 << 13;

/// Shortest match worth encoding as a backreference.
pub const MIN_MATCH: usize = 3;

/// Length value stored in the top three control bits that signals an extra
/// length byte follows.
pub const LEN_EXTENDED: usize = 7;

/// Longest match a backreference can encode: (7 + 255) + 2.
pub const MAX_REF: usize = LEN_EXTENDED + 255 + 2;

// ─────────────────────────────────────────────────────────────────────────────
// Encoder tuning constants
// ─────────────────────────────────────────────────────────────────────────────

/// The last `TAIL_LENGTH` bytes of a chunk never start a match.
pub const TAIL_LENGTH: usize = 4;

/// Chunks shorter than this are always stored raw.
pub const MIN_BLOCK_TO_COMPRESS: usize = 16;

/// Smallest hash table, in slots.
pub const MIN_HASH_SIZE: usize = 256;

/// Largest hash table, in slots (64 KiB of `u32`).
pub const MAX_HASH_SIZE: usize = 1 << 14;

/// Multiplier of the prefix hash.
const HASH_PRIME: u32 = 57_321;

// ─────────────────────────────────────────────────────────────────────────────
// Hashing
// ─────────────────────────────────────────────────────────────────────────────

/// Number of hash slots used for a chunk of `chunk_len` bytes: the next
/// power of two at or above twice the chunk length, kept within
/// `MIN_HASH_SIZE..=MAX_HASH_SIZE`.
pub fn hash_len_for(chunk_len: usize) -> usize {
    let want = chunk_len.saturating_mul(2);
    if want >= MAX_HASH_SIZE {
        return MAX_HASH_SIZE;
    }
    let mut len = MIN_HASH_SIZE;
    while len < want {
        len <<= 1;
    }
    len
}

/// Pack the 3 bytes at `src[pos..pos + 3]` into the low 24 bits of a `u32`.
#[inline(always)]
pub fn read24(src: &[u8], pos: usize) -> u32 {
    (src[pos] as u32) << 16 | (src[pos + 1] as u32) << 8 | src[pos + 2] as u32
}

/// Hash a 24-bit prefix into a slot index under `mask`.
#[inline(always)]
pub fn hash3(prefix: u32, mask: usize) -> usize {
    (prefix.wrapping_mul(HASH_PRIME) >> 9) as usize & mask
}

// ─────────────────────────────────────────────────────────────────────────────
// Hash table
// ─────────────────────────────────────────────────────────────────────────────

/// Slot marking "no position recorded".
pub const EMPTY_SLOT: u32 = u32::MAX;

/// Fixed-size arena of input positions indexed by prefix hash.
///
/// One entry per bucket: inserting overwrites the previous occupant.  Entries
/// are plain indices into the chunk being encoded, never pointers, so the
/// table carries no borrow of the input.  [`HashTable::reset`] must be called
/// before each chunk; positions from an earlier chunk are meaningless.
#[derive(Debug, Clone)]
pub struct HashTable {
    slots: Vec<u32>,
    mask: usize,
}

impl HashTable {
    /// Empty table; sized on the first [`reset`](HashTable::reset).
    pub fn new() -> Self {
        HashTable {
            slots: Vec::new(),
            mask: 0,
        }
    }

    /// Size the table for a chunk of `chunk_len` bytes and clear every slot.
    ///
    /// The allocation is reused when it is already large enough.
    pub fn reset(&mut self, chunk_len: usize) {
        let len = hash_len_for(chunk_len);
        self.slots.clear();
        self.slots.resize(len, EMPTY_SLOT);
        self.mask = len - 1;
    }

    /// Current slot mask (`len - 1`).
    #[inline(always)]
    pub fn mask(&self) -> usize {
        self.mask
    }

    /// Number of slots.
    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Record `pos` in `slot` and return the previous occupant.
    #[inline(always)]
    pub fn replace(&mut self, slot: usize, pos: usize) -> u32 {
        core::mem::replace(&mut self.slots[slot], pos as u32)
    }

    /// Record `pos` in `slot`.
    #[inline(always)]
    pub fn put(&mut self, slot: usize, pos: usize) {
        self.slots[slot] = pos as u32;
    }

    /// Raw slot storage for the optimized encoder.
    #[inline(always)]
    pub(crate) fn slots_mut_ptr(&mut self) -> *mut u32 {
        self.slots.as_mut_ptr()
    }
}

impl Default for HashTable {
    fn default() -> Self {
        Self::new()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Memory read helpers (optimized path)
// ─────────────────────────────────────────────────────────────────────────────

/// Read a native-endian `u32` from an unaligned pointer.
///
/// # Safety
/// `ptr` must be valid for reads of at least 4 bytes.
#[inline(always)]
pub unsafe fn read32(ptr: *const u8) -> u32 {
    core::ptr::read_unaligned(ptr as *const u32)
}

/// Read a native-endian `u64` from an unaligned pointer.
///
/// # Safety
/// `ptr` must be valid for reads of at least 8 bytes.
#[inline(always)]
pub unsafe fn read64(ptr: *const u8) -> u64 {
    core::ptr::read_unaligned(ptr as *const u64)
}

/// Number of leading equal bytes given the XOR of two 8-byte words.
#[inline(always)]
pub fn nb_common_bytes(diff: u64) -> usize {
    debug_assert!(diff != 0);
    #[cfg(target_endian = "little")]
    {
        (diff.trailing_zeros() >> 3) as usize
    }
    #[cfg(not(target_endian = "little"))]
    {
        (diff.leading_zeros() >> 3) as usize
    }
}

/// Count equal bytes between `src[a..]` and `src[b..]`, stopping at `limit`
/// bytes.
///
/// # Safety
/// `base` must be valid for reads of `max(a, b) + limit` bytes.
#[inline(always)]
pub unsafe fn count_common(base: *const u8, a: usize, b: usize, limit: usize) -> usize {
    let pa = base.add(a);
    let pb = base.add(b);
    let mut n = 0usize;
    while n + 8 <= limit {
        let diff = read64(pa.add(n)) ^ read64(pb.add(n));
        if diff != 0 {
            return n + nb_common_bytes(diff);
        }
        n += 8;
    }
    while n < limit && *pa.add(n) == *pb.add(n) {
        n += 1;
    }
    n
}
