//! Bloom filter over byte strings with enhanced double hashing.
//!
//! A single 64-bit fingerprint is split into `h1` (high half) and `h2` (low
//! half). Round 0 probes `h1 mod m`; every later round steps the previous
//! position by `h2`, again mod `m`. Round 0 always runs, so a filter built
//! with `hash_count == 0` still probes exactly one bucket. Use
//! [`crate::config::ZeroHashPolicy::Reject`] to refuse such filters up front.

use std::fmt;
use std::ops::{Bound, RangeBounds};

use crate::bits::BitArray;
use crate::errors::{BloomError, Result};
use crate::hash::{Fingerprint, Xxh3Fingerprint};

pub struct BloomFilter<H = Xxh3Fingerprint> {
    pub(crate) hash_count: u8,
    pub(crate) bits: BitArray,
    pub(crate) hasher: H,
}

impl BloomFilter<Xxh3Fingerprint> {
    /// Zeroed filter with `bucket_count` bits and `hash_count` probes per key.
    ///
    /// # Panics
    ///
    /// Panics if `bucket_count == 0`; use [`BloomFilter::try_new`] for
    /// parameters that come from outside the program.
    pub fn new(bucket_count: u32, hash_count: u8) -> Self {
        Self::with_hasher(bucket_count, hash_count, Xxh3Fingerprint)
    }

    pub fn try_new(bucket_count: u32, hash_count: u8) -> Result<Self> {
        Self::try_with_hasher(bucket_count, hash_count, Xxh3Fingerprint)
    }
}

impl<H: Fingerprint> BloomFilter<H> {
    pub fn with_hasher(bucket_count: u32, hash_count: u8, hasher: H) -> Self {
        assert!(bucket_count > 0, "bloom filter needs at least one bucket");
        tracing::trace!(bucket_count, hash_count, "bloom filter created");
        Self { hash_count, bits: BitArray::new(bucket_count), hasher }
    }

    pub fn try_with_hasher(bucket_count: u32, hash_count: u8, hasher: H) -> Result<Self> {
        if bucket_count == 0 {
            return Err(BloomError::InvalidConfig("bucket_count must be at least 1".into()));
        }
        Ok(Self::with_hasher(bucket_count, hash_count, hasher))
    }

    #[inline]
    pub fn bucket_count(&self) -> u32 { self.bits.len() }

    #[inline]
    pub fn hash_count(&self) -> u8 { self.hash_count }

    /// Raw bit buffer, `ceil(bucket_count / 8)` bytes.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] { self.bits.as_bytes() }

    /// Number of set bits. Diagnostic only.
    pub fn bits_set(&self) -> u64 { self.bits.count_ones() }

    pub fn hasher(&self) -> &H { &self.hasher }

    /// Bucket positions probed for `key`, in round order.
    pub fn probe_positions(&self, key: &[u8]) -> Probes {
        Probes::new(self.hasher.hash64(key), self.bucket_count(), self.hash_count)
    }

    pub fn add(&mut self, key: &[u8]) {
        let probes = self.probe_positions(key);
        for pos in probes {
            self.bits.set(pos);
        }
    }

    /// `false` means `key` was never added; `true` means it possibly was.
    pub fn contains(&self, key: &[u8]) -> bool {
        self.probe_positions(key).all(|pos| self.bits.get(pos))
    }

    /// Tests the sub-slice of `buf` selected by `range` without copying it.
    ///
    /// Out-of-bounds ranges are clamped to the buffer, and an inverted range
    /// tests the empty string.
    pub fn contains_range<R: RangeBounds<usize>>(&self, buf: &[u8], range: R) -> bool {
        let len = buf.len();
        let begin = match range.start_bound() {
            Bound::Included(&b) => b,
            Bound::Excluded(&b) => b.saturating_add(1),
            Bound::Unbounded => 0,
        }
        .min(len);
        let end = match range.end_bound() {
            Bound::Included(&e) => e.saturating_add(1),
            Bound::Excluded(&e) => e,
            Bound::Unbounded => len,
        }
        .min(len)
        .max(begin);
        self.contains(&buf[begin..end])
    }
}

impl<H: Clone> Clone for BloomFilter<H> {
    fn clone(&self) -> Self {
        Self { hash_count: self.hash_count, bits: self.bits.clone(), hasher: self.hasher.clone() }
    }
}

impl<H> PartialEq for BloomFilter<H> {
    fn eq(&self, other: &Self) -> bool {
        self.hash_count == other.hash_count && self.bits == other.bits
    }
}

impl<H> fmt::Debug for BloomFilter<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BloomFilter")
            .field("bucket_count", &self.bits.len())
            .field("hash_count", &self.hash_count)
            .field("bits_set", &self.bits.count_ones())
            .finish()
    }
}

/// Probe sequence for one fingerprint.
#[derive(Clone, Debug)]
pub struct Probes {
    pos: u64,
    step: u64,
    buckets: u64,
    remaining: u16,
}

impl Probes {
    fn new(fingerprint: u64, bucket_count: u32, hash_count: u8) -> Self {
        let buckets = bucket_count as u64;
        let h1 = fingerprint >> 32;
        let h2 = fingerprint & 0xffff_ffff;
        Self {
            pos: h1 % buckets,
            step: h2 % buckets,
            buckets,
            // round 0 runs even when hash_count == 0
            remaining: (hash_count as u16).max(1),
        }
    }
}

impl Iterator for Probes {
    type Item = u32;

    #[inline]
    fn next(&mut self) -> Option<u32> {
        if self.remaining == 0 {
            return None;
        }
        let cur = self.pos as u32;
        self.remaining -= 1;
        self.pos = (self.pos + self.step) % self.buckets;
        Some(cur)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining as usize, Some(self.remaining as usize))
    }
}

impl ExactSizeIterator for Probes {}
