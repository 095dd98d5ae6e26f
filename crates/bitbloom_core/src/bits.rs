//! Fixed-width bit storage, LSB-first within each byte.

use crate::consts::bytes_for_buckets;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BitArray {
    len: u32,
    bytes: Box<[u8]>,
}

impl BitArray {
    /// All-zero array of `len` bits.
    pub fn new(len: u32) -> Self {
        Self { len, bytes: vec![0u8; bytes_for_buckets(len)].into_boxed_slice() }
    }

    /// Number of addressable bits.
    #[inline]
    pub fn len(&self) -> u32 { self.len }

    #[inline]
    pub fn is_empty(&self) -> bool { self.len == 0 }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] { &self.bytes }

    #[inline]
    pub fn set(&mut self, i: u32) {
        assert!(i < self.len, "bit index {i} out of range for {} buckets", self.len);
        self.bytes[(i / 8) as usize] |= 1u8 << (i % 8);
    }

    #[inline]
    pub fn get(&self, i: u32) -> bool {
        assert!(i < self.len, "bit index {i} out of range for {} buckets", self.len);
        self.bytes[(i / 8) as usize] & (1u8 << (i % 8)) != 0
    }

    /// Overwrites the leading bytes with `src`, copying at most `byte_len()` bytes.
    /// Returns how many bytes were copied; the rest of the buffer is untouched.
    pub fn copy_from(&mut self, src: &[u8]) -> usize {
        let n = src.len().min(self.bytes.len());
        self.bytes[..n].copy_from_slice(&src[..n]);
        n
    }

    pub(crate) fn bytes_mut(&mut self) -> &mut [u8] { &mut self.bytes }

    #[inline]
    pub fn byte_len(&self) -> usize { self.bytes.len() }

    /// Population count over the whole buffer.
    pub fn count_ones(&self) -> u64 {
        self.bytes.iter().map(|b| b.count_ones() as u64).sum()
    }
}
