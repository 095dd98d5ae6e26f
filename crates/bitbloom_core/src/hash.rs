//! 64-bit fingerprint oracles.
//!
//! The filter only needs a deterministic, well-mixed `hash64(bytes)`; any
//! implementation of [`Fingerprint`] can be plugged in.

pub trait Fingerprint {
    fn hash64(&self, bytes: &[u8]) -> u64;
}

/// xxh3-64, the default.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Xxh3Fingerprint;

impl Fingerprint for Xxh3Fingerprint {
    #[inline]
    fn hash64(&self, bytes: &[u8]) -> u64 { xxhash_rust::xxh3::xxh3_64(bytes) }
}

/// First 8 bytes of a blake3 digest, little-endian.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Blake3Fingerprint;

impl Fingerprint for Blake3Fingerprint {
    #[inline]
    fn hash64(&self, bytes: &[u8]) -> u64 {
        let h = blake3::hash(bytes);
        let mut out = [0u8; 8];
        out.copy_from_slice(&h.as_bytes()[..8]);
        u64::from_le_bytes(out)
    }
}

impl<F: Fn(&[u8]) -> u64> Fingerprint for F {
    #[inline]
    fn hash64(&self, bytes: &[u8]) -> u64 { self(bytes) }
}
