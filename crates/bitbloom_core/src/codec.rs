//! Wire format (big-endian):
//!
//!   bucket_count[4]  u32
//!   hash_count[1]    u8
//!   bits[ceil(bucket_count / 8)]
//!
//! Decoding tolerates a payload that does not match the bit buffer: missing
//! tail bytes stay zero, surplus bytes are ignored. Only a buffer too short to
//! hold the header is an error.

use std::io::{Read, Write};

use crate::consts::{bytes_for_buckets, BITS_OFFSET, BUCKET_COUNT_OFFSET, HASH_COUNT_OFFSET, HEADER_SIZE};
use crate::errors::{BloomError, Result};
use crate::filter::BloomFilter;
use crate::hash::{Fingerprint, Xxh3Fingerprint};
use crate::utils::{read_full, read_u32, read_u8, write_u32, write_u8};

/// Decoded header fields.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Header {
    pub bucket_count: u32,
    pub hash_count: u8,
}

impl Header {
    pub fn parse(buf: &[u8]) -> Result<Self> {
        if buf.len() < HEADER_SIZE {
            return Err(BloomError::InputTooShort { len: buf.len() });
        }
        let b = &buf[BUCKET_COUNT_OFFSET..HASH_COUNT_OFFSET];
        Ok(Self {
            bucket_count: u32::from_be_bytes([b[0], b[1], b[2], b[3]]),
            hash_count: buf[HASH_COUNT_OFFSET],
        })
    }

    pub fn bits_len(&self) -> usize { bytes_for_buckets(self.bucket_count) }

    fn check(&self) -> Result<()> {
        if self.bucket_count == 0 {
            return Err(BloomError::InvalidHeader("bucket_count is zero".into()));
        }
        Ok(())
    }
}

impl BloomFilter<Xxh3Fingerprint> {
    pub fn from_bytes(buf: &[u8]) -> Result<Self> {
        Self::from_bytes_with_hasher(buf, Xxh3Fingerprint)
    }

    pub fn read_from<R: Read>(r: &mut R) -> Result<Self> {
        Self::read_from_with_hasher(r, Xxh3Fingerprint)
    }
}

impl<H: Fingerprint> BloomFilter<H> {
    /// Encoded size: header plus bit buffer.
    pub fn serialized_len(&self) -> usize { HEADER_SIZE + self.bits.byte_len() }

    pub fn header(&self) -> Header {
        Header { bucket_count: self.bucket_count(), hash_count: self.hash_count }
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.serialized_len());
        out.extend_from_slice(&self.bucket_count().to_be_bytes());
        out.push(self.hash_count);
        out.extend_from_slice(self.bits.as_bytes());
        out
    }

    pub fn write_to<W: Write>(&self, w: &mut W) -> Result<()> {
        write_u32(w, self.bucket_count())?;
        write_u8(w, self.hash_count)?;
        w.write_all(self.bits.as_bytes())?;
        Ok(())
    }

    pub fn from_bytes_with_hasher(buf: &[u8], hasher: H) -> Result<Self> {
        let hdr = Header::parse(buf)?;
        hdr.check()?;
        let mut f = Self::with_hasher(hdr.bucket_count, hdr.hash_count, hasher);
        let payload = &buf[BITS_OFFSET..];
        let copied = f.bits.copy_from(payload);
        log_payload_mismatch(&hdr, payload.len(), copied);
        Ok(f)
    }

    pub fn read_from_with_hasher<R: Read>(r: &mut R, hasher: H) -> Result<Self> {
        let mut head = [0u8; HEADER_SIZE];
        let got = read_full(r, &mut head)?;
        if got < HEADER_SIZE {
            return Err(BloomError::InputTooShort { len: got });
        }
        let mut cur = &head[..];
        let hdr = Header { bucket_count: read_u32(&mut cur)?, hash_count: read_u8(&mut cur)? };
        hdr.check()?;
        let mut f = Self::with_hasher(hdr.bucket_count, hdr.hash_count, hasher);
        // surplus bytes stay in the reader
        let copied = read_full(r, f.bits.bytes_mut())?;
        log_payload_mismatch(&hdr, copied, copied);
        Ok(f)
    }
}

fn log_payload_mismatch(hdr: &Header, payload_len: usize, copied: usize) {
    let want = hdr.bits_len();
    if payload_len < want {
        tracing::debug!(
            bucket_count = hdr.bucket_count,
            want,
            got = payload_len,
            "short bloom payload, zero-filling tail"
        );
    } else if payload_len > want {
        tracing::debug!(
            bucket_count = hdr.bucket_count,
            want,
            got = payload_len,
            ignored = payload_len - copied,
            "long bloom payload, ignoring surplus"
        );
    }
}
