// crates/bitbloom_core/src/consts.rs

use core::mem::size_of;

/// Serialized header: u32 bucket count (BE) + u8 hash count.
pub const HEADER_SIZE: usize = size_of::<u32>() + size_of::<u8>();

pub const BUCKET_COUNT_OFFSET: usize = 0;
pub const HASH_COUNT_OFFSET: usize = 4;
pub const BITS_OFFSET: usize = HEADER_SIZE;

pub const DEFAULT_BUCKET_COUNT: u32 = 1 << 20;
pub const DEFAULT_HASH_COUNT: u8 = 7;

/// Number of bytes needed to hold `bucket_count` bits.
#[inline]
pub const fn bytes_for_buckets(bucket_count: u32) -> usize {
    (bucket_count as usize + 7) / 8
}

const _: () = { assert!(HEADER_SIZE == 5); };
