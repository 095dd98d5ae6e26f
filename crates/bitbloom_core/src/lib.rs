//! Fixed-size Bloom filter over byte strings with a portable wire format.
//!
//! ```
//! use bitbloom_core::BloomFilter;
//!
//! let mut f = BloomFilter::new(64, 4);
//! f.add(b"hello");
//! assert!(f.contains(b"hello"));
//!
//! let bytes = f.to_bytes();
//! assert_eq!(bytes.len(), 13);
//! assert_eq!(BloomFilter::from_bytes(&bytes).unwrap(), f);
//! ```

pub mod consts;
pub mod errors;
pub mod utils;
pub mod bits;
pub mod hash;
pub mod filter;
pub mod codec;
pub mod config;
pub mod store;

pub use bits::BitArray;
pub use codec::Header;
pub use config::{FilterConfig, ZeroHashPolicy};
pub use errors::{BloomError, Result};
pub use filter::{BloomFilter, Probes};
pub use hash::{Blake3Fingerprint, Fingerprint, Xxh3Fingerprint};
