use crate::consts::{DEFAULT_BUCKET_COUNT, DEFAULT_HASH_COUNT};
use crate::errors::{BloomError, Result};
use crate::filter::BloomFilter;
use crate::hash::{Fingerprint, Xxh3Fingerprint};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// What to do with `hash_count == 0`.
///
/// The probe loop always runs round 0, so a zero hash count still sets and
/// tests exactly one bucket per key. `SingleProbe` accepts that; `Reject`
/// makes [`FilterConfig::validate`] fail instead.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZeroHashPolicy {
    #[default]
    SingleProbe,
    Reject,
}

/// Filter parameters, e.g. loaded from `bloom.json`:
///
/// ```json
/// { "bucket_count": 1048576, "hash_count": 7, "zero_hash_policy": "reject" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterConfig {
    pub bucket_count: u32,
    pub hash_count: u8,
    #[serde(default)]
    pub zero_hash_policy: ZeroHashPolicy,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            bucket_count: DEFAULT_BUCKET_COUNT,
            hash_count: DEFAULT_HASH_COUNT,
            zero_hash_policy: ZeroHashPolicy::default(),
        }
    }
}

impl FilterConfig {
    pub fn new(bucket_count: u32, hash_count: u8) -> Self {
        Self { bucket_count, hash_count, ..Self::default() }
    }

    pub fn with_zero_hash_policy(mut self, policy: ZeroHashPolicy) -> Self {
        self.zero_hash_policy = policy;
        self
    }

    pub fn load(path: &Path) -> Result<Self> {
        let s = fs::read_to_string(path)?;
        let cfg: FilterConfig = serde_json::from_str(&s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        if self.bucket_count == 0 {
            return Err(BloomError::InvalidConfig("bucket_count must be at least 1".into()));
        }
        if self.hash_count == 0 && self.zero_hash_policy == ZeroHashPolicy::Reject {
            return Err(BloomError::InvalidConfig("hash_count must be at least 1".into()));
        }
        Ok(())
    }

    pub fn build(&self) -> Result<BloomFilter> {
        self.build_with_hasher(Xxh3Fingerprint)
    }

    pub fn build_with_hasher<H: Fingerprint>(&self, hasher: H) -> Result<BloomFilter<H>> {
        self.validate()?;
        Ok(BloomFilter::with_hasher(self.bucket_count, self.hash_count, hasher))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_validate() {
        let cfg = FilterConfig::default();
        cfg.validate().unwrap();
        let f = cfg.build().unwrap();
        assert_eq!(f.bucket_count(), 1 << 20);
        assert_eq!(f.hash_count(), 7);
    }

    #[test]
    fn zero_buckets_rejected() {
        let err = FilterConfig::new(0, 3).validate().unwrap_err();
        assert!(matches!(err, BloomError::InvalidConfig(_)));
    }

    #[test]
    fn zero_hashes_follow_policy() {
        let cfg = FilterConfig::new(64, 0);
        let f = cfg.build().unwrap();
        assert_eq!(f.hash_count(), 0);

        let strict = cfg.with_zero_hash_policy(ZeroHashPolicy::Reject);
        assert!(matches!(strict.build(), Err(BloomError::InvalidConfig(_))));
    }

    #[test]
    fn policy_defaults_when_missing() {
        let cfg: FilterConfig = serde_json::from_str(r#"{"bucket_count":64,"hash_count":4}"#).unwrap();
        assert_eq!(cfg, FilterConfig::new(64, 4));
        let cfg: FilterConfig =
            serde_json::from_str(r#"{"bucket_count":64,"hash_count":0,"zero_hash_policy":"reject"}"#).unwrap();
        assert_eq!(cfg.zero_hash_policy, ZeroHashPolicy::Reject);
    }

    #[test]
    fn load_from_file() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        tmp.write_all(br#"{"bucket_count":128,"hash_count":3}"#).unwrap();
        let cfg = FilterConfig::load(tmp.path()).unwrap();
        assert_eq!(cfg, FilterConfig::new(128, 3));

        let mut bad = tempfile::NamedTempFile::new().unwrap();
        bad.write_all(br#"{"bucket_count":0,"hash_count":3}"#).unwrap();
        assert!(matches!(FilterConfig::load(bad.path()), Err(BloomError::InvalidConfig(_))));

        let mut junk = tempfile::NamedTempFile::new().unwrap();
        junk.write_all(b"not json").unwrap();
        assert!(matches!(FilterConfig::load(junk.path()), Err(BloomError::SerdeJson(_))));
    }
}
