use bitbloom_core::{BitArray, BloomFilter};
use proptest::collection::vec;
use proptest::prelude::*;

fn key_sets() -> impl Strategy<Value = Vec<Vec<u8>>> {
    vec(vec(any::<u8>(), 0..32), 1..40)
}

fn set_bits(bytes: &[u8]) -> Vec<bool> {
    bytes.iter().flat_map(|b| (0..8).map(move |i| b & (1 << i) != 0)).collect()
}

proptest! {
    #[test]
    fn no_false_negatives(keys in key_sets(), buckets in 1u32..4096, hashes in 0u8..16) {
        let mut f = BloomFilter::new(buckets, hashes);
        for k in &keys {
            f.add(k);
        }
        for k in &keys {
            prop_assert!(f.contains(k));
        }
    }

    #[test]
    fn bits_only_grow(keys in key_sets(), buckets in 1u32..512, hashes in 1u8..8) {
        let mut f = BloomFilter::new(buckets, hashes);
        let mut seen: Vec<&Vec<u8>> = Vec::new();
        let mut prev = set_bits(f.as_bytes());
        for k in &keys {
            f.add(k);
            let cur = set_bits(f.as_bytes());
            for (was, now) in prev.iter().zip(&cur) {
                prop_assert!(!*was || *now);
            }
            seen.push(k);
            for s in &seen {
                prop_assert!(f.contains(s));
            }
            prev = cur;
        }
    }

    #[test]
    fn roundtrip_preserves_state(keys in key_sets(), probes in key_sets(), buckets in 1u32..2048, hashes in 0u8..12) {
        let mut f = BloomFilter::new(buckets, hashes);
        for k in &keys {
            f.add(k);
        }
        let bytes = f.to_bytes();
        prop_assert_eq!(bytes.len(), 5 + (buckets as usize + 7) / 8);
        let g = BloomFilter::from_bytes(&bytes).unwrap();
        prop_assert_eq!(g.bucket_count(), buckets);
        prop_assert_eq!(g.hash_count(), hashes);
        prop_assert_eq!(g.as_bytes(), f.as_bytes());
        for p in keys.iter().chain(&probes) {
            prop_assert_eq!(f.contains(p), g.contains(p));
        }
    }

    #[test]
    fn probes_are_deterministic(key in vec(any::<u8>(), 0..64), buckets in 1u32..100_000, hashes in 0u8..32) {
        let a = BloomFilter::new(buckets, hashes);
        let b = BloomFilter::new(buckets, hashes);
        let pa: Vec<u32> = a.probe_positions(&key).collect();
        let pb: Vec<u32> = b.probe_positions(&key).collect();
        prop_assert_eq!(&pa, &pb);
        prop_assert_eq!(pa.len(), (hashes as usize).max(1));
        prop_assert!(pa.iter().all(|&p| p < buckets));
    }

    #[test]
    fn truncated_payload_zero_fills(keys in key_sets(), buckets in 1u32..512, cut in 0usize..80) {
        let mut f = BloomFilter::new(buckets, 3);
        for k in &keys {
            f.add(k);
        }
        let bytes = f.to_bytes();
        let cut = (5 + cut).min(bytes.len());
        let g = BloomFilter::from_bytes(&bytes[..cut]).unwrap();
        let kept = cut - 5;
        prop_assert_eq!(&g.as_bytes()[..kept], &f.as_bytes()[..kept]);
        prop_assert!(g.as_bytes()[kept..].iter().all(|&b| b == 0));
    }

    #[test]
    fn bit_array_get_matches_set(idx in vec(0u32..300, 0..50)) {
        let mut b = BitArray::new(300);
        for &i in &idx {
            b.set(i);
        }
        for i in 0..300 {
            prop_assert_eq!(b.get(i), idx.contains(&i));
        }
    }
}
