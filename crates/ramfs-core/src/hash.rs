//! Key hashing for the open-addressed table.
//!
//! Paul Hsieh's SuperFastHash: 16-bit reads folded into a 32-bit state, a
//! tail step for the last one to three bytes, and a final avalanche so that
//! nearby keys spread across the whole table.

/// Hashes `data` to a well-distributed 32-bit value.
///
/// Deterministic across runs and platforms. The empty key hashes to `0`.
///
/// # Examples
///
/// ```
/// use ramfs_core::hash::super_fast_hash;
///
/// assert_eq!(super_fast_hash(b""), 0);
/// assert_eq!(super_fast_hash(b"docs"), super_fast_hash(b"docs"));
/// assert_ne!(super_fast_hash(b"docs"), super_fast_hash(b"doct"));
/// ```
#[must_use]
#[allow(clippy::cast_possible_truncation)] // length only seeds the state
pub fn super_fast_hash(data: &[u8]) -> u32 {
    if data.is_empty() {
        return 0;
    }

    let mut hash = data.len() as u32;
    let mut chunks = data.chunks_exact(4);

    for chunk in &mut chunks {
        hash = hash.wrapping_add(read_u16(chunk[0], chunk[1]));
        let tmp = (read_u16(chunk[2], chunk[3]) << 11) ^ hash;
        hash = (hash << 16) ^ tmp;
        hash = hash.wrapping_add(hash >> 11);
    }

    match *chunks.remainder() {
        [a, b, c] => {
            hash = hash.wrapping_add(read_u16(a, b));
            hash ^= hash << 16;
            hash ^= u32::from(c) << 18;
            hash = hash.wrapping_add(hash >> 11);
        }
        [a, b] => {
            hash = hash.wrapping_add(read_u16(a, b));
            hash ^= hash << 11;
            hash = hash.wrapping_add(hash >> 17);
        }
        [a] => {
            hash = hash.wrapping_add(u32::from(a));
            hash ^= hash << 10;
            hash = hash.wrapping_add(hash >> 1);
        }
        _ => {}
    }

    hash ^= hash << 3;
    hash = hash.wrapping_add(hash >> 5);
    hash ^= hash << 4;
    hash = hash.wrapping_add(hash >> 17);
    hash ^= hash << 25;
    hash = hash.wrapping_add(hash >> 6);

    hash
}

#[inline]
fn read_u16(lo: u8, hi: u8) -> u32 {
    u32::from(u16::from_le_bytes([lo, hi]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_key() {
        assert_eq!(super_fast_hash(b""), 0);
    }

    #[test]
    fn test_deterministic() {
        for key in ["a", "ab", "abc", "abcd", "abcde", "a much longer key"] {
            assert_eq!(super_fast_hash(key.as_bytes()), super_fast_hash(key.as_bytes()));
        }
    }

    #[test]
    fn test_tail_lengths_differ() {
        // Each remainder branch must contribute its bytes
        let hashes: Vec<u32> = ["abcd", "abcdx", "abcdxy", "abcdxyz"]
            .iter()
            .map(|k| super_fast_hash(k.as_bytes()))
            .collect();

        for (i, a) in hashes.iter().enumerate() {
            for b in &hashes[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_distribution_over_buckets() {
        const BUCKETS: usize = 64;
        const KEYS: usize = 6400;

        let mut counts = [0usize; BUCKETS];
        for i in 0..KEYS {
            let key = format!("file-{i}");
            counts[super_fast_hash(key.as_bytes()) as usize % BUCKETS] += 1;
        }

        let average = KEYS / BUCKETS;
        assert!(counts.iter().all(|&c| c > 0), "empty bucket: {counts:?}");
        assert!(
            counts.iter().all(|&c| c < average * 3),
            "skewed buckets: {counts:?}"
        );
    }
}
