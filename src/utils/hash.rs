//! Short hash generation.

use rand::Rng;

/// Alphabet for generated hashes: 62 alphanumeric symbols.
const ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Length of a generated hash.
pub const HASH_LENGTH: usize = 6;

/// Generates a random 6-character alphanumeric hash.
///
/// The 62^6 value space makes per-draw collisions negligible; uniqueness
/// against the store is enforced by
/// [`crate::application::services::HashAllocator`].
pub fn generate_hash() -> String {
    let mut rng = rand::rng();

    (0..HASH_LENGTH)
        .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())] as char)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_generate_hash_length() {
        assert_eq!(generate_hash().len(), HASH_LENGTH);
    }

    #[test]
    fn test_generate_hash_alphanumeric() {
        let hash = generate_hash();
        assert!(hash.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_generate_hash_produces_distinct_values() {
        let mut hashes = HashSet::new();

        for _ in 0..1000 {
            hashes.insert(generate_hash());
        }

        // 1000 draws from a 62^6 space collide with probability ~1e-5.
        assert!(hashes.len() >= 999);
    }
}
