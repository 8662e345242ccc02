use sha2::{Digest, Sha256};

/// Default half-width of the jitter range
pub const DEFAULT_SPREAD: u8 = 3;

/// Deterministic tie-breaking offset in `-spread..=spread`
///
/// Derived from the SHA-256 of `"{a}|{b}"`: the first two digest bytes,
/// big-endian, reduced modulo `2 * spread + 1`. Order of the keys matters.
pub fn stable_jitter(a: &str, b: &str, spread: u8) -> i32 {
    let digest = Sha256::digest(format!("{}|{}", a, b).as_bytes());
    let prefix = u16::from_be_bytes([digest[0], digest[1]]) as i32;
    let spread = spread as i32;

    prefix % (2 * spread + 1) - spread
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_values() {
        assert_eq!(stable_jitter("A", "B", 3), -1);
        assert_eq!(stable_jitter("B", "A", 3), 3);
        assert_eq!(stable_jitter("Ava", "Ray", 3), -3);
    }

    #[test]
    fn test_deterministic() {
        let first = stable_jitter("Ava", "Mia", DEFAULT_SPREAD);
        for _ in 0..100 {
            assert_eq!(stable_jitter("Ava", "Mia", DEFAULT_SPREAD), first);
        }
    }

    #[test]
    fn test_within_spread() {
        for spread in [0u8, 1, 3, 10] {
            for i in 0..200 {
                let j = stable_jitter(&format!("user-{}", i), "candidate", spread);
                assert!(j >= -(spread as i32) && j <= spread as i32);
            }
        }
    }

    #[test]
    fn test_zero_spread_is_identity() {
        assert_eq!(stable_jitter("x", "y", 0), 0);
    }
}
