//! Task id generation.
//!
//! Ids are opaque: 8 bytes from the OS random source, hex encoded. If the OS
//! source is unavailable the id degrades to a base-36 timestamp plus a short
//! pseudo-random suffix. Neither form is checked against existing ids.

use std::{
    collections::hash_map::DefaultHasher,
    hash::{Hash, Hasher},
    sync::atomic::{AtomicU64, Ordering},
    time::{SystemTime, UNIX_EPOCH},
};

const ID_BYTES: usize = 8;
const FALLBACK_SUFFIX_LEN: usize = 6;
const BASE36: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

static FALLBACK_COUNTER: AtomicU64 = AtomicU64::new(0);

pub fn generate_id() -> String {
    let mut bytes = [0u8; ID_BYTES];
    match getrandom::getrandom(&mut bytes) {
        Ok(()) => hex::encode(bytes),
        Err(e) => {
            tracing::warn!(error = %e, "OS random source unavailable, using timestamp id");
            fallback_id()
        }
    }
}

fn fallback_id() -> String {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();

    let mut hasher = DefaultHasher::new();
    now.as_nanos().hash(&mut hasher);
    FALLBACK_COUNTER.fetch_add(1, Ordering::Relaxed).hash(&mut hasher);
    std::thread::current().id().hash(&mut hasher);

    let suffix: String = to_base36(u128::from(hasher.finish()))
        .chars()
        .rev()
        .take(FALLBACK_SUFFIX_LEN)
        .collect();
    format!(
        "{}{suffix:0>width$}",
        to_base36(now.as_millis()),
        width = FALLBACK_SUFFIX_LEN
    )
}

fn to_base36(mut n: u128) -> String {
    if n == 0 {
        return "0".to_string();
    }
    let mut digits = Vec::new();
    while n > 0 {
        digits.push(BASE36[(n % 36) as usize]);
        n /= 36;
    }
    digits.reverse();
    // Only ASCII digits from BASE36 were pushed.
    String::from_utf8_lossy(&digits).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn ids_are_fixed_length_hex() {
        let id = generate_id();
        assert_eq!(id.len(), ID_BYTES * 2);
        assert!(id.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn ids_are_distinct() {
        let ids: HashSet<String> = (0..1000).map(|_| generate_id()).collect();
        assert_eq!(ids.len(), 1000);
    }

    #[test]
    fn fallback_ids_are_base36_and_distinct() {
        let a = fallback_id();
        let b = fallback_id();
        assert_ne!(a, b);
        assert!(a.len() > FALLBACK_SUFFIX_LEN);
        assert!(a.bytes().all(|c| BASE36.contains(&c)));
    }

    #[test]
    fn base36_encoding() {
        assert_eq!(to_base36(0), "0");
        assert_eq!(to_base36(35), "z");
        assert_eq!(to_base36(36), "10");
        assert_eq!(to_base36(1_700_000_000_000), "loyw3v28");
    }
}
