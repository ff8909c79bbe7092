//! Dynamic secret (`ds`) header generation.
//!
//! Every request carries `ds: <t>,<r>,<md5>` where the digest covers the salt,
//! the current Unix time and a six character nonce. Tokens go stale quickly,
//! so one is generated per request and never stored.

use chrono::Utc;
use md5::{Digest, Md5};
use rand::seq::SliceRandom;

/// Salt expected by the 1.5.0 web client.
pub const DS_SALT: &str = "6cqshh5dhw73bzxn20oexa9k516chk7s";

const NONCE_CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";
const NONCE_LEN: usize = 6;

/// Creates a new ds token for the current second with a random nonce.
pub fn ds_token(salt: &str) -> String {
    let t = Utc::now().timestamp();
    ds_token_with(salt, t, &random_nonce())
}

/// Builds the token for an explicit timestamp and nonce.
pub fn ds_token_with(salt: &str, t: i64, r: &str) -> String {
    let mut hasher = Md5::new();
    hasher.update(format!("salt={salt}&t={t}&r={r}").as_bytes());
    let c = format!("{:x}", hasher.finalize());
    format!("{t},{r},{c}")
}

/// Six distinct characters from `[a-z0-9]`.
pub fn random_nonce() -> String {
    let mut rng = rand::thread_rng();
    NONCE_CHARSET
        .choose_multiple(&mut rng, NONCE_LEN)
        .map(|&b| b as char)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use regex::Regex;

    #[test]
    fn test_token_shape() {
        let re = Regex::new(r"^\d+,[a-z0-9]{6},[0-9a-f]{32}$").unwrap();
        for _ in 0..50 {
            let token = ds_token(DS_SALT);
            assert!(re.is_match(&token), "bad token: {token}");
        }
    }

    #[test]
    fn test_known_digest() {
        let token = ds_token_with(DS_SALT, 1_600_000_000, "abc123");
        assert_eq!(token, "1600000000,abc123,6f615e92991ff87e8c0d22dec697ede9");
    }

    #[test]
    fn test_md5_of_empty_input_matches_reference() {
        let mut hasher = Md5::new();
        hasher.update(b"");
        assert_eq!(format!("{:x}", hasher.finalize()), "d41d8cd98f00b204e9800998ecf8427e");
    }

    #[test]
    fn test_different_nonce_different_digest() {
        let a = ds_token_with(DS_SALT, 1_600_000_000, "abc123");
        let b = ds_token_with(DS_SALT, 1_600_000_000, "abc124");
        assert_ne!(a.rsplit(',').next(), b.rsplit(',').next());
    }

    #[test]
    fn test_salt_changes_digest() {
        let a = ds_token_with(DS_SALT, 1_600_000_000, "abc123");
        let b = ds_token_with("other", 1_600_000_000, "abc123");
        assert_ne!(a, b);
    }

    #[test]
    fn test_nonce_has_distinct_characters() {
        for _ in 0..50 {
            let nonce = random_nonce();
            assert_eq!(nonce.len(), 6);
            let mut chars: Vec<char> = nonce.chars().collect();
            chars.sort_unstable();
            chars.dedup();
            assert_eq!(chars.len(), 6, "repeated char in {nonce}");
        }
    }
}
