//! Password storage schemes

use std::str::FromStr;

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use rand::RngCore;
use sha2::{Digest, Sha256};

use crate::Error;

const HASH_VERSION: &str = "v1";

/// How passwords are written to and checked against the user collection
///
/// `Plaintext` stores and compares the password as entered.
/// `SaltedSha256` stores `v1$<salt>$<digest>` and still accepts records
/// written in plaintext.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PasswordScheme {
    #[default]
    Plaintext,
    SaltedSha256,
}

impl PasswordScheme {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Plaintext => "plaintext",
            Self::SaltedSha256 => "sha256",
        }
    }

    /// Value to store for a newly registered password
    pub fn encode(self, password: &str) -> String {
        match self {
            Self::Plaintext => password.to_string(),
            Self::SaltedSha256 => hash_password(password),
        }
    }

    /// Check `candidate` against a stored password value
    pub fn verify(self, stored: &str, candidate: &str) -> bool {
        match self {
            Self::Plaintext => stored == candidate,
            Self::SaltedSha256 => match verify_hash(stored, candidate) {
                Some(matches) => matches,
                None => stored == candidate,
            },
        }
    }
}

impl FromStr for PasswordScheme {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "plaintext" | "plain" => Ok(Self::Plaintext),
            "sha256" | "salted-sha256" => Ok(Self::SaltedSha256),
            _ => Err(Error::Validation(format!(
                "Unsupported password scheme '{}'",
                value
            ))),
        }
    }
}

fn hash_password(password: &str) -> String {
    let mut salt = [0_u8; 16];
    rand::thread_rng().fill_bytes(&mut salt);

    format!(
        "{}${}${}",
        HASH_VERSION,
        URL_SAFE_NO_PAD.encode(salt),
        URL_SAFE_NO_PAD.encode(digest(&salt, password))
    )
}

/// `None` when `stored` is not an encoded hash
fn verify_hash(stored: &str, password: &str) -> Option<bool> {
    let mut parts = stored.split('$');
    if parts.next() != Some(HASH_VERSION) {
        return None;
    }
    let salt = URL_SAFE_NO_PAD.decode(parts.next()?).ok()?;
    let expected = URL_SAFE_NO_PAD.decode(parts.next()?).ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some(expected == digest(&salt, password))
}

fn digest(salt: &[u8], password: &str) -> Vec<u8> {
    let mut hasher = Sha256::new();
    hasher.update(salt);
    hasher.update(password.as_bytes());
    hasher.finalize().to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plaintext_is_exact_equality() {
        let scheme = PasswordScheme::Plaintext;
        assert_eq!(scheme.encode("pw1"), "pw1");
        assert!(scheme.verify("pw1", "pw1"));
        assert!(!scheme.verify("pw1", "PW1"));
        assert!(!scheme.verify("pw1", "pw1 "));
    }

    #[test]
    fn test_sha256_hashes_with_fresh_salt() {
        let scheme = PasswordScheme::SaltedSha256;
        let first = scheme.encode("secret");
        let second = scheme.encode("secret");

        assert!(first.starts_with("v1$"));
        assert_ne!(first, "secret");
        assert_ne!(first, second);
        assert!(scheme.verify(&first, "secret"));
        assert!(scheme.verify(&second, "secret"));
        assert!(!scheme.verify(&first, "Secret"));
    }

    #[test]
    fn test_sha256_accepts_plaintext_records() {
        let scheme = PasswordScheme::SaltedSha256;
        assert!(scheme.verify("legacy", "legacy"));
        assert!(!scheme.verify("legacy", "other"));
    }

    #[test]
    fn test_parse_scheme() {
        assert_eq!(
            "plaintext".parse::<PasswordScheme>().unwrap(),
            PasswordScheme::Plaintext
        );
        assert_eq!(
            " SHA256 ".parse::<PasswordScheme>().unwrap(),
            PasswordScheme::SaltedSha256
        );
        assert!(matches!(
            "md5".parse::<PasswordScheme>(),
            Err(Error::Validation(_))
        ));
    }
}
