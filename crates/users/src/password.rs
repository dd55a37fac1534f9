//! Salted password digests.
//!
//! Stored form: `sha256$<salt>$<hex digest>`. The digest covers a length-framed
//! salt followed by the password bytes.

use core::fmt::Write as _;
use core::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use shopdash_core::DomainError;

const SCHEME: &str = "sha256";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordDigest {
    salt: String,
    hex: String,
}

impl PasswordDigest {
    /// Digest a password under a fresh salt.
    pub fn derive(password: &str) -> Self {
        Self::with_salt(password, &Uuid::now_v7().simple().to_string())
    }

    pub fn with_salt(password: &str, salt: &str) -> Self {
        Self {
            salt: salt.to_string(),
            hex: digest_hex(salt, password),
        }
    }

    pub fn verify(&self, password: &str) -> bool {
        digest_hex(&self.salt, password) == self.hex
    }
}

fn digest_hex(salt: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    let salt_len = u32::try_from(salt.len()).unwrap_or(u32::MAX);
    hasher.update(salt_len.to_be_bytes());
    hasher.update(salt.as_bytes());
    hasher.update(password.as_bytes());

    hasher
        .finalize()
        .iter()
        .fold(String::with_capacity(64), |mut out, b| {
            let _ = write!(out, "{b:02x}");
            out
        })
}

impl core::fmt::Display for PasswordDigest {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{SCHEME}${}${}", self.salt, self.hex)
    }
}

impl FromStr for PasswordDigest {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.splitn(3, '$');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(SCHEME), Some(salt), Some(hex))
                if !salt.is_empty() && hex.len() == 64 && hex.bytes().all(|b| b.is_ascii_hexdigit()) =>
            {
                Ok(Self {
                    salt: salt.to_string(),
                    hex: hex.to_ascii_lowercase(),
                })
            }
            _ => Err(DomainError::malformed("unrecognised password digest")),
        }
    }
}

impl Serialize for PasswordDigest {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for PasswordDigest {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
