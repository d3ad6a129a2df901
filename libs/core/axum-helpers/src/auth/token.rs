use sha2::{Digest, Sha256};

use super::config::BearerAuthConfig;

/// Verifies presented bearer tokens against the configured one.
///
/// Only the SHA-256 digest of the expected token is kept in memory and
/// digests are compared without early exit.
#[derive(Clone)]
pub struct BearerAuth {
    expected: [u8; 32],
}

impl BearerAuth {
    pub fn new(config: &BearerAuthConfig) -> Self {
        Self {
            expected: Sha256::digest(config.token.as_bytes()).into(),
        }
    }

    pub fn verify(&self, presented: &str) -> bool {
        let actual: [u8; 32] = Sha256::digest(presented.as_bytes()).into();

        actual
            .iter()
            .zip(self.expected.iter())
            .fold(0u8, |acc, (a, b)| acc | (a ^ b))
            == 0
    }
}

impl std::fmt::Debug for BearerAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BearerAuth").finish_non_exhaustive()
    }
}
