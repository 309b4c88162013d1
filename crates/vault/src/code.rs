//! Recovery code generation.

use crate::constants::{RECOVERY_CODE_ALPHABET, RECOVERY_CODE_LENGTH};
use rand::Rng;

/// A short random token that restores one file from the archive store.
///
/// Codes are only ever created by [`RecoveryCode::generate`] (or [`generate_code`]); user input
/// is matched against issued codes as a plain string and never parsed into this type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct RecoveryCode(String);

impl RecoveryCode {
    /// Generates a code of the default length using the thread-local RNG.
    pub fn generate() -> Self {
        Self::generate_with(&mut rand::thread_rng())
    }

    /// Generates a code of the default length from `rng`.
    pub fn generate_with<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self(generate_code(rng, RECOVERY_CODE_LENGTH))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RecoveryCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::borrow::Borrow<str> for RecoveryCode {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Returns `length` characters, each drawn independently and uniformly from `A-Z0-9`.
///
/// Nothing checks the result against previously issued codes.
pub fn generate_code<R: Rng + ?Sized>(rng: &mut R, length: usize) -> String {
    (0..length)
        .map(|_| RECOVERY_CODE_ALPHABET[rng.gen_range(0..RECOVERY_CODE_ALPHABET.len())] as char)
        .collect()
}
