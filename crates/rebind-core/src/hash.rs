//! Content hashing for detecting unchanged documents

use sha2::{Digest, Sha256};
use std::fmt;

/// A SHA-256 hash of serialized document text.
///
/// Clip documents remember the hash of the text they were loaded from so
/// that saving can skip files whose committed edits left them unchanged.
#[derive(Clone, Copy, Hash, Eq, PartialEq)]
pub struct ContentHash([u8; 32]);

impl ContentHash {
    /// Compute a hash from bytes
    pub fn from_bytes(data: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(data);
        Self(hasher.finalize().into())
    }

    /// Compute a hash from a string
    pub fn from_str(s: &str) -> Self {
        Self::from_bytes(s.as_bytes())
    }

    /// Get the hash as a hex string
    pub fn to_hex(&self) -> String {
        self.0.iter().map(|b| format!("{:02x}", b)).collect()
    }
}

impl fmt::Debug for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ContentHash({})", &self.to_hex()[..16])
    }
}

impl fmt::Display for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", &self.to_hex()[..16])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_consistent_hashing() {
        assert_eq!(ContentHash::from_str("path = \"Arm\""), ContentHash::from_str("path = \"Arm\""));
    }

    #[test]
    fn test_different_content_different_hash() {
        assert_ne!(ContentHash::from_str("Arm/Hand"), ContentHash::from_str("Leg/Hand"));
    }

    #[test]
    fn test_display_is_short_hex() {
        let h = ContentHash::from_str("clip");
        assert_eq!(h.to_hex().len(), 64);
        assert_eq!(h.to_string().len(), 16);
    }
}
