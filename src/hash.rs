//! Block hash primitives
//!
//! Hashes are opaque 32-byte values produced elsewhere in the node. This
//! module only converts them to and from their hex text form.

use crate::error::CheckpointError;

/// Type alias for a block hash, a fixed 32-byte digest.
pub type BlockHash = [u8; 32];

/// All-zero sentinel. Never a legitimate checkpoint value.
pub const NULL_HASH: BlockHash = [0u8; 32];

/// Convert a hash to a lowercase hex string for display.
pub fn hash_to_hex(hash: &BlockHash) -> String {
    hex::encode(hash)
}

/// Convert a 64-character hex string to a hash.
///
/// Surrounding whitespace is ignored and either letter case is accepted.
pub fn hash_from_hex(hex_str: &str) -> Result<BlockHash, CheckpointError> {
    let trimmed = hex_str.trim();
    if trimmed.len() != 64 {
        return Err(CheckpointError::Parse(format!(
            "Block hash must be 64 hex characters, got {}",
            trimmed.len()
        )));
    }
    let bytes = hex::decode(trimmed)
        .map_err(|e| CheckpointError::Parse(format!("Invalid hex block hash: {}", e)))?;
    bytes
        .try_into()
        .map_err(|_| CheckpointError::Parse("Failed to convert bytes into block hash".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_hex_roundtrip() {
        let mut hash = [0u8; 32];
        hash[0] = 0xab;
        hash[31] = 0x01;
        let encoded = hash_to_hex(&hash);
        assert_eq!(encoded.len(), 64);
        assert_eq!(hash_from_hex(&encoded).unwrap(), hash);
    }

    #[test]
    fn test_hash_from_hex_accepts_uppercase_and_whitespace() {
        let text = format!("  {}\n", "AB".repeat(32));
        assert_eq!(hash_from_hex(&text).unwrap(), [0xab; 32]);
    }

    #[test]
    fn test_hash_from_hex_rejects_bad_input() {
        assert!(matches!(hash_from_hex("abcd"), Err(CheckpointError::Parse(_))));
        assert!(matches!(hash_from_hex(&"zz".repeat(32)), Err(CheckpointError::Parse(_))));
        assert!(hash_from_hex(&"a".repeat(66)).is_err());
    }
}
