//! Utilities shared across the security core: randomness, constant-time
//! comparison and hex encoding.

use rand::{rngs::OsRng, RngCore};

use crate::error::SecurityError;

/// Generate random bytes of the specified length
pub fn random_bytes(length: usize) -> Result<Vec<u8>, SecurityError> {
    let mut bytes = vec![0u8; length];
    OsRng.fill_bytes(&mut bytes);
    Ok(bytes)
}

/// Constant-time comparison of two byte slices to avoid timing attacks
///
/// This function compares two byte slices in constant time to prevent
/// timing attacks that could leak information about the content.
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }

    use subtle::ConstantTimeEq;
    a.ct_eq(b).into()
}

/// Convert bytes to a hexadecimal string
pub fn to_hex(data: &[u8]) -> String {
    hex::encode(data)
}

/// Convert a hexadecimal string to bytes
pub fn from_hex(value: &str) -> Result<Vec<u8>, SecurityError> {
    hex::decode(value).map_err(|e| {
        SecurityError::invalid_parameter("hex string", "valid hex encoding", &e.to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_bytes() {
        let bytes1 = random_bytes(32).unwrap();
        let bytes2 = random_bytes(32).unwrap();

        assert_eq!(bytes1.len(), 32);
        assert_eq!(bytes2.len(), 32);
        // Two random byte arrays should be different
        assert_ne!(bytes1, bytes2);
    }

    #[test]
    fn test_constant_time_eq() {
        let a = [1, 2, 3, 4];
        let b = [1, 2, 3, 4];
        let c = [1, 2, 3, 5];
        let d = [1, 2, 3];

        assert!(constant_time_eq(&a, &b));
        assert!(!constant_time_eq(&a, &c));
        assert!(!constant_time_eq(&a, &d));
    }

    #[test]
    fn test_hex_conversion() {
        let data = [0x01, 0x23, 0x45, 0x67, 0x89, 0xab, 0xcd, 0xef];
        let hex = to_hex(&data);
        assert_eq!(hex, "0123456789abcdef");

        let bytes = from_hex(&hex).unwrap();
        assert_eq!(bytes, data);
    }

    #[test]
    fn test_from_hex_rejects_garbage() {
        assert!(from_hex("zz").is_err());
        assert!(from_hex("abc").is_err());
    }
}
