use aes_gcm::{
    aead::{Aead, AeadCore, KeyInit, OsRng},
    Aes256Gcm, Key, Nonce,
};

use crate::error::{SecurityError, SecurityResult};

/// Key length in bytes for AES-256-GCM
pub const CIPHER_KEY_LEN: usize = 32;

/// Nonce length in bytes for AES-GCM
const NONCE_LEN: usize = 12;

/// AES-256-GCM cipher for the application's local data
///
/// Sealed output is a single opaque string: `base64(nonce || ciphertext)`,
/// with the authentication tag included in the ciphertext. A fresh random
/// nonce is generated for every seal, so sealing the same payload twice
/// yields different blobs.
///
/// # Examples
///
/// ```
/// use ledgerlock::vault::DataCipher;
///
/// let key = [0x42; 32];
/// let cipher = DataCipher::new(&key).unwrap();
///
/// let sealed = cipher.seal(b"category: groceries").unwrap();
/// let opened = cipher.open(&sealed).unwrap();
/// assert_eq!(opened, b"category: groceries");
/// ```
#[derive(Clone)]
pub struct DataCipher {
    cipher: Aes256Gcm,
}

impl std::fmt::Debug for DataCipher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DataCipher")
            .field("cipher", &"[AES-256-GCM Cipher]")
            .finish()
    }
}

impl DataCipher {
    /// Create a cipher from a 32-byte key
    ///
    /// # Errors
    ///
    /// Returns an error if the key is not exactly 32 bytes long
    pub fn new(key: &[u8]) -> SecurityResult<Self> {
        if key.len() != CIPHER_KEY_LEN {
            return Err(SecurityError::invalid_parameter(
                "key",
                "32 bytes",
                &format!("{} bytes", key.len()),
            ));
        }

        let key = Key::<Aes256Gcm>::from_slice(key);
        Ok(Self {
            cipher: Aes256Gcm::new(key),
        })
    }

    /// Encrypt a payload into an opaque sealed string
    pub fn seal(&self, plaintext: &[u8]) -> SecurityResult<String> {
        let nonce = Aes256Gcm::generate_nonce(&mut OsRng);
        let ciphertext = self
            .cipher
            .encrypt(&nonce, plaintext)
            .map_err(|_| SecurityError::encryption_error("seal", "AEAD encryption failed"))?;

        let mut blob = Vec::with_capacity(NONCE_LEN + ciphertext.len());
        blob.extend_from_slice(&nonce);
        blob.extend_from_slice(&ciphertext);

        Ok(base64::encode(blob))
    }

    /// Decrypt a sealed string back into the payload
    ///
    /// # Errors
    ///
    /// Returns [`SecurityError::DecryptionError`] on malformed input,
    /// truncation, authentication-tag mismatch or a wrong key. Corrupted
    /// data is never returned.
    pub fn open(&self, sealed: &str) -> SecurityResult<Vec<u8>> {
        let blob = base64::decode(sealed.trim()).map_err(|_| SecurityError::DecryptionError)?;

        if blob.len() <= NONCE_LEN {
            return Err(SecurityError::DecryptionError);
        }

        let (nonce, ciphertext) = blob.split_at(NONCE_LEN);
        self.cipher
            .decrypt(Nonce::from_slice(nonce), ciphertext)
            .map_err(|_| SecurityError::DecryptionError)
    }
}

/// Seal a payload under the given key
///
/// Convenience wrapper for one-shot use; construct a [`DataCipher`] when
/// sealing many payloads under the same key.
pub fn seal(key: &[u8], plaintext: &[u8]) -> SecurityResult<String> {
    DataCipher::new(key)?.seal(plaintext)
}

/// Open a sealed payload under the given key
pub fn open(key: &[u8], sealed: &str) -> SecurityResult<Vec<u8>> {
    DataCipher::new(key)?.open(sealed)
}
