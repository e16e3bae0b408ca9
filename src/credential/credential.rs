use serde::{Deserialize, Serialize};

use crate::error::{SecurityError, SecurityResult};
use crate::kdf::{self, KdfParams};
use crate::store::CredentialStore;
use crate::utils;

/// Storage key holding the credential record
pub const CREDENTIAL_KEY: &str = "credential";

/// Minimum PIN length in characters
pub const MIN_PIN_LEN: usize = 4;

/// The persisted credential record
///
/// Hash, salt and derivation costs live together in one record under one
/// storage key; nothing else duplicates them. The salt is generated fresh
/// on every [`CredentialManager::set_credential`] and reused for every
/// verification of that credential.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CredentialRecord {
    /// Hex-encoded Argon2id output over the PIN and salt
    pub pin_hash: String,
    /// Hex-encoded random salt for this credential
    pub salt: String,
    /// Cost parameters the hash was derived under
    pub kdf: KdfParams,
}

/// Manages the stored PIN credential
///
/// Two states, decided by what the store holds: no credential, or a usable
/// credential record. A record that cannot be parsed counts as no
/// credential, which routes the user back to PIN creation instead of
/// locking them out of the app entirely.
#[derive(Debug, Clone)]
pub struct CredentialManager {
    kdf_params: KdfParams,
}

impl CredentialManager {
    /// Create a manager deriving new credentials with default costs
    pub fn new() -> Self {
        Self::with_params(KdfParams::default())
    }

    /// Create a manager deriving new credentials with explicit costs
    ///
    /// Verification always uses the costs recorded in the stored record,
    /// so changing this only affects credentials set afterwards.
    pub fn with_params(kdf_params: KdfParams) -> Self {
        Self { kdf_params }
    }

    /// Whether a usable credential exists
    pub fn has_credential(&self, store: &dyn CredentialStore) -> SecurityResult<bool> {
        Ok(self.load_record(store)?.is_some())
    }

    /// Create or replace the stored credential
    ///
    /// Generates a fresh salt, derives the verification hash and persists
    /// the record. PINs shorter than [`MIN_PIN_LEN`] characters are
    /// rejected; the character set is not restricted.
    pub fn set_credential(
        &self,
        store: &mut dyn CredentialStore,
        pin: &str,
    ) -> SecurityResult<()> {
        if pin.chars().count() < MIN_PIN_LEN {
            return Err(SecurityError::invalid_parameter(
                "pin",
                "at least 4 characters",
                &format!("{} characters", pin.chars().count()),
            ));
        }

        let salt = kdf::generate_salt()?;
        let hash = kdf::derive_key(pin, &salt, &self.kdf_params)?;

        let record = CredentialRecord {
            pin_hash: utils::to_hex(&hash[..]),
            salt: utils::to_hex(&salt),
            kdf: self.kdf_params.clone(),
        };

        let raw = serde_json::to_string(&record)
            .map_err(|e| SecurityError::SerializationError(e.to_string()))?;
        store.set(CREDENTIAL_KEY, &raw)?;

        log::info!("PIN credential created");
        Ok(())
    }

    /// Verify a PIN against the stored credential
    ///
    /// Recomputes the hash with the stored salt and the costs recorded at
    /// set time, and compares in constant time. A wrong PIN is a `false`
    /// result, never an error; so is a missing or unusable record.
    pub fn verify_credential(
        &self,
        store: &dyn CredentialStore,
        pin: &str,
    ) -> SecurityResult<bool> {
        let record = match self.load_record(store)? {
            Some(record) => record,
            None => return Ok(false),
        };

        let (salt, stored_hash) = match (
            utils::from_hex(&record.salt),
            utils::from_hex(&record.pin_hash),
        ) {
            (Ok(salt), Ok(hash)) => (salt, hash),
            _ => {
                log::warn!("credential record holds invalid hex, treating PIN as not matching");
                return Ok(false);
            }
        };

        let candidate = kdf::derive_key(pin, &salt, &record.kdf)?;
        Ok(utils::constant_time_eq(&candidate[..], &stored_hash))
    }

    /// Destroy all persisted security state
    ///
    /// Clears the entire store, not just the credential record, and cannot
    /// be undone. This is the only recovery path for a forgotten PIN; any
    /// data encrypted under the old database key is gone with it.
    pub fn reset(&self, store: &mut dyn CredentialStore) -> SecurityResult<()> {
        store.clear()?;
        log::info!("credential store cleared");
        Ok(())
    }

    fn load_record(
        &self,
        store: &dyn CredentialStore,
    ) -> SecurityResult<Option<CredentialRecord>> {
        let raw = match store.get(CREDENTIAL_KEY)? {
            Some(raw) => raw,
            None => return Ok(None),
        };

        match serde_json::from_str::<CredentialRecord>(&raw) {
            Ok(record) if !record.pin_hash.is_empty() => Ok(Some(record)),
            Ok(_) => Ok(None),
            Err(e) => {
                log::warn!("unreadable credential record, treating as absent: {}", e);
                Ok(None)
            }
        }
    }
}

impl Default for CredentialManager {
    fn default() -> Self {
        Self::new()
    }
}
