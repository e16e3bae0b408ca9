use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::vault::DataCipher;
use crate::error::{SecurityError, SecurityResult};
use crate::kdf::{self, KdfParams};
use crate::utils;

/// Version of the export envelope format
pub const EXPORT_VERSION: u8 = 1;

/// Self-contained export envelope
///
/// Carries everything needed to decrypt the payload given the correct
/// password: the derivation salt generated for this export, the cost
/// parameters it was derived under, and the sealed data. Without the salt
/// inside the envelope no import could ever re-derive the export key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportEnvelope {
    /// Envelope format version
    pub version: u8,
    /// Creation time, RFC 3339
    pub created_at: String,
    /// Cost parameters the export key was derived under
    pub kdf: KdfParams,
    /// Hex-encoded derivation salt, fresh per export
    pub salt: String,
    /// Sealed payload
    pub data: String,
}

/// Encrypt a payload under a key derived from an export password
///
/// Generates a fresh salt for this export, derives a one-time key from
/// the password, and returns the envelope as a JSON string the UI can
/// write to a file.
pub fn export_with_password(
    payload: &[u8],
    password: &str,
    params: &KdfParams,
) -> SecurityResult<String> {
    let salt = kdf::generate_salt()?;
    let key = kdf::derive_key(password, &salt, params)?;
    let data = DataCipher::new(&key[..])?.seal(payload)?;

    let envelope = ExportEnvelope {
        version: EXPORT_VERSION,
        created_at: Utc::now().to_rfc3339(),
        kdf: params.clone(),
        salt: utils::to_hex(&salt),
        data,
    };

    log::info!("export envelope created ({} payload bytes)", payload.len());

    serde_json::to_string(&envelope).map_err(|e| SecurityError::SerializationError(e.to_string()))
}

/// Decrypt an export envelope with the password it was created under
///
/// Re-derives the key from the password and the salt and parameters read
/// back out of the envelope. Nothing is partially applied: the payload is
/// returned whole or not at all.
///
/// # Errors
///
/// Returns [`SecurityError::InvalidExportPassword`] on a wrong password,
/// an unparseable envelope, an unsupported version or tampered data —
/// the cases are deliberately indistinguishable.
pub fn import_with_password(envelope: &str, password: &str) -> SecurityResult<Vec<u8>> {
    let envelope: ExportEnvelope =
        serde_json::from_str(envelope).map_err(|_| SecurityError::InvalidExportPassword)?;

    if envelope.version != EXPORT_VERSION {
        return Err(SecurityError::InvalidExportPassword);
    }

    let salt =
        utils::from_hex(&envelope.salt).map_err(|_| SecurityError::InvalidExportPassword)?;
    let key = kdf::derive_key(password, &salt, &envelope.kdf)?;

    DataCipher::new(&key[..])?
        .open(&envelope.data)
        .map_err(|_| SecurityError::InvalidExportPassword)
}
