/*!
 * Error Handling for the Ledgerlock Security Core
 *
 * Provides the error taxonomy shared by every module, along with
 * user-facing message mapping for the UI layer. Failed PIN verification is
 * deliberately NOT an error: it is a boolean result, so a wrong PIN cannot
 * be told apart from other verification outcomes by exception shape.
 */

use thiserror::Error;

/// Error type for all security core operations
#[derive(Debug, Error)]
pub enum SecurityError {
    /// Failure at the key-value store I/O boundary. Never retried
    /// automatically; surfaced to the caller.
    #[error("Storage operation failed: {operation} - {cause}")]
    StorageError { operation: String, cause: String },

    /// A credential or encryption operation was invoked before the
    /// security configuration record exists.
    #[error("Security context not initialized")]
    NotInitialized,

    /// Encryption or decryption was requested outside an authenticated
    /// session.
    #[error("Not authenticated")]
    NotAuthenticated,

    /// Argon2id derivation failed.
    #[error("Key derivation failed: {operation} - {cause}")]
    KeyDerivationError { operation: String, cause: String },

    /// Symmetric encryption failed.
    #[error("Encryption failed: {operation} - {cause}")]
    EncryptionError { operation: String, cause: String },

    /// Authentication-tag mismatch, malformed ciphertext or wrong key.
    /// Carries no cause on purpose: the distinction must not leak.
    #[error("Decryption failed")]
    DecryptionError,

    /// Export envelope could not be opened: wrong password, unsupported
    /// version or corrupted data. The cases are indistinguishable.
    #[error("Export password invalid or export data corrupted")]
    InvalidExportPassword,

    /// Invalid parameter error
    #[error("Invalid parameter: {parameter} - expected {expected}, got {actual}")]
    InvalidParameter {
        parameter: String,
        expected: String,
        actual: String,
    },

    /// Error during serialization/deserialization of persisted records
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Error during random number generation
    #[error("Random number generation failed: {0}")]
    RandomGenerationError(String),
}

impl SecurityError {
    pub fn storage_error(operation: &str, cause: &str) -> Self {
        SecurityError::StorageError {
            operation: operation.to_string(),
            cause: cause.to_string(),
        }
    }

    pub fn key_derivation_error(operation: &str, cause: &str) -> Self {
        SecurityError::KeyDerivationError {
            operation: operation.to_string(),
            cause: cause.to_string(),
        }
    }

    pub fn encryption_error(operation: &str, cause: &str) -> Self {
        SecurityError::EncryptionError {
            operation: operation.to_string(),
            cause: cause.to_string(),
        }
    }

    pub fn invalid_parameter(parameter: &str, expected: &str, actual: &str) -> Self {
        SecurityError::InvalidParameter {
            parameter: parameter.to_string(),
            expected: expected.to_string(),
            actual: actual.to_string(),
        }
    }

    /// Get a user-friendly message suitable for direct display in the UI.
    ///
    /// Decryption and export failures map to a single combined message so
    /// the UI cannot become an oracle distinguishing a wrong password from
    /// corrupted data.
    pub fn user_message(&self) -> String {
        match self {
            SecurityError::StorageError { .. } => {
                "Could not read or write local storage. Your data was not changed.".to_string()
            }
            SecurityError::NotInitialized => {
                "The app is still starting up. Please try again.".to_string()
            }
            SecurityError::NotAuthenticated => {
                "Session locked. Enter your PIN to continue.".to_string()
            }
            SecurityError::KeyDerivationError { .. } => {
                "Could not process the PIN or password. Please try again.".to_string()
            }
            SecurityError::EncryptionError { .. } => {
                "Could not encrypt your data. The operation was cancelled.".to_string()
            }
            SecurityError::DecryptionError | SecurityError::InvalidExportPassword => {
                "Incorrect password or corrupted data.".to_string()
            }
            SecurityError::InvalidParameter {
                parameter,
                expected,
                ..
            } => {
                format!("Invalid {}: expected {}.", parameter, expected)
            }
            SecurityError::SerializationError(_) => {
                "Stored data could not be read. It may be corrupted.".to_string()
            }
            SecurityError::RandomGenerationError(_) => {
                "Secure random generation failed. Please try again.".to_string()
            }
        }
    }

    /// Get the error category as a string, for structured logging
    pub fn error_type(&self) -> &'static str {
        match self {
            SecurityError::StorageError { .. } => "StorageError",
            SecurityError::NotInitialized => "NotInitialized",
            SecurityError::NotAuthenticated => "NotAuthenticated",
            SecurityError::KeyDerivationError { .. } => "KeyDerivationError",
            SecurityError::EncryptionError { .. } => "EncryptionError",
            SecurityError::DecryptionError => "DecryptionError",
            SecurityError::InvalidExportPassword => "InvalidExportPassword",
            SecurityError::InvalidParameter { .. } => "InvalidParameter",
            SecurityError::SerializationError(_) => "SerializationError",
            SecurityError::RandomGenerationError(_) => "RandomGenerationError",
        }
    }
}

impl From<std::io::Error> for SecurityError {
    fn from(err: std::io::Error) -> Self {
        SecurityError::storage_error("io", &err.to_string())
    }
}

/// Result type alias for security core operations
pub type SecurityResult<T> = Result<T, SecurityError>;
