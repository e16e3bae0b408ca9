/*!
 * Ledgerlock Security Core
 *
 * This crate implements the local authentication and at-rest data protection
 * core of a personal budgeting application. The rest of the application
 * (transactions, budgets, categories, reports) talks to a plain key-value
 * store; everything security-relevant lives here:
 *
 * - A PIN credential whose verification hash survives app restarts and
 *   resists offline recovery (Argon2id with a per-credential salt)
 * - An in-memory session with a sliding idle timeout gating all access to
 *   the encryption key
 * - AES-256-GCM encryption of local data under a random database key that
 *   is generated once per install and never derived from the PIN
 * - Password-protected export/import of application data as a
 *   self-contained envelope
 *
 * The [`SecurityContext`] ties these together and is the only type the UI
 * layer needs to construct.
 */

/// Scoped key-value persistence for credentials and security configuration
pub mod store;

/// Salt generation and Argon2id key derivation
pub mod kdf;

/// PIN credential lifecycle: create, verify, reset
pub mod credential;

/// In-memory session state with idle timeout
pub mod session;

/// Symmetric encryption of local data and password-protected export
pub mod vault;

/// Composition root owning the store, config and session
pub mod context;

/// Common error types for the security core
pub mod error;

/// Utilities shared across modules
pub mod utils;

// Re-export main types for convenience
pub use context::SecurityContext;
pub use credential::CredentialManager;
pub use credential::CredentialRecord;
pub use error::{SecurityError, SecurityResult};
pub use kdf::KdfParams;
pub use session::Session;
pub use store::CredentialStore;
pub use store::FileStore;
pub use store::MemoryStore;
pub use vault::DataCipher;
pub use vault::ExportEnvelope;

/// Provides the types the UI layer needs to drive the lock screen,
/// settings panel and export dialog.
pub mod prelude {
    pub use crate::context::SecurityContext;
    pub use crate::error::{SecurityError, SecurityResult};
    pub use crate::kdf::KdfParams;
    pub use crate::session::IDLE_TIMEOUT;
    pub use crate::store::{CredentialStore, FileStore, MemoryStore};
    pub use crate::vault::ExportEnvelope;
}
