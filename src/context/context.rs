use std::time::Duration;

use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, Zeroizing};

use crate::credential::CredentialManager;
use crate::error::{SecurityError, SecurityResult};
use crate::kdf::{self, KdfParams};
use crate::session::Session;
use crate::store::CredentialStore;
use crate::utils;
use crate::vault;

/// Storage key holding the security configuration record
pub const SECURITY_CONFIG_KEY: &str = "security_config";

/// Persisted security configuration
///
/// Holds the database key and non-secret flags, nothing credential-shaped:
/// the credential record is the single authority on the PIN hash and salt.
#[derive(Clone, Serialize, Deserialize, Zeroize)]
#[zeroize(drop)]
struct SecurityConfig {
    /// Advisory biometric enrollment flag; no hardware verification is
    /// performed by the core
    #[zeroize(skip)]
    use_biometric: bool,
    /// Hex-encoded database key, generated once per install
    database_key: String,
}

/// Owns the store, the persisted configuration and the in-memory session
///
/// Constructed once by the application at startup and passed explicitly
/// to whatever needs it. Every process starts locked: session state has
/// no persisted form.
///
/// Control flow at startup: construct, [`initialize`](Self::initialize),
/// then route on [`has_credential`](Self::has_credential) — to PIN
/// creation when false, to the lock screen when true. A successful
/// [`verify_credential`](Self::verify_credential) authenticates the
/// session and unlocks [`encrypt`](Self::encrypt) /
/// [`decrypt`](Self::decrypt).
pub struct SecurityContext {
    store: Box<dyn CredentialStore>,
    credentials: CredentialManager,
    session: Session,
    config: Option<SecurityConfig>,
    kdf_params: KdfParams,
}

impl SecurityContext {
    /// Create a context over the given store with default derivation costs
    pub fn new(store: Box<dyn CredentialStore>) -> Self {
        Self::with_params(store, KdfParams::default())
    }

    /// Create a context with explicit derivation costs
    ///
    /// The costs apply to credentials and exports created by this context;
    /// existing records carry their own.
    pub fn with_params(store: Box<dyn CredentialStore>, kdf_params: KdfParams) -> Self {
        Self {
            store,
            credentials: CredentialManager::with_params(kdf_params.clone()),
            session: Session::new(),
            config: None,
            kdf_params,
        }
    }

    /// Replace the session idle timeout (before any authentication)
    pub fn with_idle_timeout(mut self, timeout: Duration) -> Self {
        self.session = Session::with_timeout(timeout);
        self
    }

    /// Load the security configuration, creating it on first run
    ///
    /// First run generates the database key; it is never regenerated on
    /// later launches. A configuration record that exists but cannot be
    /// parsed is surfaced as an error rather than recreated — a fresh
    /// database key would silently orphan everything encrypted under the
    /// old one, and [`reset`](Self::reset) is the sanctioned way out.
    pub fn initialize(&mut self) -> SecurityResult<()> {
        if self.config.is_some() {
            return Ok(());
        }

        match self.store.get(SECURITY_CONFIG_KEY)? {
            Some(raw) => {
                let config: SecurityConfig = serde_json::from_str(&raw).map_err(|e| {
                    SecurityError::SerializationError(format!("security configuration: {}", e))
                })?;
                self.config = Some(config);
                log::debug!("security configuration loaded");
            }
            None => {
                let key = kdf::generate_database_key()?;
                let config = SecurityConfig {
                    use_biometric: false,
                    database_key: utils::to_hex(&key[..]),
                };
                let raw = serde_json::to_string(&config)
                    .map_err(|e| SecurityError::SerializationError(e.to_string()))?;
                self.store.set(SECURITY_CONFIG_KEY, &raw)?;
                self.config = Some(config);
                log::info!("security configuration created, database key generated");
            }
        }

        Ok(())
    }

    /// Whether a usable PIN credential exists
    pub fn has_credential(&self) -> SecurityResult<bool> {
        self.credentials.has_credential(self.store.as_ref())
    }

    /// Create or replace the PIN credential
    pub fn set_credential(&mut self, pin: &str) -> SecurityResult<()> {
        self.require_initialized()?;
        self.credentials.set_credential(self.store.as_mut(), pin)
    }

    /// Verify a PIN, authenticating the session on success
    ///
    /// A wrong PIN is a `false` result, not an error, and leaves the
    /// session untouched.
    pub fn verify_credential(&mut self, pin: &str) -> SecurityResult<bool> {
        self.require_initialized()?;
        let valid = self
            .credentials
            .verify_credential(self.store.as_ref(), pin)?;

        if valid {
            self.session.authenticate();
        }

        Ok(valid)
    }

    /// Destroy all persisted security state and lock the session
    ///
    /// Irreversible: the credential, the configuration and the database
    /// key are all cleared, so previously encrypted data is gone for
    /// good. The application is expected to restart its bootstrap flow
    /// (and call [`initialize`](Self::initialize) again) afterwards.
    pub fn reset(&mut self) -> SecurityResult<()> {
        self.session.logout();
        self.credentials.reset(self.store.as_mut())?;
        self.config = None;
        log::info!("security state reset");
        Ok(())
    }

    /// Check authentication, lazily expiring an idle session
    pub fn is_authenticated(&mut self) -> bool {
        self.session.is_authenticated()
    }

    /// Lock the session immediately
    pub fn logout(&mut self) {
        self.session.logout();
    }

    /// Encrypt a payload under the database key
    ///
    /// Fails with [`SecurityError::NotAuthenticated`] when the session is
    /// locked or has idled out: the gate is here, not in UI routing.
    pub fn encrypt(&mut self, plaintext: &[u8]) -> SecurityResult<String> {
        let key = self.database_key()?;
        vault::seal(&key, plaintext)
    }

    /// Decrypt a payload sealed under the database key
    pub fn decrypt(&mut self, sealed: &str) -> SecurityResult<Vec<u8>> {
        let key = self.database_key()?;
        vault::open(&key, sealed)
    }

    /// Export a payload encrypted under a password-derived key
    ///
    /// The export key is independent of the database key and of the PIN,
    /// so an export outlives a reset and can be imported on another
    /// install.
    pub fn export_with_password(&self, payload: &[u8], password: &str) -> SecurityResult<String> {
        vault::export_with_password(payload, password, &self.kdf_params)
    }

    /// Import a payload from an export envelope
    pub fn import_with_password(&self, envelope: &str, password: &str) -> SecurityResult<Vec<u8>> {
        vault::import_with_password(envelope, password)
    }

    /// Advisory biometric enrollment flag
    pub fn use_biometric(&self) -> SecurityResult<bool> {
        Ok(self.require_initialized()?.use_biometric)
    }

    /// Persist the advisory biometric enrollment flag
    pub fn set_use_biometric(&mut self, enabled: bool) -> SecurityResult<()> {
        let config = self.config.as_mut().ok_or(SecurityError::NotInitialized)?;
        config.use_biometric = enabled;

        let raw = serde_json::to_string(&*config)
            .map_err(|e| SecurityError::SerializationError(e.to_string()))?;
        self.store.set(SECURITY_CONFIG_KEY, &raw)
    }

    fn require_initialized(&self) -> SecurityResult<&SecurityConfig> {
        self.config.as_ref().ok_or(SecurityError::NotInitialized)
    }

    /// The database key, gated by session state
    fn database_key(&mut self) -> SecurityResult<Zeroizing<Vec<u8>>> {
        if !self.session.is_authenticated() {
            return Err(SecurityError::NotAuthenticated);
        }

        let config = self.require_initialized()?;
        let key = utils::from_hex(&config.database_key)?;
        Ok(Zeroizing::new(key))
    }
}

impl std::fmt::Debug for SecurityContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecurityContext")
            .field("initialized", &self.config.is_some())
            .field("session", &self.session)
            .finish()
    }
}
