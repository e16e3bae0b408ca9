use argon2::{Argon2, ParamsBuilder};
use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use crate::error::{SecurityError, SecurityResult};
use crate::utils;

/// Salt length in bytes
pub const SALT_LEN: usize = 16;

/// Derived key length in bytes (256 bits)
pub const KEY_LEN: usize = 32;

/// Argon2id cost parameters
///
/// Persisted alongside every salt — in the credential record and in the
/// export envelope — so costs can be raised later without invalidating
/// hashes derived under the old parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KdfParams {
    /// Memory cost (in KiB)
    pub memory_cost: u32,
    /// Time cost (iterations)
    pub time_cost: u32,
    /// Parallelism factor
    pub parallelism: u32,
}

impl Default for KdfParams {
    fn default() -> Self {
        Self {
            // These are reasonable defaults for a mobile-class device
            memory_cost: 65536, // 64 MiB
            time_cost: 3,
            parallelism: 1,
        }
    }
}

impl KdfParams {
    /// Reduced-cost profile for interactive unlock on constrained devices
    pub fn interactive() -> Self {
        Self {
            memory_cost: 19456, // 19 MiB
            time_cost: 2,
            parallelism: 1,
        }
    }
}

fn argon2_instance(params: &KdfParams) -> SecurityResult<Argon2<'static>> {
    let mut builder = ParamsBuilder::new();
    builder
        .m_cost(params.memory_cost)
        .t_cost(params.time_cost)
        .p_cost(params.parallelism)
        .output_len(KEY_LEN);

    let argon2_params = builder.build().map_err(|e| {
        SecurityError::key_derivation_error("build parameters", &e.to_string())
    })?;

    Ok(Argon2::new(
        argon2::Algorithm::Argon2id,
        argon2::Version::V0x13,
        argon2_params,
    ))
}

/// Generate a cryptographically secure random salt
pub fn generate_salt() -> SecurityResult<Vec<u8>> {
    utils::random_bytes(SALT_LEN)
}

/// Derive a 256-bit key from a secret and salt using Argon2id
///
/// This single derivation serves both roles in the core: producing the PIN
/// verification hash and producing the export encryption key. The output
/// is wrapped in [`Zeroizing`] so the key material is wiped when it leaves
/// scope.
///
/// # Arguments
///
/// * `secret` - The PIN or password to derive from
/// * `salt` - Random salt, at least 8 bytes
/// * `params` - The cost parameters recorded next to the salt
pub fn derive_key(
    secret: &str,
    salt: &[u8],
    params: &KdfParams,
) -> SecurityResult<Zeroizing<[u8; KEY_LEN]>> {
    if salt.len() < 8 {
        return Err(SecurityError::invalid_parameter(
            "salt",
            "at least 8 bytes",
            &format!("{} bytes", salt.len()),
        ));
    }

    let argon2 = argon2_instance(params)?;
    let mut key = Zeroizing::new([0u8; KEY_LEN]);

    argon2
        .hash_password_into(secret.as_bytes(), salt, &mut key[..])
        .map_err(|e| SecurityError::key_derivation_error("derive key", &e.to_string()))?;

    Ok(key)
}

/// Generate the random database key
///
/// Independent of any PIN-derived value. Generated exactly once per
/// install by [`crate::context::SecurityContext::initialize`] and stored
/// in the security configuration record; regenerating it would make all
/// previously encrypted data unrecoverable.
pub fn generate_database_key() -> SecurityResult<Zeroizing<[u8; KEY_LEN]>> {
    let bytes = utils::random_bytes(KEY_LEN)?;
    let mut key = Zeroizing::new([0u8; KEY_LEN]);
    key.copy_from_slice(&bytes);
    Ok(key)
}
