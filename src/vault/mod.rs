/*!
 * Symmetric encryption of local data
 *
 * This module implements AES-256-GCM sealing of arbitrary payloads under
 * the database key, and password-protected export/import using a key
 * derived independently per export.
 */

mod export;
mod vault;

pub use export::*;
pub use vault::*;
