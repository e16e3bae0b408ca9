/*!
 * Salt generation and key derivation
 *
 * All password and PIN material goes through a single Argon2id derivation;
 * the database key is plain random material and never derived from the PIN.
 */

mod kdf;

pub use kdf::*;

#[cfg(test)]
mod tests;
