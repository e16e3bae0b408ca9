/*!
 * PIN credential lifecycle
 *
 * Owns the stored hash/salt record. There is no PIN recovery and no
 * standalone "change PIN" flow: a forgotten PIN means a full reset.
 */

mod credential;

pub use credential::*;
