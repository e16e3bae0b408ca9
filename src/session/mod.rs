/*!
 * In-memory session state
 *
 * Session state is never persisted: every process start begins locked,
 * regardless of how the previous run ended.
 */

mod session;

pub use session::*;
