/*!
 * Composition root of the security core
 *
 * The application constructs one [`SecurityContext`] at startup and passes
 * it where needed; there is no global instance.
 */

mod context;

pub use context::*;
