/*!
 * Scoped key-value persistence for the security core
 *
 * The store is the core's only I/O dependency. The credential record and
 * the security configuration live here; the budgeting data itself is
 * persisted elsewhere by the application.
 */

mod store;

pub use store::*;

#[cfg(test)]
mod tests;
