//! Session lifecycle: creation, validation, sliding refresh and revocation

mod cleanup;
mod manager;

#[cfg(test)]
mod tests;

pub use cleanup::{SessionCleanupResult, SessionCleanupService};
pub use manager::SessionManager;
