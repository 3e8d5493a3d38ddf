//! Authenticated session access
//!
//! Exports are always scoped to the representative signed in on the device.
//! The session itself is owned by the application; this module only reads
//! the current representative code through [`SessionProvider`].

mod scope;

pub use scope::{SessionProvider, SessionScope};

#[cfg(test)]
pub use scope::StaticSession;
