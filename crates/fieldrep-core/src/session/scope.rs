//! Session scope resolution

use tracing::debug;

/// Source of the currently signed-in representative
pub trait SessionProvider: Send + Sync {
    /// Code of the authenticated representative, if a session is active
    fn authenticated_representative_code(&self) -> Option<String>;
}

/// Resolves which representative an export is scoped to
pub struct SessionScope<'a> {
    provider: &'a dyn SessionProvider,
}

impl<'a> SessionScope<'a> {
    pub fn new(provider: &'a dyn SessionProvider) -> Self {
        Self { provider }
    }

    /// Trimmed representative code, or None without an active session
    pub fn current_representative_code(&self) -> Option<String> {
        let code = self
            .provider
            .authenticated_representative_code()
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty());
        if code.is_none() {
            debug!("No authenticated representative in session");
        }
        code
    }
}

/// Fixed session for testing
#[cfg(test)]
pub struct StaticSession(pub Option<String>);

#[cfg(test)]
impl StaticSession {
    pub fn signed_in(code: &str) -> Self {
        Self(Some(code.to_string()))
    }

    pub fn signed_out() -> Self {
        Self(None)
    }
}

#[cfg(test)]
impl SessionProvider for StaticSession {
    fn authenticated_representative_code(&self) -> Option<String> {
        self.0.clone()
    }
}
