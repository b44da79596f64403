//! Shared-password gate for administrative actions.

use tracing::warn;

use crate::config::AdminConfig;
use crate::error::{Error, Result};

/// Checks the single shared admin password.
#[derive(Clone)]
pub struct AdminGate {
    password: String,
}

impl AdminGate {
    /// Create a gate for `password`.
    #[must_use]
    pub fn new(password: impl Into<String>) -> Self {
        Self {
            password: password.into(),
        }
    }

    /// Create a gate from the admin section of the configuration.
    #[must_use]
    pub fn from_config(config: &AdminConfig) -> Self {
        Self::new(config.password.clone())
    }

    /// Accept `attempt` if it matches the shared password exactly.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Unauthorized`] on mismatch.
    pub fn verify(&self, attempt: &str) -> Result<()> {
        if attempt == self.password {
            Ok(())
        } else {
            warn!("Rejected admin password");
            Err(Error::Unauthorized)
        }
    }
}

impl std::fmt::Debug for AdminGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminGate")
            .field("password", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_password() {
        let gate = AdminGate::from_config(&AdminConfig::default());
        assert!(gate.verify("2025").is_ok());
    }

    #[test]
    fn test_wrong_password() {
        let gate = AdminGate::new("2025");
        assert!(gate.verify("2024").unwrap_err().is_unauthorized());
        assert!(gate.verify("").unwrap_err().is_unauthorized());
        assert!(gate.verify(" 2025").is_err());
    }

    #[test]
    fn test_debug_hides_password() {
        let gate = AdminGate::new("hunter2");
        let debug_str = format!("{gate:?}");
        assert!(debug_str.contains("AdminGate"));
        assert!(!debug_str.contains("hunter2"));
    }
}
