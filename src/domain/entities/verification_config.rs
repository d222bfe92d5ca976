use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};

use crate::{
    constants::{
        DEFAULT_CONNECT_TIMEOUT, DEFAULT_TIMEOUT, SANDBOX_FALLBACK_ENV, SHARED_SECRET_ENV,
        USE_SANDBOX_ENV,
    },
    errors::IapError,
};

use super::environment::Environment;

/// Per-verifier configuration.
#[derive(Debug, Clone)]
pub struct VerificationConfig {
    /// Which verifyReceipt endpoint requests are sent to.
    pub environment: Environment,
    /// App-specific shared secret, sent as `password` when set. Only needed
    /// for receipts containing auto-renewable subscriptions.
    shared_secret: Option<SecretString>,
    /// When the endpoint answers 21007 / 21008, resend once to the other
    /// environment.
    pub sandbox_fallback: bool,
    /// Ask the App Store to return only the latest renewal of each
    /// subscription in `latest_receipt_info`.
    pub exclude_old_transactions: bool,
    pub connect_timeout: Duration,
    pub timeout: Duration,
}

impl Default for VerificationConfig {
    fn default() -> Self {
        Self {
            environment: Environment::Production,
            shared_secret: None,
            sandbox_fallback: false,
            exclude_old_transactions: false,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl VerificationConfig {
    pub fn new(environment: Environment) -> Self {
        Self {
            environment,
            ..Default::default()
        }
    }

    /// Reads the shared secret and environment flags from the process
    /// environment. Unset variables keep their defaults.
    pub fn from_env() -> Result<Self, IapError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, IapError> {
        let mut config = Self::default();
        if let Some(secret) = lookup(SHARED_SECRET_ENV).filter(|s| !s.is_empty()) {
            config.set_shared_secret(secret);
        }
        if let Some(value) = lookup(USE_SANDBOX_ENV) {
            config.set_sandbox(parse_flag(USE_SANDBOX_ENV, &value)?);
        }
        if let Some(value) = lookup(SANDBOX_FALLBACK_ENV) {
            config.sandbox_fallback = parse_flag(SANDBOX_FALLBACK_ENV, &value)?;
        }
        Ok(config)
    }

    pub fn with_shared_secret(mut self, secret: impl Into<String>) -> Self {
        self.set_shared_secret(secret);
        self
    }

    pub fn with_sandbox_fallback(mut self, enabled: bool) -> Self {
        self.sandbox_fallback = enabled;
        self
    }

    pub fn with_timeouts(mut self, connect_timeout: Duration, timeout: Duration) -> Self {
        self.connect_timeout = connect_timeout;
        self.timeout = timeout;
        self
    }

    pub fn set_sandbox(&mut self, use_sandbox: bool) {
        self.environment = if use_sandbox {
            Environment::Sandbox
        } else {
            Environment::Production
        };
    }

    pub fn set_shared_secret(&mut self, secret: impl Into<String>) {
        self.shared_secret = Some(SecretString::new(secret.into()));
    }

    pub fn clear_shared_secret(&mut self) {
        self.shared_secret = None;
    }

    pub fn has_shared_secret(&self) -> bool {
        self.shared_secret.is_some()
    }

    pub(crate) fn shared_secret(&self) -> Option<&str> {
        self.shared_secret
            .as_ref()
            .map(|secret| secret.expose_secret().as_str())
    }

    pub fn endpoint(&self) -> &'static str {
        self.environment.verify_receipt_url()
    }
}

fn parse_flag(key: &str, value: &str) -> Result<bool, IapError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => Ok(true),
        "0" | "false" | "no" | "" => Ok(false),
        other => Err(IapError::Configuration(format!(
            "{key} must be a boolean, got '{other}'"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = VerificationConfig::default();
        assert_eq!(config.environment, Environment::Production);
        assert!(!config.has_shared_secret());
        assert!(!config.sandbox_fallback);
        assert_eq!(config.endpoint(), "https://buy.itunes.apple.com/verifyReceipt");
        assert_eq!(config.timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_setters_are_idempotent() {
        let mut config = VerificationConfig::default();
        config.set_sandbox(true);
        config.set_sandbox(true);
        assert_eq!(config.environment, Environment::Sandbox);
        config.set_shared_secret("abc");
        config.set_shared_secret("abc");
        assert_eq!(config.shared_secret(), Some("abc"));
        config.clear_shared_secret();
        assert_eq!(config.shared_secret(), None);
    }

    #[test]
    fn test_secret_is_not_debug_printed() {
        let config = VerificationConfig::default().with_shared_secret("top-secret-value");
        assert!(!format!("{:?}", config).contains("top-secret-value"));
    }

    #[test]
    fn test_from_lookup() {
        let config = VerificationConfig::from_lookup(lookup_from(&[
            ("APP_STORE_SHARED_SECRET", "s3cret"),
            ("APP_STORE_USE_SANDBOX", "true"),
            ("APP_STORE_SANDBOX_FALLBACK", "1"),
        ]))
        .unwrap();
        assert_eq!(config.shared_secret(), Some("s3cret"));
        assert_eq!(config.environment, Environment::Sandbox);
        assert!(config.sandbox_fallback);
    }

    #[test]
    fn test_from_lookup_empty() {
        let config = VerificationConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.environment, Environment::Production);
        assert!(!config.has_shared_secret());
    }

    #[test]
    fn test_from_lookup_rejects_bad_flag() {
        let result =
            VerificationConfig::from_lookup(lookup_from(&[("APP_STORE_USE_SANDBOX", "maybe")]));
        assert!(matches!(result, Err(IapError::Configuration(_))));
    }
}
