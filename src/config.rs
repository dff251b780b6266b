//! Client configuration: gateway environment selection and HTTP options.

use std::time::Duration;

use crate::constants::{PRODUCTION_BASE_URL, SANDBOX_BASE_URL};

/// Which Pesapal deployment the client talks to.
///
/// Selected once at construction and applied to every endpoint URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    /// The live gateway at `pay.pesapal.com`.
    #[default]
    Production,
    /// The demo gateway at `cybqa.pesapal.com`. Sandbox credentials only.
    Sandbox,
}

impl Environment {
    /// Returns the base URL for this environment (no trailing slash).
    #[must_use]
    pub const fn base_url(self) -> &'static str {
        match self {
            Self::Production => PRODUCTION_BASE_URL,
            Self::Sandbox => SANDBOX_BASE_URL,
        }
    }
}

/// Configuration for a [`Pesapal`](crate::Pesapal) client.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use pesapal::{ClientConfig, Environment};
///
/// let config = ClientConfig::new(Environment::Sandbox)
///     .with_timeout(Duration::from_secs(10));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ClientConfig {
    /// Gateway deployment to target.
    pub environment: Environment,

    /// Overrides the environment-derived base URL when set. Intended for
    /// tests and self-hosted proxies.
    pub base_url: Option<String>,

    /// HTTP request timeout. Ignored when [`Self::http_client`] is set.
    pub timeout: Option<Duration>,

    /// Optional pre-configured reqwest client. If `None`, a new client is
    /// created with the configured timeout.
    pub http_client: Option<reqwest::Client>,
}

impl ClientConfig {
    /// Default HTTP request timeout.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

    /// Creates a config targeting the given environment.
    #[must_use]
    pub fn new(environment: Environment) -> Self {
        Self {
            environment,
            ..Self::default()
        }
    }

    /// Sets the environment.
    #[must_use]
    pub const fn with_environment(mut self, environment: Environment) -> Self {
        self.environment = environment;
        self
    }

    /// Overrides the base URL, bypassing environment selection.
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Sets the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets a pre-configured reqwest client.
    #[must_use]
    pub fn with_http_client(mut self, client: reqwest::Client) -> Self {
        self.http_client = Some(client);
        self
    }

    /// The base URL this config resolves to.
    #[must_use]
    pub fn effective_base_url(&self) -> &str {
        self.base_url
            .as_deref()
            .unwrap_or_else(|| self.environment.base_url())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn environment_base_urls() {
        assert_eq!(
            Environment::Production.base_url(),
            "https://pay.pesapal.com/v3/api"
        );
        assert_eq!(
            Environment::Sandbox.base_url(),
            "https://cybqa.pesapal.com/pesapalv3/api"
        );
    }

    #[test]
    fn default_config_targets_production() {
        let config = ClientConfig::default();
        assert_eq!(config.environment, Environment::Production);
        assert_eq!(config.effective_base_url(), PRODUCTION_BASE_URL);
        assert!(config.http_client.is_none());
    }

    #[test]
    fn base_url_override_wins() {
        let config = ClientConfig::new(Environment::Sandbox).with_base_url("http://localhost:9");
        assert_eq!(config.effective_base_url(), "http://localhost:9");
    }
}
