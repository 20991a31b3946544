//! Client configuration
//!
//! `OllamaConfig` is fixed once a client is built. It can be assembled with
//! [`OllamaConfig::builder`] or read from `OLLAMA_HOST` / `OLLAMA_PORT` /
//! `OLLAMA_MODEL` with [`OllamaConfig::from_env`].

use std::time::Duration;

use crate::defaults;
use crate::error::{ClientError, Result};

/// Ollama client configuration
#[derive(Debug, Clone, PartialEq)]
pub struct OllamaConfig {
    /// Base URL, e.g. `http://localhost:11434`
    base_url: String,
    /// Model used for generate and chat requests
    model: String,
    /// Timeout for the connectivity check
    connect_check_timeout: Duration,
    /// Timeout for every other request (`None` waits indefinitely)
    request_timeout: Option<Duration>,
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            base_url: format!("http://{}:{}", defaults::server::HOST, defaults::server::PORT),
            model: defaults::server::MODEL.to_string(),
            connect_check_timeout: defaults::http::CONNECT_CHECK_TIMEOUT,
            request_timeout: None,
        }
    }
}

impl OllamaConfig {
    /// Create a new builder
    pub fn builder() -> OllamaConfigBuilder {
        OllamaConfigBuilder::default()
    }

    /// Build a configuration from environment variables, falling back to defaults
    ///
    /// `OLLAMA_HOST` may be a bare host, `host:port`, or a full URL.
    pub fn from_env() -> Result<Self> {
        let mut builder = Self::builder();

        if let Ok(host) = std::env::var(defaults::env::HOST)
            && !host.trim().is_empty()
        {
            builder = builder.apply_host_value(host.trim())?;
        }

        if let Ok(port) = std::env::var(defaults::env::PORT) {
            let port = port.trim().parse::<u16>().map_err(|e| {
                ClientError::ConfigurationError(format!(
                    "Invalid {}: '{port}' ({e})",
                    defaults::env::PORT
                ))
            })?;
            builder = builder.port(port);
        }

        if let Ok(model) = std::env::var(defaults::env::MODEL)
            && !model.trim().is_empty()
        {
            builder = builder.model(model.trim());
        }

        builder.build()
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Get the model name
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Get the connectivity check timeout
    pub const fn connect_check_timeout(&self) -> Duration {
        self.connect_check_timeout
    }

    /// Get the request timeout
    pub const fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout
    }

    /// Join an API path onto the base URL
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

/// Builder for [`OllamaConfig`]
#[derive(Debug, Default, Clone)]
pub struct OllamaConfigBuilder {
    host: Option<String>,
    port: Option<u16>,
    base_url: Option<String>,
    model: Option<String>,
    connect_check_timeout: Option<Duration>,
    request_timeout: Option<Duration>,
}

impl OllamaConfigBuilder {
    /// Set the host name
    pub fn host<S: Into<String>>(mut self, host: S) -> Self {
        self.host = Some(host.into());
        self
    }

    /// Set the port
    pub const fn port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Set a full base URL; takes precedence over host and port
    pub fn base_url<S: Into<String>>(mut self, url: S) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the model to use, e.g. `deepseek-coder:6.7b`
    pub fn model<S: Into<String>>(mut self, model: S) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Set the connectivity check timeout
    pub const fn connect_check_timeout(mut self, timeout: Duration) -> Self {
        self.connect_check_timeout = Some(timeout);
        self
    }

    /// Set a timeout for generate, chat and model listing requests
    pub const fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    fn apply_host_value(self, value: &str) -> Result<Self> {
        if value.contains("://") {
            return Ok(self.base_url(value));
        }
        match value.rsplit_once(':') {
            Some((host, port)) => {
                let port = port.parse::<u16>().map_err(|e| {
                    ClientError::ConfigurationError(format!(
                        "Invalid port in {}: '{value}' ({e})",
                        defaults::env::HOST
                    ))
                })?;
                Ok(self.host(host).port(port))
            }
            None => Ok(self.host(value)),
        }
    }

    /// Build the configuration
    pub fn build(self) -> Result<OllamaConfig> {
        let base_url = match self.base_url {
            Some(url) => url.trim_end_matches('/').to_string(),
            None => {
                let host = self
                    .host
                    .unwrap_or_else(|| defaults::server::HOST.to_string());
                if host.trim().is_empty() {
                    return Err(ClientError::ConfigurationError(
                        "Host must not be empty".to_string(),
                    ));
                }
                let port = self.port.unwrap_or(defaults::server::PORT);
                format!("http://{host}:{port}")
            }
        };

        reqwest::Url::parse(&base_url).map_err(|e| {
            ClientError::ConfigurationError(format!("Invalid base URL '{base_url}': {e}"))
        })?;

        let model = self
            .model
            .unwrap_or_else(|| defaults::server::MODEL.to_string());
        if model.trim().is_empty() {
            return Err(ClientError::ConfigurationError(
                "Model must not be empty".to_string(),
            ));
        }

        Ok(OllamaConfig {
            base_url,
            model,
            connect_check_timeout: self
                .connect_check_timeout
                .unwrap_or(defaults::http::CONNECT_CHECK_TIMEOUT),
            request_timeout: self.request_timeout,
        })
    }
}
