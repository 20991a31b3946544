//! Default Configuration Values
//!
//! This module centralizes the default values used by the client, the prompt
//! builder and the CLI.

use std::time::Duration;

/// Server location defaults
pub mod server {
    /// Default Ollama host
    pub const HOST: &str = "localhost";

    /// Default Ollama port
    pub const PORT: u16 = 11434;

    /// Default model used for all requests
    pub const MODEL: &str = "deepseek-coder:6.7b";
}

/// HTTP timeouts
pub mod http {
    use super::*;

    /// Timeout for the connectivity check against `/api/tags`
    pub const CONNECT_CHECK_TIMEOUT: Duration = Duration::from_secs(5);

    /// Default User-Agent string for HTTP requests
    pub const USER_AGENT: &str = concat!("ollama-dev/", env!("CARGO_PKG_VERSION"));
}

/// Sampling defaults for `/api/generate`
pub mod sampling {
    /// Low temperature keeps generated code close to deterministic
    pub const TEMPERATURE: f32 = 0.2;

    /// Nucleus sampling cutoff
    pub const TOP_P: f32 = 0.9;

    /// Stop at the first blank line
    pub const STOP: &[&str] = &["\n\n"];

    /// Stop sequences used for inline code completion
    pub const COMPLETION_STOP: &[&str] = &["\n\n", "//"];
}

/// Prompt defaults
pub mod prompt {
    /// Persona sent as the first chat message
    pub const SYSTEM_PERSONA: &str = "You are an expert programming assistant.";

    /// Test framework used when none is given
    pub const TEST_FRAMEWORK: &str = "pytest";

    /// Refactoring goals used when none are given
    pub const REFACTOR_GOALS: &str = "improve readability and performance";
}

/// Environment variable names
pub mod env {
    pub const HOST: &str = "OLLAMA_HOST";
    pub const PORT: &str = "OLLAMA_PORT";
    pub const MODEL: &str = "OLLAMA_MODEL";

    pub const LOG_LEVEL: &str = "OLLAMA_DEV_LOG_LEVEL";
    pub const LOG_FORMAT: &str = "OLLAMA_DEV_LOG_FORMAT";
    pub const LOG_FILE: &str = "OLLAMA_DEV_LOG_FILE";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sampling_defaults() {
        assert_eq!(sampling::TEMPERATURE, 0.2);
        assert_eq!(sampling::TOP_P, 0.9);
        assert_eq!(sampling::STOP, &["\n\n"]);
    }

    #[test]
    fn test_user_agent_has_version() {
        assert!(http::USER_AGENT.starts_with("ollama-dev/"));
    }
}
