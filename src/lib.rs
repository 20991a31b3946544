//! # ollama-dev - Code assistance on top of a local Ollama server
//!
//! A thin client for the Ollama HTTP API aimed at day-to-day development:
//! generating, explaining, reviewing, testing, debugging and refactoring code
//! snippets, plus a basic chat.
#![deny(unsafe_code)]

//! ## Features
//!
//! - **Explicit results**: every request has a `try_*` form returning [`ClientError`]
//!   so callers can tell "server down" from "empty answer".
//! - **Lenient helpers**: the plain forms (`generate_code`, `chat`, ...) report the
//!   failure and return `None`, which is all a CLI usually needs.
//! - **One request per call**: no retries, no streaming, no hidden state.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use ollama_dev::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = OllamaClient::new(OllamaConfig::default())?;
//!
//!     if !client.is_connected().await {
//!         eprintln!("Ollama is not running");
//!         return Ok(());
//!     }
//!
//!     let explanation = client
//!         .try_generate(&build_prompt(&TaskKind::explain("Rust"), "fn main() {}"), None)
//!         .await?;
//!     println!("{explanation}");
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod defaults;
pub mod error;
pub mod prompt;
pub mod sample;
pub mod telemetry;
pub mod types;

pub use client::OllamaClient;
pub use config::{OllamaConfig, OllamaConfigBuilder};
pub use error::{ClientError, Result};

/// Commonly used items
pub mod prelude {
    pub use crate::client::OllamaClient;
    pub use crate::config::OllamaConfig;
    pub use crate::error::ClientError;
    pub use crate::prompt::{TaskKind, build_prompt};
    pub use crate::types::{ChatMessage, MessageRole, SamplingOptions};
}
