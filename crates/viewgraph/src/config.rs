//! Agent environment configuration.
//!
//! The embedding reasoning loop talks to an LLM; the credential and tuning
//! knobs for that live in environment variables with a documented
//! precedence:
//!
//! 1. `VIEWGRAPH_ANTHROPIC_API_KEY`: agent-specific key, recommended for
//!    production (per-agent cost tracking and rate limits)
//! 2. `ANTHROPIC_API_KEY`: generic fallback for development
//!
//! Optional overrides: `VIEWGRAPH_MODEL` (model name) and
//! `VIEWGRAPH_TIMEOUT_SECONDS` (request timeout). None of these affect the
//! dependency engine itself.

use std::time::Duration;

use crate::error::{Error, Result};

/// Model used when `VIEWGRAPH_MODEL` is not set.
pub const DEFAULT_MODEL: &str = "claude-3-7-sonnet-20250219";

/// Request timeout used when `VIEWGRAPH_TIMEOUT_SECONDS` is not set.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Configuration for the hosting agent's LLM calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentConfig {
    /// API credential, resolved through the documented precedence.
    pub api_key: String,
    /// Model name.
    pub model: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl AgentConfig {
    /// Load configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] when no API key variable is set or the
    /// timeout override is not a number.
    pub fn from_env() -> Result<Self> {
        Self::from_env_with(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// This is the testable core of [`Self::from_env`].
    ///
    /// # Errors
    ///
    /// Same conditions as [`Self::from_env`].
    pub fn from_env_with(get: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let api_key = get("VIEWGRAPH_ANTHROPIC_API_KEY")
            .filter(|key| !key.trim().is_empty())
            .or_else(|| get("ANTHROPIC_API_KEY").filter(|key| !key.trim().is_empty()))
            .ok_or_else(|| {
                Error::Config(
                    "no API key found: set VIEWGRAPH_ANTHROPIC_API_KEY (recommended) \
                     or ANTHROPIC_API_KEY"
                        .to_string(),
                )
            })?;

        let model = get("VIEWGRAPH_MODEL")
            .filter(|model| !model.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());

        let timeout = match get("VIEWGRAPH_TIMEOUT_SECONDS") {
            Some(raw) => {
                let seconds: u64 = raw.trim().parse().map_err(|_| {
                    Error::Config(format!(
                        "VIEWGRAPH_TIMEOUT_SECONDS must be a number of seconds, got '{raw}'"
                    ))
                })?;
                Duration::from_secs(seconds)
            }
            None => DEFAULT_TIMEOUT,
        };

        Ok(Self {
            api_key,
            model,
            timeout,
        })
    }
}
