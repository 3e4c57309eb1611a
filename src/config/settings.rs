//! Application configuration settings
//!
//! Defines all configuration structures and loading logic

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::warn;

/// Default system instruction sent with every rewrite
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a professional human editor. Rewrite the following AI-generated text to make it sound 100% human, natural, and conversational. Maintain the original meaning but remove robotic patterns and vary sentence structure. Output only the rewritten text.";

/// Default completion endpoint base URL
pub const DEFAULT_BASE_URL: &str = "https://openrouter.ai/api/v1";

/// Default model identifier
pub const DEFAULT_MODEL: &str = "google/gemini-2.0-flash-lite-preview-02-05:free";

/// Environment variables checked for the provider credential, in order
pub const API_KEY_VARS: [&str; 2] = ["OPENROUTER_API_KEY", "OPENAI_API_KEY"];

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Server configuration
    pub server: ServerConfig,
    /// Completion provider configuration
    pub provider: ProviderConfig,
    /// Prompt configuration
    pub prompt: PromptConfig,
    /// Request configuration
    pub request: RequestConfig,
    /// Server-side quota configuration
    pub quota: QuotaConfig,
    /// Security configuration
    pub security: SecurityConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Listen host
    pub host: String,
    /// Listen port
    pub port: u16,
}

/// Completion provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// API key; `None` is reported per request, not at startup
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
    /// API base URL
    pub base_url: String,
    /// Model identifier
    pub model: String,
    /// Sampling temperature (optional)
    pub temperature: Option<f32>,
    /// Nucleus sampling (optional)
    pub top_p: Option<f32>,
    /// Upstream timeout in seconds
    pub timeout: u64,
}

/// Prompt configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptConfig {
    /// Fixed system instruction
    pub system_prompt: String,
}

/// Request configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestConfig {
    /// Maximum request size in bytes
    pub max_request_size: usize,
}

/// Server-side quota configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuotaConfig {
    /// Maximum words per submission, 0 disables the check
    pub max_input_words: usize,
}

/// Security configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    /// Allowed origins for CORS
    pub allowed_origins: Vec<String>,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log filter directive
    pub level: String,
    /// Log format (text/json)
    pub format: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8082,
            },
            provider: ProviderConfig {
                api_key: None,
                base_url: DEFAULT_BASE_URL.to_string(),
                model: DEFAULT_MODEL.to_string(),
                temperature: None,
                top_p: None,
                timeout: 40,
            },
            prompt: PromptConfig {
                system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
            },
            request: RequestConfig {
                max_request_size: 1024 * 1024,
            },
            quota: QuotaConfig {
                max_input_words: 2000,
            },
            security: SecurityConfig {
                allowed_origins: vec!["*".to_string()],
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                format: "text".to_string(),
            },
        }
    }
}

impl Settings {
    /// Create a new configuration instance from the process environment
    pub fn new() -> Result<Self> {
        // Load .env file if it exists
        dotenv::dotenv().ok();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());
        let defaults = Self::default();

        let api_key = API_KEY_VARS
            .iter()
            .filter_map(|key| lookup(key))
            .map(|value| value.trim().to_string())
            .find(|value| !value.is_empty());

        let settings = Self {
            server: ServerConfig {
                host: get("SERVER_HOST", &defaults.server.host),
                port: get("SERVER_PORT", "8082")
                    .parse()
                    .context("Invalid port number")?,
            },
            provider: ProviderConfig {
                api_key,
                base_url: get("PROVIDER_BASE_URL", DEFAULT_BASE_URL),
                model: get("PROVIDER_MODEL", DEFAULT_MODEL),
                temperature: parse_optional(lookup("PROVIDER_TEMPERATURE"))
                    .context("Invalid temperature value")?,
                top_p: parse_optional(lookup("PROVIDER_TOP_P"))
                    .context("Invalid top_p value")?,
                timeout: get("REQUEST_TIMEOUT", "40")
                    .parse()
                    .context("Invalid timeout value")?,
            },
            prompt: PromptConfig {
                system_prompt: get("SYSTEM_PROMPT", DEFAULT_SYSTEM_PROMPT),
            },
            request: RequestConfig {
                max_request_size: get("MAX_REQUEST_SIZE", "1048576")
                    .parse()
                    .context("Invalid maximum request size")?,
            },
            quota: QuotaConfig {
                max_input_words: get("MAX_INPUT_WORDS", "2000")
                    .parse()
                    .context("Invalid maximum input words")?,
            },
            security: SecurityConfig {
                allowed_origins: get("ALLOWED_ORIGINS", "*")
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect(),
            },
            logging: LoggingConfig {
                level: get("RUST_LOG", "info"),
                format: get("LOG_FORMAT", "text"),
            },
        };

        settings.validate()?;

        if settings.provider.api_key.is_none() {
            warn!(
                "No provider API key found in {}; rewrite requests will fail until it is set",
                API_KEY_VARS.join(" or ")
            );
        }

        Ok(settings)
    }

    /// Validate configuration validity
    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            anyhow::bail!("Port number cannot be 0");
        }

        if let Some(key) = &self.provider.api_key {
            if key.contains(char::is_whitespace) {
                anyhow::bail!("Provider API key cannot contain whitespace characters");
            }
        }

        if !self.provider.base_url.starts_with("http") {
            anyhow::bail!("Invalid provider base URL format, should start with 'http'");
        }

        if self.provider.model.trim().is_empty() {
            anyhow::bail!("Provider model cannot be empty");
        }

        if self.provider.timeout == 0 || self.provider.timeout > 300 {
            anyhow::bail!("Timeout must be between 1 and 300 seconds, got {}", self.provider.timeout);
        }

        if let Some(t) = self.provider.temperature {
            if !(0.0..=2.0).contains(&t) {
                anyhow::bail!("Temperature must be between 0 and 2, got {}", t);
            }
        }

        if let Some(p) = self.provider.top_p {
            if !(0.0..=1.0).contains(&p) {
                anyhow::bail!("top_p must be between 0 and 1, got {}", p);
            }
        }

        if self.prompt.system_prompt.trim().is_empty() {
            anyhow::bail!("System prompt cannot be empty");
        }

        if self.request.max_request_size == 0 {
            anyhow::bail!("Maximum request size cannot be 0");
        }

        if self.security.allowed_origins.is_empty() {
            anyhow::bail!("At least one allowed origin is required");
        }

        tracing_subscriber::EnvFilter::try_new(&self.logging.level)
            .with_context(|| format!("Invalid log level: {}", self.logging.level))?;

        let valid_formats = ["text", "json"];
        if !valid_formats.contains(&self.logging.format.as_str()) {
            anyhow::bail!("Invalid log format: {}", self.logging.format);
        }

        Ok(())
    }

    /// Whether the provider credential is present
    pub fn has_credential(&self) -> bool {
        self.provider.api_key.is_some()
    }

    /// Listen address in `host:port` form
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

fn parse_optional(value: Option<String>) -> Result<Option<f32>> {
    match value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty()) {
        Some(v) => Ok(Some(v.parse()?)),
        None => Ok(None),
    }
}

/// Build a lookup closure over a fixed map, handy for tests and tooling
pub fn map_lookup(vars: HashMap<String, String>) -> impl Fn(&str) -> Option<String> {
    move |key| vars.get(key).cloned()
}
