use crate::services::providers::gemini::{GeminiConfig, DEFAULT_GEMINI_MODEL, GEMINI_API_BASE};
use secrecy::Secret;
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;
use std::time::Duration;
use validator::Validate;

/// Default transport timeout for a single Gemini call.
const DEFAULT_TIMEOUT_SECS: u64 = 120;

#[derive(Debug, Clone)]
pub struct SimplifyConfig {
    pub common: core_config::Config,
    pub gemini: GeminiSettings,
}

#[derive(Debug, Clone, Validate)]
pub struct GeminiSettings {
    pub api_key: Secret<String>,
    #[validate(length(min = 1))]
    pub model: String,
    #[validate(url)]
    pub api_base: String,
    #[validate(range(min = 1, max = 600))]
    pub timeout_secs: u64,
}

impl GeminiSettings {
    pub fn provider_config(&self) -> GeminiConfig {
        GeminiConfig {
            api_key: self.api_key.clone(),
            model: self.model.clone(),
            api_base: self.api_base.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
        }
    }
}

impl SimplifyConfig {
    /// Load from `.env`, `configuration.*` and the process environment.
    ///
    /// A missing `GEMINI_API_KEY` loads as empty; the service still starts and
    /// answers `/simplify` with a server error until a key is provided.
    pub fn load() -> Result<Self, AppError> {
        let common = core_config::Config::load()?;
        Self::from_lookup(common, |key| env::var(key).ok())
    }

    pub fn from_lookup<F>(common: core_config::Config, lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = env_or(&lookup, "GEMINI_API_KEY", "");

        let timeout_secs = match lookup("GEMINI_TIMEOUT_SECS") {
            Some(raw) => raw.trim().parse().map_err(|e| {
                AppError::ConfigError(anyhow::anyhow!(
                    "GEMINI_TIMEOUT_SECS must be a whole number of seconds: {}",
                    e
                ))
            })?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        let gemini = GeminiSettings {
            api_key: Secret::new(api_key),
            model: env_or(&lookup, "GEMINI_MODEL", DEFAULT_GEMINI_MODEL),
            api_base: env_or(&lookup, "GEMINI_API_BASE", GEMINI_API_BASE),
            timeout_secs,
        };
        gemini.validate()?;

        Ok(SimplifyConfig { common, gemini })
    }
}

fn env_or<F>(lookup: &F, key: &str, default: &str) -> String
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key).unwrap_or_else(|| default.to_string())
}
