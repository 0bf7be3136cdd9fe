//! Effective runtime settings: file config merged with command-line
//! overrides and the credential from the environment.

use aula_gemini::client::GeminiSettings;

use crate::config::AulaConfig;

/// The single documented credential variable.
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Command-line overrides; `None` keeps the config value.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub model: Option<String>,
    pub reference_base_url: Option<String>,
    pub no_reference: bool,
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub gemini: GeminiSettings,
    pub reference_base_url: Option<String>,
}

impl Settings {
    /// Merge `config` with `overrides`, looking the credential up once
    /// through `env`.
    ///
    /// A missing credential is not an error here; generation reports it.
    pub fn resolve<E>(config: &AulaConfig, overrides: &Overrides, env: E) -> Self
    where
        E: Fn(&str) -> Option<String>,
    {
        let api_key = env(API_KEY_ENV).filter(|k| !k.trim().is_empty());
        if api_key.is_none() {
            tracing::debug!(var = API_KEY_ENV, "no API key in environment");
        }

        let reference_base_url = if overrides.no_reference {
            None
        } else {
            overrides
                .reference_base_url
                .clone()
                .or_else(|| config.reference_base_url.clone())
        };

        Self {
            gemini: GeminiSettings {
                api_key,
                base_url: config.api_base_url.clone(),
                model: overrides.model.clone().unwrap_or_else(|| config.model.clone()),
                temperature: config.temperature,
                max_output_tokens: config.max_output_tokens,
                reference_char_budget: config.reference_char_budget,
            },
            reference_base_url,
        }
    }

    /// Resolve against the process environment.
    pub fn from_process_env(config: &AulaConfig, overrides: &Overrides) -> Self {
        Self::resolve(config, overrides, |name| std::env::var(name).ok())
    }
}
