use std::path::{Path, PathBuf};

use aula_gemini::client::{
    DEFAULT_API_BASE_URL, DEFAULT_MAX_OUTPUT_TOKENS, DEFAULT_MODEL, DEFAULT_TEMPERATURE,
};
use aula_gemini::prompt::REFERENCE_CHAR_BUDGET;
use serde::{Deserialize, Serialize};

/// Current config version. Bump this when adding fields or changing shape.
/// Each bump requires a corresponding entry in [`migrate`].
const CURRENT_VERSION: u32 = 1;

const CONFIG_FILE: &str = "config.json";

/// Optional on-disk settings. The credential is never stored here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AulaConfig {
    /// Schema version. Missing or 0 = pre-versioned config.
    pub config_version: u32,
    pub model: String,
    pub temperature: f32,
    pub max_output_tokens: u32,
    pub api_base_url: String,
    /// Where `data/bncc.json` and `data/saeb.json` are served from.
    /// `None` disables reference data.
    pub reference_base_url: Option<String>,
    /// Per-dataset character budget. Added in v1.
    pub reference_char_budget: usize,
}

impl Default for AulaConfig {
    fn default() -> Self {
        Self {
            config_version: CURRENT_VERSION,
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            max_output_tokens: DEFAULT_MAX_OUTPUT_TOKENS,
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            reference_base_url: None,
            reference_char_budget: REFERENCE_CHAR_BUDGET,
        }
    }
}

/// Redacted view of the effective settings, safe to print.
#[derive(Debug, Clone, Serialize)]
pub struct ConfigInfo {
    pub path: String,
    pub from_file: bool,
    pub model: String,
    pub temperature: f32,
    pub max_output_tokens: u32,
    pub api_base_url: String,
    pub reference_base_url: Option<String>,
    pub reference_char_budget: usize,
    pub api_key_hint: Option<String>,
}

pub fn config_dir() -> eyre::Result<PathBuf> {
    let base = dirs::config_dir().ok_or_else(|| eyre::eyre!("no config directory found"))?;
    Ok(base.join("aula"))
}

/// The config file inside `dir`.
pub fn config_file(dir: &Path) -> PathBuf {
    dir.join(CONFIG_FILE)
}

/// Load the config at `path`, or defaults when no file exists.
pub fn load_or_default(path: &Path) -> eyre::Result<AulaConfig> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no config file, using defaults");
        return Ok(AulaConfig::default());
    }
    load_config(path)
}

pub fn load_config(path: &Path) -> eyre::Result<AulaConfig> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| eyre::eyre!("failed to read config at {}: {e}", path.display()))?;

    // Parse as raw JSON so we can run migrations before deserializing.
    let json: serde_json::Value = serde_json::from_str(&contents)?;
    let on_disk_version = json
        .get("config_version")
        .and_then(|v| v.as_u64())
        .unwrap_or(0) as u32;

    let migrated = migrate(json, on_disk_version)?;
    let config: AulaConfig = serde_json::from_value(migrated)?;
    Ok(config)
}

/// Run sequential migrations from `from_version` up to [`CURRENT_VERSION`].
///
/// Each migration is a pure transform on the raw JSON value.
pub fn migrate(mut json: serde_json::Value, from_version: u32) -> eyre::Result<serde_json::Value> {
    if from_version > CURRENT_VERSION {
        return Err(eyre::eyre!(
            "config_version {from_version} is newer than this build supports ({CURRENT_VERSION}). \
             Please update aula."
        ));
    }

    // v0 → v1: `api_url` renamed to `api_base_url`, reference budget added
    if from_version < 1 {
        let obj = json
            .as_object_mut()
            .ok_or_else(|| eyre::eyre!("config is not a JSON object"))?;
        if let Some(url) = obj.remove("api_url") {
            obj.entry("api_base_url").or_insert(url);
        }
        obj.entry("reference_char_budget")
            .or_insert(serde_json::Value::Number(REFERENCE_CHAR_BUDGET.into()));
        obj.insert(
            "config_version".to_string(),
            serde_json::Value::Number(1.into()),
        );
        tracing::info!("migrated config v0 → v1 (api_base_url, reference_char_budget)");
    }

    Ok(json)
}

/// Write `config` into `dir/config.json`, returning the path.
pub fn save_config(dir: &Path, config: &AulaConfig) -> eyre::Result<PathBuf> {
    std::fs::create_dir_all(dir)?;

    // Always write the current version, regardless of what was loaded.
    let mut stamped = config.clone();
    stamped.config_version = CURRENT_VERSION;

    let path = config_file(dir);
    let json = serde_json::to_string_pretty(&stamped)?;

    // Write to a temp file then rename for atomicity
    let tmp_path = dir.join("config.json.tmp");
    std::fs::write(&tmp_path, json.as_bytes())?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(&tmp_path, std::fs::Permissions::from_mode(0o600))?;
    }

    std::fs::rename(&tmp_path, &path)?;

    tracing::info!(path = %path.display(), "config saved");
    Ok(path)
}

pub fn config_info(
    path: &Path,
    config: &AulaConfig,
    api_key: Option<&str>,
) -> ConfigInfo {
    ConfigInfo {
        path: path.display().to_string(),
        from_file: path.exists(),
        model: config.model.clone(),
        temperature: config.temperature,
        max_output_tokens: config.max_output_tokens,
        api_base_url: config.api_base_url.clone(),
        reference_base_url: config.reference_base_url.clone(),
        reference_char_budget: config.reference_char_budget,
        api_key_hint: api_key.map(redact_key),
    }
}

/// Keep only the first and last four characters of a secret.
pub fn redact_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= 8 {
        return "****".to_string();
    }
    let prefix: String = chars[..4].iter().collect();
    let suffix: String = chars[chars.len() - 4..].iter().collect();
    format!("{prefix}...{suffix}")
}
