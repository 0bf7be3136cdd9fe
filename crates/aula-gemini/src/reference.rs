//! Loader for the static reference datasets served next to the app.
//!
//! Reference data only enriches the prompt. Any fetch or decode failure
//! degrades to an empty dataset with a warning and never fails generation.

use aula_core::models::reference::ReferenceData;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::{info, warn};

pub const CURRICULUM_PATH: &str = "data/bncc.json";
pub const DESCRIPTORS_PATH: &str = "data/saeb.json";

#[derive(Debug, Clone)]
pub struct ReferenceLoader {
    http: reqwest::Client,
    base_url: String,
}

impl ReferenceLoader {
    pub fn new(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Fetch both datasets concurrently, substituting empty containers for
    /// any that cannot be loaded.
    pub async fn load(&self) -> ReferenceData {
        let (curriculum, descriptors) = tokio::join!(
            self.fetch_or_default::<Vec<Value>>(CURRICULUM_PATH),
            self.fetch_or_default::<Map<String, Value>>(DESCRIPTORS_PATH),
        );

        info!(
            curriculum_entries = curriculum.len(),
            descriptor_entries = descriptors.len(),
            "reference data loaded"
        );

        ReferenceData {
            curriculum,
            descriptors,
        }
    }

    async fn fetch_or_default<T: DeserializeOwned + Default>(&self, path: &str) -> T {
        match self.fetch(path).await {
            Ok(value) => value,
            Err(reason) => {
                warn!(path, %reason, "reference dataset unavailable, using empty fallback");
                T::default()
            }
        }
    }

    async fn fetch<T: DeserializeOwned>(&self, path: &str) -> Result<T, String> {
        let url = format!("{}/{path}", self.base_url);

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| e.to_string())?;

        let status = response.status();
        if !status.is_success() {
            return Err(format!("HTTP {status}"));
        }

        let body = response.bytes().await.map_err(|e| e.to_string())?;
        serde_json::from_slice(&body).map_err(|e| format!("invalid JSON: {e}"))
    }
}
