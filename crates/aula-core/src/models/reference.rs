use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Static reference material embedded in the system instruction.
///
/// Both datasets are opaque JSON: Aula never interprets individual entries,
/// it only serializes them into the prompt.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReferenceData {
    /// Curriculum-standard entries (BNCC), a JSON array.
    pub curriculum: Vec<Value>,
    /// Assessment descriptors (SAEB), a JSON object.
    pub descriptors: Map<String, Value>,
}

impl ReferenceData {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.curriculum.is_empty() && self.descriptors.is_empty()
    }
}
