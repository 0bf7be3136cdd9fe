use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreError;

/// The form submission that drives one generation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LessonPlanRequest {
    /// Display name of the teaching modality, e.g. `"Ensino Médio"`.
    pub modality: String,
    pub curricular_component: String,
    pub grade: String,
    /// Knowledge object / topic typed by the user.
    pub topic: String,
    pub lesson_duration_min: u32,
    pub lesson_count: u32,
    pub detail_level: DetailLevel,
}

impl LessonPlanRequest {
    /// Check that every scalar is non-blank and every count is positive.
    pub fn validate(&self) -> Result<(), CoreError> {
        let strings = [
            ("modality", &self.modality),
            ("curricular_component", &self.curricular_component),
            ("grade", &self.grade),
            ("topic", &self.topic),
        ];
        for (name, value) in strings {
            if value.trim().is_empty() {
                return Err(CoreError::InvalidRequest(format!("{name} must not be empty")));
            }
        }
        if self.lesson_duration_min == 0 {
            return Err(CoreError::InvalidRequest(
                "lesson_duration_min must be positive".to_string(),
            ));
        }
        if self.lesson_count == 0 {
            return Err(CoreError::InvalidRequest(
                "lesson_count must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Total requested class time in minutes.
    pub fn total_minutes(&self) -> u32 {
        self.lesson_duration_min.saturating_mul(self.lesson_count)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum DetailLevel {
    #[serde(rename = "resumo")]
    Summary,
    #[default]
    #[serde(rename = "completo")]
    Complete,
    #[serde(rename = "detalhado")]
    Detailed,
}

impl DetailLevel {
    pub const ALL: [DetailLevel; 3] = [
        DetailLevel::Summary,
        DetailLevel::Complete,
        DetailLevel::Detailed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DetailLevel::Summary => "resumo",
            DetailLevel::Complete => "completo",
            DetailLevel::Detailed => "detalhado",
        }
    }
}

impl fmt::Display for DetailLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DetailLevel {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|level| level.as_str() == s)
            .ok_or_else(|| {
                CoreError::InvalidRequest(format!(
                    "unknown detail level '{s}' (expected resumo, completo or detalhado)"
                ))
            })
    }
}
