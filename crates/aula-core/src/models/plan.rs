use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Top-level envelope returned by structured generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LessonPlanResponse {
    pub lesson_plan: LessonPlan,
}

/// The Plan Document. Every field is addressable by name in a Tera template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LessonPlan {
    // Identifying
    pub title: String,
    pub curricular_component: String,
    pub subject: String,
    pub grade: String,
    pub knowledge_objects: Vec<String>,
    pub total_duration_min: u32,
    pub lesson_count: u32,

    // Curriculum grounding
    pub specific_competency: CodedItem,
    pub skills: Vec<CodedItem>,
    pub learning_objectives: Vec<String>,
    #[serde(default)]
    pub descriptors: Vec<CodedItem>,

    // Classroom
    pub methodology: Vec<MethodologyStage>,
    pub support_materials: Vec<SupportMaterial>,
    pub evaluation: EvaluationStrategy,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remediation_activities: Option<Vec<String>>,
    pub accessibility_adaptations: Vec<String>,
    pub notes: String,

    // Reserved, never filled in by Aula itself
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub export_formats: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation_hash: Option<String>,
}

impl LessonPlan {
    /// Sum of the per-stage durations.
    ///
    /// Not required to match `total_duration_min`; callers that care can
    /// compare the two themselves.
    pub fn methodology_minutes(&self) -> u32 {
        self.methodology.iter().map(|s| s.duration_min).sum()
    }
}

/// A curriculum code paired with its description (competency, skill, descriptor).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CodedItem {
    pub code: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct MethodologyStage {
    pub stage: String,
    pub duration_min: u32,
    pub activities: Vec<String>,
    pub resources: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SupportMaterial {
    pub kind: String,
    pub title: String,
    pub link: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct EvaluationStrategy {
    pub criteria: Vec<String>,
    pub instruments: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weights: Option<EvaluationWeights>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct EvaluationWeights {
    pub test: f64,
    pub activity: f64,
    pub participation: f64,
}
