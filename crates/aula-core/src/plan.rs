//! Parsing and validation of generated Plan Documents.
//!
//! Generated text comes from an untrusted remote model. It is turned into a
//! [`LessonPlan`] here and nowhere else, so renderers and exporters only
//! ever see documents that passed these checks.

use crate::error::CoreError;
use crate::models::plan::{LessonPlan, LessonPlanResponse};

/// Parse the concatenated generation output into a validated plan.
///
/// Serde enforces the presence and type of every required field. The
/// explicit checks below cover what the type system cannot: required
/// strings that must carry content.
pub fn parse_plan(text: &str) -> Result<LessonPlan, CoreError> {
    let response: LessonPlanResponse = serde_json::from_str(text.trim())
        .map_err(|e| CoreError::MalformedPlan(e.to_string()))?;

    validate_plan(&response.lesson_plan)?;
    Ok(response.lesson_plan)
}

/// Structural checks beyond what deserialization guarantees.
///
/// Stage durations are deliberately not compared with the total duration.
pub fn validate_plan(plan: &LessonPlan) -> Result<(), CoreError> {
    require_text("title", &plan.title)?;
    require_text("specific_competency.code", &plan.specific_competency.code)?;
    require_text("specific_competency.text", &plan.specific_competency.text)?;

    for (i, stage) in plan.methodology.iter().enumerate() {
        require_text(&format!("methodology[{i}].stage"), &stage.stage)?;
    }

    Ok(())
}

fn require_text(field: &str, value: &str) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::MalformedPlan(format!(
            "required field {field} is blank"
        )));
    }
    Ok(())
}
