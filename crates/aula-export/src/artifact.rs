use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use aula_core::models::plan::{LessonPlan, LessonPlanResponse};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::docx::generate_docx;
use crate::error::ExportError;
use crate::naming::export_file_name;
use crate::render::render_plan;
use crate::styles::DocumentStyles;
use crate::text::plain_text_summary;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportFormat {
    Text,
    Markdown,
    Docx,
    Json,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Text => "txt",
            ExportFormat::Markdown => "md",
            ExportFormat::Docx => "docx",
            ExportFormat::Json => "json",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ExportFormat::Text => "text",
            ExportFormat::Markdown => "markdown",
            ExportFormat::Docx => "docx",
            ExportFormat::Json => "json",
        })
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" | "txt" => Ok(ExportFormat::Text),
            "markdown" | "md" => Ok(ExportFormat::Markdown),
            "docx" => Ok(ExportFormat::Docx),
            "json" => Ok(ExportFormat::Json),
            other => Err(format!("unsupported export format: {other}")),
        }
    }
}

/// An exported file, not yet written anywhere.
#[derive(Debug, Clone)]
pub struct ExportArtifact {
    pub file_name: String,
    pub format: ExportFormat,
    pub bytes: Vec<u8>,
}

/// Produce the bytes of `plan` in the requested format.
pub fn export(
    plan: &LessonPlan,
    format: ExportFormat,
    styles: &DocumentStyles,
) -> Result<ExportArtifact, ExportError> {
    let bytes = match format {
        ExportFormat::Text => plain_text_summary(plan).into_bytes(),
        ExportFormat::Markdown => render_plan(plan)?.into_bytes(),
        ExportFormat::Docx => generate_docx(&render_plan(plan)?, styles)?,
        ExportFormat::Json => serde_json::to_vec_pretty(&LessonPlanResponse {
            lesson_plan: plan.clone(),
        })?,
    };

    Ok(ExportArtifact {
        file_name: export_file_name(&plan.title, format.extension()),
        format,
        bytes,
    })
}

/// Write an artifact into `dir`, returning the full path.
///
/// No cleanup is attempted if the write fails part-way.
pub fn write_artifact(dir: &Path, artifact: &ExportArtifact) -> Result<PathBuf, ExportError> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(&artifact.file_name);
    std::fs::write(&path, &artifact.bytes)?;

    info!(
        path = %path.display(),
        format = %artifact.format,
        bytes = artifact.bytes.len(),
        "export written"
    );
    Ok(path)
}
