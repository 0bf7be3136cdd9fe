use std::io::Write;
use std::path::{Path, PathBuf};

use aula_core::models::plan::LessonPlan;
use aula_export::artifact::{ExportFormat, export, write_artifact};
use aula_export::styles::DocumentStyles;

/// Export `plan` into directory `out`, or onto `stdout` when no directory
/// is given. Returns the written path in the first case.
///
/// DOCX is binary and always needs a directory.
pub fn write_plan<W: Write>(
    plan: &LessonPlan,
    format: ExportFormat,
    out: Option<&Path>,
    stdout: &mut W,
) -> eyre::Result<Option<PathBuf>> {
    if out.is_none() && format == ExportFormat::Docx {
        return Err(eyre::eyre!("DOCX output needs --out <dir>"));
    }

    let artifact = export(plan, format, &DocumentStyles::default())?;
    match out {
        Some(dir) => Ok(Some(write_artifact(dir, &artifact)?)),
        None => {
            stdout.write_all(&artifact.bytes)?;
            stdout.flush()?;
            Ok(None)
        }
    }
}
