//! Flattened plain-text summary of a plan.
//!
//! Output depends only on the plan, so it is byte-identical across calls.

use std::fmt::Write;

use aula_core::models::plan::LessonPlan;

fn section(out: &mut String, title: &str) {
    out.push('\n');
    out.push_str(title);
    out.push('\n');
    out.push_str(&"-".repeat(title.chars().count()));
    out.push('\n');
}

fn bullets<'a>(out: &mut String, items: impl IntoIterator<Item = &'a String>) {
    for item in items {
        out.push_str("  - ");
        out.push_str(item);
        out.push('\n');
    }
}

pub fn plain_text_summary(plan: &LessonPlan) -> String {
    let mut out = String::new();

    // Writing into a String is infallible; results are discarded below.
    let _ = writeln!(out, "{}", plan.title.to_uppercase());
    let _ = writeln!(
        out,
        "{} ({}) - {}",
        plan.curricular_component, plan.subject, plan.grade
    );
    let _ = writeln!(
        out,
        "Duração: {} min ({} aulas)",
        plan.total_duration_min, plan.lesson_count
    );

    if !plan.knowledge_objects.is_empty() {
        section(&mut out, "Objetos de conhecimento");
        bullets(&mut out, &plan.knowledge_objects);
    }

    section(&mut out, "Fundamentação");
    let _ = writeln!(
        out,
        "Competência: {} - {}",
        plan.specific_competency.code, plan.specific_competency.text
    );
    out.push_str("Habilidades:\n");
    for skill in &plan.skills {
        let _ = writeln!(out, "  - {}: {}", skill.code, skill.text);
    }
    if !plan.descriptors.is_empty() {
        out.push_str("Descritores:\n");
        for d in &plan.descriptors {
            let _ = writeln!(out, "  - {}: {}", d.code, d.text);
        }
    }

    section(&mut out, "Objetivos de aprendizagem");
    bullets(&mut out, &plan.learning_objectives);

    section(&mut out, "Metodologia");
    for stage in &plan.methodology {
        let _ = writeln!(out, "{} ({} min)", stage.stage, stage.duration_min);
        bullets(&mut out, &stage.activities);
        if !stage.resources.is_empty() {
            let _ = writeln!(out, "  Recursos: {}", stage.resources.join(", "));
        }
    }

    section(&mut out, "Avaliação");
    out.push_str("Critérios:\n");
    bullets(&mut out, &plan.evaluation.criteria);
    out.push_str("Instrumentos:\n");
    bullets(&mut out, &plan.evaluation.instruments);
    if let Some(w) = plan.evaluation.weights {
        let _ = writeln!(
            out,
            "Pesos: prova {}, atividade {}, participação {}",
            w.test, w.activity, w.participation
        );
    }

    if let Some(remediation) = plan.remediation_activities.as_ref().filter(|r| !r.is_empty()) {
        section(&mut out, "Recuperação / Reforço");
        bullets(&mut out, remediation);
    }

    section(&mut out, "Material de apoio");
    for m in &plan.support_materials {
        let _ = writeln!(out, "  - [{}] {}: {}", m.kind, m.title, m.link);
    }

    section(&mut out, "Adaptações NEE");
    bullets(&mut out, &plan.accessibility_adaptations);

    if !plan.notes.trim().is_empty() {
        section(&mut out, "Observações");
        out.push_str(plan.notes.trim());
        out.push('\n');
    }

    out
}
