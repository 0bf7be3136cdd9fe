use aula_core::models::catalog::Modality;
use aula_core::models::reference::ReferenceData;
use aula_core::models::request::{DetailLevel, LessonPlanRequest};
use aula_gemini::prompt::{build_system_instruction, build_task_prompt, truncate_chars};
use serde_json::json;

fn request() -> LessonPlanRequest {
    LessonPlanRequest {
        topic: "Frações equivalentes".to_string(),
        detail_level: DetailLevel::Detailed,
        ..Modality::Elementary.default_request()
    }
}

#[test]
fn truncate_keeps_short_text_whole() {
    assert_eq!(truncate_chars("abc", 5), ("abc", false));
    assert_eq!(truncate_chars("abc", 3), ("abc", false));
}

#[test]
fn truncate_counts_chars_not_bytes() {
    let (kept, truncated) = truncate_chars("ação é bom", 4);
    assert_eq!(kept, "ação");
    assert!(truncated);
}

#[test]
fn empty_reference_still_produces_both_blocks() {
    let instruction = build_system_instruction(&ReferenceData::empty(), 100);
    assert!(instruction.contains("--- DADOS BNCC ---\n[]\n"));
    assert!(instruction.contains("--- DADOS SAEB ---\n{}\n"));
    assert!(instruction.contains("Siga rigorosamente o schema JSON"));
}

#[test]
fn reference_data_is_cut_to_budget() {
    let reference = ReferenceData {
        curriculum: (0..200)
            .map(|i| json!({ "codigo": format!("EF0{i}MA01"), "descricao": "habilidade" }))
            .collect(),
        descriptors: serde_json::from_value(json!({ "D1": "Localizar informações" })).unwrap(),
    };

    let instruction = build_system_instruction(&reference, 50);
    let bncc = instruction
        .split("--- DADOS BNCC ---\n")
        .nth(1)
        .and_then(|rest| rest.split('\n').next())
        .unwrap();

    assert!(bncc.ends_with("…[truncado]"));
    assert_eq!(bncc.trim_end_matches("…[truncado]").chars().count(), 50);
    // The small dataset fits and is embedded whole.
    assert!(instruction.contains("{\"D1\":\"Localizar informações\"}"));
}

#[test]
fn task_prompt_lists_every_form_value() {
    let prompt = build_task_prompt(&request());
    assert!(prompt.contains("- Modalidade: Ensino Fundamental"));
    assert!(prompt.contains("- Disciplina: Língua Portuguesa"));
    assert!(prompt.contains("- Turma: 1º Ano"));
    assert!(prompt.contains("- Conteúdo: Frações equivalentes"));
    assert!(prompt.contains("- Duração: 45 min (1 aulas)"));
    assert!(prompt.contains("- Detalhe: detalhado"));
}
