//! System instruction and task prompt assembly.
//!
//! Reference datasets are embedded as compact JSON inside delimited blocks.
//! Each dataset is cut to a character budget first: the remote service
//! has an input-size limit and the datasets can be large.

use aula_core::models::reference::ReferenceData;
use aula_core::models::request::LessonPlanRequest;
use tracing::warn;

/// Default per-dataset budget, in characters.
pub const REFERENCE_CHAR_BUDGET: usize = 15_000;

const TRUNCATION_MARKER: &str = "…[truncado]";

/// Cut `text` to at most `max_chars` characters on a char boundary.
///
/// Returns the kept prefix and whether anything was dropped.
pub fn truncate_chars(text: &str, max_chars: usize) -> (&str, bool) {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => (&text[..byte_idx], true),
        None => (text, false),
    }
}

fn dataset_block(name: &str, json: &str, budget_chars: usize) -> String {
    let (kept, truncated) = truncate_chars(json, budget_chars);
    if truncated {
        warn!(
            dataset = name,
            total_chars = json.chars().count(),
            budget_chars,
            "reference dataset truncated"
        );
    }

    let mut block = format!("--- DADOS {name} ---\n");
    block.push_str(kept);
    if truncated {
        block.push_str(TRUNCATION_MARKER);
    }
    block.push_str("\n------------------\n");
    block
}

/// Build the system instruction carrying both reference datasets.
pub fn build_system_instruction(reference: &ReferenceData, budget_chars: usize) -> String {
    // Serializing a Vec/Map of Values cannot fail.
    let curriculum = serde_json::to_string(&reference.curriculum).unwrap_or_default();
    let descriptors = serde_json::to_string(&reference.descriptors).unwrap_or_default();

    let mut instruction = String::from(
        "Você é um especialista em pedagogia e design instrucional, fluente em português do Brasil (pt-BR).\n\
         Sua tarefa é criar planos de aula detalhados e de alta qualidade, alinhados à Base Nacional \
         Comum Curricular (BNCC) e ao SAEB.\n\n\
         UTILIZE AS SEGUINTES BASES DE DADOS CARREGADAS PARA REFERÊNCIA:\n",
    );
    instruction.push_str(&dataset_block("BNCC", &curriculum, budget_chars));
    instruction.push_str(&dataset_block("SAEB", &descriptors, budget_chars));
    instruction.push_str(
        "\nInstruções: Siga rigorosamente o schema JSON. Use códigos reais da BNCC para \
         competências e habilidades. Todo o conteúdo deve estar em pt-BR.",
    );
    instruction
}

/// Build the task prompt from the form values.
pub fn build_task_prompt(request: &LessonPlanRequest) -> String {
    format!(
        "Por favor, gere um plano de aula completo com base nos seguintes parâmetros:\n\
         - Modalidade: {}\n\
         - Disciplina: {}\n\
         - Turma: {}\n\
         - Conteúdo: {}\n\
         - Duração: {} min ({} aulas)\n\
         - Detalhe: {}\n",
        request.modality,
        request.curricular_component,
        request.grade,
        request.topic,
        request.lesson_duration_min,
        request.lesson_count,
        request.detail_level,
    )
}
