use tera::{Context, Tera};

use aula_core::models::plan::LessonPlan;

use crate::error::ExportError;

/// Name under which the built-in print layout is registered.
pub const PRINT_TEMPLATE_NAME: &str = "plano.md";

/// The fixed, print-oriented layout. Output uses the Markdown subset
/// understood by [`crate::docx::generate_docx`].
pub const PRINT_TEMPLATE: &str = r#"# {{ title | upper }}

**{{ curricular_component }} • {{ grade }}**
Duração: {{ total_duration_min }} min ({{ lesson_count }} aulas)

## 1. Fundamentação

**Competência:** {{ specific_competency.code }} - {{ specific_competency.text }}

**Habilidades:**
{% for h in skills %}- **{{ h.code }}:** {{ h.text }}
{% endfor %}
**Objetivos de aprendizagem:**
{% for o in learning_objectives %}- {{ o }}
{% endfor %}
## 2. Metodologia
{% for etapa in methodology %}
### {{ etapa.stage }} ({{ etapa.duration_min }} min)
{% for a in etapa.activities %}- {{ a }}
{% endfor %}{% if etapa.resources %}Recursos: {{ etapa.resources | join(sep=", ") }}
{% endif %}{% endfor %}
## 3. Avaliação e Recuperação

**Critérios:**
{% for c in evaluation.criteria %}- {{ c }}
{% endfor %}
**Instrumentos:**
{% for i in evaluation.instruments %}- {{ i }}
{% endfor %}{% if weights %}
Pesos: prova {{ weights.test }}, atividade {{ weights.activity }}, participação {{ weights.participation }}
{% endif %}{% if remediation %}
**Recuperação / Reforço:**
{% for r in remediation %}- {{ r }}
{% endfor %}{% endif %}
## 4. Recursos e Inclusão

**Material de Apoio:**
{% for m in support_materials %}- {{ m.title }} ({{ m.link }})
{% endfor %}
**Adaptações NEE:**
{% for a in accessibility_adaptations %}- {{ a }}
{% endfor %}{% if notes %}
**Observações:** {{ notes }}
{% endif %}"#;

/// Build the template context for a plan.
///
/// Optional sections are inserted explicitly (as `null` when absent) so
/// templates can test them with a plain `if`.
fn plan_context(plan: &LessonPlan) -> Result<Context, ExportError> {
    let value = serde_json::to_value(plan)?;
    let mut context =
        Context::from_value(value).map_err(|e| ExportError::TemplateRender(e.to_string()))?;
    context.insert("remediation", &plan.remediation_activities);
    context.insert("weights", &plan.evaluation.weights);
    Ok(context)
}

/// Render a Tera template with a LessonPlan.
///
/// The `template_content` is the raw template string (Jinja2 syntax).
/// The plan fields become the template context variables.
pub fn render_template(
    template_name: &str,
    template_content: &str,
    plan: &LessonPlan,
) -> Result<String, ExportError> {
    let mut tera = Tera::default();
    tera.add_raw_template(template_name, template_content)
        .map_err(|e| ExportError::TemplateParse(e.to_string()))?;

    let context = plan_context(plan)?;
    let rendered = tera.render(template_name, &context)?;
    Ok(rendered)
}

/// Render the built-in print layout.
pub fn render_plan(plan: &LessonPlan) -> Result<String, ExportError> {
    render_template(PRINT_TEMPLATE_NAME, PRINT_TEMPLATE, plan)
}
