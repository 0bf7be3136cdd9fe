use aula_core::models::plan::LessonPlan;

pub const WHATSAPP_BASE_URL: &str = "https://wa.me/";

/// The short message shared with colleagues: title plus objectives.
pub fn share_text(plan: &LessonPlan) -> String {
    let mut text = format!("Plano: {}", plan.title);
    for objective in &plan.learning_objectives {
        text.push('\n');
        text.push_str(objective);
    }
    text
}

/// A pre-filled WhatsApp link carrying [`share_text`].
pub fn whatsapp_link(plan: &LessonPlan) -> String {
    format!(
        "{WHATSAPP_BASE_URL}?text={}",
        urlencoding::encode(&share_text(plan))
    )
}
