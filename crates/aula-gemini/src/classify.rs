//! Remote-failure classification.
//!
//! Gemini reports failures as an HTTP status plus a JSON envelope
//! (`{"error": {"code", "message", "status"}}`). The typed path switches on
//! the status code and the canonical `status` string. Anything that does
//! not map is handed to [`classify_message`], a substring heuristic pinned
//! by tests to literal upstream messages so wording drift fails loudly.

use serde::{Deserialize, Serialize};

/// The closed set of remote failure categories surfaced to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RemoteFailure {
    RateLimited,
    Unauthorized,
    NotFound,
    ContentRejected,
    Unknown,
}

impl RemoteFailure {
    pub fn user_message(&self) -> &'static str {
        match self {
            RemoteFailure::RateLimited => {
                "Limite de uso da API atingido (cota excedida). Aguarde alguns minutos e tente novamente."
            }
            RemoteFailure::Unauthorized => {
                "A chave da API é inválida ou não tem permissão para usar o modelo."
            }
            RemoteFailure::NotFound => {
                "O modelo de IA configurado não foi encontrado. Verifique o nome do modelo."
            }
            RemoteFailure::ContentRejected => {
                "A solicitação foi bloqueada pelos filtros de segurança do modelo. Reformule o conteúdo."
            }
            RemoteFailure::Unknown => "Ocorreu um erro ao gerar o plano. Tente novamente.",
        }
    }
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
    #[serde(default)]
    status: Option<String>,
}

/// Map an HTTP status and Google canonical status to a category.
///
/// Returns `None` when neither carries a recognized code (e.g. a bare 400),
/// leaving the decision to the message heuristic.
pub fn classify_status(http_status: u16, google_status: Option<&str>) -> Option<RemoteFailure> {
    match google_status {
        Some("RESOURCE_EXHAUSTED") => return Some(RemoteFailure::RateLimited),
        Some("PERMISSION_DENIED") | Some("UNAUTHENTICATED") => {
            return Some(RemoteFailure::Unauthorized);
        }
        Some("NOT_FOUND") => return Some(RemoteFailure::NotFound),
        _ => {}
    }

    match http_status {
        429 => Some(RemoteFailure::RateLimited),
        401 | 403 => Some(RemoteFailure::Unauthorized),
        404 => Some(RemoteFailure::NotFound),
        _ => None,
    }
}

/// Substring heuristic over an opaque error description.
pub fn classify_message(message: &str) -> RemoteFailure {
    let lower = message.to_lowercase();

    if message.contains("429") || message.contains("RESOURCE_EXHAUSTED") || lower.contains("quota")
    {
        RemoteFailure::RateLimited
    } else if message.contains("403")
        || message.contains("API_KEY_INVALID")
        || lower.contains("api key not valid")
    {
        RemoteFailure::Unauthorized
    } else if message.contains("SAFETY") || lower.contains("blocked") {
        RemoteFailure::ContentRejected
    } else if message.contains("404") || lower.contains("not found") {
        RemoteFailure::NotFound
    } else {
        RemoteFailure::Unknown
    }
}

/// Classify a failed HTTP response: typed codes first, then the heuristic
/// over the error message (or the raw body when it is not an envelope).
pub fn classify(http_status: u16, body: &str) -> (RemoteFailure, String) {
    let envelope = serde_json::from_str::<ErrorEnvelope>(body).ok();
    let google_status = envelope.as_ref().and_then(|e| e.error.status.as_deref());
    let detail = envelope
        .as_ref()
        .map(|e| e.error.message.clone())
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| format!("HTTP {http_status}: {body}"));

    let failure =
        classify_status(http_status, google_status).unwrap_or_else(|| classify_message(&detail));
    (failure, detail)
}
