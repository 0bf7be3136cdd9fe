use thiserror::Error;

use crate::classify::RemoteFailure;

#[derive(Debug, Error)]
pub enum GeminiError {
    /// Raised before any network call when the deployment lacks a credential.
    #[error("configuration error: {0}")]
    Config(String),

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("generation failed ({failure:?}): {detail}")]
    Remote {
        failure: RemoteFailure,
        detail: String,
    },

    #[error("response parsing failed: {0}")]
    ResponseParse(String),

    #[error("malformed generation result: {0}")]
    MalformedPlan(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl GeminiError {
    /// The blocking message shown to the user for this failure.
    pub fn user_message(&self) -> String {
        match self {
            GeminiError::Config(_) => {
                "Erro de configuração: a chave da API do Gemini não está configurada.".to_string()
            }
            GeminiError::InvalidRequest(detail) => {
                format!("Preencha todos os campos do formulário ({detail}).")
            }
            GeminiError::Remote { failure, .. } => failure.user_message().to_string(),
            GeminiError::ResponseParse(_) | GeminiError::MalformedPlan(_) => {
                "O plano gerado veio incompleto ou em formato inválido. Tente gerar novamente."
                    .to_string()
            }
            GeminiError::Serialization(_) => RemoteFailure::Unknown.user_message().to_string(),
        }
    }
}

impl From<aula_core::error::CoreError> for GeminiError {
    fn from(e: aula_core::error::CoreError) -> Self {
        use aula_core::error::CoreError;
        match e {
            CoreError::MalformedPlan(detail) => GeminiError::MalformedPlan(detail),
            CoreError::InvalidRequest(detail) => GeminiError::InvalidRequest(detail),
            CoreError::Serialization(e) => GeminiError::Serialization(e),
            CoreError::UnknownModality(id) => {
                GeminiError::InvalidRequest(format!("unknown teaching modality: {id}"))
            }
        }
    }
}
