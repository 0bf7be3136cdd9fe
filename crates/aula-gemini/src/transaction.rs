use aula_core::models::plan::LessonPlan;
use aula_core::models::reference::ReferenceData;
use aula_core::models::request::LessonPlanRequest;
use aula_core::plan::parse_plan;
use futures::{Stream, StreamExt};
use tracing::info;
use uuid::Uuid;

use crate::client::GeminiClient;
use crate::error::GeminiError;
use crate::reference::ReferenceLoader;

/// The outcome of one lesson-plan generation, held in memory only.
#[derive(Debug, Clone)]
pub struct GenerationResult {
    pub id: Uuid,
    pub model_id: String,
    pub fragment_count: usize,
    pub raw_text: String,
    pub plan: LessonPlan,
}

/// Concatenate every fragment in arrival order.
///
/// Consumes the stream; the first error ends collection.
pub async fn collect_fragments<S>(stream: S) -> Result<String, GeminiError>
where
    S: Stream<Item = Result<String, GeminiError>>,
{
    collect_with(stream, |_| {}).await.map(|(text, _)| text)
}

async fn collect_with<S, F>(stream: S, mut on_fragment: F) -> Result<(String, usize), GeminiError>
where
    S: Stream<Item = Result<String, GeminiError>>,
    F: FnMut(&str),
{
    let mut stream = Box::pin(stream);
    let mut text = String::new();
    let mut count = 0;

    while let Some(fragment) = stream.next().await {
        let fragment = fragment?;
        on_fragment(&fragment);
        text.push_str(&fragment);
        count += 1;
    }

    Ok((text, count))
}

/// Generate, stream and validate one lesson plan.
///
/// The credential and the request are checked before anything touches the
/// network, including the reference fetch. Reference data is loaded from `loader` when given,
/// otherwise the instruction carries empty datasets. Every fragment is
/// passed to `on_fragment` as it arrives.
pub async fn generate_lesson_plan<F>(
    client: &GeminiClient,
    loader: Option<&ReferenceLoader>,
    request: &LessonPlanRequest,
    on_fragment: F,
) -> Result<GenerationResult, GeminiError>
where
    F: FnMut(&str),
{
    client.api_key()?;
    request.validate()?;

    let transaction_id = Uuid::new_v4();
    let model_id = client.settings().model.clone();
    info!(transaction_id = %transaction_id, model = %model_id, "starting lesson plan generation");

    let reference = match loader {
        Some(loader) => loader.load().await,
        None => ReferenceData::empty(),
    };

    let stream = client.generate_stream(request, &reference).await?;
    let (raw_text, fragment_count) = collect_with(stream, on_fragment).await?;

    let plan = parse_plan(&raw_text)?;

    info!(
        transaction_id = %transaction_id,
        fragments = fragment_count,
        chars = raw_text.len(),
        "lesson plan generation complete"
    );

    Ok(GenerationResult {
        id: transaction_id,
        model_id,
        fragment_count,
        raw_text,
        plan,
    })
}
