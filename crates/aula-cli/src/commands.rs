use std::io::Write;
use std::path::{Path, PathBuf};

use aula_cli::config::{self, AulaConfig};
use aula_cli::output::write_plan;
use aula_cli::settings::{Overrides, Settings};
use aula_core::models::catalog::Modality;
use aula_core::models::plan::LessonPlan;
use aula_core::models::request::DetailLevel;
use aula_core::plan::parse_plan;
use aula_export::artifact::ExportFormat;
use aula_export::share::{share_text, whatsapp_link};
use aula_gemini::client::GeminiClient;
use aula_gemini::reference::ReferenceLoader;
use aula_gemini::transaction::generate_lesson_plan;
use eyre::{Result, eyre};
use tracing::{error, info, warn};

pub struct GenerateArgs {
    pub modality: String,
    pub component: Option<String>,
    pub grade: Option<String>,
    pub topic: String,
    pub duration: Option<u32>,
    pub lessons: Option<u32>,
    pub detail: Option<DetailLevel>,
    pub format: ExportFormat,
    pub out: Option<PathBuf>,
    pub stream: bool,
    pub overrides: Overrides,
}

pub async fn generate(config: &AulaConfig, args: GenerateArgs) -> Result<()> {
    let modality = Modality::from_id(&args.modality)?;

    let mut request = modality.default_request();
    request.topic = args.topic;
    if let Some(component) = args.component {
        request.curricular_component = component;
    }
    if let Some(grade) = args.grade {
        request.grade = grade;
    }
    if let Some(duration) = args.duration {
        request.lesson_duration_min = duration;
    }
    if let Some(lessons) = args.lessons {
        request.lesson_count = lessons;
    }
    if let Some(detail) = args.detail {
        request.detail_level = detail;
    }

    if !modality.accepts(&request) {
        warn!(
            modality = modality.id(),
            component = %request.curricular_component,
            grade = %request.grade,
            "request uses options outside the catalog for this modality"
        );
    }

    let settings = Settings::from_process_env(config, &args.overrides);
    let http = reqwest::Client::new();
    let loader = settings
        .reference_base_url
        .as_ref()
        .map(|url| ReferenceLoader::new(http.clone(), url.clone()));
    if loader.is_none() {
        info!("reference data disabled, prompting without BNCC/SAEB excerpts");
    }
    let client = GeminiClient::with_http(http, settings.gemini);

    let stream = args.stream;
    let result = generate_lesson_plan(&client, loader.as_ref(), &request, |fragment| {
        if stream {
            let mut err = std::io::stderr().lock();
            let _ = err.write_all(fragment.as_bytes());
            let _ = err.flush();
        }
    })
    .await;
    if stream {
        eprintln!();
    }

    let result = match result {
        Ok(result) => result,
        Err(e) => {
            error!(error = %e, "lesson plan generation failed");
            return Err(eyre!(e.user_message()));
        }
    };

    info!(
        transaction_id = %result.id,
        model = %result.model_id,
        fragments = result.fragment_count,
        "plan ready"
    );

    emit(&result.plan, args.format, args.out.as_deref())
}

pub fn render(input: &Path, format: ExportFormat, out: Option<&Path>) -> Result<()> {
    let plan = read_plan(input)?;
    emit(&plan, format, out)
}

pub fn share(input: &Path) -> Result<()> {
    let plan = read_plan(input)?;
    println!("{}", share_text(&plan));
    println!();
    println!("{}", whatsapp_link(&plan));
    Ok(())
}

pub fn catalog(modality: Option<&str>) -> Result<()> {
    let modalities = match modality {
        Some(id) => vec![Modality::from_id(id)?],
        None => Modality::ALL.to_vec(),
    };

    for modality in modalities {
        println!("{} ({})", modality.display_name(), modality.id());
        println!("  Componentes: {}", modality.curricular_components().join(", "));
        println!("  Anos/Séries: {}", modality.grades().join(", "));
        println!("  Duração:");
        for option in modality.durations() {
            println!("    {:>4}  {}", option.value, option.label);
        }
        println!("  Quantidade:");
        for option in modality.lesson_counts() {
            println!("    {:>4}  {}", option.value, option.label);
        }
        println!();
    }
    Ok(())
}

pub fn config_show(path: &Path, config: &AulaConfig) -> Result<()> {
    let settings = Settings::from_process_env(config, &Overrides::default());
    let info = config::config_info(path, config, settings.gemini.api_key.as_deref());
    println!("{}", serde_json::to_string_pretty(&info)?);
    Ok(())
}

pub fn config_init(dir: &Path, force: bool) -> Result<()> {
    let path = config::config_file(dir);
    if path.exists() && !force {
        return Err(eyre!(
            "config already exists at {} (use --force to overwrite)",
            path.display()
        ));
    }
    let written = config::save_config(dir, &AulaConfig::default())?;
    println!("{}", written.display());
    Ok(())
}

fn read_plan(input: &Path) -> Result<LessonPlan> {
    let text = std::fs::read_to_string(input)
        .map_err(|e| eyre!("failed to read {}: {e}", input.display()))?;
    Ok(parse_plan(&text)?)
}

fn emit(plan: &LessonPlan, format: ExportFormat, out: Option<&Path>) -> Result<()> {
    let mut stdout = std::io::stdout().lock();
    if let Some(path) = write_plan(plan, format, out, &mut stdout)? {
        writeln!(stdout, "{}", path.display())?;
    }
    Ok(())
}
