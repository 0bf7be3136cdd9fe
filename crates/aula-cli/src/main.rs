use std::path::PathBuf;

use aula_cli::config;
use aula_cli::settings::Overrides;
use aula_core::models::request::DetailLevel;
use aula_export::artifact::ExportFormat;
use clap::{Parser, Subcommand};
use eyre::Result;

mod commands;

#[derive(Parser)]
#[command(name = "aula", about = "Lesson plan generator backed by Gemini")]
struct Cli {
    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    log_json: bool,

    /// Config directory (defaults to the platform config dir)
    #[arg(long, global = true)]
    config_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a lesson plan (needs GEMINI_API_KEY)
    Generate {
        /// Modality id: educacao_infantil, ensino_fundamental or ensino_medio
        #[arg(long)]
        modality: String,
        /// Curricular component (defaults to the first in the catalog)
        #[arg(long)]
        component: Option<String>,
        /// Grade / year
        #[arg(long)]
        grade: Option<String>,
        /// Topic or knowledge object
        #[arg(long)]
        topic: String,
        /// Minutes per lesson
        #[arg(long)]
        duration: Option<u32>,
        /// Number of lessons
        #[arg(long)]
        lessons: Option<u32>,
        /// Detail level: resumo, completo or detalhado
        #[arg(long)]
        detail: Option<DetailLevel>,
        /// Output format: text, markdown, docx or json
        #[arg(long, default_value = "text")]
        format: ExportFormat,
        /// Directory to write the export into (stdout when omitted)
        #[arg(long)]
        out: Option<PathBuf>,
        /// Echo fragments to stderr as they arrive
        #[arg(long)]
        stream: bool,
        /// Skip BNCC/SAEB reference data
        #[arg(long)]
        no_reference: bool,
        /// Base URL serving data/bncc.json and data/saeb.json
        #[arg(long)]
        reference_url: Option<String>,
        /// Gemini model id
        #[arg(long)]
        model: Option<String>,
    },
    /// List the form options of each modality
    Catalog {
        /// Only this modality id
        #[arg(long)]
        modality: Option<String>,
    },
    /// Export a saved plan document
    Render {
        /// Plan JSON file ({"lesson_plan": {...}})
        #[arg(long)]
        input: PathBuf,
        #[arg(long, default_value = "markdown")]
        format: ExportFormat,
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Print the share text and WhatsApp link of a saved plan
    Share {
        #[arg(long)]
        input: PathBuf,
    },
    /// Inspect or create the config file
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show effective settings with the API key redacted
    Show,
    /// Write a default config file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

fn init_tracing(json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    init_tracing(cli.log_json);

    let config_dir = match cli.config_dir {
        Some(dir) => dir,
        None => config::config_dir()?,
    };
    let config_path = config::config_file(&config_dir);
    let cfg = config::load_or_default(&config_path)?;

    match cli.command {
        Commands::Generate {
            modality,
            component,
            grade,
            topic,
            duration,
            lessons,
            detail,
            format,
            out,
            stream,
            no_reference,
            reference_url,
            model,
        } => {
            let args = commands::GenerateArgs {
                modality,
                component,
                grade,
                topic,
                duration,
                lessons,
                detail,
                format,
                out,
                stream,
                overrides: Overrides {
                    model,
                    reference_base_url: reference_url,
                    no_reference,
                },
            };
            commands::generate(&cfg, args).await
        }
        Commands::Catalog { modality } => commands::catalog(modality.as_deref()),
        Commands::Render { input, format, out } => {
            commands::render(&input, format, out.as_deref())
        }
        Commands::Share { input } => commands::share(&input),
        Commands::Config { command } => match command {
            ConfigCommands::Show => commands::config_show(&config_path, &cfg),
            ConfigCommands::Init { force } => commands::config_init(&config_dir, force),
        },
    }
}
