//! ThreadLogic CLI

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};

use threadlogic::commands::{self, CheckOptions, TechPackSource};
use threadlogic::AppConfig;

#[derive(Parser)]
#[command(name = "threadlogic")]
#[command(about = "Garment production feasibility checker")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Preferences file (defaults to <config dir>/threadlogic/config.toml)
    #[arg(long, global = true)]
    prefs: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// List tech pack templates
    Templates,

    /// List the fabric library
    Fabrics {
        /// Fabric library JSON replacing the built-in one
        #[arg(long)]
        library: Option<PathBuf>,
    },

    /// Check one tech pack against one fabric
    Check {
        #[command(flatten)]
        source: SourceArgs,

        /// Fabric id from the library
        #[arg(short, long)]
        fabric: String,

        /// Fabric library JSON replacing the built-in one
        #[arg(long)]
        library: Option<PathBuf>,

        /// Cost and threshold table (TOML)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,

        /// Add AI explanations to non-safe findings
        #[arg(long)]
        explain: bool,
    },

    /// Check every template against every fabric
    Matrix {
        /// Only this template
        #[arg(short, long)]
        template: Option<String>,

        #[arg(long)]
        library: Option<PathBuf>,

        #[arg(short, long)]
        config: Option<PathBuf>,

        #[arg(long)]
        json: bool,
    },

    /// Manage AI provider API keys
    Key {
        #[command(subcommand)]
        action: KeyAction,
    },
}

#[derive(Args)]
#[group(required = true, multiple = false)]
struct SourceArgs {
    /// Template id (tp-cargo, tp-active)
    #[arg(short, long)]
    template: Option<String>,

    /// Tech pack JSON file
    #[arg(long)]
    tech_pack: Option<PathBuf>,

    /// Tech pack document to ingest
    #[arg(long)]
    document: Option<PathBuf>,
}

impl SourceArgs {
    fn into_source(self) -> Option<TechPackSource> {
        self.template
            .map(TechPackSource::Template)
            .or(self.tech_pack.map(TechPackSource::File))
            .or(self.document.map(TechPackSource::Document))
    }
}

#[derive(Subcommand)]
enum KeyAction {
    /// Store a key in the OS keychain
    Set {
        key: String,
        /// gemini, claude or openai (defaults to the preferred provider)
        #[arg(short, long)]
        provider: Option<String>,
    },
    /// Remove a stored key
    Clear {
        #[arg(short, long)]
        provider: Option<String>,
    },
    /// Show which providers have a key
    Status,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    threadlogic::init_tracing();

    let prefs = match &cli.prefs {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::load_default()?,
    };

    match cli.command {
        Commands::Templates => commands::show_templates(),
        Commands::Fabrics { library } => commands::show_fabrics(library.as_deref()),
        Commands::Check {
            source,
            fabric,
            library,
            config,
            json,
            explain,
        } => {
            let Some(source) = source.into_source() else {
                anyhow::bail!("One of --template, --tech-pack or --document is required");
            };
            let options = CheckOptions {
                source,
                fabric_id: fabric,
                library,
                config,
                json,
                explain,
            };
            commands::run_check(options, &prefs).await
        }
        Commands::Matrix {
            template,
            library,
            config,
            json,
        } => commands::run_matrix(
            template.as_deref(),
            library.as_deref(),
            config.as_deref(),
            json,
            &prefs,
        ),
        Commands::Key { action } => match action {
            KeyAction::Set { key, provider } => {
                commands::store_key(provider.as_deref(), &key, &prefs)
            }
            KeyAction::Clear { provider } => commands::clear_key(provider.as_deref(), &prefs),
            KeyAction::Status => commands::key_status(&prefs),
        },
    }
}
