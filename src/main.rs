//! Library Console - catalog administration from the terminal
//!
//! Run `library-console shell` for the interactive console, or one of the
//! one-shot commands (`list`, `create`, `update`, `delete`, `choices`).

use clap::{Parser, Subcommand};
use std::io::{self, Write};
use std::path::Path;
use std::process::ExitCode;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use library_console::{
    commands::{self, Shell, ShellCommand},
    config::{AppConfig, LoggingConfig},
    models::{EntityId, ResourceKind},
    repository::Repository,
    services::Services,
    theme::{Theme, ThemeName},
};

#[derive(Parser)]
#[command(
    name = "library-console",
    about = "Library catalog administration console",
    version
)]
struct Cli {
    /// Catalog API base URL, overrides configuration
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Color theme (plain or library)
    #[arg(long, global = true)]
    theme: Option<ThemeName>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show every entity of a resource
    List {
        resource: ResourceKind,
    },
    /// Create an entity
    Create {
        resource: ResourceKind,

        /// Field assignment, repeatable (e.g. --set name="Acme Books")
        #[arg(long = "set", value_name = "FIELD=VALUE", value_parser = commands::parse_assignment)]
        fields: Vec<(String, String)>,
    },
    /// Update an existing entity
    Update {
        resource: ResourceKind,
        id: EntityId,

        /// Field assignment, repeatable
        #[arg(long = "set", value_name = "FIELD=VALUE", value_parser = commands::parse_assignment)]
        fields: Vec<(String, String)>,
    },
    /// Delete an entity
    Delete {
        resource: ResourceKind,
        id: EntityId,
    },
    /// List the entities selectable in relation fields
    Choices {
        resource: ResourceKind,
    },
    /// Interactive console
    Shell {
        /// Resource to open on start
        resource: Option<ResourceKind>,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let mut config = AppConfig::load()?;
    if let Some(base_url) = cli.base_url {
        config.api.base_url = base_url;
    }
    if let Some(theme) = cli.theme {
        config.ui.theme = theme;
    }

    let _guard = init_tracing(&config.logging);

    tracing::info!("Starting Library Console v{}", env!("CARGO_PKG_VERSION"));

    let repository = Repository::new(config.api.clone())?;
    let services = Services::new(repository);
    let theme = Theme::from_name(config.ui.theme);

    let stdout = io::stdout();
    let mut out = stdout.lock();

    let result = match cli.command {
        Commands::List { resource } => commands::list(&services, resource, &theme, &mut out).await,
        Commands::Create { resource, fields } => {
            commands::create(&services, resource, &fields, &theme, &mut out).await
        }
        Commands::Update { resource, id, fields } => {
            commands::update(&services, resource, id, &fields, &theme, &mut out).await
        }
        Commands::Delete { resource, id } => commands::delete(&services, resource, id, &theme, &mut out).await,
        Commands::Choices { resource } => commands::choices(&services, resource, &theme, &mut out).await,
        Commands::Shell { resource } => {
            let mut shell = Shell::new(services, theme, &mut out);
            let outcome = async {
                if let Some(kind) = resource {
                    shell.execute(ShellCommand::Open(kind)).await?;
                }
                shell.run(tokio::io::BufReader::new(tokio::io::stdin())).await
            }
            .await;
            outcome.map(|_| true)
        }
    };
    out.flush()?;

    match result {
        Ok(true) => Ok(ExitCode::SUCCESS),
        Ok(false) => Ok(ExitCode::FAILURE),
        Err(e) => {
            tracing::error!("Command failed: {}", e);
            eprintln!("Error: {}", e);
            Ok(ExitCode::FAILURE)
        }
    }
}

/// Install the global subscriber. The returned guard flushes the file writer
/// on drop and must live until exit.
fn init_tracing(logging: &LoggingConfig) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("library_console={}", logging.level).into());

    let (writer, guard) = match &logging.file {
        Some(path) => {
            let path = Path::new(path);
            let directory = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or_else(|| Path::new("."));
            let file_name = path
                .file_name()
                .map(|n| n.to_os_string())
                .unwrap_or_else(|| "library-console.log".into());
            let appender = tracing_appender::rolling::never(directory, file_name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            (tracing_subscriber::fmt::writer::BoxMakeWriter::new(writer), Some(guard))
        }
        None => (tracing_subscriber::fmt::writer::BoxMakeWriter::new(io::stderr), None),
    };
    let ansi = logging.file.is_none();

    if logging.format == "json" {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json().with_writer(writer))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_ansi(ansi).with_writer(writer))
            .init();
    }

    guard
}
