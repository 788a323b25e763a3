mod logging;

use std::io::{self, Write};
use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};
use llmdex_registry::{Model, Provider, Registry, RegistryConfig, Url};
use tracing::{debug, warn};

#[derive(Parser)]
#[command(name = "llmdex", version, about = "Query and sync the LLM provider registry.")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Path of the persisted registry copy (defaults to the user data dir).
    #[arg(long, global = true, value_name = "PATH")]
    registry: Option<PathBuf>,

    /// Remote registry URL for `sync` and `--remote` (defaults to the
    /// published registry).
    #[arg(long, global = true, value_name = "URL")]
    url: Option<Url>,

    /// Query a freshly fetched remote copy instead of the local one.
    #[arg(long, global = true)]
    remote: bool,

    /// Increase log verbosity (-v info, -vv debug).
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Command {
    /// List providers with their model count and website.
    Providers,
    /// List the models offered by a provider.
    Models { provider: String },
    /// Print a provider's website.
    Website { provider: String },
    /// Print a provider's auth configuration as JSON.
    Auth { provider: String },
    /// Refresh the persisted copy from the remote URL.
    Sync,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    logging::init(cli.verbose);

    let path = llmdex_app::resolve_registry_path(cli.registry.as_deref())?;
    let mut config = RegistryConfig::new(path);
    if let Some(url) = cli.url.clone() {
        config = config.with_remote_url(url);
    }
    debug!(?config, "resolved registry config");

    match &cli.command {
        Command::Sync => sync(&config).await,
        command => {
            let registry = if cli.remote {
                Registry::fetch(config).await?
            } else {
                Registry::open(config)?
            };
            query(&registry, command)
        }
    }
}

async fn sync(config: &RegistryConfig) -> Result<(), Box<dyn std::error::Error>> {
    let report = llmdex_registry::sync_local(config.remote_url(), config.local_path()).await?;
    println!(
        "synced {} providers ({} models) to {}",
        report.providers,
        report.models,
        report.path.display()
    );
    Ok(())
}

fn query(registry: &Registry, command: &Command) -> Result<(), Box<dyn std::error::Error>> {
    if !registry.is_loaded() {
        let hint = missing_registry_hint(registry);
        if let Command::Providers = command {
            warn!("{hint}");
            return Ok(());
        }
        return Err(hint.into());
    }

    let mut stdout = io::stdout().lock();

    match command {
        Command::Providers => {
            for line in provider_lines(&registry.list_providers()) {
                writeln!(stdout, "{line}")?;
            }
        }
        Command::Models { provider } => {
            for line in model_lines(&registry.provider_models(provider)?) {
                writeln!(stdout, "{line}")?;
            }
        }
        Command::Website { provider } => {
            if let Some(website) = registry.provider_website(provider)? {
                writeln!(stdout, "{website}")?;
            }
        }
        Command::Auth { provider } => {
            if let Some(auth) = registry.provider_auth(provider)? {
                writeln!(stdout, "{}", serde_json::to_string_pretty(&auth)?)?;
            }
        }
        Command::Sync => {}
    }

    Ok(())
}

fn missing_registry_hint(registry: &Registry) -> String {
    format!(
        "no registry document at {}; run `llmdex sync` to download it",
        registry.config().local_path().display()
    )
}

fn provider_lines(providers: &[Provider]) -> Vec<String> {
    providers
        .iter()
        .map(|provider| {
            let count = provider.models().len();
            let noun = if count == 1 { "model" } else { "models" };
            format!(
                "{:<24} {:>4} {:<6}  {}",
                provider.id,
                count,
                noun,
                provider.website().unwrap_or("")
            )
            .trim_end()
            .to_string()
        })
        .collect()
}

fn model_lines(models: &[Model]) -> Vec<String> {
    models
        .iter()
        .map(|model| format!("{:<30} {}", model.id, model.name))
        .collect()
}
