//! credence, the command-line publisher verification tool.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;

use credence_protocol::{hash_prefix_hex, QUERY_PREFIX_BYTES};
use credence_publisher::{ClientConfig, PublisherClient};
use credence_store::MemoryPublisherStore;
use credence_types::PublisherInfo;

#[derive(Parser)]
#[command(name = "credence", about = "Publisher verification lookups")]
struct Cli {
    /// Base URL of the verification service.
    /// When a config file is provided, defaults to the file's value.
    #[arg(long, env = "CREDENCE_SERVER")]
    server: Option<String>,

    /// Path to a TOML configuration file. If provided, file settings
    /// are used as the base; CLI flags and env vars override them.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[arg(long, default_value = "warn", env = "CREDENCE_LOG_LEVEL")]
    log_level: String,

    /// Print results as JSON instead of human-readable text.
    #[arg(long)]
    json: bool,

    /// Subcommand.
    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Look up a publisher's verification status.
    Lookup {
        /// Publisher key (a domain or a platform channel identifier).
        publisher_key: String,

        /// Download the publisher prefix list first and pre-filter the
        /// lookup against it.
        #[arg(long)]
        refresh_list: bool,
    },

    /// Download the publisher prefix list and print a summary.
    PrefixList,

    /// Print the fixed-length query prefix sent to the server for a key.
    HashPrefix {
        /// Publisher key (a domain or a platform channel identifier).
        publisher_key: String,
    },
}

fn init_tracing(log_level: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn load_config(cli: &Cli) -> ClientConfig {
    let mut config = if let Some(ref config_path) = cli.config {
        match ClientConfig::from_toml_file(&config_path.display().to_string()) {
            Ok(cfg) => {
                tracing::info!("Loaded config from {}", config_path.display());
                cfg
            }
            Err(e) => {
                tracing::warn!("Failed to load config file: {e}, using defaults");
                ClientConfig::default()
            }
        }
    } else {
        ClientConfig::default()
    };

    if let Some(ref server) = cli.server {
        config.server_url = server.clone();
    }
    config
}

fn print_record(publisher_key: &str, info: Option<&PublisherInfo>, json: bool) -> anyhow::Result<()> {
    match info {
        Some(info) if json => println!("{}", serde_json::to_string_pretty(info)?),
        Some(info) => {
            println!("publisher:  {}", info.publisher_key);
            println!("status:     {}", info.status);
            if let Some(address) = &info.wallet_address {
                println!("wallet:     {address}");
            }
            if let Some(banner) = &info.banner {
                println!("banner:     {}", banner.title);
            }
            println!("updated at: {}", info.updated_at);
        }
        None if json => println!("null"),
        None => println!("no record available for {publisher_key}"),
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    let config = load_config(&cli);

    match cli.command {
        Command::Lookup {
            publisher_key,
            refresh_list,
        } => {
            let store = Arc::new(MemoryPublisherStore::new());
            let client = PublisherClient::with_http_loader(store, config);

            if refresh_list {
                let entries = client
                    .refresh_prefix_list()
                    .await
                    .context("failed to refresh the publisher prefix list")?;
                tracing::info!(entries, "prefix list refreshed");
            }

            let info = client.get_publisher_info(&publisher_key).await;
            print_record(&publisher_key, info.as_ref(), cli.json)?;
        }

        Command::PrefixList => {
            let store = Arc::new(MemoryPublisherStore::new());
            let client = PublisherClient::with_http_loader(store, config);

            client
                .refresh_prefix_list()
                .await
                .context("failed to download the publisher prefix list")?;

            if let Some(list) = client.current_prefix_list().await {
                if cli.json {
                    let summary = serde_json::json!({
                        "entries": list.len(),
                        "prefix_size": list.prefix_size(),
                    });
                    println!("{summary}");
                } else {
                    println!("entries:     {}", list.len());
                    println!("prefix size: {} bytes", list.prefix_size());
                }
            }
        }

        Command::HashPrefix { publisher_key } => {
            let prefix = hash_prefix_hex(&publisher_key, QUERY_PREFIX_BYTES);
            if cli.json {
                let summary = serde_json::json!({
                    "publisher_key": publisher_key,
                    "prefix": prefix,
                });
                println!("{summary}");
            } else {
                println!("{prefix}");
            }
        }
    }

    Ok(())
}
