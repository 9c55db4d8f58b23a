/// Tempo Player - terminal music player for a Tempo backend
use clap::{Parser, Subcommand};
use std::{path::PathBuf, sync::Arc};
use tempo_controller::{Controller, ControllerConfig};
use tempo_player::{config::PlayerConfig, Host, TextRenderer};
use tempo_server_client::TempoServerClient;
use tempo_storage::FileKeyValueStore;
use tokio::io::BufReader;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "tempo-player")]
#[command(about = "Tempo Player terminal client", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the interactive player
    Run {
        /// Configuration file path
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Backend URL (overrides the config file)
        #[arg(short, long, env = "TEMPO_SERVER_URL")]
        server: Option<String>,

        /// Directory for persisted playlists
        #[arg(short, long)]
        data_dir: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr; stdout is the player UI
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tempo_player=info,tempo_controller=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            config,
            server,
            data_dir,
        } => run(config, server, data_dir).await?,
    }

    Ok(())
}

async fn run(
    config_path: Option<PathBuf>,
    server: Option<String>,
    data_dir: Option<PathBuf>,
) -> anyhow::Result<()> {
    let config = PlayerConfig::load(config_path.as_deref())?.with_overrides(server, data_dir);
    config.validate()?;

    tracing::info!("Starting Tempo Player");
    tracing::info!("Server: {}", config.server.url);
    tracing::info!("Data directory: {}", config.storage.data_dir.display());

    let client = TempoServerClient::new(config.server_config())?;
    let store = FileKeyValueStore::open(&config.storage.data_dir)?;

    let controller = Controller::new(
        ControllerConfig {
            media_root: client.media_root(),
            initial_volume: config.playback.initial_volume,
        },
        store,
    )?;

    let mut host = Host::new(controller, Arc::new(client), TextRenderer::new(std::io::stdout()));
    host.start();
    host.run(BufReader::new(tokio::io::stdin())).await
}
