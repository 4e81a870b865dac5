/// TingTing Music Server - personal music library server
use clap::{Parser, Subcommand};
use std::{net::SocketAddr, path::PathBuf, sync::Arc};
use tingting_core::CatalogStore;
use tingting_metadata::{DiskFs, LibraryScanner, LoftyExtractor, ScanConfig};
use tingting_server::{config::ServerConfig, create_router, state::AppState};
use tingting_storage::LocalCatalog;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "tingting-server")]
#[command(about = "TingTing Music personal library server", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Configuration file path
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Scan a directory for music files and exit
    Scan {
        /// Directory path to scan
        path: PathBuf,

        /// Configuration file path
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "tingting_server=info,tingting_metadata=info,tower_http=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { config } => {
            serve(config).await?;
        }
        Commands::Scan { path, config } => {
            scan_directory(path, config).await?;
        }
    }

    Ok(())
}

fn load_config(path: Option<PathBuf>) -> anyhow::Result<ServerConfig> {
    let config = ServerConfig::load(path.as_deref())?;
    config.validate()?;
    Ok(config)
}

async fn open_catalog(config: &ServerConfig) -> anyhow::Result<Arc<LocalCatalog>> {
    let pool = tingting_storage::create_pool(&config.storage.database_url).await?;
    tingting_storage::run_migrations(&pool).await?;
    tracing::info!("Database connected");

    Ok(Arc::new(LocalCatalog::new(pool)))
}

async fn serve(config_path: Option<PathBuf>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;

    tracing::info!("Starting TingTing Music server");
    tracing::info!("Host: {}", config.server.host);
    tracing::info!("Port: {}", config.server.port);
    tracing::info!("Music directory: {}", config.library.music_dir.display());

    let db: Arc<dyn CatalogStore> = open_catalog(&config).await?;

    tokio::fs::create_dir_all(&config.library.music_dir).await?;
    db.ensure_default_playlists(&config.library.music_dir.to_string_lossy())
        .await?;

    let addr = SocketAddr::from((
        config.server.host.parse::<std::net::IpAddr>()?,
        config.server.port,
    ));
    let scan_on_startup = config.library.scan_on_startup;
    let music_dir = config.library.music_dir.clone();

    let app_state = AppState::new(db, config);

    if scan_on_startup {
        app_state.scan_jobs.submit(music_dir).await?;
    }

    let app = create_router(app_state.clone());

    tracing::info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    app_state.scan_jobs.cancel_all().await;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}

async fn scan_directory(path: PathBuf, config_path: Option<PathBuf>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let catalog = open_catalog(&config).await?;

    let scanner = LibraryScanner::new(catalog, Arc::new(DiskFs), Arc::new(LoftyExtractor::new()))
        .with_config(ScanConfig {
            dedupe_albums: config.library.dedupe_albums,
        });

    let path = tokio::fs::canonicalize(&path).await?;
    let stats = scanner.scan(&path, None).await;

    println!("Scanned {}", path.display());
    println!("  Files discovered: {}", stats.files_discovered);
    println!("  Tracks added:     {}", stats.tracks_added);
    println!("  Tracks skipped:   {}", stats.tracks_skipped);
    println!("  Lyrics matched:   {}", stats.lyrics_matched);
    for (file, error) in &stats.errors {
        println!("  Error: {}: {}", file.display(), error);
    }

    Ok(())
}
