// ABOUTME: Entry point for the supermall binary.
// ABOUTME: Parses CLI arguments, initializes tracing, and starts the HTTP server.

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use supermall_app::{AppManager, MallContext, initialize_sample_data};
use supermall_server::{AppState, ServerConfig, create_router};
use supermall_store::{Latency, LocalStorage};

/// Mall management demo server backed by a mock document store.
#[derive(Debug, Parser)]
#[command(name = "supermall", version)]
struct Cli {
    /// Socket address to bind, overriding SUPERMALL_BIND
    #[arg(long)]
    bind: Option<SocketAddr>,

    /// Data directory, overriding SUPERMALL_HOME
    #[arg(long)]
    home: Option<PathBuf>,

    /// Disable the simulated backend latency
    #[arg(long)]
    no_latency: bool,

    /// Skip seeding sample data on first run
    #[arg(long)]
    no_seed: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "supermall=debug,tower_http=debug".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();
    let mut config = ServerConfig::from_env().context("loading configuration")?;
    if let Some(bind) = cli.bind {
        config.bind = bind;
    }
    if let Some(home) = cli.home {
        config.home = home;
    }
    if cli.no_latency {
        config.simulate_latency = false;
    }
    if cli.no_seed {
        config.seed_sample_data = false;
    }

    let latency = if config.simulate_latency {
        Latency::simulated()
    } else {
        Latency::none()
    };

    let storage = LocalStorage::open(&config.home)
        .with_context(|| format!("opening storage area at {}", config.home.display()))?;
    let ctx = MallContext::open(storage, latency).context("initializing mock backend")?;

    let app = AppManager::new(ctx.clone());
    app.auth
        .ensure_admin_user()
        .await
        .context("seeding default admin user")?;
    if config.seed_sample_data {
        let seeded = initialize_sample_data(&ctx)
            .await
            .context("seeding sample data")?;
        if seeded {
            tracing::info!("sample data seeded");
        }
    }

    let state = std::sync::Arc::new(AppState::new(ctx));
    let router = create_router(state);

    tracing::info!("supermall listening on http://{}", config.bind);
    let listener = tokio::net::TcpListener::bind(config.bind)
        .await
        .with_context(|| format!("binding {}", config.bind))?;
    axum::serve(listener, router).await.context("serving")?;

    Ok(())
}
