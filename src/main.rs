use std::net::SocketAddr;

use clap::{Parser, Subcommand};
use tokio::signal;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use site_assets::app;
use site_assets::assets::AssetVersioner;
use site_assets::config::Config;
use site_assets::state::AppState;

#[derive(Debug, Parser)]
#[command(name = "site-assets", version, about = "Serve the site with versioned static assets")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the HTTP server (default).
    Serve,
    /// Print the versioned URL for each asset path.
    Resolve {
        #[arg(required = true)]
        paths: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so `resolve` output stays pipeable.
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_env("SITE_LOG").unwrap_or_else(|_| "info".into()))
        .with(fmt::layer().json().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let cfg = Config::load();

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(cfg).await,
        Command::Resolve { paths } => {
            let versioner = AssetVersioner::from_config(&cfg);
            for path in &paths {
                println!("{}", versioner.resolve(path));
            }
            Ok(())
        }
    }
}

async fn serve(cfg: Config) -> anyhow::Result<()> {
    let addr: SocketAddr = cfg.listen.parse()?;
    let app = app::build(AppState::new(cfg));

    tracing::info!(%addr, "starting site");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("site stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("shutdown signal received");
}
