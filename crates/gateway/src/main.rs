use adzuna_env::{EnvFile, EnvLayer};
use adzuna_job_tools::credentials::{APP_ID_ENV, APP_KEY_ENV};
use adzuna_job_tools::{Credentials, JobToolSource};
use adzuna_mcp_gateway::config::{Args, LogFormat};
use adzuna_mcp_gateway::{AppState, router};
use anyhow::Context as _;
use clap::Parser as _;
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(&args);

    let env_file = EnvFile::load(&args.env_file)
        .with_context(|| format!("load env file {}", args.env_file.display()))?;
    if !env_file.is_empty() {
        info!(
            path = %args.env_file.display(),
            vars = env_file.len(),
            "loaded env file"
        );
    }
    let credentials = Credentials::from_env(&EnvLayer::new(env_file));
    if !credentials.is_configured() {
        warn!(
            "{APP_ID_ENV} / {APP_KEY_ENV} not set; upstream-backed operations will fail until configured"
        );
    }

    let tools = JobToolSource::new(credentials, args.upstream()).context("build job tools")?;
    let state = AppState::new(tools);
    let shutdown = state.shutdown.clone();
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(args.bind)
        .await
        .with_context(|| format!("bind {}", args.bind))?;
    let local_addr = listener.local_addr().context("read local address")?;
    info!(addr = %local_addr, upstream = %args.upstream_base_url, "gateway listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown_signal().await;
            shutdown.cancel();
        })
        .await
        .context("serve")?;

    info!("gateway stopped");
    Ok(())
}

fn init_tracing(args: &Args) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    match args.log_format {
        LogFormat::Text => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("received Ctrl+C, shutting down"),
        () = terminate => info!("received SIGTERM, shutting down"),
    }
}
