use std::sync::Arc;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

use spectro::api::api_routes;
use spectro::assistant::AssistantService;
use spectro::config::{AssistantConfig, ServerConfig};
use spectro::error::Result;

#[tokio::main]
async fn main() -> Result<()> {
    let config = ServerConfig::from_env()?;

    // Keep the guard alive so buffered file logs are flushed on exit
    let _log_guard = init_tracing(&config);

    let assistant = Arc::new(AssistantService::placeholder(AssistantConfig::default()));
    let app = api_routes(Arc::clone(&assistant));

    let addr = config.listen_addr();
    let listener = tokio::net::TcpListener::bind(addr).await?;

    eprintln!("🔭 Spectro v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   Status API: http://{}/api/status", addr);
    eprintln!("   Capture API: http://{}/api/capture", addr);
    eprintln!("   Analyze API: http://{}/api/analyze", addr);
    if let Some(dir) = &config.log_dir {
        eprintln!("   Logs: {}", dir.display());
    }

    let status = assistant.status();
    tracing::info!(port = addr.port(), "Spectro server running");
    if status.active {
        tracing::info!("SYSTEM_ACTIVE");
    }
    tracing::info!("INTERFACE_VERSION: {}", status.interface_version);
    tracing::info!("STATUS: {}", status.status.as_str());

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Spectro server stopped");
    Ok(())
}

fn init_tracing(config: &ServerConfig) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let stderr_layer = fmt::layer().with_target(false).with_writer(std::io::stderr);

    match &config.log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "spectro.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::registry()
                .with(filter)
                .with(stderr_layer)
                .with(fmt::layer().with_ansi(false).with_writer(writer))
                .init();
            Some(guard)
        }
        None => {
            tracing_subscriber::registry()
                .with(filter)
                .with(stderr_layer)
                .init();
            None
        }
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
