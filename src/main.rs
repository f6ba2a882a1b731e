//! Scrawl - Main Entry Point
//!
//! Handwritten digit recognition server with CLI and interactive modes.

use clap::Parser;
use scrawl::cli::{cmd_info, cmd_interactive, cmd_predict, cmd_serve, Cli, Commands};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Initialize logging.
///
/// Logs go to stderr; when SCRAWL_LOG_DIR is set, a daily-rolling file in
/// that directory gets a copy. The returned guard must stay alive for the
/// process lifetime so buffered file writes are flushed on exit.
fn init_tracing() -> anyhow::Result<Option<tracing_appender::non_blocking::WorkerGuard>> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "scrawl=info,tower_http=info".into());

    match std::env::var("SCRAWL_LOG_DIR") {
        Ok(dir) if !dir.is_empty() => {
            std::fs::create_dir_all(&dir)?;
            let appender = tracing_appender::rolling::daily(&dir, "scrawl.log");
            let (file_writer, guard) = tracing_appender::non_blocking(appender);

            tracing_subscriber::registry()
                .with(env_filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_writer(file_writer)
                        .with_ansi(false),
                )
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();

            Ok(Some(guard))
        }
        _ => {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .init();

            Ok(None)
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _guard = init_tracing()?;

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Serve { port, host, model }) => {
            cmd_serve(&host, port, model.as_deref()).await?;
        }
        Some(Commands::Predict { model, grid }) => {
            cmd_predict(&model, &grid)?;
        }
        Some(Commands::Info { model }) => {
            cmd_info(&model)?;
        }
        None => {
            // Default: interactive mode
            cmd_interactive().await?;
        }
    }

    Ok(())
}
