use std::time::Duration;

use cherrypick::prelude::*;
use clap::Parser;
use tracing_subscriber::EnvFilter;

/// Cherry Pick game server.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Address to bind to
    #[arg(short = 'H', long, default_value = "0.0.0.0")]
    bind: String,

    /// Port to listen on
    #[arg(short, long, env = "PORT", default_value_t = ServerConfig::DEFAULT_PORT)]
    port: u16,

    /// How long round results stay on screen, in milliseconds
    #[arg(long, default_value_t = 5_000)]
    reveal_delay_ms: u64,

    /// Drop connections silent for this many seconds (0 = never)
    #[arg(long, default_value_t = 60)]
    idle_timeout_secs: u64,
}

#[tokio::main]
async fn main() -> Result<(), CherryPickError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let idle_timeout =
        (args.idle_timeout_secs > 0).then(|| Duration::from_secs(args.idle_timeout_secs));

    let server = CherryPickServer::builder()
        .bind(format!("{}:{}", args.bind, args.port))
        .reveal_delay(Duration::from_millis(args.reveal_delay_ms))
        .idle_timeout(idle_timeout)
        .build()
        .await?;

    tokio::select! {
        result = server.run() => result,
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("received Ctrl+C, shutting down");
            Ok(())
        }
    }
}
