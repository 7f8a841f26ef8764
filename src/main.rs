//! Demo server for reply encoding.
//!
//! ```text
//!     Client Request
//!     ─────────────▶ TraceLayer ─▶ TimeoutLayer ─▶ ReplyEncoderLayer ─▶ handler
//!                                                        │                │
//!     Client Response                                    │   Reply (data) │
//!     ◀───────────── encoded status, headers, body ◀─────┴────────────────┘
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use reply_encoder::config::load_with_overrides;
use reply_encoder::observability::{logging, metrics};
use reply_encoder::HttpServer;

#[derive(Parser)]
#[command(name = "reply-encoder")]
#[command(about = "Demo user API whose handlers return data instead of responses", long_about = None)]
struct Cli {
    /// TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override `listener.bind_address`.
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = load_with_overrides(cli.config.as_deref(), cli.bind)?;

    logging::init(&config.observability.log_level);
    tracing::info!("reply-encoder v{} starting", env!("CARGO_PKG_VERSION"));

    tracing::info!(
        bind_address = %config.listener.bind_address,
        html_escape = config.encoder.html_escape,
        indent = config.encoder.indent,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse::<SocketAddr>() {
            Ok(addr) => metrics::init_exporter(addr)?,
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(
        address = %listener.local_addr()?,
        "Listening for connections"
    );

    let server = HttpServer::new(config);
    server.run(listener).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
