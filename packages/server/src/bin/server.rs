//! Room-based chat relay server.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin huddle-server
//! cargo run --bin huddle-server -- --host 0.0.0.0 --port 3000
//! ```

use std::sync::Arc;

use clap::Parser;
use huddle_server::{
    config::ServerConfig,
    ui::{AppState, Server},
    usecase::{UploadPolicy, upload_file::DEFAULT_MAX_UPLOAD_BYTES},
};
use huddle_shared::{logger::setup_logger, time::SystemClock};

#[derive(Parser, Debug)]
#[command(name = "huddle-server")]
#[command(about = "Room-based real-time chat relay over WebSocket", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, default_value = "8080")]
    port: u16,

    /// Maximum size of an uploaded file in bytes
    #[arg(long, default_value_t = DEFAULT_MAX_UPLOAD_BYTES)]
    max_upload_bytes: usize,

    /// Default log level when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), &args.log_level);

    let config = ServerConfig {
        host: args.host,
        port: args.port,
        upload: UploadPolicy::with_max_bytes(args.max_upload_bytes),
    };

    // Repositories, pusher and use cases are wired inside AppState
    let state = AppState::in_memory(config.upload.clone(), Arc::new(SystemClock));

    let server = Server::new(config, state);
    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
