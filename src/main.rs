//! kvgate server binary.
//!
//! Serves a [`MemoryStore`] over HTTP. Contents are lost on exit.
//!
//! ```text
//! RUST_LOG=debug kvgate --listen 127.0.0.1:8787
//! curl -X POST localhost:8787/notes/today.json \
//!      -H 'content-type: application/json' -d '{"done": false}'
//! curl localhost:8787/notes/today.json
//! ```

use std::net::SocketAddr;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use kvgate::{Error, MemoryStore, Router, Server};

/// Minimal HTTP gateway over a key-value blob store
#[derive(Parser)]
#[command(name = "kvgate")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Address to listen on (host:port)
    #[arg(short, long, env = "KVGATE_LISTEN", default_value = "0.0.0.0:8787")]
    listen: SocketAddr,

    /// Log level (trace, debug, info, warn, error); RUST_LOG takes precedence
    #[arg(short = 'L', long, env = "KVGATE_LOG", default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    let cli = Cli::parse();

    init_logging(&cli.log_level);

    let router = Router::new(MemoryStore::new());
    Server::bind(cli.listen).serve(router).await
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("kvgate={level}")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}
