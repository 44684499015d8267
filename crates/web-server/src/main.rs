use std::net::SocketAddr;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

// This main function is the entry point when running `cargo run -p web-server`.
// Its job is to initialize logging, load the configuration, and hand the
// resolved bind address to `run_server`.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    let config = configuration::load_config()?;
    let addr: SocketAddr = config.server.bind_address().parse()?;
    web_server::run_server(addr).await
}
