use std::net::SocketAddr;
use std::str::FromStr;
use std::sync::Arc;

use anyhow::Context;
use log::LevelFilter;
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};

use roomlink_gateway::env::ENV;
use roomlink_gateway::memory::InMemoryRelay;
use roomlink_gateway::router::create_router;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    TermLogger::init(
        LevelFilter::Debug,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )?;

    let relay = Arc::new(InMemoryRelay::new());
    let app = create_router(relay);

    let address =
        SocketAddr::from_str(&ENV.bind_address).context("invalid bind address provided")?;
    axum::Server::bind(&address)
        .serve(app.into_make_service())
        .await
        .context("gateway server failed")?;

    Ok(())
}
