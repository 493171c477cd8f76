use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use clap::Parser;
use tracing::info;
use uno_duel_execution::{GameRng, RoomRepository};

mod config;
mod connections;
mod session;

use config::Args;
use connections::Connections;
use session::{ws_handler, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(args.log_level)
        .init();

    let rules = args.house_rules()?;
    let rng = match args.seed {
        Some(seed) => GameRng::seeded(seed),
        None => GameRng::from_entropy(),
    };
    let state = AppState {
        rooms: Arc::new(RoomRepository::new(rules, rng)),
        connections: Arc::new(Connections::default()),
    };

    let app = Router::new()
        .route("/ws", get(ws_handler))
        .route("/healthz", get(healthz))
        .with_state(state);

    let addr = args.listen_addr();
    info!(%addr, seed = ?args.seed, ?rules, "uno-duel table listening");

    axum::serve(tokio::net::TcpListener::bind(addr).await?, app).await?;
    Ok(())
}

async fn healthz() -> &'static str {
    "ok"
}
