use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use common::storage::s3::S3ObjectStore;
use tracing::{Level, info};

use server::config::AppConfig;
use server::state::AppState;
use server::{database, seed};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    let config = AppConfig::load()?;

    let db = database::init_db(&config.database.url).await?;
    seed::ensure_indexes(&db).await?;

    let store = Arc::new(S3ObjectStore::new(&config.storage)?);

    let host: IpAddr = config.server.host.parse()?;
    let addr = SocketAddr::new(host, config.server.port);

    let state = AppState { db, config, store };
    let app = server::build_router(state);

    info!("Versus admin API listening at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
