//! Backend entry-point: wires the HTTP API, startup seeding, and the
//! expiry sweeper.

mod server;

use actix_web::web;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

use backend::inbound::http::health::HealthState;
use server::{AppSettings, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::from_env();
    let health_state = web::Data::new(HealthState::new());
    let http_server = create_server(health_state, settings).await?;
    http_server.await
}
