#![allow(clippy::missing_errors_doc)]

use axum::Router;
use axum::routing::{get, post};
use clap::Parser;
use repository::Repository;
use state::SharedState;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use tokio::net::TcpListener;
use tracing::instrument;

pub mod endpoints;
pub mod layers;
pub mod models;
pub mod repository;
pub mod service;
pub mod state;

#[derive(Parser, Clone, Debug)]
#[command(version, about)]
#[must_use]
pub struct Settings {
    #[arg(default_value_t = SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), 3000))]
    pub socket_addr: SocketAddr,

    /// `SQLite` connection string; `mode=rwc` creates the file when missing
    #[arg(long, default_value = "sqlite://social_media.db?mode=rwc")]
    pub database_url: String,

    #[arg(long, default_value_t = 5)]
    pub max_connections: u32,
}

pub fn router(shared_state: SharedState) -> Router {
    use endpoints::{account, message};

    Router::new()
        .route("/register", post(account::register))
        .route("/login", post(account::login))
        .route("/accounts", get(account::list))
        .route("/accounts/{id}", get(account::find).put(account::update))
        .route("/accounts/{id}/messages", get(message::list_by_account))
        .route("/messages", get(message::list).post(message::create))
        .route(
            "/messages/{id}",
            get(message::find)
                .patch(message::update)
                .delete(message::delete),
        )
        .layer(layers::trace_layer())
        .with_state(shared_state)
}

#[instrument]
pub async fn run(settings: Settings) -> Result<(), color_eyre::eyre::Report> {
    let repository =
        Repository::connect(&settings.database_url, settings.max_connections).await?;
    let router = self::router(SharedState::new(repository));

    let listener = TcpListener::bind(settings.socket_addr).await?;
    tracing::info!(listen_addr = ?listener.local_addr()?, "Bound to local socket");

    axum::serve(listener, router)
        .with_graceful_shutdown(self::shutdown_signal())
        .await?;

    Ok(())
}

#[instrument]
async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c()
        .await
        .inspect(|()| tracing::info!("Caught CTRL+C signal, shutting down"))
        .inspect_err(|error| tracing::error!(?error, "Failed to await CTRL+C signal"));
}
