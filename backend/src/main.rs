//! Backend entry-point: wires the blog endpoints over the configured
//! storage backend.

mod server;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use actix_web::cookie::{Key, SameSite};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

use backend::inbound::http::state::HttpState;
use backend::outbound::memory::{InMemoryBlogStore, InMemoryIdentityService};
use backend::outbound::persistence::{
    run_pending_migrations, DbPool, DieselArticleRepository, DieselCommentRepository,
    DieselIdentityService, PoolConfig,
};

use server::{create_server, ServerConfig};

/// Command-line and environment configuration.
#[derive(Debug, Parser)]
#[command(name = "backend", about = "Blog backend server")]
struct Cli {
    /// Socket address to bind.
    #[arg(long, env = "BIND_ADDR", default_value = "0.0.0.0:8080")]
    bind_addr: SocketAddr,

    /// PostgreSQL connection URL; omit to run on in-memory stores.
    #[arg(long, env = "DATABASE_URL")]
    database_url: Option<String>,

    /// File holding the session cookie signing key material.
    #[arg(long, env = "SESSION_KEY_FILE", default_value = "/var/run/secrets/session_key")]
    session_key_file: PathBuf,

    /// Permit an ephemeral session key when the key file is unreadable.
    #[arg(long, env = "SESSION_ALLOW_EPHEMERAL", default_value_t = false)]
    allow_ephemeral_session_key: bool,

    /// Set the `Secure` flag on the session cookie.
    #[arg(long, env = "SESSION_COOKIE_SECURE", default_value_t = true)]
    cookie_secure: bool,
}

fn load_session_key(cli: &Cli) -> std::io::Result<Key> {
    match std::fs::read(&cli.session_key_file) {
        Ok(bytes) => Ok(Key::derive_from(&bytes)),
        Err(e) => {
            if cfg!(debug_assertions) || cli.allow_ephemeral_session_key {
                warn!(
                    path = %cli.session_key_file.display(),
                    error = %e,
                    "using temporary session key (dev only)"
                );
                Ok(Key::generate())
            } else {
                Err(std::io::Error::other(format!(
                    "failed to read session key at {}: {e}",
                    cli.session_key_file.display()
                )))
            }
        }
    }
}

async fn build_state(database_url: Option<&str>) -> std::io::Result<HttpState> {
    match database_url {
        Some(url) => {
            run_pending_migrations(url)
                .await
                .map_err(std::io::Error::other)?;
            let pool = DbPool::new(PoolConfig::new(url))
                .await
                .map_err(std::io::Error::other)?;
            info!("using PostgreSQL-backed stores");
            Ok(HttpState::new(
                Arc::new(DieselIdentityService::new(pool.clone())),
                Arc::new(DieselArticleRepository::new(pool.clone())),
                Arc::new(DieselCommentRepository::new(pool)),
            ))
        }
        None => {
            warn!("DATABASE_URL not set; content will not survive a restart");
            let store = InMemoryBlogStore::new();
            Ok(HttpState::new(
                Arc::new(InMemoryIdentityService::new()),
                Arc::new(store.clone()),
                Arc::new(store),
            ))
        }
    }
}

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

    let cli = Cli::parse();
    let key = load_session_key(&cli)?;
    let state = build_state(cli.database_url.as_deref()).await?;

    let config = ServerConfig::new(key, cli.cookie_secure, SameSite::Lax, cli.bind_addr);
    info!(bind_addr = %config.bind_addr(), "starting server");
    create_server(config, state)?.await
}
