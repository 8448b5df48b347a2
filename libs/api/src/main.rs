use std::net::{Ipv4Addr, SocketAddr};

use anyhow::Context;
use api::{load_config, serve};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;
use util::{load_env, secret};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let secrets = load_env().context("failed to load secrets")?;

    let cloudflare_token = secret(&secrets, "CLOUDFLARE_TOKEN")?;
    let cloudflare_account_id = secret(&secrets, "CLOUDFLARE_ACCOUNT_ID")?;

    let config = secret(&secrets, "CONFIG").unwrap_or(".dev.toml");
    let config = load_config(&format!("Config{}", config))?;

    let router = serve(
        config,
        cloudflare_token.to_string(),
        cloudflare_account_id.to_string(),
    )
    .await?;

    let address = SocketAddr::from((Ipv4Addr::UNSPECIFIED, 8000));
    let listener = TcpListener::bind(&address).await?;
    Ok(axum::serve(
        listener,
        router.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?)
}
