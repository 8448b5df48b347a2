use shuttle_runtime::{Error, SecretStore, Secrets};
use tracing_subscriber::EnvFilter;

#[shuttle_runtime::main]
async fn main(#[Secrets] secret_store: SecretStore) -> shuttle_axum::ShuttleAxum {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let Some(cloudflare_token) = secret_store.get("CLOUDFLARE_TOKEN") else {
        return Err(Error::BuildPanic(
            "CLOUDFLARE_TOKEN was not found".to_string(),
        ));
    };
    let Some(cloudflare_account_id) = secret_store.get("CLOUDFLARE_ACCOUNT_ID")
    else {
        return Err(Error::BuildPanic(
            "CLOUDFLARE_ACCOUNT_ID was not found".to_string(),
        ));
    };
    let config_name = format!(
        "Config{}",
        secret_store
            .get("CONFIG")
            .unwrap_or_else(|| ".prod.toml".to_string())
    );

    let config = api::load_config(&config_name)
        .map_err(|e| Error::BuildPanic(format!("{:#}", e)))?;

    let router = api::serve(config, cloudflare_token, cloudflare_account_id)
        .await
        .map_err(|e| Error::BuildPanic(e.to_string()))?;

    Ok(router.into())
}
