use anyhow::Context;

use mazna_charts::{MissingPolicy, ThresholdTable, build_chart_payload, load_entries, log_filter};
use mazna_client::config::Config;
use mazna_client::http_client::ReqwestMaznaClient;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let (log_env, env_filter) = log_filter(|k| std::env::var(k).ok());
    tracing_subscriber::fmt()
        .compact()
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(false)
        .with_env_filter(env_filter)
        .init();
    tracing::info!("mazna_charts: log filter: {}", log_env);

    let config = Config::from_env().context("reading MAZNA_* configuration")?;
    tracing::info!(
        "mazna_charts: backend {} (account {:?})",
        config.base_url,
        config.account_id
    );

    let client = ReqwestMaznaClient::from_config(&config);
    let entries = load_entries(&client, config.account_id).await;

    let payload = build_chart_payload(&entries, ThresholdTable::standard(), MissingPolicy::default())
        .context("building chart payload")?;
    println!(
        "{}",
        serde_json::to_string_pretty(&payload).context("serializing chart payload")?
    );

    Ok(())
}
