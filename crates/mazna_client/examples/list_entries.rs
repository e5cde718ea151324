use mazna_client::{MaznaClient, config::Config, http_client::ReqwestMaznaClient};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Example: reads MAZNA_BASE_URL / MAZNA_ACCOUNT_ID from env
    let cfg = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("config error: {}", e);
            return Ok(());
        }
    };
    let client = ReqwestMaznaClient::from_config(&cfg);
    let entries = client.list_entries(cfg.account_id).await?;
    for entry in entries {
        println!(
            "{}  bg {:?}  ins {:?}",
            entry.date,
            entry.glucose(),
            entry.insulin()
        );
    }
    Ok(())
}
