/// Tests for main.rs initialization logic
use mazna_charts::log_filter;
use mazna_client::config::{Config, DEFAULT_BASE_URL};

#[test]
fn test_log_env_priority() {
    let (raw, _) = log_filter(|k| match k {
        "MAZNA_LOG_LEVEL" => Some("trace".to_string()),
        "RUST_LOG" => Some("error".to_string()),
        _ => None,
    });
    assert_eq!(raw, "trace");

    let (raw, _) = log_filter(|k| (k == "RUST_LOG").then(|| "error".to_string()));
    assert_eq!(raw, "error");

    let (raw, filter) = log_filter(|_| None);
    assert_eq!(raw, "info");
    assert_eq!(filter.to_string(), "info");
}

#[test]
fn test_env_filter_fallback() {
    let (raw, filter) =
        log_filter(|k| (k == "MAZNA_LOG_LEVEL").then(|| "mazna_client=loud".to_string()));
    assert_eq!(raw, "mazna_client=loud");
    assert_eq!(filter.to_string(), "info");
}

#[test]
fn test_config_defaults_without_env() {
    let config = Config::from_env_with(|_| None).unwrap();
    assert_eq!(config.base_url, DEFAULT_BASE_URL);
    assert_eq!(config.account_id, None);
    assert!(config.auth_token.is_none());
}

#[test]
fn test_bad_account_id_is_a_config_error() {
    let res = Config::from_env_with(|k| (k == "MAZNA_ACCOUNT_ID").then(|| "abc".to_string()));
    assert!(matches!(res, Err(mazna_client::MaznaError::Config(_))));
}

#[tokio::test]
async fn test_client_initialization() {
    let config = Config::from_env_with(|k| match k {
        "MAZNA_BASE_URL" => Some("http://backend.test:5000/".to_string()),
        "MAZNA_AUTH_TOKEN" => Some("tok".to_string()),
        _ => None,
    })
    .unwrap();
    let client = mazna_client::http_client::ReqwestMaznaClient::from_config(&config);
    assert_eq!(client.base_url(), "http://backend.test:5000");
}
