use mazna_charts::{
    Band, MissingPolicy, ThresholdTable, build_chart_payload, load_entries, placeholder_entries,
};
use mazna_client::http_client::ReqwestMaznaClient;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn server_answering(status: u16, body: serde_json::Value) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/entries"))
        .respond_with(ResponseTemplate::new(status).set_body_json(body))
        .mount(&server)
        .await;
    server
}

#[tokio::test]
async fn server_error_charts_placeholder() {
    let server = server_answering(500, serde_json::json!({"error": "boom"})).await;
    let client = ReqwestMaznaClient::new(&server.uri(), None);

    let loaded = load_entries(&client, Some(1)).await;
    assert!(loaded.is_placeholder);
    assert_eq!(loaded.data, placeholder_entries());
}

#[tokio::test]
async fn empty_list_charts_placeholder() {
    let server = server_answering(200, serde_json::json!([])).await;
    let client = ReqwestMaznaClient::new(&server.uri(), None);

    let loaded = load_entries(&client, None).await;
    assert!(loaded.is_placeholder);

    let payload =
        build_chart_payload(&loaded, ThresholdTable::standard(), MissingPolicy::Zero).unwrap();
    assert!(payload.notice.is_some());
    assert_eq!(payload.glucose.rows.len(), 3);
}

#[tokio::test]
async fn unreachable_backend_charts_placeholder() {
    let client = ReqwestMaznaClient::new("http://127.0.0.1:1", None);
    let loaded = load_entries(&client, Some(1)).await;
    assert!(loaded.is_placeholder);
    assert_eq!(loaded.data.len(), 3);
}

#[tokio::test]
async fn undecodable_body_charts_placeholder() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/entries"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;
    let client = ReqwestMaznaClient::new(&server.uri(), None);

    assert!(load_entries(&client, None).await.is_placeholder);
}

#[tokio::test]
async fn corrupt_stored_reading_charts_placeholder() {
    for bad in [
        serde_json::json!("NaN"),
        serde_json::json!("inf"),
        serde_json::json!(-5),
    ] {
        let body = serde_json::json!([{
            "created_at": "2024-03-01T08:00:00",
            "bg_morning": bad,
            "bg_afternoon": 100,
            "bg_evening": 110
        }]);
        let server = server_answering(200, body).await;
        let client = ReqwestMaznaClient::new(&server.uri(), None);

        let loaded = load_entries(&client, None).await;
        assert!(loaded.is_placeholder, "charted {bad} as real data");

        let payload =
            build_chart_payload(&loaded, ThresholdTable::standard(), MissingPolicy::Zero).unwrap();
        assert!(payload.is_placeholder);
        assert!(payload.notice.is_some());
    }
}

#[tokio::test]
async fn real_entries_reach_the_charts() {
    let server = MockServer::start().await;
    let body = serde_json::json!([{
        "id": 11,
        "account_id": 4,
        "created_at": "2009-01-07T08:00:00.000000",
        "bg_morning": 238,
        "bg_afternoon": 261,
        "bg_evening": 127,
        "ins_morning": 6,
        "ins_afternoon": 4,
        "ins_evening": 5
    }]);
    Mock::given(method("GET"))
        .and(path("/entries"))
        .and(query_param("account_id", "4"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;
    let client = ReqwestMaznaClient::new(&server.uri(), None);

    let loaded = load_entries(&client, Some(4)).await;
    assert!(!loaded.is_placeholder);

    let payload =
        build_chart_payload(&loaded, ThresholdTable::standard(), MissingPolicy::Zero).unwrap();
    assert_eq!(payload.notice, None);
    let high = payload
        .breakdown
        .iter()
        .find(|s| s.band == Band::High)
        .unwrap();
    assert_eq!(high.count, 2);
    assert_eq!(
        payload.glucose.tooltips[0].text,
        "2009-01-07\nMorning: 238 mg/dL (High)\nAfternoon: 261 mg/dL (High)\nEvening: 127 mg/dL (Normal)"
    );
}
