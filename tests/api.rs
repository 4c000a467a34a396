mod common;

use serde_json::{json, Value};
use std::sync::Arc;

use scalp_signals::server::{router, NO_SIGNAL_HEADER};
use scalp_signals::service::SignalService;

use common::{spawn_stub, test_config};

async fn start() -> String {
    let svc = SignalService::from_config(test_config().shared()).unwrap();
    spawn_stub(router(Arc::new(svc))).await
}

fn open_request() -> Value {
    json!({
        "symbol": "XAUUSD",
        "timeframe": "M5",
        "session_filter": false,
        "min_rr": 1.5,
        "min_confidence": 0
    })
}

#[tokio::test]
async fn health_is_ok() {
    let base = start().await;
    let resp = reqwest::get(format!("{}/health", base)).await.unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body, json!({"status": "ok"}));
}

#[tokio::test]
async fn generate_requires_api_key() {
    let base = start().await;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("{}/generate", base))
        .json(&open_request())
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 401);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["detail"], "Unauthorized");

    let resp = client
        .post(format!("{}/generate", base))
        .header("X-API-Key", "wrong")
        .json(&open_request())
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 401);
}

#[tokio::test]
async fn synthetic_signal_shape() {
    let base = start().await;
    let resp = reqwest::Client::new()
        .post(format!("{}/generate", base))
        .header("X-API-Key", "secret")
        .json(&open_request())
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["symbol"], "XAUUSD");
    assert_eq!(body["timeframe"], "M5");
    assert!(body["direction"] == "long" || body["direction"] == "short");
    for key in ["entry", "sl", "tp1", "tp2", "tp3"] {
        assert!(body[key].as_f64().unwrap() > 2000.0, "{}", key);
    }
    assert_eq!(body["rr_tp1"], 1.0);
    assert_eq!(body["rr_tp2"], 1.5);
    assert_eq!(body["rr_tp3"], 2.5);
    assert_eq!(body["valid_minutes"], 30);
    assert_eq!(body["be_on_tp1"], true);
    assert_eq!(body["news_ok"], true);
    assert_eq!(body["news_note"], "");
    assert!(body["rationale"].as_str().unwrap().contains("move SL to BE at TP1"));
    assert!(body["generated_at"].as_str().unwrap().contains('T'));
    let conf = body["confidence"].as_u64().unwrap();
    assert!((70..=90).contains(&conf));
}

#[tokio::test]
async fn thresholds_not_met_is_no_content() {
    let base = start().await;
    let mut req = open_request();
    req["min_rr"] = json!(2.0);

    let resp = reqwest::Client::new()
        .post(format!("{}/generate", base))
        .header("X-API-Key", "secret")
        .json(&req)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 204);
    let reason = resp
        .headers()
        .get(NO_SIGNAL_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap()
        .to_string();
    assert_eq!(reason, "rr_tp2 1.50 below minimum 2.00");
    assert!(resp.text().await.unwrap().is_empty());
}

#[tokio::test]
async fn request_validation_errors() {
    let base = start().await;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("{}/generate", base))
        .header("X-API-Key", "secret")
        .json(&json!({"symbol": "GBPUSD", "timeframe": "M5"}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 422);

    let mut req = open_request();
    req["lookback"] = json!(10_000);
    let resp = client
        .post(format!("{}/generate", base))
        .header("X-API-Key", "secret")
        .json(&req)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
    let body: Value = resp.json().await.unwrap();
    assert!(body["detail"].as_str().unwrap().contains("lookback"));

    for conf in [101, 300, -5] {
        let mut req = open_request();
        req["min_confidence"] = json!(conf);
        let resp = client
            .post(format!("{}/generate", base))
            .header("X-API-Key", "secret")
            .json(&req)
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 400, "min_confidence {}", conf);
        let body: Value = resp.json().await.unwrap();
        assert!(body["detail"].as_str().unwrap().contains("min_confidence"));
    }
}

#[tokio::test]
async fn llm_source_unconfigured_is_unavailable() {
    let base = start().await;
    let mut req = open_request();
    req["source"] = json!("llm");

    let resp = reqwest::Client::new()
        .post(format!("{}/generate", base))
        .header("X-API-Key", "secret")
        .json(&req)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 503);
    let body: Value = resp.json().await.unwrap();
    assert!(body["detail"].as_str().unwrap().contains("OPENAI_API_KEY"));
}
