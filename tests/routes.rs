//! HTTP surface: every page renders, failures stay in-page.

mod common;

use actix_web::{test, web, App};
use security_dash::server::{routes, AppState};
use security_dash::DatasetCache;
use std::fs;
use std::path::Path;

async fn get(dir: &Path, uri: &str) -> (u16, String) {
    let state = web::Data::new(AppState::new(DatasetCache::new(dir)));
    let app = test::init_service(App::new().app_data(state).configure(routes)).await;
    let resp = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
    let status = resp.status().as_u16();
    let body = test::read_body(resp).await;
    (status, String::from_utf8_lossy(&body).into_owned())
}

#[actix_web::test]
async fn overview_shows_kpis_and_highlighted_preview() {
    let dir = tempfile::tempdir().unwrap();
    common::write_dataset(dir.path());

    let (status, body) = get(dir.path(), "/").await;
    assert_eq!(status, 200);
    assert!(body.contains("42.5%"));
    assert!(body.contains("DoS Hulk"));
    assert!(body.contains("60.0%"));
    assert!(body.contains("class=\"highlight\""));
    assert!(body.contains("is_malicious"));
}

#[actix_web::test]
async fn missing_data_is_a_warning_not_an_error() {
    let dir = tempfile::tempdir().unwrap();
    for uri in ["/", "/kpi", "/state", "/statistics", "/logs", "/model"] {
        let (status, body) = get(dir.path(), uri).await;
        assert_eq!(status, 200, "{}", uri);
        assert!(body.contains("class=\"warning\""), "{}", uri);
    }
}

#[actix_web::test]
async fn state_filter_comes_from_query() {
    let dir = tempfile::tempdir().unwrap();
    common::write_dataset(dir.path());

    let (_, body) = get(dir.path(), "/state?filter=1&attack_type=PortScan").await;
    assert!(body.contains("value=\"PortScan\" checked"));
    assert!(body.contains("value=\"BENIGN\">"));
    assert_eq!(body.matches("Plotly.newPlot").count(), 5);
}

#[actix_web::test]
async fn statistics_renders_three_tabs() {
    let dir = tempfile::tempdir().unwrap();
    common::write_dataset(dir.path());

    let (status, body) = get(dir.path(), "/statistics").await;
    assert_eq!(status, 200);
    assert!(body.contains("Attack Distribution"));
    assert!(body.contains("Trends Over Time"));
    assert!(body.contains("Top IPs &amp; Ports"));
}

#[actix_web::test]
async fn logs_filter_by_ip() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("clean_data.csv"),
        "ip,action\n10.1.1.1,login\n10.2.2.2,scan\n",
    )
    .unwrap();

    let (_, body) = get(dir.path(), "/logs?ip=10.2").await;
    assert!(body.contains("10.2.2.2"));
    assert!(!body.contains("10.1.1.1"));
}

#[actix_web::test]
async fn model_page_and_feature_image() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("stage1_binary_pipeline_A.json"),
        r#"{"named_steps": {"scaler": "StandardScaler()", "clf": "RandomForestClassifier()"}}"#,
    )
    .unwrap();

    let (_, body) = get(dir.path(), "/model").await;
    assert!(body.contains("StandardScaler()"));
    assert!(body.contains("Classification Report"));
    assert!(body.contains("Feature importance plot not found"));
    let (status, _) = get(dir.path(), "/assets/feature_importance.png").await;
    assert_eq!(status, 404);

    fs::write(dir.path().join("feature_importance_stage1.png"), [0x89, b'P', b'N', b'G']).unwrap();
    let (status, _) = get(dir.path(), "/assets/feature_importance.png").await;
    assert_eq!(status, 200);
}

#[actix_web::test]
async fn api_kpis_serves_json() {
    let dir = tempfile::tempdir().unwrap();
    common::write_dataset(dir.path());

    let (status, body) = get(dir.path(), "/api/kpis").await;
    assert_eq!(status, 200);
    let v: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(v["total_events"], 100);
    assert_eq!(v["top_attack_type"], "DoS Hulk");
    assert_eq!(v["top_destination_port"], "80");
    assert_eq!(v["unique_source_ips"], 3);

    let empty = tempfile::tempdir().unwrap();
    let (status, _) = get(empty.path(), "/api/kpis").await;
    assert_eq!(status, 503);
}

#[actix_web::test]
async fn one_service_serves_reloaded_data() {
    let dir = tempfile::tempdir().unwrap();
    common::write_dataset(dir.path());
    let state = web::Data::new(AppState::new(DatasetCache::new(dir.path())));
    let app = test::init_service(App::new().app_data(state).configure(routes)).await;

    let first: serde_json::Value =
        test::call_and_read_body_json(&app, test::TestRequest::get().uri("/api/kpis").to_request())
            .await;
    assert_eq!(first["total_events"], 100);

    fs::write(
        dir.path().join("stats.json"),
        r#"{"total_events": 12345.5, "attack_rate_pct": 80.0}"#,
    )
    .unwrap();
    let second: serde_json::Value =
        test::call_and_read_body_json(&app, test::TestRequest::get().uri("/api/kpis").to_request())
            .await;
    assert_eq!(second["total_events"], 12345.5);

    let resp = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
    assert_eq!(resp.status().as_u16(), 200);
    let body = String::from_utf8_lossy(&test::read_body(resp).await).into_owned();
    assert!(body.contains("12345.5"));
}
