use axum::{routing::get, Router};
use std::net::SocketAddr;
use std::process::Command;
use std::time::{Duration, Instant};

const REMOTE: &str = r#"{"papers":[{"id":"2601.00001","title":"Fresh From The Wire","authors":["Remote Author","Second Author"],"abstract":"Served by the fixture.","categories":["cs.SE"],"submittedAt":"2026-01-05","pdfUrl":"https://arxiv.org/pdf/2601.00001.pdf"}]}"#;

fn serve(rt: &tokio::runtime::Runtime, app: Router) -> SocketAddr {
    rt.block_on(async move {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        addr
    })
}

fn papershelf() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("papershelf"));
    cmd.env_remove("PAPERSHELF_ENV_FILE")
        .env_remove("PAPERSHELF_DATASET")
        .env_remove("PAPERSHELF_OFFLINE")
        .env_remove("PAPERSHELF_REFRESH_TIMEOUT_MS");
    cmd
}

#[test]
fn successful_refresh_replaces_bundled_snapshot() {
    let rt = tokio::runtime::Runtime::new().expect("rt");
    let app = Router::new().route("/papers", get(|| async { REMOTE }));
    let addr = serve(&rt, app);

    let out = papershelf()
        .args(["category", "cs.SE", "--endpoint"])
        .arg(format!("http://{addr}/papers"))
        .output()
        .expect("run category");
    assert!(out.status.success());
    let v: serde_json::Value =
        serde_json::from_str(&String::from_utf8_lossy(&out.stdout)).expect("json");

    assert_eq!(v["refresh"]["origin"].as_str(), Some("remote"));
    assert_eq!(v["refresh"]["outcome"].as_str(), Some("updated"));
    assert_eq!(v["papers"][0]["id"].as_str(), Some("2601.00001"));
    assert_eq!(v["papers"].as_array().map(|a| a.len()), Some(1));
}

#[test]
fn failed_refresh_keeps_bundled_snapshot() {
    let rt = tokio::runtime::Runtime::new().expect("rt");
    let app = Router::new().route(
        "/papers",
        get(|| async { (axum::http::StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
    );
    let addr = serve(&rt, app);

    let out = papershelf()
        .args(["home", "--endpoint"])
        .arg(format!("http://{addr}/papers"))
        .output()
        .expect("run home");
    assert!(out.status.success());
    let v: serde_json::Value =
        serde_json::from_str(&String::from_utf8_lossy(&out.stdout)).expect("json");

    assert_eq!(v["refresh"]["origin"].as_str(), Some("bundled"));
    assert_eq!(v["refresh"]["outcome"].as_str(), Some("http_status"));
    assert_eq!(v["papers"].as_array().map(|a| a.len()), Some(15));
}

#[test]
fn hanging_refresh_is_abandoned_at_the_timeout() {
    let rt = tokio::runtime::Runtime::new().expect("rt");
    let app = Router::new().route(
        "/papers",
        get(|| async {
            tokio::time::sleep(Duration::from_secs(30)).await;
            REMOTE
        }),
    );
    let addr = serve(&rt, app);

    let t0 = Instant::now();
    let out = papershelf()
        .args(["home", "--timeout-ms", "300", "--endpoint"])
        .arg(format!("http://{addr}/papers"))
        .output()
        .expect("run home");
    assert!(out.status.success());
    assert!(
        t0.elapsed() < Duration::from_secs(10),
        "refresh was not bounded: {:?}",
        t0.elapsed()
    );
    let v: serde_json::Value =
        serde_json::from_str(&String::from_utf8_lossy(&out.stdout)).expect("json");
    assert_eq!(v["refresh"]["origin"].as_str(), Some("bundled"));
    assert_eq!(v["refresh"]["outcome"].as_str(), Some("timeout"));
    assert_eq!(v["papers"].as_array().map(|a| a.len()), Some(15));
}
