#[test]
fn papershelf_doctor_contract_offline() {
    let bin = assert_cmd::cargo::cargo_bin!("papershelf");
    let out = std::process::Command::new(bin)
        .args(["doctor", "--probe=false"])
        .env_remove("PAPERSHELF_ENV_FILE")
        .env_remove("PAPERSHELF_DATASET")
        .env_remove("PAPERSHELF_ENDPOINT")
        .env("PAPERSHELF_OFFLINE", "1")
        .output()
        .expect("run papershelf doctor");

    assert!(out.status.success(), "papershelf doctor failed");
    let s = String::from_utf8_lossy(&out.stdout);
    let v: serde_json::Value = serde_json::from_str(&s).expect("parse doctor json");

    assert_eq!(v["schema_version"].as_u64(), Some(1));
    assert_eq!(v["kind"].as_str(), Some("doctor"));
    assert_eq!(v["ok"].as_bool(), Some(true));
    assert!(v.get("elapsed_ms").is_some());
    assert!(v["probe"].is_null());

    assert_eq!(v["configured"]["offline"].as_bool(), Some(true));
    assert_eq!(v["configured"]["timeout_ms"].as_u64(), Some(3000));

    let checks = v["checks"].as_array().expect("checks array");
    let dataset = checks
        .iter()
        .find(|c| c["name"].as_str() == Some("dataset_decodes"))
        .expect("dataset_decodes check");
    assert_eq!(dataset["ok"].as_bool(), Some(true));
    assert_eq!(dataset["papers"].as_u64(), Some(15));
    assert_eq!(dataset["origin"]["kind"].as_str(), Some("embedded"));
}

#[test]
fn papershelf_doctor_flags_bad_endpoint() {
    let bin = assert_cmd::cargo::cargo_bin!("papershelf");
    let out = std::process::Command::new(bin)
        .args(["doctor", "--endpoint", "ftp://example.test/papers"])
        .env_remove("PAPERSHELF_ENV_FILE")
        .env_remove("PAPERSHELF_DATASET")
        .env_remove("PAPERSHELF_OFFLINE")
        .output()
        .expect("run papershelf doctor");

    assert!(!out.status.success());
    let s = String::from_utf8_lossy(&out.stdout);
    let v: serde_json::Value = serde_json::from_str(&s).expect("parse doctor json");
    assert_eq!(v["ok"].as_bool(), Some(false));
    let checks = v["checks"].as_array().expect("checks array");
    let endpoint = checks
        .iter()
        .find(|c| c["name"].as_str() == Some("endpoint_url_valid"))
        .expect("endpoint_url_valid check");
    assert_eq!(endpoint["ok"].as_bool(), Some(false));
}
