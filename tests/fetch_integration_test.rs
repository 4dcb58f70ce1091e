use anyhow::Result;
use httpmock::prelude::*;
use lrn_etl::{ConvertPipeline, EtlEngine, FetchConfig, FetchPipeline, LocalStorage};
use std::io::Write;
use std::time::{Duration, Instant};
use tempfile::TempDir;

fn fetch_config(server: &MockServer, input_file: &str, output_dir: &str) -> FetchConfig {
    FetchConfig {
        base_url: server.url("/v1/LRNLookup/"),
        token: "test-token".to_string(),
        input_file: input_file.to_string(),
        field_name: "phone".to_string(),
        output_dir: output_dir.to_string(),
        rate_limit_ms: 25,
    }
}

fn write_input(dir: &TempDir, contents: &str) -> Result<String> {
    let path = dir.path().join("input.csv");
    let mut file = std::fs::File::create(&path)?;
    file.write_all(contents.as_bytes())?;
    Ok(path.to_str().unwrap().to_string())
}

fn run_fetch(
    config: FetchConfig,
) -> EtlEngine<FetchPipeline<LocalStorage, FetchConfig>> {
    let storage = LocalStorage::new(config.output_dir.clone());
    EtlEngine::new(FetchPipeline::new(storage, config))
}

#[tokio::test]
async fn test_end_to_end_fetch_then_convert() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let input_file = write_input(&temp_dir, "name,phone\na,(555) 123-4567\nb,555-987-6543\n")?;
    let output_dir = temp_dir.path().join("lookup_output");

    let server = MockServer::start();
    let wired_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/v1/LRNLookup/5551234567")
            .header("authorization", "Token test-token");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({
                "tn": "5551234567",
                "lrn": "5551230000",
                "ported_status": "N",
                "ported_date": "",
                "ocn": "1111",
                "line_type": "0",
                "spid": "2222",
                "spid_carrier_name": "Carrier A",
                "spid_carrier_type": "CLEC",
                "altspid": "",
                "altspid_carrier_name": "",
                "altspid_carrier_type": ""
            }));
    });
    let wireless_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/v1/LRNLookup/5559876543")
            .header("authorization", "Token test-token");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({
                "tn": "5559876543",
                "lrn": "5559870000",
                "ported_status": "Y",
                "ported_date": "2023-01-15",
                "ocn": "3333",
                "line_type": "1",
                "spid": "4444",
                "spid_carrier_name": "Carrier B",
                "spid_carrier_type": "WIRELESS"
            }));
    });

    let config = fetch_config(&server, &input_file, output_dir.to_str().unwrap());
    run_fetch(config).run().await?;

    wired_mock.assert();
    wireless_mock.assert();

    // Exactly the two expected record files, keyed by canonical number
    let mut files: Vec<String> = std::fs::read_dir(&output_dir)?
        .map(|entry| entry.unwrap().file_name().to_string_lossy().to_string())
        .collect();
    files.sort();
    assert_eq!(files, vec!["5551234567.json", "5559876543.json"]);

    // The persisted file is the raw response, human-readable
    let persisted = std::fs::read_to_string(output_dir.join("5551234567.json"))?;
    assert!(persisted.contains('\n'));
    let parsed: serde_json::Value = serde_json::from_str(&persisted)?;
    assert_eq!(parsed["tn"], "5551234567");
    assert_eq!(parsed["line_type"], "0");

    // Convert the populated directory and check the label mapping
    let export_file = "lookups.csv";
    let convert = ConvertPipeline::new(
        LocalStorage::new(&output_dir),
        LocalStorage::new(temp_dir.path()),
        export_file,
    );
    EtlEngine::new(convert).run().await?;

    let csv_text = std::fs::read_to_string(temp_dir.path().join(export_file))?;
    let lines: Vec<&str> = csv_text.lines().collect();
    assert_eq!(
        lines[0],
        "tn,lrn,ported_status,ported_date,ocn,line_type,spid,spid_carrier_name,\
         spid_carrier_type,altspid,altspid_carrier_name,altspid_carrier_type"
    );
    assert_eq!(lines.len(), 3);

    let wired_row = lines.iter().find(|l| l.starts_with("5551234567")).unwrap();
    let wireless_row = lines.iter().find(|l| l.starts_with("5559876543")).unwrap();
    assert!(wired_row.contains(",Wired,"));
    assert!(wireless_row.contains(",Wireless,"));

    Ok(())
}

#[tokio::test]
async fn test_rerun_issues_no_remote_calls() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let input_file = write_input(&temp_dir, "phone\n555-111-2222\n555-333-4444\n")?;
    let output_dir = temp_dir.path().join("lookup_output");

    let server = MockServer::start();
    let first = server.mock(|when, then| {
        when.method(GET).path("/v1/LRNLookup/5551112222");
        then.status(200)
            .json_body(serde_json::json!({"tn": "5551112222", "line_type": "0"}));
    });
    let second = server.mock(|when, then| {
        when.method(GET).path("/v1/LRNLookup/5553334444");
        then.status(200)
            .json_body(serde_json::json!({"tn": "5553334444", "line_type": "1"}));
    });

    let config = fetch_config(&server, &input_file, output_dir.to_str().unwrap());
    run_fetch(config.clone()).run().await?;
    assert_eq!(first.hits(), 1);
    assert_eq!(second.hits(), 1);

    // Same input against the now-populated directory: nothing left to fetch
    run_fetch(config).run().await?;
    assert_eq!(first.hits(), 1);
    assert_eq!(second.hits(), 1);

    Ok(())
}

#[tokio::test]
async fn test_fetch_respects_rate_floor() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let input_file = write_input(&temp_dir, "phone\n5550000001\n5550000002\n5550000003\n")?;
    let output_dir = temp_dir.path().join("lookup_output");

    let server = MockServer::start();
    for tn in ["5550000001", "5550000002", "5550000003"] {
        server.mock(|when, then| {
            when.method(GET).path(format!("/v1/LRNLookup/{}", tn));
            then.status(200)
                .json_body(serde_json::json!({"tn": tn, "line_type": "2"}));
        });
    }

    let mut config = fetch_config(&server, &input_file, output_dir.to_str().unwrap());
    config.rate_limit_ms = 80;

    let start = Instant::now();
    run_fetch(config).run().await?;

    // N numbers take at least (N - 1) intervals of wall-clock time
    assert!(start.elapsed() >= Duration::from_millis(160));
    Ok(())
}

#[tokio::test]
async fn test_failed_lookup_surfaces_number_and_writes_nothing() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let input_file = write_input(&temp_dir, "phone\n555-111-2222\n")?;
    let output_dir = temp_dir.path().join("lookup_output");

    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/v1/LRNLookup/5551112222");
        then.status(503);
    });

    let config = fetch_config(&server, &input_file, output_dir.to_str().unwrap());
    let err = run_fetch(config).run().await.unwrap_err();

    mock.assert();
    assert!(err.to_string().contains("5551112222"));
    assert!(!output_dir.exists() || std::fs::read_dir(&output_dir)?.next().is_none());
    Ok(())
}

#[tokio::test]
async fn test_crash_recovery_resumes_from_failure_point() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let input_file = write_input(&temp_dir, "phone\n5551112222\n5553334444\n")?;
    let output_dir = temp_dir.path().join("lookup_output");

    let server = MockServer::start();
    let good = server.mock(|when, then| {
        when.method(GET).path("/v1/LRNLookup/5551112222");
        then.status(200)
            .json_body(serde_json::json!({"tn": "5551112222", "line_type": "0"}));
    });
    let mut failing = server.mock(|when, then| {
        when.method(GET).path("/v1/LRNLookup/5553334444");
        then.status(500);
    });

    let config = fetch_config(&server, &input_file, output_dir.to_str().unwrap());
    assert!(run_fetch(config.clone()).run().await.is_err());
    assert!(output_dir.join("5551112222.json").exists());

    // The service recovers; a rerun fetches only the failed number
    failing.delete();
    let recovered = server.mock(|when, then| {
        when.method(GET).path("/v1/LRNLookup/5553334444");
        then.status(200)
            .json_body(serde_json::json!({"tn": "5553334444", "line_type": "1"}));
    });

    run_fetch(config).run().await?;
    assert_eq!(good.hits(), 1);
    assert_eq!(recovered.hits(), 1);
    assert!(output_dir.join("5553334444.json").exists());
    Ok(())
}
