//! Integration tests using a mock store
//!
//! Tests the full end-to-end flow: intake directory → parse → normalize →
//! line-protocol writes → move to the processed directory.

use sensorflux::cli::{Cli, Commands, Runner};
use std::path::PathBuf;
use wiremock::matchers::{basic_auth, body_string_contains, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const PRESSURE_FILE: &str = "\
StationA OWHL_01 UTC+2
POSIXt,DateTime,frac.seconds,Pressure.mbar,TempC
1722510000,2024-08-01 13:58:00,0,1013,21.5
1722510060,2024-08-01 13:59:00,25,1014,21.6
1722510120,2024-08-01 14:00:00,5,1015,21.7
";

struct TestDirs {
    _root: tempfile::TempDir,
    data: PathBuf,
    processed: PathBuf,
    credentials: PathBuf,
}

fn setup_dirs() -> TestDirs {
    let root = tempfile::tempdir().unwrap();
    let data = root.path().join("sensor_data");
    let processed = root.path().join("sensor_processed");
    std::fs::create_dir(&data).unwrap();

    let credentials = root.path().join("influxdb_credentials");
    std::fs::write(
        &credentials,
        r#"{"username": "writer", "password": "hunter2"}"#,
    )
    .unwrap();

    TestDirs {
        _root: root,
        data,
        processed,
        credentials,
    }
}

fn run_cli(dirs: &TestDirs, url: &str, dry_run: bool) -> Cli {
    Cli {
        verbose: false,
        command: Commands::Run {
            feed: "pressure".to_string(),
            data_dir: dirs.data.clone(),
            processed_dir: dirs.processed.clone(),
            credentials: dirs.credentials.clone(),
            url: url.to_string(),
            timeout_secs: 5,
            chunk_hours: 1,
            dry_run,
        },
    }
}

async fn mount_healthy_store(server: &MockServer, expected_writes: u64) {
    Mock::given(method("GET"))
        .and(path("/ping"))
        .respond_with(ResponseTemplate::new(204))
        .mount(server)
        .await;

    Mock::given(method("POST"))
        .and(path("/write"))
        .and(query_param("db", "sensor"))
        .and(query_param("precision", "ns"))
        .and(basic_auth("writer", "hunter2"))
        .respond_with(ResponseTemplate::new(204))
        .expect(expected_writes)
        .mount(server)
        .await;
}

fn write_input(dirs: &TestDirs, name: &str, contents: &str) -> PathBuf {
    let path = dirs.data.join(name);
    std::fs::write(&path, contents).unwrap();
    path
}

fn moved(dirs: &TestDirs, name: &str) -> bool {
    dirs.processed.join(name).exists() && !dirs.data.join(name).exists()
}

// ============================================================================
// End-to-end runs
// ============================================================================

#[tokio::test]
async fn test_run_writes_chunks_and_moves_file() {
    let server = MockServer::start().await;
    // 13:58/13:59 local land in one UTC hour window, 14:00 in the next.
    mount_healthy_store(&server, 2).await;

    let dirs = setup_dirs();
    write_input(&dirs, "2024-08-01.csv", PRESSURE_FILE);

    let runner = Runner::new(run_cli(&dirs, &server.uri(), false));
    runner.run().await.unwrap();

    assert!(moved(&dirs, "2024-08-01.csv"));
}

#[tokio::test]
async fn test_run_sends_line_protocol_with_utc_offset_field() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/ping"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/write"))
        .and(body_string_contains(
            "pressure,sensor_position=StationA,sensor_model=OWHL_01",
        ))
        .and(body_string_contains("pressure_mbar=1013i"))
        .and(body_string_contains("utc_offset=2i"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let dirs = setup_dirs();
    write_input(
        &dirs,
        "one-point.csv",
        "StationA OWHL_01 UTC+2\n\
         POSIXt,DateTime,frac.seconds,Pressure.mbar,TempC\n\
         1722510000,2024-08-01 13:58:00,0,1013,21.5\n",
    );

    let runner = Runner::new(run_cli(&dirs, &server.uri(), false));
    runner.run().await.unwrap();
}

#[tokio::test]
async fn test_run_processes_files_in_name_order() {
    let server = MockServer::start().await;
    mount_healthy_store(&server, 2).await;

    let dirs = setup_dirs();
    write_input(
        &dirs,
        "b.csv",
        "StationA OWHL_01 UTC+2\n\
         POSIXt,DateTime,frac.seconds,Pressure.mbar,TempC\n\
         1722510000,2024-08-01 13:58:00,0,1013,21.5\n",
    );
    write_input(
        &dirs,
        "a.csv",
        "StationA OWHL_01 UTC+2\n\
         POSIXt,DateTime,frac.seconds,Pressure.mbar,TempC\n\
         1722510000,2024-08-01 10:12:00,0,1011,20.9\n",
    );

    let runner = Runner::new(run_cli(&dirs, &server.uri(), false));
    runner.run().await.unwrap();

    assert!(moved(&dirs, "a.csv"));
    assert!(moved(&dirs, "b.csv"));
}

// ============================================================================
// Dry run
// ============================================================================

#[tokio::test]
async fn test_dry_run_makes_no_requests_and_moves_nothing() {
    let server = MockServer::start().await;

    // Any request at all would fail the run with a 500 and trip .expect(0).
    Mock::given(method("POST"))
        .and(path("/write"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/ping"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;

    let dirs = setup_dirs();
    write_input(&dirs, "2024-08-01.csv", PRESSURE_FILE);

    let runner = Runner::new(run_cli(&dirs, &server.uri(), true));
    runner.run().await.unwrap();

    assert!(dirs.data.join("2024-08-01.csv").exists());
    assert!(!dirs.processed.join("2024-08-01.csv").exists());
}

// ============================================================================
// Per-file skips and empty files
// ============================================================================

#[tokio::test]
async fn test_malformed_header_skips_file_and_continues() {
    let server = MockServer::start().await;
    mount_healthy_store(&server, 2).await;

    let dirs = setup_dirs();
    write_input(
        &dirs,
        "bad.csv",
        "StationA OWHL_01 CET\n\
         POSIXt,DateTime,frac.seconds,Pressure.mbar,TempC\n\
         1722510000,2024-08-01 13:58:00,0,1013,21.5\n",
    );
    write_input(&dirs, "good.csv", PRESSURE_FILE);

    let runner = Runner::new(run_cli(&dirs, &server.uri(), false));
    runner.run().await.unwrap();

    // The bad file stays in place; the good one still went through.
    assert!(dirs.data.join("bad.csv").exists());
    assert!(moved(&dirs, "good.csv"));
}

#[tokio::test]
async fn test_empty_file_is_left_unmoved() {
    let server = MockServer::start().await;
    mount_healthy_store(&server, 0).await;

    let dirs = setup_dirs();
    write_input(&dirs, "empty.csv", "");

    let runner = Runner::new(run_cli(&dirs, &server.uri(), false));
    runner.run().await.unwrap();

    assert!(dirs.data.join("empty.csv").exists());
    assert!(!dirs.processed.join("empty.csv").exists());
}

// ============================================================================
// Fatal store errors
// ============================================================================

#[tokio::test]
async fn test_store_rejection_aborts_run_and_leaves_file() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/ping"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/write"))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal error"))
        .mount(&server)
        .await;

    let dirs = setup_dirs();
    write_input(&dirs, "2024-08-01.csv", PRESSURE_FILE);

    let runner = Runner::new(run_cli(&dirs, &server.uri(), false));
    let err = runner.run().await.unwrap_err();

    assert!(err.is_fatal());
    assert!(dirs.data.join("2024-08-01.csv").exists());
}

#[tokio::test]
async fn test_missing_credentials_is_fatal_before_any_write() {
    let server = MockServer::start().await;
    mount_healthy_store(&server, 0).await;

    let dirs = setup_dirs();
    std::fs::remove_file(&dirs.credentials).unwrap();
    write_input(&dirs, "2024-08-01.csv", PRESSURE_FILE);

    let runner = Runner::new(run_cli(&dirs, &server.uri(), false));
    let err = runner.run().await.unwrap_err();

    assert!(err.is_fatal());
    assert!(dirs.data.join("2024-08-01.csv").exists());
}

#[tokio::test]
async fn test_missing_data_dir_is_fatal() {
    let server = MockServer::start().await;
    let dirs = setup_dirs();
    std::fs::remove_dir(&dirs.data).unwrap();

    let runner = Runner::new(run_cli(&dirs, &server.uri(), false));
    let err = runner.run().await.unwrap_err();
    assert!(err.is_fatal());
}

// ============================================================================
// Validate / feeds subcommands
// ============================================================================

#[tokio::test]
async fn test_validate_builtin_feed() {
    let cli = Cli {
        verbose: false,
        command: Commands::Validate {
            feed: "pressure".to_string(),
        },
    };
    Runner::new(cli).run().await.unwrap();
}

#[tokio::test]
async fn test_validate_rejects_broken_feed_file() {
    let dir = tempfile::tempdir().unwrap();
    let feed_path = dir.path().join("broken.yaml");
    std::fs::write(
        &feed_path,
        "name: broken\nmeasurement: m\ndatabase: d\ndelimiter: comma\n\
         metadata_header: true\ntimestamp:\n  type: single\n  column: t\n\
         columns:\n  rename: {}\n  drop: []\nfields: {}\ntags: []\n",
    )
    .unwrap();

    let cli = Cli {
        verbose: false,
        command: Commands::Validate {
            feed: feed_path.display().to_string(),
        },
    };
    Runner::new(cli).run().await.unwrap_err();
}

#[tokio::test]
async fn test_list_feeds() {
    let cli = Cli {
        verbose: false,
        command: Commands::Feeds,
    };
    Runner::new(cli).run().await.unwrap();
}
