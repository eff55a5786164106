use std::path::Path;

use watchstats_core::{AppConfig, Environment};
use watchstats_store::{load_bundle, FileStore};

use super::*;

fn test_config(store_dir: &Path) -> AppConfig {
    AppConfig {
        env: Environment::Test,
        log_level: "debug".to_string(),
        store_dir: store_dir.to_path_buf(),
        store_capacity_bytes: 5 * 1024 * 1024,
        max_upload_bytes: 1024 * 1024,
        utc_offset_minutes: 0,
        legacy_first_event: true,
    }
}

#[test]
fn parses_analyze_command() {
    let cli = Cli::try_parse_from(["watchstats", "analyze", "history.json"])
        .expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Some(Commands::Analyze {
            utc_offset_minutes: None,
            json: false,
            ..
        })
    ));
}

#[test]
fn parses_negative_offset_and_json_flag() {
    let cli = Cli::try_parse_from([
        "watchstats",
        "analyze",
        "history.json",
        "--utc-offset-minutes",
        "-300",
        "--json",
    ])
    .expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Some(Commands::Analyze {
            utc_offset_minutes: Some(-300),
            json: true,
            ..
        })
    ));
}

#[test]
fn analyze_requires_a_file() {
    assert!(Cli::try_parse_from(["watchstats", "analyze"]).is_err());
}

#[test]
fn parses_show_and_clear() {
    let cli = Cli::try_parse_from(["watchstats", "show", "--json"]).unwrap();
    assert!(matches!(cli.command, Some(Commands::Show { json: true })));

    let cli = Cli::try_parse_from(["watchstats", "clear"]).unwrap();
    assert!(matches!(cli.command, Some(Commands::Clear)));
}

#[test]
fn no_command_is_none() {
    let cli = Cli::try_parse_from(["watchstats"]).expect("expected valid cli args");
    assert!(cli.command.is_none());
}

#[tokio::test]
async fn analyze_aggregates_on_worker_and_persists() {
    let dir = tempfile::tempdir().unwrap();
    let export = dir.path().join("watch-history.json");
    std::fs::write(
        &export,
        r#"[
            {"title": "Watched A", "titleUrl": "a", "time": "2024-01-05T23:30:00Z", "subtitles": [{"name": "C1"}]},
            {"title": "Watched A", "titleUrl": "a", "time": "2024-01-06T10:00:00Z", "subtitles": [{"name": "C1"}]},
            {"header": "not a video"}
        ]"#,
    )
    .unwrap();
    let config = test_config(&dir.path().join("store"));

    let bundle = analyze::analyze_file(&config, &export, Some(60)).await.unwrap();
    assert_eq!(bundle.summary.total_videos, 2);
    // Both events land on 2024-01-06 at UTC+1.
    assert_eq!(bundle.daily_views.len(), 1);
    assert_eq!(bundle.daily_views[0].date, "2024-01-06");

    analyze::persist(&config, &bundle).unwrap();
    let store = FileStore::open(&config.store_dir, config.store_capacity_bytes).unwrap();
    assert_eq!(load_bundle(&store).unwrap(), Some(bundle));
}

#[tokio::test]
async fn analyze_reports_missing_video_array() {
    let dir = tempfile::tempdir().unwrap();
    let export = dir.path().join("empty.json");
    std::fs::write(&export, r#"{"items": []}"#).unwrap();
    let config = test_config(dir.path());

    let err = analyze::analyze_file(&config, &export, None).await.unwrap_err();
    assert!(err.to_string().contains("could not find video data"));
}

#[tokio::test]
async fn analyze_rejects_out_of_range_offset() {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(dir.path());
    let result = analyze::analyze_file(&config, &dir.path().join("x.json"), Some(2000)).await;
    assert!(result.is_err());
}

#[test]
fn show_without_data_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(dir.path());
    let err = show::run_show(&config, false).unwrap_err();
    assert!(err.to_string().contains("no data found"));
}

#[test]
fn persist_reports_capacity_failures() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = test_config(dir.path());
    config.store_capacity_bytes = 64;
    let bundle = watchstats_engine::Engine::default().aggregate(&[serde_json::json!({"title": "t"})]);

    let err = analyze::persist(&config, &bundle).unwrap_err();
    assert!(err.to_string().contains("failed to store results"));
    assert!(err
        .chain()
        .any(|cause| cause.to_string().contains("storage quota exceeded")));
}
