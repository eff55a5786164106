//! The `analyze` command: intake, aggregate off the async runtime, persist.

use std::path::Path;

use anyhow::Context;
use watchstats_core::{extract_events, read_export, AppConfig, StatsBundle};
use watchstats_engine::{Engine, TimePolicy};
use watchstats_store::{clear_bundle, save_bundle, FileStore};

use crate::render;

/// Read `file`, aggregate it on a blocking worker and return the bundle.
///
/// `utc_offset_minutes` overrides the configured bucketing offset.
///
/// # Errors
///
/// Returns an error if intake fails, the offset is out of range, or the
/// worker aborts.
pub(crate) async fn analyze_file(
    config: &AppConfig,
    file: &Path,
    utc_offset_minutes: Option<i32>,
) -> anyhow::Result<StatsBundle> {
    let offset = utc_offset_minutes.unwrap_or(config.utc_offset_minutes);
    let policy = TimePolicy::from_offset_minutes(offset)?;

    let data = read_export(file, config.max_upload_bytes)?;
    let raw = extract_events(data)?;
    tracing::info!(file = %file.display(), records = raw.len(), "export loaded");

    let engine = Engine::builder()
        .time_policy(policy)
        .legacy_first_event(config.legacy_first_event)
        .build();

    let bundle = tokio::task::spawn_blocking(move || engine.try_aggregate(&raw))
        .await
        .context("aggregation worker failed to complete")??;
    Ok(bundle)
}

/// Replace whatever is stored with `bundle`.
///
/// # Errors
///
/// Returns an error if the store cannot be opened or the bundle does not fit.
pub(crate) fn persist(config: &AppConfig, bundle: &StatsBundle) -> anyhow::Result<()> {
    let mut store = FileStore::open(&config.store_dir, config.store_capacity_bytes)?;
    clear_bundle(&mut store)?;
    save_bundle(&mut store, bundle).with_context(|| {
        format!(
            "failed to store results in {}; the file may be too large",
            config.store_dir.display()
        )
    })?;
    Ok(())
}

pub(crate) async fn run_analyze(
    config: &AppConfig,
    file: &Path,
    utc_offset_minutes: Option<i32>,
    json: bool,
) -> anyhow::Result<()> {
    let bundle = analyze_file(config, file, utc_offset_minutes).await?;
    persist(config, &bundle)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&bundle)?);
    } else {
        print!("{}", render::render_bundle(&bundle));
    }
    Ok(())
}
