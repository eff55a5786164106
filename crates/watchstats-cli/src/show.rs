use watchstats_core::AppConfig;
use watchstats_store::{clear_bundle, load_bundle, FileStore};

use crate::render;

pub(crate) fn run_show(config: &AppConfig, json: bool) -> anyhow::Result<()> {
    let store = FileStore::open(&config.store_dir, config.store_capacity_bytes)?;
    let bundle = load_bundle(&store)?.ok_or_else(|| {
        anyhow::anyhow!("no data found; run `watchstats analyze <FILE>` first")
    })?;

    if json {
        println!("{}", serde_json::to_string_pretty(&bundle)?);
    } else {
        print!("{}", render::render_bundle(&bundle));
    }
    Ok(())
}

pub(crate) fn run_clear(config: &AppConfig) -> anyhow::Result<()> {
    let mut store = FileStore::open(&config.store_dir, config.store_capacity_bytes)?;
    clear_bundle(&mut store)?;
    println!("cleared stored statistics in {}", config.store_dir.display());
    Ok(())
}
