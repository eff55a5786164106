//! Persisting a [`StatsBundle`] as independently retrievable parts.

use serde::de::DeserializeOwned;
use serde::Serialize;
use watchstats_core::{AdvancedStats, StatsBundle, Summary};

use crate::{KeyValueStore, StoreError};

pub const SUMMARY_KEY: &str = "watchstats.summary";
pub const DAILY_VIEWS_KEY: &str = "watchstats.dailyViews";
pub const HOURLY_VIEWS_KEY: &str = "watchstats.hourlyViews";
pub const TOP_ITEMS_KEY: &str = "watchstats.topItems";
pub const SOURCE_COUNTS_KEY: &str = "watchstats.sourceCounts";
pub const ADVANCED_STATS_KEY: &str = "watchstats.advancedStats";

/// Every key a bundle may occupy. The summary comes last.
pub const BUNDLE_KEYS: [&str; 6] = [
    DAILY_VIEWS_KEY,
    HOURLY_VIEWS_KEY,
    TOP_ITEMS_KEY,
    SOURCE_COUNTS_KEY,
    ADVANCED_STATS_KEY,
    SUMMARY_KEY,
];

fn put_json<S, T>(store: &mut S, key: &str, value: &T) -> Result<(), StoreError>
where
    S: KeyValueStore + ?Sized,
    T: Serialize,
{
    let text = serde_json::to_string(value).map_err(|source| StoreError::Serialize {
        key: key.to_string(),
        source,
    })?;
    store.put(key, &text)
}

fn get_json<S, T>(store: &S, key: &str) -> Result<Option<T>, StoreError>
where
    S: KeyValueStore + ?Sized,
    T: DeserializeOwned,
{
    store
        .get(key)?
        .map(|text| {
            serde_json::from_str(&text).map_err(|source| StoreError::Serialize {
                key: key.to_string(),
                source,
            })
        })
        .transpose()
}

/// Write every part of `bundle` under its own key.
///
/// The summary marks a complete bundle: it is removed before the other
/// parts are written and stored again only once they all succeeded.
///
/// # Errors
///
/// Returns the first [`StoreError`] raised; a
/// [`StoreError::CapacityExceeded`] means the bundle does not fit.
pub fn save_bundle<S>(store: &mut S, bundle: &StatsBundle) -> Result<(), StoreError>
where
    S: KeyValueStore + ?Sized,
{
    store.remove(SUMMARY_KEY)?;
    put_json(store, DAILY_VIEWS_KEY, &bundle.daily_views)?;
    put_json(store, HOURLY_VIEWS_KEY, &bundle.hourly_views)?;
    put_json(store, TOP_ITEMS_KEY, &bundle.top_items)?;
    put_json(store, SOURCE_COUNTS_KEY, &bundle.source_counts)?;
    match &bundle.advanced_stats {
        Some(advanced) => put_json(store, ADVANCED_STATS_KEY, advanced)?,
        None => store.remove(ADVANCED_STATS_KEY)?,
    }
    put_json(store, SUMMARY_KEY, &bundle.summary)?;

    tracing::info!(
        total_videos = bundle.summary.total_videos,
        active_days = bundle.daily_views.len(),
        "bundle saved"
    );
    Ok(())
}

/// Read a previously saved bundle.
///
/// Returns `Ok(None)` when no summary is stored. Missing list parts load as
/// empty and a missing advanced part loads as `None`.
///
/// # Errors
///
/// Returns [`StoreError`] if a part cannot be read or parsed.
pub fn load_bundle<S>(store: &S) -> Result<Option<StatsBundle>, StoreError>
where
    S: KeyValueStore + ?Sized,
{
    let Some(summary) = get_json::<_, Summary>(store, SUMMARY_KEY)? else {
        return Ok(None);
    };

    Ok(Some(StatsBundle {
        daily_views: get_json(store, DAILY_VIEWS_KEY)?.unwrap_or_default(),
        hourly_views: get_json(store, HOURLY_VIEWS_KEY)?.unwrap_or_default(),
        top_items: get_json(store, TOP_ITEMS_KEY)?.unwrap_or_default(),
        source_counts: get_json(store, SOURCE_COUNTS_KEY)?.unwrap_or_default(),
        summary,
        advanced_stats: get_json::<_, AdvancedStats>(store, ADVANCED_STATS_KEY)?,
    }))
}

/// Remove every bundle key.
///
/// # Errors
///
/// Returns [`StoreError`] if a key cannot be removed.
pub fn clear_bundle<S>(store: &mut S) -> Result<(), StoreError>
where
    S: KeyValueStore + ?Sized,
{
    for key in BUNDLE_KEYS {
        store.remove(key)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryStore;

    #[test]
    fn load_from_empty_store_is_none() {
        let store = MemoryStore::default();
        assert!(load_bundle(&store).unwrap().is_none());
    }

    #[test]
    fn corrupt_part_is_a_serialize_error() {
        let mut store = MemoryStore::default();
        store.put(SUMMARY_KEY, "{not json").unwrap();
        assert!(matches!(
            load_bundle(&store),
            Err(StoreError::Serialize { ref key, .. }) if key == SUMMARY_KEY
        ));
    }

    #[test]
    fn summary_is_written_last() {
        assert_eq!(BUNDLE_KEYS.last(), Some(&SUMMARY_KEY));
    }
}
