//! Frequency rankings: most-watched items and most-watched channels.

use std::collections::HashMap;

use watchstats_core::{NormalizedEvent, SourceCount, TopItem};

/// How many entries the ranked views keep.
pub const TOP_N: usize = 10;

/// Group events by id, keeping the first title and channel seen for each,
/// and return the `TOP_N` most frequent.
///
/// Ties keep first-encounter order because the sort is stable.
#[must_use]
pub fn top_items(events: &[NormalizedEvent]) -> Vec<TopItem> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<TopItem> = Vec::new();

    for event in events {
        if let Some(&slot) = index.get(event.id.as_str()) {
            groups[slot].count += 1;
        } else {
            index.insert(event.id.as_str(), groups.len());
            groups.push(TopItem {
                id: event.id.clone(),
                title: event.title.clone(),
                channel: event.channel.clone(),
                count: 1,
            });
        }
    }

    groups.sort_by(|a, b| b.count.cmp(&a.count));
    groups.truncate(TOP_N);
    groups
}

/// Event count for every distinct channel, in first-encounter order.
///
/// This is the full distribution; [`top_sources`] truncates it.
#[must_use]
pub fn channel_tally(events: &[NormalizedEvent]) -> Vec<SourceCount> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut tally: Vec<SourceCount> = Vec::new();

    for channel in events.iter().filter_map(|e| e.channel.as_deref()) {
        if let Some(&slot) = index.get(channel) {
            tally[slot].count += 1;
        } else {
            index.insert(channel, tally.len());
            tally.push(SourceCount {
                name: channel.to_string(),
                count: 1,
            });
        }
    }
    tally
}

/// The `TOP_N` channels by event count, descending, ties by first encounter.
#[must_use]
pub fn top_sources(tally: &[SourceCount]) -> Vec<SourceCount> {
    let mut ranked = tally.to_vec();
    ranked.sort_by(|a, b| b.count.cmp(&a.count));
    ranked.truncate(TOP_N);
    ranked
}
