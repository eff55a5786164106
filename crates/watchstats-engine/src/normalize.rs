//! Filtering raw export records down to [`NormalizedEvent`]s.

use serde_json::Value;
use watchstats_core::{NormalizedEvent, RawEvent, UNKNOWN_TITLE};

use crate::id::IdGenerator;

/// Keep every record that is an object carrying a `title` or `titleUrl`, and
/// coerce it into the strict event shape.
///
/// Never fails: unusable records are dropped and counted in the debug log.
#[must_use]
pub fn normalize(raw: &[Value], ids: &dyn IdGenerator) -> Vec<NormalizedEvent> {
    let events: Vec<NormalizedEvent> = raw
        .iter()
        .filter_map(RawEvent::from_value)
        .filter(RawEvent::is_acceptable)
        .map(|event| normalize_event(event, ids))
        .collect();

    tracing::debug!(
        accepted = events.len(),
        dropped = raw.len() - events.len(),
        "normalized watch events"
    );
    events
}

fn normalize_event(event: RawEvent<'_>, ids: &dyn IdGenerator) -> NormalizedEvent {
    NormalizedEvent {
        id: event
            .title_url
            .map_or_else(|| ids.next_id(), str::to_string),
        title: event.title.unwrap_or(UNKNOWN_TITLE).to_string(),
        channel: event.channel.map(str::to_string),
        time: event.time.map(str::to_string),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::id::SequentialIdGenerator;

    #[test]
    fn keeps_records_with_title_or_url() {
        let raw = vec![
            json!({"title": "only title"}),
            json!({"titleUrl": "https://youtu.be/a"}),
            json!({"time": "2024-01-01T00:00:00Z"}),
            json!(null),
            json!(17),
            json!({"title": "", "titleUrl": ""}),
        ];
        let events = normalize(&raw, &SequentialIdGenerator::new());
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].title, "only title");
        assert_eq!(events[1].title, UNKNOWN_TITLE);
        assert_eq!(events[1].id, "https://youtu.be/a");
    }

    #[test]
    fn generates_ids_for_missing_urls() {
        let raw = vec![json!({"title": "a"}), json!({"title": "b"})];
        let events = normalize(&raw, &SequentialIdGenerator::new());
        assert_eq!(events[0].id, "video-1");
        assert_eq!(events[1].id, "video-2");
    }

    #[test]
    fn carries_channel_and_time_verbatim() {
        let raw = vec![json!({
            "title": "a",
            "titleUrl": "u",
            "subtitles": [{"name": "Chan"}],
            "time": "not-a-date"
        })];
        let events = normalize(&raw, &SequentialIdGenerator::new());
        assert_eq!(events[0].channel.as_deref(), Some("Chan"));
        assert_eq!(events[0].time.as_deref(), Some("not-a-date"));
    }

    #[test]
    fn output_never_longer_than_input() {
        let raw: Vec<Value> = (0..20)
            .map(|i| {
                if i % 3 == 0 {
                    json!({"details": i})
                } else {
                    json!({"title": format!("t{i}")})
                }
            })
            .collect();
        let events = normalize(&raw, &SequentialIdGenerator::new());
        assert!(events.len() <= raw.len());
        assert_eq!(events.len(), 13);
    }
}
