use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Title given to accepted records that carry only a `titleUrl`.
pub const UNKNOWN_TITLE: &str = "Unknown Video";

/// A loosely-shaped record borrowed from the parsed export.
///
/// Fields whose JSON type is not a string are treated as absent, and empty
/// strings are treated as absent too. Nothing here can fail.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RawEvent<'a> {
    pub title: Option<&'a str>,
    /// Stable identifier of the watched item.
    pub title_url: Option<&'a str>,
    /// `name` of the first entry in `subtitles`, if any.
    pub channel: Option<&'a str>,
    /// Timestamp exactly as written in the export.
    pub time: Option<&'a str>,
}

impl<'a> RawEvent<'a> {
    /// Reads a raw event out of an arbitrary JSON value.
    ///
    /// Returns `None` when the value is not an object.
    #[must_use]
    pub fn from_value(value: &'a Value) -> Option<Self> {
        let obj = value.as_object()?;
        let text = |key: &str| obj.get(key).and_then(Value::as_str).filter(|s| !s.is_empty());

        let channel = obj
            .get("subtitles")
            .and_then(Value::as_array)
            .and_then(|subs| subs.first())
            .and_then(|first| first.get("name"))
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty());

        Some(Self {
            title: text("title"),
            title_url: text("titleUrl"),
            channel,
            time: text("time"),
        })
    }

    /// A record is worth keeping when it names or links the watched item.
    #[must_use]
    pub fn is_acceptable(&self) -> bool {
        self.title.is_some() || self.title_url.is_some()
    }
}

/// One accepted watch event in the strict internal shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedEvent {
    /// `titleUrl`, or a generated token when the export omits it.
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel: Option<String>,
    /// Unparsed timestamp; each view decides what to do with bad values.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
}
