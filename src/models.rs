//! Data structures exchanged with the request backend
//!
//! - **Search**: `GET /search` responses and the media items they carry
//! - **Request**: `POST /request` payloads and replies
//!
//! The backend relays Sonarr/Radarr lookups fairly loosely (ids may be
//! numbers or strings, `year` and `seasonCount` may be `"N/A"`), so the
//! deserializers here accept both shapes instead of failing the whole page.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;

/// Poster shown when an item carries none.
pub const PLACEHOLDER_POSTER: &str = "https://via.placeholder.com/200";

// =============================================================================
// Media Type
// =============================================================================

/// Which backend catalogue a search or request targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Tv,
    #[default]
    Movie,
}

impl MediaType {
    /// Both types, in the order their panels appear on screen
    pub const ALL: [MediaType; 2] = [MediaType::Tv, MediaType::Movie];

    /// Wire name used in query strings and payloads
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaType::Tv => "tv",
            MediaType::Movie => "movie",
        }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MediaType::Tv => write!(f, "TV Show"),
            MediaType::Movie => write!(f, "Movie"),
        }
    }
}

// =============================================================================
// Loose Scalars
// =============================================================================

/// Identifier of a media item (tvdb id for shows, tmdb id for movies)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MediaId {
    Number(u64),
    Text(String),
}

impl MediaId {
    /// `0` and `""` do not identify anything
    pub fn is_valid(&self) -> bool {
        match self {
            MediaId::Number(n) => *n != 0,
            MediaId::Text(s) => !s.is_empty(),
        }
    }

    /// Compare ids by their text form, so `1` matches `"1"`
    pub fn same_as(&self, other: &MediaId) -> bool {
        self.to_string() == other.to_string()
    }
}

impl fmt::Display for MediaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MediaId::Number(n) => write!(f, "{}", n),
            MediaId::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<u64> for MediaId {
    fn from(n: u64) -> Self {
        MediaId::Number(n)
    }
}

impl From<&str> for MediaId {
    fn from(s: &str) -> Self {
        MediaId::Text(s.to_string())
    }
}

/// Release year; the backend sends `"N/A"` when it has none
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MediaYear {
    Number(i64),
    Text(String),
}

impl MediaYear {
    /// `0` and `""` count as missing
    pub fn is_known(&self) -> bool {
        match self {
            MediaYear::Number(n) => *n != 0,
            MediaYear::Text(s) => !s.is_empty(),
        }
    }
}

impl fmt::Display for MediaYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MediaYear::Number(n) => write!(f, "{}", n),
            MediaYear::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<i64> for MediaYear {
    fn from(n: i64) -> Self {
        MediaYear::Number(n)
    }
}

// =============================================================================
// Search Models
// =============================================================================

/// Rating block attached to a search result
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Ratings {
    #[serde(default)]
    pub value: Option<f64>,
}

/// One movie or TV show returned by `/search`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaItem {
    #[serde(default)]
    pub id: Option<MediaId>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub title: String,
    #[serde(default)]
    pub year: Option<MediaYear>,
    /// Set by the controller after the fetch, from the type that was searched
    #[serde(rename = "type", default)]
    pub media_type: MediaType,
    #[serde(default)]
    pub poster: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub genres: Option<Vec<String>>,
    #[serde(default, deserialize_with = "lenient_ratings")]
    pub ratings: Option<Ratings>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub season_count: Option<u32>,
    #[serde(default)]
    pub box_set: Option<Vec<String>>,
}

impl MediaItem {
    /// Year for list rows, `"Unknown Year"` when missing
    pub fn year_label(&self) -> String {
        self.known_year()
            .map(|y| y.to_string())
            .unwrap_or_else(|| "Unknown Year".to_string())
    }

    /// The year, if it is a real one
    pub fn known_year(&self) -> Option<&MediaYear> {
        self.year.as_ref().filter(|y| y.is_known())
    }

    /// Row text: `Title (Year)`
    pub fn row_label(&self) -> String {
        format!("{} ({})", self.title, self.year_label())
    }

    /// Positive season count, if the backend knew it
    pub fn seasons(&self) -> Option<u32> {
        self.season_count.filter(|&n| n > 0)
    }

    /// Box-set titles, if there are any
    pub fn box_set_titles(&self) -> Option<&[String]> {
        self.box_set.as_deref().filter(|titles| !titles.is_empty())
    }
}

/// Body of a `/search` response
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    #[serde(default)]
    pub items: Vec<MediaItem>,
    #[serde(default)]
    pub has_next_page: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<Value>,
}

impl SearchResponse {
    /// True when the backend reported an error or found nothing
    pub fn is_empty(&self) -> bool {
        self.error.as_ref().is_some_and(is_truthy) || self.items.is_empty()
    }
}

// =============================================================================
// Request Models
// =============================================================================

/// Body of a `/request` call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestPayload {
    pub id: MediaId,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<MediaYear>,
    #[serde(rename = "type")]
    pub media_type: MediaType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seasons: Option<Vec<String>>,
}

impl RequestPayload {
    /// Build a payload; an empty season list is dropped entirely
    pub fn new(
        id: MediaId,
        title: impl Into<String>,
        year: Option<MediaYear>,
        media_type: MediaType,
        seasons: Option<Vec<String>>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            year,
            media_type,
            seasons: seasons.filter(|s| !s.is_empty()),
        }
    }
}

/// Reply to a `/request` call
///
/// `error` is kept as raw JSON: the backend forwards Sonarr/Radarr error
/// bodies, which are usually objects or arrays rather than strings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RequestReply {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<Value>,
}

impl RequestReply {
    /// True when the backend sent no message, i.e. the alert is an error
    pub fn is_error(&self) -> bool {
        !self.message.as_deref().is_some_and(|m| !m.is_empty())
    }

    /// Text shown to the user for this reply
    pub fn alert_text(&self) -> String {
        match self.message.as_deref().filter(|m| !m.is_empty()) {
            Some(message) => message.to_string(),
            None => {
                let error = self
                    .error
                    .as_ref()
                    .map(|e| e.to_string())
                    .unwrap_or_else(|| "undefined".to_string());
                format!("Error: {}", error)
            }
        }
    }
}

// =============================================================================
// Lenient Deserializers
// =============================================================================

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Text that may come back as `null`; anything but a string becomes empty
fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => s,
        _ => String::new(),
    })
}

/// Accept a count given as a number; `"N/A"` and friends become `None`
fn lenient_count<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}

/// Ratings come back as an object; anything else is treated as absent
fn lenient_ratings<'de, D>(deserializer: D) -> Result<Option<Ratings>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Object(map)) => Some(Ratings {
            value: map.get("value").and_then(Value::as_f64),
        }),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_media_item_accepts_backend_shapes() {
        let item: MediaItem = serde_json::from_value(json!({
            "id": 81189,
            "title": "Breaking Bad",
            "year": "N/A",
            "overview": "A chemistry instructor",
            "poster": null,
            "genres": ["Drama", "Crime"],
            "ratings": {"votes": 100, "value": 9.4},
            "seasonCount": 5
        }))
        .unwrap();

        assert_eq!(item.id, Some(MediaId::Number(81189)));
        assert_eq!(item.year, Some(MediaYear::Text("N/A".into())));
        assert_eq!(item.seasons(), Some(5));
        assert_eq!(item.ratings.unwrap().value, Some(9.4));
    }

    #[test]
    fn test_season_count_not_available() {
        let item: MediaItem =
            serde_json::from_value(json!({"id": "1", "title": "X", "seasonCount": "N/A"})).unwrap();
        assert_eq!(item.seasons(), None);

        let item: MediaItem =
            serde_json::from_value(json!({"id": "1", "title": "X", "seasonCount": 0})).unwrap();
        assert_eq!(item.seasons(), None);
    }

    #[test]
    fn test_row_label() {
        let mut item = MediaItem {
            id: Some("1".into()),
            title: "Dune".into(),
            year: Some(2021.into()),
            ..Default::default()
        };
        assert_eq!(item.row_label(), "Dune (2021)");

        item.year = Some(MediaYear::Number(0));
        assert_eq!(item.row_label(), "Dune (Unknown Year)");

        item.year = None;
        assert_eq!(item.row_label(), "Dune (Unknown Year)");
    }

    #[test]
    fn test_media_id_validity() {
        assert!(MediaId::from(12).is_valid());
        assert!(MediaId::from("tt1").is_valid());
        assert!(!MediaId::from(0).is_valid());
        assert!(!MediaId::from("").is_valid());
        assert!(MediaId::from(12).same_as(&MediaId::from("12")));
    }

    #[test]
    fn test_payload_omits_empty_seasons() {
        let payload = RequestPayload::new("7".into(), "Dune", None, MediaType::Movie, Some(vec![]));
        let body = serde_json::to_value(&payload).unwrap();
        assert_eq!(body, json!({"id": "7", "title": "Dune", "type": "movie"}));

        let payload = RequestPayload::new(
            7.into(),
            "Lost",
            Some(2004.into()),
            MediaType::Tv,
            Some(vec!["1".into(), "3".into()]),
        );
        let body = serde_json::to_value(&payload).unwrap();
        assert_eq!(
            body,
            json!({"id": 7, "title": "Lost", "year": 2004, "type": "tv", "seasons": ["1", "3"]})
        );
    }

    #[test]
    fn test_search_response_error_counts_as_empty() {
        let resp: SearchResponse =
            serde_json::from_value(json!({"error": "Missing query or type"})).unwrap();
        assert!(resp.is_empty());
        assert!(!resp.has_next_page);

        let resp: SearchResponse = serde_json::from_value(json!({
            "items": [{"id": 1, "title": "A"}],
            "hasNextPage": true
        }))
        .unwrap();
        assert!(!resp.is_empty());
        assert!(resp.has_next_page);
    }

    #[test]
    fn test_reply_alert_text() {
        let reply = RequestReply {
            message: Some("Movie 'Dune' added to Radarr!".into()),
            error: None,
        };
        assert_eq!(reply.alert_text(), "Movie 'Dune' added to Radarr!");

        let reply = RequestReply {
            message: None,
            error: Some(json!("Missing ID, title, or type")),
        };
        assert_eq!(reply.alert_text(), "Error: \"Missing ID, title, or type\"");

        let reply = RequestReply::default();
        assert_eq!(reply.alert_text(), "Error: undefined");
    }
}
