/// Wire types for the CricAPI match listing.
/// Endpoint: https://api.cricapi.com/v1/matches?apikey={key}&offset=0
use crate::lenient;
use serde::Deserialize;
use serde_json::Value;

/// Response envelope. `data` stays untyped so a non-list payload can be told
/// apart from a transport or parse failure.
#[derive(Deserialize, Default, Debug, Clone, PartialEq)]
pub struct MatchesEnvelope {
    #[serde(default, deserialize_with = "lenient::option")]
    pub status: Option<String>, // "success" | "failure"
    #[serde(default)]
    pub data: Value,
    #[serde(default, deserialize_with = "lenient::option")]
    pub message: Option<String>,
    #[serde(default, deserialize_with = "lenient::option")]
    pub reason: Option<String>, // "hits today exceeded hits limit"
    /// Usually a usage object; some failures send the bare string "failure".
    #[serde(default)]
    pub info: Value,
}

impl MatchesEnvelope {
    pub fn is_success(&self) -> bool {
        self.status.as_deref() == Some("success")
    }

    pub fn info_failed(&self) -> bool {
        self.info.as_str() == Some("failure")
    }
}

/// One listing element. Each field falls back on its own, so a bad `id`
/// does not cost the match its name or score.
#[derive(Deserialize, Default, Debug, Clone)]
pub struct RawMatch {
    #[serde(default, deserialize_with = "lenient::id")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient::option")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient::option")]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "lenient::option")]
    pub venue: Option<String>,
    #[serde(default, deserialize_with = "lenient::option")]
    pub date: Option<String>,
    /// Absent before the first ball; occasionally an object instead of a list.
    #[serde(default, deserialize_with = "lenient::list")]
    pub score: Option<Vec<RawInnings>>,
}

#[derive(Deserialize, Default, Debug, Clone)]
pub struct RawInnings {
    #[serde(default, deserialize_with = "lenient::option")]
    pub inning: Option<String>,
    #[serde(default, deserialize_with = "lenient::option")]
    pub r: Option<u32>,
    #[serde(default, deserialize_with = "lenient::option")]
    pub w: Option<u8>,
    #[serde(default, deserialize_with = "lenient::option")]
    pub o: Option<f64>,
}
