use crate::cricapi::{MatchesEnvelope, RawInnings, RawMatch};
use crate::cricbuzz::{InningsTotals, RawRecord, RecentResponse, TeamInfo};
use crate::{
    Innings, InningsScore, Match, MatchDocument, MatchRecord, Series, StatusBuckets, TypeGroup,
    Venue,
};
use chrono::DateTime;
use reqwest::{Client, RequestBuilder, Url};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fmt;
use std::time::Duration;

pub type ApiResult<T> = Result<T, ApiError>;

pub const CRICAPI_URL: &str = "https://api.cricapi.com";
pub const RAPIDAPI_URL: &str = "https://cricbuzz-cricket.p.rapidapi.com";
pub const RAPIDAPI_HOST: &str = "cricbuzz-cricket.p.rapidapi.com";

/// Endpoints and credentials for both upstream APIs. Keys are injected at
/// start-up and never compiled in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub cricapi_url: String,
    pub cricapi_key: Option<String>,
    pub rapidapi_url: String,
    pub rapidapi_key: Option<String>,
    pub rapidapi_host: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            cricapi_url: CRICAPI_URL.to_string(),
            cricapi_key: None,
            rapidapi_url: RAPIDAPI_URL.to_string(),
            rapidapi_key: None,
            rapidapi_host: RAPIDAPI_HOST.to_string(),
        }
    }
}

/// Cricket scores client backed by CricAPI (flat listing) and Cricbuzz via
/// RapidAPI (recent matches by type).
#[derive(Debug, Clone)]
pub struct CricketApi {
    client: Client,
    timeout: Duration,
    config: ApiConfig,
}

impl Default for CricketApi {
    fn default() -> Self {
        Self::new(ApiConfig::default())
    }
}

#[derive(Debug)]
pub enum ApiError {
    Network(reqwest::Error, String),
    Api(reqwest::Error, String),
    Parsing(reqwest::Error, String),
    /// Envelope came back with a non-success status.
    Failure {
        message: Option<String>,
        reason: Option<String>,
    },
    /// Envelope flagged failure in its `info` field.
    InfoFailure,
    /// Payload parsed but does not have the expected shape.
    Shape(String),
    InvalidUrl(String),
    MissingCredentials(&'static str),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Network(e, url) => write!(f, "Network error for {url}: {e}"),
            ApiError::Api(e, url) => write!(f, "API error for {url}: {e}"),
            ApiError::Parsing(e, url) => write!(f, "Parse error for {url}: {e}"),
            ApiError::Failure { message, reason } => {
                let detail = message
                    .as_deref()
                    .or(reason.as_deref())
                    .unwrap_or("no reason given");
                write!(f, "API reported failure: {detail}")
            }
            ApiError::InfoFailure => write!(f, "API info flagged failure"),
            ApiError::Shape(msg) => write!(f, "Unexpected response shape: {msg}"),
            ApiError::InvalidUrl(msg) => write!(f, "Invalid URL: {msg}"),
            ApiError::MissingCredentials(var) => write!(f, "Missing API key, set {var}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl CricketApi {
    pub fn new(config: ApiConfig) -> Self {
        Self {
            client: Client::builder()
                .user_agent("crictui/0.1 (terminal cricket scores)")
                .build()
                .unwrap_or_default(),
            timeout: Duration::from_secs(10),
            config,
        }
    }

    /// Fetch the flat match listing and normalize it.
    pub async fn fetch_matches(&self) -> ApiResult<Vec<Match>> {
        let key = self
            .config
            .cricapi_key
            .as_deref()
            .ok_or(ApiError::MissingCredentials("CRICTUI_CRICAPI_KEY"))?;
        let endpoint = format!("{}/v1/matches", self.config.cricapi_url.trim_end_matches('/'));
        let url = Url::parse_with_params(&endpoint, &[("apikey", key), ("offset", "0")])
            .map_err(|e| ApiError::InvalidUrl(format!("{endpoint}: {e}")))?;

        // The endpoint (not the full URL) goes into errors so the key stays out of logs.
        let envelope: MatchesEnvelope = self.send(self.client.get(url), &endpoint).await?;
        normalize_matches(&envelope)
    }

    /// Fetch the recent-matches document grouped by match type.
    pub async fn fetch_recent(&self) -> ApiResult<MatchDocument> {
        let key = self
            .config
            .rapidapi_key
            .as_deref()
            .ok_or(ApiError::MissingCredentials("CRICTUI_RAPIDAPI_KEY"))?;
        let url = format!(
            "{}/matches/v1/recent",
            self.config.rapidapi_url.trim_end_matches('/')
        );
        let request = self
            .client
            .get(&url)
            .header("X-RapidAPI-Key", key)
            .header("X-RapidAPI-Host", &self.config.rapidapi_host);
        let raw: RecentResponse = self.send(request, &url).await?;
        Ok(map_recent(raw))
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder, url: &str) -> ApiResult<T> {
        let response = request
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.without_url(), url.to_owned()))?;

        response
            .error_for_status()
            .map_err(|e| ApiError::Api(e.without_url(), url.to_owned()))?
            .json::<T>()
            .await
            .map_err(|e| ApiError::Parsing(e.without_url(), url.to_owned()))
    }
}

// ---------------------------------------------------------------------------
// Mapping: CricAPI envelope → Match list
// ---------------------------------------------------------------------------

/// Turn a listing envelope into matches. Pure: the same envelope always
/// yields the same list.
pub fn normalize_matches(envelope: &MatchesEnvelope) -> ApiResult<Vec<Match>> {
    if !envelope.is_success() {
        return Err(ApiError::Failure {
            message: envelope.message.clone(),
            reason: envelope.reason.clone(),
        });
    }
    if envelope.info_failed() {
        return Err(ApiError::InfoFailure);
    }
    let Some(items) = envelope.data.as_array() else {
        return Err(ApiError::Shape("`data` is not a list".into()));
    };
    Ok(items.iter().map(map_match).collect())
}

fn map_match(value: &Value) -> Match {
    // A non-object element yields an empty match.
    let raw = RawMatch::deserialize(value).unwrap_or_default();

    Match {
        id: raw.id.unwrap_or_default(),
        name: raw.name.unwrap_or_default(),
        status: raw.status.unwrap_or_default(),
        venue: raw.venue.unwrap_or_default(),
        date: raw.date.unwrap_or_default(),
        score: raw
            .score
            .unwrap_or_default()
            .into_iter()
            .map(map_innings)
            .collect(),
    }
}

/// One innings per wire element, zeroed where the element is malformed.
fn map_innings(raw: RawInnings) -> Innings {
    Innings {
        inning: raw.inning.unwrap_or_default(),
        runs: raw.r.unwrap_or_default(),
        wickets: raw.w.unwrap_or_default(),
        overs: raw.o.unwrap_or_default(),
    }
}

// ---------------------------------------------------------------------------
// Mapping: Cricbuzz recent document → MatchDocument
// ---------------------------------------------------------------------------

pub fn map_recent(raw: RecentResponse) -> MatchDocument {
    let groups: Vec<TypeGroup> = raw
        .type_matches
        .unwrap_or_default()
        .into_iter()
        .map(|tm| TypeGroup {
            match_type: tm.match_type.unwrap_or_default(),
            series: tm
                .series_matches
                .unwrap_or_default()
                .into_iter()
                .map(|sm| {
                    let wrapper = sm.series_ad_wrapper.unwrap_or_default();
                    let series_name = wrapper.series_name;
                    Series {
                        matches: wrapper
                            .matches
                            .unwrap_or_default()
                            .into_iter()
                            .map(|r| map_record(r, series_name.as_deref()))
                            .collect(),
                        name: series_name,
                    }
                })
                .collect(),
        })
        .collect();

    let declared = raw
        .filters
        .and_then(|f| f.match_type)
        .unwrap_or_default();
    let match_types = if declared.is_empty() {
        groups.iter().map(|g| g.match_type.clone()).collect()
    } else {
        declared
    };

    MatchDocument { match_types, groups }
}

fn map_record(raw: RawRecord, series_name: Option<&str>) -> MatchRecord {
    let info = raw.match_info.unwrap_or_default();
    let score = raw.match_score.unwrap_or_default();
    let status = info.status.unwrap_or_default();
    let venue = info.venue_info.unwrap_or_default();

    MatchRecord {
        match_id: info.match_id.unwrap_or_default(),
        series_name: info.series_name.or_else(|| series_name.map(str::to_owned)),
        description: info.match_desc,
        format: info.match_format,
        team1: team_name(info.team1),
        team2: team_name(info.team2),
        venue: Venue {
            ground: venue.ground.unwrap_or_default(),
            city: venue.city.unwrap_or_default(),
        },
        start: info.start_date.and_then(DateTime::from_timestamp_millis),
        end: info.end_date.and_then(DateTime::from_timestamp_millis),
        buckets: StatusBuckets::classify(&status),
        status,
        score1: innings_score(score.team1_score.and_then(|s| s.inngs1)),
        score2: innings_score(score.team2_score.and_then(|s| s.inngs1)),
    }
}

fn team_name(team: Option<TeamInfo>) -> String {
    team.and_then(|t| t.team_name.or(t.team_s_name))
        .unwrap_or_else(|| "TBD".to_string())
}

fn innings_score(totals: Option<InningsTotals>) -> InningsScore {
    totals
        .map(|t| InningsScore {
            runs: t.runs,
            wickets: t.wickets,
        })
        .unwrap_or_default()
}
