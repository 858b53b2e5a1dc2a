/// Cricbuzz (RapidAPI) wire types for the recent-matches document.
/// These map to the domain types via the mapping functions in client.rs.
/// Every field is read leniently: a bad leaf falls back to its default and
/// never rejects the rest of the document.
use crate::lenient;
use serde::Deserialize;

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct RecentResponse {
    #[serde(default, deserialize_with = "lenient::option")]
    pub filters: Option<Filters>,
    #[serde(default, deserialize_with = "lenient::list")]
    pub type_matches: Option<Vec<TypeMatches>>,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Filters {
    #[serde(default, deserialize_with = "lenient::option")]
    pub match_type: Option<Vec<String>>,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct TypeMatches {
    #[serde(default, deserialize_with = "lenient::option")]
    pub match_type: Option<String>,
    #[serde(default, deserialize_with = "lenient::list")]
    pub series_matches: Option<Vec<SeriesMatches>>,
}

/// Either a real series wrapper or an advert slot (`adDetail`), which we skip.
#[derive(Debug, Deserialize, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct SeriesMatches {
    #[serde(default, deserialize_with = "lenient::option")]
    pub series_ad_wrapper: Option<SeriesAdWrapper>,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct SeriesAdWrapper {
    #[serde(default, deserialize_with = "lenient::option")]
    pub series_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::list")]
    pub matches: Option<Vec<RawRecord>>,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct RawRecord {
    #[serde(default, deserialize_with = "lenient::option")]
    pub match_info: Option<MatchInfo>,
    #[serde(default, deserialize_with = "lenient::option")]
    pub match_score: Option<MatchScore>,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct MatchInfo {
    /// Numeric upstream, but tolerated as a string too.
    #[serde(default, deserialize_with = "lenient::id")]
    pub match_id: Option<String>,
    #[serde(default, deserialize_with = "lenient::option")]
    pub series_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::option")]
    pub match_desc: Option<String>,
    #[serde(default, deserialize_with = "lenient::option")]
    pub match_format: Option<String>,
    #[serde(default, deserialize_with = "lenient::epoch_millis")]
    pub start_date: Option<i64>,
    #[serde(default, deserialize_with = "lenient::epoch_millis")]
    pub end_date: Option<i64>,
    #[serde(default, deserialize_with = "lenient::option")]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "lenient::option")]
    pub team1: Option<TeamInfo>,
    #[serde(default, deserialize_with = "lenient::option")]
    pub team2: Option<TeamInfo>,
    #[serde(default, deserialize_with = "lenient::option")]
    pub venue_info: Option<VenueInfo>,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct TeamInfo {
    #[serde(default, deserialize_with = "lenient::option")]
    pub team_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::option")]
    pub team_s_name: Option<String>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct VenueInfo {
    #[serde(default, deserialize_with = "lenient::option")]
    pub ground: Option<String>,
    #[serde(default, deserialize_with = "lenient::option")]
    pub city: Option<String>,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct MatchScore {
    #[serde(default, deserialize_with = "lenient::option")]
    pub team1_score: Option<TeamScore>,
    #[serde(default, deserialize_with = "lenient::option")]
    pub team2_score: Option<TeamScore>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct TeamScore {
    #[serde(default, deserialize_with = "lenient::option")]
    pub inngs1: Option<InningsTotals>,
}

/// Runs and wickets only; overs are not shown for recent matches.
#[derive(Debug, Deserialize, Default, Clone)]
pub struct InningsTotals {
    #[serde(default, deserialize_with = "lenient::option")]
    pub runs: Option<u32>,
    #[serde(default, deserialize_with = "lenient::option")]
    pub wickets: Option<u8>,
}
