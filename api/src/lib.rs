pub mod client;
pub mod cricapi;
pub mod cricbuzz;
mod lenient;

use chrono::{DateTime, Utc};
use std::fmt;

/// Sentinel rendered wherever score data is missing.
pub const NOT_AVAILABLE: &str = "N/A";

/// Tab selected before the user picks one.
pub const DEFAULT_MATCH_TYPE: &str = "International";

// ---------------------------------------------------------------------------
// Live listing: flat match records
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Match {
    pub id: String,
    pub name: String,
    pub status: String,
    pub venue: String,
    pub date: String, // ISO date, e.g. "2024-01-01"
    pub score: Vec<Innings>,
}

impl Match {
    pub fn phase(&self) -> MatchPhase {
        StatusBuckets::classify(&self.status).phase()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Innings {
    pub inning: String, // "India Inning 1"
    pub runs: u32,
    pub wickets: u8,
    pub overs: f64,
}

impl fmt::Display for Innings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {}/{} ({} overs)",
            self.inning, self.runs, self.wickets, self.overs
        )
    }
}

// ---------------------------------------------------------------------------
// Status classification
// ---------------------------------------------------------------------------

/// Status buckets a free-text status falls into. Derived once when a record
/// is ingested; a status may land in several buckets or none.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusBuckets {
    pub upcoming: bool,
    pub live: bool,
    pub completed: bool,
}

impl StatusBuckets {
    /// The only place status text is inspected.
    pub fn classify(status: &str) -> Self {
        let status = status.to_lowercase();
        Self {
            upcoming: status.contains("upcoming"),
            live: status.contains("live"),
            completed: status.contains("won") || status.contains("complete"),
        }
    }

    pub fn phase(&self) -> MatchPhase {
        if self.live {
            MatchPhase::Live
        } else if self.completed {
            MatchPhase::Completed
        } else if self.upcoming {
            MatchPhase::Upcoming
        } else {
            MatchPhase::Other
        }
    }
}

/// Single display phase, used for colouring only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MatchPhase {
    Upcoming,
    Live,
    Completed,
    #[default]
    Other,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    Upcoming,
    Live,
    Completed,
}

impl StatusFilter {
    pub const ALL: [StatusFilter; 4] = [
        StatusFilter::All,
        StatusFilter::Upcoming,
        StatusFilter::Live,
        StatusFilter::Completed,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            StatusFilter::All => "All",
            StatusFilter::Upcoming => "Upcoming",
            StatusFilter::Live => "Live",
            StatusFilter::Completed => "Completed",
        }
    }

    pub fn admits(&self, buckets: StatusBuckets) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Upcoming => buckets.upcoming,
            StatusFilter::Live => buckets.live,
            StatusFilter::Completed => buckets.completed,
        }
    }

    pub fn next(self) -> Self {
        match self {
            StatusFilter::All => StatusFilter::Upcoming,
            StatusFilter::Upcoming => StatusFilter::Live,
            StatusFilter::Live => StatusFilter::Completed,
            StatusFilter::Completed => StatusFilter::All,
        }
    }
}

// ---------------------------------------------------------------------------
// Recent matches: nested document grouped by match type
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct MatchDocument {
    /// Declared tabs, in the order the upstream lists them.
    pub match_types: Vec<String>,
    pub groups: Vec<TypeGroup>,
}

impl MatchDocument {
    pub fn group(&self, match_type: &str) -> Option<&TypeGroup> {
        self.groups.iter().find(|g| g.match_type == match_type)
    }

    /// Records of one tab filtered by status, in group → series → record order.
    /// Cheap to call on every render; nothing is cached.
    pub fn matches_for<'a>(
        &'a self,
        match_type: &str,
        filter: StatusFilter,
    ) -> impl Iterator<Item = &'a MatchRecord> + 'a {
        self.group(match_type)
            .into_iter()
            .flat_map(|g| g.series.iter())
            .flat_map(|s| s.matches.iter())
            .filter(move |m| filter.admits(m.buckets))
    }

    /// Tab following `current` in declaration order, wrapping around.
    /// An unknown `current` moves to the first tab.
    pub fn next_match_type(&self, current: &str) -> Option<&str> {
        let types = &self.match_types;
        match types.iter().position(|t| t == current) {
            Some(i) => types.get((i + 1) % types.len()),
            None => types.first(),
        }
        .map(String::as_str)
    }

    pub fn prev_match_type(&self, current: &str) -> Option<&str> {
        let types = &self.match_types;
        match types.iter().position(|t| t == current) {
            Some(i) => types.get((i + types.len() - 1) % types.len()),
            None => types.last(),
        }
        .map(String::as_str)
    }
}

#[derive(Debug, Clone, Default)]
pub struct TypeGroup {
    pub match_type: String, // "International", "League", "Domestic", "Women"
    pub series: Vec<Series>,
}

#[derive(Debug, Clone, Default)]
pub struct Series {
    pub name: Option<String>,
    pub matches: Vec<MatchRecord>,
}

#[derive(Debug, Clone, Default)]
pub struct MatchRecord {
    pub match_id: String,
    pub series_name: Option<String>,
    pub description: Option<String>, // "3rd ODI"
    pub format: Option<String>,      // "ODI", "T20", "TEST"
    pub team1: String,
    pub team2: String,
    pub venue: Venue,
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
    pub status: String,
    pub buckets: StatusBuckets,
    pub score1: InningsScore,
    pub score2: InningsScore,
}

impl MatchRecord {
    pub fn phase(&self) -> MatchPhase {
        self.buckets.phase()
    }

    pub fn title(&self) -> String {
        format!("{} vs {}", self.team1, self.team2)
    }

    /// "India: 250/8 vs Australia: N/A/N/A"
    pub fn score_line(&self) -> String {
        format!(
            "{}: {} vs {}: {}",
            self.team1, self.score1, self.team2, self.score2
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Venue {
    pub ground: String,
    pub city: String,
}

impl fmt::Display for Venue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.ground.is_empty(), self.city.is_empty()) {
            (false, false) => write!(f, "{}, {}", self.ground, self.city),
            (false, true) => f.write_str(&self.ground),
            (true, false) => f.write_str(&self.city),
            (true, true) => f.write_str(NOT_AVAILABLE),
        }
    }
}

/// First-innings score for one team. Runs and wickets go missing independently.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InningsScore {
    pub runs: Option<u32>,
    pub wickets: Option<u8>,
}

impl fmt::Display for InningsScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.runs {
            Some(r) => write!(f, "{r}")?,
            None => f.write_str(NOT_AVAILABLE)?,
        }
        f.write_str("/")?;
        match self.wickets {
            Some(w) => write!(f, "{w}"),
            None => f.write_str(NOT_AVAILABLE),
        }
    }
}
