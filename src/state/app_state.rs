use crate::app::MenuItem;
use crate::state::messages::{RefreshTrigger, RequestTicket};
use chrono::{DateTime, Local};
use cricket_api::client::ApiError;
use cricket_api::{DEFAULT_MATCH_TYPE, Match, MatchDocument, MatchRecord, StatusFilter};
use log::debug;

/// Shown to the user for any fetch failure; the cause only goes to the log.
pub const FETCH_ERROR_MESSAGE: &str = "Failed to fetch cricket matches. Please try again later.";

// ---------------------------------------------------------------------------
// Request sequencing
// ---------------------------------------------------------------------------

/// Hands out increasing tickets and remembers the newest one applied.
#[derive(Debug, Default)]
pub struct RequestSequencer {
    issued: u64,
    applied: u64,
}

impl RequestSequencer {
    pub fn issue(&mut self) -> RequestTicket {
        self.issued += 1;
        RequestTicket(self.issued)
    }

    /// True if `ticket` is newer than anything applied so far; records it.
    pub fn accept(&mut self, ticket: RequestTicket) -> bool {
        if ticket.0 <= self.applied {
            return false;
        }
        self.applied = ticket.0;
        true
    }
}

// ---------------------------------------------------------------------------
// Live listing (flat match cards)
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct LiveState {
    pub matches: Vec<Match>,
    pub error: Option<String>,
    /// Extra banner for envelope-level failures, e.g. an exhausted API quota.
    pub notice: Option<String>,
    /// Outstanding user-visible request; blocks further manual refreshes.
    pub pending: Option<RequestTicket>,
    pub last_updated: Option<DateTime<Local>>,
    pub scroll_offset: u16,
    sequencer: RequestSequencer,
}

impl LiveState {
    /// Issue a ticket for a new request, or `None` while a manual one is in flight.
    pub fn begin_refresh(&mut self, trigger: RefreshTrigger) -> Option<RequestTicket> {
        if trigger.shows_loading() && self.pending.is_some() {
            return None;
        }
        let ticket = self.sequencer.issue();
        if trigger.shows_loading() {
            self.pending = Some(ticket);
        }
        Some(ticket)
    }

    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    /// Replace the whole list. Returns false if the response was stale.
    pub fn apply_matches(&mut self, ticket: RequestTicket, matches: Vec<Match>) -> bool {
        self.settle(ticket);
        if !self.sequencer.accept(ticket) {
            debug!("discarding stale match list (ticket {})", ticket.0);
            return false;
        }
        self.matches = matches;
        self.error = None;
        self.notice = None;
        self.last_updated = Some(Local::now());
        true
    }

    /// Clear the list and show the generic error. Returns false if stale.
    pub fn apply_failure(&mut self, ticket: RequestTicket, error: &ApiError) -> bool {
        self.settle(ticket);
        if !self.sequencer.accept(ticket) {
            debug!("discarding stale failure (ticket {})", ticket.0);
            return false;
        }
        self.matches.clear();
        self.error = Some(FETCH_ERROR_MESSAGE.to_string());
        self.notice = failure_notice(error);
        self.scroll_offset = 0;
        true
    }

    fn settle(&mut self, ticket: RequestTicket) {
        if self.pending.is_some_and(|pending| ticket >= pending) {
            self.pending = None;
        }
    }

    /// Scroll one row, never past `max`.
    pub fn scroll_down(&mut self, max: u16) {
        self.scroll_offset = scroll_down(self.scroll_offset, max);
    }

    pub fn scroll_up(&mut self, max: u16) {
        self.scroll_offset = scroll_up(self.scroll_offset, max);
    }
}

fn scroll_down(offset: u16, max: u16) -> u16 {
    offset.saturating_add(1).min(max)
}

// An offset left past `max` by a shrinking list snaps back first.
fn scroll_up(offset: u16, max: u16) -> u16 {
    offset.min(max).saturating_sub(1)
}

pub fn failure_notice(error: &ApiError) -> Option<String> {
    match error {
        ApiError::Failure { reason: Some(reason), .. } => {
            Some(format!("{reason} (You might have exceeded the API limit)"))
        }
        ApiError::InfoFailure => Some("API info: failure".to_string()),
        ApiError::MissingCredentials(var) => Some(format!("No API key configured. Set {var}.")),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Recent matches (tabbed, filterable)
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub struct RecentState {
    pub document: Option<MatchDocument>,
    pub error: Option<String>,
    pub loading: bool,
    pub active_type: String,
    pub filter: StatusFilter,
    pub scroll_offset: u16,
}

impl Default for RecentState {
    fn default() -> Self {
        Self {
            document: None,
            error: None,
            loading: false,
            active_type: DEFAULT_MATCH_TYPE.to_string(),
            filter: StatusFilter::All,
            scroll_offset: 0,
        }
    }
}

impl RecentState {
    /// Records for the active tab and filter, recomputed on every call.
    pub fn visible(&self) -> impl Iterator<Item = &MatchRecord> {
        self.document
            .iter()
            .flat_map(move |doc| doc.matches_for(&self.active_type, self.filter))
    }

    pub fn load(&mut self, document: MatchDocument) {
        self.loading = false;
        self.error = None;
        self.document = Some(document);
        self.scroll_offset = 0;
    }

    pub fn fail(&mut self) {
        self.loading = false;
        self.document = None;
        self.error = Some(FETCH_ERROR_MESSAGE.to_string());
        self.scroll_offset = 0;
    }

    pub fn select_match_type(&mut self, match_type: &str) {
        if self.active_type != match_type {
            self.active_type = match_type.to_string();
            self.scroll_offset = 0;
        }
    }

    pub fn next_match_type(&mut self) {
        let next = self
            .document
            .as_ref()
            .and_then(|d| d.next_match_type(&self.active_type))
            .map(str::to_owned);
        if let Some(next) = next {
            self.select_match_type(&next);
        }
    }

    pub fn prev_match_type(&mut self) {
        let prev = self
            .document
            .as_ref()
            .and_then(|d| d.prev_match_type(&self.active_type))
            .map(str::to_owned);
        if let Some(prev) = prev {
            self.select_match_type(&prev);
        }
    }

    pub fn set_filter(&mut self, filter: StatusFilter) {
        if self.filter != filter {
            self.filter = filter;
            self.scroll_offset = 0;
        }
    }

    pub fn cycle_filter(&mut self) {
        self.set_filter(self.filter.next());
    }

    pub fn scroll_down(&mut self, max: u16) {
        self.scroll_offset = scroll_down(self.scroll_offset, max);
    }

    pub fn scroll_up(&mut self, max: u16) {
        self.scroll_offset = scroll_up(self.scroll_offset, max);
    }
}

// ---------------------------------------------------------------------------
// Root app state
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct AppState {
    pub active_tab: MenuItem,
    pub previous_tab: MenuItem,
    pub show_logs: bool,
    pub should_quit: bool,
    pub live: LiveState,
    pub recent: RecentState,
    /// Card columns at the last draw; bounds scrolling.
    pub grid_columns: usize,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cricket_api::{Series, StatusBuckets, TypeGroup};

    fn a_match(id: &str) -> Match {
        Match {
            id: id.into(),
            name: format!("Match {id}"),
            ..Default::default()
        }
    }

    fn record(id: &str, status: &str) -> MatchRecord {
        MatchRecord {
            match_id: id.into(),
            status: status.into(),
            buckets: StatusBuckets::classify(status),
            ..Default::default()
        }
    }

    fn document() -> MatchDocument {
        MatchDocument {
            match_types: vec!["International".into(), "League".into()],
            groups: vec![
                TypeGroup {
                    match_type: "International".into(),
                    series: vec![Series {
                        name: None,
                        matches: vec![record("1", "Live"), record("2", "England won")],
                    }],
                },
                TypeGroup {
                    match_type: "League".into(),
                    series: vec![Series {
                        name: None,
                        matches: vec![record("3", "Upcoming")],
                    }],
                },
            ],
        }
    }

    fn visible_ids(state: &RecentState) -> Vec<String> {
        state.visible().map(|m| m.match_id.clone()).collect()
    }

    #[test]
    fn sequencer_rejects_old_and_repeated_tickets() {
        let mut seq = RequestSequencer::default();
        let first = seq.issue();
        let second = seq.issue();
        assert!(second > first);
        assert!(seq.accept(second));
        assert!(!seq.accept(first));
        assert!(!seq.accept(second));
    }

    #[test]
    fn manual_refresh_blocks_until_settled() {
        let mut live = LiveState::default();
        let ticket = live.begin_refresh(RefreshTrigger::Manual).unwrap();
        assert!(live.is_loading());
        assert!(live.begin_refresh(RefreshTrigger::Manual).is_none());
        assert!(live.begin_refresh(RefreshTrigger::Initial).is_none());

        let auto = live.begin_refresh(RefreshTrigger::Auto);
        assert!(auto.is_some(), "background polls are never blocked");

        live.apply_matches(ticket, vec![a_match("1")]);
        assert!(!live.is_loading());
        assert!(live.begin_refresh(RefreshTrigger::Manual).is_some());
    }

    #[test]
    fn auto_refresh_does_not_enter_loading() {
        let mut live = LiveState::default();
        live.begin_refresh(RefreshTrigger::Auto).unwrap();
        assert!(!live.is_loading());
    }

    #[test]
    fn stale_response_cannot_overwrite_newer() {
        let mut live = LiveState::default();
        let auto = live.begin_refresh(RefreshTrigger::Auto).unwrap();
        let manual = live.begin_refresh(RefreshTrigger::Manual).unwrap();

        assert!(live.apply_matches(manual, vec![a_match("new")]));
        assert!(!live.apply_matches(auto, vec![a_match("old")]));
        assert_eq!(live.matches[0].id, "new");

        assert!(!live.apply_failure(auto, &ApiError::InfoFailure));
        assert!(live.error.is_none());
    }

    #[test]
    fn stale_response_keeps_manual_pending() {
        let mut live = LiveState::default();
        let auto = live.begin_refresh(RefreshTrigger::Auto).unwrap();
        let manual = live.begin_refresh(RefreshTrigger::Manual).unwrap();

        assert!(live.apply_matches(auto, vec![a_match("auto")]));
        assert!(live.is_loading(), "manual request still in flight");
        assert!(live.apply_matches(manual, vec![a_match("manual")]));
        assert!(!live.is_loading());
    }

    #[test]
    fn failure_clears_list_and_sets_banner() {
        let mut live = LiveState::default();
        let t1 = live.begin_refresh(RefreshTrigger::Initial).unwrap();
        live.apply_matches(t1, vec![a_match("1"), a_match("2")]);

        let t2 = live.begin_refresh(RefreshTrigger::Auto).unwrap();
        let error = ApiError::Failure {
            message: None,
            reason: Some("limit exceeded".into()),
        };
        assert!(live.apply_failure(t2, &error));
        assert!(live.matches.is_empty());
        assert_eq!(live.error.as_deref(), Some(FETCH_ERROR_MESSAGE));
        assert_eq!(
            live.notice.as_deref(),
            Some("limit exceeded (You might have exceeded the API limit)")
        );

        let t3 = live.begin_refresh(RefreshTrigger::Auto).unwrap();
        live.apply_matches(t3, vec![a_match("3")]);
        assert!(live.error.is_none());
        assert!(live.notice.is_none());
    }

    #[test]
    fn shape_failure_has_no_banner() {
        assert!(failure_notice(&ApiError::Shape("x".into())).is_none());
        let message_only = ApiError::Failure {
            message: Some("m".into()),
            reason: None,
        };
        assert!(failure_notice(&message_only).is_none());
        assert!(failure_notice(&ApiError::InfoFailure).is_some());
    }

    #[test]
    fn recent_defaults_to_international_all() {
        let mut recent = RecentState::default();
        assert!(visible_ids(&recent).is_empty());
        recent.load(document());
        assert_eq!(recent.active_type, "International");
        assert_eq!(visible_ids(&recent), ["1", "2"]);
    }

    #[test]
    fn selection_changes_only_one_value() {
        let mut recent = RecentState::default();
        recent.load(document());

        recent.set_filter(StatusFilter::Live);
        assert_eq!(recent.active_type, "International");
        assert_eq!(visible_ids(&recent), ["1"]);

        recent.next_match_type();
        assert_eq!(recent.active_type, "League");
        assert_eq!(recent.filter, StatusFilter::Live);
        assert!(visible_ids(&recent).is_empty());

        recent.set_filter(StatusFilter::Upcoming);
        assert_eq!(visible_ids(&recent), ["3"]);

        recent.prev_match_type();
        assert_eq!(recent.active_type, "International");
    }

    #[test]
    fn selection_resets_scroll() {
        let mut recent = RecentState::default();
        recent.load(document());
        recent.scroll_down(5);
        recent.scroll_down(5);
        assert_eq!(recent.scroll_offset, 2);
        recent.cycle_filter();
        assert_eq!(recent.filter, StatusFilter::Upcoming);
        assert_eq!(recent.scroll_offset, 0);
    }

    #[test]
    fn scrolling_stops_at_the_last_row() {
        let mut live = LiveState::default();
        for _ in 0..10 {
            live.scroll_down(2);
        }
        assert_eq!(live.scroll_offset, 2);
        live.scroll_up(2);
        assert_eq!(live.scroll_offset, 1);

        // The list shrank under the offset.
        live.scroll_offset = 40;
        live.scroll_up(3);
        assert_eq!(live.scroll_offset, 2);
        live.scroll_up(0);
        assert_eq!(live.scroll_offset, 0);
    }

    #[test]
    fn recent_failure_resets_scroll() {
        let mut recent = RecentState::default();
        recent.load(document());
        recent.scroll_down(3);
        recent.fail();
        assert_eq!(recent.scroll_offset, 0);
        assert!(recent.document.is_none());
    }

    #[test]
    fn recent_failure_shows_fixed_message() {
        let mut recent = RecentState::default();
        recent.loading = true;
        recent.load(document());
        recent.fail();
        assert!(!recent.loading);
        assert!(recent.document.is_none());
        assert_eq!(recent.error.as_deref(), Some(FETCH_ERROR_MESSAGE));
    }
}
