use crate::components::card_grid::max_scroll;
use crate::state::app_settings::AppSettings;
use crate::state::app_state::AppState;
use crate::state::messages::{NetworkRequest, RefreshTrigger, RequestTicket};
use cricket_api::client::ApiError;
use cricket_api::{Match, MatchDocument};
use log::{error, info};

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub enum MenuItem {
    #[default]
    Live,
    Recent,
    Help,
}

pub struct App {
    pub settings: AppSettings,
    pub state: AppState,
}

impl App {
    pub fn new() -> Self {
        let app = Self::with_settings(AppSettings::load());

        if let Some(level) = app.settings.log_level {
            log::set_max_level(level);
            tui_logger::set_default_level(level);
        }

        app
    }

    pub fn with_settings(settings: AppSettings) -> Self {
        Self {
            state: AppState::new(),
            settings,
        }
    }

    // -----------------------------------------------------------------------
    // Outgoing requests
    // -----------------------------------------------------------------------

    /// `None` when a user-visible refresh is already running.
    pub fn request_matches(&mut self, trigger: RefreshTrigger) -> Option<NetworkRequest> {
        let ticket = self.state.live.begin_refresh(trigger)?;
        Some(NetworkRequest::RefreshMatches { ticket, trigger })
    }

    pub fn request_recent(&mut self) -> Option<NetworkRequest> {
        if self.state.recent.loading {
            return None;
        }
        self.state.recent.loading = true;
        Some(NetworkRequest::LoadRecent)
    }

    // -----------------------------------------------------------------------
    // Network response handlers, called from main_ui_loop
    // -----------------------------------------------------------------------

    pub fn on_matches_loaded(&mut self, ticket: RequestTicket, matches: Vec<Match>) {
        let count = matches.len();
        if self.state.live.apply_matches(ticket, matches) {
            info!("loaded {count} matches");
        }
    }

    pub fn on_matches_failed(&mut self, ticket: RequestTicket, err: &ApiError) {
        error!("match refresh failed: {err}");
        self.state.live.apply_failure(ticket, err);
    }

    pub fn on_recent_loaded(&mut self, document: MatchDocument) {
        info!(
            "loaded recent matches: {} groups, {} tabs",
            document.groups.len(),
            document.match_types.len()
        );
        self.state.recent.load(document);
    }

    pub fn on_recent_failed(&mut self, err: &ApiError) {
        error!("recent matches failed: {err}");
        self.state.recent.fail();
    }

    // -----------------------------------------------------------------------
    // Tab management
    // -----------------------------------------------------------------------

    pub fn update_tab(&mut self, next: MenuItem) {
        if self.state.active_tab == next {
            return;
        }
        self.state.previous_tab = self.state.active_tab;
        self.state.active_tab = next;
    }

    pub fn exit_help(&mut self) {
        if self.state.active_tab == MenuItem::Help {
            self.state.active_tab = self.state.previous_tab;
        }
    }

    pub fn toggle_show_logs(&mut self) {
        self.state.show_logs = !self.state.show_logs;
    }

    pub fn toggle_full_screen(&mut self) {
        self.settings.full_screen = !self.settings.full_screen;
    }

    pub fn quit(&mut self) {
        self.state.should_quit = true;
    }

    pub fn scroll_down(&mut self) {
        let max = self.max_scroll();
        match self.state.active_tab {
            MenuItem::Live => self.state.live.scroll_down(max),
            MenuItem::Recent => self.state.recent.scroll_down(max),
            MenuItem::Help => {}
        }
    }

    pub fn scroll_up(&mut self) {
        let max = self.max_scroll();
        match self.state.active_tab {
            MenuItem::Live => self.state.live.scroll_up(max),
            MenuItem::Recent => self.state.recent.scroll_up(max),
            MenuItem::Help => {}
        }
    }

    /// Last card row of the active view at the current column count.
    fn max_scroll(&self) -> u16 {
        let cards = match self.state.active_tab {
            MenuItem::Live => self.state.live.matches.len(),
            MenuItem::Recent => self.state.recent.visible().count(),
            MenuItem::Help => 0,
        };
        max_scroll(cards, self.state.grid_columns)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app() -> App {
        App::with_settings(AppSettings::default())
    }

    #[test]
    fn manual_request_is_not_duplicated_while_loading() {
        let mut app = app();
        let first = app.request_matches(RefreshTrigger::Manual);
        assert!(matches!(
            first,
            Some(NetworkRequest::RefreshMatches { trigger: RefreshTrigger::Manual, .. })
        ));
        assert!(app.request_matches(RefreshTrigger::Manual).is_none());
        assert!(app.request_matches(RefreshTrigger::Auto).is_some());
    }

    #[test]
    fn failed_refresh_empties_listing() {
        let mut app = app();
        let Some(NetworkRequest::RefreshMatches { ticket, .. }) =
            app.request_matches(RefreshTrigger::Initial)
        else {
            panic!("expected a listing request");
        };
        app.on_matches_failed(
            ticket,
            &ApiError::Failure { message: None, reason: Some("limit exceeded".into()) },
        );
        assert!(app.state.live.matches.is_empty());
        assert!(app.state.live.error.is_some());
        assert!(!app.state.live.is_loading());
    }

    #[test]
    fn recent_request_only_once_in_flight() {
        let mut app = app();
        assert!(app.request_recent().is_some());
        assert!(app.request_recent().is_none());
        app.on_recent_loaded(MatchDocument::default());
        assert!(app.request_recent().is_some());
    }

    #[test]
    fn help_returns_to_previous_tab() {
        let mut app = app();
        app.update_tab(MenuItem::Recent);
        app.update_tab(MenuItem::Help);
        app.exit_help();
        assert_eq!(app.state.active_tab, MenuItem::Recent);
    }

    #[test]
    fn scrolling_follows_active_tab() {
        let mut app = app();
        app.state.grid_columns = 1;
        app.state.live.matches = vec![Match::default(); 3];
        app.scroll_down();
        assert_eq!(app.state.live.scroll_offset, 1);
        app.update_tab(MenuItem::Recent);
        app.scroll_down();
        assert_eq!(app.state.recent.scroll_offset, 0, "nothing loaded to scroll");
        assert_eq!(app.state.live.scroll_offset, 1);
    }

    #[test]
    fn scrolling_is_bounded_by_card_rows() {
        let mut app = app();
        app.state.live.matches = vec![Match::default(); 7];

        app.state.grid_columns = 3;
        for _ in 0..20 {
            app.scroll_down();
        }
        assert_eq!(app.state.live.scroll_offset, 2);
        app.scroll_up();
        assert_eq!(app.state.live.scroll_offset, 1);

        app.state.grid_columns = 1;
        for _ in 0..20 {
            app.scroll_down();
        }
        assert_eq!(app.state.live.scroll_offset, 6);
    }
}
