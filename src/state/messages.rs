use crate::state::network::LoadingState;
use cricket_api::client::ApiError;
use cricket_api::{Match, MatchDocument};
use crossterm::event::KeyEvent;

/// What caused a listing refresh. Only user-visible triggers show the spinner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshTrigger {
    Initial,
    Manual,
    Auto,
}

impl RefreshTrigger {
    pub fn shows_loading(self) -> bool {
        !matches!(self, RefreshTrigger::Auto)
    }
}

/// Monotonic id attached to each listing request so an older response can
/// never overwrite a newer one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RequestTicket(pub u64);

#[derive(Debug, Clone)]
pub enum NetworkRequest {
    RefreshMatches {
        ticket: RequestTicket,
        trigger: RefreshTrigger,
    },
    LoadRecent,
}

impl NetworkRequest {
    pub fn shows_loading(&self) -> bool {
        match self {
            NetworkRequest::RefreshMatches { trigger, .. } => trigger.shows_loading(),
            NetworkRequest::LoadRecent => true,
        }
    }
}

#[derive(Debug)]
pub enum NetworkResponse {
    LoadingStateChanged { loading_state: LoadingState },
    MatchesLoaded { ticket: RequestTicket, matches: Vec<Match> },
    MatchesFailed { ticket: RequestTicket, error: ApiError },
    RecentLoaded { document: MatchDocument },
    RecentFailed { error: ApiError },
}

impl NetworkResponse {
    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            NetworkResponse::MatchesFailed { .. } | NetworkResponse::RecentFailed { .. }
        )
    }
}

#[derive(Debug, Clone)]
pub enum UiEvent {
    KeyPressed(KeyEvent),
    Resize,
    AppStarted,
    RefreshTick,
}
