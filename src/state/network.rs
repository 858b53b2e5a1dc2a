use crate::state::messages::{NetworkRequest, NetworkResponse, RefreshTrigger, RequestTicket};
use cricket_api::client::CricketApi;
use log::{debug, error};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::sync::mpsc;

const SPINNER_CHARS: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];
pub const ERROR_CHAR: char = '!';

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LoadingState {
    pub is_loading: bool,
    pub spinner_char: char,
}

impl Default for LoadingState {
    fn default() -> Self {
        Self { is_loading: false, spinner_char: ' ' }
    }
}

impl LoadingState {
    /// Drops a leftover error marker once a later fetch succeeds.
    /// An in-flight spinner is left alone.
    pub fn clear_error(&mut self) {
        if !self.is_loading && self.spinner_char == ERROR_CHAR {
            *self = Self::default();
        }
    }
}

/// Serves network requests one at a time on its own task.
pub struct NetworkWorker {
    client: CricketApi,
    requests: mpsc::Receiver<NetworkRequest>,
    responses: mpsc::Sender<NetworkResponse>,
    is_loading: Arc<AtomicBool>,
}

impl NetworkWorker {
    pub fn new(
        client: CricketApi,
        requests: mpsc::Receiver<NetworkRequest>,
        responses: mpsc::Sender<NetworkResponse>,
    ) -> Self {
        Self {
            client,
            requests,
            responses,
            is_loading: Arc::new(AtomicBool::new(false)),
        }
    }

    pub async fn run(mut self) {
        while let Some(request) = self.requests.recv().await {
            // Background polls stay silent.
            let animate = request.shows_loading();
            if animate {
                self.start_loading_animation().await;
            }

            let response = match request {
                NetworkRequest::RefreshMatches { ticket, trigger } => {
                    self.handle_refresh_matches(ticket, trigger).await
                }
                NetworkRequest::LoadRecent => self.handle_load_recent().await,
            };

            debug!("network request complete");
            if animate {
                self.stop_loading_animation(!response.is_failure()).await;
            }

            if let Err(e) = self.responses.send(response).await {
                error!("Failed to send network response: {e}");
                break;
            }
        }
    }

    async fn handle_refresh_matches(
        &self,
        ticket: RequestTicket,
        trigger: RefreshTrigger,
    ) -> NetworkResponse {
        debug!("refreshing matches ({trigger:?}, ticket {})", ticket.0);
        match self.client.fetch_matches().await {
            Ok(matches) => NetworkResponse::MatchesLoaded { ticket, matches },
            Err(error) => NetworkResponse::MatchesFailed { ticket, error },
        }
    }

    async fn handle_load_recent(&self) -> NetworkResponse {
        debug!("loading recent matches");
        match self.client.fetch_recent().await {
            Ok(document) => NetworkResponse::RecentLoaded { document },
            Err(error) => NetworkResponse::RecentFailed { error },
        }
    }

    async fn start_loading_animation(&self) {
        self.is_loading.store(true, Ordering::Relaxed);

        let mut loading_state =
            LoadingState { is_loading: true, spinner_char: SPINNER_CHARS[0] };
        let _ = self
            .responses
            .send(NetworkResponse::LoadingStateChanged { loading_state })
            .await;

        let responses = self.responses.clone();
        let is_loading = self.is_loading.clone();

        tokio::spawn(async move {
            let mut spinner_index = 1;
            let mut interval = tokio::time::interval(Duration::from_millis(33));
            loop {
                interval.tick().await;
                if !is_loading.load(Ordering::Relaxed) {
                    break;
                }
                loading_state.spinner_char = SPINNER_CHARS[spinner_index];
                spinner_index = (spinner_index + 1) % SPINNER_CHARS.len();
                let _ = responses
                    .send(NetworkResponse::LoadingStateChanged { loading_state })
                    .await;
            }
        });
    }

    async fn stop_loading_animation(&self, is_ok: bool) {
        self.is_loading.store(false, Ordering::Relaxed);
        tokio::time::sleep(Duration::from_millis(15)).await;

        let spinner_char = if is_ok { ' ' } else { ERROR_CHAR };
        let _ = self
            .responses
            .send(NetworkResponse::LoadingStateChanged {
                loading_state: LoadingState { is_loading: false, spinner_char },
            })
            .await;
    }
}
