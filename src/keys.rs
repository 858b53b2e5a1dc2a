use crate::app::{App, MenuItem};
use crate::state::messages::{NetworkRequest, RefreshTrigger};
use cricket_api::StatusFilter;
use crossterm::event::KeyCode::Char;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::sync::Arc;
use tokio::sync::{Mutex, mpsc};

pub async fn handle_key_bindings(
    key_event: KeyEvent,
    app: &Arc<Mutex<App>>,
    network_requests: &mpsc::Sender<NetworkRequest>,
) {
    let mut guard = app.lock().await;
    let request = apply_key(&mut guard, key_event);
    drop(guard);

    if let Some(request) = request {
        let _ = network_requests.send(request).await;
    }
}

/// Update app state for one key press; returns a request to send, if any.
/// Tab and filter selection only touch local state.
pub fn apply_key(app: &mut App, key_event: KeyEvent) -> Option<NetworkRequest> {
    match (app.state.active_tab, key_event.code, key_event.modifiers) {
        // Quit
        (_, Char('q'), _) | (_, Char('c'), KeyModifiers::CONTROL) => app.quit(),

        // Tab switching
        (_, Char('1'), _) => app.update_tab(MenuItem::Live),
        (_, Char('2'), _) => app.update_tab(MenuItem::Recent),
        (_, Char('?'), _) => app.update_tab(MenuItem::Help),
        (MenuItem::Help, KeyCode::Esc, _) => app.exit_help(),

        // Refresh
        (MenuItem::Live, Char('r'), _) => return app.request_matches(RefreshTrigger::Manual),
        (MenuItem::Recent, Char('r'), _) => return app.request_recent(),

        // Match type tabs
        (MenuItem::Recent, Char('l') | KeyCode::Right, _) => app.state.recent.next_match_type(),
        (MenuItem::Recent, Char('h') | KeyCode::Left, _) => app.state.recent.prev_match_type(),

        // Status filter
        (MenuItem::Recent, KeyCode::Tab, _) => app.state.recent.cycle_filter(),
        (MenuItem::Recent, Char('a'), _) => app.state.recent.set_filter(StatusFilter::All),
        (MenuItem::Recent, Char('u'), _) => app.state.recent.set_filter(StatusFilter::Upcoming),
        (MenuItem::Recent, Char('v'), _) => app.state.recent.set_filter(StatusFilter::Live),
        (MenuItem::Recent, Char('c'), _) => app.state.recent.set_filter(StatusFilter::Completed),

        // Scrolling
        (_, Char('j') | KeyCode::Down, _) => app.scroll_down(),
        (_, Char('k') | KeyCode::Up, _) => app.scroll_up(),

        // Global
        (_, Char('f'), _) => app.toggle_full_screen(),
        (_, Char('"'), _) => app.toggle_show_logs(),

        _ => {}
    }
    None
}
