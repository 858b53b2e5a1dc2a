mod app;
mod components;
mod draw;
mod keys;
mod state;
mod ui;

use crate::app::App;
use crate::state::messages::{NetworkRequest, NetworkResponse, RefreshTrigger, UiEvent};
use crate::state::network::{LoadingState, NetworkWorker};
use crate::state::refresher::PeriodicRefresher;
use cricket_api::client::CricketApi;
use crossterm::event::{self as crossterm_event, Event};
use crossterm::{cursor, execute, terminal};
use log::{error, info};
use std::io::Stdout;
use std::sync::Arc;
use std::{io, panic};
use tokio::sync::{Mutex, mpsc};
use tokio::time::Duration;
use tui::{Terminal, backend::CrosstermBackend};

const INPUT_POLL: Duration = Duration::from_millis(250);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if handle_cli_args() {
        return Ok(());
    }

    better_panic::install();

    let backend = CrosstermBackend::new(io::stdout());
    let terminal = Terminal::new(backend)?;

    setup_panic_hook();
    setup_terminal()?;

    tui_logger::init_logger(log::LevelFilter::Trace)?;
    tui_logger::set_default_level(log::LevelFilter::Info);

    let app = App::new();
    let api_config = app.settings.api.clone();
    let refresh_interval = app.settings.refresh_interval;
    let app = Arc::new(Mutex::new(app));

    let (ui_event_tx, ui_event_rx) = mpsc::channel::<UiEvent>(100);
    let (network_req_tx, network_req_rx) = mpsc::channel::<NetworkRequest>(100);
    let (network_resp_tx, network_resp_rx) = mpsc::channel::<NetworkResponse>(100);

    // Input handler thread
    let input_handler = tokio::spawn(input_handler_task(ui_event_tx.clone()));

    // Network thread
    let network_worker =
        NetworkWorker::new(CricketApi::new(api_config), network_req_rx, network_resp_tx);
    let network_task = tokio::spawn(network_worker.run());

    // Background listing refresh
    let refresher = PeriodicRefresher::new(ui_event_tx.clone(), refresh_interval).start();
    info!("auto refresh every {}s", refresh_interval.as_secs());

    // Initial load of both views
    let _ = ui_event_tx.send(UiEvent::AppStarted).await;

    main_ui_loop(terminal, app, ui_event_rx, network_req_tx, network_resp_rx).await;

    if refresher.is_running() {
        info!("stopping auto refresh");
    }
    refresher.stop().await;
    input_handler.abort();
    network_task.abort();

    cleanup_terminal()?;
    Ok(())
}

fn handle_cli_args() -> bool {
    let mut args = std::env::args().skip(1);
    let Some(arg) = args.next() else {
        return false;
    };

    match arg.as_str() {
        "-h" | "--help" => {
            println!("{}", usage_text());
            true
        }
        "-V" | "--version" => {
            println!("crictui {}", env!("CARGO_PKG_VERSION"));
            true
        }
        _ => {
            eprintln!("Unknown argument: {arg}\n\n{}", usage_text());
            std::process::exit(2);
        }
    }
}

fn usage_text() -> &'static str {
    "crictui - live cricket scores in the terminal

Usage:
  crictui
  crictui --help
  crictui --version

Environment:
  CRICTUI_CRICAPI_KEY    API key for the live listing (cricapi.com)
  CRICTUI_RAPIDAPI_KEY   RapidAPI key for recent matches (Cricbuzz)
  CRICTUI_RAPIDAPI_HOST  RapidAPI host header (default cricbuzz-cricket.p.rapidapi.com)
  CRICTUI_CRICAPI_URL    Override the listing base URL
  CRICTUI_RAPIDAPI_URL   Override the recent matches base URL
  CRICTUI_REFRESH_SECS   Auto refresh interval in seconds (default 60)
  CRICTUI_LOG_LEVEL      off, error, warn, info, debug or trace (default info)
  CRICTUI_CONFIG         Path to a JSON config file
                         (default $XDG_CONFIG_HOME/crictui/config.json)"
}

async fn main_ui_loop(
    mut terminal: Terminal<CrosstermBackend<Stdout>>,
    app: Arc<Mutex<App>>,
    mut ui_events: mpsc::Receiver<UiEvent>,
    network_requests: mpsc::Sender<NetworkRequest>,
    mut network_responses: mpsc::Receiver<NetworkResponse>,
) {
    let mut loading = LoadingState::default();

    loop {
        tokio::select! {
            Some(ui_event) = ui_events.recv() => {
                let should_redraw = handle_ui_event(ui_event, &app, &network_requests).await;
                let mut app_guard = app.lock().await;
                if app_guard.state.should_quit {
                    break;
                }
                if should_redraw {
                    draw::draw(&mut terminal, &mut app_guard, loading);
                }
            }

            Some(response) = network_responses.recv() => {
                let should_redraw = handle_network_response(response, &app, &mut loading).await;
                if should_redraw {
                    let mut app_guard = app.lock().await;
                    draw::draw(&mut terminal, &mut app_guard, loading);
                }
            }

            else => break,
        }
    }
}

async fn handle_ui_event(
    ui_event: UiEvent,
    app: &Arc<Mutex<App>>,
    network_requests: &mpsc::Sender<NetworkRequest>,
) -> bool {
    let requests = match ui_event {
        UiEvent::AppStarted => {
            let mut guard = app.lock().await;
            vec![
                guard.request_matches(RefreshTrigger::Initial),
                guard.request_recent(),
            ]
        }
        UiEvent::RefreshTick => {
            let mut guard = app.lock().await;
            vec![guard.request_matches(RefreshTrigger::Auto)]
        }
        UiEvent::KeyPressed(key_event) => {
            keys::handle_key_bindings(key_event, app, network_requests).await;
            return true;
        }
        UiEvent::Resize => return true,
    };

    for request in requests.into_iter().flatten() {
        if let Err(e) = network_requests.send(request).await {
            error!("Failed to queue network request: {e}");
        }
    }
    true
}

async fn handle_network_response(
    response: NetworkResponse,
    app: &Arc<Mutex<App>>,
    loading: &mut LoadingState,
) -> bool {
    if let NetworkResponse::LoadingStateChanged { loading_state } = response {
        *loading = loading_state;
        return true;
    }

    let mut guard = app.lock().await;
    match response {
        NetworkResponse::LoadingStateChanged { .. } => {}
        NetworkResponse::MatchesLoaded { ticket, matches } => {
            loading.clear_error();
            guard.on_matches_loaded(ticket, matches)
        }
        NetworkResponse::MatchesFailed { ticket, error } => {
            guard.on_matches_failed(ticket, &error)
        }
        NetworkResponse::RecentLoaded { document } => {
            loading.clear_error();
            guard.on_recent_loaded(document)
        }
        NetworkResponse::RecentFailed { error } => guard.on_recent_failed(&error),
    }
    true
}

async fn input_handler_task(ui_events: mpsc::Sender<UiEvent>) {
    loop {
        // Timed poll leaves an await point for abort().
        match crossterm_event::poll(INPUT_POLL) {
            Ok(true) => {}
            Ok(false) => {
                tokio::task::yield_now().await;
                continue;
            }
            Err(e) => {
                error!("Failed to poll terminal events: {e}");
                break;
            }
        }

        if let Ok(event) = crossterm_event::read() {
            let ui_event = match event {
                Event::Key(key_event) => Some(UiEvent::KeyPressed(key_event)),
                Event::Resize(_, _) => Some(UiEvent::Resize),
                _ => None,
            };

            if let Some(ui_event) = ui_event
                && ui_events.send(ui_event).await.is_err()
            {
                break;
            }
        }
    }
}

fn setup_terminal() -> io::Result<()> {
    let mut stdout = io::stdout();
    execute!(stdout, cursor::Hide)?;
    execute!(stdout, terminal::EnterAlternateScreen)?;
    execute!(stdout, terminal::Clear(terminal::ClearType::All))?;
    terminal::enable_raw_mode()
}

pub fn cleanup_terminal() -> io::Result<()> {
    let mut stdout = io::stdout();
    execute!(stdout, cursor::MoveTo(0, 0))?;
    execute!(stdout, terminal::Clear(terminal::ClearType::All))?;
    execute!(stdout, terminal::LeaveAlternateScreen)?;
    execute!(stdout, cursor::Show)?;
    terminal::disable_raw_mode()
}

fn setup_panic_hook() {
    panic::set_hook(Box::new(|panic_info| {
        let _ = cleanup_terminal();
        better_panic::Settings::auto().create_panic_handler()(panic_info);
    }));
}
