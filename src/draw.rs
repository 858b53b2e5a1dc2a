use log::error;
use tui::backend::Backend;
use tui::layout::{Alignment, Constraint, Layout, Rect};
use tui::style::{Color, Modifier, Style};
use tui::text::{Line, Span};
use tui::widgets::{Block, BorderType, Borders, Paragraph, Tabs, Wrap};
use tui::{Frame, Terminal};
use tui_logger::TuiLoggerWidget;

use crate::app::{App, MenuItem};
use crate::components::card_grid::{CardGrid, grid_columns};
use crate::components::match_card::MatchCard;
use crate::state::network::{ERROR_CHAR, LoadingState};
use crate::ui::layout::LayoutAreas;
use cricket_api::StatusFilter;

static TABS: &[&str; 2] = &["Live", "Recent"];

pub fn draw<B>(terminal: &mut Terminal<B>, app: &mut App, loading: LoadingState)
where
    B: Backend,
{
    let current_size = terminal.size().unwrap_or_default();
    if current_size.width <= 10 || current_size.height <= 10 {
        return;
    }

    let mut layout = LayoutAreas::new(current_size);

    if let Err(e) = terminal.draw(|f| render(f, &mut layout, app, loading)) {
        error!("failed to draw frame: {e}");
    }
    // Both card views sit inside a bordered block.
    app.state.grid_columns = grid_columns(layout.main.width.saturating_sub(2));
}

fn render(f: &mut Frame, layout: &mut LayoutAreas, app: &App, loading: LoadingState) {
    layout.update(f.area(), app.settings.full_screen, app.state.show_logs);

    if !app.settings.full_screen {
        draw_tabs(f, layout.tab_bar, app);
    }

    match app.state.active_tab {
        MenuItem::Live => draw_live(f, layout.main, app, loading),
        MenuItem::Recent => draw_recent(f, layout.main, app, loading),
        MenuItem::Help => draw_help(f, layout.main),
    }

    if let Some(logs) = layout.logs {
        draw_logs(f, logs);
    }

    draw_loading_spinner(f, f.area(), app, loading);
}

pub fn default_border<'a>(color: Color) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(color))
}

fn draw_tabs(f: &mut Frame, tab_bar: [Rect; 2], app: &App) {
    let style = Style::default().fg(Color::White);
    let border_type = BorderType::Rounded;

    let tab_index = match app.state.active_tab {
        MenuItem::Live => 0,
        MenuItem::Recent => 1,
        MenuItem::Help => match app.state.previous_tab {
            MenuItem::Recent => 1,
            _ => 0,
        },
    };

    let titles: Vec<Line> = TABS.iter().map(|t| Line::from(*t)).collect();
    let tabs = Tabs::new(titles)
        .block(
            Block::default()
                .borders(Borders::LEFT | Borders::BOTTOM | Borders::TOP)
                .border_type(border_type),
        )
        .highlight_style(Style::default().add_modifier(Modifier::UNDERLINED))
        .select(tab_index)
        .style(style);
    f.render_widget(tabs, tab_bar[0]);

    let help = Paragraph::new("Help: ? ")
        .alignment(Alignment::Right)
        .block(
            Block::default()
                .borders(Borders::RIGHT | Borders::BOTTOM | Borders::TOP)
                .border_type(border_type),
        )
        .style(style);
    f.render_widget(help, tab_bar[1]);
}

// ---------------------------------------------------------------------------
// Live listing
// ---------------------------------------------------------------------------

fn draw_live(f: &mut Frame, area: Rect, app: &App, loading: LoadingState) {
    let block = default_border(Color::White).title(" Live Cricket Scores ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let live = &app.state.live;
    let [header, banners, content] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(banner_rows(live.error.is_some(), live.notice.is_some())),
        Constraint::Fill(1),
    ])
    .areas(inner);

    let control = if live.is_loading() {
        Span::styled("[r] Refreshing...", Style::default().fg(Color::DarkGray))
    } else {
        Span::styled(
            "[r] Refresh",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )
    };
    let updated = live
        .last_updated
        .map(|t| t.format("%H:%M:%S").to_string())
        .unwrap_or_else(|| "never".to_string());
    let interval = app.settings.refresh_interval.as_secs();
    f.render_widget(
        Paragraph::new(Line::from(vec![
            control,
            Span::styled(
                format!("  Last updated: {updated}  (auto every {interval}s)"),
                Style::default().fg(Color::Gray),
            ),
        ])),
        header,
    );

    let mut banner_lines = Vec::with_capacity(2);
    if let Some(err) = live.error.as_deref() {
        banner_lines.push(Line::styled(
            err.to_string(),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ));
    }
    if let Some(notice) = live.notice.as_deref() {
        banner_lines.push(Line::styled(notice.to_string(), Style::default().fg(Color::Yellow)));
    }
    f.render_widget(Paragraph::new(banner_lines), banners);

    if live.is_loading() {
        draw_message(
            f,
            content,
            &format!("{} Loading matches...", loading.spinner_char),
            Color::Gray,
        );
        return;
    }
    if live.error.is_some() {
        return;
    }
    if live.matches.is_empty() {
        draw_message(f, content, "No matches available at the moment", Color::DarkGray);
        return;
    }

    let cards: Vec<MatchCard> = live.matches.iter().map(MatchCard::from_match).collect();
    f.render_widget(
        CardGrid { cards: &cards, scroll: live.scroll_offset },
        content,
    );
}

fn banner_rows(has_error: bool, has_notice: bool) -> u16 {
    u16::from(has_error) + u16::from(has_notice)
}

// ---------------------------------------------------------------------------
// Recent matches
// ---------------------------------------------------------------------------

fn draw_recent(f: &mut Frame, area: Rect, app: &App, loading: LoadingState) {
    let block = default_border(Color::White).title(" Recent Matches ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let recent = &app.state.recent;
    let [type_bar, filter_bar, _gap, content] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Fill(1),
    ])
    .areas(inner);

    let match_types = recent
        .document
        .as_ref()
        .map(|d| d.match_types.as_slice())
        .unwrap_or_default();
    f.render_widget(
        Paragraph::new(selector_line(
            match_types.iter().map(|t| (t.as_str(), *t == recent.active_type)),
        )),
        type_bar,
    );
    f.render_widget(
        Paragraph::new(selector_line(
            StatusFilter::ALL
                .iter()
                .map(|s| (s.label(), *s == recent.filter)),
        )),
        filter_bar,
    );

    if recent.loading {
        draw_message(
            f,
            content,
            &format!("{} Loading matches...", loading.spinner_char),
            Color::Gray,
        );
        return;
    }
    if let Some(err) = recent.error.as_deref() {
        draw_message(f, content, err, Color::Red);
        return;
    }
    if recent.document.is_none() {
        draw_message(f, content, "Press r to load recent matches", Color::DarkGray);
        return;
    }

    let cards: Vec<MatchCard> = recent.visible().map(MatchCard::from_record).collect();
    if cards.is_empty() {
        draw_message(
            f,
            content,
            "No matches found for the selected filter.",
            Color::DarkGray,
        );
        return;
    }
    f.render_widget(
        CardGrid { cards: &cards, scroll: recent.scroll_offset },
        content,
    );
}

/// One row of options with the selected one highlighted.
fn selector_line<'a>(options: impl Iterator<Item = (&'a str, bool)>) -> Line<'a> {
    let mut spans = Vec::new();
    for (idx, (label, selected)) in options.enumerate() {
        if idx > 0 {
            spans.push(Span::styled(" │ ", Style::default().fg(Color::DarkGray)));
        }
        let style = if selected {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(Color::Gray)
        };
        spans.push(Span::styled(label, style));
    }
    Line::from(spans)
}

// ---------------------------------------------------------------------------
// Misc panels
// ---------------------------------------------------------------------------

fn draw_help(f: &mut Frame, area: Rect) {
    let block = default_border(Color::DarkGray).title(" Help ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let keys = [
        ("1 / 2", "Live / Recent"),
        ("r", "refresh the current view"),
        ("h l ← →", "previous / next match type (Recent)"),
        ("a u v c", "All / Upcoming / Live / Completed (Recent)"),
        ("Tab", "cycle status filter (Recent)"),
        ("j k ↑ ↓", "scroll"),
        ("f", "toggle full screen"),
        ("\"", "toggle logs"),
        ("Esc", "close help"),
        ("q", "quit"),
    ];
    let lines: Vec<Line> = keys
        .iter()
        .map(|(key, action)| {
            Line::from(vec![
                Span::styled(
                    format!("{key:>10}  "),
                    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
                ),
                Span::raw(*action),
            ])
        })
        .collect();
    f.render_widget(Paragraph::new(lines), inner);
}

fn draw_logs(f: &mut Frame, area: Rect) {
    let logs = TuiLoggerWidget::default()
        .block(default_border(Color::DarkGray).title(" Logs "))
        .style_error(Style::default().fg(Color::Red))
        .style_warn(Style::default().fg(Color::Yellow))
        .style_info(Style::default().fg(Color::Cyan))
        .style_debug(Style::default().fg(Color::Gray));
    f.render_widget(logs, area);
}

fn draw_message(f: &mut Frame, area: Rect, msg: &str, color: Color) {
    f.render_widget(
        Paragraph::new(msg)
            .style(Style::default().fg(color))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        area,
    );
}

fn draw_loading_spinner(f: &mut Frame, area: Rect, app: &App, loading: LoadingState) {
    if !loading.is_loading && loading.spinner_char != ERROR_CHAR {
        return;
    }
    let style = match loading.spinner_char {
        ERROR_CHAR => Style::default().fg(Color::Red),
        _ => Style::default().fg(Color::White),
    };
    let spinner = Paragraph::new(loading.spinner_char.to_string())
        .alignment(Alignment::Right)
        .style(style);
    let area = if app.settings.full_screen {
        Rect::new(area.width.saturating_sub(3), area.height.saturating_sub(2), 1, 1)
    } else {
        Rect::new(area.width.saturating_sub(11), 1, 1, 1)
    };
    f.render_widget(spinner, area);
}
