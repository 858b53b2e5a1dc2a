use chrono::NaiveDate;
use cricket_api::{Match, MatchPhase, MatchRecord, NOT_AVAILABLE};
use tui::buffer::Buffer;
use tui::layout::Rect;
use tui::style::{Color, Modifier, Style};
use tui::text::Line;
use tui::widgets::{Block, BorderType, Borders, Paragraph, Widget};

/// One bordered card: the title sits in the top border, `lines` inside.
#[derive(Debug, Clone)]
pub struct MatchCard {
    pub title: String,
    pub lines: Vec<Line<'static>>,
    pub accent: Color,
}

impl MatchCard {
    pub fn from_match(m: &Match) -> Self {
        let dim = Style::default().fg(Color::Gray);
        let mut lines = vec![
            Line::styled(m.venue.clone(), dim),
            Line::styled(format_match_date(&m.date), dim),
        ];
        let score_style = Style::default().fg(Color::White);
        lines.extend(
            m.score
                .iter()
                .map(|innings| Line::styled(innings.to_string(), score_style)),
        );
        lines.push(Line::styled(m.status.clone(), phase_style(m.phase())));

        Self {
            title: m.name.clone(),
            lines,
            accent: phase_color(m.phase()),
        }
    }

    pub fn from_record(r: &MatchRecord) -> Self {
        let dim = Style::default().fg(Color::Gray);
        let mut lines = Vec::with_capacity(5);
        if let Some(series) = series_label(r) {
            lines.push(Line::styled(series, Style::default().fg(Color::DarkGray)));
        }
        lines.push(Line::styled(r.venue.to_string(), dim));
        lines.push(Line::styled(
            format!("{} - {}", format_day(r.start), format_day(r.end)),
            dim,
        ));
        lines.push(Line::styled(r.status.clone(), phase_style(r.phase())));
        lines.push(Line::styled(
            r.score_line(),
            Style::default().fg(Color::LightBlue).add_modifier(Modifier::BOLD),
        ));

        Self {
            title: r.title(),
            lines,
            accent: phase_color(r.phase()),
        }
    }

    /// Rows needed including the border.
    pub fn height(&self) -> u16 {
        self.lines.len() as u16 + 2
    }
}

impl Widget for &MatchCard {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < 4 || area.height < 2 {
            return;
        }
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(self.accent))
            .title(format!(" {} ", self.title));
        Paragraph::new(self.lines.clone())
            .block(block)
            .render(area, buf);
    }
}

fn series_label(r: &MatchRecord) -> Option<String> {
    match (r.series_name.as_deref(), r.description.as_deref()) {
        (Some(series), Some(desc)) => Some(format!("{series} · {desc}")),
        (Some(series), None) => Some(series.to_string()),
        (None, Some(desc)) => Some(desc.to_string()),
        (None, None) => None,
    }
}

/// "2024-01-01" → "01 Jan 2024"; anything unparsable is shown as-is.
pub fn format_match_date(date: &str) -> String {
    let day = date.get(..10).unwrap_or(date);
    NaiveDate::parse_from_str(day, "%Y-%m-%d")
        .map(|d| d.format("%d %b %Y").to_string())
        .unwrap_or_else(|_| date.to_string())
}

pub fn format_day(at: Option<chrono::DateTime<chrono::Utc>>) -> String {
    at.map(|d| d.format("%d/%m/%Y").to_string())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

pub fn phase_color(phase: MatchPhase) -> Color {
    match phase {
        MatchPhase::Live => Color::Red,
        MatchPhase::Completed => Color::Green,
        MatchPhase::Upcoming => Color::Cyan,
        MatchPhase::Other => Color::DarkGray,
    }
}

fn phase_style(phase: MatchPhase) -> Style {
    let style = Style::default().fg(phase_color(phase));
    if phase == MatchPhase::Live {
        style.add_modifier(Modifier::BOLD)
    } else {
        style
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use cricket_api::{Innings, InningsScore, StatusBuckets, Venue};

    fn line_text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn flat_match_card_lines() {
        let m = Match {
            id: "1".into(),
            name: "A vs B".into(),
            status: "Live".into(),
            venue: "X".into(),
            date: "2024-01-01".into(),
            score: vec![Innings { inning: "1st".into(), runs: 120, wickets: 3, overs: 18.2 }],
        };
        let card = MatchCard::from_match(&m);
        let texts: Vec<String> = card.lines.iter().map(line_text).collect();
        assert_eq!(card.title, "A vs B");
        assert_eq!(texts, ["X", "01 Jan 2024", "1st: 120/3 (18.2 overs)", "Live"]);
        assert_eq!(card.accent, Color::Red);
        assert_eq!(card.height(), 6);
    }

    #[test]
    fn record_card_without_score_shows_sentinels() {
        let r = MatchRecord {
            team1: "India".into(),
            team2: "England".into(),
            venue: Venue { ground: "Lord's".into(), city: "London".into() },
            start: Some(Utc.with_ymd_and_hms(2024, 7, 10, 10, 0, 0).unwrap()),
            end: None,
            status: "Upcoming".into(),
            buckets: StatusBuckets::classify("Upcoming"),
            score1: InningsScore::default(),
            score2: InningsScore::default(),
            ..Default::default()
        };
        let card = MatchCard::from_record(&r);
        let texts: Vec<String> = card.lines.iter().map(line_text).collect();
        assert_eq!(card.title, "India vs England");
        assert_eq!(
            texts,
            [
                "Lord's, London",
                "10/07/2024 - N/A",
                "Upcoming",
                "India: N/A/N/A vs England: N/A/N/A"
            ]
        );
    }

    #[test]
    fn series_label_prefixes_card() {
        let r = MatchRecord {
            series_name: Some("Ashes".into()),
            description: Some("2nd Test".into()),
            ..Default::default()
        };
        let card = MatchCard::from_record(&r);
        assert_eq!(line_text(&card.lines[0]), "Ashes · 2nd Test");
    }

    #[test]
    fn match_date_formats() {
        assert_eq!(format_match_date("2024-01-01"), "01 Jan 2024");
        assert_eq!(format_match_date("2024-03-15T09:30:00"), "15 Mar 2024");
        assert_eq!(format_match_date("TBC"), "TBC");
        assert_eq!(format_match_date(""), "");
    }
}
