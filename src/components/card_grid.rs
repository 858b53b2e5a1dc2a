use tui::buffer::Buffer;
use tui::layout::{Constraint, Layout, Rect};
use tui::widgets::Widget;

use crate::components::match_card::MatchCard;

const GAP: u16 = 1;

/// 1, 2 or 3 columns depending on the available width.
pub fn grid_columns(width: u16) -> usize {
    match width {
        120.. => 3,
        80.. => 2,
        _ => 1,
    }
}

/// Last row a grid of `items` cards can scroll to.
pub fn max_scroll(items: usize, columns: usize) -> u16 {
    let rows = items.div_ceil(columns.max(1));
    u16::try_from(rows.saturating_sub(1)).unwrap_or(u16::MAX)
}

/// Cards laid out row-major; `scroll` counts whole rows of cards.
pub struct CardGrid<'a> {
    pub cards: &'a [MatchCard],
    pub scroll: u16,
}

impl CardGrid<'_> {
    fn rows(&self, columns: usize) -> Vec<&[MatchCard]> {
        self.cards.chunks(columns.max(1)).collect()
    }
}

impl Widget for CardGrid<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() || self.cards.is_empty() {
            return;
        }

        let columns = grid_columns(area.width);
        let rows = self.rows(columns);
        let first = (self.scroll as usize).min(rows.len().saturating_sub(1));

        let bottom = area.y + area.height;
        let mut y = area.y;
        for row in &rows[first..] {
            if y >= bottom {
                break;
            }
            let row_height = row.iter().map(MatchCard::height).max().unwrap_or(0);
            let height = row_height.min(bottom - y);

            let row_area = Rect::new(area.x, y, area.width, height);
            let cells = Layout::horizontal(vec![Constraint::Fill(1); columns])
                .spacing(GAP)
                .split(row_area);
            for (card, cell) in row.iter().zip(cells.iter()) {
                card.render(*cell, buf);
            }

            y = y.saturating_add(row_height);
        }
    }
}
