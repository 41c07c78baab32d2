use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, Widget};

use super::gradient::rating_color;
use crate::models::{pad_seasons, SeasonRatings, SeriesRecord};

/// Columns reserved left of the grid: the vertical "Series" label and season numbers.
pub const MARGIN_X: u16 = 4;
/// Rows reserved above the grid: the "Episodes" label and episode numbers.
pub const MARGIN_Y: u16 = 2;

pub const NOT_A_SERIES: &str = "NOT A SERIES";

const BACKGROUND: Color = Color::White;
const INK: Color = Color::Black;
const OUTLINE: Color = Color::DarkGray;

#[derive(Debug, Clone, PartialEq)]
pub struct GridCell {
    pub season: usize,
    pub episode: usize,
    pub rating: Option<f32>,
    pub fill: Option<Color>,
}

/// Every cell of the padded grid, row by row.
pub fn grid_cells(seasons: &[SeasonRatings]) -> Vec<GridCell> {
    pad_seasons(seasons)
        .into_iter()
        .enumerate()
        .flat_map(|(season, row)| {
            row.into_iter().enumerate().map(move |(episode, rating)| GridCell {
                season,
                episode,
                rating,
                fill: rating.map(rating_color),
            })
        })
        .collect()
}

/// Cell geometry inside the drawable area. Sizes are fractional; each cell
/// starts at `margin + floor(i * size)` so the remainder is spread out.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridLayout {
    pub origin_x: u16,
    pub origin_y: u16,
    pub box_width: f64,
    pub box_height: f64,
    pub columns: usize,
    pub rows: usize,
}

impl GridLayout {
    pub fn compute(area: Rect, columns: usize, rows: usize) -> Option<Self> {
        if columns == 0 || rows == 0 {
            return None;
        }
        let width = area.width.saturating_sub(MARGIN_X);
        let height = area.height.saturating_sub(MARGIN_Y);
        if width == 0 || height == 0 {
            return None;
        }
        Some(Self {
            origin_x: area.x + MARGIN_X,
            origin_y: area.y + MARGIN_Y,
            box_width: f64::from(width) / columns as f64,
            box_height: f64::from(height) / rows as f64,
            columns,
            rows,
        })
    }

    pub fn column_span(&self, episode: usize) -> (u16, u16) {
        span(self.origin_x, self.box_width, episode)
    }

    pub fn row_span(&self, season: usize) -> (u16, u16) {
        span(self.origin_y, self.box_height, season)
    }

    pub fn cell_rect(&self, season: usize, episode: usize) -> Rect {
        let (x, width) = self.column_span(episode);
        let (y, height) = self.row_span(season);
        Rect::new(x, y, width, height)
    }
}

fn span(origin: u16, size: f64, index: usize) -> (u16, u16) {
    let start = (index as f64 * size).floor() as u16;
    let end = ((index + 1) as f64 * size).floor() as u16;
    (origin + start, end - start)
}

/// First three characters of the rating, e.g. `8.4`, `10.`.
pub fn rating_label(rating: f32) -> String {
    format!("{:.3}", rating).chars().take(3).collect()
}

#[derive(Debug, Default)]
pub struct HeatMap {
    pending: Option<String>,
    searching: Option<String>,
    record: Option<SeriesRecord>,
}

impl HeatMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn trigger(&mut self, query: String) {
        self.pending = Some(query);
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn is_searching(&self) -> bool {
        self.searching.is_some()
    }

    /// Returns the query to look up, at most once per trigger.
    pub fn update(&mut self) -> Option<String> {
        let query = self.pending.take()?;
        self.searching = Some(query.clone());
        Some(query)
    }

    pub fn apply(&mut self, record: SeriesRecord) {
        self.searching = None;
        self.record = Some(record);
    }

    /// The lookup failed; the previous grid is left in place.
    pub fn abort(&mut self) {
        self.searching = None;
    }

    pub fn record(&self) -> Option<&SeriesRecord> {
        self.record.as_ref()
    }
}

impl Widget for &HeatMap {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, Style::default().fg(INK).bg(BACKGROUND));
        if area.is_empty() {
            return;
        }
        if let Some(query) = &self.searching {
            centered(buf, area, &format!("Searching for '{}'…", query));
            return;
        }
        match &self.record {
            Some(record) if record.is_series() => render_grid(&record.episodes, area, buf),
            Some(_) => centered(buf, area, NOT_A_SERIES),
            None => {}
        }
    }
}

fn render_grid(seasons: &[SeasonRatings], area: Rect, buf: &mut Buffer) {
    let columns = seasons.iter().map(Vec::len).max().unwrap_or(0);
    let Some(layout) = GridLayout::compute(area, columns, seasons.len()) else {
        return;
    };
    let ink = Style::default().fg(INK).bg(BACKGROUND);

    let label = "Episodes";
    let x = area.x + area.width.saturating_sub(label.len() as u16) / 2;
    buf.set_stringn(x, area.y, label, area.width as usize, ink);

    let label = "Series";
    let top = area.y + area.height.saturating_sub(label.len() as u16) / 2;
    for (i, letter) in label.chars().enumerate() {
        let y = top + i as u16;
        if y < area.bottom() {
            buf.set_string(area.x, y, letter.to_string(), ink);
        }
    }

    for episode in 0..columns {
        let (x, width) = layout.column_span(episode);
        let text = (episode + 1).to_string();
        let x = x + width.saturating_sub(text.len() as u16) / 2;
        if x < area.right() {
            buf.set_stringn(x, area.y + 1, &text, (area.right() - x) as usize, ink);
        }
    }

    for season in 0..seasons.len() {
        let (y, height) = layout.row_span(season);
        buf.set_stringn(
            area.x + 1,
            y + height / 2,
            (season + 1).to_string(),
            usize::from(MARGIN_X - 1),
            ink,
        );
    }

    for cell in grid_cells(seasons) {
        let rect = layout.cell_rect(cell.season, cell.episode).intersection(area);
        if rect.is_empty() {
            continue;
        }
        match (cell.rating, cell.fill) {
            (Some(rating), Some(fill)) => {
                let style = Style::default().fg(INK).bg(fill);
                buf.set_style(rect, style);
                let text = rating_label(rating);
                let x = rect.x + rect.width.saturating_sub(text.len() as u16) / 2;
                buf.set_stringn(x, rect.y + rect.height / 2, &text, rect.width as usize, style);
            }
            _ => outline(rect, buf),
        }
    }
}

fn outline(rect: Rect, buf: &mut Buffer) {
    let style = Style::default().fg(OUTLINE).bg(BACKGROUND);
    if rect.width >= 2 && rect.height >= 2 {
        Block::bordered().border_style(style).render(rect, buf);
    } else {
        buf.set_string(
            rect.x + rect.width / 2,
            rect.y + rect.height / 2,
            "·",
            style,
        );
    }
}

fn centered(buf: &mut Buffer, area: Rect, text: &str) {
    let width = text.chars().count() as u16;
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height / 2;
    buf.set_stringn(
        x,
        y,
        text,
        (area.right() - x) as usize,
        Style::default().fg(INK).bg(BACKGROUND),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Kind;

    fn record(kind: Kind, episodes: Vec<SeasonRatings>) -> SeriesRecord {
        SeriesRecord {
            title: "Test".to_string(),
            cover: None,
            overall_rating: Some(8.0),
            kind,
            episodes,
        }
    }

    fn rendered(map: &HeatMap, area: Rect) -> Buffer {
        let mut buf = Buffer::empty(area);
        map.render(area, &mut buf);
        buf
    }

    fn row_text(buf: &Buffer, y: u16) -> String {
        (buf.area.x..buf.area.right())
            .map(|x| buf[(x, y)].symbol().to_string())
            .collect()
    }

    #[test]
    fn layout_divides_the_drawable_area() {
        let layout = GridLayout::compute(Rect::new(0, 0, 34, 8), 3, 2).unwrap();
        assert_eq!(layout.box_width, 10.0);
        assert_eq!(layout.box_height, 3.0);
        assert_eq!(layout.cell_rect(0, 0), Rect::new(4, 2, 10, 3));
        assert_eq!(layout.cell_rect(1, 2), Rect::new(24, 5, 10, 3));
    }

    #[test]
    fn layout_spreads_the_remainder() {
        let layout = GridLayout::compute(Rect::new(0, 0, 14, 12), 4, 1).unwrap();
        let widths: Vec<u16> = (0..4).map(|e| layout.column_span(e).1).collect();
        assert_eq!(widths.iter().sum::<u16>(), 10);
        assert!(widths.iter().all(|w| *w == 2 || *w == 3));
        let (last_x, last_w) = layout.column_span(3);
        assert_eq!(last_x + last_w, 14);
    }

    #[test]
    fn layout_needs_columns_rows_and_room() {
        assert!(GridLayout::compute(Rect::new(0, 0, 40, 20), 0, 3).is_none());
        assert!(GridLayout::compute(Rect::new(0, 0, 40, 20), 3, 0).is_none());
        assert!(GridLayout::compute(Rect::new(0, 0, 4, 20), 3, 3).is_none());
    }

    #[test]
    fn cells_are_padded_and_colored() {
        let cells = grid_cells(&[vec![Some(9.5), None, Some(7.0)], vec![Some(4.0)]]);
        assert_eq!(cells.len(), 6);
        assert_eq!(cells[0].fill, Some(rating_color(9.5)));
        assert_eq!(cells[1].fill, None);
        assert_eq!(cells[3].season, 1);
        assert_eq!(cells[3].episode, 0);
        assert_eq!(cells[4].rating, None);
        assert_eq!(cells[5].rating, None);
    }

    #[test]
    fn labels_keep_three_characters() {
        assert_eq!(rating_label(8.412), "8.4");
        assert_eq!(rating_label(10.0), "10.");
        assert_eq!(rating_label(9.0), "9.0");
        assert_eq!(rating_label(0.0), "0.0");
    }

    #[test]
    fn season_with_a_gap_renders_filled_empty_filled() {
        let mut map = HeatMap::new();
        map.apply(record(Kind::Series, vec![vec![Some(9.5), None, Some(7.0)]]));
        let buf = rendered(&map, Rect::new(0, 0, 34, 8));

        // Cells span x 4..14, 14..24, 24..34 and y 2..8.
        assert_eq!(buf[(5, 3)].bg, rating_color(9.5));
        assert_eq!(buf[(30, 6)].bg, rating_color(7.0));
        assert_eq!(buf[(14, 2)].symbol(), "┌");
        assert_eq!(buf[(23, 7)].symbol(), "┘");
        assert_eq!(buf[(19, 5)].bg, BACKGROUND);

        assert_eq!(buf[(7, 5)].symbol(), "9");
        assert_eq!(buf[(8, 5)].symbol(), ".");
        assert_eq!(buf[(9, 5)].symbol(), "5");
    }

    #[test]
    fn grid_has_axis_labels_and_numbers() {
        let mut map = HeatMap::new();
        map.apply(record(
            Kind::Series,
            vec![vec![Some(8.0), Some(8.0)], vec![Some(8.0)]],
        ));
        let buf = rendered(&map, Rect::new(0, 0, 24, 10));

        assert!(row_text(&buf, 0).contains("Episodes"));
        let numbers = row_text(&buf, 1);
        assert!(numbers.contains('1') && numbers.contains('2'));

        let column: String = (0..10).map(|y| buf[(0, y)].symbol().to_string()).collect();
        assert!(column.contains("Series"));
        // Rows span y 2..6 and 6..10.
        assert_eq!(buf[(1, 4)].symbol(), "1");
        assert_eq!(buf[(1, 8)].symbol(), "2");
    }

    #[test]
    fn other_kinds_never_draw_a_grid() {
        let mut map = HeatMap::new();
        map.apply(record(Kind::Other, vec![vec![Some(9.9); 4]]));
        let area = Rect::new(0, 0, 40, 10);
        let buf = rendered(&map, area);

        assert!(row_text(&buf, 5).contains(NOT_A_SERIES));
        assert!(!row_text(&buf, 0).contains("Episodes"));
        for y in 0..area.height {
            for x in 0..area.width {
                assert_eq!(buf[(x, y)].bg, BACKGROUND);
            }
        }
    }

    #[test]
    fn update_hands_out_each_trigger_once() {
        let mut map = HeatMap::new();
        assert_eq!(map.update(), None);
        map.trigger("Lost".to_string());
        assert!(map.is_pending());
        assert_eq!(map.update().as_deref(), Some("Lost"));
        assert!(!map.is_pending());
        assert!(map.is_searching());
        assert_eq!(map.update(), None);
        map.abort();
        assert!(!map.is_searching());
    }

    #[test]
    fn searching_state_is_shown() {
        let mut map = HeatMap::new();
        map.trigger("Dark".to_string());
        map.update();
        let buf = rendered(&map, Rect::new(0, 0, 40, 6));
        assert!(row_text(&buf, 3).contains("Searching for 'Dark'"));
    }
}
