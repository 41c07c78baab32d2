use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Paragraph, Wrap};
use ratatui::Frame;

use super::app::App;
use crate::widgets::Cover;

const PAPER: Color = Color::White;
const INK: Color = Color::Black;
const DIM: Color = Color::DarkGray;
const ERROR: Color = Color::Red;

pub fn draw(f: &mut Frame, app: &App) {
    let area = f.area();
    f.render_widget(Block::default().style(Style::default().fg(INK).bg(PAPER)), area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(5),    // heat map and side panel
            Constraint::Length(3), // search line
        ])
        .split(area);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(80), Constraint::Percentage(20)])
        .split(chunks[0]);

    f.render_widget(&app.heat_map, body[0]);
    draw_side_panel(f, app, body[1]);
    draw_footer(f, app, chunks[1]);
}

fn draw_side_panel(f: &mut Frame, app: &App, area: Rect) {
    let Some(record) = app.heat_map.record() else {
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(4),    // cover
            Constraint::Length(1),
            Constraint::Length(2), // title
            Constraint::Length(1), // rating
        ])
        .split(area);

    if let Some(cover) = &record.cover {
        f.render_widget(Cover::new(cover), chunks[1]);
    }

    let title = Paragraph::new(Line::from(record.title.as_str()))
        .style(Style::default().fg(INK).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    f.render_widget(title, chunks[3]);

    if let Some(rating) = record.overall_rating {
        let text = Paragraph::new(format!("Rating: {:.1}", rating))
            .style(Style::default().fg(INK))
            .alignment(Alignment::Center);
        f.render_widget(text, chunks[4]);
    }
}

fn draw_footer(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(area);

    if let Some(status) = &app.status {
        let color = if status.contains("failed") { ERROR } else { DIM };
        let text = Paragraph::new(status.as_str())
            .style(Style::default().fg(color))
            .wrap(Wrap { trim: true });
        f.render_widget(text, chunks[0]);
    }

    f.render_widget(&app.search, chunks[1]);

    let hints = Paragraph::new(" Enter search · Esc quit")
        .style(Style::default().fg(DIM))
        .alignment(Alignment::Right);
    f.render_widget(hints, chunks[2]);
}
