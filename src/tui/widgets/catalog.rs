use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use super::{difficulty_color, truncate};
use crate::tui::App;

pub fn draw(f: &mut Frame, app: &App, area: Rect) {
    let items: Vec<ListItem> = app
        .rows
        .items
        .iter()
        .map(|row| {
            ListItem::new(Line::from(vec![
                Span::styled(
                    format!("{:<20}", truncate(&row.subject, 18)),
                    Style::default().fg(Color::Cyan),
                ),
                Span::styled(
                    format!("{:<32}", truncate(&row.topic, 30)),
                    Style::default().fg(Color::White),
                ),
                Span::styled(
                    row.difficulty.label(),
                    Style::default().fg(difficulty_color(row.difficulty)),
                ),
            ]))
        })
        .collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" Subjects & Topics ({}) ", app.catalog.len()))
        .title_style(Style::default().fg(Color::Cyan));

    let header_style = Style::default()
        .fg(Color::DarkGray)
        .add_modifier(Modifier::BOLD);
    let header = Line::from(vec![
        Span::styled(format!("{:<20}", "Subject"), header_style),
        Span::styled(format!("{:<32}", "Topic"), header_style),
        Span::styled("Difficulty", header_style),
    ]);

    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0)])
        .split(inner);

    let list = List::new(items)
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    let mut state = ListState::default();
    state.select(app.rows.selected);

    // Indent the header past the highlight symbol
    let header_area = Rect {
        x: chunks[0].x + 2,
        width: chunks[0].width.saturating_sub(2),
        ..chunks[0]
    };
    f.render_widget(Paragraph::new(header), header_area);
    f.render_stateful_widget(list, chunks[1], &mut state);
}
