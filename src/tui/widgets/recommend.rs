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
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(28), Constraint::Min(0)])
        .split(area);

    draw_subjects(f, app, chunks[0]);
    draw_results(f, app, chunks[1]);
}

fn draw_subjects(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(3)])
        .split(area);

    let items: Vec<ListItem> = app
        .subjects
        .items
        .iter()
        .map(|s| ListItem::new(Line::from(truncate(s, 22))))
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Choose subject ")
                .title_style(Style::default().fg(Color::Cyan)),
        )
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    let mut state = ListState::default();
    state.select(app.subjects.selected);
    f.render_stateful_widget(list, chunks[0], &mut state);

    let count = &app.recommend_count;
    let counter = Paragraph::new(Line::from(vec![
        Span::styled("How many: ", Style::default().fg(Color::Gray)),
        Span::styled(
            format!("{}", count.value),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(" ({}-{})", count.min, count.max),
            Style::default().fg(Color::DarkGray),
        ),
    ]))
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(counter, chunks[1]);
}

fn draw_results(f: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Recommendations ")
        .title_style(Style::default().fg(Color::Yellow));

    let Some(recs) = &app.recommendations else {
        let hint = Paragraph::new(Line::from(Span::styled(
            "Press <CR> to get recommendations",
            Style::default().fg(Color::DarkGray),
        )))
        .block(block);
        f.render_widget(hint, area);
        return;
    };

    let items: Vec<ListItem> = if recs.is_empty() {
        vec![ListItem::new(Line::from(Span::styled(
            "No topics for this subject",
            Style::default().fg(Color::DarkGray),
        )))]
    } else {
        recs.iter()
            .enumerate()
            .map(|(i, row)| {
                ListItem::new(Line::from(vec![
                    Span::styled(format!("{}. ", i + 1), Style::default().fg(Color::DarkGray)),
                    Span::styled(
                        format!("{:<30}", truncate(&row.topic, 28)),
                        Style::default().fg(Color::White),
                    ),
                    Span::styled(
                        format!("{:<12}", truncate(&row.subject, 10)),
                        Style::default().fg(Color::Cyan),
                    ),
                    Span::styled(
                        row.difficulty.label(),
                        Style::default().fg(difficulty_color(row.difficulty)),
                    ),
                ]))
            })
            .collect()
    };

    f.render_widget(List::new(items).block(block), area);
}
