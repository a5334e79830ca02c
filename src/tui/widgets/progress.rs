use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use super::{status_color, truncate};
use crate::models::Status;
use crate::tui::App;

pub fn draw(f: &mut Frame, app: &App, area: Rect) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Topic picker
            Constraint::Length(3), // Status picker
            Constraint::Length(5), // Study time
        ])
        .split(columns[0]);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(columns[1]);

    draw_topics(f, app, left[0]);
    draw_status_picker(f, app, left[1]);
    draw_study_time(f, app, left[2]);
    draw_weak(f, app, right[0]);
    draw_current(f, app, right[1]);
}

fn draw_topics(f: &mut Frame, app: &App, area: Rect) {
    let items: Vec<ListItem> = app
        .progress_topics
        .items
        .iter()
        .map(|topic| {
            let status = app.progress.get(topic);
            let (label, color) = match status {
                Some(s) => (s.as_str(), status_color(s)),
                None => ("-", Color::DarkGray),
            };
            ListItem::new(Line::from(vec![
                Span::styled(
                    format!("{:<28}", truncate(topic, 26)),
                    Style::default().fg(Color::White),
                ),
                Span::styled(label, Style::default().fg(color)),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Pick topic ")
                .title_style(Style::default().fg(Color::Cyan)),
        )
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    let mut state = ListState::default();
    state.select(app.progress_topics.selected);
    f.render_stateful_widget(list, area, &mut state);
}

fn draw_status_picker(f: &mut Frame, app: &App, area: Rect) {
    let mut spans = vec![Span::styled("Set status: ", Style::default().fg(Color::Gray))];
    for status in Status::ALL {
        let style = if status == app.progress_status {
            Style::default()
                .fg(status_color(status))
                .add_modifier(Modifier::BOLD | Modifier::REVERSED)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        spans.push(Span::styled(format!(" {} ", status), style));
        spans.push(Span::raw(" "));
    }

    let paragraph = Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::ALL));
    f.render_widget(paragraph, area);
}

fn draw_study_time(f: &mut Frame, app: &App, area: Rect) {
    let text = vec![
        Line::from(vec![
            Span::styled("Hours studied today: ", Style::default().fg(Color::Gray)),
            Span::styled(
                format!("{}", app.hours_studied.value),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!(" ({}-{})", app.hours_studied.min, app.hours_studied.max),
                Style::default().fg(Color::DarkGray),
            ),
        ]),
        Line::from(vec![
            Span::styled("Logged today: ", Style::default().fg(Color::Gray)),
            Span::styled(
                format!("{}h", app.hours_today),
                Style::default().fg(Color::Cyan),
            ),
        ]),
        Line::from(vec![
            Span::styled("Session log: ", Style::default().fg(Color::Gray)),
            Span::styled(
                recent_log(app),
                Style::default().fg(Color::DarkGray),
            ),
        ]),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Track Study Time ")
        .title_style(Style::default().fg(Color::Magenta));
    f.render_widget(Paragraph::new(text).block(block), area);
}

// Most recent entries first
fn recent_log(app: &App) -> String {
    if app.study_log.is_empty() {
        return "-".to_string();
    }
    app.study_log
        .iter()
        .rev()
        .take(5)
        .map(|e| format!("{} {}h", e.logged_on.format("%b %d"), e.hours))
        .collect::<Vec<_>>()
        .join(", ")
}

fn draw_weak(f: &mut Frame, app: &App, area: Rect) {
    let items: Vec<ListItem> = match &app.weak {
        None => vec![ListItem::new(Line::from(Span::styled(
            "Press w to show weak topics",
            Style::default().fg(Color::DarkGray),
        )))],
        Some(weak) => {
            let color = if weak.is_all_good() {
                Color::Green
            } else {
                Color::Red
            };
            weak.as_list()
                .into_iter()
                .map(|t| ListItem::new(Line::from(Span::styled(t, Style::default().fg(color)))))
                .collect()
        }
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Weak Topics ")
        .title_style(Style::default().fg(Color::Red));
    f.render_widget(List::new(items).block(block), area);
}

fn draw_current(f: &mut Frame, app: &App, area: Rect) {
    let items: Vec<ListItem> = if app.progress.is_empty() {
        vec![ListItem::new(Line::from(Span::styled(
            "No progress saved yet",
            Style::default().fg(Color::DarkGray),
        )))]
    } else {
        app.progress
            .iter()
            .map(|(topic, status)| {
                ListItem::new(Line::from(vec![
                    Span::styled(
                        format!("{:<28}", truncate(topic, 26)),
                        Style::default().fg(Color::White),
                    ),
                    Span::styled(status.as_str(), Style::default().fg(status_color(status))),
                ]))
            })
            .collect()
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" Current progress ({}) ", app.progress.len()))
        .title_style(Style::default().fg(Color::Cyan));
    f.render_widget(List::new(items).block(block), area);
}
