use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs},
    Frame,
};

use super::widgets::{catalog, plan, progress, recommend};
use super::{App, View};

pub fn draw(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Tab bar
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Status message
            Constraint::Length(1), // Help bar
        ])
        .split(f.area());

    draw_tabs(f, app, chunks[0]);
    draw_content(f, app, chunks[1]);
    draw_message(f, app, chunks[2]);
    draw_help_bar(f, app, chunks[3]);
}

fn draw_tabs(f: &mut Frame, app: &App, area: Rect) {
    let tab_titles = vec!["Subjects & Topics", "Recommend", "Study Plan", "Progress"];
    let selected = match app.view {
        View::Catalog => 0,
        View::Recommend => 1,
        View::Plan => 2,
        View::Progress => 3,
    };

    let tabs = Tabs::new(tab_titles)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Study Assistant "),
        )
        .select(selected)
        .style(Style::default().fg(Color::White))
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        );

    f.render_widget(tabs, area);
}

fn draw_content(f: &mut Frame, app: &App, area: Rect) {
    match app.view {
        View::Catalog => catalog::draw(f, app, area),
        View::Recommend => recommend::draw(f, app, area),
        View::Plan => plan::draw(f, app, area),
        View::Progress => progress::draw(f, app, area),
    }
}

fn draw_message(f: &mut Frame, app: &App, area: Rect) {
    if let Some(message) = &app.message {
        let line = Line::from(Span::styled(
            message.as_str(),
            Style::default().fg(Color::Green),
        ));
        f.render_widget(Paragraph::new(line), area);
    }
}

fn key(k: &str) -> Span<'_> {
    Span::styled(k, Style::default().fg(Color::Cyan))
}

fn draw_help_bar(f: &mut Frame, app: &App, area: Rect) {
    let mut spans = vec![key("h/l"), Span::raw(" Views  ")];

    match app.view {
        View::Catalog => {
            spans.extend(vec![
                key("j/k"),
                Span::raw(" Nav  "),
                key("g/G"),
                Span::raw(" Top/Bot  "),
            ]);
        }
        View::Recommend => {
            spans.extend(vec![
                key("j/k"),
                Span::raw(" Subject  "),
                key("+/-"),
                Span::raw(" Count  "),
                key("<CR>"),
                Span::raw(" Recommend  "),
            ]);
        }
        View::Plan => {
            spans.extend(vec![
                key("+/-"),
                Span::raw(" Hours  "),
                key("]/["),
                Span::raw(" Days  "),
                key("j/k"),
                Span::raw(" Scroll  "),
                key("<CR>"),
                Span::raw(" Generate  "),
            ]);
        }
        View::Progress => {
            spans.extend(vec![
                key("j/k"),
                Span::raw(" Topic  "),
                key("s"),
                Span::raw(" Status  "),
                key("<CR>"),
                Span::raw(" Save  "),
                key("w"),
                Span::raw(" Weak  "),
                key("+/-"),
                Span::raw(" Hours  "),
                key("t"),
                Span::raw(" Log time  "),
            ]);
        }
    }

    spans.extend(vec![key("q"), Span::raw(" Quit")]);

    let help = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));

    f.render_widget(help, area);
}
