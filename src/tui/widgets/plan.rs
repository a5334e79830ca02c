use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::tui::{App, Counter};

pub fn draw(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // Inputs
            Constraint::Min(0),    // Days
        ])
        .split(area);

    draw_inputs(f, app, chunks[0]);
    draw_days(f, app, chunks[1]);
}

fn counter_spans<'a>(label: &'a str, counter: &Counter) -> Vec<Span<'a>> {
    vec![
        Span::styled(label, Style::default().fg(Color::Gray)),
        Span::styled(
            format!("{}", counter.value),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(" ({}-{})  ", counter.min, counter.max),
            Style::default().fg(Color::DarkGray),
        ),
    ]
}

fn draw_inputs(f: &mut Frame, app: &App, area: Rect) {
    let mut first = counter_spans("Hours per day: ", &app.plan_hours);
    first.extend(counter_spans("Days left: ", &app.plan_days));

    let text = vec![
        Line::from(first),
        Line::from(Span::styled(
            format!(
                "{} study slots in total",
                app.plan_hours.value * app.plan_days.value
            ),
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Generate Study Plan ")
        .title_style(Style::default().fg(Color::Cyan));

    f.render_widget(Paragraph::new(text).block(block), area);
}

fn draw_days(f: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Plan ")
        .title_style(Style::default().fg(Color::Yellow));

    let lines: Vec<Line> = match &app.plan {
        None => vec![Line::from(Span::styled(
            "Press <CR> to generate a plan",
            Style::default().fg(Color::DarkGray),
        ))],
        Some(plan) => plan
            .iter()
            .map(|(day, topics)| {
                Line::from(vec![
                    Span::styled(
                        format!("Day {:>2}: ", day),
                        Style::default()
                            .fg(Color::Yellow)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(topics.join(", "), Style::default().fg(Color::White)),
                ])
            })
            .collect(),
    };

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: true })
        .scroll((app.plan_scroll, 0));
    f.render_widget(paragraph, area);
}
