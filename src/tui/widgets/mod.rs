pub mod catalog;
pub mod plan;
pub mod progress;
pub mod recommend;

use ratatui::style::Color;

use crate::models::{Difficulty, Status};

pub(crate) fn difficulty_color(difficulty: Difficulty) -> Color {
    match difficulty {
        Difficulty::Easy => Color::Green,
        Difficulty::Medium => Color::Yellow,
        Difficulty::Hard => Color::Red,
    }
}

pub(crate) fn status_color(status: Status) -> Color {
    match status {
        Status::Weak => Color::Red,
        Status::Ok => Color::Yellow,
        Status::Good => Color::Green,
    }
}

pub(crate) fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
