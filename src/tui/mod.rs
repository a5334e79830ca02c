mod ui;
mod widgets;

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use rand::rngs::StdRng;
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::debug;

use crate::catalog::Catalog;
use crate::error::Result;
use crate::models::{
    ProgressMap, Status, StudyPlan, StudyTimeEntry, Topic, WeakTopics, ALL_SUBJECTS,
};
use crate::planner::{make_plan, recommend, weak_topics};
use crate::session::{Session, MAX_STUDY_HOURS};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Catalog,
    Recommend,
    Plan,
    Progress,
}

impl View {
    fn next(&self) -> Self {
        match self {
            View::Catalog => View::Recommend,
            View::Recommend => View::Plan,
            View::Plan => View::Progress,
            View::Progress => View::Catalog,
        }
    }

    fn prev(&self) -> Self {
        match self {
            View::Catalog => View::Progress,
            View::Recommend => View::Catalog,
            View::Plan => View::Recommend,
            View::Progress => View::Plan,
        }
    }
}

pub struct StatefulList<T> {
    pub items: Vec<T>,
    pub selected: Option<usize>,
}

impl<T> StatefulList<T> {
    fn with_items(items: Vec<T>) -> Self {
        let selected = if items.is_empty() { None } else { Some(0) };
        Self { items, selected }
    }

    fn next(&mut self) {
        if self.items.is_empty() {
            return;
        }
        let i = match self.selected {
            Some(i) => {
                if i >= self.items.len() - 1 {
                    0
                } else {
                    i + 1
                }
            }
            None => 0,
        };
        self.selected = Some(i);
    }

    fn previous(&mut self) {
        if self.items.is_empty() {
            return;
        }
        let i = match self.selected {
            Some(i) => {
                if i == 0 {
                    self.items.len() - 1
                } else {
                    i - 1
                }
            }
            None => 0,
        };
        self.selected = Some(i);
    }

    fn first(&mut self) {
        if !self.items.is_empty() {
            self.selected = Some(0);
        }
    }

    fn last(&mut self) {
        if !self.items.is_empty() {
            self.selected = Some(self.items.len() - 1);
        }
    }

    fn selected_item(&self) -> Option<&T> {
        self.selected.and_then(|i| self.items.get(i))
    }
}

/// A number input clamped to `min..=max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Counter {
    pub value: u32,
    pub min: u32,
    pub max: u32,
}

impl Counter {
    pub const fn new(value: u32, min: u32, max: u32) -> Self {
        Self { value, min, max }
    }

    fn increment(&mut self) {
        self.value = (self.value + 1).min(self.max);
    }

    fn decrement(&mut self) {
        self.value = self.value.saturating_sub(1).max(self.min);
    }
}

pub const RECOMMEND_COUNT: Counter = Counter::new(2, 1, 5);
pub const HOURS_PER_DAY: Counter = Counter::new(2, 1, 6);
pub const DAYS_LEFT: Counter = Counter::new(5, 1, 60);
pub const HOURS_STUDIED: Counter = Counter::new(0, 0, MAX_STUDY_HOURS);

pub struct App {
    session: Session,
    rng: StdRng,
    pub catalog: Catalog,
    pub view: View,
    pub rows: StatefulList<Topic>,

    pub subjects: StatefulList<String>,
    pub recommend_count: Counter,
    pub recommendations: Option<Vec<Topic>>,

    pub plan_hours: Counter,
    pub plan_days: Counter,
    pub plan: Option<StudyPlan>,
    pub plan_scroll: u16,

    pub progress_topics: StatefulList<String>,
    pub progress_status: Status,
    pub progress: ProgressMap,
    pub weak: Option<WeakTopics>,
    pub hours_studied: Counter,
    pub hours_today: u32,
    pub study_log: Vec<StudyTimeEntry>,

    pub message: Option<String>,
    pub should_quit: bool,
}

impl App {
    pub fn new(catalog: Catalog, session: Session, rng: StdRng) -> Result<Self> {
        let mut subjects = vec![ALL_SUBJECTS.to_string()];
        subjects.extend(catalog.subjects());

        let progress = session.progress()?;
        let hours_today = session.hours_on(chrono::Local::now().date_naive())?;
        let study_log = session.study_log()?;

        Ok(Self {
            session,
            rng,
            rows: StatefulList::with_items(catalog.rows().to_vec()),
            progress_topics: StatefulList::with_items(catalog.topic_names()),
            catalog,
            view: View::Catalog,
            subjects: StatefulList::with_items(subjects),
            recommend_count: RECOMMEND_COUNT,
            recommendations: None,
            plan_hours: HOURS_PER_DAY,
            plan_days: DAYS_LEFT,
            plan: None,
            plan_scroll: 0,
            progress_status: Status::Weak,
            progress,
            weak: None,
            hours_studied: HOURS_STUDIED,
            hours_today,
            study_log,
            message: None,
            should_quit: false,
        })
    }

    pub fn selected_subject(&self) -> Option<&str> {
        self.subjects.selected_item().map(|s| s.as_str())
    }

    pub fn selected_progress_topic(&self) -> Option<&str> {
        self.progress_topics.selected_item().map(|s| s.as_str())
    }

    fn run_recommend(&mut self) {
        let subject = self.selected_subject().map(str::to_string);
        let recs = recommend(
            &self.catalog,
            subject.as_deref(),
            self.recommend_count.value as usize,
            &mut self.rng,
        );
        self.recommendations = Some(recs);
    }

    fn run_plan(&mut self) {
        self.plan = Some(make_plan(
            &self.catalog,
            self.plan_hours.value,
            self.plan_days.value,
            &mut self.rng,
        ));
        self.plan_scroll = 0;
    }

    fn save_progress(&mut self) -> Result<()> {
        let Some(topic) = self.selected_progress_topic().map(str::to_string) else {
            return Ok(());
        };
        self.session.set_progress(&topic, self.progress_status)?;
        self.progress = self.session.progress()?;
        self.message = Some(format!("Saved: {} = {}", topic, self.progress_status));
        // A shown weak list would be stale now.
        if self.weak.is_some() {
            self.weak = Some(weak_topics(&self.progress));
        }
        Ok(())
    }

    fn show_weak(&mut self) {
        self.weak = Some(weak_topics(&self.progress));
    }

    fn save_study_time(&mut self) -> Result<()> {
        let entry = self.session.log_study_time(self.hours_studied.value)?;
        self.hours_today = self.session.hours_on(entry.logged_on)?;
        self.study_log = self.session.study_log()?;
        self.message = Some(format!("Saved: {} hours studied today", entry.hours));
        Ok(())
    }

    fn handle_key(&mut self, key: KeyCode, modifiers: KeyModifiers) -> Result<()> {
        match key {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true
            }

            // View switching: h/l like vim, Tab for quick cycling
            KeyCode::Char('h') | KeyCode::Left | KeyCode::BackTab => {
                self.view = self.view.prev();
                self.message = None;
            }
            KeyCode::Char('l') | KeyCode::Right | KeyCode::Tab => {
                if modifiers.contains(KeyModifiers::SHIFT) {
                    self.view = self.view.prev();
                } else {
                    self.view = self.view.next();
                }
                self.message = None;
            }

            _ => match self.view {
                View::Catalog => self.handle_catalog_key(key),
                View::Recommend => self.handle_recommend_key(key),
                View::Plan => self.handle_plan_key(key),
                View::Progress => self.handle_progress_key(key)?,
            },
        }
        Ok(())
    }

    fn handle_catalog_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('j') | KeyCode::Down => self.rows.next(),
            KeyCode::Char('k') | KeyCode::Up => self.rows.previous(),
            KeyCode::Char('g') => self.rows.first(),
            KeyCode::Char('G') => self.rows.last(),
            _ => {}
        }
    }

    fn handle_recommend_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('j') | KeyCode::Down => self.subjects.next(),
            KeyCode::Char('k') | KeyCode::Up => self.subjects.previous(),
            KeyCode::Char('+') | KeyCode::Char('=') => self.recommend_count.increment(),
            KeyCode::Char('-') => self.recommend_count.decrement(),
            KeyCode::Enter => self.run_recommend(),
            _ => {}
        }
    }

    fn handle_plan_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('+') | KeyCode::Char('=') => self.plan_hours.increment(),
            KeyCode::Char('-') => self.plan_hours.decrement(),
            KeyCode::Char(']') => self.plan_days.increment(),
            KeyCode::Char('[') => self.plan_days.decrement(),
            KeyCode::Char('j') | KeyCode::Down => {
                self.plan_scroll = self.plan_scroll.saturating_add(1)
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.plan_scroll = self.plan_scroll.saturating_sub(1)
            }
            KeyCode::Enter => self.run_plan(),
            _ => {}
        }
    }

    fn handle_progress_key(&mut self, key: KeyCode) -> Result<()> {
        match key {
            KeyCode::Char('j') | KeyCode::Down => self.progress_topics.next(),
            KeyCode::Char('k') | KeyCode::Up => self.progress_topics.previous(),
            KeyCode::Char('s') => self.progress_status = self.progress_status.next(),
            KeyCode::Enter => self.save_progress()?,
            KeyCode::Char('w') => self.show_weak(),
            KeyCode::Char('+') | KeyCode::Char('=') => self.hours_studied.increment(),
            KeyCode::Char('-') => self.hours_studied.decrement(),
            KeyCode::Char('t') => self.save_study_time()?,
            _ => {}
        }
        Ok(())
    }
}

pub fn run(catalog: Catalog, session: Session, rng: StdRng) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = App::new(catalog, session, rng).and_then(|mut app| {
        debug!("interactive session started");
        run_app(&mut terminal, &mut app)
    });

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                app.handle_key(key.code, key.modifiers)?;
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
