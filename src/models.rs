use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

// Sentinel subject meaning "no subject filter"
pub const ALL_SUBJECTS: &str = "All";

// Shown instead of an empty weak-topic list
pub const ALL_GOOD_MESSAGE: &str = "All topics look good 👍";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn label(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "medium" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }
}

impl<'de> Deserialize<'de> for Difficulty {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Difficulty::from_str(&raw).ok_or_else(|| {
            serde::de::Error::custom(format!(
                "invalid difficulty '{}', expected Easy, Medium or Hard",
                raw
            ))
        })
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One row of the topic catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topic {
    pub subject: String,
    pub topic: String,
    pub difficulty: Difficulty,
}

impl Topic {
    pub fn new(subject: &str, topic: &str, difficulty: Difficulty) -> Self {
        Self {
            subject: subject.to_string(),
            topic: topic.to_string(),
            difficulty,
        }
    }
}

// Self-declared mastery of a topic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Weak,
    Ok,
    Good,
}

impl Status {
    pub const ALL: [Status; 3] = [Status::Weak, Status::Ok, Status::Good];

    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Weak => "weak",
            Status::Ok => "ok",
            Status::Good => "good",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "weak" | "w" => Some(Status::Weak),
            "ok" | "o" => Some(Status::Ok),
            "good" | "g" => Some(Status::Good),
            _ => None,
        }
    }

    /// Cycles weak -> ok -> good -> weak.
    pub fn next(&self) -> Self {
        match self {
            Status::Weak => Status::Ok,
            Status::Ok => Status::Good,
            Status::Good => Status::Weak,
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Snapshot of a session's progress, in first-insertion order of each topic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProgressMap {
    entries: Vec<(String, Status)>,
}

impl ProgressMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last write wins; an existing key keeps its position.
    pub fn set(&mut self, topic: &str, status: Status) {
        match self.entries.iter_mut().find(|(t, _)| t == topic) {
            Some(entry) => entry.1 = status,
            None => self.entries.push((topic.to_string(), status)),
        }
    }

    pub fn get(&self, topic: &str) -> Option<Status> {
        self.entries
            .iter()
            .find(|(t, _)| t == topic)
            .map(|(_, s)| *s)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Status)> {
        self.entries.iter().map(|(t, s)| (t.as_str(), *s))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, Status)> for ProgressMap {
    fn from_iter<I: IntoIterator<Item = (String, Status)>>(iter: I) -> Self {
        let mut map = ProgressMap::new();
        for (topic, status) in iter {
            map.set(&topic, status);
        }
        map
    }
}

impl Serialize for ProgressMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (topic, status) in &self.entries {
            map.serialize_entry(topic, status)?;
        }
        map.end()
    }
}

/// Result of the weak-topic filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WeakTopics {
    Topics(Vec<String>),
    AllGood,
}

impl WeakTopics {
    /// What gets shown to the user: the weak topics, or the all-good message.
    pub fn as_list(&self) -> Vec<String> {
        match self {
            WeakTopics::Topics(topics) => topics.clone(),
            WeakTopics::AllGood => vec![ALL_GOOD_MESSAGE.to_string()],
        }
    }

    pub fn is_all_good(&self) -> bool {
        matches!(self, WeakTopics::AllGood)
    }
}

impl Serialize for WeakTopics {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.as_list().serialize(serializer)
    }
}

/// Day number (starting at 1) to the topics scheduled for that day.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct StudyPlan {
    pub days: BTreeMap<u32, Vec<String>>,
}

impl StudyPlan {
    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u32, &[String])> {
        self.days.iter().map(|(d, t)| (*d, t.as_slice()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StudyTimeEntry {
    pub id: i64,
    pub hours: u32,
    pub logged_on: NaiveDate,
}

// JSON output wrapper for --json
#[derive(Debug, Serialize)]
pub struct JsonOutput<T: Serialize> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T: Serialize> JsonOutput<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn err(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(msg.into()),
        }
    }
}
