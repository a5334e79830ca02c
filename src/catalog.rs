use std::cell::OnceCell;
use std::fs::File;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info};

use crate::models::{Difficulty, Topic};

pub const DEFAULT_CATALOG_FILE: &str = "subjects.csv";

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed catalog: {0}")]
    Csv(#[from] csv::Error),

    #[error("catalog {0} has no topic rows")]
    Empty(PathBuf),
}

/// The ordered, non-empty set of topics for a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    rows: Vec<Topic>,
}

impl Catalog {
    /// Returns `None` for an empty row set; a catalog always has at least one topic.
    pub fn new(rows: Vec<Topic>) -> Option<Self> {
        if rows.is_empty() {
            None
        } else {
            Some(Self { rows })
        }
    }

    pub fn fallback() -> Self {
        Self {
            rows: vec![
                Topic::new("Math", "Algebra", Difficulty::Medium),
                Topic::new("Math", "Trigonometry", Difficulty::Hard),
                Topic::new("Science", "Physics", Difficulty::Medium),
                Topic::new("Science", "Chemistry", Difficulty::Easy),
                Topic::new("English", "Grammar", Difficulty::Easy),
                Topic::new("English", "Essay Writing", Difficulty::Hard),
            ],
        }
    }

    pub fn from_csv<R: std::io::Read>(reader: R, origin: &Path) -> Result<Self, CatalogError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let rows = csv_reader
            .deserialize::<Topic>()
            .collect::<Result<Vec<_>, _>>()?;

        Catalog::new(rows).ok_or_else(|| CatalogError::Empty(origin.to_path_buf()))
    }

    pub fn rows(&self) -> &[Topic] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Distinct subjects, sorted.
    pub fn subjects(&self) -> Vec<String> {
        let mut subjects: Vec<String> = self.rows.iter().map(|r| r.subject.clone()).collect();
        subjects.sort();
        subjects.dedup();
        subjects
    }

    /// Distinct topic names in catalog order.
    pub fn topic_names(&self) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        for row in &self.rows {
            if !names.contains(&row.topic) {
                names.push(row.topic.clone());
            }
        }
        names
    }
}

/// Loads the catalog once per session and hands out the cached copy afterwards.
pub struct CatalogLoader {
    path: PathBuf,
    cached: OnceCell<Catalog>,
}

impl CatalogLoader {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            cached: OnceCell::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<&Catalog, CatalogError> {
        if let Some(catalog) = self.cached.get() {
            debug!("catalog served from cache");
            return Ok(catalog);
        }

        let catalog = self.read()?;
        Ok(self.cached.get_or_init(|| catalog))
    }

    fn read(&self) -> Result<Catalog, CatalogError> {
        if !self.path.exists() {
            info!(path = %self.path.display(), "no catalog file, using built-in topics");
            return Ok(Catalog::fallback());
        }

        let file = File::open(&self.path).map_err(|source| CatalogError::Io {
            path: self.path.clone(),
            source,
        })?;
        let catalog = Catalog::from_csv(file, &self.path)?;
        info!(
            path = %self.path.display(),
            rows = catalog.len(),
            "loaded catalog"
        );
        Ok(catalog)
    }
}
