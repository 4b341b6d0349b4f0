//! Book catalog and daily schedule: the immutable data the puzzle runs on.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use thiserror::Error;

use crate::date::PuzzleDate;

/// A book in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookEntry {
    pub id: String,
    pub title: String,
    pub author: String,
    pub genre: String,
    #[serde(rename = "publicationYear")]
    pub publication_year: i32,
    /// Table-of-contents entries, in reading order.
    #[serde(default)]
    pub chapters: Vec<String>,
    #[serde(rename = "wikipediaLink", default)]
    pub source_link: Option<String>,
}

/// One day's puzzle assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    pub date: PuzzleDate,
    #[serde(rename = "bookId")]
    pub book_id: String,
}

/// The catalog document as it appears on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct CatalogData {
    #[serde(rename = "DAILY_SCHEDULE", default)]
    pub daily_schedule: Vec<ScheduleEntry>,
    #[serde(rename = "BOOK_DATA", default)]
    pub book_data: Vec<BookEntry>,
}

impl CatalogData {
    /// Load catalog data from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON cannot be parsed into the catalog shape.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Errors raised when the catalog document violates its invariants.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("catalog contains no books")]
    EmptyCatalog,
    #[error("duplicate book id `{id}`")]
    DuplicateBookId { id: String },
    #[error("duplicate title `{title}`")]
    DuplicateTitle { title: String },
    #[error("multiple puzzles scheduled for {date}")]
    DuplicateScheduleDate { date: PuzzleDate },
    #[error("schedule for {date} references unknown book `{book_id}`")]
    UnknownBookId { date: PuzzleDate, book_id: String },
}

/// Validated, indexed catalog. Built once at startup and read-only after.
#[derive(Debug, Clone)]
pub struct Catalog {
    books: HashMap<String, BookEntry>,
    schedule: HashMap<PuzzleDate, ScheduleEntry>,
    /// All titles, sorted, for autocomplete population.
    titles: Vec<String>,
    /// Trimmed titles for guess-membership checks.
    title_set: HashSet<String>,
}

impl Catalog {
    /// Index and validate a catalog document.
    ///
    /// # Errors
    ///
    /// Returns an error when the document is empty, a book id or title is
    /// duplicated, a date is scheduled twice, or a schedule entry points at
    /// a book that does not exist. Any of these is fatal at startup: no
    /// session may run on a partial catalog.
    pub fn from_data(data: CatalogData) -> Result<Self, CatalogError> {
        if data.book_data.is_empty() {
            return Err(CatalogError::EmptyCatalog);
        }

        let mut books = HashMap::with_capacity(data.book_data.len());
        let mut titles = Vec::with_capacity(data.book_data.len());
        let mut title_set = HashSet::with_capacity(data.book_data.len());
        for book in data.book_data {
            let trimmed = book.title.trim().to_string();
            if !title_set.insert(trimmed.clone()) {
                return Err(CatalogError::DuplicateTitle { title: trimmed });
            }
            titles.push(book.title.clone());
            let id = book.id.clone();
            if books.insert(id.clone(), book).is_some() {
                return Err(CatalogError::DuplicateBookId { id });
            }
        }
        titles.sort_unstable();

        let mut schedule = HashMap::with_capacity(data.daily_schedule.len());
        for entry in data.daily_schedule {
            if !books.contains_key(&entry.book_id) {
                return Err(CatalogError::UnknownBookId {
                    date: entry.date,
                    book_id: entry.book_id,
                });
            }
            let date = entry.date;
            if schedule.insert(date, entry).is_some() {
                return Err(CatalogError::DuplicateScheduleDate { date });
            }
        }

        Ok(Self {
            books,
            schedule,
            titles,
            title_set,
        })
    }

    /// Look up a book by id.
    #[must_use]
    pub fn book_by_id(&self, id: &str) -> Option<&BookEntry> {
        self.books.get(id)
    }

    /// The schedule entry for a date, if any.
    #[must_use]
    pub fn schedule_for(&self, date: &PuzzleDate) -> Option<&ScheduleEntry> {
        self.schedule.get(date)
    }

    /// The target book for a date, if one is scheduled.
    #[must_use]
    pub fn daily_book(&self, date: &PuzzleDate) -> Option<&BookEntry> {
        self.schedule_for(date)
            .and_then(|entry| self.book_by_id(&entry.book_id))
    }

    /// All known titles, sorted.
    #[must_use]
    pub fn titles(&self) -> &[String] {
        &self.titles
    }

    /// Whether raw input trim-exactly matches a known title. This is the
    /// input-validation gate, distinct from correctness evaluation.
    #[must_use]
    pub fn is_known_title(&self, raw: &str) -> bool {
        self.title_set.contains(raw.trim())
    }

    pub(crate) fn title_set(&self) -> &HashSet<String> {
        &self.title_set
    }
}
