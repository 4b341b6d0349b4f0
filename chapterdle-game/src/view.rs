//! Presenter-facing view model.

use serde::{Deserialize, Serialize};

use crate::constants::{MAX_GUESSES, PLACEHOLDER_FIELD, PLACEHOLDER_TITLE};
use crate::date::PuzzleDate;
use crate::reveal::author_initials;
use crate::session::{PuzzlePhase, PuzzleSession};

/// How the title line should be styled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TitleTone {
    /// Still hidden behind the placeholder.
    Hidden,
    /// Revealed by a correct guess.
    Success,
    /// Revealed because the guesses ran out.
    Failure,
}

/// A complete render snapshot of a session.
///
/// This is the only data a rendering layer may read; it never reaches into
/// session internals. Hidden fields carry placeholders so the presenter
/// renders the snapshot verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PuzzleViewModel {
    pub date: PuzzleDate,
    pub phase: PuzzlePhase,
    pub title: String,
    pub title_tone: TitleTone,
    /// Placeholder, initials, or the full name.
    pub author: String,
    pub genre: String,
    pub year: String,
    /// The visible prefix of the table of contents.
    pub chapters: Vec<String>,
    pub total_chapters: usize,
    pub guesses_remaining: u32,
    /// Attempts logged, including a solving guess ("Used N of 5 attempts").
    pub guesses_used: usize,
    pub max_guesses: u32,
    pub history: Vec<String>,
    /// Present once the session is terminal.
    pub source_link: Option<String>,
}

impl PuzzleViewModel {
    /// Build the snapshot for a session's current state.
    #[must_use]
    pub fn snapshot(session: &PuzzleSession) -> Self {
        let book = session.book();
        let phase = session.phase();
        let reveal = session.reveal();

        let (title, title_tone) = match phase {
            PuzzlePhase::InProgress => (PLACEHOLDER_TITLE.to_string(), TitleTone::Hidden),
            PuzzlePhase::Solved => (book.title.clone(), TitleTone::Success),
            PuzzlePhase::Exhausted => (book.title.clone(), TitleTone::Failure),
        };
        let author = if reveal.author_full {
            book.author.clone()
        } else if reveal.author_initials {
            author_initials(&book.author)
        } else {
            PLACEHOLDER_FIELD.to_string()
        };
        let genre = if reveal.genre {
            book.genre.clone()
        } else {
            PLACEHOLDER_FIELD.to_string()
        };
        let year = if reveal.year {
            book.publication_year.to_string()
        } else {
            PLACEHOLDER_FIELD.to_string()
        };
        let chapters = book.chapters[..session.visible_chapter_count()].to_vec();
        let source_link = if reveal.source_link {
            book.source_link.clone()
        } else {
            None
        };

        Self {
            date: *session.date(),
            phase,
            title,
            title_tone,
            author,
            genre,
            year,
            chapters,
            total_chapters: book.chapters.len(),
            guesses_remaining: session.guesses_remaining(),
            guesses_used: session.history().len(),
            max_guesses: MAX_GUESSES,
            history: session.history().to_vec(),
            source_link,
        }
    }
}
