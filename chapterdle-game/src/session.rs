//! The puzzle state machine.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

use crate::catalog::BookEntry;
use crate::constants::MAX_GUESSES;
use crate::date::PuzzleDate;
use crate::progress::ProgressRecord;
use crate::reveal::{HINT_REVEAL_SCHEDULE, Reveal, normalize_title, stage_unlocked_at};
use crate::view::PuzzleViewModel;

/// Lifecycle phase of a session. `Solved` and `Exhausted` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PuzzlePhase {
    InProgress,
    Solved,
    Exhausted,
}

impl PuzzlePhase {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InProgress => "in_progress",
            Self::Solved => "solved",
            Self::Exhausted => "exhausted",
        }
    }

    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Solved | Self::Exhausted)
    }
}

impl fmt::Display for PuzzlePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of a single `submit_guess` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuessOutcome {
    /// The guess matched the target; the session is now `Solved`.
    Correct,
    /// A valid but wrong guess; the session stays `InProgress`.
    Incorrect { remaining: u32 },
    /// A valid but wrong guess that spent the last attempt; the session is
    /// now `Exhausted`.
    Exhausted,
    /// Input rejected by the title-membership gate. Nothing was recorded,
    /// counted, or persisted.
    InvalidSelection,
    /// Guess submitted after the session ended; ignored.
    SessionTerminal,
}

impl GuessOutcome {
    /// Whether the outcome mutated session state and therefore needs to be
    /// persisted.
    #[must_use]
    pub const fn mutates_state(self) -> bool {
        matches!(
            self,
            Self::Correct | Self::Incorrect { .. } | Self::Exhausted
        )
    }
}

/// One owned play-through of a single date's puzzle.
///
/// All mutation is routed through [`PuzzleSession::submit_guess`]; the
/// rendering layer reads only [`PuzzleSession::view_model`] snapshots.
#[derive(Debug, Clone)]
pub struct PuzzleSession {
    date: PuzzleDate,
    book: BookEntry,
    titles: HashSet<String>,
    record: ProgressRecord,
}

impl PuzzleSession {
    /// Bind a session to its resolved date and target, replaying the
    /// hydrated record. No side effects beyond internal assignment.
    #[must_use]
    pub fn new(
        date: PuzzleDate,
        book: BookEntry,
        titles: HashSet<String>,
        record: ProgressRecord,
    ) -> Self {
        Self {
            date,
            book,
            titles,
            record,
        }
    }

    #[must_use]
    pub const fn date(&self) -> &PuzzleDate {
        &self.date
    }

    #[must_use]
    pub const fn book(&self) -> &BookEntry {
        &self.book
    }

    /// The live record, for persistence after a mutating outcome.
    #[must_use]
    pub const fn record(&self) -> &ProgressRecord {
        &self.record
    }

    #[must_use]
    pub fn phase(&self) -> PuzzlePhase {
        if self.record.solved {
            PuzzlePhase::Solved
        } else if self.record.guesses >= MAX_GUESSES {
            PuzzlePhase::Exhausted
        } else {
            PuzzlePhase::InProgress
        }
    }

    #[must_use]
    pub const fn guesses_remaining(&self) -> u32 {
        self.record.guesses_remaining()
    }

    #[must_use]
    pub fn history(&self) -> &[String] {
        &self.record.history
    }

    /// Evaluate one guess.
    ///
    /// Terminal sessions ignore the call. Input that is empty after trimming
    /// or not a trim-exact member of the known title set is rejected without
    /// any state change. An accepted guess is logged to history, then
    /// compared against the target under article/case normalization; only an
    /// incorrect guess spends an attempt.
    pub fn submit_guess(&mut self, raw: &str) -> GuessOutcome {
        if self.phase().is_terminal() {
            return GuessOutcome::SessionTerminal;
        }
        let trimmed = raw.trim();
        if trimmed.is_empty() || !self.titles.contains(trimmed) {
            return GuessOutcome::InvalidSelection;
        }

        self.record.history.push(trimmed.to_string());
        if normalize_title(trimmed) == normalize_title(&self.book.title) {
            self.record.solved = true;
            return GuessOutcome::Correct;
        }

        self.record.guesses += 1;
        if self.record.guesses >= MAX_GUESSES {
            return GuessOutcome::Exhausted;
        }
        let stages = u32::try_from(HINT_REVEAL_SCHEDULE.len()).unwrap_or(u32::MAX);
        if stage_unlocked_at(self.record.guesses).is_some() && self.record.hints_given < stages {
            self.record.hints_given += 1;
        }
        GuessOutcome::Incorrect {
            remaining: self.record.guesses_remaining(),
        }
    }

    /// The current reveal set. Pure function of guess count and phase.
    #[must_use]
    pub fn reveal(&self) -> Reveal {
        Reveal::compute(self.record.guesses, self.phase())
    }

    /// How many table-of-contents entries are visible. Terminal sessions
    /// show the whole table; otherwise one chapter per incorrect guess plus
    /// the opening chapter, never past the end.
    #[must_use]
    pub fn visible_chapter_count(&self) -> usize {
        let total = self.book.chapters.len();
        if self.phase().is_terminal() {
            total
        } else {
            (self.record.guesses as usize + 1).min(total)
        }
    }

    /// Snapshot for the rendering layer. The only data a presenter may read.
    #[must_use]
    pub fn view_model(&self) -> PuzzleViewModel {
        PuzzleViewModel::snapshot(self)
    }
}
