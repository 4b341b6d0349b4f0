//! Guess normalization and the hint/reveal schedule.

use serde::{Deserialize, Serialize};

use crate::constants::{
    AUTHOR_INITIALS_THRESHOLD, GENRE_THRESHOLD, LEADING_ARTICLES, YEAR_THRESHOLD,
};
use crate::session::PuzzlePhase;

/// Kind of metadata a hint stage unlocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HintKind {
    AuthorInitials,
    Genre,
    Year,
}

/// One stage of the hint schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HintStage {
    /// Incorrect guesses required before this stage unlocks.
    pub after_incorrect: u32,
    pub kind: HintKind,
    /// Presenter-facing announcement for the stage.
    pub text: &'static str,
}

/// The fixed reveal schedule, in unlock order.
pub const HINT_REVEAL_SCHEDULE: [HintStage; 3] = [
    HintStage {
        after_incorrect: AUTHOR_INITIALS_THRESHOLD,
        kind: HintKind::AuthorInitials,
        text: "Author's initials revealed.",
    },
    HintStage {
        after_incorrect: GENRE_THRESHOLD,
        kind: HintKind::Genre,
        text: "The primary genre is revealed.",
    },
    HintStage {
        after_incorrect: YEAR_THRESHOLD,
        kind: HintKind::Year,
        text: "The publication year is revealed.",
    },
];

/// The hint stage newly unlocked at exactly this incorrect-guess count.
#[must_use]
pub fn stage_unlocked_at(incorrect_guesses: u32) -> Option<&'static HintStage> {
    HINT_REVEAL_SCHEDULE
        .iter()
        .find(|stage| stage.after_incorrect == incorrect_guesses)
}

/// Normalize a title for the correctness comparison: trim, lowercase, and
/// strip a single leading article followed by whitespace.
#[must_use]
pub fn normalize_title(raw: &str) -> String {
    let lowered = raw.trim().to_lowercase();
    for article in LEADING_ARTICLES {
        if let Some(rest) = lowered.strip_prefix(article)
            && rest.starts_with(char::is_whitespace)
        {
            return rest.trim_start().to_string();
        }
    }
    lowered
}

/// The author's initials: first letter of each whitespace-separated name
/// token, upper-cased, dot-joined.
#[must_use]
pub fn author_initials(author: &str) -> String {
    let mut out = String::new();
    for token in author.split_whitespace() {
        if let Some(first) = token.chars().next() {
            if !out.is_empty() {
                out.push(' ');
            }
            out.extend(first.to_uppercase());
            out.push('.');
        }
    }
    out
}

/// Which fields are visible, as a pure function of the incorrect-guess count
/// and the session phase. The persisted hint counter is bookkeeping only and
/// is never consulted here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reveal {
    pub author_initials: bool,
    pub author_full: bool,
    pub genre: bool,
    pub year: bool,
    pub title: bool,
    pub all_chapters: bool,
    pub source_link: bool,
}

impl Reveal {
    /// Compute the reveal set for a guess count and phase.
    #[must_use]
    pub fn compute(incorrect_guesses: u32, phase: PuzzlePhase) -> Self {
        let terminal = phase.is_terminal();
        Self {
            author_initials: !terminal && incorrect_guesses >= AUTHOR_INITIALS_THRESHOLD,
            author_full: terminal,
            genre: terminal || incorrect_guesses >= GENRE_THRESHOLD,
            year: terminal || incorrect_guesses >= YEAR_THRESHOLD,
            title: terminal,
            all_chapters: terminal,
            source_link: terminal,
        }
    }

    /// Count of revealed fields, used to check reveal monotonicity.
    #[must_use]
    pub fn revealed_count(self) -> u32 {
        [
            self.author_initials || self.author_full,
            self.genre,
            self.year,
            self.title,
            self.all_chapters,
            self.source_link,
        ]
        .into_iter()
        .map(u32::from)
        .sum()
    }
}
