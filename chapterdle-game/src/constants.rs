//! Centralized tuning constants for Chapterdle game logic.
//!
//! These values define the guess budget and reveal pacing for the daily
//! puzzle. Keeping them together ensures that gameplay can only be adjusted
//! via code changes reviewed in version control, rather than through
//! external JSON assets.

// Guess budget --------------------------------------------------------------
pub const MAX_GUESSES: u32 = 5;

// Reveal thresholds (incorrect guesses needed to unlock each field) ---------
pub(crate) const AUTHOR_INITIALS_THRESHOLD: u32 = 2;
pub(crate) const GENRE_THRESHOLD: u32 = 3;
pub(crate) const YEAR_THRESHOLD: u32 = 4;

// Guess normalization -------------------------------------------------------
/// Leading articles stripped (once, with trailing whitespace) before
/// comparing a guess against the target title. Order matters: a bare `a`
/// match is only taken when the next character is whitespace, so `an` still
/// gets its turn.
pub(crate) const LEADING_ARTICLES: [&str; 3] = ["the", "a", "an"];

// Persistence ---------------------------------------------------------------
/// Storage keys are this prefix plus the ISO puzzle date.
pub(crate) const SAVE_KEY_PREFIX: &str = "chapterGuesserSave-";

// Date handling -------------------------------------------------------------
pub(crate) const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

// View-model placeholders ---------------------------------------------------
pub(crate) const PLACEHOLDER_TITLE: &str = "???";
pub(crate) const PLACEHOLDER_FIELD: &str = "[??]";
