//! Chapterdle Game Engine
//!
//! Platform-agnostic core logic for the Chapterdle daily book-guessing
//! puzzle. This crate provides daily-target resolution, guess evaluation,
//! the hint/reveal schedule, and per-day progress persistence without UI or
//! platform-specific dependencies.

use thiserror::Error;

pub mod catalog;
pub mod constants;
pub mod date;
pub mod progress;
pub mod reveal;
pub mod session;
pub mod view;

// Re-export commonly used types
pub use catalog::{BookEntry, Catalog, CatalogData, CatalogError, ScheduleEntry};
pub use constants::MAX_GUESSES;
pub use date::{ArchiveNav, DateParseError, PuzzleDate, resolve_puzzle_date};
pub use progress::{ProgressRecord, ProgressStore};
pub use reveal::{
    HINT_REVEAL_SCHEDULE, HintKind, HintStage, Reveal, author_initials, normalize_title,
    stage_unlocked_at,
};
pub use session::{GuessOutcome, PuzzlePhase, PuzzleSession};
pub use view::{PuzzleViewModel, TitleTone};

/// Trait for abstracting catalog loading.
/// Platform-specific implementations should provide this.
pub trait CatalogSource {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Load the full catalog document from the platform-specific source.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog cannot be loaded or parsed.
    fn load_catalog(&self) -> Result<CatalogData, Self::Error>;
}

/// Trait for abstracting the durable per-day key-value store.
/// Platform-specific implementations should provide this (e.g. browser
/// `localStorage`); every operation must complete before returning.
pub trait ProgressStorage {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Read the raw value stored under a key.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn read(&self, key: &str) -> Result<Option<String>, Self::Error>;

    /// Overwrite the value stored under a key.
    ///
    /// # Errors
    ///
    /// Returns an error if the value cannot be written.
    fn write(&self, key: &str, value: &str) -> Result<(), Self::Error>;

    /// Delete the value stored under a key.
    ///
    /// # Errors
    ///
    /// Returns an error if the value cannot be deleted.
    fn delete(&self, key: &str) -> Result<(), Self::Error>;

    /// Clear the whole store.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be cleared.
    fn clear(&self) -> Result<(), Self::Error>;
}

/// Errors surfaced by [`PuzzleEngine`] operations.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The catalog source failed; nothing is guessable.
    #[error("catalog source failed: {0}")]
    CatalogLoad(anyhow::Error),
    /// The catalog document violated its invariants.
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    /// No puzzle is configured for the resolved date.
    #[error("no puzzle scheduled for {date}")]
    ScheduleGap { date: PuzzleDate },
    /// The progress backend rejected a write.
    #[error("progress storage failed: {0}")]
    Storage(anyhow::Error),
}

/// Composition root binding the validated catalog to a progress store.
///
/// The catalog is loaded exactly once, at [`PuzzleEngine::bootstrap`]; a
/// load or validation failure is fatal and no session logic runs. All
/// operations after bootstrap are synchronous.
pub struct PuzzleEngine<S>
where
    S: ProgressStorage,
{
    catalog: Catalog,
    progress: ProgressStore<S>,
}

impl<S> PuzzleEngine<S>
where
    S: ProgressStorage,
{
    /// Load and validate the catalog, then wire up the progress store.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog cannot be loaded or fails validation.
    pub fn bootstrap<L>(source: &L, storage: S) -> Result<Self, EngineError>
    where
        L: CatalogSource,
    {
        let data = source
            .load_catalog()
            .map_err(|err| EngineError::CatalogLoad(anyhow::Error::new(err)))?;
        let catalog = Catalog::from_data(data)?;
        Ok(Self {
            catalog,
            progress: ProgressStore::new(storage),
        })
    }

    /// Borrow the validated catalog.
    #[must_use]
    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Open the session for a navigation request.
    ///
    /// Resolves the active date (clamping future requests to `today`),
    /// finds the scheduled book, and hydrates prior progress so a revisit
    /// reproduces the exact prior state.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::ScheduleGap`] when the resolved date has no
    /// puzzle configured.
    pub fn open_session(
        &self,
        requested: Option<&str>,
        today: PuzzleDate,
    ) -> Result<PuzzleSession, EngineError> {
        let date = resolve_puzzle_date(requested, today);
        let book = self
            .catalog
            .daily_book(&date)
            .ok_or(EngineError::ScheduleGap { date })?
            .clone();
        let record = self.progress.load(&date);
        Ok(PuzzleSession::new(
            date,
            book,
            self.catalog.title_set().clone(),
            record,
        ))
    }

    /// Evaluate one guess and persist any resulting state change.
    ///
    /// Rejected input (`InvalidSelection`, `SessionTerminal`) is never
    /// persisted; accepted guesses are saved before this returns, so a
    /// guess followed immediately by a reload never loses state.
    ///
    /// # Errors
    ///
    /// Returns an error if the progress backend rejects the save. The
    /// in-memory session keeps the new state either way.
    pub fn submit_guess(
        &self,
        session: &mut PuzzleSession,
        raw: &str,
    ) -> Result<GuessOutcome, EngineError> {
        let outcome = session.submit_guess(raw);
        if outcome.mutates_state() {
            self.progress
                .save(session.date(), session.record())
                .map_err(EngineError::Storage)?;
        }
        Ok(outcome)
    }

    /// Clear all stored progress, for every date at once.
    ///
    /// # Errors
    ///
    /// Returns an error if the progress backend rejects the clear.
    pub fn reset_all_progress(&self) -> Result<(), EngineError> {
        self.progress.reset_all().map_err(EngineError::Storage)
    }

    /// Archive navigation data for the active date.
    #[must_use]
    pub fn archive_nav(&self, date: &PuzzleDate, today: PuzzleDate) -> ArchiveNav {
        let previous = date.previous();
        let next = date.next();
        ArchiveNav {
            previous,
            next,
            previous_available: previous
                .is_some_and(|day| self.catalog.schedule_for(&day).is_some()),
            next_available: next.is_some_and(|day| day <= today),
            is_today: *date == today,
        }
    }
}
