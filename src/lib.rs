//! Chameleon Math - arithmetic practice where a chameleon eats the right answer
//!
//! Core modules:
//! - `sim`: Problem generation and the session state machine
//! - `persistence`: Key-value storage of progress and records
//! - `settings`: Rules, timing and accessibility preferences
//! - `view`: Render-ready session snapshots
//! - `platform`: Logging setup and the browser binding

pub mod best_scores;
pub mod persistence;
pub mod platform;
pub mod settings;
pub mod sim;
pub mod view;

pub use best_scores::BestScores;
pub use persistence::{KeyValueStore, MemoryStore, ProgressRecord, StorageError};
pub use settings::Settings;
pub use sim::{GameEvent, GamePhase, Input, Level, Problem, Session};
pub use view::SessionView;

/// Game rule constants
pub mod consts {
    /// Number of playable levels
    pub const LEVEL_COUNT: u32 = 12;
    /// Answer options shown per problem
    pub const OPTION_COUNT: usize = 4;
    /// Correct answers that complete a level
    pub const QUESTIONS_PER_LEVEL: u32 = 10;
    /// First-attempt answers needed to pass a level
    pub const PASS_THRESHOLD: u32 = 7;
    /// Distractor draws before falling back to consecutive values
    pub const MAX_DISTRACTOR_DRAWS: u32 = 4096;
}
