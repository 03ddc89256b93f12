//! Game logic
//!
//! Everything here is independent of rendering and platform:
//! - Seeded RNG only
//! - Time advances only through `Session::tick`
//! - Storage only through `KeyValueStore`

pub mod level;
pub mod problem;
pub mod session;
pub mod state;

pub use level::{Band, Level, OperatorMode};
pub use problem::{Operator, Problem, generate};
pub use session::Session;
pub use state::{
    Commit, CommitStage, GameEvent, GamePhase, Input, LevelResult, SessionState,
};
