//! Session state and the events it produces
//!
//! One `SessionState` per play session: created when a level is chosen,
//! reset when returning to the menu.

use serde::{Deserialize, Serialize};

use super::level::Level;
use super::problem::Problem;

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Level selection
    #[default]
    Menu,
    /// Answering questions
    Playing,
    /// Run over, result on screen until acknowledged
    Finished,
}

/// Stage of the eat animation after a correct answer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CommitStage {
    /// Tongue travelling to the bug
    Tongue,
    /// Bug swallowed and hidden
    Swallow,
}

/// Pending advance after a correct answer. Input is ignored while set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Commit {
    pub stage: CommitStage,
    /// The option being eaten
    pub option: u32,
    /// Seconds left in the current stage
    pub remaining_secs: f32,
}

/// Outcome of a finished run, fixed at the moment the run finished
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelResult {
    pub level: Level,
    pub correct_on_first_attempt: u32,
    pub questions: u32,
    pub passed: bool,
    /// New highest unlocked level if this run unlocked one
    pub unlocked: Option<u32>,
    pub new_best: bool,
}

/// Mutable state of one play session
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionState {
    pub phase: GamePhase,
    /// Meaningful once a level has been chosen
    pub selected_level: Level,
    /// Correct selections so far; incorrect ones never count
    pub questions_answered: u32,
    /// Questions answered without any wrong guess first
    pub correct_on_first_attempt: u32,
    pub has_mistaken_on_current_question: bool,
    pub current_problem: Option<Problem>,
    pub commit: Option<Commit>,
    /// Set on entering Finished
    pub result: Option<LevelResult>,
}

impl SessionState {
    /// Fresh Playing state for `level` with its first problem
    pub fn start(level: Level, problem: Problem) -> Self {
        Self {
            phase: GamePhase::Playing,
            selected_level: level,
            current_problem: Some(problem),
            ..Default::default()
        }
    }

    /// True while a correct answer is being committed
    pub fn is_processing(&self) -> bool {
        self.commit.is_some()
    }

    /// Option hidden by the swallow stage, if any
    pub fn swallowed_option(&self) -> Option<u32> {
        self.commit
            .filter(|c| c.stage == CommitStage::Swallow)
            .map(|c| c.option)
    }
}

/// Player input, one per view event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Input {
    /// Level button on the menu
    ChooseLevel(u32),
    /// Bug tapped while playing
    SelectOption(u32),
    /// Result screen dismissed
    Acknowledge,
    /// Menu button while playing
    ReturnToMenu,
}

/// Things that happened while applying input or advancing time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    LevelStarted { level: Level },
    NewProblem,
    WrongAnswer { option: u32 },
    CorrectAnswer { option: u32, first_attempt: bool },
    /// Eat animation moved from tongue to swallow
    Swallowed { option: u32 },
    LevelFinished(LevelResult),
    LevelUnlocked { highest_unlocked_level: u32 },
    ReturnedToMenu,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_menu() {
        let state = SessionState::default();
        assert_eq!(state.phase, GamePhase::Menu);
        assert!(state.current_problem.is_none());
        assert!(!state.is_processing());
    }

    #[test]
    fn test_swallowed_only_in_swallow_stage() {
        let mut state = SessionState::default();
        state.commit = Some(Commit {
            stage: CommitStage::Tongue,
            option: 8,
            remaining_secs: 0.1,
        });
        assert!(state.is_processing());
        assert_eq!(state.swallowed_option(), None);

        state.commit = Some(Commit {
            stage: CommitStage::Swallow,
            option: 8,
            remaining_secs: 0.1,
        });
        assert_eq!(state.swallowed_option(), Some(8));
    }
}
