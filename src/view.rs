//! Render-ready snapshot of a session
//!
//! Everything a view layer needs to draw one frame, computed on demand.
//! Building a view never mutates the session.

use serde::Serialize;

use crate::persistence::KeyValueStore;
use crate::sim::{Band, GamePhase, Level, LevelResult, Problem, Session};

/// One button on the level menu
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LevelInfo {
    pub number: u32,
    pub title: String,
    pub band: Band,
    pub locked: bool,
    /// Best first-attempt score, if finished before
    pub best: Option<u32>,
}

impl LevelInfo {
    pub fn label(&self) -> String {
        if self.locked {
            format!("{} 🔒", self.title)
        } else if let Some(best) = self.best {
            format!("{} ⭐ {}", self.title, best)
        } else {
            self.title.clone()
        }
    }
}

/// Current problem as displayed
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProblemView {
    pub question: String,
    pub options: Vec<u32>,
}

impl From<&Problem> for ProblemView {
    fn from(problem: &Problem) -> Self {
        Self {
            question: problem.display(),
            options: problem.options().to_vec(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionView {
    pub phase: GamePhase,
    pub selected_level: u32,
    pub highest_unlocked_level: u32,
    pub last_passed_level: Option<u32>,
    pub levels: Vec<LevelInfo>,
    pub problem: Option<ProblemView>,
    pub questions_answered: u32,
    /// Filled/empty star per question of the run
    pub stars: Vec<bool>,
    /// Input is being ignored until the eat animation ends
    pub is_processing: bool,
    /// Option to hide while it is being swallowed
    pub swallowed_option: Option<u32>,
    pub result: Option<LevelResult>,
}

impl<S: KeyValueStore> Session<S> {
    pub fn view(&self) -> SessionView {
        let state = self.state();
        let progress = self.progress();
        let questions = self.settings().questions_per_level;

        let levels = Level::all()
            .map(|level| LevelInfo {
                number: level.get(),
                title: level.title(),
                band: level.band(),
                locked: !progress.is_unlocked(level),
                best: self
                    .best_scores()
                    .get(level)
                    .map(|e| e.correct_on_first_attempt),
            })
            .collect();

        SessionView {
            phase: state.phase,
            selected_level: state.selected_level.get(),
            highest_unlocked_level: progress.highest_unlocked_level(),
            last_passed_level: progress.last_passed_level(),
            levels,
            problem: state.current_problem.as_ref().map(ProblemView::from),
            questions_answered: state.questions_answered,
            stars: (0..questions).map(|i| i < state.questions_answered).collect(),
            is_processing: state.is_processing(),
            swallowed_option: state.swallowed_option(),
            result: state.result,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::{MemoryStore, ProgressRecord};
    use crate::settings::Settings;
    use crate::sim::Input;

    #[test]
    fn test_menu_view_lock_status() {
        let mut store = MemoryStore::new();
        ProgressRecord::new(4).save(&mut store).unwrap();
        let session = Session::with_seed(store, 1);
        let view = session.view();

        assert_eq!(view.phase, GamePhase::Menu);
        assert_eq!(view.highest_unlocked_level, 4);
        assert_eq!(view.last_passed_level, Some(3));
        assert_eq!(view.levels.len(), 12);
        let locked: Vec<bool> = view.levels.iter().map(|l| l.locked).collect();
        assert_eq!(locked[..5], [false, false, false, false, true]);
        assert!(view.levels[11].label().ends_with("🔒"));
        assert!(view.problem.is_none());
    }

    #[test]
    fn test_playing_view_stars() {
        let settings = Settings {
            reduced_motion: true,
            ..Default::default()
        };
        let mut session = Session::with_settings(MemoryStore::new(), settings, 2);
        session.apply(Input::ChooseLevel(1));
        for _ in 0..3 {
            let answer = session.state().current_problem.as_ref().unwrap().correct_answer();
            session.apply(Input::SelectOption(answer));
            session.tick(0.0);
        }

        let view = session.view();
        assert_eq!(view.phase, GamePhase::Playing);
        assert_eq!(view.questions_answered, 3);
        assert_eq!(view.stars.iter().filter(|&&s| s).count(), 3);
        assert_eq!(view.stars.len(), 10);
        let problem = view.problem.unwrap();
        assert!(problem.question.ends_with("= ?"));
        assert_eq!(problem.options.len(), 4);
    }

    #[test]
    fn test_view_serializes() {
        let session = Session::with_seed(MemoryStore::new(), 3);
        let json = serde_json::to_string(&session.view()).unwrap();
        assert!(json.contains("\"phase\":\"Menu\""));
        assert!(json.contains("\"highest_unlocked_level\":1"));
    }
}
