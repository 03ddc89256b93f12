//! Session controller
//!
//! Drives `SessionState` from player input and elapsed time. All side
//! effects on stored progress happen inside transitions, so observing the
//! state (or rendering a view of it) any number of times changes nothing.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::level::Level;
use super::problem::generate;
use super::state::{Commit, CommitStage, GameEvent, GamePhase, Input, LevelResult, SessionState};
use crate::best_scores::BestScores;
use crate::persistence::{KeyValueStore, ProgressRecord};
use crate::settings::Settings;

/// The game: session state plus the records it reads and writes
pub struct Session<S: KeyValueStore> {
    state: SessionState,
    progress: ProgressRecord,
    best_scores: BestScores,
    settings: Settings,
    store: S,
    rng: Pcg32,
}

impl<S: KeyValueStore> Session<S> {
    /// Load settings and progress from `store`. Seeds from the settings
    /// seed when present, otherwise from the OS.
    pub fn new(store: S) -> Self {
        let settings = Settings::load(&store);
        let seed = settings.seed.unwrap_or_else(rand::random::<u64>);
        Self::with_settings(store, settings, seed)
    }

    /// Like `new`, with an explicit seed
    pub fn with_seed(store: S, seed: u64) -> Self {
        let settings = Settings::load(&store);
        Self::with_settings(store, settings, seed)
    }

    pub fn with_settings(store: S, settings: Settings, seed: u64) -> Self {
        let progress = ProgressRecord::load(&store);
        let best_scores = BestScores::load(&store);
        log::info!("Session created with seed: {}", seed);
        Self {
            state: SessionState::default(),
            progress,
            best_scores,
            settings: settings.sanitized(),
            store,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn progress(&self) -> &ProgressRecord {
        &self.progress
    }

    pub fn best_scores(&self) -> &BestScores {
        &self.best_scores
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    pub fn is_processing(&self) -> bool {
        self.state.is_processing()
    }

    /// Apply one player input
    pub fn apply(&mut self, input: Input) -> Vec<GameEvent> {
        let mut events = Vec::new();
        match (self.state.phase, input) {
            (GamePhase::Menu, Input::ChooseLevel(n)) => self.choose_level(n, &mut events),
            (GamePhase::Playing, Input::SelectOption(option)) => {
                self.select_option(option, &mut events)
            }
            (GamePhase::Playing, Input::ReturnToMenu) if self.state.is_processing() => {
                log::debug!("Ignoring return to menu while processing")
            }
            (GamePhase::Finished, Input::Acknowledge)
            | (GamePhase::Playing | GamePhase::Finished, Input::ReturnToMenu) => {
                self.return_to_menu(&mut events)
            }
            (phase, input) => log::debug!("Ignoring {:?} in {:?}", input, phase),
        }
        events
    }

    /// Advance the commit window by `dt` seconds
    pub fn tick(&mut self, dt: f32) -> Vec<GameEvent> {
        let mut events = Vec::new();
        let Some(mut commit) = self.state.commit.take() else {
            return events;
        };

        commit.remaining_secs -= dt.max(0.0);
        while commit.remaining_secs <= 0.0 {
            match commit.stage {
                CommitStage::Tongue => {
                    commit.stage = CommitStage::Swallow;
                    commit.remaining_secs += self.settings.effective_swallow_secs();
                    events.push(GameEvent::Swallowed {
                        option: commit.option,
                    });
                }
                CommitStage::Swallow => {
                    self.advance(&mut events);
                    return events;
                }
            }
        }

        self.state.commit = Some(commit);
        events
    }

    fn choose_level(&mut self, n: u32, events: &mut Vec<GameEvent>) {
        let Some(level) = Level::new(n) else {
            log::debug!("Ignoring unknown level {}", n);
            return;
        };
        if !self.progress.is_unlocked(level) {
            log::debug!(
                "Level {} is locked (highest unlocked {})",
                level,
                self.progress.highest_unlocked_level()
            );
            return;
        }

        let problem = generate(level, &mut self.rng);
        self.state = SessionState::start(level, problem);
        log::info!("Started level {}", level);
        events.push(GameEvent::LevelStarted { level });
        events.push(GameEvent::NewProblem);
    }

    fn select_option(&mut self, option: u32, events: &mut Vec<GameEvent>) {
        if self.state.is_processing() {
            log::debug!("Ignoring option {} while processing", option);
            return;
        }
        let Some(problem) = &self.state.current_problem else {
            return;
        };

        if !problem.is_correct(option) {
            self.state.has_mistaken_on_current_question = true;
            events.push(GameEvent::WrongAnswer { option });
            return;
        }

        let first_attempt = !self.state.has_mistaken_on_current_question;
        if first_attempt {
            self.state.correct_on_first_attempt += 1;
        }
        self.state.questions_answered += 1;
        self.state.has_mistaken_on_current_question = false;
        self.state.commit = Some(Commit {
            stage: CommitStage::Tongue,
            option,
            remaining_secs: self.settings.effective_tongue_secs(),
        });
        events.push(GameEvent::CorrectAnswer {
            option,
            first_attempt,
        });
    }

    /// End of the commit window: next question or finish
    fn advance(&mut self, events: &mut Vec<GameEvent>) {
        if self.state.questions_answered >= self.settings.questions_per_level {
            self.finish(events);
            return;
        }
        self.state.current_problem = Some(generate(self.state.selected_level, &mut self.rng));
        self.state.has_mistaken_on_current_question = false;
        events.push(GameEvent::NewProblem);
    }

    /// Enter Finished. Runs once per run; the only place progress is written.
    fn finish(&mut self, events: &mut Vec<GameEvent>) {
        let level = self.state.selected_level;
        let score = self.state.correct_on_first_attempt;
        let questions = self.state.questions_answered;
        let passed = score >= self.settings.pass_threshold;

        let mut unlocked = None;
        if passed && self.progress.unlock_after(level) {
            let highest = self.progress.highest_unlocked_level();
            if let Err(e) = self.progress.save(&mut self.store) {
                log::warn!("Progress not saved, keeping unlock in memory: {}", e);
            }
            log::info!("Unlocked up to level {}", highest);
            unlocked = Some(highest);
        }

        let new_best = self.best_scores.record(level, score, questions);
        if new_best {
            if let Err(e) = self.best_scores.save(&mut self.store) {
                log::warn!("Best scores not saved: {}", e);
            }
        }

        let result = LevelResult {
            level,
            correct_on_first_attempt: score,
            questions,
            passed,
            unlocked,
            new_best,
        };
        log::info!(
            "Finished level {}: {}/{} first try ({})",
            level,
            score,
            questions,
            if passed { "passed" } else { "not passed" }
        );

        self.state.phase = GamePhase::Finished;
        self.state.current_problem = None;
        self.state.result = Some(result);
        events.push(GameEvent::LevelFinished(result));
        if let Some(highest_unlocked_level) = unlocked {
            events.push(GameEvent::LevelUnlocked {
                highest_unlocked_level,
            });
        }
    }

    fn return_to_menu(&mut self, events: &mut Vec<GameEvent>) {
        if self.state.phase == GamePhase::Playing {
            log::info!(
                "Left level {} after {} questions",
                self.state.selected_level,
                self.state.questions_answered
            );
        }
        self.state = SessionState::default();
        events.push(GameEvent::ReturnedToMenu);
    }
}
