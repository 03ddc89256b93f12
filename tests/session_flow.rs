use chameleon_math::{
    GameEvent, GamePhase, Input, KeyValueStore, MemoryStore, ProgressRecord, Session, Settings,
};

fn instant_session(store: MemoryStore, seed: u64) -> Session<MemoryStore> {
    let settings = Settings {
        reduced_motion: true,
        ..Default::default()
    };
    Session::with_settings(store, settings, seed)
}

fn play_level(session: &mut Session<MemoryStore>, level: u32, mistakes_per_question: &[usize]) {
    session.apply(Input::ChooseLevel(level));
    assert_eq!(session.phase(), GamePhase::Playing);

    for &mistakes in mistakes_per_question {
        let problem = session.state().current_problem.clone().unwrap();
        let wrong = problem
            .options()
            .iter()
            .copied()
            .find(|&o| o != problem.correct_answer())
            .unwrap();
        for _ in 0..mistakes {
            session.apply(Input::SelectOption(wrong));
        }
        session.apply(Input::SelectOption(problem.correct_answer()));
        session.tick(0.0);
    }
}

#[test]
fn test_progress_persists_across_sessions() {
    let mut session = instant_session(MemoryStore::new(), 11);
    play_level(&mut session, 1, &[0; 10]);
    assert_eq!(session.phase(), GamePhase::Finished);
    session.apply(Input::Acknowledge);

    let store = session.into_store();
    assert_eq!(
        store.get(ProgressRecord::STORAGE_KEY).unwrap().as_deref(),
        Some("2")
    );

    // A new visit reads the unlocked level back
    let mut session = instant_session(store, 12);
    assert_eq!(session.view().highest_unlocked_level, 2);
    assert!(!session.view().levels[1].locked);
    assert!(session.view().levels[2].locked);
    play_level(&mut session, 2, &[0, 0, 0, 0, 0, 0, 0, 1, 1, 1]);
    assert_eq!(session.progress().highest_unlocked_level(), 3);
}

#[test]
fn test_climb_all_levels() {
    let mut session = instant_session(MemoryStore::new(), 2024);
    for level in 1..=12 {
        play_level(&mut session, level, &[0; 10]);
        let result = session.state().result.unwrap();
        assert!(result.passed);
        assert_eq!(result.unlocked, Some(level + 1));
        session.apply(Input::Acknowledge);
    }
    assert_eq!(session.progress().highest_unlocked_level(), 13);
    assert!(session.view().levels.iter().all(|l| !l.locked));
}

#[test]
fn test_failed_run_keeps_lock() {
    let mut store = MemoryStore::new();
    ProgressRecord::new(3).save(&mut store).unwrap();
    let mut session = instant_session(store, 5);

    play_level(&mut session, 3, &[1, 1, 1, 1, 0, 0, 0, 0, 0, 0]);
    let result = session.state().result.unwrap();
    assert_eq!(result.correct_on_first_attempt, 6);
    assert!(!result.passed);

    session.apply(Input::Acknowledge);
    assert!(session.apply(Input::ChooseLevel(4)).is_empty());
    assert_eq!(session.phase(), GamePhase::Menu);
}

#[test]
fn test_finish_events_emitted_once() {
    let mut session = instant_session(MemoryStore::new(), 8);
    session.apply(Input::ChooseLevel(1));

    let mut finished = 0;
    let mut unlocked = 0;
    for _ in 0..10 {
        let answer = session.state().current_problem.as_ref().unwrap().correct_answer();
        let mut events = session.apply(Input::SelectOption(answer));
        events.extend(session.tick(0.0));
        events.extend(session.tick(0.0));
        for event in events {
            match event {
                GameEvent::LevelFinished(_) => finished += 1,
                GameEvent::LevelUnlocked { .. } => unlocked += 1,
                _ => {}
            }
        }
    }
    assert_eq!((finished, unlocked), (1, 1));
}
