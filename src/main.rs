//! Chameleon Math entry point
//!
//! The browser build is driven from JavaScript through `platform::web`.
//! Natively this runs a terminal version over an in-memory store.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use std::io::{self, BufRead, Write};

    use chameleon_math::{GameEvent, GamePhase, Input, MemoryStore, Session};

    chameleon_math::platform::init_logging();
    log::info!("Chameleon Math (native) starting...");

    let mut session = Session::new(MemoryStore::new());
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print_view(&session.view());
        print!("> ");
        let _ = io::stdout().flush();

        let Some(Ok(line)) = lines.next() else {
            break;
        };
        let line = line.trim();
        if line == "q" {
            break;
        }

        let input = match session.phase() {
            GamePhase::Menu => line.parse().ok().map(Input::ChooseLevel),
            GamePhase::Playing if line == "m" => Some(Input::ReturnToMenu),
            GamePhase::Playing => line.parse().ok().map(Input::SelectOption),
            GamePhase::Finished => Some(Input::Acknowledge),
        };
        let Some(input) = input else {
            println!("?");
            continue;
        };

        let mut events = session.apply(input);
        // No animation to wait for in a terminal
        let settings = session.settings();
        let commit_secs = settings.effective_tongue_secs() + settings.effective_swallow_secs();
        events.extend(session.tick(commit_secs));

        for event in events {
            match event {
                GameEvent::WrongAnswer { .. } => println!("Not that one, try again!"),
                GameEvent::CorrectAnswer { .. } => println!("Yum!"),
                GameEvent::LevelUnlocked {
                    highest_unlocked_level,
                } => println!("Level {} unlocked!", highest_unlocked_level),
                _ => {}
            }
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn print_view(view: &chameleon_math::SessionView) {
    use chameleon_math::GamePhase;

    println!();
    match view.phase {
        GamePhase::Menu => {
            println!("Chameleon Math");
            if let Some(level) = view.last_passed_level {
                println!("Last level passed: {}", level);
            }
            for level in &view.levels {
                println!("  {}", level.label());
            }
            println!("Pick a level (q to quit)");
        }
        GamePhase::Playing => {
            let stars: String = view
                .stars
                .iter()
                .map(|&filled| if filled { '*' } else { '.' })
                .collect();
            println!("Level {}  [{}]", view.selected_level, stars);
            if let Some(problem) = &view.problem {
                println!("  {}", problem.question);
                let options: Vec<String> = problem.options.iter().map(u32::to_string).collect();
                println!("  Bugs: {}", options.join("   "));
            }
            println!("Type the answer (m for menu)");
        }
        GamePhase::Finished => {
            if let Some(result) = &view.result {
                println!(
                    "Level {} done: {}/{} right on the first try",
                    result.level, result.correct_on_first_attempt, result.questions
                );
                if result.passed {
                    println!("Well done, level passed!");
                } else {
                    println!("Almost! Try again to pass.");
                }
            }
            println!("Press enter to continue");
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is platform::web::WebGame, this is just to satisfy the compiler
}
