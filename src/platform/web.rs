//! Browser entry point
//!
//! The page owns rendering and animation; it forwards taps here and
//! redraws from the returned JSON view after every call.

use wasm_bindgen::prelude::*;

use crate::persistence::{KeyValueStore, LocalStorageStore, MemoryStore};
use crate::sim::{Input, Session};

/// Game handle exported to JavaScript
#[wasm_bindgen]
pub struct WebGame {
    session: Session<Box<dyn KeyValueStore>>,
}

#[wasm_bindgen]
impl WebGame {
    #[wasm_bindgen(constructor)]
    pub fn new() -> WebGame {
        super::init_logging();

        let store: Box<dyn KeyValueStore> = match LocalStorageStore::open() {
            Ok(storage) => Box::new(storage),
            Err(e) => {
                log::warn!("{}, progress will not be kept", e);
                Box::new(MemoryStore::new())
            }
        };

        log::info!("Chameleon Math starting...");
        WebGame {
            session: Session::new(store),
        }
    }

    /// Level button pressed on the menu
    pub fn choose_level(&mut self, level: u32) -> String {
        self.session.apply(Input::ChooseLevel(level));
        self.view()
    }

    /// Bug tapped
    pub fn select_option(&mut self, option: u32) -> String {
        self.session.apply(Input::SelectOption(option));
        self.view()
    }

    pub fn acknowledge(&mut self) -> String {
        self.session.apply(Input::Acknowledge);
        self.view()
    }

    pub fn return_to_menu(&mut self) -> String {
        self.session.apply(Input::ReturnToMenu);
        self.view()
    }

    /// Advance animation time, called from requestAnimationFrame
    pub fn tick(&mut self, dt_secs: f32) -> String {
        self.session.tick(dt_secs.min(0.1));
        self.view()
    }

    /// Current view as JSON
    pub fn view(&self) -> String {
        serde_json::to_string(&self.session.view()).unwrap_or_else(|e| {
            log::error!("Failed to encode view: {}", e);
            "null".to_string()
        })
    }
}

impl Default for WebGame {
    fn default() -> Self {
        Self::new()
    }
}
