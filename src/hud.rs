//! Score display collaborator
//!
//! The round reports every score change and the final score; how that is
//! shown (DOM overlay, log lines) is up to the host.

/// Receives score and game-over updates from a round
pub trait Hud {
    /// Current score changed (also called with 0 on round start)
    fn show_score(&mut self, score: u64);

    /// Round ended with this score
    fn show_game_over(&mut self, final_score: u64);

    /// A new round started; dismiss any game-over display
    fn hide_game_over(&mut self);
}

/// Keeps the last reported values and echoes them to the log
#[derive(Debug, Clone, Default)]
pub struct LogHud {
    pub score: u64,
    /// Set while the game-over display is showing
    pub final_score: Option<u64>,
    /// Number of score updates received
    pub updates: usize,
}

impl Hud for LogHud {
    fn show_score(&mut self, score: u64) {
        self.score = score;
        self.updates += 1;
        log::debug!("Score: {}", score);
    }

    fn show_game_over(&mut self, final_score: u64) {
        self.final_score = Some(final_score);
        log::info!("Game over! Final score: {}", final_score);
    }

    fn hide_game_over(&mut self) {
        self.final_score = None;
    }
}

/// `#score`, `#modal` and `#final-score` elements of the game page
#[cfg(target_arch = "wasm32")]
pub struct DomHud {
    score: Option<web_sys::Element>,
    modal: Option<web_sys::Element>,
    final_score: Option<web_sys::Element>,
}

#[cfg(target_arch = "wasm32")]
impl DomHud {
    pub fn from_document(document: &web_sys::Document) -> Self {
        let score = document.get_element_by_id("score");
        let modal = document.get_element_by_id("modal");
        let final_score = document.get_element_by_id("final-score");
        if score.is_none() || modal.is_none() || final_score.is_none() {
            log::warn!("HUD elements missing; score display disabled");
        }
        Self {
            score,
            modal,
            final_score,
        }
    }
}

#[cfg(target_arch = "wasm32")]
impl Hud for DomHud {
    fn show_score(&mut self, score: u64) {
        if let Some(el) = &self.score {
            el.set_inner_html(&score.to_string());
        }
    }

    fn show_game_over(&mut self, final_score: u64) {
        if let Some(el) = &self.final_score {
            el.set_inner_html(&final_score.to_string());
        }
        if let Some(el) = &self.modal {
            let _ = el.set_attribute("style", "display: flex");
        }
    }

    fn hide_game_over(&mut self) {
        if let Some(el) = &self.final_score {
            el.set_inner_html("0");
        }
        if let Some(el) = &self.modal {
            let _ = el.set_attribute("style", "display: none");
        }
    }
}
