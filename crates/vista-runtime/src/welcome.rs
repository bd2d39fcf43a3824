//! Welcome view model
//!
//! The pre-session screen with a single start button. Once the session
//! starts the view stays mounted underneath the call but stops taking input.

use vista_core::AppConfig;

/// Stacking order while the view is interactive
pub const WELCOME_Z_ACTIVE: i32 = 20;
/// Stacking order once the session has started
pub const WELCOME_Z_INERT: i32 = 10;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WelcomeView {
    start_button_text: String,
    disabled: bool,
}

impl WelcomeView {
    pub fn new(config: &AppConfig) -> Self {
        WelcomeView {
            start_button_text: config.start_button_text.clone(),
            disabled: false,
        }
    }

    pub fn start_button_text(&self) -> &str {
        &self.start_button_text
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn z_index(&self) -> i32 {
        if self.disabled {
            WELCOME_Z_INERT
        } else {
            WELCOME_Z_ACTIVE
        }
    }

    /// Press the start button. Returns false if the view is already inert.
    pub fn start(&mut self) -> bool {
        if self.disabled {
            return false;
        }
        self.disabled = true;
        true
    }

    /// Session ended, accept input again
    pub fn reset(&mut self) {
        self.disabled = false;
    }
}
