//! Sequencing for the feedback toggle/form swap.
//!
//! ```text
//! Idle --open--> HidingButton --reveal_form--> Revealing --grow_form--> Open
//! Open --close--> Collapsing --restore_button--> Restoring --finish_close--> Idle
//! ```
//!
//! `reveal_form` and `finish_close` run one `FEEDBACK_TRANSITION_MS` after
//! the step that started them, `restore_button` after `FEEDBACK_STAGGER_MS`.

use serde::{Deserialize, Serialize};
use time::{format_description::well_known::Rfc3339, OffsetDateTime};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackPhase {
    Idle,
    HidingButton,
    Revealing,
    Open,
    Collapsing,
    Restoring,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FeedbackEngine {
    phase: FeedbackPhase,
    form_height: f64,
    generation: u64,
    /// Bumped on every reset so the view remounts empty fields.
    form_revision: u64,
    confirmation: bool,
}

impl Default for FeedbackEngine {
    fn default() -> Self {
        Self {
            phase: FeedbackPhase::Idle,
            form_height: 0.0,
            generation: 0,
            form_revision: 0,
            confirmation: false,
        }
    }
}

impl FeedbackEngine {
    pub fn phase(&self) -> FeedbackPhase {
        self.phase
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn form_revision(&self) -> u64 {
        self.form_revision
    }

    pub fn is_open(&self) -> bool {
        matches!(self.phase, FeedbackPhase::Revealing | FeedbackPhase::Open)
    }

    pub fn shows_confirmation(&self) -> bool {
        self.confirmation
    }

    /// Start swapping the toggle button for the form. Ignored unless idle.
    pub fn open(&mut self) -> Option<u64> {
        if self.phase != FeedbackPhase::Idle {
            return None;
        }
        self.generation = self.generation.wrapping_add(1);
        self.phase = FeedbackPhase::HidingButton;
        self.confirmation = false;
        Some(self.generation)
    }

    /// The button has faded out: hide it and show the form at zero height.
    pub fn reveal_form(&mut self, generation: u64) -> bool {
        if !self.current(generation, FeedbackPhase::HidingButton) {
            return false;
        }
        self.phase = FeedbackPhase::Revealing;
        self.form_height = 0.0;
        true
    }

    /// Grow the form to the measured height of its fields.
    pub fn grow_form(&mut self, generation: u64, content_height: f64) -> bool {
        if !self.current(generation, FeedbackPhase::Revealing) {
            return false;
        }
        self.phase = FeedbackPhase::Open;
        self.form_height = content_height.max(0.0);
        true
    }

    /// Start collapsing the form. Ignored unless the form is open.
    pub fn close(&mut self) -> Option<u64> {
        if self.phase != FeedbackPhase::Open {
            return None;
        }
        self.generation = self.generation.wrapping_add(1);
        self.phase = FeedbackPhase::Collapsing;
        self.form_height = 0.0;
        Some(self.generation)
    }

    /// Record a submission: confirm, reset the fields, then collapse.
    pub fn submit(&mut self) -> Option<u64> {
        if self.phase != FeedbackPhase::Open {
            return None;
        }
        self.confirmation = true;
        self.form_revision = self.form_revision.wrapping_add(1);
        self.close()
    }

    /// After the stagger the toggle button fades back in.
    pub fn restore_button(&mut self, generation: u64) -> bool {
        if !self.current(generation, FeedbackPhase::Collapsing) {
            return false;
        }
        self.phase = FeedbackPhase::Restoring;
        true
    }

    /// The form has collapsed: hide it.
    pub fn finish_close(&mut self, generation: u64) -> bool {
        if !self.current(generation, FeedbackPhase::Restoring) {
            return false;
        }
        self.phase = FeedbackPhase::Idle;
        true
    }

    fn current(&self, generation: u64, phase: FeedbackPhase) -> bool {
        self.generation == generation && self.phase == phase
    }

    pub fn button_hidden(&self) -> bool {
        matches!(
            self.phase,
            FeedbackPhase::Revealing | FeedbackPhase::Open | FeedbackPhase::Collapsing
        )
    }

    pub fn button_class(&self) -> &'static str {
        match self.phase {
            FeedbackPhase::HidingButton => "feedback__toggle feedback__toggle--hiding",
            FeedbackPhase::Restoring => "feedback__toggle feedback__toggle--showing",
            _ => "feedback__toggle",
        }
    }

    pub fn form_hidden(&self) -> bool {
        matches!(self.phase, FeedbackPhase::Idle | FeedbackPhase::HidingButton)
    }

    pub fn form_class(&self) -> &'static str {
        match self.phase {
            FeedbackPhase::Open => "feedback__form feedback__form--open",
            _ => "feedback__form",
        }
    }

    /// Inline style for the form. Its height and opacity transitions live
    /// in `feedback.css`.
    pub fn form_style(&self) -> String {
        let display = if self.form_hidden() { "none" } else { "block" };
        format!(
            "display: {display}; height: {}px; overflow: hidden;",
            self.form_height
        )
    }
}

/// What the form captured. Logged as JSON; nothing leaves the page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackSubmission {
    pub name: String,
    pub email: String,
    pub message: String,
    pub submitted_at: String,
}

impl FeedbackSubmission {
    pub fn new(name: &str, email: &str, message: &str) -> Self {
        let submitted_at = OffsetDateTime::now_utc()
            .format(&Rfc3339)
            .unwrap_or_default();
        Self {
            name: name.trim().to_string(),
            email: email.trim().to_string(),
            message: message.trim().to_string(),
            submitted_at,
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
