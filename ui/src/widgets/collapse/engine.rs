//! State machine behind [`CollapsePanel`](super::CollapsePanel).
//!
//! The engine never touches the DOM. The view feeds it measurements and
//! frame/timer ticks and renders [`PanelEngine::content_style`]. Every
//! toggle bumps `generation`; ticks scheduled under an older generation are
//! dropped, so rapid toggling cannot apply a stale step.
//!
//! The height transition itself is declared in `collapse_panel.css`; the
//! inline style only carries `display` and `height`.

/// Inline height of the content container.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Height {
    Auto,
    Px(f64),
}

impl Height {
    pub fn css(self) -> String {
        match self {
            Height::Auto => "auto".to_string(),
            Height::Px(px) => format!("{}px", px.max(0.0)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelPhase {
    Collapsed,
    Expanding,
    Expanded,
    Collapsing,
}

/// Returned by [`PanelEngine::toggle`]; the view schedules the follow-up
/// steps for this generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelStep {
    pub generation: u64,
    pub opening: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PanelEngine {
    open: bool,
    phase: PanelPhase,
    height: Height,
    hidden: bool,
    /// Set once the target height of the running transition is applied.
    armed: bool,
    generation: u64,
}

impl Default for PanelEngine {
    fn default() -> Self {
        Self::new(false)
    }
}

impl PanelEngine {
    pub fn new(open: bool) -> Self {
        if open {
            Self {
                open,
                phase: PanelPhase::Expanded,
                height: Height::Auto,
                hidden: false,
                armed: false,
                generation: 0,
            }
        } else {
            Self {
                open,
                phase: PanelPhase::Collapsed,
                height: Height::Px(0.0),
                hidden: true,
                armed: false,
                generation: 0,
            }
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn phase(&self) -> PanelPhase {
        self.phase
    }

    pub fn height(&self) -> Height {
        self.height
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// True once the target height is on the container and the panel is
    /// waiting for the transition to finish.
    pub fn awaiting_transition_end(&self) -> bool {
        self.armed
    }

    pub fn aria_expanded(&self) -> &'static str {
        if self.open {
            "true"
        } else {
            "false"
        }
    }

    pub fn aria_hidden(&self) -> &'static str {
        if self.open {
            "false"
        } else {
            "true"
        }
    }

    /// Flip the open flag. ARIA state changes immediately; the height
    /// follows through [`apply_measured`](Self::apply_measured),
    /// [`collapse_to_zero`](Self::collapse_to_zero) and [`settle`](Self::settle).
    pub fn toggle(&mut self) -> PanelStep {
        self.open = !self.open;
        self.generation = self.generation.wrapping_add(1);
        self.armed = false;

        if self.open {
            self.phase = PanelPhase::Expanding;
            self.hidden = false;
            self.height = Height::Px(0.0);
        } else {
            self.phase = PanelPhase::Collapsing;
        }

        PanelStep {
            generation: self.generation,
            opening: self.open,
        }
    }

    /// Force the open state, toggling only when it differs.
    pub fn set_open(&mut self, open: bool) -> Option<PanelStep> {
        (self.open != open).then(|| self.toggle())
    }

    /// Feed the natural content height. Expanding panels grow to it;
    /// collapsing panels pin it so the following step has a start value.
    pub fn apply_measured(&mut self, generation: u64, content_height: f64) -> bool {
        if generation != self.generation {
            return false;
        }
        match self.phase {
            PanelPhase::Expanding => {
                self.height = Height::Px(content_height.max(0.0));
                self.armed = true;
                true
            }
            PanelPhase::Collapsing => {
                self.height = Height::Px(content_height.max(0.0));
                true
            }
            PanelPhase::Collapsed | PanelPhase::Expanded => false,
        }
    }

    /// Start the collapse transition towards zero height.
    pub fn collapse_to_zero(&mut self, generation: u64) -> bool {
        if generation != self.generation || self.phase != PanelPhase::Collapsing {
            return false;
        }
        self.height = Height::Px(0.0);
        self.armed = true;
        true
    }

    /// Finish the running transition. Safe to call more than once; only the
    /// first call after the target height is applied has an effect.
    pub fn settle(&mut self, generation: u64) -> bool {
        if generation != self.generation || !self.armed {
            return false;
        }
        match self.phase {
            PanelPhase::Expanding => {
                self.phase = PanelPhase::Expanded;
                self.height = Height::Auto;
            }
            PanelPhase::Collapsing => {
                self.phase = PanelPhase::Collapsed;
                self.hidden = true;
            }
            PanelPhase::Collapsed | PanelPhase::Expanded => return false,
        }
        self.armed = false;
        true
    }

    /// `transitionend` on the content container. Only the container's own
    /// height transition settles the panel.
    pub fn transition_end(&mut self, property: &str) -> bool {
        if property != "height" {
            return false;
        }
        self.settle(self.generation)
    }

    /// Inline style for the content container.
    pub fn content_style(&self) -> String {
        let display = if self.hidden { "none" } else { "block" };
        format!(
            "display: {display}; height: {}; overflow: hidden;",
            self.height.css()
        )
    }
}
