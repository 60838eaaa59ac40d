use ratatui::layout::Size;
use ratatui::style::Color;
use strum::Display as StrumDisplay;

use crate::config::HoldConfig;
use crate::extent::Extent;

/// Where the wrapper is in its hold lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, StrumDisplay)]
pub enum Phase {
    /// The hold is due, but the target is still rendered for one cycle so
    /// its geometry can be captured.
    HeldCopying,
    /// The holder is shown in place of the target.
    HeldSettled,
    /// The target is rendered directly.
    Released,
}

/// What the wrapper must do in response to a lifecycle input, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, StrumDisplay)]
pub enum Effect {
    /// Signal the target that it is about to be replaced.
    Refit,
    /// Signal the target that it is visible again.
    Undo,
    /// Snapshot the target node's style through the probe.
    Capture,
    /// Write the pending snapshot onto the holder's shadow node.
    ApplyCapture,
    /// Refresh the holder size from a live measurement.
    Remeasure,
    /// Release the resize subscription.
    Release,
}

pub type Effects = Vec<Effect>;

/// Lifecycle inputs, fed to the machine by the engine adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    /// Construction-time evaluation of the hold condition.
    Activate { holds: bool },
    /// The wrapper was attached to the render tree.
    Mount,
    /// A props update re-evaluated the hold condition.
    Update { holds: bool },
    /// The render for the previous input was committed.
    Commit { capture_pending: bool },
    /// The viewport changed size.
    Resize,
    /// The wrapper is being detached for good.
    Deactivate,
}

/// The hold state machine: a pure reducer over lifecycle inputs.
///
/// The machine owns the hold phase and the holder's rendered size/color;
/// it never touches the probe, the refit controller, or the render tree
/// itself. It answers each input with the effects the adapter has to
/// carry out, in order.
#[derive(Debug)]
pub struct HoldMachine {
    phase: Phase,
    color: Color,
    width: Option<Extent>,
    height: Option<Extent>,
    explicit_width: bool,
    explicit_height: bool,
}

impl HoldMachine {
    pub fn new(config: &HoldConfig, color: Color) -> Self {
        Self {
            phase: Phase::HeldCopying,
            color,
            width: config.width.clone(),
            height: config.height.clone(),
            explicit_width: config.width.is_some(),
            explicit_height: config.height.is_some(),
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_held(&self) -> bool {
        matches!(self.phase, Phase::HeldCopying | Phase::HeldSettled)
    }

    pub fn is_settled(&self) -> bool {
        self.phase == Phase::HeldSettled
    }

    /// Whether the target (rather than the holder) is rendered right now.
    /// During the copying window the target stays up so the probe can
    /// measure it.
    pub fn renders_target(&self) -> bool {
        matches!(self.phase, Phase::Released | Phase::HeldCopying)
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn width(&self) -> Option<&Extent> {
        self.width.as_ref()
    }

    pub fn height(&self) -> Option<&Extent> {
        self.height.as_ref()
    }

    fn wants_measurement(&self) -> bool {
        !(self.explicit_width && self.explicit_height)
    }

    pub fn apply(&mut self, input: Input) -> Effects {
        let effects = match input {
            Input::Activate { holds: true } => {
                self.phase = Phase::HeldCopying;
                vec![Effect::Refit]
            }
            Input::Activate { holds: false } => {
                self.phase = Phase::Released;
                vec![Effect::Undo]
            }
            Input::Mount => match self.phase {
                Phase::HeldCopying => {
                    self.phase = Phase::HeldSettled;
                    vec![Effect::Capture]
                }
                _ => vec![],
            },
            // A true condition re-arms the capture window unconditionally,
            // even if the wrapper was already holding.
            Input::Update { holds: true } => {
                self.phase = Phase::HeldCopying;
                vec![]
            }
            Input::Update { holds: false } => {
                self.phase = Phase::Released;
                vec![Effect::Undo]
            }
            Input::Commit { capture_pending } => match self.phase {
                Phase::HeldCopying => {
                    self.phase = Phase::HeldSettled;
                    vec![Effect::Refit, Effect::Capture]
                }
                Phase::HeldSettled if capture_pending => {
                    let mut effects = vec![Effect::ApplyCapture];
                    if self.wants_measurement() {
                        effects.push(Effect::Remeasure);
                    }
                    effects
                }
                _ => vec![],
            },
            Input::Resize => {
                if self.is_held() && self.wants_measurement() {
                    vec![Effect::Remeasure]
                } else {
                    vec![]
                }
            }
            Input::Deactivate => vec![Effect::Release],
        };

        tracing::trace!(?input, phase = %self.phase, ?effects, "hold transition");
        effects
    }

    /// Folds a live measurement into the holder size. Explicitly
    /// configured dimensions always win over the measurement. Returns
    /// whether the rendered size actually changed.
    pub fn apply_measured(&mut self, measured: Size) -> bool {
        let width = if self.explicit_width {
            self.width.clone()
        } else {
            Some(Extent::from(measured.width))
        };
        let height = if self.explicit_height {
            self.height.clone()
        } else {
            Some(Extent::from(measured.height))
        };

        let changed = width != self.width || height != self.height;
        self.width = width;
        self.height = height;
        changed
    }
}
