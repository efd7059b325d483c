//! Keyboard controls and the transient status overlay.
//!
//! Controls are the only writers of the tunable parts of [`ViewState`]; the
//! pipeline just reads it.

use winit::keyboard::KeyCode;

use crate::params::{DisplayMode, ViewState};

/// Factor applied to the smoothing constant per key press
pub const SMOOTHING_STEP: f64 = 1.2;

/// Amount added to or removed from the scale per key press
pub const SCALE_STEP: f64 = 0.002;

/// Discrete user actions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    IncreaseSmoothing,
    DecreaseSmoothing,
    IncreaseScale,
    DecreaseScale,
    ToggleFreeze,
    CycleDisplayMode,
    Snapshot,
    Quit,
}

impl Control {
    /// Key bindings: Q/A smoothing, W/S scale, Space freeze, Z mode, P snapshot
    pub fn from_key(key: KeyCode) -> Option<Self> {
        match key {
            KeyCode::KeyQ => Some(Control::IncreaseSmoothing),
            KeyCode::KeyA => Some(Control::DecreaseSmoothing),
            KeyCode::KeyW => Some(Control::IncreaseScale),
            KeyCode::KeyS => Some(Control::DecreaseScale),
            KeyCode::Space => Some(Control::ToggleFreeze),
            KeyCode::KeyZ => Some(Control::CycleDisplayMode),
            KeyCode::KeyP => Some(Control::Snapshot),
            KeyCode::Escape => Some(Control::Quit),
            _ => None,
        }
    }
}

/// What the application must do after a control was applied
#[derive(Debug, Clone, PartialEq)]
pub enum ControlOutcome {
    /// State changed; show this message
    Message(String),
    /// State changed silently
    Updated,
    /// Capture the current frame (freeze has already been cleared)
    Snapshot,
    Quit,
}

/// Apply a control to the view state
pub fn apply(control: Control, view: &mut ViewState) -> ControlOutcome {
    match control {
        Control::IncreaseSmoothing => {
            let a = view.scale_smoothing(SMOOTHING_STEP);
            ControlOutcome::Message(format!("Filtering value: {}", a))
        }
        Control::DecreaseSmoothing => {
            let a = view.scale_smoothing(1.0 / SMOOTHING_STEP);
            ControlOutcome::Message(format!("Filtering value: {}", a))
        }
        Control::IncreaseScale => {
            let scale = view.nudge_scale(SCALE_STEP);
            ControlOutcome::Message(format!("Scale: {}", scale))
        }
        Control::DecreaseScale => {
            let scale = view.nudge_scale(-SCALE_STEP);
            ControlOutcome::Message(format!("Scale: {}", scale))
        }
        Control::ToggleFreeze => {
            view.toggle_freeze();
            ControlOutcome::Updated
        }
        Control::CycleDisplayMode => {
            view.cycle_display_mode();
            ControlOutcome::Updated
        }
        Control::Snapshot => {
            view.frozen = false;
            ControlOutcome::Snapshot
        }
        Control::Quit => ControlOutcome::Quit,
    }
}

/// Human-readable name for a display mode
pub fn display_mode_label(mode: DisplayMode) -> &'static str {
    match mode {
        DisplayMode::Curve => "hilbert",
        DisplayMode::Wave => "waveform",
        DisplayMode::Both => "hilbert + waveform",
    }
}

/// Status text that expires a fixed time after it was posted
#[derive(Debug, Clone)]
pub struct Overlay {
    text: Option<String>,
    posted_at_s: f64,
    lifetime_s: f64,
}

impl Overlay {
    pub fn new(lifetime_s: f64) -> Self {
        Self {
            text: None,
            posted_at_s: 0.0,
            lifetime_s,
        }
    }

    /// Post `text` as if at time `at_s`; a future time extends its lifetime
    pub fn post(&mut self, text: impl Into<String>, at_s: f64) {
        self.text = Some(text.into());
        self.posted_at_s = at_s;
    }

    /// Post `text` at `now_s` so that it stays visible for an extra `delay_s`
    pub fn post_delayed(&mut self, text: impl Into<String>, now_s: f64, delay_s: f64) {
        self.post(text, now_s + delay_s);
    }

    /// The live message at time `now_s`, if any
    pub fn visible(&self, now_s: f64) -> Option<&str> {
        match &self.text {
            Some(text) if now_s - self.posted_at_s < self.lifetime_s => Some(text),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::{RenderConfig, Viewport, MIN_SMOOTHING};

    fn view() -> ViewState {
        ViewState::new(Viewport::new(600, 600))
    }

    #[test]
    fn test_key_bindings() {
        assert_eq!(
            Control::from_key(KeyCode::KeyQ),
            Some(Control::IncreaseSmoothing)
        );
        assert_eq!(Control::from_key(KeyCode::KeyP), Some(Control::Snapshot));
        assert_eq!(Control::from_key(KeyCode::KeyX), None);
    }

    #[test]
    fn test_smoothing_controls() {
        let mut view = view();
        let outcome = apply(Control::IncreaseSmoothing, &mut view);
        assert!((view.smoothing() - 60.0).abs() < 1e-9);
        assert!(matches!(outcome, ControlOutcome::Message(m) if m.starts_with("Filtering value: ")));

        apply(Control::DecreaseSmoothing, &mut view);
        assert!((view.smoothing() - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_smoothing_floor_enforced_by_control() {
        let mut view = view();
        for _ in 0..50 {
            apply(Control::DecreaseSmoothing, &mut view);
        }
        assert_eq!(view.smoothing(), MIN_SMOOTHING);
        assert_eq!(
            apply(Control::DecreaseSmoothing, &mut view),
            ControlOutcome::Message("Filtering value: 1".to_string())
        );
    }

    #[test]
    fn test_scale_controls() {
        let mut view = view();
        apply(Control::IncreaseScale, &mut view);
        assert!((view.scale - 0.042).abs() < 1e-12);
        apply(Control::DecreaseScale, &mut view);
        apply(Control::DecreaseScale, &mut view);
        assert!((view.scale - 0.038).abs() < 1e-12);
    }

    #[test]
    fn test_freeze_and_mode_controls() {
        let mut view = view();
        assert_eq!(apply(Control::ToggleFreeze, &mut view), ControlOutcome::Updated);
        assert!(view.frozen);
        apply(Control::ToggleFreeze, &mut view);
        assert!(!view.frozen);

        apply(Control::CycleDisplayMode, &mut view);
        assert_eq!(view.display_mode, DisplayMode::Wave);
        assert_eq!(display_mode_label(view.display_mode), "waveform");
    }

    #[test]
    fn test_snapshot_clears_freeze() {
        let mut view = view();
        view.toggle_freeze();
        assert_eq!(apply(Control::Snapshot, &mut view), ControlOutcome::Snapshot);
        assert!(!view.frozen);
        assert_eq!(view.scale, ViewState::DEFAULT_SCALE);

        // Already live: stays live
        apply(Control::Snapshot, &mut view);
        assert!(!view.frozen);
    }

    #[test]
    fn test_quit_does_not_touch_state() {
        let mut view = view();
        view.toggle_freeze();
        assert_eq!(apply(Control::Quit, &mut view), ControlOutcome::Quit);
        assert!(view.frozen);
        assert_eq!(view.smoothing(), ViewState::DEFAULT_SMOOTHING);
    }

    #[test]
    fn test_overlay_expiry() {
        let mut overlay = Overlay::new(1.0);
        assert_eq!(overlay.visible(0.0), None);

        overlay.post("Scale: 0.042", 5.0);
        assert_eq!(overlay.visible(5.5), Some("Scale: 0.042"));
        assert_eq!(overlay.visible(6.0), None);
    }

    #[test]
    fn test_snapshot_message_outlives_plain_message() {
        let render = RenderConfig::default();
        let mut overlay = Overlay::new(render.overlay_lifetime_s);
        overlay.post_delayed(
            "screenshots/image.png saved",
            2.0,
            render.snapshot_overlay_delay_s,
        );

        assert_eq!(overlay.visible(2.0), Some("screenshots/image.png saved"));
        assert!(overlay.visible(5.9).is_some());
        assert!(overlay.visible(6.0).is_none());

        // A later control message replaces it on its normal lifetime
        overlay.post("Scale: 0.042", 3.0);
        assert_eq!(overlay.visible(3.5), Some("Scale: 0.042"));
        assert!(overlay.visible(4.0).is_none());
    }
}
