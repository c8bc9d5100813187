use std::fmt;
use std::str::FromStr;

use crate::config::NavigationConfig;
use crate::core::data::complex::ComplexPoint;
use crate::core::data::viewport_params::{ViewportParams, ViewportParamsError};

/// One navigation step of the interactive session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewportAction {
    PanLeft,
    PanRight,
    PanUp,
    PanDown,
    ZoomIn,
    ZoomOut,
    IncreaseIterations,
}

impl ViewportAction {
    pub const ALL: &'static [Self] = &[
        Self::PanLeft,
        Self::PanRight,
        Self::PanUp,
        Self::PanDown,
        Self::ZoomIn,
        Self::ZoomOut,
        Self::IncreaseIterations,
    ];

    /// Maps a keyboard key name to its action. Unbound keys yield `None`.
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowLeft" => Some(Self::PanLeft),
            "ArrowRight" => Some(Self::PanRight),
            "ArrowUp" => Some(Self::PanUp),
            "ArrowDown" => Some(Self::PanDown),
            " " => Some(Self::ZoomIn),
            "Alt" => Some(Self::ZoomOut),
            "Control" => Some(Self::IncreaseIterations),
            _ => None,
        }
    }

    #[must_use]
    pub const fn word(self) -> &'static str {
        match self {
            Self::PanLeft => "left",
            Self::PanRight => "right",
            Self::PanUp => "up",
            Self::PanDown => "down",
            Self::ZoomIn => "zoom-in",
            Self::ZoomOut => "zoom-out",
            Self::IncreaseIterations => "more-iterations",
        }
    }
}

impl fmt::Display for ViewportAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.word())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownAction(pub String);

impl fmt::Display for UnknownAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let words: Vec<&str> = ViewportAction::ALL.iter().map(|a| a.word()).collect();
        write!(
            f,
            "unknown action '{}', expected one of: {}",
            self.0,
            words.join(", ")
        )
    }
}

impl std::error::Error for UnknownAction {}

impl FromStr for ViewportAction {
    type Err = UnknownAction;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let word = s.trim().to_ascii_lowercase();

        Self::ALL
            .iter()
            .copied()
            .find(|action| action.word() == word)
            .ok_or_else(|| UnknownAction(s.to_string()))
    }
}

impl ViewportParams {
    /// The snapshot that results from applying `action` to `self`.
    #[must_use]
    pub fn with_action(&self, action: ViewportAction, navigation: &NavigationConfig) -> Self {
        let mut next = *self;
        let pan_step = navigation.pan_step_pixels / self.zoom;

        match action {
            ViewportAction::PanRight => next.center_offset.re -= pan_step,
            ViewportAction::PanLeft => next.center_offset.re += pan_step,
            ViewportAction::PanUp => next.center_offset.im += pan_step,
            ViewportAction::PanDown => next.center_offset.im -= pan_step,
            ViewportAction::ZoomIn => next.zoom *= navigation.zoom_factor,
            ViewportAction::ZoomOut => next.zoom /= navigation.zoom_factor,
            ViewportAction::IncreaseIterations => {
                next.max_iterations = next.max_iterations.saturating_add(navigation.iteration_step);
            }
        }

        next
    }
}

/// Current view of an interactive session.
///
/// Each action swaps in a new snapshot, so a snapshot already handed to a
/// computation is never edited. Snapshots that fail validation are never
/// stored.
#[derive(Debug, Clone)]
pub struct ViewportSession {
    params: ViewportParams,
    navigation: NavigationConfig,
}

impl ViewportSession {
    #[must_use]
    pub fn new(params: ViewportParams, navigation: NavigationConfig) -> Self {
        Self { params, navigation }
    }

    #[must_use]
    pub fn params(&self) -> ViewportParams {
        self.params
    }

    /// Moves to the snapshot produced by `action`. On error the session
    /// keeps its current snapshot.
    pub fn apply(
        &mut self,
        action: ViewportAction,
    ) -> Result<ViewportParams, ViewportParamsError> {
        let next = self.params.with_action(action, &self.navigation);
        next.validate()?;

        self.params = next;
        Ok(next)
    }

    #[must_use]
    pub fn centre(&self) -> ComplexPoint {
        self.params.center_offset
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> ViewportParams {
        ViewportParams::new(800, 600, 200.0, ComplexPoint { re: 0.6, im: 0.0 }, 500).unwrap()
    }

    fn session() -> ViewportSession {
        ViewportSession::new(params(), NavigationConfig::default())
    }

    #[test]
    fn test_key_bindings() {
        assert_eq!(ViewportAction::from_key("ArrowLeft"), Some(ViewportAction::PanLeft));
        assert_eq!(ViewportAction::from_key("ArrowRight"), Some(ViewportAction::PanRight));
        assert_eq!(ViewportAction::from_key("ArrowUp"), Some(ViewportAction::PanUp));
        assert_eq!(ViewportAction::from_key("ArrowDown"), Some(ViewportAction::PanDown));
        assert_eq!(ViewportAction::from_key(" "), Some(ViewportAction::ZoomIn));
        assert_eq!(ViewportAction::from_key("Alt"), Some(ViewportAction::ZoomOut));
        assert_eq!(
            ViewportAction::from_key("Control"),
            Some(ViewportAction::IncreaseIterations)
        );
        assert_eq!(ViewportAction::from_key("Shift"), None);
    }

    #[test]
    fn test_words_parse_case_insensitively() {
        assert_eq!("zoom-in".parse::<ViewportAction>(), Ok(ViewportAction::ZoomIn));
        assert_eq!(" Left ".parse::<ViewportAction>(), Ok(ViewportAction::PanLeft));
        assert_eq!("MORE-ITERATIONS".parse::<ViewportAction>(), Ok(ViewportAction::IncreaseIterations));
    }

    #[test]
    fn test_every_word_parses_back_to_its_action() {
        for &action in ViewportAction::ALL {
            assert_eq!(action.to_string().parse::<ViewportAction>(), Ok(action));
        }
    }

    #[test]
    fn test_unknown_word_is_rejected() {
        let err = "spin".parse::<ViewportAction>().unwrap_err();

        assert_eq!(err, UnknownAction("spin".to_string()));
        assert!(err.to_string().contains("zoom-out"));
    }

    #[test]
    fn test_pan_right_moves_offset_by_step_over_zoom() {
        let next = params().with_action(ViewportAction::PanRight, &NavigationConfig::default());

        assert!((next.center_offset.re - (0.6 - 30.0 / 200.0)).abs() < 1e-12);
        assert_eq!(next.center_offset.im, 0.0);
    }

    #[test]
    fn test_pan_left_up_and_down() {
        let navigation = NavigationConfig::default();
        let start = params();

        let left = start.with_action(ViewportAction::PanLeft, &navigation);
        let up = start.with_action(ViewportAction::PanUp, &navigation);
        let down = start.with_action(ViewportAction::PanDown, &navigation);

        assert!((left.center_offset.re - 0.75).abs() < 1e-12);
        assert!((up.center_offset.im - 0.15).abs() < 1e-12);
        assert!((down.center_offset.im + 0.15).abs() < 1e-12);
    }

    #[test]
    fn test_pan_step_shrinks_as_zoom_grows() {
        let navigation = NavigationConfig::default();
        let zoomed = params().with_action(ViewportAction::ZoomIn, &navigation);

        let panned = zoomed.with_action(ViewportAction::PanLeft, &navigation);

        assert!((panned.center_offset.re - (0.6 + 30.0 / 300.0)).abs() < 1e-12);
    }

    #[test]
    fn test_zoom_in_and_out() {
        let navigation = NavigationConfig::default();

        let zoomed_in = params().with_action(ViewportAction::ZoomIn, &navigation);
        let zoomed_out = params().with_action(ViewportAction::ZoomOut, &navigation);

        assert_eq!(zoomed_in.zoom, 300.0);
        assert!((zoomed_out.zoom - 200.0 / 1.5).abs() < 1e-9);
    }

    #[test]
    fn test_more_iterations_adds_step() {
        let next = params().with_action(ViewportAction::IncreaseIterations, &NavigationConfig::default());

        assert_eq!(next.max_iterations, 525);
    }

    #[test]
    fn test_more_iterations_saturates() {
        let mut start = params();
        start.max_iterations = u32::MAX - 10;

        let next = start.with_action(ViewportAction::IncreaseIterations, &NavigationConfig::default());

        assert_eq!(next.max_iterations, u32::MAX);
    }

    #[test]
    fn test_with_action_leaves_original_untouched() {
        let start = params();

        let _ = start.with_action(ViewportAction::ZoomIn, &NavigationConfig::default());

        assert_eq!(start, params());
    }

    #[test]
    fn test_session_apply_replaces_snapshot() {
        let mut session = session();
        let before = session.params();

        let after = session.apply(ViewportAction::ZoomIn).unwrap();

        assert_eq!(after.zoom, 300.0);
        assert_eq!(session.params(), after);
        assert_eq!(before.zoom, 200.0);
    }

    #[test]
    fn test_session_uses_its_navigation_config() {
        let navigation = NavigationConfig {
            pan_step_pixels: 100.0,
            zoom_factor: 2.0,
            iteration_step: 1,
        };
        let mut session = ViewportSession::new(params(), navigation);

        session.apply(ViewportAction::ZoomIn).unwrap();
        session.apply(ViewportAction::PanRight).unwrap();

        assert_eq!(session.params().zoom, 400.0);
        assert!((session.centre().re - (0.6 - 0.25)).abs() < 1e-12);
    }

    #[test]
    fn test_rejected_action_keeps_previous_snapshot() {
        let navigation = NavigationConfig {
            zoom_factor: 0.0,
            ..NavigationConfig::default()
        };
        let mut session = ViewportSession::new(params(), navigation);

        let result = session.apply(ViewportAction::ZoomIn);

        assert_eq!(result, Err(ViewportParamsError::InvalidZoom { zoom: 0.0 }));
        assert_eq!(session.params(), params());

        let panned = session.apply(ViewportAction::PanLeft).unwrap();
        assert_eq!(panned.zoom, 200.0);
        assert!((panned.center_offset.re - 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_zooming_out_to_zero_is_rejected() {
        let mut start = params();
        start.zoom = f64::MIN_POSITIVE;
        let navigation = NavigationConfig {
            zoom_factor: f64::MAX,
            ..NavigationConfig::default()
        };
        let mut session = ViewportSession::new(start, navigation);

        assert!(session.apply(ViewportAction::ZoomOut).is_err());
        assert_eq!(session.params(), start);
    }
}
