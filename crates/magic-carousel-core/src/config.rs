use std::time::Duration;

use thiserror::Error;

pub const DEFAULT_MARGIN: f32 = 16.0;
pub const DEFAULT_TRANSITION_MS: u64 = 300;
pub const DEFAULT_MIN_SWIPE_DISTANCE: f32 = 10.0;
pub const DEFAULT_MAX_ANGLE_DEGREES: f32 = 45.0;

/// How `next` decides that the end has been reached.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum NavigationMode {
    /// Index arithmetic: `active + step <= last index`.
    Discrete,
    /// Translation arithmetic: next is available until the content end is in view.
    #[default]
    Continuous,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("max angle {0}° is outside 0..=90")]
    AngleOutOfRange(f32),
    #[error("{field} must be a finite, non-negative length (got {value})")]
    InvalidLength { field: &'static str, value: f32 },
    #[error("cells_to_scroll must be at least 1")]
    ZeroStep,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CarouselConfig {
    /// Fixed cell width in px; ignored in fit mode.
    pub cell_width: f32,
    pub margin: f32,
    pub margin_first: f32,
    pub margin_last: f32,
    pub transition_ms: u64,
    pub min_swipe_distance: f32,
    /// Fit mode when non-zero.
    pub cells_to_show: usize,
    pub cells_to_scroll: usize,
    #[cfg_attr(feature = "serde", serde(rename = "loop"))]
    pub loop_mode: bool,
    pub swipe_by_mouse: bool,
    pub max_angle_degrees: f32,
    pub mode: NavigationMode,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            cell_width: 0.0,
            margin: DEFAULT_MARGIN,
            margin_first: 0.0,
            margin_last: 0.0,
            transition_ms: DEFAULT_TRANSITION_MS,
            min_swipe_distance: DEFAULT_MIN_SWIPE_DISTANCE,
            cells_to_show: 0,
            cells_to_scroll: 1,
            loop_mode: false,
            swipe_by_mouse: false,
            max_angle_degrees: DEFAULT_MAX_ANGLE_DEGREES,
            mode: NavigationMode::default(),
        }
    }
}

impl CarouselConfig {
    pub fn new(cell_width: f32) -> Self {
        Self {
            cell_width,
            ..Self::default()
        }
    }

    pub fn with_margins(mut self, margin: f32, first: f32, last: f32) -> Self {
        self.margin = margin;
        self.margin_first = first;
        self.margin_last = last;
        self
    }

    pub fn with_cells_to_show(mut self, n: usize) -> Self {
        self.cells_to_show = n;
        self
    }

    pub fn with_cells_to_scroll(mut self, n: usize) -> Self {
        self.cells_to_scroll = n;
        self
    }

    pub fn with_loop(mut self, on: bool) -> Self {
        self.loop_mode = on;
        self
    }

    pub fn with_mode(mut self, mode: NavigationMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_transition_ms(mut self, ms: u64) -> Self {
        self.transition_ms = ms;
        self
    }

    pub fn with_min_swipe_distance(mut self, px: f32) -> Self {
        self.min_swipe_distance = px;
        self
    }

    pub fn with_swipe_by_mouse(mut self, on: bool) -> Self {
        self.swipe_by_mouse = on;
        self
    }

    pub fn with_max_angle(mut self, degrees: f32) -> Self {
        self.max_angle_degrees = degrees;
        self
    }

    pub fn transition(&self) -> Duration {
        Duration::from_millis(self.transition_ms)
    }

    /// Fit mode and loop mode both drop the edge margins.
    pub fn effective_edge_margins(&self) -> (f32, f32) {
        if self.cells_to_show > 0 || self.loop_mode {
            (0.0, 0.0)
        } else {
            (self.margin_first, self.margin_last)
        }
    }

    /// Every problem with this configuration, in field order.
    pub fn problems(&self) -> Vec<ConfigError> {
        let mut out = Vec::new();
        for (field, value) in [
            ("cell_width", self.cell_width),
            ("margin", self.margin),
            ("margin_first", self.margin_first),
            ("margin_last", self.margin_last),
            ("min_swipe_distance", self.min_swipe_distance),
        ] {
            if !value.is_finite() || value < 0.0 {
                out.push(ConfigError::InvalidLength { field, value });
            }
        }
        if self.cells_to_scroll == 0 {
            out.push(ConfigError::ZeroStep);
        }
        if let Err(e) = check_angle(self.max_angle_degrees) {
            out.push(e);
        }
        out
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.problems().into_iter().next() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    /// Sanitized copy: each invalid tunable is logged and reset to its default.
    pub fn validated(mut self) -> Self {
        let defaults = Self::default();
        for problem in self.problems() {
            log::warn!("carousel config: {problem}; using default");
            match problem {
                ConfigError::AngleOutOfRange(_) => {
                    self.max_angle_degrees = defaults.max_angle_degrees
                }
                ConfigError::ZeroStep => self.cells_to_scroll = defaults.cells_to_scroll,
                ConfigError::InvalidLength { field, .. } => match field {
                    "cell_width" => self.cell_width = defaults.cell_width,
                    "margin" => self.margin = defaults.margin,
                    "margin_first" => self.margin_first = defaults.margin_first,
                    "margin_last" => self.margin_last = defaults.margin_last,
                    _ => self.min_swipe_distance = defaults.min_swipe_distance,
                },
            }
        }
        self
    }
}

pub fn check_angle(degrees: f32) -> Result<f32, ConfigError> {
    if (0.0..=90.0).contains(&degrees) {
        Ok(degrees)
    } else {
        Err(ConfigError::AngleOutOfRange(degrees))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let c = CarouselConfig::default();
        assert_eq!(c.validate(), Ok(()));
        assert_eq!(c.transition(), Duration::from_millis(300));
        assert_eq!(c.mode, NavigationMode::Continuous);
    }

    #[test]
    fn test_validated_resets_bad_fields() {
        let bad = CarouselConfig {
            margin: -4.0,
            cell_width: f32::NAN,
            cells_to_scroll: 0,
            max_angle_degrees: 91.0,
            ..CarouselConfig::new(120.0)
        };
        assert_eq!(bad.problems().len(), 4);
        assert!(matches!(
            bad.validate(),
            Err(ConfigError::InvalidLength {
                field: "cell_width",
                ..
            })
        ));

        let fixed = bad.validated();
        assert_eq!(fixed.margin, DEFAULT_MARGIN);
        assert_eq!(fixed.cell_width, 0.0);
        assert_eq!(fixed.cells_to_scroll, 1);
        assert_eq!(fixed.max_angle_degrees, DEFAULT_MAX_ANGLE_DEGREES);
        assert!(fixed.problems().is_empty());
    }

    #[test]
    fn test_edge_margins_dropped_in_fit_and_loop() {
        let c = CarouselConfig::new(100.0).with_margins(16.0, 24.0, 8.0);
        assert_eq!(c.effective_edge_margins(), (24.0, 8.0));
        assert_eq!(c.clone().with_cells_to_show(2).effective_edge_margins(), (0.0, 0.0));
        assert_eq!(c.with_loop(true).effective_edge_margins(), (0.0, 0.0));
    }
}
