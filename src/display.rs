//! Presentation helpers shared by every renderer.
//!
//! Nothing here draws. These are the pure decisions a screen has to make:
//! placeholder text before the first reading, the color band of a value,
//! the toggle button face, and trend-line geometry.

use crate::stats::Statistics;

// =============================================================================
// Temperature Bands
// =============================================================================

/// At or below this value a reading is shown as cool.
pub const COOL_MAX: f64 = 70.0;

/// At or above this value a reading is shown as warm.
pub const WARM_MIN: f64 = 80.0;

const _: () = assert!(COOL_MAX < WARM_MIN);

/// Text shown in place of a statistic while the history is empty.
pub const PLACEHOLDER: &str = "--";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemperatureBand {
    Cool,
    Normal,
    Warm,
}

impl TemperatureBand {
    pub fn of(temperature: f64) -> Self {
        if temperature <= COOL_MAX {
            Self::Cool
        } else if temperature >= WARM_MIN {
            Self::Warm
        } else {
            Self::Normal
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            Self::Cool => "#4fc3f7",
            Self::Normal => "#66bb6a",
            Self::Warm => "#ff7043",
        }
    }
}

/// `"72.4°"`, or the placeholder when there is nothing to show.
///
/// The empty-history statistics are 0, which is outside the simulated range,
/// so callers pass `has_data` instead of testing the value itself.
pub fn format_temperature(value: f64, has_data: bool) -> String {
    if has_data {
        format!("{value:.1}°")
    } else {
        PLACEHOLDER.to_string()
    }
}

// =============================================================================
// Toggle Button
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToggleButton {
    pub label: &'static str,
    pub color: &'static str,
}

impl ToggleButton {
    pub fn for_state(running: bool) -> Self {
        if running {
            Self {
                label: "Stop",
                color: "#e53935",
            }
        } else {
            Self {
                label: "Start",
                color: "#43a047",
            }
        }
    }
}

// =============================================================================
// Trend Chart
// =============================================================================

/// Fraction of the height left empty above and below the line.
const CHART_PADDING: f64 = 0.1;

/// Map temperatures (oldest first) onto a `width` x `height` canvas.
///
/// Oldest is at the left edge, newest at the right edge, the maximum at the
/// top. Returns `None` when the series cannot be charted: fewer than two
/// points, or a zero temperature range.
pub fn chart_points(temperatures: &[f64], width: f64, height: f64) -> Option<Vec<(f64, f64)>> {
    if temperatures.len() < 2 {
        return None;
    }

    let stats = Statistics::compute(temperatures);
    let (min, range) = (stats.min, stats.range());
    if range <= 0.0 || !range.is_finite() {
        return None;
    }

    let x_step = width / (temperatures.len() - 1) as f64;
    let y_scale = height * (1.0 - 2.0 * CHART_PADDING);
    let y_offset = height * CHART_PADDING;

    Some(
        temperatures
            .iter()
            .enumerate()
            .map(|(i, &t)| {
                let normalized = (t - min) / range;
                (i as f64 * x_step, y_offset + (1.0 - normalized) * y_scale)
            })
            .collect(),
    )
}
