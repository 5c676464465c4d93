//! Axis ranges and tick placement for the chart.

use serde::Serialize;

use crate::prelude::*;

/// Default target number of duration-axis ticks.
pub const DEFAULT_TICK_COUNT: usize = 7;

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Tick {
    pub value: f64,
    pub label: String,
}

/// Duration (value) axis: bounding range plus labeled tick placement.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct DurationAxis {
    pub min: f64,
    pub max: f64,
    pub ticks: Vec<Tick>,
}

/// Date (time) axis bounding range; the renderer derives its own date ticks.
#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
pub struct DateAxis {
    pub min: DateTime,
    pub max: DateTime,
}

/// User-chosen sub-range that clamps the axes without recomputing the
/// underlying history.
#[derive(Debug, Clone, Copy, Default)]
pub struct ViewWindow {
    pub date_from: Option<DateTime>,
    pub date_to: Option<DateTime>,
    pub time_min: Option<f64>,
    pub time_max: Option<f64>,
}

/// Derives the duration axis from all observation times, `None` on empty
/// input.
pub fn duration_axis(
    times: impl IntoIterator<Item = f64>,
    target_tick_count: usize,
) -> Option<DurationAxis> {
    let (min, max) = times.into_iter().fold(None, |bounds, time| match bounds {
        None => Some((time, time)),
        Some((min, max)) => Some((min.min(time), max.max(time))),
    })?;
    Some(axis_between(min, max, target_tick_count))
}

/// Derives the date axis bounds, `None` on empty input.
pub fn date_axis(dates: impl IntoIterator<Item = DateTime>) -> Option<DateAxis> {
    let mut dates = dates.into_iter();
    let first = dates.next()?;
    let (min, max) =
        dates.fold((first, first), |(min, max), date| (min.min(date), max.max(date)));
    Some(DateAxis { min, max })
}

impl DurationAxis {
    /// Re-derives the axis over the window-clamped range. A window that lies
    /// entirely outside the data collapses to the nearest bound.
    #[must_use]
    pub fn clamped(&self, window: &ViewWindow, target_tick_count: usize) -> Self {
        let min = window.time_min.map_or(self.min, |limit| self.min.max(limit));
        let max = window.time_max.map_or(self.max, |limit| self.max.min(limit));
        axis_between(min, max.max(min), target_tick_count)
    }
}

impl DateAxis {
    #[must_use]
    pub fn clamped(&self, window: &ViewWindow) -> Self {
        let min = window.date_from.map_or(self.min, |limit| self.min.max(limit));
        let max = window.date_to.map_or(self.max, |limit| self.max.min(limit));
        Self { min, max: max.max(min) }
    }
}

fn axis_between(min: f64, max: f64, target_tick_count: usize) -> DurationAxis {
    DurationAxis { min, max, ticks: ticks_between(min, max, target_tick_count) }
}

/// Ascending ticks from `min`, stepped by `ceil((max - min) / target)`, kept
/// while the running sum stays within `max`. A degenerate range yields the
/// single tick at `min`.
fn ticks_between(min: f64, max: f64, target_tick_count: usize) -> Vec<Tick> {
    let mut ticks = vec![tick(min)];
    if min == max {
        return ticks;
    }
    let offset = ((max - min) / target_tick_count as f64).ceil();
    let mut sum = min;
    loop {
        sum += offset;
        if sum > max {
            break;
        }
        ticks.push(tick(sum));
    }
    ticks
}

fn tick(value: f64) -> Tick {
    Tick { value, label: format_duration_seconds(value) }
}

/// Formats whole seconds as `H:MM:SS`, or `M:SS` under an hour.
#[must_use]
pub fn format_duration_seconds(value: f64) -> String {
    if !value.is_finite() {
        return String::new();
    }
    let total = (value.floor() as i64).max(0);
    let hours = total / 3600;
    let minutes = total % 3600 / 60;
    let seconds = total % 60;
    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, seconds)
    } else {
        format!("{}:{:02}", minutes, seconds)
    }
}
