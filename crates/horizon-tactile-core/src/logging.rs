//! Logging and debugging facilities for Horizon Tactile.
//!
//! This module provides:
//! - Target names for filtering `tracing` output by subsystem
//! - A text rendering of state machine transition tables
//! - Performance tracing hooks for profiling
//!
//! # Tracing Integration
//!
//! Horizon Tactile uses the `tracing` crate for instrumentation. Nothing is
//! printed unless the application installs a subscriber:
//!
//! ```ignore
//! fn main() {
//!     tracing_subscriber::fmt()
//!         .with_env_filter("horizon_tactile_core::state_machine=trace")
//!         .init();
//! }
//! ```
//!
//! Transitions are logged at `trace`, rejected transitions at `debug`.
//!
//! # Debug Visualization
//!
//! Use [`StateGraphDebug`] to print the transition table of a machine:
//!
//! ```ignore
//! use horizon_tactile_core::logging::StateGraphDebug;
//!
//! println!("{}", StateGraphDebug::new().format(&machine));
//! ```

use std::fmt::Write as FmtWrite;

use crate::state_machine::{StateId, StateMachine};

/// Span names used throughout Horizon Tactile for tracing.
pub mod span_names {
    /// Deferred command processing span.
    pub const DEFERRED: &str = "horizon_tactile::deferred";
}

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// State machine target.
    pub const STATE_MACHINE: &str = "horizon_tactile_core::state_machine";
    /// Signal/slot system target.
    pub const SIGNAL: &str = "horizon_tactile_core::signal";
    /// Property system target.
    pub const PROPERTY: &str = "horizon_tactile_core::property";
    /// Performance spans.
    pub const PERF: &str = "horizon_tactile::perf";
}

/// Style options for transition table output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TreeStyle {
    /// ASCII characters for tree branches.
    Ascii,
    /// Unicode box-drawing characters.
    #[default]
    Unicode,
    /// Compact single-line representation.
    Compact,
}

/// Debug utility for rendering a [`StateMachine`]'s transition table.
///
/// Every registered state is listed in registration order, with its allowed
/// successors as children. The current state is marked with `*`.
#[derive(Debug, Clone, Default)]
pub struct StateGraphDebug {
    style: TreeStyle,
}

impl StateGraphDebug {
    /// Create a renderer with the default style.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a renderer with a specific style.
    pub fn with_style(style: TreeStyle) -> Self {
        Self { style }
    }

    /// Render the transition table of `machine`.
    pub fn format<S: StateId, C>(&self, machine: &StateMachine<S, C>) -> String {
        let mut output = String::new();
        let _ = writeln!(
            output,
            "{} (current: {:?}):",
            machine.name(),
            machine.state()
        );

        for state in machine.states() {
            let marker = if state == machine.state() { "*" } else { " " };
            let successors = machine.successors(state).unwrap_or_default();

            if self.style == TreeStyle::Compact {
                let targets: Vec<String> = successors.iter().map(|s| format!("{s:?}")).collect();
                let _ = writeln!(output, "{marker}{state:?} -> [{}]", targets.join(", "));
                continue;
            }

            let _ = writeln!(output, "{marker}{state:?}");
            let count = successors.len();
            for (i, next) in successors.iter().enumerate() {
                let _ = writeln!(output, "  {} {next:?}", self.connector(i + 1 == count));
            }
        }

        output
    }

    fn connector(&self, is_last: bool) -> &'static str {
        match (self.style, is_last) {
            (TreeStyle::Ascii, false) => "+--",
            (TreeStyle::Ascii, true) => "`--",
            (_, false) => "\u{251c}\u{2500}\u{2500}",
            (_, true) => "\u{2514}\u{2500}\u{2500}",
        }
    }
}

/// A guard that keeps a tracing span entered until dropped.
///
/// Used to time deferred command processing and signal emission.
#[derive(Debug)]
pub struct PerfSpan {
    #[allow(dead_code)]
    span: tracing::span::EnteredSpan,
}

impl PerfSpan {
    /// Create a new performance span.
    pub fn new(name: &'static str) -> Self {
        let span = tracing::trace_span!(target: targets::PERF, "perf", operation = name);
        Self {
            span: span.entered(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state_machine::StateSpec;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    enum Light {
        Off,
        On,
        Broken,
    }

    fn machine() -> StateMachine<Light, ()> {
        let mut machine = StateMachine::new("Light", Light::Off);
        machine
            .add_state(StateSpec::new(Light::Off).successors([Light::On, Light::Broken]))
            .unwrap();
        machine
            .add_state(StateSpec::new(Light::On).successors([Light::Off]))
            .unwrap();
        machine.add_state(StateSpec::new(Light::Broken)).unwrap();
        machine
    }

    #[test]
    fn test_format_unicode() {
        let output = StateGraphDebug::new().format(&machine());
        assert!(output.starts_with("Light (current: Off):"));
        assert!(output.contains("*Off\n"));
        assert!(output.contains("\u{251c}\u{2500}\u{2500} On"));
        assert!(output.contains("\u{2514}\u{2500}\u{2500} Broken"));
        assert!(output.contains(" Broken\n"));
    }

    #[test]
    fn test_format_ascii() {
        let output = StateGraphDebug::with_style(TreeStyle::Ascii).format(&machine());
        assert!(output.contains("+-- On"));
        assert!(output.contains("`-- Broken"));
    }

    #[test]
    fn test_format_compact() {
        let output = StateGraphDebug::with_style(TreeStyle::Compact).format(&machine());
        assert!(output.contains("*Off -> [On, Broken]"));
        assert!(output.contains(" Broken -> []"));
    }

    #[test]
    fn test_perf_span() {
        let _span = PerfSpan::new("test_operation");
    }
}
