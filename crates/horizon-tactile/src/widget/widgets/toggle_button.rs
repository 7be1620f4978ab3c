//! Two-state toggle button.
//!
//! A [`ToggleButton`] combines a checked flag with the press phase of a
//! [`Button`](super::Button) into one of six [`ToggleState`]s. A completed tap
//! flips the checked flag; an aborted tap leaves it alone.
//!
//! Programmatic changes ([`set_checked`](ToggleButton::set_checked),
//! [`set_enabled`](ToggleButton::set_enabled)) walk the transition table one
//! legal step at a time, so every intermediate enter and leave hook runs and
//! `state_changed` reports each step. `toggled` fires once with the final
//! value.
//!
//! # Example
//!
//! ```
//! use horizon_tactile::prelude::*;
//!
//! # fn main() -> horizon_tactile::Result<()> {
//! let face = |name: &str| VisualNode::shared(name, Size::new(60.0, 60.0));
//! let mut toggle = ToggleButton::builder(
//!     face("unchecked up"),
//!     face("unchecked down"),
//!     face("checked up"),
//!     face("checked down"),
//! )
//! .build()?;
//!
//! toggle.toggled.connect(|checked| println!("checked: {checked}"));
//!
//! let tap = TapEvent::new(Point::new(30.0, 30.0), 0);
//! toggle.handle_tap(&TapGesture::Possible(tap))?;
//! toggle.handle_tap(&TapGesture::Detected(tap))?;
//! assert!(toggle.is_checked());
//!
//! toggle.set_checked(false)?;
//! assert_eq!(toggle.state(), ToggleState::UncheckedUp);
//! # Ok(())
//! # }
//! ```

use std::fmt;

use horizon_tactile_core::logging::span_names;
use horizon_tactile_core::{
    Handler, PerfSpan, Result, Signal, StateError, StateGraphDebug, StateMachine, StateSpec,
    WeakHandler,
};

use super::button::ButtonState;
use crate::widget::config::TouchConfig;
use crate::widget::control::{ControlHandle, ControlLink};
use crate::widget::gesture::{Recognizer, RecognizerGate, TapEvent, TapTarget};
use crate::widget::press::{self, PressParts};
use crate::widget::targets;
use crate::widget::visual::{SharedVisual, SwitchNode};

const CONTROL_NAME: &str = "ToggleButton";

/// Compound state of a [`ToggleButton`]: checked flag times press phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToggleState {
    UncheckedUp,
    UncheckedDown,
    UncheckedDisabled,
    CheckedUp,
    CheckedDown,
    CheckedDisabled,
}

impl ToggleState {
    /// All six states, unchecked first.
    pub const ALL: [Self; 6] = [
        Self::UncheckedUp,
        Self::UncheckedDown,
        Self::UncheckedDisabled,
        Self::CheckedUp,
        Self::CheckedDown,
        Self::CheckedDisabled,
    ];

    /// Combine a checked flag and a press phase.
    pub fn from_parts(checked: bool, phase: ButtonState) -> Self {
        match (checked, phase) {
            (false, ButtonState::Up) => Self::UncheckedUp,
            (false, ButtonState::Down) => Self::UncheckedDown,
            (false, ButtonState::Disabled) => Self::UncheckedDisabled,
            (true, ButtonState::Up) => Self::CheckedUp,
            (true, ButtonState::Down) => Self::CheckedDown,
            (true, ButtonState::Disabled) => Self::CheckedDisabled,
        }
    }

    /// Whether the state belongs to the checked half.
    pub fn is_checked(self) -> bool {
        matches!(
            self,
            Self::CheckedUp | Self::CheckedDown | Self::CheckedDisabled
        )
    }

    /// The press phase of the state.
    pub fn phase(self) -> ButtonState {
        match self {
            Self::UncheckedUp | Self::CheckedUp => ButtonState::Up,
            Self::UncheckedDown | Self::CheckedDown => ButtonState::Down,
            Self::UncheckedDisabled | Self::CheckedDisabled => ButtonState::Disabled,
        }
    }

    /// Whether the state accepts input.
    pub fn is_enabled(self) -> bool {
        self.phase().is_enabled()
    }

    /// Legal successors of the state.
    ///
    /// A completed tap crosses from the pressed state of one half to the up
    /// state of the other.
    pub fn successors(self) -> &'static [Self] {
        use ToggleState::*;
        match self {
            UncheckedUp => &[UncheckedDown, UncheckedDisabled],
            UncheckedDown => &[UncheckedUp, UncheckedDisabled, CheckedUp],
            CheckedUp => &[CheckedDown, CheckedDisabled],
            CheckedDown => &[CheckedUp, UncheckedUp, CheckedDisabled],
            UncheckedDisabled => &[UncheckedUp],
            CheckedDisabled => &[CheckedUp],
        }
    }
}

/// Commands a [`ControlHandle`] can queue for a [`ToggleButton`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleCommand {
    /// Enable or disable the toggle.
    SetEnabled(bool),
    /// Check or uncheck the toggle.
    SetChecked(bool),
    /// Make the toggle inert.
    Close,
}

/// Builder for [`ToggleButton`].
pub struct ToggleButtonBuilder {
    unchecked_up: SharedVisual,
    unchecked_down: SharedVisual,
    checked_up: SharedVisual,
    checked_down: SharedVisual,
    unchecked_disabled: Option<SharedVisual>,
    checked_disabled: Option<SharedVisual>,
    active_area: Option<SharedVisual>,
    fat_finger_enlarge: bool,
    checked: bool,
    enabled: bool,
    config: TouchConfig,
    recognizer: Option<Box<dyn Recognizer>>,
    check_handler: Option<WeakHandler<(TapEvent, bool)>>,
}

impl ToggleButtonBuilder {
    /// Visual shown while unchecked and disabled. Defaults to unchecked up.
    pub fn unchecked_disabled(mut self, visual: SharedVisual) -> Self {
        self.unchecked_disabled = Some(visual);
        self
    }

    /// Visual shown while checked and disabled. Defaults to checked up.
    pub fn checked_disabled(mut self, visual: SharedVisual) -> Self {
        self.checked_disabled = Some(visual);
        self
    }

    /// Set the area that receives gestures. Defaults to the unchecked up visual.
    pub fn active_area(mut self, area: SharedVisual) -> Self {
        self.active_area = Some(area);
        self
    }

    /// Grow the active area to the minimum finger-friendly size.
    pub fn fat_finger_enlarge(mut self, enlarge: bool) -> Self {
        self.fat_finger_enlarge = enlarge;
        self
    }

    /// Set whether the toggle starts checked.
    pub fn checked(mut self, checked: bool) -> Self {
        self.checked = checked;
        self
    }

    /// Set whether the toggle starts enabled.
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Set the touch configuration used for enlargement.
    pub fn touch_config(mut self, config: TouchConfig) -> Self {
        self.config = config;
        self
    }

    /// Use the host's recognizer switch instead of a private gate.
    pub fn recognizer(mut self, recognizer: impl Recognizer + 'static) -> Self {
        self.recognizer = Some(Box::new(recognizer));
        self
    }

    /// Set the check handler. Only a weak reference is kept.
    pub fn check_handler(mut self, handler: &Handler<(TapEvent, bool)>) -> Self {
        self.check_handler = Some(WeakHandler::new(handler));
        self
    }

    /// Build the toggle.
    pub fn build(self) -> Result<ToggleButton> {
        use ToggleState::*;

        self.config.validate(CONTROL_NAME)?;
        let active_area = press::resolve_active_area(
            CONTROL_NAME,
            self.fat_finger_enlarge,
            self.active_area,
            &self.unchecked_up,
            &self.config,
        )?;

        let unchecked_disabled = self
            .unchecked_disabled
            .unwrap_or_else(|| self.unchecked_up.clone());
        let checked_disabled = self
            .checked_disabled
            .unwrap_or_else(|| self.checked_up.clone());
        let visuals = SwitchNode::new(CONTROL_NAME)
            .with(UncheckedUp, self.unchecked_up)
            .with(UncheckedDown, self.unchecked_down)
            .with(UncheckedDisabled, unchecked_disabled)
            .with(CheckedUp, self.checked_up)
            .with(CheckedDown, self.checked_down)
            .with(CheckedDisabled, checked_disabled);

        let initial = ToggleState::from_parts(self.checked, ButtonState::Up);
        visuals.set_active_id(initial)?;

        let recognizer = self
            .recognizer
            .unwrap_or_else(|| Box::new(RecognizerGate::new()));

        let mut toggle = ToggleButton {
            machine: toggle_machine(initial)?,
            parts: PressParts::new(visuals, recognizer),
            active_area,
            check_handler: self.check_handler,
            link: ControlLink::new(),
            closed: false,
            clicked: Signal::new(),
            toggled: Signal::new(),
            state_changed: Signal::new(),
        };
        if !self.enabled {
            toggle.change_state(ToggleState::from_parts(self.checked, ButtonState::Disabled))?;
        }
        Ok(toggle)
    }
}

type ToggleMachine = StateMachine<ToggleState, PressParts<ToggleState>>;

fn toggle_machine(initial: ToggleState) -> std::result::Result<ToggleMachine, StateError> {
    let mut machine = StateMachine::new(CONTROL_NAME, initial);
    for state in ToggleState::ALL {
        let spec = StateSpec::new(state).successors(state.successors().iter().copied());
        let spec = if state.is_enabled() {
            spec.on_enter(press::show_state)
        } else {
            spec.on_enter(press::enter_disabled)
                .on_leave(press::leave_disabled)
        };
        machine.add_state(spec)?;
    }
    Ok(machine)
}

/// A button that flips between checked and unchecked on every completed tap.
///
/// # Signals
///
/// - `clicked((TapEvent, bool))`: Emitted when a tap changes the checked
///   flag, with the new value
/// - `toggled(bool)`: Emitted whenever the checked flag changes, by tap or
///   programmatically
/// - `state_changed(ToggleState)`: Emitted after every committed transition
pub struct ToggleButton {
    machine: ToggleMachine,
    parts: PressParts<ToggleState>,
    active_area: SharedVisual,
    check_handler: Option<WeakHandler<(TapEvent, bool)>>,
    link: ControlLink<ToggleCommand>,
    closed: bool,

    /// Signal emitted when a tap flips the checked flag.
    pub clicked: Signal<(TapEvent, bool)>,

    /// Signal emitted when the checked flag changes.
    pub toggled: Signal<bool>,

    /// Signal emitted after each state transition.
    pub state_changed: Signal<ToggleState>,
}

impl ToggleButton {
    /// Start building a toggle from its four mandatory visuals.
    pub fn builder(
        unchecked_up: SharedVisual,
        unchecked_down: SharedVisual,
        checked_up: SharedVisual,
        checked_down: SharedVisual,
    ) -> ToggleButtonBuilder {
        ToggleButtonBuilder {
            unchecked_up,
            unchecked_down,
            checked_up,
            checked_down,
            unchecked_disabled: None,
            checked_disabled: None,
            active_area: None,
            fat_finger_enlarge: false,
            checked: false,
            enabled: true,
            config: TouchConfig::default(),
            recognizer: None,
            check_handler: None,
        }
    }

    /// The current compound state.
    pub fn state(&self) -> ToggleState {
        self.machine.state()
    }

    /// Whether the toggle is checked.
    pub fn is_checked(&self) -> bool {
        self.state().is_checked()
    }

    /// Whether the toggle accepts input.
    pub fn is_enabled(&self) -> bool {
        self.state().is_enabled()
    }

    /// Check or uncheck the toggle, keeping its enabled flag.
    ///
    /// A pressed toggle settles through its up state first; a disabled one
    /// passes through up and is disabled again afterwards.
    pub fn set_checked(&mut self, checked: bool) -> Result<()> {
        self.apply_checked(checked)?;
        self.process_deferred()
    }

    /// Enable or disable the toggle, keeping its checked flag.
    pub fn set_enabled(&mut self, enabled: bool) -> Result<()> {
        self.apply_enabled(enabled)?;
        self.process_deferred()
    }

    fn apply_checked(&mut self, checked: bool) -> Result<()> {
        if self.closed || self.is_checked() == checked {
            return Ok(());
        }
        let was_enabled = self.is_enabled();
        let from = |phase| ToggleState::from_parts(!checked, phase);
        let to = |phase| ToggleState::from_parts(checked, phase);

        if self.state() == from(ButtonState::Disabled) {
            self.change_state(from(ButtonState::Up))?;
        }
        if self.state() == from(ButtonState::Up) {
            self.change_state(from(ButtonState::Down))?;
        }
        self.change_state(to(ButtonState::Up))?;
        if !was_enabled {
            self.change_state(to(ButtonState::Disabled))?;
        }

        tracing::debug!(target: targets::TOGGLE, checked, "checked set programmatically");
        self.toggled.emit(checked);
        Ok(())
    }

    fn apply_enabled(&mut self, enabled: bool) -> Result<()> {
        if self.closed || self.is_enabled() == enabled {
            return Ok(());
        }
        let checked = self.is_checked();
        let target = if enabled {
            ButtonState::Up
        } else {
            ButtonState::Disabled
        };
        self.change_state(ToggleState::from_parts(checked, target))
    }

    fn change_state(&mut self, target: ToggleState) -> Result<()> {
        self.machine.change_state(&mut self.parts, target)?;
        self.state_changed.emit(target);
        Ok(())
    }

    /// Render the transition table for debugging.
    pub fn state_graph(&self) -> String {
        StateGraphDebug::new().format(&self.machine)
    }

    /// Set the check handler. Only a weak reference is kept.
    pub fn set_check_handler(&mut self, handler: &Handler<(TapEvent, bool)>) {
        self.check_handler = Some(WeakHandler::new(handler));
    }

    /// Remove the check handler.
    pub fn clear_check_handler(&mut self) {
        self.check_handler = None;
    }

    /// The area that receives gestures.
    pub fn active_area(&self) -> &SharedVisual {
        &self.active_area
    }

    /// The state visuals.
    pub fn visuals(&self) -> &SwitchNode<ToggleState> {
        &self.parts.visuals
    }

    /// The recognizer switch.
    pub fn recognizer(&self) -> &dyn Recognizer {
        self.parts.recognizer.as_ref()
    }

    /// Create a handle callbacks can use to reach this toggle.
    pub fn handle(&self) -> ControlHandle<ToggleCommand> {
        self.link.handle()
    }

    /// Apply commands queued through [`handle`](Self::handle).
    pub fn process_deferred(&mut self) -> Result<()> {
        if self.link.pending() == 0 {
            return Ok(());
        }
        let _span = PerfSpan::new(span_names::DEFERRED);
        while let Some(command) = self.link.next_command() {
            tracing::debug!(target: targets::TOGGLE, ?command, "applying deferred command");
            match command {
                ToggleCommand::SetEnabled(enabled) => self.apply_enabled(enabled)?,
                ToggleCommand::SetChecked(checked) => self.apply_checked(checked)?,
                ToggleCommand::Close => self.close(),
            }
        }
        Ok(())
    }

    /// Make the toggle inert.
    pub fn close(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;
        self.parts.recognizer.enable(false);
        self.clicked.disconnect_all();
        self.toggled.disconnect_all();
        self.state_changed.disconnect_all();
        self.check_handler = None;
        self.link.close();
        tracing::debug!(target: targets::TOGGLE, "toggle closed");
    }

    /// Whether [`close`](Self::close) has run.
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    fn accepts(&self, gesture: &'static str) -> bool {
        if self.closed {
            tracing::trace!(target: targets::TOGGLE, gesture, "ignoring gesture on closed toggle");
            return false;
        }
        if !self.parts.recognizer.is_enabled() {
            tracing::trace!(target: targets::TOGGLE, gesture, "recognizer disarmed, dropping gesture");
            return false;
        }
        if !self.is_enabled() {
            tracing::trace!(target: targets::TOGGLE, gesture, "toggle disabled, dropping gesture");
            return false;
        }
        true
    }
}

impl TapTarget for ToggleButton {
    fn on_possible(&mut self, _event: &TapEvent) -> Result<()> {
        if !self.accepts("possible") {
            return Ok(());
        }
        let state = self.state();
        if state.phase() == ButtonState::Up {
            self.change_state(ToggleState::from_parts(state.is_checked(), ButtonState::Down))?;
        }
        self.process_deferred()
    }

    fn on_detected(&mut self, event: &TapEvent) -> Result<()> {
        if !self.accepts("detected") {
            return Ok(());
        }
        let checked = match self.state() {
            ToggleState::UncheckedDown => true,
            ToggleState::CheckedDown => false,
            _ => return self.process_deferred(),
        };
        self.change_state(ToggleState::from_parts(checked, ButtonState::Up))?;

        let payload = (*event, checked);
        if let Some(handler) = &self.check_handler
            && !handler.call(&payload)
        {
            tracing::trace!(target: targets::TOGGLE, "check handler already dropped");
        }
        self.clicked.emit(payload);
        self.toggled.emit(checked);
        self.process_deferred()
    }

    fn on_failed(&mut self, _event: &TapEvent) -> Result<()> {
        if !self.accepts("failed") {
            return Ok(());
        }
        let state = self.state();
        if state.phase() == ButtonState::Down {
            self.change_state(ToggleState::from_parts(state.is_checked(), ButtonState::Up))?;
        }
        self.process_deferred()
    }
}

impl fmt::Debug for ToggleButton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToggleButton")
            .field("state", &self.state())
            .field("closed", &self.closed)
            .field("has_check_handler", &self.check_handler.is_some())
            .finish()
    }
}

static_assertions::assert_impl_all!(ToggleButton: Send);
