//! Push button driven by tap gestures.
//!
//! [`Button`] moves between [`ButtonState::Up`], [`ButtonState::Down`] and
//! [`ButtonState::Disabled`] in response to the tap lifecycle, showing one
//! visual per state.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use horizon_tactile::prelude::*;
//!
//! # fn main() -> horizon_tactile::Result<()> {
//! let up = VisualNode::shared("up", Size::new(80.0, 40.0));
//! let down = VisualNode::shared("down", Size::new(80.0, 40.0));
//! let mut button = Button::builder(up.clone(), down).build()?;
//!
//! let on_click: Handler<TapEvent> = Arc::new(|event| {
//!     println!("clicked at {:?}", event.position);
//! });
//! button.set_click_handler(&on_click);
//!
//! let tap = TapEvent::new(Point::new(10.0, 10.0), 0);
//! button.handle_tap(&TapGesture::Possible(tap))?;
//! assert_eq!(button.state(), ButtonState::Down);
//! button.handle_tap(&TapGesture::Detected(tap))?;
//! assert_eq!(button.state(), ButtonState::Up);
//! assert!(up.is_active());
//! # Ok(())
//! # }
//! ```

use std::fmt;

use horizon_tactile_core::logging::span_names;
use horizon_tactile_core::{
    Handler, PerfSpan, Result, Signal, StateError, StateGraphDebug, StateMachine, StateSpec,
    WeakHandler,
};

use crate::widget::config::TouchConfig;
use crate::widget::control::{ControlHandle, ControlLink};
use crate::widget::gesture::{Recognizer, RecognizerGate, TapEvent, TapTarget};
use crate::widget::press::{self, PressParts};
use crate::widget::targets;
use crate::widget::visual::{SharedVisual, SwitchNode};

const CONTROL_NAME: &str = "Button";

/// States of a [`Button`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ButtonState {
    /// Released and accepting input.
    Up,
    /// Pressed; the tap is not confirmed yet.
    Down,
    /// Not accepting input.
    Disabled,
}

impl ButtonState {
    /// Whether this state accepts input.
    pub fn is_enabled(self) -> bool {
        self != Self::Disabled
    }
}

/// Commands a [`ControlHandle`] can queue for a [`Button`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonCommand {
    /// Enable or disable the button.
    SetEnabled(bool),
    /// Make the button inert.
    Close,
}

/// Builder for [`Button`].
pub struct ButtonBuilder {
    up: SharedVisual,
    down: SharedVisual,
    disabled: Option<SharedVisual>,
    active_area: Option<SharedVisual>,
    fat_finger_enlarge: bool,
    enabled: bool,
    config: TouchConfig,
    recognizer: Option<Box<dyn Recognizer>>,
    click_handler: Option<WeakHandler<TapEvent>>,
}

impl ButtonBuilder {
    fn new(up: SharedVisual, down: SharedVisual) -> Self {
        Self {
            up,
            down,
            disabled: None,
            active_area: None,
            fat_finger_enlarge: false,
            enabled: true,
            config: TouchConfig::default(),
            recognizer: None,
            click_handler: None,
        }
    }

    /// Set the visual shown while disabled. Defaults to the up visual.
    pub fn disabled(mut self, visual: SharedVisual) -> Self {
        self.disabled = Some(visual);
        self
    }

    /// Set the area that receives gestures. Defaults to the up visual.
    pub fn active_area(mut self, area: SharedVisual) -> Self {
        self.active_area = Some(area);
        self
    }

    /// Grow the active area to the minimum finger-friendly size.
    pub fn fat_finger_enlarge(mut self, enlarge: bool) -> Self {
        self.fat_finger_enlarge = enlarge;
        self
    }

    /// Set whether the button starts enabled.
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

    /// Set the click handler. Only a weak reference is kept.
    pub fn click_handler(mut self, handler: &Handler<TapEvent>) -> Self {
        self.click_handler = Some(WeakHandler::new(handler));
        self
    }

    /// Build the button.
    ///
    /// Fails if fat finger enlargement is combined with an explicit active
    /// area, or if the touch configuration is unusable.
    pub fn build(self) -> Result<Button> {
        self.config.validate(CONTROL_NAME)?;
        let active_area = press::resolve_active_area(
            CONTROL_NAME,
            self.fat_finger_enlarge,
            self.active_area,
            &self.up,
            &self.config,
        )?;

        let disabled = self.disabled.unwrap_or_else(|| self.up.clone());
        let visuals = SwitchNode::new(CONTROL_NAME)
            .with(ButtonState::Up, self.up)
            .with(ButtonState::Down, self.down)
            .with(ButtonState::Disabled, disabled);
        visuals.set_active_id(ButtonState::Up)?;

        let recognizer = self
            .recognizer
            .unwrap_or_else(|| Box::new(RecognizerGate::new()));

        let mut button = Button {
            machine: button_machine()?,
            parts: PressParts::new(visuals, recognizer),
            active_area,
            click_handler: self.click_handler,
            link: ControlLink::new(),
            closed: false,
            clicked: Signal::new(),
            state_changed: Signal::new(),
        };
        if !self.enabled {
            button.change_state(ButtonState::Disabled)?;
        }
        Ok(button)
    }
}

fn button_machine() -> std::result::Result<ButtonMachine, StateError> {
    use ButtonState::*;

    let mut machine = StateMachine::new(CONTROL_NAME, Up);
    machine.add_state(
        StateSpec::new(Up)
            .successors([Down, Disabled])
            .on_enter(press::show_state),
    )?;
    machine.add_state(
        StateSpec::new(Down)
            .successors([Up, Disabled])
            .on_enter(press::show_state),
    )?;
    machine.add_state(
        StateSpec::new(Disabled)
            .successors([Up])
            .on_enter(press::enter_disabled)
            .on_leave(press::leave_disabled),
    )?;
    Ok(machine)
}

type ButtonMachine = StateMachine<ButtonState, PressParts<ButtonState>>;

/// A push button operated by taps.
///
/// # Signals
///
/// - `clicked(TapEvent)`: Emitted for every detected tap, after the state has
///   settled in `Up` and after the click handler ran
/// - `state_changed(ButtonState)`: Emitted after every committed transition
pub struct Button {
    machine: ButtonMachine,
    parts: PressParts<ButtonState>,
    active_area: SharedVisual,
    click_handler: Option<WeakHandler<TapEvent>>,
    link: ControlLink<ButtonCommand>,
    closed: bool,

    /// Signal emitted when a tap completes.
    pub clicked: Signal<TapEvent>,

    /// Signal emitted after each state transition.
    pub state_changed: Signal<ButtonState>,
}

impl Button {
    /// Start building a button from its up and down visuals.
    pub fn builder(up: SharedVisual, down: SharedVisual) -> ButtonBuilder {
        ButtonBuilder::new(up, down)
    }

    // =========================================================================
    // State
    // =========================================================================

    /// The current state.
    pub fn state(&self) -> ButtonState {
        self.machine.state()
    }

    /// Whether the button accepts input.
    pub fn is_enabled(&self) -> bool {
        self.state().is_enabled()
    }

    /// Enable or disable the button.
    ///
    /// Disabling disarms the recognizer, so a press in progress receives no
    /// further events. Setting the current value again does nothing.
    pub fn set_enabled(&mut self, enabled: bool) -> Result<()> {
        self.apply_enabled(enabled)?;
        self.process_deferred()
    }

    fn apply_enabled(&mut self, enabled: bool) -> Result<()> {
        if self.closed {
            return Ok(());
        }
        match (enabled, self.state()) {
            (true, ButtonState::Disabled) => self.change_state(ButtonState::Up),
            (false, ButtonState::Up | ButtonState::Down) => {
                self.change_state(ButtonState::Disabled)
            }
            _ => Ok(()),
        }
    }

    fn change_state(&mut self, target: ButtonState) -> Result<()> {
        self.machine.change_state(&mut self.parts, target)?;
        self.state_changed.emit(target);
        Ok(())
    }

    /// Render the transition table for debugging.
    pub fn state_graph(&self) -> String {
        StateGraphDebug::new().format(&self.machine)
    }

    // =========================================================================
    // Handlers and Parts
    // =========================================================================

    /// Set the click handler. Only a weak reference is kept.
    pub fn set_click_handler(&mut self, handler: &Handler<TapEvent>) {
        self.click_handler = Some(WeakHandler::new(handler));
    }

    /// Remove the click handler.
    pub fn clear_click_handler(&mut self) {
        self.click_handler = None;
    }

    /// The area that receives gestures.
    pub fn active_area(&self) -> &SharedVisual {
        &self.active_area
    }

    /// The state visuals.
    pub fn visuals(&self) -> &SwitchNode<ButtonState> {
        &self.parts.visuals
    }

    /// The recognizer switch.
    pub fn recognizer(&self) -> &dyn Recognizer {
        self.parts.recognizer.as_ref()
    }

    // =========================================================================
    // Deferred Commands
    // =========================================================================

    /// Create a handle callbacks can use to reach this button.
    pub fn handle(&self) -> ControlHandle<ButtonCommand> {
        self.link.handle()
    }

    /// Apply commands queued through [`handle`](Self::handle).
    pub fn process_deferred(&mut self) -> Result<()> {
        if self.link.pending() == 0 {
            return Ok(());
        }
        let _span = PerfSpan::new(span_names::DEFERRED);
        while let Some(command) = self.link.next_command() {
            tracing::debug!(target: targets::BUTTON, ?command, "applying deferred command");
            match command {
                ButtonCommand::SetEnabled(enabled) => self.apply_enabled(enabled)?,
                ButtonCommand::Close => self.close(),
            }
        }
        Ok(())
    }

    /// Make the button inert.
    ///
    /// Disarms the recognizer, disconnects all signals, drops the click
    /// handler and kills every handle. Later gestures are ignored.
    pub fn close(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;
        self.parts.recognizer.enable(false);
        self.clicked.disconnect_all();
        self.state_changed.disconnect_all();
        self.click_handler = None;
        self.link.close();
        tracing::debug!(target: targets::BUTTON, "button closed");
    }

    /// Whether [`close`](Self::close) has run.
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    fn accepts(&self, gesture: &'static str) -> bool {
        if self.closed {
            tracing::trace!(target: targets::BUTTON, gesture, "ignoring gesture on closed button");
            return false;
        }
        if !self.parts.recognizer.is_enabled() {
            tracing::trace!(target: targets::BUTTON, gesture, "recognizer disarmed, dropping gesture");
            return false;
        }
        if !self.is_enabled() {
            tracing::trace!(target: targets::BUTTON, gesture, "button disabled, dropping gesture");
            return false;
        }
        true
    }
}

impl TapTarget for Button {
    fn on_possible(&mut self, _event: &TapEvent) -> Result<()> {
        if !self.accepts("possible") {
            return Ok(());
        }
        if self.state() == ButtonState::Up {
            self.change_state(ButtonState::Down)?;
        }
        self.process_deferred()
    }

    fn on_detected(&mut self, event: &TapEvent) -> Result<()> {
        if !self.accepts("detected") {
            return Ok(());
        }
        if self.state() == ButtonState::Down {
            self.change_state(ButtonState::Up)?;
        }
        if let Some(handler) = &self.click_handler
            && !handler.call(event)
        {
            tracing::trace!(target: targets::BUTTON, "click handler already dropped");
        }
        self.clicked.emit(*event);
        self.process_deferred()
    }

    fn on_failed(&mut self, _event: &TapEvent) -> Result<()> {
        if !self.accepts("failed") {
            return Ok(());
        }
        if self.state() == ButtonState::Down {
            self.change_state(ButtonState::Up)?;
        }
        self.process_deferred()
    }
}

impl fmt::Debug for Button {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Button")
            .field("state", &self.state())
            .field("closed", &self.closed)
            .field("has_click_handler", &self.click_handler.is_some())
            .finish()
    }
}

// Ensure Button can move to another thread
static_assertions::assert_impl_all!(Button: Send);
