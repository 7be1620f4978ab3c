//! Plumbing shared by the pressable controls.

use std::sync::Arc;

use horizon_tactile_core::{ConfigError, StateId, Transition};

use super::config::TouchConfig;
use super::gesture::Recognizer;
use super::targets;
use super::visual::{SharedVisual, SwitchNode, VisualNode};

/// The part of a pressable control its state hooks operate on.
pub(crate) struct PressParts<S> {
    pub(crate) visuals: SwitchNode<S>,
    pub(crate) recognizer: Box<dyn Recognizer>,
}

impl<S: StateId> PressParts<S> {
    pub(crate) fn new(visuals: SwitchNode<S>, recognizer: Box<dyn Recognizer>) -> Self {
        Self {
            visuals,
            recognizer,
        }
    }
}

/// Enter hook: show the visual of the entered state.
pub(crate) fn show_state<S: StateId>(parts: &mut PressParts<S>, transition: &mut Transition<S>) {
    if let Err(err) = parts.visuals.set_active_id(transition.to()) {
        tracing::warn!(target: targets::CONTROL, %err, "no visual for entered state");
    }
}

/// Enter hook of disabled states: show the visual and disarm the recognizer.
pub(crate) fn enter_disabled<S: StateId>(
    parts: &mut PressParts<S>,
    transition: &mut Transition<S>,
) {
    show_state(parts, transition);
    parts.recognizer.enable(false);
}

/// Leave hook of disabled states.
pub(crate) fn leave_disabled<S: StateId>(parts: &mut PressParts<S>, _: &mut Transition<S>) {
    parts.recognizer.enable(true);
}

/// Pick the visual that receives gestures.
///
/// Fat finger enlargement creates an invisible area at least as large as the
/// minimum hit target; it cannot be combined with an explicit area.
pub(crate) fn resolve_active_area(
    control: &'static str,
    fat_finger_enlarge: bool,
    explicit: Option<SharedVisual>,
    up: &SharedVisual,
    config: &TouchConfig,
) -> Result<SharedVisual, ConfigError> {
    match (fat_finger_enlarge, explicit) {
        (true, Some(_)) => Err(ConfigError::invalid(
            control,
            "fat finger enlargement cannot be combined with an explicit active area",
        )),
        (true, None) => {
            let size = config.enlarge(up.size());
            tracing::trace!(target: targets::CONTROL, control, ?size, "enlarged active area");
            let area: SharedVisual = Arc::new(VisualNode::new(format!("{control} active area"), size));
            Ok(area)
        }
        (false, Some(area)) => Ok(area),
        (false, None) => Ok(up.clone()),
    }
}
