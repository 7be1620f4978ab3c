//! Error types for Horizon Tactile.
//!
//! Every error here is a wiring mistake rather than a runtime condition: a
//! behaviour graph that names a state twice, a transition the graph does not
//! allow, or a control configured with contradictory options. They surface at
//! the call that caused them and are never swallowed.
//!
//! Clamping out-of-range values is not an error and never produces one.

/// The main error type for Horizon Tactile operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TactileError {
    /// State machine wiring error.
    #[error("State machine error: {0}")]
    State(#[from] StateError),

    /// Control configuration error.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Errors raised by [`StateMachine`](crate::StateMachine) and state-keyed lookups.
///
/// State ids are carried in their `Debug` rendering so the error type does not
/// need to be generic over the id type.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StateError {
    /// A state id was registered twice on the same machine.
    #[error("{machine}: state {state} is already registered")]
    DuplicateState {
        /// Diagnostic name of the machine.
        machine: String,
        /// The duplicated state id.
        state: String,
    },

    /// A state id is not registered.
    #[error("{machine}: state {state} is not registered")]
    UnknownState {
        /// Diagnostic name of the machine (or lookup table).
        machine: String,
        /// The unknown state id.
        state: String,
    },

    /// The target is not an allowed successor of the current state.
    #[error("{machine}: illegal transition {from} -> {to}")]
    IllegalTransition {
        /// Diagnostic name of the machine.
        machine: String,
        /// The state the machine was in.
        from: String,
        /// The rejected target state.
        to: String,
    },
}

impl StateError {
    /// Create a duplicate-state error.
    pub fn duplicate(machine: impl Into<String>, state: impl std::fmt::Debug) -> Self {
        Self::DuplicateState {
            machine: machine.into(),
            state: format!("{state:?}"),
        }
    }

    /// Create an unknown-state error.
    pub fn unknown(machine: impl Into<String>, state: impl std::fmt::Debug) -> Self {
        Self::UnknownState {
            machine: machine.into(),
            state: format!("{state:?}"),
        }
    }

    /// Create an illegal-transition error.
    pub fn illegal(
        machine: impl Into<String>,
        from: impl std::fmt::Debug,
        to: impl std::fmt::Debug,
    ) -> Self {
        Self::IllegalTransition {
            machine: machine.into(),
            from: format!("{from:?}"),
            to: format!("{to:?}"),
        }
    }
}

/// Errors raised while configuring a control.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// The requested combination of options cannot be satisfied.
    #[error("{control}: invalid configuration: {reason}")]
    InvalidConfiguration {
        /// The control being configured.
        control: &'static str,
        /// What was wrong.
        reason: String,
    },
}

impl ConfigError {
    /// Create an invalid-configuration error.
    pub fn invalid(control: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            control,
            reason: reason.into(),
        }
    }
}

/// A specialized Result type for Horizon Tactile operations.
pub type Result<T> = std::result::Result<T, TactileError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    enum Phase {
        Up,
        Down,
    }

    #[test]
    fn test_illegal_transition_message() {
        let err = StateError::illegal("Button", Phase::Up, Phase::Down);
        assert_eq!(err.to_string(), "Button: illegal transition Up -> Down");
    }

    #[test]
    fn test_state_error_converts() {
        let err: TactileError = StateError::duplicate("Toggle", Phase::Down).into();
        assert!(matches!(
            err,
            TactileError::State(StateError::DuplicateState { .. })
        ));
        assert_eq!(
            err.to_string(),
            "State machine error: Toggle: state Down is already registered"
        );
    }

    #[test]
    fn test_config_error_message() {
        let err: TactileError =
            ConfigError::invalid("Button", "both enlarge and active area").into();
        assert_eq!(
            err.to_string(),
            "Configuration error: Button: invalid configuration: both enlarge and active area"
        );
    }
}
