//! Finite state machine with guarded transitions and enter/leave hooks.
//!
//! [`StateMachine`] drives the behaviour of every pressable control. Each state
//! is registered once with the set of states it may move to, plus optional
//! hooks that run when the state is left or entered.
//!
//! # Hooks and context
//!
//! Hooks do not capture the control they belong to. Instead the machine is
//! generic over a context type `C` that the owner passes into
//! [`change_state`](StateMachine::change_state); hooks receive `&mut C`
//! together with the [`Transition`] being performed. This keeps the machine and
//! the data its hooks mutate as separate borrows.
//!
//! A hook may ask for further transitions through [`Transition::request`].
//! Requests run after the requesting transition has committed, depth-first and
//! in request order, before the outer `change_state` call returns.
//!
//! # Example
//!
//! ```
//! use horizon_tactile_core::{StateMachine, StateSpec};
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
//! enum Door { Open, Closed }
//!
//! let mut machine = StateMachine::<Door, Vec<&'static str>>::new("Door", Door::Closed);
//! machine.add_state(StateSpec::new(Door::Closed).successors([Door::Open])).unwrap();
//! machine
//!     .add_state(
//!         StateSpec::new(Door::Open)
//!             .successors([Door::Closed])
//!             .on_enter(|log: &mut Vec<&'static str>, _| log.push("opened")),
//!     )
//!     .unwrap();
//!
//! let mut log = Vec::new();
//! machine.change_state(&mut log, Door::Open).unwrap();
//! assert_eq!(machine.state(), Door::Open);
//! assert_eq!(log, vec!["opened"]);
//!
//! // Open -> Open is not in the table.
//! assert!(machine.change_state(&mut log, Door::Open).is_err());
//! ```

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

use crate::error::StateError;
use crate::logging::targets;

/// Bound for types usable as state ids.
///
/// Blanket-implemented; control state enums get it by deriving
/// `Debug, Clone, Copy, PartialEq, Eq, Hash`.
pub trait StateId: Copy + Eq + Hash + fmt::Debug + Send + 'static {}

impl<T> StateId for T where T: Copy + Eq + Hash + fmt::Debug + Send + 'static {}

/// A hook run when a state is entered or left.
pub type Hook<S, C> = Box<dyn FnMut(&mut C, &mut Transition<S>) + Send>;

/// The transition currently being performed, as seen by hooks.
#[derive(Debug)]
pub struct Transition<S> {
    from: S,
    to: S,
    requests: Vec<S>,
}

impl<S: StateId> Transition<S> {
    fn new(from: S, to: S) -> Self {
        Self {
            from,
            to,
            requests: Vec::new(),
        }
    }

    /// The state being left.
    pub fn from(&self) -> S {
        self.from
    }

    /// The state being entered.
    pub fn to(&self) -> S {
        self.to
    }

    /// Request a follow-up transition once this one has committed.
    pub fn request(&mut self, target: S) {
        self.requests.push(target);
    }
}

/// Registration data for one state.
///
/// Built with the `with`-style methods and handed to
/// [`StateMachine::add_state`].
pub struct StateSpec<S, C> {
    id: S,
    successors: Vec<S>,
    on_enter: Option<Hook<S, C>>,
    on_leave: Option<Hook<S, C>>,
}

impl<S: StateId, C> StateSpec<S, C> {
    /// Start describing the state `id` with no successors and no hooks.
    pub fn new(id: S) -> Self {
        Self {
            id,
            successors: Vec::new(),
            on_enter: None,
            on_leave: None,
        }
    }

    /// Set the states this state may transition to.
    pub fn successors(mut self, successors: impl IntoIterator<Item = S>) -> Self {
        self.successors = successors.into_iter().collect();
        self
    }

    /// Set the hook run after the previous state's leave hook.
    pub fn on_enter<F>(mut self, hook: F) -> Self
    where
        F: FnMut(&mut C, &mut Transition<S>) + Send + 'static,
    {
        self.on_enter = Some(Box::new(hook));
        self
    }

    /// Set the hook run before the next state's enter hook.
    pub fn on_leave<F>(mut self, hook: F) -> Self
    where
        F: FnMut(&mut C, &mut Transition<S>) + Send + 'static,
    {
        self.on_leave = Some(Box::new(hook));
        self
    }
}

struct StateEntry<S, C> {
    successors: Vec<S>,
    on_enter: Option<Hook<S, C>>,
    on_leave: Option<Hook<S, C>>,
}

/// A named-state transition engine.
///
/// `S` is the state id type, `C` the context handed to hooks.
pub struct StateMachine<S, C> {
    name: String,
    states: HashMap<S, StateEntry<S, C>>,
    /// Registration order, for stable diagnostics.
    order: Vec<S>,
    current: S,
}

impl<S: StateId, C> StateMachine<S, C> {
    /// Create a machine starting in `initial`.
    ///
    /// `initial` still has to be registered with [`add_state`](Self::add_state)
    /// before the first transition.
    pub fn new(name: impl Into<String>, initial: S) -> Self {
        Self {
            name: name.into(),
            states: HashMap::new(),
            order: Vec::new(),
            current: initial,
        }
    }

    /// The diagnostic name of this machine.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The current state.
    pub fn state(&self) -> S {
        self.current
    }

    /// Register a state.
    ///
    /// Fails with [`StateError::DuplicateState`] if the id is already registered.
    pub fn add_state(&mut self, spec: StateSpec<S, C>) -> Result<(), StateError> {
        if self.states.contains_key(&spec.id) {
            return Err(StateError::duplicate(&self.name, spec.id));
        }
        self.order.push(spec.id);
        self.states.insert(
            spec.id,
            StateEntry {
                successors: spec.successors,
                on_enter: spec.on_enter,
                on_leave: spec.on_leave,
            },
        );
        Ok(())
    }

    /// Check whether `id` is registered.
    pub fn contains(&self, id: S) -> bool {
        self.states.contains_key(&id)
    }

    /// Check whether the table allows moving from the current state to `target`.
    pub fn can_change_to(&self, target: S) -> bool {
        self.states.contains_key(&target)
            && self
                .states
                .get(&self.current)
                .is_some_and(|entry| entry.successors.contains(&target))
    }

    /// The allowed successors of `id`, if registered.
    pub fn successors(&self, id: S) -> Option<&[S]> {
        self.states.get(&id).map(|entry| entry.successors.as_slice())
    }

    /// Registered state ids in registration order.
    pub fn states(&self) -> impl Iterator<Item = S> + '_ {
        self.order.iter().copied()
    }

    /// Move to `target`.
    ///
    /// Runs the leave hook of the current state, then the enter hook of
    /// `target`, then commits. Follow-up transitions requested by either hook
    /// run afterwards. If the transition is rejected nothing runs and the
    /// state is unchanged.
    pub fn change_state(&mut self, ctx: &mut C, target: S) -> Result<(), StateError> {
        let from = self.current;
        if !self.states.contains_key(&target) {
            tracing::debug!(target: targets::STATE_MACHINE, machine = %self.name, ?target, "unknown target state");
            return Err(StateError::unknown(&self.name, target));
        }
        let Some(entry) = self.states.get_mut(&from) else {
            tracing::debug!(target: targets::STATE_MACHINE, machine = %self.name, ?from, "current state not registered");
            return Err(StateError::unknown(&self.name, from));
        };
        if !entry.successors.contains(&target) {
            tracing::debug!(target: targets::STATE_MACHINE, machine = %self.name, ?from, ?target, "illegal transition");
            return Err(StateError::illegal(&self.name, from, target));
        }

        let mut transition = Transition::new(from, target);
        if let Some(hook) = entry.on_leave.as_mut() {
            hook(ctx, &mut transition);
        }
        if let Some(hook) = self
            .states
            .get_mut(&target)
            .and_then(|entry| entry.on_enter.as_mut())
        {
            hook(ctx, &mut transition);
        }
        self.current = target;
        tracing::trace!(target: targets::STATE_MACHINE, machine = %self.name, ?from, to = ?target, "state changed");

        for next in std::mem::take(&mut transition.requests) {
            self.change_state(ctx, next)?;
        }
        Ok(())
    }
}

impl<S: StateId, C> fmt::Debug for StateMachine<S, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateMachine")
            .field("name", &self.name)
            .field("current", &self.current)
            .field("states", &self.order)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    enum Phase {
        Up,
        Down,
        Disabled,
    }

    type Log = Vec<String>;

    fn log_enter(log: &mut Log, t: &mut Transition<Phase>) {
        log.push(format!("enter {:?}", t.to()));
    }

    fn log_leave(log: &mut Log, t: &mut Transition<Phase>) {
        log.push(format!("leave {:?}", t.from()));
    }

    fn press_machine() -> StateMachine<Phase, Log> {
        let mut machine = StateMachine::new("Press", Phase::Up);
        machine
            .add_state(
                StateSpec::new(Phase::Up)
                    .successors([Phase::Down, Phase::Disabled])
                    .on_enter(log_enter)
                    .on_leave(log_leave),
            )
            .unwrap();
        machine
            .add_state(
                StateSpec::new(Phase::Down)
                    .successors([Phase::Up, Phase::Disabled])
                    .on_enter(log_enter)
                    .on_leave(log_leave),
            )
            .unwrap();
        machine
            .add_state(
                StateSpec::new(Phase::Disabled)
                    .successors([Phase::Up])
                    .on_enter(log_enter)
                    .on_leave(log_leave),
            )
            .unwrap();
        machine
    }

    #[test]
    fn test_initial_state() {
        let machine = press_machine();
        assert_eq!(machine.state(), Phase::Up);
        assert_eq!(machine.name(), "Press");
        assert_eq!(
            machine.states().collect::<Vec<_>>(),
            vec![Phase::Up, Phase::Down, Phase::Disabled]
        );
    }

    #[test]
    fn test_legal_transition_runs_leave_then_enter() {
        let mut machine = press_machine();
        let mut log = Log::new();

        machine.change_state(&mut log, Phase::Down).unwrap();

        assert_eq!(machine.state(), Phase::Down);
        assert_eq!(log, vec!["leave Up", "enter Down"]);
    }

    #[test]
    fn test_illegal_transition_is_atomic() {
        let mut machine = press_machine();
        let mut log = Log::new();
        machine.change_state(&mut log, Phase::Disabled).unwrap();
        log.clear();

        let err = machine.change_state(&mut log, Phase::Down).unwrap_err();

        assert_eq!(err, StateError::illegal("Press", Phase::Disabled, Phase::Down));
        assert_eq!(machine.state(), Phase::Disabled);
        assert!(log.is_empty());
    }

    #[test]
    fn test_self_transition_is_illegal() {
        let mut machine = press_machine();
        let mut log = Log::new();
        assert!(matches!(
            machine.change_state(&mut log, Phase::Up),
            Err(StateError::IllegalTransition { .. })
        ));
        assert_eq!(machine.state(), Phase::Up);
    }

    #[test]
    fn test_duplicate_state_rejected() {
        let mut machine = press_machine();
        let err = machine
            .add_state(StateSpec::new(Phase::Down).successors([Phase::Up]))
            .unwrap_err();
        assert!(matches!(err, StateError::DuplicateState { .. }));
        // First registration is kept.
        assert_eq!(
            machine.successors(Phase::Down),
            Some(&[Phase::Up, Phase::Disabled][..])
        );
    }

    #[test]
    fn test_unknown_target_rejected() {
        let mut machine: StateMachine<Phase, Log> = StateMachine::new("Partial", Phase::Up);
        machine
            .add_state(StateSpec::new(Phase::Up).successors([Phase::Down]))
            .unwrap();
        let mut log = Log::new();

        let err = machine.change_state(&mut log, Phase::Down).unwrap_err();
        assert!(matches!(err, StateError::UnknownState { .. }));
        assert_eq!(machine.state(), Phase::Up);
    }

    #[test]
    fn test_can_change_to() {
        let machine = press_machine();
        assert!(machine.can_change_to(Phase::Down));
        assert!(machine.can_change_to(Phase::Disabled));
        assert!(!machine.can_change_to(Phase::Up));
        assert!(machine.contains(Phase::Disabled));
    }

    #[test]
    fn test_hook_requested_transitions_run_depth_first() {
        let mut machine: StateMachine<Phase, Log> = StateMachine::new("Bounce", Phase::Up);
        machine
            .add_state(
                StateSpec::new(Phase::Up)
                    .successors([Phase::Down])
                    .on_enter(log_enter),
            )
            .unwrap();
        machine
            .add_state(
                StateSpec::new(Phase::Down)
                    .successors([Phase::Disabled])
                    .on_enter(|log: &mut Log, t: &mut Transition<Phase>| {
                        log.push("enter Down".into());
                        t.request(Phase::Disabled);
                    }),
            )
            .unwrap();
        machine
            .add_state(
                StateSpec::new(Phase::Disabled)
                    .successors([Phase::Up])
                    .on_enter(|log: &mut Log, t: &mut Transition<Phase>| {
                        log.push("enter Disabled".into());
                        t.request(Phase::Up);
                    }),
            )
            .unwrap();
        let mut log = Log::new();

        machine.change_state(&mut log, Phase::Down).unwrap();

        assert_eq!(machine.state(), Phase::Up);
        assert_eq!(log, vec!["enter Down", "enter Disabled", "enter Up"]);
    }

    #[test]
    fn test_failing_follow_up_keeps_committed_state() {
        let mut machine: StateMachine<Phase, Log> = StateMachine::new("Broken", Phase::Up);
        machine
            .add_state(StateSpec::new(Phase::Up).successors([Phase::Down]))
            .unwrap();
        machine
            .add_state(
                StateSpec::new(Phase::Down)
                    .successors([Phase::Up])
                    .on_enter(|_: &mut Log, t: &mut Transition<Phase>| {
                        t.request(Phase::Disabled);
                    }),
            )
            .unwrap();
        let mut log = Log::new();

        let err = machine.change_state(&mut log, Phase::Down).unwrap_err();
        assert!(matches!(err, StateError::UnknownState { .. }));
        assert_eq!(machine.state(), Phase::Down);
    }
}
