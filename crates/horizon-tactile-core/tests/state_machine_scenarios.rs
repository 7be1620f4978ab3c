//! Integration tests for state machines wired to signals.

use std::sync::Arc;

use horizon_tactile_core::{
    Signal, StateError, StateGraphDebug, StateMachine, StateSpec, Transition, TreeStyle,
};
use parking_lot::Mutex;
use tracing_subscriber::EnvFilter;

fn setup() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Latch {
    Open,
    Pressed,
    Locked,
    Off,
}

/// Context shared by the hooks: a log and a notification topic.
struct Panel {
    log: Vec<String>,
    entered: Signal<Latch>,
    auto_lock: bool,
}

fn announce(panel: &mut Panel, transition: &mut Transition<Latch>) {
    panel.log.push(format!("{:?} -> {:?}", transition.from(), transition.to()));
    panel.entered.emit(transition.to());
}

fn lock_after_press(panel: &mut Panel, transition: &mut Transition<Latch>) {
    announce(panel, transition);
    if panel.auto_lock {
        transition.request(Latch::Locked);
    }
}

fn latch_machine() -> StateMachine<Latch, Panel> {
    let mut machine = StateMachine::new("Latch", Latch::Open);
    machine
        .add_state(
            StateSpec::new(Latch::Open)
                .successors([Latch::Pressed, Latch::Off])
                .on_enter(announce),
        )
        .unwrap();
    machine
        .add_state(
            StateSpec::new(Latch::Pressed)
                .successors([Latch::Open, Latch::Locked])
                .on_enter(lock_after_press),
        )
        .unwrap();
    machine
        .add_state(
            StateSpec::new(Latch::Locked)
                .successors([Latch::Open])
                .on_enter(announce),
        )
        .unwrap();
    machine
        .add_state(StateSpec::new(Latch::Off).successors([Latch::Open]))
        .unwrap();
    machine
}

fn panel() -> Panel {
    Panel {
        log: Vec::new(),
        entered: Signal::new(),
        auto_lock: false,
    }
}

#[test]
fn test_hooks_publish_through_signal() {
    setup();
    let mut machine = latch_machine();
    let mut panel = panel();
    let seen = Arc::new(Mutex::new(Vec::new()));
    let seen_clone = seen.clone();
    let guard = panel.entered.connect_scoped(move |&state| {
        seen_clone.lock().push(state);
    });

    machine.change_state(&mut panel, Latch::Pressed).unwrap();
    machine.change_state(&mut panel, Latch::Open).unwrap();
    drop(guard);
    machine.change_state(&mut panel, Latch::Pressed).unwrap();

    assert_eq!(*seen.lock(), vec![Latch::Pressed, Latch::Open]);
    assert_eq!(panel.log.len(), 3);
    assert_eq!(panel.entered.connection_count(), 0);
}

#[test]
fn test_follow_up_request_completes_before_return() {
    setup();
    let mut machine = latch_machine();
    let mut panel = Panel {
        auto_lock: true,
        ..panel()
    };

    machine.change_state(&mut panel, Latch::Pressed).unwrap();

    assert_eq!(machine.state(), Latch::Locked);
    assert_eq!(panel.log, vec!["Open -> Pressed", "Pressed -> Locked"]);
}

#[test]
fn test_rejected_transition_leaves_everything_untouched() {
    setup();
    let mut machine = latch_machine();
    let mut panel = panel();

    let err = machine.change_state(&mut panel, Latch::Locked).unwrap_err();

    assert!(matches!(err, StateError::IllegalTransition { .. }));
    assert_eq!(machine.state(), Latch::Open);
    assert!(panel.log.is_empty());
}

#[test]
fn test_state_graph_rendering() {
    let machine = latch_machine();
    let graph = StateGraphDebug::with_style(TreeStyle::Compact).format(&machine);

    assert!(graph.starts_with("Latch (current: Open):"));
    assert!(graph.contains("Pressed -> [Open, Locked]"));
    assert!(graph.contains("Off -> [Open]"));
}
