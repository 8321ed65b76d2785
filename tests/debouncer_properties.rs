// tests/debouncer_properties.rs

use proptest::prelude::*;

use observe::watch::{ChangeEvent, ChangeKind, Debouncer, Decision};

#[derive(Debug, Clone)]
enum Op {
    Tick,
    Event(ChangeKind),
}

fn kind_strategy() -> impl Strategy<Value = ChangeKind> {
    prop_oneof![
        3 => Just(ChangeKind::Write),
        1 => Just(ChangeKind::Create),
        1 => Just(ChangeKind::Remove),
        1 => Just(ChangeKind::Rename),
        1 => Just(ChangeKind::Chmod),
    ]
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        1 => Just(Op::Tick),
        4 => kind_strategy().prop_map(Op::Event),
    ]
}

proptest! {
    #[test]
    fn non_writes_are_always_ignored(ops in prop::collection::vec(op_strategy(), 0..200)) {
        let mut debouncer = Debouncer::new();
        for op in ops {
            match op {
                Op::Tick => debouncer.on_tick(),
                Op::Event(kind) => {
                    let decision = debouncer.on_event(&ChangeEvent::new("f", kind));
                    if kind != ChangeKind::Write {
                        prop_assert_eq!(decision, Decision::Ignored);
                    } else {
                        prop_assert_ne!(decision, Decision::Ignored);
                    }
                }
            }
        }
    }

    #[test]
    fn every_trigger_needs_a_tick_since_the_previous_one(
        ops in prop::collection::vec(op_strategy(), 0..200)
    ) {
        let mut debouncer = Debouncer::new();
        let mut ticked_since_trigger = false;
        let mut triggers = 0usize;
        let mut ticks = 0usize;

        for op in ops {
            match op {
                Op::Tick => {
                    debouncer.on_tick();
                    ticked_since_trigger = true;
                    ticks += 1;
                }
                Op::Event(kind) => {
                    let decision = debouncer.on_event(&ChangeEvent::new("f", kind));
                    if decision == Decision::Trigger {
                        prop_assert!(ticked_since_trigger);
                        ticked_since_trigger = false;
                        triggers += 1;
                    } else if kind == ChangeKind::Write {
                        // A write is only suppressed when no tick happened.
                        prop_assert!(!ticked_since_trigger);
                    }
                }
            }
            prop_assert_eq!(debouncer.is_quiet(), ticked_since_trigger);
        }

        prop_assert!(triggers <= ticks);
    }
}
