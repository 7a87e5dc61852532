//! End-to-end callback scenarios against the scripted engine.

use std::cell::Cell;
use std::rc::Rc;

use approx::assert_relative_eq;

use switchboard_core::{Callback, CallbackError, EventCode, Params};
use switchboard_solve::scripted::{Progress, ScriptedEngine, ScriptedEvent, Status};
use switchboard_solve::Model;

const NODE: EventCode = EventCode::new(1);
const SOLUTION: EventCode = EventCode::new(2);
const ITERATION: EventCode = EventCode::new(3);

fn counting_fn(
    counter: &Rc<Cell<usize>>,
) -> impl FnMut(&mut Params, &mut Progress) -> Result<(), CallbackError> + 'static {
    let counter = Rc::clone(counter);
    move |_, _| {
        counter.set(counter.get() + 1);
        Ok(())
    }
}

#[test]
fn events_reach_only_their_subscribers() {
    let mut model = Model::new(ScriptedEngine::new(vec![
        ScriptedEvent::new(NODE, 10.0),
        ScriptedEvent::new(SOLUTION, 9.0),
        ScriptedEvent::new(ITERATION, 9.0),
    ]));

    let node_calls = Rc::new(Cell::new(0));
    let solution_calls = Rc::new(Cell::new(0));
    model
        .add_callback_fn(counting_fn(&node_calls), NODE, Params::new())
        .unwrap();
    model
        .add_callback_fn(counting_fn(&solution_calls), SOLUTION, Params::new())
        .unwrap();

    let outcome = model.solve().unwrap();

    // The ITERATION event had no subscriber and passed through silently.
    assert_eq!(outcome.status, Status::Optimal);
    assert_eq!(outcome.events_delivered, 3);
    assert_eq!(node_calls.get(), 1);
    assert_eq!(solution_calls.get(), 1);
}

#[test]
fn zero_registrations_solve_without_a_callback() {
    let mut model = Model::new(
        ScriptedEngine::new(vec![ScriptedEvent::new(NODE, 1.0)]).with_final_objective(42.0),
    );

    let outcome = model.solve().unwrap();

    assert!(!outcome.callback_installed);
    assert_eq!(outcome.events_delivered, 0);
    assert_relative_eq!(outcome.objective, 42.0);
}

#[test]
fn native_callback_accumulates_state_across_events() {
    struct SolutionCounter {
        code: EventCode,
        seen: Rc<Cell<usize>>,
    }

    impl Callback<Progress> for SolutionCounter {
        fn event_code(&self) -> EventCode {
            self.code
        }

        fn set_event_code(&mut self, code: EventCode) {
            self.code = code;
        }

        fn on_event(&mut self, _: &mut Progress) -> Result<(), CallbackError> {
            self.seen.set(self.seen.get() + 1);
            Ok(())
        }
    }

    let mut model = Model::new(ScriptedEngine::new(vec![
        ScriptedEvent::new(SOLUTION, 5.0),
        ScriptedEvent::new(SOLUTION, 4.0),
        ScriptedEvent::new(SOLUTION, 3.0),
    ]));

    let seen = Rc::new(Cell::new(0));
    model.add_callback(SolutionCounter {
        code: SOLUTION,
        seen: Rc::clone(&seen),
    });

    model.solve().unwrap();

    assert_eq!(seen.get(), 3);
}

#[test]
fn params_counter_accumulates_across_solves() {
    let mut model = Model::new(ScriptedEngine::new(vec![
        ScriptedEvent::new(NODE, 2.0),
        ScriptedEvent::new(NODE, 1.0),
    ]));

    let final_count = Rc::new(Cell::new(0));
    let observed = Rc::clone(&final_count);
    model
        .add_callback_fn(
            move |params, _| {
                let count = params.get_int("count").unwrap_or(0) + 1;
                params.set("count", count);
                observed.set(count);
                Ok(())
            },
            NODE,
            Params::new().with("count", 0_i64),
        )
        .unwrap();

    model.solve().unwrap();
    model.solve().unwrap();

    // Two NODE events per solve, two solves.
    assert_eq!(final_count.get(), 4);
}

#[test]
fn termination_interrupts_the_solve() {
    let mut model = Model::new(
        ScriptedEngine::new(vec![
            ScriptedEvent::new(SOLUTION, 10.0),
            ScriptedEvent::new(SOLUTION, 6.0),
            ScriptedEvent::new(SOLUTION, 2.0),
        ])
        .with_final_objective(0.0),
    );

    // Stop as soon as the incumbent is good enough.
    model
        .add_callback_fn(
            |params, progress: &mut Progress| {
                let good_enough = params.get_float("target").unwrap_or(f64::NEG_INFINITY);
                if progress.objective <= good_enough {
                    Err(CallbackError::Terminate)
                } else {
                    Ok(())
                }
            },
            SOLUTION,
            Params::new().with("target", 6.0),
        )
        .unwrap();

    let outcome = model.solve().unwrap();

    assert_eq!(outcome.status, Status::Interrupted);
    assert_eq!(outcome.events_delivered, 2);
    assert_relative_eq!(outcome.objective, 6.0);
}

#[test]
fn failure_in_one_callback_stops_later_callbacks() {
    let mut model = Model::new(ScriptedEngine::new(vec![ScriptedEvent::new(NODE, 1.0)]));

    let later_calls = Rc::new(Cell::new(0));
    model
        .add_callback_fn(
            |_, _| Err(CallbackError::failed("bad bound estimate")),
            NODE,
            Params::new(),
        )
        .unwrap();
    model
        .add_callback_fn(counting_fn(&later_calls), NODE, Params::new())
        .unwrap();

    let result = model.solve();

    assert!(result.is_err());
    assert_eq!(later_calls.get(), 0);
}

#[test]
fn removal_between_solves_takes_effect() {
    let mut model = Model::new(ScriptedEngine::new(vec![ScriptedEvent::new(NODE, 1.0)]));

    let calls = Rc::new(Cell::new(0));
    let handle = model
        .add_callback_fn(counting_fn(&calls), NODE, Params::new())
        .unwrap();

    model.solve().unwrap();
    assert_eq!(calls.get(), 1);

    model.remove_callback(handle).unwrap();
    let outcome = model.solve().unwrap();

    assert!(!outcome.callback_installed);
    assert_eq!(calls.get(), 1);
}

#[test]
fn duplicate_subscribers_fire_once_each_in_order() {
    let mut model = Model::new(ScriptedEngine::new(vec![ScriptedEvent::new(NODE, 1.0)]));

    let order = Rc::new(std::cell::RefCell::new(Vec::new()));
    for label in ["first", "second"] {
        let order = Rc::clone(&order);
        model
            .add_callback_fn(
                move |_, _| {
                    order.borrow_mut().push(label);
                    Ok(())
                },
                NODE,
                Params::new(),
            )
            .unwrap();
    }

    model.solve().unwrap();

    assert_eq!(*order.borrow(), vec!["first", "second"]);
}
