use std::sync::Once;

use jobscrape_core::{update, Effect, Msg, Phase, RunOutcome, RunState};
use pretty_assertions::assert_eq;

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(scrape_logging::initialize_for_tests);
}

fn fault(message: &str) -> Msg {
    Msg::AttemptFaulted {
        message: message.to_string(),
    }
}

#[test]
fn start_moves_idle_to_running_first_attempt() {
    init_logging();
    let (state, effects) = update(RunState::new(2), Msg::Start);

    assert_eq!(state.phase(), Phase::Running);
    assert_eq!(state.attempt(), 1);
    assert_eq!(effects, vec![Effect::StartAttempt { attempt: 1 }]);
}

#[test]
fn successful_attempt_finishes_run() {
    init_logging();
    let (state, _) = update(RunState::new(2), Msg::Start);
    let (state, effects) = update(state, Msg::AttemptSucceeded);

    assert_eq!(state.phase(), Phase::Succeeded);
    assert_eq!(
        effects,
        vec![Effect::Finish {
            outcome: RunOutcome::Success
        }]
    );
    assert_eq!(state.last_error(), None);
}

#[test]
fn fault_with_attempts_left_schedules_retry() {
    init_logging();
    let (state, _) = update(RunState::new(2), Msg::Start);
    let (state, effects) = update(state, fault("browser crashed"));

    assert_eq!(state.phase(), Phase::Retrying);
    assert_eq!(state.last_error(), Some("browser crashed"));
    assert_eq!(effects, vec![Effect::WaitBeforeRetry { next_attempt: 2 }]);

    let (state, effects) = update(state, Msg::RetryDelayElapsed);
    assert_eq!(state.phase(), Phase::Running);
    assert_eq!(state.attempt(), 2);
    assert_eq!(effects, vec![Effect::StartAttempt { attempt: 2 }]);
}

#[test]
fn exhausting_attempts_fails_run() {
    init_logging();
    let (state, _) = update(RunState::new(2), Msg::Start);
    let (state, _) = update(state, fault("first"));
    let (state, _) = update(state, Msg::RetryDelayElapsed);
    let (state, effects) = update(state, fault("second"));

    assert_eq!(state.phase(), Phase::Failed);
    assert_eq!(state.attempt(), 2);
    assert_eq!(state.last_error(), Some("second"));
    assert_eq!(
        effects,
        vec![Effect::Finish {
            outcome: RunOutcome::Failed
        }]
    );
}

#[test]
fn retry_then_success_keeps_last_error() {
    init_logging();
    let (state, _) = update(RunState::new(3), Msg::Start);
    let (state, _) = update(state, fault("flaky"));
    let (state, _) = update(state, Msg::RetryDelayElapsed);
    let (state, effects) = update(state, Msg::AttemptSucceeded);

    assert_eq!(state.phase(), Phase::Succeeded);
    assert_eq!(state.attempt(), 2);
    assert_eq!(state.last_error(), Some("flaky"));
    assert_eq!(
        effects,
        vec![Effect::Finish {
            outcome: RunOutcome::Success
        }]
    );
}

#[test]
fn single_attempt_policy_fails_without_retry() {
    init_logging();
    let (state, _) = update(RunState::new(1), Msg::Start);
    let (state, effects) = update(state, fault("boom"));

    assert_eq!(state.phase(), Phase::Failed);
    assert_eq!(
        effects,
        vec![Effect::Finish {
            outcome: RunOutcome::Failed
        }]
    );
}

#[test]
fn zero_attempts_is_clamped_to_one() {
    init_logging();
    let state = RunState::new(0);
    assert_eq!(state.max_attempts(), 1);
}

#[test]
fn retry_delay_ignored_while_running() {
    init_logging();
    let (state, _) = update(RunState::new(2), Msg::Start);
    let (next, effects) = update(state.clone(), Msg::RetryDelayElapsed);

    assert_eq!(next, state);
    assert!(effects.is_empty());
}
