use crate::{Effect, Msg, Phase, RunOutcome, RunState};

/// Pure update function: applies a message to state and returns any effects.
///
/// Messages that do not fit the current phase are ignored, so terminal phases
/// stay terminal.
pub fn update(mut state: RunState, msg: Msg) -> (RunState, Vec<Effect>) {
    let effects = match (state.phase(), msg) {
        (Phase::Idle, Msg::Start) => {
            state.begin_attempt();
            vec![Effect::StartAttempt {
                attempt: state.attempt(),
            }]
        }
        (Phase::Running, Msg::AttemptSucceeded) => {
            state.set_phase(Phase::Succeeded);
            vec![Effect::Finish {
                outcome: RunOutcome::Success,
            }]
        }
        (Phase::Running, Msg::AttemptFaulted { message }) => {
            state.record_fault(message);
            if state.has_attempts_left() {
                state.set_phase(Phase::Retrying);
                vec![Effect::WaitBeforeRetry {
                    next_attempt: state.attempt() + 1,
                }]
            } else {
                state.set_phase(Phase::Failed);
                vec![Effect::Finish {
                    outcome: RunOutcome::Failed,
                }]
            }
        }
        (Phase::Retrying, Msg::RetryDelayElapsed) => {
            state.begin_attempt();
            vec![Effect::StartAttempt {
                attempt: state.attempt(),
            }]
        }
        _ => Vec::new(),
    };

    (state, effects)
}
