//! Jobscrape core: job records, query values and the pure run state machine.
mod effect;
mod msg;
mod query;
mod record;
mod result;
mod state;
mod update;

pub use effect::Effect;
pub use msg::Msg;
pub use query::Query;
pub use record::{JobRecord, RawJobPosting, RecordError};
pub use result::{RunOutcome, RunResult};
pub use state::{Phase, RunState};
pub use update::update;
