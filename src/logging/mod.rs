//! Console logging for the command layer.
//!
//! The reconciliation core does not log; commands report progress through
//! [`Logger`], which emits [`tracing`] events rendered by the subscriber
//! installed with [`init_subscriber`].
mod logger;
mod subscriber;
mod types;

pub use logger::Logger;
pub use subscriber::{LOG_ENV, init_subscriber};
pub use types::{StepEntry, StepStatus};
