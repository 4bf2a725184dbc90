//! Session orchestration for JobFish.
//!
//! Drives agent runs (search, then sequential applications), relays their
//! events to an [`EventSink`], and records outcomes through the
//! [`OutcomeRecorder`]. Nothing here knows about HTTP.

pub mod apply;
pub mod config;
pub mod error;
pub mod recorder;
pub mod search;
pub mod session;
pub mod sink;

pub use apply::{drive_application, run_single_application, ApplyOutcome, ApplyRun};
pub use config::SessionConfig;
pub use error::{RecorderError, RunError};
pub use recorder::OutcomeRecorder;
pub use search::{run_search, SearchOutcome};
pub use session::{Session, SessionPhase, SessionSummary};
pub use sink::EventSink;
