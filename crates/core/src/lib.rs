//! Domain types shared by every JobFish crate.
//!
//! This crate has no internal dependencies: the applicant profile and job
//! preferences, discovered job candidates, goal rendering for the
//! automation agent, job board resolution, and the outbound session event
//! schema all live here so the agent client, the orchestrator, and the HTTP
//! layer agree on one vocabulary.

pub mod candidates;
pub mod error;
pub mod goals;
pub mod job_boards;
pub mod profile;
pub mod session_events;
pub mod types;
pub mod validation;
