pub mod application;
pub mod job;
pub mod job_search;
pub mod status;
