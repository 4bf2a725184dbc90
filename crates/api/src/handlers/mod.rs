pub mod applications;
pub mod apply;
pub mod autopilot;
pub mod jobs;
pub mod search;
