//! Applicant profile and job search preferences.
//!
//! Both structs arrive as JSON request bodies and are passed unchanged to
//! the goal renderers in [`crate::goals`].

use serde::{Deserialize, Serialize};

/// Default boards searched when the client does not specify any.
pub const DEFAULT_JOB_BOARDS: &[&str] = &["greenhouse", "lever", "indeed"];

/// Default cap on apply attempts per autopilot session.
pub const DEFAULT_MAX_APPLICATIONS: u32 = 5;

/// Everything the agent needs to fill an application form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResumeProfile {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    #[serde(default)]
    pub linkedin_url: Option<String>,
    #[serde(default)]
    pub github_url: Option<String>,
    pub years_experience: u32,
    #[serde(default)]
    pub skills: Vec<String>,
    pub summary: String,
    pub education: String,
    pub most_recent_role: String,
    pub most_recent_company: String,
}

/// What the applicant is looking for.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobPreferences {
    pub job_titles: Vec<String>,
    pub locations: Vec<String>,
    #[serde(default = "default_remote_ok")]
    pub remote_ok: bool,
    #[serde(default)]
    pub min_salary: Option<u64>,
    #[serde(default = "default_job_boards")]
    pub job_boards: Vec<String>,
    #[serde(default = "default_max_applications")]
    pub max_applications: u32,
}

fn default_remote_ok() -> bool {
    true
}

fn default_job_boards() -> Vec<String> {
    DEFAULT_JOB_BOARDS.iter().map(|b| (*b).to_string()).collect()
}

fn default_max_applications() -> u32 {
    DEFAULT_MAX_APPLICATIONS
}
