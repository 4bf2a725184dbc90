//! Request validation for search and application inputs.
//!
//! Lives in `core` so the HTTP layer and any future CLI share the same
//! rules. Every function returns [`CoreError::Validation`] with a message
//! suitable for a 400 response.

use crate::error::CoreError;
use crate::profile::{JobPreferences, ResumeProfile};

/// Upper bound on apply attempts per session.
pub const MAX_APPLICATIONS_LIMIT: u32 = 25;

/// Validate search preferences.
pub fn validate_preferences(preferences: &JobPreferences) -> Result<(), CoreError> {
    if preferences.job_titles.iter().all(|t| t.trim().is_empty()) {
        return Err(CoreError::Validation(
            "job_titles must contain at least one title".into(),
        ));
    }
    if preferences.locations.iter().all(|l| l.trim().is_empty()) {
        return Err(CoreError::Validation(
            "locations must contain at least one location".into(),
        ));
    }
    if preferences.max_applications == 0 || preferences.max_applications > MAX_APPLICATIONS_LIMIT {
        return Err(CoreError::Validation(format!(
            "max_applications must be between 1 and {MAX_APPLICATIONS_LIMIT}"
        )));
    }
    Ok(())
}

/// Validate the applicant profile fields the agent cannot work without.
pub fn validate_profile(profile: &ResumeProfile) -> Result<(), CoreError> {
    if profile.full_name.trim().is_empty() {
        return Err(CoreError::Validation("full_name is required".into()));
    }
    let email = profile.email.trim();
    if email.is_empty() || !email.contains('@') {
        return Err(CoreError::Validation("email must be a valid address".into()));
    }
    Ok(())
}

/// Validate a job URL supplied for a single application run.
pub fn validate_job_url(job_url: Option<&str>) -> Result<&str, CoreError> {
    let url = job_url
        .map(str::trim)
        .filter(|u| !u.is_empty())
        .ok_or_else(|| CoreError::Validation("job_url is required".into()))?;

    if !(url.starts_with("http://") || url.starts_with("https://")) {
        return Err(CoreError::Validation(
            "job_url must be an http(s) URL".into(),
        ));
    }
    Ok(url)
}
