//! Natural-language goal rendering for the automation agent.
//!
//! The agent receives a start URL plus a free-text goal. These renderers are
//! plain string templates; the agent is expected to answer the search goal
//! with a JSON array and the apply goal with a small JSON status object.

use crate::profile::{JobPreferences, ResumeProfile};

/// Number of skills listed in an apply goal.
pub const MAX_GOAL_SKILLS: usize = 8;

/// Placeholder title when a candidate has none.
pub const PLACEHOLDER_TITLE: &str = "Position";

/// Placeholder company when a candidate has none.
pub const PLACEHOLDER_COMPANY: &str = "Company";

/// Render the goal for a job search run.
///
/// The minimum salary line is only present when the preference is set.
pub fn build_search_goal(preferences: &JobPreferences) -> String {
    let arrangement = if preferences.remote_ok {
        "remote positions are acceptable"
    } else {
        "on-site positions only"
    };
    let salary = preferences
        .min_salary
        .map(|s| format!("- Minimum salary: ${}\n", format_thousands(s)))
        .unwrap_or_default();

    format!(
        "Find open job postings that match the following:\n\
         - Titles: {titles}\n\
         - Locations: {locations}\n\
         - Arrangement: {arrangement}\n\
         {salary}\n\
         Collect at most {max} relevant postings. For each one return an object with \
         the fields title, company, location, application_url, description \
         (one sentence) and posted_date.\n\
         Respond with a JSON array of those objects and nothing else.",
        titles = preferences.job_titles.join(", "),
        locations = preferences.locations.join(", "),
        max = preferences.max_applications,
    )
}

/// Render the goal for one application run.
///
/// Embeds the full applicant profile and the job identity. Optional profile
/// links are omitted when absent.
pub fn build_apply_goal(profile: &ResumeProfile, title: &str, company: &str) -> String {
    let skills: Vec<&str> = profile
        .skills
        .iter()
        .take(MAX_GOAL_SKILLS)
        .map(String::as_str)
        .collect();
    let linkedin = profile
        .linkedin_url
        .as_ref()
        .map(|url| format!("- LinkedIn: {url}\n"))
        .unwrap_or_default();
    let github = profile
        .github_url
        .as_ref()
        .map(|url| format!("- GitHub: {url}\n"))
        .unwrap_or_default();

    format!(
        "Submit an application for the {title} role at {company}.\n\
         \n\
         Applicant details to enter in the form:\n\
         - Full name: {name}\n\
         - Email: {email}\n\
         - Phone: {phone}\n\
         - Location: {location}\n\
         {linkedin}\
         {github}\
         - Years of experience: {years}\n\
         - Most recent role: {role} at {recent_company}\n\
         - Skills: {skills}\n\
         - Education: {education}\n\
         \n\
         Use this text for any cover letter or \"about you\" field:\n\"{summary}\"\n\
         \n\
         Procedure:\n\
         1. Open the application form.\n\
         2. Complete every required field from the details above.\n\
         3. Leave optional fields without a matching detail empty.\n\
         4. Review the form and submit it.\n\
         5. Reply with JSON: {{\"success\": bool, \"confirmation_id\": string, \"message\": string}}.\n\
         If a CAPTCHA or a mandatory login blocks the form, stop and report it.",
        name = profile.full_name,
        email = profile.email,
        phone = profile.phone,
        location = profile.location,
        years = profile.years_experience,
        role = profile.most_recent_role,
        recent_company = profile.most_recent_company,
        skills = skills.join(", "),
        education = profile.education,
        summary = profile.summary,
    )
}

/// Format an integer with `,` thousands separators (`120000` -> `120,000`).
pub fn format_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
