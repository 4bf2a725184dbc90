//! Job board name to search URL resolution.

use crate::profile::JobPreferences;

/// Board used when the preference list is empty.
pub const FALLBACK_BOARD: &str = "indeed";

/// Search URL used for the fallback board and for unknown board names.
pub const FALLBACK_BOARD_URL: &str = "https://www.indeed.com/jobs";

/// Known boards and the page the agent starts searching from.
const BOARD_URLS: &[(&str, &str)] = &[
    ("greenhouse", "https://boards.greenhouse.io"),
    ("lever", "https://jobs.lever.co"),
    ("indeed", FALLBACK_BOARD_URL),
    ("linkedin", "https://www.linkedin.com/jobs/search"),
    ("workday", "https://www.myworkdayjobs.com"),
];

/// A board label together with the URL the search run starts at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedBoard {
    pub name: String,
    pub url: &'static str,
}

/// Look up the search URL for a board name (case-insensitive).
pub fn board_url(name: &str) -> Option<&'static str> {
    let name = name.trim().to_ascii_lowercase();
    BOARD_URLS
        .iter()
        .find(|(board, _)| *board == name)
        .map(|(_, url)| *url)
}

/// Pick the board to search for a set of preferences.
///
/// Only the first preferred board is searched. An empty list falls back to
/// [`FALLBACK_BOARD`]; an unknown name keeps its label but searches
/// [`FALLBACK_BOARD_URL`].
pub fn resolve_board(preferences: &JobPreferences) -> ResolvedBoard {
    let name = preferences
        .job_boards
        .first()
        .map(|b| b.trim().to_string())
        .filter(|b| !b.is_empty())
        .unwrap_or_else(|| FALLBACK_BOARD.to_string());

    let url = board_url(&name).unwrap_or(FALLBACK_BOARD_URL);
    ResolvedBoard { name, url }
}
