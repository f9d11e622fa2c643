//! Issues shown on the map: bundled samples plus whatever the user has
//! submitted locally.

use log::warn;

use crate::components::organic_cluster::{ClusterError, Edge, Issue, parse_edges, parse_issues};

/// `localStorage` key holding the user's own submissions as a JSON array.
pub const USER_ISSUES_KEY: &str = "userIssues";

const SAMPLE_ISSUES: &str = include_str!("../assets/sample_issues.json");
const SAMPLE_EDGES: &str = include_str!("../assets/sample_edges.json");

pub fn sample_issues() -> Vec<Issue> {
	parse_issues(SAMPLE_ISSUES).unwrap_or_else(|err| {
		warn!("bundled sample issues unreadable: {err}");
		Vec::new()
	})
}

pub fn sample_edges() -> Vec<Edge> {
	parse_edges(SAMPLE_EDGES).unwrap_or_else(|err| {
		warn!("bundled sample edges unreadable: {err}");
		Vec::new()
	})
}

/// Issues the user saved in this browser. Missing storage or key means none.
pub fn stored_user_issues() -> Result<Vec<Issue>, ClusterError> {
	let Some(window) = web_sys::window() else {
		return Ok(Vec::new());
	};
	let Some(storage) = window.local_storage().map_err(ClusterError::browser)? else {
		return Ok(Vec::new());
	};
	match storage.get_item(USER_ISSUES_KEY).map_err(ClusterError::browser)? {
		Some(json) => parse_issues(&json),
		None => Ok(Vec::new()),
	}
}

/// Samples followed by user issues, minus anything hidden by moderation.
pub fn visible_issues(samples: Vec<Issue>, user: Vec<Issue>) -> Vec<Issue> {
	samples
		.into_iter()
		.chain(user)
		.filter(|issue| !issue.hidden)
		.collect()
}
