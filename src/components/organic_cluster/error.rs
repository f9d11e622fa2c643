use wasm_bindgen::JsValue;

/// Failures surfaced by the relationship map.
///
/// Numerical degeneracy (coincident nodes, dangling edges) is handled inside
/// the simulator and never shows up here.
#[derive(Debug, thiserror::Error)]
pub enum ClusterError {
	/// Fewer than two issues: there is nothing to lay out.
	#[error("at least two issues are needed for a layout, got {count}")]
	InsufficientIssues {
		/// Number of issues that were supplied
		count: usize,
	},

	/// Issue or edge JSON could not be decoded.
	#[error("invalid input: {0}")]
	InvalidInput(#[from] serde_json::Error),

	/// A browser API call failed.
	#[error("browser api failed: {0}")]
	Browser(String),
}

impl ClusterError {
	pub fn browser(value: JsValue) -> Self {
		Self::Browser(value.as_string().unwrap_or_else(|| format!("{value:?}")))
	}
}
