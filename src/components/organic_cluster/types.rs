use log::warn;
use serde::de::{self, DeserializeOwned};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::error::ClusterError;
use super::params::LayoutParams;

const TITLE_PREVIEW_CHARS: usize = 50;

/// Triage state of an issue, as stored by the document store.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum IssueStatus {
	#[default]
	#[serde(rename = "未対応")]
	Open,
	#[serde(rename = "対応中")]
	InProgress,
	#[serde(rename = "解決済")]
	Resolved,
}

/// A reported workplace concern. Only `id` and `likes` affect the layout.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Issue {
	#[serde(deserialize_with = "issue_id")]
	pub id: String,
	#[serde(default, deserialize_with = "or_default")]
	pub created_at: Option<String>,
	#[serde(default, deserialize_with = "or_default")]
	pub category: String,
	#[serde(default, deserialize_with = "or_default")]
	pub raw_text: String,
	#[serde(default, deserialize_with = "or_default")]
	pub final_statement: Option<String>,
	#[serde(default, deserialize_with = "or_default")]
	pub tags: Vec<String>,
	#[serde(default, deserialize_with = "or_default")]
	pub emotion_tags: Vec<String>,
	#[serde(default, deserialize_with = "like_count")]
	pub likes: u32,
	#[serde(default, deserialize_with = "or_default")]
	pub status: IssueStatus,
	#[serde(default, deserialize_with = "or_default")]
	pub hidden: bool,
}

/// Ids are strings; a numeric id is kept as its decimal text.
fn issue_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
	match Value::deserialize(deserializer)? {
		Value::String(id) => Ok(id),
		Value::Number(id) => Ok(id.to_string()),
		other => Err(de::Error::custom(format!("issue id must be a string, got {other}"))),
	}
}

/// Any count the store can hold: fractions truncate, negatives and
/// non-numbers count as zero.
fn like_count<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
	Ok(match Value::deserialize(deserializer)? {
		// `as` truncates toward zero and saturates at both ends.
		Value::Number(count) => count.as_f64().map_or(0, |count| count as u32),
		_ => 0,
	})
}

/// Malformed or null values fall back to the field's default.
fn or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
	D: Deserializer<'de>,
	T: DeserializeOwned + Default,
{
	let value = Value::deserialize(deserializer)?;
	Ok(serde_json::from_value(value).unwrap_or_default())
}

#[cfg(test)]
impl Issue {
	pub fn new(id: impl Into<String>, likes: u32) -> Self {
		Self {
			id: id.into(),
			created_at: None,
			category: String::new(),
			raw_text: String::new(),
			final_statement: None,
			tags: Vec::new(),
			emotion_tags: Vec::new(),
			likes,
			status: IssueStatus::Open,
			hidden: false,
		}
	}
}

impl Issue {
	/// Heading shown in the tooltip: the final statement, else a preview of the raw text.
	pub fn display_title(&self) -> String {
		match self.final_statement.as_deref().map(str::trim) {
			Some(statement) if !statement.is_empty() => statement.to_owned(),
			_ => {
				let preview: String = self.raw_text.chars().take(TITLE_PREVIEW_CHARS).collect();
				format!("{preview}...")
			}
		}
	}
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeKind {
	#[default]
	Related,
	Cause,
}

impl EdgeKind {
	pub fn rest_length(self, params: &LayoutParams) -> f64 {
		match self {
			Self::Related => params.related_length,
			Self::Cause => params.cause_length,
		}
	}
}

/// A weighted relationship hint between two issues.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Edge {
	pub source_id: String,
	pub target_id: String,
	#[serde(rename = "type", default)]
	pub kind: EdgeKind,
	#[serde(default = "default_confidence")]
	confidence: f64,
}

fn default_confidence() -> f64 {
	1.0
}

#[cfg(test)]
impl Edge {
	pub fn new(
		source_id: impl Into<String>,
		target_id: impl Into<String>,
		kind: EdgeKind,
		confidence: f64,
	) -> Self {
		Self {
			source_id: source_id.into(),
			target_id: target_id.into(),
			kind,
			confidence,
		}
	}
}

impl Edge {
	/// Edge weight in `[0, 1]`; non-finite input counts as zero.
	pub fn confidence(&self) -> f64 {
		if self.confidence.is_finite() {
			self.confidence.clamp(0.0, 1.0)
		} else {
			0.0
		}
	}

	/// The endpoint opposite `id`, if this edge touches `id` at all.
	pub fn other_end(&self, id: &str) -> Option<&str> {
		if self.source_id == id {
			Some(&self.target_id)
		} else if self.target_id == id {
			Some(&self.source_id)
		} else {
			None
		}
	}
}

/// Hover tooltip handed to the presentation layer.
#[derive(Clone, Debug, PartialEq)]
pub struct Tooltip {
	pub x: f64,
	pub y: f64,
	pub issue: Issue,
}

/// Decode a JSON array of issues. Only a document that is not an array is
/// an error; elements that cannot be read are logged and skipped.
pub fn parse_issues(json: &str) -> Result<Vec<Issue>, ClusterError> {
	parse_each(json, "issue")
}

/// Decode a JSON array of edges, skipping unreadable elements.
pub fn parse_edges(json: &str) -> Result<Vec<Edge>, ClusterError> {
	parse_each(json, "edge")
}

fn parse_each<T: DeserializeOwned>(json: &str, what: &str) -> Result<Vec<T>, ClusterError> {
	let values: Vec<Value> = serde_json::from_str(json)?;
	Ok(values
		.into_iter()
		.enumerate()
		.filter_map(|(index, value)| match serde_json::from_value(value) {
			Ok(item) => Some(item),
			Err(err) => {
				warn!("skipping {what} #{index}: {err}");
				None
			}
		})
		.collect())
}
