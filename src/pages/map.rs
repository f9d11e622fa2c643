use std::sync::Arc;

use leptos::prelude::*;
use log::warn;

use crate::components::organic_cluster::{Edge, Issue, OrganicCluster};
use crate::sample_data::{sample_edges, sample_issues, stored_user_issues, visible_issues};

/// Relationship map page.
#[component]
pub fn MapPage() -> impl IntoView {
	let user = stored_user_issues().unwrap_or_else(|err| {
		warn!("ignoring stored user issues: {err}");
		Vec::new()
	});
	let issues = RwSignal::new(Arc::<[Issue]>::from(visible_issues(sample_issues(), user)));
	let edges = RwSignal::new(Arc::<[Edge]>::from(sample_edges()));

	view! {
		<div class="map-page">
			<h1>"Issue Relationship Map"</h1>
			<p class="subtitle">
				"See how reported issues relate to one another and spot likely root causes. Drag a bubble to move it."
			</p>
			<OrganicCluster issues=issues edges=edges />
		</div>
	}
}
