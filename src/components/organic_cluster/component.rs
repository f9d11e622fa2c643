use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use leptos::prelude::*;
use log::{error, warn};
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent};

use super::error::ClusterError;
use super::frame_loop::FrameLoop;
use super::params::LayoutParams;
use super::render;
use super::state::ClusterState;
use super::types::{Edge, Issue, Tooltip};

/// Relationship map of issues. Falls back to a notice while fewer than two
/// issues are available.
#[component]
pub fn OrganicCluster(
	#[prop(into)] issues: Signal<Arc<[Issue]>>,
	#[prop(into)] edges: Signal<Arc<[Edge]>>,
	#[prop(default = None)] width: Option<f64>,
	#[prop(default = None)] height: Option<f64>,
) -> impl IntoView {
	let defaults = LayoutParams::default();
	let params = LayoutParams::with_extent(
		width.unwrap_or(defaults.width),
		height.unwrap_or(defaults.height),
	);
	let enough = Memo::new(move |_| issues.with(|issues| issues.len() >= 2));

	view! {
		<div class="organic-cluster">
			{move || {
				if enough.get() {
					view! { <ClusterCanvas issues=issues edges=edges params=params /> }.into_any()
				} else {
					view! {
						<div class="organic-cluster-empty">
							<p>"At least two issues are needed to draw the map."</p>
						</div>
					}
						.into_any()
				}
			}}
			<div class="organic-cluster-legend">
				<span>
					<svg width="20" height="2">
						<line x1="0" y1="1" x2="20" y2="1" stroke="#9aa3b2" stroke-width="2" stroke-dasharray="5,5" />
					</svg>
					" Dashed = related"
				</span>
				<span>
					<svg width="20" height="2">
						<line x1="0" y1="1" x2="20" y2="1" stroke="#9aa3b2" stroke-width="2" />
					</svg>
					" Solid = possible cause"
				</span>
			</div>
		</div>
	}
}

#[component]
fn ClusterCanvas(
	issues: Signal<Arc<[Issue]>>,
	edges: Signal<Arc<[Edge]>>,
	params: LayoutParams,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let tooltip = RwSignal::new(None::<Tooltip>);
	let state = Rc::new(RefCell::new(ClusterState::new(params, js_sys::Date::now() as u64)));
	let frame_loop = StoredValue::new_local(None::<FrameLoop>);

	let state_data = state.clone();
	Effect::new(move |_| {
		let (issues, edges) = (issues.get(), edges.get());
		let mut s = state_data.borrow_mut();
		s.set_edges(edges);
		if s.set_issues(issues) {
			tooltip.set(None);
		}
	});

	let state_init = state.clone();
	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		// replacing the slot drops, and so cancels, any loop from an earlier mount
		match start(canvas.into(), state_init.clone()) {
			Ok(running) => frame_loop.set_value(Some(running)),
			Err(err) => error!("relationship map could not start: {err}"),
		}
	});
	on_cleanup(move || {
		frame_loop.try_update_value(|running| running.take());
	});

	let state_md = state.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let (x, y) = pointer(&ev);
		if state_md.borrow_mut().pointer_down(x, y) {
			ev.prevent_default();
		}
	};

	let state_mm = state.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let (x, y) = pointer(&ev);
		let next = state_mm.borrow_mut().pointer_move(x, y);
		if tooltip.with_untracked(|current| *current != next) {
			tooltip.set(next);
		}
	};

	let state_mu = state.clone();
	let on_mouseup = move |_: MouseEvent| {
		state_mu.borrow_mut().pointer_up();
	};

	let state_ml = state;
	let on_mouseleave = move |_: MouseEvent| {
		state_ml.borrow_mut().pointer_leave();
		tooltip.set(None);
	};

	view! {
		<div class="organic-cluster-stage" style="position: relative;">
			<canvas
				node_ref=canvas_ref
				class="organic-cluster-canvas"
				on:mousedown=on_mousedown
				on:mousemove=on_mousemove
				on:mouseup=on_mouseup
				on:mouseleave=on_mouseleave
				style="display: block; cursor: pointer;"
			/>
			{move || {
				tooltip
					.get()
					.map(|tip| {
						view! {
							<div
								class="organic-cluster-tooltip"
								style=format!(
									"position: absolute; left: {}px; top: {}px;",
									tip.x + 10.0,
									tip.y - 10.0,
								)
							>
								<h4>{tip.issue.display_title()}</h4>
								<p>{format!("Category: {}", tip.issue.category)}</p>
								<p>{format!("Likes: {}", tip.issue.likes)}</p>
							</div>
						}
					})
			}}
		</div>
	}
}

fn pointer(ev: &MouseEvent) -> (f64, f64) {
	(f64::from(ev.offset_x()), f64::from(ev.offset_y()))
}

fn start(
	canvas: HtmlCanvasElement,
	state: Rc<RefCell<ClusterState>>,
) -> Result<FrameLoop, ClusterError> {
	let params = state.borrow().params;
	canvas.set_width(params.width as u32);
	canvas.set_height(params.height as u32);

	let ctx: CanvasRenderingContext2d = canvas
		.get_context("2d")
		.map_err(ClusterError::browser)?
		.ok_or_else(|| ClusterError::Browser("2d context unavailable".into()))?
		.dyn_into()
		.map_err(|ctx| ClusterError::browser(ctx.into()))?;

	FrameLoop::start(move || {
		let mut s = state.borrow_mut();
		match s.tick() {
			Ok(()) | Err(ClusterError::InsufficientIssues { .. }) => {}
			Err(err) => warn!("simulation step failed: {err}"),
		}
		render::render(&s, &ctx);
	})
}
