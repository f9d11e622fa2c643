use std::sync::Arc;

use log::debug;
use rand::SeedableRng;
use rand::rngs::SmallRng;

use super::error::ClusterError;
use super::graph::{GraphModel, Node};
use super::interaction::{DragState, HoverState, node_at};
use super::params::LayoutParams;
use super::simulation::LayoutSimulator;
use super::types::{Edge, Issue, Tooltip};

/// Everything one mounted relationship map owns: the graph, the simulator's
/// buffers, and pointer state.
pub struct ClusterState {
	pub params: LayoutParams,
	model: GraphModel,
	simulator: LayoutSimulator,
	drag: DragState,
	hover: HoverState,
	rng: SmallRng,
	refused: bool,
}

impl ClusterState {
	pub fn new(params: LayoutParams, seed: u64) -> Self {
		Self {
			params,
			model: GraphModel::default(),
			simulator: LayoutSimulator::default(),
			drag: DragState::Idle,
			hover: HoverState::default(),
			rng: SmallRng::seed_from_u64(seed),
			refused: false,
		}
	}

	/// Replace the issue snapshot. A rebuild reseeds every node and drops
	/// pointer state that referred to the old nodes.
	pub fn set_issues(&mut self, issues: Arc<[Issue]>) -> bool {
		if !self.model.replace_issues(issues, &self.params, &mut self.rng) {
			return false;
		}
		self.drag = DragState::Idle;
		self.hover.clear();
		self.refused = false;
		true
	}

	pub fn set_edges(&mut self, edges: Arc<[Edge]>) {
		self.model.replace_edges(edges);
	}

	/// One simulation frame.
	pub fn tick(&mut self) -> Result<(), ClusterError> {
		let result = self.simulator.step(&mut self.model, &self.params);
		if let Err(ClusterError::InsufficientIssues { count }) = &result {
			if !self.refused {
				debug!("relationship map idle: {count} issue(s)");
				self.refused = true;
			}
		}
		result
	}

	/// Start dragging the node under the pointer, if any.
	pub fn pointer_down(&mut self, x: f64, y: f64) -> bool {
		let Some(slot) = node_at(self.model.nodes(), x, y) else {
			return false;
		};
		self.drag.pointer_down(self.model.nodes_mut(), slot)
	}

	/// Pointer moved over the canvas; returns the tooltip to show.
	pub fn pointer_move(&mut self, x: f64, y: f64) -> Option<Tooltip> {
		self.drag
			.pointer_move(self.model.nodes_mut(), x, y, &self.params);
		self.hover.update(self.model.nodes(), x, y);
		self.tooltip()
	}

	pub fn pointer_up(&mut self) {
		self.drag.release(self.model.nodes_mut());
	}

	pub fn pointer_leave(&mut self) {
		self.drag.release(self.model.nodes_mut());
		self.hover.clear();
	}

	pub fn tooltip(&self) -> Option<Tooltip> {
		let node = self.model.nodes().get(self.hover.slot?)?;
		Some(Tooltip {
			x: self.hover.x,
			y: self.hover.y,
			issue: self.model.issue(node).clone(),
		})
	}

	pub fn model(&self) -> &GraphModel {
		&self.model
	}

	pub fn nodes(&self) -> &[Node] {
		self.model.nodes()
	}
}
