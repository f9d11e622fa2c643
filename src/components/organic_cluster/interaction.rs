use super::graph::{Body, Node};
use super::params::LayoutParams;

/// Topmost node under the pointer. Later nodes are drawn on top, so they win.
pub fn node_at(nodes: &[Node], x: f64, y: f64) -> Option<usize> {
	nodes.iter().rposition(|node| node.contains(x, y))
}

/// Single-pointer drag machine. `Dragging` holds the node slot, which is
/// stable until the next rebuild.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DragState {
	#[default]
	Idle,
	Dragging(usize),
}

impl DragState {
	pub fn dragged(&self) -> Option<usize> {
		match *self {
			Self::Idle => None,
			Self::Dragging(slot) => Some(slot),
		}
	}

	/// Grab `slot`. Ignored while another grab is in progress or when the slot
	/// does not exist; returns whether the grab took.
	pub fn pointer_down(&mut self, nodes: &mut [Node], slot: usize) -> bool {
		if *self != Self::Idle {
			return false;
		}
		let Some(node) = nodes.get_mut(slot) else {
			return false;
		};
		node.dragging = true;
		*self = Self::Dragging(slot);
		true
	}

	/// Pin the grabbed node to the pointer, clamped to the canvas.
	pub fn pointer_move(&self, nodes: &mut [Node], x: f64, y: f64, params: &LayoutParams) {
		let Some(node) = self.dragged().and_then(|slot| nodes.get_mut(slot)) else {
			return;
		};
		let (x, y) = params.clamp_position(x, y, node.radius);
		node.body = Body {
			x,
			y,
			vx: 0.0,
			vy: 0.0,
		};
	}

	/// Pointer up or pointer leaving the canvas. The node rejoins the
	/// simulation with no momentum.
	pub fn release(&mut self, nodes: &mut [Node]) {
		if let Some(node) = self.dragged().and_then(|slot| nodes.get_mut(slot)) {
			node.dragging = false;
			node.body.vx = 0.0;
			node.body.vy = 0.0;
		}
		*self = Self::Idle;
	}
}

/// Which node the pointer rests on, tracked apart from dragging.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct HoverState {
	pub slot: Option<usize>,
	pub x: f64,
	pub y: f64,
}

impl HoverState {
	pub fn update(&mut self, nodes: &[Node], x: f64, y: f64) {
		self.slot = node_at(nodes, x, y);
		self.x = x;
		self.y = y;
	}

	pub fn clear(&mut self) {
		*self = Self::default();
	}
}
