use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::state::ClusterState;
use super::types::EdgeKind;

const EDGE_COLOR: &str = "#9aa3b2";
const NODE_COLOR: &str = "#88e0d3";
const LABEL_COLOR: &str = "#0f1115";

pub fn render(state: &ClusterState, ctx: &CanvasRenderingContext2d) {
	ctx.clear_rect(0.0, 0.0, state.params.width, state.params.height);
	draw_edges(state, ctx);
	draw_nodes(state, ctx);
}

fn draw_edges(state: &ClusterState, ctx: &CanvasRenderingContext2d) {
	let model = state.model();
	let dashed = js_sys::Array::of2(&JsValue::from_f64(5.0), &JsValue::from_f64(5.0));
	let solid = js_sys::Array::new();

	ctx.set_global_alpha(0.6);
	ctx.set_stroke_style_str(EDGE_COLOR);
	for edge in model.edges() {
		let Some((from, to)) = model.endpoints(edge) else {
			continue;
		};
		let (a, b) = (&model.nodes()[from], &model.nodes()[to]);

		ctx.set_line_width(edge.confidence() * 2.0);
		let _ = ctx.set_line_dash(match edge.kind {
			EdgeKind::Related => &dashed,
			EdgeKind::Cause => &solid,
		});
		ctx.begin_path();
		ctx.move_to(a.x(), a.y());
		ctx.line_to(b.x(), b.y());
		ctx.stroke();
	}
	let _ = ctx.set_line_dash(&solid);
	ctx.set_global_alpha(1.0);
}

fn draw_nodes(state: &ClusterState, ctx: &CanvasRenderingContext2d) {
	ctx.set_font("12px sans-serif");
	ctx.set_text_align("center");
	ctx.set_text_baseline("middle");
	ctx.set_line_width(2.0);

	for node in state.nodes() {
		let (x, y) = (node.x(), node.y());

		ctx.begin_path();
		let _ = ctx.arc(x, y, node.radius, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(NODE_COLOR);
		ctx.set_global_alpha(if node.dragging { 0.9 } else { 0.7 });
		ctx.fill();
		ctx.set_global_alpha(1.0);
		ctx.set_stroke_style_str(NODE_COLOR);
		ctx.stroke();

		ctx.set_fill_style_str(LABEL_COLOR);
		let _ = ctx.fill_text(&state.model().issue(node).likes.to_string(), x, y);
	}
}
