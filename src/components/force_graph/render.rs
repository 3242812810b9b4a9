use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::state::ForceLayout;

const NODE_RADIUS: f64 = 14.0;
const CORE_RADIUS: f64 = 4.0;
const ARROW_SIZE: f64 = 8.0;

pub fn render(layout: &ForceLayout, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str("#0f172a");
	ctx.fill_rect(0.0, 0.0, layout.width, layout.height);
	draw_edges(layout, ctx);
	draw_nodes(layout, ctx);
}

fn draw_edges(layout: &ForceLayout, ctx: &CanvasRenderingContext2d) {
	ctx.set_stroke_style_str("#334155");
	ctx.set_fill_style_str("#475569");
	ctx.set_line_width(1.5);

	for edge in &layout.edges {
		let (s, t) = (&layout.nodes[edge.source], &layout.nodes[edge.target]);
		let (dx, dy) = (t.x - s.x, t.y - s.y);
		let dist = (dx * dx + dy * dy).sqrt();
		if dist < 2.0 * NODE_RADIUS {
			continue;
		}

		let (ux, uy) = (dx / dist, dy / dist);
		let (tip_x, tip_y) = (t.x - ux * NODE_RADIUS, t.y - uy * NODE_RADIUS);
		ctx.begin_path();
		ctx.move_to(s.x + ux * NODE_RADIUS, s.y + uy * NODE_RADIUS);
		ctx.line_to(tip_x - ux * ARROW_SIZE, tip_y - uy * ARROW_SIZE);
		ctx.stroke();

		let (back_x, back_y) = (tip_x - ux * ARROW_SIZE, tip_y - uy * ARROW_SIZE);
		let (px, py) = (-uy * ARROW_SIZE * 0.5, ux * ARROW_SIZE * 0.5);
		ctx.begin_path();
		ctx.move_to(tip_x, tip_y);
		ctx.line_to(back_x + px, back_y + py);
		ctx.line_to(back_x - px, back_y - py);
		ctx.close_path();
		ctx.fill();
	}
}

fn draw_nodes(layout: &ForceLayout, ctx: &CanvasRenderingContext2d) {
	ctx.set_text_align("center");
	for node in &layout.nodes {
		let color = node.category.color();

		ctx.begin_path();
		let _ = ctx.arc(node.x, node.y, NODE_RADIUS, 0.0, 2.0 * PI);
		ctx.set_fill_style_str("#0f172a");
		ctx.fill();
		ctx.set_stroke_style_str(color);
		ctx.set_line_width(2.0);
		ctx.stroke();

		ctx.begin_path();
		let _ = ctx.arc(node.x, node.y, CORE_RADIUS, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(color);
		ctx.fill();

		ctx.set_fill_style_str("#e2e8f0");
		ctx.set_font("bold 10px monospace");
		let _ = ctx.fill_text(&node.label, node.x, node.y + 28.0);

		ctx.set_global_alpha(0.7);
		ctx.set_fill_style_str(color);
		ctx.set_font("8px sans-serif");
		let _ = ctx.fill_text(&node.category.name().to_uppercase(), node.x, node.y + 38.0);
		ctx.set_global_alpha(1.0);
	}
}
