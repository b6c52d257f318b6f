use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::state::ViewState;
use crate::scene::{LABEL_COLOR, LineStyle, Scene, ScenePoint};

const BACKGROUND: &str = "#ffffff";

fn ease_out_cubic(t: f64) -> f64 {
	1.0 - (1.0 - t).powi(3)
}

pub fn render(state: &ViewState, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str(BACKGROUND);
	ctx.fill_rect(0.0, 0.0, state.width, state.height);

	let Some(scene) = &state.scene else {
		ctx.set_fill_style_str("#888888");
		ctx.set_font("14px sans-serif");
		ctx.set_text_align("center");
		let _ = ctx.fill_text(
			"Enter a node list to draw the graph",
			state.width / 2.0,
			state.height / 2.0,
		);
		ctx.set_text_align("start");
		return;
	};

	draw_lines(state, scene, ctx);
	draw_points(state, scene, ctx);
	draw_caption(state, scene, ctx);
}

fn draw_lines(state: &ViewState, scene: &Scene, ctx: &CanvasRenderingContext2d) {
	let t = ease_out_cubic(state.hover.highlight_t);
	let has_highlight = state.has_active_highlight();

	for line in &scene.lines {
		let (Some((x1, y1, _)), Some((x2, y2, _))) =
			(state.to_screen(line.from), state.to_screen(line.to))
		else {
			continue;
		};

		let lit = state.is_line_highlighted(line.from_id, line.to_id);
		let (alpha, width) = match (has_highlight, lit) {
			(false, _) => (1.0, 1.0),
			(true, true) => (1.0, 1.0 + 1.0 * t),
			(true, false) => (1.0 - 0.75 * t, 1.0),
		};

		ctx.set_global_alpha(alpha);
		ctx.set_stroke_style_str(line.color);
		ctx.set_line_width(width);
		match line.style {
			LineStyle::Solid => {
				let _ = ctx.set_line_dash(&js_sys::Array::new());
			}
			LineStyle::Dashed => {
				let _ = ctx.set_line_dash(&js_sys::Array::of2(
					&JsValue::from_f64(6.0),
					&JsValue::from_f64(4.0),
				));
			}
		}
		ctx.begin_path();
		ctx.move_to(x1, y1);
		ctx.line_to(x2, y2);
		ctx.stroke();
	}
	let _ = ctx.set_line_dash(&js_sys::Array::new());
	ctx.set_global_alpha(1.0);
}

fn draw_points(state: &ViewState, scene: &Scene, ctx: &CanvasRenderingContext2d) {
	let (has_highlight, t) = (
		state.has_active_highlight(),
		ease_out_cubic(state.hover.highlight_t),
	);

	// Back to front, so nearer markers cover farther ones.
	let mut visible: Vec<(&ScenePoint, f64, f64, f64)> = scene
		.points
		.iter()
		.chain([&scene.hub])
		.filter_map(|p| state.to_screen(p.position).map(|(x, y, d)| (p, x, y, d)))
		.collect();
	visible.sort_by(|a, b| a.3.total_cmp(&b.3));

	ctx.set_font("11px sans-serif");
	for (point, x, y, _) in visible {
		let lit = state.is_highlighted(point.id);
		let (alpha, radius) = match (has_highlight, lit) {
			(false, _) => (1.0, point.radius),
			(true, true) if state.is_hovered(point.id) => (1.0, point.radius * (1.0 + 0.35 * t)),
			(true, true) => (1.0, point.radius * (1.0 + 0.15 * t)),
			(true, false) => (1.0 - 0.7 * t, point.radius * (1.0 - 0.15 * t)),
		};

		ctx.set_global_alpha(alpha);
		ctx.begin_path();
		let _ = ctx.arc(x, y, radius, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(&point.color);
		ctx.fill();

		if state.is_hovered(point.id) && t > 0.01 {
			ctx.begin_path();
			let _ = ctx.arc(x, y, radius + 2.0, 0.0, 2.0 * PI);
			ctx.set_stroke_style_str(&format!("rgba(0, 0, 0, {})", 0.6 * t));
			ctx.set_line_width(1.5);
			ctx.stroke();
		}

		ctx.set_fill_style_str(LABEL_COLOR);
		let _ = ctx.fill_text(&point.label, x + radius + 3.0, y + 3.0);
	}
	ctx.set_global_alpha(1.0);
}

fn draw_caption(state: &ViewState, scene: &Scene, ctx: &CanvasRenderingContext2d) {
	let Some(caption) = &scene.caption else {
		return;
	};
	ctx.set_fill_style_str(LABEL_COLOR);
	ctx.set_font("15px sans-serif");
	ctx.set_text_align("center");
	let _ = ctx.fill_text(caption, state.width / 2.0, state.height * 0.05 + 15.0);
	ctx.set_text_align("start");
}
