use std::f64::consts::PI;

use web_sys::{CanvasRenderingContext2d, HtmlImageElement};

use super::state::OrgGraphState;

const BACKGROUND: &str = "#1a1a2e";
const NON_MATCH_ALPHA: f64 = 0.15;
const LEGEND_ORIGIN: (f64, f64) = (20.0, 20.0);
const LEGEND_SWATCH: f64 = 15.0;
const LEGEND_ROW: f64 = 17.0;

pub fn render(
	state: &OrgGraphState,
	ctx: &CanvasRenderingContext2d,
	photos: &[Option<HtmlImageElement>],
) {
	ctx.set_fill_style_str(BACKGROUND);
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
	ctx.save();
	let _ = ctx.translate(state.transform.x, state.transform.y);
	let _ = ctx.scale(state.transform.k, state.transform.k);
	draw_edges(state, ctx);
	draw_nodes(state, ctx, photos);
	draw_legend(state, ctx);
	ctx.restore();
}

fn draw_edges(state: &OrgGraphState, ctx: &CanvasRenderingContext2d) {
	ctx.set_stroke_style_str("rgba(100, 180, 255, 0.6)");
	ctx.set_line_width(1.5);
	ctx.begin_path();
	for edge in &state.model.edges {
		let (Some(a), Some(b)) = (state.layouts.get(edge.source), state.layouts.get(edge.target))
		else {
			continue;
		};
		ctx.move_to(a.x, a.y);
		ctx.line_to(b.x, b.y);
	}
	ctx.stroke();
}

fn draw_nodes(
	state: &OrgGraphState,
	ctx: &CanvasRenderingContext2d,
	photos: &[Option<HtmlImageElement>],
) {
	ctx.set_text_align("center");
	ctx.set_font("bold 12px sans-serif");

	for (i, (layout, view)) in state.layouts.iter().zip(&state.views).enumerate() {
		let (x, y, r) = (layout.x, layout.y, layout.radius);
		ctx.set_global_alpha(if view.non_match { NON_MATCH_ALPHA } else { 1.0 });

		ctx.begin_path();
		let _ = ctx.arc(x, y, r, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(view.color);
		ctx.fill();

		if let Some(label) = &state.model.nodes[i].abbreviation {
			ctx.set_fill_style_str("white");
			let _ = ctx.fill_text(label, layout.label_x, layout.label_y);
		}

		// Broken or still-loading photos are skipped, leaving the label visible.
		if let Some(Some(img)) = photos.get(i) {
			if img.complete() && img.natural_width() > 0 {
				let photo = layout.photo;
				ctx.save();
				ctx.begin_path();
				let _ = ctx.arc(x, y, photo.size / 2.0, 0.0, 2.0 * PI);
				ctx.clip();
				let _ = ctx.draw_image_with_html_image_element_and_dw_and_dh(
					img, photo.x, photo.y, photo.size, photo.size,
				);
				ctx.restore();
			}
		}

		if view.selected {
			ctx.begin_path();
			let _ = ctx.arc(x, y, r + 2.0, 0.0, 2.0 * PI);
			ctx.set_stroke_style_str("#ffcc00");
			ctx.set_line_width(3.0);
			ctx.stroke();
		} else if state.hovered == Some(i) {
			ctx.begin_path();
			let _ = ctx.arc(x, y, r + 2.0, 0.0, 2.0 * PI);
			ctx.set_stroke_style_str("rgba(255, 255, 255, 0.7)");
			ctx.set_line_width(1.5);
			ctx.stroke();
		}
	}
	ctx.set_global_alpha(1.0);
}

fn draw_legend(state: &OrgGraphState, ctx: &CanvasRenderingContext2d) {
	let (ox, oy) = LEGEND_ORIGIN;
	ctx.set_text_align("left");
	ctx.set_font("12px sans-serif");
	for (row, entry) in state.legend.iter().enumerate() {
		let y = oy + row as f64 * LEGEND_ROW;
		ctx.set_fill_style_str(entry.color);
		ctx.fill_rect(ox, y, LEGEND_SWATCH, LEGEND_SWATCH);
		ctx.set_fill_style_str("rgba(255, 255, 255, 0.85)");
		let _ = ctx.fill_text(&entry.label, ox + LEGEND_SWATCH + 8.0, y + LEGEND_SWATCH - 3.0);
	}
}
