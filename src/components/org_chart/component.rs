use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::sync::Arc;

use leptos::prelude::*;
use log::debug;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement, MouseEvent, Window};

use super::config::{GraphConfig, SelectOn};
use super::grouping::GroupMode;
use super::render;
use super::selection::DetailPanel;
use super::state::{OrgGraphState, ViewUpdate};
use super::types::Employee;
use crate::images::ImageRetriever;

type Shared<T> = Rc<RefCell<Option<T>>>;

/// Longest simulated step, so a backgrounded tab does not fling nodes.
const MAX_FRAME_SECS: f32 = 0.05;

/// Force-directed org chart on a canvas.
///
/// Each new `employees` value discards the previous graph and renders a
/// fresh one. `group_mode` and `query` restyle the current graph in place.
/// Selections and match readouts are pushed to `on_select` / `on_search`.
#[component]
pub fn OrgChartCanvas(
	#[prop(into)] employees: Signal<Vec<Employee>>,
	#[prop(into)] group_mode: Signal<GroupMode>,
	#[prop(into)] query: Signal<String>,
	images: Arc<dyn ImageRetriever>,
	#[prop(optional)] config: GraphConfig,
	#[prop(optional, into)] on_select: Option<Callback<DetailPanel>>,
	#[prop(optional, into)] on_search: Option<Callback<String>>,
	#[prop(default = false)] fullscreen: bool,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let state: Shared<OrgGraphState> = Rc::new(RefCell::new(None));
	let photos: Rc<RefCell<Vec<Option<HtmlImageElement>>>> = Rc::new(RefCell::new(Vec::new()));
	let element_size = Rc::new(Cell::new((config.width, config.height)));
	let animate: Shared<Closure<dyn FnMut()>> = Rc::new(RefCell::new(None));
	let resize_cb: Shared<Closure<dyn FnMut()>> = Rc::new(RefCell::new(None));
	let select_on = config.select_on;

	let publish = move |update: ViewUpdate| {
		if let (Some(cb), Some(readout)) = (on_search, update.readout) {
			cb.run(readout);
		}
		if let (Some(cb), Some(panel)) = (on_select, update.selected) {
			cb.run(panel);
		}
	};

	// Canvas sizing and the animation loop; runs once the canvas is mounted.
	let (state_init, photos_init, size_init) = (state.clone(), photos.clone(), element_size.clone());
	let (animate_init, resize_cb_init) = (animate.clone(), resize_cb.clone());
	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		if animate_init.borrow().is_some() {
			return;
		}
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(window) = web_sys::window() else {
			return;
		};
		let Some(ctx) = context_2d(&canvas) else {
			return;
		};

		let fit = {
			let (canvas, state, size) = (canvas.clone(), state_init.clone(), size_init.clone());
			move || {
				let (w, h) = element_dimensions(&canvas, fullscreen);
				canvas.set_width(w as u32);
				canvas.set_height(h as u32);
				size.set((w, h));
				if let Some(ref mut s) = *state.borrow_mut() {
					s.resize(w, h);
				}
			}
		};
		fit();
		*resize_cb_init.borrow_mut() = Some(Closure::new(fit));
		if let Some(ref cb) = *resize_cb_init.borrow() {
			let _ = window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
		}

		let (state_anim, photos_anim, animate_inner) =
			(state_init.clone(), photos_init.clone(), animate_init.clone());
		let last_frame = Cell::new(js_sys::Date::now());
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			let now = js_sys::Date::now();
			let dt = (((now - last_frame.replace(now)) / 1000.0) as f32).min(MAX_FRAME_SECS);
			if let Some(ref mut s) = *state_anim.borrow_mut() {
				s.tick(dt);
				render::render(s, &ctx, &photos_anim.borrow());
			}
			if let (Some(cb), Some(win)) = (&*animate_inner.borrow(), web_sys::window()) {
				let _ = win.request_animation_frame(cb.as_ref().unchecked_ref());
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	// A new directory snapshot replaces the whole graph.
	let (state_data, photos_data, size_data) = (state.clone(), photos.clone(), element_size.clone());
	Effect::new(move |_| {
		let users = employees.get();
		let mut next = OrgGraphState::new(&users, config.clone(), images.clone());
		let (w, h) = size_data.get();
		next.resize(w, h);
		next.regroup(group_mode.get_untracked());
		let update = next.search(&query.get_untracked());

		*photos_data.borrow_mut() =
			next.photo_urls.iter().map(|url| load_photo(url.as_deref())).collect();
		*state_data.borrow_mut() = Some(next);
		publish(update);
	});

	let state_group = state.clone();
	Effect::new(move |_| {
		let mode = group_mode.get();
		if let Some(ref mut s) = *state_group.borrow_mut() {
			s.regroup(mode);
		}
	});

	let state_search = state.clone();
	Effect::new(move |_| {
		let q = query.get();
		let update = match *state_search.borrow_mut() {
			Some(ref mut s) => s.search(&q),
			None => return,
		};
		debug!("org chart: search {q:?} -> {:?}", update.readout);
		publish(update);
	});

	let state_md = state.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let Some((x, y)) = pointer_position(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut s) = *state_md.borrow_mut() {
			if let Some(idx) = s.node_at_position(x, y) {
				s.begin_drag(idx, x, y);
			}
		}
	};

	let state_mm = state.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some((x, y)) = pointer_position(canvas_ref, &ev) else {
			return;
		};
		let selected = match *state_mm.borrow_mut() {
			Some(ref mut s) => {
				if s.drag.active {
					s.drag_to(x, y);
					None
				} else {
					let hovered = s.node_at_position(x, y);
					let entered = s.set_hover(hovered);
					match hovered {
						Some(idx) if entered && select_on == SelectOn::Hover => s.select(idx),
						_ => None,
					}
				}
			}
			None => None,
		};
		publish(ViewUpdate {
			readout: None,
			selected,
		});
	};

	let state_mu = state.clone();
	let on_mouseup = move |_: MouseEvent| {
		let selected = match *state_mu.borrow_mut() {
			Some(ref mut s) => match s.end_drag() {
				Some(idx) if select_on == SelectOn::Click => s.select(idx),
				_ => None,
			},
			None => None,
		};
		publish(ViewUpdate {
			readout: None,
			selected,
		});
	};

	let state_ml = state.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(ref mut s) = *state_ml.borrow_mut() {
			s.end_drag();
			s.set_hover(None);
		}
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="org-chart-canvas"
			on:mousedown=on_mousedown
			on:mousemove=on_mousemove
			on:mouseup=on_mouseup
			on:mouseleave=on_mouseleave
			style="display: block; width: 100%; height: 100%; cursor: pointer;"
		/>
	}
}

fn context_2d(canvas: &HtmlCanvasElement) -> Option<CanvasRenderingContext2d> {
	canvas.get_context("2d").ok()??.dyn_into().ok()
}

fn element_dimensions(canvas: &HtmlCanvasElement, fullscreen: bool) -> (f64, f64) {
	let window: Option<Window> = web_sys::window();
	if fullscreen {
		if let Some(win) = window {
			let dim = |v: Result<JsValue, JsValue>, fallback| {
				v.ok().and_then(|v| v.as_f64()).unwrap_or(fallback)
			};
			return (dim(win.inner_width(), 1000.0), dim(win.inner_height(), 700.0));
		}
	}
	canvas
		.parent_element()
		.map(|p| (p.client_width() as f64, p.client_height() as f64))
		.filter(|&(w, h)| w > 0.0 && h > 0.0)
		.unwrap_or((1000.0, 700.0))
}

fn pointer_position(canvas_ref: NodeRef<leptos::html::Canvas>, ev: &MouseEvent) -> Option<(f64, f64)> {
	let canvas: HtmlCanvasElement = canvas_ref.get()?.into();
	let rect = canvas.get_bounding_client_rect();
	Some((ev.client_x() as f64 - rect.left(), ev.client_y() as f64 - rect.top()))
}

fn load_photo(url: Option<&str>) -> Option<HtmlImageElement> {
	let url = url?;
	let img = HtmlImageElement::new().ok()?;
	img.set_src(url);
	Some(img)
}
