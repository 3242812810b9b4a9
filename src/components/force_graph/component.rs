use std::cell::{Cell, RefCell};
use std::rc::Rc;

use leptos::prelude::*;
use log::{debug, warn};
use send_wrapper::SendWrapper;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::frame_loop::{FrameStep, LayoutLoop};
use super::render;
use super::state::ForceLayout;
use super::types::GraphSpec;
use crate::config::ConsoleConfig;

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

fn request_frame(cb: &Closure<dyn FnMut()>) -> Option<i32> {
	web_sys::window()?
		.request_animation_frame(cb.as_ref().unchecked_ref())
		.ok()
}

/// Canvas panel that lays out and draws one embedded graph. The layout loop
/// runs until its budget is spent or the panel is removed.
#[component]
pub fn TechStackGraph(spec: GraphSpec) -> impl IntoView {
	let params = use_context::<ConsoleConfig>()
		.map(|config| config.layout)
		.unwrap_or_default();
	let height = params.panel_height;
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let sim: Rc<RefCell<Option<LayoutLoop>>> = Rc::new(RefCell::new(None));
	let animate: FrameCallback = Rc::new(RefCell::new(None));
	let frame_id: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));
	let (sim_init, animate_init, frame_init) = (sim.clone(), animate.clone(), frame_id.clone());

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		if sim_init.borrow().is_some() {
			return;
		}
		let canvas: HtmlCanvasElement = canvas.into();
		let width = canvas
			.parent_element()
			.map(|p| p.client_width() as f64)
			.filter(|w| *w > 0.0)
			.unwrap_or(params.fallback_width);
		canvas.set_width(width as u32);
		canvas.set_height(height as u32);

		let ctx: CanvasRenderingContext2d = match canvas.get_context("2d") {
			Ok(Some(ctx)) => match ctx.dyn_into() {
				Ok(ctx) => ctx,
				Err(_) => return,
			},
			_ => {
				warn!("2d canvas context unavailable; graph not drawn");
				return;
			}
		};

		let layout = ForceLayout::new(&spec, width, height, params.clone(), js_sys::Math::random);
		debug!(
			"starting layout: {} nodes, {} edges",
			layout.nodes.len(),
			layout.edges.len()
		);
		*sim_init.borrow_mut() = Some(LayoutLoop::new(layout));

		let (sim_anim, animate_inner, frame_anim) =
			(sim_init.clone(), animate_init.clone(), frame_init.clone());
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			frame_anim.set(None);
			let step = match sim_anim.borrow_mut().as_mut() {
				Some(sim) => {
					let step = sim.frame(js_sys::Date::now());
					render::render(sim.layout(), &ctx);
					step
				}
				None => FrameStep::Finished,
			};
			match step {
				FrameStep::Continue => {
					if let Some(ref cb) = *animate_inner.borrow() {
						frame_anim.set(request_frame(cb));
					}
				}
				// Releases this callback; nothing else holds it.
				FrameStep::Finished => {
					let _ = animate_inner.borrow_mut().take();
				}
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			frame_init.set(request_frame(cb));
		}
	});

	let guard = SendWrapper::new((sim, animate, frame_id));
	on_cleanup(move || {
		let (sim, animate, frame_id) = guard.take();
		if let Some(sim) = sim.borrow_mut().as_mut().filter(|sim| !sim.is_stopped()) {
			debug!("graph removed mid-layout after {} ticks", sim.ticks());
			sim.cancel();
		}
		if let (Some(id), Some(window)) = (frame_id.take(), web_sys::window()) {
			let _ = window.cancel_animation_frame(id);
		}
		let _ = animate.borrow_mut().take();
	});

	view! {
		<div class="graph-panel">
			<div class="graph-title">"Tech Stack Topology"</div>
			<canvas node_ref=canvas_ref class="graph-canvas" />
		</div>
	}
}
