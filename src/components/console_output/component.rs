use leptos::ev;
use leptos::prelude::*;
use log::{error, info};
use wasm_bindgen::prelude::*;
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Node, Url};

use super::export::{self, ExportError, ExportFormat, ReportMeta};
use super::markdown::parse_document;
use super::panel::{PanelState, can_export};
use super::view::render_tree;
use crate::config::ConsoleConfig;
use crate::scan::Source;

fn download(bytes: &[u8], file_name: &str, mime: &str) -> Result<(), ExportError> {
	let fail = |e: JsValue| ExportError::Download(format!("{e:?}"));
	let document = web_sys::window()
		.and_then(|w| w.document())
		.ok_or_else(|| ExportError::Download("no document".into()))?;
	let body = document
		.body()
		.ok_or_else(|| ExportError::Download("no document body".into()))?;

	let parts = js_sys::Array::of1(&js_sys::Uint8Array::from(bytes));
	let options = BlobPropertyBag::new();
	options.set_type(mime);
	let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &options).map_err(fail)?;
	let url = Url::create_object_url_with_blob(&blob).map_err(fail)?;

	let anchor: HtmlAnchorElement = document
		.create_element("a")
		.map_err(fail)?
		.dyn_into()
		.map_err(|_| ExportError::Download("could not create link".into()))?;
	anchor.set_href(&url);
	anchor.set_download(file_name);
	body.append_child(&anchor).map_err(fail)?;
	anchor.click();
	let _ = body.remove_child(&anchor);
	let _ = Url::revoke_object_url(&url);
	Ok(())
}

/// The terminal panel: renders the report, follows it while it arrives and
/// exports the raw text.
#[component]
pub fn ConsoleOutput(
	#[prop(into)] output: Signal<String>,
	#[prop(into)] sources: Signal<Vec<Source>>,
	#[prop(into)] in_progress: Signal<bool>,
	#[prop(into)] target: Signal<String>,
	#[prop(into)] tool_name: Signal<String>,
) -> impl IntoView {
	let settings = StoredValue::new(use_context::<ConsoleConfig>().unwrap_or_default().export);
	let panel = RwSignal::new(PanelState::default());
	let (export_error, set_export_error) = signal(None::<String>);
	let body_ref = NodeRef::<leptos::html::Div>::new();
	let menu_ref = NodeRef::<leptos::html::Div>::new();

	let outside_press = window_event_listener(ev::mousedown, move |ev| {
		if !panel.with_untracked(|p| p.export_menu_open) {
			return;
		}
		let target = ev.target().and_then(|t| t.dyn_into::<Node>().ok());
		let inside = match (menu_ref.get_untracked(), target) {
			(Some(menu), Some(target)) => menu.contains(Some(&target)),
			_ => false,
		};
		panel.update(|p| p.on_pointer_down(inside));
	});
	on_cleanup(move || outside_press.remove());

	Effect::new(move |was_in_progress: Option<bool>| {
		let now = in_progress.get();
		if now && was_in_progress != Some(true) {
			panel.update(|p| p.on_delivery_started());
		}
		now
	});

	Effect::new(move |_| {
		output.track();
		if panel.with(|p| p.should_scroll_to_bottom(in_progress.get())) {
			if let Some(body) = body_ref.get() {
				body.set_scroll_top(body.scroll_height());
			}
		}
	});

	let on_scroll = move |_| {
		let Some(body) = body_ref.get_untracked() else {
			return;
		};
		let mut next = panel.get_untracked();
		next.on_scroll(
			body.scroll_top() as f64,
			body.scroll_height() as f64,
			body.client_height() as f64,
		);
		if next != panel.get_untracked() {
			panel.set(next);
		}
	};

	let run_export = move |format: ExportFormat| {
		let non_empty = |s: String| Some(s).filter(|s| !s.is_empty());
		let (target, tool) = (non_empty(target.get_untracked()), non_empty(tool_name.get_untracked()));
		let now = js_sys::Date::new_0();
		let date: String = String::from(now.to_iso_string()).chars().take(10).collect();
		let meta = ReportMeta {
			tool: tool.clone(),
			target: target.clone(),
			generated_at: now.to_locale_string("en-US", &JsValue::UNDEFINED).into(),
		};
		let name = export::file_name(target.as_deref(), tool.as_deref(), &date, format);

		let result = settings
			.with_value(|s| output.with_untracked(|doc| export::export(doc, format, &meta, s)))
			.and_then(|bytes| download(&bytes, &name, format.mime_type()));
		match result {
			Ok(()) => {
				info!("exported {name}");
				set_export_error.set(None);
			}
			Err(ExportError::EmptyDocument) => {}
			Err(e) => {
				error!("export as {} failed: {e}", format.extension());
				set_export_error.set(Some(match format {
					ExportFormat::Pdf => {
						format!("Failed to generate PDF ({e}). Please try exporting as TXT.")
					}
					ExportFormat::PlainText => format!("Export failed: {e}"),
				}));
			}
		}
		panel.update(|p| p.close_export_menu());
	};

	view! {
		<div class=move || {
			if panel.get().expanded { "console console-expanded" } else { "console" }
		}>
			<div class="console-header">
				<div class="console-title">
					<span class="console-prompt">">_"</span>
					<span>"PROJECT_X_TERMINAL // OUTPUT_STREAM"</span>
				</div>
				<div class="console-actions">
					<Show when=move || in_progress.get()>
						<span class="console-receiving">"RECEIVING_DATA..."</span>
					</Show>
					<Show when=move || output.with(|doc| can_export(doc, in_progress.get()))>
						<div class="export-menu" node_ref=menu_ref>
							<button
								title="Export Results"
								on:click=move |_| panel.update(|p| p.toggle_export_menu())
							>
								"Export"
							</button>
							<Show when=move || panel.get().export_menu_open>
								<div class="export-dropdown">
									<button on:click=move |_| run_export(ExportFormat::PlainText)>
										"Export as .TXT"
									</button>
									<button on:click=move |_| run_export(ExportFormat::Pdf)>
										"Export as .PDF"
									</button>
								</div>
							</Show>
						</div>
					</Show>
					<button
						title=move || {
							if panel.get().expanded { "Minimize Console" } else { "Maximize Console" }
						}
						on:click=move |_| panel.update(|p| p.toggle_expanded())
					>
						{move || if panel.get().expanded { "Minimize" } else { "Maximize" }}
					</button>
				</div>
			</div>

			{move || {
				export_error
					.get()
					.map(|message| {
						view! {
							<div class="export-error" role="alert">
								<span>{message}</span>
								<button on:click=move |_| set_export_error.set(None)>"Dismiss"</button>
							</div>
						}
					})
			}}

			<div class="console-body" node_ref=body_ref on:scroll=on_scroll>
				{move || {
					let doc = output.get();
					if doc.is_empty() {
						view! {
							<div class="console-empty">
								<p>"Awaiting Neural Link..."</p>
							</div>
						}
							.into_any()
					} else {
						render_tree(parse_document(&doc)).into_any()
					}
				}}
				<Show when=move || in_progress.get()>
					<span class="console-cursor"></span>
				</Show>
			</div>

			<Show when=move || sources.with(|s| !s.is_empty())>
				<div class="console-sources">
					<div class="sources-title">
						{move || format!("Intel Sources ({})", sources.with(Vec::len))}
					</div>
					<div class="sources-list">
						{move || {
							sources
								.get()
								.into_iter()
								.map(|source| {
									view! {
										<a
											href=source.url
											target="_blank"
											rel="noopener noreferrer"
											class="source-link"
										>
											{source.title}
										</a>
									}
								})
								.collect_view()
						}}
					</div>
				</div>
			</Show>
		</div>
	}
}
