use std::time::Duration;

use leptos::prelude::*;

use super::inline::Span;
use super::markdown::{Block, CodeBlock, CodeBody, PortLine, RenderTree};
use crate::components::force_graph::TechStackGraph;

/// How long the copy button shows its confirmation.
const COPIED_FOR: Duration = Duration::from_secs(2);

/// Turns a parsed document into views, placing each notice before the block
/// at its position.
pub fn render_tree(tree: RenderTree) -> impl IntoView {
	let RenderTree { blocks, notices } = tree;
	let mut notices = notices.into_iter().peekable();
	let mut views: Vec<AnyView> = Vec::with_capacity(blocks.len());
	for (i, block) in blocks.into_iter().enumerate() {
		while let Some(notice) = notices.next_if(|n| n.position <= i) {
			views.push(notice_view(notice.message));
		}
		views.push(block_view(block));
	}
	views.extend(notices.map(|n| notice_view(n.message)));

	view! { <div class="markdown">{views}</div> }
}

fn notice_view(message: String) -> AnyView {
	view! { <div class="md-notice" role="alert">{message}</div> }.into_any()
}

fn block_view(block: Block) -> AnyView {
	match block {
		Block::Spacer => view! { <div class="md-spacer"></div> }.into_any(),
		Block::Heading { level: 1, text } => view! { <h1 class="md-h1">{text}</h1> }.into_any(),
		Block::Heading { level: 2, text } => view! {
			<h2 class="md-h2">
				<span class="md-hash">"#"</span>
				{text}
			</h2>
		}
		.into_any(),
		Block::Heading { text, .. } => view! { <h3 class="md-h3">{text}</h3> }.into_any(),
		Block::Bullet(spans) => view! {
			<div class="md-item">
				<span class="md-bullet">"●"</span>
				<span class="md-item-text">{spans_view(spans)}</span>
			</div>
		}
		.into_any(),
		Block::Numbered { number, spans } => view! {
			<div class="md-item">
				<span class="md-number">{format!("{number}.")}</span>
				<span class="md-item-text">{spans_view(spans)}</span>
			</div>
		}
		.into_any(),
		Block::KeyValue { key, value } => view! {
			<div class="md-kv">
				<span class="md-key">{format!("{key}:")}</span>
				<span class="md-value">{spans_view(value)}</span>
			</div>
		}
		.into_any(),
		Block::Paragraph(spans) => view! { <div class="md-p">{spans_view(spans)}</div> }.into_any(),
		Block::Code(code) => code_view(code),
		Block::Graph(spec) => view! { <TechStackGraph spec=spec /> }.into_any(),
	}
}

fn spans_view(spans: Vec<Span>) -> Vec<AnyView> {
	spans
		.into_iter()
		.map(|span| match span {
			Span::Plain(text) => text.into_any(),
			Span::Bold(text) => view! { <strong class="md-bold">{text}</strong> }.into_any(),
			Span::Code(text) => view! { <code class="md-code">{text}</code> }.into_any(),
			Span::Link { text, url } => view! {
				<a href=url target="_blank" rel="noreferrer" class="md-link">
					{text}
				</a>
			}
			.into_any(),
		})
		.collect()
}

fn copy_to_clipboard(text: &str) -> bool {
	let Some(window) = web_sys::window() else {
		return false;
	};
	// Fire and forget: the browser rejects silently without permission.
	let _ = window.navigator().clipboard().write_text(text);
	true
}

fn code_view(code: CodeBlock) -> AnyView {
	let CodeBlock {
		language,
		source,
		body,
	} = code;
	let source = StoredValue::new(source);
	let copied = RwSignal::new(false);
	let copy = move |_| {
		if source.with_value(|text| copy_to_clipboard(text)) {
			copied.set(true);
			set_timeout(
				move || {
					copied.try_set(false);
				},
				COPIED_FOR,
			);
		}
	};
	let content = match body {
		CodeBody::PortTable(lines) => lines.into_iter().map(port_line_view).collect_view().into_any(),
		CodeBody::Preformatted(text) => view! { <pre class="code-json">{text}</pre> }.into_any(),
		CodeBody::Plain(text) => view! { <pre class="code-plain">{text}</pre> }.into_any(),
	};
	view! {
		<div class="code-block">
			<div class="code-header">
				<span class="code-lang">{language.to_uppercase()}</span>
				<button class="code-copy" title="Copy to clipboard" on:click=copy>
					{move || if copied.get() { "Copied" } else { "Copy" }}
				</button>
			</div>
			<div class="code-body">{content}</div>
		</div>
	}
	.into_any()
}

fn port_line_view(line: PortLine) -> AnyView {
	let open = line.is_open();
	match line {
		PortLine::Header(text) => view! { <div class="port-header">{text}</div> }.into_any(),
		PortLine::Entry {
			port,
			state,
			service,
		} => {
			let state_class = if open { "port-state open" } else { "port-state" };
			view! {
				<div class="port-row">
					<span class="port-id">{port}</span>
					<span class=state_class>{state}</span>
					<span class="port-service">{service}</span>
				</div>
			}
			.into_any()
		}
		PortLine::Plain(text) => view! { <div class="port-plain">{text}</div> }.into_any(),
	}
}
