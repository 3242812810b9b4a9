use log::{debug, warn};
use once_cell::sync::Lazy;
use regex::Regex;

use super::inline::{Span, parse_inline};
use crate::components::force_graph::{GRAPH_TAG, GraphSpec};

/// Fence tag that forces port-table formatting.
pub const PORT_SCAN_TAG: &str = "nmap";
const FENCE: &str = "```";
const KEY_VALUE_MAX_LEN: usize = 120;

static FENCE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)```.*?```").unwrap());
static BULLET_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[-*]\s").unwrap());
static NUMBERED_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]+\.\s").unwrap());
static KEY_VALUE_RE: Lazy<Regex> =
	Lazy::new(|| Regex::new(r"^[A-Z][A-Za-z0-9\s\-_]+:").unwrap());
static PORT_LINE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]+/tcp").unwrap());

/// A contiguous piece of the document, borrowed from it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Segment<'a> {
	CodeFence {
		/// Text between the two fence markers.
		raw: &'a str,
		language: Option<&'a str>,
		body: &'a str,
	},
	Prose {
		raw: &'a str,
	},
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PortLine {
	Header(String),
	Entry {
		port: String,
		state: String,
		service: String,
	},
	Plain(String),
}

impl PortLine {
	pub fn is_open(&self) -> bool {
		matches!(self, Self::Entry { state, .. } if state == "open")
	}
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CodeBody {
	PortTable(Vec<PortLine>),
	/// JSON object shown as-is.
	Preformatted(String),
	Plain(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CodeBlock {
	/// Fence tag, or `unspecified`.
	pub language: String,
	/// Fence body as written, for copying.
	pub source: String,
	pub body: CodeBody,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Block {
	Spacer,
	Heading { level: u8, text: String },
	Bullet(Vec<Span>),
	Numbered { number: String, spans: Vec<Span> },
	KeyValue { key: String, value: Vec<Span> },
	Paragraph(Vec<Span>),
	Code(CodeBlock),
	Graph(GraphSpec),
}

/// A user-facing message in place of content that could not be rendered.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
	/// Index in `blocks` the notice is shown before.
	pub position: usize,
	pub message: String,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct RenderTree {
	pub blocks: Vec<Block>,
	pub notices: Vec<Notice>,
}

/// Splits a document on triple-backtick fences. An unmatched trailing fence
/// stays inside the final prose segment.
pub fn split_segments(doc: &str) -> Vec<Segment<'_>> {
	let mut segments = Vec::new();
	let mut last = 0;
	for m in FENCE_RE.find_iter(doc) {
		if m.start() > last {
			segments.push(Segment::Prose {
				raw: &doc[last..m.start()],
			});
		}
		segments.push(fence_segment(&doc[m.start() + FENCE.len()..m.end() - FENCE.len()]));
		last = m.end();
	}
	if last < doc.len() {
		segments.push(Segment::Prose { raw: &doc[last..] });
	}
	segments
}

fn fence_segment(raw: &str) -> Segment<'_> {
	let tag_len = raw
		.find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
		.unwrap_or(raw.len());
	let (tag, rest) = raw.split_at(tag_len);
	let rest = rest.strip_prefix('\n').unwrap_or(rest);
	Segment::CodeFence {
		raw,
		language: Some(tag).filter(|t| !t.is_empty()),
		body: trim_blank_lines(rest),
	}
}

fn trim_blank_lines(text: &str) -> &str {
	let mut start = 0;
	for line in text.split_inclusive('\n') {
		if !line.trim().is_empty() {
			break;
		}
		start += line.len();
	}
	text[start..].trim_end()
}

/// Parses a whole document into blocks. Never fails: a bad embedded graph
/// drops only its own block and leaves a notice.
pub fn parse_document(doc: &str) -> RenderTree {
	let mut tree = RenderTree::default();
	for segment in split_segments(doc) {
		match segment {
			Segment::CodeFence {
				raw,
				language: Some(GRAPH_TAG),
				body,
			} => match GraphSpec::from_json(body) {
				Ok(spec) => tree.blocks.push(Block::Graph(spec)),
				Err(e) => {
					warn!("skipping embedded graph ({} bytes): {e}", raw.len());
					tree.notices.push(Notice {
						position: tree.blocks.len(),
						message: "Error parsing graph data".into(),
					});
				}
			},
			Segment::CodeFence { language, body, .. } => {
				tree.blocks.push(Block::Code(code_block(language, body)));
			}
			Segment::Prose { raw } => {
				tree.blocks.extend(raw.split('\n').map(classify_line));
			}
		}
	}
	debug!(
		"parsed document: {} blocks, {} notices",
		tree.blocks.len(),
		tree.notices.len()
	);
	tree
}

fn code_block(language: Option<&str>, body: &str) -> CodeBlock {
	let is_port_table = language == Some(PORT_SCAN_TAG)
		|| (body.contains("PORT") && body.contains("STATE") && body.contains("SERVICE"));
	let trimmed = body.trim();
	let body_kind = if is_port_table {
		CodeBody::PortTable(body.lines().map(port_line).collect())
	} else if language == Some("json") || (trimmed.starts_with('{') && trimmed.ends_with('}')) {
		CodeBody::Preformatted(body.to_string())
	} else {
		CodeBody::Plain(body.to_string())
	};
	CodeBlock {
		language: language.unwrap_or("unspecified").to_string(),
		source: body.to_string(),
		body: body_kind,
	}
}

fn port_line(line: &str) -> PortLine {
	let trimmed = line.trim();
	if trimmed.starts_with("PORT") {
		return PortLine::Header(line.to_string());
	}
	if PORT_LINE_RE.is_match(trimmed) {
		let parts: Vec<&str> = trimmed.split_whitespace().collect();
		if let [port, state, service @ ..] = parts.as_slice() {
			if !service.is_empty() {
				return PortLine::Entry {
					port: port.to_string(),
					state: state.to_string(),
					service: service.join(" "),
				};
			}
		}
	}
	PortLine::Plain(line.to_string())
}

/// Classifies a single prose line. Lines are independent of each other.
pub fn classify_line(line: &str) -> Block {
	let line = line.strip_suffix('\r').unwrap_or(line);
	let trimmed = line.trim();
	if trimmed.is_empty() {
		return Block::Spacer;
	}

	for (level, prefix) in [(1, "# "), (2, "## "), (3, "### ")] {
		if let Some(text) = line.strip_prefix(prefix) {
			return Block::Heading {
				level,
				text: text.to_string(),
			};
		}
	}

	// Markers are matched on the trimmed line, so a bare "- " is not a list item.
	let indented = line.trim_start();
	if let Some(m) = BULLET_RE.find(trimmed) {
		return Block::Bullet(parse_inline(&indented[m.end()..]));
	}

	if let Some(m) = NUMBERED_RE.find(trimmed) {
		let number = trimmed.split('.').next().unwrap_or_default();
		return Block::Numbered {
			number: number.to_string(),
			spans: parse_inline(&indented[m.end()..]),
		};
	}

	if KEY_VALUE_RE.is_match(trimmed)
		&& trimmed.chars().count() < KEY_VALUE_MAX_LEN
		&& !trimmed.contains("http")
	{
		if let Some((key, value)) = line.split_once(':') {
			return Block::KeyValue {
				key: key.trim().to_string(),
				value: parse_inline(value.trim()),
			};
		}
	}

	Block::Paragraph(parse_inline(line))
}
