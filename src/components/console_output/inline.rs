use once_cell::sync::Lazy;
use regex::Regex;

static SPAN_RE: Lazy<Regex> =
	Lazy::new(|| Regex::new(r"\*\*.*?\*\*|`.*?`|\[.*?\]\(.*?\)").unwrap());
static LINK_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\[(.*?)\]\((.*?)\)$").unwrap());

/// One inline fragment of a line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Span {
	Plain(String),
	Bold(String),
	Code(String),
	Link { text: String, url: String },
}

/// Splits a line into plain, bold, code and link spans. Spans do not nest.
pub fn parse_inline(line: &str) -> Vec<Span> {
	let mut spans = Vec::new();
	let mut last = 0;
	for m in SPAN_RE.find_iter(line) {
		if m.start() > last {
			spans.push(Span::Plain(line[last..m.start()].to_string()));
		}
		spans.push(classify(m.as_str()));
		last = m.end();
	}
	if last < line.len() {
		spans.push(Span::Plain(line[last..].to_string()));
	}
	spans
}

fn classify(token: &str) -> Span {
	if let Some(inner) = token.strip_prefix("**").and_then(|t| t.strip_suffix("**")) {
		return Span::Bold(inner.to_string());
	}
	if let Some(inner) = token.strip_prefix('`').and_then(|t| t.strip_suffix('`')) {
		return Span::Code(inner.to_string());
	}
	match LINK_RE.captures(token) {
		Some(caps) => Span::Link {
			text: caps[1].to_string(),
			url: caps[2].to_string(),
		},
		None => Span::Plain(token.to_string()),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn plain(s: &str) -> Span {
		Span::Plain(s.into())
	}

	#[test]
	fn mixed_line() {
		let spans = parse_inline("See **bold** and `code` at [site](http://x.com)");
		assert_eq!(
			spans,
			vec![
				plain("See "),
				Span::Bold("bold".into()),
				plain(" and "),
				Span::Code("code".into()),
				plain(" at "),
				Span::Link {
					text: "site".into(),
					url: "http://x.com".into()
				},
			]
		);
	}

	#[test]
	fn plain_line_is_one_span() {
		assert_eq!(parse_inline("nothing to see"), vec![plain("nothing to see")]);
		assert!(parse_inline("").is_empty());
	}

	#[test]
	fn malformed_link_stays_plain() {
		assert_eq!(
			parse_inline("broken [link](http://x.com"),
			vec![plain("broken [link](http://x.com")]
		);
		assert_eq!(parse_inline("only **half bold"), vec![plain("only **half bold")]);
	}

	#[test]
	fn bold_contents_are_not_rescanned() {
		assert_eq!(
			parse_inline("**see `x` here**"),
			vec![Span::Bold("see `x` here".into())]
		);
	}

	#[test]
	fn bold_is_non_greedy() {
		assert_eq!(
			parse_inline("**a** b **c**"),
			vec![Span::Bold("a".into()), plain(" b "), Span::Bold("c".into())]
		);
	}
}
