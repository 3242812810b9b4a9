use thiserror::Error;

use super::pdf;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportFormat {
	PlainText,
	Pdf,
}

impl ExportFormat {
	pub fn extension(self) -> &'static str {
		match self {
			Self::PlainText => "txt",
			Self::Pdf => "pdf",
		}
	}

	pub fn mime_type(self) -> &'static str {
		match self {
			Self::PlainText => "text/plain",
			Self::Pdf => "application/pdf",
		}
	}
}

#[derive(Debug, Error)]
pub enum ExportError {
	#[error("nothing to export")]
	EmptyDocument,
	#[error("report needs {pages} pages, more than the limit of {limit}")]
	TooManyPages { pages: usize, limit: usize },
	#[error("download failed: {0}")]
	Download(String),
}

/// Header block of the PDF report.
#[derive(Clone, Debug, Default)]
pub struct ReportMeta {
	pub tool: Option<String>,
	pub target: Option<String>,
	pub generated_at: String,
}

/// Page geometry in millimetres, A4 portrait by default.
#[derive(Clone, Debug, PartialEq)]
pub struct ExportSettings {
	pub page_width: f64,
	pub page_height: f64,
	pub left: f64,
	pub title_y: f64,
	pub target_y: f64,
	pub generated_y: f64,
	pub rule_y: f64,
	pub body_top: f64,
	pub continuation_top: f64,
	pub bottom_margin: f64,
	pub line_height: f64,
	pub title_size: f64,
	pub body_size: f64,
	/// Characters per wrapped line.
	pub wrap_columns: usize,
	pub max_pages: usize,
}

impl Default for ExportSettings {
	fn default() -> Self {
		Self {
			page_width: 210.0,
			page_height: 297.0,
			left: 10.0,
			title_y: 15.0,
			target_y: 22.0,
			generated_y: 27.0,
			rule_y: 30.0,
			body_top: 35.0,
			continuation_top: 15.0,
			bottom_margin: 10.0,
			line_height: 5.0,
			title_size: 14.0,
			body_size: 10.0,
			wrap_columns: 89,
			max_pages: 500,
		}
	}
}

/// One line of text placed at a baseline, `y` measured from the page top.
#[derive(Clone, Debug, PartialEq)]
pub struct PlacedLine {
	pub y: f64,
	pub text: String,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Page {
	pub lines: Vec<PlacedLine>,
}

/// Builds the bytes of an exported file.
pub fn export(
	doc: &str,
	format: ExportFormat,
	meta: &ReportMeta,
	settings: &ExportSettings,
) -> Result<Vec<u8>, ExportError> {
	if doc.is_empty() {
		return Err(ExportError::EmptyDocument);
	}
	match format {
		ExportFormat::PlainText => Ok(doc.as_bytes().to_vec()),
		ExportFormat::Pdf => {
			let pages = paginate(&wrap_text(doc, settings.wrap_columns), settings);
			if pages.len() > settings.max_pages {
				return Err(ExportError::TooManyPages {
					pages: pages.len(),
					limit: settings.max_pages,
				});
			}
			Ok(pdf::write(&pages, meta, settings))
		}
	}
}

/// Word-wraps each source line to `columns` characters. Words longer than a
/// line are split hard; empty source lines are kept.
pub fn wrap_text(text: &str, columns: usize) -> Vec<String> {
	let columns = columns.max(1);
	let mut out = Vec::new();
	for source in text.split('\n') {
		let source = source.strip_suffix('\r').unwrap_or(source);
		let mut line = String::new();
		let mut len = 0;
		for word in source.split(' ') {
			let mut word: Vec<char> = word.chars().collect();
			let sep = usize::from(len > 0);
			if len + sep + word.len() <= columns {
				if sep == 1 {
					line.push(' ');
				}
				line.extend(&word);
				len += sep + word.len();
				continue;
			}
			if len > 0 {
				out.push(std::mem::take(&mut line));
			}
			while word.len() > columns {
				out.push(word.drain(..columns).collect());
			}
			line = word.iter().collect();
			len = word.len();
		}
		out.push(line);
	}
	out
}

/// Lays wrapped lines onto pages. The first page leaves room for the header.
pub fn paginate(lines: &[String], settings: &ExportSettings) -> Vec<Page> {
	let mut pages = vec![Page::default()];
	let mut y = settings.body_top;
	for text in lines {
		if y > settings.page_height - settings.bottom_margin {
			pages.push(Page::default());
			y = settings.continuation_top;
		}
		if let Some(page) = pages.last_mut() {
			page.lines.push(PlacedLine {
				y,
				text: text.clone(),
			});
		}
		y += settings.line_height;
	}
	pages
}

/// `<target>_<tool>_<date>.<ext>` with unsafe characters replaced.
pub fn file_name(target: Option<&str>, tool: Option<&str>, date: &str, format: ExportFormat) -> String {
	let target: String = target
		.filter(|t| !t.is_empty())
		.unwrap_or("target")
		.chars()
		.map(|c| {
			if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
				c
			} else {
				'_'
			}
		})
		.collect();
	let tool = tool
		.filter(|t| !t.is_empty())
		.unwrap_or("tool")
		.split_whitespace()
		.collect::<Vec<_>>()
		.join("_");
	format!("{target}_{tool}_{date}.{}", format.extension())
}

#[cfg(test)]
mod tests {
	use super::*;

	fn meta() -> ReportMeta {
		ReportMeta {
			tool: Some("Whois Intel".into()),
			target: Some("example.com".into()),
			generated_at: "2026-10-18 12:00:00".into(),
		}
	}

	#[test]
	fn plain_text_is_byte_identical() {
		let bytes = export("hello", ExportFormat::PlainText, &meta(), &ExportSettings::default()).unwrap();
		assert_eq!(bytes, b"hello");
		let raw = "```tech_stack_graph\n{}\n```\n**ünïcode** ✓\r\n";
		let bytes = export(raw, ExportFormat::PlainText, &meta(), &ExportSettings::default()).unwrap();
		assert_eq!(bytes, raw.as_bytes());
	}

	#[test]
	fn empty_document_is_an_error() {
		for format in [ExportFormat::PlainText, ExportFormat::Pdf] {
			assert!(matches!(
				export("", format, &meta(), &ExportSettings::default()),
				Err(ExportError::EmptyDocument)
			));
		}
	}

	#[test]
	fn page_limit_is_an_error_and_plain_text_still_works() {
		let settings = ExportSettings {
			max_pages: 1,
			..ExportSettings::default()
		};
		let doc = "line\n".repeat(200);
		let err = export(&doc, ExportFormat::Pdf, &meta(), &settings).unwrap_err();
		assert!(matches!(err, ExportError::TooManyPages { limit: 1, .. }));
		assert!(export(&doc, ExportFormat::PlainText, &meta(), &settings).is_ok());
	}

	#[test]
	fn wraps_on_words() {
		assert_eq!(
			wrap_text("the quick brown fox", 9),
			vec!["the quick", "brown fox"]
		);
		assert_eq!(wrap_text("a\n\nb", 10), vec!["a", "", "b"]);
	}

	#[test]
	fn splits_overlong_words() {
		assert_eq!(
			wrap_text("abcdefghij xy", 4),
			vec!["abcd", "efgh", "ij", "xy"]
		);
	}

	#[test]
	fn paginates_after_bottom_margin() {
		let settings = ExportSettings::default();
		let lines: Vec<String> = (0..60).map(|i| i.to_string()).collect();
		let pages = paginate(&lines, &settings);
		// 35, 40, ..., 285 fit on the first page: 51 lines.
		assert_eq!(pages.len(), 2);
		assert_eq!(pages[0].lines.len(), 51);
		assert_eq!(pages[0].lines[0].y, 35.0);
		assert_eq!(pages[1].lines[0].y, 15.0);
		assert_eq!(pages[1].lines[0].text, "51");
	}

	#[test]
	fn file_names_are_sanitized() {
		assert_eq!(
			file_name(Some("https://ex ample.com/"), Some("Port  Intel Advisor"), "2026-10-18", ExportFormat::Pdf),
			"https___ex_ample.com__Port_Intel_Advisor_2026-10-18.pdf"
		);
		assert_eq!(
			file_name(None, None, "2026-10-18", ExportFormat::PlainText),
			"target_tool_2026-10-18.txt"
		);
	}

	#[test]
	fn pdf_has_header_and_pages() {
		let contains = |bytes: &[u8], needle: &str| {
			bytes.windows(needle.len()).any(|w| w == needle.as_bytes())
		};
		let doc = "Target: example.com\n".repeat(120);
		let bytes = export(&doc, ExportFormat::Pdf, &meta(), &ExportSettings::default()).unwrap();
		assert!(bytes.starts_with(b"%PDF-"));
		assert!(contains(&bytes, "%%EOF"));
		assert!(contains(&bytes, "(OSINT Report: Whois Intel) Tj"));
		assert!(contains(&bytes, "(Target: example.com) Tj"));
		assert!(contains(&bytes, "(Generated: 2026-10-18 12:00:00) Tj"));
		assert!(contains(&bytes, "/Count 3"));
	}
}
