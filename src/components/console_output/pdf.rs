//! Monospace PDF reports: Courier text lines under a header block and rule.

use pdf_writer::{Content, Finish, Name, Pdf, Rect, Ref, Str};

use super::export::{ExportSettings, Page, ReportMeta};

const PT_PER_MM: f32 = 72.0 / 25.4;
const CATALOG: Ref = Ref::new(1);
const PAGE_TREE: Ref = Ref::new(2);
const BODY_FONT: Ref = Ref::new(3);
const TITLE_FONT: Ref = Ref::new(4);
const BODY: Name = Name(b"F1");
const TITLE: Name = Name(b"F2");

fn page_ref(index: usize) -> Ref {
	Ref::new(5 + 2 * index as i32)
}

fn content_ref(index: usize) -> Ref {
	Ref::new(6 + 2 * index as i32)
}

fn mm(value: f64) -> f32 {
	value as f32 * PT_PER_MM
}

pub fn write(pages: &[Page], meta: &ReportMeta, settings: &ExportSettings) -> Vec<u8> {
	let mut pdf = Pdf::new();
	pdf.catalog(CATALOG).pages(PAGE_TREE);
	pdf.pages(PAGE_TREE)
		.kids((0..pages.len()).map(page_ref))
		.count(pages.len() as i32);
	pdf.type1_font(BODY_FONT)
		.base_font(Name(b"Courier"))
		.encoding_predefined(Name(b"WinAnsiEncoding"));
	pdf.type1_font(TITLE_FONT)
		.base_font(Name(b"Courier-Bold"))
		.encoding_predefined(Name(b"WinAnsiEncoding"));

	let media_box = Rect::new(0.0, 0.0, mm(settings.page_width), mm(settings.page_height));
	for (i, page) in pages.iter().enumerate() {
		let mut content = Content::new();
		if i == 0 {
			header(&mut content, meta, settings);
		}
		for line in &page.lines {
			text(&mut content, BODY, settings.body_size, line.y, &line.text, settings);
		}

		let mut writer = pdf.page(page_ref(i));
		writer.media_box(media_box);
		writer.parent(PAGE_TREE);
		writer.contents(content_ref(i));
		let mut resources = writer.resources();
		let mut fonts = resources.fonts();
		fonts.pair(BODY, BODY_FONT);
		fonts.pair(TITLE, TITLE_FONT);
		fonts.finish();
		resources.finish();
		writer.finish();

		pdf.stream(content_ref(i), &content.finish());
	}
	pdf.finish()
}

fn header(content: &mut Content, meta: &ReportMeta, s: &ExportSettings) {
	let title = format!("OSINT Report: {}", meta.tool.as_deref().unwrap_or("General"));
	let target = format!("Target: {}", meta.target.as_deref().unwrap_or("Unknown"));
	let generated = format!("Generated: {}", meta.generated_at);
	text(content, TITLE, s.title_size, s.title_y, &title, s);
	text(content, BODY, s.body_size, s.target_y, &target, s);
	text(content, BODY, s.body_size, s.generated_y, &generated, s);

	let rule_y = mm(s.page_height - s.rule_y);
	content.set_line_width(0.5);
	content.move_to(mm(s.left), rule_y);
	content.line_to(mm(s.page_width - s.left), rule_y);
	content.stroke();
}

/// Places one line with its baseline `y` millimetres below the page top.
fn text(content: &mut Content, font: Name, size: f64, y: f64, line: &str, s: &ExportSettings) {
	content.begin_text();
	content.set_font(font, size as f32);
	content.next_line(mm(s.left), mm(s.page_height - y));
	content.show(Str(&win_ansi(line)));
	content.end_text();
}

/// Encodes text for the standard Courier fonts. Characters outside Latin-1
/// become `?`.
fn win_ansi(text: &str) -> Vec<u8> {
	text.chars()
		.map(|c| match c {
			'\t' => b' ',
			' '..='~' => c as u8,
			c if (0xA0..=0xFF).contains(&(c as u32)) => c as u8,
			_ => b'?',
		})
		.collect()
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::console_output::export::PlacedLine;

	fn contains(haystack: &[u8], needle: &[u8]) -> bool {
		haystack.windows(needle.len()).any(|w| w == needle)
	}

	#[test]
	fn encodes_latin1_and_replaces_the_rest() {
		assert_eq!(win_ansi("a(b)"), b"a(b)");
		assert_eq!(win_ansi("é\t"), vec![0xE9, b' ']);
		assert_eq!(win_ansi("✓\u{7}"), b"??");
	}

	#[test]
	fn writes_header_and_body_lines() {
		let pages = vec![
			Page {
				lines: vec![PlacedLine {
					y: 35.0,
					text: "hello".into(),
				}],
			},
			Page {
				lines: vec![PlacedLine {
					y: 15.0,
					text: "second".into(),
				}],
			},
		];
		let bytes = write(&pages, &ReportMeta::default(), &ExportSettings::default());
		assert!(bytes.starts_with(b"%PDF-"));
		assert!(contains(&bytes, b"/Count 2"));
		assert!(contains(&bytes, b"/BaseFont /Courier-Bold"));
		assert!(contains(&bytes, b"(hello) Tj"));
		assert!(contains(&bytes, b"(second) Tj"));
		assert!(contains(&bytes, b"(OSINT Report: General) Tj"));
		assert!(contains(&bytes, b"(Target: Unknown) Tj"));
		assert!(contains(&bytes, b"startxref"));
	}
}
