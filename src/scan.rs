//! Session-level scan records and the tool catalog that produces them.

use std::collections::HashSet;

use thiserror::Error;

/// A citation returned alongside a report.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Source {
	/// Display title.
	pub title: String,
	/// Link target.
	pub url: String,
}

/// Category a tool is grouped under on the dashboard.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToolCategory {
	/// Search-only reconnaissance.
	Passive,
	/// Port and service analysis.
	Network,
	/// Stack and threat analysis.
	Analysis,
	/// Reserved for tools that touch the target directly.
	Active,
}

impl ToolCategory {
	/// Dashboard display order.
	pub const ORDER: [ToolCategory; 4] = [Self::Passive, Self::Network, Self::Analysis, Self::Active];

	/// Label shown in section headers and card badges.
	pub fn name(self) -> &'static str {
		match self {
			Self::Passive => "Passive",
			Self::Network => "Network",
			Self::Analysis => "Analysis",
			Self::Active => "Active",
		}
	}
}

/// Closed set of tool icons.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Icon {
	Globe,
	FileText,
	Activity,
	Layers,
	ShieldAlert,
	Search,
}

impl Icon {
	/// Text glyph used to draw the icon.
	pub fn glyph(self) -> &'static str {
		match self {
			Self::Globe => "🌐",
			Self::FileText => "📄",
			Self::Activity => "📈",
			Self::Layers => "🗂",
			Self::ShieldAlert => "🛡",
			Self::Search => "🔍",
		}
	}
}

/// Intelligence modules offered on the dashboard.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Tool {
	/// Public footprint of an organization.
	GeneralRecon,
	/// Domain registration details.
	WhoisIntel,
	/// Likely exposed ports and scan strategies.
	NmapAdvisor,
	/// Frameworks, hosting and libraries.
	TechStack,
	/// CVEs, breaches and reputation.
	ThreatIntel,
	/// Indexed subdomains and portals.
	SubdomainFinder,
}

impl Tool {
	/// Catalog order.
	pub const ALL: [Tool; 6] = [
		Self::GeneralRecon,
		Self::WhoisIntel,
		Self::NmapAdvisor,
		Self::TechStack,
		Self::ThreatIntel,
		Self::SubdomainFinder,
	];

	/// Stable identifier stored in scan records.
	pub fn id(self) -> &'static str {
		match self {
			Self::GeneralRecon => "GENERAL_RECON",
			Self::WhoisIntel => "WHOIS_INTEL",
			Self::NmapAdvisor => "NMAP_ADVISOR",
			Self::TechStack => "TECH_STACK",
			Self::ThreatIntel => "THREAT_INTEL",
			Self::SubdomainFinder => "SUBDOMAIN_FINDER",
		}
	}

	/// Display name.
	pub fn name(self) -> &'static str {
		match self {
			Self::GeneralRecon => "General Recon",
			Self::WhoisIntel => "Whois Intel",
			Self::NmapAdvisor => "Port Intel Advisor",
			Self::TechStack => "Stack Analyzer",
			Self::ThreatIntel => "Threat Landscape",
			Self::SubdomainFinder => "Subdomain Scout",
		}
	}

	/// One-line summary for the tool card.
	pub fn description(self) -> &'static str {
		match self {
			Self::GeneralRecon => "Aggregates public data, business details, and online footprint.",
			Self::WhoisIntel => {
				"Retrieves domain registration details, registrar info, and contact data."
			}
			Self::NmapAdvisor => {
				"Analyzes target for likely open services and generates Nmap strategies."
			}
			Self::TechStack => "Identifies frameworks, CMS, hosting providers, and libraries used.",
			Self::ThreatIntel => "Searches for associated CVEs, breaches, and reputation scores.",
			Self::SubdomainFinder => {
				"Uses search operators to find indexed subdomains and hidden pages."
			}
		}
	}

	/// Dashboard section.
	pub fn category(self) -> ToolCategory {
		match self {
			Self::GeneralRecon | Self::WhoisIntel | Self::SubdomainFinder => ToolCategory::Passive,
			Self::NmapAdvisor => ToolCategory::Network,
			Self::TechStack | Self::ThreatIntel => ToolCategory::Analysis,
		}
	}

	/// Card icon.
	pub fn icon(self) -> Icon {
		match self {
			Self::GeneralRecon => Icon::Globe,
			Self::WhoisIntel => Icon::FileText,
			Self::NmapAdvisor => Icon::Activity,
			Self::TechStack => Icon::Layers,
			Self::ThreatIntel => Icon::ShieldAlert,
			Self::SubdomainFinder => Icon::Search,
		}
	}

	/// Tools in `category`, in catalog order.
	pub fn in_category(category: ToolCategory) -> impl Iterator<Item = Tool> {
		Self::ALL.into_iter().filter(move |t| t.category() == category)
	}
}

/// Rejected scan input.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TargetError {
	/// Nothing but whitespace was entered.
	#[error("no target given")]
	Empty,
	/// The target contains characters no domain, IP or URL host has.
	#[error("'{0}' is not a domain or IP address")]
	Malformed(String),
}

/// Trims the entered target and checks it looks like a host name or address.
pub fn validate_target(input: &str) -> Result<&str, TargetError> {
	let target = input.trim();
	if target.is_empty() {
		return Err(TargetError::Empty);
	}
	let allowed = |c: char| c.is_alphanumeric() || matches!(c, '.' | '-' | '_' | ':' | '/');
	if !target.chars().all(allowed) {
		return Err(TargetError::Malformed(target.to_string()));
	}
	Ok(target)
}

/// One completed scan. Never modified after creation.
#[derive(Clone, Debug, PartialEq)]
pub struct ScanRecord {
	/// Session-unique id.
	pub id: String,
	/// Tool that produced the report.
	pub tool: Tool,
	/// Domain or IP as entered.
	pub target: String,
	/// Completion time, milliseconds since the epoch.
	pub timestamp: f64,
	/// Report text, rendered by the console.
	pub raw_output: String,
	/// Citations, deduplicated by URL.
	pub sources: Vec<Source>,
}

/// Append-only list of this session's scans.
#[derive(Clone, Debug, Default)]
pub struct ScanHistory {
	records: Vec<ScanRecord>,
	next_id: u64,
}

impl ScanHistory {
	/// Records a finished scan and returns the stored copy.
	pub fn record(
		&mut self,
		tool: Tool,
		target: &str,
		timestamp: f64,
		raw_output: String,
		sources: Vec<Source>,
	) -> ScanRecord {
		self.next_id += 1;
		let mut seen = HashSet::new();
		let record = ScanRecord {
			id: format!("scan-{}", self.next_id),
			tool,
			target: target.to_string(),
			timestamp,
			raw_output,
			sources: sources
				.into_iter()
				.filter(|s| seen.insert(s.url.clone()))
				.collect(),
		};
		self.records.push(record.clone());
		record
	}

	/// Newest first.
	pub fn newest_first(&self) -> impl Iterator<Item = &ScanRecord> {
		self.records.iter().rev()
	}

	/// Number of recorded scans.
	pub fn len(&self) -> usize {
		self.records.len()
	}

	/// Whether nothing was recorded yet.
	pub fn is_empty(&self) -> bool {
		self.records.is_empty()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn source(title: &str, url: &str) -> Source {
		Source {
			title: title.into(),
			url: url.into(),
		}
	}

	#[test]
	fn history_is_append_only_and_newest_first() {
		let mut history = ScanHistory::default();
		let first = history.record(Tool::WhoisIntel, "a.com", 1.0, "one".into(), vec![]);
		let second = history.record(Tool::TechStack, "b.com", 2.0, "two".into(), vec![]);
		assert_ne!(first.id, second.id);
		assert_eq!(history.len(), 2);
		let order: Vec<&str> = history.newest_first().map(|r| r.target.as_str()).collect();
		assert_eq!(order, vec!["b.com", "a.com"]);
		assert_eq!(history.newest_first().last(), Some(&first));
	}

	#[test]
	fn sources_are_deduplicated_by_url() {
		let mut history = ScanHistory::default();
		let record = history.record(
			Tool::GeneralRecon,
			"a.com",
			1.0,
			"r".into(),
			vec![
				source("A", "https://a"),
				source("B", "https://b"),
				source("A again", "https://a"),
			],
		);
		let urls: Vec<&str> = record.sources.iter().map(|s| s.url.as_str()).collect();
		assert_eq!(urls, vec!["https://a", "https://b"]);
		assert_eq!(record.sources[0].title, "A");
	}

	#[test]
	fn targets_are_trimmed_and_checked() {
		assert_eq!(validate_target("  example.com "), Ok("example.com"));
		assert_eq!(validate_target("10.0.0.1"), Ok("10.0.0.1"));
		assert_eq!(validate_target("   "), Err(TargetError::Empty));
		assert_eq!(
			validate_target("exa mple.com"),
			Err(TargetError::Malformed("exa mple.com".into()))
		);
	}

	#[test]
	fn catalog_groups_by_category() {
		let passive: Vec<Tool> = Tool::in_category(ToolCategory::Passive).collect();
		assert_eq!(
			passive,
			vec![Tool::GeneralRecon, Tool::WhoisIntel, Tool::SubdomainFinder]
		);
		assert_eq!(Tool::in_category(ToolCategory::Active).count(), 0);
		assert_eq!(Tool::NmapAdvisor.icon(), Icon::Activity);
	}
}
