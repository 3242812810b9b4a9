//! Canned reports so the dashboard can be driven without a model backend.

use crate::components::force_graph::GRAPH_TAG;
use crate::scan::{Source, Tool};

const STACK_GRAPH: &str = r#"{
  "nodes": [
    {"id": "cdn", "label": "Cloudflare", "category": "Infrastructure"},
    {"id": "web", "label": "React", "category": "Frontend"},
    {"id": "api", "label": "Node.js", "category": "Backend"},
    {"id": "db", "label": "PostgreSQL", "category": "Database"},
    {"id": "cache", "label": "Redis", "category": "Database"},
    {"id": "analytics", "label": "Google Analytics", "category": "Utility"}
  ],
  "edges": [
    {"from": "cdn", "to": "web"},
    {"from": "web", "to": "api"},
    {"from": "api", "to": "db"},
    {"from": "api", "to": "cache"},
    {"from": "web", "to": "analytics"}
  ]
}"#;

const PORT_TABLE: &str = "\
PORT     STATE    SERVICE
22/tcp   open     ssh
80/tcp   open     http
443/tcp  open     https
3306/tcp filtered mysql
8080/tcp closed   http-proxy";

fn findings(tool: Tool, target: &str) -> String {
	match tool {
		Tool::GeneralRecon => format!(
			"## Organization Footprint\n\
			 Primary Domain: {target}\n\
			 Industry: Software and IT services\n\
			 - Corporate site indexed with **public contact pages**\n\
			 - Social profiles linked from the footer\n\
			 - Job postings mention `Kubernetes` and `Terraform`\n"
		),
		Tool::WhoisIntel => format!(
			"## Registration\n\
			 Domain Name: {target}\n\
			 Registrar: Example Registrar, Inc.\n\
			 Creation Date: 2014-03-02\n\
			 Registry Expiry Date: 2027-03-02\n\
			 Name Servers: ns1.{target}, ns2.{target}\n\
			 - Registrant details are **privacy protected**\n"
		),
		Tool::NmapAdvisor => format!(
			"## Likely Exposed Services\n\
			 ```nmap\n{PORT_TABLE}\n```\n\
			 ## Suggested Strategy\n\
			 1. Start with a service scan: `nmap -sV -Pn {target}`\n\
			 2. Confirm TLS configuration on **443/tcp**\n\
			 3. Treat the filtered database port as out of scope without written approval\n"
		),
		Tool::TechStack => format!(
			"## Detected Technologies\n\
			 - Edge network: **Cloudflare**\n\
			 - Frontend: React single-page app\n\
			 - Backend: Node.js API behind `/api`\n\
			 ```{GRAPH_TAG}\n{STACK_GRAPH}\n```\n"
		),
		Tool::ThreatIntel => "## Reputation\n\
			 Blocklist Status: Not listed\n\
			 Known Breaches: 1 (2019, credential stuffing)\n\
			 ## Related CVEs\n\
			 - **CVE-2021-44228** in a legacy Java service, patched\n\
			 - **CVE-2023-44487** HTTP/2 rapid reset, mitigated at the edge\n"
			.to_string(),
		Tool::SubdomainFinder => format!(
			"## Indexed Subdomains\n\
			 1. `www.{target}`\n\
			 2. `mail.{target}`\n\
			 3. `staging.{target}` exposes a login page\n\
			 ### Search Operators\n\
			 ```text\nsite:*.{target} -www\nsite:{target} inurl:admin\n```\n"
		),
	}
}

/// Builds a report for `tool` against `target` in the console's markdown subset.
pub fn demo_report(tool: Tool, target: &str) -> (String, Vec<Source>) {
	let text = format!(
		"# {name} Report\n\
		 Module: {id}\n\
		 Target: {target}\n\
		 \n\
		 {findings}\n\
		 See the [module reference](https://osint.example/modules/{id}) for methodology.\n",
		name = tool.name(),
		id = tool.id(),
		findings = findings(tool, target),
	);
	let sources = vec![
		Source {
			title: format!("{} public records", target),
			url: format!("https://osint.example/lookup/{target}"),
		},
		Source {
			title: format!("{} methodology", tool.name()),
			url: format!("https://osint.example/modules/{}", tool.id()),
		},
	];
	(text, sources)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::force_graph::GraphSpec;

	#[test]
	fn every_tool_has_a_titled_report() {
		for tool in Tool::ALL {
			let (text, sources) = demo_report(tool, "example.com");
			assert!(text.starts_with(&format!("# {} Report\n", tool.name())));
			assert!(text.contains("Target: example.com\n"));
			assert_eq!(sources.len(), 2);
		}
	}

	#[test]
	fn stack_report_embeds_a_valid_graph() {
		let (text, _) = demo_report(Tool::TechStack, "example.com");
		assert!(text.contains(&format!("```{GRAPH_TAG}\n")));
		let spec = GraphSpec::from_json(STACK_GRAPH).unwrap();
		assert_eq!(spec.nodes.len(), 6);
		assert_eq!(spec.edges.len(), 5);
	}

	#[test]
	fn port_advisor_report_embeds_a_port_table() {
		let (text, _) = demo_report(Tool::NmapAdvisor, "example.com");
		assert!(text.contains("```nmap\nPORT"));
		assert!(text.contains("22/tcp   open     ssh"));
	}
}
