use serde::Deserialize;
use thiserror::Error;

/// Fence tag that marks an embedded tech-stack graph.
pub const GRAPH_TAG: &str = "tech_stack_graph";

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct SpecNode {
	pub id: String,
	pub label: String,
	pub category: Category,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct SpecEdge {
	pub from: String,
	pub to: String,
}

/// Decoded body of a `tech_stack_graph` fence.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct GraphSpec {
	pub nodes: Vec<SpecNode>,
	pub edges: Vec<SpecEdge>,
}

#[derive(Debug, Error)]
pub enum GraphSpecError {
	#[error("invalid graph notation: {0}")]
	Json(#[from] serde_json::Error),
}

impl GraphSpec {
	pub fn from_json(body: &str) -> Result<Self, GraphSpecError> {
		Ok(serde_json::from_str(body)?)
	}
}

/// Node category. The known set maps to fixed colors; anything else is kept
/// verbatim and drawn in the neutral color.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum Category {
	Frontend,
	Backend,
	Database,
	Infrastructure,
	Utility,
	Other(String),
}

impl From<String> for Category {
	fn from(name: String) -> Self {
		match name.as_str() {
			"Frontend" => Self::Frontend,
			"Backend" => Self::Backend,
			"Database" => Self::Database,
			"Infrastructure" => Self::Infrastructure,
			"Utility" => Self::Utility,
			_ => Self::Other(name),
		}
	}
}

impl Category {
	pub fn name(&self) -> &str {
		match self {
			Self::Frontend => "Frontend",
			Self::Backend => "Backend",
			Self::Database => "Database",
			Self::Infrastructure => "Infrastructure",
			Self::Utility => "Utility",
			Self::Other(name) => name,
		}
	}

	pub fn color(&self) -> &'static str {
		match self {
			Self::Frontend => "#0ea5e9",
			Self::Backend => "#10b981",
			Self::Database => "#f59e0b",
			Self::Infrastructure => "#8b5cf6",
			Self::Utility => "#64748b",
			Self::Other(_) => "#94a3b8",
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn decodes_single_node_graph() {
		let spec = GraphSpec::from_json(
			r#"{"nodes":[{"id":"a","label":"A","category":"Frontend"}],"edges":[]}"#,
		)
		.unwrap();
		assert_eq!(spec.nodes.len(), 1);
		assert_eq!(spec.nodes[0].category, Category::Frontend);
		assert!(spec.edges.is_empty());
	}

	#[test]
	fn unknown_category_keeps_its_name() {
		let spec = GraphSpec::from_json(
			r#"{"nodes":[{"id":"cdn","label":"Cloudflare","category":"CDN"}],"edges":[]}"#,
		)
		.unwrap();
		assert_eq!(spec.nodes[0].category.name(), "CDN");
		assert_eq!(spec.nodes[0].category.color(), "#94a3b8");
	}

	#[test]
	fn rejects_wrong_shape() {
		assert!(GraphSpec::from_json("{not json").is_err());
		assert!(GraphSpec::from_json(r#"{"nodes":[]}"#).is_err());
		assert!(GraphSpec::from_json(r#"{"nodes":[{"id":"a"}],"edges":[]}"#).is_err());
		assert!(GraphSpec::from_json(r#"[1, 2, 3]"#).is_err());
	}

	#[test]
	fn ignores_extra_fields() {
		let spec = GraphSpec::from_json(
			r#"{"nodes":[{"id":"a","label":"A","category":"Backend","weight":3}],"edges":[],"title":"x"}"#,
		)
		.unwrap();
		assert_eq!(spec.nodes[0].label, "A");
	}
}
