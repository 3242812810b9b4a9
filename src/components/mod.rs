pub mod console_output;
pub mod force_graph;
pub mod tool_card;
pub mod visualizations;
